//! `#[derive(Entity)]` against the registry and resolver.
#![allow(dead_code, reason = "fields only carry attributes")]

use core::any::TypeId;

use serde::Serialize;
use serde_json::json;

use crate::derive::Entity;
use crate::project::{Shaped, project_value};
use crate::registry::{FieldRegistry, ValueSpec};
use crate::resolver::resolve_of;
use crate::{MaskValue, mask};

#[derive(Entity, Serialize)]
struct Person {
    #[expose]
    name: String,
    secret: String,
}

#[derive(Entity, Serialize)]
struct Team {
    #[expose]
    title: String,
    #[expose(entity = Person)]
    lead: Person,
    #[expose(entities = Person)]
    members: Vec<Person>,
    #[expose(shape(color, size(w, h)))]
    style: serde_json::Value,
    #[expose]
    #[serde(rename = "type")]
    kind: String,
    internal: u32,
}

#[test]
fn derive_declares_marked_fields() {
    let mut registry = FieldRegistry::new();
    assert!(registry.register::<Team>());
    assert!(registry.contains(TypeId::of::<Person>()));

    let own = registry.get_own_fields(TypeId::of::<Team>());
    let names: Vec<_> = own.iter().map(|f| f.name()).collect();
    assert_eq!(names, ["title", "lead", "members", "style", "type"]);
    assert!(matches!(own[1].spec(), ValueSpec::Entity(_)));
    assert!(matches!(own[2].spec(), ValueSpec::EntityArray(_)));
}

#[test]
fn derive_resolves_full_mask() {
    let mut registry = FieldRegistry::new();
    registry.register::<Team>();

    let m = resolve_of::<Team>(&registry, None);
    assert_eq!(
        m,
        mask! {
            "title" => true,
            "lead" => { "name" => true },
            "members" => { "name" => true },
            "style" => { "color" => true, "size" => { "w" => true, "h" => true } },
            "type" => true,
        }
    );
}

#[test]
fn derive_projects_instance() {
    let mut registry = FieldRegistry::new();
    registry.register::<Team>();
    let m = resolve_of::<Team>(&registry, None);

    let team = Team {
        title: "core".into(),
        lead: Person {
            name: "ada".into(),
            secret: "x".into(),
        },
        members: vec![Person {
            name: "bob".into(),
            secret: "y".into(),
        }],
        style: json!({ "color": "red", "size": { "w": 1, "h": 2, "d": 3 }, "font": "mono" }),
        kind: "squad".into(),
        internal: 7,
    };

    let projected = project_value(&team, &m).unwrap();
    assert_eq!(
        projected,
        json!({
            "title": "core",
            "lead": { "name": "ada" },
            "members": [{ "name": "bob" }],
            "style": { "color": "red", "size": { "w": 1, "h": 2 } },
            "type": "squad",
        })
    );

    let body = serde_json::to_value(Shaped::new(&team, &m)).unwrap();
    assert_eq!(body, projected);
}

#[derive(Entity, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct Profile {
    #[expose]
    display_name: String,
    #[expose]
    #[serde(rename(serialize = "ID", deserialize = "id"))]
    user_id: u64,
    #[expose]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    avatar_url: Option<String>,
    last_login: u64,
}

#[test]
fn derive_follows_serde_names() {
    let mut registry = FieldRegistry::new();
    registry.register::<Profile>();
    let m = resolve_of::<Profile>(&registry, None);
    assert_eq!(
        m,
        mask! { "displayName" => true, "ID" => true, "avatarUrl" => true }
    );

    let profile = Profile {
        display_name: "Ada".into(),
        user_id: 9,
        avatar_url: Some("a.png".into()),
        last_login: 1,
    };
    assert_eq!(
        serde_json::to_value(Shaped::new(&profile, &m)).unwrap(),
        json!({ "displayName": "Ada", "ID": 9, "avatarUrl": "a.png" })
    );
}

#[derive(Entity)]
struct Legacy {
    #[expose(rename = "legacyId")]
    id: u64,
}

#[test]
fn derive_explicit_rename() {
    let mut registry = FieldRegistry::new();
    registry.register::<Legacy>();
    assert_eq!(
        resolve_of::<Legacy>(&registry, None),
        mask! { "legacyId" => true }
    );
}

#[derive(Entity)]
struct Animal {
    #[expose]
    id: u64,
    #[expose]
    name: String,
}

#[derive(Entity)]
#[entity(extends = Animal)]
struct Dog {
    #[expose]
    breed: String,
    #[expose(entity = Dog)]
    parent: Option<Box<Dog>>,
}

#[derive(Entity)]
#[entity(extends = Dog)]
struct Puppy {
    #[expose]
    age: u8,
}

#[test]
fn derive_extends_chain() {
    let mut registry = FieldRegistry::new();
    registry.register::<Puppy>();

    assert_eq!(
        registry.get_supertype(TypeId::of::<Puppy>()),
        Some(TypeId::of::<Dog>())
    );
    assert_eq!(
        resolve_of::<Puppy>(&registry, None),
        mask! {
            "id" => true,
            "name" => true,
            "breed" => true,
            "parent" => { "id" => true, "name" => true, "breed" => true, "parent" => false },
            "age" => true,
        }
    );
    assert_eq!(
        resolve_of::<Dog>(&registry, None).get("parent"),
        Some(&MaskValue::Hidden)
    );
}

#[derive(Entity)]
struct Keywords {
    #[expose]
    r#type: String,
    #[expose(shape(r#match, r#ref(r#in)))]
    r#loop: u8,
}

#[test]
fn derive_unraws_identifiers() {
    let mut registry = FieldRegistry::new();
    registry.register::<Keywords>();

    assert_eq!(
        resolve_of::<Keywords>(&registry, None),
        mask! { "type" => true, "loop" => { "match" => true, "ref" => { "in" => true } } }
    );
}

#[derive(Entity)]
struct Marker;

#[test]
fn derive_unit_struct_has_empty_mask() {
    let mut registry = FieldRegistry::new();
    assert!(registry.register::<Marker>());
    assert!(resolve_of::<Marker>(&registry, None).is_empty());
}

#[test]
fn global_resolve_with_override() {
    #[derive(Entity)]
    struct Post {
        #[expose]
        title: String,
        #[expose]
        body: String,
    }

    let m = crate::resolve::<Post>(Some(&mask! { "body" => false, "extra" => true }));
    assert_eq!(m, mask! { "title" => true, "body" => false, "extra" => true });
    assert!(!crate::register::<Post>());
}

#[cfg(feature = "auto_register")]
#[test]
fn auto_register_populates_global() {
    #[derive(Entity)]
    #[entity(auto_register)]
    struct Registered {
        #[expose]
        id: u64,
    }

    let global = crate::registry::global();
    assert!(global.read().contains(TypeId::of::<Registered>()));
    assert_eq!(
        global.resolve_of::<Registered>(None),
        mask! { "id" => true }
    );
}
