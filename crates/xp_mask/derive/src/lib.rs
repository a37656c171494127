//! See following macros:
//!
//! - [`Entity`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static ENTITY_ATTRIBUTE_NAME: &str = "entity";
static EXPOSE_ATTRIBUTE_NAME: &str = "expose";
static SERDE_ATTRIBUTE_NAME: &str = "serde";

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod entity;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Entity Derivation
///
/// `#[derive(Entity)]` implements `xp_mask::registry::Entity` for a struct
/// with named fields, declaring the fields marked with `#[expose]`.
/// Unmarked fields are never part of the mask.
///
/// ## Field Attributes
///
/// ```rust, ignore
/// #[derive(Entity)]
/// struct Account {
///     #[expose]                      // `true`
///     id: u64,
///     #[expose(entity = Person)]     // the mask of `Person`
///     owner: Person,
///     #[expose(entities = Person)]   // the mask of `Person`, applied per element
///     members: Vec<Person>,
///     #[expose(shape(k, sub(a, b)))] // { k: true, sub: { a: true, b: true } }
///     blob: serde_json::Value,
///     #[expose(rename = "type")]     // registered as `type`
///     kind: String,
///     password: String,              // hidden
/// }
/// ```
///
/// The mask key follows the name serde serializes the field under:
/// `#[serde(rename = "...")]` on the field and `#[serde(rename_all = "...")]`
/// on the type are honored. `#[expose(rename = "...")]` sets the key
/// explicitly, for values serialized by other means, and combines with any
/// of the other forms: `#[expose(entity = Person, rename = "person")]`.
///
/// Raw identifiers are registered without their `r#` prefix.
///
/// ## Type Attributes
///
/// ### Inheritance
///
/// ```rust, ignore
/// #[derive(Entity)]
/// #[entity(extends = Base)]
/// struct Derived { /* ... */ }
/// ```
///
/// The mask of `Derived` contains every attribute exposed by `Base`
/// (and its own supertypes) plus its own.
///
/// ### Auto Registration
///
/// ```rust, ignore
/// #[derive(Entity)]
/// #[entity(auto_register)]
/// struct A { /* ... */ }
/// ```
///
/// Registers the type into the global registry when it is first accessed.
/// This attribute is a no-op when the `auto_register` feature is disabled.
///
/// ## Limitations
///
/// Enums, unions, tuple structs and generic types are rejected.
#[proc_macro_derive(Entity, attributes(entity, expose))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match entity::EntityDerive::from_input(&ast) {
        Ok(derive) => derive.to_tokens().into(),
        Err(err) => err.into_compile_error().into(),
    }
}
