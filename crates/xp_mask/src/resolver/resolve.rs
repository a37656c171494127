use core::any::TypeId;

use xp_utils::TypeIdSet;

use crate::registry::{FieldRegistry, ValueSpec};
use crate::{Mask, MaskValue};

// -----------------------------------------------------------------------------
// Resolve

/// Computes the mask of `type_id`, then applies `overrides` to its top level.
///
/// A type with no entry, whether the root or the target of a reference,
/// contributes an empty mask.
///
/// The result only depends on the registry contents, never on the order
/// declarations were made in.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use xp_mask::registry::{EntityRef, FieldRegistry, ValueSpec};
/// use xp_mask::{mask, resolver};
///
/// struct A;
/// struct B;
///
/// let mut registry = FieldRegistry::new();
/// registry.register_field_of::<A>("b", ValueSpec::Entity(EntityRef::of_type::<B>()));
/// registry.register_field_of::<B>("a", ValueSpec::Entity(EntityRef::of_type::<A>()));
///
/// let m = resolver::resolve(&registry, TypeId::of::<A>(), None);
/// assert_eq!(m, mask! { "b" => { "a" => false } });
/// ```
pub fn resolve(registry: &FieldRegistry, type_id: TypeId, overrides: Option<&Mask>) -> Mask {
    let mut visiting = TypeIdSet::new();
    let base = resolve_entity(registry, type_id, &mut visiting);

    match overrides {
        Some(overrides) => base.merge(overrides),
        None => base,
    }
}

/// Typed form of [`resolve`].
#[inline]
pub fn resolve_of<T: 'static>(registry: &FieldRegistry, overrides: Option<&Mask>) -> Mask {
    resolve(registry, TypeId::of::<T>(), overrides)
}

// `visiting` holds the types on the current path, `type_id` excluded.
fn resolve_entity(registry: &FieldRegistry, type_id: TypeId, visiting: &mut TypeIdSet) -> Mask {
    if !registry.contains(type_id) {
        log::debug!("resolving a type with no registered fields: {type_id:?}");
    }

    visiting.insert(type_id);
    let mask = collect_fields(registry, type_id, visiting);
    visiting.remove(&type_id);
    mask
}

fn collect_fields(registry: &FieldRegistry, type_id: TypeId, visiting: &mut TypeIdSet) -> Mask {
    let mut mask = Mask::new();

    for owner in SupertypeChain::new(registry, type_id) {
        for field in registry.get_own_fields(owner) {
            if mask.contains_key(field.name()) {
                continue;
            }

            let value = match field.spec() {
                ValueSpec::Plain => MaskValue::Expose,
                ValueSpec::Shape(shape) => MaskValue::Nested(shape.clone()),
                ValueSpec::Entity(target) | ValueSpec::EntityArray(target) => {
                    let target_id = target.type_id();
                    if visiting.contains(&target_id) {
                        log::trace!(
                            "cycle guard: `{}` is already being resolved, hiding `{}`",
                            target.type_name(),
                            field.name(),
                        );
                        MaskValue::Hidden
                    } else {
                        MaskValue::Nested(resolve_entity(registry, target_id, visiting))
                    }
                }
            };

            mask.insert(field.name(), value);
        }
    }

    mask
}

// -----------------------------------------------------------------------------
// SupertypeChain

/// Yields a type followed by its supertypes, stopping at a repeated type.
struct SupertypeChain<'a> {
    registry: &'a FieldRegistry,
    next: Option<TypeId>,
    seen: TypeIdSet,
}

impl<'a> SupertypeChain<'a> {
    fn new(registry: &'a FieldRegistry, type_id: TypeId) -> Self {
        Self {
            registry,
            next: Some(type_id),
            seen: TypeIdSet::new(),
        }
    }
}

impl Iterator for SupertypeChain<'_> {
    type Item = TypeId;

    fn next(&mut self) -> Option<TypeId> {
        let current = self.next.take()?;
        if !self.seen.insert(current) {
            log::warn!(
                "supertype cycle through `{}`, ignoring the rest of the chain",
                self.registry.type_name(current).unwrap_or_default(),
            );
            return None;
        }
        self.next = self.registry.get_supertype(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use serde_json::json;

    use super::{resolve, resolve_of};
    use crate::registry::{EntityRef, FieldRegistry, ValueSpec};
        use crate::{mask, project};

    fn entity<T: 'static>() -> ValueSpec {
        ValueSpec::Entity(EntityRef::of_type::<T>())
    }

    fn entities<T: 'static>() -> ValueSpec {
        ValueSpec::EntityArray(EntityRef::of_type::<T>())
    }

    #[test]
    fn basic_exposure() {
        // { a: marked, b: unmarked, c: marked }
        struct Item;

        let mut registry = FieldRegistry::new();
        registry.register_field_of::<Item>("a", ValueSpec::Plain);
        registry.register_field_of::<Item>("c", ValueSpec::Plain);

        let m = resolve_of::<Item>(&registry, None);
        assert_eq!(m, mask! { "a" => true, "c" => true });
    }

    #[test]
    fn nested_entity() {
        struct Outer;
        struct Inner;

        let mut registry = FieldRegistry::new();
        registry.register_field_of::<Outer>("y", ValueSpec::Plain);
        registry.register_field_of::<Outer>("other", entity::<Inner>());
        registry.register_field_of::<Inner>("a", ValueSpec::Plain);

        let m = resolve_of::<Outer>(&registry, None);
        assert_eq!(m, mask! { "y" => true, "other" => { "a" => true } });
    }

    #[test]
    fn direct_self_cycle() {
        struct A;

        let mut registry = FieldRegistry::new();
        registry.register_field_of::<A>("self", entity::<A>());

        let m = resolve_of::<A>(&registry, None);
        assert_eq!(m, mask! { "self" => false });
    }

    #[test]
    fn mutual_cycle_depth_two() {
        struct A;
        struct B;

        let mut registry = FieldRegistry::new();
        registry.register_field_of::<A>("b", entity::<B>());
        registry.register_field_of::<B>("a", entity::<A>());

        assert_eq!(
            resolve_of::<A>(&registry, None),
            mask! { "b" => { "a" => false } }
        );
        assert_eq!(
            resolve_of::<B>(&registry, None),
            mask! { "a" => { "b" => false } }
        );
    }

    #[test]
    fn mutual_cycle_depth_three() {
        struct A;
        struct B;
        struct C;

        let mut registry = FieldRegistry::new();
        registry.register_field_of::<A>("c", entity::<C>());
        registry.register_field_of::<B>("a", entity::<A>());
        registry.register_field_of::<B>("c", entity::<C>());
        registry.register_field_of::<C>("b", entity::<B>());

        let m = resolve_of::<A>(&registry, None);
        assert_eq!(
            m,
            mask! { "c" => { "b" => { "a" => false, "c" => false } } }
        );
    }

    #[test]
    fn siblings_do_not_share_the_path() {
        // Both `left` and `right` point at `Leaf`; only the path is guarded.
        struct Root;
        struct Leaf;

        let mut registry = FieldRegistry::new();
        registry.register_field_of::<Root>("left", entity::<Leaf>());
        registry.register_field_of::<Root>("right", entities::<Leaf>());
        registry.register_field_of::<Leaf>("v", ValueSpec::Plain);

        let m = resolve_of::<Root>(&registry, None);
        assert_eq!(
            m,
            mask! { "left" => { "v" => true }, "right" => { "v" => true } }
        );
    }

    #[test]
    fn array_reference() {
        struct Owner;
        struct Item;

        let mut registry = FieldRegistry::new();
        registry.register_field_of::<Owner>("id", ValueSpec::Plain);
        registry.register_field_of::<Owner>("items", entities::<Item>());
        registry.register_field_of::<Item>("a", ValueSpec::Plain);

        let m = resolve_of::<Owner>(&registry, None);
        assert_eq!(m, mask! { "id" => true, "items" => { "a" => true } });
    }

    #[test]
    fn single_inheritance_union() {
        struct Base;
        struct Derived;

        let mut registry = FieldRegistry::new();
        registry.register_field_of::<Base>("a", ValueSpec::Plain);
        registry.register_field_of::<Derived>("c", ValueSpec::Plain);
        registry.set_supertype_of::<Derived>(EntityRef::of_type::<Base>());

        assert_eq!(
            resolve_of::<Derived>(&registry, None),
            mask! { "a" => true, "c" => true }
        );
        assert_eq!(
            resolve_of::<Base>(&registry, None),
            mask! { "a" => true }
        );
    }

    #[test]
    fn deep_inheritance_closest_declaration_wins() {
        struct Root;
        struct Middle;
        struct Leaf;
        struct Other;

        let mut registry = FieldRegistry::new();
        registry.register_field_of::<Root>("r", ValueSpec::Plain);
        registry.register_field_of::<Root>("shared", ValueSpec::Plain);
        registry.declare_entity_of::<Middle>();
        registry.set_supertype_of::<Middle>(EntityRef::of_type::<Root>());
        registry.register_field_of::<Leaf>("shared", entity::<Other>());
        registry.set_supertype_of::<Leaf>(EntityRef::of_type::<Middle>());
        registry.register_field_of::<Other>("o", ValueSpec::Plain);

        let m = resolve_of::<Leaf>(&registry, None);
        assert_eq!(m, mask! { "r" => true, "shared" => { "o" => true } });
    }

    #[test]
    fn supertype_cycle_terminates() {
        struct A;
        struct B;

        let mut registry = FieldRegistry::new();
        registry.register_field_of::<A>("a", ValueSpec::Plain);
        registry.register_field_of::<B>("b", ValueSpec::Plain);
        registry.set_supertype_of::<A>(EntityRef::of_type::<B>());
        registry.set_supertype_of::<B>(EntityRef::of_type::<A>());

        let m = resolve_of::<A>(&registry, None);
        assert_eq!(m, mask! { "a" => true, "b" => true });
    }

    #[test]
    fn literal_sub_shape() {
        struct Holder;

        let mut registry = FieldRegistry::new();
        registry.register_field_of::<Holder>("blob", ValueSpec::Shape(mask! { "k" => true }));

        let m = resolve_of::<Holder>(&registry, None);
        assert_eq!(m, mask! { "blob" => { "k" => true } });

        let doc = json!({ "blob": { "k": "v1", "other": "v2" }, "hidden": 1 });
        assert_eq!(project::project(&doc, &m), json!({ "blob": { "k": "v1" } }));
    }

    #[test]
    fn override_precedence() {
        struct Item;

        let mut registry = FieldRegistry::new();
        registry.register_field_of::<Item>("a", ValueSpec::Plain);
        registry.register_field_of::<Item>("c", ValueSpec::Plain);

        let m = resolve_of::<Item>(&registry, Some(&mask! { "a" => false }));
        assert_eq!(m, mask! { "a" => false, "c" => true });
    }

    #[test]
    fn override_does_not_reach_nested_masks() {
        struct Outer;
        struct Inner;

        let mut registry = FieldRegistry::new();
        registry.register_field_of::<Outer>("a", ValueSpec::Plain);
        registry.register_field_of::<Outer>("inner", entity::<Inner>());
        registry.register_field_of::<Inner>("a", ValueSpec::Plain);

        let m = resolve_of::<Outer>(&registry, Some(&mask! { "a" => false, "extra" => true }));
        assert_eq!(
            m,
            mask! { "a" => false, "extra" => true, "inner" => { "a" => true } }
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        struct A;
        struct B;

        let steps: [fn(&mut FieldRegistry); 3] = [
            |r: &mut FieldRegistry| {
                r.register_field_of::<A>("x", ValueSpec::Plain);
            },
            |r: &mut FieldRegistry| {
                r.register_field_of::<A>("b", entity::<B>());
            },
            |r: &mut FieldRegistry| {
                r.register_field_of::<B>("y", ValueSpec::Plain);
            },
        ];

        let mut forward = FieldRegistry::new();
        steps.iter().for_each(|step| step(&mut forward));
        let mut backward = FieldRegistry::new();
        steps.iter().rev().for_each(|step| step(&mut backward));

        let first = resolve_of::<A>(&forward, None);
        assert_eq!(first, resolve_of::<A>(&forward, None));
        assert_eq!(first, resolve_of::<A>(&backward, None));
    }

    #[test]
    fn unknown_root_resolves_to_empty() {
        struct Nothing;

        let registry = FieldRegistry::new();
        assert!(resolve(&registry, TypeId::of::<Nothing>(), None).is_empty());
        assert_eq!(
            resolve_of::<Nothing>(&registry, Some(&mask! { "a" => true })),
            mask! { "a" => true }
        );
    }

    #[test]
    fn reference_to_unmarked_type_is_empty() {
        struct Outer;
        struct Inner;

        let mut registry = FieldRegistry::new();
        registry.register_field_of::<Outer>("y", ValueSpec::Plain);
        registry.register_field_of::<Outer>("inner", entity::<Inner>());

        assert!(resolve_of::<Inner>(&registry, None).is_empty());
        assert_eq!(
            resolve_of::<Outer>(&registry, None),
            mask! { "y" => true, "inner" => {} }
        );
    }

    #[test]
    fn unmarked_type_below_the_root_is_empty() {
        struct Outer;
        struct Middle;
        struct Missing;

        let mut registry = FieldRegistry::new();
        registry.register_field_of::<Outer>("middle", entity::<Middle>());
        registry.register_field_of::<Middle>("missing", entities::<Missing>());

        let expected = mask! { "middle" => { "missing" => {} } };
        assert_eq!(resolve_of::<Outer>(&registry, None), expected);

        // Declaring the type without fields changes nothing.
        registry.declare_entity_of::<Missing>();
        assert_eq!(resolve_of::<Outer>(&registry, None), expected);
    }
}
