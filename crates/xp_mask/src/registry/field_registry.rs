use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::any::{TypeId, type_name};

use xp_utils::TypeIdMap;

use crate::registry::{Entity, EntityDecl, EntityMeta, EntityRef, FieldDecl, ValueSpec};

// -----------------------------------------------------------------------------
// FieldRegistry

/// The store of exposed-attribute declarations, keyed by [`TypeId`].
///
/// Each entry only holds what was declared directly against its type;
/// inheritance is followed at resolution time through
/// [`get_supertype`](Self::get_supertype).
///
/// # Example
///
/// ```
/// use core::any::TypeId;
/// use xp_mask::registry::{EntityRef, FieldRegistry, ValueSpec};
///
/// struct Base;
/// struct Derived;
///
/// let mut registry = FieldRegistry::new();
/// registry.register_field_of::<Base>("a", ValueSpec::Plain);
/// registry.register_field_of::<Derived>("c", ValueSpec::Plain);
/// registry.set_supertype_of::<Derived>(EntityRef::of_type::<Base>());
///
/// assert_eq!(registry.get_own_fields(TypeId::of::<Derived>()).len(), 1);
/// assert_eq!(
///     registry.get_supertype(TypeId::of::<Derived>()),
///     Some(TypeId::of::<Base>()),
/// );
/// ```
#[derive(Debug, Default)]
pub struct FieldRegistry {
    entities: TypeIdMap<EntityMeta>,
    generation: u64,
}

impl FieldRegistry {
    /// Create an empty [`FieldRegistry`].
    #[inline]
    pub const fn new() -> Self {
        Self {
            entities: TypeIdMap::new(),
            generation: 0,
        }
    }

    #[inline]
    fn entry(&mut self, type_id: TypeId, type_name: &'static str) -> &mut EntityMeta {
        self.entities
            .get_or_insert(type_id, || EntityMeta::new(type_id, type_name))
    }

    /// Creates an empty entry for `type_id` if there is none.
    ///
    /// A declared type with no fields still takes part in supertype chains
    /// and satisfies references pointing at it.
    pub fn declare_entity(&mut self, type_id: TypeId, type_name: &'static str) -> bool {
        let inserted = self
            .entities
            .try_insert(type_id, || EntityMeta::new(type_id, type_name));
        if inserted {
            self.generation += 1;
        }
        inserted
    }

    /// Typed form of [`declare_entity`](Self::declare_entity).
    #[inline]
    pub fn declare_entity_of<T: 'static>(&mut self) -> bool {
        self.declare_entity(TypeId::of::<T>(), type_name::<T>())
    }

    /// Registers `T` through its [`Entity`] impl, then every entity type it
    /// references or extends.
    ///
    /// Returns `false` and does nothing if `T` was already registered this
    /// way. The entry is marked before dependencies are visited, so mutually
    /// referencing types register each other exactly once.
    pub fn register<T: Entity>(&mut self) -> bool {
        let type_id = TypeId::of::<T>();
        let type_name = type_name::<T>();

        let meta = self.entry(type_id, type_name);
        if meta.is_declared() {
            return false;
        }
        meta.mark_declared();
        self.generation += 1;

        let mut decl = EntityDecl::new(self, type_id, type_name);
        T::declare(&mut decl);
        let dependencies = decl.into_dependencies();

        for dependency in dependencies {
            self.register_ref(dependency);
        }
        true
    }

    /// Registers the type behind `entity` if it implements [`Entity`].
    #[inline]
    pub fn register_ref(&mut self, entity: EntityRef) -> bool {
        entity.register_into(self)
    }

    /// Records one exposed attribute declared directly on `type_id`.
    ///
    /// The first declaration of a name wins; later ones are ignored with a
    /// warning and return `false`.
    pub fn register_field(
        &mut self,
        type_id: TypeId,
        type_name: &'static str,
        name: impl Into<Cow<'static, str>>,
        spec: ValueSpec,
    ) -> bool {
        let field = FieldDecl::new(name, spec);
        let meta = self.entry(type_id, type_name);
        if !meta.insert_field(field.clone()) {
            log::warn!(
                "field `{}` of `{}` is already registered, ignoring the new declaration {:?}",
                field.name(),
                type_name,
                field.spec(),
            );
            return false;
        }
        self.generation += 1;
        true
    }

    /// Typed form of [`register_field`](Self::register_field).
    #[inline]
    pub fn register_field_of<T: 'static>(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        spec: ValueSpec,
    ) -> bool {
        self.register_field(TypeId::of::<T>(), type_name::<T>(), name, spec)
    }

    /// Sets the single supertype of `type_id`.
    ///
    /// The first supertype wins; a different later one is ignored with a
    /// warning. Setting the same supertype again is a silent no-op.
    pub fn set_supertype(
        &mut self,
        type_id: TypeId,
        type_name: &'static str,
        supertype: EntityRef,
    ) -> bool {
        let meta = self.entry(type_id, type_name);
        if let Some(current) = meta.supertype() {
            if *current != supertype {
                log::warn!(
                    "`{type_name}` already extends `{}`, ignoring `{}`",
                    current.type_name(),
                    supertype.type_name(),
                );
            }
            return false;
        }
        meta.set_supertype(supertype);
        self.generation += 1;
        true
    }

    /// Typed form of [`set_supertype`](Self::set_supertype).
    #[inline]
    pub fn set_supertype_of<T: 'static>(&mut self, supertype: EntityRef) -> bool {
        self.set_supertype(TypeId::of::<T>(), type_name::<T>(), supertype)
    }

    /// Fields declared directly on `type_id`, excluding inherited ones.
    ///
    /// Empty for an unknown type.
    pub fn get_own_fields(&self, type_id: TypeId) -> &[FieldDecl] {
        match self.entities.get(&type_id) {
            Some(meta) => meta.fields(),
            None => &[],
        }
    }

    /// The immediate supertype of `type_id`.
    ///
    /// `None` when there is none, or when the supertype is not itself
    /// declared in this registry.
    pub fn get_supertype(&self, type_id: TypeId) -> Option<TypeId> {
        let supertype = self.entities.get(&type_id)?.supertype()?.type_id();
        self.contains(supertype).then_some(supertype)
    }

    /// Whether `type_id` has an entry in this registry.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.entities.contains(&type_id)
    }

    /// Returns the entry of `type_id`.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&EntityMeta> {
        self.entities.get(&type_id)
    }

    /// Returns the diagnostic name recorded for `type_id`.
    #[inline]
    pub fn type_name(&self, type_id: TypeId) -> Option<&'static str> {
        self.get(type_id).map(EntityMeta::type_name)
    }

    /// Number of entity types with an entry.
    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterates over all entries in arbitrary order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &EntityMeta> {
        self.entities.values()
    }

    /// A counter bumped by every successful mutation.
    ///
    /// Two reads returning the same value saw the same declarations.
    #[inline]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Registers every type derived with `#[entity(auto_register)]`.
    ///
    /// Repeated calls are cheap and do not duplicate anything.
    ///
    /// Returns `false` when the `auto_register` feature is disabled.
    pub fn auto_register(&mut self) -> bool {
        #[cfg(not(feature = "auto_register"))]
        return false;

        #[cfg(feature = "auto_register")]
        {
            crate::__macro_exports::auto_register::__register_types(self);
            true
        }
    }

    /// Type names of all entries, sorted. Mostly useful in diagnostics.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.iter().map(EntityMeta::type_name).collect();
        names.sort_unstable();
        names
    }
}
