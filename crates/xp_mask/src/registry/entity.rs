use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::any::{TypeId, type_name};
use core::fmt;

use crate::Mask;
use crate::registry::{FieldRegistry, ValueSpec};

// -----------------------------------------------------------------------------
// Entity

/// A type whose instances can be projected through a [`Mask`].
///
/// `declare` lists the attributes the type itself exposes. Inherited
/// attributes come from the supertype named with [`EntityDecl::extends`].
///
/// # Examples
///
/// ```
/// use xp_mask::registry::{Entity, EntityDecl, FieldRegistry};
/// use xp_mask::{mask, resolver};
///
/// struct Account { id: u64, password: String, owner: Person }
/// struct Person { name: String }
///
/// impl Entity for Account {
///     fn declare(decl: &mut EntityDecl<'_>) {
///         decl.expose("id").expose_entity::<Person>("owner");
///     }
/// }
///
/// impl Entity for Person {
///     fn declare(decl: &mut EntityDecl<'_>) {
///         decl.expose("name");
///     }
/// }
///
/// let mut registry = FieldRegistry::new();
/// registry.register::<Account>();
///
/// let m = resolver::resolve_of::<Account>(&registry, None);
/// assert_eq!(m, mask! { "id" => true, "owner" => { "name" => true } });
/// ```
pub trait Entity: 'static {
    /// Declare the attributes this type exposes.
    fn declare(decl: &mut EntityDecl<'_>);
}

// -----------------------------------------------------------------------------
// EntityRef

/// A deferred reference to an entity type.
///
/// Only function pointers are stored; nothing about the target is looked up
/// until resolution, so two types may reference each other in either
/// declaration order.
#[derive(Clone, Copy)]
pub struct EntityRef {
    type_id: fn() -> TypeId,
    type_name: fn() -> &'static str,
    register: Option<fn(&mut FieldRegistry) -> bool>,
}

impl EntityRef {
    /// A reference to an [`Entity`]. Registering the referencing type also
    /// registers `T`.
    #[inline]
    pub const fn of<T: Entity>() -> Self {
        Self {
            type_id: TypeId::of::<T>,
            type_name: type_name::<T>,
            register: Some(FieldRegistry::register::<T>),
        }
    }

    /// A reference to a type whose fields are registered by hand.
    ///
    /// The target must be declared in the registry before resolution.
    #[inline]
    pub const fn of_type<T: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>,
            type_name: type_name::<T>,
            register: None,
        }
    }

    /// Returns the target's `TypeId`.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// Returns the target's type name, for diagnostics.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Registers the target through its [`Entity`] impl, if it has one.
    pub(crate) fn register_into(&self, registry: &mut FieldRegistry) -> bool {
        match self.register {
            Some(register) => register(registry),
            None => false,
        }
    }
}

impl PartialEq for EntityRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for EntityRef {}

impl fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityRef").field(&self.type_name()).finish()
    }
}

// -----------------------------------------------------------------------------
// EntityDecl

/// Collects the declarations of one entity type, see [`Entity::declare`].
pub struct EntityDecl<'a> {
    registry: &'a mut FieldRegistry,
    type_id: TypeId,
    type_name: &'static str,
    dependencies: Vec<EntityRef>,
}

impl<'a> EntityDecl<'a> {
    pub(crate) fn new(
        registry: &'a mut FieldRegistry,
        type_id: TypeId,
        type_name: &'static str,
    ) -> Self {
        Self {
            registry,
            type_id,
            type_name,
            dependencies: Vec::new(),
        }
    }

    /// Entity types referenced by the declared fields and supertype.
    pub(crate) fn into_dependencies(self) -> Vec<EntityRef> {
        self.dependencies
    }

    /// Exposes `name` with an explicit [`ValueSpec`].
    pub fn expose_with(&mut self, name: impl Into<Cow<'static, str>>, spec: ValueSpec) -> &mut Self {
        if let Some(target) = spec.entity_ref() {
            self.dependencies.push(*target);
        }
        self.registry
            .register_field(self.type_id, self.type_name, name, spec);
        self
    }

    /// Exposes a plain attribute, copied verbatim.
    #[inline]
    pub fn expose(&mut self, name: impl Into<Cow<'static, str>>) -> &mut Self {
        self.expose_with(name, ValueSpec::Plain)
    }

    /// Exposes an attribute holding a `T`.
    #[inline]
    pub fn expose_entity<T: Entity>(&mut self, name: impl Into<Cow<'static, str>>) -> &mut Self {
        self.expose_with(name, ValueSpec::Entity(EntityRef::of::<T>()))
    }

    /// Exposes an attribute holding a sequence of `T`.
    #[inline]
    pub fn expose_entities<T: Entity>(&mut self, name: impl Into<Cow<'static, str>>) -> &mut Self {
        self.expose_with(name, ValueSpec::EntityArray(EntityRef::of::<T>()))
    }

    /// Exposes an opaque attribute through a literal sub-shape.
    #[inline]
    pub fn expose_shape(&mut self, name: impl Into<Cow<'static, str>>, shape: Mask) -> &mut Self {
        self.expose_with(name, ValueSpec::Shape(shape))
    }

    /// Inherits the exposed attributes of `T`.
    pub fn extends<T: Entity>(&mut self) -> &mut Self {
        let base = EntityRef::of::<T>();
        self.dependencies.push(base);
        self.registry
            .set_supertype(self.type_id, self.type_name, base);
        self
    }
}
