use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::any::TypeId;

use xp_utils::hash::HashMap;

use crate::Mask;
use crate::registry::EntityRef;

// -----------------------------------------------------------------------------
// ValueSpec

/// What an exposed attribute holds, and so how it appears in a mask.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueSpec {
    /// A scalar or opaque value, exposed as `true`.
    Plain,
    /// An instance of another entity type, exposed as that type's mask.
    Entity(EntityRef),
    /// A sequence of entity instances. The element type's mask applies to
    /// every element; the mask itself does not record the sequence.
    EntityArray(EntityRef),
    /// An opaque object exposed through the given sub-shape, as is.
    Shape(Mask),
}

impl ValueSpec {
    /// Returns the referenced entity type, if any.
    #[inline]
    pub const fn entity_ref(&self) -> Option<&EntityRef> {
        match self {
            Self::Entity(target) | Self::EntityArray(target) => Some(target),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// FieldDecl

/// One exposed attribute declared directly on one entity type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDecl {
    name: Cow<'static, str>,
    spec: ValueSpec,
}

impl FieldDecl {
    #[inline]
    pub fn new(name: impl Into<Cow<'static, str>>, spec: ValueSpec) -> Self {
        Self {
            name: name.into(),
            spec,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub const fn spec(&self) -> &ValueSpec {
        &self.spec
    }
}

// -----------------------------------------------------------------------------
// EntityMeta

/// Declarations made directly against one entity type.
///
/// Inherited attributes are not copied here; they stay with the supertype's
/// own `EntityMeta`.
#[derive(Debug)]
pub struct EntityMeta {
    type_id: TypeId,
    type_name: &'static str,
    supertype: Option<EntityRef>,
    fields: Vec<FieldDecl>,
    // name -> index into `fields`
    index: HashMap<Cow<'static, str>, usize>,
    // `Entity::declare` has run for this type.
    declared: bool,
}

impl EntityMeta {
    pub(crate) fn new(type_id: TypeId, type_name: &'static str) -> Self {
        Self {
            type_id,
            type_name,
            supertype: None,
            fields: Vec::new(),
            index: HashMap::default(),
            declared: false,
        }
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The declared supertype, whether or not it is registered.
    #[inline]
    pub const fn supertype(&self) -> Option<&EntityRef> {
        self.supertype.as_ref()
    }

    /// Own fields, in declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    /// Returns the own field named `name`.
    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    /// Returns `false` and keeps the existing declaration on a name clash.
    pub(crate) fn insert_field(&mut self, field: FieldDecl) -> bool {
        if self.index.contains_key(field.name()) {
            return false;
        }
        self.index.insert(field.name.clone(), self.fields.len());
        self.fields.push(field);
        true
    }

    /// Returns `false` and keeps the existing supertype if one is set.
    pub(crate) fn set_supertype(&mut self, supertype: EntityRef) -> bool {
        if self.supertype.is_some() {
            return false;
        }
        self.supertype = Some(supertype);
        true
    }

    pub(crate) const fn is_declared(&self) -> bool {
        self.declared
    }

    pub(crate) fn mark_declared(&mut self) {
        self.declared = true;
    }
}
