//! Process-wide record of which attributes each entity type exposes.
//!
//! ## Menu
//!
//! - [`Entity`]: implemented by types that declare exposed attributes
//!   (usually through [`derive(Entity)`](crate::derive::Entity)).
//! - [`EntityRef`]: a deferred reference to an entity type.
//! - [`ValueSpec`]: what an exposed attribute holds.
//! - [`FieldDecl`]: one exposed attribute of one type.
//! - [`EntityMeta`]: everything declared directly against one type.
//! - [`FieldRegistry`]: the store of `EntityMeta`s.
//! - [`FieldRegistryArc`]: a shared, lockable registry with a mask cache.
//! - [`global`]: the process-wide registry.
//!
//! ## Duplicates
//!
//! Registration is append-only and first write wins: a second declaration of
//! the same attribute on the same type, or a second supertype, is ignored
//! with a warning.
//!
//! ## auto_register
//!
//! With the `auto_register` feature, types deriving `Entity` with
//! `#[entity(auto_register)]` are collected through the [`inventory`] crate and
//! registered into [`global`] the first time it is accessed.
//! See [`FieldRegistry::auto_register`].
//!
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod entity;
mod field;
mod field_registry;
mod registry_arc;

// -----------------------------------------------------------------------------
// Exports

pub use entity::{Entity, EntityDecl, EntityRef};
pub use field::{EntityMeta, FieldDecl, ValueSpec};
pub use field_registry::FieldRegistry;
pub use registry_arc::{FieldRegistryArc, global};
