//! Declare which attributes of an entity type are part of its public shape,
//! and compute the [`Mask`] that projects instances down to that shape.
//!
//! ```
//! use serde::Serialize;
//! use xp_mask::{derive::Entity, mask, project::Shaped};
//!
//! #[derive(Entity, Serialize)]
//! struct User {
//!     #[expose]
//!     name: String,
//!     password: String,
//!     #[expose(entities = User)]
//!     friends: Vec<User>,
//! }
//!
//! let shape = xp_mask::resolve::<User>(None);
//! assert_eq!(shape, mask! { "name" => true, "friends" => false });
//!
//! let user = User {
//!     name: "ada".into(),
//!     password: "secret".into(),
//!     friends: Vec::new(),
//! };
//! let body = serde_json::to_string(&Shaped::new(&user, &shape)).unwrap();
//! assert_eq!(body, r#"{"name":"ada"}"#);
//! ```
//!
//! ## Menu
//!
//! - [`mask`](mod@mask): the [`Mask`] value type and the [`mask!`] macro.
//! - [`registry`]: the per-type declarations and the process-wide registry.
//! - [`resolver`]: the mask computation.
//! - [`project`]: applying a mask to a document.
//! - [`derive`]: `#[derive(Entity)]`.
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Derive output names `::xp_mask`, which must also resolve inside this crate.
extern crate self as xp_mask;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod mask;
pub mod project;
pub mod registry;
pub mod resolver;

#[doc(hidden)]
pub mod __macro_exports;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use mask::{Mask, MaskValue};
pub use registry::Entity;
pub use xp_mask_derive as derive;

/// Registers `T` into the [global](registry::global) registry.
///
/// Returns `false` if it was already registered.
#[inline]
pub fn register<T: Entity>() -> bool {
    registry::global().register::<T>()
}

/// Computes the mask of `T` from the [global](registry::global) registry,
/// registering `T` first if needed.
///
/// `overrides` is shallow-merged onto the top level of the result.
pub fn resolve<T: Entity>(overrides: Option<&Mask>) -> Mask {
    let global = registry::global();
    global.register::<T>();
    global.resolve_of::<T>(overrides)
}
