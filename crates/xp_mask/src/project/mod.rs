//! Apply a [`Mask`](crate::Mask) to a plain document.
//!
//! ## Menu
//!
//! - [`project`]: filter a [`serde_json::Value`] through a mask.
//! - [`project_value`]: serialize any `T: Serialize`, then [`project`] it.
//! - [`Shaped`]: a value paired with the mask that shapes its serialization.
//! - [`ProjectError`]: the value could not be turned into a document.
//!
//! ## Rules
//!
//! - `true` entries copy the attribute verbatim.
//! - nested entries project an object recursively, and each element of an
//!   array with the same nested mask.
//! - `false` entries and absent keys are omitted.

// -----------------------------------------------------------------------------
// Modules

mod error;
mod projector;
mod shaped;

// -----------------------------------------------------------------------------
// Exports

pub use error::ProjectError;
pub use projector::{project, project_value};
pub use shaped::Shaped;
