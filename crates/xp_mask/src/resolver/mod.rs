//! Computes the [`Mask`](crate::Mask) of an entity type.
//!
//! ## Menu
//!
//! - [`resolve`] / [`resolve_of`]: compute a mask from a [`FieldRegistry`](crate::registry::FieldRegistry).
//! - [`MaskCache`]: base masks memoized per type and registry generation.
//!
//! ## Algorithm
//!
//! 1. Walk the type and its supertypes, closest first.
//! 2. Union their own fields by name; the closest declaration wins.
//! 3. Plain fields become `true`, literal shapes are copied, and entity
//!    references are resolved recursively, except that a reference to a
//!    type already on the current resolution path becomes `false`.
//! 4. Shallow-merge the caller's override onto the top level only.

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod resolve;

// -----------------------------------------------------------------------------
// Exports

pub use cache::MaskCache;
pub use resolve::{resolve, resolve_of};
