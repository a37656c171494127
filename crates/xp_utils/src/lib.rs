//! Container utilities shared by the `xp_*` crates.
//!
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId).
//! - [`TypeIdSet`]: a set of [`TypeId`](core::any::TypeId)s.
//! - [`hash`]: a fixed-seed `HashMap` and re-exports of *hashbrown* and *foldhash*.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use typeid_map::{TypeIdMap, TypeIdSet};
