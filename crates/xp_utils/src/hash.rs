//! The fixed-seed [`HashMap`], and re-exports of *hashbrown* and *foldhash*.

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

const FIXED_STATE: FixedState = FixedState::with_seed(0x6A09E667F3BCC908);

/// Builds *foldhash* hashers from one fixed seed, so a hash only depends on
/// the hashed value.
///
/// Field names are hashed with it, so two registries built from the same
/// declarations lay out their indices identically.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use xp_utils::hash::FixedHashState;
///
/// assert_eq!(FixedHashState.hash_one("name"), FixedHashState.hash_one("name"));
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FoldHasher<'static>;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_STATE.build_hasher()
    }
}

/// A [`hashbrown::HashMap`] hashed with [`FixedHashState`].
pub type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
