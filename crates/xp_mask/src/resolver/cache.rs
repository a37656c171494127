use core::any::TypeId;

use xp_utils::TypeIdMap;

use crate::Mask;

// -----------------------------------------------------------------------------
// MaskCache

/// Base masks (no override applied) memoized per type.
///
/// Entries are only valid for the registry [generation] they were computed
/// against; a lookup or store with another generation drops them all.
///
/// [generation]: crate::registry::FieldRegistry::generation
#[derive(Debug, Default)]
pub struct MaskCache {
    generation: u64,
    masks: TypeIdMap<Mask>,
}

impl MaskCache {
    #[inline]
    pub const fn new() -> Self {
        Self {
            generation: 0,
            masks: TypeIdMap::new(),
        }
    }

    /// Returns the cached mask of `type_id` if it was computed at `generation`.
    pub fn get(&self, generation: u64, type_id: TypeId) -> Option<&Mask> {
        if self.generation != generation {
            return None;
        }
        self.masks.get(&type_id)
    }

    /// Stores the mask of `type_id` computed at `generation`.
    pub fn insert(&mut self, generation: u64, type_id: TypeId, mask: Mask) {
        if self.generation != generation {
            self.masks.clear();
            self.generation = generation;
        }
        self.masks.insert(type_id, mask);
    }

    /// Number of cached masks, stale ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.masks.len()
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::MaskCache;
    use crate::mask;

    #[test]
    fn stale_generation_misses() {
        let mut cache = MaskCache::new();
        cache.insert(3, TypeId::of::<u8>(), mask! { "a" => true });

        assert_eq!(cache.get(3, TypeId::of::<u8>()), Some(&mask! { "a" => true }));
        assert_eq!(cache.get(4, TypeId::of::<u8>()), None);
        assert_eq!(cache.get(3, TypeId::of::<u16>()), None);
    }

    #[test]
    fn newer_generation_drops_old_entries() {
        let mut cache = MaskCache::new();
        cache.insert(1, TypeId::of::<u8>(), mask! { "a" => true });
        cache.insert(1, TypeId::of::<u16>(), mask! { "b" => true });
        assert_eq!(cache.len(), 2);

        cache.insert(2, TypeId::of::<u8>(), mask! { "c" => true });
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(2, TypeId::of::<u8>()), Some(&mask! { "c" => true }));
    }
}
