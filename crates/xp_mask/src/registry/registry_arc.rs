use alloc::sync::Arc;
use core::any::TypeId;
use std::sync::{LazyLock, PoisonError};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::Mask;
use crate::registry::{Entity, FieldRegistry};
use crate::resolver::{self, MaskCache};

// -----------------------------------------------------------------------------
// FieldRegistryArc

/// A shared [`FieldRegistry`] plus a cache of resolved masks.
///
/// Any number of readers may resolve concurrently; the cache is keyed by the
/// registry generation, so registrations made through [`write`](Self::write)
/// invalidate it without extra bookkeeping.
#[derive(Clone, Default)]
pub struct FieldRegistryArc {
    /// The wrapped [`FieldRegistry`].
    pub internal: Arc<RwLock<FieldRegistry>>,
    cache: Arc<RwLock<MaskCache>>,
}

impl FieldRegistryArc {
    /// Takes a read lock on the underlying [`FieldRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, FieldRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`FieldRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, FieldRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `T` unless it is already declared, see [`FieldRegistry::register`].
    pub fn register<T: Entity>(&self) -> bool {
        if self
            .read()
            .get(TypeId::of::<T>())
            .is_some_and(|meta| meta.is_declared())
        {
            return false;
        }
        self.write().register::<T>()
    }

    /// Like [`resolver::resolve`], reusing the cached base mask when the
    /// registry has not changed since it was computed.
    pub fn resolve(&self, type_id: TypeId, overrides: Option<&Mask>) -> Mask {
        let registry = self.read();
        let generation = registry.generation();

        let cached = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(generation, type_id)
            .cloned();

        let base = match cached {
            Some(base) => {
                log::trace!("mask cache hit for {type_id:?}");
                base
            }
            None => {
                log::trace!("mask cache miss for {type_id:?}");
                let base = resolver::resolve(&registry, type_id, None);
                self.cache
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(generation, type_id, base.clone());
                base
            }
        };

        match overrides {
            Some(overrides) => base.merge(overrides),
            None => base,
        }
    }

    /// Typed form of [`resolve`](Self::resolve).
    #[inline]
    pub fn resolve_of<T: 'static>(&self, overrides: Option<&Mask>) -> Mask {
        self.resolve(TypeId::of::<T>(), overrides)
    }

    /// Number of cached masks.
    pub fn cached_len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl core::fmt::Debug for FieldRegistryArc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.read().type_names(), f)
    }
}

// -----------------------------------------------------------------------------
// Global

/// The process-wide registry.
///
/// Created on first access; with the `auto_register` feature every
/// `#[entity(auto_register)]` type is registered at that point.
pub fn global() -> &'static FieldRegistryArc {
    static GLOBAL: LazyLock<FieldRegistryArc> = LazyLock::new(|| {
        let registry = FieldRegistryArc::default();
        registry.write().auto_register();
        registry
    });
    &GLOBAL
}
