use core::any::TypeId;
use core::fmt::Debug;
use core::hash::{BuildHasherDefault, Hasher};

use crate::hash::hashbrown::hash_map::Entry;
use crate::hash::hashbrown::{HashMap, HashSet};

// -----------------------------------------------------------------------------
// TypeIdHasher

/// Passes a [`TypeId`] through unchanged; it is already a hash.
#[derive(Default)]
struct TypeIdHasher(u64);

impl Hasher for TypeIdHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    // `TypeId` hashes through `write_u64`.
    fn write(&mut self, bytes: &[u8]) {
        self.0 = bytes
            .iter()
            .fold(self.0, |hash, &byte| hash.rotate_left(8) ^ u64::from(byte));
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.0 = i;
    }
}

type TypeIdState = BuildHasherDefault<TypeIdHasher>;

// -----------------------------------------------------------------------------
// TypeIdMap

/// A specialized map container with [`TypeId`] as the fixed key type.
///
/// The container's interface is fully abstracted, exposing no [`HashMap`]
/// specific APIs.
pub struct TypeIdMap<V>(HashMap<TypeId, V, TypeIdState>);

impl<V> TypeIdMap<V> {
    /// Creates an empty `TypeIdMap`.
    ///
    /// # Examples
    ///
    /// ```
    /// use xp_utils::TypeIdMap;
    /// let map = TypeIdMap::<i32>::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(BuildHasherDefault::new()))
    }

    /// Attempts to insert a key-value pair into the map.
    ///
    /// - Returns `true` if the key was not present and the pair was successfully inserted.
    /// - Returns `false` if the key already exists, leaving the map unchanged.
    ///
    /// The closure `f` is only called if the key is not present.
    #[inline]
    pub fn try_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> bool {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => {
                entry.insert(f());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Gets a mutable reference to the value associated with the given key,
    /// inserting the result of `f` if the key is not present.
    ///
    /// The closure `f` is only called if the key is not present.
    #[inline]
    pub fn get_or_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => entry.insert(f()),
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    /// Returns a reference to the value corresponding to the type.
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    /// Inserts a key-value pair into the map.
    pub fn insert(&mut self, type_id: TypeId, v: V) -> Option<V> {
        self.0.insert(type_id, v)
    }

    /// Clears the map, removing all key-value pairs.
    ///
    /// Keeps the allocated memory for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.0.contains_key(type_id)
    }

    /// Returns the number of elements in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// An iterator visiting all values in arbitrary order.
    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.0.values()
    }
}

impl<T> Default for TypeIdMap<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Debug for TypeIdMap<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

// -----------------------------------------------------------------------------
// TypeIdSet

/// A set of [`TypeId`]s.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use xp_utils::TypeIdSet;
///
/// let mut set = TypeIdSet::new();
/// assert!(set.insert(TypeId::of::<u8>()));
/// assert!(!set.insert(TypeId::of::<u8>()));
/// assert!(set.contains(&TypeId::of::<u8>()));
/// ```
#[derive(Clone, Default)]
pub struct TypeIdSet(HashSet<TypeId, TypeIdState>);

impl TypeIdSet {
    /// Creates an empty `TypeIdSet`.
    #[inline]
    pub const fn new() -> Self {
        Self(HashSet::with_hasher(BuildHasherDefault::new()))
    }

    /// Adds a type to the set, returns `false` if it was already present.
    #[inline]
    pub fn insert(&mut self, type_id: TypeId) -> bool {
        self.0.insert(type_id)
    }

    /// Removes a type from the set, returns `true` if it was present.
    #[inline]
    pub fn remove(&mut self, type_id: &TypeId) -> bool {
        self.0.remove(type_id)
    }

    /// Returns `true` if the set contains the type.
    #[inline]
    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.0.contains(type_id)
    }

    /// Returns the number of types in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Debug for TypeIdSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}
