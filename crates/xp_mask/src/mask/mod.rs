//! The exposed shape of an entity.
//!
//! ## Menu
//!
//! - [`Mask`]: attribute name to [`MaskValue`] mapping. Keys present are exposed.
//! - [`MaskValue`]: `true`, `false` (cycle guard) or a nested [`Mask`].
//! - [`mask!`](crate::mask!): literal masks.
//!
//! Masks serialize as plain objects whose values are `true`, `false`
//! or nested objects, so they can be shipped or declared in config.

// -----------------------------------------------------------------------------
// Modules

mod macros;
mod mask_serde;

// -----------------------------------------------------------------------------
// Mask

use alloc::collections::BTreeMap;
use alloc::collections::btree_map::{Iter, Keys};
use alloc::string::String;
use core::fmt;

/// A single entry of a [`Mask`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum MaskValue {
    /// Copy the attribute verbatim (`true`).
    Expose,
    /// Omit the attribute (`false`).
    ///
    /// Produced by the resolver for a reference back into the current
    /// resolution path, or supplied by an override to hide a field.
    Hidden,
    /// Project the attribute's value (or each element of an array value)
    /// through a nested mask.
    Nested(Mask),
}

impl MaskValue {
    /// `true` unless this is [`MaskValue::Hidden`].
    #[inline]
    pub const fn is_exposed(&self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

impl From<bool> for MaskValue {
    #[inline]
    fn from(value: bool) -> Self {
        if value { Self::Expose } else { Self::Hidden }
    }
}

impl From<Mask> for MaskValue {
    #[inline]
    fn from(value: Mask) -> Self {
        Self::Nested(value)
    }
}

impl fmt::Debug for MaskValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expose => f.write_str("true"),
            Self::Hidden => f.write_str("false"),
            Self::Nested(mask) => fmt::Debug::fmt(mask, f),
        }
    }
}

/// A mapping from attribute name to [`MaskValue`].
///
/// Keys are kept ordered, so equality, `Debug` output and serialization
/// never depend on insertion order.
///
/// # Examples
///
/// ```
/// use xp_mask::{mask, Mask, MaskValue};
///
/// let mut m = Mask::new();
/// m.insert("id", MaskValue::Expose);
/// m.insert("owner", mask! { "name" => true });
///
/// assert_eq!(m, mask! { "id" => true, "owner" => { "name" => true } });
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Mask(BTreeMap<String, MaskValue>);

impl Mask {
    /// Creates an empty mask.
    #[inline]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder form of [`insert`](Self::insert).
    #[inline]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<MaskValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets the entry for `name`, returning the previous one.
    #[inline]
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<MaskValue>,
    ) -> Option<MaskValue> {
        self.0.insert(name.into(), value.into())
    }

    /// Removes the entry for `name`.
    #[inline]
    pub fn remove(&mut self, name: &str) -> Option<MaskValue> {
        self.0.remove(name)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&MaskValue> {
        self.0.get(name)
    }

    #[inline]
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in key order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, String, MaskValue> {
        self.0.iter()
    }

    /// Iterates keys in order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, String, MaskValue> {
        self.0.keys()
    }

    /// Shallow merge: every key of `overrides` replaces (or adds) the entry
    /// of the same name, other entries of `self` are kept as they are.
    ///
    /// Nested masks are replaced whole, never merged recursively.
    ///
    /// # Examples
    ///
    /// ```
    /// use xp_mask::mask;
    ///
    /// let base = mask! { "a" => true, "c" => true, "n" => { "x" => true, "y" => true } };
    /// let merged = base.merge(&mask! { "a" => false, "n" => { "x" => true }, "z" => true });
    ///
    /// assert_eq!(
    ///     merged,
    ///     mask! { "a" => false, "c" => true, "n" => { "x" => true }, "z" => true },
    /// );
    /// ```
    pub fn merge(&self, overrides: &Mask) -> Mask {
        let mut merged = self.clone();
        merged.merge_from(overrides);
        merged
    }

    /// In-place form of [`merge`](Self::merge).
    pub fn merge_from(&mut self, overrides: &Mask) {
        for (name, value) in overrides.iter() {
            self.0.insert(name.clone(), value.clone());
        }
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl<K: Into<String>, V: Into<MaskValue>> FromIterator<(K, V)> for Mask {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Mask {
    type Item = (&'a String, &'a MaskValue);
    type IntoIter = Iter<'a, String, MaskValue>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Mask {
    type Item = (String, MaskValue);
    type IntoIter = alloc::collections::btree_map::IntoIter<String, MaskValue>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
