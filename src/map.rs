//! Map type for the mapping variant of [`DynamicValue`](crate::DynamicValue).
//!
//! [`DynamicMap`] is a wrapper around [`IndexMap`] keyed by [`DynamicKey`].
//! Entries iterate in insertion order, which keeps encoding deterministic,
//! but order carries no meaning: two maps with the same entries are equal
//! and hash the same regardless of order.
//!
//! ## Examples
//!
//! ```rust
//! use serde_dynamic::{DynamicMap, DynamicValue};
//!
//! let mut map = DynamicMap::new();
//! map.insert("name", DynamicValue::from("Alice"));
//! map.insert(7, DynamicValue::from(30u8));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::{DynamicKey, DynamicValue};
use indexmap::IndexMap;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// An insertion-ordered map of [`DynamicKey`] to [`DynamicValue`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DynamicMap(IndexMap<DynamicKey, DynamicValue>);

impl DynamicMap {
    /// Creates an empty `DynamicMap`.
    #[must_use]
    pub fn new() -> Self {
        DynamicMap(IndexMap::new())
    }

    /// Creates an empty `DynamicMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        DynamicMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dynamic::{DynamicMap, DynamicValue};
    ///
    /// let mut map = DynamicMap::new();
    /// assert!(map.insert("key", DynamicValue::from(42)).is_none());
    /// assert!(map.insert("key", DynamicValue::from(43)).is_some());
    /// ```
    pub fn insert(
        &mut self,
        key: impl Into<DynamicKey>,
        value: DynamicValue,
    ) -> Option<DynamicValue> {
        self.0.insert(key.into(), value)
    }

    /// Returns a reference to the value stored under the key.
    #[must_use]
    pub fn get(&self, key: impl Into<DynamicKey>) -> Option<&DynamicValue> {
        self.0.get(&key.into())
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: impl Into<DynamicKey>) -> bool {
        self.0.contains_key(&key.into())
    }

    /// Removes a key, returning its value if it was present.
    pub fn remove(&mut self, key: impl Into<DynamicKey>) -> Option<DynamicValue> {
        self.0.shift_remove(&key.into())
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, DynamicKey, DynamicValue> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, DynamicKey, DynamicValue> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, DynamicKey, DynamicValue> {
        self.0.iter()
    }
}

impl Hash for DynamicMap {
    // Entry hashes are combined with a commutative sum so that the hash agrees
    // with the order-insensitive equality of `IndexMap`.
    fn hash<H: Hasher>(&self, state: &mut H) {
        let combined = self.0.iter().fold(0u64, |acc, entry| {
            let mut hasher = DefaultHasher::new();
            entry.hash(&mut hasher);
            acc.wrapping_add(hasher.finish())
        });
        self.0.len().hash(state);
        combined.hash(state);
    }
}

impl From<HashMap<DynamicKey, DynamicValue>> for DynamicMap {
    fn from(map: HashMap<DynamicKey, DynamicValue>) -> Self {
        DynamicMap(map.into_iter().collect())
    }
}

impl From<DynamicMap> for HashMap<DynamicKey, DynamicValue> {
    fn from(map: DynamicMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for DynamicMap {
    type Item = (DynamicKey, DynamicValue);
    type IntoIter = indexmap::map::IntoIter<DynamicKey, DynamicValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DynamicMap {
    type Item = (&'a DynamicKey, &'a DynamicValue);
    type IntoIter = indexmap::map::Iter<'a, DynamicKey, DynamicValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<DynamicKey>> FromIterator<(K, DynamicValue)> for DynamicMap {
    fn from_iter<T: IntoIterator<Item = (K, DynamicValue)>>(iter: T) -> Self {
        DynamicMap(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
