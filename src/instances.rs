//! Tolerant, recursive extraction of every instance of a type.
//!
//! Given irregular data, the extractor walks every mapping and sequence
//! depth-first and collects each position that decodes as `T`. Positions
//! that are neither a `T` nor a container are skipped without error.
//!
//! ## Entry Points
//!
//! - [`InstancesOf<T>`]: a `Deserialize` wrapper for whole documents or fields
//! - [`deserialize`]: a `deserialize_with` helper yielding a plain `Vec<T>`
//! - [`KeyedCursor::instances_of`] and [`SequenceCursor::instances_of`] for
//!   hand-written `Deserialize` impls that already hold a cursor
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_dynamic::InstancesOf;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Item { id: u32, name: String }
//!
//! let json = r#"[1, {"id": 2, "name": "Item 2"}, "Invalid"]"#;
//! let items: InstancesOf<Item> = serde_json::from_str(json).unwrap();
//!
//! assert_eq!(items.len(), 1);
//! assert_eq!(items[0], Item { id: 2, name: "Item 2".into() });
//! ```

use crate::cursor::{Cursor, Document, KeyedCursor, SequenceCursor};
use crate::{DynamicKey, DynamicValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::Deref;

/// Every instance of `T` found anywhere inside a document.
///
/// Decoding an `InstancesOf<T>` only fails when the host format itself
/// fails, for example on a syntax error. Shape and type mismatches yield
/// fewer (possibly zero) elements instead.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InstancesOf<T> {
    elements: Vec<T>,
}

impl<T> InstancesOf<T> {
    /// Consumes the wrapper, returning the collected elements.
    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.elements
    }
}

impl<T: DeserializeOwned> InstancesOf<T> {
    /// Collects every instance of `T` reachable from the cursor.
    ///
    /// A mapping is searched through all of its fields and a sequence through
    /// all of its elements. Any other position contributes itself if it
    /// decodes as `T`, and nothing otherwise.
    pub fn from_cursor(cursor: Cursor<'_>) -> Self {
        let elements = if let Ok(keyed) = cursor.keyed() {
            keyed.instances_of()
        } else if let Ok(mut sequence) = cursor.sequence() {
            sequence.instances_of()
        } else {
            match cursor.decode() {
                Ok(item) => vec![item],
                Err(err) => {
                    log::debug!("no instances found at {}: {}", cursor.describe(), err);
                    Vec::new()
                }
            }
        };

        InstancesOf { elements }
    }
}

impl<T> Default for InstancesOf<T> {
    fn default() -> Self {
        InstancesOf {
            elements: Vec::new(),
        }
    }
}

impl<T> Deref for InstancesOf<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.elements
    }
}

impl<T> From<Vec<T>> for InstancesOf<T> {
    fn from(elements: Vec<T>) -> Self {
        InstancesOf { elements }
    }
}

impl<T> From<InstancesOf<T>> for Vec<T> {
    fn from(instances: InstancesOf<T>) -> Self {
        instances.elements
    }
}

impl<T> FromIterator<T> for InstancesOf<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        InstancesOf {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for InstancesOf<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a InstancesOf<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for InstancesOf<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let document = Document::deserialize(deserializer)?;
        Ok(InstancesOf::from_cursor(document.cursor()))
    }
}

impl<T: Serialize> Serialize for InstancesOf<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(&self.elements)
    }
}

/// Extracts every instance of `T` from a single field.
///
/// Use with `#[serde(deserialize_with = "serde_dynamic::instances::deserialize")]`
/// on a `Vec<T>` field.
///
/// ```rust
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Page {
///     #[serde(deserialize_with = "serde_dynamic::instances::deserialize")]
///     ids: Vec<u32>,
/// }
///
/// let page: Page = serde_json::from_str(r#"{"ids": [1, "x", {"nested": 2}]}"#).unwrap();
/// assert_eq!(page.ids, vec![1, 2]);
/// ```
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    InstancesOf::<T>::deserialize(deserializer).map(InstancesOf::into_inner)
}

impl<'a> KeyedCursor<'a> {
    /// Collects every instance of `T` found under any field, depth-first in
    /// field order.
    ///
    /// A field that decodes as `T` is taken as is and not searched further.
    pub fn instances_of<T: DeserializeOwned>(&self) -> Vec<T> {
        let mut elements = Vec::new();

        for (key, value) in self.entries() {
            if let Ok(item) = value.decode::<T>() {
                elements.push(item);
            } else if let Ok(nested) = value.keyed() {
                elements.extend(nested.instances_of::<T>());
            } else if let Ok(mut nested) = value.sequence() {
                elements.extend(nested.instances_of::<T>());
            } else {
                log::trace!("skipping field {}: {}", key, value.describe());
            }
        }

        elements
    }

    /// Collects every instance of `T` under one field.
    ///
    /// A missing field yields an empty list.
    pub fn instances_of_key<T: DeserializeOwned>(&self, key: impl Into<DynamicKey>) -> Vec<T> {
        match self.get(key) {
            Some(value) => InstancesOf::<T>::from_cursor(value).into_inner(),
            None => Vec::new(),
        }
    }

    /// Like [`instances_of_key`](KeyedCursor::instances_of_key), but
    /// distinguishes a missing or null field (`None`) from a field without
    /// matches (`Some` of an empty list).
    pub fn instances_of_key_if_present<T: DeserializeOwned>(
        &self,
        key: impl Into<DynamicKey>,
    ) -> Option<Vec<T>> {
        match self.get(key) {
            Some(value) if !value.is_null() => {
                Some(InstancesOf::<T>::from_cursor(value).into_inner())
            }
            _ => None,
        }
    }
}

impl<'a> SequenceCursor<'a> {
    /// Collects every instance of `T` among the remaining elements,
    /// depth-first in element order.
    ///
    /// Every element is consumed, including those that match nothing, so the
    /// cursor is always at its end afterwards.
    pub fn instances_of<T: DeserializeOwned>(&mut self) -> Vec<T> {
        let mut elements = Vec::new();

        while !self.is_at_end() {
            if let Ok(item) = self.decode_next::<T>() {
                elements.push(item);
            } else if let Ok(nested) = self.nested_keyed_next() {
                elements.extend(nested.instances_of::<T>());
            } else if let Ok(mut nested) = self.nested_sequence_next() {
                elements.extend(nested.instances_of::<T>());
            } else {
                let index = self.current_index();
                if let Err(err) = self.decode_next::<DynamicValue>() {
                    log::trace!("skipping undecodable element {}: {}", index, err);
                    self.skip();
                }
            }
        }

        elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u32,
        name: String,
    }

    fn extract<T: DeserializeOwned>(json: &str) -> Vec<T> {
        serde_json::from_str::<InstancesOf<T>>(json)
            .unwrap()
            .into_inner()
    }

    #[test]
    fn test_heterogeneous_list() {
        let items: Vec<Item> = extract(r#"[1, {"id": 2, "name": "Item 2"}, "Invalid"]"#);
        assert_eq!(
            items,
            vec![Item {
                id: 2,
                name: "Item 2".to_string()
            }]
        );
    }

    #[test]
    fn test_recurses_through_nesting() {
        let numbers: Vec<i32> =
            extract(r#"{"numbers": [{"numbers": [1, 2]}, {"numbers": [3, 4]}]}"#);
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_scalar_root() {
        assert!(extract::<i32>(r#""INVALID""#).is_empty());
        assert_eq!(extract::<i32>("5"), vec![5]);
    }

    #[test]
    fn test_nulls_are_skipped() {
        let numbers: Vec<u8> = extract(r#"[null, 1, [null, 2], {"a": null, "b": 3}]"#);
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_matching_container_is_not_searched() {
        let lists: Vec<Vec<u8>> = extract(r#"{"a": [1, 2], "b": {"c": [3]}}"#);
        assert_eq!(lists, vec![vec![1, 2], vec![3]]);
    }

    #[test]
    fn test_single_field_entry_points() {
        let doc: Document =
            serde_json::from_str(r#"{"ids": [1, "x", 2], "none": null}"#).unwrap();
        let keyed = doc.cursor().keyed().unwrap();

        assert_eq!(keyed.instances_of_key::<u8>("ids"), vec![1, 2]);
        assert!(keyed.instances_of_key::<u8>("missing").is_empty());
        assert_eq!(keyed.instances_of_key_if_present::<u8>("missing"), None);
        assert_eq!(keyed.instances_of_key_if_present::<u8>("none"), None);
        assert_eq!(
            keyed.instances_of_key_if_present::<String>("ids"),
            Some(vec!["x".to_string()])
        );
    }

    #[test]
    fn test_sequence_cursor_is_exhausted() {
        let doc: Document = serde_json::from_str(r#"[true, null, "a", 4]"#).unwrap();
        let mut sequence = doc.cursor().sequence().unwrap();

        assert_eq!(sequence.instances_of::<u8>(), vec![4]);
        assert!(sequence.is_at_end());
    }
}
