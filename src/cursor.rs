//! Replayable read cursors over buffered self-describing data.
//!
//! A Serde deserializer is single-use: once a position has been offered to a
//! `Deserialize` impl and rejected, it cannot be offered again. Probing and
//! tolerant extraction both need to try several interpretations of the same
//! position, so the input is first buffered into a [`Document`] and then read
//! through [`Cursor`]s, which are `Copy` and can be decoded any number of
//! times.
//!
//! ## Cursor Kinds
//!
//! - [`Cursor`]: a single position; also a `serde::Deserializer`
//! - [`KeyedCursor`]: the entries of a mapping, with random access by key
//! - [`SequenceCursor`]: the elements of a sequence, with a moving index
//!
//! ## Example
//!
//! ```rust
//! use serde_dynamic::Document;
//!
//! let doc: Document = serde_json::from_str(r#"{"id": 7, "tags": ["a", "b"]}"#).unwrap();
//! let root = doc.cursor().keyed().unwrap();
//!
//! assert_eq!(root.decode::<u32>("id").unwrap(), 7);
//!
//! let mut tags = root.nested_sequence("tags").unwrap();
//! assert_eq!(tags.decode_next::<String>().unwrap(), "a");
//! assert_eq!(tags.current_index(), 1);
//! ```

use crate::{DynamicKey, Error, Result};
use serde::de::{self, DeserializeOwned, DeserializeSeed, Expected, Unexpected, Visitor};
use serde::{forward_to_deserialize_any, Deserialize, Deserializer};
use std::fmt;
use std::slice;

/// A buffered copy of one position of the input.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Content {
    Bool(bool),
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
    Char(char),
    String(String),
    Bytes(Vec<u8>),
    Unit,
    Some(Box<Content>),
    Newtype(Box<Content>),
    Seq(Vec<Content>),
    Map(Vec<(Content, Content)>),
}

impl Content {
    fn unexpected(&self) -> Unexpected<'_> {
        match self {
            Content::Bool(v) => Unexpected::Bool(*v),
            Content::U64(v) => Unexpected::Unsigned(*v),
            Content::I64(v) => Unexpected::Signed(*v),
            Content::F32(v) => Unexpected::Float(f64::from(*v)),
            Content::F64(v) => Unexpected::Float(*v),
            Content::Char(v) => Unexpected::Char(*v),
            Content::String(v) => Unexpected::Str(v),
            Content::Bytes(v) => Unexpected::Bytes(v),
            Content::Unit => Unexpected::Unit,
            Content::Some(_) => Unexpected::Option,
            Content::Newtype(_) => Unexpected::NewtypeStruct,
            Content::Seq(_) => Unexpected::Seq,
            Content::Map(_) => Unexpected::Map,
        }
    }
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ContentVisitor;

        impl<'de> Visitor<'de> for ContentVisitor {
            type Value = Content;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Content, E> {
                Ok(Content::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Content, E> {
                Ok(Content::I64(value))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Content, E> {
                Ok(Content::U64(value))
            }

            fn visit_f32<E>(self, value: f32) -> std::result::Result<Content, E> {
                Ok(Content::F32(value))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Content, E> {
                Ok(Content::F64(value))
            }

            fn visit_char<E>(self, value: char) -> std::result::Result<Content, E> {
                Ok(Content::Char(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Content, E> {
                Ok(Content::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Content, E> {
                Ok(Content::String(value))
            }

            fn visit_bytes<E>(self, value: &[u8]) -> std::result::Result<Content, E> {
                Ok(Content::Bytes(value.to_vec()))
            }

            fn visit_byte_buf<E>(self, value: Vec<u8>) -> std::result::Result<Content, E> {
                Ok(Content::Bytes(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Content, E> {
                Ok(Content::Unit)
            }

            fn visit_none<E>(self) -> std::result::Result<Content, E> {
                Ok(Content::Unit)
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Content, D::Error>
            where
                D: Deserializer<'de>,
            {
                Content::deserialize(deserializer).map(|inner| Content::Some(Box::new(inner)))
            }

            fn visit_newtype_struct<D>(
                self,
                deserializer: D,
            ) -> std::result::Result<Content, D::Error>
            where
                D: Deserializer<'de>,
            {
                Content::deserialize(deserializer).map(|inner| Content::Newtype(Box::new(inner)))
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Content, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Content::Seq(items))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Content, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry()? {
                    entries.push(entry);
                }
                Ok(Content::Map(entries))
            }
        }

        deserializer.deserialize_any(ContentVisitor)
    }
}

/// A fully buffered self-describing input.
///
/// Deserializing a `Document` from any self-describing format copies the
/// input into memory. Its [`cursor`](Document::cursor) can then be read as
/// often as needed.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    root: Content,
}

impl Document {
    /// A cursor at the root of the document.
    #[must_use]
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.root)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Content::deserialize(deserializer).map(|root| Document { root })
    }
}

/// A replayable read position.
///
/// `Cursor` implements [`serde::Deserializer`], so any `Deserialize` type can
/// be decoded from it, and because it is `Copy` a failed decode leaves it
/// usable for the next attempt.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    content: &'a Content,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(content: &'a Content) -> Self {
        Cursor { content }
    }

    /// Decodes the value at this position as `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        T::deserialize(self)
    }

    /// Opens the position as a mapping.
    pub fn keyed(self) -> Result<KeyedCursor<'a>> {
        match self.content {
            Content::Map(entries) => Ok(KeyedCursor { entries }),
            Content::Some(inner) | Content::Newtype(inner) => Cursor::new(inner).keyed(),
            _ => Err(Error::type_mismatch("a keyed container", &self.describe())),
        }
    }

    /// Opens the position as a sequence, with its index at the first element.
    pub fn sequence(self) -> Result<SequenceCursor<'a>> {
        match self.content {
            Content::Seq(items) => Ok(SequenceCursor { items, index: 0 }),
            Content::Some(inner) | Content::Newtype(inner) => Cursor::new(inner).sequence(),
            _ => Err(Error::type_mismatch("a sequence", &self.describe())),
        }
    }

    /// Returns `true` if the position holds an explicit null.
    #[must_use]
    pub fn is_null(self) -> bool {
        matches!(self.content, Content::Unit)
    }

    pub(crate) fn describe(self) -> String {
        self.content.unexpected().to_string()
    }

    fn invalid_type(self, exp: &dyn Expected) -> Error {
        de::Error::invalid_type(self.content.unexpected(), exp)
    }
}

impl<'de, 'a> Deserializer<'de> for Cursor<'a> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.content {
            Content::Bool(v) => visitor.visit_bool(*v),
            Content::U64(v) => visitor.visit_u64(*v),
            Content::I64(v) => visitor.visit_i64(*v),
            Content::F32(v) => visitor.visit_f32(*v),
            Content::F64(v) => visitor.visit_f64(*v),
            Content::Char(v) => visitor.visit_char(*v),
            Content::String(v) => visitor.visit_str(v),
            Content::Bytes(v) => visitor.visit_bytes(v),
            Content::Unit => visitor.visit_unit(),
            Content::Some(inner) => visitor.visit_some(Cursor::new(inner)),
            Content::Newtype(inner) => visitor.visit_newtype_struct(Cursor::new(inner)),
            Content::Seq(items) => visit_seq_ref(items, visitor),
            Content::Map(entries) => visit_map_ref(entries, visitor),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.content {
            Content::Unit => visitor.visit_none(),
            Content::Some(inner) => visitor.visit_some(Cursor::new(inner)),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.content {
            Content::Unit => visitor.visit_unit(),
            _ => Err(self.invalid_type(&visitor)),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.content {
            Content::Newtype(inner) => visitor.visit_newtype_struct(Cursor::new(inner)),
            _ => visitor.visit_newtype_struct(self),
        }
    }

    // Text targets accept text only. Numbers and booleans are never
    // stringified, which keeps the probe ladder from reading `5` as "5".
    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.content {
            Content::String(v) => visitor.visit_str(v),
            Content::Char(v) => visitor.visit_char(*v),
            Content::Newtype(inner) => Cursor::new(inner).deserialize_str(visitor),
            _ => Err(self.invalid_type(&visitor)),
        }
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    // Structs decode from mappings only. Serde's derived visitors would
    // otherwise accept a sequence positionally.
    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.content {
            Content::Map(entries) => visit_map_ref(entries, visitor),
            Content::Newtype(inner) => Cursor::new(inner).deserialize_struct(name, fields, visitor),
            _ => Err(self.invalid_type(&visitor)),
        }
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.content {
            Content::String(_) | Content::Char(_) => visitor.visit_enum(EnumRefAccess {
                variant: self.content,
                value: None,
            }),
            Content::Map(entries) if entries.len() == 1 => {
                let (variant, value) = &entries[0];
                visitor.visit_enum(EnumRefAccess {
                    variant,
                    value: Some(value),
                })
            }
            _ => Err(self.invalid_type(&"a variant name or a single-entry map")),
        }
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char
        bytes byte_buf seq tuple tuple_struct map identifier
    }
}

fn visit_seq_ref<'de, V>(items: &[Content], visitor: V) -> Result<V::Value>
where
    V: Visitor<'de>,
{
    let mut access = SeqRefAccess { iter: items.iter() };
    let value = visitor.visit_seq(&mut access)?;
    let remaining = access.iter.len();
    if remaining == 0 {
        Ok(value)
    } else {
        Err(de::Error::invalid_length(
            items.len(),
            &"fewer elements in sequence",
        ))
    }
}

fn visit_map_ref<'de, V>(entries: &[(Content, Content)], visitor: V) -> Result<V::Value>
where
    V: Visitor<'de>,
{
    let mut access = MapRefAccess {
        iter: entries.iter(),
        value: None,
    };
    let value = visitor.visit_map(&mut access)?;
    let remaining = access.iter.len();
    if remaining == 0 {
        Ok(value)
    } else {
        Err(de::Error::invalid_length(
            entries.len(),
            &"fewer elements in map",
        ))
    }
}

struct SeqRefAccess<'a> {
    iter: slice::Iter<'a, Content>,
}

impl<'de, 'a> de::SeqAccess<'de> for SeqRefAccess<'a> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(item) => seed.deserialize(Cursor::new(item)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapRefAccess<'a> {
    iter: slice::Iter<'a, (Content, Content)>,
    value: Option<&'a Content>,
}

impl<'de, 'a> de::MapAccess<'de> for MapRefAccess<'a> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(Cursor::new(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(Cursor::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct EnumRefAccess<'a> {
    variant: &'a Content,
    value: Option<&'a Content>,
}

impl<'de, 'a> de::EnumAccess<'de> for EnumRefAccess<'a> {
    type Error = Error;
    type Variant = VariantRefAccess<'a>;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(Cursor::new(self.variant))?;
        Ok((variant, VariantRefAccess { value: self.value }))
    }
}

struct VariantRefAccess<'a> {
    value: Option<&'a Content>,
}

impl<'de, 'a> de::VariantAccess<'de> for VariantRefAccess<'a> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            None | Some(Content::Unit) => Ok(()),
            Some(other) => Err(Cursor::new(other).invalid_type(&"unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(Cursor::new(value)),
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"newtype variant",
            )),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Some(Content::Seq(items)) => visit_seq_ref(items, visitor),
            Some(other) => Err(Cursor::new(other).invalid_type(&"tuple variant")),
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"tuple variant",
            )),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Some(Content::Map(entries)) => visit_map_ref(entries, visitor),
            Some(other) => Err(Cursor::new(other).invalid_type(&"struct variant")),
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"struct variant",
            )),
        }
    }
}

/// Random access to the entries of a mapping.
///
/// Lookups compare keys by their text form, so the integer key `5` is found
/// by `"5"` and the other way around. Entries whose key is neither text nor an
/// integer are invisible.
#[derive(Clone, Copy, Debug)]
pub struct KeyedCursor<'a> {
    entries: &'a [(Content, Content)],
}

impl<'a> KeyedCursor<'a> {
    /// The number of entries, including any with unusable keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the mapping has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every usable key, in input order.
    #[must_use]
    pub fn all_keys(&self) -> Vec<DynamicKey> {
        self.entries().map(|(key, _)| key).collect()
    }

    /// Iterates over the usable entries in input order.
    pub fn entries(&self) -> impl Iterator<Item = (DynamicKey, Cursor<'a>)> + 'a {
        let entries = self.entries;
        entries.iter().filter_map(|(key, value)| {
            match DynamicKey::deserialize(Cursor::new(key)) {
                Ok(key) => Some((key, Cursor::new(value))),
                Err(err) => {
                    log::trace!("skipping entry with unusable key: {}", err);
                    None
                }
            }
        })
    }

    /// Returns `true` if an entry exists for the key.
    #[must_use]
    pub fn contains(&self, key: impl Into<DynamicKey>) -> bool {
        self.get(key).is_some()
    }

    /// A cursor at the value stored under the key.
    #[must_use]
    pub fn get(&self, key: impl Into<DynamicKey>) -> Option<Cursor<'a>> {
        let key = key.into();
        let wanted = key.string_value();
        self.entries()
            .find(|(candidate, _)| candidate.string_value() == wanted)
            .map(|(_, value)| value)
    }

    /// Decodes the value stored under the key.
    ///
    /// Fails with [`Error::KeyNotFound`] when there is no such entry.
    pub fn decode<T: DeserializeOwned>(&self, key: impl Into<DynamicKey>) -> Result<T> {
        let key = key.into();
        match self.get(key.clone()) {
            Some(value) => value.decode(),
            None => Err(Error::key_not_found(&key.string_value())),
        }
    }

    /// Decodes the value stored under the key, treating a missing entry or an
    /// explicit null as `None`.
    pub fn decode_if_present<T: DeserializeOwned>(
        &self,
        key: impl Into<DynamicKey>,
    ) -> Result<Option<T>> {
        match self.get(key) {
            Some(value) if !value.is_null() => value.decode().map(Some),
            _ => Ok(None),
        }
    }

    /// Opens the value stored under the key as a mapping.
    pub fn nested_keyed(&self, key: impl Into<DynamicKey>) -> Result<KeyedCursor<'a>> {
        let key = key.into();
        match self.get(key.clone()) {
            Some(value) => value.keyed(),
            None => Err(Error::key_not_found(&key.string_value())),
        }
    }

    /// Opens the value stored under the key as a sequence.
    pub fn nested_sequence(&self, key: impl Into<DynamicKey>) -> Result<SequenceCursor<'a>> {
        let key = key.into();
        match self.get(key.clone()) {
            Some(value) => value.sequence(),
            None => Err(Error::key_not_found(&key.string_value())),
        }
    }
}

/// Ordered access to the elements of a sequence.
///
/// Reads happen at [`current_index`](SequenceCursor::current_index), which
/// only advances when a read succeeds or the element is skipped.
#[derive(Clone, Debug)]
pub struct SequenceCursor<'a> {
    items: &'a [Content],
    index: usize,
}

impl<'a> SequenceCursor<'a> {
    /// The total number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` once every element has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.index >= self.items.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.index
    }

    fn peek(&self) -> Result<Cursor<'a>> {
        self.items
            .get(self.index)
            .map(Cursor::new)
            .ok_or_else(|| Error::custom(format!("sequence exhausted at index {}", self.index)))
    }

    /// Decodes the current element and advances past it.
    ///
    /// On failure the index is left unchanged.
    pub fn decode_next<T: DeserializeOwned>(&mut self) -> Result<T> {
        let value = self.peek()?.decode()?;
        self.index += 1;
        Ok(value)
    }

    /// Opens the current element as a mapping and advances past it.
    pub fn nested_keyed_next(&mut self) -> Result<KeyedCursor<'a>> {
        let keyed = self.peek()?.keyed()?;
        self.index += 1;
        Ok(keyed)
    }

    /// Opens the current element as a sequence and advances past it.
    pub fn nested_sequence_next(&mut self) -> Result<SequenceCursor<'a>> {
        let sequence = self.peek()?.sequence()?;
        self.index += 1;
        Ok(sequence)
    }

    /// Advances past the current element without reading it.
    ///
    /// Returns `false` when already at the end.
    pub fn skip(&mut self) -> bool {
        if self.is_at_end() {
            false
        } else {
            self.index += 1;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn document(json: &str) -> Document {
        serde_json::from_str(json).unwrap()
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn test_cursor_is_replayable() {
        let doc = document("42");
        let cursor = doc.cursor();

        assert!(cursor.decode::<String>().is_err());
        assert_eq!(cursor.decode::<u8>().unwrap(), 42);
        assert_eq!(cursor.decode::<i64>().unwrap(), 42);
    }

    #[test]
    fn test_text_targets_reject_numbers() {
        let doc = document("5");
        assert!(matches!(
            doc.cursor().decode::<String>(),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_struct_requires_mapping() {
        let doc = document("[1, 2]");
        assert!(doc.cursor().decode::<Point>().is_err());

        let doc = document(r#"{"x": 1, "y": 2}"#);
        assert_eq!(doc.cursor().decode::<Point>().unwrap(), Point { x: 1, y: 2 });
    }

    #[test]
    fn test_keyed_lookup_by_string_projection() {
        let doc = document(r#"{"5": "five", "name": "n"}"#);
        let keyed = doc.cursor().keyed().unwrap();

        assert!(keyed.contains(5));
        assert_eq!(keyed.decode::<String>(5).unwrap(), "five");
        assert!(matches!(
            keyed.decode::<String>("missing"),
            Err(Error::KeyNotFound(_))
        ));
        assert_eq!(
            keyed.all_keys(),
            vec![DynamicKey::from("5"), DynamicKey::from("name")]
        );
    }

    #[test]
    fn test_decode_if_present() {
        let doc = document(r#"{"a": null, "b": 3}"#);
        let keyed = doc.cursor().keyed().unwrap();

        assert_eq!(keyed.decode_if_present::<u8>("a").unwrap(), None);
        assert_eq!(keyed.decode_if_present::<u8>("b").unwrap(), Some(3));
        assert_eq!(keyed.decode_if_present::<u8>("c").unwrap(), None);
        assert!(keyed.decode_if_present::<String>("b").is_err());
    }

    #[test]
    fn test_sequence_index_moves_on_success_only() {
        let doc = document(r#"[1, "two", [3]]"#);
        let mut seq = doc.cursor().sequence().unwrap();

        assert_eq!(seq.len(), 3);
        assert_eq!(seq.decode_next::<u8>().unwrap(), 1);
        assert!(seq.decode_next::<u8>().is_err());
        assert_eq!(seq.current_index(), 1);
        assert!(seq.nested_keyed_next().is_err());
        assert_eq!(seq.decode_next::<String>().unwrap(), "two");

        let mut inner = seq.nested_sequence_next().unwrap();
        assert_eq!(inner.decode_next::<u8>().unwrap(), 3);
        assert!(seq.is_at_end());
        assert!(!seq.skip());
        assert!(seq.decode_next::<u8>().is_err());
    }

    #[test]
    fn test_enum_decoding() {
        #[derive(Debug, Deserialize, PartialEq)]
        enum Shape {
            Empty,
            Circle(f64),
            Rect { w: u8, h: u8 },
        }

        assert_eq!(document(r#""Empty""#).cursor().decode::<Shape>().unwrap(), Shape::Empty);
        assert_eq!(
            document(r#"{"Circle": 1.5}"#).cursor().decode::<Shape>().unwrap(),
            Shape::Circle(1.5)
        );
        assert_eq!(
            document(r#"{"Rect": {"w": 2, "h": 3}}"#)
                .cursor()
                .decode::<Shape>()
                .unwrap(),
            Shape::Rect { w: 2, h: 3 }
        );
    }
}
