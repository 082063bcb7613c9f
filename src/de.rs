//! Conversion from a [`DynamicValue`] into any `Deserialize` type.
//!
//! [`ValueDeserializer`] walks an owned value tree and visits every variant
//! at its own width. Dates are offered as RFC 3339 text, so any date type
//! that parses RFC 3339 can read them.
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_dynamic::{dynamic, from_value};
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Point { x: i32, y: i32 }
//!
//! let value = dynamic!({ "x": 1, "y": 2 });
//! let point: Point = from_value(value).unwrap();
//! assert_eq!(point, Point { x: 1, y: 2 });
//! ```

use crate::{DynamicKey, DynamicMap, DynamicValue, Error, Result};
use serde::de::{self, IntoDeserializer, Unexpected};
use serde::forward_to_deserialize_any;

/// Deserializes Rust values out of an owned [`DynamicValue`].
pub struct ValueDeserializer {
    value: DynamicValue,
}

impl ValueDeserializer {
    pub fn new(value: DynamicValue) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> IntoDeserializer<'de, Error> for DynamicValue {
    type Deserializer = ValueDeserializer;

    fn into_deserializer(self) -> ValueDeserializer {
        ValueDeserializer::new(self)
    }
}

fn unexpected(value: &DynamicValue) -> Unexpected<'_> {
    match value {
        DynamicValue::Bool(b) => Unexpected::Bool(*b),
        DynamicValue::String(s) => Unexpected::Str(s),
        DynamicValue::Bytes(b) => Unexpected::Bytes(b),
        DynamicValue::Mapping(_) => Unexpected::Map,
        DynamicValue::List(_) => Unexpected::Seq,
        DynamicValue::Float64(_) | DynamicValue::Float32(_) => {
            Unexpected::Float(value.as_f64().unwrap_or_default())
        }
        DynamicValue::Int(_)
        | DynamicValue::Int8(_)
        | DynamicValue::Int16(_)
        | DynamicValue::Int32(_)
        | DynamicValue::Int64(_) => Unexpected::Signed(value.as_i64().unwrap_or_default()),
        DynamicValue::UInt(_)
        | DynamicValue::UInt8(_)
        | DynamicValue::UInt16(_)
        | DynamicValue::UInt32(_)
        | DynamicValue::UInt64(_) => Unexpected::Unsigned(value.as_u64().unwrap_or_default()),
        DynamicValue::Date(_) => Unexpected::Other("date"),
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            DynamicValue::Date(dt) => visitor.visit_string(dt.to_rfc3339()),
            DynamicValue::Bool(b) => visitor.visit_bool(b),
            DynamicValue::String(s) => visitor.visit_string(s),
            DynamicValue::Float64(v) => visitor.visit_f64(v),
            DynamicValue::Float32(v) => visitor.visit_f32(v),
            DynamicValue::Int(v) => visitor.visit_i64(v as i64),
            DynamicValue::Int8(v) => visitor.visit_i8(v),
            DynamicValue::Int16(v) => visitor.visit_i16(v),
            DynamicValue::Int32(v) => visitor.visit_i32(v),
            DynamicValue::Int64(v) => visitor.visit_i64(v),
            DynamicValue::UInt(v) => visitor.visit_u64(v as u64),
            DynamicValue::UInt8(v) => visitor.visit_u8(v),
            DynamicValue::UInt16(v) => visitor.visit_u16(v),
            DynamicValue::UInt32(v) => visitor.visit_u32(v),
            DynamicValue::UInt64(v) => visitor.visit_u64(v),
            DynamicValue::Bytes(b) => visitor.visit_byte_buf(b),
            DynamicValue::Mapping(map) => visitor.visit_map(MapDeserializer::new(map)),
            DynamicValue::List(list) => visitor.visit_seq(SeqDeserializer::new(list)),
        }
    }

    // There is no null, so every present value is `Some`.
    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            DynamicValue::String(variant) => visitor.visit_enum(EnumDeserializer {
                variant: DynamicKey::String(variant),
                value: None,
            }),
            DynamicValue::Mapping(map) if map.len() == 1 => {
                match map.into_iter().next() {
                    Some((variant, value)) => visitor.visit_enum(EnumDeserializer {
                        variant,
                        value: Some(value),
                    }),
                    None => Err(Error::custom("Expected enum variant")),
                }
            }
            other => Err(de::Error::invalid_type(
                unexpected(&other),
                &"a variant name or a single-entry mapping",
            )),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<DynamicValue>,
}

impl SeqDeserializer {
    fn new(vec: Vec<DynamicValue>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<DynamicKey, DynamicValue>,
    value: Option<DynamicValue>,
}

impl MapDeserializer {
    fn new(map: DynamicMap) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(DynamicValue::from(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct EnumDeserializer {
    variant: DynamicKey,
    value: Option<DynamicValue>,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(DynamicValue::from(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Option<DynamicValue>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            None => Ok(()),
            Some(other) => Err(de::Error::invalid_type(unexpected(&other), &"unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"newtype variant",
            )),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(DynamicValue::List(list)) => visitor.visit_seq(SeqDeserializer::new(list)),
            Some(other) => Err(de::Error::invalid_type(unexpected(&other), &"tuple variant")),
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"tuple variant",
            )),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(DynamicValue::Mapping(map)) => visitor.visit_map(MapDeserializer::new(map)),
            Some(other) => Err(de::Error::invalid_type(unexpected(&other), &"struct variant")),
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"struct variant",
            )),
        }
    }
}
