//! Conversion from any `Serialize` type into a [`DynamicValue`].
//!
//! [`ValueSerializer`] is a `serde::Serializer` whose output is a
//! [`DynamicValue`] tree rather than text. Every primitive keeps its width:
//! a `u16` field becomes [`DynamicValue::UInt16`], an `f32` field becomes
//! [`DynamicValue::Float32`].
//!
//! Enums use the externally tagged layout. Unit variants become their name
//! as text; every other variant becomes a one-entry mapping from the variant
//! name to its payload.
//!
//! `DynamicValue` has no null, so `None` and `()` cannot be converted. Mark
//! optional fields with `#[serde(skip_serializing_if = "Option::is_none")]`.
//!
//! ```rust
//! use serde::Serialize;
//! use serde_dynamic::{to_value, DynamicValue};
//!
//! #[derive(Serialize)]
//! struct Sample { id: u16, ratio: f32 }
//!
//! let value = to_value(&Sample { id: 7, ratio: 0.5 }).unwrap();
//! let map = value.as_mapping().unwrap();
//! assert_eq!(map.get("id"), Some(&DynamicValue::UInt16(7)));
//! assert_eq!(map.get("ratio"), Some(&DynamicValue::Float32(0.5)));
//! ```

use crate::{DynamicKey, DynamicMap, DynamicValue, Error, Result};
use serde::{ser, Serialize};

/// Serializes Rust values into [`DynamicValue`] trees.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<DynamicValue>,
}

pub struct SerializeTupleVariant {
    variant: &'static str,
    vec: Vec<DynamicValue>,
}

pub struct SerializeMap {
    map: DynamicMap,
    current_key: Option<DynamicKey>,
}

pub struct SerializeStructVariant {
    variant: &'static str,
    map: DynamicMap,
}

impl ser::Serializer for ValueSerializer {
    type Ok = DynamicValue;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<DynamicValue> {
        Ok(DynamicValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<DynamicValue> {
        Ok(DynamicValue::Int8(v))
    }

    fn serialize_i16(self, v: i16) -> Result<DynamicValue> {
        Ok(DynamicValue::Int16(v))
    }

    fn serialize_i32(self, v: i32) -> Result<DynamicValue> {
        Ok(DynamicValue::Int32(v))
    }

    fn serialize_i64(self, v: i64) -> Result<DynamicValue> {
        Ok(DynamicValue::Int64(v))
    }

    fn serialize_u8(self, v: u8) -> Result<DynamicValue> {
        Ok(DynamicValue::UInt8(v))
    }

    fn serialize_u16(self, v: u16) -> Result<DynamicValue> {
        Ok(DynamicValue::UInt16(v))
    }

    fn serialize_u32(self, v: u32) -> Result<DynamicValue> {
        Ok(DynamicValue::UInt32(v))
    }

    fn serialize_u64(self, v: u64) -> Result<DynamicValue> {
        Ok(DynamicValue::UInt64(v))
    }

    fn serialize_f32(self, v: f32) -> Result<DynamicValue> {
        Ok(DynamicValue::Float32(v))
    }

    fn serialize_f64(self, v: f64) -> Result<DynamicValue> {
        Ok(DynamicValue::Float64(v))
    }

    fn serialize_char(self, v: char) -> Result<DynamicValue> {
        Ok(DynamicValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<DynamicValue> {
        Ok(DynamicValue::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<DynamicValue> {
        Ok(DynamicValue::Bytes(v.to_vec()))
    }

    fn serialize_none(self) -> Result<DynamicValue> {
        Err(Error::unsupported_type("none"))
    }

    fn serialize_some<T>(self, value: &T) -> Result<DynamicValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<DynamicValue> {
        Err(Error::unsupported_type("unit"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<DynamicValue> {
        Err(Error::unsupported_type(&format!("unit struct {}", name)))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<DynamicValue> {
        Ok(DynamicValue::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<DynamicValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<DynamicValue>
    where
        T: ?Sized + Serialize,
    {
        Ok(tagged(variant, to_dynamic_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            variant,
            map: DynamicMap::with_capacity(len),
        })
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl SerializeMap {
    fn new(capacity: usize) -> Self {
        SerializeMap {
            map: DynamicMap::with_capacity(capacity),
            current_key: None,
        }
    }
}

fn tagged(variant: &'static str, payload: DynamicValue) -> DynamicValue {
    let mut map = DynamicMap::with_capacity(1);
    map.insert(variant, payload);
    DynamicValue::Mapping(map)
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = DynamicValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_dynamic_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<DynamicValue> {
        Ok(DynamicValue::List(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = DynamicValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<DynamicValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = DynamicValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<DynamicValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = DynamicValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_dynamic_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<DynamicValue> {
        Ok(tagged(self.variant, DynamicValue::List(self.vec)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = DynamicValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(DynamicKey::try_from(to_dynamic_value(key)?)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_dynamic_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<DynamicValue> {
        Ok(DynamicValue::Mapping(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = DynamicValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key, to_dynamic_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<DynamicValue> {
        Ok(DynamicValue::Mapping(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = DynamicValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key, to_dynamic_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<DynamicValue> {
        Ok(tagged(self.variant, DynamicValue::Mapping(self.map)))
    }
}

fn to_dynamic_value<T: Serialize + ?Sized>(value: &T) -> Result<DynamicValue> {
    value.serialize(ValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::to_value;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    enum Event {
        Ping,
        Move(i16),
        Resize(u8, u8),
        Rename { from: String },
    }

    #[test]
    fn test_widths_are_preserved() {
        assert_eq!(to_value(&7u16).unwrap(), DynamicValue::UInt16(7));
        assert_eq!(to_value(&-7i64).unwrap(), DynamicValue::Int64(-7));
        assert_eq!(to_value(&0.5f32).unwrap(), DynamicValue::Float32(0.5));
        assert_eq!(to_value(&'x').unwrap(), DynamicValue::from("x"));
    }

    #[test]
    fn test_enum_layout() {
        assert_eq!(to_value(&Event::Ping).unwrap(), DynamicValue::from("Ping"));
        assert_eq!(
            to_value(&Event::Move(-3)).unwrap(),
            tagged("Move", DynamicValue::Int16(-3))
        );
        assert_eq!(
            to_value(&Event::Resize(1, 2)).unwrap(),
            tagged(
                "Resize",
                DynamicValue::List(vec![DynamicValue::UInt8(1), DynamicValue::UInt8(2)])
            )
        );

        let mut fields = DynamicMap::new();
        fields.insert("from", DynamicValue::from("a"));
        assert_eq!(
            to_value(&Event::Rename { from: "a".into() }).unwrap(),
            tagged("Rename", DynamicValue::Mapping(fields))
        );
    }

    #[test]
    fn test_integer_map_keys() {
        let mut source = BTreeMap::new();
        source.insert(1u8, "one");
        source.insert(2u8, "two");

        let value = to_value(&source).unwrap();
        let map = value.as_mapping().unwrap();
        assert_eq!(map.get(1), Some(&DynamicValue::from("one")));
    }

    #[test]
    fn test_unsupported_values() {
        assert!(matches!(
            to_value(&Option::<u8>::None),
            Err(Error::UnsupportedType(_))
        ));
        assert!(matches!(to_value(&()), Err(Error::UnsupportedType(_))));

        let mut bad_keys = BTreeMap::new();
        bad_keys.insert(true, 1u8);
        assert!(matches!(to_value(&bad_keys), Err(Error::MalformedKey(_))));
    }
}
