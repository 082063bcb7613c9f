//! Dynamic value representation for self-describing data.
//!
//! This module provides the [`DynamicValue`] enum, a closed tagged union over
//! every scalar a structured format can carry (booleans, text, dates, floats
//! at two widths, signed and unsigned integers at five widths each, byte
//! blobs) and the two recursive containers (lists and keyed mappings).
//!
//! ## Core Types
//!
//! - [`DynamicValue`]: the value itself
//! - [`Kind`]: a field-less mirror of the variants, used for probe order and diagnostics
//!
//! ## Usage Patterns
//!
//! ### Decoding Unknown Data
//!
//! ```rust
//! use serde_dynamic::DynamicValue;
//! use std::collections::HashMap;
//!
//! let json = r#"{ "key": 123, "nested": [1, "two", 0.3] }"#;
//! let decoded: HashMap<String, DynamicValue> = serde_json::from_str(json).unwrap();
//!
//! assert_eq!(decoded["key"].as_isize(), Some(123));
//! assert_eq!(
//!     decoded["nested"].as_list().unwrap(),
//!     &vec![
//!         DynamicValue::UInt8(1),
//!         DynamicValue::from("two"),
//!         DynamicValue::Float32(0.3),
//!     ]
//! );
//! ```
//!
//! ### Numeric Coercion
//!
//! Every numeric variant can be read at any numeric width. Conversions follow
//! Rust's `as` casts, so narrowing truncates instead of failing:
//!
//! ```rust
//! use serde_dynamic::DynamicValue;
//!
//! let value = DynamicValue::UInt64(u64::MAX);
//! assert_eq!(value.as_i8(), Some(-1));
//! assert_eq!(DynamicValue::from("text").as_i8(), None);
//! ```

use crate::{DynamicKey, DynamicMap};
use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;

/// A dynamically-typed representation of any self-describing value.
///
/// Exactly one variant is active at a time. Container variants own their
/// children, so a value is always a finite tree.
///
/// Equality and hashing are variant-aware: `UInt8(1)` and `Int64(1)` are
/// different values. Floats compare by their canonical bit pattern, which
/// makes `-0.0` equal to `0.0` and every NaN equal to every other NaN.
///
/// # Examples
///
/// ```rust
/// use serde_dynamic::DynamicValue;
///
/// let text = DynamicValue::from("hello");
/// let byte = DynamicValue::UInt8(7);
///
/// assert!(text.is_string());
/// assert!(byte.is_number());
/// assert_ne!(byte, DynamicValue::Int64(7));
/// ```
#[derive(Clone, Debug)]
pub enum DynamicValue {
    Date(DateTime<Utc>),
    Bool(bool),
    String(String),
    Float64(f64),
    Float32(f32),
    Int(isize),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt(usize),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Bytes(Vec<u8>),
    Mapping(DynamicMap),
    List(Vec<DynamicValue>),
}

/// The variant tag of a [`DynamicValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Date,
    Bool,
    String,
    Float64,
    Float32,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Bytes,
    Mapping,
    List,
}

impl Kind {
    /// A short lowercase name for diagnostics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Kind::Date => "date",
            Kind::Bool => "bool",
            Kind::String => "string",
            Kind::Float64 => "f64",
            Kind::Float32 => "f32",
            Kind::Int => "isize",
            Kind::Int8 => "i8",
            Kind::Int16 => "i16",
            Kind::Int32 => "i32",
            Kind::Int64 => "i64",
            Kind::UInt => "usize",
            Kind::UInt8 => "u8",
            Kind::UInt16 => "u16",
            Kind::UInt32 => "u32",
            Kind::UInt64 => "u64",
            Kind::Bytes => "bytes",
            Kind::Mapping => "mapping",
            Kind::List => "list",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collapses `-0.0` into `0.0` and every NaN into one pattern.
fn canonical_f64(value: f64) -> u64 {
    if value.is_nan() {
        f64::NAN.to_bits()
    } else if value == 0.0 {
        0.0_f64.to_bits()
    } else {
        value.to_bits()
    }
}

fn canonical_f32(value: f32) -> u32 {
    if value.is_nan() {
        f32::NAN.to_bits()
    } else if value == 0.0 {
        0.0_f32.to_bits()
    } else {
        value.to_bits()
    }
}

// Reads any numeric variant at the requested width with an `as` cast.
macro_rules! coerce_numeric {
    ($value:expr, $ty:ty) => {
        #[allow(clippy::unnecessary_cast)]
        match *$value {
            DynamicValue::Float64(v) => Some(v as $ty),
            DynamicValue::Float32(v) => Some(v as $ty),
            DynamicValue::Int(v) => Some(v as $ty),
            DynamicValue::Int8(v) => Some(v as $ty),
            DynamicValue::Int16(v) => Some(v as $ty),
            DynamicValue::Int32(v) => Some(v as $ty),
            DynamicValue::Int64(v) => Some(v as $ty),
            DynamicValue::UInt(v) => Some(v as $ty),
            DynamicValue::UInt8(v) => Some(v as $ty),
            DynamicValue::UInt16(v) => Some(v as $ty),
            DynamicValue::UInt32(v) => Some(v as $ty),
            DynamicValue::UInt64(v) => Some(v as $ty),
            _ => None,
        }
    };
}

impl DynamicValue {
    /// Wraps a native value of unknown static type.
    ///
    /// Candidate types are tried in a fixed order: date, bool, text
    /// (`String` or `&'static str`), `f64`, `f32`, `isize`, `i8`, `i16`,
    /// `i32`, `i64`, `usize`, `u8`, `u16`, `u32`, `u64`, bytes (`Vec<u8>`),
    /// a mapping (`DynamicMap` or `HashMap<DynamicKey, DynamicValue>`) and a
    /// list (`Vec<DynamicValue>`). Returns `None` when nothing matches.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dynamic::DynamicValue;
    ///
    /// assert_eq!(DynamicValue::from_any(&-123i8), Some(DynamicValue::Int8(-123)));
    /// assert_eq!(DynamicValue::from_any(&()), None);
    /// ```
    pub fn from_any(value: &dyn Any) -> Option<Self> {
        if let Some(v) = value.downcast_ref::<DateTime<Utc>>() {
            Some(DynamicValue::Date(*v))
        } else if let Some(v) = value.downcast_ref::<bool>() {
            Some(DynamicValue::Bool(*v))
        } else if let Some(v) = value.downcast_ref::<String>() {
            Some(DynamicValue::String(v.clone()))
        } else if let Some(v) = value.downcast_ref::<&'static str>() {
            Some(DynamicValue::String(v.to_string()))
        } else if let Some(v) = value.downcast_ref::<f64>() {
            Some(DynamicValue::Float64(*v))
        } else if let Some(v) = value.downcast_ref::<f32>() {
            Some(DynamicValue::Float32(*v))
        } else if let Some(v) = value.downcast_ref::<isize>() {
            Some(DynamicValue::Int(*v))
        } else if let Some(v) = value.downcast_ref::<i8>() {
            Some(DynamicValue::Int8(*v))
        } else if let Some(v) = value.downcast_ref::<i16>() {
            Some(DynamicValue::Int16(*v))
        } else if let Some(v) = value.downcast_ref::<i32>() {
            Some(DynamicValue::Int32(*v))
        } else if let Some(v) = value.downcast_ref::<i64>() {
            Some(DynamicValue::Int64(*v))
        } else if let Some(v) = value.downcast_ref::<usize>() {
            Some(DynamicValue::UInt(*v))
        } else if let Some(v) = value.downcast_ref::<u8>() {
            Some(DynamicValue::UInt8(*v))
        } else if let Some(v) = value.downcast_ref::<u16>() {
            Some(DynamicValue::UInt16(*v))
        } else if let Some(v) = value.downcast_ref::<u32>() {
            Some(DynamicValue::UInt32(*v))
        } else if let Some(v) = value.downcast_ref::<u64>() {
            Some(DynamicValue::UInt64(*v))
        } else if let Some(v) = value.downcast_ref::<Vec<u8>>() {
            Some(DynamicValue::Bytes(v.clone()))
        } else if let Some(v) = value.downcast_ref::<DynamicMap>() {
            Some(DynamicValue::Mapping(v.clone()))
        } else if let Some(v) = value.downcast_ref::<HashMap<DynamicKey, DynamicValue>>() {
            Some(DynamicValue::Mapping(DynamicMap::from(v.clone())))
        } else if let Some(v) = value.downcast_ref::<Vec<DynamicValue>>() {
            Some(DynamicValue::List(v.clone()))
        } else {
            None
        }
    }

    /// The variant tag of this value.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            DynamicValue::Date(_) => Kind::Date,
            DynamicValue::Bool(_) => Kind::Bool,
            DynamicValue::String(_) => Kind::String,
            DynamicValue::Float64(_) => Kind::Float64,
            DynamicValue::Float32(_) => Kind::Float32,
            DynamicValue::Int(_) => Kind::Int,
            DynamicValue::Int8(_) => Kind::Int8,
            DynamicValue::Int16(_) => Kind::Int16,
            DynamicValue::Int32(_) => Kind::Int32,
            DynamicValue::Int64(_) => Kind::Int64,
            DynamicValue::UInt(_) => Kind::UInt,
            DynamicValue::UInt8(_) => Kind::UInt8,
            DynamicValue::UInt16(_) => Kind::UInt16,
            DynamicValue::UInt32(_) => Kind::UInt32,
            DynamicValue::UInt64(_) => Kind::UInt64,
            DynamicValue::Bytes(_) => Kind::Bytes,
            DynamicValue::Mapping(_) => Kind::Mapping,
            DynamicValue::List(_) => Kind::List,
        }
    }

    /// Returns `true` if the value is a date.
    #[inline]
    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, DynamicValue::Date(_))
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, DynamicValue::Bool(_))
    }

    /// Returns `true` if the value is text.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, DynamicValue::String(_))
    }

    /// Returns `true` for every float and integer variant.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(
            self,
            DynamicValue::Float64(_)
                | DynamicValue::Float32(_)
                | DynamicValue::Int(_)
                | DynamicValue::Int8(_)
                | DynamicValue::Int16(_)
                | DynamicValue::Int32(_)
                | DynamicValue::Int64(_)
                | DynamicValue::UInt(_)
                | DynamicValue::UInt8(_)
                | DynamicValue::UInt16(_)
                | DynamicValue::UInt32(_)
                | DynamicValue::UInt64(_)
        )
    }

    /// Returns `true` if the value is a byte blob.
    #[inline]
    #[must_use]
    pub const fn is_bytes(&self) -> bool {
        matches!(self, DynamicValue::Bytes(_))
    }

    /// Returns `true` if the value is a mapping.
    #[inline]
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, DynamicValue::Mapping(_))
    }

    /// Returns `true` if the value is a list.
    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, DynamicValue::List(_))
    }

    /// If the value is a date, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            DynamicValue::Date(dt) => Some(dt),
            _ => None,
        }
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dynamic::DynamicValue;
    ///
    /// assert_eq!(DynamicValue::Bool(true).as_bool(), Some(true));
    /// assert_eq!(DynamicValue::UInt8(1).as_bool(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DynamicValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is text, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DynamicValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a byte blob, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            DynamicValue::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// If the value is a mapping, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_mapping(&self) -> Option<&DynamicMap> {
        match self {
            DynamicValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// If the value is a list, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&Vec<DynamicValue>> {
        match self {
            DynamicValue::List(list) => Some(list),
            _ => None,
        }
    }

    /// Reads any numeric variant as `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        coerce_numeric!(self, f64)
    }

    /// Reads any numeric variant as `f32`.
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        coerce_numeric!(self, f32)
    }

    /// Reads any numeric variant as `isize`.
    ///
    /// Floats truncate toward zero and saturate at the bounds of the target;
    /// integers wrap.
    #[must_use]
    pub fn as_isize(&self) -> Option<isize> {
        coerce_numeric!(self, isize)
    }

    /// Reads any numeric variant as `i8`, truncating wider values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dynamic::DynamicValue;
    ///
    /// assert_eq!(DynamicValue::Float64(123.9).as_i8(), Some(123));
    /// assert_eq!(DynamicValue::Int16(300).as_i8(), Some(44));
    /// ```
    #[must_use]
    pub fn as_i8(&self) -> Option<i8> {
        coerce_numeric!(self, i8)
    }

    /// Reads any numeric variant as `i16`.
    #[must_use]
    pub fn as_i16(&self) -> Option<i16> {
        coerce_numeric!(self, i16)
    }

    /// Reads any numeric variant as `i32`.
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        coerce_numeric!(self, i32)
    }

    /// Reads any numeric variant as `i64`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        coerce_numeric!(self, i64)
    }

    /// Reads any numeric variant as `usize`.
    #[must_use]
    pub fn as_usize(&self) -> Option<usize> {
        coerce_numeric!(self, usize)
    }

    /// Reads any numeric variant as `u8`, truncating wider values.
    #[must_use]
    pub fn as_u8(&self) -> Option<u8> {
        coerce_numeric!(self, u8)
    }

    /// Reads any numeric variant as `u16`.
    #[must_use]
    pub fn as_u16(&self) -> Option<u16> {
        coerce_numeric!(self, u16)
    }

    /// Reads any numeric variant as `u32`.
    #[must_use]
    pub fn as_u32(&self) -> Option<u32> {
        coerce_numeric!(self, u32)
    }

    /// Reads any numeric variant as `u64`.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        coerce_numeric!(self, u64)
    }
}

impl PartialEq for DynamicValue {
    fn eq(&self, other: &Self) -> bool {
        use DynamicValue::*;

        match (self, other) {
            (Date(a), Date(b)) => a == b,
            (Bool(a), Bool(b)) => a == b,
            (String(a), String(b)) => a == b,
            (Float64(a), Float64(b)) => canonical_f64(*a) == canonical_f64(*b),
            (Float32(a), Float32(b)) => canonical_f32(*a) == canonical_f32(*b),
            (Int(a), Int(b)) => a == b,
            (Int8(a), Int8(b)) => a == b,
            (Int16(a), Int16(b)) => a == b,
            (Int32(a), Int32(b)) => a == b,
            (Int64(a), Int64(b)) => a == b,
            (UInt(a), UInt(b)) => a == b,
            (UInt8(a), UInt8(b)) => a == b,
            (UInt16(a), UInt16(b)) => a == b,
            (UInt32(a), UInt32(b)) => a == b,
            (UInt64(a), UInt64(b)) => a == b,
            (Bytes(a), Bytes(b)) => a == b,
            (Mapping(a), Mapping(b)) => a == b,
            (List(a), List(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for DynamicValue {}

impl Hash for DynamicValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);

        match self {
            DynamicValue::Date(v) => v.hash(state),
            DynamicValue::Bool(v) => v.hash(state),
            DynamicValue::String(v) => v.hash(state),
            DynamicValue::Float64(v) => canonical_f64(*v).hash(state),
            DynamicValue::Float32(v) => canonical_f32(*v).hash(state),
            DynamicValue::Int(v) => v.hash(state),
            DynamicValue::Int8(v) => v.hash(state),
            DynamicValue::Int16(v) => v.hash(state),
            DynamicValue::Int32(v) => v.hash(state),
            DynamicValue::Int64(v) => v.hash(state),
            DynamicValue::UInt(v) => v.hash(state),
            DynamicValue::UInt8(v) => v.hash(state),
            DynamicValue::UInt16(v) => v.hash(state),
            DynamicValue::UInt32(v) => v.hash(state),
            DynamicValue::UInt64(v) => v.hash(state),
            DynamicValue::Bytes(v) => v.hash(state),
            DynamicValue::Mapping(v) => v.hash(state),
            DynamicValue::List(v) => v.hash(state),
        }
    }
}

impl fmt::Display for DynamicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynamicValue::Date(dt) => write!(f, "{}", dt.to_rfc3339()),
            DynamicValue::Bool(b) => write!(f, "{}", b),
            DynamicValue::String(s) => write!(f, "{:?}", s),
            DynamicValue::Float64(v) => write!(f, "{}", v),
            DynamicValue::Float32(v) => write!(f, "{}", v),
            DynamicValue::Int(v) => write!(f, "{}", v),
            DynamicValue::Int8(v) => write!(f, "{}", v),
            DynamicValue::Int16(v) => write!(f, "{}", v),
            DynamicValue::Int32(v) => write!(f, "{}", v),
            DynamicValue::Int64(v) => write!(f, "{}", v),
            DynamicValue::UInt(v) => write!(f, "{}", v),
            DynamicValue::UInt8(v) => write!(f, "{}", v),
            DynamicValue::UInt16(v) => write!(f, "{}", v),
            DynamicValue::UInt32(v) => write!(f, "{}", v),
            DynamicValue::UInt64(v) => write!(f, "{}", v),
            DynamicValue::Bytes(bytes) => {
                f.write_str("<")?;
                for byte in bytes {
                    write!(f, "{:02x}", byte)?;
                }
                f.write_str(">")
            }
            DynamicValue::Mapping(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match key {
                        DynamicKey::String(s) => write!(f, "{:?}: {}", s, value)?,
                        DynamicKey::Integer(n) => write!(f, "{}: {}", n, value)?,
                    }
                }
                f.write_str("}")
            }
            DynamicValue::List(list) => {
                f.write_str("[")?;
                for (i, value) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl Serialize for DynamicValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DynamicValue::Date(dt) => dt.serialize(serializer),
            DynamicValue::Bool(b) => serializer.serialize_bool(*b),
            DynamicValue::String(s) => serializer.serialize_str(s),
            DynamicValue::Float64(v) => serializer.serialize_f64(*v),
            DynamicValue::Float32(v) => serializer.serialize_f32(*v),
            DynamicValue::Int(v) => serializer.serialize_i64(*v as i64),
            DynamicValue::Int8(v) => serializer.serialize_i8(*v),
            DynamicValue::Int16(v) => serializer.serialize_i16(*v),
            DynamicValue::Int32(v) => serializer.serialize_i32(*v),
            DynamicValue::Int64(v) => serializer.serialize_i64(*v),
            DynamicValue::UInt(v) => serializer.serialize_u64(*v as u64),
            DynamicValue::UInt8(v) => serializer.serialize_u8(*v),
            DynamicValue::UInt16(v) => serializer.serialize_u16(*v),
            DynamicValue::UInt32(v) => serializer.serialize_u32(*v),
            DynamicValue::UInt64(v) => serializer.serialize_u64(*v),
            DynamicValue::Bytes(bytes) => serializer.serialize_bytes(bytes),
            DynamicValue::List(list) => serializer.collect_seq(list),
            DynamicValue::Mapping(map) => {
                use serde::ser::SerializeMap;
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map.iter() {
                    state.serialize_entry(key, value)?;
                }
                state.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for DynamicValue {
    /// Containers are recognised from the shape the format reports; every
    /// scalar is buffered and handed to the probe ladder in
    /// [`SCALAR_PROBE_ORDER`](crate::probe::SCALAR_PROBE_ORDER).
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use crate::cursor::Content;
        use crate::probe::probe_scalar;

        struct DynamicValueVisitor;

        impl DynamicValueVisitor {
            fn probe<E: de::Error>(scalar: Content) -> Result<DynamicValue, E> {
                probe_scalar(&scalar).map_err(E::custom)
            }
        }

        impl<'de> Visitor<'de> for DynamicValueVisitor {
            type Value = DynamicValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any self-describing value")
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
                Self::probe(Content::Bool(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Self::probe(Content::I64(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Self::probe(Content::U64(value))
            }

            fn visit_f32<E: de::Error>(self, value: f32) -> Result<Self::Value, E> {
                Self::probe(Content::F32(value))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
                Self::probe(Content::F64(value))
            }

            fn visit_char<E: de::Error>(self, value: char) -> Result<Self::Value, E> {
                Self::probe(Content::Char(value))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Self::probe(Content::String(value.to_string()))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
                Self::probe(Content::String(value))
            }

            fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
                Self::probe(Content::Bytes(value.to_vec()))
            }

            fn visit_byte_buf<E: de::Error>(self, value: Vec<u8>) -> Result<Self::Value, E> {
                Self::probe(Content::Bytes(value))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Self::probe(Content::Unit)
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Self::probe(Content::Unit)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut list = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(element) = seq.next_element()? {
                    list.push(element);
                }
                Ok(DynamicValue::List(list))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut mapping = DynamicMap::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<DynamicKey, DynamicValue>()? {
                    mapping.insert(key, value);
                }
                Ok(DynamicValue::Mapping(mapping))
            }
        }

        deserializer.deserialize_any(DynamicValueVisitor)
    }
}

impl TryFrom<DynamicValue> for bool {
    type Error = crate::Error;

    fn try_from(value: DynamicValue) -> crate::Result<Self> {
        match value {
            DynamicValue::Bool(b) => Ok(b),
            other => Err(crate::Error::type_mismatch("bool", other.kind().as_str())),
        }
    }
}

impl TryFrom<DynamicValue> for String {
    type Error = crate::Error;

    fn try_from(value: DynamicValue) -> crate::Result<Self> {
        match value {
            DynamicValue::String(s) => Ok(s),
            other => Err(crate::Error::type_mismatch("string", other.kind().as_str())),
        }
    }
}

impl TryFrom<DynamicValue> for Vec<u8> {
    type Error = crate::Error;

    fn try_from(value: DynamicValue) -> crate::Result<Self> {
        match value {
            DynamicValue::Bytes(bytes) => Ok(bytes),
            other => Err(crate::Error::type_mismatch("bytes", other.kind().as_str())),
        }
    }
}

impl TryFrom<DynamicValue> for i64 {
    type Error = crate::Error;

    /// Accepts integer variants whose value fits in `i64`. Unlike
    /// [`DynamicValue::as_i64`], nothing is truncated.
    fn try_from(value: DynamicValue) -> crate::Result<Self> {
        fn out_of_range(v: impl fmt::Display) -> crate::Error {
            crate::Error::custom(format!("{} does not fit in i64", v))
        }

        match value {
            DynamicValue::Int(v) => i64::try_from(v).map_err(|_| out_of_range(v)),
            DynamicValue::Int8(v) => Ok(v.into()),
            DynamicValue::Int16(v) => Ok(v.into()),
            DynamicValue::Int32(v) => Ok(v.into()),
            DynamicValue::Int64(v) => Ok(v),
            DynamicValue::UInt(v) => i64::try_from(v).map_err(|_| out_of_range(v)),
            DynamicValue::UInt8(v) => Ok(v.into()),
            DynamicValue::UInt16(v) => Ok(v.into()),
            DynamicValue::UInt32(v) => Ok(v.into()),
            DynamicValue::UInt64(v) => i64::try_from(v).map_err(|_| out_of_range(v)),
            other => Err(crate::Error::type_mismatch("integer", other.kind().as_str())),
        }
    }
}

impl TryFrom<DynamicValue> for f64 {
    type Error = crate::Error;

    fn try_from(value: DynamicValue) -> crate::Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| crate::Error::type_mismatch("number", value.kind().as_str()))
    }
}

impl From<DateTime<Utc>> for DynamicValue {
    fn from(value: DateTime<Utc>) -> Self {
        DynamicValue::Date(value)
    }
}

impl From<bool> for DynamicValue {
    fn from(value: bool) -> Self {
        DynamicValue::Bool(value)
    }
}

impl From<String> for DynamicValue {
    fn from(value: String) -> Self {
        DynamicValue::String(value)
    }
}

impl From<&str> for DynamicValue {
    fn from(value: &str) -> Self {
        DynamicValue::String(value.to_string())
    }
}

impl From<f64> for DynamicValue {
    fn from(value: f64) -> Self {
        DynamicValue::Float64(value)
    }
}

impl From<f32> for DynamicValue {
    fn from(value: f32) -> Self {
        DynamicValue::Float32(value)
    }
}

impl From<isize> for DynamicValue {
    fn from(value: isize) -> Self {
        DynamicValue::Int(value)
    }
}

impl From<i8> for DynamicValue {
    fn from(value: i8) -> Self {
        DynamicValue::Int8(value)
    }
}

impl From<i16> for DynamicValue {
    fn from(value: i16) -> Self {
        DynamicValue::Int16(value)
    }
}

impl From<i32> for DynamicValue {
    fn from(value: i32) -> Self {
        DynamicValue::Int32(value)
    }
}

impl From<i64> for DynamicValue {
    fn from(value: i64) -> Self {
        DynamicValue::Int64(value)
    }
}

impl From<usize> for DynamicValue {
    fn from(value: usize) -> Self {
        DynamicValue::UInt(value)
    }
}

impl From<u8> for DynamicValue {
    fn from(value: u8) -> Self {
        DynamicValue::UInt8(value)
    }
}

impl From<u16> for DynamicValue {
    fn from(value: u16) -> Self {
        DynamicValue::UInt16(value)
    }
}

impl From<u32> for DynamicValue {
    fn from(value: u32) -> Self {
        DynamicValue::UInt32(value)
    }
}

impl From<u64> for DynamicValue {
    fn from(value: u64) -> Self {
        DynamicValue::UInt64(value)
    }
}

impl From<Vec<u8>> for DynamicValue {
    fn from(value: Vec<u8>) -> Self {
        DynamicValue::Bytes(value)
    }
}

impl From<DynamicMap> for DynamicValue {
    fn from(value: DynamicMap) -> Self {
        DynamicValue::Mapping(value)
    }
}

impl From<Vec<DynamicValue>> for DynamicValue {
    fn from(value: Vec<DynamicValue>) -> Self {
        DynamicValue::List(value)
    }
}

impl From<DynamicKey> for DynamicValue {
    fn from(value: DynamicKey) -> Self {
        match value {
            DynamicKey::String(s) => DynamicValue::String(s),
            DynamicKey::Integer(i) => DynamicValue::Int64(i),
        }
    }
}
