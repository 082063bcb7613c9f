//! Keys for addressing entries of keyed containers.
//!
//! [`DynamicKey`] unifies the two kinds of keys a structured format can use:
//! text and integers. Equality and hashing include the variant, so the text
//! key `"5"` and the integer key `5` are different keys, even though both
//! project to the same string and integer.
//!
//! ```rust
//! use serde_dynamic::DynamicKey;
//!
//! let text = DynamicKey::from("5");
//! let integer = DynamicKey::from(5);
//!
//! assert_ne!(text, integer);
//! assert_eq!(text.int_value(), Some(5));
//! assert_eq!(integer.string_value(), "5");
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A key in a keyed container: either text or an integer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DynamicKey {
    String(String),
    Integer(i64),
}

/// Anything that names a field of a keyed container.
///
/// A field key always has a textual name and may additionally carry an
/// integer index. [`DynamicKey::from_field_key`] prefers the index.
pub trait FieldKey {
    /// The textual name of the key.
    fn key_str(&self) -> Cow<'_, str>;

    /// The integer index of the key, for keys that are indices.
    fn key_index(&self) -> Option<i64> {
        None
    }
}

impl FieldKey for str {
    fn key_str(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl FieldKey for String {
    fn key_str(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl FieldKey for i64 {
    fn key_str(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn key_index(&self) -> Option<i64> {
        Some(*self)
    }
}

impl FieldKey for usize {
    fn key_str(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn key_index(&self) -> Option<i64> {
        i64::try_from(*self).ok()
    }
}

impl FieldKey for DynamicKey {
    fn key_str(&self) -> Cow<'_, str> {
        self.string_value()
    }

    fn key_index(&self) -> Option<i64> {
        match self {
            DynamicKey::Integer(i) => Some(*i),
            DynamicKey::String(_) => None,
        }
    }
}

impl DynamicKey {
    /// Builds a key from any field key, preferring its integer index.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dynamic::DynamicKey;
    ///
    /// assert_eq!(DynamicKey::from_field_key("title"), DynamicKey::String("title".into()));
    /// assert_eq!(DynamicKey::from_field_key(&12345i64), DynamicKey::Integer(12345));
    /// ```
    pub fn from_field_key<K: FieldKey + ?Sized>(key: &K) -> Self {
        match key.key_index() {
            Some(index) => DynamicKey::Integer(index),
            None => DynamicKey::String(key.key_str().into_owned()),
        }
    }

    /// The text form of the key. Integer keys render in decimal.
    #[must_use]
    pub fn string_value(&self) -> Cow<'_, str> {
        match self {
            DynamicKey::String(s) => Cow::Borrowed(s),
            DynamicKey::Integer(i) => Cow::Owned(i.to_string()),
        }
    }

    /// The integer form of the key, if it has one.
    ///
    /// Text keys have an integer form when the whole text parses as an integer.
    #[must_use]
    pub fn int_value(&self) -> Option<i64> {
        match self {
            DynamicKey::String(s) => s.parse().ok(),
            DynamicKey::Integer(i) => Some(*i),
        }
    }

    /// Returns `true` if this is a text key.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, DynamicKey::String(_))
    }

    /// Returns `true` if this is an integer key.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, DynamicKey::Integer(_))
    }
}

impl fmt::Display for DynamicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynamicKey::String(s) => f.write_str(s),
            DynamicKey::Integer(i) => write!(f, "{}", i),
        }
    }
}

impl FromStr for DynamicKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DynamicKey::String(s.to_string()))
    }
}

impl From<&str> for DynamicKey {
    fn from(value: &str) -> Self {
        DynamicKey::String(value.to_string())
    }
}

impl From<String> for DynamicKey {
    fn from(value: String) -> Self {
        DynamicKey::String(value)
    }
}

impl From<i32> for DynamicKey {
    fn from(value: i32) -> Self {
        DynamicKey::Integer(value as i64)
    }
}

impl From<i64> for DynamicKey {
    fn from(value: i64) -> Self {
        DynamicKey::Integer(value)
    }
}

impl From<usize> for DynamicKey {
    fn from(value: usize) -> Self {
        DynamicKey::Integer(value as i64)
    }
}

impl Serialize for DynamicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DynamicKey::String(s) => serializer.serialize_str(s),
            DynamicKey::Integer(i) => serializer.serialize_i64(*i),
        }
    }
}

impl<'de> Deserialize<'de> for DynamicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DynamicKeyVisitor;

        impl<'de> Visitor<'de> for DynamicKeyVisitor {
            type Value = DynamicKey;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an integer or string key")
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(DynamicKey::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(DynamicKey::Integer)
                    .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(DynamicKey::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(DynamicKey::String(value))
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
        }

        deserializer.deserialize_any(DynamicKeyVisitor)
    }
}

impl TryFrom<crate::DynamicValue> for DynamicKey {
    type Error = crate::Error;

    /// Text values become text keys and integer values of any width become
    /// integer keys. Everything else is a malformed key.
    fn try_from(value: crate::DynamicValue) -> crate::Result<Self> {
        use crate::DynamicValue;

        match value {
            DynamicValue::String(s) => Ok(DynamicKey::String(s)),
            DynamicValue::Int(_)
            | DynamicValue::Int8(_)
            | DynamicValue::Int16(_)
            | DynamicValue::Int32(_)
            | DynamicValue::Int64(_)
            | DynamicValue::UInt8(_)
            | DynamicValue::UInt16(_)
            | DynamicValue::UInt32(_) => value
                .as_i64()
                .map(DynamicKey::Integer)
                .ok_or_else(|| crate::Error::malformed_key("integer out of range")),
            DynamicValue::UInt64(u) => i64::try_from(u)
                .map(DynamicKey::Integer)
                .map_err(|_| crate::Error::malformed_key(&format!("{} exceeds i64", u))),
            DynamicValue::UInt(u) => i64::try_from(u)
                .map(DynamicKey::Integer)
                .map_err(|_| crate::Error::malformed_key(&format!("{} exceeds i64", u))),
            other => Err(crate::Error::malformed_key(&format!(
                "{} cannot be used as a key",
                other.kind()
            ))),
        }
    }
}
