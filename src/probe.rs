//! The scalar probe ladder.
//!
//! A self-describing format tells us that a position holds a scalar, but not
//! which Rust type it was written from. Each candidate in
//! [`SCALAR_PROBE_ORDER`] is tried against the buffered scalar and the first
//! one that decodes wins. Narrow integer types come before wide ones, so a
//! small number lands in the smallest unsigned type that holds it.

use crate::cursor::{Content, Cursor};
use crate::{DynamicValue, Error, Kind, Result};
use chrono::{DateTime, Utc};
use serde::de::{self, Deserialize, Deserializer, Visitor};
use std::fmt;

/// The order in which scalar types are tried when decoding a [`DynamicValue`].
///
/// Text is tried before dates, so RFC 3339 strings decode as
/// [`DynamicValue::String`]. Dates only come out of formats that hand over a
/// date through a non-text scalar.
pub const SCALAR_PROBE_ORDER: [Kind; 14] = [
    Kind::Bool,
    Kind::String,
    Kind::UInt8,
    Kind::UInt16,
    Kind::UInt32,
    Kind::UInt64,
    Kind::Int8,
    Kind::Int16,
    Kind::Int32,
    Kind::Int64,
    Kind::Float32,
    Kind::Float64,
    Kind::Date,
    Kind::Bytes,
];

/// Runs the ladder over one buffered scalar.
///
/// When every probe fails, the error of the last probe is returned.
pub(crate) fn probe_scalar(scalar: &Content) -> Result<DynamicValue> {
    let cursor = Cursor::new(scalar);
    let mut last_error = None;

    for kind in SCALAR_PROBE_ORDER {
        match probe(kind, cursor) {
            Ok(value) => return Ok(value),
            Err(err) => last_error = Some(err),
        }
    }

    let err = last_error.unwrap_or_else(|| Error::custom("no scalar probes configured"));
    log::trace!("no scalar type accepted {}: {}", cursor.describe(), err);
    Err(err)
}

fn probe(kind: Kind, cursor: Cursor<'_>) -> Result<DynamicValue> {
    match kind {
        Kind::Bool => cursor.decode().map(DynamicValue::Bool),
        Kind::String => cursor.decode().map(DynamicValue::String),
        Kind::UInt8 => cursor.decode().map(DynamicValue::UInt8),
        Kind::UInt16 => cursor.decode().map(DynamicValue::UInt16),
        Kind::UInt32 => cursor.decode().map(DynamicValue::UInt32),
        Kind::UInt64 => cursor.decode().map(DynamicValue::UInt64),
        Kind::Int8 => cursor.decode().map(DynamicValue::Int8),
        Kind::Int16 => cursor.decode().map(DynamicValue::Int16),
        Kind::Int32 => cursor.decode().map(DynamicValue::Int32),
        Kind::Int64 => cursor.decode().map(DynamicValue::Int64),
        Kind::Float32 => probe_f32(cursor),
        Kind::Float64 => cursor.decode().map(DynamicValue::Float64),
        Kind::Date => cursor.decode::<DateTime<Utc>>().map(DynamicValue::Date),
        Kind::Bytes => cursor.decode::<ByteBuf>().map(|buf| DynamicValue::Bytes(buf.0)),
        other => Err(Error::unsupported_type(&format!(
            "{} is not a scalar type",
            other
        ))),
    }
}

/// Accepts a float as `f32` only when narrowing keeps it intact.
///
/// Intact means the shortest decimal text of the narrowed value matches the
/// text of the wide value, or the narrowed value widens back exactly. This
/// keeps `0.3` as `Float32(0.3)` while `12345.6789` stays `Float64`.
fn probe_f32(cursor: Cursor<'_>) -> Result<DynamicValue> {
    let narrowed: f32 = cursor.decode()?;
    let wide: f64 = cursor.decode()?;

    if narrowed.to_string() == wide.to_string() || f64::from(narrowed) == wide {
        Ok(DynamicValue::Float32(narrowed))
    } else {
        Err(Error::type_mismatch(
            "a float representable as f32",
            &wide.to_string(),
        ))
    }
}

/// A byte blob that refuses every other shape, including sequences of integers.
struct ByteBuf(Vec<u8>);

impl<'de> Deserialize<'de> for ByteBuf {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ByteBufVisitor;

        impl<'de> Visitor<'de> for ByteBufVisitor {
            type Value = ByteBuf;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a byte blob")
            }

            fn visit_bytes<E: de::Error>(self, value: &[u8]) -> std::result::Result<ByteBuf, E> {
                Ok(ByteBuf(value.to_vec()))
            }

            fn visit_byte_buf<E: de::Error>(self, value: Vec<u8>) -> std::result::Result<ByteBuf, E> {
                Ok(ByteBuf(value))
            }
        }

        deserializer.deserialize_byte_buf(ByteBufVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_unsigned_lands_in_u8() {
        assert_eq!(probe_scalar(&Content::U64(123)).unwrap(), DynamicValue::UInt8(123));
        assert_eq!(probe_scalar(&Content::U64(256)).unwrap(), DynamicValue::UInt16(256));
        assert_eq!(
            probe_scalar(&Content::U64(u64::MAX)).unwrap(),
            DynamicValue::UInt64(u64::MAX)
        );
    }

    #[test]
    fn test_negative_lands_in_smallest_signed() {
        assert_eq!(probe_scalar(&Content::I64(-128)).unwrap(), DynamicValue::Int8(-128));
        assert_eq!(probe_scalar(&Content::I64(-129)).unwrap(), DynamicValue::Int16(-129));
        assert_eq!(
            probe_scalar(&Content::I64(i64::MIN)).unwrap(),
            DynamicValue::Int64(i64::MIN)
        );
    }

    #[test]
    fn test_float_width_selection() {
        assert_eq!(probe_scalar(&Content::F64(0.3)).unwrap(), DynamicValue::Float32(0.3));
        assert_eq!(probe_scalar(&Content::F64(0.5)).unwrap(), DynamicValue::Float32(0.5));
        assert_eq!(
            probe_scalar(&Content::F64(12345.6789)).unwrap(),
            DynamicValue::Float64(12345.6789)
        );
    }

    #[test]
    fn test_text_wins_over_date() {
        let text = "2024-01-01T00:00:00Z".to_string();
        assert_eq!(
            probe_scalar(&Content::String(text.clone())).unwrap(),
            DynamicValue::String(text)
        );
        assert_eq!(
            probe_scalar(&Content::String("true".into())).unwrap(),
            DynamicValue::from("true")
        );
    }

    #[test]
    fn test_bytes_and_char() {
        assert_eq!(
            probe_scalar(&Content::Bytes(vec![0, 11, 22])).unwrap(),
            DynamicValue::Bytes(vec![0, 11, 22])
        );
        assert_eq!(probe_scalar(&Content::Char('x')).unwrap(), DynamicValue::from("x"));
    }

    #[test]
    fn test_null_reports_last_probe_failure() {
        let err = probe_scalar(&Content::Unit).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { ref expected, .. } if expected == "a byte blob"));
    }
}
