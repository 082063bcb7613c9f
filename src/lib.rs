//! # serde_dynamic
//!
//! Self-describing dynamic values and tolerant instance extraction for any
//! self-describing Serde format.
//!
//! ## What does it do?
//!
//! Some data arrives without a schema: a JSON document whose fields change
//! from one payload to the next, a property bag of mixed types, a response
//! whose interesting objects are buried at unpredictable depths. This crate
//! gives you two tools for that data:
//!
//! - **[`DynamicValue`]**: decodes *anything* into a closed tagged union and
//!   remembers the narrowest type each scalar fits in
//! - **[`InstancesOf<T>`]**: searches a document depth-first and returns
//!   every position that decodes as `T`, silently skipping the rest
//!
//! ## Key Features
//!
//! - **Format Agnostic**: works with any self-describing Serde format
//! - **Width Aware**: `123` decodes as [`DynamicValue::UInt8`], `0.3` as
//!   [`DynamicValue::Float32`]
//! - **Best-Effort Numerics**: every numeric variant reads at every numeric width
//! - **Tolerant Extraction**: mismatched positions are skipped, never fatal
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! serde_dynamic = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Decoding Unknown Fields
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_dynamic::DynamicValue;
//! use std::collections::HashMap;
//!
//! #[derive(Deserialize)]
//! struct Post {
//!     title: String,
//!     #[serde(flatten)]
//!     extra: HashMap<String, DynamicValue>,
//! }
//!
//! let json = r#"{ "title": "Hello", "views": 42, "ratio": 0.3, "draft": false }"#;
//! let post: Post = serde_json::from_str(json).unwrap();
//!
//! assert_eq!(post.title, "Hello");
//! assert_eq!(post.extra["views"], DynamicValue::UInt8(42));
//! assert_eq!(post.extra["ratio"], DynamicValue::Float32(0.3));
//! assert_eq!(post.extra["draft"], DynamicValue::Bool(false));
//! ```
//!
//! ### Extracting Buried Objects
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_dynamic::InstancesOf;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Issue { number: u32, title: String }
//!
//! let json = r#"{
//!     "milestone": {
//!         "issues": { "nodes": [
//!             { "number": 1, "title": "First" },
//!             { "label": "not an issue" },
//!             { "number": 2, "title": "Second" }
//!         ] }
//!     }
//! }"#;
//!
//! let issues: InstancesOf<Issue> = serde_json::from_str(json).unwrap();
//! assert_eq!(issues.len(), 2);
//! assert_eq!(issues[1].title, "Second");
//! ```
//!
//! ### Building Values with the dynamic! Macro
//!
//! ```rust
//! use serde_dynamic::{dynamic, DynamicValue};
//!
//! let data = dynamic!({
//!     "name": "Alice",
//!     "tags": ["rust", "serde"]
//! });
//!
//! if let DynamicValue::Mapping(map) = data {
//!     assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! }
//! ```
//!
//! ## Decoding Rules
//!
//! Containers are recognised from the shape the format reports. Scalars are
//! probed in the fixed order of [`SCALAR_PROBE_ORDER`]: booleans, text,
//! unsigned then signed integers from narrow to wide, `f32` (only when
//! lossless), `f64`, dates, bytes. A null matches nothing, so decoding a
//! `DynamicValue` from null is an error.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Proper error propagation with `Result` types
//! - No panics in the public API

pub mod cursor;
pub mod de;
pub mod error;
pub mod instances;
pub mod key;
pub mod macros;
pub mod map;
pub mod probe;
pub mod ser;
pub mod value;

pub use cursor::{Cursor, Document, KeyedCursor, SequenceCursor};
pub use de::ValueDeserializer;
pub use error::{Error, Result};
pub use instances::InstancesOf;
pub use key::{DynamicKey, FieldKey};
pub use map::DynamicMap;
pub use probe::SCALAR_PROBE_ORDER;
pub use ser::ValueSerializer;
pub use value::{DynamicValue, Kind};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Convert any `T: Serialize` to a `DynamicValue`.
///
/// Every primitive keeps its width, so the result mirrors the Rust types
/// exactly.
///
/// # Examples
///
/// ```rust
/// use serde_dynamic::{to_value, DynamicValue};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// let value: DynamicValue = to_value(&point).unwrap();
/// assert!(value.is_mapping());
/// ```
///
/// # Errors
///
/// Returns an error for `None` and `()`, which have no dynamic counterpart,
/// and for map keys that are neither text nor integers.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<DynamicValue>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Build a `T: Deserialize` out of a `DynamicValue`.
///
/// # Examples
///
/// ```rust
/// use serde_dynamic::{from_value, DynamicValue};
///
/// let numbers: Vec<u16> = from_value(DynamicValue::List(vec![
///     DynamicValue::UInt8(1),
///     DynamicValue::UInt16(300),
/// ]))
/// .unwrap();
/// assert_eq!(numbers, vec![1, 300]);
/// ```
///
/// # Errors
///
/// Returns an error if the value does not have the shape `T` expects.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: DynamicValue) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    #[test]
    fn test_value_roundtrip_point() {
        let point = Point { x: 1, y: 2 };
        let value = to_value(&point).unwrap();
        let point_back: Point = from_value(value).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_value_roundtrip_user() {
        let user = User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        };

        let value = to_value(&user).unwrap();
        let user_back: User = from_value(value).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_to_value() {
        let point = Point { x: 1, y: 2 };
        let value = to_value(&point).unwrap();

        match value {
            DynamicValue::Mapping(map) => {
                assert_eq!(map.get("x"), Some(&DynamicValue::Int32(1)));
                assert_eq!(map.get("y"), Some(&DynamicValue::Int32(2)));
            }
            _ => panic!("Expected mapping"),
        }
    }

    #[test]
    fn test_decode_json_through_dynamic_value() {
        let json = r#"{"id": 123, "name": "Alice", "active": true, "tags": ["admin"]}"#;
        let value: DynamicValue = serde_json::from_str(json).unwrap();
        let user: User = from_value(value).unwrap();
        assert_eq!(user.id, 123);
        assert_eq!(user.tags, vec!["admin".to_string()]);
    }

    #[test]
    fn test_flattened_extras() {
        #[derive(Deserialize)]
        struct Post {
            title: String,
            #[serde(flatten)]
            extra: HashMap<String, DynamicValue>,
        }

        let post: Post =
            serde_json::from_str(r#"{"title": "t", "n": -5, "list": [1, "a"]}"#).unwrap();
        assert_eq!(post.title, "t");
        assert_eq!(post.extra["n"], DynamicValue::Int8(-5));
        assert_eq!(
            post.extra["list"],
            DynamicValue::List(vec![DynamicValue::UInt8(1), DynamicValue::from("a")])
        );
    }
}
