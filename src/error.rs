//! Error types for dynamic decoding, encoding and extraction.
//!
//! ## Error Categories
//!
//! - **Type Mismatches**: a probe or cursor was asked for a shape the data does not have
//! - **Missing Keys**: a keyed cursor has no entry for the requested key
//! - **Malformed Keys**: a key is neither text nor an integer
//! - **Unsupported Types**: a Rust value has no [`DynamicValue`](crate::DynamicValue) counterpart
//!
//! Probing failures are normally caught and retried internally; only the
//! last failure of an exhausted probe ladder reaches the caller.
//!
//! ## Examples
//!
//! ```rust
//! use serde_dynamic::{DynamicValue, Error};
//!
//! let result: Result<DynamicValue, _> = serde_json::from_str("null");
//! assert!(result.is_err());
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The data at a position does not have the requested shape or type
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A keyed cursor has no entry for the key
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// A key could not be interpreted as text or as an integer
    #[error("Malformed key: {0}")]
    MalformedKey(String),

    /// A Rust type with no dynamic value counterpart
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dynamic::Error;
    ///
    /// let err = Error::type_mismatch("a sequence", "a map");
    /// assert!(err.to_string().contains("expected a sequence"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a missing key error.
    pub fn key_not_found(key: &str) -> Self {
        Error::KeyNotFound(key.to_string())
    }

    /// Creates a malformed key error.
    pub fn malformed_key(msg: &str) -> Self {
        Error::MalformedKey(msg.to_string())
    }

    /// Creates an unsupported type error for values that have no dynamic counterpart.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dynamic::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    fn invalid_type(unexp: serde::de::Unexpected, exp: &dyn serde::de::Expected) -> Self {
        Error::TypeMismatch {
            expected: exp.to_string(),
            found: unexp.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
