/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Field types and traits for FIX protocol messages.
//!
//! This module provides:
//! - [`FieldTag`]: Type-safe wrapper for FIX field tag numbers
//! - [`FieldKind`]: The conversion family of a stored value
//! - [`FieldValue`]: A stored `(tag, raw, kind)` triple
//! - [`FieldRef`]: Zero-copy reference to a field within a message buffer
//! - [`FixField`]: Trait implemented by typed field wrappers

use crate::convert::FieldConvert;
use crate::error::{DecodeError, FieldError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// FIX field tag number.
///
/// Tags are positive integers that identify fields within a FIX message.
/// Standard tags are defined in the FIX specification (1-5000 range),
/// while user-defined tags use the 5001+ range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct FieldTag(u32);

impl FieldTag {
    /// Creates a new field tag.
    ///
    /// # Arguments
    /// * `tag` - The tag number (must be > 0)
    #[inline]
    #[must_use]
    pub const fn new(tag: u32) -> Self {
        Self(tag)
    }

    /// Returns the raw tag number.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns true if this is a standard FIX tag (1-5000).
    #[inline]
    #[must_use]
    pub const fn is_standard(self) -> bool {
        self.0 >= 1 && self.0 <= 5000
    }

    /// Returns true if this is a user-defined tag (5001+).
    #[inline]
    #[must_use]
    pub const fn is_user_defined(self) -> bool {
        self.0 > 5000
    }
}

impl From<u32> for FieldTag {
    fn from(tag: u32) -> Self {
        Self(tag)
    }
}

impl From<FieldTag> for u32 {
    fn from(tag: FieldTag) -> Self {
        tag.0
    }
}

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Conversion family of a stored field value.
///
/// The kind records which converter produced the raw string. Values stored
/// straight from the wire carry [`FieldKind::String`] unless a dictionary
/// supplied a better one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Free text.
    String,
    /// Signed or unsigned integer.
    Int,
    /// Fixed-point decimal (price, quantity, amount).
    Decimal,
    /// Boolean (Y/N).
    Boolean,
    /// Single character.
    Char,
    /// UTC date and time.
    UtcTimestamp,
    /// UTC time of day.
    UtcTimeOnly,
    /// UTC calendar date.
    UtcDate,
    /// Local market calendar date.
    LocalMktDate,
    /// Opaque data.
    Data,
}

impl FieldKind {
    /// Returns the dictionary-style name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Int => "INT",
            Self::Decimal => "DECIMAL",
            Self::Boolean => "BOOLEAN",
            Self::Char => "CHAR",
            Self::UtcTimestamp => "UTCTIMESTAMP",
            Self::UtcTimeOnly => "UTCTIMEONLY",
            Self::UtcDate => "UTCDATEONLY",
            Self::LocalMktDate => "LOCALMKTDATE",
            Self::Data => "DATA",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single stored field: its tag, canonical wire string and kind.
///
/// `raw` is always the wire form of the last value written, so a typed read
/// can rebuild that value without loss.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldValue {
    tag: u32,
    raw: String,
    kind: FieldKind,
}

impl FieldValue {
    /// Renders a typed value into its canonical wire form.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    /// * `value` - The domain value to render
    #[must_use]
    pub fn from_typed<T: FieldConvert>(tag: u32, value: &T) -> Self {
        Self {
            tag,
            raw: value.to_raw(),
            kind: T::KIND,
        }
    }

    /// Wraps a raw wire string that is already in canonical form.
    #[must_use]
    pub fn from_raw(tag: u32, raw: impl Into<String>) -> Self {
        Self::with_kind(tag, raw, FieldKind::String)
    }

    /// Wraps a raw wire string and records its kind.
    #[must_use]
    pub fn with_kind(tag: u32, raw: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            tag,
            raw: raw.into(),
            kind,
        }
    }

    /// Returns the field tag number.
    #[inline]
    #[must_use]
    pub const fn tag(&self) -> u32 {
        self.tag
    }

    /// Returns the raw wire string.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the kind recorded when the value was stored.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Parses the raw string into `T`.
    ///
    /// # Errors
    /// Returns `FieldError::Conversion` if the raw string is not a valid
    /// lexical form for `T`.
    pub fn to_typed<T: FieldConvert>(&self) -> Result<T, FieldError> {
        T::parse_raw(&self.raw).ok_or_else(|| FieldError::Conversion {
            tag: self.tag,
            kind: T::KIND,
            raw: self.raw.clone(),
        })
    }

    /// Consumes the value and returns the raw string.
    #[must_use]
    pub fn into_raw(self) -> String {
        self.raw
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.tag, self.raw)
    }
}

/// Zero-copy reference to a field within a FIX message buffer.
#[derive(Debug, Clone, Copy)]
pub struct FieldRef<'a> {
    /// The field tag number.
    pub tag: u32,
    /// Reference to the field value bytes (without delimiters).
    pub value: &'a [u8],
}

impl<'a> FieldRef<'a> {
    /// Creates a new field reference.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    /// * `value` - Reference to the value bytes
    #[inline]
    #[must_use]
    pub const fn new(tag: u32, value: &'a [u8]) -> Self {
        Self { tag, value }
    }

    /// Returns the value as a string slice.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidUtf8` if the value is not valid UTF-8.
    pub fn as_str(&self) -> Result<&'a str, DecodeError> {
        std::str::from_utf8(self.value).map_err(DecodeError::from)
    }

    /// Copies the field into an owned [`FieldValue`] of the given kind.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidUtf8` if the value is not valid UTF-8.
    pub fn to_field_value(&self, kind: FieldKind) -> Result<FieldValue, DecodeError> {
        Ok(FieldValue::with_kind(self.tag, self.as_str()?, kind))
    }

    /// Returns the length of the value in bytes.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.value.len()
    }

    /// Returns true if the value is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Trait for typed FIX field wrappers.
///
/// A wrapper is a transient value object carrying one tag and one domain
/// value through `set`/`get`; only its `(tag, raw)` projection is stored.
/// Implementations are normally produced by `#[derive(FixField)]`.
pub trait FixField: Sized {
    /// The tag number for this field.
    const TAG: u32;

    /// The data dictionary name of this field.
    const NAME: &'static str;

    /// The Rust type for this field's value.
    type Value: FieldConvert;

    /// Wraps a domain value.
    fn new(value: Self::Value) -> Self;

    /// Returns the wrapped value.
    fn value(&self) -> &Self::Value;

    /// Consumes the wrapper and returns the value.
    fn into_value(self) -> Self::Value;

    /// Renders this field into a stored [`FieldValue`].
    fn to_field_value(&self) -> FieldValue {
        FieldValue::from_typed(Self::TAG, self.value())
    }

    /// Rebuilds the wrapper from a stored [`FieldValue`].
    ///
    /// # Errors
    /// Returns `FieldError::Conversion` if the raw string does not parse.
    fn from_field_value(value: &FieldValue) -> Result<Self, FieldError> {
        value.to_typed().map(Self::new)
    }
}
