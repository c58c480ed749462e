/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Conversions between domain values and their FIX wire strings.
//!
//! Every value type that can be stored in a field implements [`FieldConvert`].
//! Formatting is fixed-format: no locale, no exponent notation, no implicit
//! truncation. Parsing is strict and accepts only the lexical forms the
//! formatter can produce (plus the documented fixed-width variants for
//! timestamps).

use crate::field::FieldKind;
use crate::types::{LocalMktDate, UtcDate, UtcTimeOnly, UtcTimestamp};
use rust_decimal::Decimal;
use std::fmt::Write;
use std::str::FromStr;

/// Conversion between a domain value and its canonical wire string.
///
/// Implementations must satisfy the round-trip property:
/// `T::parse_raw(&v.to_raw()) == Some(v)` for every value `v`.
pub trait FieldConvert: Sized {
    /// The conversion family recorded alongside stored values.
    const KIND: FieldKind;

    /// Appends the canonical wire form of `self` to `out`.
    fn write_raw(&self, out: &mut String);

    /// Parses a wire string, returning `None` if it is not a valid lexical form.
    fn parse_raw(raw: &str) -> Option<Self>;

    /// Returns the canonical wire form of `self`.
    fn to_raw(&self) -> String {
        let mut out = String::new();
        self.write_raw(&mut out);
        out
    }
}

impl FieldConvert for String {
    const KIND: FieldKind = FieldKind::String;

    fn write_raw(&self, out: &mut String) {
        out.push_str(self);
    }

    fn parse_raw(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

/// Returns true if `raw` is `-?[0-9]+`.
fn is_integer_lexical(raw: &str) -> bool {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Returns true if `raw` is `-?` followed by digits with at most one `.`.
fn is_decimal_lexical(raw: &str) -> bool {
    let body = raw.strip_prefix('-').unwrap_or(raw);
    let mut digits = 0usize;
    let mut dots = 0usize;
    for b in body.bytes() {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}

macro_rules! impl_int_convert {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldConvert for $ty {
                const KIND: FieldKind = FieldKind::Int;

                fn write_raw(&self, out: &mut String) {
                    let _ = write!(out, "{}", self);
                }

                fn parse_raw(raw: &str) -> Option<Self> {
                    if !is_integer_lexical(raw) {
                        return None;
                    }
                    raw.parse().ok()
                }
            }
        )*
    };
}

impl_int_convert!(i32, i64, u32, u64);

impl FieldConvert for Decimal {
    const KIND: FieldKind = FieldKind::Decimal;

    fn write_raw(&self, out: &mut String) {
        let _ = write!(out, "{}", self);
    }

    fn parse_raw(raw: &str) -> Option<Self> {
        if !is_decimal_lexical(raw) {
            return None;
        }
        Decimal::from_str(raw).ok()
    }
}

impl FieldConvert for bool {
    const KIND: FieldKind = FieldKind::Boolean;

    fn write_raw(&self, out: &mut String) {
        out.push(if *self { 'Y' } else { 'N' });
    }

    fn parse_raw(raw: &str) -> Option<Self> {
        match raw {
            "Y" => Some(true),
            "N" => Some(false),
            _ => None,
        }
    }
}

impl FieldConvert for char {
    const KIND: FieldKind = FieldKind::Char;

    fn write_raw(&self, out: &mut String) {
        out.push(*self);
    }

    fn parse_raw(raw: &str) -> Option<Self> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

impl FieldConvert for UtcTimestamp {
    const KIND: FieldKind = FieldKind::UtcTimestamp;

    fn write_raw(&self, out: &mut String) {
        out.push_str(&self.format());
    }

    fn parse_raw(raw: &str) -> Option<Self> {
        Self::parse(raw)
    }
}

impl FieldConvert for UtcTimeOnly {
    const KIND: FieldKind = FieldKind::UtcTimeOnly;

    fn write_raw(&self, out: &mut String) {
        out.push_str(&self.format());
    }

    fn parse_raw(raw: &str) -> Option<Self> {
        Self::parse(raw)
    }
}

impl FieldConvert for UtcDate {
    const KIND: FieldKind = FieldKind::UtcDate;

    fn write_raw(&self, out: &mut String) {
        out.push_str(&self.format());
    }

    fn parse_raw(raw: &str) -> Option<Self> {
        Self::parse(raw)
    }
}

impl FieldConvert for LocalMktDate {
    const KIND: FieldKind = FieldKind::LocalMktDate;

    fn write_raw(&self, out: &mut String) {
        out.push_str(&self.format());
    }

    fn parse_raw(raw: &str) -> Option<Self> {
        Self::parse(raw)
    }
}

impl FieldKind {
    /// Returns true if `raw` is a valid lexical form for this kind.
    ///
    /// Used by validators that only know a field's kind, not its Rust type.
    #[must_use]
    pub fn accepts(self, raw: &str) -> bool {
        match self {
            Self::String | Self::Data => true,
            Self::Int => is_integer_lexical(raw),
            Self::Decimal => Decimal::parse_raw(raw).is_some(),
            Self::Boolean => bool::parse_raw(raw).is_some(),
            Self::Char => char::parse_raw(raw).is_some(),
            Self::UtcTimestamp => UtcTimestamp::parse(raw).is_some(),
            Self::UtcTimeOnly => UtcTimeOnly::parse(raw).is_some(),
            Self::UtcDate => UtcDate::parse(raw).is_some(),
            Self::LocalMktDate => LocalMktDate::parse(raw).is_some(),
        }
    }
}
