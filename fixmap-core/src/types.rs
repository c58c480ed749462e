/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Domain value types stored in FIX fields.
//!
//! This module provides:
//! - [`UtcTimestamp`]: `YYYYMMDD-HH:MM:SS[.fff[fff[fff]]]` with explicit precision
//! - [`UtcTimeOnly`]: `HH:MM:SS[.fff[fff[fff]]]`
//! - [`UtcDate`] and [`LocalMktDate`]: `YYYYMMDD`
//! - [`Side`]: Order side enumeration (tag 54)

use crate::convert::FieldConvert;
use crate::field::FieldKind;
use arrayvec::ArrayString;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use num_derive::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Largest nanosecond value kept; chrono encodes leap seconds above it.
const MAX_NANOS: u32 = 999_999_999;

/// Fractional-second precision used when rendering times.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TimestampPrecision {
    /// Whole seconds, no fraction.
    Seconds,
    /// Three fractional digits.
    #[default]
    Millis,
    /// Six fractional digits.
    Micros,
    /// Nine fractional digits.
    Nanos,
}

impl TimestampPrecision {
    /// Number of fractional digits written for this precision.
    #[must_use]
    pub const fn digits(self) -> usize {
        match self {
            Self::Seconds => 0,
            Self::Millis => 3,
            Self::Micros => 6,
            Self::Nanos => 9,
        }
    }

    /// Nanoseconds per unit of the last written digit.
    const fn unit_nanos(self) -> u32 {
        match self {
            Self::Seconds => 1_000_000_000,
            Self::Millis => 1_000_000,
            Self::Micros => 1_000,
            Self::Nanos => 1,
        }
    }

    fn from_digits(digits: usize) -> Option<Self> {
        match digits {
            0 => Some(Self::Seconds),
            3 => Some(Self::Millis),
            6 => Some(Self::Micros),
            9 => Some(Self::Nanos),
            _ => None,
        }
    }

    /// Drops the part of `nanos` this precision cannot represent.
    const fn truncate(self, nanos: u32) -> u32 {
        let nanos = if nanos > MAX_NANOS { MAX_NANOS } else { nanos };
        nanos - nanos % self.unit_nanos()
    }
}

/// Parses `n` ASCII digits.
fn parse_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.is_empty() {
        return None;
    }
    bytes.iter().try_fold(0u32, |acc, &b| {
        b.is_ascii_digit().then(|| acc * 10 + u32::from(b - b'0'))
    })
}

/// Parses `YYYYMMDD`.
fn parse_date(bytes: &[u8]) -> Option<NaiveDate> {
    if bytes.len() != 8 {
        return None;
    }
    let year = parse_digits(&bytes[0..4])?;
    let month = parse_digits(&bytes[4..6])?;
    let day = parse_digits(&bytes[6..8])?;
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

/// Parses `HH:MM:SS[.f{3,6,9}]`.
fn parse_time(bytes: &[u8]) -> Option<(NaiveTime, TimestampPrecision)> {
    if bytes.len() < 8 || bytes[2] != b':' || bytes[5] != b':' {
        return None;
    }
    let hour = parse_digits(&bytes[0..2])?;
    let minute = parse_digits(&bytes[3..5])?;
    let second = parse_digits(&bytes[6..8])?;

    let fraction = &bytes[8..];
    let (precision, nanos) = match fraction.split_first() {
        None => (TimestampPrecision::Seconds, 0),
        Some((b'.', digits)) => {
            let precision = TimestampPrecision::from_digits(digits.len())?;
            (precision, parse_digits(digits)? * precision.unit_nanos())
        }
        Some(_) => return None,
    };

    // Leap seconds are not representable on the wire.
    if second > 59 {
        return None;
    }
    let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)?;
    Some((time, precision))
}

fn write_date(buf: &mut impl Write, date: NaiveDate) {
    let _ = write!(buf, "{:04}{:02}{:02}", date.year(), date.month(), date.day());
}

fn write_time(buf: &mut impl Write, time: NaiveTime, precision: TimestampPrecision) {
    let _ = write!(
        buf,
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    );
    let nanos = precision.truncate(time.nanosecond());
    let _ = match precision {
        TimestampPrecision::Seconds => Ok(()),
        TimestampPrecision::Millis => write!(buf, ".{:03}", nanos / 1_000_000),
        TimestampPrecision::Micros => write!(buf, ".{:06}", nanos / 1_000),
        TimestampPrecision::Nanos => write!(buf, ".{:09}", nanos),
    };
}

const fn year_in_range(year: i32) -> bool {
    year >= 0 && year <= 9999
}

fn truncate_time(time: NaiveTime, precision: TimestampPrecision) -> Option<NaiveTime> {
    time.with_nanosecond(precision.truncate(time.nanosecond()))
}

/// FIX UTCTimestamp value.
///
/// The precision is part of the value: it decides how many fractional digits
/// are written, and parsing restores it from the width of the raw string, so
/// a value always survives a round trip through its wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UtcTimestamp {
    datetime: NaiveDateTime,
    precision: TimestampPrecision,
}

impl UtcTimestamp {
    /// Creates a timestamp, truncating sub-precision digits.
    ///
    /// # Returns
    /// `None` if the year is outside `0..=9999`.
    #[must_use]
    pub fn new(datetime: NaiveDateTime, precision: TimestampPrecision) -> Option<Self> {
        if !year_in_range(datetime.year()) {
            return None;
        }
        let time = truncate_time(datetime.time(), precision)?;
        Some(Self {
            datetime: NaiveDateTime::new(datetime.date(), time),
            precision,
        })
    }

    /// Creates a timestamp from calendar fields.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn from_ymd_hms_nano(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        nanos: u32,
        precision: TimestampPrecision,
    ) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)?;
        Self::new(NaiveDateTime::new(date, time), precision)
    }

    /// Creates a timestamp from a chrono `DateTime<Utc>`.
    #[must_use]
    pub fn from_datetime(dt: DateTime<Utc>, precision: TimestampPrecision) -> Option<Self> {
        Self::new(dt.naive_utc(), precision)
    }

    /// Returns the current UTC time with millisecond precision.
    #[must_use]
    pub fn now() -> Self {
        let now = Utc::now().naive_utc();
        let precision = TimestampPrecision::Millis;
        let time = truncate_time(now.time(), precision).unwrap_or(now.time());
        Self {
            datetime: NaiveDateTime::new(now.date(), time),
            precision,
        }
    }

    /// Returns the naive UTC date and time.
    #[inline]
    #[must_use]
    pub const fn datetime(&self) -> NaiveDateTime {
        self.datetime
    }

    /// Converts to a chrono `DateTime<Utc>`.
    #[must_use]
    pub fn to_datetime(&self) -> DateTime<Utc> {
        self.datetime.and_utc()
    }

    /// Returns the rendering precision.
    #[inline]
    #[must_use]
    pub const fn precision(&self) -> TimestampPrecision {
        self.precision
    }

    /// Formats the timestamp in FIX format.
    ///
    /// Format: `YYYYMMDD-HH:MM:SS` followed by 0, 3, 6 or 9 fractional digits.
    #[must_use]
    pub fn format(&self) -> ArrayString<27> {
        let mut buf = ArrayString::new();
        write_date(&mut buf, self.datetime.date());
        buf.push('-');
        write_time(&mut buf, self.datetime.time(), self.precision);
        buf
    }

    /// Parses a FIX timestamp of width 17, 21, 24 or 27.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let bytes = raw.as_bytes();
        if bytes.len() < 17 || bytes[8] != b'-' {
            return None;
        }
        let date = parse_date(&bytes[..8])?;
        let (time, precision) = parse_time(&bytes[9..])?;
        Some(Self {
            datetime: NaiveDateTime::new(date, time),
            precision,
        })
    }
}

impl fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// FIX UTCTimeOnly value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UtcTimeOnly {
    time: NaiveTime,
    precision: TimestampPrecision,
}

impl UtcTimeOnly {
    /// Creates a time of day, truncating sub-precision digits.
    #[must_use]
    pub fn new(time: NaiveTime, precision: TimestampPrecision) -> Option<Self> {
        Some(Self {
            time: truncate_time(time, precision)?,
            precision,
        })
    }

    /// Creates a time of day from its fields.
    #[must_use]
    pub fn from_hms_nano(
        hour: u32,
        minute: u32,
        second: u32,
        nanos: u32,
        precision: TimestampPrecision,
    ) -> Option<Self> {
        Self::new(
            NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)?,
            precision,
        )
    }

    /// Returns the time of day.
    #[inline]
    #[must_use]
    pub const fn time(&self) -> NaiveTime {
        self.time
    }

    /// Returns the rendering precision.
    #[inline]
    #[must_use]
    pub const fn precision(&self) -> TimestampPrecision {
        self.precision
    }

    /// Formats as `HH:MM:SS[.fff...]`.
    #[must_use]
    pub fn format(&self) -> ArrayString<18> {
        let mut buf = ArrayString::new();
        write_time(&mut buf, self.time, self.precision);
        buf
    }

    /// Parses `HH:MM:SS` with an optional 3, 6 or 9 digit fraction.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let (time, precision) = parse_time(raw.as_bytes())?;
        Some(Self { time, precision })
    }
}

impl fmt::Display for UtcTimeOnly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

macro_rules! date_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[repr(transparent)]
        #[serde(transparent)]
        pub struct $name(NaiveDate);

        impl $name {
            /// Wraps a calendar date.
            ///
            /// # Returns
            /// `None` if the year is outside `0..=9999`.
            #[must_use]
            pub fn new(date: NaiveDate) -> Option<Self> {
                year_in_range(date.year()).then_some(Self(date))
            }

            /// Creates a date from year, month and day.
            #[must_use]
            pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
                Self::new(NaiveDate::from_ymd_opt(year, month, day)?)
            }

            /// Returns the calendar date.
            #[inline]
            #[must_use]
            pub const fn date(&self) -> NaiveDate {
                self.0
            }

            /// Formats as `YYYYMMDD`.
            #[must_use]
            pub fn format(&self) -> ArrayString<8> {
                let mut buf = ArrayString::new();
                write_date(&mut buf, self.0);
                buf
            }

            /// Parses `YYYYMMDD`.
            #[must_use]
            pub fn parse(raw: &str) -> Option<Self> {
                parse_date(raw.as_bytes()).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.format())
            }
        }
    };
}

date_type!(
    /// FIX UTCDateOnly value.
    UtcDate
);

date_type!(
    /// FIX LocalMktDate value (date in the market's local time zone).
    LocalMktDate
);

/// Order side enumeration (tag 54).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order.
    Buy = b'1',
    /// Sell order.
    Sell = b'2',
    /// Buy minus.
    BuyMinus = b'3',
    /// Sell plus.
    SellPlus = b'4',
    /// Sell short.
    SellShort = b'5',
    /// Sell short exempt.
    SellShortExempt = b'6',
    /// Undisclosed.
    Undisclosed = b'7',
    /// Cross (both sides).
    Cross = b'8',
    /// Cross short.
    CrossShort = b'9',
}

impl Side {
    /// Creates a Side from its wire character.
    ///
    /// # Returns
    /// `Some(Side)` if the character is valid, `None` otherwise.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        u8::try_from(c)
            .ok()
            .and_then(<Self as num_traits::FromPrimitive>::from_u8)
    }

    /// Returns the character representation of this side.
    #[must_use]
    pub const fn as_char(self) -> char {
        self as u8 as char
    }

    /// Returns true if this is a buy-side order.
    #[must_use]
    pub const fn is_buy(self) -> bool {
        matches!(self, Self::Buy | Self::BuyMinus)
    }

    /// Returns true if this is a sell-side order.
    #[must_use]
    pub const fn is_sell(self) -> bool {
        matches!(
            self,
            Self::Sell | Self::SellPlus | Self::SellShort | Self::SellShortExempt
        )
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FieldConvert for Side {
    const KIND: FieldKind = FieldKind::Char;

    fn write_raw(&self, out: &mut String) {
        out.push(self.as_char());
    }

    fn parse_raw(raw: &str) -> Option<Self> {
        char::parse_raw(raw).and_then(Self::from_char)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_format_millis() {
        let ts = UtcTimestamp::from_ymd_hms_nano(1970, 1, 1, 0, 0, 0, 0, TimestampPrecision::Millis)
            .unwrap();
        assert_eq!(ts.format().as_str(), "19700101-00:00:00.000");
    }

    #[test]
    fn test_default_precision_is_millis() {
        assert_eq!(TimestampPrecision::default(), TimestampPrecision::Millis);
        assert_eq!(TimestampPrecision::default().digits(), 3);
    }

    #[test]
    fn test_timestamp_truncates_to_precision() {
        let ts = UtcTimestamp::from_ymd_hms_nano(
            2024,
            3,
            15,
            13,
            45,
            30,
            123_456_789,
            TimestampPrecision::Micros,
        )
        .unwrap();
        assert_eq!(ts.format().as_str(), "20240315-13:45:30.123456");
        assert_eq!(ts.datetime().nanosecond(), 123_456_000);
    }

    #[test]
    fn test_timestamp_parse_widths() {
        let secs = UtcTimestamp::parse("20240315-13:45:30").unwrap();
        assert_eq!(secs.precision(), TimestampPrecision::Seconds);
        let millis = UtcTimestamp::parse("20240315-13:45:30.250").unwrap();
        assert_eq!(millis.precision(), TimestampPrecision::Millis);
        assert_eq!(millis.datetime().nanosecond(), 250_000_000);
        let nanos = UtcTimestamp::parse("20240315-13:45:30.000000001").unwrap();
        assert_eq!(nanos.precision(), TimestampPrecision::Nanos);
    }

    #[test]
    fn test_timestamp_parse_rejects() {
        assert!(UtcTimestamp::parse("20240315-13:45").is_none());
        assert!(UtcTimestamp::parse("20240315 13:45:30").is_none());
        assert!(UtcTimestamp::parse("20240315-13:45:30.12").is_none());
        assert!(UtcTimestamp::parse("20240230-13:45:30").is_none());
        assert!(UtcTimestamp::parse("20240315-24:00:00").is_none());
        assert!(UtcTimestamp::parse("20240315-13:45:60").is_none());
        assert!(UtcTimestamp::parse("2024031a-13:45:30").is_none());
    }

    #[test]
    fn test_timestamp_year_range() {
        let far = NaiveDate::from_ymd_opt(10_000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(UtcTimestamp::new(far, TimestampPrecision::Seconds).is_none());
        assert!(UtcDate::from_ymd(10_000, 1, 1).is_none());
    }

    #[test]
    fn test_timestamp_now_is_millis() {
        let now = UtcTimestamp::now();
        assert_eq!(now.precision(), TimestampPrecision::Millis);
        assert_eq!(now.format().len(), 21);
    }

    #[test]
    fn test_time_only() {
        let t = UtcTimeOnly::parse("09:30:00").unwrap();
        assert_eq!(t.format().as_str(), "09:30:00");
        assert!(UtcTimeOnly::parse("9:30:00").is_none());
    }

    #[test]
    fn test_dates() {
        let d = UtcDate::from_ymd(2024, 7, 4).unwrap();
        assert_eq!(d.to_string(), "20240704");
        assert_eq!(LocalMktDate::parse("20240704").unwrap().date(), d.date());
        assert!(UtcDate::parse("2024074").is_none());
    }

    #[test]
    fn test_side_from_char() {
        assert_eq!(Side::from_char('1'), Some(Side::Buy));
        assert_eq!(Side::from_char('2'), Some(Side::Sell));
        assert_eq!(Side::from_char('X'), None);
        assert_eq!(Side::from_char('é'), None);
    }

    #[test]
    fn test_side_convert() {
        assert_eq!(Side::Buy.to_raw(), "1");
        assert_eq!(Side::parse_raw("5"), Some(Side::SellShort));
        assert_eq!(Side::parse_raw("11"), None);
        assert!(Side::Buy.is_buy());
        assert!(Side::Sell.is_sell());
    }
}
