/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Error types for the FixMap field container.
//!
//! This module provides a unified error hierarchy using `thiserror`:
//! - [`FieldError`]: typed reads that cannot be satisfied (absent tag, bad lexical form)
//! - [`DecodeError`]: structural problems while splitting a tag=value buffer
//! - [`ValidationError`]: schema-level rejects reported by the dictionary validator

use crate::field::FieldKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using [`FixError`] as the error type.
pub type Result<T> = std::result::Result<T, FixError>;

/// Top-level error type for all FixMap operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FixError {
    /// A typed field read failed.
    #[error("field error: {0}")]
    Field(#[from] FieldError),

    /// Error while decoding a tag=value buffer.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The message does not satisfy its dictionary definition.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Errors raised by typed reads against a field container.
///
/// `NotFound` and `GroupNotFound` are both the "field not found" failure:
/// absence is never defaulted to a zero value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The requested tag is not stored in the container.
    #[error("field not found: tag {tag}")]
    NotFound {
        /// The tag number that was requested.
        tag: u32,
    },

    /// The requested group entry does not exist (indices are 1-based).
    #[error("group entry not found: tag {tag}, index {index} of {count}")]
    GroupNotFound {
        /// The NumInGroup tag owning the entries.
        tag: u32,
        /// The requested 1-based index.
        index: usize,
        /// Number of entries actually stored.
        count: usize,
    },

    /// The stored raw string is not a valid lexical form for the requested type.
    #[error("cannot convert tag {tag} value '{raw}' to {kind}")]
    Conversion {
        /// The tag number of the field.
        tag: u32,
        /// The kind the caller asked for.
        kind: FieldKind,
        /// The raw value found in the container.
        raw: String,
    },

    /// A typed message view was requested over a message of another type.
    #[error("msg type mismatch: expected {expected}, found {actual}")]
    MsgTypeMismatch {
        /// The MsgType the typed view requires.
        expected: String,
        /// The MsgType stored in the message header.
        actual: String,
    },
}

impl FieldError {
    /// Returns true if this error reports an absent field or group entry.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::GroupNotFound { .. })
    }

    /// Returns the tag the failed read was about.
    #[must_use]
    pub const fn tag(&self) -> Option<u32> {
        match self {
            Self::NotFound { tag } | Self::GroupNotFound { tag, .. } | Self::Conversion { tag, .. } => {
                Some(*tag)
            }
            Self::MsgTypeMismatch { .. } => None,
        }
    }
}

/// Errors that occur while splitting a tag=value buffer into a message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The input buffer holds no fields.
    #[error("empty message buffer")]
    Empty,

    /// A field is not terminated by the delimiter.
    #[error("incomplete field at offset {offset}")]
    Incomplete {
        /// Byte offset where the unterminated field starts.
        offset: usize,
    },

    /// Invalid tag format (not a positive integer).
    #[error("invalid tag format: {0}")]
    InvalidTag(String),

    /// The same tag appeared twice outside a repeating group.
    #[error("tag {tag} appears more than once")]
    DuplicateTag {
        /// The repeated tag number.
        tag: u32,
    },

    /// A NumInGroup value is not a non-negative integer.
    #[error("invalid group count for tag {tag}: '{raw}'")]
    InvalidGroupCount {
        /// The NumInGroup tag.
        tag: u32,
        /// The raw count value.
        raw: String,
    },

    /// Repeating group count mismatch.
    #[error("group count mismatch for tag {count_tag}: expected {expected}, found {actual}")]
    GroupCountMismatch {
        /// The tag containing the group count.
        count_tag: u32,
        /// Declared number of group entries.
        expected: usize,
        /// Actual number of group entries found.
        actual: usize,
    },

    /// The buffer holds more fields than the decoder accepts.
    #[error("too many fields: limit is {max}")]
    TooManyFields {
        /// Configured maximum number of fields.
        max: usize,
    },

    /// Invalid UTF-8 in a field value.
    #[error("invalid utf-8 in field: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// FIX SessionRejectReason (tag 373) codes reported by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum SessionRejectReason {
    /// Invalid tag number.
    InvalidTagNumber = 0,
    /// Required tag missing.
    RequiredTagMissing = 1,
    /// Tag not defined for this message type.
    TagNotDefinedForMessageType = 2,
    /// Undefined tag.
    UndefinedTag = 3,
    /// Tag specified without a value.
    TagSpecifiedWithoutValue = 4,
    /// Value is incorrect (out of range) for this tag.
    ValueIsIncorrect = 5,
    /// Incorrect data format for value.
    IncorrectDataFormat = 6,
    /// Invalid MsgType.
    InvalidMsgType = 11,
    /// Repeating group fields out of order.
    RepeatingGroupFieldsOutOfOrder = 15,
    /// Incorrect NumInGroup count for repeating group.
    IncorrectNumInGroupCount = 16,
}

impl SessionRejectReason {
    /// Returns the numeric value carried in tag 373.
    #[must_use]
    pub const fn code(self) -> u32 {
        self as u32
    }
}

/// Schema-level rejects produced by the dictionary validator.
///
/// These describe what a business or session reject must report; they are
/// distinct from [`FieldError::NotFound`], which is raised by direct reads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The message type is not defined in the dictionary.
    #[error("invalid msg type: {msg_type}")]
    InvalidMsgType {
        /// The MsgType value found in the header.
        msg_type: String,
    },

    /// The message type is valid but has no definition in the dictionary.
    #[error("unsupported msg type: {msg_type}")]
    UnsupportedMessageType {
        /// The MsgType value found in the header.
        msg_type: String,
    },

    /// A required field is absent.
    #[error("required tag missing: {tag}")]
    RequiredTagMissing {
        /// The missing tag number.
        tag: u32,
    },

    /// A field is not part of the message definition.
    #[error("tag {tag} not defined for msg type {msg_type}")]
    TagNotDefinedForMessage {
        /// The unexpected tag number.
        tag: u32,
        /// The MsgType of the message.
        msg_type: String,
    },

    /// A field is unknown to the dictionary.
    #[error("undefined tag: {tag}")]
    UndefinedTag {
        /// The unknown tag number.
        tag: u32,
    },

    /// A field is present with an empty value.
    #[error("tag {tag} specified without a value")]
    TagSpecifiedWithoutValue {
        /// The tag number.
        tag: u32,
    },

    /// A field value is not one of the enumerated values.
    #[error("value '{raw}' is incorrect for tag {tag}")]
    ValueIsIncorrect {
        /// The tag number.
        tag: u32,
        /// The offending raw value.
        raw: String,
    },

    /// A field value does not match the dictionary type.
    #[error("incorrect data format for tag {tag}: '{raw}'")]
    IncorrectDataFormat {
        /// The tag number.
        tag: u32,
        /// The offending raw value.
        raw: String,
    },

    /// The NumInGroup value differs from the number of entries.
    #[error("incorrect group count for tag {tag}: declared {declared}, found {actual}")]
    IncorrectNumInGroupCount {
        /// The NumInGroup tag.
        tag: u32,
        /// The declared count.
        declared: String,
        /// The number of entries stored.
        actual: usize,
    },

    /// A group entry does not start with the delimiter field.
    #[error("group {tag} entry does not start with delimiter {delimiter}")]
    RepeatingGroupOutOfOrder {
        /// The NumInGroup tag.
        tag: u32,
        /// The expected first field of each entry.
        delimiter: u32,
    },
}

impl ValidationError {
    /// Returns the SessionRejectReason matching this error.
    #[must_use]
    pub const fn reject_reason(&self) -> SessionRejectReason {
        match self {
            Self::InvalidMsgType { .. } | Self::UnsupportedMessageType { .. } => {
                SessionRejectReason::InvalidMsgType
            }
            Self::RequiredTagMissing { .. } => SessionRejectReason::RequiredTagMissing,
            Self::TagNotDefinedForMessage { .. } => {
                SessionRejectReason::TagNotDefinedForMessageType
            }
            Self::UndefinedTag { .. } => SessionRejectReason::UndefinedTag,
            Self::TagSpecifiedWithoutValue { .. } => SessionRejectReason::TagSpecifiedWithoutValue,
            Self::ValueIsIncorrect { .. } => SessionRejectReason::ValueIsIncorrect,
            Self::IncorrectDataFormat { .. } => SessionRejectReason::IncorrectDataFormat,
            Self::IncorrectNumInGroupCount { .. } => SessionRejectReason::IncorrectNumInGroupCount,
            Self::RepeatingGroupOutOfOrder { .. } => {
                SessionRejectReason::RepeatingGroupFieldsOutOfOrder
            }
        }
    }

    /// Returns the tag to report as RefTagID (tag 371), if any.
    #[must_use]
    pub const fn ref_tag(&self) -> Option<u32> {
        match self {
            Self::InvalidMsgType { .. } | Self::UnsupportedMessageType { .. } => Some(35),
            Self::RequiredTagMissing { tag }
            | Self::TagNotDefinedForMessage { tag, .. }
            | Self::UndefinedTag { tag }
            | Self::TagSpecifiedWithoutValue { tag }
            | Self::ValueIsIncorrect { tag, .. }
            | Self::IncorrectDataFormat { tag, .. }
            | Self::IncorrectNumInGroupCount { tag, .. }
            | Self::RepeatingGroupOutOfOrder { tag, .. } => Some(*tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_display() {
        let err = FieldError::NotFound { tag: 1 };
        assert_eq!(err.to_string(), "field not found: tag 1");

        let err = FieldError::Conversion {
            tag: 38,
            kind: FieldKind::Int,
            raw: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "cannot convert tag 38 value 'abc' to INT");
    }

    #[test]
    fn test_field_error_is_not_found() {
        assert!(FieldError::NotFound { tag: 1 }.is_not_found());
        assert!(
            FieldError::GroupNotFound {
                tag: 33,
                index: 4,
                count: 3
            }
            .is_not_found()
        );
        assert!(
            !FieldError::Conversion {
                tag: 1,
                kind: FieldKind::Int,
                raw: String::new()
            }
            .is_not_found()
        );
    }

    #[test]
    fn test_fix_error_from_field() {
        let fix_err: FixError = FieldError::NotFound { tag: 37 }.into();
        assert!(matches!(
            fix_err,
            FixError::Field(FieldError::NotFound { tag: 37 })
        ));
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::GroupCountMismatch {
            count_tag: 33,
            expected: 2,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "group count mismatch for tag 33: expected 2, found 1"
        );
    }

    #[test]
    fn test_validation_reject_reason() {
        let err = ValidationError::RequiredTagMissing { tag: 37 };
        assert_eq!(err.reject_reason(), SessionRejectReason::RequiredTagMissing);
        assert_eq!(err.reject_reason().code(), 1);
        assert_eq!(err.ref_tag(), Some(37));

        let err = ValidationError::IncorrectNumInGroupCount {
            tag: 33,
            declared: "2".to_string(),
            actual: 1,
        };
        assert_eq!(err.reject_reason().code(), 16);
    }
}
