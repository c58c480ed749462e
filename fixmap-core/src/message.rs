/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Message types for FIX protocol.
//!
//! This module provides:
//! - [`MsgType`]: The MsgType (tag 35) discriminator
//! - [`Message`]: Header, body and trailer field containers
//! - [`is_header_tag`] / [`is_trailer_tag`]: Standard section classification

use crate::error::FieldError;
use crate::field::{FieldValue, FixField};
use crate::map::FieldMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// BeginString tag.
pub const BEGIN_STRING: u32 = 8;
/// BodyLength tag.
pub const BODY_LENGTH: u32 = 9;
/// MsgType tag.
pub const MSG_TYPE: u32 = 35;
/// CheckSum tag.
pub const CHECK_SUM: u32 = 10;

/// Header tags written first, in this order, ahead of the rest of the header.
const HEADER_ORDER: [u32; 3] = [BEGIN_STRING, BODY_LENGTH, MSG_TYPE];

/// The value of tag 35.
///
/// Well-known values are associated constants; any other string is accepted
/// so that custom message types pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MsgType(Cow<'static, str>);

impl MsgType {
    /// Heartbeat (0).
    pub const HEARTBEAT: Self = Self::from_static("0");
    /// Test Request (1).
    pub const TEST_REQUEST: Self = Self::from_static("1");
    /// Resend Request (2).
    pub const RESEND_REQUEST: Self = Self::from_static("2");
    /// Reject (3).
    pub const REJECT: Self = Self::from_static("3");
    /// Sequence Reset (4).
    pub const SEQUENCE_RESET: Self = Self::from_static("4");
    /// Logout (5).
    pub const LOGOUT: Self = Self::from_static("5");
    /// Execution Report (8).
    pub const EXECUTION_REPORT: Self = Self::from_static("8");
    /// Order Cancel Reject (9).
    pub const ORDER_CANCEL_REJECT: Self = Self::from_static("9");
    /// Logon (A).
    pub const LOGON: Self = Self::from_static("A");
    /// News (B).
    pub const NEWS: Self = Self::from_static("B");
    /// New Order Single (D).
    pub const NEW_ORDER_SINGLE: Self = Self::from_static("D");
    /// Order Cancel Request (F).
    pub const ORDER_CANCEL_REQUEST: Self = Self::from_static("F");
    /// Business Message Reject (j).
    pub const BUSINESS_MESSAGE_REJECT: Self = Self::from_static("j");

    /// Creates a message type from a static string.
    #[must_use]
    pub const fn from_static(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }

    /// Creates a message type from any string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(Cow::Owned(value.into()))
    }

    /// Returns the wire value.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is a session-level (administrative) message type.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self.as_str(), "0" | "1" | "2" | "3" | "4" | "5" | "A")
    }
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MsgType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Returns true if `tag` belongs to the standard message header.
#[must_use]
pub const fn is_header_tag(tag: u32) -> bool {
    matches!(
        tag,
        8 | 9
            | 35
            | 34
            | 43
            | 49
            | 50
            | 52
            | 56
            | 57
            | 90
            | 91
            | 97
            | 115
            | 116
            | 122
            | 128
            | 129
            | 142
            | 143
            | 144
            | 145
            | 212
            | 213
            | 347
            | 369
            | 370
            | 627
            | 628
            | 629
            | 630
            | 1128
            | 1129
    )
}

/// Returns true if `tag` belongs to the standard message trailer.
#[must_use]
pub const fn is_trailer_tag(tag: u32) -> bool {
    matches!(tag, 93 | 89 | 10)
}

/// A FIX message split into header, body and trailer.
///
/// Each section is an independent [`FieldMap`]. Cloning performs a deep copy,
/// nested groups included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    header: FieldMap,
    body: FieldMap,
    trailer: FieldMap,
}

impl Message {
    /// Creates an empty message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty message with tag 35 set.
    #[must_use]
    pub fn with_msg_type(msg_type: &MsgType) -> Self {
        let mut message = Self::new();
        message.header.set_raw(MSG_TYPE, msg_type.as_str());
        message
    }

    /// Assembles a message from its three sections.
    #[must_use]
    pub fn from_parts(header: FieldMap, body: FieldMap, trailer: FieldMap) -> Self {
        Self {
            header,
            body,
            trailer,
        }
    }

    /// Splits the message into header, body and trailer.
    #[must_use]
    pub fn into_parts(self) -> (FieldMap, FieldMap, FieldMap) {
        (self.header, self.body, self.trailer)
    }

    /// Returns the header section.
    #[inline]
    #[must_use]
    pub fn header(&self) -> &FieldMap {
        &self.header
    }

    /// Returns the header section mutably.
    #[inline]
    pub fn header_mut(&mut self) -> &mut FieldMap {
        &mut self.header
    }

    /// Returns the body section.
    #[inline]
    #[must_use]
    pub fn body(&self) -> &FieldMap {
        &self.body
    }

    /// Returns the body section mutably.
    #[inline]
    pub fn body_mut(&mut self) -> &mut FieldMap {
        &mut self.body
    }

    /// Returns the trailer section.
    #[inline]
    #[must_use]
    pub fn trailer(&self) -> &FieldMap {
        &self.trailer
    }

    /// Returns the trailer section mutably.
    #[inline]
    pub fn trailer_mut(&mut self) -> &mut FieldMap {
        &mut self.trailer
    }

    /// Returns the message type from header tag 35.
    ///
    /// # Errors
    /// Returns `FieldError::NotFound` if tag 35 is not set.
    pub fn msg_type(&self) -> Result<MsgType, FieldError> {
        self.header.get_raw(MSG_TYPE).map(MsgType::from)
    }

    /// Returns true if tag 35 holds an administrative message type.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.msg_type().is_ok_and(|t| t.is_admin())
    }

    /// Returns true if tag 35 holds an application message type.
    #[must_use]
    pub fn is_app(&self) -> bool {
        self.msg_type().is_ok_and(|t| !t.is_admin())
    }

    /// Returns the section a tag belongs to.
    #[must_use]
    pub fn section(&self, tag: u32) -> &FieldMap {
        if is_header_tag(tag) {
            &self.header
        } else if is_trailer_tag(tag) {
            &self.trailer
        } else {
            &self.body
        }
    }

    /// Returns the section a tag belongs to, mutably.
    pub fn section_mut(&mut self, tag: u32) -> &mut FieldMap {
        if is_header_tag(tag) {
            &mut self.header
        } else if is_trailer_tag(tag) {
            &mut self.trailer
        } else {
            &mut self.body
        }
    }

    /// Stores a value in the section its tag belongs to.
    pub fn set(&mut self, value: FieldValue) {
        self.section_mut(value.tag()).set(value);
    }

    /// Stores a typed field in the section its tag belongs to.
    pub fn set_field<F: FixField>(&mut self, field: F) {
        self.section_mut(F::TAG).set_field(field);
    }

    /// Reads a typed field from the section its tag belongs to.
    ///
    /// # Errors
    /// Returns `FieldError::NotFound` or `FieldError::Conversion`.
    pub fn get_field<F: FixField>(&self) -> Result<F, FieldError> {
        self.section(F::TAG).get_field()
    }

    /// Returns true if the typed field is stored in its section.
    #[must_use]
    pub fn is_set_field<F: FixField>(&self) -> bool {
        self.section(F::TAG).is_set_field::<F>()
    }

    /// Visits header, body and trailer fields in wire order.
    ///
    /// BeginString, BodyLength and MsgType lead the header and CheckSum
    /// closes the trailer whatever order they were set in. Every other field
    /// follows insertion order.
    pub fn walk<F: FnMut(&FieldValue)>(&self, visit: &mut F) {
        for tag in HEADER_ORDER {
            self.header.walk_tag(tag, visit);
        }
        self.header.walk_except(&HEADER_ORDER, visit);
        self.body.walk(visit);
        self.trailer.walk_except(&[CHECK_SUM], visit);
        self.trailer.walk_tag(CHECK_SUM, visit);
    }
}

/// Renders the message as `tag=value|tag=value|...` for logs.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut result = Ok(());
        self.walk(&mut |value| {
            if result.is_ok() {
                result = write!(f, "{value}|");
            }
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msg_type_admin() {
        for admin in ["0", "1", "2", "3", "4", "5", "A"] {
            assert!(MsgType::new(admin).is_admin());
        }
        assert!(!MsgType::EXECUTION_REPORT.is_admin());
        assert!(!MsgType::NEWS.is_admin());
        assert_eq!(MsgType::LOGON, MsgType::from("A"));
    }

    #[test]
    fn test_with_msg_type() {
        let message = Message::with_msg_type(&MsgType::EXECUTION_REPORT);
        assert_eq!(message.msg_type().unwrap(), MsgType::EXECUTION_REPORT);
        assert_eq!(message.header().get_raw(35).unwrap(), "8");
        assert!(message.body().is_empty());
        assert!(message.is_app());
        assert!(!message.is_admin());
    }

    #[test]
    fn test_missing_msg_type() {
        let message = Message::new();
        assert_eq!(message.msg_type().unwrap_err(), FieldError::NotFound { tag: 35 });
        assert!(!message.is_admin());
        assert!(!message.is_app());
    }

    #[test]
    fn test_tag_routing() {
        let mut message = Message::new();
        message.set(FieldValue::from_raw(49, "SENDER"));
        message.set(FieldValue::from_raw(55, "MSFT"));
        message.set(FieldValue::from_raw(10, "000"));

        assert!(message.header().contains(49));
        assert!(message.body().contains(55));
        assert!(message.trailer().contains(10));
        assert!(!message.body().contains(49));
    }

    #[test]
    fn test_header_trailer_classification() {
        assert!(is_header_tag(8));
        assert!(is_header_tag(52));
        assert!(!is_header_tag(55));
        assert!(is_trailer_tag(10));
        assert!(!is_trailer_tag(58));
    }

    #[test]
    fn test_display() {
        let mut message = Message::with_msg_type(&MsgType::HEARTBEAT);
        message.header_mut().set_raw(49, "A");
        message.body_mut().set_raw(112, "PING");
        assert_eq!(message.to_string(), "35=0|49=A|112=PING|");
    }

    #[test]
    fn test_walk_pins_session_fields() {
        let mut message = Message::with_msg_type(&MsgType::HEARTBEAT);
        message.trailer_mut().set_raw(CHECK_SUM, "000");
        message.trailer_mut().set_raw(93, "3");
        message.header_mut().set_raw(49, "A");
        message.header_mut().set_raw(BODY_LENGTH, "12");
        message.header_mut().set_raw(BEGIN_STRING, "FIX.4.2");
        message.body_mut().set_raw(112, "PING");

        assert_eq!(
            message.to_string(),
            "8=FIX.4.2|9=12|35=0|49=A|112=PING|93=3|10=000|"
        );
        assert_eq!(message.header().tags().collect::<Vec<_>>(), vec![35, 49, 9, 8]);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut message = Message::with_msg_type(&MsgType::NEWS);
        let mut line = FieldMap::new();
        line.set_raw(58, "hello");
        message.body_mut().add_group(33, line);

        let copy = message.clone();
        message
            .body_mut()
            .get_group_mut(33, 1)
            .unwrap()
            .set_raw(58, "changed");

        assert_eq!(copy.body().get_group(33, 1).unwrap().get_raw(58).unwrap(), "hello");
    }
}
