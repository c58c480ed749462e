/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! # FixMap
//!
//! Typed field containers for FIX messages.
//!
//! FixMap stores a FIX message as ordered header, body and trailer sections
//! of raw `tag=value` fields with nested repeating groups, and layers a
//! compile-time checked API on top: a message type only accepts the fields
//! and groups its table declares.
//!
//! ## Features
//!
//! - **Order preserving**: Fields keep their insertion position, overwrites included
//! - **Typed access**: `report.get::<OrderId>()` only compiles if the message has the field
//! - **Repeating groups**: 1-based entries, nested groups, count fields kept in sync
//! - **Dictionary validation**: Violations map to FIX session reject reasons
//! - **Tag=value codec**: SOH or custom delimiters, dictionary-driven group decoding
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fixmap::prelude::*;
//! use fixmap::messages::fields::{OrderId, Side as SideField};
//! use fixmap::messages::fix41::ExecutionReport;
//!
//! let mut report = ExecutionReport::new();
//! report.set(OrderId::new("ORD1".to_string()));
//! report.set(SideField::new(Side::Buy));
//!
//! let bytes = encode(report.message(), EncoderConfig::default());
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: Field values, containers, messages and access traits
//! - [`dictionary`]: Dictionary model and validator
//! - [`tagvalue`]: Tag=value encoding and decoding
//! - [`messages`]: Generated field wrappers and message tables

pub mod core {
    //! Field values, containers, messages and access traits.
    pub use fixmap_core::*;
}

pub mod dictionary {
    //! Dictionary model and validator.
    pub use fixmap_dictionary::*;
}

pub mod tagvalue {
    //! Tag=value encoding and decoding.
    pub use fixmap_tagvalue::*;
}

pub mod messages {
    //! Generated field wrappers and message tables.
    pub use fixmap_messages::*;
}

pub use fixmap_derive::FixField;

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use fixmap_core::{
        FieldAccess, FieldError, FieldKind, FieldMap, FieldRef, FieldTag, FieldValue, FixError,
        FixField, HasGroup, Message, MsgType, Result, SessionRejectReason, Side, Supports,
        TypedGroup, TypedMessage, UtcTimestamp, ValidationError,
    };

    // Derive
    pub use fixmap_derive::FixField;

    // Dictionary
    pub use fixmap_dictionary::{Dictionary, FieldDef, FieldType, MessageDef, Validator, Version};

    // Tag-value encoding
    pub use fixmap_tagvalue::{Decoder, DecoderConfig, Encoder, EncoderConfig, decode, encode};
}

#[cfg(test)]
mod tests {
    use super::messages::fields::{Headline, OrderId, Text};
    use super::messages::fix41::ExecutionReport;
    use super::messages::fix42::{self, LineOfText, News};
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let _map = FieldMap::new();
        let _ts = UtcTimestamp::now();
        let _side = Side::Buy;
        assert!(MsgType::HEARTBEAT.is_admin());
    }

    #[test]
    fn test_version() {
        let version = Version::Fix42;
        assert_eq!(version.begin_string(), "FIX.4.2");
    }

    #[test]
    fn test_typed_message_through_facade() {
        let mut report = ExecutionReport::new();
        report.set(OrderId::new("ORD1".to_string()));
        assert_eq!(report.message().msg_type().unwrap(), ExecutionReport::MSG_TYPE);
        assert_eq!(report.get::<OrderId>().unwrap().into_value(), "ORD1");
    }

    #[test]
    fn test_decode_with_generated_dictionary() {
        let dict = fix42::dictionary();
        let mut news = News::with_required(Headline::new("HL".to_string()));
        news.add_group(LineOfText::with_required(Text::new("a".to_string())));
        news.add_group(LineOfText::with_required(Text::new("b".to_string())));

        let bytes = encode(news.message(), EncoderConfig::default());
        let decoded = Decoder::new().with_dictionary(&dict).decode(&bytes).unwrap();
        assert_eq!(&decoded, news.message());
    }
}
