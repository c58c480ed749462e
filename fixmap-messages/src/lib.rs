/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! # FixMap Messages
//!
//! Typed field wrappers and message tables for FixMap.
//!
//! This crate provides:
//! - **Fields**: one newtype per FIX field, derived with `#[derive(FixField)]`
//! - **Table macros**: `fix_message!` and `fix_group!`
//! - **Messages**: FIX 4.1 ExecutionReport, FIX 4.2 Heartbeat and News
//! - **Dictionaries**: `fix41::dictionary()` and `fix42::dictionary()` built
//!   from the same tables
//!
//! ## Example
//!
//! ```rust,ignore
//! use fixmap_core::{FieldAccess, FixField, TypedMessage};
//! use fixmap_messages::fields::{OrderId, Side};
//! use fixmap_messages::fix41::ExecutionReport;
//!
//! let mut report = ExecutionReport::new();
//! report.set(OrderId::new("ORD1".to_string()));
//! assert!(report.is_set::<OrderId>());
//! ```

mod dictionary;
pub mod fields;
pub mod fix41;
pub mod fix42;
pub mod macros;

#[doc(hidden)]
pub mod __private {
    pub use fixmap_core::{
        FieldAccess, FieldError, FieldMap, FixField, HasGroup, Message, MsgType, Supports,
        TypedGroup, TypedMessage,
    };
    pub use fixmap_dictionary::{FieldEntry, GroupDef, MessageCategory, MessageDef};
}

#[cfg(test)]
mod tests {
    use crate::fields::*;
    use crate::fix41::{self, ExecutionReport};
    use crate::fix42::{self, LineOfText, News};
    use fixmap_core::{
        FieldAccess, FixField, Message, SessionRejectReason, TimestampPrecision, TypedMessage,
        UtcTimestamp, ValidationError,
    };
    use fixmap_dictionary::Validator;
    use fixmap_tagvalue::{Decoder, DecoderConfig, EncoderConfig, PIPE, encode};
    use rust_decimal::Decimal;

    fn header<M>(message: &mut M, seq: u64)
    where
        M: FieldAccess
            + fixmap_core::Supports<BeginString>
            + fixmap_core::Supports<SenderCompId>
            + fixmap_core::Supports<TargetCompId>
            + fixmap_core::Supports<MsgSeqNum>
            + fixmap_core::Supports<SendingTime>,
    {
        message.set(BeginString::new("FIX.4.2".to_string()));
        message.set(SenderCompId::new("BROKER".to_string()));
        message.set(TargetCompId::new("CLIENT".to_string()));
        message.set(MsgSeqNum::new(seq));
        let time =
            UtcTimestamp::from_ymd_hms_nano(2024, 3, 15, 14, 30, 0, 0, TimestampPrecision::Millis)
                .unwrap();
        message.set(SendingTime::new(time));
    }

    #[test]
    fn test_execution_report_end_to_end() {
        let mut report = ExecutionReport::new();
        report.set(OrderId::new("ORD1".to_string()));
        report.set(Side::new(fixmap_core::Side::Buy));
        report.set(OrderQty::new(Decimal::from(100)));

        assert!(report.is_set::<OrderId>());
        assert_eq!(report.get::<OrderId>().unwrap().into_value(), "ORD1");
        assert!(!report.is_set::<Account>());
        assert!(report.get::<Account>().unwrap_err().is_not_found());
    }

    #[test]
    fn test_typed_message_encodes_begin_string_first() {
        let mut report = ExecutionReport::new();
        report.set(BeginString::new("FIX.4.1".to_string()));
        report.set(OrderId::new("ORD1".to_string()));

        let bytes = encode(report.message(), EncoderConfig::new().with_delimiter(PIPE));
        assert_eq!(&bytes[..], b"8=FIX.4.1|35=8|37=ORD1|");
    }

    #[test]
    fn test_validator_reports_missing_required() {
        let dict = fix41::dictionary();
        let mut report = ExecutionReport::new();
        header(&mut report, 1);
        report.set(OrderId::new("ORD1".to_string()));

        let err = Validator::new(&dict).validate(report.message()).unwrap_err();
        assert_eq!(err, ValidationError::RequiredTagMissing { tag: ExecId::TAG });
        assert_eq!(err.reject_reason(), SessionRejectReason::RequiredTagMissing);
    }

    #[test]
    fn test_validator_accepts_complete_news() {
        let dict = fix42::dictionary();
        let mut news = News::with_required(Headline::new("Open".to_string()));
        header(&mut news, 7);
        news.add_group(LineOfText::with_required(Text::new("line".to_string())));
        assert!(Validator::new(&dict).validate(news.message()).is_ok());

        news.set(Urgency::new('9'));
        assert_eq!(
            Validator::new(&dict).validate(news.message()).unwrap_err(),
            ValidationError::ValueIsIncorrect {
                tag: 61,
                raw: "9".to_string(),
            }
        );
    }

    #[test]
    fn test_news_wire_round_trip() {
        let dict = fix42::dictionary();
        let mut news = News::with_required(Headline::new("Open".to_string()));
        header(&mut news, 2);
        news.add_group(LineOfText::with_required(Text::new("one".to_string())));
        news.add_group(LineOfText::with_required(Text::new("two".to_string())));
        news.set(Urgency::new('0'));

        let bytes = encode(news.message(), EncoderConfig::new().with_delimiter(PIPE));
        assert_eq!(
            &bytes[..],
            &b"8=FIX.4.2|35=B|49=BROKER|56=CLIENT|34=2|52=20240315-14:30:00.000|148=Open|33=2|58=one|58=two|61=0|"[..]
        );

        let decoded: Message = Decoder::new()
            .with_config(DecoderConfig::new().with_delimiter(PIPE))
            .with_dictionary(&dict)
            .decode(&bytes)
            .unwrap();
        let news = News::try_from(decoded).unwrap();
        assert_eq!(news.group_count::<LineOfText>(), 2);
        assert_eq!(
            news.get_group::<LineOfText>(2).unwrap().get::<Text>().unwrap().into_value(),
            "two"
        );
        assert_eq!(news.get::<Urgency>().unwrap().into_value(), '0');
        assert_eq!(news.get::<MsgSeqNum>().unwrap().into_value(), 2);
    }
}
