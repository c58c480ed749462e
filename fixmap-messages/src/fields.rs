/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Typed field wrappers.
//!
//! Each wrapper is a newtype over its value type with the tag and dictionary
//! name attached by `#[derive(FixField)]`. [`definitions`] returns the
//! matching dictionary entries.

use fixmap_core::{LocalMktDate, UtcTimestamp};
use fixmap_derive::FixField;
use fixmap_dictionary::{FieldDef, FieldType};
use rust_decimal::Decimal;

macro_rules! define_fields {
    ($($ident:ident($ty:ty) = $tag:literal, $name:literal, $field_type:ident;)*) => {
        $(
            #[doc = concat!("`", $name, "` (tag ", stringify!($tag), ").")]
            #[derive(Debug, Clone, PartialEq, FixField)]
            #[fix(tag = $tag, name = $name)]
            pub struct $ident(pub $ty);
        )*

        /// Returns the dictionary definition of every field in this module.
        #[must_use]
        pub fn definitions() -> Vec<FieldDef> {
            vec![$(FieldDef::new($tag, $name, FieldType::$field_type)),*]
        }
    };
}

define_fields! {
    // standard header and trailer
    BeginString(String) = 8, "BeginString", String;
    BodyLength(u32) = 9, "BodyLength", Length;
    MsgSeqNum(u64) = 34, "MsgSeqNum", SeqNum;
    MsgType(String) = 35, "MsgType", String;
    PossDupFlag(bool) = 43, "PossDupFlag", Boolean;
    SenderCompId(String) = 49, "SenderCompID", String;
    SendingTime(UtcTimestamp) = 52, "SendingTime", UtcTimestamp;
    TargetCompId(String) = 56, "TargetCompID", String;
    PossResend(bool) = 97, "PossResend", Boolean;
    OrigSendingTime(UtcTimestamp) = 122, "OrigSendingTime", UtcTimestamp;
    CheckSum(String) = 10, "CheckSum", String;

    // orders and executions
    Account(String) = 1, "Account", String;
    AvgPx(Decimal) = 6, "AvgPx", Price;
    ClOrdId(String) = 11, "ClOrdID", String;
    Commission(Decimal) = 12, "Commission", Amt;
    CommType(char) = 13, "CommType", Char;
    CumQty(Decimal) = 14, "CumQty", Qty;
    Currency(String) = 15, "Currency", Currency;
    ExecId(String) = 17, "ExecID", String;
    ExecInst(String) = 18, "ExecInst", String;
    ExecRefId(String) = 19, "ExecRefID", String;
    ExecTransType(char) = 20, "ExecTransType", Char;
    IdSource(String) = 22, "IDSource", String;
    LastCapacity(char) = 29, "LastCapacity", Char;
    LastMkt(String) = 30, "LastMkt", Exchange;
    LastPx(Decimal) = 31, "LastPx", Price;
    LastShares(Decimal) = 32, "LastShares", Qty;
    OrderId(String) = 37, "OrderID", String;
    OrderQty(Decimal) = 38, "OrderQty", Qty;
    OrdStatus(char) = 39, "OrdStatus", Char;
    OrdType(char) = 40, "OrdType", Char;
    OrigClOrdId(String) = 41, "OrigClOrdID", String;
    Price(Decimal) = 44, "Price", Price;
    Rule80A(char) = 47, "Rule80A", Char;
    SecurityId(String) = 48, "SecurityID", String;
    Side(fixmap_core::Side) = 54, "Side", Char;
    Symbol(String) = 55, "Symbol", String;
    TimeInForce(char) = 59, "TimeInForce", Char;
    TransactTime(UtcTimestamp) = 60, "TransactTime", UtcTimestamp;
    SettlmntTyp(char) = 63, "SettlmntTyp", Char;
    FutSettDate(LocalMktDate) = 64, "FutSettDate", LocalMktDate;
    SymbolSfx(String) = 65, "SymbolSfx", String;
    ListId(String) = 66, "ListID", String;
    TradeDate(LocalMktDate) = 75, "TradeDate", LocalMktDate;
    ExecBroker(String) = 76, "ExecBroker", String;
    StopPx(Decimal) = 99, "StopPx", Price;
    OrdRejReason(i64) = 103, "OrdRejReason", Int;
    Issuer(String) = 106, "Issuer", String;
    SecurityDesc(String) = 107, "SecurityDesc", String;
    ClientId(String) = 109, "ClientID", String;
    ReportToExch(bool) = 113, "ReportToExch", Boolean;
    SettlCurrAmt(Decimal) = 119, "SettlCurrAmt", Amt;
    SettlCurrency(String) = 120, "SettlCurrency", Currency;
    ExpireTime(UtcTimestamp) = 126, "ExpireTime", UtcTimestamp;
    ExecType(char) = 150, "ExecType", Char;
    LeavesQty(Decimal) = 151, "LeavesQty", Qty;
    SecurityType(String) = 167, "SecurityType", String;
    LastSpotRate(Decimal) = 194, "LastSpotRate", Price;
    LastForwardPoints(Decimal) = 195, "LastForwardPoints", Price;
    SecondaryOrderId(String) = 198, "SecondaryOrderID", String;
    MaturityMonthYear(String) = 200, "MaturityMonthYear", String;
    PutOrCall(i64) = 201, "PutOrCall", Int;
    StrikePrice(Decimal) = 202, "StrikePrice", Price;
    MaturityDay(u32) = 205, "MaturityDay", Int;
    OptAttribute(char) = 206, "OptAttribute", Char;
    SecurityExchange(String) = 207, "SecurityExchange", Exchange;
    PegDifference(Decimal) = 211, "PegDifference", Price;

    // session and news
    LinesOfText(u32) = 33, "LinesOfText", NumInGroup;
    OrigTime(UtcTimestamp) = 42, "OrigTime", UtcTimestamp;
    Text(String) = 58, "Text", String;
    Urgency(char) = 61, "Urgency", Char;
    TestReqId(String) = 112, "TestReqID", String;
    Headline(String) = 148, "Headline", String;
    EncodedTextLen(u32) = 354, "EncodedTextLen", Length;
    EncodedText(String) = 355, "EncodedText", Data;
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixmap_core::{FieldKind, FixField};
    use std::collections::HashSet;

    #[test]
    fn test_derived_constants() {
        assert_eq!(OrderId::TAG, 37);
        assert_eq!(OrderId::NAME, "OrderID");
        assert_eq!(Side::TAG, 54);
        assert_eq!(TestReqId::NAME, "TestReqID");
    }

    #[test]
    fn test_wrapper_values() {
        let side = Side::new(fixmap_core::Side::Buy);
        assert_eq!(side.to_field_value().as_str(), "1");
        assert_eq!(side.to_field_value().kind(), FieldKind::Char);

        let qty = OrderQty::new(Decimal::from(100));
        assert_eq!(qty.value(), &Decimal::from(100));
        assert_eq!(qty.into_value(), Decimal::from(100));
    }

    #[test]
    fn test_definitions_unique() {
        let defs = definitions();
        let tags: HashSet<u32> = defs.iter().map(|d| d.tag).collect();
        assert_eq!(tags.len(), defs.len());

        let qty = defs.iter().find(|d| d.tag == OrderQty::TAG).unwrap();
        assert_eq!(qty.name, "OrderQty");
        assert_eq!(qty.field_type.kind(), FieldKind::Decimal);
    }
}
