/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

use crate::fields::*;
use crate::fix_message;

fix_message! {
    /// FIX 4.1 Execution Report (8).
    pub struct ExecutionReport: "8", App {
        required: [
            order_id: OrderId,
            exec_id: ExecId,
            exec_trans_type: ExecTransType,
            exec_type: ExecType,
            ord_status: OrdStatus,
            symbol: Symbol,
            side: Side,
            order_qty: OrderQty,
            last_shares: LastShares,
            last_px: LastPx,
            leaves_qty: LeavesQty,
            cum_qty: CumQty,
            avg_px: AvgPx,
        ],
        optional: [
            SecondaryOrderId,
            ClOrdId,
            OrigClOrdId,
            ClientId,
            ExecBroker,
            ListId,
            ExecRefId,
            OrdRejReason,
            Account,
            SettlmntTyp,
            FutSettDate,
            SymbolSfx,
            SecurityId,
            IdSource,
            SecurityType,
            MaturityMonthYear,
            MaturityDay,
            PutOrCall,
            StrikePrice,
            OptAttribute,
            SecurityExchange,
            Issuer,
            SecurityDesc,
            OrdType,
            Price,
            StopPx,
            PegDifference,
            Currency,
            TimeInForce,
            ExpireTime,
            ExecInst,
            Rule80A,
            LastSpotRate,
            LastForwardPoints,
            LastMkt,
            LastCapacity,
            TradeDate,
            TransactTime,
            ReportToExch,
            Commission,
            CommType,
            SettlCurrAmt,
            SettlCurrency,
            Text,
        ],
        groups: [],
        required_groups: [],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixmap_core::{FieldAccess, FieldError, FixField, Message, TypedMessage};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn report() -> ExecutionReport {
        let mut report = ExecutionReport::new();
        report.set(OrderId::new("ORD1".to_string()));
        report.set(Side::new(fixmap_core::Side::Buy));
        report.set(OrderQty::new(Decimal::from(100)));
        report
    }

    #[test]
    fn test_order_fields() {
        let report = report();

        assert!(report.is_set::<OrderId>());
        assert_eq!(report.get::<OrderId>().unwrap().into_value(), "ORD1");
        assert_eq!(report.get::<Side>().unwrap().into_value(), fixmap_core::Side::Buy);
        assert_eq!(report.get::<OrderQty>().unwrap().into_value(), Decimal::from(100));

        assert!(!report.is_set::<Account>());
        assert_eq!(
            report.get::<Account>().unwrap_err(),
            FieldError::NotFound { tag: Account::TAG }
        );
    }

    #[test]
    fn test_get_into() {
        let report = report();
        let mut order_id = OrderId::new(String::new());
        report.get_into(&mut order_id).unwrap();
        assert_eq!(order_id.value(), "ORD1");
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut report = report();
        report.set(OrderId::new("ORD2".to_string()));
        let tags: Vec<u32> = report.message().body().tags().collect();
        assert_eq!(tags, vec![37, 54, 38]);
        assert_eq!(report.get::<OrderId>().unwrap().into_value(), "ORD2");
    }

    #[test]
    fn test_with_required_order() {
        let report = ExecutionReport::with_required(
            OrderId::new("O1".to_string()),
            ExecId::new("E1".to_string()),
            ExecTransType::new('0'),
            ExecType::new('0'),
            OrdStatus::new('0'),
            Symbol::new("MSFT".to_string()),
            Side::new(fixmap_core::Side::Sell),
            OrderQty::new(Decimal::from(50)),
            LastShares::new(Decimal::ZERO),
            LastPx::new(Decimal::ZERO),
            LeavesQty::new(Decimal::from(50)),
            CumQty::new(Decimal::ZERO),
            AvgPx::new(Decimal::from_str("0.00").unwrap()),
        );

        let tags: Vec<u32> = report.message().body().tags().collect();
        assert_eq!(tags, ExecutionReport::REQUIRED.to_vec());
        assert!(report.missing_required().is_empty());
        assert_eq!(report.message().body().get_raw(6).unwrap(), "0.00");
    }

    #[test]
    fn test_header_fields() {
        let mut report = report();
        report.set(SenderCompId::new("BROKER".to_string()));
        assert!(report.message().header().contains(49));
        assert!(!report.message().body().contains(49));
        assert_eq!(report.get::<MsgType>().unwrap().into_value(), "8");
    }

    #[test]
    fn test_message_conversion() {
        let message: Message = report().into();
        assert_eq!(message.msg_type().unwrap(), fixmap_core::MsgType::EXECUTION_REPORT);
        let back = ExecutionReport::try_from(message).unwrap();
        assert!(back.is_set::<OrderId>());

        let heartbeat = Message::with_msg_type(&fixmap_core::MsgType::HEARTBEAT);
        assert!(ExecutionReport::try_from(heartbeat).is_err());
    }

    #[test]
    fn test_definition() {
        let def = ExecutionReport::definition();
        assert_eq!(def.msg_type, "8");
        assert_eq!(def.name, "ExecutionReport");
        assert_eq!(def.required_tags().count(), 13);
        assert!(def.contains_tag(58));
        assert_eq!(ExecutionReport::FIELDS.len(), def.fields.len());
    }
}
