//! FIX 4.1 Execution Report: typed build, validation and wire encoding.
use fixmap::dictionary::Validator;
use fixmap::messages::fields::*;
use fixmap::messages::fix41::{self, ExecutionReport};
use fixmap::prelude::{EncoderConfig, FieldAccess, FixField, TypedMessage, encode};
use rust_decimal::Decimal;
use tracing::{info, warn};
mod common;
use common::{init_logging, printable, sending_time};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let dict = fix41::dictionary();

    let mut report = ExecutionReport::new();
    report.set(BeginString::new("FIX.4.1".to_string()));
    report.set(SenderCompId::new("BROKER".to_string()));
    report.set(TargetCompId::new("CLIENT".to_string()));
    report.set(MsgSeqNum::new(1));
    if let Some(time) = sending_time() {
        report.set(SendingTime::new(time));
    }
    report.set(OrderId::new("ORD1".to_string()));
    report.set(Side::new(fixmap::core::Side::Buy));
    report.set(OrderQty::new(Decimal::from(100)));

    if let Err(e) = Validator::new(&dict).validate(report.message()) {
        warn!(
            "Partial report rejected: {} (reason {})",
            e,
            e.reject_reason().code()
        );
    }
    info!("Still missing: {:?}", report.missing_required());

    report.set(ExecId::new("EXEC1".to_string()));
    report.set(ExecTransType::new('0'));
    report.set(ExecType::new('2'));
    report.set(OrdStatus::new('2'));
    report.set(Symbol::new("MSFT".to_string()));
    report.set(LastShares::new(Decimal::from(100)));
    report.set(LastPx::new(Decimal::new(41250, 2)));
    report.set(LeavesQty::new(Decimal::ZERO));
    report.set(CumQty::new(Decimal::from(100)));
    report.set(AvgPx::new(Decimal::new(41250, 2)));

    Validator::new(&dict).validate(report.message())?;
    info!("Account set: {}", report.is_set::<Account>());

    let bytes = encode(report.message(), EncoderConfig::default());
    info!("Encoded: {}", printable(&bytes));
    Ok(())
}
