//! JSON documents to typed records.
//!
//! This is the only fallible surface of the crate: once records are parsed,
//! every computation is total.

use chrono_tz::Tz;

use crate::balance::Transaction;
use crate::error::{Result, TripError};
use crate::ledger::{ExpenseRow, Ledger};
use crate::schedule::TripSchedule;

/// Parse a ledger document: `{"expenses": [...], "event_costs": [...]}`.
///
/// A bare JSON array is read as a list of ready-made transactions, each becoming
/// an expense row.
pub fn parse_ledger(json: &str) -> Result<Ledger> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if value.is_array() {
        let transactions: Vec<Transaction> = serde_json::from_value(value)?;
        return Ok(Ledger {
            expenses: transactions
                .into_iter()
                .map(|tx| ExpenseRow {
                    payer: tx.payer,
                    amount: tx.amount,
                    splits: tx.splits,
                    description: None,
                })
                .collect(),
            event_costs: Vec::new(),
        });
    }
    if !value.is_object() {
        return Err(TripError::InvalidInput(
            "expected a ledger object or a transaction array".to_string(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}

/// Parse a schedule document and validate its trip window.
pub fn parse_schedule(json: &str) -> Result<TripSchedule> {
    let schedule: TripSchedule = serde_json::from_str(json)?;
    schedule.trip.validate()?;
    Ok(schedule)
}

/// Parse an IANA timezone name (e.g. "Europe/Lisbon").
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| TripError::InvalidTimezone(name.to_string()))
}
