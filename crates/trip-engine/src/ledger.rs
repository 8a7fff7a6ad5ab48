//! Conversion from stored ledger rows to transactions.
//!
//! Expenses carry their own splits. Event costs usually carry only the
//! attendee list and are divided equally; explicit splits take precedence
//! when present.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::balance::{Split, Transaction};
use crate::participant::ParticipantId;
use crate::settle::{settle, Settlement};
use crate::split::split_equal;

/// A shared expense as recorded by a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRow {
    pub payer: ParticipantId,
    pub amount: Decimal,
    #[serde(default)]
    pub splits: Vec<Split>,
    #[serde(default)]
    pub description: Option<String>,
}

/// The cost of an event, paid by one member on behalf of its attendees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCostRow {
    pub payer: ParticipantId,
    pub amount: Decimal,
    #[serde(default)]
    pub attendees: Vec<ParticipantId>,
    #[serde(default)]
    pub splits: Option<Vec<Split>>,
}

impl From<&ExpenseRow> for Transaction {
    fn from(row: &ExpenseRow) -> Self {
        Transaction {
            payer: row.payer.clone(),
            amount: row.amount,
            splits: row.splits.clone(),
        }
    }
}

impl From<&EventCostRow> for Transaction {
    fn from(row: &EventCostRow) -> Self {
        let splits = match &row.splits {
            Some(splits) if !splits.is_empty() => splits.clone(),
            _ => split_equal(row.amount, &row.attendees)
                .into_iter()
                .map(|share| Split {
                    participant: share.participant,
                    owed_amount: share.amount,
                })
                .collect(),
        };
        Transaction {
            payer: row.payer.clone(),
            amount: row.amount,
            splits,
        }
    }
}

/// Every money-moving row for one trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub expenses: Vec<ExpenseRow>,
    #[serde(default)]
    pub event_costs: Vec<EventCostRow>,
}

impl Ledger {
    /// Expenses first, then event costs, each in row order.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.expenses
            .iter()
            .map(Transaction::from)
            .chain(self.event_costs.iter().map(Transaction::from))
            .collect()
    }

    pub fn settle(&self) -> Settlement {
        settle(&self.transactions())
    }
}
