//! Net balances from payer/beneficiary transactions.
//!
//! Each transaction credits its payer with the full amount and debits every
//! split beneficiary by their owed share. A payer who is also a beneficiary
//! nets out naturally. Splits are not checked against the amount: any
//! mismatch survives as a residual that settlement cannot clear.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::participant::ParticipantId;

/// One beneficiary's share of a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub participant: ParticipantId,
    pub owed_amount: Decimal,
}

impl Split {
    pub fn new(participant: impl Into<ParticipantId>, owed_amount: Decimal) -> Self {
        Self {
            participant: participant.into(),
            owed_amount,
        }
    }
}

/// A shared payment: who paid, how much, and who owes what.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub payer: ParticipantId,
    pub amount: Decimal,
    #[serde(default)]
    pub splits: Vec<Split>,
}

/// Net position per participant, in first-seen order.
///
/// Positive means the participant is owed money, negative means they owe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Balances {
    entries: Vec<(ParticipantId, Decimal)>,
    index: HashMap<ParticipantId, usize>,
}

impl Balances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to a participant's balance, registering them if unseen.
    pub fn adjust(&mut self, participant: &ParticipantId, delta: Decimal) {
        match self.index.get(participant) {
            Some(&i) => {
                let current = self.entries[i].1;
                self.entries[i].1 = current.checked_add(delta).unwrap_or_else(|| {
                    tracing::warn!(%participant, "balance overflowed; saturating");
                    current.saturating_add(delta)
                });
            }
            None => {
                self.index.insert(participant.clone(), self.entries.len());
                self.entries.push((participant.clone(), delta));
            }
        }
    }

    pub fn get(&self, participant: &ParticipantId) -> Option<Decimal> {
        self.index.get(participant).map(|&i| self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, Decimal)> {
        self.entries.iter().map(|(p, amount)| (p, *amount))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every balance. Zero when all splits cover their amounts.
    ///
    /// Saturates at `Decimal::MAX`/`Decimal::MIN` instead of overflowing.
    pub fn total(&self) -> Decimal {
        self.entries
            .iter()
            .fold(Decimal::ZERO, |sum, (_, amount)| sum.saturating_add(*amount))
    }
}

impl FromIterator<(ParticipantId, Decimal)> for Balances {
    fn from_iter<I: IntoIterator<Item = (ParticipantId, Decimal)>>(iter: I) -> Self {
        let mut balances = Balances::new();
        for (participant, amount) in iter {
            balances.adjust(&participant, amount);
        }
        balances
    }
}

impl Serialize for Balances {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (participant, amount) in &self.entries {
            map.serialize_entry(participant, amount)?;
        }
        map.end()
    }
}

/// Compute each participant's net balance across all transactions.
///
/// Every participant seen as payer or beneficiary gets an entry, even when it
/// nets to zero.
pub fn compute_balances(transactions: &[Transaction]) -> Balances {
    let mut balances = Balances::new();
    for tx in transactions {
        balances.adjust(&tx.payer, tx.amount);
        for split in &tx.splits {
            balances.adjust(&split.participant, -split.owed_amount);
        }
    }
    balances
}
