//! Reduce net balances to a short list of settling payments.
//!
//! Debtors and creditors are each sorted by descending magnitude and matched
//! greedily, largest against largest. This is not a provably minimal
//! transfer count, but it is deterministic and never emits more than
//! `debtors + creditors - 1` transfers, since every step retires at least one
//! side.
//!
//! All amounts are rounded to cents before comparison and before emission, so
//! floating residue from upstream arithmetic never turns into a spurious
//! sub-cent payment.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::balance::{compute_balances, Balances, Transaction};
use crate::participant::ParticipantId;

/// Cent-level tolerance: balances and payments below this are treated as settled.
pub const TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// A single settling payment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transfer {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Decimal,
}

/// Balances plus the transfers that clear them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settlement {
    pub balances: Balances,
    pub transfers: Vec<Transfer>,
    /// `Σ amount − Σ owed_amount` across the input. Non-zero when some
    /// transaction's splits do not cover its amount; that excess cannot be
    /// settled by transfers between participants.
    pub residual: Decimal,
}

/// Round to whole cents, midpoint away from zero.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// A participant's outstanding magnitude on one side of the ledger.
#[derive(Debug, Clone)]
struct Position<'a> {
    participant: &'a ParticipantId,
    amount: Decimal,
}

/// Split balances into debtors and creditors, each largest-first.
///
/// Balances that round to zero are dropped. Ties keep first-seen order.
fn partition(balances: &Balances) -> (Vec<Position<'_>>, Vec<Position<'_>>) {
    let mut debtors = Vec::new();
    let mut creditors = Vec::new();
    for (participant, balance) in balances.iter() {
        let rounded = round_cents(balance);
        if rounded < Decimal::ZERO {
            debtors.push(Position {
                participant,
                amount: -rounded,
            });
        } else if rounded > Decimal::ZERO {
            creditors.push(Position {
                participant,
                amount: rounded,
            });
        }
    }
    debtors.sort_by(|a, b| b.amount.cmp(&a.amount));
    creditors.sort_by(|a, b| b.amount.cmp(&a.amount));
    (debtors, creditors)
}

/// Matching state between steps: which pair is current and what each still carries.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    debtor: usize,
    creditor: usize,
    owed: Decimal,
    due: Decimal,
}

impl Cursor {
    fn first(debtors: &[Position<'_>], creditors: &[Position<'_>]) -> Option<Self> {
        Some(Self {
            debtor: 0,
            creditor: 0,
            owed: debtors.first()?.amount,
            due: creditors.first()?.amount,
        })
    }

    fn payment(&self) -> Decimal {
        round_cents(self.owed.min(self.due))
    }

    fn transfer(&self, debtors: &[Position<'_>], creditors: &[Position<'_>]) -> Option<Transfer> {
        let amount = self.payment();
        (amount >= TOLERANCE).then(|| Transfer {
            from: debtors[self.debtor].participant.clone(),
            to: creditors[self.creditor].participant.clone(),
            amount,
        })
    }

    /// The state after this step's payment; `None` once either side is exhausted.
    fn next(&self, debtors: &[Position<'_>], creditors: &[Position<'_>]) -> Option<Self> {
        let payment = self.payment();
        let owed = round_cents(self.owed - payment);
        let due = round_cents(self.due - payment);

        let (debtor, owed) = if owed < TOLERANCE {
            (self.debtor + 1, debtors.get(self.debtor + 1)?.amount)
        } else {
            (self.debtor, owed)
        };
        let (creditor, due) = if due < TOLERANCE {
            (self.creditor + 1, creditors.get(self.creditor + 1)?.amount)
        } else {
            (self.creditor, due)
        };

        Some(Self {
            debtor,
            creditor,
            owed,
            due,
        })
    }
}

/// Compute settling transfers for the given balances.
///
/// An already-settled ledger yields an empty list.
pub fn minimize_transfers(balances: &Balances) -> Vec<Transfer> {
    let (debtors, creditors) = partition(balances);

    std::iter::successors(Cursor::first(&debtors, &creditors), |cursor| {
        cursor.next(&debtors, &creditors)
    })
    .filter_map(|cursor| cursor.transfer(&debtors, &creditors))
    .collect()
}

/// Compute balances and settling transfers in one pass over the transactions.
pub fn settle(transactions: &[Transaction]) -> Settlement {
    let balances = compute_balances(transactions);
    let transfers = minimize_transfers(&balances);
    let residual = balances.total();

    if round_cents(residual) != Decimal::ZERO {
        tracing::debug!(
            %residual,
            "splits do not cover transaction amounts; residual left unsettled"
        );
    }

    Settlement {
        balances,
        transfers,
        residual,
    }
}
