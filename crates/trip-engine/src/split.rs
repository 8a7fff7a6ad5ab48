//! Equal splitting of a total across participants, to the cent.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal::prelude::Signed;
use serde::{Deserialize, Serialize};

use crate::participant::ParticipantId;
use crate::settle::round_cents;

/// One participant's portion of a split total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Share {
    pub participant: ParticipantId,
    pub amount: Decimal,
}

/// Divide `total` evenly across `participants`.
///
/// Every share is the total divided by the head count, truncated to the cent.
/// The leftover cents all go to the first participant in input order, so the
/// shares always sum exactly to the (cent-rounded) total:
/// `100.00` across three people is `33.34 / 33.33 / 33.33`.
///
/// No participants yields no shares.
pub fn split_equal(total: Decimal, participants: &[ParticipantId]) -> Vec<Share> {
    if participants.is_empty() {
        return Vec::new();
    }

    let total = round_cents(total);
    let count = Decimal::from(participants.len());
    let (base, remainder) = base_share(total, count);

    participants
        .iter()
        .enumerate()
        .map(|(i, participant)| Share {
            participant: participant.clone(),
            amount: if i == 0 { base + remainder } else { base },
        })
        .collect()
}

/// The per-head share truncated to cents, and what is left over.
///
/// Near `Decimal::MAX` the division can round its quotient away from zero, so
/// the base steps back toward zero until `base * count` fits under the total.
fn base_share(total: Decimal, count: Decimal) -> (Decimal, Decimal) {
    let mut base = (total / count).round_dp_with_strategy(2, RoundingStrategy::ToZero);
    loop {
        if let Some(remainder) = base
            .checked_mul(count)
            .and_then(|allocated| total.checked_sub(allocated))
        {
            return (base, remainder);
        }
        base -= base.signum();
    }
}
