//! Tests for equal splitting and ledger row conversion.

use rust_decimal::Decimal;
use trip_engine::ledger::{EventCostRow, ExpenseRow, Ledger};
use trip_engine::{split_equal, ParticipantId, Split, Transaction};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn ids(names: &[&str]) -> Vec<ParticipantId> {
    names.iter().map(|n| ParticipantId::new(*n)).collect()
}

fn amounts(total: &str, names: &[&str]) -> Vec<Decimal> {
    split_equal(d(total), &ids(names))
        .into_iter()
        .map(|share| share.amount)
        .collect()
}

// ── split_equal ─────────────────────────────────────────────────────────────

#[test]
fn hundred_across_three_remainder_to_first() {
    assert_eq!(
        amounts("100.00", &["A", "B", "C"]),
        vec![d("33.34"), d("33.33"), d("33.33")]
    );
}

#[test]
fn remainder_follows_input_order_not_name() {
    let shares = split_equal(d("100.00"), &ids(&["C", "A", "B"]));
    assert_eq!(shares[0].participant, ParticipantId::new("C"));
    assert_eq!(shares[0].amount, d("33.34"));
}

#[test]
fn multi_cent_remainder_all_on_first() {
    // 10.00 / 6 = 1.666..; base 1.66, remainder 4 cents.
    assert_eq!(
        amounts("10.00", &["A", "B", "C", "D", "E", "F"]),
        vec![d("1.70"), d("1.66"), d("1.66"), d("1.66"), d("1.66"), d("1.66")]
    );
}

#[test]
fn even_split_has_no_remainder() {
    assert_eq!(amounts("90", &["A", "B", "C"]), vec![d("30"), d("30"), d("30")]);
}

#[test]
fn single_participant_takes_everything() {
    assert_eq!(amounts("42.42", &["A"]), vec![d("42.42")]);
}

#[test]
fn shares_sum_to_total_exactly() {
    for total in ["0.01", "0.05", "1.00", "99.99", "1234.57", "100000.01"] {
        for n in 1..=9 {
            let names: Vec<String> = (0..n).map(|i| format!("p{}", i)).collect();
            let participants: Vec<ParticipantId> =
                names.iter().map(|s| ParticipantId::new(s.as_str())).collect();
            let sum: Decimal = split_equal(d(total), &participants)
                .iter()
                .map(|s| s.amount)
                .sum();
            assert_eq!(sum, d(total), "total {} across {} participants", total, n);
        }
    }
}

#[test]
fn no_participants_no_shares() {
    assert!(split_equal(d("100"), &[]).is_empty());
}

#[test]
fn zero_total_zero_shares() {
    assert_eq!(amounts("0", &["A", "B"]), vec![Decimal::ZERO, Decimal::ZERO]);
}

#[test]
fn total_rounded_to_cents_first() {
    let sum: Decimal = amounts("10.005", &["A", "B"]).into_iter().sum();
    assert_eq!(sum, d("10.01"));
}

#[test]
fn maximum_total_splits_without_overflow() {
    for n in [2usize, 3, 7] {
        let names: Vec<String> = (0..n).map(|i| format!("p{}", i)).collect();
        let participants: Vec<ParticipantId> =
            names.iter().map(|s| ParticipantId::new(s.as_str())).collect();

        for total in [Decimal::MAX, Decimal::MIN] {
            let shares = split_equal(total, &participants);
            let sum = shares
                .iter()
                .fold(Decimal::ZERO, |acc, s| acc.checked_add(s.amount).unwrap());
            assert_eq!(sum, total, "total {} across {} participants", total, n);
        }
    }
}

#[test]
fn negative_total_remainder_to_first() {
    assert_eq!(
        amounts("-100.00", &["A", "B", "C"]),
        vec![d("-33.34"), d("-33.33"), d("-33.33")]
    );
}

// ── Ledger rows ─────────────────────────────────────────────────────────────

#[test]
fn expense_row_keeps_its_splits() {
    let row = ExpenseRow {
        payer: ParticipantId::new("A"),
        amount: d("50"),
        splits: vec![Split::new("A", d("20")), Split::new("B", d("30"))],
        description: Some("Groceries".to_string()),
    };

    let tx = Transaction::from(&row);

    assert_eq!(tx.payer, ParticipantId::new("A"));
    assert_eq!(tx.amount, d("50"));
    assert_eq!(tx.splits, row.splits);
}

#[test]
fn event_cost_without_splits_divided_among_attendees() {
    let row = EventCostRow {
        payer: ParticipantId::new("B"),
        amount: d("100.00"),
        attendees: ids(&["A", "B", "C"]),
        splits: None,
    };

    let tx = Transaction::from(&row);

    let owed: Vec<Decimal> = tx.splits.iter().map(|s| s.owed_amount).collect();
    assert_eq!(owed, vec![d("33.34"), d("33.33"), d("33.33")]);
    assert_eq!(tx.splits[0].participant, ParticipantId::new("A"));
}

#[test]
fn event_cost_explicit_splits_take_precedence() {
    let row = EventCostRow {
        payer: ParticipantId::new("B"),
        amount: d("60"),
        attendees: ids(&["A", "B", "C"]),
        splits: Some(vec![Split::new("A", d("60"))]),
    };

    let tx = Transaction::from(&row);

    assert_eq!(tx.splits, vec![Split::new("A", d("60"))]);
}

#[test]
fn event_cost_without_attendees_is_pure_credit() {
    let row = EventCostRow {
        payer: ParticipantId::new("B"),
        amount: d("60"),
        attendees: vec![],
        splits: None,
    };

    assert!(Transaction::from(&row).splits.is_empty());
}

#[test]
fn ledger_settles_expenses_and_event_costs_together() {
    let ledger = Ledger {
        expenses: vec![ExpenseRow {
            payer: ParticipantId::new("A"),
            amount: d("90"),
            splits: vec![
                Split::new("A", d("30")),
                Split::new("B", d("30")),
                Split::new("C", d("30")),
            ],
            description: None,
        }],
        event_costs: vec![EventCostRow {
            payer: ParticipantId::new("B"),
            amount: d("60"),
            attendees: ids(&["A", "B", "C"]),
            splits: None,
        }],
    };

    assert_eq!(ledger.transactions().len(), 2);

    let settlement = ledger.settle();

    // A: +60 - 20 = +40, B: -30 + 60 - 20 = +10, C: -30 - 20 = -50
    assert_eq!(settlement.balances.get(&ParticipantId::new("A")), Some(d("40")));
    assert_eq!(settlement.balances.get(&ParticipantId::new("B")), Some(d("10")));
    assert_eq!(settlement.balances.get(&ParticipantId::new("C")), Some(d("-50")));
    assert_eq!(settlement.transfers.len(), 2);
    assert_eq!(settlement.residual, Decimal::ZERO);
}
