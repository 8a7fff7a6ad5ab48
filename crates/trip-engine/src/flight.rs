//! Flight progress derived from local time math, and the seam for replacing it.
//!
//! The classifier only knows scheduled departure and arrival instants, so the
//! progress it derives drifts from reality for delayed flights. A live status
//! provider can later supply a [`FlightStatusOverride`] with the same fields;
//! any field the override carries replaces the derived one.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schedule::{ScheduleItem, StatusBucket};

/// Flight lifecycle as shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightPhase {
    Scheduled,
    EnRoute,
    Landed,
    Delayed,
    Cancelled,
}

/// Raw flight fields attached to a logistics row. Passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightDetails {
    #[serde(default)]
    pub flight_number: Option<String>,
    #[serde(default)]
    pub departure_airport: Option<String>,
    #[serde(default)]
    pub arrival_airport: Option<String>,
    #[serde(default)]
    pub delay_minutes: Option<i64>,
    #[serde(default)]
    pub gate: Option<String>,
    #[serde(default)]
    pub terminal: Option<String>,
}

/// Display-ready flight status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightProgress {
    pub status: FlightPhase,
    pub departure_label: Option<String>,
    pub arrival_label: Option<String>,
    pub percent_complete: u8,
    pub eta: DateTime<Utc>,
    pub delay_minutes: Option<i64>,
    pub gate: Option<String>,
    pub terminal: Option<String>,
}

/// Provider-reported values that replace derived ones. `None` keeps the derived field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightStatusOverride {
    #[serde(default)]
    pub status: Option<FlightPhase>,
    #[serde(default)]
    pub percent_complete: Option<u8>,
    #[serde(default)]
    pub eta: Option<DateTime<Utc>>,
    #[serde(default)]
    pub delay_minutes: Option<i64>,
    #[serde(default)]
    pub gate: Option<String>,
    #[serde(default)]
    pub terminal: Option<String>,
}

/// Percentage of the scheduled flight time elapsed at `now`, clamped to `0..=100`.
///
/// A zero-length (or inverted) window reads as 0 before `end` and 100 from it on.
pub fn percent_complete(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> u8 {
    let total = (end - start).num_milliseconds();
    if total <= 0 {
        return if now >= end { 100 } else { 0 };
    }
    let elapsed = (now - start).num_milliseconds();
    let pct = (elapsed as f64 / total as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

impl FlightProgress {
    /// Derive progress for a classified flight leg.
    ///
    /// Only in-progress and upcoming legs get a status; other buckets yield `None`.
    pub fn derive(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
        bucket: StatusBucket,
        details: &FlightDetails,
    ) -> Option<Self> {
        let status = match bucket {
            StatusBucket::InProgress => FlightPhase::EnRoute,
            StatusBucket::Upcoming => FlightPhase::Scheduled,
            StatusBucket::Today => return None,
        };
        Some(Self {
            status,
            departure_label: details.departure_airport.clone(),
            arrival_label: details.arrival_airport.clone(),
            percent_complete: percent_complete(start, end, now),
            eta: end,
            delay_minutes: details.delay_minutes,
            gate: details.gate.clone(),
            terminal: details.terminal.clone(),
        })
    }

    /// Replace every field the override carries.
    pub fn with_override(self, update: &FlightStatusOverride) -> Self {
        Self {
            status: update.status.unwrap_or(self.status),
            percent_complete: update
                .percent_complete
                .map(|p| p.min(100))
                .unwrap_or(self.percent_complete),
            eta: update.eta.unwrap_or(self.eta),
            delay_minutes: update.delay_minutes.or(self.delay_minutes),
            gate: update.gate.clone().or(self.gate),
            terminal: update.terminal.clone().or(self.terminal),
            ..self
        }
    }
}

/// A source of live flight status, keyed by schedule item id.
pub trait FlightStatusSource {
    fn lookup(&self, item_id: &str) -> Option<FlightStatusOverride>;
}

impl FlightStatusSource for HashMap<String, FlightStatusOverride> {
    fn lookup(&self, item_id: &str) -> Option<FlightStatusOverride> {
        self.get(item_id).cloned()
    }
}

/// Apply live overrides to every item that already carries flight progress.
///
/// Items without progress are returned unchanged; order is preserved.
pub fn apply_flight_overrides(
    items: Vec<ScheduleItem>,
    source: &dyn FlightStatusSource,
) -> Vec<ScheduleItem> {
    items
        .into_iter()
        .map(|mut item| {
            if let Some(progress) = item.flight.take() {
                item.flight = Some(match source.lookup(&item.id) {
                    Some(update) => progress.with_override(&update),
                    None => progress,
                });
            }
            item
        })
        .collect()
}
