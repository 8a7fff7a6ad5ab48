//! Happening-now classification of a trip's schedule.
//!
//! Each event and logistics leg is bucketed against the current instant:
//! in progress when `start <= now <= end`, upcoming when it starts within the
//! lookahead window, and dropped otherwise. Members whose stay begins or ends
//! on the current local date produce arrival and departure markers. Nothing
//! is returned when the current date lies outside the trip.
//!
//! The output is one flat list, stable-sorted by bucket tier so relative input
//! order survives within each bucket.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::flight::FlightProgress;
use crate::participant::{self, Member, ParticipantId, ParticipantRef};
use crate::schedule::{
    DefaultAttendance, EventRow, ItemKind, LogisticsKind, LogisticsRow, ScheduleItem,
    StatusBucket, TripSchedule,
};

/// Lookahead windows for the upcoming bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// How far ahead an event start still counts as upcoming.
    pub event_lookahead_minutes: i64,
    /// How far ahead a logistics leg still counts as upcoming. Transit needs
    /// earlier visibility than events.
    pub logistics_lookahead_minutes: i64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            event_lookahead_minutes: 60,
            logistics_lookahead_minutes: 120,
        }
    }
}

impl ClassifierConfig {
    fn event_lookahead(&self) -> Duration {
        lookahead(self.event_lookahead_minutes)
    }

    fn logistics_lookahead(&self) -> Duration {
        lookahead(self.logistics_lookahead_minutes)
    }
}

/// Negative windows read as zero; windows past chrono's range saturate.
fn lookahead(minutes: i64) -> Duration {
    Duration::try_minutes(minutes.max(0)).unwrap_or(Duration::MAX)
}

/// Bucket a timed item, or `None` if it is past or beyond the lookahead.
///
/// In-progress needs both instants. Upcoming needs only a future start.
pub fn time_bucket(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    lookahead: Duration,
) -> Option<StatusBucket> {
    if let (Some(start), Some(end)) = (start, end) {
        if start <= now && now <= end {
            return Some(StatusBucket::InProgress);
        }
    }
    match start {
        Some(start) if start > now && start - now <= lookahead => Some(StatusBucket::Upcoming),
        _ => None,
    }
}

/// Resolve who an item includes.
///
/// A non-empty explicit list always wins. Otherwise the kind's default policy
/// decides between every member and the owner alone.
pub fn resolve_attendees(
    explicit: Option<&[ParticipantId]>,
    policy: DefaultAttendance,
    owner: Option<&ParticipantId>,
    members: &[Member],
) -> Vec<ParticipantRef> {
    match explicit {
        Some(ids) if !ids.is_empty() => participant::resolve(ids, members),
        _ => match policy {
            DefaultAttendance::AllMembers => members.iter().map(ParticipantRef::from).collect(),
            DefaultAttendance::Owner => match owner {
                Some(owner) => participant::resolve(std::slice::from_ref(owner), members),
                None => Vec::new(),
            },
        },
    }
}

fn classify_event(
    row: &EventRow,
    members: &[Member],
    now: DateTime<Utc>,
    config: &ClassifierConfig,
) -> Option<ScheduleItem> {
    let bucket = time_bucket(row.start, row.end, now, config.event_lookahead())?;
    let kind = ItemKind::Event(row.category);
    Some(ScheduleItem {
        id: row.id.clone(),
        kind,
        title: row.title.clone(),
        start: row.start,
        end: row.end,
        glyph: kind.glyph(),
        participants: resolve_attendees(
            row.attendees.as_deref(),
            kind.default_attendance(),
            None,
            members,
        ),
        bucket,
        flight: None,
    })
}

fn classify_leg(
    row: &LogisticsRow,
    members: &[Member],
    now: DateTime<Utc>,
    config: &ClassifierConfig,
) -> Option<ScheduleItem> {
    let bucket = time_bucket(row.start, row.end, now, config.logistics_lookahead())?;
    let kind = ItemKind::Logistics(row.kind);
    let flight = match (row.kind, row.start, row.end) {
        (LogisticsKind::Flight, Some(start), Some(end)) => {
            FlightProgress::derive(start, end, now, bucket, &row.details)
        }
        _ => None,
    };
    Some(ScheduleItem {
        id: row.id.clone(),
        kind,
        title: row.title.clone(),
        start: row.start,
        end: row.end,
        glyph: kind.glyph(),
        participants: resolve_attendees(
            row.travelers.as_deref(),
            kind.default_attendance(),
            Some(&row.owner),
            members,
        ),
        bucket,
        flight,
    })
}

fn stay_marker(member: &Member, kind: ItemKind) -> ScheduleItem {
    let (id, title) = match kind {
        ItemKind::Departure => (
            format!("departure:{}", member.id),
            format!("{} departs", member.name),
        ),
        _ => (
            format!("arrival:{}", member.id),
            format!("{} arrives", member.name),
        ),
    };
    ScheduleItem {
        id,
        kind,
        title,
        start: None,
        end: None,
        glyph: kind.glyph(),
        participants: vec![ParticipantRef::from(member)],
        bucket: StatusBucket::Today,
        flight: None,
    }
}

/// Build the happening-now feed for `now`.
///
/// Returns an empty list when the trip-local date of `now` is outside the
/// trip's date range.
pub fn classify(
    schedule: &TripSchedule,
    now: DateTime<Utc>,
    config: &ClassifierConfig,
) -> Vec<ScheduleItem> {
    let today = schedule.trip.local_date(now);
    if !schedule.trip.contains(today) {
        tracing::debug!(%today, "outside trip dates; nothing is happening");
        return Vec::new();
    }

    let members = &schedule.members;

    let events = schedule
        .events
        .iter()
        .filter_map(|row| classify_event(row, members, now, config));
    let legs = schedule
        .logistics
        .iter()
        .filter_map(|row| classify_leg(row, members, now, config));
    let arrivals = members
        .iter()
        .filter(|m| m.stay_start == Some(today))
        .map(|m| stay_marker(m, ItemKind::Arrival));
    let departures = members
        .iter()
        .filter(|m| m.stay_end == Some(today))
        .map(|m| stay_marker(m, ItemKind::Departure));

    let mut items: Vec<ScheduleItem> = events
        .chain(legs)
        .chain(arrivals)
        .chain(departures)
        .collect();

    // Stable: input order survives within a tier.
    items.sort_by_key(|item| item.bucket.sort_order());

    tracing::debug!(count = items.len(), %today, "classified schedule");
    items
}
