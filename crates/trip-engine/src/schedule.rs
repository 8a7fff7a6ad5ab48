//! Schedule rows in, display-ready schedule items out.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TripError};
use crate::flight::{FlightDetails, FlightProgress};
use crate::participant::{Member, ParticipantId, ParticipantRef};

/// Where an item sits relative to the current instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBucket {
    /// `start <= now <= end`.
    InProgress,
    /// Starts within the lookahead window.
    Upcoming,
    /// Arrival or departure marker for the current date.
    Today,
}

impl StatusBucket {
    pub const ALL: [StatusBucket; 3] = [
        StatusBucket::InProgress,
        StatusBucket::Upcoming,
        StatusBucket::Today,
    ];

    /// Output tier: in-progress first, then upcoming, then today markers.
    pub fn sort_order(self) -> u8 {
        match self {
            StatusBucket::InProgress => 0,
            StatusBucket::Upcoming => 1,
            StatusBucket::Today => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusBucket::InProgress => "Happening now",
            StatusBucket::Upcoming => "Up next",
            StatusBucket::Today => "Today",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Food,
    Activity,
    Sightseeing,
    Nightlife,
    Lodging,
    #[default]
    #[serde(other)]
    Other,
}

impl EventCategory {
    pub fn glyph(self) -> &'static str {
        match self {
            EventCategory::Food => "🍽️",
            EventCategory::Activity => "🎯",
            EventCategory::Sightseeing => "📸",
            EventCategory::Nightlife => "🍸",
            EventCategory::Lodging => "🏨",
            EventCategory::Other => "📅",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogisticsKind {
    Flight,
    Train,
    Bus,
    Car,
    Ferry,
    #[default]
    #[serde(other)]
    Other,
}

impl LogisticsKind {
    pub fn glyph(self) -> &'static str {
        match self {
            LogisticsKind::Flight => "✈️",
            LogisticsKind::Train => "🚆",
            LogisticsKind::Bus => "🚌",
            LogisticsKind::Car => "🚗",
            LogisticsKind::Ferry => "⛴️",
            LogisticsKind::Other => "🧭",
        }
    }
}

/// Who an item includes when the row names nobody explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultAttendance {
    /// Open invitation: every trip member.
    AllMembers,
    /// Only the participant who owns the row.
    Owner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Event(EventCategory),
    Logistics(LogisticsKind),
    Arrival,
    Departure,
}

impl ItemKind {
    pub fn glyph(self) -> &'static str {
        match self {
            ItemKind::Event(category) => category.glyph(),
            ItemKind::Logistics(kind) => kind.glyph(),
            ItemKind::Arrival => "🛬",
            ItemKind::Departure => "🛫",
        }
    }

    /// Events are collective by default; everything else belongs to its owner.
    pub fn default_attendance(self) -> DefaultAttendance {
        match self {
            ItemKind::Event(_) => DefaultAttendance::AllMembers,
            ItemKind::Logistics(_) | ItemKind::Arrival | ItemKind::Departure => {
                DefaultAttendance::Owner
            }
        }
    }
}

/// The trip's active date range, in the trip's local timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
}

fn default_timezone() -> Tz {
    chrono_tz::UTC
}

impl TripWindow {
    /// # Errors
    /// Returns `TripError::InvalidTripWindow` if `start_date` is after `end_date`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, timezone: Tz) -> Result<Self> {
        let window = Self {
            start_date,
            end_date,
            timezone,
        };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start_date > self.end_date {
            return Err(TripError::InvalidTripWindow {
                start: self.start_date.to_string(),
                end: self.end_date.to_string(),
            });
        }
        Ok(())
    }

    /// The calendar date `now` falls on at the trip's location.
    pub fn local_date(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.timezone).date_naive()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// A scheduled event row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRow {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: EventCategory,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    /// Explicit attendee list; absent or empty means everyone.
    #[serde(default)]
    pub attendees: Option<Vec<ParticipantId>>,
}

/// A transit leg (flight, train, drive...) owned by one member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticsRow {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub kind: LogisticsKind,
    pub owner: ParticipantId,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    /// Explicit traveler list; absent or empty means just the owner.
    #[serde(default)]
    pub travelers: Option<Vec<ParticipantId>>,
    #[serde(default)]
    pub details: FlightDetails,
}

/// Everything the classifier reads for one trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSchedule {
    pub trip: TripWindow,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub events: Vec<EventRow>,
    #[serde(default)]
    pub logistics: Vec<LogisticsRow>,
}

/// One entry of the happening-now feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleItem {
    pub id: String,
    pub kind: ItemKind,
    pub title: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub glyph: &'static str,
    pub participants: Vec<ParticipantRef>,
    pub bucket: StatusBucket,
    /// Present for flight legs with a known window; see [`crate::flight`].
    pub flight: Option<FlightProgress>,
}

/// Group a classified feed by bucket, in tier order, omitting empty buckets.
pub fn group_by_bucket(items: &[ScheduleItem]) -> Vec<(StatusBucket, Vec<&ScheduleItem>)> {
    StatusBucket::ALL
        .iter()
        .map(|&bucket| {
            let members: Vec<&ScheduleItem> =
                items.iter().filter(|item| item.bucket == bucket).collect();
            (bucket, members)
        })
        .filter(|(_, members)| !members.is_empty())
        .collect()
}
