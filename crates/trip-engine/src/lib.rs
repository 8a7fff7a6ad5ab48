//! # trip-engine
//!
//! Deterministic settle-up and happening-now computations for shared trips.
//!
//! Both halves are pure functions over caller-supplied records: nothing is
//! fetched, cached, or persisted here, and every call recomputes from its
//! inputs.
//!
//! ## Modules
//!
//! - [`balance`] — transactions → net balance per participant
//! - [`settle`] — net balances → greedy settling transfers
//! - [`split`] — equal splits with the remainder on the first participant
//! - [`ledger`] — expense and event-cost rows → transactions
//! - [`schedule`] — schedule rows, buckets, and feed items
//! - [`classifier`] — schedule + current instant → happening-now feed
//! - [`flight`] — derived flight progress and the live-status override seam
//! - [`participant`] — participant ids and member identities
//! - [`input`] — JSON documents → typed records
//! - [`error`] — Error types

pub mod balance;
pub mod classifier;
pub mod error;
pub mod flight;
pub mod input;
pub mod ledger;
pub mod participant;
pub mod schedule;
pub mod settle;
pub mod split;

pub use balance::{compute_balances, Balances, Split, Transaction};
pub use classifier::{classify, ClassifierConfig};
pub use error::TripError;
pub use flight::{apply_flight_overrides, FlightProgress, FlightStatusOverride, FlightStatusSource};
pub use ledger::{EventCostRow, ExpenseRow, Ledger};
pub use participant::{Member, ParticipantId, ParticipantRef};
pub use schedule::{group_by_bucket, ScheduleItem, StatusBucket, TripSchedule, TripWindow};
pub use settle::{minimize_transfers, settle, Settlement, Transfer};
pub use split::{split_equal, Share};
