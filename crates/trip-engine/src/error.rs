//! Error types for trip-engine input handling.
//!
//! The computations themselves never fail; these errors only come from turning
//! caller-supplied documents into typed records.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TripError {
    #[error("Invalid input document: {0}")]
    InvalidInput(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid trip window: {start} is after {end}")]
    InvalidTripWindow { start: String, end: String },
}

impl From<serde_json::Error> for TripError {
    fn from(err: serde_json::Error) -> Self {
        TripError::InvalidInput(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TripError>;
