//! `trip` CLI — settle shared expenses and build happening-now feeds from JSON.
//!
//! ## Usage
//!
//! ```sh
//! # Net balance per participant (stdin → stdout)
//! cat ledger.json | trip balances
//!
//! # Balances plus settling transfers, file to file
//! trip settle -i ledger.json -o settlement.json
//!
//! # Equal split, remainder cents on the first participant
//! trip split --total 100.00 ana ben caz
//!
//! # Happening-now feed at a given instant
//! trip feed -i schedule.json --now 2026-03-16T14:30:00Z
//!
//! # Feed with live flight status overrides applied
//! trip feed -i schedule.json --flight-status live.json
//! ```
//!
//! Logs go to stderr and are controlled by `RUST_LOG` (default `warn`).

use std::collections::HashMap;
use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde_json::json;
use tracing_subscriber::EnvFilter;
use trip_engine::flight::FlightStatusOverride;
use trip_engine::input::{parse_ledger, parse_schedule, parse_timezone};
use trip_engine::{
    apply_flight_overrides, classify, compute_balances, group_by_bucket, split_equal,
    ClassifierConfig, ParticipantId,
};

#[derive(Parser)]
#[command(
    name = "trip",
    version,
    about = "Settle-up and happening-now computations for shared trips"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute each participant's net balance from a ledger
    Balances {
        /// Ledger JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Compute balances and the transfers that settle them
    Settle {
        /// Ledger JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Split a total equally across participants
    Split {
        /// Amount to split, e.g. 100.00
        #[arg(long)]
        total: Decimal,
        /// Participant ids, in order; the first absorbs any remainder
        #[arg(required = true)]
        participants: Vec<String>,
    },
    /// Classify a trip schedule into a happening-now feed
    Feed {
        /// Schedule JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Current instant as RFC 3339 (defaults to the system clock)
        #[arg(long)]
        now: Option<DateTime<Utc>>,
        /// Override the trip timezone (IANA name)
        #[arg(long)]
        timezone: Option<String>,
        /// Minutes ahead an event still counts as upcoming
        #[arg(long, env = "TRIP_EVENT_LOOKAHEAD_MINUTES", default_value_t = 60)]
        event_lookahead_minutes: i64,
        /// Minutes ahead a logistics leg still counts as upcoming
        #[arg(long, env = "TRIP_LOGISTICS_LOOKAHEAD_MINUTES", default_value_t = 120)]
        logistics_lookahead_minutes: i64,
        /// JSON object of item id → live flight status to apply
        #[arg(long)]
        flight_status: Option<String>,
        /// Group output by bucket instead of one flat list
        #[arg(long)]
        grouped: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Balances { input, output } => {
            let ledger = parse_ledger(&read_input(input.as_deref())?)
                .context("Failed to parse ledger")?;
            let balances = compute_balances(&ledger.transactions());
            write_json(output.as_deref(), &serde_json::to_value(&balances)?)?;
        }
        Commands::Settle { input, output } => {
            let ledger = parse_ledger(&read_input(input.as_deref())?)
                .context("Failed to parse ledger")?;
            let settlement = ledger.settle();
            tracing::info!(
                participants = settlement.balances.len(),
                transfers = settlement.transfers.len(),
                "settled ledger"
            );
            write_json(output.as_deref(), &serde_json::to_value(&settlement)?)?;
        }
        Commands::Split {
            total,
            participants,
        } => {
            let ids: Vec<ParticipantId> = participants.into_iter().map(ParticipantId).collect();
            let shares = split_equal(total, &ids);
            write_json(None, &serde_json::to_value(&shares)?)?;
        }
        Commands::Feed {
            input,
            output,
            now,
            timezone,
            event_lookahead_minutes,
            logistics_lookahead_minutes,
            flight_status,
            grouped,
        } => {
            let mut schedule = parse_schedule(&read_input(input.as_deref())?)
                .context("Failed to parse schedule")?;
            if let Some(name) = timezone.as_deref() {
                schedule.trip.timezone = parse_timezone(name)?;
            }
            let config = ClassifierConfig {
                event_lookahead_minutes,
                logistics_lookahead_minutes,
            };
            let now = now.unwrap_or_else(Utc::now);

            let mut items = classify(&schedule, now, &config);
            if let Some(path) = flight_status.as_deref() {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read file: {}", path))?;
                let overrides: HashMap<String, FlightStatusOverride> =
                    serde_json::from_str(&raw).context("Failed to parse flight status")?;
                items = apply_flight_overrides(items, &overrides);
            }

            let value = if grouped {
                let sections: Vec<serde_json::Value> = group_by_bucket(&items)
                    .into_iter()
                    .map(|(bucket, members)| {
                        json!({
                            "bucket": bucket,
                            "label": bucket.label(),
                            "items": members,
                        })
                    })
                    .collect();
                serde_json::Value::Array(sections)
            } else {
                serde_json::to_value(&items)?
            };
            write_json(output.as_deref(), &value)?;
        }
    }

    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_json(path: Option<&str>, value: &serde_json::Value) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => {
            std::fs::write(path, pretty).with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", pretty);
        }
    }
    Ok(())
}
