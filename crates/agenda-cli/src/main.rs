//! `agenda` — query an agenda of recurring events from the command line.
//!
//! Events are read from a JSON array of event definitions; results are
//! printed to stdout as JSON. Logs go to stderr, filtered by `RUST_LOG`.

use std::fs;
use std::path::{Path, PathBuf};

use agenda_engine::parse::{parse_date, parse_datetime, parse_duration};
use agenda_engine::{Agenda, EventDefinition, EventSummary, RecurringEvent};
use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "agenda", version, about = "Query an agenda of recurring events")]
struct Cli {
    /// JSON file holding an array of event definitions
    #[arg(short, long, env = "AGENDA_EVENTS")]
    events: PathBuf,

    /// Compact JSON output (default is pretty-printed)
    #[arg(short, long)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every event with its recurrence metadata
    List,
    /// Events taking place on a day
    Day {
        /// Day to query (YYYY-MM-DD)
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },
    /// Events with exactly this title
    Find {
        title: String,
    },
    /// Check whether a slot is free of non-recurring events
    Free {
        /// Slot start (YYYY-MM-DDTHH:MM[:SS])
        #[arg(short, long, value_parser = parse_datetime)]
        start: NaiveDateTime,
        /// Slot length, e.g. 30m, 1h30m
        #[arg(short, long, value_parser = parse_duration)]
        duration: Duration,
        /// Title of the candidate event
        #[arg(short, long, default_value = "candidate")]
        title: String,
    },
}

#[derive(Serialize)]
struct FreeReport {
    free: bool,
    conflicts: Vec<EventSummary>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let agenda = load_agenda(&cli.events)?;
    tracing::debug!(path = %cli.events.display(), events = agenda.len(), "agenda loaded");

    let output = match cli.command {
        Command::List => render(&summaries(agenda.iter()), cli.compact)?,
        Command::Day { date } => render(&summaries(agenda.events_in_day(date)), cli.compact)?,
        Command::Find { title } => render(&summaries(agenda.find_by_title(&title)), cli.compact)?,
        Command::Free {
            start,
            duration,
            title,
        } => {
            let candidate = RecurringEvent::new(title, start, duration)?;
            let report = FreeReport {
                free: agenda.is_free_for(&candidate),
                conflicts: summaries(agenda.conflicts_with(&candidate)),
            };
            render(&report, cli.compact)?
        }
    };

    println!("{output}");
    Ok(())
}

fn load_agenda(path: &Path) -> Result<Agenda> {
    let input = fs::read_to_string(path)
        .with_context(|| format!("failed to read events file '{}'", path.display()))?;
    let definitions: Vec<EventDefinition> = serde_json::from_str(&input)
        .with_context(|| format!("invalid event definitions in '{}'", path.display()))?;
    Agenda::from_definitions(definitions)
        .with_context(|| format!("invalid event in '{}'", path.display()))
}

fn summaries<'a>(events: impl IntoIterator<Item = &'a RecurringEvent>) -> Vec<EventSummary> {
    events.into_iter().map(RecurringEvent::summary).collect()
}

fn render<T: Serialize>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}
