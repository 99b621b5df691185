//! `slots` CLI - run the availability engine against a catalog file.
//!
//! ## Usage
//!
//! ```sh
//! # Can court-1 take a 90 minute booking at 10:00?
//! slots -i catalog.json check court-1 --date 2026-03-16 --start 10:00 --duration 90
//!
//! # Slot grid for a day, 30 minute steps, as JSON
//! slots -i catalog.json --json grid court-1 --date 2026-03-16 --granularity 30
//!
//! # Free windows, and the first bookable hour
//! slots -i catalog.json free court-1 --date 2026-03-16
//! slots -i catalog.json next court-1 --date 2026-03-16 --duration 60
//!
//! # Browse tennis courts under 150.00/hour that are free at 18:00
//! slots -i catalog.json browse --sport tennis --max-price 15000 --date 2026-03-16 --start 18:00
//!
//! # Look for double bookings in backend data
//! cat catalog.json | slots audit
//! ```
//!
//! "Now" defaults to the current time in `--timezone`; pass `--now` (or
//! `SLOTS_NOW`) for reproducible output. `RUST_LOG` controls log verbosity;
//! events use the `slots` target, e.g. `RUST_LOG=slots=debug`.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use slot_engine::{
    enumerate_slots, evaluate, find_double_bookings, first_available, free_windows, local_now,
    paginate, AvailabilityFilter, BrowseQuery, Catalog, ClockTime, ResourceStatus, SlotRequest,
};
use std::io::{self, IsTerminal, Read};
use std::process;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Exit code when `check` rejects the request.
const EXIT_REJECTED: i32 = 2;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Court and coach slot availability checks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog JSON file (reads from stdin if omitted)
    #[arg(short, long, global = true, env = "SLOTS_CATALOG")]
    input: Option<String>,

    /// IANA timezone of the facility, used to resolve "now"
    #[arg(long, global = true, env = "SLOTS_TIMEZONE", default_value = "UTC")]
    timezone: String,

    /// Fixed "now" (RFC 3339, or local YYYY-MM-DDTHH:MM[:SS]); defaults to the clock
    #[arg(long, global = true, env = "SLOTS_NOW")]
    now: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a booking request is eligible
    Check {
        /// Court or coach id
        resource: String,
        #[arg(long)]
        date: NaiveDate,
        /// Start time, HH:MM
        #[arg(long)]
        start: ClockTime,
        /// Duration in minutes
        #[arg(short, long, default_value_t = 60)]
        duration: u32,
    },
    /// Show the slot grid of a day
    Grid {
        resource: String,
        #[arg(long)]
        date: NaiveDate,
        /// Slot length in minutes
        #[arg(short, long, env = "SLOTS_GRANULARITY", default_value_t = 30)]
        granularity: u32,
    },
    /// Show free windows inside opening hours
    Free {
        resource: String,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Find the first bookable start of a day
    Next {
        resource: String,
        #[arg(long)]
        date: NaiveDate,
        #[arg(short, long, default_value_t = 60)]
        duration: u32,
        /// Candidate start times are this many minutes apart
        #[arg(long, default_value_t = 30)]
        step: u32,
    },
    /// Filter and page through courts (or coaches)
    Browse {
        #[arg(long)]
        sport: Option<String>,
        /// Substring of the location, case-insensitive
        #[arg(long)]
        location: Option<String>,
        /// Maximum hourly price in minor currency units
        #[arg(long)]
        max_price: Option<u32>,
        /// Only resources whose status is open
        #[arg(long)]
        open_only: bool,
        /// Only resources free on this date (needs --start)
        #[arg(long, requires = "start")]
        date: Option<NaiveDate>,
        #[arg(long, requires = "date")]
        start: Option<ClockTime>,
        #[arg(short, long, default_value_t = 60)]
        duration: u32,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 12)]
        per_page: usize,
        /// Browse coaches instead of courts
        #[arg(long)]
        coaches: bool,
    },
    /// Report overlapping bookings in the catalog
    Audit,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let catalog = load_catalog(cli.input.as_deref())?;
    info!(
        courts = catalog.courts.len(),
        coaches = catalog.coaches.len(),
        bookings = catalog.bookings.len(),
        "catalog loaded"
    );

    let now = resolve_now(cli.now.as_deref(), &cli.timezone)?;
    debug!(%now, timezone = %cli.timezone, "resolved now");

    match cli.command {
        Commands::Check {
            resource,
            date,
            start,
            duration,
        } => {
            let target = catalog.require(&resource)?;
            let request = SlotRequest {
                resource_id: resource.clone(),
                date,
                start,
                duration_minutes: duration,
            };

            match evaluate(target, &catalog.bookings, &request, now) {
                Ok(eligible) => {
                    info!(resource = %resource, "request eligible");
                    if cli.json {
                        print_json(&eligible)?;
                    } else {
                        let price = eligible
                            .price
                            .map(|p| format!(" (price {})", p))
                            .unwrap_or_default();
                        println!(
                            "eligible: {} {} -> {}{}",
                            eligible.resource_id,
                            eligible.interval.start.format("%Y-%m-%d %H:%M"),
                            eligible.interval.end.format("%Y-%m-%d %H:%M"),
                            price
                        );
                    }
                }
                Err(rejection) => {
                    warn!(resource = %resource, %rejection, "request rejected");
                    if cli.json {
                        print_json(&rejection)?;
                    } else {
                        println!("rejected: {}", rejection);
                    }
                    process::exit(EXIT_REJECTED);
                }
            }
        }
        Commands::Grid {
            resource,
            date,
            granularity,
        } => {
            let target = catalog.require(&resource)?;
            let grid = enumerate_slots(target, &catalog.bookings, date, granularity, now)
                .context("Failed to build slot grid")?;
            info!(resource = %resource, slots = grid.len(), "slot grid built");

            if cli.json {
                let slots: Vec<_> = grid.iter().collect();
                print_json(&slots)?;
            } else {
                println!("{} {}", target.id(), date);
                for slot in &grid {
                    let status = serde_json::to_value(slot.status)?;
                    println!(
                        "{}-{}  {}",
                        slot.start,
                        slot.end,
                        status.as_str().unwrap_or_default()
                    );
                }
            }
        }
        Commands::Free { resource, date } => {
            let target = catalog.require(&resource)?;
            let free = free_windows(target, &catalog.bookings, date, now);
            info!(resource = %resource, windows = free.len(), "free windows computed");

            if cli.json {
                print_json(&free)?;
            } else if free.is_empty() {
                println!("no free time");
            } else {
                for window in &free {
                    println!(
                        "{} -> {}  {} min",
                        window.start.format("%Y-%m-%d %H:%M"),
                        window.end.format("%Y-%m-%d %H:%M"),
                        window.duration_minutes
                    );
                }
            }
        }
        Commands::Next {
            resource,
            date,
            duration,
            step,
        } => {
            let target = catalog.require(&resource)?;
            let found = first_available(target, &catalog.bookings, date, duration, step, now);

            if cli.json {
                print_json(&found)?;
            } else {
                match found {
                    Some(eligible) => println!(
                        "next: {} -> {}",
                        eligible.interval.start.format("%Y-%m-%d %H:%M"),
                        eligible.interval.end.format("%Y-%m-%d %H:%M")
                    ),
                    None => println!("nothing available"),
                }
            }
        }
        Commands::Browse {
            sport,
            location,
            max_price,
            open_only,
            date,
            start,
            duration,
            page,
            per_page,
            coaches,
        } => {
            let query = BrowseQuery {
                sport,
                location,
                max_price,
                status: open_only.then_some(ResourceStatus::Open),
                available: date.zip(start).map(|(date, start)| AvailabilityFilter {
                    date,
                    start,
                    duration_minutes: duration,
                }),
            };
            debug!(?query, "browse query");

            if coaches {
                let found = catalog.browse_coaches(&query, now);
                let listing = paginate(&found, page, per_page);
                if cli.json {
                    print_json(&listing)?;
                } else {
                    for coach in &listing.items {
                        println!("{}  {}  {}", coach.id, coach.name, coach.sports.join(","));
                    }
                    println!("page {}/{} ({} total)", listing.page, listing.total_pages, listing.total);
                }
            } else {
                let found = catalog.browse_courts(&query, now);
                let listing = paginate(&found, page, per_page);
                if cli.json {
                    print_json(&listing)?;
                } else {
                    for court in &listing.items {
                        println!("{}  {}  {}", court.id, court.name, court.sport);
                    }
                    println!("page {}/{} ({} total)", listing.page, listing.total_pages, listing.total);
                }
            }
        }
        Commands::Audit => {
            let conflicts = find_double_bookings(&catalog.bookings);
            if !conflicts.is_empty() {
                warn!(count = conflicts.len(), "double bookings found");
            }

            if cli.json {
                let rows: Vec<_> = conflicts
                    .iter()
                    .map(|c| AuditRow {
                        resource_id: &c.booking_a.resource_id,
                        date: c.booking_a.date,
                        first: format!("{}-{}", c.booking_a.start, c.booking_a.end),
                        second: format!("{}-{}", c.booking_b.start, c.booking_b.end),
                        overlap_minutes: c.overlap_minutes,
                    })
                    .collect();
                print_json(&rows)?;
            } else if conflicts.is_empty() {
                println!("no double bookings");
            } else {
                for c in &conflicts {
                    println!(
                        "{} {}: {}-{} overlaps {}-{} by {} min",
                        c.booking_a.resource_id,
                        c.booking_a.date,
                        c.booking_a.start,
                        c.booking_a.end,
                        c.booking_b.start,
                        c.booking_b.end,
                        c.overlap_minutes
                    );
                }
            }
        }
    }

    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuditRow<'a> {
    resource_id: &'a str,
    date: NaiveDate,
    first: String,
    second: String,
    overlap_minutes: i64,
}

/// Log to stderr so stdout stays clean for piping. Defaults to `slots=info`,
/// the binary's target; colours only when stderr is a terminal.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "slots=info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal()),
        )
        .init();
}

/// Resolve "now" as facility wall time.
///
/// RFC 3339 input is converted into `timezone`; a naive datetime is taken as
/// local time already. Without `--now` the system clock is read here, never
/// inside the engine.
fn resolve_now(now: Option<&str>, timezone: &str) -> Result<NaiveDateTime> {
    let Some(raw) = now else {
        return Ok(local_now(Utc::now(), timezone)?);
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(local_now(dt.with_timezone(&Utc), timezone)?);
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .with_context(|| format!("Invalid --now value: {}", raw))
}

fn load_catalog(path: Option<&str>) -> Result<Catalog> {
    let json = read_input(path)?;
    Catalog::from_json(&json).context("Failed to parse catalog JSON")
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

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
