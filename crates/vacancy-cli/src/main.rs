//! `vacancy` CLI — ask whether a classroom is occupied, from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Is CR101 in use on Monday at 11:05?
//! vacancy -d timetable.json status --day MON --room CR101 --time 11:05
//!
//! # Same question for right now (local clock)
//! vacancy -d timetable.json status --room CR101
//!
//! # Which rooms are free on Tuesday at 09:30?
//! vacancy -d timetable.json vacant --day TUE --time 09:30
//!
//! # Free slots of LAB5 on Wednesday between 08:00 and 18:00
//! vacancy -d timetable.json free --day WED --room LAB5
//!
//! # Audit the timetable for rooms claimed twice
//! vacancy -d timetable.json conflicts
//!
//! # Treat "Seminar" as a special session too
//! vacancy -d timetable.json --special Seminar status --day FRI --room LT1 --time 10:00
//! ```

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use vacancy_engine::time::minutes_of;
use vacancy_engine::{
    format_minutes, load_timetable, CategoryRules, Day, QueryResult, ScheduleQuery,
};

#[derive(Parser)]
#[command(
    name = "vacancy",
    version,
    about = "Check whether a classroom is occupied or vacant"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Timetable JSON file
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Comma-separated subject names to treat as special sessions
    #[arg(long, global = true)]
    special: Option<String>,

    /// Do not treat CEC, ELECTIVE and PROJECTBASEDLEARNING as special
    #[arg(long, global = true)]
    no_default_special: bool,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether one room is occupied
    Status {
        /// Weekday (MON-FRI); defaults to today
        #[arg(long)]
        day: Option<String>,
        /// Room identifier
        #[arg(short, long)]
        room: String,
        /// Time as HH:MM; defaults to now
        #[arg(short, long)]
        time: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List rooms with no class in session
    Vacant {
        /// Weekday (MON-FRI); defaults to today
        #[arg(long)]
        day: Option<String>,
        /// Time as HH:MM; defaults to now
        #[arg(short, long)]
        time: Option<String>,
    },
    /// Show every known room with its status
    Board {
        /// Weekday (MON-FRI); defaults to today
        #[arg(long)]
        day: Option<String>,
        /// Time as HH:MM; defaults to now
        #[arg(short, long)]
        time: Option<String>,
    },
    /// List free slots of one room
    Free {
        /// Weekday (MON-FRI); defaults to today
        #[arg(long)]
        day: Option<String>,
        /// Room identifier
        #[arg(short, long)]
        room: String,
        /// Window start as HH:MM
        #[arg(long, default_value = "08:00")]
        from: String,
        /// Window end as HH:MM
        #[arg(long, default_value = "18:00")]
        to: String,
        /// Only show slots at least this many minutes long
        #[arg(long)]
        min: Option<u16>,
    },
    /// Report rooms claimed by more than one subject at once
    Conflicts {
        /// Weekday (MON-FRI); all weekdays if omitted
        #[arg(long)]
        day: Option<String>,
        /// Print the reports as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every room in the timetable
    Rooms,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let rules = build_category_rules(cli.special.as_deref(), cli.no_default_special);
    let path = cli
        .data
        .context("No timetable given. Pass --data <FILE>.")?;
    debug!(path = %path.display(), special = ?rules.special, "loading timetable");
    let timetable = load_timetable(&path, &rules)
        .with_context(|| format!("Failed to load timetable: {}", path.display()))?;
    let query = ScheduleQuery::new(timetable);

    match cli.command {
        Commands::Status {
            day,
            room,
            time,
            json,
        } => {
            let day = resolve_day(day.as_deref())?;
            let time = resolve_time(time);
            let result = query
                .resolve(day, &room, &time)
                .context("Failed to resolve room status")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", describe(&result));
            }
        }
        Commands::Vacant { day, time } => {
            let day = resolve_day(day.as_deref())?;
            let time = resolve_time(time);
            for room in query
                .vacant_rooms(day, &time)
                .context("Failed to list vacant rooms")?
            {
                println!("{}", room);
            }
        }
        Commands::Board { day, time } => {
            let day = resolve_day(day.as_deref())?;
            let time = resolve_time(time);
            let board = query
                .room_status_board(day, &time)
                .context("Failed to build status board")?;
            let width = board.iter().map(|(room, _)| room.len()).max().unwrap_or(0);
            for (room, result) in board {
                println!("{:<width$}  {}", room, describe(&result), width = width);
            }
        }
        Commands::Free {
            day,
            room,
            from,
            to,
            min,
        } => {
            let day = resolve_day(day.as_deref())?;
            let slots = query
                .free_slots(day, &room, &from, &to)
                .context("Failed to compute free slots")?;
            for slot in slots
                .iter()
                .filter(|slot| slot.duration_minutes >= min.unwrap_or(0))
            {
                println!("{}", slot);
            }
        }
        Commands::Conflicts { day, json } => {
            let days = match day {
                Some(day) => vec![day.parse::<Day>()?],
                None => Day::ALL.to_vec(),
            };
            let reports: Vec<_> = days.into_iter().flat_map(|d| query.conflicts(d)).collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in &reports {
                    println!(
                        "{} {} {}  {} (displaced: {})",
                        report.day,
                        report.time,
                        report.room,
                        report.chosen,
                        report.displaced.join(", ")
                    );
                }
                println!("{} conflict(s)", reports.len());
            }
        }
        Commands::Rooms => {
            for room in query.timetable().rooms() {
                println!("{}", room);
            }
        }
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins over the `-v` count.
fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

/// Build category rules from the --special and --no-default-special arguments.
///
/// - `--special Seminar,Lab Viva` adds `["Seminar", "Lab Viva"]`
/// - Without `--no-default-special` the built-in special subjects are kept
/// - Empty items in the list are ignored
fn build_category_rules(special: Option<&str>, no_default_special: bool) -> CategoryRules {
    let rules = if no_default_special {
        CategoryRules::empty()
    } else {
        CategoryRules::default()
    };

    let extra = special
        .into_iter()
        .flat_map(|raw| raw.split(','))
        .map(str::trim)
        .filter(|name| !name.is_empty());
    rules.with_special(extra)
}

fn resolve_day(day: Option<&str>) -> Result<Day> {
    match day {
        Some(day) => Ok(day.parse()?),
        None => Day::try_from(Local::now().weekday())
            .context("Today is not a teaching day. Pass --day MON-FRI."),
    }
}

fn resolve_time(time: Option<String>) -> String {
    time.unwrap_or_else(|| format_minutes(minutes_of(Local::now().time())))
}

fn describe(result: &QueryResult) -> String {
    match result {
        QueryResult::Vacant => "VACANT".to_string(),
        QueryResult::Occupied { subject, .. } => format!("OCCUPIED {}", subject),
        QueryResult::Conflict {
            chosen,
            conflicting,
            ..
        } => format!("CONFLICT {} (also: {})", chosen, conflicting.join(", ")),
    }
}
