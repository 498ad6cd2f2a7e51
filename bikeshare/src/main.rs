//! # bikeshare
//!
//! An interactive CLI for exploring US bikeshare trip data.
//!
//! ## Overview
//!
//! bikeshare is built on top of bikesharelib. It asks for a city, a month and
//! a weekday, loads the city's trip data, and prints:
//!
//! - **Times**: the most frequent month, weekday and hour of travel
//! - **Stations**: the most popular start station, end station and trip
//! - **Duration**: total and average trip duration
//! - **Users**: user type and gender breakdowns, birth year extremes
//!
//! ## Usage
//!
//! ```bash
//! # Interactive session, data files in the current directory
//! bikeshare
//!
//! # Data files elsewhere
//! bikeshare --data-dir ~/data/bikeshare
//!
//! # Single non-interactive pass as JSON
//! bikeshare --city chicago --month march --day all --output json
//! ```

mod prompt;
mod render;
mod session;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use bikesharelib::{City, CityRegistry, DayFilter, MonthFilter};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

use crate::prompt::Prompter;
use crate::render::OutputMode;
use crate::session::{Preset, Session};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("bikeshare")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Explore US bikeshare trip statistics")
        .arg(
            Arg::new("data-dir")
                .short('d')
                .long("data-dir")
                .env("BIKESHARE_DATA_DIR")
                .default_value(".")
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding chicago.csv, new_york_city.csv and washington.csv"),
        )
        .arg(
            Arg::new("city")
                .long("city")
                .value_parser(parse_city)
                .help("City to analyze: chicago, new york city or washington"),
        )
        .arg(
            Arg::new("month")
                .long("month")
                .value_parser(parse_month)
                .help("Month to filter by (january..december) or 'all'"),
        )
        .arg(
            Arg::new("day")
                .long("day")
                .value_parser(parse_day)
                .help("Weekday to filter by (monday..sunday) or 'all'"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .default_value("text")
                .value_parser(["text", "json"])
                .help("Report format"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log more to stderr (-v info, -vv debug)"),
        )
}

fn parse_city(value: &str) -> Result<City, String> {
    City::from_key(&value.to_lowercase()).ok_or_else(|| format!("unknown city: {value}"))
}

fn parse_month(value: &str) -> Result<MonthFilter, String> {
    MonthFilter::parse(value).ok_or_else(|| format!("unknown month: {value}"))
}

fn parse_day(value: &str) -> Result<DayFilter, String> {
    DayFilter::parse(value).ok_or_else(|| format!("unknown day: {value}"))
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let data_dir = matches
        .get_one::<PathBuf>("data-dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    let registry = CityRegistry::with_data_dir(&data_dir);

    let preset = Preset {
        city: matches.get_one::<City>("city").copied(),
        month: matches.get_one::<MonthFilter>("month").copied(),
        day: matches.get_one::<DayFilter>("day").copied(),
    };

    let output_mode = matches
        .get_one::<String>("output")
        .map(|s| s.parse::<OutputMode>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());
    Session::new(&registry, preset, output_mode).run(&mut prompter)
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_count("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_valid() {
        build_command().debug_assert();
    }

    #[test]
    fn test_parses_filters_case_insensitively() {
        let matches = build_command()
            .try_get_matches_from([
                "bikeshare",
                "--city",
                "New York City",
                "--month",
                "June",
                "--day",
                "ALL",
            ])
            .unwrap();
        assert_eq!(
            matches.get_one::<City>("city").copied(),
            Some(City::NewYorkCity)
        );
        assert_eq!(
            matches.get_one::<MonthFilter>("month").copied(),
            Some(MonthFilter::Month(6))
        );
        assert_eq!(
            matches.get_one::<DayFilter>("day").copied(),
            Some(DayFilter::All)
        );
    }

    #[test]
    fn test_rejects_unknown_city() {
        assert!(build_command()
            .try_get_matches_from(["bikeshare", "--city", "boston"])
            .is_err());
    }
}
