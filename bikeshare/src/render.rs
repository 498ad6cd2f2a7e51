//! Terminal rendering of the four statistic reports.
//!
//! Each reporter prints a heading, computes its statistics, prints them and
//! finishes with how long it took and a separator line.

use std::io::{self, Write};
use std::str::FromStr;
use std::time::Instant;

use bikesharelib::calendar::title_case;
use bikesharelib::{
    Column, DurationStats, Report, StationStats, TimeStats, TripTable, UserStats, ValueCount,
};
use console::style;

const NO_TRIPS: &str = "There are no trips matching the selected filters!";

/// How a pass of the session is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Narrative text reports
    #[default]
    Text,
    /// One pretty-printed JSON report per pass
    Json,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputMode::Text),
            "json" => Ok(OutputMode::Json),
            _ => Err(format!("Unknown output mode: {}", s)),
        }
    }
}

/// Print a full pass in the requested mode.
pub fn report<W: Write>(out: &mut W, table: &TripTable, mode: OutputMode) -> anyhow::Result<()> {
    match mode {
        OutputMode::Text => {
            time_stats(out, table)?;
            station_stats(out, table)?;
            trip_duration_stats(out, table)?;
            user_stats(out, table)?;
        }
        OutputMode::Json => {
            let report = Report::compute(table);
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
    }
    Ok(())
}

fn heading<W: Write>(out: &mut W, title: &str) -> io::Result<Instant> {
    writeln!(out, "\n{}\n", style(title).bold())?;
    Ok(Instant::now())
}

fn footer<W: Write>(out: &mut W, started: Instant) -> io::Result<()> {
    writeln!(out, "\nThis took {} seconds.", started.elapsed().as_secs_f64())?;
    writeln!(out, "{}", "-".repeat(40))
}

/// Most frequent month, weekday and hour.
pub fn time_stats<W: Write>(out: &mut W, table: &TripTable) -> io::Result<()> {
    let started = heading(out, "Calculating The Most Frequent Times of Travel...")?;
    let stats = TimeStats::compute(table);

    match (stats.month_name(), stats.day_name(), stats.hour) {
        (Some(month), Some(day), Some(hour)) => {
            writeln!(out, "The users ride most in the month: {}!", title_case(month))?;
            writeln!(out, "The users ride most on the day: {}!", title_case(day))?;
            writeln!(out, "The users ride most at the hour: {}!", hour)?;
        }
        _ => writeln!(out, "{NO_TRIPS}")?,
    }

    footer(out, started)
}

/// Most popular start station, end station and trip.
pub fn station_stats<W: Write>(out: &mut W, table: &TripTable) -> io::Result<()> {
    let started = heading(out, "Calculating The Most Popular Stations and Trip...")?;
    let stats = StationStats::compute(table);

    match (&stats.start_station, &stats.end_station, &stats.trip) {
        (Some(start), Some(end), Some(trip)) => {
            writeln!(out, "The users ride most from the station: {}!", title_case(start))?;
            writeln!(out, "The users ride most to the station: {}!", title_case(end))?;
            writeln!(out, "The trip the users ride most is: {}!", title_case(trip))?;
        }
        _ => writeln!(out, "{NO_TRIPS}")?,
    }

    footer(out, started)
}

/// Total and mean trip duration, in seconds.
pub fn trip_duration_stats<W: Write>(out: &mut W, table: &TripTable) -> io::Result<()> {
    let started = heading(out, "Calculating Trip Duration...")?;
    let stats = DurationStats::compute(table);

    writeln!(out, "The users ride together {} seconds!", stats.total_seconds)?;
    match stats.mean_seconds {
        Some(mean) => writeln!(
            out,
            "The users ride for every trip on average {} seconds!",
            mean
        )?,
        None => writeln!(out, "{NO_TRIPS}")?,
    }

    footer(out, started)
}

/// Print value counts, or why there are none: no trips at all, or trips that
/// left the column blank.
fn counts_table<W: Write>(
    out: &mut W,
    table: &TripTable,
    counts: &[ValueCount],
    none_recorded: &str,
) -> io::Result<()> {
    if table.is_empty() {
        return writeln!(out, "{NO_TRIPS}");
    }
    if counts.is_empty() {
        return writeln!(out, "{none_recorded}");
    }
    let width = counts.iter().map(|c| c.value.len()).max().unwrap_or(0);
    for c in counts {
        writeln!(out, "{:<width$}  {:>8}", c.value, c.count, width = width)?;
    }
    Ok(())
}

/// User type and gender breakdowns plus birth year extremes.
///
/// Each section reports on its own; a city without a column only loses that
/// section.
pub fn user_stats<W: Write>(out: &mut W, table: &TripTable) -> io::Result<()> {
    let started = heading(out, "Calculating User Stats...")?;
    let stats = UserStats::compute(table);

    match &stats.user_types {
        Column::Present(counts) => {
            writeln!(out, "Different user types are as follows:")?;
            counts_table(out, table, counts, "There's no user type recorded for these trips!")?;
        }
        Column::Missing => writeln!(out, "\nThere's no user type information!")?,
    }

    match &stats.genders {
        Column::Present(counts) => {
            writeln!(out, "\nThe user gender distribution is as follows:")?;
            counts_table(out, table, counts, "There's no gender recorded for these trips!")?;
        }
        Column::Missing => writeln!(out, "\nThere's no gender information!")?,
    }

    match &stats.birth_years {
        Column::Present(Some(years)) => writeln!(
            out,
            "\nThe oldest user was born in {}, the youngest was born in {}, and most were born in {}!",
            years.earliest, years.latest, years.most_common
        )?,
        Column::Present(None) => {
            writeln!(out, "\nThere's no birth year recorded for these trips!")?
        }
        Column::Missing => writeln!(out, "\nThere's no birth information!")?,
    }

    footer(out, started)
}
