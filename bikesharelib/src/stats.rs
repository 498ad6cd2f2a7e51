//! Statistics computed over a [`TripTable`].
//!
//! Every computation here is read-only and deterministic: a mode breaks ties
//! by picking the smallest value, and value counts break ties by ascending
//! value. None of these types print anything; rendering lives in the CLI.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::calendar;
use crate::schema;
use crate::table::TripTable;

/// Most frequent value, or `None` for empty input.
///
/// Ties go to the smallest value.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts: BTreeMap<T, u64> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut best: Option<(T, u64)> = None;
    for (value, count) in counts {
        // Ascending iteration plus strict comparison keeps the smallest on ties.
        if best.as_ref().is_none_or(|(_, c)| count > *c) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// A distinct value and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: u64,
}

/// Count distinct non-blank values, most frequent first.
pub fn value_counts<'a, I>(values: I) -> Vec<ValueCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for value in values.into_iter().filter(|v| !v.trim().is_empty()) {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut out: Vec<ValueCount> = counts
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect();
    // Stable sort keeps ascending value order within equal counts.
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

/// Most frequent times of travel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    /// Modal month number (1-12)
    pub month: Option<u32>,
    /// Modal weekday index (Monday = 0)
    pub day_of_week: Option<u32>,
    /// Modal hour of day
    pub hour: Option<u32>,
}

impl TimeStats {
    pub fn compute(table: &TripTable) -> Self {
        let records = table.records();
        Self {
            month: mode(records.iter().map(|r| r.month)),
            day_of_week: mode(records.iter().map(|r| r.day_of_week)),
            hour: mode(records.iter().map(|r| r.hour)),
        }
    }

    /// Lowercase name of the modal month.
    pub fn month_name(&self) -> Option<&'static str> {
        self.month.and_then(calendar::month_name)
    }

    /// Lowercase name of the modal weekday.
    pub fn day_name(&self) -> Option<&'static str> {
        self.day_of_week.and_then(calendar::day_name)
    }
}

/// Most popular stations and trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    /// Modal `"<start> -> <end>"` label
    pub trip: Option<String>,
}

impl StationStats {
    pub fn compute(table: &TripTable) -> Self {
        let records = table.records();
        Self {
            start_station: mode(records.iter().map(|r| r.start_station.as_str()))
                .map(str::to_string),
            end_station: mode(records.iter().map(|r| r.end_station.as_str())).map(str::to_string),
            trip: mode(records.iter().map(|r| r.trip_label())),
        }
    }
}

/// Total and average trip duration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DurationStats {
    pub trip_count: usize,
    /// Sum of all trip durations, in seconds
    pub total_seconds: f64,
    /// `total_seconds / trip_count`, absent for an empty table
    pub mean_seconds: Option<f64>,
}

impl DurationStats {
    pub fn compute(table: &TripTable) -> Self {
        let trip_count = table.len();
        let total_seconds: f64 = table.records().iter().map(|r| r.trip_duration).sum();
        let mean_seconds = (trip_count > 0).then(|| total_seconds / trip_count as f64);
        Self {
            trip_count,
            total_seconds,
            mean_seconds,
        }
    }
}

/// A demographic summary whose source column may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Column<T> {
    /// The city's file has no such column
    Missing,
    Present(T),
}

impl<T> Column<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Column::Missing)
    }

    pub fn as_present(&self) -> Option<&T> {
        match self {
            Column::Missing => None,
            Column::Present(v) => Some(v),
        }
    }
}

/// Earliest, latest and most common birth year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub latest: i32,
    pub most_common: i32,
}

/// Bikeshare user demographics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub user_types: Column<Vec<ValueCount>>,
    pub genders: Column<Vec<ValueCount>>,
    /// `Present(None)` when the column exists but no row has a value
    pub birth_years: Column<Option<BirthYearStats>>,
}

impl UserStats {
    pub fn compute(table: &TripTable) -> Self {
        let records = table.records();

        let user_types = if table.has_column(schema::USER_TYPE) {
            Column::Present(value_counts(
                records.iter().filter_map(|r| r.user_type.as_deref()),
            ))
        } else {
            Column::Missing
        };

        let genders = if table.has_column(schema::GENDER) {
            Column::Present(value_counts(
                records.iter().filter_map(|r| r.gender.as_deref()),
            ))
        } else {
            Column::Missing
        };

        let birth_years = if table.has_column(schema::BIRTH_YEAR) {
            let years: Vec<i32> = records
                .iter()
                .filter_map(|r| r.birth_year)
                .map(|y| y.round() as i32)
                .collect();
            Column::Present(birth_year_stats(&years))
        } else {
            Column::Missing
        };

        Self {
            user_types,
            genders,
            birth_years,
        }
    }
}

fn birth_year_stats(years: &[i32]) -> Option<BirthYearStats> {
    Some(BirthYearStats {
        earliest: *years.iter().min()?,
        latest: *years.iter().max()?,
        most_common: mode(years.iter().copied())?,
    })
}

/// All four statistic groups for one filtered table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub trip_count: usize,
    pub time: TimeStats,
    pub stations: StationStats,
    pub duration: DurationStats,
    pub users: UserStats,
}

impl Report {
    pub fn compute(table: &TripTable) -> Self {
        Self {
            trip_count: table.len(),
            time: TimeStats::compute(table),
            stations: StationStats::compute(table),
            duration: DurationStats::compute(table),
            users: UserStats::compute(table),
        }
    }
}
