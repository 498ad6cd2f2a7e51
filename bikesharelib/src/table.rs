//! In-memory trip table.
//!
//! The data flow is:
//! 1. Raw CSV rows (see [`crate::loader`])
//! 2. `TripRecord`s with derived hour/month/weekday columns
//! 3. `TripTable::filter` narrowing rows by month and weekday

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::options::{DayFilter, MonthFilter};

/// A single trip row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub start_station: String,
    pub end_station: String,
    /// Trip duration in seconds
    pub trip_duration: f64,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<f64>,
    /// Hour of day derived from `start_time` (0-23)
    pub hour: u32,
    /// Month number derived from `start_time` (1-12)
    pub month: u32,
    /// Weekday derived from `start_time` (Monday = 0)
    pub day_of_week: u32,
}

impl TripRecord {
    /// Create a record, deriving the hour, month and weekday columns from
    /// `start_time`. Optional fields start empty.
    pub fn new(
        start_time: NaiveDateTime,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        trip_duration: f64,
    ) -> Self {
        Self {
            start_time,
            end_time: None,
            start_station: start_station.into(),
            end_station: end_station.into(),
            trip_duration,
            user_type: None,
            gender: None,
            birth_year: None,
            hour: start_time.hour(),
            month: start_time.month(),
            day_of_week: start_time.weekday().num_days_from_monday(),
        }
    }

    /// `"<start> -> <end>"` label used for trip popularity.
    pub fn trip_label(&self) -> String {
        format!("{} -> {}", self.start_station, self.end_station)
    }
}

/// The loaded trips for one city.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TripTable {
    /// Optional column names present in the source header
    columns: BTreeSet<String>,
    records: Vec<TripRecord>,
}

impl TripTable {
    /// Create a table from records and the optional columns the source carried.
    pub fn new<I, S>(columns: I, records: Vec<TripRecord>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            records,
        }
    }

    /// Whether the source file carried the optional column `name`.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Keep only rows matching the month and weekday filters.
    pub fn filter(self, month: MonthFilter, day: DayFilter) -> Self {
        let Self { columns, records } = self;
        let records = records
            .into_iter()
            .filter(|r| match month {
                MonthFilter::All => true,
                MonthFilter::Month(m) => r.month == m,
            })
            .filter(|r| match day {
                DayFilter::All => true,
                DayFilter::Day(d) => r.day_of_week == d,
            })
            .collect();
        Self { columns, records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn sample() -> TripTable {
        TripTable::new(
            [schema::GENDER],
            vec![
                TripRecord::new(at(2017, 1, 2, 9), "A", "B", 100.0), // Monday
                TripRecord::new(at(2017, 1, 3, 17), "B", "C", 200.0), // Tuesday
                TripRecord::new(at(2017, 2, 6, 8), "A", "C", 300.0), // Monday
            ],
        )
    }

    #[test]
    fn test_derived_columns() {
        let r = TripRecord::new(at(2017, 6, 25, 23), "X", "Y", 1.0);
        assert_eq!(r.hour, 23);
        assert_eq!(r.month, 6);
        assert_eq!(r.day_of_week, 6); // Sunday
        assert_eq!(r.trip_label(), "X -> Y");
    }

    #[test]
    fn test_has_column() {
        let table = sample();
        assert!(table.has_column(schema::GENDER));
        assert!(!table.has_column(schema::BIRTH_YEAR));
    }

    #[test]
    fn test_filter_all_keeps_everything() {
        let table = sample().filter(MonthFilter::All, DayFilter::All);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_filter_by_month() {
        let table = sample().filter(MonthFilter::Month(1), DayFilter::All);
        assert_eq!(table.len(), 2);
        assert!(table.records().iter().all(|r| r.month == 1));
    }

    #[test]
    fn test_filter_by_day() {
        let table = sample().filter(MonthFilter::All, DayFilter::Day(0));
        assert_eq!(table.len(), 2);
        assert!(table.records().iter().all(|r| r.day_of_week == 0));
    }

    #[test]
    fn test_filter_by_month_and_day() {
        let table = sample().filter(MonthFilter::Month(2), DayFilter::Day(0));
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].trip_duration, 300.0);
        assert!(table.has_column(schema::GENDER));
    }

    #[test]
    fn test_filter_can_empty_the_table() {
        let table = sample().filter(MonthFilter::Month(12), DayFilter::All);
        assert!(table.is_empty());
    }
}
