//! # bikesharelib
//!
//! Load US bikeshare trip data and compute descriptive travel statistics.
//!
//! ## Overview
//!
//! Trip data is published per city as a CSV file. This library:
//!
//! - **Resolves** a city to its data file through a [`CityRegistry`]
//! - **Loads** trips into a [`TripTable`], deriving the hour, month and
//!   weekday of every trip from its start timestamp
//! - **Filters** trips by month and weekday ([`FilterSelection`])
//! - **Computes** the most frequent travel times, the most popular stations
//!   and trip, total and mean trip duration, and user demographics
//!
//! All computations return plain data; nothing here prints to the terminal.
//!
//! ## Example
//!
//! ```rust
//! use bikesharelib::{load_data, City, CityRegistry, FilterSelection, MonthFilter, Report};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::write(
//!     dir.path().join("chicago.csv"),
//!     "Start Time,Trip Duration,Start Station,End Station\n\
//!      2017-01-02 09:00:00,600,Canal St,Lake St\n\
//!      2017-02-07 17:00:00,300,Lake St,Canal St\n",
//! )
//! .unwrap();
//!
//! let registry = CityRegistry::with_data_dir(dir.path());
//! let selection = FilterSelection::new(City::Chicago).month(MonthFilter::Month(1));
//! let table = load_data(&registry, &selection).unwrap();
//! assert_eq!(table.len(), 1);
//!
//! let report = Report::compute(&table);
//! assert_eq!(report.time.month_name(), Some("january"));
//! assert_eq!(report.duration.total_seconds, 600.0);
//! ```

pub mod calendar;
pub mod error;
pub mod loader;
pub mod options;
pub mod schema;
pub mod stats;
pub mod table;

pub use error::BikeshareError;
pub use loader::{load_data, load_table};
pub use options::{City, CityRegistry, DayFilter, FilterSelection, MonthFilter};
pub use stats::{
    mode, value_counts, BirthYearStats, Column, DurationStats, Report, StationStats, TimeStats,
    UserStats, ValueCount,
};
pub use table::{TripRecord, TripTable};

/// Result type for bikesharelib operations
pub type Result<T> = std::result::Result<T, BikeshareError>;
