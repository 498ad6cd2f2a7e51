//! CSV loading for city trip data.
//!
//! This module provides the entry points that turn a city's data file into a
//! [`TripTable`], deriving the hour/month/weekday columns and applying the
//! month and day filters of a [`FilterSelection`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::BikeshareError;
use crate::options::{CityRegistry, FilterSelection};
use crate::schema;
use crate::table::{TripRecord, TripTable};
use crate::Result;

/// Timestamp layouts accepted for `Start Time` and `End Time`.
const TIMESTAMP_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Load the selected city's trips and apply the month and day filters.
///
/// An empty result is not an error: it means no trip matched the filters.
///
/// # Example
///
/// ```rust,ignore
/// use bikesharelib::{load_data, City, CityRegistry, FilterSelection, MonthFilter};
///
/// let registry = CityRegistry::with_data_dir("data");
/// let selection = FilterSelection::new(City::Chicago).month(MonthFilter::Month(3));
/// let table = load_data(&registry, &selection)?;
/// ```
pub fn load_data(registry: &CityRegistry, selection: &FilterSelection) -> Result<TripTable> {
    let path = registry.path(selection.city);
    let table = load_table(path)?;
    let loaded = table.len();
    let table = table.filter(selection.month, selection.day);
    debug!(
        city = selection.city.key(),
        month = selection.month.as_str(),
        day = selection.day.as_str(),
        loaded,
        kept = table.len(),
        "applied filters"
    );
    Ok(table)
}

/// Load every trip in a CSV file without filtering.
pub fn load_table(path: impl AsRef<Path>) -> Result<TripTable> {
    let path = path.as_ref();
    debug!(path = %path.display(), "opening trip data");
    let file = File::open(path).map_err(|source| BikeshareError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_trips(file, path)?;
    debug!(path = %path.display(), rows = table.len(), "loaded trip data");
    Ok(table)
}

/// Header positions of the columns the loader understands.
struct ColumnIndex {
    start_time: usize,
    trip_duration: usize,
    start_station: usize,
    end_station: usize,
    end_time: Option<usize>,
    user_type: Option<usize>,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord, path: &Path) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| BikeshareError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })
        };

        Ok(Self {
            start_time: require(schema::START_TIME)?,
            trip_duration: require(schema::TRIP_DURATION)?,
            start_station: require(schema::START_STATION)?,
            end_station: require(schema::END_STATION)?,
            end_time: find(schema::END_TIME),
            user_type: find(schema::USER_TYPE),
            gender: find(schema::GENDER),
            birth_year: find(schema::BIRTH_YEAR),
        })
    }

    fn optional_columns(&self) -> Vec<&'static str> {
        [
            (schema::END_TIME, self.end_time),
            (schema::USER_TYPE, self.user_type),
            (schema::GENDER, self.gender),
            (schema::BIRTH_YEAR, self.birth_year),
        ]
        .into_iter()
        .filter_map(|(name, idx)| idx.map(|_| name))
        .collect()
    }
}

/// Parse trips from any reader. `path` is only used in error messages.
fn read_trips<R: Read>(reader: R, path: &Path) -> Result<TripTable> {
    let csv_err = |source: csv::Error| BikeshareError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = reader.headers().map_err(csv_err)?.clone();
    let columns = ColumnIndex::from_headers(&headers, path)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_err)?;
        records.push(parse_record(&row, &columns, path)?);
    }

    Ok(TripTable::new(columns.optional_columns(), records))
}

fn parse_record(row: &StringRecord, columns: &ColumnIndex, path: &Path) -> Result<TripRecord> {
    let line = row.position().map(|p| p.line()).unwrap_or(0);
    let cell = move |idx: usize| row.get(idx).unwrap_or("").trim();
    let optional = move |idx: Option<usize>| {
        idx.map(cell)
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
    };

    let start_raw = cell(columns.start_time);
    let start_time =
        parse_timestamp(start_raw).ok_or_else(|| BikeshareError::InvalidTimestamp {
            path: path.to_path_buf(),
            line,
            value: start_raw.to_string(),
        })?;

    let duration_raw = cell(columns.trip_duration);
    let trip_duration = parse_number(duration_raw).ok_or_else(|| BikeshareError::InvalidNumber {
        path: path.to_path_buf(),
        line,
        column: schema::TRIP_DURATION.to_string(),
        value: duration_raw.to_string(),
    })?;

    let birth_year = match optional(columns.birth_year) {
        Some(raw) => Some(parse_number(&raw).ok_or_else(|| BikeshareError::InvalidNumber {
            path: path.to_path_buf(),
            line,
            column: schema::BIRTH_YEAR.to_string(),
            value: raw.clone(),
        })?),
        None => None,
    };

    let mut record = TripRecord::new(
        start_time,
        cell(columns.start_station),
        cell(columns.end_station),
        trip_duration,
    );
    record.end_time = optional(columns.end_time).and_then(|v| parse_timestamp(&v));
    record.user_type = optional(columns.user_type);
    record.gender = optional(columns.gender);
    record.birth_year = birth_year;
    Ok(record)
}

/// Parse a naive timestamp in any of the accepted layouts.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn parse_number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{City, DayFilter, MonthFilter};
    use std::fs;
    use tempfile::tempdir;

    const CHICAGO: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1,2017-01-02 09:07:57,2017-01-02 09:20:53,776,Canal St & Adams St,Clinton St & Madison St,Subscriber,Male,1992.0
2,2017-01-09 09:12:01,2017-01-09 09:30:00,1079,Canal St & Adams St,Clinton St & Madison St,Subscriber,Female,1985.0
3,2017-02-07 17:45:00,2017-02-07 17:50:00,300,Lake St & Wells St,Canal St & Adams St,Customer,,
";

    const WASHINGTON: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1,2017-03-06 08:00:00,2017-03-06 08:10:00,600.5,14th & V St NW,Park Rd & Holmead Pl NW,Subscriber
";

    #[test]
    fn test_load_all_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chicago.csv");
        fs::write(&path, CHICAGO).unwrap();

        let table = load_table(&path).unwrap();
        assert_eq!(table.len(), 3);
        assert!(table.has_column(schema::GENDER));
        assert!(table.has_column(schema::BIRTH_YEAR));

        let first = &table.records()[0];
        assert_eq!(first.hour, 9);
        assert_eq!(first.month, 1);
        assert_eq!(first.day_of_week, 0);
        assert_eq!(first.trip_duration, 776.0);
        assert_eq!(first.birth_year, Some(1992.0));
        assert!(first.end_time.is_some());

        let third = &table.records()[2];
        assert_eq!(third.gender, None);
        assert_eq!(third.birth_year, None);
    }

    #[test]
    fn test_load_data_unfiltered_matches_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("chicago.csv"), CHICAGO).unwrap();
        let registry = CityRegistry::with_data_dir(dir.path());

        let table = load_data(&registry, &FilterSelection::new(City::Chicago)).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_load_data_filters() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("chicago.csv"), CHICAGO).unwrap();
        let registry = CityRegistry::with_data_dir(dir.path());

        let january = FilterSelection::new(City::Chicago).month(MonthFilter::Month(1));
        let table = load_data(&registry, &january).unwrap();
        assert_eq!(table.len(), 2);

        let tuesday = FilterSelection::new(City::Chicago).day(DayFilter::Day(1));
        let table = load_data(&registry, &tuesday).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].month, 2);
    }

    #[test]
    fn test_missing_optional_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("washington.csv");
        fs::write(&path, WASHINGTON).unwrap();

        let table = load_table(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.has_column(schema::USER_TYPE));
        assert!(!table.has_column(schema::GENDER));
        assert!(!table.has_column(schema::BIRTH_YEAR));
        assert_eq!(table.records()[0].trip_duration, 600.5);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let registry = CityRegistry::with_data_dir(dir.path());
        let err = load_data(&registry, &FilterSelection::new(City::Washington)).unwrap_err();
        assert!(matches!(err, BikeshareError::FileOpen { .. }));
    }

    #[test]
    fn test_missing_required_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.csv");
        fs::write(&path, "Start Time,Trip Duration\n2017-01-01 00:00:00,10\n").unwrap();

        let err = load_table(&path).unwrap_err();
        match err {
            BikeshareError::MissingColumn { column, .. } => assert_eq!(column, "Start Station"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_timestamp() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.csv");
        fs::write(
            &path,
            "Start Time,Trip Duration,Start Station,End Station\nyesterday,10,A,B\n",
        )
        .unwrap();

        let err = load_table(&path).unwrap_err();
        match err {
            BikeshareError::InvalidTimestamp { line, value, .. } => {
                assert_eq!(line, 2);
                assert_eq!(value, "yesterday");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_duration() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.csv");
        fs::write(
            &path,
            "Start Time,Trip Duration,Start Station,End Station\n2017-01-01 00:00:00,long,A,B\n",
        )
        .unwrap();

        assert!(matches!(
            load_table(&path).unwrap_err(),
            BikeshareError::InvalidNumber { .. }
        ));
    }

    #[test]
    fn test_parse_timestamp_variants() {
        assert!(parse_timestamp("2017-06-23 15:09:32").is_some());
        assert!(parse_timestamp("2017-06-23 15:09:32.123").is_some());
        assert!(parse_timestamp("2017-06-23T15:09:32").is_some());
        assert!(parse_timestamp("2017-06-23 15:09").is_some());
        assert!(parse_timestamp("23/06/2017").is_none());
    }
}
