//! Input options for loading and filtering trip data.
//!
//! This module contains the city registry and the filter selection that
//! together decide which file is read and which rows survive.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::calendar::{self, ALL};
use crate::error::BikeshareError;

/// One of the cities with published trip data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// Every supported city, in prompt order.
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lowercase key a user types to select this city.
    pub fn key(&self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// File name of the city's trip data.
    pub fn file_name(&self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Human readable name.
    pub fn display_name(&self) -> String {
        calendar::title_case(self.key())
    }

    /// Look up a city by its lowercase key.
    pub fn from_key(key: &str) -> Option<City> {
        City::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::from_key(&s.to_lowercase()).ok_or_else(|| BikeshareError::UnknownCity(s.to_string()))
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Immutable mapping from city to the path of its CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityRegistry {
    entries: Vec<(City, PathBuf)>,
}

impl Default for CityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CityRegistry {
    /// Registry with file names relative to the working directory.
    pub fn new() -> Self {
        Self {
            entries: City::ALL
                .into_iter()
                .map(|c| (c, PathBuf::from(c.file_name())))
                .collect(),
        }
    }

    /// Registry with every file resolved under `dir`.
    pub fn with_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            entries: City::ALL
                .into_iter()
                .map(|c| (c, dir.join(c.file_name())))
                .collect(),
        }
    }

    /// Path of the data file for `city`.
    pub fn path(&self, city: City) -> &Path {
        self.entries
            .iter()
            .find(|(c, _)| *c == city)
            .map(|(_, p)| p.as_path())
            // Every constructor registers all of City::ALL.
            .unwrap_or_else(|| Path::new(city.file_name()))
    }

    /// Lowercase keys of every registered city.
    pub fn keys(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(c, _)| c.key()).collect()
    }
}

/// Month dimension of a filter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MonthFilter {
    /// No month filter
    #[default]
    All,
    /// Keep only trips starting in this 1-based month
    Month(u32),
}

impl MonthFilter {
    /// Parse a lowercase month name or `"all"`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.to_lowercase();
        if value == ALL {
            return Some(MonthFilter::All);
        }
        calendar::month_number(&value).map(MonthFilter::Month)
    }

    /// Lowercase name of the selection.
    pub fn as_str(&self) -> &'static str {
        match self {
            MonthFilter::All => ALL,
            MonthFilter::Month(n) => calendar::month_name(*n).unwrap_or(ALL),
        }
    }

    /// Every accepted prompt value.
    pub fn allowed() -> Vec<&'static str> {
        calendar::MONTH_NAMES
            .iter()
            .copied()
            .chain(std::iter::once(ALL))
            .collect()
    }
}

/// Weekday dimension of a filter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DayFilter {
    /// No weekday filter
    #[default]
    All,
    /// Keep only trips starting on this weekday (Monday = 0)
    Day(u32),
}

impl DayFilter {
    /// Parse a lowercase day name or `"all"`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.to_lowercase();
        if value == ALL {
            return Some(DayFilter::All);
        }
        calendar::day_index(&value).map(DayFilter::Day)
    }

    /// Lowercase name of the selection.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayFilter::All => ALL,
            DayFilter::Day(i) => calendar::day_name(*i).unwrap_or(ALL),
        }
    }

    /// Every accepted prompt value.
    pub fn allowed() -> Vec<&'static str> {
        calendar::DAY_NAMES
            .iter()
            .copied()
            .chain(std::iter::once(ALL))
            .collect()
    }
}

/// The (city, month, day) triple chosen for one pass of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl FilterSelection {
    /// Select a whole city with no month or day filter.
    pub fn new(city: City) -> Self {
        Self {
            city,
            month: MonthFilter::All,
            day: DayFilter::All,
        }
    }

    /// Builder: set month filter
    pub fn month(mut self, month: MonthFilter) -> Self {
        self.month = month;
        self
    }

    /// Builder: set day filter
    pub fn day(mut self, day: DayFilter) -> Self {
        self.day = day;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_keys() {
        assert_eq!(City::from_key("new york city"), Some(City::NewYorkCity));
        assert_eq!(City::from_key("New York City"), None);
        assert_eq!("Washington".parse::<City>().unwrap(), City::Washington);
        assert!("boston".parse::<City>().is_err());
        assert_eq!(City::NewYorkCity.display_name(), "New York City");
    }

    #[test]
    fn test_registry_paths() {
        let registry = CityRegistry::new();
        assert_eq!(registry.path(City::Chicago), Path::new("chicago.csv"));

        let registry = CityRegistry::with_data_dir("/data");
        assert_eq!(
            registry.path(City::NewYorkCity),
            Path::new("/data/new_york_city.csv")
        );
        assert_eq!(
            registry.keys(),
            vec!["chicago", "new york city", "washington"]
        );
    }

    #[test]
    fn test_month_filter_parse() {
        assert_eq!(MonthFilter::parse("all"), Some(MonthFilter::All));
        assert_eq!(MonthFilter::parse("March"), Some(MonthFilter::Month(3)));
        assert_eq!(MonthFilter::parse("december"), Some(MonthFilter::Month(12)));
        assert_eq!(MonthFilter::parse("mar"), None);
        assert_eq!(MonthFilter::Month(3).as_str(), "march");
        assert_eq!(MonthFilter::allowed().len(), 13);
    }

    #[test]
    fn test_day_filter_parse() {
        assert_eq!(DayFilter::parse("ALL"), Some(DayFilter::All));
        assert_eq!(DayFilter::parse("monday"), Some(DayFilter::Day(0)));
        assert_eq!(DayFilter::parse("Sunday"), Some(DayFilter::Day(6)));
        assert_eq!(DayFilter::parse("funday"), None);
        assert_eq!(DayFilter::Day(1).as_str(), "tuesday");
        assert_eq!(DayFilter::allowed().len(), 8);
    }

    #[test]
    fn test_selection_builder() {
        let sel = FilterSelection::new(City::Chicago)
            .month(MonthFilter::Month(1))
            .day(DayFilter::Day(0));
        assert_eq!(sel.city, City::Chicago);
        assert_eq!(sel.month.as_str(), "january");
        assert_eq!(sel.day.as_str(), "monday");
    }
}
