//! Column names used in the bikeshare CSV files.

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// Columns every city file must carry.
pub const REQUIRED: [&str; 4] = [START_TIME, TRIP_DURATION, START_STATION, END_STATION];

/// Columns only some city files carry.
pub const OPTIONAL: [&str; 4] = [END_TIME, USER_TYPE, GENDER, BIRTH_YEAR];
