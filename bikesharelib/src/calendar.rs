//! Month and weekday name tables.
//!
//! These tables are the single source of truth for translating between the
//! names a user types, the numbers derived from timestamps, and the names
//! printed in reports. Month numbers are 1-based (`1` = January) and weekday
//! indices are 0-based starting on Monday, matching
//! [`chrono::Datelike::month`] and [`chrono::Weekday::num_days_from_monday`].

/// Sentinel accepted by the month and day prompts meaning "no filter".
pub const ALL: &str = "all";

/// Lowercase month names; `MONTH_NAMES[n - 1]` is month number `n`.
pub const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Lowercase weekday names; `DAY_NAMES[i]` is weekday index `i` (Monday = 0).
pub const DAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// 1-based month number for a lowercase month name.
pub fn month_number(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|m| *m == name)
        .map(|i| i as u32 + 1)
}

/// 0-based weekday index (Monday = 0) for a lowercase day name.
pub fn day_index(name: &str) -> Option<u32> {
    DAY_NAMES.iter().position(|d| *d == name).map(|i| i as u32)
}

/// Lowercase name of a 1-based month number.
pub fn month_name(number: u32) -> Option<&'static str> {
    number
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
}

/// Lowercase name of a weekday index.
pub fn day_name(index: u32) -> Option<&'static str> {
    DAY_NAMES.get(index as usize).copied()
}

/// Capitalize the first letter of every alphabetic run and lowercase the rest.
///
/// `"new york city"` becomes `"New York City"`, `"clark st & lake st"` becomes
/// `"Clark St & Lake St"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
