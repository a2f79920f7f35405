use std::fmt;

use persian_calendar::CalendarError;
use thiserror::Error;

use crate::year_range::YearRange;

/// Which date a [`PickerError::RangeViolation`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRole {
    /// The selected date of a single-date picker.
    Selected,
    /// The date whose month is displayed.
    Anchor,
    /// The start of a range selection.
    Start,
    /// The end of a range selection.
    End,
}

impl fmt::Display for DateRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DateRole::Selected => "selected date",
            DateRole::Anchor => "displayed month",
            DateRole::Start => "range start",
            DateRole::End => "range end",
        })
    }
}

/// Errors returned by picker construction and explicit setters.
///
/// A failed call leaves the state it was called on untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickerError {
    /// A date's year lies outside the picker's year range.
    #[error("{role} year {year} is out of the years range {range}")]
    RangeViolation {
        /// The date the year belongs to.
        role: DateRole,
        /// The rejected year.
        year: i32,
        /// The range the year was checked against.
        range: YearRange,
    },
    /// The first year of a range is after its last year, or the range
    /// leaves the years the calendar supports.
    #[error("invalid year range {first}..={last}")]
    InvalidYearRange {
        /// Requested first year.
        first: i32,
        /// Requested last year.
        last: i32,
    },
    /// A persisted display mode value that maps to no mode.
    #[error("unknown display mode value {value}")]
    UnknownDisplayMode {
        /// The rejected value.
        value: i32,
    },
    /// Calendar arithmetic failed.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

/// Why typed input did not produce a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The year is not a number or lies outside 1300..=1500.
    #[error("year must be between 1300 and 1500")]
    YearOutOfSupportedRange,
    /// The month or day do not form a calendar date.
    #[error("date does not match the yyyy/mm/dd pattern")]
    InvalidPattern,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_violation_message() {
        let error = PickerError::RangeViolation {
            role: DateRole::Anchor,
            year: 1290,
            range: YearRange::new(1300, 1499).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "displayed month year 1290 is out of the years range 1300..=1499"
        );
    }

    #[test]
    fn test_calendar_errors_convert() {
        let error: PickerError = CalendarError::InvalidMonth { month: 13 }.into();
        assert!(matches!(error, PickerError::Calendar(_)));
        assert_eq!(error.to_string(), "invalid month 13, expected 1..=12");
    }
}
