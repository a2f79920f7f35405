use thiserror::Error;

/// Errors raised while building or converting Persian dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// The month is not in 1..=12.
    #[error("invalid month {month}, expected 1..=12")]
    InvalidMonth {
        /// The rejected month.
        month: u8,
    },
    /// The day does not exist in the given month.
    #[error("invalid day {day} for {year}/{month:02}, the month has {length} days")]
    InvalidDay {
        /// Year of the rejected date.
        year: i32,
        /// Month of the rejected date.
        month: u8,
        /// The rejected day.
        day: u8,
        /// Number of days the month actually has.
        length: u8,
    },
    /// The year lies outside the window the conversion tables cover.
    #[error("year {year} is outside the supported range {first}..={last}")]
    UnsupportedYear {
        /// The rejected year.
        year: i32,
        /// First supported year.
        first: i32,
        /// Last supported year.
        last: i32,
    },
    /// An epoch timestamp that does not map to a supported date.
    #[error("timestamp {millis}ms does not map to a supported date")]
    OutOfRangeInstant {
        /// The rejected timestamp.
        millis: i64,
    },
}
