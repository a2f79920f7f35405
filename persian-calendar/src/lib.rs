//! Jalali (Persian) calendar arithmetic.
//!
//! This crate provides the date values and the calendar math consumed by
//! `persian-date-picker`: month lengths, leap years, weekdays in the
//! Saturday-first Persian week, and conversion to and from Gregorian dates
//! and epoch timestamps.
//!
//! # Example
//!
//! ```
//! use persian_calendar::{CalendarMath, JalaliCalendar, PersianDate, PersianWeekday};
//!
//! let nowruz = PersianDate::new(1403, 1, 1).unwrap();
//! assert_eq!(nowruz.to_gregorian().to_string(), "2024-03-20");
//! assert_eq!(nowruz.weekday(), PersianWeekday::Chaharshanbeh);
//! assert_eq!(JalaliCalendar.month_length(1403, 12), 30);
//! ```

mod date;
mod error;
mod jalali;
mod provider;
mod weekday;

pub use date::{MONTH_NAMES, PersianDate, YearMonth};
pub use error::CalendarError;
pub use provider::{CalendarMath, JalaliCalendar};
pub use weekday::PersianWeekday;

/// Re-exported so hosts can build offsets without depending on `chrono`.
pub use chrono::FixedOffset;
