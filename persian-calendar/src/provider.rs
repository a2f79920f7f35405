//! The calendar-math seam consumed by the pickers.

use chrono::{FixedOffset, Local};

use crate::{CalendarError, PersianDate, PersianWeekday, jalali};

/// Calendar arithmetic the pickers rely on.
///
/// The pickers never compute month lengths, weekdays or timestamps on their
/// own; everything goes through this trait so that hosts (and tests) can
/// substitute a provider.
pub trait CalendarMath {
    /// Number of days in `month` of `year`, 0 for a month that does not exist.
    fn month_length(&self, year: i32, month: u8) -> u8;

    /// Day of the week `date` falls on.
    fn weekday_of(&self, date: PersianDate) -> PersianWeekday;

    /// Whether `year` has a 30-day Esfand.
    fn is_leap_year(&self, year: i32) -> bool;

    /// The current date at `offset`.
    fn today(&self, offset: FixedOffset) -> PersianDate;

    /// Midnight UTC of `date` in milliseconds since the Unix epoch.
    fn to_epoch_millis(&self, date: PersianDate) -> i64;

    /// The date an epoch timestamp falls on at `offset`.
    fn from_epoch_millis(
        &self,
        millis: i64,
        offset: FixedOffset,
    ) -> Result<PersianDate, CalendarError>;

    /// Offset of the system time zone right now.
    fn system_offset(&self) -> FixedOffset {
        *Local::now().offset()
    }

    /// The current date in the system time zone.
    fn today_local(&self) -> PersianDate {
        self.today(self.system_offset())
    }
}

/// The standard Jalali calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JalaliCalendar;

impl CalendarMath for JalaliCalendar {
    fn month_length(&self, year: i32, month: u8) -> u8 {
        jalali::month_length(year, month).unwrap_or(0)
    }

    fn weekday_of(&self, date: PersianDate) -> PersianWeekday {
        date.weekday()
    }

    fn is_leap_year(&self, year: i32) -> bool {
        jalali::is_leap_year(year)
    }

    fn today(&self, offset: FixedOffset) -> PersianDate {
        PersianDate::today(offset)
    }

    fn to_epoch_millis(&self, date: PersianDate) -> i64 {
        date.to_epoch_millis()
    }

    fn from_epoch_millis(
        &self,
        millis: i64,
        offset: FixedOffset,
    ) -> Result<PersianDate, CalendarError> {
        PersianDate::from_epoch_millis(millis, offset)
    }
}
