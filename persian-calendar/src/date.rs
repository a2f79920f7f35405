use std::{fmt, ops::RangeInclusive};

use chrono::{DateTime, Datelike, Days, FixedOffset, Local, NaiveDate, NaiveTime, Utc};

use crate::{error::CalendarError, jalali, weekday::PersianWeekday};

/// Persian month names, Farvardin first.
pub const MONTH_NAMES: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

const MONTHS_IN_YEAR: i32 = 12;

/// A calendar date in the Persian (Jalali) calendar.
///
/// Values are always valid: the month is in 1..=12 and the day exists in
/// that month. Dates order by calendar position, which is also the order of
/// their epoch timestamps.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "(i32, u8, u8)", into = "(i32, u8, u8)")
)]
pub struct PersianDate {
    year: i32,
    month: u8,
    day: u8,
    gregorian: NaiveDate,
}

impl PersianDate {
    /// Years covered by the conversion tables.
    pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1..=3177;

    /// Creates a date, validating month and day against the calendar.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        if !Self::SUPPORTED_YEARS.contains(&year) {
            return Err(unsupported_year(year));
        }
        let length =
            jalali::month_length(year, month).ok_or(CalendarError::InvalidMonth { month })?;
        if day == 0 || day > length {
            return Err(CalendarError::InvalidDay {
                year,
                month,
                day,
                length,
            });
        }
        let gregorian = jalali::to_gregorian(year, month, day).ok_or(unsupported_year(year))?;
        Ok(Self {
            year,
            month,
            day,
            gregorian,
        })
    }

    /// Converts a Gregorian civil date.
    pub fn from_gregorian(date: NaiveDate) -> Result<Self, CalendarError> {
        let (year, month, day) =
            jalali::from_gregorian(date).ok_or(unsupported_year(date.year() - 621))?;
        Self::new(year, month, day)
    }

    /// Decodes an epoch timestamp into the date it falls on at `offset`.
    pub fn from_epoch_millis(millis: i64, offset: FixedOffset) -> Result<Self, CalendarError> {
        let instant = DateTime::from_timestamp_millis(millis)
            .ok_or(CalendarError::OutOfRangeInstant { millis })?;
        Self::from_gregorian(instant.with_timezone(&offset).date_naive())
            .map_err(|_| CalendarError::OutOfRangeInstant { millis })
    }

    /// Returns the current date at `offset`.
    pub fn today(offset: FixedOffset) -> Self {
        Self::from_gregorian(Utc::now().with_timezone(&offset).date_naive())
            .unwrap_or_else(|_| Self::unix_epoch())
    }

    /// Returns the current date in the system time zone.
    pub fn today_local() -> Self {
        Self::today(*Local::now().offset())
    }

    /// 11 Dey 1348, the first day of the Unix epoch.
    pub fn unix_epoch() -> Self {
        Self {
            year: 1348,
            month: 10,
            day: 11,
            gregorian: NaiveDate::default(),
        }
    }

    /// Returns the year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month (1-12).
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Returns the day of the month.
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Returns the month this date belongs to.
    pub fn year_month(&self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }

    /// Returns a copy with the year replaced.
    pub fn with_year(self, year: i32) -> Result<Self, CalendarError> {
        Self::new(year, self.month, self.day)
    }

    /// Returns a copy with the year replaced, moving the day back to the
    /// end of the month when it does not exist in the target year.
    pub fn with_year_clamped(self, year: i32) -> Result<Self, CalendarError> {
        let length = jalali::month_length(year, self.month).unwrap_or(self.day);
        Self::new(year, self.month, self.day.min(length))
    }

    /// Returns a copy with the month replaced.
    pub fn with_month(self, month: u8) -> Result<Self, CalendarError> {
        Self::new(self.year, month, self.day)
    }

    /// Returns a copy with the day replaced.
    pub fn with_day(self, day: u8) -> Result<Self, CalendarError> {
        Self::new(self.year, self.month, day)
    }

    /// Returns the first day of this date's month.
    pub fn first_of_month(self) -> Self {
        self.with_day(1).unwrap_or(self)
    }

    /// Number of days in this date's month.
    pub fn month_length(&self) -> u8 {
        self.year_month().length()
    }

    /// Whether this date's year is a leap year.
    pub fn is_leap_year(&self) -> bool {
        jalali::is_leap_year(self.year)
    }

    /// Day of the Persian week.
    pub fn weekday(&self) -> PersianWeekday {
        self.gregorian.weekday().into()
    }

    /// The Gregorian civil date of the same day.
    pub fn to_gregorian(&self) -> NaiveDate {
        self.gregorian
    }

    /// Milliseconds since the Unix epoch at midnight UTC of this day.
    pub fn to_epoch_millis(&self) -> i64 {
        self.gregorian
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp_millis()
    }

    /// Adds (or subtracts) whole days.
    pub fn plus_days(self, days: i64) -> Result<Self, CalendarError> {
        let shifted = if days >= 0 {
            self.gregorian.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.gregorian.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        let millis = self.to_epoch_millis();
        Self::from_gregorian(shifted.ok_or(CalendarError::OutOfRangeInstant { millis })?)
    }

    /// Persian name of this date's month.
    pub fn month_name(&self) -> &'static str {
        self.year_month().name()
    }

    /// Headline form: day, month name, year (`15 مهر 1402`).
    pub fn format_long(&self) -> String {
        format!("{} {} {}", self.day, self.month_name(), self.year)
    }

    /// The eight-digit `yyyymmdd` form typed into the input field.
    pub fn format_digits(&self) -> String {
        format!("{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for PersianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Debug for PersianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PersianDate({self})")
    }
}

impl TryFrom<(i32, u8, u8)> for PersianDate {
    type Error = CalendarError;

    fn try_from((year, month, day): (i32, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(year, month, day)
    }
}

impl From<PersianDate> for (i32, u8, u8) {
    fn from(date: PersianDate) -> Self {
        (date.year, date.month, date.day)
    }
}

/// A year and month pair, the key of a displayed calendar page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "(i32, u8)", into = "(i32, u8)")
)]
pub struct YearMonth {
    year: i32,
    month: u8,
}

impl YearMonth {
    /// Creates a year/month pair if the values are valid.
    pub fn new(year: i32, month: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        if !PersianDate::SUPPORTED_YEARS.contains(&year) {
            return Err(unsupported_year(year));
        }
        Ok(Self { year, month })
    }

    /// Returns the year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month (1-12).
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Number of days in this month.
    pub fn length(&self) -> u8 {
        jalali::month_length(self.year, self.month).unwrap_or(29)
    }

    /// Returns the date for this month at the provided day.
    pub fn day(&self, day: u8) -> Option<PersianDate> {
        PersianDate::new(self.year, self.month, day).ok()
    }

    /// Returns 1st of this month.
    pub fn first_day(&self) -> Option<PersianDate> {
        self.day(1)
    }

    /// Adds or subtracts months, adjusting the year as needed. Returns `None`
    /// when the result leaves the supported years.
    pub fn add_months(&self, delta: i32) -> Option<Self> {
        let total = self.year * MONTHS_IN_YEAR + (i32::from(self.month) - 1) + delta;
        let year = total.div_euclid(MONTHS_IN_YEAR);
        let month = u8::try_from(total.rem_euclid(MONTHS_IN_YEAR) + 1).ok()?;
        Self::new(year, month).ok()
    }

    /// Persian month name.
    pub fn name(&self) -> &'static str {
        MONTH_NAMES[usize::from(self.month - 1)]
    }
}

impl From<PersianDate> for YearMonth {
    fn from(date: PersianDate) -> Self {
        date.year_month()
    }
}

impl TryFrom<(i32, u8)> for YearMonth {
    type Error = CalendarError;

    fn try_from((year, month): (i32, u8)) -> Result<Self, Self::Error> {
        Self::new(year, month)
    }
}

impl From<YearMonth> for (i32, u8) {
    fn from(month: YearMonth) -> Self {
        (month.year, month.month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}

fn unsupported_year(year: i32) -> CalendarError {
    CalendarError::UnsupportedYear {
        year,
        first: *PersianDate::SUPPORTED_YEARS.start(),
        last: *PersianDate::SUPPORTED_YEARS.end(),
    }
}
