use std::{fmt, ops::RangeInclusive};

use persian_calendar::{PersianDate, YearMonth};

use crate::error::{DateRole, PickerError};

/// Closed interval of years a picker is limited to.
///
/// `first <= last` always holds, and both ends lie within
/// [`PersianDate::SUPPORTED_YEARS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "(i32, i32)", into = "(i32, i32)")
)]
pub struct YearRange {
    first: i32,
    last: i32,
}

impl YearRange {
    /// Creates a year range, rejecting inverted or unsupported bounds.
    pub fn new(first: i32, last: i32) -> Result<Self, PickerError> {
        let supported = PersianDate::SUPPORTED_YEARS;
        if first > last || !supported.contains(&first) || !supported.contains(&last) {
            return Err(PickerError::InvalidYearRange { first, last });
        }
        Ok(Self { first, last })
    }

    pub(crate) const fn new_unchecked(first: i32, last: i32) -> Self {
        Self { first, last }
    }

    /// First year of the range.
    pub fn first(&self) -> i32 {
        self.first
    }

    /// Last year of the range.
    pub fn last(&self) -> i32 {
        self.last
    }

    /// Whether `year` lies within the range.
    pub fn contains(&self, year: i32) -> bool {
        (self.first..=self.last).contains(&year)
    }

    /// Number of years in the range.
    pub fn year_count(&self) -> usize {
        usize::try_from(self.last - self.first).map_or(0, |span| span + 1)
    }

    /// Number of months in the range.
    pub fn month_count(&self) -> usize {
        self.year_count() * 12
    }

    /// Iterates the years in ascending order.
    pub fn iter(&self) -> RangeInclusive<i32> {
        self.first..=self.last
    }

    /// Position of `year` in the range, used to scroll the year list.
    pub fn index_of(&self, year: i32) -> Option<usize> {
        if self.contains(year) {
            usize::try_from(year - self.first).ok()
        } else {
            None
        }
    }

    /// Farvardin of the first year.
    pub fn first_month(&self) -> YearMonth {
        YearMonth::from(self.first_date())
    }

    /// Esfand of the last year.
    pub fn last_month(&self) -> YearMonth {
        YearMonth::from(self.last_date())
    }

    /// 1 Farvardin of the first year.
    pub fn first_date(&self) -> PersianDate {
        PersianDate::new(self.first, 1, 1).unwrap_or_else(|_| PersianDate::unix_epoch())
    }

    /// 1 Esfand of the last year.
    pub fn last_date(&self) -> PersianDate {
        PersianDate::new(self.last, 12, 1).unwrap_or_else(|_| PersianDate::unix_epoch())
    }

    /// Fails with [`PickerError::RangeViolation`] when `date` is outside the range.
    pub fn require(&self, role: DateRole, date: PersianDate) -> Result<(), PickerError> {
        if self.contains(date.year()) {
            Ok(())
        } else {
            Err(PickerError::RangeViolation {
                role,
                year: date.year(),
                range: *self,
            })
        }
    }
}

impl Default for YearRange {
    fn default() -> Self {
        crate::DatePickerDefaults::YEAR_RANGE
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.first, self.last)
    }
}

impl TryFrom<(i32, i32)> for YearRange {
    type Error = PickerError;

    fn try_from((first, last): (i32, i32)) -> Result<Self, Self::Error> {
        Self::new(first, last)
    }
}

impl TryFrom<RangeInclusive<i32>> for YearRange {
    type Error = PickerError;

    fn try_from(range: RangeInclusive<i32>) -> Result<Self, Self::Error> {
        Self::new(*range.start(), *range.end())
    }
}

impl From<YearRange> for (i32, i32) {
    fn from(range: YearRange) -> Self {
        (range.first, range.last)
    }
}

impl From<YearRange> for RangeInclusive<i32> {
    fn from(range: YearRange) -> Self {
        range.iter()
    }
}
