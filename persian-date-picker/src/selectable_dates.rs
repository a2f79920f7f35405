use persian_calendar::PersianDate;

use crate::year_range::YearRange;

/// Controls which dates are selectable in the pickers.
///
/// Both predicates default to allowing everything. A vetoed year disables
/// every date in it, whatever [`is_selectable_date`](Self::is_selectable_date)
/// says.
pub trait SelectableDates: Send + Sync {
    /// Returns true when the date can be selected.
    fn is_selectable_date(&self, _date: PersianDate) -> bool {
        true
    }

    /// Returns true when the year can be selected.
    fn is_selectable_year(&self, _year: i32) -> bool {
        true
    }
}

/// Allows every date.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllDates;

impl SelectableDates for AllDates {}

impl<F> SelectableDates for F
where
    F: Fn(PersianDate) -> bool + Send + Sync,
{
    fn is_selectable_date(&self, date: PersianDate) -> bool {
        self(date)
    }
}

/// Whether `date` is enabled: inside the year range, in a selectable year,
/// and a selectable date, checked in that order.
pub fn is_date_selectable(
    date: PersianDate,
    year_range: &YearRange,
    selectable_dates: &dyn SelectableDates,
) -> bool {
    year_range.contains(date.year())
        && selectable_dates.is_selectable_year(date.year())
        && selectable_dates.is_selectable_date(date)
}
