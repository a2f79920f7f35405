//! Displayed-month bookkeeping shared by the single-date and range states.

use std::sync::Arc;

use persian_calendar::{CalendarMath, PersianDate, YearMonth};
use tracing::warn;

use crate::{
    display_mode::DisplayMode,
    error::{DateRole, PickerError},
    selectable_dates::{SelectableDates, is_date_selectable},
    year_range::YearRange,
};

/// Calendar math shared between a state and the grids derived from it.
pub type SharedCalendar = Arc<dyn CalendarMath + Send + Sync>;

/// Anchor, year bound, display mode and selectable policy of a picker.
///
/// The anchor is the date whose month the grid shows; its year always lies
/// within the year range.
#[derive(Clone)]
pub struct CalendarViewState {
    anchor: PersianDate,
    year_range: YearRange,
    display_mode: DisplayMode,
    selectable_dates: Arc<dyn SelectableDates>,
    calendar: SharedCalendar,
}

impl CalendarViewState {
    /// Creates the view. A missing anchor means today in the system time zone.
    pub(crate) fn new(
        anchor: Option<PersianDate>,
        year_range: YearRange,
        display_mode: DisplayMode,
        selectable_dates: Arc<dyn SelectableDates>,
        calendar: SharedCalendar,
    ) -> Result<Self, PickerError> {
        let anchor = anchor.unwrap_or_else(|| calendar.today_local());
        year_range.require(DateRole::Anchor, anchor)?;
        Ok(Self {
            anchor,
            year_range,
            display_mode,
            selectable_dates,
            calendar,
        })
    }

    /// The date whose month is displayed.
    pub fn anchor(&self) -> PersianDate {
        self.anchor
    }

    /// The month currently displayed.
    pub fn displayed_month(&self) -> YearMonth {
        self.anchor.year_month()
    }

    /// Years the picker is limited to.
    pub fn year_range(&self) -> YearRange {
        self.year_range
    }

    /// Current display mode.
    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    /// The selectable-dates policy.
    pub fn selectable_dates(&self) -> &Arc<dyn SelectableDates> {
        &self.selectable_dates
    }

    /// The calendar math used for grids and "today".
    pub fn calendar(&self) -> &SharedCalendar {
        &self.calendar
    }

    /// Today in the system time zone.
    pub fn today(&self) -> PersianDate {
        self.calendar.today_local()
    }

    /// Replaces the anchor, rejecting dates outside the year range.
    pub fn set_anchor(&mut self, date: PersianDate) -> Result<(), PickerError> {
        self.year_range.require(DateRole::Anchor, date)?;
        self.anchor = date;
        Ok(())
    }

    /// Replaces the mode and, when `sync_to` is set, moves the anchor to it.
    ///
    /// A sync target outside the year range keeps the old anchor; the mode
    /// change still applies.
    pub(crate) fn set_display_mode(&mut self, mode: DisplayMode, sync_to: Option<PersianDate>) {
        if let Some(date) = sync_to
            && let Err(error) = self.set_anchor(date)
        {
            warn!(%error, %mode, "display mode changed without syncing the displayed month");
        }
        self.display_mode = mode;
    }

    /// Replaces the selectable-dates policy.
    pub fn set_selectable_dates(&mut self, selectable_dates: Arc<dyn SelectableDates>) {
        self.selectable_dates = selectable_dates;
    }

    /// Whether `date` is enabled in the grid.
    pub fn is_date_enabled(&self, date: PersianDate) -> bool {
        is_date_selectable(date, &self.year_range, self.selectable_dates.as_ref())
    }

    /// Year picker click: keeps month and day, clamping the day when the
    /// target year's month is shorter.
    pub fn select_year(&mut self, year: i32) -> Result<(), PickerError> {
        if !self.year_range.contains(year) {
            return Err(PickerError::RangeViolation {
                role: DateRole::Anchor,
                year,
                range: self.year_range,
            });
        }
        let date = self.anchor.with_year_clamped(year)?;
        self.set_anchor(date)
    }

    /// One entry per year of the range for the year picker.
    pub fn year_items(&self) -> impl Iterator<Item = YearItem> + '_ {
        let displayed = self.anchor.year();
        let current = self.today().year();
        self.year_range.iter().map(move |year| YearItem {
            year,
            is_displayed: year == displayed,
            is_current: year == current,
            is_selectable: self.selectable_dates.is_selectable_year(year),
        })
    }

    /// Whether an earlier month is within the year range.
    pub fn can_navigate_previous(&self) -> bool {
        self.displayed_month() > self.year_range.first_month()
    }

    /// Whether a later month is within the year range.
    pub fn can_navigate_next(&self) -> bool {
        self.displayed_month() < self.year_range.last_month()
    }

    /// Moves the anchor to day 1 of the previous month. Returns false at the
    /// start of the year range.
    pub fn previous_month(&mut self) -> bool {
        self.shift_month(-1, self.can_navigate_previous())
    }

    /// Moves the anchor to day 1 of the next month. Returns false at the end
    /// of the year range.
    pub fn next_month(&mut self) -> bool {
        self.shift_month(1, self.can_navigate_next())
    }

    fn shift_month(&mut self, delta: i32, allowed: bool) -> bool {
        if !allowed {
            return false;
        }
        match self
            .displayed_month()
            .add_months(delta)
            .and_then(|month| month.first_day())
        {
            Some(date) => self.set_anchor(date).is_ok(),
            None => false,
        }
    }
}

/// A cell of the year picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearItem {
    /// The year shown.
    pub year: i32,
    /// The displayed month belongs to this year.
    pub is_displayed: bool,
    /// Today belongs to this year.
    pub is_current: bool,
    /// The policy allows this year.
    pub is_selectable: bool,
}
