//! Continuous list of every month in a year range, used by the range
//! picker's vertical scroll.

use persian_calendar::{CalendarMath, PersianDate, YearMonth};
use tracing::debug;

use crate::{
    calendar_view::CalendarViewState,
    date_range_picker_state::DateRangePickerState,
    month_grid::{GridSelection, MonthGrid},
    selectable_dates::SelectableDates,
    year_range::YearRange,
};

const MONTHS_IN_YEAR: usize = 12;

/// Lazily indexed months of a year range, Farvardin of the first year at
/// index 0.
#[derive(Clone, Copy)]
pub struct MonthsScroll<'a> {
    year_range: YearRange,
    calendar: &'a dyn CalendarMath,
    selection: GridSelection,
    selectable_dates: &'a dyn SelectableDates,
    today: Option<PersianDate>,
}

impl<'a> MonthsScroll<'a> {
    /// Creates the list for `year_range`.
    pub fn new(
        year_range: YearRange,
        calendar: &'a dyn CalendarMath,
        selection: GridSelection,
        selectable_dates: &'a dyn SelectableDates,
    ) -> Self {
        Self {
            year_range,
            calendar,
            selection,
            selectable_dates,
            today: None,
        }
    }

    /// Creates the list with the view's range, calendar and policy.
    pub fn for_view(view: &'a CalendarViewState, selection: GridSelection) -> Self {
        Self::new(
            view.year_range(),
            view.calendar().as_ref(),
            selection,
            view.selectable_dates().as_ref(),
        )
    }

    /// Overrides the date flagged as today in every grid.
    pub fn with_today(mut self, today: PersianDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Number of months.
    pub fn len(&self) -> usize {
        self.year_range.month_count()
    }

    /// Always false, a year range holds at least one year.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The month at `index`.
    pub fn month_at(&self, index: usize) -> Option<YearMonth> {
        if index >= self.len() {
            return None;
        }
        let year = self.year_range.first() + i32::try_from(index / MONTHS_IN_YEAR).ok()?;
        let month = u8::try_from(index % MONTHS_IN_YEAR + 1).ok()?;
        YearMonth::new(year, month).ok()
    }

    /// Position of `month`, `None` outside the year range.
    pub fn index_of(&self, month: YearMonth) -> Option<usize> {
        let year_index = self.year_range.index_of(month.year())?;
        Some(year_index * MONTHS_IN_YEAR + usize::from(month.month() - 1))
    }

    /// Stable item key, `"{year}-{month}"`.
    pub fn key_at(&self, index: usize) -> Option<String> {
        self.month_at(index)
            .map(|month| format!("{}-{}", month.year(), month.month()))
    }

    /// Index to scroll to first: the anchor's month, or 0 when the anchor
    /// lies outside the range.
    pub fn initial_index(&self, anchor: PersianDate) -> usize {
        self.index_of(anchor.year_month()).unwrap_or(0)
    }

    /// Grid of the month at `index`.
    pub fn grid_at(&self, index: usize) -> Option<MonthGrid<'a>> {
        let month = self.month_at(index)?;
        let grid = MonthGrid::new(
            month,
            self.calendar,
            self.selection,
            self.year_range,
            self.selectable_dates,
        );
        Some(match self.today {
            Some(today) => grid.with_today(today),
            None => grid,
        })
    }

    /// Grids of every month in order.
    pub fn grids(&self) -> impl Iterator<Item = MonthGrid<'a>> + '_ {
        (0..self.len()).filter_map(|index| self.grid_at(index))
    }
}

/// Turns first-visible-item reports of the scroll into anchor updates.
///
/// The anchor only changes when the visible month does, so repeated
/// reports while scrolling within one month are ignored.
#[derive(Debug, Clone, Default)]
pub struct VisibleMonthTracker {
    last_visible: Option<YearMonth>,
}

impl VisibleMonthTracker {
    /// Creates a tracker that has seen no month yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The month last reported visible.
    pub fn last_visible(&self) -> Option<YearMonth> {
        self.last_visible
    }

    /// Handles a scroll report. Returns true when the anchor moved.
    pub fn on_scroll(
        &mut self,
        first_visible_index: usize,
        state: &mut DateRangePickerState,
    ) -> bool {
        let Some(month) = state.months_scroll().month_at(first_visible_index) else {
            return false;
        };
        if self.last_visible == Some(month) {
            return false;
        }
        self.last_visible = Some(month);
        let Some(first_day) = month.first_day() else {
            return false;
        };
        match state.set_displayed_anchor(first_day) {
            Ok(()) => true,
            Err(error) => {
                debug!(%error, "visible month outside the year range");
                false
            }
        }
    }
}
