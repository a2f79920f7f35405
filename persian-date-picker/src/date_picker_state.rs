//! Single-date picker state.

use std::sync::Arc;

use derive_setters::Setters;
use persian_calendar::{PersianDate, YearMonth};

use crate::{
    calendar_view::{CalendarViewState, SharedCalendar, YearItem},
    defaults::DatePickerDefaults,
    display_mode::DisplayMode,
    error::{DateRole, PickerError},
    month_grid::{GridSelection, MonthGrid},
    selectable_dates::SelectableDates,
    year_range::YearRange,
};

/// Configuration for [`DatePickerState::from_args`].
#[derive(Clone, Setters)]
pub struct DatePickerArgs {
    /// Initial selected date.
    #[setters(strip_option)]
    pub initial_selected_date: Option<PersianDate>,
    /// Date whose month is shown first. Falls back to the selected date,
    /// then to today.
    #[setters(strip_option)]
    pub initial_displayed_anchor: Option<PersianDate>,
    /// Years the picker is limited to.
    pub year_range: YearRange,
    /// Initial display mode.
    pub display_mode: DisplayMode,
    /// Selectable-dates policy.
    pub selectable_dates: Arc<dyn SelectableDates>,
    /// Calendar math used for grids and "today".
    pub calendar: SharedCalendar,
}

impl Default for DatePickerArgs {
    fn default() -> Self {
        Self {
            initial_selected_date: None,
            initial_displayed_anchor: None,
            year_range: DatePickerDefaults::YEAR_RANGE,
            display_mode: DisplayMode::Picker,
            selectable_dates: DatePickerDefaults::all_dates(),
            calendar: DatePickerDefaults::calendar(),
        }
    }
}

/// Holds the current selection and display state for a date picker.
///
/// A selected date set at construction lies within the year range.
/// [`set_selected_date`](Self::set_selected_date) does not re-check it.
#[derive(Clone)]
pub struct DatePickerState {
    selected_date: Option<PersianDate>,
    view: CalendarViewState,
}

impl DatePickerState {
    /// Creates a date picker state with the Jalali calendar.
    ///
    /// The anchor defaults to `initial_selected_date`, then to today.
    pub fn new(
        initial_selected_date: Option<PersianDate>,
        initial_displayed_anchor: Option<PersianDate>,
        year_range: YearRange,
        display_mode: DisplayMode,
        selectable_dates: Arc<dyn SelectableDates>,
    ) -> Result<Self, PickerError> {
        Self::from_args(DatePickerArgs {
            initial_selected_date,
            initial_displayed_anchor,
            year_range,
            display_mode,
            selectable_dates,
            calendar: DatePickerDefaults::calendar(),
        })
    }

    /// Creates a date picker state from its configuration.
    pub fn from_args(args: impl Into<DatePickerArgs>) -> Result<Self, PickerError> {
        let args = args.into();
        if let Some(date) = args.initial_selected_date {
            args.year_range.require(DateRole::Selected, date)?;
        }
        let view = CalendarViewState::new(
            args.initial_displayed_anchor.or(args.initial_selected_date),
            args.year_range,
            args.display_mode,
            args.selectable_dates,
            args.calendar,
        )?;
        Ok(Self {
            selected_date: args.initial_selected_date,
            view,
        })
    }

    /// Returns the selected date, if any.
    pub fn selected_date(&self) -> Option<PersianDate> {
        self.selected_date
    }

    /// Returns the date whose month is displayed.
    pub fn displayed_anchor(&self) -> PersianDate {
        self.view.anchor()
    }

    /// Returns the month currently displayed by the picker.
    pub fn displayed_month(&self) -> YearMonth {
        self.view.displayed_month()
    }

    /// Returns the display mode.
    pub fn display_mode(&self) -> DisplayMode {
        self.view.display_mode()
    }

    /// Returns the year range allowed by this picker.
    pub fn year_range(&self) -> YearRange {
        self.view.year_range()
    }

    /// Returns the selectable-dates policy.
    pub fn selectable_dates(&self) -> &Arc<dyn SelectableDates> {
        self.view.selectable_dates()
    }

    /// Returns the shared calendar view.
    pub fn view(&self) -> &CalendarViewState {
        &self.view
    }

    /// Replaces the selection. The displayed month is left alone.
    pub fn set_selected_date(&mut self, date: Option<PersianDate>) {
        self.selected_date = date;
    }

    /// Grid click on a single-date picker.
    pub fn on_day_click(&mut self, date: PersianDate) {
        self.set_selected_date(Some(date));
    }

    /// Updates the displayed date, rejecting years outside the range.
    pub fn set_displayed_anchor(&mut self, date: PersianDate) -> Result<(), PickerError> {
        self.view.set_anchor(date)
    }

    /// Updates the display mode and moves the displayed month to the
    /// selected date, if there is one.
    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.view.set_display_mode(mode, self.selected_date);
    }

    /// Toggles between picker and input modes.
    pub fn toggle_display_mode(&mut self) {
        self.set_display_mode(self.display_mode().toggled());
    }

    /// Updates the selectable-dates policy.
    pub fn set_selectable_dates(&mut self, selectable_dates: Arc<dyn SelectableDates>) {
        self.view.set_selectable_dates(selectable_dates);
    }

    /// Whether `date` is enabled in the grid.
    pub fn is_date_enabled(&self, date: PersianDate) -> bool {
        self.view.is_date_enabled(date)
    }

    /// Moves the displayed date to `year`, see [`CalendarViewState::select_year`].
    pub fn select_year(&mut self, year: i32) -> Result<(), PickerError> {
        self.view.select_year(year)
    }

    /// Entries of the year picker.
    pub fn year_items(&self) -> impl Iterator<Item = YearItem> + '_ {
        self.view.year_items()
    }

    /// Whether an earlier month can be displayed.
    pub fn can_navigate_previous(&self) -> bool {
        self.view.can_navigate_previous()
    }

    /// Whether a later month can be displayed.
    pub fn can_navigate_next(&self) -> bool {
        self.view.can_navigate_next()
    }

    /// Moves the displayed month backward by one, staying within the year range.
    pub fn previous_month(&mut self) -> bool {
        self.view.previous_month()
    }

    /// Moves the displayed month forward by one, staying within the year range.
    pub fn next_month(&mut self) -> bool {
        self.view.next_month()
    }

    /// Grid of the displayed month.
    pub fn month_grid(&self) -> MonthGrid<'_> {
        MonthGrid::for_view(
            self.displayed_month(),
            &self.view,
            GridSelection::Single(self.selected_date),
        )
    }

    /// Headline text for the current selection and mode.
    pub fn headline(&self) -> String {
        DatePickerDefaults::headline(self.selected_date, self.display_mode())
    }
}

impl std::fmt::Debug for DatePickerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatePickerState")
            .field("selected_date", &self.selected_date)
            .field("displayed_anchor", &self.displayed_anchor())
            .field("display_mode", &self.display_mode())
            .field("year_range", &self.year_range())
            .finish_non_exhaustive()
    }
}
