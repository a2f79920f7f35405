//! Date range picker state and the click protocol that builds a range.

use std::sync::Arc;

use derive_setters::Setters;
use persian_calendar::{PersianDate, YearMonth};
use tracing::debug;

use crate::{
    calendar_view::{CalendarViewState, SharedCalendar, YearItem},
    defaults::DatePickerDefaults,
    display_mode::DisplayMode,
    error::{DateRole, PickerError},
    month_grid::{GridSelection, MonthGrid},
    months_scroll::MonthsScroll,
    selectable_dates::SelectableDates,
    year_range::YearRange,
};

/// Configuration for [`DateRangePickerState::from_args`].
#[derive(Clone, Setters)]
pub struct DateRangePickerArgs {
    /// Initial start of the range.
    #[setters(strip_option)]
    pub initial_start_date: Option<PersianDate>,
    /// Initial end of the range. Ignored together with the start when it
    /// precedes the start or has no start.
    #[setters(strip_option)]
    pub initial_end_date: Option<PersianDate>,
    /// Date whose month is shown first. Falls back to the start date, then
    /// to today.
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

impl Default for DateRangePickerArgs {
    fn default() -> Self {
        Self {
            initial_start_date: None,
            initial_end_date: None,
            initial_displayed_anchor: None,
            year_range: DatePickerDefaults::YEAR_RANGE,
            display_mode: DisplayMode::Picker,
            selectable_dates: DatePickerDefaults::all_dates(),
            calendar: DatePickerDefaults::calendar(),
        }
    }
}

/// Where a range selection stands in the click protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSelection {
    /// Nothing selected.
    Empty,
    /// A start without an end.
    StartOnly(PersianDate),
    /// Start and end, start on or before end.
    Complete(PersianDate, PersianDate),
}

impl RangeSelection {
    /// Start of the range, if any.
    pub fn start(&self) -> Option<PersianDate> {
        match *self {
            RangeSelection::Empty => None,
            RangeSelection::StartOnly(start) | RangeSelection::Complete(start, _) => Some(start),
        }
    }

    /// End of the range, if any.
    pub fn end(&self) -> Option<PersianDate> {
        match *self {
            RangeSelection::Complete(_, end) => Some(end),
            _ => None,
        }
    }
}

/// Holds the selected range and display state for a date range picker.
///
/// An end never exists without a start, and a start never follows its end.
#[derive(Clone)]
pub struct DateRangePickerState {
    selection: RangeSelection,
    view: CalendarViewState,
}

impl DateRangePickerState {
    /// Creates a range picker state with the Jalali calendar.
    pub fn new(
        initial_start_date: Option<PersianDate>,
        initial_end_date: Option<PersianDate>,
        initial_displayed_anchor: Option<PersianDate>,
        year_range: YearRange,
        display_mode: DisplayMode,
        selectable_dates: Arc<dyn SelectableDates>,
    ) -> Result<Self, PickerError> {
        Self::from_args(DateRangePickerArgs {
            initial_start_date,
            initial_end_date,
            initial_displayed_anchor,
            year_range,
            display_mode,
            selectable_dates,
            calendar: DatePickerDefaults::calendar(),
        })
    }

    /// Creates a range picker state from its configuration.
    ///
    /// Start, end and anchor years must lie within the year range. The
    /// start/end pair then goes through [`set_selection`](Self::set_selection).
    pub fn from_args(args: impl Into<DateRangePickerArgs>) -> Result<Self, PickerError> {
        let args = args.into();
        if let Some(start) = args.initial_start_date {
            args.year_range.require(DateRole::Start, start)?;
        }
        if let Some(end) = args.initial_end_date {
            args.year_range.require(DateRole::End, end)?;
        }
        let view = CalendarViewState::new(
            args.initial_displayed_anchor.or(args.initial_start_date),
            args.year_range,
            args.display_mode,
            args.selectable_dates,
            args.calendar,
        )?;
        let mut state = Self {
            selection: RangeSelection::Empty,
            view,
        };
        state.set_selection(args.initial_start_date, args.initial_end_date);
        Ok(state)
    }

    /// Returns the selection as a protocol state.
    pub fn selection(&self) -> RangeSelection {
        self.selection
    }

    /// Returns the selected start date, if any.
    pub fn selected_start_date(&self) -> Option<PersianDate> {
        self.selection.start()
    }

    /// Returns the selected end date, if any.
    pub fn selected_end_date(&self) -> Option<PersianDate> {
        self.selection.end()
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

    /// Sets both ends at once.
    ///
    /// The pair is kept only when there is a start and the end, if any, is
    /// not before it. Any other pair clears the whole selection: an end
    /// without a start or a reversed pair restarts the range instead of
    /// being swapped or partially applied.
    pub fn set_selection(&mut self, start: Option<PersianDate>, end: Option<PersianDate>) {
        self.selection = match (start, end) {
            (Some(start), None) => RangeSelection::StartOnly(start),
            (Some(start), Some(end)) if start <= end => RangeSelection::Complete(start, end),
            (None, None) => RangeSelection::Empty,
            _ => {
                debug!(?start, ?end, "rejected range selection, clearing");
                RangeSelection::Empty
            }
        };
    }

    /// Grid click.
    ///
    /// | selection        | click `d`    | result                 |
    /// |------------------|--------------|------------------------|
    /// | empty            | any          | start only `d`         |
    /// | start only `s`   | `d >= s`     | complete `s..=d`       |
    /// | start only `s`   | `d < s`      | start only `d`         |
    /// | complete         | any          | start only `d`         |
    pub fn on_day_click(&mut self, date: PersianDate) {
        match self.selection {
            RangeSelection::StartOnly(start) if date >= start => {
                self.set_selection(Some(start), Some(date));
            }
            _ => self.set_selection(Some(date), None),
        }
    }

    /// Updates the displayed anchor, rejecting years outside the range.
    pub fn set_displayed_anchor(&mut self, date: PersianDate) -> Result<(), PickerError> {
        self.view.set_anchor(date)
    }

    /// Updates the display mode and moves the displayed month to the
    /// selected start date, if there is one.
    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.view.set_display_mode(mode, self.selection.start());
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

    /// Moves the displayed anchor to `year`, see [`CalendarViewState::select_year`].
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

    /// Selection snapshot for grid derivation.
    pub fn grid_selection(&self) -> GridSelection {
        GridSelection::Range {
            start: self.selection.start(),
            end: self.selection.end(),
        }
    }

    /// Grid of the displayed month.
    pub fn month_grid(&self) -> MonthGrid<'_> {
        MonthGrid::for_view(self.displayed_month(), &self.view, self.grid_selection())
    }

    /// Every month of the year range as one scrollable list.
    pub fn months_scroll(&self) -> MonthsScroll<'_> {
        MonthsScroll::for_view(&self.view, self.grid_selection())
    }

    /// Headline text, `start - end`.
    pub fn headline(&self) -> String {
        DatePickerDefaults::range_headline(self.selection.start(), self.selection.end())
    }
}

impl std::fmt::Debug for DateRangePickerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateRangePickerState")
            .field("selection", &self.selection)
            .field("displayed_anchor", &self.displayed_anchor())
            .field("display_mode", &self.display_mode())
            .field("year_range", &self.year_range())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::selectable_dates::AllDates;

    fn date(year: i32, month: u8, day: u8) -> PersianDate {
        PersianDate::new(year, month, day).unwrap()
    }

    fn empty_state() -> DateRangePickerState {
        DateRangePickerState::new(
            None,
            None,
            Some(date(1402, 7, 1)),
            YearRange::new(1400, 1410).unwrap(),
            DisplayMode::Picker,
            Arc::new(AllDates),
        )
        .unwrap()
    }

    fn date_strategy() -> impl Strategy<Value = PersianDate> {
        (1400i32..=1410, 1u8..=12, 1u8..=29).prop_map(|(y, m, d)| date(y, m, d))
    }

    #[test]
    fn test_click_protocol() {
        let mut state = empty_state();
        let d1 = date(1402, 7, 10);
        state.on_day_click(d1);
        assert_eq!(state.selection(), RangeSelection::StartOnly(d1));

        let before = date(1402, 7, 5);
        state.on_day_click(before);
        assert_eq!(state.selection(), RangeSelection::StartOnly(before));

        let after = date(1402, 7, 20);
        state.on_day_click(after);
        assert_eq!(state.selection(), RangeSelection::Complete(before, after));

        let d3 = date(1401, 1, 1);
        state.on_day_click(d3);
        assert_eq!(state.selection(), RangeSelection::StartOnly(d3));
    }

    #[test]
    fn test_click_same_day_completes_single_day_range() {
        let mut state = empty_state();
        let day = date(1402, 7, 10);
        state.on_day_click(day);
        state.on_day_click(day);
        assert_eq!(state.selection(), RangeSelection::Complete(day, day));
    }

    #[rstest]
    #[case(None, Some(date(1402, 7, 10)))]
    #[case(Some(date(1402, 7, 10)), Some(date(1402, 7, 9)))]
    #[case(None, None)]
    fn test_invalid_pairs_clear_selection(
        #[case] start: Option<PersianDate>,
        #[case] end: Option<PersianDate>,
    ) {
        let mut state = empty_state();
        state.set_selection(Some(date(1402, 1, 1)), Some(date(1402, 2, 1)));
        state.set_selection(start, end);
        assert_eq!(state.selected_start_date(), None);
        assert_eq!(state.selected_end_date(), None);
        assert_eq!(state.selection(), RangeSelection::Empty);
    }

    #[test]
    fn test_constructor_applies_pair_rules() {
        let state = DateRangePickerState::from_args(
            DateRangePickerArgs::default()
                .initial_start_date(date(1402, 7, 10))
                .initial_end_date(date(1402, 7, 1)),
        )
        .unwrap();
        assert_eq!(state.selection(), RangeSelection::Empty);
        assert_eq!(state.displayed_anchor(), date(1402, 7, 10));
    }

    #[rstest]
    #[case(Some(date(1399, 1, 1)), None, DateRole::Start)]
    #[case(Some(date(1402, 1, 1)), Some(date(1411, 1, 1)), DateRole::End)]
    fn test_constructor_rejects_years_outside_range(
        #[case] start: Option<PersianDate>,
        #[case] end: Option<PersianDate>,
        #[case] expected: DateRole,
    ) {
        let result = DateRangePickerState::new(
            start,
            end,
            Some(date(1402, 1, 1)),
            YearRange::new(1400, 1410).unwrap(),
            DisplayMode::Picker,
            Arc::new(AllDates),
        );
        assert!(matches!(
            result,
            Err(PickerError::RangeViolation { role, .. }) if role == expected
        ));
    }

    #[test]
    fn test_display_mode_syncs_to_start() {
        let mut state = empty_state();
        state.set_selection(Some(date(1405, 3, 3)), Some(date(1406, 1, 1)));
        state.set_display_mode(DisplayMode::Input);
        assert_eq!(state.displayed_anchor(), date(1405, 3, 3));
        state.set_display_mode(DisplayMode::Input);
        assert_eq!(state.displayed_anchor(), date(1405, 3, 3));
        assert_eq!(
            state.selection(),
            RangeSelection::Complete(date(1405, 3, 3), date(1406, 1, 1))
        );
    }

    #[test]
    fn test_headline() {
        let mut state = empty_state();
        state.set_selection(Some(date(1402, 7, 15)), Some(date(1402, 7, 20)));
        assert_eq!(state.headline(), "15 مهر 1402 - 20 مهر 1402");
    }

    proptest! {
        #[test]
        fn prop_ordered_pairs_are_kept(a in date_strategy(), b in date_strategy()) {
            let (start, end) = if a <= b { (a, b) } else { (b, a) };
            let mut state = empty_state();
            state.set_selection(Some(start), Some(end));
            prop_assert_eq!(state.selected_start_date(), Some(start));
            prop_assert_eq!(state.selected_end_date(), Some(end));
        }

        #[test]
        fn prop_reversed_pairs_clear(a in date_strategy(), b in date_strategy()) {
            prop_assume!(a != b);
            let (start, end) = if a > b { (a, b) } else { (b, a) };
            let mut state = empty_state();
            state.set_selection(Some(start), Some(end));
            prop_assert_eq!(state.selection(), RangeSelection::Empty);
        }

        #[test]
        fn prop_clicks_preserve_invariant(clicks in prop::collection::vec(date_strategy(), 1..20)) {
            let mut state = empty_state();
            for click in clicks {
                state.on_day_click(click);
                match state.selection() {
                    RangeSelection::Complete(start, end) => prop_assert!(start <= end),
                    RangeSelection::StartOnly(start) => prop_assert_eq!(start, click),
                    RangeSelection::Empty => prop_assert!(false, "a click never empties the range"),
                }
            }
        }
    }
}
