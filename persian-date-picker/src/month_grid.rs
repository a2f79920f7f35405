//! Month grid layout: weekday labels, leading placeholders, then one cell
//! per day.

use persian_calendar::{CalendarMath, PersianDate, PersianWeekday, YearMonth};

use crate::{
    calendar_view::CalendarViewState,
    selectable_dates::{SelectableDates, is_date_selectable},
    year_range::YearRange,
};

/// Columns of the grid, one per weekday.
pub const DAYS_IN_WEEK: usize = 7;

/// The selection a grid highlights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridSelection {
    /// A single-date picker's selection.
    Single(Option<PersianDate>),
    /// A range picker's ends.
    Range {
        /// Start of the range.
        start: Option<PersianDate>,
        /// End of the range.
        end: Option<PersianDate>,
    },
}

impl Default for GridSelection {
    fn default() -> Self {
        GridSelection::Single(None)
    }
}

/// One cell of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    /// Column header.
    WeekdayLabel(PersianWeekday),
    /// Placeholder before day 1.
    Empty,
    /// A day of the month.
    Day(DayCell),
}

/// A day cell and the flags the renderer paints from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    /// The date of this cell.
    pub date: PersianDate,
    /// The date is today in the system time zone.
    pub is_today: bool,
    /// The date is the selected date or the range start.
    pub is_start: bool,
    /// The date is the range end.
    pub is_end: bool,
    /// The date lies strictly between the range ends.
    pub is_in_range: bool,
    /// The date is the day after the range start.
    pub is_after_start: bool,
    /// The date is the day before the range end.
    pub is_before_end: bool,
    /// The date can be clicked.
    pub is_selectable: bool,
}

impl DayCell {
    /// Whether the cell is drawn as selected.
    pub fn is_selected(&self) -> bool {
        self.is_start || self.is_end
    }

    /// Day of the month.
    pub fn day(&self) -> u8 {
        self.date.day()
    }
}

/// Cells of one month, derived on demand and never cached.
///
/// Layout: 7 weekday labels in Saturday-first order, `first_weekday - 1`
/// empty cells, then days `1..=month_length`.
#[derive(Clone, Copy)]
pub struct MonthGrid<'a> {
    month: YearMonth,
    selection: GridSelection,
    year_range: YearRange,
    selectable_dates: &'a dyn SelectableDates,
    today: PersianDate,
    first_weekday: PersianWeekday,
    month_length: u8,
    after_start: Option<PersianDate>,
    before_end: Option<PersianDate>,
}

impl<'a> MonthGrid<'a> {
    /// Derives the grid of `month`. "Today" comes from `calendar` in the
    /// system time zone.
    pub fn new(
        month: YearMonth,
        calendar: &dyn CalendarMath,
        selection: GridSelection,
        year_range: YearRange,
        selectable_dates: &'a dyn SelectableDates,
    ) -> Self {
        let first_weekday = month
            .first_day()
            .map_or(PersianWeekday::Unknown, |first| calendar.weekday_of(first));
        let (after_start, before_end) = match selection {
            GridSelection::Single(_) => (None, None),
            GridSelection::Range { start, end } => (
                start.and_then(|start| start.plus_days(1).ok()),
                end.and_then(|end| end.plus_days(-1).ok()),
            ),
        };
        Self {
            month,
            selection,
            year_range,
            selectable_dates,
            today: calendar.today_local(),
            first_weekday,
            month_length: calendar.month_length(month.year(), month.month()),
            after_start,
            before_end,
        }
    }

    /// Derives the grid of `month` with the view's calendar, range and policy.
    pub fn for_view(
        month: YearMonth,
        view: &'a CalendarViewState,
        selection: GridSelection,
    ) -> Self {
        Self::new(
            month,
            view.calendar().as_ref(),
            selection,
            view.year_range(),
            view.selectable_dates().as_ref(),
        )
    }

    /// Overrides the date flagged as today.
    pub fn with_today(mut self, today: PersianDate) -> Self {
        self.today = today;
        self
    }

    /// The month this grid shows.
    pub fn month(&self) -> YearMonth {
        self.month
    }

    /// Weekday of day 1.
    pub fn first_weekday(&self) -> PersianWeekday {
        self.first_weekday
    }

    /// Number of days in the month.
    pub fn month_length(&self) -> u8 {
        self.month_length
    }

    /// Empty cells between the labels and day 1. Zero when the weekday of
    /// day 1 is unknown.
    pub fn leading_empty(&self) -> usize {
        usize::from(self.first_weekday.number().saturating_sub(1))
    }

    /// Total number of cells, labels included.
    pub fn cell_count(&self) -> usize {
        DAYS_IN_WEEK + self.leading_empty() + usize::from(self.month_length)
    }

    /// Number of rows, labels included.
    pub fn row_count(&self) -> usize {
        self.cell_count().div_ceil(DAYS_IN_WEEK)
    }

    /// Height of a non-scrolling container holding this grid.
    pub fn container_height(&self, row_extent: f32) -> f32 {
        self.row_count() as f32 * row_extent
    }

    /// The cell at `index`, `None` past the last day.
    pub fn cell(&self, index: usize) -> Option<GridCell> {
        if index < DAYS_IN_WEEK {
            return Some(GridCell::WeekdayLabel(PersianWeekday::ALL[index]));
        }
        let index = index - DAYS_IN_WEEK;
        let leading = self.leading_empty();
        if index < leading {
            return Some(GridCell::Empty);
        }
        let day = u8::try_from(index - leading + 1).ok()?;
        if day > self.month_length {
            return None;
        }
        // A provider claiming more days than the month has yields
        // placeholders instead of invalid dates.
        Some(self.month.day(day).map_or(GridCell::Empty, |date| {
            GridCell::Day(self.day_cell(date))
        }))
    }

    /// All cells in layout order.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (0..self.cell_count()).filter_map(|index| self.cell(index))
    }

    /// Only the day cells.
    pub fn days(&self) -> impl Iterator<Item = DayCell> + '_ {
        self.cells().filter_map(|cell| match cell {
            GridCell::Day(day) => Some(day),
            _ => None,
        })
    }

    fn day_cell(&self, date: PersianDate) -> DayCell {
        let (is_start, is_end, is_in_range) = match self.selection {
            GridSelection::Single(selected) => (selected == Some(date), false, false),
            GridSelection::Range { start, end } => (
                start == Some(date),
                end == Some(date),
                matches!((start, end), (Some(start), Some(end)) if start < date && date < end),
            ),
        };
        DayCell {
            date,
            is_today: date == self.today,
            is_start,
            is_end,
            is_in_range,
            is_after_start: self.after_start == Some(date),
            is_before_end: self.before_end == Some(date),
            is_selectable: is_date_selectable(date, &self.year_range, self.selectable_dates),
        }
    }
}

impl std::fmt::Debug for MonthGrid<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonthGrid")
            .field("month", &self.month)
            .field("selection", &self.selection)
            .field("first_weekday", &self.first_weekday)
            .field("month_length", &self.month_length)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::FixedOffset;
    use persian_calendar::{CalendarError, JalaliCalendar};

    use super::*;
    use crate::{defaults::DatePickerDefaults, selectable_dates::AllDates};

    /// Jalali math with a pinned "today" and an optional forced weekday for day 1.
    pub(crate) struct FixedCalendar {
        pub(crate) today: PersianDate,
        pub(crate) first_weekday: Option<PersianWeekday>,
    }

    impl FixedCalendar {
        pub(crate) fn new(today: PersianDate) -> Self {
            Self {
                today,
                first_weekday: None,
            }
        }
    }

    impl CalendarMath for FixedCalendar {
        fn month_length(&self, year: i32, month: u8) -> u8 {
            JalaliCalendar.month_length(year, month)
        }

        fn weekday_of(&self, date: PersianDate) -> PersianWeekday {
            match self.first_weekday {
                Some(weekday) if date.day() == 1 => weekday,
                _ => JalaliCalendar.weekday_of(date),
            }
        }

        fn is_leap_year(&self, year: i32) -> bool {
            JalaliCalendar.is_leap_year(year)
        }

        fn today(&self, _offset: FixedOffset) -> PersianDate {
            self.today
        }

        fn to_epoch_millis(&self, date: PersianDate) -> i64 {
            JalaliCalendar.to_epoch_millis(date)
        }

        fn from_epoch_millis(
            &self,
            millis: i64,
            offset: FixedOffset,
        ) -> Result<PersianDate, CalendarError> {
            JalaliCalendar.from_epoch_millis(millis, offset)
        }

        fn system_offset(&self) -> FixedOffset {
            FixedOffset::east_opt(0).unwrap()
        }
    }

    fn date(year: i32, month: u8, day: u8) -> PersianDate {
        PersianDate::new(year, month, day).unwrap()
    }

    fn grid<'a>(
        month: YearMonth,
        calendar: &FixedCalendar,
        selection: GridSelection,
        policy: &'a dyn SelectableDates,
    ) -> MonthGrid<'a> {
        MonthGrid::new(month, calendar, selection, YearRange::default(), policy)
    }

    #[test]
    fn test_grid_with_two_leading_placeholders() {
        let calendar = FixedCalendar {
            today: date(1402, 1, 1),
            first_weekday: Some(PersianWeekday::from_number(3)),
        };
        let grid = grid(
            YearMonth::new(1402, 1).unwrap(),
            &calendar,
            GridSelection::default(),
            &AllDates,
        );
        assert_eq!(grid.month_length(), 31);
        assert_eq!(grid.leading_empty(), 2);
        assert_eq!(grid.cell_count(), 40);
        assert_eq!(grid.row_count(), 6);
        assert_eq!(grid.container_height(DatePickerDefaults::ROW_EXTENT), 288.0);

        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), 40);
        assert_eq!(cells[0], GridCell::WeekdayLabel(PersianWeekday::Shanbeh));
        assert_eq!(cells[6], GridCell::WeekdayLabel(PersianWeekday::Jomeh));
        assert_eq!(&cells[7..9], &[GridCell::Empty, GridCell::Empty]);
        assert!(matches!(cells[9], GridCell::Day(day) if day.day() == 1));
        assert!(matches!(cells[39], GridCell::Day(day) if day.day() == 31));
        assert_eq!(grid.cell(40), None);
    }

    #[test]
    fn test_unknown_weekday_means_no_placeholders() {
        let calendar = FixedCalendar {
            today: date(1402, 1, 1),
            first_weekday: Some(PersianWeekday::Unknown),
        };
        let grid = grid(
            YearMonth::new(1402, 12).unwrap(),
            &calendar,
            GridSelection::default(),
            &AllDates,
        );
        assert_eq!(grid.leading_empty(), 0);
        assert_eq!(grid.cell_count(), 7 + 29);
        assert_eq!(grid.row_count(), 6);
        assert!(
            grid.cells()
                .take(7)
                .all(|cell| matches!(cell, GridCell::WeekdayLabel(w) if !w.is_unknown()))
        );
    }

    #[test]
    fn test_real_weekday_placement() {
        // 1402/07/01 is a Saturday, so day 1 sits right under the labels.
        let calendar = FixedCalendar::new(date(1402, 7, 15));
        let grid = grid(
            YearMonth::new(1402, 7).unwrap(),
            &calendar,
            GridSelection::default(),
            &AllDates,
        );
        assert_eq!(grid.first_weekday(), PersianWeekday::Shanbeh);
        assert_eq!(grid.leading_empty(), 0);
        assert_eq!(grid.row_count(), 6);
        let today: Vec<_> = grid.days().filter(|day| day.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, date(1402, 7, 15));
    }

    #[test]
    fn test_range_flags() {
        let calendar = FixedCalendar::new(date(1402, 1, 1));
        let selection = GridSelection::Range {
            start: Some(date(1402, 7, 10)),
            end: Some(date(1402, 7, 14)),
        };
        let grid = grid(YearMonth::new(1402, 7).unwrap(), &calendar, selection, &AllDates);
        let days: Vec<_> = grid.days().collect();
        let day = |d: usize| days[d - 1];

        assert!(day(10).is_start && day(10).is_selected() && !day(10).is_in_range);
        assert!(day(11).is_after_start && day(11).is_in_range);
        assert!(day(12).is_in_range);
        assert!(day(13).is_before_end && day(13).is_in_range);
        assert!(day(14).is_end && day(14).is_selected());
        assert!(!day(9).is_in_range && !day(15).is_in_range);
        assert_eq!(days.iter().filter(|d| d.is_in_range).count(), 3);
    }

    #[test]
    fn test_start_only_range_has_no_span() {
        let calendar = FixedCalendar::new(date(1402, 1, 1));
        let selection = GridSelection::Range {
            start: Some(date(1402, 7, 10)),
            end: None,
        };
        let grid = grid(YearMonth::new(1402, 7).unwrap(), &calendar, selection, &AllDates);
        assert_eq!(grid.days().filter(|d| d.is_selected()).count(), 1);
        assert_eq!(grid.days().filter(|d| d.is_in_range).count(), 0);
    }

    #[test]
    fn test_single_selection_has_no_range_edges() {
        let calendar = FixedCalendar::new(date(1402, 1, 1));
        let grid = grid(
            YearMonth::new(1402, 7).unwrap(),
            &calendar,
            GridSelection::Single(Some(date(1402, 7, 10))),
            &AllDates,
        );
        let selected: Vec<_> = grid.days().filter(|d| d.is_selected()).collect();
        assert_eq!(selected.len(), 1);
        assert!(grid.days().all(|d| !d.is_after_start && !d.is_before_end));
    }

    #[test]
    fn test_year_veto_disables_every_day() {
        struct No1402;
        impl SelectableDates for No1402 {
            fn is_selectable_year(&self, year: i32) -> bool {
                year != 1402
            }
        }

        let calendar = FixedCalendar::new(date(1402, 1, 1));
        let grid = grid(
            YearMonth::new(1402, 7).unwrap(),
            &calendar,
            GridSelection::default(),
            &No1402,
        );
        assert!(grid.days().all(|d| !d.is_selectable));
    }

    #[test]
    fn test_range_crossing_months() {
        let calendar = FixedCalendar::new(date(1402, 1, 1));
        let selection = GridSelection::Range {
            start: Some(date(1402, 6, 31)),
            end: Some(date(1402, 8, 1)),
        };
        let grid = grid(YearMonth::new(1402, 7).unwrap(), &calendar, selection, &AllDates);
        assert!(grid.days().all(|d| d.is_in_range));
        assert!(grid.days().next().unwrap().is_after_start);
        assert!(grid.days().last().unwrap().is_before_end);
    }
}
