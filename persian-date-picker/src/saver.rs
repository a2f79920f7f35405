//! Flat tuples for persisting picker state across reloads.
//!
//! Dates are stored as epoch milliseconds at midnight UTC and restored with
//! a UTC offset, so a round trip yields the same day everywhere. Restoring
//! goes through the validating constructors: a tuple that could not have
//! been built live fails the same way.

use std::sync::Arc;

use chrono::{FixedOffset, Offset, Utc};
use persian_calendar::{CalendarMath, PersianDate};

use crate::{
    calendar_view::SharedCalendar,
    date_picker_state::{DatePickerArgs, DatePickerState},
    date_range_picker_state::{DateRangePickerArgs, DateRangePickerState},
    defaults::DatePickerDefaults,
    display_mode::DisplayMode,
    error::PickerError,
    selectable_dates::SelectableDates,
    year_range::YearRange,
};

/// `(selected, anchor, first_year, last_year, display_mode)`.
pub type DatePickerSaved = (Option<i64>, i64, i32, i32, i32);

/// `(start, end, anchor, first_year, last_year, display_mode)`.
pub type DateRangePickerSaved = (Option<i64>, Option<i64>, i64, i32, i32, i32);

fn utc() -> FixedOffset {
    Utc.fix()
}

fn decode(calendar: &dyn CalendarMath, millis: i64) -> Result<PersianDate, PickerError> {
    Ok(calendar.from_epoch_millis(millis, utc())?)
}

fn decode_optional(
    calendar: &dyn CalendarMath,
    millis: Option<i64>,
) -> Result<Option<PersianDate>, PickerError> {
    millis.map(|millis| decode(calendar, millis)).transpose()
}

impl DatePickerState {
    /// Flattens the state for persistence. The selectable-dates policy is
    /// not part of it.
    pub fn save(&self) -> DatePickerSaved {
        let calendar = self.view().calendar();
        let range = self.year_range();
        (
            self.selected_date()
                .map(|date| calendar.to_epoch_millis(date)),
            calendar.to_epoch_millis(self.displayed_anchor()),
            range.first(),
            range.last(),
            self.display_mode().value(),
        )
    }

    /// Rebuilds a state saved with [`save`](Self::save).
    pub fn restore(
        saved: DatePickerSaved,
        selectable_dates: Arc<dyn SelectableDates>,
    ) -> Result<Self, PickerError> {
        Self::restore_with_calendar(saved, selectable_dates, DatePickerDefaults::calendar())
    }

    /// Rebuilds a state with a specific calendar.
    pub fn restore_with_calendar(
        (selected, anchor, first, last, mode): DatePickerSaved,
        selectable_dates: Arc<dyn SelectableDates>,
        calendar: SharedCalendar,
    ) -> Result<Self, PickerError> {
        let math = calendar.as_ref();
        let args = DatePickerArgs {
            initial_selected_date: decode_optional(math, selected)?,
            initial_displayed_anchor: Some(decode(math, anchor)?),
            year_range: YearRange::new(first, last)?,
            display_mode: DisplayMode::from_value(mode)?,
            selectable_dates,
            calendar,
        };
        Self::from_args(args)
    }
}

impl DateRangePickerState {
    /// Flattens the state for persistence. The selectable-dates policy is
    /// not part of it.
    pub fn save(&self) -> DateRangePickerSaved {
        let calendar = self.view().calendar();
        let range = self.year_range();
        (
            self.selected_start_date()
                .map(|date| calendar.to_epoch_millis(date)),
            self.selected_end_date()
                .map(|date| calendar.to_epoch_millis(date)),
            calendar.to_epoch_millis(self.displayed_anchor()),
            range.first(),
            range.last(),
            self.display_mode().value(),
        )
    }

    /// Rebuilds a state saved with [`save`](Self::save).
    pub fn restore(
        saved: DateRangePickerSaved,
        selectable_dates: Arc<dyn SelectableDates>,
    ) -> Result<Self, PickerError> {
        Self::restore_with_calendar(saved, selectable_dates, DatePickerDefaults::calendar())
    }

    /// Rebuilds a state with a specific calendar.
    pub fn restore_with_calendar(
        (start, end, anchor, first, last, mode): DateRangePickerSaved,
        selectable_dates: Arc<dyn SelectableDates>,
        calendar: SharedCalendar,
    ) -> Result<Self, PickerError> {
        let math = calendar.as_ref();
        let args = DateRangePickerArgs {
            initial_start_date: decode_optional(math, start)?,
            initial_end_date: decode_optional(math, end)?,
            initial_displayed_anchor: Some(decode(math, anchor)?),
            year_range: YearRange::new(first, last)?,
            display_mode: DisplayMode::from_value(mode)?,
            selectable_dates,
            calendar,
        };
        Self::from_args(args)
    }
}

/// Named form of [`DatePickerSaved`] for serializers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedDatePicker {
    /// Selected date, epoch milliseconds.
    pub selected: Option<i64>,
    /// Displayed anchor, epoch milliseconds.
    pub anchor: i64,
    /// First year of the range.
    pub first_year: i32,
    /// Last year of the range.
    pub last_year: i32,
    /// Persisted display mode value.
    pub display_mode: i32,
}

impl From<DatePickerSaved> for SavedDatePicker {
    fn from((selected, anchor, first_year, last_year, display_mode): DatePickerSaved) -> Self {
        Self {
            selected,
            anchor,
            first_year,
            last_year,
            display_mode,
        }
    }
}

impl From<SavedDatePicker> for DatePickerSaved {
    fn from(saved: SavedDatePicker) -> Self {
        (
            saved.selected,
            saved.anchor,
            saved.first_year,
            saved.last_year,
            saved.display_mode,
        )
    }
}

/// Named form of [`DateRangePickerSaved`] for serializers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedDateRangePicker {
    /// Range start, epoch milliseconds.
    pub start: Option<i64>,
    /// Range end, epoch milliseconds.
    pub end: Option<i64>,
    /// Displayed anchor, epoch milliseconds.
    pub anchor: i64,
    /// First year of the range.
    pub first_year: i32,
    /// Last year of the range.
    pub last_year: i32,
    /// Persisted display mode value.
    pub display_mode: i32,
}

impl From<DateRangePickerSaved> for SavedDateRangePicker {
    fn from(
        (start, end, anchor, first_year, last_year, display_mode): DateRangePickerSaved,
    ) -> Self {
        Self {
            start,
            end,
            anchor,
            first_year,
            last_year,
            display_mode,
        }
    }
}

impl From<SavedDateRangePicker> for DateRangePickerSaved {
    fn from(saved: SavedDateRangePicker) -> Self {
        (
            saved.start,
            saved.end,
            saved.anchor,
            saved.first_year,
            saved.last_year,
            saved.display_mode,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{date_range_picker_state::RangeSelection, selectable_dates::AllDates};

    fn date(year: i32, month: u8, day: u8) -> PersianDate {
        PersianDate::new(year, month, day).unwrap()
    }

    #[test]
    fn test_single_state_round_trip() {
        let state = DatePickerState::new(
            Some(date(1402, 7, 15)),
            Some(date(1403, 12, 30)),
            YearRange::new(1400, 1410).unwrap(),
            DisplayMode::Input,
            Arc::new(AllDates),
        )
        .unwrap();
        let saved = state.save();
        assert_eq!(
            saved,
            (
                Some(1_696_636_800_000),
                date(1403, 12, 30).to_epoch_millis(),
                1400,
                1410,
                1
            )
        );

        let restored = DatePickerState::restore(saved, Arc::new(AllDates)).unwrap();
        assert_eq!(restored.selected_date(), state.selected_date());
        assert_eq!(restored.displayed_anchor(), state.displayed_anchor());
        assert_eq!(restored.year_range(), state.year_range());
        assert_eq!(restored.display_mode(), DisplayMode::Input);
    }

    #[test]
    fn test_range_state_round_trip() {
        let state = DateRangePickerState::new(
            Some(date(1402, 7, 10)),
            Some(date(1402, 8, 2)),
            None,
            YearRange::default(),
            DisplayMode::Picker,
            Arc::new(AllDates),
        )
        .unwrap();
        let restored = DateRangePickerState::restore(state.save(), Arc::new(AllDates)).unwrap();
        assert_eq!(
            restored.selection(),
            RangeSelection::Complete(date(1402, 7, 10), date(1402, 8, 2))
        );
        assert_eq!(restored.displayed_anchor(), date(1402, 7, 10));
    }

    #[test]
    fn test_restore_rejects_year_outside_saved_range() {
        let anchor = date(1399, 1, 1).to_epoch_millis();
        let result = DatePickerState::restore((None, anchor, 1400, 1410, 0), Arc::new(AllDates));
        assert!(matches!(
            result,
            Err(PickerError::RangeViolation { year: 1399, .. })
        ));

        let start = Some(date(1411, 1, 1).to_epoch_millis());
        let anchor = date(1405, 1, 1).to_epoch_millis();
        let result = DateRangePickerState::restore(
            (start, None, anchor, 1400, 1410, 0),
            Arc::new(AllDates),
        );
        assert!(matches!(
            result,
            Err(PickerError::RangeViolation { year: 1411, .. })
        ));
    }

    #[test]
    fn test_restore_rejects_bad_fields() {
        let anchor = date(1405, 1, 1).to_epoch_millis();
        assert_eq!(
            DatePickerState::restore((None, anchor, 1410, 1400, 0), Arc::new(AllDates)).err(),
            Some(PickerError::InvalidYearRange {
                first: 1410,
                last: 1400
            })
        );
        assert_eq!(
            DatePickerState::restore((None, anchor, 1400, 1410, 5), Arc::new(AllDates)).err(),
            Some(PickerError::UnknownDisplayMode { value: 5 })
        );
        assert!(matches!(
            DatePickerState::restore((None, i64::MAX, 1400, 1410, 0), Arc::new(AllDates)),
            Err(PickerError::Calendar(_))
        ));
    }

    #[test]
    fn test_named_form_converts_both_ways() {
        let saved: DateRangePickerSaved = (Some(1), None, 2, 1300, 1499, 0);
        let named = SavedDateRangePicker::from(saved);
        assert_eq!(named.anchor, 2);
        assert_eq!(DateRangePickerSaved::from(named), saved);
    }
}
