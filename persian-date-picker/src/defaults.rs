use std::sync::Arc;

use persian_calendar::{JalaliCalendar, PersianDate};

use crate::{
    calendar_view::SharedCalendar,
    display_mode::DisplayMode,
    selectable_dates::{AllDates, SelectableDates},
    year_range::YearRange,
};

/// Defaults for date picker behavior and headline text.
pub struct DatePickerDefaults;

impl DatePickerDefaults {
    /// Default selectable year range.
    pub const YEAR_RANGE: YearRange = YearRange::new_unchecked(1300, 1499);

    /// Height of one grid row, in density-independent pixels.
    pub const ROW_EXTENT: f32 = 48.0;

    /// Separator shown between the parts of a typed date.
    pub const INPUT_SEPARATOR: char = '/';

    /// Placeholder shown in an empty date field.
    pub const INPUT_HINT: &'static str = "yyyy/mm/dd";

    /// Returns a selectable-dates policy that allows every date.
    pub fn all_dates() -> Arc<dyn SelectableDates> {
        Arc::new(AllDates)
    }

    /// Returns the standard Jalali calendar math.
    pub fn calendar() -> SharedCalendar {
        Arc::new(JalaliCalendar)
    }

    /// Title for the current mode.
    pub fn title(mode: DisplayMode) -> &'static str {
        match mode {
            DisplayMode::Picker => "انتخاب تاریخ",
            DisplayMode::Input => "ورود تاریخ",
        }
    }

    /// Headline of the single-date picker: the selected date in long form,
    /// or a mode-specific prompt.
    pub fn headline(selected: Option<PersianDate>, mode: DisplayMode) -> String {
        let prompt = match mode {
            DisplayMode::Picker => "تاریخ را انتخاب کنید",
            DisplayMode::Input => "تاریخ را وارد کنید",
        };
        selected.map_or_else(|| prompt.to_string(), |date| date.format_long())
    }

    /// Headline of the range picker, `start - end` with placeholders for
    /// missing ends.
    pub fn range_headline(start: Option<PersianDate>, end: Option<PersianDate>) -> String {
        let start = start.map_or_else(|| "تاریخ شروع".to_string(), |date| date.format_long());
        let end = end.map_or_else(|| "تاریخ پایان".to_string(), |date| date.format_long());
        format!("{start} - {end}")
    }
}
