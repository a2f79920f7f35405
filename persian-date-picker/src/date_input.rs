//! Typed date entry: digit filtering, parsing, the `yyyy/mm/dd` mask and
//! cursor mapping between raw and masked text.

use std::{ops::RangeInclusive, str::FromStr};

use persian_calendar::PersianDate;
use tracing::debug;

use crate::{
    date_picker_state::DatePickerState, date_range_picker_state::DateRangePickerState,
    defaults::DatePickerDefaults, error::ParseError,
};

/// Digits of a complete entry, `yyyymmdd`.
pub const INPUT_LENGTH: usize = 8;

/// Years the parser accepts, independent of any picker's year range.
pub const SUPPORTED_INPUT_YEARS: RangeInclusive<i32> = 1300..=1500;

const YEAR_END: usize = 4;
const MONTH_END: usize = 6;

/// Keeps digits, at most [`INPUT_LENGTH`] of them. Persian and
/// Arabic-Indic digits are folded to ASCII.
pub fn sanitize_input(raw: &str) -> String {
    raw.chars()
        .filter_map(ascii_digit)
        .take(INPUT_LENGTH)
        .collect()
}

fn ascii_digit(c: char) -> Option<char> {
    let value = match c {
        '0'..='9' => return Some(c),
        '\u{06F0}'..='\u{06F9}' => u32::from(c) - 0x06F0,
        '\u{0660}'..='\u{0669}' => u32::from(c) - 0x0660,
        _ => return None,
    };
    char::from_digit(value, 10)
}

/// Parses `yyyymmdd` digits.
///
/// Returns `Ok(None)` while fewer than eight digits have been typed. Anything
/// past the eighth digit is ignored, as [`sanitize_input`] would drop it.
pub fn parse_date_input(digits: &str) -> Result<Option<PersianDate>, ParseError> {
    let digits = digits.get(..INPUT_LENGTH).unwrap_or(digits);
    if digits.len() != INPUT_LENGTH {
        return Ok(None);
    }
    let year = digits
        .get(..YEAR_END)
        .and_then(parse_number::<i32>)
        .filter(|year| SUPPORTED_INPUT_YEARS.contains(year))
        .ok_or(ParseError::YearOutOfSupportedRange)?;
    let month = digits
        .get(YEAR_END..MONTH_END)
        .and_then(parse_number::<u8>)
        .ok_or(ParseError::InvalidPattern)?;
    let day = digits
        .get(MONTH_END..)
        .and_then(parse_number::<u8>)
        .ok_or(ParseError::InvalidPattern)?;
    PersianDate::new(year, month, day)
        .map(Some)
        .map_err(|_| ParseError::InvalidPattern)
}

fn parse_number<T: FromStr>(part: &str) -> Option<T> {
    if part.bytes().all(|byte| byte.is_ascii_digit()) {
        part.parse().ok()
    } else {
        None
    }
}

/// Inserts the separator after the year and the month, only once a digit
/// follows it: `"140207"` becomes `"1402/07"`. At most [`INPUT_LENGTH`]
/// digits are shown.
pub fn mask_date_input(digits: &str) -> String {
    let mut masked = String::with_capacity(INPUT_LENGTH + 2);
    for (index, digit) in digits.chars().take(INPUT_LENGTH).enumerate() {
        if index == YEAR_END || index == MONTH_END {
            masked.push(DatePickerDefaults::INPUT_SEPARATOR);
        }
        masked.push(digit);
    }
    masked
}

fn masked_length(len: usize) -> usize {
    len + usize::from(len > YEAR_END) + usize::from(len > MONTH_END)
}

/// Maps a cursor offset in the raw digits to the masked text.
pub fn original_to_masked(offset: usize, len: usize) -> usize {
    let offset = offset.min(len);
    offset + usize::from(offset > YEAR_END) + usize::from(offset > MONTH_END)
}

/// Maps a cursor offset in the masked text back to the raw digits.
pub fn masked_to_original(offset: usize, len: usize) -> usize {
    let offset = offset.min(masked_length(len));
    let original = if offset <= YEAR_END {
        offset
    } else if offset <= MONTH_END + 1 {
        offset - 1
    } else {
        offset - 2
    };
    original.min(len)
}

/// Text field state of the input mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateInputField {
    digits: String,
    value: Option<PersianDate>,
    error: Option<ParseError>,
}

impl DateInputField {
    /// Creates a field showing `initial` as `yyyymmdd`.
    pub fn new(initial: Option<PersianDate>) -> Self {
        Self {
            digits: initial.map(|date| date.format_digits()).unwrap_or_default(),
            value: initial,
            error: None,
        }
    }

    /// The raw digits.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// The digits as displayed, with separators.
    pub fn masked(&self) -> String {
        mask_date_input(&self.digits)
    }

    /// The last successfully parsed date.
    pub fn value(&self) -> Option<PersianDate> {
        self.value
    }

    /// The last parse failure.
    pub fn error(&self) -> Option<ParseError> {
        self.error
    }

    /// Whether the field is drawn in its error state.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Text shown under the field.
    pub fn supporting_text(&self) -> Option<String> {
        self.error.map(|error| error.to_string())
    }

    /// Placeholder shown while empty.
    pub fn hint(&self) -> &'static str {
        DatePickerDefaults::INPUT_HINT
    }

    /// Re-parses after an edit, without touching any picker state.
    pub fn update(&mut self, raw: &str) -> Result<Option<PersianDate>, ParseError> {
        self.digits = sanitize_input(raw);
        let parsed = parse_date_input(&self.digits);
        match parsed {
            Ok(value) => {
                self.value = value;
                self.error = None;
            }
            Err(error) => {
                debug!(digits = %self.digits, %error, "date input rejected");
                self.value = None;
                self.error = Some(error);
            }
        }
        parsed
    }

    /// Handles an edit of the single-date field: a complete valid date
    /// becomes the selection, anything else clears it.
    pub fn on_value_change(
        &mut self,
        raw: &str,
        state: &mut DatePickerState,
    ) -> Result<Option<PersianDate>, ParseError> {
        let parsed = self.update(raw);
        state.set_selected_date(self.value);
        parsed
    }
}

/// Start and end fields of the range picker's input mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRangeInputFields {
    /// Start date field.
    pub start: DateInputField,
    /// End date field.
    pub end: DateInputField,
}

impl DateRangeInputFields {
    /// Creates fields showing the state's current range.
    pub fn new(state: &DateRangePickerState) -> Self {
        Self {
            start: DateInputField::new(state.selected_start_date()),
            end: DateInputField::new(state.selected_end_date()),
        }
    }

    /// Handles an edit of the start field.
    pub fn on_start_change(
        &mut self,
        raw: &str,
        state: &mut DateRangePickerState,
    ) -> Result<Option<PersianDate>, ParseError> {
        let parsed = self.start.update(raw);
        self.apply(state);
        parsed
    }

    /// Handles an edit of the end field.
    pub fn on_end_change(
        &mut self,
        raw: &str,
        state: &mut DateRangePickerState,
    ) -> Result<Option<PersianDate>, ParseError> {
        let parsed = self.end.update(raw);
        self.apply(state);
        parsed
    }

    // The pair goes through the range rules, so a reversed pair clears.
    fn apply(&self, state: &mut DateRangePickerState) {
        state.set_selection(self.start.value(), self.end.value());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;

    use super::*;
    use crate::{
        date_range_picker_state::RangeSelection, display_mode::DisplayMode,
        selectable_dates::AllDates, year_range::YearRange,
    };

    fn date(year: i32, month: u8, day: u8) -> PersianDate {
        PersianDate::new(year, month, day).unwrap()
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_input("1402/07/15"), "14020715");
        assert_eq!(sanitize_input("14a02-0715999"), "14020715");
        assert_eq!(sanitize_input("۱۴۰۲/۰۷/۱۵"), "14020715");
        assert_eq!(sanitize_input("١٤٠٢"), "1402");
    }

    #[rstest]
    #[case("14020715", Ok(Some(date(1402, 7, 15))))]
    #[case("14031230", Ok(Some(date(1403, 12, 30))))]
    #[case("99990101", Err(ParseError::YearOutOfSupportedRange))]
    #[case("12990101", Err(ParseError::YearOutOfSupportedRange))]
    #[case("15000101", Ok(Some(date(1500, 1, 1))))]
    #[case("14021301", Err(ParseError::InvalidPattern))]
    #[case("14020731", Err(ParseError::InvalidPattern))]
    #[case("14021230", Err(ParseError::InvalidPattern))]
    #[case("14020700", Err(ParseError::InvalidPattern))]
    #[case("140207", Ok(None))]
    #[case("", Ok(None))]
    #[case("140207150", Ok(Some(date(1402, 7, 15))))]
    fn test_parse(
        #[case] digits: &str,
        #[case] expected: Result<Option<PersianDate>, ParseError>,
    ) {
        assert_eq!(parse_date_input(digits), expected);
    }

    #[test]
    fn test_parse_rejects_signs() {
        assert_eq!(
            parse_date_input("+4020715"),
            Err(ParseError::YearOutOfSupportedRange)
        );
        assert_eq!(parse_date_input("1402+715"), Err(ParseError::InvalidPattern));
    }

    #[rstest]
    #[case("", "")]
    #[case("1402", "1402")]
    #[case("14020", "1402/0")]
    #[case("140207", "1402/07")]
    #[case("1402071", "1402/07/1")]
    #[case("14020715", "1402/07/15")]
    #[case("1402071599", "1402/07/15")]
    fn test_mask(#[case] digits: &str, #[case] masked: &str) {
        assert_eq!(mask_date_input(digits), masked);
    }

    #[test]
    fn test_cursor_mapping_inverts_at_insertion_points() {
        for len in 0..=INPUT_LENGTH {
            for offset in 0..=len {
                let masked = original_to_masked(offset, len);
                assert!(masked <= mask_date_input(&"1".repeat(len)).len());
                assert_eq!(masked_to_original(masked, len), offset);
            }
        }
        assert_eq!(original_to_masked(4, 8), 4);
        assert_eq!(original_to_masked(5, 8), 6);
        assert_eq!(original_to_masked(7, 8), 9);
        assert_eq!(masked_to_original(5, 8), 4);
        assert_eq!(masked_to_original(8, 8), 6);
    }

    #[test]
    fn test_cursor_mapping_is_monotonic_and_clamped() {
        let len = 6;
        let mapped: Vec<_> = (0..=12).map(|offset| masked_to_original(offset, len)).collect();
        assert!(mapped.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(*mapped.last().unwrap(), len);
        assert_eq!(original_to_masked(20, len), masked_length(len));
    }

    #[test]
    fn test_field_drives_single_selection() {
        let mut state = DatePickerState::new(
            Some(date(1402, 1, 1)),
            None,
            YearRange::default(),
            DisplayMode::Input,
            Arc::new(AllDates),
        )
        .unwrap();
        let mut field = DateInputField::new(state.selected_date());
        assert_eq!(field.hint(), "yyyy/mm/dd");
        assert_eq!(field.digits(), "14020101");
        assert_eq!(field.masked(), "1402/01/01");

        assert_eq!(field.on_value_change("1402/07", &mut state), Ok(None));
        assert_eq!(state.selected_date(), None);
        assert!(!field.is_error());

        assert_eq!(
            field.on_value_change("14021301", &mut state),
            Err(ParseError::InvalidPattern)
        );
        assert!(field.is_error());
        assert!(field.supporting_text().is_some());
        assert_eq!(state.selected_date(), None);

        assert_eq!(
            field.on_value_change("1402/07/15", &mut state),
            Ok(Some(date(1402, 7, 15)))
        );
        assert_eq!(state.selected_date(), Some(date(1402, 7, 15)));
        assert_eq!(field.supporting_text(), None);
    }

    #[test]
    fn test_range_fields_respect_pair_rules() {
        let mut state = DateRangePickerState::new(
            None,
            None,
            Some(date(1402, 1, 1)),
            YearRange::default(),
            DisplayMode::Input,
            Arc::new(AllDates),
        )
        .unwrap();
        let mut fields = DateRangeInputFields::new(&state);

        fields.on_end_change("14020720", &mut state).unwrap();
        assert_eq!(state.selection(), RangeSelection::Empty);

        fields.on_start_change("14020710", &mut state).unwrap();
        assert_eq!(
            state.selection(),
            RangeSelection::Complete(date(1402, 7, 10), date(1402, 7, 20))
        );

        fields.on_start_change("14020725", &mut state).unwrap();
        assert_eq!(state.selection(), RangeSelection::Empty);
    }
}
