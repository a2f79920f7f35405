//! Selection state for Persian (Jalali) date and date-range pickers.
//!
//! The crate holds everything a picker UI needs short of drawing it: the
//! single-date and range states with their validation rules, the month grid
//! a renderer paints from, the continuous month list of the range picker,
//! typed-input parsing with its `yyyy/mm/dd` mask, and flat tuples for
//! persisting state across reloads.
//!
//! # Example
//!
//! ```
//! use persian_calendar::PersianDate;
//! use persian_date_picker::{
//!     DateRangePickerArgs, DateRangePickerState, RangeSelection, month_grid::GridCell,
//! };
//!
//! let start = PersianDate::new(1402, 7, 10).unwrap();
//! let end = PersianDate::new(1402, 7, 14).unwrap();
//!
//! let args = DateRangePickerArgs::default().initial_displayed_anchor(start);
//! let mut state = DateRangePickerState::from_args(args).unwrap();
//! state.on_day_click(start);
//! state.on_day_click(end);
//! assert_eq!(state.selection(), RangeSelection::Complete(start, end));
//!
//! let in_range = state
//!     .month_grid()
//!     .cells()
//!     .filter(|cell| matches!(cell, GridCell::Day(day) if day.is_in_range))
//!     .count();
//! assert_eq!(in_range, 3);
//! ```

pub mod calendar_view;
pub mod date_input;
pub mod date_picker_state;
pub mod date_range_picker_state;
pub mod defaults;
pub mod display_mode;
pub mod error;
pub mod handle;
pub mod month_grid;
pub mod months_scroll;
pub mod saver;
pub mod selectable_dates;
pub mod year_range;

pub use calendar_view::{CalendarViewState, SharedCalendar, YearItem};
pub use date_picker_state::{DatePickerArgs, DatePickerState};
pub use date_range_picker_state::{DateRangePickerArgs, DateRangePickerState, RangeSelection};
pub use defaults::DatePickerDefaults;
pub use display_mode::DisplayMode;
pub use error::{DateRole, ParseError, PickerError};
pub use handle::PickerHandle;
pub use selectable_dates::{AllDates, SelectableDates};
pub use year_range::YearRange;
