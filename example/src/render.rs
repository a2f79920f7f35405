//! Plain-text rendering of picker grids.

use std::fmt::Write as _;

use persian_date_picker::month_grid::{DAYS_IN_WEEK, DayCell, GridCell, MonthGrid};

/// Draws `grid` as rows of fixed-width cells.
///
/// Markers: `[d]` selected, `(d)` today, `-d-` inside a range, `xd` disabled.
pub fn month_grid(grid: &MonthGrid<'_>) -> String {
    let mut out = format!("{}\n", grid.month());
    for (index, cell) in grid.cells().enumerate() {
        let text = match cell {
            GridCell::WeekdayLabel(weekday) => weekday.short_label().to_string(),
            GridCell::Empty => String::new(),
            GridCell::Day(day) => day_label(&day),
        };
        let _ = write!(out, "{text:>5}");
        if (index + 1) % DAYS_IN_WEEK == 0 {
            out.push('\n');
        }
    }
    if grid.cell_count() % DAYS_IN_WEEK != 0 {
        out.push('\n');
    }
    out
}

fn day_label(day: &DayCell) -> String {
    let number = day.day();
    if !day.is_selectable {
        format!("x{number}")
    } else if day.is_selected() {
        format!("[{number}]")
    } else if day.is_in_range {
        format!("-{number}-")
    } else if day.is_today {
        format!("({number})")
    } else {
        number.to_string()
    }
}
