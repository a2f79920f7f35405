mod render;

use std::sync::Arc;

use persian_calendar::PersianDate;
use persian_date_picker::{
    DatePickerArgs, DatePickerDefaults, DatePickerState, DateRangePickerArgs, DateRangePickerState,
    PickerHandle, SelectableDates, YearRange,
    date_input::{DateInputField, original_to_masked},
    months_scroll::VisibleMonthTracker,
};
use tracing::info;

/// Fridays are off.
struct WorkingDays;

impl SelectableDates for WorkingDays {
    fn is_selectable_date(&self, date: PersianDate) -> bool {
        date.weekday() != persian_calendar::PersianWeekday::Jomeh
    }
}

fn single_date_demo() -> Result<(), Box<dyn std::error::Error>> {
    let selected = PersianDate::new(1402, 7, 15)?;
    let mut state = DatePickerState::from_args(
        DatePickerArgs::default()
            .initial_selected_date(selected)
            .year_range(YearRange::new(1400, 1410)?)
            .selectable_dates(Arc::new(WorkingDays)),
    )?;
    println!("{}", DatePickerDefaults::title(state.display_mode()));
    println!("{}", state.headline());
    let grid = state.month_grid();
    info!(
        first_weekday = grid.first_weekday().display_name(),
        height = grid.container_height(DatePickerDefaults::ROW_EXTENT),
        "month grid"
    );
    print!("{}", render::month_grid(&grid));

    state.next_month();
    state.select_year(1403)?;
    info!(anchor = %state.displayed_anchor(), "navigated");
    print!("{}", render::month_grid(&state.month_grid()));

    state.toggle_display_mode();
    info!(mode = %state.display_mode(), anchor = %state.displayed_anchor(), "toggled");
    println!("{}", DatePickerDefaults::title(state.display_mode()));

    let mut field = DateInputField::new(state.selected_date());
    println!("hint: {}", field.hint());
    for typed in ["1402", "1402/07", "14021301", "99990101", "1403/12/30"] {
        let outcome = field.on_value_change(typed, &mut state);
        let cursor = original_to_masked(field.digits().len(), field.digits().len());
        println!(
            "{typed:>12} -> {:<12} cursor {cursor} {:?} {}",
            field.masked(),
            outcome,
            field.supporting_text().unwrap_or_default()
        );
    }
    println!("{}", state.headline());

    let saved = state.save();
    let restored = DatePickerState::restore(saved, Arc::new(WorkingDays))?;
    info!(?saved, restored = ?restored, "round trip");
    Ok(())
}

fn range_demo() -> Result<(), Box<dyn std::error::Error>> {
    let anchor = PersianDate::new(1402, 7, 1)?;
    let args = DateRangePickerArgs::default().initial_displayed_anchor(anchor);
    let state = DateRangePickerState::from_args(args)?;
    let handle = PickerHandle::new(state);
    handle.subscribe(|state: &DateRangePickerState| {
        info!(selection = ?state.selection(), "range changed");
    });

    for day in [12, 8, 20, 3] {
        let date = PersianDate::new(1402, 7, day)?;
        handle.with_mut(|state| state.on_day_click(date));
        println!("{}", handle.with(DateRangePickerState::headline));
    }
    let end = PersianDate::new(1402, 8, 4)?;
    handle.with_mut(|state| state.on_day_click(end));
    handle.with(|state| {
        let scroll = state.months_scroll();
        let first = scroll.initial_index(state.displayed_anchor());
        for index in first..first + 2 {
            if let Some(grid) = scroll.grid_at(index) {
                print!("{}", render::month_grid(&grid));
            }
        }
    });

    let mut tracker = VisibleMonthTracker::new();
    let index = handle.with(|state| state.months_scroll().initial_index(state.displayed_anchor()));
    handle.with_mut(|state| tracker.on_scroll(index + 5, state));
    info!(anchor = %handle.with(DateRangePickerState::displayed_anchor), "scrolled");

    let saved = handle.with(DateRangePickerState::save);
    let restored = DateRangePickerState::restore(saved, Arc::new(persian_date_picker::AllDates))?;
    info!(?saved, selection = ?restored.selection(), "round trip");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().or_else(|_| {
        tracing_subscriber::EnvFilter::try_new("off,example=info,persian_date_picker=debug")
    })?;
    tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    single_date_demo()?;
    range_demo()?;
    Ok(())
}
