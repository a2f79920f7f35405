//! Jalali <-> Gregorian conversion.
//!
//! The conversion walks the table of years at which the 33-year leap cycle
//! realigns ("breaks"), which reproduces the official Iranian calendar for
//! every year between the first and last break.

use chrono::{Datelike, Days, NaiveDate};

const BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

/// Days of Farvardin through Shahrivar.
const FIRST_HALF_DAYS: i64 = 186;

/// Facts about one Jalali year derived from the break table.
#[derive(Debug, Clone, Copy)]
struct YearInfo {
    /// Years since the last leap year; zero means this year is leap.
    leap: i32,
    gregorian_year: i32,
    /// Day of March on which 1 Farvardin falls.
    march_day: u32,
}

fn year_info(year: i32) -> Option<YearInfo> {
    if year < BREAKS[0] || year >= BREAKS[BREAKS.len() - 1] {
        return None;
    }

    let gregorian_year = year + 621;
    let mut leap_jalali = -14;
    let mut previous_break = BREAKS[0];
    let mut jump = 0;
    for &current_break in &BREAKS[1..] {
        jump = current_break - previous_break;
        if year < current_break {
            break;
        }
        leap_jalali += jump / 33 * 8 + (jump % 33) / 4;
        previous_break = current_break;
    }

    let mut n = year - previous_break;
    leap_jalali += n / 33 * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_jalali += 1;
    }

    let leap_gregorian = gregorian_year / 4 - (gregorian_year / 100 + 1) * 3 / 4 - 150;
    let march_day = 20 + leap_jalali - leap_gregorian;

    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut leap = ((n + 1) % 33 - 1) % 4;
    if leap == -1 {
        leap = 4;
    }

    Some(YearInfo {
        leap,
        gregorian_year,
        march_day: u32::try_from(march_day).ok()?,
    })
}

/// Returns whether `year` is a leap year. Years outside the break table are
/// reported as common years.
pub(crate) fn is_leap_year(year: i32) -> bool {
    year_info(year).is_some_and(|info| info.leap == 0)
}

/// Number of days in `month`, `None` when the month does not exist.
pub(crate) fn month_length(year: i32, month: u8) -> Option<u8> {
    match month {
        1..=6 => Some(31),
        7..=11 => Some(30),
        12 if is_leap_year(year) => Some(30),
        12 => Some(29),
        _ => None,
    }
}

/// Converts a Jalali date to its Gregorian equivalent.
///
/// The caller is expected to have validated month and day.
pub(crate) fn to_gregorian(year: i32, month: u8, day: u8) -> Option<NaiveDate> {
    let info = year_info(year)?;
    let nowruz = NaiveDate::from_ymd_opt(info.gregorian_year, 3, info.march_day)?;
    let month = i64::from(month);
    let offset = (month - 1) * 31 - (month / 7) * (month - 7) + i64::from(day) - 1;
    nowruz.checked_add_days(Days::new(u64::try_from(offset).ok()?))
}

/// Converts a Gregorian date to `(year, month, day)` in the Jalali calendar.
pub(crate) fn from_gregorian(date: NaiveDate) -> Option<(i32, u8, u8)> {
    let mut year = date.year() - 621;
    let info = year_info(year)?;
    let nowruz = NaiveDate::from_ymd_opt(info.gregorian_year, 3, info.march_day)?;
    let mut days = date.signed_duration_since(nowruz).num_days();

    if days >= 0 {
        if days < FIRST_HALF_DAYS {
            return Some((year, (1 + days / 31) as u8, (days % 31 + 1) as u8));
        }
        days -= FIRST_HALF_DAYS;
    } else {
        year -= 1;
        days += 179;
        if info.leap == 1 {
            days += 1;
        }
    }

    Some((year, (7 + days / 30) as u8, (days % 30 + 1) as u8))
}
