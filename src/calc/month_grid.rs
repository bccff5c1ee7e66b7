use crate::calc::time::sorted_for_display;
use crate::data::{Event, EventStore};
use chrono::{Datelike, NaiveDate};

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One cell of the month grid. `events` is a time-sorted copy of the day's
/// list; the storage order in the EventStore is untouched.
#[derive(Clone, Debug)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day: u32,
    /// Day belongs to the previous or next month, present only to fill out
    /// whole weeks.
    pub outside: bool,
    pub today: bool,
    pub events: Vec<Event>,
}

/// Declarative description of the visible month: always a whole number of
/// seven-day weeks, with leading/trailing cells from the adjacent months.
#[derive(Clone, Debug)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }

    pub fn weeks(&self) -> usize {
        self.cells.len() / 7
    }
}

/// Canonical date-key derivation. Uses the date's own calendar fields; no
/// UTC conversion is involved anywhere, so the key written on save is always
/// the key looked up when the grid is built.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Builds the grid for the month containing `viewed`.
pub fn build_month_grid(viewed: NaiveDate, today: NaiveDate, store: &EventStore) -> MonthGrid {
    let year = viewed.year();
    let month = viewed.month();
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    let start_dow = first_of_month.weekday().num_days_from_sunday();
    let days = days_in_month(year, month);

    let prev_first = add_months(first_of_month, -1);
    let prev_days = days_in_month(prev_first.year(), prev_first.month());
    let next_first = add_months(first_of_month, 1);

    let total_cells = (start_dow + days).div_ceil(7) * 7;

    let mut cells = Vec::with_capacity(total_cells as usize);
    for i in 0..total_cells {
        let offset = i as i32 - start_dow as i32 + 1;
        let (day, date, outside) = if offset <= 0 {
            let day = (prev_days as i32 + offset) as u32;
            let date =
                NaiveDate::from_ymd_opt(prev_first.year(), prev_first.month(), day).unwrap();
            (day, date, true)
        } else if offset > days as i32 {
            let day = (offset - days as i32) as u32;
            let date =
                NaiveDate::from_ymd_opt(next_first.year(), next_first.month(), day).unwrap();
            (day, date, true)
        } else {
            let day = offset as u32;
            (day, NaiveDate::from_ymd_opt(year, month, day).unwrap(), false)
        };

        cells.push(DayCell {
            date,
            day,
            outside,
            today: date == today,
            events: sorted_for_display(store.get(&date_key(date))),
        });
    }

    MonthGrid { year, month, cells }
}

// ── Calendar helpers ──────────────────────────────────────────────────────────

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap()
        .signed_duration_since(NaiveDate::from_ymd_opt(year, month, 1).unwrap())
        .num_days() as u32
}

/// Adds `months` (may be negative) to a date, rolling the year over and
/// clamping the day to the target month's length.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let year = date.year();
    let month = date.month() as i32;
    let new_total = month - 1 + months;
    let new_month = ((new_total % 12 + 12) % 12 + 1) as u32;
    let year_delta = new_total.div_euclid(12);
    let new_year = year + year_delta;
    let max_day = days_in_month(new_year, new_month);
    let new_day = date.day().min(max_day);
    NaiveDate::from_ymd_opt(new_year, new_month, new_day).unwrap_or(date)
}
