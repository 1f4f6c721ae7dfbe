//! Visible date window and calendar headers.
//!
//! The calendar shows a run of whole ISO weeks centred on a pivot Monday.
//! [`get_calendar_data`] computes the window bounds and the year / month /
//! week header rows that cover it, plus the column of the current week.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::error::CoreError;
use crate::period::{CalendarConfig, PeriodType};

// ---------------------------------------------------------------------------
// Date window
// ---------------------------------------------------------------------------

/// Inclusive `[first_monday, last_sunday]` range of visible days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub first_monday: NaiveDate,
    pub last_sunday: NaiveDate,
}

impl DateWindow {
    pub fn new(first_monday: NaiveDate, last_sunday: NaiveDate) -> Self {
        Self {
            first_monday,
            last_sunday,
        }
    }

    /// Number of day columns in the window.
    pub fn total_days(&self) -> u32 {
        let days = (self.last_sunday - self.first_monday).num_days() + 1;
        u32::try_from(days).unwrap_or(0)
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.first_monday <= day && day <= self.last_sunday
    }

    /// Whether the inclusive range `[start, end]` shares at least one day
    /// with the window.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.last_sunday && end >= self.first_monday
    }

    /// 1-based week column containing `day`, if visible.
    pub fn week_index_of(&self, day: NaiveDate) -> Option<u32> {
        if !self.contains(day) {
            return None;
        }
        let offset = (day - self.first_monday).num_days() / 7;
        u32::try_from(offset + 1).ok()
    }
}

/// `date` moved by `delta`, or a validation error when the result falls
/// outside the representable calendar.
fn shift_date(date: NaiveDate, delta: Duration) -> Result<NaiveDate, CoreError> {
    date.checked_add_signed(delta).ok_or_else(|| {
        CoreError::Validation(format!("Date {date} is outside the supported calendar range"))
    })
}

/// Monday of the ISO week containing `date`.
pub fn start_of_iso_week(date: NaiveDate) -> Result<NaiveDate, CoreError> {
    shift_date(
        date,
        Duration::days(-i64::from(date.weekday().num_days_from_monday())),
    )
}

/// Move the pivot by whole pages: `steps` windows forward (or back when
/// negative).
pub fn shift_pivot(
    current_monday: NaiveDate,
    config: &CalendarConfig,
    period_type: Option<PeriodType>,
    steps: i32,
) -> Result<NaiveDate, CoreError> {
    let weeks = i64::from(config.column_count(period_type)) * i64::from(steps);
    shift_date(current_monday, Duration::weeks(weeks))
}

// ---------------------------------------------------------------------------
// Headers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearHeader {
    pub value: i32,
    pub days_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthHeader {
    /// Full month name, e.g. `January`.
    pub value: String,
    pub month: u32,
    pub year: i32,
    pub days_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekHeader {
    /// Two-digit day of month of the week's Monday.
    pub value: String,
    pub monday: NaiveDate,
    pub month: u32,
    pub year: i32,
}

/// Header rows. Years and months are attributed by each week's Monday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CalendarHeaders {
    pub years: Vec<YearHeader>,
    pub months: Vec<MonthHeader>,
    pub weeks: Vec<WeekHeader>,
}

impl CalendarHeaders {
    fn push_week(&mut self, monday: NaiveDate) {
        let (year, month) = (monday.year(), monday.month());

        match self.years.last_mut() {
            Some(last) if last.value == year => last.days_count += 7,
            _ => self.years.push(YearHeader {
                value: year,
                days_count: 7,
            }),
        }

        match self.months.last_mut() {
            Some(last) if last.year == year && last.month == month => last.days_count += 7,
            _ => self.months.push(MonthHeader {
                value: monday.format("%B").to_string(),
                month,
                year,
                days_count: 7,
            }),
        }

        self.weeks.push(WeekHeader {
            value: monday.format("%d").to_string(),
            monday,
            month,
            year,
        });
    }
}

// ---------------------------------------------------------------------------
// Calendar data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarData {
    pub headers: CalendarHeaders,
    /// 1-based week column holding today, `None` when today is off-screen.
    pub current_week_index: Option<u32>,
    pub first_monday: NaiveDate,
    pub last_sunday: NaiveDate,
    pub period_type: Option<PeriodType>,
}

impl CalendarData {
    pub fn window(&self) -> DateWindow {
        DateWindow::new(self.first_monday, self.last_sunday)
    }

    pub fn total_days(&self) -> u32 {
        self.window().total_days()
    }

    /// 1-based week column containing `day`, if visible.
    pub fn week_index_of(&self, day: NaiveDate) -> Option<u32> {
        self.window().week_index_of(day)
    }
}

/// Compute the visible window around `current_monday`.
///
/// `current_monday` must already be a Monday (see [`start_of_iso_week`]);
/// the pivot lands on column `config.pivot_offset(period_type)`. Fails
/// when the window, or the day after it, cannot be represented.
pub fn get_calendar_data(
    config: &CalendarConfig,
    current_monday: NaiveDate,
    period_type: Option<PeriodType>,
    today: NaiveDate,
) -> Result<CalendarData, CoreError> {
    let columns = config.column_count(period_type).max(1);
    let first_monday = shift_date(
        current_monday,
        Duration::weeks(-i64::from(config.pivot_offset(period_type))),
    )?;
    let last_sunday = shift_date(first_monday, Duration::days(i64::from(columns) * 7 - 1))?;
    // Cell builders step one day past the window.
    shift_date(last_sunday, Duration::days(1))?;
    let today_monday = start_of_iso_week(today).ok();

    let mut headers = CalendarHeaders::default();
    let mut current_week_index = None;

    for column in 0..columns {
        let monday = first_monday + Duration::weeks(i64::from(column));
        headers.push_week(monday);
        if Some(monday) == today_monday {
            current_week_index = Some(column + 1);
        }
    }

    Ok(CalendarData {
        headers,
        current_week_index,
        first_monday,
        last_sunday,
        period_type,
    })
}
