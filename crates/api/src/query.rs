//! Shared query parameter types for API handlers.

use chrono::NaiveDate;
use polio_calendar_core::period::PeriodType;
use serde::Deserialize;

/// Calendar window selection (`?date=&period=`).
///
/// `date` may be any day; handlers snap it to the Monday of its ISO week and
/// fall back to today when absent.
#[derive(Debug, Default, Deserialize)]
pub struct CalendarParams {
    pub date: Option<NaiveDate>,
    pub period: Option<PeriodType>,
}
