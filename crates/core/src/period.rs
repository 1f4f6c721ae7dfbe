//! Calendar period types and column-count configuration.
//!
//! A period type only changes how many week columns the calendar shows and
//! how wide a cell must be before its label is drawn. The window itself is
//! always a run of whole ISO weeks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::threshold_validation::validate_int_range;

// ---------------------------------------------------------------------------
// Column counts
// ---------------------------------------------------------------------------

/// Week columns shown when no period type is requested.
pub const DEFAULT_WEEKS: u32 = 20;
/// Week columns for the quarter view (13 weeks plus context on both sides).
pub const QUARTER_WEEKS: u32 = 16;
/// Week columns for the semester view.
pub const SEMESTER_WEEKS: u32 = 28;
/// Week columns for the year view.
pub const YEAR_WEEKS: u32 = 54;

/// Upper bound for any configured column count (two years).
pub const MAX_COLUMN_WEEKS: u32 = 104;

// ---------------------------------------------------------------------------
// Period type
// ---------------------------------------------------------------------------

/// Zoom level of the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    Quarter,
    Semester,
    Year,
}

impl PeriodType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quarter => "quarter",
            Self::Semester => "semester",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quarter" => Ok(Self::Quarter),
            "semester" => Ok(Self::Semester),
            "year" => Ok(Self::Year),
            other => Err(CoreError::Validation(format!(
                "Unknown period type '{other}', expected quarter, semester or year"
            ))),
        }
    }
}

/// Minimum duration-cell width (in days) for its weeks label to be drawn.
///
/// Wider views squeeze each day column, so the threshold grows with the
/// period.
pub fn min_label_span(period: Option<PeriodType>) -> u32 {
    match period {
        None | Some(PeriodType::Quarter) => 7,
        Some(PeriodType::Semester) => 14,
        Some(PeriodType::Year) => 28,
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Number of week columns per period type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    pub default_weeks: u32,
    pub quarter_weeks: u32,
    pub semester_weeks: u32,
    pub year_weeks: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            default_weeks: DEFAULT_WEEKS,
            quarter_weeks: QUARTER_WEEKS,
            semester_weeks: SEMESTER_WEEKS,
            year_weeks: YEAR_WEEKS,
        }
    }
}

impl CalendarConfig {
    /// A config that shows `weeks` columns whatever the period type.
    pub fn uniform(weeks: u32) -> Self {
        Self {
            default_weeks: weeks,
            quarter_weeks: weeks,
            semester_weeks: weeks,
            year_weeks: weeks,
        }
    }

    /// Total week columns for `period`.
    pub fn column_count(&self, period: Option<PeriodType>) -> u32 {
        match period {
            None => self.default_weeks,
            Some(PeriodType::Quarter) => self.quarter_weeks,
            Some(PeriodType::Semester) => self.semester_weeks,
            Some(PeriodType::Year) => self.year_weeks,
        }
    }

    /// Zero-based column of the pivot Monday: the window is centred on it.
    pub fn pivot_offset(&self, period: Option<PeriodType>) -> u32 {
        self.column_count(period) / 2
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        validate_int_range(self.default_weeks, 1, MAX_COLUMN_WEEKS, "default_weeks")?;
        validate_int_range(self.quarter_weeks, 1, MAX_COLUMN_WEEKS, "quarter_weeks")?;
        validate_int_range(self.semester_weeks, 1, MAX_COLUMN_WEEKS, "semester_weeks")?;
        validate_int_range(self.year_weeks, 1, MAX_COLUMN_WEEKS, "year_weeks")?;
        Ok(())
    }
}
