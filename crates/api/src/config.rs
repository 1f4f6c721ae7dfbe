use std::sync::Arc;

use chrono::NaiveDate;
use polio_calendar_core::clock::{Clock, FixedClock, SystemClock};
use polio_calendar_core::period::{
    CalendarConfig, DEFAULT_WEEKS, QUARTER_WEEKS, SEMESTER_WEEKS, YEAR_WEEKS,
};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Week columns per period type.
    pub calendar: CalendarConfig,
    /// Pins "today" instead of reading the system clock.
    pub today_override: Option<NaiveDate>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `3000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `CALENDAR_DEFAULT_WEEKS`  | `20`                    |
    /// | `CALENDAR_QUARTER_WEEKS`  | `16`                    |
    /// | `CALENDAR_SEMESTER_WEEKS` | `28`                    |
    /// | `CALENDAR_YEAR_WEEKS`     | `54`                    |
    /// | `CALENDAR_TODAY`          | unset (system clock)    |
    ///
    /// Panics on unparsable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let calendar = CalendarConfig {
            default_weeks: weeks_from_env("CALENDAR_DEFAULT_WEEKS", DEFAULT_WEEKS),
            quarter_weeks: weeks_from_env("CALENDAR_QUARTER_WEEKS", QUARTER_WEEKS),
            semester_weeks: weeks_from_env("CALENDAR_SEMESTER_WEEKS", SEMESTER_WEEKS),
            year_weeks: weeks_from_env("CALENDAR_YEAR_WEEKS", YEAR_WEEKS),
        };
        if let Err(e) = calendar.validate() {
            panic!("Invalid calendar configuration: {e}");
        }

        let today_override = std::env::var("CALENDAR_TODAY").ok().map(|s| {
            NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .expect("CALENDAR_TODAY must be a YYYY-MM-DD date")
        });

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            calendar,
            today_override,
        }
    }

    /// The clock handlers should use: pinned when `CALENDAR_TODAY` is set.
    pub fn clock(&self) -> Arc<dyn Clock> {
        match self.today_override {
            Some(day) => Arc::new(FixedClock(day)),
            None => Arc::new(SystemClock),
        }
    }
}

fn weeks_from_env(name: &str, default: u32) -> u32 {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be a positive integer")),
        Err(_) => default,
    }
}
