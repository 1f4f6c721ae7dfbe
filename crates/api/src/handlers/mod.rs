//! Request handlers.
//!
//! Handlers stay thin: they resolve the calendar window from the request
//! and the configured clock, delegate to `polio_calendar_core`, and map
//! errors via [`crate::error::AppError`].

pub mod calendar;
