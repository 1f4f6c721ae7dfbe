pub mod calendar;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /calendar/window                                 visible window + headers (GET)
/// /calendar/layout                                 full calendar layout (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/calendar", calendar::router())
}
