//! Route definitions for the campaign calendar.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::calendar;
use crate::state::AppState;

/// Calendar routes mounted at `/calendar`.
///
/// ```text
/// GET  /window  -> get_window
/// POST /layout  -> build_layout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/window", get(calendar::get_window))
        .route("/layout", post(calendar::build_layout))
}
