use std::sync::Arc;

use polio_calendar_core::clock::Clock;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration, including calendar column counts.
    pub config: Arc<ServerConfig>,
    /// Source of "today" for current-week highlighting.
    pub clock: Arc<dyn Clock>,
}
