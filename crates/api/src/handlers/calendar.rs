//! Handlers for the campaign calendar.
//!
//! The window endpoint returns headers only; the layout endpoint takes the
//! campaigns the dashboard already fetched and returns the cells to draw.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use polio_calendar_core::campaign::RawCampaign;
use polio_calendar_core::layout::{build_calendar_layout, CampaignRow, ViewerCapabilities};
use polio_calendar_core::period::PeriodType;
use polio_calendar_core::windower::{get_calendar_data, start_of_iso_week, CalendarData};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::query::CalendarParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /calendar/layout`.
#[derive(Debug, Deserialize)]
pub struct LayoutRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub period: Option<PeriodType>,
    #[serde(default)]
    pub viewer: ViewerCapabilities,
    #[serde(default)]
    pub campaigns: Vec<RawCampaign>,
}

/// Window around the ISO week of `date` (today when absent).
fn resolve_calendar(
    state: &AppState,
    date: Option<NaiveDate>,
    period: Option<PeriodType>,
) -> AppResult<CalendarData> {
    let today = state.clock.today();
    let monday = start_of_iso_week(date.unwrap_or(today))?;
    Ok(get_calendar_data(&state.config.calendar, monday, period, today)?)
}

/// GET /api/v1/calendar/window
///
/// Window bounds, year/month/week headers and the current week column.
pub async fn get_window(
    State(state): State<AppState>,
    params: Result<Query<CalendarParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let calendar = resolve_calendar(&state, params.date, params.period)?;

    tracing::debug!(
        first_monday = %calendar.first_monday,
        last_sunday = %calendar.last_sunday,
        period = ?calendar.period_type,
        "Calendar window computed",
    );

    Ok(Json(DataResponse { data: calendar }))
}

/// POST /api/v1/calendar/layout
///
/// Lays out the given campaigns: only campaigns with something in view get
/// a row, and each row's cells tile the window.
pub async fn build_layout(
    State(state): State<AppState>,
    input: Result<Json<LayoutRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = input.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let calendar = resolve_calendar(&state, input.date, input.period)?;
    let (first_monday, last_sunday) = (calendar.first_monday, calendar.last_sunday);

    let layout = build_calendar_layout(&input.campaigns, calendar, &input.viewer)?;

    for row in &layout.rows {
        let anomalies = row.cells.anomalies().count();
        if anomalies > 0 {
            tracing::warn!(
                campaign_id = %row.campaign_id,
                campaign = %row.name,
                anomalies,
                "Campaign has rounds with inconsistent dates",
            );
        }
    }

    tracing::info!(
        %first_monday,
        %last_sunday,
        requested = input.campaigns.len(),
        visible = layout.rows.len(),
        skipped = layout.rows.iter().map(CampaignRow::skipped_count).sum::<usize>(),
        "Calendar layout computed",
    );

    Ok(Json(DataResponse { data: layout }))
}
