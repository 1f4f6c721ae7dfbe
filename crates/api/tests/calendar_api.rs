//! Integration tests for the calendar endpoints.
//!
//! The test clock is pinned to 2024-01-17 and the window is four weeks wide,
//! so the default window is 2024-01-01 ..= 2024-01-28 with today in column 3.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use serde_json::{json, Value};

fn campaign(id: u128, obr_name: &str, rounds: Value) -> Value {
    json!({
        "id": uuid::Uuid::from_u128(id),
        "obr_name": obr_name,
        "top_level_org_unit_name": "Nigeria",
        "top_level_org_unit_id": 1,
        "rounds": rounds,
    })
}

fn spans(cells: &Value) -> u64 {
    cells
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["col_span"].as_u64().unwrap())
        .sum()
}

// ---------------------------------------------------------------------------
// GET /api/v1/calendar/window
// ---------------------------------------------------------------------------

#[tokio::test]
async fn window_defaults_to_todays_week() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/calendar/window").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["first_monday"], "2024-01-01");
    assert_eq!(data["last_sunday"], "2024-01-28");
    assert_eq!(data["current_week_index"], 3);
    assert_eq!(data["headers"]["weeks"].as_array().unwrap().len(), 4);
    assert_eq!(data["headers"]["months"][0]["value"], "January");
    assert_eq!(data["headers"]["years"][0]["days_count"], 28);
}

#[tokio::test]
async fn window_snaps_date_to_monday() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/calendar/window?date=2024-03-06&period=year").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    // Pivot Monday is 2024-03-04, two columns in.
    assert_eq!(data["first_monday"], "2024-02-19");
    assert_eq!(data["last_sunday"], "2024-03-17");
    assert_eq!(data["period_type"], "year");
    assert!(data["current_week_index"].is_null());
}

#[tokio::test]
async fn window_rejects_unknown_period() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/calendar/window?period=month").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn window_rejects_dates_at_the_edge_of_the_calendar() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/calendar/window?date=%2B262142-12-31").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// POST /api/v1/calendar/layout
// ---------------------------------------------------------------------------

#[tokio::test]
async fn layout_returns_rows_for_visible_campaigns() {
    let app = common::build_test_app();
    let body = json!({
        "campaigns": [
            campaign(1, "NIE-A", json!([
                { "number": 1, "started_at": "2024-01-02", "ended_at": "2024-01-05" },
                { "number": 2, "started_at": "2024-01-15", "ended_at": "2024-01-18" }
            ])),
            campaign(2, "NIE-B", json!([
                { "number": 1, "started_at": "2024-06-02", "ended_at": "2024-06-05" }
            ])),
            campaign(3, "NIE-C", json!([
                { "number": 1, "started_at": "2024-01-08", "ended_at": "2024-01-10" },
                { "number": 2, "started_at": null, "ended_at": null }
            ])),
        ]
    });

    let response = post_json(app, "/api/v1/calendar/layout", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let rows = json["data"]["rows"].as_array().unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["NIE-A", "NIE-C"]);

    for row in rows {
        assert_eq!(spans(&row["cells"]["cells"]), 28);
    }

    let kinds: Vec<&str> = rows[0]["cells"]["cells"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["kind"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        ["empty", "round", "campaign_duration", "round", "empty", "empty"]
    );

    let skipped = &rows[1]["cells"]["skipped"][0];
    assert_eq!(skipped["round_number"], 2);
    assert_eq!(skipped["reason"]["type"], "missing_dates");
}

#[tokio::test]
async fn layout_edit_column_follows_viewer() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/calendar/layout",
        json!({ "viewer": { "can_edit": true }, "campaigns": [] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["columns"], json!(["edit", "name", "country", "rounds"]));

    let app = common::build_test_app();
    let response = post_json(app, "/api/v1/calendar/layout", json!({ "campaigns": [] })).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["columns"], json!(["name", "country", "rounds"]));
    assert_eq!(json["data"]["rows"], json!([]));
}

#[tokio::test]
async fn layout_includes_sub_activity_rows() {
    let app = common::build_test_app();
    let mut record = campaign(1, "DRC-A", json!([
        { "number": 1, "started_at": "2024-01-02", "ended_at": "2024-01-05" }
    ]));
    record["sub_activities"] = json!([
        { "name": "Mop-up", "start_date": "2024-01-08", "end_date": "2024-01-09", "round_number": 1 }
    ]);

    let response = post_json(app, "/api/v1/calendar/layout", json!({ "campaigns": [record] })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let sub_rows = json["data"]["rows"][0]["sub_activity_rows"].as_array().unwrap();
    assert_eq!(sub_rows.len(), 1);
    assert_eq!(sub_rows[0]["round_number"], 1);
    assert_eq!(spans(&sub_rows[0]["cells"]["cells"]), 28);
}

#[tokio::test]
async fn layout_rejects_malformed_dates() {
    let app = common::build_test_app();
    let body = json!({
        "campaigns": [campaign(1, "BAD", json!([
            { "number": 1, "started_at": "02/01/2024", "ended_at": "2024-01-05" }
        ]))]
    });

    let response = post_json(app, "/api/v1/calendar/layout", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn layout_rejects_dates_at_the_edge_of_the_calendar() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/calendar/layout",
        json!({ "date": "+262142-12-31", "campaigns": [] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn layout_survives_extreme_round_dates() {
    let app = common::build_test_app();
    let body = json!({
        "campaigns": [campaign(1, "FAR", json!([
            { "number": 1, "started_at": "2024-01-02", "ended_at": "2024-01-05" },
            { "number": 2, "started_at": "+262142-12-30", "ended_at": "+262142-12-31" }
        ]))]
    });

    let response = post_json(app, "/api/v1/calendar/layout", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let rows = json["data"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(spans(&rows[0]["cells"]["cells"]), 28);
}

#[tokio::test]
async fn layout_rejects_oversized_requests() {
    let app = common::build_test_app();
    let campaigns: Vec<Value> = (0..2001u128)
        .map(|i| json!({ "id": uuid::Uuid::from_u128(i), "obr_name": "X" }))
        .collect();

    let response = post_json(app, "/api/v1/calendar/layout", json!({ "campaigns": campaigns })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}
