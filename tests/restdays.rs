use axum::{body::to_bytes, http::Request, Router};
use fitdash_rs::{routes, state::AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::upload::router())
        .merge(routes::aggregate::router())
        .merge(routes::restdays::router())
        .with_state(AppState::new())
}

fn sparse_csv() -> &'static str {
    "Aktivitetstyp,Datum,Distans,Tid\n\
Löpning,2023-12-30 18:05:42,5.0,00:30:00\n\
Cykling,2024-01-03 01:33:12,20.0,01:00:00\n\
Löpning,2024-01-06 23:23:23,7.5,00:45:00\n"
}

fn dense_csv() -> &'static str {
    "Aktivitetstyp,Datum,Distans,Tid\n\
Löpning,2023-12-31 18:05:42,5.0,00:30:00\n\
Cykling,2024-01-01 01:33:12,20.0,01:00:00\n\
Löpning,2024-01-02 23:23:23,7.5,00:45:00\n"
}

fn multipart_body(file_name: &str, file_body: &str, boundary: &str) -> String {
    format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n{file_body}\r\n--{boundary}--\r\n"
    )
}

async fn upload_csv(app: &Router, csv: &str) -> String {
    let boundary = "X-BOUNDARY-TEST";
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/upload")
                .method("POST")
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(axum::body::Body::from(multipart_body(
                    "activities.csv",
                    csv,
                    boundary,
                )))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("upload body");
    let json: Value = serde_json::from_slice(&body).expect("upload json");
    json["file_id"].as_str().expect("file id").to_string()
}

async fn post_restdays(app: &Router, body: Value) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri("/api/restdays")
                .method("POST")
                .header("content-type", "application/json")
                .body(axum::body::Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("response")
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json body")
}

#[tokio::test]
async fn rest_days_are_the_calendar_complement() {
    let app = app();
    let file_id = upload_csv(&app, sparse_csv()).await;

    let response = post_restdays(&app, json!({ "file_id": file_id })).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let json = body_json(response).await;

    let days: Vec<&str> = json["rest_days"]
        .as_array()
        .expect("rest days")
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(
        days,
        vec![
            "2023-12-31",
            "2024-01-01",
            "2024-01-02",
            "2024-01-04",
            "2024-01-05"
        ]
    );
    assert_eq!(json["total"], 5);
}

#[tokio::test]
async fn rest_days_empty_when_every_day_is_active() {
    let app = app();
    let file_id = upload_csv(&app, dense_csv()).await;

    let response = post_restdays(&app, json!({ "file_id": file_id })).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["total"], 0);
    assert!(json["rest_days"].as_array().expect("rest days").is_empty());
}

#[tokio::test]
async fn rest_day_counts_aggregate_over_full_range() {
    let app = app();
    let file_id = upload_csv(&app, sparse_csv()).await;

    let response = post_restdays(
        &app,
        json!({ "file_id": file_id, "frequency": "day" }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let json = body_json(response).await;

    let buckets = json["buckets"].as_array().expect("buckets");
    // 2023-12-30 through 2024-01-06 inclusive.
    assert_eq!(buckets.len(), 8);
    let total: f64 = buckets
        .iter()
        .filter_map(|b| b["value"].as_f64())
        .sum();
    assert_eq!(total, 5.0);
    assert_eq!(buckets[0]["value"], 0.0);
    assert_eq!(buckets[1]["value"], 1.0);
}

#[tokio::test]
async fn filtering_active_types_keeps_the_full_range() {
    let app = app();
    let file_id = upload_csv(&app, sparse_csv()).await;

    // Only runs count as active days; the cycling date becomes a rest
    // day but the range still spans the whole table.
    let response = post_restdays(
        &app,
        json!({ "file_id": file_id, "activities": ["Löpning"] }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["total"], 6);
    let days: Vec<&str> = json["rest_days"]
        .as_array()
        .expect("rest days")
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(days.contains(&"2024-01-03"));
}

#[tokio::test]
async fn rest_days_svg_requires_frequency() {
    let app = app();
    let file_id = upload_csv(&app, sparse_csv()).await;

    let response = post_restdays(
        &app,
        json!({ "file_id": file_id, "format": "svg" }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);

    let response = post_restdays(
        &app,
        json!({ "file_id": file_id, "format": "svg", "frequency": "week" }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert_eq!(content_type, "image/svg+xml");
}

#[tokio::test]
async fn rest_days_unknown_file_id_is_not_found() {
    let app = app();
    let response = post_restdays(
        &app,
        json!({ "file_id": "f2a2e1f0-0000-0000-0000-000000000000" }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
}
