use axum::extract::Multipart;
use axum::{extract::State, routing::post, Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::pipeline::{filter, load};
use crate::state::AppState;
use crate::types::table::Metric;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/upload", post(upload))
}

#[derive(Serialize, Deserialize)]
struct UploadResponse {
    file_id: String,
    rows: usize,
    activity_types: Vec<String>,
    summable_metrics: Vec<MetricEntry>,
    first_date: Option<NaiveDate>,
    last_date: Option<NaiveDate>,
}

#[derive(Serialize, Deserialize)]
struct MetricEntry {
    id: Metric,
    label: String,
}

async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            filename = field.file_name().map(|s| s.to_string());
            file_bytes = Some(field.bytes().await.map_err(|e| {
                AppError::BadRequest(format!("Failed to read file bytes: {}", e))
            })?.to_vec());
        }
    }

    let bytes = file_bytes.ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    let filename = filename.ok_or_else(|| AppError::BadRequest("No filename provided".to_string()))?;

    if !has_csv_extension(&filename) {
        return Err(AppError::BadRequest("Unsupported file format".to_string()));
    }

    tracing::info!("Parsing CSV file: {}", filename);

    let table = load::load_csv(&bytes)?;

    let file_id = Uuid::new_v4().to_string();
    let activity_types = filter::activity_types(&table);
    let summable_metrics = filter::summable_metrics(&table)
        .into_iter()
        .map(|metric| MetricEntry {
            id: metric,
            label: metric.label().to_string(),
        })
        .collect();
    let date_range = table.date_range();
    let rows = table.len();

    state.insert(file_id.clone(), table);

    tracing::info!(
        "Uploaded file {} with ID {} ({} rows, {} activity types)",
        filename,
        file_id,
        rows,
        activity_types.len()
    );

    Ok(Json(UploadResponse {
        file_id,
        rows,
        activity_types,
        summable_metrics,
        first_date: date_range.map(|(min, _)| min),
        last_date: date_range.map(|(_, max)| max),
    }))
}

fn has_csv_extension(filename: &str) -> bool {
    filename
        .rsplit('.')
        .next()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
