use axum::response::{IntoResponse, Response};
use axum::{extract::State, routing::post, Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, FilterError};
use crate::pipeline::{aggregate, filter, render};
use crate::routes::chart::{self, BucketEntry};
use crate::state::AppState;
use crate::types::agg::{Frequency, OutputFormat};
use crate::types::table::Metric;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/aggregate", post(aggregate_metric))
        .route("/api/metrics", post(summable))
}

#[derive(Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct AggregateRequest {
    file_id: String,
    activities: Vec<String>,
    metric: Metric,
    frequency: Frequency,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    #[serde(default)]
    format: OutputFormat,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Serialize, Deserialize)]
struct AggregateResponse {
    metric: Metric,
    frequency: Frequency,
    buckets: Vec<BucketEntry>,
}

#[derive(Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct MetricsRequest {
    file_id: String,
    activities: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct MetricsResponse {
    summable_metrics: Vec<MetricEntry>,
}

#[derive(Serialize, Deserialize)]
struct MetricEntry {
    id: Metric,
    label: String,
}

/// Summable metrics for the filtered row set. The candidate set shrinks
/// or grows back as the activity-type selection changes.
async fn summable(
    State(state): State<AppState>,
    Json(request): Json<MetricsRequest>,
) -> Result<Json<MetricsResponse>, AppError> {
    let table = state
        .get(&request.file_id)
        .ok_or_else(|| AppError::NotFound(request.file_id.clone()))?;

    let filtered = filter::filter_activities(&table, &request.activities);
    let summable_metrics = filter::summable_metrics(&filtered)
        .into_iter()
        .map(|metric| MetricEntry {
            id: metric,
            label: metric.label().to_string(),
        })
        .collect();

    Ok(Json(MetricsResponse { summable_metrics }))
}

async fn aggregate_metric(
    State(state): State<AppState>,
    Json(request): Json<AggregateRequest>,
) -> Result<Response, AppError> {
    let table = state
        .get(&request.file_id)
        .ok_or_else(|| AppError::NotFound(request.file_id.clone()))?;

    if request.activities.is_empty() {
        return Err(FilterError::NoActivitiesSelected.into());
    }

    let filtered = filter::filter_activities(&table, &request.activities);
    filter::require_summable(&filtered, request.metric)?;

    let series = filter::metric_series(&filtered, request.metric);
    let buckets =
        aggregate::aggregate_over_time(&series, request.frequency, request.start, request.end)?;

    tracing::debug!(
        "Aggregated {} over {} rows into {} {} buckets",
        request.metric.as_str(),
        filtered.len(),
        buckets.len(),
        request.frequency.as_str()
    );

    match request.format {
        OutputFormat::Json => Ok(Json(AggregateResponse {
            metric: request.metric,
            frequency: request.frequency,
            buckets: chart::bucket_entries(&buckets, request.frequency),
        })
        .into_response()),
        OutputFormat::Svg => {
            let options = chart::chart_options(request.width, request.height)?;
            let svg = render::render_bar_chart(&buckets, request.frequency, &options)?;
            Ok(chart::svg_response(svg))
        }
    }
}
