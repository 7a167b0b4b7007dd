use axum::response::{IntoResponse, Response};
use axum::{extract::State, routing::post, Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AggregateError, AppError};
use crate::pipeline::{aggregate, filter, render, restdays};
use crate::routes::chart::{self, BucketEntry};
use crate::state::AppState;
use crate::types::agg::{Frequency, OutputFormat};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/restdays", post(rest_days))
}

#[derive(Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct RestDaysRequest {
    file_id: String,
    /// Activity types that count as an active day. Defaults to all.
    activities: Option<Vec<String>>,
    frequency: Option<Frequency>,
    #[serde(default)]
    format: OutputFormat,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Serialize, Deserialize)]
struct RestDaysResponse {
    rest_days: Vec<NaiveDate>,
    total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency: Option<Frequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    buckets: Option<Vec<BucketEntry>>,
}

async fn rest_days(
    State(state): State<AppState>,
    Json(request): Json<RestDaysRequest>,
) -> Result<Response, AppError> {
    let table = state
        .get(&request.file_id)
        .ok_or_else(|| AppError::NotFound(request.file_id.clone()))?;

    // The range comes from the full table before filtering: the full
    // period is desired regardless of which activity types count as
    // active days.
    let (start, end) = table
        .date_range()
        .ok_or(AggregateError::EmptySeries)?;

    let filtered = match &request.activities {
        Some(selection) => filter::filter_activities(&table, selection),
        None => table,
    };

    let days = restdays::days_without_activity(&filtered, Some(start), Some(end))?;

    let buckets = match request.frequency {
        Some(frequency) => Some(aggregate::aggregate_over_time(
            &restdays::rest_day_series(&days),
            frequency,
            Some(start),
            Some(end),
        )?),
        None => None,
    };

    tracing::debug!(
        "{} rest days between {} and {}",
        days.len(),
        start,
        end
    );

    match request.format {
        OutputFormat::Json => {
            let entries = match (buckets.as_deref(), request.frequency) {
                (Some(buckets), Some(frequency)) => {
                    Some(chart::bucket_entries(buckets, frequency))
                }
                _ => None,
            };
            Ok(Json(RestDaysResponse {
                total: days.len(),
                rest_days: days,
                frequency: request.frequency,
                buckets: entries,
            })
            .into_response())
        }
        OutputFormat::Svg => {
            let frequency = request.frequency.ok_or_else(|| {
                AppError::BadRequest("SVG output requires a frequency".to_string())
            })?;
            let buckets = buckets.unwrap_or_default();
            let options = chart::chart_options(request.width, request.height)?;
            let svg = render::render_bar_chart(&buckets, frequency, &options)?;
            Ok(chart::svg_response(svg))
        }
    }
}
