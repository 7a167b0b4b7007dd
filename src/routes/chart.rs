//! Shared plumbing for the two chart endpoints.

use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::types::agg::{AggregateBucket, ChartOptions, Frequency};

const MIN_DIM: u32 = 320;
const MAX_DIM: u32 = 4096;

#[derive(Serialize, Deserialize)]
pub(crate) struct BucketEntry {
    pub period: NaiveDate,
    pub label: String,
    pub value: f64,
}

pub(crate) fn bucket_entries(buckets: &[AggregateBucket], frequency: Frequency) -> Vec<BucketEntry> {
    buckets
        .iter()
        .map(|bucket| BucketEntry {
            period: bucket.period,
            label: bucket.period.format(frequency.date_format()).to_string(),
            value: bucket.value,
        })
        .collect()
}

pub(crate) fn chart_options(width: Option<u32>, height: Option<u32>) -> Result<ChartOptions, AppError> {
    let defaults = ChartOptions::default();
    let width = width.unwrap_or(defaults.width);
    let height = height.unwrap_or(defaults.height);

    if !(MIN_DIM..=MAX_DIM).contains(&width) || !(MIN_DIM..=MAX_DIM).contains(&height) {
        return Err(AppError::BadRequest(format!(
            "Invalid dimensions: {}x{}. Width/height must be between {} and {}",
            width, height, MIN_DIM, MAX_DIM
        )));
    }

    Ok(ChartOptions {
        width,
        height,
        ..defaults
    })
}

pub(crate) fn svg_response(svg: String) -> Response {
    ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response()
}
