use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Invalid CSV: {0}")]
    InvalidCsv(String),
    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("No activity rows found in file")]
    EmptyFile,
}

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("At least one activity type must be selected")]
    NoActivitiesSelected,
    #[error("Metric '{0}' has missing values for the selected activities")]
    MetricUnavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("Cannot aggregate an empty series without an explicit date range")]
    EmptySeries,
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Nothing to chart: empty bucket series")]
    EmptyChart,
    #[error("Invalid viewport: {width}x{height} leaves no drawing area")]
    InvalidViewport { width: u32, height: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Upload not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Load(_)
            | AppError::Filter(_)
            | AppError::Aggregate(_)
            | AppError::Render(_)
            | AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
