use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Calendar resolution of an aggregation view. One per UI tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Day,
    Week,
    Month,
    Year,
}

impl Frequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Day => "day",
            Frequency::Week => "week",
            Frequency::Month => "month",
            Frequency::Year => "year",
        }
    }

    /// strftime pattern for the bucket's axis label.
    pub fn date_format(self) -> &'static str {
        match self {
            Frequency::Day => "%Y-%m-%d",
            Frequency::Week => "%Y-%W",
            Frequency::Month => "%Y-%m",
            Frequency::Year => "%Y",
        }
    }
}

/// One input observation for the aggregator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

/// One fixed-frequency output bucket, labeled by its period end date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateBucket {
    pub period: NaiveDate,
    pub value: f64,
}

/// Response encoding for the chart endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Svg,
}

/// Layout parameters for the SVG bar chart.
#[derive(Debug, Clone, Copy)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 960,
            height: 420,
            padding: 48,
        }
    }
}
