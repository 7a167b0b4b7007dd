use std::collections::HashSet;

use crate::error::FilterError;
use crate::types::agg::SeriesPoint;
use crate::types::table::{ActivityTable, Metric};

/// Distinct activity types in first-seen order. Drives the UI
/// multiselect, so the order must be stable across calls.
pub fn activity_types(table: &ActivityTable) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut types = Vec::new();
    for record in table.records() {
        if seen.insert(record.activity_type.clone()) {
            types.push(record.activity_type.clone());
        }
    }
    types
}

/// Keeps rows whose activity type is a member of the selection set.
pub fn filter_activities(table: &ActivityTable, selection: &[String]) -> ActivityTable {
    let selected: HashSet<&str> = selection.iter().map(String::as_str).collect();
    let records = table
        .records()
        .iter()
        .filter(|r| selected.contains(r.activity_type.as_str()))
        .cloned()
        .collect();
    ActivityTable::new(records, table.columns().clone())
}

/// Metrics offered for aggregation: the column must be present in the
/// header and have no missing values across the current row set. The
/// candidate set can therefore shrink (or grow back) as activity-type
/// filters narrow the rows.
pub fn summable_metrics(table: &ActivityTable) -> Vec<Metric> {
    Metric::ALL
        .iter()
        .copied()
        .filter(|metric| is_summable(table, *metric))
        .collect()
}

fn is_summable(table: &ActivityTable, metric: Metric) -> bool {
    table.has_column(metric.column())
        && table
            .records()
            .iter()
            .all(|record| metric.value(record).is_some())
}

pub fn require_summable(table: &ActivityTable, metric: Metric) -> Result<(), FilterError> {
    if is_summable(table, metric) {
        Ok(())
    } else {
        Err(FilterError::MetricUnavailable(metric.as_str().to_string()))
    }
}

/// Projects one metric as (timestamp, value) pairs. Rows without a valid
/// timestamp and zero-valued placeholder rows are dropped.
pub fn metric_series(table: &ActivityTable, metric: Metric) -> Vec<SeriesPoint> {
    table
        .records()
        .iter()
        .filter_map(|record| {
            let timestamp = record.timestamp?;
            let value = metric.value(record)?;
            (value != 0.0).then_some(SeriesPoint { timestamp, value })
        })
        .collect()
}
