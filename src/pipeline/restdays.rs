use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::AggregateError;
use crate::types::agg::SeriesPoint;
use crate::types::table::{ActivityRecord, ActivityTable};

/// Calendar dates in [start, end] with no recorded activity, ascending.
/// Start/end default to the table's min/max activity dates. The set
/// complement is taken over whole days; an activity at any time of day
/// marks that date as active.
pub fn days_without_activity(
    table: &ActivityTable,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Vec<NaiveDate>, AggregateError> {
    let range = table.date_range();
    let start = start.or(range.map(|(min, _)| min)).ok_or(AggregateError::EmptySeries)?;
    let end = end.or(range.map(|(_, max)| max)).ok_or(AggregateError::EmptySeries)?;
    if start > end {
        return Err(AggregateError::InvalidRange { start, end });
    }

    let active: HashSet<NaiveDate> = table
        .records()
        .iter()
        .filter_map(ActivityRecord::date)
        .collect();

    let mut days = Vec::new();
    let mut cursor = start;
    while cursor <= end {
        if !active.contains(&cursor) {
            days.push(cursor);
        }
        cursor = match cursor.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    Ok(days)
}

/// Rest days as an aggregatable series: one observation of 1.0 per rest
/// day, so bucket sums are rest-day counts.
pub fn rest_day_series(days: &[NaiveDate]) -> Vec<SeriesPoint> {
    days.iter()
        .filter_map(|day| day.and_hms_opt(0, 0, 0))
        .map(|timestamp| SeriesPoint {
            timestamp,
            value: 1.0,
        })
        .collect()
}
