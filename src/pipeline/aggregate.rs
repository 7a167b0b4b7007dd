use std::collections::HashMap;

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::error::AggregateError;
use crate::types::agg::{AggregateBucket, Frequency, SeriesPoint};

/// Resamples an irregular series into fixed calendar buckets over
/// [start, end], zero-filling buckets with no observations. Start/end
/// default to the series min/max and are normalized to dates.
///
/// Bucket labels are period ends: day = the date, week = the Sunday
/// closing a Monday-Sunday week, month = last day of month, year =
/// Dec 31. Boundary anchoring preserves the behavior the existing
/// visualizations were built against: month anchors both ends to their
/// month end, year anchors only the end, week does not anchor at all —
/// so a trailing partial week whose Sunday falls past `end` is dropped.
pub fn aggregate_over_time(
    points: &[SeriesPoint],
    frequency: Frequency,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Vec<AggregateBucket>, AggregateError> {
    let data_min = points.iter().map(|p| p.timestamp.date()).min();
    let data_max = points.iter().map(|p| p.timestamp.date()).max();

    let start = start.or(data_min).ok_or(AggregateError::EmptySeries)?;
    let end = end.or(data_max).ok_or(AggregateError::EmptySeries)?;

    let (start, end) = anchor_range(frequency, start, end);
    if start > end {
        return Err(AggregateError::InvalidRange { start, end });
    }

    let mut buckets: Vec<AggregateBucket> = range_labels(frequency, start, end)
        .into_iter()
        .map(|period| AggregateBucket { period, value: 0.0 })
        .collect();

    let index: HashMap<NaiveDate, usize> = buckets
        .iter()
        .enumerate()
        .map(|(i, b)| (b.period, i))
        .collect();

    for point in points {
        let label = bucket_label(frequency, point.timestamp.date());
        if let Some(&i) = index.get(&label) {
            buckets[i].value += point.value;
        }
    }

    Ok(buckets)
}

/// Period-end label for the bucket containing `date`.
pub fn bucket_label(frequency: Frequency, date: NaiveDate) -> NaiveDate {
    match frequency {
        Frequency::Day => date,
        Frequency::Week => week_end(date),
        Frequency::Month => month_end(date),
        Frequency::Year => year_end(date),
    }
}

fn anchor_range(frequency: Frequency, start: NaiveDate, end: NaiveDate) -> (NaiveDate, NaiveDate) {
    match frequency {
        Frequency::Day | Frequency::Week => (start, end),
        Frequency::Month => (month_end(start), month_end(end)),
        // Start is intentionally left unanchored for year frequency.
        Frequency::Year => (start, year_end(end)),
    }
}

/// All bucket labels in [start, end], in ascending order. The first
/// label is the period end of the bucket containing `start`; generation
/// stops at the last label on or before `end`.
fn range_labels(frequency: Frequency, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut labels = Vec::new();
    let mut cursor = bucket_label(frequency, start);
    while cursor <= end {
        labels.push(cursor);
        cursor = match next_label(frequency, cursor) {
            Some(next) => next,
            None => break,
        };
    }
    labels
}

fn next_label(frequency: Frequency, label: NaiveDate) -> Option<NaiveDate> {
    match frequency {
        Frequency::Day => label.succ_opt(),
        Frequency::Week => label.checked_add_days(Days::new(7)),
        Frequency::Month => label.succ_opt().map(month_end),
        Frequency::Year => NaiveDate::from_ymd_opt(label.year() + 1, 12, 31),
    }
}

/// Sunday of the Monday-Sunday week containing `date`.
fn week_end(date: NaiveDate) -> NaiveDate {
    let days_to_sunday = 6 - date.weekday().num_days_from_monday() as u64;
    date.checked_add_days(Days::new(days_to_sunday)).unwrap_or(date)
}

fn month_end(date: NaiveDate) -> NaiveDate {
    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

fn year_end(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date)
}
