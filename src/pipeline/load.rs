use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::LoadError;
use crate::types::table::{columns, ActivityRecord, ActivityTable};

/// Missing-value marker used by the export.
const NA_MARKER: &str = "--";

/// Activity types whose distance column is recorded in meters instead of km.
const METER_ACTIVITIES: [&str; 2] = ["Simbassäng", "Simning"];

/// Parses a Garmin CSV export into a normalized table.
///
/// The export uses `.` as decimal separator and `,` as thousands
/// separator (large numbers arrive quoted), `--` for missing values,
/// and locale-specific literal strings for booleans. Malformed cells
/// coerce to missing rather than failing the whole file; only a missing
/// required column or an empty file is an error.
pub fn load_csv(bytes: &[u8]) -> Result<ActivityTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| LoadError::InvalidCsv(e.to_string()))?
        .clone();

    let mut index: HashMap<String, usize> = HashMap::new();
    for (i, header) in headers.iter().enumerate() {
        index.entry(header.to_string()).or_insert(i);
    }

    for required in [columns::DATE, columns::ACTIVITY_TYPE] {
        if !index.contains_key(required) {
            return Err(LoadError::MissingColumn(required));
        }
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| LoadError::InvalidCsv(e.to_string()))?;
        records.push(parse_record(&row, &index));
    }

    if records.is_empty() {
        return Err(LoadError::EmptyFile);
    }

    let present: HashSet<String> = index.keys().cloned().collect();
    Ok(ActivityTable::new(records, present))
}

fn parse_record(row: &csv::StringRecord, index: &HashMap<String, usize>) -> ActivityRecord {
    let activity_type = cell(row, index, columns::ACTIVITY_TYPE)
        .unwrap_or_default()
        .to_string();

    let mut record = ActivityRecord {
        timestamp: cell(row, index, columns::DATE).and_then(parse_timestamp),
        activity_type,
        name: cell(row, index, columns::NAME).map(str::to_string),
        favorite: cell(row, index, columns::FAVORITE).and_then(parse_bool),
        decompression: cell(row, index, columns::DECOMPRESSION).and_then(parse_ja_nej),
        contact_time_balance: cell(row, index, columns::CONTACT_TIME_BALANCE).map(str::to_string),

        distance_km: number(row, index, columns::DISTANCE),
        duration_h: duration_hours(row, index, columns::DURATION),
        calories: number(row, index, columns::CALORIES),
        steps: number(row, index, columns::STEPS),
        total_ascent_m: number(row, index, columns::TOTAL_ASCENT),
        total_descent_m: number(row, index, columns::TOTAL_DESCENT),
        aerobic_training_effect: number(row, index, columns::AEROBIC_TRAINING_EFFECT),
        total_strokes: number(row, index, columns::TOTAL_STROKES),
        total_reps: number(row, index, columns::TOTAL_REPS),
        total_sets: number(row, index, columns::TOTAL_SETS),

        moving_time_h: duration_hours(row, index, columns::MOVING_TIME),
        elapsed_time_h: duration_hours(row, index, columns::ELAPSED_TIME),
        avg_pace_s: duration_seconds(row, index, columns::AVG_PACE),
        best_pace_s: duration_seconds(row, index, columns::BEST_PACE),
        avg_gap_s: duration_seconds(row, index, columns::AVG_GAP),
        best_lap_time_s: duration_seconds(row, index, columns::BEST_LAP_TIME),
        stress_start_s: duration_seconds(row, index, columns::STRESS_START),
        stress_end_s: duration_seconds(row, index, columns::STRESS_END),
        avg_heart_rate: number(row, index, columns::AVG_HEART_RATE),
        max_heart_rate: number(row, index, columns::MAX_HEART_RATE),
        avg_power: number(row, index, columns::AVG_POWER),
        max_power: number(row, index, columns::MAX_POWER),
        avg_swolf: number(row, index, columns::AVG_SWOLF),
        laps: number(row, index, columns::LAPS),
        min_temperature: number(row, index, columns::MIN_TEMPERATURE),
        max_temperature: number(row, index, columns::MAX_TEMPERATURE),
        min_elevation_m: number(row, index, columns::MIN_ELEVATION),
        max_elevation_m: number(row, index, columns::MAX_ELEVATION),
    };

    // Pool/open-water swim rows record distance in meters.
    if METER_ACTIVITIES.contains(&record.activity_type.as_str()) {
        record.distance_km = record.distance_km.map(|m| m / 1000.0);
    }

    record
}

/// Raw cell access: absent column, empty cell, and the `--` marker all
/// read as missing.
fn cell<'a>(
    row: &'a csv::StringRecord,
    index: &HashMap<String, usize>,
    name: &str,
) -> Option<&'a str> {
    let i = *index.get(name)?;
    let raw = row.get(i)?.trim();
    if raw.is_empty() || raw == NA_MARKER {
        None
    } else {
        Some(raw)
    }
}

fn number(row: &csv::StringRecord, index: &HashMap<String, usize>, name: &str) -> Option<f64> {
    cell(row, index, name).and_then(parse_number)
}

fn duration_seconds(
    row: &csv::StringRecord,
    index: &HashMap<String, usize>,
    name: &str,
) -> Option<f64> {
    cell(row, index, name).and_then(parse_duration_seconds)
}

fn duration_hours(
    row: &csv::StringRecord,
    index: &HashMap<String, usize>,
    name: &str,
) -> Option<f64> {
    cell(row, index, name)
        .and_then(parse_duration_seconds)
        .map(|s| s / 3600.0)
}

fn parse_number(s: &str) -> Option<f64> {
    s.replace(',', "").parse().ok()
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_ja_nej(s: &str) -> Option<bool> {
    match s {
        "Ja" => Some(true),
        "Nej" => Some(false),
        _ => None,
    }
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Accepts `mm:ss`, `hh:mm:ss`, and fractional seconds (`hh:mm:ss.s`).
/// The two-part form covers the pace columns, which are minutes:seconds.
fn parse_duration_seconds(s: &str) -> Option<f64> {
    let parts: Vec<&str> = s.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [m, sec] => (0.0, m.parse::<f64>().ok()?, sec.parse::<f64>().ok()?),
        [h, m, sec] => (
            h.parse::<f64>().ok()?,
            m.parse::<f64>().ok()?,
            sec.parse::<f64>().ok()?,
        ),
        _ => return None,
    };
    if hours < 0.0 || minutes < 0.0 || seconds < 0.0 {
        return None;
    }
    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}
