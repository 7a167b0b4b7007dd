use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Column names as they appear in the Garmin CSV export header.
/// The export is locale-specific; these are the Swedish names and the
/// loader is the only place they are matched against.
pub mod columns {
    pub const ACTIVITY_TYPE: &str = "Aktivitetstyp";
    pub const DATE: &str = "Datum";
    pub const FAVORITE: &str = "Favorit";
    pub const NAME: &str = "Namn";
    pub const DISTANCE: &str = "Distans";
    pub const CALORIES: &str = "Kalorier";
    pub const DURATION: &str = "Tid";
    pub const AVG_HEART_RATE: &str = "Medelpuls";
    pub const MAX_HEART_RATE: &str = "Maxpuls";
    pub const AEROBIC_TRAINING_EFFECT: &str = "Aerobisk Training Effect";
    pub const AVG_PACE: &str = "Medeltempo";
    pub const BEST_PACE: &str = "Bästa tempo";
    pub const TOTAL_ASCENT: &str = "Total stigning";
    pub const TOTAL_DESCENT: &str = "Totalt nedför";
    pub const CONTACT_TIME_BALANCE: &str = "Medelkontakttidsbalans";
    pub const AVG_GAP: &str = "Medelvärde GAP";
    pub const AVG_POWER: &str = "Med. kraft";
    pub const MAX_POWER: &str = "Maxkraft";
    pub const TOTAL_STROKES: &str = "Totalt antal årtag";
    pub const AVG_SWOLF: &str = "Medel-Swolf";
    pub const STEPS: &str = "Steg";
    pub const TOTAL_REPS: &str = "Totalt antal repetitioner";
    pub const TOTAL_SETS: &str = "Totalt antal set";
    pub const BEST_LAP_TIME: &str = "Bästa varvtid";
    pub const LAPS: &str = "Antal varv";
    pub const MIN_TEMPERATURE: &str = "Minsta temperatur";
    pub const MAX_TEMPERATURE: &str = "Maximal temperatur";
    pub const DECOMPRESSION: &str = "Dekompression";
    pub const STRESS_START: &str = "Start för stress";
    pub const STRESS_END: &str = "Slut för stress";
    pub const MOVING_TIME: &str = "Färdtid";
    pub const ELAPSED_TIME: &str = "Total tid";
    pub const MIN_ELEVATION: &str = "Min. höjd";
    pub const MAX_ELEVATION: &str = "Max. höjd";
}

/// One logged exercise session, fully type-normalized: durations in
/// seconds, the hour-format columns in hours, every distance in km.
/// `None` stands in for the export's `--` / empty / unparseable cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityRecord {
    pub timestamp: Option<NaiveDateTime>,
    pub activity_type: String,
    pub name: Option<String>,
    pub favorite: Option<bool>,
    pub decompression: Option<bool>,
    pub contact_time_balance: Option<String>,

    pub distance_km: Option<f64>,
    pub duration_h: Option<f64>,
    pub calories: Option<f64>,
    pub steps: Option<f64>,
    pub total_ascent_m: Option<f64>,
    pub total_descent_m: Option<f64>,
    pub aerobic_training_effect: Option<f64>,
    pub total_strokes: Option<f64>,
    pub total_reps: Option<f64>,
    pub total_sets: Option<f64>,

    pub moving_time_h: Option<f64>,
    pub elapsed_time_h: Option<f64>,
    pub avg_pace_s: Option<f64>,
    pub best_pace_s: Option<f64>,
    pub avg_gap_s: Option<f64>,
    pub best_lap_time_s: Option<f64>,
    pub stress_start_s: Option<f64>,
    pub stress_end_s: Option<f64>,
    pub avg_heart_rate: Option<f64>,
    pub max_heart_rate: Option<f64>,
    pub avg_power: Option<f64>,
    pub max_power: Option<f64>,
    pub avg_swolf: Option<f64>,
    pub laps: Option<f64>,
    pub min_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
    pub min_elevation_m: Option<f64>,
    pub max_elevation_m: Option<f64>,
}

impl ActivityRecord {
    pub fn date(&self) -> Option<NaiveDate> {
        self.timestamp.map(|ts| ts.date())
    }
}

/// The loaded export: normalized rows plus the set of column names that
/// were present in the header. Column presence matters independently of
/// row values: an absent column is skipped wherever referenced, while a
/// present-but-gappy column is excluded from the summable set.
#[derive(Debug, Clone, Default)]
pub struct ActivityTable {
    records: Vec<ActivityRecord>,
    columns: HashSet<String>,
}

impl ActivityTable {
    pub fn new(records: Vec<ActivityRecord>, columns: HashSet<String>) -> Self {
        Self { records, columns }
    }

    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    pub fn columns(&self) -> &HashSet<String> {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Min/max activity dates over rows with a valid timestamp.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().filter_map(ActivityRecord::date);
        let first = dates.next()?;
        let (min, max) = dates.fold((first, first), |(min, max), d| (min.min(d), max.max(d)));
        Some((min, max))
    }
}

/// Metrics eligible for summed aggregation, in the order the UI offers
/// them. Identifiers are the API-facing names; `column` maps back to the
/// export header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Distance,
    Duration,
    TotalAscent,
    Steps,
    Calories,
    AerobicTrainingEffect,
    TotalDescent,
    TotalStrokes,
    TotalReps,
    TotalSets,
}

impl Metric {
    pub const ALL: [Metric; 10] = [
        Metric::Distance,
        Metric::Duration,
        Metric::TotalAscent,
        Metric::Steps,
        Metric::Calories,
        Metric::AerobicTrainingEffect,
        Metric::TotalDescent,
        Metric::TotalStrokes,
        Metric::TotalReps,
        Metric::TotalSets,
    ];

    pub fn column(self) -> &'static str {
        match self {
            Metric::Distance => columns::DISTANCE,
            Metric::Duration => columns::DURATION,
            Metric::TotalAscent => columns::TOTAL_ASCENT,
            Metric::Steps => columns::STEPS,
            Metric::Calories => columns::CALORIES,
            Metric::AerobicTrainingEffect => columns::AEROBIC_TRAINING_EFFECT,
            Metric::TotalDescent => columns::TOTAL_DESCENT,
            Metric::TotalStrokes => columns::TOTAL_STROKES,
            Metric::TotalReps => columns::TOTAL_REPS,
            Metric::TotalSets => columns::TOTAL_SETS,
        }
    }

    pub fn value(self, record: &ActivityRecord) -> Option<f64> {
        match self {
            Metric::Distance => record.distance_km,
            Metric::Duration => record.duration_h,
            Metric::TotalAscent => record.total_ascent_m,
            Metric::Steps => record.steps,
            Metric::Calories => record.calories,
            Metric::AerobicTrainingEffect => record.aerobic_training_effect,
            Metric::TotalDescent => record.total_descent_m,
            Metric::TotalStrokes => record.total_strokes,
            Metric::TotalReps => record.total_reps,
            Metric::TotalSets => record.total_sets,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Distance => "distance",
            Metric::Duration => "duration",
            Metric::TotalAscent => "total_ascent",
            Metric::Steps => "steps",
            Metric::Calories => "calories",
            Metric::AerobicTrainingEffect => "aerobic_training_effect",
            Metric::TotalDescent => "total_descent",
            Metric::TotalStrokes => "total_strokes",
            Metric::TotalReps => "total_reps",
            Metric::TotalSets => "total_sets",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Distance => "Distance (km)",
            Metric::Duration => "Duration (h)",
            Metric::TotalAscent => "Total ascent (m)",
            Metric::Steps => "Steps",
            Metric::Calories => "Calories",
            Metric::AerobicTrainingEffect => "Aerobic training effect",
            Metric::TotalDescent => "Total descent (m)",
            Metric::TotalStrokes => "Total strokes",
            Metric::TotalReps => "Total reps",
            Metric::TotalSets => "Total sets",
        }
    }
}
