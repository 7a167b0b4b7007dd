use fitdash_rs::error::LoadError;
use fitdash_rs::pipeline::load::load_csv;
use fitdash_rs::types::table::ActivityTable;

fn sample_csv() -> &'static str {
    "Aktivitetstyp,Datum,Favorit,Namn,Distans,Kalorier,Tid,Medelpuls,Aerobisk Training Effect,Medeltempo,Bästa tempo,Total stigning,Medelkontakttidsbalans,Bästa varvtid,Dekompression,Färdtid,Total tid,Steg\n\
Löpning,2024-01-01 07:32:11,false, Väldigt konstigt namn. ,5.0,412,00:46:46,152,3.2,6:22,2:34,48,49.9% V/50.1% H,00:56.9,Nej,00:38:47,00:46:48,\"6,234\"\n\
Simbassäng,2024-01-09 06:15:00,true,Morgonsim,1500,309,00:40:12,--,--,--,--,--,--,01:02.0,Ja,00:39:00,00:41:00,--\n"
}

fn load_sample() -> ActivityTable {
    load_csv(sample_csv().as_bytes()).expect("sample loads")
}

#[test]
fn string_columns_are_trimmed() {
    let table = load_sample();
    let run = &table.records()[0];
    assert_eq!(run.name.as_deref(), Some("Väldigt konstigt namn."));
    assert_eq!(run.activity_type, "Löpning");
    assert_eq!(
        run.contact_time_balance.as_deref(),
        Some("49.9% V/50.1% H")
    );
}

#[test]
fn boolean_columns_use_their_literal_encodings() {
    let table = load_sample();
    assert_eq!(table.records()[0].favorite, Some(false));
    assert_eq!(table.records()[0].decompression, Some(false));
    assert_eq!(table.records()[1].favorite, Some(true));
    assert_eq!(table.records()[1].decompression, Some(true));
}

#[test]
fn timestamps_parse_with_time_of_day() {
    let table = load_sample();
    let ts = table.records()[0].timestamp.expect("timestamp");
    assert_eq!(ts.to_string(), "2024-01-01 07:32:11");
}

#[test]
fn malformed_timestamp_coerces_to_missing() {
    let csv = "Aktivitetstyp,Datum,Distans\nLöpning,inte ett datum,5.0\n";
    let table = load_csv(csv.as_bytes()).expect("loads");
    assert_eq!(table.records()[0].timestamp, None);
    assert_eq!(table.records()[0].distance_km, Some(5.0));
}

#[test]
fn thousands_separators_are_stripped() {
    let table = load_sample();
    assert_eq!(table.records()[0].steps, Some(6234.0));
}

#[test]
fn swim_distance_converts_from_meters_to_km() {
    let table = load_sample();
    assert_eq!(table.records()[1].distance_km, Some(1.5));
    // Non-swim rows stay in km.
    assert_eq!(table.records()[0].distance_km, Some(5.0));
}

#[test]
fn pace_columns_parse_as_minutes_and_seconds() {
    let table = load_sample();
    let run = &table.records()[0];
    assert_eq!(run.avg_pace_s, Some((6 * 60 + 22) as f64));
    assert_eq!(run.best_pace_s, Some((2 * 60 + 34) as f64));
}

#[test]
fn lap_time_keeps_fractional_seconds() {
    let table = load_sample();
    assert_eq!(table.records()[0].best_lap_time_s, Some(56.9));
}

#[test]
fn hour_format_columns_convert_to_hours() {
    let table = load_sample();
    let run = &table.records()[0];
    assert_eq!(run.duration_h, Some((46 * 60 + 46) as f64 / 3600.0));
    assert_eq!(run.moving_time_h, Some((38 * 60 + 47) as f64 / 3600.0));
    assert_eq!(run.elapsed_time_h, Some((46 * 60 + 48) as f64 / 3600.0));
}

#[test]
fn na_marker_reads_as_missing() {
    let table = load_sample();
    let swim = &table.records()[1];
    assert_eq!(swim.avg_heart_rate, None);
    assert_eq!(swim.steps, None);
    assert_eq!(swim.total_ascent_m, None);
}

#[test]
fn absent_columns_are_not_present() {
    let table = load_sample();
    assert!(table.has_column("Distans"));
    assert!(!table.has_column("Totalt antal set"));
}

#[test]
fn missing_required_column_is_an_error() {
    let csv = "Namn,Distans\nTur,5.0\n";
    let err = load_csv(csv.as_bytes()).expect_err("must fail");
    assert!(matches!(err, LoadError::MissingColumn(_)));
}

#[test]
fn header_only_file_is_an_error() {
    let csv = "Aktivitetstyp,Datum\n";
    let err = load_csv(csv.as_bytes()).expect_err("must fail");
    assert!(matches!(err, LoadError::EmptyFile));
}

#[test]
fn date_range_spans_min_to_max() {
    let table = load_sample();
    let (min, max) = table.date_range().expect("range");
    assert_eq!(min.to_string(), "2024-01-01");
    assert_eq!(max.to_string(), "2024-01-09");
}
