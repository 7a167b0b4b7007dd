use crate::error::RenderError;
use crate::types::agg::{AggregateBucket, ChartOptions, Frequency};

const BAR_GAP_RATIO: f64 = 0.25;
const GRID_LINES: usize = 4;
const MAX_X_LABELS: usize = 16;
const LABEL_MARGIN: f64 = 18.0;
const BAR_FILL: &str = "#38BDF8";
const AXIS_STROKE: &str = "#64748B";
const GRID_STROKE: &str = "#334155";
const TEXT_FILL: &str = "#94A3B8";
const FONT_FAMILY: &str = "ui-sans-serif, system-ui, sans-serif";
const FONT_SIZE: f64 = 12.0;

/// Renders an aggregated bucket series as an SVG bar chart. Zero
/// buckets keep their slot on the axis but draw no bar.
pub fn render_bar_chart(
    buckets: &[AggregateBucket],
    frequency: Frequency,
    options: &ChartOptions,
) -> Result<String, RenderError> {
    if buckets.is_empty() {
        return Err(RenderError::EmptyChart);
    }

    let width = options.width as f64;
    let height = options.height as f64;
    let padding = options.padding as f64;
    let view_width = width - 2.0 * padding;
    let view_height = height - 2.0 * padding - LABEL_MARGIN;
    if view_width <= 0.0 || view_height <= 0.0 {
        return Err(RenderError::InvalidViewport {
            width: options.width,
            height: options.height,
        });
    }

    let max_value = buckets
        .iter()
        .map(|b| b.value)
        .fold(0.0_f64, f64::max)
        .max(f64::EPSILON);

    let baseline = padding + view_height;
    let slot = view_width / buckets.len() as f64;
    let bar_width = (slot * (1.0 - BAR_GAP_RATIO)).max(1.0);

    let gridlines = build_gridlines(padding, view_width, view_height, max_value);
    let bars = build_bars(buckets, frequency, padding, baseline, slot, bar_width, max_value);
    let labels = build_x_labels(buckets, frequency, padding, baseline, slot);

    let axis = format!(
        r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="1"/>"#,
        padding,
        baseline,
        padding + view_width,
        baseline,
        AXIS_STROKE,
    );

    Ok(format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
  <g>{}</g>
  <g>{}</g>
  {}
  <g font-family="{}" font-size="{}" fill="{}">{}</g>
</svg>"#,
        options.width,
        options.height,
        options.width,
        options.height,
        gridlines,
        bars,
        axis,
        FONT_FAMILY,
        FONT_SIZE,
        TEXT_FILL,
        labels,
    ))
}

fn build_gridlines(padding: f64, view_width: f64, view_height: f64, max_value: f64) -> String {
    let mut out = String::new();
    for i in 1..=GRID_LINES {
        let fraction = i as f64 / GRID_LINES as f64;
        let y = padding + view_height * (1.0 - fraction);
        out.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="0.5"/>"#,
            padding,
            y,
            padding + view_width,
            y,
            GRID_STROKE,
        ));
        out.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-family="{}" font-size="{}" fill="{}">{}</text>"#,
            padding - 6.0,
            y + FONT_SIZE / 3.0,
            FONT_FAMILY,
            FONT_SIZE,
            TEXT_FILL,
            format_value(max_value * fraction),
        ));
    }
    out
}

fn build_bars(
    buckets: &[AggregateBucket],
    frequency: Frequency,
    padding: f64,
    baseline: f64,
    slot: f64,
    bar_width: f64,
    max_value: f64,
) -> String {
    let mut out = String::new();
    for (i, bucket) in buckets.iter().enumerate() {
        if bucket.value == 0.0 {
            continue;
        }
        let bar_height = (bucket.value / max_value) * (baseline - padding);
        let x = padding + i as f64 * slot + (slot - bar_width) / 2.0;
        let y = baseline - bar_height;
        out.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" rx="1"><title>{}: {}</title></rect>"#,
            x,
            y,
            bar_width,
            bar_height,
            BAR_FILL,
            bucket.period.format(frequency.date_format()),
            format_value(bucket.value),
        ));
    }
    out
}

fn build_x_labels(
    buckets: &[AggregateBucket],
    frequency: Frequency,
    padding: f64,
    baseline: f64,
    slot: f64,
) -> String {
    // Thin labels so at most MAX_X_LABELS are drawn.
    let step = buckets.len().div_ceil(MAX_X_LABELS).max(1);
    let mut out = String::new();
    for (i, bucket) in buckets.iter().enumerate() {
        if i % step != 0 {
            continue;
        }
        let x = padding + i as f64 * slot + slot / 2.0;
        out.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
            x,
            baseline + LABEL_MARGIN,
            bucket.period.format(frequency.date_format()),
        ));
    }
    out
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e9 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}
