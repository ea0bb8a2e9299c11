//! Horizontal boxplot of stake amounts.
//!
//! Quartiles use linear interpolation between order statistics, whiskers
//! extend to the furthest point within 1.5 IQR of the box, and anything
//! beyond the whiskers is drawn as an individual outlier marker.

use super::{
    draw_axes, draw_x_axis_label, draw_x_ticks, format_number, svg_close, svg_open, ChartConfig,
    PlotArea,
};
use crate::utils::error::ChartError;
use log::info;
use std::cmp::Ordering;

const DEFAULT_TITLE: &str = "Boxplot of dzSOL staked";

/// Five-number summary plus outliers for one data series
///
/// **Public** - also useful for textual summaries
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

/// Compute box statistics for a slice of amounts
pub fn box_stats(amounts: &[f64]) -> BoxStats {
    let mut sorted = amounts.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let q1 = percentile(&sorted, 25.0);
    let median = percentile(&sorted, 50.0);
    let q3 = percentile(&sorted, 75.0);

    let iqr = q3 - q1;
    let low_fence = q1 - 1.5 * iqr;
    let high_fence = q3 + 1.5 * iqr;

    let whisker_low = sorted
        .iter()
        .copied()
        .find(|v| *v >= low_fence)
        .unwrap_or(q1);
    let whisker_high = sorted
        .iter()
        .rev()
        .copied()
        .find(|v| *v <= high_fence)
        .unwrap_or(q3);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < low_fence || *v > high_fence)
        .collect();

    BoxStats {
        q1,
        median,
        q3,
        whisker_low,
        whisker_high,
        outliers,
    }
}

/// Interpolated percentile over pre-sorted values
///
/// **Private** - expects ascending input
fn percentile(sorted: &[f64], pct: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Render the boxplot as an SVG document
///
/// # Errors
/// `ChartError::EmptyData` when there is nothing to plot
pub fn render_boxplot(amounts: &[f64], config: Option<&ChartConfig>) -> Result<String, ChartError> {
    if amounts.is_empty() {
        return Err(ChartError::EmptyData);
    }

    let mut config = config.cloned().unwrap_or_default();
    if config.title.is_empty() {
        config.title = DEFAULT_TITLE.to_string();
    }

    let stats = box_stats(amounts);
    info!(
        "Rendering boxplot: median {} over {} amounts ({} outliers)",
        format_number(stats.median),
        amounts.len(),
        stats.outliers.len()
    );

    let area = PlotArea::from_config(&config);

    // Pad the x range so whiskers and outliers sit off the frame edge
    let data_min = amounts.iter().fold(f64::MAX, |acc, a| acc.min(*a));
    let data_max = amounts.iter().fold(f64::MIN, |acc, a| acc.max(*a));
    let span = data_max - data_min;
    let pad = if span > 0.0 { span * 0.05 } else { 0.5 };
    let x_min = data_min - pad;
    let x_max = data_max + pad;

    let mid_y = area.top + area.height / 2.0;
    let box_half = (area.height * 0.2).min(60.0);
    let cap_half = box_half * 0.5;

    let mut svg = String::new();
    svg_open(&mut svg, &config);

    // Whisker line, box, median, caps
    svg.push_str(&format!(
        r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="black" stroke-width="1"/>"#,
        area.x(stats.whisker_low, x_min, x_max),
        mid_y,
        area.x(stats.q1, x_min, x_max),
        mid_y
    ));
    svg.push_str(&format!(
        r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="black" stroke-width="1"/>"#,
        area.x(stats.q3, x_min, x_max),
        mid_y,
        area.x(stats.whisker_high, x_min, x_max),
        mid_y
    ));

    for whisker in [stats.whisker_low, stats.whisker_high] {
        let x = area.x(whisker, x_min, x_max);
        svg.push_str(&format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="black" stroke-width="1"/>"#,
            x,
            mid_y - cap_half,
            x,
            mid_y + cap_half
        ));
    }

    let box_left = area.x(stats.q1, x_min, x_max);
    let box_right = area.x(stats.q3, x_min, x_max);
    svg.push_str(&format!(
        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="rgb(70, 130, 180)" fill-opacity="0.4" stroke="black" stroke-width="1"><title>Q1 {} / median {} / Q3 {}</title></rect>"#,
        box_left,
        mid_y - box_half,
        (box_right - box_left).max(1.0),
        box_half * 2.0,
        format_number(stats.q1),
        format_number(stats.median),
        format_number(stats.q3)
    ));

    let median_x = area.x(stats.median, x_min, x_max);
    svg.push_str(&format!(
        r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="rgb(220, 20, 60)" stroke-width="2"/>"#,
        median_x,
        mid_y - box_half,
        median_x,
        mid_y + box_half
    ));

    // Outliers as hollow markers
    for outlier in &stats.outliers {
        svg.push_str(&format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="3.5" fill="none" stroke="black" stroke-width="1"><title>{}</title></circle>"#,
            area.x(*outlier, x_min, x_max),
            mid_y,
            format_number(*outlier)
        ));
    }

    draw_axes(&mut svg, &area);
    draw_x_ticks(&mut svg, &area, x_min, x_max);
    draw_x_axis_label(&mut svg, &config, &area, "dzSOL staked");
    svg_close(&mut svg);

    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&sorted, 50.0), 2.5);
        assert_eq!(percentile(&sorted, 25.0), 1.75);
        assert_eq!(percentile(&sorted, 100.0), 4.0);
    }

    #[test]
    fn test_box_stats_simple_series() {
        let stats = box_stats(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(stats.q1, 3.0);
        assert_eq!(stats.median, 5.0);
        assert_eq!(stats.q3, 7.0);
        assert_eq!(stats.whisker_low, 1.0);
        assert_eq!(stats.whisker_high, 9.0);
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn test_box_stats_flags_outlier() {
        let stats = box_stats(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 100.0]);
        assert_eq!(stats.outliers, vec![100.0]);
        assert_eq!(stats.whisker_high, 8.0);
    }

    #[test]
    fn test_box_stats_single_value() {
        let stats = box_stats(&[5.0]);
        assert_eq!(stats.median, 5.0);
        assert_eq!(stats.q1, 5.0);
        assert_eq!(stats.whisker_high, 5.0);
    }

    #[test]
    fn test_render_rejects_empty() {
        assert!(matches!(
            render_boxplot(&[], None),
            Err(ChartError::EmptyData)
        ));
    }

    #[test]
    fn test_render_draws_outlier_markers() {
        let svg = render_boxplot(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 100.0], None).unwrap();
        assert!(svg.contains(DEFAULT_TITLE));
        assert_eq!(svg.matches("<circle").count(), 1);
    }

    #[test]
    fn test_render_handles_identical_values() {
        // Zero IQR must still produce a document, not NaN coordinates
        let svg = render_boxplot(&[2.0, 2.0, 2.0], None).unwrap();
        assert!(svg.ends_with("</svg>"));
        assert!(!svg.contains("NaN"));
    }
}
