//! Per-day new-staker line chart.
//!
//! Days are spaced evenly along the x axis regardless of calendar gaps,
//! matching how the daily series is reported: one slot per day that had
//! at least one new staker.

use super::{
    draw_axes, draw_x_axis_label, draw_y_axis_label, draw_y_ticks, nice_step, svg_close, svg_open,
    ChartConfig, PlotArea,
};
use crate::parser::schema::DailyCount;
use crate::utils::error::ChartError;
use log::info;

const DEFAULT_TITLE: &str = "New dzSOL stakers per day";

/// Render the daily new-staker series as an SVG document
///
/// # Arguments
/// * `daily` - Per-day counts, oldest first
/// * `config` - Optional size/title overrides
///
/// # Errors
/// `ChartError::EmptyData` when there is nothing to plot
pub fn render_daily_stakers(
    daily: &[DailyCount],
    config: Option<&ChartConfig>,
) -> Result<String, ChartError> {
    if daily.is_empty() {
        return Err(ChartError::EmptyData);
    }

    let mut config = config.cloned().unwrap_or_default();
    if config.title.is_empty() {
        config.title = DEFAULT_TITLE.to_string();
    }

    info!("Rendering daily staker chart for {} days", daily.len());

    let area = PlotArea::from_config(&config);
    let slot_width = area.width / daily.len() as f64;

    let max_count = daily.iter().map(|d| d.new_wallets).max().unwrap_or(0) as f64;
    let step = nice_step(max_count);
    let y_max = ((max_count / step).ceil() * step).max(step);

    let mut svg = String::new();
    svg_open(&mut svg, &config);
    draw_y_ticks(&mut svg, &area, y_max, true);

    // Vertical gridline plus rotated date label per day slot
    let mut points = Vec::with_capacity(daily.len());
    for (i, day) in daily.iter().enumerate() {
        let x = area.left + (i as f64 + 0.5) * slot_width;
        let y = area.y(day.new_wallets as f64, y_max);
        points.push((x, y));

        svg.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="rgb(169, 169, 169)" stroke-width="0.5"/>"#,
            x,
            area.top,
            x,
            area.bottom()
        ));
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end" transform="rotate(-45 {:.1} {:.1})">{}</text>"#,
            x,
            area.bottom() + 16.0,
            x,
            area.bottom() + 16.0,
            day.date
        ));
    }

    if points.len() > 1 {
        let path: Vec<String> = points
            .iter()
            .map(|(x, y)| format!("{:.2},{:.2}", x, y))
            .collect();
        svg.push_str(&format!(
            r#"<polyline points="{}" fill="none" stroke="rgb(70, 130, 180)" stroke-width="2"/>"#,
            path.join(" ")
        ));
    }

    for ((x, y), day) in points.iter().zip(daily) {
        svg.push_str(&format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="4" fill="rgb(70, 130, 180)"><title>{}: {} wallets</title></circle>"#,
            x, y, day.date, day.new_wallets
        ));
    }

    draw_axes(&mut svg, &area);
    draw_x_axis_label(&mut svg, &config, &area, "Date");
    draw_y_axis_label(&mut svg, &area, "Wallets");
    svg_close(&mut svg);

    Ok(svg)
}
