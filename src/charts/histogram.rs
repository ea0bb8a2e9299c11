//! Histogram of stake amounts over the fixed bucket edges.
//!
//! Bins follow the bucket boundaries (0, 1, 5, 20, 100) with the final
//! edge stretched to the largest observed amount, so bar widths are
//! proportional to the value range they cover rather than uniform.

use super::{
    draw_axes, draw_x_axis_label, draw_y_axis_label, draw_y_ticks, format_number, nice_step,
    svg_close, svg_open, ChartConfig, PlotArea,
};
use crate::utils::error::ChartError;
use log::info;

const DEFAULT_TITLE: &str = "Distribution of dzSOL staked by new wallets";

/// Fixed lower bin edges; the final edge is data-dependent
const BASE_EDGES: [f64; 5] = [0.0, 1.0, 5.0, 20.0, 100.0];

/// Render the stake-size histogram as an SVG document
///
/// # Arguments
/// * `amounts` - First-stake amounts, one per wallet
/// * `config` - Optional size/title overrides
///
/// # Errors
/// `ChartError::EmptyData` when there is nothing to plot
pub fn render_histogram(amounts: &[f64], config: Option<&ChartConfig>) -> Result<String, ChartError> {
    if amounts.is_empty() {
        return Err(ChartError::EmptyData);
    }

    let mut config = config.cloned().unwrap_or_default();
    if config.title.is_empty() {
        config.title = DEFAULT_TITLE.to_string();
    }

    let edges = bin_edges(amounts);
    let counts = bin_counts(amounts, &edges);
    info!(
        "Rendering histogram: {} amounts across {} bins",
        amounts.len(),
        counts.len()
    );

    let area = PlotArea::from_config(&config);
    let x_max = edges[edges.len() - 1];

    // Y axis tops out at the next tick above the tallest bar
    let max_count = counts.iter().copied().max().unwrap_or(0) as f64;
    let step = nice_step(max_count);
    let y_max = ((max_count / step).ceil() * step).max(step);

    let mut svg = String::new();
    svg_open(&mut svg, &config);

    for (i, count) in counts.iter().enumerate() {
        let x_left = area.x(edges[i], 0.0, x_max);
        let x_right = area.x(edges[i + 1], 0.0, x_max);
        let bar_width = x_right - x_left;
        if bar_width <= 0.0 {
            continue;
        }

        let y_top = area.y(*count as f64, y_max);
        let bar_height = area.bottom() - y_top;
        svg.push_str(&format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="rgb(70, 130, 180)" stroke="black" stroke-width="1"><title>{}-{}: {} wallets</title></rect>"#,
            x_left,
            y_top,
            bar_width,
            bar_height,
            format_number(edges[i]),
            format_number(edges[i + 1]),
            count
        ));
    }

    draw_axes(&mut svg, &area);
    draw_y_ticks(&mut svg, &area, y_max, false);

    // Ticks at every bin edge rather than at rounded intervals
    for edge in &edges {
        let x = area.x(*edge, 0.0, x_max);
        svg.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="black" stroke-width="1"/>"#,
            x,
            area.bottom(),
            x,
            area.bottom() + 5.0
        ));
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
            x,
            area.bottom() + 20.0,
            format_number(*edge)
        ));
    }

    draw_x_axis_label(&mut svg, &config, &area, "dzSOL staked");
    draw_y_axis_label(&mut svg, &area, "Number of wallets");
    svg_close(&mut svg);

    Ok(svg)
}

/// Bin edges: the fixed lower boundaries plus a data-dependent top edge.
/// When no amount exceeds 100 the final bin collapses to zero width.
fn bin_edges(amounts: &[f64]) -> [f64; 6] {
    let max = amounts.iter().fold(f64::MIN, |acc, a| acc.max(*a));
    [
        BASE_EDGES[0],
        BASE_EDGES[1],
        BASE_EDGES[2],
        BASE_EDGES[3],
        BASE_EDGES[4],
        max.max(BASE_EDGES[4]),
    ]
}

/// Count amounts per bin. Bins are half-open except the last, which
/// includes its upper edge. Values outside [0, top] are not counted.
fn bin_counts(amounts: &[f64], edges: &[f64; 6]) -> [u64; 5] {
    let mut counts = [0u64; 5];
    for amount in amounts {
        for i in 0..5 {
            let is_last = i == 4;
            let in_bin = if is_last {
                *amount >= edges[i] && *amount <= edges[i + 1]
            } else {
                *amount >= edges[i] && *amount < edges[i + 1]
            };
            if in_bin {
                counts[i] += 1;
                break;
            }
        }
    }
    counts
}
