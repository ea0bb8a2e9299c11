//! SVG chart generation using custom hand-rolled rendering.
//!
//! Three fixed layouts cover everything the report needs:
//! - Histogram of stake amounts over the bucket edges
//! - Horizontal boxplot of stake amounts
//! - Per-day new-staker line chart
//!
//! A plotting dependency would be overkill for three static charts, so
//! the SVG is assembled directly from strings.

pub mod boxplot;
pub mod daily;
pub mod histogram;

// Re-export main entry points
pub use boxplot::render_boxplot;
pub use daily::render_daily_stakers;
pub use histogram::render_histogram;

/// Chart configuration shared by all renderers
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            width: 1200,
            height: 600,
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

// Pixel margins around the plot area
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 80.0;

/// Rectangular drawing region between the margins
#[derive(Debug, Clone, Copy)]
pub(crate) struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn from_config(config: &ChartConfig) -> Self {
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: (config.width as f64 - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            height: (config.height as f64 - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Map a data value in [min, max] to an x pixel
    pub fn x(&self, value: f64, min: f64, max: f64) -> f64 {
        if max <= min {
            return self.left;
        }
        self.left + (value - min) / (max - min) * self.width
    }

    /// Map a data value in [0, max] to a y pixel (larger values sit higher)
    pub fn y(&self, value: f64, max: f64) -> f64 {
        if max <= 0.0 {
            return self.bottom();
        }
        self.bottom() - value / max * self.height
    }
}

/// Write the SVG header, style block, background, and title
pub(crate) fn svg_open(out: &mut String, config: &ChartConfig) {
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        config.width, config.height, config.width, config.height
    ));
    out.push_str(
        r#"<style>text { font: 12px sans-serif; } .title { font: bold 16px sans-serif; } .axis-label { font: 13px sans-serif; }</style>"#,
    );
    out.push_str(&format!(
        r#"<rect x="0" y="0" width="{}" height="{}" fill="white"/>"#,
        config.width, config.height
    ));
    if !config.title.is_empty() {
        out.push_str(&format!(
            r#"<text x="{}" y="26" text-anchor="middle" class="title">{}</text>"#,
            config.width / 2,
            config.title
        ));
    }
}

pub(crate) fn svg_close(out: &mut String) {
    out.push_str("</svg>");
}

/// Draw the left and bottom axis lines
pub(crate) fn draw_axes(out: &mut String, area: &PlotArea) {
    out.push_str(&format!(
        r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="black" stroke-width="1"/>"#,
        area.left,
        area.top,
        area.left,
        area.bottom()
    ));
    out.push_str(&format!(
        r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="black" stroke-width="1"/>"#,
        area.left,
        area.bottom(),
        area.right(),
        area.bottom()
    ));
}

/// Draw y-axis ticks and labels from 0 to `max`, with optional gridlines
pub(crate) fn draw_y_ticks(out: &mut String, area: &PlotArea, max: f64, gridlines: bool) {
    let step = nice_step(max);
    let mut value = 0.0;
    while value <= max + step * 1e-3 {
        let y = area.y(value, max);
        if gridlines && value > 0.0 {
            out.push_str(&format!(
                r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="rgb(169, 169, 169)" stroke-width="0.5"/>"#,
                area.left,
                y,
                area.right(),
                y
            ));
        }
        out.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="black" stroke-width="1"/>"#,
            area.left - 5.0,
            y,
            area.left,
            y
        ));
        out.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end">{}</text>"#,
            area.left - 9.0,
            y + 4.0,
            format_number(value)
        ));
        value += step;
    }
}

/// Draw numeric x-axis ticks and labels across [min, max]
pub(crate) fn draw_x_ticks(out: &mut String, area: &PlotArea, min: f64, max: f64) {
    let step = nice_step((max - min).max(f64::MIN_POSITIVE));
    let mut value = (min / step).ceil() * step;
    while value <= max + step * 1e-3 {
        let x = area.x(value, min, max);
        out.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="black" stroke-width="1"/>"#,
            x,
            area.bottom(),
            x,
            area.bottom() + 5.0
        ));
        out.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
            x,
            area.bottom() + 20.0,
            format_number(value)
        ));
        value += step;
    }
}

/// Centered caption under the x axis
pub(crate) fn draw_x_axis_label(out: &mut String, config: &ChartConfig, area: &PlotArea, label: &str) {
    out.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" class="axis-label">{}</text>"#,
        area.left + area.width / 2.0,
        config.height as f64 - 12.0,
        label
    ));
}

/// Rotated caption along the y axis
pub(crate) fn draw_y_axis_label(out: &mut String, area: &PlotArea, label: &str) {
    let x = 18.0;
    let y = area.top + area.height / 2.0;
    out.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" class="axis-label" transform="rotate(-90 {:.1} {:.1})">{}</text>"#,
        x, y, x, y, label
    ));
}

/// Pick a 1/2/5-style tick step that yields roughly five ticks
pub(crate) fn nice_step(max: f64) -> f64 {
    if max <= 0.0 || !max.is_finite() {
        return 1.0;
    }
    let raw = max / 5.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let step = if normalized < 1.5 {
        1.0
    } else if normalized < 3.5 {
        2.0
    } else if normalized < 7.5 {
        5.0
    } else {
        10.0
    };
    step * magnitude
}

/// Compact numeric label: integers bare, fractions to two places
pub(crate) fn format_number(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 && value.abs() < 1e15 {
        return format!("{}", value.round() as i64);
    }
    let mut text = format!("{:.2}", value);
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_step_small_counts() {
        assert_eq!(nice_step(5.0), 1.0);
        assert_eq!(nice_step(12.0), 2.0);
        assert_eq!(nice_step(30.0), 5.0);
        assert_eq!(nice_step(200.0), 50.0);
    }

    #[test]
    fn test_nice_step_degenerate() {
        assert_eq!(nice_step(0.0), 1.0);
        assert_eq!(nice_step(f64::INFINITY), 1.0);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(2.10), "2.1");
    }

    #[test]
    fn test_plot_area_mapping() {
        let config = ChartConfig::new().with_size(1200, 600);
        let area = PlotArea::from_config(&config);

        assert_eq!(area.x(0.0, 0.0, 10.0), area.left);
        assert_eq!(area.x(10.0, 0.0, 10.0), area.right());
        assert_eq!(area.y(0.0, 10.0), area.bottom());
        assert_eq!(area.y(10.0, 10.0), area.top);
    }

    #[test]
    fn test_plot_area_degenerate_range() {
        let area = PlotArea::from_config(&ChartConfig::default());
        // Zero-width data range collapses to the left edge instead of NaN
        assert_eq!(area.x(5.0, 5.0, 5.0), area.left);
        assert_eq!(area.y(3.0, 0.0), area.bottom());
    }
}
