//! Output writers for report data and charts.
//!
//! This module handles writing data to disk:
//! - JSON stake reports
//! - SVG charts

pub mod json;
pub mod svg;

// Re-export main functions
pub use json::{read_report, write_report};
pub use svg::write_svg;
