//! Plotting collaborators.
//!
//! Both renderers take one or more raw numeric series and normalize **each
//! series independently** to its own min/max before mapping to cells/pixels:
//!
//! - `ascii`: fixed-size character grid for the terminal
//! - `bmp`: 24-bit bitmap image written to disk

use crate::domain::{Channel, EmaWindows, EnrichedRecord};

pub mod ascii;
pub mod bmp;

pub use ascii::render_ascii_plot;
pub use bmp::{Canvas, encode_bmp, render_bitmap, write_bmp};

/// A labelled sequence of values, evenly spaced along x by index.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// Pull the requested channels out of a record list, one series per channel.
pub fn series_from_records(records: &[EnrichedRecord], channels: &[Channel], windows: EmaWindows) -> Vec<Series> {
    channels
        .iter()
        .map(|&channel| {
            Series::new(
                channel.label(windows),
                records.iter().map(|r| channel.extract(r)).collect(),
            )
        })
        .collect()
}

/// Finite min/max of a series.
fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;
    for &v in values.iter().filter(|v| v.is_finite()) {
        min_v = min_v.min(v);
        max_v = max_v.max(v);
    }
    if min_v.is_finite() && max_v.is_finite() {
        Some((min_v, max_v))
    } else {
        None
    }
}

/// Position of sample `i` of `n` in `[0, 1]`; a lone sample sits at 0.
fn unit_x(i: usize, n: usize) -> f64 {
    if n <= 1 {
        0.0
    } else {
        i as f64 / (n - 1) as f64
    }
}

/// Position of `v` within `[min, max]` in `[0, 1]`; a flat series sits in the middle.
fn unit_y(v: f64, min: f64, max: f64) -> f64 {
    if max > min {
        ((v - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.5
    }
}
