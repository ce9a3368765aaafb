//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed through the series pipeline in-memory
//! - exported to JSON/CSV
//! - rendered by the report, plot and TUI front-ends

use std::num::NonZeroU32;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Default short EMA window (days).
pub const DEFAULT_SHORT_WINDOW: u32 = 7;
/// Default long EMA window (days).
pub const DEFAULT_LONG_WINDOW: u32 = 30;

/// Default file name of the measurement store.
pub const DEFAULT_DATA_FILE: &str = "data.csv";

/// One row of the store as text, before any parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub date: String,
    pub value: String,
}

impl RawRow {
    pub fn new(date: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            value: value.into(),
        }
    }
}

/// A parsed measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

/// An observation placed on the day axis; the first point of a series sits at `offset == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub date: NaiveDate,
    pub offset: i64,
    pub value: f64,
}

/// A normalized point plus its derived trend metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub date: NaiveDate,
    pub offset: i64,
    pub value: f64,
    /// `value - previous value` (0 for the first record).
    pub change: f64,
    /// Days since the previous record (`None` for the first record).
    pub interval: Option<i64>,
    /// `change` scaled to a 7-day period (0 for the first record).
    pub weekly_rate: f64,
    pub ema_short: f64,
    pub ema_long: f64,
}

/// Short/long EMA window sizes, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmaWindows {
    pub short: NonZeroU32,
    pub long: NonZeroU32,
}

impl EmaWindows {
    pub fn new(short: NonZeroU32, long: NonZeroU32) -> Self {
        Self { short, long }
    }
}

impl Default for EmaWindows {
    fn default() -> Self {
        Self {
            short: NonZeroU32::new(DEFAULT_SHORT_WINDOW).unwrap_or(NonZeroU32::MIN),
            long: NonZeroU32::new(DEFAULT_LONG_WINDOW).unwrap_or(NonZeroU32::MIN),
        }
    }
}

/// Which record field a plot series is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    /// Raw measurements.
    Value,
    /// Short-window EMA.
    EmaShort,
    /// Long-window EMA.
    EmaLong,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Value, Channel::EmaShort, Channel::EmaLong];

    /// Read this channel from a record.
    pub fn extract(self, record: &EnrichedRecord) -> f64 {
        match self {
            Channel::Value => record.value,
            Channel::EmaShort => record.ema_short,
            Channel::EmaLong => record.ema_long,
        }
    }

    pub fn label(self, windows: EmaWindows) -> String {
        match self {
            Channel::Value => "value".to_string(),
            Channel::EmaShort => format!("ema_{}", windows.short),
            Channel::EmaLong => format!("ema_{}", windows.long),
        }
    }
}

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub data_path: PathBuf,
    pub windows: EmaWindows,

    pub channels: Vec<Channel>,
    pub plot_width: usize,
    pub plot_height: usize,
    /// Write a BMP image instead of printing the ASCII plot.
    pub bmp_path: Option<PathBuf>,

    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

impl TrackerConfig {
    /// Config for `data_path` with every other knob at its default.
    pub fn with_data_path(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            windows: EmaWindows::default(),
            channels: Channel::ALL.to_vec(),
            plot_width: 100,
            plot_height: 25,
            bmp_path: None,
            export_csv: None,
            export_json: None,
        }
    }
}
