//! Time-series reconstruction and smoothing.
//!
//! - `date_index`: calendar date → integer day index
//! - `builder`: raw rows → normalized day-axis points
//! - `metrics`: normalized points → enriched records (change, weekly rate, EMAs)

pub mod builder;
pub mod date_index;
pub mod metrics;

pub use builder::build;
pub use date_index::{parse_date, to_day_offset};
pub use metrics::{alpha, enrich};
