//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw and parsed measurements (`RawRow`, `Observation`)
//! - the day-axis series (`NormalizedPoint`) and its derived form (`EnrichedRecord`)
//! - run settings (`EmaWindows`, `Channel`, `TrackerConfig`)

pub mod types;

pub use types::*;
