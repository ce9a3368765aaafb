//! Shared "load series" logic used by the CLI, the text menu and the TUI.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! store read -> parse/normalize -> enrich
//!
//! The front-ends can then focus on presentation (printing vs widgets).

use std::path::Path;

use crate::domain::{EmaWindows, EnrichedRecord, RawRow, TrackerConfig};
use crate::error::AppError;
use crate::io::store;
use crate::series;

/// Read the store named by `config` and enrich every measurement.
pub fn load_records(config: &TrackerConfig) -> Result<Vec<EnrichedRecord>, AppError> {
    load_records_from(&config.data_path, config.windows)
}

/// Same as `load_records`, for an explicit path and windows.
pub fn load_records_from(path: &Path, windows: EmaWindows) -> Result<Vec<EnrichedRecord>, AppError> {
    let rows = store::read_rows(path)?;
    enrich_rows(&rows, windows)
}

/// Parse, normalize and enrich already-split rows.
pub fn enrich_rows(rows: &[RawRow], windows: EmaWindows) -> Result<Vec<EnrichedRecord>, AppError> {
    let points = series::build(rows)?;
    let records = series::enrich(&points, windows)?;

    tracing::debug!(
        rows = rows.len(),
        records = records.len(),
        short = windows.short.get(),
        long = windows.long.get(),
        "enriched series"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_store_is_an_empty_series() {
        let path = std::env::temp_dir().join(format!("weight-trend-{}-pipeline-missing.csv", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let records = load_records(&TrackerConfig::with_data_path(&path)).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn loads_and_enriches_file() {
        let path = std::env::temp_dir().join(format!("weight-trend-{}-pipeline.csv", std::process::id()));
        std::fs::write(&path, "date,value\n2024-01-01,70.0\n2024-01-08,69.0\n").unwrap();

        let records = load_records(&TrackerConfig::with_data_path(&path)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].offset, 7);
        assert_eq!(records[1].weekly_rate, -1.0);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn duplicate_dates_surface_as_exit_code_3() {
        let rows = [RawRow::new("2024-01-01", "70.0"), RawRow::new("2024-01-01", "70.2")];
        let err = enrich_rows(&rows, EmaWindows::default()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("Non-positive interval"));
    }
}
