//! Export enriched records to CSV or JSON.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::EnrichedRecord;
use crate::error::AppError;

/// Write enriched records to a CSV file.
pub fn write_records_csv(path: &Path, records: &[EnrichedRecord]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(file, "date,offset,value,change,interval,weekly_rate,ema_short,ema_long")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for r in records {
        writeln!(
            file,
            "{},{},{:.4},{:.4},{},{:.4},{:.4},{:.4}",
            r.date,
            r.offset,
            r.value,
            r.change,
            r.interval.map(|d| d.to_string()).unwrap_or_default(),
            r.weekly_rate,
            r.ema_short,
            r.ema_long,
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    tracing::info!(path = %path.display(), records = records.len(), "exported CSV");
    Ok(())
}

/// Write enriched records to a pretty-printed JSON array.
pub fn write_records_json(path: &Path, records: &[EnrichedRecord]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, records)
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;

    tracing::info!(path = %path.display(), records = records.len(), "exported JSON");
    Ok(())
}
