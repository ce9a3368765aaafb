//! The measurement store: a flat `date,value` CSV file.
//!
//! Reading returns raw text rows; parsing and validation belong to
//! `series::builder`. A missing file is treated as an empty store so the first
//! run is friendly.

use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;

use chrono::{Local, NaiveDate};

use crate::domain::RawRow;
use crate::error::AppError;

const HEADER: [&str; 2] = ["date", "value"];

/// Today's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Read every data row of the store, skipping the header line.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>, AppError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "store not found, treating as empty");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(AppError::new(
                2,
                format!("Failed to open data file '{}': {e}", path.display()),
            ));
        }
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // Blank lines are skipped by the reader, so prefer its own position.
        // Fallback: 1-based lines, plus the header.
        let fallback = idx as u64 + 2;
        let record = result.map_err(|e| {
            let line = e.position().map_or(fallback, |p| p.line());
            AppError::new(2, format!("{}:{line}: CSV parse error: {e}", path.display()))
        })?;
        let line = record.position().map_or(fallback, |p| p.line());

        match (record.get(0), record.get(1)) {
            (Some(date), Some(value)) => rows.push(RawRow::new(date, value)),
            _ => {
                return Err(AppError::new(
                    2,
                    format!("{}:{line}: expected two fields `date,value`", path.display()),
                ));
            }
        }
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), "read store");
    Ok(rows)
}

/// Append one measurement, creating the file (with header) if needed.
pub fn append_value(path: &Path, date: NaiveDate, value: f64) -> Result<(), AppError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(AppError::new(2, format!("Refusing to record non-positive value: {value}")));
    }

    let needs_header = match std::fs::metadata(path) {
        Ok(meta) => meta.len() == 0,
        Err(e) if e.kind() == ErrorKind::NotFound => true,
        Err(e) => {
            return Err(AppError::new(
                2,
                format!("Failed to inspect data file '{}': {e}", path.display()),
            ));
        }
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open data file '{}': {e}", path.display())))?;

    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    let write_err = |e: csv::Error| AppError::new(2, format!("Failed to write data file '{}': {e}", path.display()));

    if needs_header {
        writer.write_record(HEADER).map_err(write_err)?;
    }
    writer
        .write_record([date.format("%Y-%m-%d").to_string(), value.to_string()])
        .map_err(write_err)?;
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush data file '{}': {e}", path.display())))?;

    tracing::info!(path = %path.display(), %date, value, "recorded measurement");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("weight-trend-{}-{name}.csv", std::process::id()));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let path = temp_path("missing");
        assert!(read_rows(&path).unwrap().is_empty());
    }

    #[test]
    fn append_creates_header_then_rows() {
        let path = temp_path("append");
        let d1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        append_value(&path, d1, 70.0).unwrap();
        append_value(&path, d2, 69.5).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "date,value\n2024-01-01,70\n2024-01-08,69.5\n");

        let rows = read_rows(&path).unwrap();
        assert_eq!(
            rows,
            vec![RawRow::new("2024-01-01", "70"), RawRow::new("2024-01-08", "69.5")]
        );
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn reads_existing_file_with_whitespace() {
        let path = temp_path("whitespace");
        std::fs::write(&path, "date,value\n2024-02-01, 81.2\n\n2024-02-03 ,80.9\n").unwrap();
        let rows = read_rows(&path).unwrap();
        assert_eq!(
            rows,
            vec![RawRow::new("2024-02-01", "81.2"), RawRow::new("2024-02-03", "80.9")]
        );
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn short_row_reports_line_number() {
        let path = temp_path("short");
        std::fs::write(&path, "date,value\n2024-02-01,81.2\n2024-02-02\n").unwrap();
        let err = read_rows(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains(":3:"), "{err}");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn short_row_after_blank_lines_reports_file_line() {
        let path = temp_path("blank-lines");
        std::fs::write(&path, "date,value\n\n\n2024-01-01,70\n2024-01-02\n").unwrap();
        let err = read_rows(&path).unwrap_err();
        assert!(err.to_string().contains(":5:"), "{err}");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn rejects_non_positive_values() {
        let path = temp_path("reject");
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(append_value(&path, date, 0.0).is_err());
        assert!(append_value(&path, date, f64::NAN).is_err());
        assert!(!path.exists());
    }
}
