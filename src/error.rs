//! Error types.
//!
//! - `SeriesError`: deterministic parse/validation failures raised by the
//!   series pipeline (`series::*`).
//! - `AppError`: what the binary reports, carrying a process exit code.

use thiserror::Error;

/// Failures of the ingestion + metrics pipeline.
///
/// An empty series is not an error; it is represented by an empty `Vec`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDateFormat { input: String },

    #[error("Invalid value '{input}': expected a finite decimal number")]
    InvalidValue { input: String },

    /// Two adjacent points are not strictly increasing in time.
    #[error("Non-positive interval of {interval} day(s) before record #{index} (duplicate or unsorted dates)")]
    NonPositiveInterval { index: usize, interval: i64 },
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<SeriesError> for AppError {
    fn from(err: SeriesError) -> Self {
        AppError::new(3, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_errors_map_to_exit_code_3() {
        let err: AppError = SeriesError::InvalidValue {
            input: "abc".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("'abc'"));
    }
}
