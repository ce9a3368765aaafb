//! Reporting utilities: series summary and formatted terminal output.

use chrono::NaiveDate;

use crate::domain::EnrichedRecord;

pub mod format;

pub use format::*;

/// Whole-series figures shown under the records table.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub span_days: i64,
    pub first_value: f64,
    pub last_value: f64,
    pub net_change: f64,
    /// Net change scaled to 7 days over the whole span (0 for a single day).
    pub weekly_rate: f64,
    pub ema_short: f64,
    pub ema_long: f64,
}

/// Summarize a series; `None` when there are no records.
pub fn summarize(records: &[EnrichedRecord]) -> Option<Summary> {
    let first = records.first()?;
    let last = records.last()?;

    let span_days = last.offset - first.offset;
    let net_change = last.value - first.value;
    let weekly_rate = if span_days > 0 {
        net_change * 7.0 / span_days as f64
    } else {
        0.0
    };

    Some(Summary {
        count: records.len(),
        first_date: first.date,
        last_date: last.date,
        span_days,
        first_value: first.value,
        last_value: last.value,
        net_change,
        weekly_rate,
        ema_short: last.ema_short,
        ema_long: last.ema_long,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmaWindows, RawRow};
    use crate::series::{build, enrich};

    #[test]
    fn summarize_empty_is_none() {
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn summarize_basic() {
        let rows = [
            RawRow::new("2024-01-01", "80.0"),
            RawRow::new("2024-01-08", "79.0"),
            RawRow::new("2024-01-15", "78.0"),
        ];
        let records = enrich(&build(&rows).unwrap(), EmaWindows::default()).unwrap();
        let s = summarize(&records).unwrap();
        assert_eq!(s.count, 3);
        assert_eq!(s.span_days, 14);
        assert_eq!(s.net_change, -2.0);
        assert_eq!(s.weekly_rate, -1.0);
        assert_eq!(s.ema_short, records[2].ema_short);
    }
}
