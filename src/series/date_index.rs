//! Calendar date → integer day index.
//!
//! Days are counted with chrono's proleptic Gregorian calendar
//! (`num_days_from_ce`), so two dates one calendar day apart always differ by
//! exactly 1. Nothing here touches time-of-day or timezones.

use chrono::{Datelike, NaiveDate};

use crate::error::SeriesError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict `YYYY-MM-DD` date.
///
/// chrono alone is lenient about padding (`2024-1-5` parses), so the shape is
/// checked before handing the string over.
pub fn parse_date(input: &str) -> Result<NaiveDate, SeriesError> {
    let invalid = || SeriesError::InvalidDateFormat {
        input: input.to_string(),
    };

    if !has_iso_shape(input) {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| invalid())
}

/// Days since the epoch (0001-01-01 is day 1) for a `YYYY-MM-DD` string.
pub fn to_day_offset(input: &str) -> Result<i64, SeriesError> {
    parse_date(input).map(day_index)
}

/// Day index of an already-parsed date.
pub fn day_index(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce())
}

fn has_iso_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_days_differ_by_one() {
        let a = to_day_offset("2024-03-09").unwrap();
        let b = to_day_offset("2024-03-10").unwrap();
        assert_eq!(b - a, 1);
    }

    #[test]
    fn dst_boundaries_do_not_skew_the_count() {
        // US and EU spring-forward / fall-back weekends.
        for (from, to) in [
            ("2024-03-10", "2024-03-11"),
            ("2024-03-31", "2024-04-01"),
            ("2024-10-27", "2024-10-28"),
            ("2024-11-03", "2024-11-04"),
        ] {
            assert_eq!(to_day_offset(to).unwrap() - to_day_offset(from).unwrap(), 1);
        }
    }

    #[test]
    fn spans_leap_years_and_year_ends() {
        assert_eq!(
            to_day_offset("2025-01-01").unwrap() - to_day_offset("2024-01-01").unwrap(),
            366
        );
        assert_eq!(
            to_day_offset("2024-01-01").unwrap() - to_day_offset("2023-12-31").unwrap(),
            1
        );
        assert_eq!(
            to_day_offset("2024-03-01").unwrap() - to_day_offset("2024-02-28").unwrap(),
            2
        );
    }

    #[test]
    fn matches_chrono_day_count() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(to_day_offset("2024-01-01").unwrap(), day_index(date));
        assert_eq!(to_day_offset("0001-01-01").unwrap(), 1);
    }

    #[test]
    fn rejects_malformed_dates() {
        for bad in [
            "",
            "2024-1-01",
            "2024-01-1",
            "2024/01/01",
            "01-01-2024",
            "2024-01-01T00:00",
            " 2024-01-01",
            "2024-13-01",
            "2023-02-29",
            "abcd-ef-gh",
        ] {
            let err = to_day_offset(bad).unwrap_err();
            assert_eq!(
                err,
                SeriesError::InvalidDateFormat {
                    input: bad.to_string()
                },
                "expected rejection for {bad:?}"
            );
        }
    }
}
