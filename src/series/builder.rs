//! Raw rows → normalized day-axis points.
//!
//! Rows are processed in the order given; nothing is re-sorted. Ordering
//! problems (duplicate or out-of-order dates) surface later as
//! `SeriesError::NonPositiveInterval` from `metrics::enrich`.

use crate::domain::{NormalizedPoint, Observation, RawRow};
use crate::error::SeriesError;
use crate::series::date_index::{day_index, parse_date};

/// Parse one row. Any failure rejects the row (and, in `build`, the batch).
pub fn parse_observation(row: &RawRow) -> Result<Observation, SeriesError> {
    // Fields are trimmed the same way for both columns.
    let date = parse_date(row.date.trim())?;
    let value = parse_value(&row.value)?;
    Ok(Observation { date, value })
}

/// Parse and normalize `rows` so that the first point sits at offset 0.
///
/// Empty input yields an empty series.
pub fn build(rows: &[RawRow]) -> Result<Vec<NormalizedPoint>, SeriesError> {
    let observations = rows
        .iter()
        .map(parse_observation)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(normalize(&observations))
}

/// Place observations on a day axis relative to the first one.
pub fn normalize(observations: &[Observation]) -> Vec<NormalizedPoint> {
    let Some(first) = observations.first() else {
        return Vec::new();
    };
    let origin = day_index(first.date);

    observations
        .iter()
        .map(|obs| NormalizedPoint {
            date: obs.date,
            offset: day_index(obs.date) - origin,
            value: obs.value,
        })
        .collect()
}

fn parse_value(input: &str) -> Result<f64, SeriesError> {
    match input.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(SeriesError::InvalidValue {
            input: input.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::date_index::to_day_offset;

    fn rows(pairs: &[(&str, &str)]) -> Vec<RawRow> {
        pairs.iter().map(|(d, v)| RawRow::new(*d, *v)).collect()
    }

    #[test]
    fn empty_input_is_an_empty_series() {
        assert!(build(&[]).unwrap().is_empty());
    }

    #[test]
    fn first_offset_is_zero_and_rest_are_day_differences() {
        let input = rows(&[
            ("2024-02-27", "80.1"),
            ("2024-03-01", "79.8"),
            ("2024-04-15", "78.0"),
        ]);
        let points = build(&input).unwrap();

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].offset, 0);

        let origin = to_day_offset("2024-02-27").unwrap();
        for (row, point) in input.iter().zip(&points) {
            assert_eq!(point.offset, to_day_offset(&row.date).unwrap() - origin);
        }
        assert_eq!(points[1].offset, 3);
        assert_eq!(points[2].value, 78.0);
    }

    #[test]
    fn keeps_order_of_appearance() {
        let points = build(&rows(&[("2024-01-10", "70"), ("2024-01-05", "71")])).unwrap();
        assert_eq!(points[0].offset, 0);
        assert_eq!(points[1].offset, -5);
    }

    #[test]
    fn values_may_carry_surrounding_whitespace() {
        let points = build(&rows(&[("2024-01-01", " 70.25 ")])).unwrap();
        assert_eq!(points[0].value, 70.25);
    }

    #[test]
    fn dates_may_carry_surrounding_whitespace() {
        let points = build(&rows(&[(" 2024-01-01 ", "70.0"), ("\t2024-01-03", "69.5")])).unwrap();
        assert_eq!(points.iter().map(|p| p.offset).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(points[0].date, chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn bad_value_rejects_the_batch() {
        let err = build(&rows(&[("2024-01-01", "70.0"), ("2024-01-02", "seventy")])).unwrap_err();
        assert_eq!(
            err,
            SeriesError::InvalidValue {
                input: "seventy".to_string()
            }
        );
    }

    #[test]
    fn non_finite_values_are_rejected() {
        for bad in ["NaN", "inf", "-inf", ""] {
            assert!(matches!(
                build(&rows(&[("2024-01-01", bad)])),
                Err(SeriesError::InvalidValue { .. })
            ));
        }
    }

    #[test]
    fn bad_date_propagates() {
        let err = build(&rows(&[("2024-01-01", "70.0"), ("01/02/2024", "69.0")])).unwrap_err();
        assert!(matches!(err, SeriesError::InvalidDateFormat { .. }));
    }
}
