//! Derived trend metrics: change, weekly rate and dual-window EMAs.
//!
//! EMAs are defined for evenly spaced samples, but measurements are logged on
//! an irregular cadence. A gap of `n` days between two observations is
//! therefore walked as `n` daily sub-steps over linearly interpolated values,
//! so the decay always behaves like a daily EMA.
//!
//! Enrichment is a left-to-right fold; each record depends only on the
//! current point and `FoldState` of the previous record.

use crate::domain::{EmaWindows, EnrichedRecord, NormalizedPoint};
use crate::error::SeriesError;

const DAYS_PER_WEEK: f64 = 7.0;

/// Smoothing factor for a window of `window` periods: `2 / (1 + N)`.
pub fn alpha(window: u32) -> f64 {
    2.0 / (1.0 + f64::from(window))
}

/// What each step carries forward from the previous record.
#[derive(Debug, Clone, Copy)]
struct FoldState {
    offset: i64,
    value: f64,
    ema_short: f64,
    ema_long: f64,
}

/// Enrich a normalized series.
///
/// Fails with `NonPositiveInterval` when two adjacent points are not strictly
/// increasing in time. Empty input yields an empty output.
pub fn enrich(points: &[NormalizedPoint], windows: EmaWindows) -> Result<Vec<EnrichedRecord>, SeriesError> {
    let Some(first) = points.first() else {
        return Ok(Vec::new());
    };

    let alpha_short = alpha(windows.short.get());
    let alpha_long = alpha(windows.long.get());

    let mut out = Vec::with_capacity(points.len());
    out.push(EnrichedRecord {
        date: first.date,
        offset: first.offset,
        value: first.value,
        change: 0.0,
        interval: None,
        weekly_rate: 0.0,
        ema_short: first.value,
        ema_long: first.value,
    });

    let mut state = FoldState {
        offset: first.offset,
        value: first.value,
        ema_short: first.value,
        ema_long: first.value,
    };

    for (index, point) in points.iter().enumerate().skip(1) {
        let interval = point.offset - state.offset;
        if interval <= 0 {
            return Err(SeriesError::NonPositiveInterval { index, interval });
        }

        let change = point.value - state.value;
        // Scale factor first: 7-day gaps multiply by exactly 1.0.
        let weekly_rate = change * (DAYS_PER_WEEK / interval as f64);
        let ema_short = ema_over_gap(alpha_short, state.value, point.value, interval, state.ema_short);
        let ema_long = ema_over_gap(alpha_long, state.value, point.value, interval, state.ema_long);

        out.push(EnrichedRecord {
            date: point.date,
            offset: point.offset,
            value: point.value,
            change,
            interval: Some(interval),
            weekly_rate,
            ema_short,
            ema_long,
        });

        state = FoldState {
            offset: point.offset,
            value: point.value,
            ema_short,
            ema_long,
        };
    }

    Ok(out)
}

/// Advance `ema` across `interval` daily sub-steps from `prev` to `curr`.
///
/// `interval` must be positive.
pub fn ema_over_gap(alpha: f64, prev: f64, curr: f64, interval: i64, mut ema: f64) -> f64 {
    for k in 1..=interval {
        // The last sub-step lands exactly on the observation.
        let v = if k == interval {
            curr
        } else {
            prev + (curr - prev) * k as f64 / interval as f64
        };
        // Same as `v * alpha + ema * (1 - alpha)`, but exact when `v == ema`.
        ema += alpha * (v - ema);
    }
    ema
}
