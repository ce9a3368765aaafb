//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Each series gets its own marker; later series overwrite earlier ones where
//! they land on the same cell.

use crate::plot::{Series, unit_x, unit_y, value_range};

const MARKERS: [char; 5] = ['o', '*', '+', 'x', '#'];

/// Marker used for the `idx`-th series.
pub fn marker(idx: usize) -> char {
    MARKERS[idx % MARKERS.len()]
}

/// Render all series into one `width` x `height` grid.
pub fn render_ascii_plot(series: &[Series], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let mut grid = vec![vec![' '; width]; height];
    let mut legend = Vec::new();

    for (idx, s) in series.iter().enumerate() {
        let Some((min_v, max_v)) = value_range(&s.values) else {
            continue;
        };
        let ch = marker(idx);
        legend.push(format!("{ch} {}=[{min_v:.2}, {max_v:.2}]", s.label));

        let n = s.values.len();
        for (i, &v) in s.values.iter().enumerate() {
            if !v.is_finite() {
                continue;
            }
            let x = map_col(unit_x(i, n), width);
            let y = map_row(unit_y(v, min_v, max_v), height);
            grid[y][x] = ch;
        }
    }

    let mut out = String::new();
    if legend.is_empty() {
        out.push_str("Plot: (no data)\n");
    } else {
        out.push_str(&format!("Plot: {}\n", legend.join(" | ")));
    }

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out.push_str(&"-".repeat(width));
    out.push('\n');

    out
}

fn map_col(u: f64, width: usize) -> usize {
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_row(u: f64, height: usize) -> usize {
    // max value -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}
