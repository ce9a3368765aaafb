//! 24-bit BMP rendering.
//!
//! Layout: 14-byte file header, 40-byte `BITMAPINFOHEADER`, then uncompressed
//! BGR pixel rows stored bottom-up, each padded to a multiple of 4 bytes.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::AppError;
use crate::plot::{Series, unit_x, unit_y, value_range};

pub const DEFAULT_WIDTH: usize = 800;
pub const DEFAULT_HEIGHT: usize = 600;
/// Largest accepted width or height; keeps file and header sizes within `u32`/`i32`.
pub const MAX_DIMENSION: usize = 16_384;

const FILE_HEADER_LEN: u32 = 14;
const INFO_HEADER_LEN: u32 = 40;
/// 72 DPI.
const PIXELS_PER_METER: i32 = 2835;

/// RGB colour.
pub type Rgb = [u8; 3];

const PALETTE: [Rgb; 4] = [
    [240, 0, 0],   // red
    [0, 200, 255], // cyan
    [255, 200, 0], // amber
    [0, 220, 0],   // green
];

/// An in-memory image; `(0, 0)` is the bottom-left pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

/// Reject image sizes outside `1..=MAX_DIMENSION`.
pub fn check_dimensions(width: usize, height: usize) -> Result<(), AppError> {
    for (name, v) in [("width", width), ("height", height)] {
        if v == 0 || v > MAX_DIMENSION {
            return Err(AppError::new(
                2,
                format!("BMP {name} must be between 1 and {MAX_DIMENSION}, got {v}"),
            ));
        }
    }
    Ok(())
}

impl Canvas {
    /// Black canvas, each side clamped to `MAX_DIMENSION`.
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.min(MAX_DIMENSION);
        let height = height.min(MAX_DIMENSION);
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0]; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Set a pixel; out-of-bounds writes are ignored.
    pub fn set(&mut self, x: isize, y: isize, color: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    fn dot(&mut self, x: isize, y: isize, color: Rgb) {
        for dy in -1..=1 {
            for dx in -1..=1 {
                self.set(x + dx, y + dy, color);
            }
        }
    }

    /// Integer line drawing (Bresenham).
    fn line(&mut self, (x0, y0): (isize, isize), (x1, y1): (isize, isize), color: Rgb) {
        let (mut x, mut y) = (x0, y0);
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

/// Draw each series (own min/max, own colour) as connected dots.
pub fn render_bitmap(series: &[Series], width: usize, height: usize) -> Canvas {
    let mut canvas = Canvas::new(width.clamp(2, MAX_DIMENSION), height.clamp(2, MAX_DIMENSION));
    let w = canvas.width() as f64 - 1.0;
    let h = canvas.height() as f64 - 1.0;

    for (idx, s) in series.iter().enumerate() {
        let Some((min_v, max_v)) = value_range(&s.values) else {
            continue;
        };
        let color = PALETTE[idx % PALETTE.len()];
        let n = s.values.len();

        let mut prev = None;
        for (i, &v) in s.values.iter().enumerate() {
            if !v.is_finite() {
                continue;
            }
            let x = (unit_x(i, n) * w).round() as isize;
            let y = (unit_y(v, min_v, max_v) * h).round() as isize;
            if let Some(p) = prev {
                canvas.line(p, (x, y), color);
            }
            prev = Some((x, y));
        }
        // Dots last so they sit on top of the connecting lines.
        for (i, &v) in s.values.iter().enumerate().filter(|(_, v)| v.is_finite()) {
            let x = (unit_x(i, n) * w).round() as isize;
            let y = (unit_y(v, min_v, max_v) * h).round() as isize;
            canvas.dot(x, y, color);
        }
    }

    canvas
}

/// Encode a canvas as a complete BMP file.
pub fn encode_bmp(canvas: &Canvas) -> Vec<u8> {
    let row_size = (canvas.width * 3 + 3) & !3;
    let data_size = (row_size * canvas.height) as u32;
    let offset = FILE_HEADER_LEN + INFO_HEADER_LEN;

    let mut out = Vec::with_capacity((offset + data_size) as usize);

    // BITMAPFILEHEADER
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(offset + data_size).to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&offset.to_le_bytes());

    // BITMAPINFOHEADER
    out.extend_from_slice(&INFO_HEADER_LEN.to_le_bytes());
    out.extend_from_slice(&(canvas.width as i32).to_le_bytes());
    out.extend_from_slice(&(canvas.height as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&24u16.to_le_bytes()); // bits per pixel
    out.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
    out.extend_from_slice(&data_size.to_le_bytes());
    out.extend_from_slice(&PIXELS_PER_METER.to_le_bytes());
    out.extend_from_slice(&PIXELS_PER_METER.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // colours used
    out.extend_from_slice(&0u32.to_le_bytes()); // important colours

    let padding = row_size - canvas.width * 3;
    for row in canvas.pixels.chunks(canvas.width) {
        for &[r, g, b] in row {
            out.extend_from_slice(&[b, g, r]);
        }
        out.extend(std::iter::repeat_n(0u8, padding));
    }

    out
}

/// Write a canvas to `path` as a BMP file.
pub fn write_bmp(path: &Path, canvas: &Canvas) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create BMP '{}': {e}", path.display())))?;
    file.write_all(&encode_bmp(canvas))
        .map_err(|e| AppError::new(2, format!("Failed to write BMP '{}': {e}", path.display())))?;

    tracing::info!(path = %path.display(), width = canvas.width, height = canvas.height, "wrote BMP");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u32_at(bytes: &[u8], at: usize) -> u32 {
        u32::from_le_bytes(bytes[at..at + 4].try_into().unwrap())
    }

    #[test]
    fn header_layout_and_row_padding() {
        let mut canvas = Canvas::new(2, 2);
        canvas.set(0, 0, [1, 2, 3]);
        canvas.set(1, 1, [4, 5, 6]);
        let bytes = encode_bmp(&canvas);

        // 2 px * 3 bytes = 6, padded to 8 per row.
        assert_eq!(bytes.len(), 54 + 16);
        assert_eq!(&bytes[0..2], b"BM");
        assert_eq!(u32_at(&bytes, 2), 70);
        assert_eq!(u32_at(&bytes, 10), 54);
        assert_eq!(u32_at(&bytes, 14), 40);
        assert_eq!(u32_at(&bytes, 18), 2);
        assert_eq!(u32_at(&bytes, 22), 2);
        assert_eq!(u16::from_le_bytes([bytes[28], bytes[29]]), 24);
        assert_eq!(u32_at(&bytes, 34), 16);

        // Bottom row first, BGR order.
        assert_eq!(&bytes[54..62], &[3, 2, 1, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[62..70], &[0, 0, 0, 6, 5, 4, 0, 0]);
    }

    #[test]
    fn default_size_matches_classic_plot() {
        let bytes = encode_bmp(&Canvas::new(DEFAULT_WIDTH, DEFAULT_HEIGHT));
        assert_eq!(bytes.len(), 54 + 800 * 3 * 600);
    }

    #[test]
    fn series_hit_their_own_extremes() {
        let series = vec![
            Series::new("value", vec![70.0, 69.0, 71.0]),
            Series::new("ema", vec![1.0, 1.0]),
        ];
        let canvas = render_bitmap(&series, 21, 11);

        // First series: min at (10, 0), max at (20, 10).
        assert_eq!(canvas.get(10, 0), Some(PALETTE[0]));
        assert_eq!(canvas.get(20, 10), Some(PALETTE[0]));
        // Flat second series runs along the middle row.
        assert_eq!(canvas.get(5, 5), Some(PALETTE[1]));
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        assert!(check_dimensions(DEFAULT_WIDTH, DEFAULT_HEIGHT).is_ok());
        assert!(check_dimensions(MAX_DIMENSION, 1).is_ok());

        let err = check_dimensions(MAX_DIMENSION + 1, 600).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("width"), "{err}");
        assert!(check_dimensions(800, usize::MAX).is_err());
        assert!(check_dimensions(0, 600).is_err());
    }

    #[test]
    fn render_clamps_to_max_dimension() {
        let series = vec![Series::new("value", vec![70.0, 69.0])];
        let canvas = render_bitmap(&series, usize::MAX, 3);
        assert_eq!(canvas.width(), MAX_DIMENSION);
        assert_eq!(canvas.height(), 3);

        // The largest canvas still has a header that fits its fields.
        let bytes = encode_bmp(&canvas);
        assert_eq!(u32_at(&bytes, 18) as usize, MAX_DIMENSION);
        assert_eq!(u32_at(&bytes, 2) as usize, bytes.len());
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut canvas = Canvas::new(3, 3);
        canvas.set(-1, 0, [9, 9, 9]);
        canvas.set(3, 3, [9, 9, 9]);
        assert!(canvas.pixels.iter().all(|p| *p == [0, 0, 0]));
        assert_eq!(canvas.get(3, 0), None);
    }
}
