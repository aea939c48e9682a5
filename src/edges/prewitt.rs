//! Prewitt gradient magnitude on integer rasters.
//!
//! - Convolves the fixed 3×3 Prewitt pair (`X` and `Y`) over interior pixels.
//! - Border pixels (first/last row and column) have no full neighbourhood and
//!   are defined as zero.
//! - Magnitude is `floor(sqrt(gx^2 + gy^2))`, clamped to `[0, 255]`.
//!
//! Everything here only reads the input grid, so any number of workers may
//! evaluate it concurrently.
use crate::image::{Grid, ImageView};

type Mask3 = [[i64; 3]; 3];

const PREWITT_MASK_X: Mask3 = [[1, 0, -1], [1, 0, -1], [1, 0, -1]];
const PREWITT_MASK_Y: Mask3 = [[1, 1, 1], [0, 0, 0], [-1, -1, -1]];

/// Upper bound of the output intensity range.
pub const MAX_EDGE_INTENSITY: u8 = u8::MAX;

/// Edge intensity at (`row`, `col`).
pub fn prewitt_at(input: &Grid, row: usize, col: usize) -> u8 {
    let (h, w) = (input.height(), input.width());
    if row == 0 || col == 0 || row + 1 >= h || col + 1 >= w {
        return 0;
    }
    let rows = [input.row(row - 1), input.row(row), input.row(row + 1)];
    let (gx, gy) = gradients(&rows, col);
    clamp_magnitude(gx, gy)
}

/// Fill `out` with the edge intensities of one input row.
///
/// `out` must be exactly one row wide.
pub fn compute_row(input: &Grid, row: usize, out: &mut [u16]) {
    debug_assert_eq!(out.len(), input.width());
    let (h, w) = (input.height(), input.width());
    if row == 0 || row + 1 >= h || w < 3 {
        out.fill(0);
        return;
    }
    let rows = [input.row(row - 1), input.row(row), input.row(row + 1)];
    out[0] = 0;
    out[w - 1] = 0;
    for col in 1..w - 1 {
        let (gx, gy) = gradients(&rows, col);
        out[col] = u16::from(clamp_magnitude(gx, gy));
    }
}

#[inline]
fn gradients(rows: &[&[u16]; 3], col: usize) -> (i64, i64) {
    let mut gx = 0i64;
    let mut gy = 0i64;
    for (i, row) in rows.iter().enumerate() {
        let mx = &PREWITT_MASK_X[i];
        let my = &PREWITT_MASK_Y[i];
        for j in 0..3 {
            let sample = i64::from(row[col + j - 1]);
            gx += sample * mx[j];
            gy += sample * my[j];
        }
    }
    (gx, gy)
}

#[inline]
fn clamp_magnitude(gx: i64, gy: i64) -> u8 {
    let magnitude = ((gx * gx + gy * gy) as f64).sqrt() as i64;
    // The lower bound cannot trigger for a square root; kept as a range guard.
    magnitude.clamp(0, i64::from(MAX_EDGE_INTENSITY)) as u8
}
