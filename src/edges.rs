//! Sobel edge detection.

use std::f64::consts::TAU;

use crate::parallel::Splitter;
use crate::plane::{GradientPlane, GrayPlane};

/// Horizontal gradient kernel, row-major.
///
/// ```text
/// Gx:          Gy:
/// [-1  0  1]   [-1 -2 -1]
/// [-2  0  2]   [ 0  0  0]
/// [-1  0  1]   [ 1  2  1]
/// ```
const SOBEL_X: [[f64; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: [[f64; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Compute the Sobel gradient of a grayscale plane.
///
/// Each output pixel holds `(magnitude, angle)` with
/// `magnitude = sqrt(gx² + gy²)` and `angle = atan2(gy, gx)` moved into
/// `[0, 2π)`.
///
/// Neighbors that fall outside the plane are skipped: no padding, no edge
/// clamping and no renormalization of the remaining weights. Border pixels
/// therefore respond to the missing half of the kernel.
pub fn detect_edges(gray: &GrayPlane) -> GradientPlane {
    detect_edges_with(gray, &Splitter::default())
}

pub(crate) fn detect_edges_with(gray: &GrayPlane, splitter: &Splitter) -> GradientPlane {
    let (width, height) = gray.dimensions();
    log::debug!("sobel {}x{}", width, height);

    let mut out = GradientPlane::zeroed(width, height);
    out.fill_rows_with(splitter, |y, row| {
        for (x, pair) in row.chunks_exact_mut(2).enumerate() {
            let (gx, gy) = gradient_at(gray, x, y);
            pair[0] = (gx * gx + gy * gy).sqrt();
            pair[1] = (gy.atan2(gx) + TAU) % TAU;
        }
    });
    out
}

/// Raw `(gx, gy)` at `(x, y)`, skipping out-of-bounds neighbors.
fn gradient_at(gray: &GrayPlane, x: usize, y: usize) -> (f64, f64) {
    let (width, height) = gray.dimensions();
    let mut gx = 0.0;
    let mut gy = 0.0;

    for ky in 0..3 {
        let Some(py) = (y + ky).checked_sub(1).filter(|&py| py < height) else {
            continue;
        };
        let row = gray.row(py);
        for kx in 0..3 {
            let Some(px) = (x + kx).checked_sub(1).filter(|&px| px < width) else {
                continue;
            };
            let val = row[px];
            gx += val * SOBEL_X[ky][kx];
            gy += val * SOBEL_Y[ky][kx];
        }
    }

    (gx, gy)
}
