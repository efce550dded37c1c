//! Ordered (Bayer) dithering.
//!
//! The threshold map is generated directly by bit-interleaving, following
//! Bisqwit's construction (<https://bisqwit.iki.fi/story/howto/dither/jy/>),
//! so no recursive build-up of smaller matrices is needed.

use crate::error::{Error, Result};
use crate::parallel::Splitter;
use crate::plane::GrayPlane;

/// Largest supported matrix depth.
///
/// Depths above this are rejected with [`Error::InvalidArgument`] even though
/// the construction itself would not overflow: thresholds are stored as `u8`,
/// and at depth 8 the `256 x 256` map already holds one cell per level, so a
/// deeper map only repeats thresholds at a quadratic memory cost.
pub const MAX_BAYER_DEPTH: u32 = 8;

/// A `2^n x 2^n` threshold map with values in `[0, 255]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BayerMatrix {
    size: usize,
    cells: Vec<u8>,
}

impl BayerMatrix {
    /// Side length (`2^n`).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Threshold at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.size + col]
    }

    /// Threshold for image pixel `(x, y)`, tiling the matrix.
    #[inline]
    pub fn threshold(&self, x: usize, y: usize) -> u8 {
        self.get(y % self.size, x % self.size)
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, u8> {
        self.cells.chunks_exact(self.size)
    }
}

/// Generate the Bayer threshold matrix of depth `n`.
///
/// For cell `(j, i)` the bits of `j` and `i ^ j` are interleaved from most to
/// least significant, the most significant landing in the lowest output
/// bits. The resulting `2n`-bit value is scaled by `255 / 4^n`.
///
/// Fails with [`Error::InvalidArgument`] if `n` is not in
/// `1..=MAX_BAYER_DEPTH`.
pub fn bayer_matrix(n: u32) -> Result<BayerMatrix> {
    if n < 1 {
        return Err(Error::invalid("Bayer depth must be >= 1"));
    }
    if n > MAX_BAYER_DEPTH {
        return Err(Error::invalid(format!(
            "Bayer depth must be <= {}, got {}",
            MAX_BAYER_DEPTH, n
        )));
    }

    let size = 1usize << n;
    let normalization = 255.0 / (size * size) as f64;
    let mut cells = Vec::with_capacity(size * size);

    for j in 0..size {
        for i in 0..size {
            let mut v = 0usize;
            for (k, mask) in (0..n as usize).rev().enumerate() {
                v |= ((j >> mask) & 1) << (2 * k);
                v |= (((i ^ j) >> mask) & 1) << (2 * k + 1);
            }
            cells.push((v as f64 * normalization) as u8);
        }
    }

    Ok(BayerMatrix { size, cells })
}

/// Ordered dithering against a depth-`n` Bayer matrix.
///
/// Output is binary: 255 where the pixel's intensity (clamped to `[0, 255]`
/// and truncated) is strictly greater than the tiled threshold, else 0.
pub fn bayer_dither(gray: &GrayPlane, n: u32) -> Result<GrayPlane> {
    bayer_dither_with(gray, n, &Splitter::default())
}

pub(crate) fn bayer_dither_with(gray: &GrayPlane, n: u32, splitter: &Splitter) -> Result<GrayPlane> {
    let matrix = bayer_matrix(n)?;
    log::debug!("bayer dither depth {} on {}x{}", n, gray.width(), gray.height());

    let mut out = GrayPlane::zeroed(gray.width(), gray.height());
    out.fill_rows_with(splitter, |y, row| {
        let src = gray.row(y);
        for (x, (value, &intensity)) in row.iter_mut().zip(src).enumerate() {
            let level = intensity.clamp(0.0, 255.0) as u8;
            if level > matrix.threshold(x, y) {
                *value = 255.0;
            }
        }
    });
    Ok(out)
}
