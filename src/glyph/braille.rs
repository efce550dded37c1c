//! Braille rendering.
//!
//! Each braille character represents a 2x4 dot matrix, providing 8 subpixels
//! per terminal character cell. This is the highest detail mode.

use crate::plane::{GlyphPlane, GrayPlane};

/// Braille base character (U+2800, empty braille pattern).
pub const BRAILLE_BASE: char = '\u{2800}';

/// Convert a 2x4 boolean grid to a braille character.
///
/// The bit positions are:
/// ```text
/// [0,0]=1   [1,0]=8
/// [0,1]=2   [1,1]=16
/// [0,2]=4   [1,2]=32
/// [0,3]=64  [1,3]=128
/// ```
///
/// `grid[x][y]` is the dot in column `x`, row `y`.
pub fn grid_to_braille(grid: [[bool; 4]; 2]) -> char {
    const BITS: [[u8; 4]; 2] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

    let mut code = 0u8;
    for (column, bits) in grid.iter().zip(BITS.iter()) {
        for (&on, &bit) in column.iter().zip(bits.iter()) {
            if on {
                code |= bit;
            }
        }
    }
    char::from_u32(BRAILLE_BASE as u32 + code as u32).unwrap_or(BRAILLE_BASE)
}

/// Quantize a grayscale plane into braille glyphs.
///
/// Every 2x4 block of pixels becomes one glyph; a dot is raised when its
/// pixel is `>= threshold`. The output is `ceil(w/2) x ceil(h/4)`: a partial
/// block at the right or bottom edge is kept, with dots that fall outside the
/// plane left unset.
pub fn to_braille(gray: &GrayPlane, threshold: f64) -> GlyphPlane {
    let (width, height) = gray.dimensions();
    let cols = width.div_ceil(2);
    let rows = height.div_ceil(4);
    log::debug!("braille {}x{} -> {}x{} cells", width, height, cols, rows);

    let mut out = GlyphPlane::zeroed(cols, rows);
    out.fill_rows(|cy, row| {
        for (cx, glyph) in row.iter_mut().enumerate() {
            let mut grid = [[false; 4]; 2];
            for dy in 0..4 {
                let y = cy * 4 + dy;
                if y >= height {
                    break;
                }
                let src = gray.row(y);
                for (dx, column) in grid.iter_mut().enumerate() {
                    if let Some(&value) = src.get(cx * 2 + dx) {
                        column[dy] = value >= threshold;
                    }
                }
            }
            *glyph = grid_to_braille(grid);
        }
    });
    out
}
