use crate::error::{Error, Result};
use crate::plane::{CellColor, ColorCell, ColorGlyphPlane, ColorPlane, GlyphPlane};

/// Pair every glyph with the RGB of the color pixel at the same position.
///
/// Alpha is dropped. Both planes must have identical dimensions.
pub fn colorize(glyphs: &GlyphPlane, colors: &ColorPlane) -> Result<ColorGlyphPlane> {
    if glyphs.dimensions() != colors.dimensions() {
        return Err(Error::DimensionMismatch {
            expected: glyphs.dimensions(),
            actual: colors.dimensions(),
        });
    }

    let (width, height) = glyphs.dimensions();
    log::debug!("colorize {}x{}", width, height);

    let mut out = ColorGlyphPlane::zeroed(width, height);
    out.fill_rows(|y, row| {
        let cells = row.iter_mut().zip(glyphs.row(y)).zip(colors.row(y).chunks_exact(4));
        for ((cell, &glyph), rgba) in cells {
            *cell = ColorCell {
                glyph,
                color: CellColor::from_channels(rgba[0], rgba[1], rgba[2]),
            };
        }
    });
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorize_pairs_cells() {
        let glyphs = GlyphPlane::from_vec(2, 1, vec!['a', 'b']).unwrap();
        let colors =
            ColorPlane::from_vec(2, 1, vec![255.0, 0.0, 0.0, 255.0, 10.4, 20.6, 300.0, 0.0]).unwrap();
        let out = colorize(&glyphs, &colors).unwrap();
        assert_eq!(
            out.cell(0, 0),
            ColorCell {
                glyph: 'a',
                color: CellColor { r: 255, g: 0, b: 0 }
            }
        );
        assert_eq!(out.cell(1, 0).glyph, 'b');
        assert_eq!(out.cell(1, 0).color, CellColor { r: 10, g: 21, b: 255 });
    }

    #[test]
    fn test_colorize_dimension_mismatch() {
        let glyphs = GlyphPlane::from_vec(2, 1, vec!['a', 'b']).unwrap();
        let colors = ColorPlane::new(1, 2).unwrap();
        assert_eq!(
            colorize(&glyphs, &colors),
            Err(Error::DimensionMismatch {
                expected: (2, 1),
                actual: (1, 2)
            })
        );
    }
}
