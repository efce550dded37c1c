//! Intensity and gradient to glyph mapping.

use std::f64::consts::TAU;

use super::palette::Palette;
use crate::parallel::Splitter;
use crate::plane::{GlyphPlane, GradientPlane, GrayPlane};

/// Map each intensity to a palette glyph.
///
/// Intensities are clamped to `[0, 255]`, then `index = floor(v / 255 * (len - 1))`,
/// so 0 always picks the first glyph and 255 the last.
pub fn to_ascii(gray: &GrayPlane, palette: &Palette) -> GlyphPlane {
    to_ascii_with(gray, palette, &Splitter::default())
}

pub(crate) fn to_ascii_with(gray: &GrayPlane, palette: &Palette, splitter: &Splitter) -> GlyphPlane {
    let (width, height) = gray.dimensions();
    log::debug!("ascii {}x{} over {} levels", width, height, palette.len());

    let last = (palette.len() - 1) as f64;
    let mut out = GlyphPlane::zeroed(width, height);
    out.fill_rows_with(splitter, |y, row| {
        for (glyph, &v) in row.iter_mut().zip(gray.row(y)) {
            let idx = (v.clamp(0.0, 255.0) / 255.0 * last).floor() as usize;
            *glyph = palette.get(idx);
        }
    });
    out
}

/// Map gradient direction to a palette glyph, blanking weak edges.
///
/// Pixels with `magnitude < threshold` become a space. Others use
/// `index = floor(angle / 2π * len)`, clamped to the last glyph so that an
/// angle of exactly 2π stays in range.
pub fn to_ascii_from_edges(gradient: &GradientPlane, threshold: f64, palette: &Palette) -> GlyphPlane {
    let (width, height) = gradient.dimensions();
    log::debug!(
        "edge glyphs {}x{} threshold {} over {} directions",
        width,
        height,
        threshold,
        palette.len()
    );

    let len = palette.len() as f64;
    let mut out = GlyphPlane::zeroed(width, height);
    out.fill_rows(|y, row| {
        for (glyph, pair) in row.iter_mut().zip(gradient.row(y).chunks_exact(2)) {
            let (magnitude, angle) = (pair[0], pair[1]);
            *glyph = if magnitude < threshold {
                ' '
            } else {
                let idx = (angle.clamp(0.0, TAU) / TAU * len).floor() as usize;
                palette.get(idx)
            };
        }
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn gray(values: &[f64]) -> GrayPlane {
        GrayPlane::from_vec(values.len(), 1, values.to_vec()).unwrap()
    }

    #[test]
    fn test_ascii_extremes() {
        let out = to_ascii(&gray(&[0.0, 255.0]), &Palette::standard());
        assert_eq!(out.glyph(0, 0), ' ');
        assert_eq!(out.glyph(1, 0), '@');
    }

    #[test]
    fn test_ascii_mid_values() {
        // 127.5 / 255 * 9 = 4.5 -> index 4
        let out = to_ascii(&gray(&[127.5, 128.0]), &Palette::standard());
        assert_eq!(out.glyph(0, 0), '=');
        assert_eq!(out.glyph(1, 0), '=');
    }

    #[test]
    fn test_ascii_clamps_out_of_range() {
        let out = to_ascii(&gray(&[-40.0, 900.0]), &Palette::minimal());
        assert_eq!(out.lines(), vec![" #".to_string()]);
    }

    #[test]
    fn test_single_glyph_palette() {
        let palette: Palette = "x".parse().unwrap();
        let out = to_ascii(&gray(&[0.0, 64.0, 255.0]), &palette);
        assert_eq!(out.lines(), vec!["xxx".to_string()]);
    }

    #[test]
    fn test_ascii_monotonic() {
        let values: Vec<f64> = (0..=255).map(f64::from).collect();
        let palette = Palette::detailed();
        let out = to_ascii(&gray(&values), &palette);
        let positions: Vec<usize> = out
            .data()
            .iter()
            .map(|c| palette.glyphs().iter().position(|g| g == c).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(positions[0], 0);
        assert_eq!(*positions.last().unwrap(), palette.len() - 1);
    }

    fn gradient(pairs: &[(f64, f64)]) -> GradientPlane {
        let data = pairs.iter().flat_map(|&(m, a)| [m, a]).collect();
        GradientPlane::from_vec(pairs.len(), 1, data).unwrap()
    }

    #[test]
    fn test_edges_below_threshold_blank() {
        let grad = gradient(&[(99.9, 0.0), (100.0, 0.0)]);
        let out = to_ascii_from_edges(&grad, 100.0, &Palette::edges());
        assert_eq!(out.glyph(0, 0), ' ');
        assert_eq!(out.glyph(1, 0), '|');
    }

    #[test]
    fn test_edges_direction_bins() {
        let bin = TAU / 8.0;
        let pairs: Vec<(f64, f64)> = (0..8).map(|k| (500.0, (k as f64 + 0.5) * bin)).collect();
        let out = to_ascii_from_edges(&gradient(&pairs), 100.0, &Palette::edges());
        assert_eq!(out.lines(), vec!["|/-\\|/-\\".to_string()]);
    }

    #[test]
    fn test_edges_angle_bounds() {
        let grad = gradient(&[(500.0, 0.0), (500.0, PI), (500.0, TAU)]);
        let out = to_ascii_from_edges(&grad, 100.0, &Palette::edges());
        // A full turn clamps onto the last glyph.
        assert_eq!(out.lines(), vec!["||\\".to_string()]);
    }

    #[test]
    fn test_edges_with_custom_palette() {
        let palette: Palette = "ab".parse().unwrap();
        let grad = gradient(&[(1.0, 1.0), (1.0, 4.0)]);
        let out = to_ascii_from_edges(&grad, 0.0, &palette);
        assert_eq!(out.lines(), vec!["ab".to_string()]);
    }
}
