//! Dimension calculation for aspect-ratio-correct terminal rendering.

/// Default terminal character aspect ratio.
/// Terminal characters are typically ~2x taller than wide.
pub const DEFAULT_CHAR_ASPECT: f64 = 2.0;

/// Fit an image into a grid of terminal cells, preserving its aspect ratio.
///
/// A naive pixel-to-cell mapping stretches the picture vertically because
/// each cell is `char_aspect` times taller than wide. The grid returned here
/// compensates for that and stays within `max_cols x max_rows`:
///
/// 1. Use the full width and derive the rows.
/// 2. If that overflows `max_rows`, use the full height and derive the columns.
///
/// Returns `(0, 0)` when any input is zero or the aspect is not positive.
/// Otherwise both results are at least 1.
///
/// ```
/// use termglyph::fit_cells;
///
/// // A 4:3 image in an 80x24 terminal: width-limited rows would be 30, so
/// // the height wins and the columns are derived from it.
/// assert_eq!(fit_cells(640, 480, 80, 24, 2.0), (64, 24));
/// ```
pub fn fit_cells(
    img_width: usize,
    img_height: usize,
    max_cols: usize,
    max_rows: usize,
    char_aspect: f64,
) -> (usize, usize) {
    if img_width == 0 || img_height == 0 || max_cols == 0 || max_rows == 0 || char_aspect <= 0.0 {
        return (0, 0);
    }

    // Columns per row needed to show the image undistorted.
    let target = img_width as f64 / img_height as f64 * char_aspect;

    let rows = (max_cols as f64 / target).round().max(1.0);
    if rows <= max_rows as f64 {
        return (max_cols, rows as usize);
    }

    let cols = (max_rows as f64 * target).round().clamp(1.0, max_cols as f64);
    (cols as usize, max_rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_char_aspect() {
        assert_eq!(DEFAULT_CHAR_ASPECT, 2.0);
    }

    #[test]
    fn test_zero_inputs() {
        assert_eq!(fit_cells(0, 480, 80, 24, 2.0), (0, 0));
        assert_eq!(fit_cells(640, 0, 80, 24, 2.0), (0, 0));
        assert_eq!(fit_cells(640, 480, 0, 24, 2.0), (0, 0));
        assert_eq!(fit_cells(640, 480, 80, 0, 2.0), (0, 0));
        assert_eq!(fit_cells(640, 480, 80, 24, 0.0), (0, 0));
    }

    #[test]
    fn test_square_image_is_width_limited() {
        // 1:1 with aspect 2.0 wants twice as many columns as rows.
        assert_eq!(fit_cells(100, 100, 40, 100, 2.0), (40, 20));
    }

    #[test]
    fn test_tall_image_is_height_limited() {
        assert_eq!(fit_cells(100, 400, 80, 24, 2.0), (12, 24));
    }

    #[test]
    fn test_unbounded_rows() {
        assert_eq!(fit_cells(640, 480, 80, usize::MAX, 2.0), (80, 30));
    }

    #[test]
    fn test_very_wide_image_keeps_one_row() {
        assert_eq!(fit_cells(10_000, 10, 80, 24, 2.0), (80, 1));
    }

    #[test]
    fn test_custom_aspect() {
        // Square cells: the grid mirrors the image ratio.
        assert_eq!(fit_cells(200, 100, 60, 100, 1.0), (60, 30));
    }
}
