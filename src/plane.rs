//! Flat, row-major pixel planes.
//!
//! A [`Plane`] stores one rectangular grid as a single contiguous buffer of
//! per-pixel element groups. The kind marker `K` fixes the element type and
//! how many elements make up one pixel:
//!
//! | Kind           | Alias               | Sample      | Channels |
//! |----------------|---------------------|-------------|----------|
//! | [`Rgba`]       | [`ColorPlane`]      | `f64`       | 4        |
//! | [`Gray`]       | [`GrayPlane`]       | `f64`       | 1        |
//! | [`Gradient`]   | [`GradientPlane`]   | `f64`       | 2        |
//! | [`Glyph`]      | [`GlyphPlane`]      | `char`      | 1        |
//! | [`ColorGlyph`] | [`ColorGlyphPlane`] | [`ColorCell`] | 1      |
//!
//! Numeric planes keep full `f64` samples so chained transforms do not
//! accumulate rounding; conversion to 8-bit happens only at the boundary.

use std::fmt;
use std::marker::PhantomData;

use crate::error::{Error, Result};
use crate::parallel::Splitter;

/// Pixel layout of a plane.
pub trait Kind: Send + Sync + 'static {
    /// Storage element.
    type Sample: Copy + Default + PartialEq + fmt::Debug + Send + Sync;
    /// Elements per pixel.
    const CHANNELS: usize;
}

/// RGBA color, one `f64` per channel in `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba;

/// Single luminance channel in `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gray;

/// Gradient `(magnitude, angle)` pairs, angle in radians within `[0, 2π)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gradient;

/// One displayable glyph per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Glyph;

/// One glyph plus its true-color foreground per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorGlyph;

impl Kind for Rgba {
    type Sample = f64;
    const CHANNELS: usize = 4;
}

impl Kind for Gray {
    type Sample = f64;
    const CHANNELS: usize = 1;
}

impl Kind for Gradient {
    type Sample = f64;
    const CHANNELS: usize = 2;
}

impl Kind for Glyph {
    type Sample = char;
    const CHANNELS: usize = 1;
}

impl Kind for ColorGlyph {
    type Sample = ColorCell;
    const CHANNELS: usize = 1;
}

/// 8-bit RGB color attached to a glyph cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl CellColor {
    /// Build from `f64` channels, clamping to `[0, 255]` and rounding.
    pub fn from_channels(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: to_u8(r),
            g: to_u8(g),
            b: to_u8(b),
        }
    }

    /// ANSI true-color foreground escape for this color.
    pub fn escape(&self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }
}

/// A glyph with its foreground color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorCell {
    pub glyph: char,
    pub color: CellColor,
}

pub type ColorPlane = Plane<Rgba>;
pub type GrayPlane = Plane<Gray>;
pub type GradientPlane = Plane<Gradient>;
pub type GlyphPlane = Plane<Glyph>;
pub type ColorGlyphPlane = Plane<ColorGlyph>;

/// Rectangular, tightly packed, row-major grid of `K` pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane<K: Kind> {
    width: usize,
    height: usize,
    stride: usize,
    data: Vec<K::Sample>,
    kind: PhantomData<K>,
}

impl<K: Kind> Plane<K> {
    /// Allocate a zero-initialized plane.
    ///
    /// Fails with [`Error::InvalidArgument`] if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self::zeroed(width, height))
    }

    /// Wrap an existing row-major buffer.
    ///
    /// `data` must hold exactly `width * height * K::CHANNELS` elements.
    pub fn from_vec(width: usize, height: usize, data: Vec<K::Sample>) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = width * height * K::CHANNELS;
        if data.len() != expected {
            return Err(Error::invalid(format!(
                "buffer holds {} elements, a {}x{} plane needs {}",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            stride: width * K::CHANNELS,
            data,
            kind: PhantomData,
        })
    }

    /// Allocation for transform outputs whose dimensions are already known
    /// to be positive.
    pub(crate) fn zeroed(width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0);
        Self {
            width,
            height,
            stride: width * K::CHANNELS,
            data: vec![K::Sample::default(); width * height * K::CHANNELS],
            kind: PhantomData,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Elements between the starts of vertically adjacent rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Elements per pixel.
    pub fn channels(&self) -> usize {
        K::CHANNELS
    }

    pub fn data(&self) -> &[K::Sample] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<K::Sample> {
        self.data
    }

    /// Index of the first element of pixel `(x, y)`.
    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        y * self.stride + x * K::CHANNELS
    }

    /// Elements of pixel `(x, y)`.
    ///
    /// # Panics
    /// If `(x, y)` lies outside the plane.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[K::Sample] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let start = self.offset(x, y);
        &self.data[start..start + K::CHANNELS]
    }

    /// Mutable elements of pixel `(x, y)`.
    ///
    /// # Panics
    /// If `(x, y)` lies outside the plane.
    #[inline]
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [K::Sample] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let start = self.offset(x, y);
        &mut self.data[start..start + K::CHANNELS]
    }

    /// Elements of row `y`.
    #[inline]
    pub fn row(&self, y: usize) -> &[K::Sample] {
        let start = y * self.stride;
        &self.data[start..start + self.stride]
    }

    /// Iterator over rows, top to bottom.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, K::Sample> {
        self.data.chunks_exact(self.stride)
    }

    /// Copy the `width x height` rectangle at `(x, y)` into a new plane.
    pub fn crop(&self, x: usize, y: usize, width: usize, height: usize) -> Result<Self> {
        check_dimensions(width, height)?;
        if x + width > self.width || y + height > self.height {
            return Err(Error::invalid(format!(
                "crop {}x{} at ({}, {}) exceeds {}x{} plane",
                width, height, x, y, self.width, self.height
            )));
        }

        let mut out = Self::zeroed(width, height);
        let span = width * K::CHANNELS;
        for (row, dst) in out.data.chunks_exact_mut(span).enumerate() {
            let start = self.offset(x, y + row);
            dst.copy_from_slice(&self.data[start..start + span]);
        }
        Ok(out)
    }

    /// Fill every row of this plane in parallel.
    ///
    /// `f(y, row)` receives the row index and that row's elements. Each
    /// worker owns a disjoint band of rows.
    pub(crate) fn fill_rows<F>(&mut self, f: F)
    where
        F: Fn(usize, &mut [K::Sample]) + Sync,
    {
        self.fill_rows_with(&Splitter::default(), f);
    }

    /// [`fill_rows`](Self::fill_rows) with an explicit partition.
    pub(crate) fn fill_rows_with<F>(&mut self, splitter: &Splitter, f: F)
    where
        F: Fn(usize, &mut [K::Sample]) + Sync,
    {
        let stride = self.stride;
        splitter.for_each_band(&mut self.data, stride, |rows, band| {
            for (y, row) in rows.zip(band.chunks_exact_mut(stride)) {
                f(y, row);
            }
        });
    }
}

impl ColorPlane {
    /// Build from 8-bit RGBA bytes (4 per pixel, row-major).
    pub fn from_rgba8(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        Self::from_vec(width, height, bytes.iter().map(|&b| b as f64).collect())
    }

    /// Convert to 8-bit RGBA bytes, clamping and rounding each channel.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.data.iter().map(|&v| to_u8(v)).collect()
    }
}

impl GrayPlane {
    /// Build from 8-bit luminance bytes (1 per pixel, row-major).
    pub fn from_luma8(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        Self::from_vec(width, height, bytes.iter().map(|&b| b as f64).collect())
    }

    /// Convert to 8-bit luminance bytes, clamping and rounding.
    pub fn to_luma8(&self) -> Vec<u8> {
        self.data.iter().map(|&v| to_u8(v)).collect()
    }

    #[inline]
    pub fn intensity(&self, x: usize, y: usize) -> f64 {
        self.pixel(x, y)[0]
    }
}

impl GradientPlane {
    #[inline]
    pub fn magnitude(&self, x: usize, y: usize) -> f64 {
        self.pixel(x, y)[0]
    }

    /// Gradient direction in radians.
    #[inline]
    pub fn angle(&self, x: usize, y: usize) -> f64 {
        self.pixel(x, y)[1]
    }
}

impl GlyphPlane {
    #[inline]
    pub fn glyph(&self, x: usize, y: usize) -> char {
        self.pixel(x, y)[0]
    }

    /// One string per row.
    pub fn lines(&self) -> Vec<String> {
        self.rows().map(|row| row.iter().collect()).collect()
    }
}

impl ColorGlyphPlane {
    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> ColorCell {
        self.pixel(x, y)[0]
    }

    /// One string per row with true-color escapes.
    ///
    /// A new escape is written only when the color changes along the row,
    /// and every row ends with a reset.
    pub fn ansi_lines(&self) -> Vec<String> {
        self.rows()
            .map(|row| {
                let mut line = String::with_capacity(row.len() * 4);
                let mut current = None;
                for cell in row {
                    if current != Some(cell.color) {
                        line.push_str(&cell.color.escape());
                        current = Some(cell.color);
                    }
                    line.push(cell.glyph);
                }
                line.push_str("\x1b[0m");
                line
            })
            .collect()
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::invalid(format!(
            "plane dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    Ok(())
}

#[inline]
pub(crate) fn to_u8(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed_and_packed() {
        let plane = ColorPlane::new(3, 2).unwrap();
        assert_eq!(plane.stride(), 12);
        assert_eq!(plane.data().len(), 24);
        assert!(plane.data().iter().all(|&v| v == 0.0));

        let gradient = GradientPlane::new(5, 4).unwrap();
        assert_eq!(gradient.stride(), 10);
        assert_eq!(gradient.channels(), 2);
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(matches!(GrayPlane::new(0, 4), Err(Error::InvalidArgument(_))));
        assert!(matches!(GrayPlane::new(4, 0), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_from_vec_checks_length() {
        assert!(GrayPlane::from_vec(2, 2, vec![0.0; 4]).is_ok());
        assert!(GrayPlane::from_vec(2, 2, vec![0.0; 5]).is_err());
        assert!(ColorPlane::from_vec(2, 2, vec![0.0; 4]).is_err());
    }

    #[test]
    fn test_pixel_offsets() {
        let mut plane = ColorPlane::new(4, 3).unwrap();
        plane.pixel_mut(2, 1).copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(plane.offset(2, 1), 16 + 8);
        assert_eq!(&plane.data()[24..28], &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(plane.pixel(2, 1), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_pixel_out_of_bounds_panics() {
        let plane = GrayPlane::new(2, 2).unwrap();
        let _ = plane.pixel(2, 0);
    }

    #[test]
    fn test_crop_copies_rectangle() {
        let data: Vec<f64> = (0..20).map(|v| v as f64).collect();
        let plane = GrayPlane::from_vec(5, 4, data).unwrap();
        let crop = plane.crop(1, 2, 3, 2).unwrap();
        assert_eq!(crop.dimensions(), (3, 2));
        assert_eq!(crop.data(), &[11.0, 12.0, 13.0, 16.0, 17.0, 18.0]);
    }

    #[test]
    fn test_crop_out_of_bounds() {
        let plane = GrayPlane::new(4, 4).unwrap();
        assert!(plane.crop(2, 2, 3, 1).is_err());
        assert!(plane.crop(0, 0, 0, 1).is_err());
    }

    #[test]
    fn test_fill_rows_visits_each_row_once() {
        let mut plane = GrayPlane::new(3, 17).unwrap();
        plane.fill_rows(|y, row| {
            for v in row.iter_mut() {
                *v += y as f64;
            }
        });
        for (y, row) in plane.rows().enumerate() {
            assert!(row.iter().all(|&v| v == y as f64));
        }
    }

    #[test]
    fn test_rgba8_round_trip_clamps() {
        let plane = ColorPlane::from_vec(1, 1, vec![-4.0, 127.6, 300.0, 255.0]).unwrap();
        assert_eq!(plane.to_rgba8(), vec![0, 128, 255, 255]);
        let back = ColorPlane::from_rgba8(1, 1, &[0, 128, 255, 255]).unwrap();
        assert_eq!(back.data(), &[0.0, 128.0, 255.0, 255.0]);
    }

    #[test]
    fn test_glyph_lines() {
        let plane = GlyphPlane::from_vec(3, 2, "ab.cd#".chars().collect()).unwrap();
        assert_eq!(plane.lines(), vec!["ab.".to_string(), "cd#".to_string()]);
        assert_eq!(plane.glyph(2, 1), '#');
    }

    #[test]
    fn test_ansi_lines_coalesce_colors() {
        let red = CellColor { r: 255, g: 0, b: 0 };
        let blue = CellColor { r: 0, g: 0, b: 255 };
        let cells = vec![
            ColorCell { glyph: 'a', color: red },
            ColorCell { glyph: 'b', color: red },
            ColorCell { glyph: 'c', color: blue },
        ];
        let plane = ColorGlyphPlane::from_vec(3, 1, cells).unwrap();
        let lines = plane.ansi_lines();
        assert_eq!(
            lines[0],
            "\x1b[38;2;255;0;0mab\x1b[38;2;0;0;255mc\x1b[0m".to_string()
        );
    }

    #[test]
    fn test_cell_color_from_channels() {
        let color = CellColor::from_channels(12.4, 300.0, -1.0);
        assert_eq!(color, CellColor { r: 12, g: 255, b: 0 });
        assert_eq!(color.escape(), "\x1b[38;2;12;255;0m");
    }
}
