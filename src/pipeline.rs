//! Render pipeline: image in, glyph rows out.
//!
//! Wires the transforms together for each [`RenderMode`]:
//!
//! | mode      | working raster          | quantizer               |
//! |-----------|-------------------------|-------------------------|
//! | `ascii`   | gray at `cols x rows`   | [`to_ascii`]            |
//! | `braille` | gray at `2cols x 4rows` | [`to_braille`]          |
//! | `edges`   | Sobel, then resized     | [`to_ascii_from_edges`] |
//! | `dither`  | Bayer at `2cols x 4rows`| [`to_braille`]          |

use serde::Deserialize;

use crate::convert::{gradient_to_color, invert_gray, to_color, to_gray};
use crate::dimensions::{fit_cells, DEFAULT_CHAR_ASPECT};
use crate::dither::{bayer_dither, MAX_BAYER_DEPTH};
use crate::edges::detect_edges;
use crate::error::{Error, Result};
use crate::glyph::{colorize, to_ascii, to_ascii_from_edges, to_braille, Palette};
use crate::plane::{ColorGlyphPlane, ColorPlane, GlyphPlane, GradientPlane, GrayPlane};

/// Widest Lanczos window a render accepts.
pub const MAX_RADIUS: usize = 16;

/// Dot threshold used after dithering; dithered pixels are exactly 0 or 255.
const DITHER_DOT_THRESHOLD: f64 = 128.0;

/// How an image is turned into glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Intensity mapped onto a palette ramp
    #[default]
    Ascii,
    /// 2x4 dots per cell, thresholded
    Braille,
    /// Directional strokes along Sobel edges
    Edges,
    /// Ordered dithering at braille dot resolution
    Dither,
}

impl RenderMode {
    pub fn name(&self) -> &'static str {
        match self {
            RenderMode::Ascii => "ascii",
            RenderMode::Braille => "braille",
            RenderMode::Edges => "edges",
            RenderMode::Dither => "dither",
        }
    }

    /// Palette used when none is configured.
    pub fn default_palette(&self) -> Palette {
        match self {
            RenderMode::Edges => Palette::edges(),
            _ => Palette::standard(),
        }
    }

    /// Source pixels per cell along each axis.
    fn cell_pixels(&self) -> (usize, usize) {
        match self {
            RenderMode::Braille | RenderMode::Dither => (2, 4),
            RenderMode::Ascii | RenderMode::Edges => (1, 1),
        }
    }
}

/// Everything a render needs, passed explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub mode: RenderMode,
    pub palette: Palette,
    /// Maximum grid width in cells.
    pub columns: usize,
    /// Maximum grid height in cells; derived from the aspect when unset.
    pub rows: Option<usize>,
    /// Cell height divided by cell width.
    pub char_aspect: f64,
    /// Lanczos window radius.
    pub radius: usize,
    /// Braille dot threshold.
    pub threshold: f64,
    /// Minimum gradient magnitude drawn in edge mode.
    pub edge_threshold: f64,
    /// Dither matrix is `2^bayer_depth` square.
    pub bayer_depth: u32,
    pub color: bool,
    pub invert: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            mode: RenderMode::Ascii,
            palette: Palette::standard(),
            columns: 80,
            rows: None,
            char_aspect: DEFAULT_CHAR_ASPECT,
            radius: 3,
            threshold: 128.0,
            edge_threshold: 100.0,
            bayer_depth: 2,
            color: false,
            invert: false,
        }
    }
}

impl RenderSettings {
    /// Reject settings that no transform could honor.
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(Error::invalid("columns must be positive"));
        }
        if self.rows == Some(0) {
            return Err(Error::invalid("rows must be positive"));
        }
        if !(self.char_aspect > 0.0) {
            return Err(Error::invalid(format!(
                "character aspect must be positive, got {}",
                self.char_aspect
            )));
        }
        if !(1..=MAX_RADIUS).contains(&self.radius) {
            return Err(Error::invalid(format!(
                "Lanczos radius must be in 1..={}, got {}",
                MAX_RADIUS, self.radius
            )));
        }
        if self.mode == RenderMode::Dither && !(1..=MAX_BAYER_DEPTH).contains(&self.bayer_depth) {
            return Err(Error::invalid(format!(
                "Bayer depth must be in 1..={}, got {}",
                MAX_BAYER_DEPTH, self.bayer_depth
            )));
        }
        Ok(())
    }

    /// Cell grid for an image of the given size.
    pub fn grid(&self, img_width: usize, img_height: usize) -> (usize, usize) {
        fit_cells(
            img_width,
            img_height,
            self.columns,
            self.rows.unwrap_or(usize::MAX),
            self.char_aspect,
        )
    }
}

/// Output of [`render`].
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Plain(GlyphPlane),
    Colored(ColorGlyphPlane),
}

impl Rendered {
    /// Printable rows, with color escapes when colored.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Rendered::Plain(glyphs) => glyphs.lines(),
            Rendered::Colored(cells) => cells.ansi_lines(),
        }
    }

    /// `(columns, rows)` of the glyph grid.
    pub fn dimensions(&self) -> (usize, usize) {
        match self {
            Rendered::Plain(glyphs) => glyphs.dimensions(),
            Rendered::Colored(cells) => cells.dimensions(),
        }
    }
}

/// The raster a quantizer consumes.
enum Working {
    Gray(GrayPlane),
    Gradient(GradientPlane),
}

/// Render an image into glyphs.
pub fn render(image: &ColorPlane, settings: &RenderSettings) -> Result<Rendered> {
    settings.validate()?;
    let (cols, rows) = settings.grid(image.width(), image.height());
    log::info!(
        "rendering {}x{} image as {} into {}x{} cells",
        image.width(),
        image.height(),
        settings.mode.name(),
        cols,
        rows
    );

    let glyphs = match (settings.mode, prepare(image, settings, cols, rows)?) {
        (RenderMode::Braille, Working::Gray(gray)) => to_braille(&gray, settings.threshold),
        (RenderMode::Dither, Working::Gray(gray)) => to_braille(&gray, DITHER_DOT_THRESHOLD),
        (_, Working::Gray(gray)) => to_ascii(&gray, &settings.palette),
        (_, Working::Gradient(gradient)) => {
            to_ascii_from_edges(&gradient, settings.edge_threshold, &settings.palette)
        }
    };

    if !settings.color {
        return Ok(Rendered::Plain(glyphs));
    }

    let (gw, gh) = glyphs.dimensions();
    let colors = image.resize(gw, gh, settings.radius)?;
    log::info!("colorizing {}x{} cells", gw, gh);
    Ok(Rendered::Colored(colorize(&glyphs, &colors)?))
}

/// The processed raster just before glyph quantization, as color.
///
/// Gray rasters are replicated into RGB; edge mode is visualized with
/// [`gradient_to_color`] using the edge threshold.
pub fn raster(image: &ColorPlane, settings: &RenderSettings) -> Result<ColorPlane> {
    settings.validate()?;
    let (cols, rows) = settings.grid(image.width(), image.height());
    log::info!("building {} raster for {}x{} cells", settings.mode.name(), cols, rows);

    Ok(match prepare(image, settings, cols, rows)? {
        Working::Gray(gray) => to_color(&gray),
        Working::Gradient(gradient) => gradient_to_color(&gradient, settings.edge_threshold),
    })
}

fn prepare(image: &ColorPlane, settings: &RenderSettings, cols: usize, rows: usize) -> Result<Working> {
    let (px, py) = settings.mode.cell_pixels();
    let (width, height) = (cols * px, rows * py);
    let gray = to_gray(image);

    if settings.mode == RenderMode::Edges {
        let gray = if settings.invert { invert_gray(&gray) } else { gray };
        let gradient = detect_edges(&gray);
        return Ok(Working::Gradient(gradient.resize(width, height, settings.radius)?));
    }

    let gray = gray.resize(width, height, settings.radius)?;
    let gray = if settings.invert { invert_gray(&gray) } else { gray };

    if settings.mode == RenderMode::Dither {
        return Ok(Working::Gray(bayer_dither(&gray, settings.bayer_depth)?));
    }
    Ok(Working::Gray(gray))
}
