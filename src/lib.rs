//! termglyph library crate.
//!
//! Image-plane processing for terminal rendering: a flat-buffer [`Plane`]
//! type, separable Lanczos resampling, Sobel edge detection, ordered
//! dithering and glyph quantization, all run row-parallel through a
//! [`Splitter`].
//!
//! ```
//! use termglyph::{to_ascii, GrayPlane, Palette};
//!
//! let gray = GrayPlane::from_vec(3, 1, vec![0.0, 128.0, 255.0]).unwrap();
//! let glyphs = to_ascii(&gray, &Palette::standard());
//! assert_eq!(glyphs.lines(), vec![" =@".to_string()]);
//! ```

pub mod config;
pub mod convert;
pub mod dimensions;
pub mod dither;
pub mod edges;
pub mod error;
pub mod glyph;
pub mod io;
pub mod parallel;
pub mod pipeline;
pub mod plane;
pub mod resample;

pub use config::{Config, ConfigError};
pub use convert::{band_pass, gradient_to_color, invert_color, invert_gray, to_color, to_gray};
pub use dimensions::{fit_cells, DEFAULT_CHAR_ASPECT};
pub use dither::{bayer_dither, bayer_matrix, BayerMatrix, MAX_BAYER_DEPTH};
pub use edges::detect_edges;
pub use error::{Error, Result};
pub use glyph::{colorize, to_ascii, to_ascii_from_edges, to_braille, Palette, PaletteName};
pub use io::IoError;
pub use parallel::{Join, Splitter};
pub use pipeline::{render, RenderMode, RenderSettings, Rendered, MAX_RADIUS};
pub use plane::{
    CellColor, ColorCell, ColorGlyphPlane, ColorPlane, GlyphPlane, GradientPlane, GrayPlane, Kind,
    Plane,
};
pub use resample::{lanczos, resize, Kernel, Resample};
