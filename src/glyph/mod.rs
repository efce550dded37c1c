//! Glyph quantization.
//!
//! Turns sample planes into character planes suitable for terminal display:
//!
//! 1. **Palette mapping** - intensity to a glyph from a dark-to-bright ramp
//! 2. **Braille** - 2x4 pixel blocks to a single braille pattern
//! 3. **Edge glyphs** - gradient direction to a directional stroke
//! 4. **Colorize** - attach per-cell true-color foregrounds
//!
//! # Palettes
//!
//! Built-in palettes are listed in [`PaletteName`]; any non-empty string can
//! also be used as a literal ramp through [`Palette`]'s `FromStr`.

pub mod braille;
mod colorize;
pub(crate) mod mapping;
mod palette;

pub use braille::{grid_to_braille, to_braille, BRAILLE_BASE};
pub use colorize::colorize;
pub use mapping::{to_ascii, to_ascii_from_edges};
pub use palette::{
    Palette, PaletteName, BLOCKS_RAMP, DETAILED_RAMP, EDGE_GLYPHS, MINIMAL_RAMP, STANDARD_RAMP,
};
