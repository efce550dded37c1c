//! Glyph palettes for quantization.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Standard ASCII density ramp (10 levels).
/// Characters ordered from darkest (space) to brightest (@).
pub const STANDARD_RAMP: &str = " .:-=+*#%@";

/// Fine-grained ASCII ramp (70 levels).
pub const DETAILED_RAMP: &str =
    " .'`^\",:;Il!i><~+_-?][}{1)(|\\/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// Unicode block ramp (5 levels).
pub const BLOCKS_RAMP: &str = " ░▒▓█";

/// Minimal ramp (4 levels). Clean, less noisy look.
pub const MINIMAL_RAMP: &str = " .:#";

/// Directional glyphs indexed by gradient angle over `[0, 2π)`.
///
/// A gradient points across an edge, so angle 0 (brighter to the right) is
/// drawn as a vertical stroke and π/2 (brighter below) as a horizontal one.
/// Rows grow downward, which puts π/4 on a `/` stroke.
pub const EDGE_GLYPHS: &str = "|/-\\|/-\\";

/// Ordered glyph sequence, darkest (or first direction) to brightest.
///
/// Never empty. Passed explicitly to every quantization call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    glyphs: Vec<char>,
}

impl Palette {
    /// Build a palette from glyphs ordered dark to bright.
    ///
    /// Fails with [`Error::InvalidArgument`] if no glyphs are given.
    pub fn new(glyphs: impl IntoIterator<Item = char>) -> Result<Self> {
        let glyphs: Vec<char> = glyphs.into_iter().collect();
        if glyphs.is_empty() {
            return Err(Error::invalid("palette must contain at least one glyph"));
        }
        Ok(Self { glyphs })
    }

    fn preset(ramp: &'static str) -> Self {
        Self {
            glyphs: ramp.chars().collect(),
        }
    }

    pub fn standard() -> Self {
        Self::preset(STANDARD_RAMP)
    }

    pub fn detailed() -> Self {
        Self::preset(DETAILED_RAMP)
    }

    pub fn blocks() -> Self {
        Self::preset(BLOCKS_RAMP)
    }

    pub fn minimal() -> Self {
        Self::preset(MINIMAL_RAMP)
    }

    pub fn edges() -> Self {
        Self::preset(EDGE_GLYPHS)
    }

    /// Resolve a preset name, or treat the text as a literal ramp.
    pub fn from_name_or_ramp(text: &str) -> Result<Self> {
        match text.parse::<PaletteName>() {
            Ok(name) => Ok(name.palette()),
            Err(_) => Self::new(text.chars()),
        }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// Glyph at `index`, clamped to the last entry.
    #[inline]
    pub fn get(&self, index: usize) -> char {
        self.glyphs[index.min(self.glyphs.len() - 1)]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

impl FromStr for Palette {
    type Err = Error;

    /// Literal ramp, one glyph per `char`.
    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.chars())
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for glyph in &self.glyphs {
            write!(f, "{}", glyph)?;
        }
        Ok(())
    }
}

/// Built-in palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteName {
    /// Standard ASCII density ramp (10 levels)
    #[default]
    Standard,
    /// Fine-grained ASCII ramp (70 levels)
    Detailed,
    /// Unicode block characters (5 levels)
    Blocks,
    /// Minimal ramp (4 levels)
    Minimal,
    /// Directional glyphs for edge rendering
    Edges,
}

impl PaletteName {
    pub fn palette(&self) -> Palette {
        match self {
            PaletteName::Standard => Palette::standard(),
            PaletteName::Detailed => Palette::detailed(),
            PaletteName::Blocks => Palette::blocks(),
            PaletteName::Minimal => Palette::minimal(),
            PaletteName::Edges => Palette::edges(),
        }
    }

    /// Get a human-readable name for the palette.
    pub fn name(&self) -> &'static str {
        match self {
            PaletteName::Standard => "standard",
            PaletteName::Detailed => "detailed",
            PaletteName::Blocks => "blocks",
            PaletteName::Minimal => "minimal",
            PaletteName::Edges => "edges",
        }
    }
}

impl FromStr for PaletteName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "standard" => Ok(PaletteName::Standard),
            "detailed" => Ok(PaletteName::Detailed),
            "blocks" => Ok(PaletteName::Blocks),
            "minimal" => Ok(PaletteName::Minimal),
            "edges" => Ok(PaletteName::Edges),
            other => Err(Error::invalid(format!("unknown palette '{}'", other))),
        }
    }
}
