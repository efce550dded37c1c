//! Configuration file handling for termglyph.
//!
//! Loads configuration from `<config dir>/termglyph/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::dimensions::DEFAULT_CHAR_ASPECT;
use crate::glyph::Palette;
use crate::pipeline::{RenderMode, RenderSettings};

/// Configuration file structure for termglyph.
/// Loaded from the user config dir (or custom path via --config).
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub terminal: TerminalConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub mode: RenderMode,
    /// Preset name or literal ramp. Unset picks the mode's own palette.
    pub palette: Option<String>,
    pub radius: usize,
    pub threshold: f64,
    pub edge_threshold: f64,
    pub bayer_depth: u32,
    pub color: bool,
    pub invert: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::Ascii,
            palette: None,
            radius: 3,
            threshold: 128.0,
            edge_threshold: 100.0,
            bayer_depth: 2,
            color: false,
            invert: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TerminalConfig {
    /// Grid width when none is given on the command line.
    pub columns: usize,
    pub char_aspect: f64,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            columns: 80,
            char_aspect: DEFAULT_CHAR_ASPECT,
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config = Self::parse(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            log::info!("loaded config from {}", path.display());
            Ok(config)
        } else {
            log::debug!("no config at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Turn the file into render settings.
    ///
    /// A palette that fails to resolve falls back to the mode's default
    /// with a warning.
    pub fn render_settings(&self) -> RenderSettings {
        let render = &self.render;
        let palette = match render.palette.as_deref() {
            None => render.mode.default_palette(),
            Some(text) => Palette::from_name_or_ramp(text).unwrap_or_else(|e| {
                log::warn!("ignoring configured palette: {}", e);
                render.mode.default_palette()
            }),
        };

        RenderSettings {
            mode: render.mode,
            palette,
            columns: self.terminal.columns,
            rows: None,
            char_aspect: self.terminal.char_aspect,
            radius: render.radius,
            threshold: render.threshold,
            edge_threshold: render.edge_threshold,
            bayer_depth: render.bayer_depth,
            color: render.color,
            invert: render.invert,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("termglyph").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/termglyph/config.toml")
        })
}

/// Commented default file written by `config init`.
pub const DEFAULT_CONFIG: &str = r#"# termglyph configuration

[render]
# Mode: ascii, braille, edges, dither
mode = "ascii"
# Palette: standard, detailed, blocks, minimal, edges, or a literal ramp
# such as " .oO@". Leave unset to use the mode's default.
# palette = "standard"
# Lanczos window radius, 1-16 (2 or 3 are typical)
radius = 3
# Braille dot threshold (0-255)
threshold = 128.0
# Minimum gradient magnitude drawn in edge mode
edge_threshold = 100.0
# Dither matrix is 2^bayer_depth square (1-8)
bayer_depth = 2
# True-color output
color = false
# Invert brightness (for light terminals)
invert = false

[terminal]
# Grid width when --width is not given
columns = 80
# Character cell height / width
char_aspect = 2.0
"#;
