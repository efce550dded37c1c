//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use termglyph::{Config, Palette, RenderSettings};

use super::enums::Mode;

/// Render images as ASCII, braille or edge art in the terminal
#[derive(Parser, Debug)]
#[command(name = "termglyph")]
#[command(version, about = "Render images as glyph art in the terminal", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Input image (PNG or JPEG)
    pub input: Option<PathBuf>,

    /// Output width in cells (default: from config)
    #[arg(short, long)]
    pub width: Option<usize>,

    /// Maximum output height in cells
    #[arg(long)]
    pub height: Option<usize>,

    /// Render mode
    #[arg(short, long)]
    pub mode: Option<Mode>,

    /// Palette preset (standard, detailed, blocks, minimal, edges) or a literal ramp
    #[arg(short, long)]
    pub palette: Option<String>,

    /// Lanczos window radius (1-16)
    #[arg(long)]
    pub radius: Option<usize>,

    /// Braille dot threshold (0-255)
    #[arg(long, value_parser = parse_threshold)]
    pub threshold: Option<f64>,

    /// Minimum gradient magnitude drawn in edge mode
    #[arg(long)]
    pub edge_threshold: Option<f64>,

    /// Dither matrix depth (matrix is 2^n square)
    #[arg(long)]
    pub bayer_depth: Option<u32>,

    /// True-color output
    #[arg(long)]
    pub color: bool,

    /// Invert brightness (for light terminals)
    #[arg(long)]
    pub invert: bool,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Also write the processed raster to this image file
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Parse and validate a dot threshold (0-255)
fn parse_threshold(s: &str) -> Result<f64, String> {
    let threshold: f64 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(0.0..=255.0).contains(&threshold) {
        return Err(format!("Threshold must be between 0 and 255, got {}", threshold));
    }
    Ok(threshold)
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

impl Args {
    /// Merge settings: CLI args > config file > built-in defaults.
    pub fn render_settings(&self, config: &Config) -> termglyph::Result<RenderSettings> {
        let mut config = config.clone();
        if let Some(mode) = self.mode {
            config.render.mode = mode.into();
        }

        let mut settings = config.render_settings();
        if let Some(text) = &self.palette {
            settings.palette = Palette::from_name_or_ramp(text)?;
        }
        if let Some(width) = self.width {
            settings.columns = width;
        }
        if self.height.is_some() {
            settings.rows = self.height;
        }
        if let Some(radius) = self.radius {
            settings.radius = radius;
        }
        if let Some(threshold) = self.threshold {
            settings.threshold = threshold;
        }
        if let Some(edge_threshold) = self.edge_threshold {
            settings.edge_threshold = edge_threshold;
        }
        if let Some(depth) = self.bayer_depth {
            settings.bayer_depth = depth;
        }
        settings.color |= self.color;
        settings.invert |= self.invert;

        settings.validate()?;
        Ok(settings)
    }
}
