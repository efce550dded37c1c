//! Errors surfaced by the command-line front end.

use std::path::PathBuf;

use termglyph::{ConfigError, IoError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("no input image given (see --help)")]
    MissingInput,

    #[error("Config file already exists: {}\nUse 'termglyph config show' to view current settings.", .0.display())]
    ConfigExists(PathBuf),

    #[error("Failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Image(#[from] IoError),

    #[error(transparent)]
    Render(#[from] termglyph::Error),
}
