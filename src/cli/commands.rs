//! Subcommand handlers for config actions and the render itself.

use std::io::Write;
use std::path::{Path, PathBuf};

use termglyph::config::{default_path, DEFAULT_CONFIG};
use termglyph::{io, pipeline, Config};

use super::args::{Args, ConfigAction};
use super::error::CliError;

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, path: Option<&Path>) -> Result<(), CliError> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(default_path);

    match action {
        ConfigAction::Show => {
            let config = Config::load(Some(config_path.as_path()))?;
            let settings = config.render_settings();

            println!("Current configuration:");
            println!("  Mode: {}", settings.mode.name());
            println!("  Palette: \"{}\"", settings.palette);
            println!("  Columns: {}", settings.columns);
            println!("  Char aspect: {}", settings.char_aspect);
            println!("  Lanczos radius: {}", settings.radius);
            println!("  Braille threshold: {}", settings.threshold);
            println!("  Edge threshold: {}", settings.edge_threshold);
            println!("  Bayer depth: {}", settings.bayer_depth);
            println!("  Color: {}", if settings.color { "yes" } else { "no" });
            println!("  Invert: {}", if settings.invert { "yes" } else { "no" });
            println!();

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
            Ok(())
        }
        ConfigAction::Init => {
            if config_path.exists() {
                return Err(CliError::ConfigExists(config_path));
            }
            write_default_config(&config_path)?;
            println!("Created config file: {}", config_path.display());
            Ok(())
        }
    }
}

fn write_default_config(path: &Path) -> Result<(), CliError> {
    let write_err = |source| CliError::Write {
        path: path.to_path_buf(),
        source,
    };

    // Create parent directories if needed
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, DEFAULT_CONFIG).map_err(write_err)
}

/// Load, render and print the input image; optionally save the raster.
pub fn render(args: &Args, out: &mut impl Write) -> Result<(), CliError> {
    let input = args.input.as_deref().ok_or(CliError::MissingInput)?;
    let config = Config::load(args.config.as_deref())?;
    let settings = args.render_settings(&config)?;
    let image = io::load(input)?;

    let rendered = pipeline::render(&image, &settings)?;
    let stdout_err = |source| CliError::Write {
        path: PathBuf::from("<stdout>"),
        source,
    };
    for line in rendered.lines() {
        writeln!(out, "{}", line).map_err(stdout_err)?;
    }

    if let Some(path) = &args.out {
        let raster = pipeline::raster(&image, &settings)?;
        io::save(path, &raster)?;
    }
    Ok(())
}
