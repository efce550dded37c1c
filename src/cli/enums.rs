//! CLI enum types for render options.

use clap::ValueEnum;

use termglyph::RenderMode;

/// Render mode selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    #[default]
    Ascii,
    Braille,
    Edges,
    Dither,
}

impl From<Mode> for RenderMode {
    fn from(m: Mode) -> Self {
        match m {
            Mode::Ascii => RenderMode::Ascii,
            Mode::Braille => RenderMode::Braille,
            Mode::Edges => RenderMode::Edges,
            Mode::Dither => RenderMode::Dither,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_to_render_mode() {
        assert_eq!(RenderMode::from(Mode::Ascii), RenderMode::Ascii);
        assert_eq!(RenderMode::from(Mode::Braille), RenderMode::Braille);
        assert_eq!(RenderMode::from(Mode::Edges), RenderMode::Edges);
        assert_eq!(RenderMode::from(Mode::Dither), RenderMode::Dither);
    }

    #[test]
    fn test_mode_names_match_config_names() {
        for mode in Mode::value_variants() {
            let name = mode.to_possible_value().unwrap().get_name().to_string();
            assert_eq!(name, RenderMode::from(*mode).name());
        }
    }
}
