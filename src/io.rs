//! Image decode and encode at the file boundary.

use std::path::Path;

use crate::plane::ColorPlane;

/// Errors raised while reading or writing image files.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Failed to decode image '{path}': {source}")]
    Decode {
        path: String,
        source: image::ImageError,
    },

    #[error("Failed to encode image '{path}': {source}")]
    Encode {
        path: String,
        source: image::ImageError,
    },

    #[error("Image too large: {width}x{height}")]
    TooLarge { width: usize, height: usize },

    #[error(transparent)]
    Plane(#[from] crate::Error),
}

/// Decode any format the `image` crate understands into an RGBA plane.
pub fn load(path: impl AsRef<Path>) -> Result<ColorPlane, IoError> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|e| IoError::Decode {
        path: path.display().to_string(),
        source: e,
    })?;

    let rgba = img.to_rgba8();
    let (width, height) = (rgba.width() as usize, rgba.height() as usize);
    log::info!("loaded {}x{} image from {}", width, height, path.display());

    Ok(ColorPlane::from_rgba8(width, height, rgba.as_raw())?)
}

/// Encode a plane as 8-bit RGBA. The format follows the file extension.
pub fn save(path: impl AsRef<Path>, plane: &ColorPlane) -> Result<(), IoError> {
    let path = path.as_ref();
    let (width, height) = plane.dimensions();
    let too_large = || IoError::TooLarge { width, height };
    let w = u32::try_from(width).map_err(|_| too_large())?;
    let h = u32::try_from(height).map_err(|_| too_large())?;

    let buffer = image::RgbaImage::from_raw(w, h, plane.to_rgba8()).ok_or_else(too_large)?;
    buffer.save(path).map_err(|e| IoError::Encode {
        path: path.display().to_string(),
        source: e,
    })?;
    log::info!("wrote {}x{} image to {}", width, height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plane.png");

        let bytes: Vec<u8> = (0..3 * 2 * 4).map(|i| (i * 10) as u8).collect();
        let plane = ColorPlane::from_rgba8(3, 2, &bytes).unwrap();
        save(&path, &plane).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(loaded.to_rgba8(), bytes);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, IoError::Decode { .. }));
        assert!(err.to_string().contains("nope.png"));
    }

    #[test]
    fn test_save_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let plane = ColorPlane::new(1, 1).unwrap();
        let err = save(dir.path().join("plane.unknownext"), &plane).unwrap_err();
        assert!(matches!(err, IoError::Encode { .. }));
    }
}
