//! Pixel-wise conversions between plane kinds.

use std::f64::consts::TAU;

use crate::plane::{ColorPlane, GradientPlane, GrayPlane};

/// Rec. 709 luma coefficients.
const LUMA_R: f64 = 0.2126;
const LUMA_G: f64 = 0.7152;
const LUMA_B: f64 = 0.0722;

/// Convert an RGBA plane to grayscale.
///
/// The luminance formula is: Y = 0.2126*R + 0.7152*G + 0.0722*B,
/// clamped to `[0, 255]`. Alpha is ignored.
pub fn to_gray(color: &ColorPlane) -> GrayPlane {
    let (width, height) = color.dimensions();
    log::debug!("to_gray {}x{}", width, height);

    let mut out = GrayPlane::zeroed(width, height);
    out.fill_rows(|y, row| {
        for (luma, rgba) in row.iter_mut().zip(color.row(y).chunks_exact(4)) {
            *luma = (LUMA_R * rgba[0] + LUMA_G * rgba[1] + LUMA_B * rgba[2]).clamp(0.0, 255.0);
        }
    });
    out
}

/// Replicate intensity into R, G and B with opaque alpha.
pub fn to_color(gray: &GrayPlane) -> ColorPlane {
    let (width, height) = gray.dimensions();
    log::debug!("to_color {}x{}", width, height);

    let mut out = ColorPlane::zeroed(width, height);
    out.fill_rows(|y, row| {
        for (rgba, &v) in row.chunks_exact_mut(4).zip(gray.row(y)) {
            rgba.copy_from_slice(&[v, v, v, 255.0]);
        }
    });
    out
}

/// `255 - v` on the color channels. Alpha is kept.
pub fn invert_color(color: &ColorPlane) -> ColorPlane {
    let (width, height) = color.dimensions();
    log::debug!("invert_color {}x{}", width, height);

    let mut out = ColorPlane::zeroed(width, height);
    out.fill_rows(|y, row| {
        for (dst, src) in row.chunks_exact_mut(4).zip(color.row(y).chunks_exact(4)) {
            dst[0] = 255.0 - src[0];
            dst[1] = 255.0 - src[1];
            dst[2] = 255.0 - src[2];
            dst[3] = src[3];
        }
    });
    out
}

pub fn invert_gray(gray: &GrayPlane) -> GrayPlane {
    let (width, height) = gray.dimensions();
    log::debug!("invert_gray {}x{}", width, height);

    let mut out = GrayPlane::zeroed(width, height);
    out.fill_rows(|y, row| {
        for (dst, &v) in row.iter_mut().zip(gray.row(y)) {
            *dst = 255.0 - v;
        }
    });
    out
}

/// Keep only intensities strictly inside `(min, max)`.
///
/// Output is binary: 255 inside the band, 0 elsewhere.
pub fn band_pass(gray: &GrayPlane, min: f64, max: f64) -> GrayPlane {
    let (width, height) = gray.dimensions();
    log::debug!("band_pass {}x{} ({}, {})", width, height, min, max);

    let mut out = GrayPlane::zeroed(width, height);
    out.fill_rows(|y, row| {
        for (dst, &v) in row.iter_mut().zip(gray.row(y)) {
            if min < v && v < max {
                *dst = 255.0;
            }
        }
    });
    out
}

/// Visualize a gradient plane as color.
///
/// Pixels whose magnitude is below `threshold` stay transparent black.
/// The rest take a hue from `t = angle / 2π`, with each channel a third of
/// a turn apart, and opaque alpha.
pub fn gradient_to_color(gradient: &GradientPlane, threshold: f64) -> ColorPlane {
    let (width, height) = gradient.dimensions();
    log::debug!("gradient_to_color {}x{} threshold {}", width, height, threshold);

    let mut out = ColorPlane::zeroed(width, height);
    out.fill_rows(|y, row| {
        for (rgba, pair) in row.chunks_exact_mut(4).zip(gradient.row(y).chunks_exact(2)) {
            let (magnitude, angle) = (pair[0], pair[1]);
            if magnitude < threshold {
                continue;
            }
            let t = angle / TAU;
            rgba[0] = t * 255.0;
            rgba[1] = ((t + 1.0 / 3.0) * 255.0) % 255.0;
            rgba[2] = ((t + 2.0 / 3.0) * 255.0) % 255.0;
            rgba[3] = 255.0;
        }
    });
    out
}
