//! Separable Lanczos resampling.
//!
//! A resize runs as two independent 1D passes, horizontal then vertical.
//! Each pass precomputes one normalized coefficient row per destination
//! index ([`Kernel`]) and shares it across every row or column of the pass.
//!
//! Source taps that fall outside the image are clamped to the nearest edge
//! pixel (edge replication). Because the weights are renormalized after
//! clamping, every output sample is a true weighted average of its taps.

use std::f64::consts::{PI, TAU};

use crate::error::{Error, Result};
use crate::parallel::Splitter;
use crate::plane::{Gradient, Gray, Kind, Plane, Rgba};

/// Numeric plane kinds that can be resampled.
///
/// Channel count comes from [`Kind::CHANNELS`]; implementors only supply the
/// valid range of each channel, applied after summation.
pub trait Resample: Kind<Sample = f64> {
    fn clamp_channel(channel: usize, value: f64) -> f64;
}

impl Resample for Rgba {
    #[inline]
    fn clamp_channel(_channel: usize, value: f64) -> f64 {
        value.clamp(0.0, 255.0)
    }
}

impl Resample for Gray {
    #[inline]
    fn clamp_channel(_channel: usize, value: f64) -> f64 {
        value.clamp(0.0, 255.0)
    }
}

impl Resample for Gradient {
    /// Magnitude stays non-negative. The angle is clamped into `[0, 2π]`
    /// rather than wrapped, so interpolating across the 0/2π seam averages
    /// toward π instead of toward the seam.
    #[inline]
    fn clamp_channel(channel: usize, value: f64) -> f64 {
        match channel {
            0 => value.max(0.0),
            _ => value.clamp(0.0, TAU),
        }
    }
}

/// Lanczos window `L(x)` with radius `a`.
///
/// ```text
/// L(x) = 1                                 if x == 0
/// L(x) = a·sin(πx)·sin(πx/a) / (π²x²)      if -a <= x < a
/// L(x) = 0                                 otherwise
/// ```
pub fn lanczos(x: f64, a: usize) -> f64 {
    if x == 0.0 {
        return 1.0;
    }
    let a = a as f64;
    if -a <= x && x < a {
        let px = PI * x;
        return a * px.sin() * (px / a).sin() / (px * px);
    }
    0.0
}

/// Precomputed, normalized tap weights for one resampling pass.
///
/// Holds `dst_len * 2a` coefficients plus the first (unclamped) source tap
/// of every destination index.
#[derive(Debug, Clone)]
pub struct Kernel {
    taps: usize,
    src_len: usize,
    first_tap: Vec<isize>,
    weights: Vec<f64>,
}

impl Kernel {
    /// Build the kernel mapping `src_len` samples onto `dst_len` samples.
    ///
    /// Fails with [`Error::InvalidArgument`] if either length or `a` is zero,
    /// or if `dst_len * 2a` coefficients cannot be allocated.
    pub fn new(src_len: usize, dst_len: usize, a: usize) -> Result<Self> {
        Self::with_splitter(src_len, dst_len, a, &Splitter::default())
    }

    pub(crate) fn with_splitter(
        src_len: usize,
        dst_len: usize,
        a: usize,
        splitter: &Splitter,
    ) -> Result<Self> {
        if src_len == 0 || dst_len == 0 {
            return Err(Error::invalid(format!(
                "kernel lengths must be positive, got {} -> {}",
                src_len, dst_len
            )));
        }
        let taps = window_taps(a)?;
        let len = dst_len.checked_mul(taps).ok_or_else(|| too_wide(dst_len, a))?;
        let mut weights = Vec::new();
        weights
            .try_reserve_exact(len)
            .map_err(|_| too_wide(dst_len, a))?;
        weights.resize(len, 0.0);

        // Allocation succeeded, so `taps` (and `a`) fit in an isize.
        let ratio = src_len as f64 / dst_len as f64;
        let reach = a as isize - 1;

        let first_tap: Vec<isize> = (0..dst_len)
            .map(|j| source_position(j, ratio).floor() as isize - reach)
            .collect();

        splitter.for_each_band(&mut weights, taps, |rows, band| {
            for (j, row) in rows.zip(band.chunks_exact_mut(taps)) {
                let x = source_position(j, ratio);
                let mut sum = 0.0;
                for (i, weight) in row.iter_mut().enumerate() {
                    let tap = first_tap[j] + i as isize;
                    *weight = lanczos(x - tap as f64, a);
                    sum += *weight;
                }
                for weight in row.iter_mut() {
                    *weight /= sum;
                }
            }
        });

        Ok(Self {
            taps,
            src_len,
            first_tap,
            weights,
        })
    }

    /// Taps per destination sample (`2a`).
    pub fn taps(&self) -> usize {
        self.taps
    }

    /// Number of destination samples.
    pub fn len(&self) -> usize {
        self.first_tap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first_tap.is_empty()
    }

    /// Normalized weights for destination index `j`.
    #[inline]
    pub fn weights(&self, j: usize) -> &[f64] {
        &self.weights[j * self.taps..(j + 1) * self.taps]
    }

    /// Source index of tap `i` for destination `j`, clamped to the edge.
    #[inline]
    pub fn source_index(&self, j: usize, i: usize) -> usize {
        let last = self.src_len as isize - 1;
        (self.first_tap[j] + i as isize).clamp(0, last) as usize
    }
}

/// `2a`, rejecting a zero or overflowing radius.
fn window_taps(a: usize) -> Result<usize> {
    if a == 0 {
        return Err(Error::invalid("Lanczos window radius must be positive"));
    }
    a.checked_mul(2)
        .ok_or_else(|| Error::invalid(format!("Lanczos window radius {} is too large", a)))
}

fn too_wide(dst_len: usize, a: usize) -> Error {
    Error::invalid(format!(
        "Lanczos window radius {} is too large for {} output samples",
        a, dst_len
    ))
}

/// Continuous source coordinate of destination index `j`.
#[inline]
fn source_position(j: usize, ratio: f64) -> f64 {
    (j as f64 + 0.5) * ratio - 0.5
}

/// Resize `plane` to `width x height` using a Lanczos window of radius `a`.
///
/// Fails with [`Error::InvalidArgument`] if any of `width`, `height` or `a`
/// is zero, or if the radius is too large to build the coefficient tables.
/// Both tables are built before any pixel work starts.
pub fn resize<K: Resample>(plane: &Plane<K>, width: usize, height: usize, a: usize) -> Result<Plane<K>> {
    resize_with(plane, width, height, a, &Splitter::default())
}

pub(crate) fn resize_with<K: Resample>(
    plane: &Plane<K>,
    width: usize,
    height: usize,
    a: usize,
    splitter: &Splitter,
) -> Result<Plane<K>> {
    if width == 0 || height == 0 {
        return Err(Error::invalid(format!(
            "target dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    window_taps(a)?;

    let columns = Kernel::with_splitter(plane.width(), width, a, splitter)?;
    let rows = Kernel::with_splitter(plane.height(), height, a, splitter)?;

    log::debug!(
        "lanczos{} resize {}x{} -> {}x{}",
        a,
        plane.width(),
        plane.height(),
        width,
        height
    );

    let horizontal = resample_rows(plane, &columns, splitter);
    Ok(resample_columns(&horizontal, &rows, splitter))
}

/// Horizontal pass: `(src_w, src_h)` -> `(kernel.len(), src_h)`.
fn resample_rows<K: Resample>(src: &Plane<K>, kernel: &Kernel, splitter: &Splitter) -> Plane<K> {
    let channels = K::CHANNELS;
    let mut out = Plane::<K>::zeroed(kernel.len(), src.height());

    out.fill_rows_with(splitter, |y, row| {
        let src_row = src.row(y);
        for (j, pixel) in row.chunks_exact_mut(channels).enumerate() {
            let weights = kernel.weights(j);
            for (c, value) in pixel.iter_mut().enumerate() {
                let sum: f64 = weights
                    .iter()
                    .enumerate()
                    .map(|(i, w)| w * src_row[kernel.source_index(j, i) * channels + c])
                    .sum();
                *value = K::clamp_channel(c, sum);
            }
        }
    });

    out
}

/// Vertical pass: `(w, src_h)` -> `(w, kernel.len())`.
fn resample_columns<K: Resample>(src: &Plane<K>, kernel: &Kernel, splitter: &Splitter) -> Plane<K> {
    let channels = K::CHANNELS;
    let mut out = Plane::<K>::zeroed(src.width(), kernel.len());

    out.fill_rows_with(splitter, |y, row| {
        for (i, &w) in kernel.weights(y).iter().enumerate() {
            let src_row = src.row(kernel.source_index(y, i));
            for (acc, &v) in row.iter_mut().zip(src_row) {
                *acc += w * v;
            }
        }
        for (k, value) in row.iter_mut().enumerate() {
            *value = K::clamp_channel(k % channels, *value);
        }
    });

    out
}

impl<K: Resample> Plane<K> {
    /// Lanczos resize. See [`resize`].
    pub fn resize(&self, width: usize, height: usize, a: usize) -> Result<Self> {
        resize(self, width, height, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plane::{ColorPlane, GradientPlane, GrayPlane};

    const EPS: f64 = 1e-9;

    fn ramp(width: usize, height: usize) -> GrayPlane {
        let data = (0..width * height)
            .map(|i| ((i * 37) % 256) as f64)
            .collect();
        GrayPlane::from_vec(width, height, data).unwrap()
    }

    #[test]
    fn test_lanczos_center_is_one() {
        for a in 1..=5 {
            assert_eq!(lanczos(0.0, a), 1.0);
        }
    }

    #[test]
    fn test_lanczos_vanishes_at_integers() {
        for a in 1..=5 {
            for k in 1..=a as i32 {
                assert!(lanczos(k as f64, a).abs() < EPS, "L({k}) with a={a}");
                assert!(lanczos(-k as f64, a).abs() < EPS, "L(-{k}) with a={a}");
            }
        }
    }

    #[test]
    fn test_lanczos_outside_window_is_zero() {
        assert_eq!(lanczos(3.0, 3), 0.0);
        assert_eq!(lanczos(3.5, 3), 0.0);
        assert_eq!(lanczos(-3.5, 3), 0.0);
        assert_eq!(lanczos(2.0, 2), 0.0);
    }

    #[test]
    fn test_lanczos_is_symmetric_inside_window() {
        for &x in &[0.25, 0.5, 1.3, 2.7] {
            assert!((lanczos(x, 3) - lanczos(-x, 3)).abs() < EPS);
        }
    }

    #[test]
    fn test_kernel_rows_sum_to_one() {
        for a in 1..=4 {
            for &(src, dst) in &[(1, 1), (1, 100), (100, 1), (7, 3), (3, 7), (640, 80), (5, 5)] {
                let kernel = Kernel::new(src, dst, a).unwrap();
                assert_eq!(kernel.len(), dst);
                assert_eq!(kernel.taps(), 2 * a);
                for j in 0..dst {
                    let sum: f64 = kernel.weights(j).iter().sum();
                    assert!((sum - 1.0).abs() < EPS, "a={a} {src}->{dst} j={j} sum={sum}");
                }
            }
        }
    }

    #[test]
    fn test_kernel_clamps_taps_to_edges() {
        let kernel = Kernel::new(4, 4, 3).unwrap();
        for j in 0..4 {
            for i in 0..kernel.taps() {
                assert!(kernel.source_index(j, i) < 4);
            }
        }
        assert_eq!(kernel.source_index(0, 0), 0);
        assert_eq!(kernel.source_index(3, 5), 3);
    }

    #[test]
    fn test_resize_rejects_invalid_arguments() {
        let plane = ramp(4, 4);
        assert!(matches!(plane.resize(0, 4, 2), Err(Error::InvalidArgument(_))));
        assert!(matches!(plane.resize(4, 0, 2), Err(Error::InvalidArgument(_))));
        assert!(matches!(plane.resize(4, 4, 0), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_oversized_radius_is_rejected() {
        let plane = ramp(2, 2);
        for a in [usize::MAX, usize::MAX / 2 + 1, 1 << 62] {
            assert!(
                matches!(plane.resize(2, 2, a), Err(Error::InvalidArgument(_))),
                "a={a}"
            );
            assert!(matches!(Kernel::new(2, 1, a), Err(Error::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_kernel_rejects_empty_lengths() {
        assert!(matches!(Kernel::new(0, 5, 2), Err(Error::InvalidArgument(_))));
        assert!(matches!(Kernel::new(5, 0, 2), Err(Error::InvalidArgument(_))));
        assert!(matches!(Kernel::new(5, 5, 0), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_identity_resize() {
        let plane = ramp(9, 6);
        for a in 1..=3 {
            let out = plane.resize(9, 6, a).unwrap();
            for (got, want) in out.data().iter().zip(plane.data()) {
                assert!((got - want).abs() < 1e-6, "a={a}: {got} vs {want}");
            }
        }
    }

    #[test]
    fn test_constant_plane_stays_constant() {
        let plane = GrayPlane::from_vec(4, 4, vec![93.0; 16]).unwrap();
        let out = plane.resize(8, 8, 2).unwrap();
        assert_eq!(out.dimensions(), (8, 8));
        for &v in out.data() {
            assert!((v - 93.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_extreme_round_trip_is_bounded() {
        let plane = ColorPlane::from_vec(1, 1, vec![10.0, 200.0, 77.0, 255.0]).unwrap();
        let big = plane.resize(100, 100, 3).unwrap();
        let small = big.resize(1, 1, 3).unwrap();
        for (got, want) in small.data().iter().zip(plane.data()) {
            assert!(got.is_finite());
            assert!((got - want).abs() < 1e-6);
        }
    }

    #[test]
    fn test_ringing_is_clamped() {
        // A hard step overshoots with a >= 2; results must stay in range.
        let mut data = vec![0.0; 8];
        data[4..].fill(255.0);
        let plane = GrayPlane::from_vec(8, 1, data).unwrap();
        let out = plane.resize(37, 3, 3).unwrap();
        assert!(out.data().iter().all(|&v| (0.0..=255.0).contains(&v)));
        assert!(out.data().iter().any(|&v| v == 0.0));
        assert!(out.data().iter().any(|&v| v > 254.99));
    }

    #[test]
    fn test_color_channels_resample_independently() {
        let data = [255.0, 0.0, 0.0, 255.0].repeat(6);
        let plane = ColorPlane::from_vec(3, 2, data).unwrap();
        let out = plane.resize(5, 4, 2).unwrap();
        for pixel in out.data().chunks_exact(4) {
            assert!((pixel[0] - 255.0).abs() < 1e-9);
            assert!(pixel[1].abs() < 1e-9);
            assert!(pixel[2].abs() < 1e-9);
            assert!((pixel[3] - 255.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_gradient_angle_seam_is_clamped_not_wrapped() {
        // Angles just either side of the 0/2π seam point in almost the same
        // direction; the ideal circular mean is ~0, clamped interpolation
        // lands on π.
        let plane = GradientPlane::from_vec(2, 1, vec![1.0, 0.1, 1.0, TAU - 0.1]).unwrap();
        let out = plane.resize(1, 1, 1).unwrap();
        assert!((out.magnitude(0, 0) - 1.0).abs() < 1e-9);
        assert!((out.angle(0, 0) - PI).abs() < 1e-9);
    }

    #[test]
    fn test_gradient_channels_stay_in_range() {
        let plane = GradientPlane::from_vec(
            4,
            1,
            vec![0.0, 0.0, 0.0, 0.0, 500.0, TAU - 0.01, 500.0, TAU - 0.01],
        )
        .unwrap();
        let out = plane.resize(23, 2, 3).unwrap();
        for pair in out.data().chunks_exact(2) {
            assert!(pair[0] >= 0.0);
            assert!((0.0..=TAU).contains(&pair[1]));
        }
    }
}
