// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Binarization: grayscale, Gaussian smoothing, Otsu threshold, inversion so
// that dark ink on light paper becomes `INK` on `BACKGROUND`.

use graphometry_core::config::PreprocessConfig;
use image::{GrayImage, Luma};
use imageproc::contrast::otsu_level;
use imageproc::filter::separable_filter_equal;
use tracing::{debug, info, instrument};

use super::mask::{BACKGROUND, BinaryMask, INK};
use super::raster::RasterImage;

/// Convert a scan into an ink mask.
///
/// Deterministic: the same raster always yields the same mask. A raster with
/// no intensity contrast at all (blank page, solid fill) carries no strokes and
/// yields an all-background mask.
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn binarize(image: &RasterImage, config: &PreprocessConfig) -> BinaryMask {
    let gray = image.to_gray();
    let (width, height) = gray.dimensions();

    let (darkest, brightest) = intensity_range(&gray);
    if darkest == brightest {
        debug!(level = darkest, "Uniform image, no ink");
        return BinaryMask::new(width, height);
    }

    let kernel = gaussian_kernel(config.blur_kernel_size);
    let blurred: GrayImage = separable_filter_equal(&gray, kernel.as_slice());

    let level = otsu_level(&blurred);
    debug!(level, kernel = kernel.len(), "Otsu level computed");

    // Paper is brighter than the level; ink sits at or below it.
    let mask = GrayImage::from_fn(width, height, |x, y| {
        let value = blurred.get_pixel(x, y).0[0];
        Luma([if value > level { BACKGROUND } else { INK }])
    });

    let mask = BinaryMask::from_gray(mask);
    info!(ink_pixels = mask.ink_pixel_count(), "Binarization complete");
    mask
}

/// Darkest and brightest sample. (0, 0) for an empty image.
fn intensity_range(gray: &GrayImage) -> (u8, u8) {
    gray.pixels()
        .map(|p| p.0[0])
        .fold(None, |range, v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .unwrap_or((0, 0))
}

/// Normalised 1-D Gaussian of odd length `size`, with σ derived from the size
/// the usual way: σ = 0.3·((size − 1)/2 − 1) + 0.8.
fn gaussian_kernel(size: u32) -> Vec<f32> {
    let size = size.max(1) | 1;
    let sigma = 0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let centre = (size / 2) as f32;

    let weights: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - centre;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f32 = weights.iter().sum();
    weights.into_iter().map(|w| w / sum).collect()
}
