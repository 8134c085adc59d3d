// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Decoded raster images: the untouched scan as read from disk or memory.

use std::path::Path;

use graphometry_core::error::{GraphometryError, Result};
use image::{DynamicImage, GrayImage};
use tracing::{debug, info, instrument};

/// A decoded scan. Immutable once loaded; every later stage borrows it.
#[derive(Debug, Clone)]
pub struct RasterImage {
    image: DynamicImage,
}

impl RasterImage {
    // -- Construction ---------------------------------------------------------

    /// Decode an image file (PNG, JPEG, BMP, TIFF, ...).
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|err| GraphometryError::Decode {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        info!(
            width = image.width(),
            height = image.height(),
            "Image loaded"
        );
        Ok(Self { image })
    }

    /// Decode an in-memory encoded image.
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(data)
            .map_err(|err| GraphometryError::DecodeBytes(err.to_string()))?;
        debug!(
            width = image.width(),
            height = image.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Single-channel luminance copy of the image.
    pub fn to_gray(&self) -> GrayImage {
        self.image.to_luma8()
    }
}

/// Decode the image at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<RasterImage> {
    RasterImage::open(path)
}
