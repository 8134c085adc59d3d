// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Preprocessing pipeline: decoding, binarization, and text line segmentation.

pub mod binarize;
pub mod lines;
pub mod mask;
pub mod raster;

pub use binarize::binarize;
pub use lines::{LineStrip, segment_lines};
pub use mask::BinaryMask;
pub use raster::{RasterImage, load};
