// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Binary ink masks. Every sample is exactly `INK` or `BACKGROUND`.

use image::{GrayImage, Luma};

/// Sample value of an ink (foreground) pixel.
pub const INK: u8 = 255;
/// Sample value of a background pixel.
pub const BACKGROUND: u8 = 0;

/// A two-level image where handwriting strokes are `INK` on `BACKGROUND`.
///
/// The {0, 255} invariant is enforced at construction, so consumers can test
/// `!= 0` or `== INK` interchangeably.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    pixels: GrayImage,
}

impl BinaryMask {
    /// An all-background mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: GrayImage::new(width, height),
        }
    }

    /// Adopt a gray buffer, mapping every nonzero sample to `INK`.
    pub fn from_gray(mut gray: GrayImage) -> Self {
        for pixel in gray.pixels_mut() {
            if pixel.0[0] != BACKGROUND {
                pixel.0[0] = INK;
            }
        }
        Self { pixels: gray }
    }

    /// Build a mask from an ink predicate.
    pub fn from_fn(width: u32, height: u32, is_ink: impl Fn(u32, u32) -> bool) -> Self {
        Self {
            pixels: GrayImage::from_fn(width, height, |x, y| {
                Luma([if is_ink(x, y) { INK } else { BACKGROUND }])
            }),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        self.pixels.get_pixel(x, y).0[0] == INK
    }

    /// Paint the rectangle `[x, x + width) x [y, y + height)` with ink,
    /// clipped to the mask bounds.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32) {
        let x_end = x.saturating_add(width).min(self.width());
        let y_end = y.saturating_add(height).min(self.height());
        for yy in y..y_end {
            for xx in x..x_end {
                self.pixels.put_pixel(xx, yy, Luma([INK]));
            }
        }
    }

    /// Samples of row `y`, left to right.
    pub fn row(&self, y: u32) -> &[u8] {
        let width = self.width() as usize;
        let start = y as usize * width;
        &self.pixels.as_raw()[start..start + width]
    }

    /// Horizontal projection profile: number of ink pixels per row.
    pub fn row_ink_counts(&self) -> Vec<u32> {
        (0..self.height())
            .map(|y| self.row(y).iter().filter(|&&v| v == INK).count() as u32)
            .collect()
    }

    pub fn ink_pixel_count(&self) -> u64 {
        self.pixels.as_raw().iter().filter(|&&v| v == INK).count() as u64
    }

    /// Copy of rows `[top, bottom)`, clipped to the mask height.
    pub fn crop_rows(&self, top: u32, bottom: u32) -> Self {
        let bottom = bottom.min(self.height());
        let top = top.min(bottom);
        let view = image::imageops::crop_imm(&self.pixels, 0, top, self.width(), bottom - top);
        Self {
            pixels: view.to_image(),
        }
    }

    /// Borrow the underlying gray buffer (for contour tracing).
    pub fn as_gray(&self) -> &GrayImage {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_gray_normalises_to_two_levels() {
        let gray = GrayImage::from_fn(4, 1, |x, _| Luma([[0u8, 1, 128, 255][x as usize]]));
        let mask = BinaryMask::from_gray(gray);
        assert_eq!(mask.row(0), &[0, 255, 255, 255]);
    }

    #[test]
    fn fill_rect_clips_and_counts() {
        let mut mask = BinaryMask::new(10, 5);
        mask.fill_rect(8, 3, 5, 5);
        assert_eq!(mask.ink_pixel_count(), 4);
        assert_eq!(mask.row_ink_counts(), vec![0, 0, 0, 2, 2]);
        assert!(mask.is_ink(9, 4));
        assert!(!mask.is_ink(7, 4));
    }

    #[test]
    fn crop_rows_keeps_full_width() {
        let mut mask = BinaryMask::new(6, 8);
        mask.fill_rect(1, 2, 3, 2);
        let strip = mask.crop_rows(2, 4);
        assert_eq!((strip.width(), strip.height()), (6, 2));
        assert_eq!(strip.ink_pixel_count(), 6);

        let clipped = mask.crop_rows(6, 20);
        assert_eq!(clipped.height(), 2);
    }
}
