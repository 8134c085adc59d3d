// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text line segmentation from the horizontal projection profile.

use std::ops::Range;

use graphometry_core::config::PreprocessConfig;
use tracing::{debug, instrument};

use super::mask::BinaryMask;

/// One horizontal band of handwriting cut from a larger mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineStrip {
    /// First row of the strip in the source mask.
    pub top: u32,
    /// One past the last row.
    pub bottom: u32,
    /// The strip's own pixels, full source width.
    pub mask: BinaryMask,
}

impl LineStrip {
    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Split a mask into text lines.
///
/// Returns an empty vector when the mask has no ink. Strips of
/// `min_line_height` rows or fewer are discarded.
#[instrument(skip_all, fields(width = mask.width(), height = mask.height()))]
pub fn segment_lines(mask: &BinaryMask, config: &PreprocessConfig) -> Vec<LineStrip> {
    let profile = mask.row_ink_counts();
    let ranges = line_ranges(&profile, config.line_fraction, config.min_line_height);
    let strips: Vec<LineStrip> = ranges
        .into_iter()
        .map(|rows| LineStrip {
            top: rows.start,
            bottom: rows.end,
            mask: mask.crop_rows(rows.start, rows.end),
        })
        .collect();
    for strip in &strips {
        debug!(top = strip.top, height = strip.height(), "Line strip");
    }
    debug!(lines = strips.len(), "Line segmentation complete");
    strips
}

/// Row ranges whose projection exceeds `fraction` of the profile maximum.
pub fn line_ranges(profile: &[u32], fraction: f64, min_height: u32) -> Vec<Range<u32>> {
    let max_row = profile.iter().copied().max().unwrap_or(0);
    if max_row == 0 {
        return Vec::new();
    }
    let threshold = fraction * max_row as f64;

    let mut ranges = Vec::new();
    let mut start: Option<u32> = None;
    for (row, &count) in profile.iter().enumerate() {
        let row = row as u32;
        let is_text = count as f64 > threshold;
        match (start, is_text) {
            (None, true) => start = Some(row),
            (Some(top), false) => {
                ranges.push(top..row);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(top) = start {
        ranges.push(top..profile.len() as u32);
    }

    ranges.retain(|r| r.end - r.start > min_height);
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_lines_are_found_in_order() {
        let mut mask = BinaryMask::new(120, 80);
        mask.fill_rect(10, 5, 100, 15);
        mask.fill_rect(10, 40, 80, 20);

        let lines = segment_lines(&mask, &PreprocessConfig::default());
        assert_eq!(lines.len(), 2);
        assert_eq!((lines[0].top, lines[0].bottom), (5, 20));
        assert_eq!((lines[1].top, lines[1].bottom), (40, 60));
        assert_eq!(lines[1].height(), 20);
        assert_eq!(lines[1].mask.height(), 20);
        assert_eq!(lines[1].mask.ink_pixel_count(), 80 * 20);
    }

    #[test]
    fn textless_mask_has_no_lines() {
        let mask = BinaryMask::new(64, 64);
        assert!(segment_lines(&mask, &PreprocessConfig::default()).is_empty());
    }

    #[test]
    fn line_touching_the_bottom_edge_is_closed_at_height() {
        assert_eq!(line_ranges(&[0, 0, 9, 9, 9, 9], 0.1, 2), vec![2..6]);
    }

    #[test]
    fn thin_strips_are_discarded() {
        // Two-row strip dropped, three-row strip kept.
        assert_eq!(line_ranges(&[5, 5, 0, 5, 5, 5, 0], 0.1, 2), vec![3..6]);
    }

    #[test]
    fn sparse_rows_below_fraction_split_lines() {
        // 1 is not above 10% of 20, so it separates the two bands.
        let profile = [20, 20, 20, 1, 18, 18, 18];
        assert_eq!(line_ranges(&profile, 0.1, 2), vec![0..3, 4..7]);
    }
}
