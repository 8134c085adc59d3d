// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Horizontal ink runs on text rows: the shared scan behind spacing and
// connectivity.

use crate::preprocess::BinaryMask;
use crate::preprocess::mask::INK;

/// A maximal horizontal stretch of ink on one row, `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InkRun {
    pub start: u32,
    pub end: u32,
}

/// Maximal ink runs of one row, left to right.
pub fn row_runs(row: &[u8]) -> Vec<InkRun> {
    let mut runs = Vec::new();
    let mut open: Option<u32> = None;
    for (x, &v) in row.iter().enumerate() {
        let x = x as u32;
        match (open, v == INK) {
            (None, true) => open = Some(x),
            (Some(start), false) => {
                runs.push(InkRun { start, end: x - 1 });
                open = None;
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        runs.push(InkRun {
            start,
            end: row.len() as u32 - 1,
        });
    }
    runs
}

/// Rows whose ink count exceeds `fraction` of the busiest row.
pub fn text_rows(mask: &BinaryMask, fraction: f64) -> Vec<u32> {
    let profile = mask.row_ink_counts();
    let max_row = profile.iter().copied().max().unwrap_or(0);
    if max_row == 0 {
        return Vec::new();
    }
    let threshold = fraction * max_row as f64;
    profile
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count as f64 > threshold)
        .map(|(y, _)| y as u32)
        .collect()
}

/// Blank-pixel widths between consecutive runs on every text row.
///
/// Always at least 1, since runs are maximal.
pub fn run_gaps(mask: &BinaryMask, fraction: f64) -> Vec<u32> {
    let mut gaps = Vec::new();
    for y in text_rows(mask, fraction) {
        let runs = row_runs(mask.row(y));
        gaps.extend(runs.windows(2).map(|pair| pair[1].start - pair[0].end - 1));
    }
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_cover_both_edges() {
        let row = [255, 255, 0, 0, 255, 0, 255];
        assert_eq!(
            row_runs(&row),
            vec![
                InkRun { start: 0, end: 1 },
                InkRun { start: 4, end: 4 },
                InkRun { start: 6, end: 6 },
            ]
        );
        assert!(row_runs(&[0, 0, 0]).is_empty());
    }

    #[test]
    fn gaps_count_blank_pixels_between_runs() {
        let mut mask = BinaryMask::new(40, 10);
        mask.fill_rect(2, 2, 5, 6); // columns 2..=6
        mask.fill_rect(10, 2, 5, 6); // columns 10..=14, three blanks
        mask.fill_rect(16, 2, 5, 6); // one blank
        let gaps = run_gaps(&mask, 0.1);
        assert_eq!(gaps.len(), 12);
        assert_eq!(gaps.iter().filter(|&&g| g == 3).count(), 6);
        assert_eq!(gaps.iter().filter(|&&g| g == 1).count(), 6);
    }

    #[test]
    fn sparse_rows_are_ignored() {
        let mut mask = BinaryMask::new(100, 10);
        mask.fill_rect(0, 0, 100, 1);
        // Row 5 has two short runs but only 4 ink pixels, under 10% of 100.
        mask.fill_rect(10, 5, 2, 1);
        mask.fill_rect(50, 5, 2, 1);
        assert_eq!(text_rows(&mask, 0.1), vec![0]);
        assert!(run_gaps(&mask, 0.1).is_empty());
    }
}
