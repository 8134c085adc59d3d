// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Line-to-line feature variation, shared by the disguise and writing
// conditions heuristics.

use graphometry_core::config::AnalysisConfig;
use graphometry_core::policy::Metric;
use serde::Serialize;
use tracing::debug;

use super::{Figure, Measured};
use crate::features::FeatureExtractor;
use crate::features::stats::std_dev;
use crate::preprocess::{BinaryMask, segment_lines};

/// Spread of the per-line means of size, spacing and slant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineVariation {
    pub lines: usize,
    pub size_stddev: f64,
    pub spacing_stddev: f64,
    pub slant_stddev: f64,
}

impl LineVariation {
    pub fn total(&self) -> f64 {
        self.size_stddev + self.spacing_stddev + self.slant_stddev
    }
}

/// Measure each text line separately and take the spread across lines.
///
/// `None` when the page has no text lines.
pub fn line_variation(mask: &BinaryMask, config: &AnalysisConfig) -> Option<LineVariation> {
    let lines = segment_lines(mask, &config.preprocess);
    if lines.is_empty() {
        return None;
    }

    let extractor = FeatureExtractor::new(config.features.clone());
    let mut sizes = Vec::with_capacity(lines.len());
    let mut spacings = Vec::with_capacity(lines.len());
    let mut slants = Vec::with_capacity(lines.len());
    for line in &lines {
        let features = extractor.extract(&line.mask);
        sizes.push(features.avg_letter_height);
        spacings.push(features.avg_spacing);
        slants.push(features.slant_angle);
    }

    let variation = LineVariation {
        lines: lines.len(),
        size_stddev: std_dev(&sizes),
        spacing_stddev: std_dev(&spacings),
        slant_stddev: std_dev(&slants),
    };
    debug!(?variation, total = variation.total(), "Line variation measured");
    Some(variation)
}

pub fn measure_line_variation(mask: &BinaryMask, config: &AnalysisConfig) -> Option<Measured> {
    let v = line_variation(mask, config)?;
    Some(
        Measured::default()
            .figure(Figure::new("Line size deviation", v.size_stddev, 1, ""))
            .figure(Figure::new("Spacing deviation", v.spacing_stddev, 1, ""))
            .figure(Figure::new("Slant deviation", v.slant_stddev, 1, ""))
            .metric(Metric::LineVariation, v.total(), 1, ""),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::{HeuristicKind, run_heuristic};

    /// Two lines of four blocks; the second line's blocks are `height` tall and
    /// `gap` px apart.
    fn page(height: u32, gap: u32) -> BinaryMask {
        let mut mask = BinaryMask::new(240, 120);
        for i in 0..4 {
            mask.fill_rect(10 + i * 20, 10, 10, 20);
            mask.fill_rect(10 + i * (10 + gap), 50, 10, height);
        }
        mask
    }

    #[test]
    fn uniform_lines_have_no_variation() {
        let v = line_variation(&page(20, 10), &AnalysisConfig::default()).unwrap();
        assert_eq!(v.lines, 2);
        assert!(v.total() < 1e-6, "variation {v:?}");
    }

    #[test]
    fn per_line_spreads_add_up() {
        let v = line_variation(&page(44, 30), &AnalysisConfig::default()).unwrap();
        assert!((v.size_stddev - 12.0).abs() < 1e-9);
        assert!((v.spacing_stddev - 10.0).abs() < 1e-9);
        assert!(v.total() > 20.0);
    }

    #[test]
    fn disguise_and_conditions_read_the_same_sum_differently() {
        let config = AnalysisConfig::default();
        // Sizes 20 and 30, spacings 10 and 10: total spread 5.
        let calm = page(30, 10);
        assert_eq!(
            run_heuristic(HeuristicKind::IntentionalChange, &calm, &config, "calm").verdict(),
            Some("no signs of disguise")
        );

        // Sizes 20 and 44, spacings 10 and 30: total spread 22.
        let erratic = page(44, 30);
        assert_eq!(
            run_heuristic(HeuristicKind::IntentionalChange, &erratic, &config, "erratic")
                .verdict(),
            Some("pronounced signs of disguised handwriting")
        );
        assert_eq!(
            run_heuristic(HeuristicKind::UnusualConditions, &erratic, &config, "erratic")
                .verdict(),
            Some("unusual writing conditions likely (high variability)")
        );
    }

    #[test]
    fn report_lists_each_spread_and_the_total() {
        let outcome = run_heuristic(
            HeuristicKind::UnusualConditions,
            &page(44, 30),
            &AnalysisConfig::default(),
            "sheet.png",
        );
        let text = outcome.to_string();
        assert!(text.contains("Line size deviation: 12.0"), "{text}");
        assert!(text.contains("Spacing deviation: 10.0"), "{text}");
        assert!(text.contains("Total feature variation: 22.0"), "{text}");
    }
}
