// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Comparative scoring of two handwriting samples.
//
// Each of the four general features is reduced to a score in [0, 1] and the
// scores are combined by a weighted mean. The weights and verdict thresholds
// are uncalibrated placeholders and live in `ComparisonConfig`.

use std::path::Path;

use graphometry_core::config::{
    AnalysisConfig, CategoryThresholds, ComparisonConfig, PreprocessConfig,
};
use graphometry_core::error::Result;
use graphometry_core::types::{
    ComparisonDetails, ComparisonResult, FeatureSet, MetricScores, SimilarityVerdict,
};
use tracing::{debug, info, instrument};

use crate::features::FeatureExtractor;
use crate::preprocess::{BinaryMask, RasterImage, binarize};

/// Scores pairs of samples under one configuration.
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    preprocess: PreprocessConfig,
    extractor: FeatureExtractor,
    categories: CategoryThresholds,
    config: ComparisonConfig,
}

impl Comparator {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            preprocess: config.preprocess.clone(),
            extractor: FeatureExtractor::new(config.features.clone()),
            categories: config.categories.clone(),
            config: config.comparison.clone(),
        }
    }

    /// Extract features from two binarized samples and score them.
    pub fn compare(&self, a: &BinaryMask, b: &BinaryMask) -> ComparisonResult {
        let features_a = self.extractor.extract(a);
        let features_b = self.extractor.extract(b);
        self.score(&features_a, &features_b)
    }

    /// Load, binarize and compare two image files.
    #[instrument(skip_all, fields(a = %a.as_ref().display(), b = %b.as_ref().display()))]
    pub fn compare_files(
        &self,
        a: impl AsRef<Path>,
        b: impl AsRef<Path>,
    ) -> Result<ComparisonResult> {
        let mask_a = binarize(&RasterImage::open(a.as_ref())?, &self.preprocess);
        let mask_b = binarize(&RasterImage::open(b.as_ref())?, &self.preprocess);
        let result = self.compare(&mask_a, &mask_b);
        info!(
            similarity = result.similarity,
            verdict = ?self.interpret(result.similarity),
            "Samples compared"
        );
        Ok(result)
    }

    /// Combine two feature sets into a similarity coefficient.
    pub fn score(&self, a: &FeatureSet, b: &FeatureSet) -> ComparisonResult {
        let size_a = self.categories.size(a.avg_letter_height).ordinal() as f64;
        let size_b = self.categories.size(b.avg_letter_height).ordinal() as f64;

        let scores = MetricScores {
            // Adjacent size categories cost half, opposite extremes cost all.
            size: closeness((size_a - size_b).abs() / 2.0),
            spacing: closeness(
                (a.avg_spacing - b.avg_spacing).abs()
                    / a.avg_spacing.max(b.avg_spacing).max(self.config.spacing_epsilon),
            ),
            slant: closeness((a.slant_angle - b.slant_angle).abs() / self.config.slant_range),
            connectivity: closeness((a.connectivity - b.connectivity).abs()),
        };

        let w = &self.config.weights;
        let similarity = (w.size * scores.size
            + w.spacing * scores.spacing
            + w.slant * scores.slant
            + w.connectivity * scores.connectivity)
            / w.total();

        debug!(?scores, similarity, "Scored feature sets");

        ComparisonResult {
            similarity,
            details: ComparisonDetails {
                size_avg: (a.avg_letter_height, b.avg_letter_height),
                spacing_avg: (a.avg_spacing, b.avg_spacing),
                slant: (a.slant_angle, b.slant_angle),
                connectivity: (a.connectivity, b.connectivity),
            },
            scores,
        }
    }

    /// Qualitative reading of a similarity coefficient.
    pub fn interpret(&self, similarity: f64) -> SimilarityVerdict {
        self.config.thresholds.verdict(similarity)
    }
}

/// `1 - min(difference, 1)` for a non-negative normalized difference.
fn closeness(difference: f64) -> f64 {
    1.0 - difference.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, Luma};

    /// One text line of `count` blocks, each `width` x `height`, `gap` px apart.
    fn line_of_blocks(count: u32, width: u32, height: u32, gap: u32) -> BinaryMask {
        let mut mask = BinaryMask::new(400, 100);
        for i in 0..count {
            mask.fill_rect(10 + i * (width + gap), 10, width, height);
        }
        mask
    }

    #[test]
    fn identical_samples_are_highly_similar() {
        let cmp = Comparator::default();
        let mask = line_of_blocks(4, 8, 20, 10);
        let result = cmp.compare(&mask, &mask);
        assert!(result.similarity >= 0.75);
        assert_eq!(result.similarity, 1.0);
        assert_eq!(cmp.interpret(result.similarity), SimilarityVerdict::High);
    }

    #[test]
    fn taller_wider_spaced_sample_scores_lower() {
        let cmp = Comparator::default();
        let a = line_of_blocks(4, 8, 20, 10);
        let b = line_of_blocks(4, 8, 40, 40);
        let result = cmp.compare(&a, &b);

        // Medium vs large size, 10 vs 40 px spacing, same slant and connectivity.
        assert_eq!(result.scores.size, 0.5);
        assert!((result.scores.spacing - 0.25).abs() < 1e-9);
        assert!(result.similarity < 0.75, "similarity {}", result.similarity);
        assert_eq!(result.details.size_avg, (20.0, 40.0));
    }

    /// Four 8 px letters on one line, alternately 20 and 16 px tall, `gap` px apart.
    fn joined_line(gap: u32) -> BinaryMask {
        let mut mask = BinaryMask::new(400, 100);
        for i in 0..4 {
            let height = if i % 2 == 0 { 20 } else { 16 };
            mask.fill_rect(10 + i * (8 + gap), 10, 8, height);
        }
        mask
    }

    #[test]
    fn line_shifted_apart_by_ten_pixels_is_not_highly_similar() {
        let cmp = Comparator::default();
        let joined = joined_line(1);
        let shifted = joined_line(11);
        let result = cmp.compare(&joined, &shifted);

        // Same letters, but the 10 px shift breaks every join and widens spacing.
        assert_eq!(result.scores.size, 1.0);
        assert!(result.details.connectivity.0 > 0.9, "{:?}", result.details);
        assert_eq!(result.details.connectivity.1, 0.0);
        assert!(result.scores.spacing < 0.2, "spacing {}", result.scores.spacing);
        assert!(result.similarity < 0.75, "similarity {}", result.similarity);
        assert_ne!(cmp.interpret(result.similarity), SimilarityVerdict::High);
    }

    #[test]
    fn scores_follow_the_documented_formulas() {
        let cmp = Comparator::default();
        let a = FeatureSet {
            avg_letter_height: 10.0,
            avg_spacing: 4.0,
            slant_angle: 30.0,
            connectivity: 0.9,
            ..FeatureSet::default()
        };
        let b = FeatureSet {
            avg_letter_height: 45.0,
            avg_spacing: 8.0,
            slant_angle: -15.0,
            connectivity: 0.4,
            ..FeatureSet::default()
        };
        let r = cmp.score(&a, &b);
        assert_eq!(r.scores.size, 0.0);
        assert_eq!(r.scores.spacing, 0.5);
        assert_eq!(r.scores.slant, 0.5);
        assert!((r.scores.connectivity - 0.5).abs() < 1e-12);
        assert!((r.similarity - 0.375).abs() < 1e-12);
        assert_eq!(cmp.interpret(r.similarity), SimilarityVerdict::Low);
    }

    #[test]
    fn two_empty_samples_do_not_divide_by_zero() {
        let cmp = Comparator::default();
        let r = cmp.score(&FeatureSet::default(), &FeatureSet::default());
        assert_eq!(r.similarity, 1.0);
    }

    #[test]
    fn opposite_slants_saturate_the_slant_score() {
        let cmp = Comparator::default();
        let a = FeatureSet {
            slant_angle: 80.0,
            ..FeatureSet::default()
        };
        let b = FeatureSet {
            slant_angle: -80.0,
            ..FeatureSet::default()
        };
        assert_eq!(cmp.score(&a, &b).scores.slant, 0.0);
    }

    #[test]
    fn weights_shift_the_mean() {
        let mut config = AnalysisConfig::default();
        config.comparison.weights.size = 3.0;
        let cmp = Comparator::new(&config);
        let a = FeatureSet {
            avg_letter_height: 10.0,
            ..FeatureSet::default()
        };
        let b = FeatureSet {
            avg_letter_height: 20.0,
            ..FeatureSet::default()
        };
        // (3 * 0.5 + 1 + 1 + 1) / 6
        assert!((cmp.score(&a, &b).similarity - 0.75).abs() < 1e-12);
    }

    #[test]
    fn interpret_is_a_step_function() {
        let cmp = Comparator::default();
        assert_eq!(cmp.interpret(0.75), SimilarityVerdict::High);
        assert_eq!(cmp.interpret(0.74999), SimilarityVerdict::Moderate);
        assert_eq!(cmp.interpret(0.5), SimilarityVerdict::Moderate);
        assert_eq!(cmp.interpret(0.49999), SimilarityVerdict::Low);
    }

    #[test]
    fn identical_scans_on_disk_compare_equal() {
        let page = GrayImage::from_fn(300, 80, |x, y| {
            let in_block = (10..30).contains(&y) && (x >= 10) && ((x - 10) % 18) < 8 && x < 100;
            if in_block { Luma([20u8]) } else { Luma([235u8]) }
        });
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("questioned.png");
        let b = dir.path().join("reference.png");
        DynamicImage::ImageLuma8(page.clone()).save(&a).unwrap();
        DynamicImage::ImageLuma8(page).save(&b).unwrap();

        let result = Comparator::default().compare_files(&a, &b).unwrap();
        assert_eq!(result.similarity, 1.0);
        assert!(result.details.size_avg.0 > 15.0);
    }

    #[test]
    fn missing_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Comparator::default()
            .compare_files(dir.path().join("nope.png"), dir.path().join("nope.png"))
            .unwrap_err();
        assert!(matches!(
            err,
            graphometry_core::GraphometryError::Decode { .. }
        ));
    }
}
