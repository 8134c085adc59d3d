// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// General handwriting features: letter size, spacing, slant, connectivity.
//
// Each extractor works on any binary mask (a whole page or a single line strip)
// and is independent of the others. Degenerate inputs yield 0.0, never an error.

pub mod components;
pub mod runs;
pub mod slant;
pub mod stats;

use graphometry_core::config::FeatureConfig;
use graphometry_core::types::FeatureSet;
use tracing::{debug, instrument};

use crate::preprocess::BinaryMask;
use components::{Component, find_components};
use runs::run_gaps;
use slant::ellipse_slant;
use stats::{mean, mean_std};

/// Measures general features under one configuration.
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    config: FeatureConfig,
}

impl FeatureExtractor {
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    /// Components above the noise floor.
    pub fn components(&self, mask: &BinaryMask) -> Vec<Component> {
        find_components(mask, self.config.min_component_area)
    }

    /// Mean and standard deviation of component heights.
    pub fn letter_sizes(&self, mask: &BinaryMask) -> (f64, f64) {
        letter_sizes_of(&self.components(mask))
    }

    /// Mean and standard deviation of inter-letter gaps on text rows.
    pub fn spacing(&self, mask: &BinaryMask) -> (f64, f64) {
        self.spacing_of(&self.gaps(mask))
    }

    /// Mean slant in degrees over every component that admits an ellipse.
    pub fn slant(&self, mask: &BinaryMask) -> f64 {
        mean(&self.slant_angles(mask))
    }

    /// Per-component slant angles, in component order.
    pub fn slant_angles(&self, mask: &BinaryMask) -> Vec<f64> {
        self.slant_angles_of(&self.components(mask))
    }

    /// Share of inter-run gaps narrow enough to be joined strokes.
    pub fn connectivity(&self, mask: &BinaryMask) -> f64 {
        let (_, height_std) = self.letter_sizes(mask);
        self.connectivity_of(&self.gaps(mask), height_std)
    }

    /// All four features at once, tracing components and runs only once.
    #[instrument(skip_all, fields(width = mask.width(), height = mask.height()))]
    pub fn extract(&self, mask: &BinaryMask) -> FeatureSet {
        let components = self.components(mask);
        let gaps = self.gaps(mask);

        let (avg_letter_height, height_stddev) = letter_sizes_of(&components);
        let (avg_spacing, spacing_stddev) = self.spacing_of(&gaps);
        let slant_angle = mean(&self.slant_angles_of(&components));
        let connectivity = self.connectivity_of(&gaps, height_stddev);

        let features = FeatureSet {
            avg_letter_height,
            height_stddev,
            avg_spacing,
            spacing_stddev,
            slant_angle,
            connectivity,
        };
        debug!(
            components = components.len(),
            gaps = gaps.len(),
            ?features,
            "Features extracted"
        );
        features
    }

    // -- Shared internals -----------------------------------------------------

    fn gaps(&self, mask: &BinaryMask) -> Vec<u32> {
        run_gaps(mask, self.config.row_fraction)
    }

    /// Every gap counts, including the narrow ones connectivity treats as
    /// joins. Runs are maximal, so each gap is at least one blank pixel.
    fn spacing_of(&self, gaps: &[u32]) -> (f64, f64) {
        let spaces: Vec<f64> = gaps.iter().map(|&g| g as f64).collect();
        mean_std(&spaces)
    }

    fn slant_angles_of(&self, components: &[Component]) -> Vec<f64> {
        components
            .iter()
            .filter(|c| c.contour.len() >= self.config.min_ellipse_points)
            .filter_map(|c| ellipse_slant(&c.contour))
            .collect()
    }

    fn connectivity_of(&self, gaps: &[u32], height_std: f64) -> f64 {
        // A single component (or identical ones) gives no basis for joins.
        if gaps.is_empty() || height_std == 0.0 {
            return 0.0;
        }
        let connected = gaps
            .iter()
            .filter(|&&g| g <= self.config.connected_gap_max)
            .count();
        connected as f64 / gaps.len() as f64
    }
}

fn letter_sizes_of(components: &[Component]) -> (f64, f64) {
    let heights: Vec<f64> = components.iter().map(|c| c.bbox.height as f64).collect();
    mean_std(&heights)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two 10x20 "letters" on rows 15..35 with a 10 px clear gap between them.
    fn two_letters() -> BinaryMask {
        let mut mask = BinaryMask::new(100, 50);
        mask.fill_rect(10, 15, 10, 20);
        mask.fill_rect(30, 15, 10, 20);
        mask
    }

    fn extractor() -> FeatureExtractor {
        FeatureExtractor::default()
    }

    #[test]
    fn equal_letters_have_shared_height_and_no_spread() {
        let (avg, std) = extractor().letter_sizes(&two_letters());
        assert!((avg - 20.0).abs() < 0.1, "avg {avg}");
        assert!(std < 0.1, "std {std}");
    }

    #[test]
    fn spacing_measures_the_clear_gap() {
        let (avg, std) = extractor().spacing(&two_letters());
        assert!((avg - 10.0).abs() < 1.0, "avg {avg}");
        assert!(std < 1e-3, "std {std}");
    }

    #[test]
    fn separate_letters_are_not_connected() {
        assert_eq!(extractor().connectivity(&two_letters()), 0.0);
    }

    #[test]
    fn single_pixel_gaps_count_as_joins() {
        let mut mask = BinaryMask::new(80, 40);
        mask.fill_rect(5, 10, 10, 20); // tall letter
        mask.fill_rect(16, 20, 10, 10); // short letter, one blank column away
        mask.fill_rect(40, 20, 10, 10); // short letter, 14 blank columns away

        let ex = extractor();
        let conn = ex.connectivity(&mask);
        // Rows 20..30 carry one join and one space each; rows 10..20 carry none.
        assert!((conn - 0.5).abs() < 1e-9, "connectivity {conn}");

        // The one-column join still counts as spacing: gaps of 1 and 14.
        let (avg_gap, std_gap) = ex.spacing(&mask);
        assert_eq!(avg_gap, 7.5);
        assert_eq!(std_gap, 6.5);
    }

    #[test]
    fn one_blank_column_is_a_spacing_of_one() {
        let mut mask = BinaryMask::new(50, 30);
        mask.fill_rect(10, 10, 10, 10); // columns 10..=19
        mask.fill_rect(21, 10, 10, 10); // columns 21..=30
        assert_eq!(extractor().spacing(&mask), (1.0, 0.0));
    }

    #[test]
    fn empty_mask_yields_zero_feature_set() {
        let features = extractor().extract(&BinaryMask::new(64, 32));
        assert!(features.is_empty());
    }

    #[test]
    fn extract_agrees_with_individual_extractors() {
        let mut mask = two_letters();
        mask.fill_rect(60, 20, 8, 10);
        let ex = extractor();
        let all = ex.extract(&mask);
        assert_eq!(
            (all.avg_letter_height, all.height_stddev),
            ex.letter_sizes(&mask)
        );
        assert_eq!((all.avg_spacing, all.spacing_stddev), ex.spacing(&mask));
        assert_eq!(all.slant_angle, ex.slant(&mask));
        assert_eq!(all.connectivity, ex.connectivity(&mask));
    }

    #[test]
    fn upright_letters_have_no_slant() {
        assert!(extractor().slant(&two_letters()).abs() < 1e-6);
        assert_eq!(extractor().slant(&BinaryMask::new(10, 10)), 0.0);
    }
}
