// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Analysis configuration. Every threshold here is an empirical placeholder
// awaiting calibration, so all of them can be overridden from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GraphometryError, Result};
use crate::policy::HeuristicPolicy;
use crate::types::{SimilarityVerdict, SizeCategory, SkillLevel, SlantCategory, SpacingCategory};

/// All tunable constants of the measurement and comparison pipeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub preprocess: PreprocessConfig,
    pub features: FeatureConfig,
    pub categories: CategoryThresholds,
    pub comparison: ComparisonConfig,
    pub heuristics: HeuristicConfig,
}

/// Binarization and line segmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Side of the square Gaussian kernel; must be odd.
    pub blur_kernel_size: u32,
    /// A row belongs to a text line when its ink count exceeds this fraction
    /// of the busiest row.
    pub line_fraction: f64,
    /// Strips this many rows tall or fewer are dropped.
    pub min_line_height: u32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            blur_kernel_size: 5,
            line_fraction: 0.1,
            min_line_height: 2,
        }
    }
}

/// General feature extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Components with a contour area below this (px²) are noise.
    pub min_component_area: f64,
    /// Boundary points needed before an ellipse is fitted.
    pub min_ellipse_points: usize,
    /// Row qualification fraction for spacing and connectivity scans.
    pub row_fraction: f64,
    /// Gaps of at most this many blank pixels count as joined strokes.
    pub connected_gap_max: u32,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            min_component_area: 10.0,
            min_ellipse_points: 5,
            row_fraction: 0.1,
            connected_gap_max: 1,
        }
    }
}

/// Boundaries of the qualitative labels used in textual reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryThresholds {
    /// Heights below `size_small` are small, below `size_medium` medium.
    pub size_small: f64,
    pub size_medium: f64,
    /// Mean gaps below `spacing_narrow` are narrow, below `spacing_medium` medium.
    pub spacing_narrow: f64,
    pub spacing_medium: f64,
    /// Slant beyond ±this many degrees is right/left, otherwise straight.
    pub slant_straight_band: f64,
    /// Variation below `skill_high` is high skill, below `skill_medium` medium.
    pub skill_high: f64,
    pub skill_medium: f64,
}

impl Default for CategoryThresholds {
    fn default() -> Self {
        Self {
            size_small: 15.0,
            size_medium: 30.0,
            spacing_narrow: 3.0,
            spacing_medium: 7.0,
            slant_straight_band: 5.0,
            skill_high: 5.0,
            skill_medium: 15.0,
        }
    }
}

impl CategoryThresholds {
    pub fn size(&self, avg_height: f64) -> SizeCategory {
        if avg_height < self.size_small {
            SizeCategory::Small
        } else if avg_height < self.size_medium {
            SizeCategory::Medium
        } else {
            SizeCategory::Large
        }
    }

    pub fn spacing(&self, avg_gap: f64) -> SpacingCategory {
        if avg_gap < self.spacing_narrow {
            SpacingCategory::Narrow
        } else if avg_gap < self.spacing_medium {
            SpacingCategory::Medium
        } else {
            SpacingCategory::Wide
        }
    }

    pub fn slant(&self, angle: f64) -> SlantCategory {
        if angle > self.slant_straight_band {
            SlantCategory::Right
        } else if angle < -self.slant_straight_band {
            SlantCategory::Left
        } else {
            SlantCategory::Straight
        }
    }

    pub fn skill(&self, variation: f64) -> SkillLevel {
        if variation < self.skill_high {
            SkillLevel::High
        } else if variation < self.skill_medium {
            SkillLevel::Medium
        } else {
            SkillLevel::Low
        }
    }
}

/// Similarity scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    pub weights: ScoreWeights,
    pub thresholds: SimilarityThresholds,
    /// Floor of the spacing denominator, keeps two empty samples comparable.
    pub spacing_epsilon: f64,
    /// Slant difference that costs the full slant score.
    pub slant_range: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            thresholds: SimilarityThresholds::default(),
            spacing_epsilon: 1e-3,
            slant_range: 90.0,
        }
    }
}

/// Relative weight of each metric score. Equal weights give the plain mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub size: f64,
    pub spacing: f64,
    pub slant: f64,
    pub connectivity: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            size: 1.0,
            spacing: 1.0,
            slant: 1.0,
            connectivity: 1.0,
        }
    }
}

impl ScoreWeights {
    pub fn total(&self) -> f64 {
        self.size + self.spacing + self.slant + self.connectivity
    }
}

/// Verdict boundaries on the similarity coefficient (inclusive lower bounds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityThresholds {
    pub high: f64,
    pub moderate: f64,
}

impl Default for SimilarityThresholds {
    fn default() -> Self {
        Self {
            high: 0.75,
            moderate: 0.5,
        }
    }
}

impl SimilarityThresholds {
    pub fn verdict(&self, similarity: f64) -> SimilarityVerdict {
        if similarity >= self.high {
            SimilarityVerdict::High
        } else if similarity >= self.moderate {
            SimilarityVerdict::Moderate
        } else {
            SimilarityVerdict::Low
        }
    }
}

/// Heuristic ("verdict") analyses built on top of the general features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    /// Noise floor (px²) for heuristics that inspect components directly.
    pub min_component_area: f64,
    /// Open interval of width/height ratios accepted as digits.
    pub digit_aspect_range: (f64, f64),
    pub imitation: HeuristicPolicy,
    pub print_like: HeuristicPolicy,
    pub left_hand: HeuristicPolicy,
    pub intentional_change: HeuristicPolicy,
    pub unusual_conditions: HeuristicPolicy,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            min_component_area: 20.0,
            digit_aspect_range: (0.2, 1.5),
            imitation: HeuristicPolicy::imitation(),
            print_like: HeuristicPolicy::print_like(),
            left_hand: HeuristicPolicy::left_hand(),
            intentional_change: HeuristicPolicy::intentional_change(),
            unusual_conditions: HeuristicPolicy::unusual_conditions(),
        }
    }
}

impl AnalysisConfig {
    /// Read a JSON configuration file. Absent fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Reject values that would make the pipeline meaningless.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(GraphometryError::InvalidConfig(msg.to_string()));

        let pre = &self.preprocess;
        if pre.blur_kernel_size == 0 || pre.blur_kernel_size % 2 == 0 {
            return invalid("blur_kernel_size must be a positive odd number");
        }
        if !(0.0..1.0).contains(&pre.line_fraction) {
            return invalid("line_fraction must lie in [0, 1)");
        }

        let feat = &self.features;
        if feat.min_component_area < 0.0 {
            return invalid("min_component_area must not be negative");
        }
        if feat.min_ellipse_points < 5 {
            return invalid("min_ellipse_points must be at least 5");
        }
        if !(0.0..1.0).contains(&feat.row_fraction) {
            return invalid("row_fraction must lie in [0, 1)");
        }

        let cat = &self.categories;
        if cat.size_small > cat.size_medium
            || cat.spacing_narrow > cat.spacing_medium
            || cat.skill_high > cat.skill_medium
        {
            return invalid("category thresholds must be in ascending order");
        }
        if cat.slant_straight_band < 0.0 {
            return invalid("slant_straight_band must not be negative");
        }

        let cmp = &self.comparison;
        let w = &cmp.weights;
        if [w.size, w.spacing, w.slant, w.connectivity]
            .iter()
            .any(|weight| *weight < 0.0)
            || w.total() <= 0.0
        {
            return invalid("score weights must be non-negative with a positive sum");
        }
        if cmp.thresholds.moderate > cmp.thresholds.high {
            return invalid("moderate similarity threshold must not exceed the high one");
        }
        if cmp.spacing_epsilon <= 0.0 || cmp.slant_range <= 0.0 {
            return invalid("spacing_epsilon and slant_range must be positive");
        }

        let (lo, hi) = self.heuristics.digit_aspect_range;
        if lo >= hi {
            return invalid("digit_aspect_range must be an increasing pair");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        AnalysisConfig::default().validate().expect("defaults must validate");
    }

    #[test]
    fn verdict_is_a_step_function() {
        let t = SimilarityThresholds::default();
        assert_eq!(t.verdict(0.75), SimilarityVerdict::High);
        assert_eq!(t.verdict(0.74999), SimilarityVerdict::Moderate);
        assert_eq!(t.verdict(0.5), SimilarityVerdict::Moderate);
        assert_eq!(t.verdict(0.49999), SimilarityVerdict::Low);
    }

    #[test]
    fn category_boundaries() {
        let c = CategoryThresholds::default();
        assert_eq!(c.size(14.9), SizeCategory::Small);
        assert_eq!(c.size(15.0), SizeCategory::Medium);
        assert_eq!(c.size(30.0), SizeCategory::Large);
        assert_eq!(c.spacing(2.0), SpacingCategory::Narrow);
        assert_eq!(c.spacing(7.0), SpacingCategory::Wide);
        assert_eq!(c.slant(5.0), SlantCategory::Straight);
        assert_eq!(c.slant(5.1), SlantCategory::Right);
        assert_eq!(c.slant(-6.0), SlantCategory::Left);
        assert_eq!(c.skill(4.9), SkillLevel::High);
        assert_eq!(c.skill(14.9), SkillLevel::Medium);
        assert_eq!(c.skill(15.0), SkillLevel::Low);
    }

    #[test]
    fn even_kernel_is_rejected() {
        let mut config = AnalysisConfig::default();
        config.preprocess.blur_kernel_size = 4;
        assert!(matches!(
            config.validate(),
            Err(GraphometryError::InvalidConfig(_))
        ));
    }

    #[test]
    fn inverted_similarity_thresholds_are_rejected() {
        let mut config = AnalysisConfig::default();
        config.comparison.thresholds = SimilarityThresholds {
            high: 0.4,
            moderate: 0.6,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn save_then_load_preserves_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graphometry.json");

        let mut config = AnalysisConfig::default();
        config.comparison.thresholds.high = 0.8;
        config.features.min_component_area = 15.0;
        config.save(&path).unwrap();

        let loaded = AnalysisConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{ "preprocess": { "line_fraction": 0.2 } }"#).unwrap();

        let loaded = AnalysisConfig::load(&path).unwrap();
        assert_eq!(loaded.preprocess.line_fraction, 0.2);
        assert_eq!(loaded.preprocess.blur_kernel_size, 5);
        assert_eq!(loaded.comparison, ComparisonConfig::default());
    }
}
