// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Whole-image handwriting analysis: general features plus qualitative labels.

use std::fmt;
use std::path::Path;

use graphometry_core::config::{AnalysisConfig, CategoryThresholds};
use graphometry_core::error::Result;
use graphometry_core::types::{
    FeatureSet, SizeCategory, SkillLevel, SlantCategory, SpacingCategory,
};
use serde::Serialize;
use tracing::{info, instrument};

use crate::features::FeatureExtractor;
use crate::features::stats::std_dev;
use crate::preprocess::{BinaryMask, RasterImage, binarize, segment_lines};

/// Outcome of analysing one image. A page without text is a valid result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum HandwritingAnalysis {
    NoText { source: String },
    Profile(HandwritingProfile),
}

/// General features of a page and their qualitative reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandwritingProfile {
    pub source: String,
    pub line_count: usize,
    pub features: FeatureSet,
    pub size: SizeCategory,
    pub spacing: SpacingCategory,
    pub slant: SlantCategory,
    pub skill: SkillLevel,
    /// Mean slant of each text line, top to bottom.
    pub line_slants: Vec<f64>,
}

/// Skill from how much the writing varies: size spread + spacing spread +
/// spread of the given slant samples.
pub fn assess_skill(
    size_stddev: f64,
    spacing_stddev: f64,
    slant_values: &[f64],
    thresholds: &CategoryThresholds,
) -> SkillLevel {
    thresholds.skill(size_stddev + spacing_stddev + std_dev(slant_values))
}

/// Analyse an already binarized page.
pub fn analyze_mask(
    mask: &BinaryMask,
    config: &AnalysisConfig,
    source: impl Into<String>,
) -> HandwritingAnalysis {
    let source = source.into();
    let lines = segment_lines(mask, &config.preprocess);
    if lines.is_empty() {
        info!(%source, "No text detected");
        return HandwritingAnalysis::NoText { source };
    }

    let extractor = FeatureExtractor::new(config.features.clone());
    let features = extractor.extract(mask);
    let line_slants: Vec<f64> = lines.iter().map(|l| extractor.slant(&l.mask)).collect();

    let cats = &config.categories;
    let profile = HandwritingProfile {
        line_count: lines.len(),
        size: cats.size(features.avg_letter_height),
        spacing: cats.spacing(features.avg_spacing),
        slant: cats.slant(features.slant_angle),
        skill: assess_skill(
            features.height_stddev,
            features.spacing_stddev,
            &line_slants,
            cats,
        ),
        features,
        line_slants,
        source,
    };
    info!(
        lines = profile.line_count,
        skill = profile.skill.label(),
        "Handwriting profiled"
    );
    HandwritingAnalysis::Profile(profile)
}

/// Load, binarize and analyse one image file.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn analyze_handwriting(path: &Path, config: &AnalysisConfig) -> Result<HandwritingAnalysis> {
    let raster = RasterImage::open(path)?;
    let mask = binarize(&raster, &config.preprocess);
    Ok(analyze_mask(&mask, config, path.display().to_string()))
}

impl fmt::Display for HandwritingAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoText { source } => write!(
                f,
                "Processed image: {source}. No text was detected in the image. \
                 Make sure the file contains handwriting."
            ),
            Self::Profile(profile) => fmt::Display::fmt(profile, f),
        }
    }
}

impl fmt::Display for HandwritingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let feat = &self.features;
        writeln!(f, "Image: {}", self.source)?;
        writeln!(f, "Number of lines: {}", self.line_count)?;
        writeln!(
            f,
            "Mean letter size: {:.1} px ({})",
            feat.avg_letter_height,
            self.size.label()
        )?;
        writeln!(f, "Letter size deviation: {:.1} px", feat.height_stddev)?;
        writeln!(
            f,
            "Spacing between letters: {:.1} px ({})",
            feat.avg_spacing,
            self.spacing.label()
        )?;
        writeln!(f, "Spacing deviation: {:.1}", feat.spacing_stddev)?;
        writeln!(
            f,
            "Stroke slant: {:.1}° ({})",
            feat.slant_angle,
            self.slant.label()
        )?;
        writeln!(f, "Connectivity ratio: {:.2}", feat.connectivity)?;
        write!(f, "Writing skill: {}", self.skill.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, Luma};

    fn two_line_page() -> BinaryMask {
        let mut mask = BinaryMask::new(200, 120);
        for i in 0..4 {
            mask.fill_rect(10 + i * 20, 10, 10, 20);
            mask.fill_rect(10 + i * 20, 60, 10, 20);
        }
        mask
    }

    #[test]
    fn all_black_image_reports_no_text() {
        let raster = RasterImage::from_dynamic(DynamicImage::ImageLuma8(GrayImage::from_pixel(
            120,
            80,
            Luma([0u8]),
        )));
        let config = AnalysisConfig::default();
        let mask = binarize(&raster, &config.preprocess);
        let analysis = analyze_mask(&mask, &config, "black.png");
        assert_eq!(
            analysis,
            HandwritingAnalysis::NoText {
                source: "black.png".into()
            }
        );
        assert!(analysis.to_string().contains("No text was detected"));
    }

    #[test]
    fn two_lines_are_profiled() {
        let analysis = analyze_mask(&two_line_page(), &AnalysisConfig::default(), "page");
        let HandwritingAnalysis::Profile(profile) = analysis else {
            panic!("expected a profile");
        };
        assert_eq!(profile.line_count, 2);
        assert_eq!(profile.line_slants.len(), 2);
        assert_eq!(profile.size, SizeCategory::Medium);
        assert_eq!(profile.spacing, SpacingCategory::Wide);
        assert_eq!(profile.slant, SlantCategory::Straight);
        assert_eq!(profile.skill, SkillLevel::High);
    }

    #[test]
    fn report_lists_every_feature() {
        let analysis = analyze_mask(&two_line_page(), &AnalysisConfig::default(), "page.png");
        let text = analysis.to_string();
        for needle in [
            "Image: page.png",
            "Number of lines: 2",
            "Mean letter size: 20.0 px (medium)",
            "Spacing between letters: 10.0 px (wide)",
            "Connectivity ratio: 0.00",
            "Writing skill: high skill",
        ] {
            assert!(text.contains(needle), "missing {needle:?} in\n{text}");
        }
    }

    #[test]
    fn skill_sums_three_spreads() {
        let t = CategoryThresholds::default();
        assert_eq!(assess_skill(1.0, 1.0, &[], &t), SkillLevel::High);
        assert_eq!(assess_skill(4.0, 4.0, &[0.0, 0.0], &t), SkillLevel::Medium);
        // Slant spread of 10 alone pushes past the medium band.
        assert_eq!(assess_skill(3.0, 3.0, &[-10.0, 10.0], &t), SkillLevel::Low);
    }

    #[test]
    fn missing_file_is_an_error_not_no_text() {
        let dir = tempfile::tempdir().unwrap();
        let result = analyze_handwriting(&dir.path().join("absent.png"), &AnalysisConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn serializes_with_result_tag() {
        let json = serde_json::to_string(&HandwritingAnalysis::NoText {
            source: "x".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"result":"no_text","source":"x"}"#);
    }
}
