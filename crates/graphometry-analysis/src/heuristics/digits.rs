// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Digit handwriting: numbers, dates, tables.
//
// Digits are taken to be components whose proportions fall inside the
// configured aspect window; long rules and blots fall outside it.

use std::fmt;
use std::path::Path;

use graphometry_core::config::AnalysisConfig;
use graphometry_core::error::Result;
use serde::Serialize;
use tracing::{info, instrument};

use crate::features::FeatureExtractor;
use crate::features::components::find_components;
use crate::features::stats::{mean, mean_std};
use crate::preprocess::{BinaryMask, RasterImage, binarize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigitReport {
    pub source: String,
    pub count: usize,
    pub avg_height: f64,
    pub height_stddev: f64,
    /// Mean width/height ratio.
    pub avg_aspect: f64,
    pub avg_spacing: f64,
    pub slant: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum DigitAnalysis {
    NoContent { source: String },
    Report(DigitReport),
}

/// Measure digit-shaped components on a binarized sample.
pub fn analyze_digit_mask(
    mask: &BinaryMask,
    config: &AnalysisConfig,
    source: impl Into<String>,
) -> DigitAnalysis {
    let source = source.into();
    let (lo, hi) = config.heuristics.digit_aspect_range;

    let (heights, aspects): (Vec<f64>, Vec<f64>) =
        find_components(mask, config.heuristics.min_component_area)
            .iter()
            .filter_map(|c| Some((c.bbox.height as f64, c.bbox.aspect_ratio()?)))
            .filter(|&(_, aspect)| lo < aspect && aspect < hi)
            .unzip();

    if heights.is_empty() {
        info!(%source, "No digit-shaped components");
        return DigitAnalysis::NoContent { source };
    }

    let extractor = FeatureExtractor::new(config.features.clone());
    let (avg_height, height_stddev) = mean_std(&heights);
    let (avg_spacing, _) = extractor.spacing(mask);

    let report = DigitReport {
        count: heights.len(),
        avg_height,
        height_stddev,
        avg_aspect: mean(&aspects),
        avg_spacing,
        slant: extractor.slant(mask),
        source,
    };
    info!(count = report.count, avg_height, "Digits measured");
    DigitAnalysis::Report(report)
}

/// Load, binarize and analyse the digits of an image file.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn analyze_digits(path: &Path, config: &AnalysisConfig) -> Result<DigitAnalysis> {
    let mask = binarize(&RasterImage::open(path)?, &config.preprocess);
    Ok(analyze_digit_mask(&mask, config, path.display().to_string()))
}

impl fmt::Display for DigitAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoContent { source } => write!(
                f,
                "No digit components were found in {source}. \
                 Make sure the file contains handwritten digits."
            ),
            Self::Report(r) => {
                writeln!(f, "Digit handwriting analysis ({})", r.source)?;
                writeln!(f, "Number of digits: {}", r.count)?;
                writeln!(f, "Mean digit height: {:.1} px", r.avg_height)?;
                writeln!(f, "Height spread: {:.1} px", r.height_stddev)?;
                writeln!(f, "Mean width/height ratio: {:.2}", r.avg_aspect)?;
                writeln!(f, "Mean spacing between digits: {:.1} px", r.avg_spacing)?;
                write!(f, "Digit slant: {:.1}°", r.slant)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_and_specks_are_not_digits() {
        let mut mask = BinaryMask::new(200, 80);
        mask.fill_rect(10, 10, 8, 16);
        mask.fill_rect(30, 10, 8, 16);
        mask.fill_rect(50, 10, 10, 16);
        mask.fill_rect(10, 50, 120, 4); // underline, far too wide
        mask.fill_rect(150, 10, 3, 3); // speck, below the noise floor

        let DigitAnalysis::Report(report) =
            analyze_digit_mask(&mask, &AnalysisConfig::default(), "sum.png")
        else {
            panic!("expected digits");
        };
        assert_eq!(report.count, 3);
        assert_eq!(report.avg_height, 16.0);
        assert_eq!(report.height_stddev, 0.0);
        assert!((report.avg_aspect - (0.5 + 0.5 + 0.625) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn blank_sample_has_no_digits() {
        let analysis =
            analyze_digit_mask(&BinaryMask::new(50, 50), &AnalysisConfig::default(), "empty");
        assert_eq!(
            analysis,
            DigitAnalysis::NoContent {
                source: "empty".into()
            }
        );
        assert!(analysis.to_string().starts_with("No digit components"));
    }

    #[test]
    fn report_text_names_the_sample() {
        let mut mask = BinaryMask::new(100, 40);
        mask.fill_rect(10, 10, 8, 16);
        let text = analyze_digit_mask(&mask, &AnalysisConfig::default(), "date.png").to_string();
        assert!(text.starts_with("Digit handwriting analysis (date.png)"));
        assert!(text.contains("Number of digits: 1"));
        assert!(text.contains("Mean width/height ratio: 0.50"));
    }
}
