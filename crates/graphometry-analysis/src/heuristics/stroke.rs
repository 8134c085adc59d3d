// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Whole-page stroke measurements for the imitation, print-like and left-hand
// heuristics.

use graphometry_core::config::{AnalysisConfig, HeuristicConfig};
use graphometry_core::policy::Metric;
use tracing::debug;

use super::Measured;
use crate::features::FeatureExtractor;
use crate::features::components::find_components;
use crate::features::stats::mean;
use crate::preprocess::BinaryMask;

/// Mean compactness of components. Tremulous or retraced strokes have long
/// boundaries for their area and push it up.
///
/// `None` when no component clears the heuristic noise floor.
pub fn measure_imitation(mask: &BinaryMask, config: &HeuristicConfig) -> Option<Measured> {
    let compactness: Vec<f64> = find_components(mask, config.min_component_area)
        .iter()
        .filter_map(|c| c.compactness())
        .collect();
    if compactness.is_empty() {
        return None;
    }
    let mean_compactness = mean(&compactness);
    debug!(components = compactness.len(), mean_compactness, "Compactness measured");
    Some(Measured::default().metric(Metric::MeanCompactness, mean_compactness, 1, ""))
}

/// Connectivity, with the mean letter aspect ratio reported alongside.
///
/// `None` for a mask without ink.
pub fn measure_print_like(mask: &BinaryMask, config: &AnalysisConfig) -> Option<Measured> {
    if mask.ink_pixel_count() == 0 {
        return None;
    }
    let connectivity = FeatureExtractor::new(config.features.clone()).connectivity(mask);
    let aspects: Vec<f64> = find_components(mask, config.heuristics.min_component_area)
        .iter()
        .filter_map(|c| c.bbox.aspect_ratio())
        .collect();

    Some(
        Measured::default()
            .metric(Metric::Connectivity, connectivity, 2, "")
            .metric(Metric::MeanAspectRatio, mean(&aspects), 2, ""),
    )
}

/// Slant and connectivity. Left-handed writers tend to lean left and join less.
///
/// `None` for a mask without ink.
pub fn measure_left_hand(mask: &BinaryMask, config: &AnalysisConfig) -> Option<Measured> {
    if mask.ink_pixel_count() == 0 {
        return None;
    }
    let extractor = FeatureExtractor::new(config.features.clone());
    let slant = extractor.slant(mask);
    let connectivity = extractor.connectivity(mask);
    debug!(slant, connectivity, "Left-hand signals measured");

    Some(
        Measured::default()
            .metric(Metric::Slant, slant, 1, "°")
            .metric(Metric::Connectivity, connectivity, 2, ""),
    )
}
