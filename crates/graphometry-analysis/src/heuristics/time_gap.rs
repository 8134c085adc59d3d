// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Handwriting of one writer across time: per-sample features and the drift
// between the first and the last sample.

use std::fmt;
use std::path::Path;

use graphometry_core::config::AnalysisConfig;
use graphometry_core::error::{GraphometryError, Result};
use graphometry_core::types::FeatureSet;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::features::FeatureExtractor;
use crate::preprocess::{RasterImage, binarize};

/// Features of one dated sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeGapSample {
    /// File name without directories.
    pub name: String,
    pub features: FeatureSet,
}

/// Last sample minus first sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureDrift {
    pub size: f64,
    pub spacing: f64,
    pub slant: f64,
    pub connectivity: f64,
}

impl FeatureDrift {
    pub fn between(first: &FeatureSet, last: &FeatureSet) -> Self {
        Self {
            size: last.avg_letter_height - first.avg_letter_height,
            spacing: last.avg_spacing - first.avg_spacing,
            slant: last.slant_angle - first.slant_angle,
            connectivity: last.connectivity - first.connectivity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeGapReport {
    /// Samples in the order given.
    pub samples: Vec<TimeGapSample>,
    /// Present when there are at least two samples.
    pub drift: Option<FeatureDrift>,
}

impl TimeGapReport {
    pub fn from_samples(samples: Vec<TimeGapSample>) -> Self {
        let drift = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) if samples.len() >= 2 => {
                Some(FeatureDrift::between(&first.features, &last.features))
            }
            _ => None,
        };
        Self { samples, drift }
    }
}

/// Measure each sample in order.
///
/// The whole batch is abandoned at the first path that does not exist, and
/// the error names that path.
#[instrument(skip_all, fields(samples = paths.len()))]
pub fn analyze_time_gap<P: AsRef<Path>>(
    paths: &[P],
    config: &AnalysisConfig,
) -> Result<TimeGapReport> {
    if paths.is_empty() {
        return Err(GraphometryError::EmptyBatch);
    }

    let extractor = FeatureExtractor::new(config.features.clone());
    let mut samples = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        if !path.exists() {
            warn!(path = %path.display(), "Sample missing, batch aborted");
            return Err(GraphometryError::MissingSample(path.to_path_buf()));
        }
        let mask = binarize(&RasterImage::open(path)?, &config.preprocess);
        samples.push(TimeGapSample {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            features: extractor.extract(&mask),
        });
    }

    let report = TimeGapReport::from_samples(samples);
    info!(samples = report.samples.len(), "Time gap analysed");
    Ok(report)
}

impl fmt::Display for TimeGapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handwriting across a time gap:")?;
        for (idx, sample) in self.samples.iter().enumerate() {
            let feat = &sample.features;
            write!(
                f,
                "\nSample {} ({}): mean size {:.1} px, spacing {:.1} px, slant {:.1}°, connectivity {:.2}",
                idx + 1,
                sample.name,
                feat.avg_letter_height,
                feat.avg_spacing,
                feat.slant_angle,
                feat.connectivity
            )?;
        }
        if let Some(d) = &self.drift {
            write!(
                f,
                "\n\nChange (last sample minus first):\n\
                 Δ size = {:.1} px, Δ spacing = {:.1} px, Δ slant = {:.1}°, Δ connectivity = {:.2}",
                d.size, d.spacing, d.slant, d.connectivity
            )?;
        }
        Ok(())
    }
}
