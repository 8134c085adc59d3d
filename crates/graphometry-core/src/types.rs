// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for handwriting measurement and comparison.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box of a component, in pixels.
///
/// `width` and `height` count pixels inclusively, so a single ink pixel has a
/// 1x1 box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Width divided by height, or `None` for a zero-height box.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.height == 0 {
            None
        } else {
            Some(self.width as f64 / self.height as f64)
        }
    }
}

/// The general features measured on one binary mask or line strip.
///
/// A zero-valued set is the "no content" sentinel: every extractor returns 0.0
/// when it finds nothing to measure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Mean bounding-box height of components (px).
    pub avg_letter_height: f64,
    /// Population standard deviation of component heights (px).
    pub height_stddev: f64,
    /// Mean horizontal gap between ink runs on text rows (px).
    pub avg_spacing: f64,
    /// Population standard deviation of those gaps (px).
    pub spacing_stddev: f64,
    /// Mean stroke slant in degrees, in (-90, 90]. Positive leans right.
    pub slant_angle: f64,
    /// Fraction of inter-run gaps narrow enough to count as joined strokes.
    pub connectivity: f64,
}

impl FeatureSet {
    /// True when nothing at all was measured.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Raw values of one metric for sample A and sample B.
pub type MetricPair = (f64, f64);

/// Per-metric raw values that went into a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonDetails {
    pub size_avg: MetricPair,
    pub spacing_avg: MetricPair,
    pub slant: MetricPair,
    pub connectivity: MetricPair,
}

/// Per-metric similarity scores, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricScores {
    pub size: f64,
    pub spacing: f64,
    pub slant: f64,
    pub connectivity: f64,
}

/// Outcome of comparing two handwriting samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Overall similarity coefficient in [0, 1].
    pub similarity: f64,
    pub details: ComparisonDetails,
    pub scores: MetricScores,
}

/// Letter size bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
}

impl SizeCategory {
    /// Position on the small..large scale, used for category distances.
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Small => 0,
            Self::Medium => 1,
            Self::Large => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

/// Spacing ("letter spread") bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpacingCategory {
    Narrow,
    Medium,
    Wide,
}

impl SpacingCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Narrow => "narrow",
            Self::Medium => "medium",
            Self::Wide => "wide",
        }
    }
}

/// Dominant slant direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlantCategory {
    Right,
    Left,
    Straight,
}

impl SlantCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::Left => "left",
            Self::Straight => "straight",
        }
    }
}

/// How practised the handwriting looks, judged by feature variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    High,
    Medium,
    Low,
}

impl SkillLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "high skill",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Qualitative reading of a similarity coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimilarityVerdict {
    High,
    Moderate,
    Low,
}

impl SimilarityVerdict {
    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "high similarity (possibly the same writer)",
            Self::Moderate => "moderate, needs further study",
            Self::Low => "low similarity, likely different authors",
        }
    }
}

impl std::fmt::Display for SimilarityVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Standard paper sizes for generated reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A5,
    Letter,
    Legal,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}
