// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// graphometry-analysis: Handwriting measurement for Graphometry.
//
// Provides preprocessing (decode, binarize, line segmentation), the general
// feature extractors (size, spacing, slant, connectivity), sample comparison,
// whole-page profiles, and the heuristic analyses built on top of them.

pub mod compare;
pub mod features;
pub mod heuristics;
pub mod preprocess;
pub mod profile;

// Re-export the primary entry points so callers can use `graphometry_analysis::Comparator` etc.
pub use compare::Comparator;
pub use features::FeatureExtractor;
pub use heuristics::digits::{DigitAnalysis, analyze_digits};
pub use heuristics::similarity::{SimilarityReport, analyze_similarity};
pub use heuristics::time_gap::{TimeGapReport, analyze_time_gap};
pub use heuristics::{
    HeuristicKind, HeuristicOutcome, analyze_heuristic, analyze_imitation,
    analyze_intentional_change, analyze_left_hand, analyze_print_like,
    analyze_unusual_conditions, run_heuristic,
};
pub use preprocess::{BinaryMask, LineStrip, RasterImage, binarize, load, segment_lines};
pub use profile::{HandwritingAnalysis, HandwritingProfile, analyze_handwriting, assess_skill};
