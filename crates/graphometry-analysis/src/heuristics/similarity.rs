// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Similar-handwriting report: the comparator's result in examiner wording.

use std::fmt;
use std::path::Path;

use graphometry_core::config::AnalysisConfig;
use graphometry_core::error::Result;
use graphometry_core::types::{ComparisonResult, SimilarityVerdict};
use serde::Serialize;

use crate::compare::Comparator;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityReport {
    /// The questioned document.
    pub questioned: String,
    /// The reference sample.
    pub reference: String,
    pub result: ComparisonResult,
    pub verdict: SimilarityVerdict,
}

/// Compare a questioned document with a reference sample.
pub fn analyze_similarity(
    questioned: &Path,
    reference: &Path,
    config: &AnalysisConfig,
) -> Result<SimilarityReport> {
    let comparator = Comparator::new(config);
    let result = comparator.compare_files(questioned, reference)?;
    Ok(SimilarityReport {
        questioned: questioned.display().to_string(),
        reference: reference.display().to_string(),
        verdict: comparator.interpret(result.similarity),
        result,
    })
}

impl fmt::Display for SimilarityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.result.details;
        writeln!(f, "Similar handwriting comparison:")?;
        writeln!(f, "Questioned: {}", self.questioned)?;
        writeln!(f, "Reference: {}", self.reference)?;
        writeln!(f, "Similarity coefficient: {:.2}", self.result.similarity)?;
        writeln!(f, "Verdict: {}", self.verdict)?;
        writeln!(f, "Details:")?;
        writeln!(f, "  Mean letter size: {:.1} vs {:.1}", d.size_avg.0, d.size_avg.1)?;
        writeln!(f, "  Spacing: {:.1} vs {:.1}", d.spacing_avg.0, d.spacing_avg.1)?;
        writeln!(f, "  Slant: {:.1}° vs {:.1}°", d.slant.0, d.slant.1)?;
        write!(
            f,
            "  Connectivity: {:.2} vs {:.2}",
            d.connectivity.0, d.connectivity.1
        )
    }
}
