// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The structured record a conclusion document is rendered from.

use std::path::{Path, PathBuf};

use graphometry_core::error::Result;
use serde::{Deserialize, Serialize};

/// Content of an expert conclusion. Every part is optional; absent or empty
/// parts are left out of the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportData {
    /// Purpose of the study, samples received, comparison sources.
    pub intro: Option<String>,
    /// Methods applied and the course of the study.
    pub methodology: Option<String>,
    pub comparative_analysis: Option<String>,
    pub diagnostic: Option<String>,
    /// Final expert statement, set in bold.
    pub conclusion: Option<String>,
    /// Illustrations, in order.
    pub images: Vec<PathBuf>,
    /// Row-major tables; the first row of each is its header.
    pub tables: Vec<Vec<Vec<String>>>,
}

impl ReportData {
    /// Read a record from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Numbered text sections that have content, in document order.
    pub fn text_sections(&self) -> Vec<(&'static str, &str)> {
        [
            ("1. Introductory information", &self.intro),
            ("2. Methodology and course of the study", &self.methodology),
            ("3. Results of the comparative study", &self.comparative_analysis),
            ("4. Diagnostic conclusions", &self.diagnostic),
        ]
        .into_iter()
        .filter_map(|(heading, body)| non_empty(body).map(|text| (heading, text)))
        .collect()
    }

    pub fn conclusion_text(&self) -> Option<&str> {
        non_empty(&self.conclusion)
    }
}

fn non_empty(section: &Option<String>) -> Option<&str> {
    section.as_deref().filter(|text| !text.trim().is_empty())
}
