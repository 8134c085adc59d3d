// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Heuristic ("verdict") analyses built on the general features.
//
// Every policy-driven heuristic has the same shape: measure a few scalars on
// the mask, hand them to its `HeuristicPolicy`, and report the figures with
// the verdict. Only the measuring step differs between kinds. Digits, time gap
// and the similarity wrapper produce their own report types.

pub mod digits;
pub mod similarity;
pub mod stroke;
pub mod time_gap;
pub mod variation;

use std::fmt;
use std::path::Path;

use graphometry_core::config::{AnalysisConfig, HeuristicConfig};
use graphometry_core::error::Result;
use graphometry_core::policy::{HeuristicPolicy, Measurements, Metric};
use serde::Serialize;
use tracing::{info, instrument};

use crate::preprocess::{BinaryMask, RasterImage, binarize};

/// The policy-driven heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicKind {
    Imitation,
    PrintLike,
    LeftHand,
    IntentionalChange,
    UnusualConditions,
}

impl HeuristicKind {
    pub const ALL: [Self; 5] = [
        Self::Imitation,
        Self::PrintLike,
        Self::LeftHand,
        Self::IntentionalChange,
        Self::UnusualConditions,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Imitation => "Imitation analysis",
            Self::PrintLike => "Print-like handwriting analysis",
            Self::LeftHand => "Left-hand writing analysis",
            Self::IntentionalChange => "Disguised handwriting analysis",
            Self::UnusualConditions => "Writing conditions analysis",
        }
    }

    /// The threshold table this heuristic classifies with.
    pub fn policy<'a>(&self, config: &'a HeuristicConfig) -> &'a HeuristicPolicy {
        match self {
            Self::Imitation => &config.imitation,
            Self::PrintLike => &config.print_like,
            Self::LeftHand => &config.left_hand,
            Self::IntentionalChange => &config.intentional_change,
            Self::UnusualConditions => &config.unusual_conditions,
        }
    }

    fn nothing_found(&self, source: &str) -> String {
        match self {
            Self::Imitation => {
                format!("No elements suitable for imitation analysis were found in {source}.")
            }
            Self::PrintLike | Self::LeftHand => {
                format!("No handwriting was found in {source} for {}.", self.subject())
            }
            Self::IntentionalChange | Self::UnusualConditions => {
                format!("No text lines were detected in {source} for {}.", self.subject())
            }
        }
    }

    fn subject(&self) -> &'static str {
        match self {
            Self::Imitation => "imitation analysis",
            Self::PrintLike => "print-like analysis",
            Self::LeftHand => "left-hand analysis",
            Self::IntentionalChange => "disguise analysis",
            Self::UnusualConditions => "writing conditions analysis",
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One reported number with its display precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub label: String,
    pub value: f64,
    #[serde(skip)]
    pub precision: usize,
    pub unit: &'static str,
}

impl Figure {
    pub fn new(label: impl Into<String>, value: f64, precision: usize, unit: &'static str) -> Self {
        Self {
            label: label.into(),
            value,
            precision,
            unit,
        }
    }

    /// A figure labelled after the metric it reports.
    pub fn of(metric: Metric, value: f64, precision: usize, unit: &'static str) -> Self {
        Self::new(capitalize(metric.label()), value, precision, unit)
    }
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.*}{}",
            self.label, self.precision, self.value, self.unit
        )
    }
}

/// Measured scalars plus the figures that explain them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measured {
    pub measurements: Measurements,
    pub figures: Vec<Figure>,
}

impl Measured {
    /// Record a metric and report it as a figure.
    pub fn metric(
        mut self,
        metric: Metric,
        value: f64,
        precision: usize,
        unit: &'static str,
    ) -> Self {
        self.measurements.set(metric, value);
        self.figures.push(Figure::of(metric, value, precision, unit));
        self
    }

    /// Report a figure that no policy thresholds.
    pub fn figure(mut self, figure: Figure) -> Self {
        self.figures.push(figure);
        self
    }
}

/// Verdict of one heuristic on one sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeuristicReport {
    pub kind: HeuristicKind,
    pub source: String,
    pub figures: Vec<Figure>,
    pub measurements: Measurements,
    pub verdict: String,
}

/// Outcome of a heuristic. Finding nothing to measure is not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum HeuristicOutcome {
    NoContent { kind: HeuristicKind, source: String },
    Report(HeuristicReport),
}

impl HeuristicOutcome {
    pub fn verdict(&self) -> Option<&str> {
        match self {
            Self::NoContent { .. } => None,
            Self::Report(report) => Some(&report.verdict),
        }
    }
}

impl fmt::Display for HeuristicOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoContent { kind, source } => f.write_str(&kind.nothing_found(source)),
            Self::Report(report) => {
                writeln!(f, "{} ({}):", report.kind.title(), report.source)?;
                for figure in &report.figures {
                    writeln!(f, "{figure}")?;
                }
                write!(f, "Verdict: {}.", report.verdict)
            }
        }
    }
}

/// Run one heuristic on an already binarized sample.
pub fn run_heuristic(
    kind: HeuristicKind,
    mask: &BinaryMask,
    config: &AnalysisConfig,
    source: impl Into<String>,
) -> HeuristicOutcome {
    let source = source.into();
    let measured = match kind {
        HeuristicKind::Imitation => stroke::measure_imitation(mask, &config.heuristics),
        HeuristicKind::PrintLike => stroke::measure_print_like(mask, config),
        HeuristicKind::LeftHand => stroke::measure_left_hand(mask, config),
        HeuristicKind::IntentionalChange | HeuristicKind::UnusualConditions => {
            variation::measure_line_variation(mask, config)
        }
    };

    let Some(Measured {
        measurements,
        figures,
    }) = measured
    else {
        info!(%kind, %source, "Nothing to measure");
        return HeuristicOutcome::NoContent { kind, source };
    };

    let verdict = kind
        .policy(&config.heuristics)
        .classify(&measurements)
        .to_string();
    info!(%kind, %source, %verdict, "Heuristic classified");

    HeuristicOutcome::Report(HeuristicReport {
        kind,
        source,
        figures,
        measurements,
        verdict,
    })
}

/// Load, binarize and run one heuristic on an image file.
#[instrument(skip_all, fields(?kind, path = %path.display()))]
pub fn analyze_heuristic(
    kind: HeuristicKind,
    path: &Path,
    config: &AnalysisConfig,
) -> Result<HeuristicOutcome> {
    let mask = binarize(&RasterImage::open(path)?, &config.preprocess);
    Ok(run_heuristic(kind, &mask, config, path.display().to_string()))
}

pub fn analyze_imitation(path: &Path, config: &AnalysisConfig) -> Result<HeuristicOutcome> {
    analyze_heuristic(HeuristicKind::Imitation, path, config)
}

pub fn analyze_print_like(path: &Path, config: &AnalysisConfig) -> Result<HeuristicOutcome> {
    analyze_heuristic(HeuristicKind::PrintLike, path, config)
}

pub fn analyze_left_hand(path: &Path, config: &AnalysisConfig) -> Result<HeuristicOutcome> {
    analyze_heuristic(HeuristicKind::LeftHand, path, config)
}

pub fn analyze_intentional_change(
    path: &Path,
    config: &AnalysisConfig,
) -> Result<HeuristicOutcome> {
    analyze_heuristic(HeuristicKind::IntentionalChange, path, config)
}

pub fn analyze_unusual_conditions(
    path: &Path,
    config: &AnalysisConfig,
) -> Result<HeuristicOutcome> {
    analyze_heuristic(HeuristicKind::UnusualConditions, path, config)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figures_render_with_their_precision() {
        assert_eq!(
            Figure::of(Metric::Slant, -12.345, 1, "°").to_string(),
            "Mean slant: -12.3°"
        );
        assert_eq!(
            Figure::new("Connectivity ratio", 0.5, 2, "").to_string(),
            "Connectivity ratio: 0.50"
        );
    }

    #[test]
    fn blank_mask_is_no_content_for_every_kind() {
        let config = AnalysisConfig::default();
        let blank = BinaryMask::new(80, 40);
        for kind in HeuristicKind::ALL {
            let outcome = run_heuristic(kind, &blank, &config, "blank.png");
            assert_eq!(
                outcome,
                HeuristicOutcome::NoContent {
                    kind,
                    source: "blank.png".into()
                }
            );
            assert!(outcome.verdict().is_none());
            assert!(outcome.to_string().contains("blank.png"));
        }
    }

    #[test]
    fn report_text_ends_with_verdict() {
        let mut mask = BinaryMask::new(120, 40);
        for i in 0..3 {
            mask.fill_rect(10 + i * 30, 10, 10, 20);
        }
        let outcome = run_heuristic(
            HeuristicKind::PrintLike,
            &mask,
            &AnalysisConfig::default(),
            "block.png",
        );
        let text = outcome.to_string();
        assert!(text.starts_with("Print-like handwriting analysis (block.png):"));
        assert!(text.contains("Connectivity ratio: 0.00"));
        assert!(text.ends_with("Verdict: print-like handwriting (letters are not joined)."));
    }

    #[test]
    fn overridden_policy_changes_the_verdict() {
        let mut config = AnalysisConfig::default();
        config.heuristics.print_like = HeuristicPolicy {
            rules: Vec::new(),
            fallback: "undecided".into(),
        };
        let mut mask = BinaryMask::new(60, 40);
        mask.fill_rect(10, 10, 10, 20);
        let outcome = run_heuristic(HeuristicKind::PrintLike, &mask, &config, "x");
        assert_eq!(outcome.verdict(), Some("undecided"));
    }

    #[test]
    fn capitalize_handles_empty_text() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("mean slant"), "Mean slant");
    }
}
