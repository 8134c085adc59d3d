// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Threshold policy tables: one generic classifier that turns a set of
// measurements into a verdict string, fed a distinct named table per heuristic.

use serde::{Deserialize, Serialize};

/// A scalar measurement a heuristic can threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Mean perimeter²/(4π·area) over components.
    MeanCompactness,
    /// Connectivity ratio in [0, 1].
    Connectivity,
    /// Mean slant in degrees.
    Slant,
    /// Mean width/height ratio of components.
    MeanAspectRatio,
    /// Sum of per-line standard deviations of size, spacing and slant.
    LineVariation,
}

impl Metric {
    pub fn label(&self) -> &'static str {
        match self {
            Self::MeanCompactness => "mean stroke compactness",
            Self::Connectivity => "connectivity ratio",
            Self::Slant => "mean slant",
            Self::MeanAspectRatio => "mean width/height ratio",
            Self::LineVariation => "total feature variation",
        }
    }
}

/// Direction of a threshold test. Both are strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Above,
    Below,
}

/// `metric <comparison> value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub metric: Metric,
    pub comparison: Comparison,
    pub value: f64,
}

impl Condition {
    pub fn above(metric: Metric, value: f64) -> Self {
        Self {
            metric,
            comparison: Comparison::Above,
            value,
        }
    }

    pub fn below(metric: Metric, value: f64) -> Self {
        Self {
            metric,
            comparison: Comparison::Below,
            value,
        }
    }

    /// A condition on a metric that was not measured never holds.
    fn holds(&self, measurements: &Measurements) -> bool {
        match measurements.get(self.metric) {
            Some(measured) => match self.comparison {
                Comparison::Above => measured > self.value,
                Comparison::Below => measured < self.value,
            },
            None => false,
        }
    }
}

/// A conjunction of conditions and the verdict it yields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRule {
    pub all_of: Vec<Condition>,
    pub verdict: String,
}

impl ThresholdRule {
    pub fn new(all_of: Vec<Condition>, verdict: impl Into<String>) -> Self {
        Self {
            all_of,
            verdict: verdict.into(),
        }
    }
}

/// Ordered rules plus a fallback. The first rule whose conditions all hold wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicPolicy {
    pub rules: Vec<ThresholdRule>,
    pub fallback: String,
}

impl HeuristicPolicy {
    pub fn classify(&self, measurements: &Measurements) -> &str {
        self.rules
            .iter()
            .find(|rule| rule.all_of.iter().all(|c| c.holds(measurements)))
            .map(|rule| rule.verdict.as_str())
            .unwrap_or(self.fallback.as_str())
    }

    /// Two descending bands on a single metric: `> strong`, `> weak`, else fallback.
    pub fn banded(
        metric: Metric,
        strong: (f64, &str),
        weak: (f64, &str),
        fallback: &str,
    ) -> Self {
        Self {
            rules: vec![
                ThresholdRule::new(vec![Condition::above(metric, strong.0)], strong.1),
                ThresholdRule::new(vec![Condition::above(metric, weak.0)], weak.1),
            ],
            fallback: fallback.to_string(),
        }
    }

    pub fn imitation() -> Self {
        Self::banded(
            Metric::MeanCompactness,
            (
                10.0,
                "signs of imitation (writing possibly traced or heavily slowed)",
            ),
            (6.0, "possible signs of imitation"),
            "no signs of imitation",
        )
    }

    pub fn print_like() -> Self {
        Self {
            rules: vec![ThresholdRule::new(
                vec![Condition::below(Metric::Connectivity, 0.1)],
                "print-like handwriting (letters are not joined)",
            )],
            fallback: "handwriting does not resemble print".to_string(),
        }
    }

    pub fn left_hand() -> Self {
        Self {
            rules: vec![
                ThresholdRule::new(
                    vec![
                        Condition::below(Metric::Slant, -10.0),
                        Condition::below(Metric::Connectivity, 0.3),
                    ],
                    "likely left hand (left slant, low connectivity)",
                ),
                ThresholdRule::new(
                    vec![Condition::below(Metric::Slant, -5.0)],
                    "possibly left hand (left slant)",
                ),
            ],
            fallback: "no signs of left-hand writing".to_string(),
        }
    }

    pub fn intentional_change() -> Self {
        Self::banded(
            Metric::LineVariation,
            (20.0, "pronounced signs of disguised handwriting"),
            (10.0, "possible signs of disguise"),
            "no signs of disguise",
        )
    }

    pub fn unusual_conditions() -> Self {
        Self::banded(
            Metric::LineVariation,
            (15.0, "unusual writing conditions likely (high variability)"),
            (8.0, "conditions possibly affected the writing"),
            "no signs of unusual conditions",
        )
    }
}

/// Named measurements handed to a policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurements(Vec<(Metric, f64)>);

impl Measurements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.set(metric, value);
        self
    }

    pub fn set(&mut self, metric: Metric, value: f64) {
        match self.0.iter_mut().find(|(m, _)| *m == metric) {
            Some(slot) => slot.1 = value,
            None => self.0.push((metric, value)),
        }
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.0.iter().find(|(m, _)| *m == metric).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Metric, f64)> {
        self.0.iter()
    }
}
