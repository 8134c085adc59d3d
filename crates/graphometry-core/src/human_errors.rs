// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for examiners who run the tool.
//
// Every technical error is mapped to plain English with a clear suggestion.

use crate::error::GraphometryError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The user must fix an input (path, file format, config value).
    ActionRequired,
    /// Retrying will not help without changing something outside the tool.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    pub severity: Severity,
}

impl std::fmt::Display for HumanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}", self.message, self.suggestion)
    }
}

/// Convert a `GraphometryError` into a `HumanError`.
pub fn humanize_error(err: &GraphometryError) -> HumanError {
    match err {
        GraphometryError::Decode { path, reason } => HumanError {
            message: format!("The image {} could not be read.", path.display()),
            suggestion: format!(
                "Check that the file exists and is a PNG, JPEG, BMP or TIFF scan. ({reason})"
            ),
            severity: Severity::ActionRequired,
        },
        GraphometryError::DecodeBytes(_) => HumanError {
            message: "The uploaded data is not a readable image.".into(),
            suggestion: "Save the scan as PNG or JPEG and try again.".into(),
            severity: Severity::ActionRequired,
        },
        GraphometryError::MissingSample(path) => HumanError {
            message: format!("Sample {} was not found.", path.display()),
            suggestion: "The whole batch was stopped. Fix the path and run it again.".into(),
            severity: Severity::ActionRequired,
        },
        GraphometryError::EmptyBatch => HumanError {
            message: "No samples were given.".into(),
            suggestion: "Pass at least one image path.".into(),
            severity: Severity::ActionRequired,
        },
        GraphometryError::InvalidConfig(detail) => HumanError {
            message: "The configuration file has an invalid value.".into(),
            suggestion: format!(
                "Run `graphometry config` to see the defaults, then correct the file. ({detail})"
            ),
            severity: Severity::ActionRequired,
        },
        GraphometryError::Report(detail) => HumanError {
            message: "The report document could not be produced.".into(),
            suggestion: format!("Check the report data and try again. ({detail})"),
            severity: Severity::Permanent,
        },
        GraphometryError::Io(io) => HumanError {
            message: "A file could not be read or written.".into(),
            suggestion: format!("Check the path and its permissions. ({io})"),
            severity: Severity::ActionRequired,
        },
        GraphometryError::Serialization(detail) => HumanError {
            message: "A JSON file is malformed.".into(),
            suggestion: format!("Fix the syntax and try again. ({detail})"),
            severity: Severity::ActionRequired,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn decode_failure_names_the_file() {
        let err = GraphometryError::Decode {
            path: PathBuf::from("scans/letter.png"),
            reason: "unexpected end of file".into(),
        };
        let human = humanize_error(&err);
        assert!(human.message.contains("scans/letter.png"));
        assert_eq!(human.severity, Severity::ActionRequired);
    }

    #[test]
    fn report_failure_is_permanent() {
        let human = humanize_error(&GraphometryError::Report("no pages".into()));
        assert_eq!(human.severity, Severity::Permanent);
    }

    #[test]
    fn missing_sample_mentions_batch() {
        let err = GraphometryError::MissingSample(PathBuf::from("2019.png"));
        let human = humanize_error(&err);
        assert!(human.message.contains("2019.png"));
        assert!(human.suggestion.contains("batch"));
    }
}
