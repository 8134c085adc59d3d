// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Graphometry.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Graphometry operations.
///
/// "No text found" is deliberately absent: an image without ink is a valid
/// input and is reported through the analysis result types instead.
#[derive(Debug, Error)]
pub enum GraphometryError {
    // -- Input errors --
    #[error("failed to decode image {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("failed to decode image bytes: {0}")]
    DecodeBytes(String),

    #[error("sample file not found: {}", .0.display())]
    MissingSample(PathBuf),

    #[error("no samples were given")]
    EmptyBatch,

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -- Output --
    #[error("report generation failed: {0}")]
    Report(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, GraphometryError>;
