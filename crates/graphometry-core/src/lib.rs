// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Graphometry: Core types, configuration, and error definitions shared across
// all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod policy;
pub mod types;

pub use config::AnalysisConfig;
pub use error::GraphometryError;
pub use policy::{HeuristicPolicy, Measurements, Metric};
pub use types::*;
