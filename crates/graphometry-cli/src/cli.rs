// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use graphometry_core::types::PaperSize;

#[derive(Debug, Parser)]
#[command(
    name = "graphometry",
    version,
    about = "Deterministic handwriting metrics, sample comparison and heuristic reports",
    disable_help_subcommand = true
)]
pub struct CliArgs {
    /// Analysis configuration (JSON); defaults apply to anything it omits
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Print the structured result as JSON instead of the text report
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Log at debug level (RUST_LOG still takes precedence)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// General features of one page: size, spacing, slant, connectivity, skill
    Analyze { image: PathBuf },

    /// Similarity of a questioned document to a reference sample
    Compare {
        questioned: PathBuf,
        reference: PathBuf,
    },

    /// Digit handwriting: count, size and proportions of digits
    Digits { image: PathBuf },

    /// Signs of imitating another person's handwriting
    Imitation { image: PathBuf },

    /// Signs of deliberately disguised handwriting
    IntentionalChange { image: PathBuf },

    /// Signs of writing with the left hand
    LeftHand { image: PathBuf },

    /// Whether the handwriting imitates print
    PrintLike { image: PathBuf },

    /// Signs of writing under unusual conditions
    UnusualConditions { image: PathBuf },

    /// Drift of one writer's features across samples, oldest first
    TimeGap { images: Vec<PathBuf> },

    /// Render an expert conclusion PDF from a JSON record
    Report {
        data: PathBuf,
        output: PathBuf,

        /// Paper size of the generated document
        #[arg(long = "paper", value_enum, default_value_t = Paper::A4)]
        paper: Paper,
    },

    /// Print the effective configuration as JSON
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Paper {
    A4,
    A5,
    Letter,
    Legal,
}

impl From<Paper> for PaperSize {
    fn from(paper: Paper) -> Self {
        match paper {
            Paper::A4 => PaperSize::A4,
            Paper::A5 => PaperSize::A5,
            Paper::Letter => PaperSize::Letter,
            Paper::Legal => PaperSize::Legal,
        }
    }
}
