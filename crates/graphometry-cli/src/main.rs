// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Graphometry: handwriting measurement from scanned images.
//
// Entry point. Initialises logging, loads the configuration, and dispatches
// the subcommand. Reports go to stdout, logs and errors to stderr.

mod cli;

use std::fmt::Display;
use std::process::ExitCode;

use clap::Parser;
use graphometry_analysis::{
    analyze_digits, analyze_handwriting, analyze_imitation, analyze_intentional_change,
    analyze_left_hand, analyze_print_like, analyze_similarity, analyze_time_gap,
    analyze_unusual_conditions,
};
use graphometry_core::AnalysisConfig;
use graphometry_core::error::Result;
use graphometry_core::human_errors::humanize_error;
use graphometry_report::{ReportData, ReportWriter};
use serde::Serialize;

use cli::{CliArgs, Command};

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("{}", humanize_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

/// Execute one command and return what should be printed.
fn run(args: &CliArgs) -> Result<String> {
    let config = match &args.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };
    let json = args.json;

    match &args.command {
        Command::Analyze { image } => render(json, &analyze_handwriting(image, &config)?),
        Command::Compare {
            questioned,
            reference,
        } => render(json, &analyze_similarity(questioned, reference, &config)?),
        Command::Digits { image } => render(json, &analyze_digits(image, &config)?),
        Command::Imitation { image } => render(json, &analyze_imitation(image, &config)?),
        Command::IntentionalChange { image } => {
            render(json, &analyze_intentional_change(image, &config)?)
        }
        Command::LeftHand { image } => render(json, &analyze_left_hand(image, &config)?),
        Command::PrintLike { image } => render(json, &analyze_print_like(image, &config)?),
        Command::UnusualConditions { image } => {
            render(json, &analyze_unusual_conditions(image, &config)?)
        }
        Command::TimeGap { images } => {
            render(json, &analyze_time_gap(images.as_slice(), &config)?)
        }
        Command::Report {
            data,
            output,
            paper,
        } => {
            let record = ReportData::load(data)?;
            ReportWriter::new((*paper).into()).write_to_file(&record, output)?;
            Ok(format!("Conclusion written to {}", output.display()))
        }
        Command::Config => Ok(serde_json::to_string_pretty(&config)?),
    }
}

fn render<T: Serialize + Display>(json: bool, value: &T) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(value.to_string())
    }
}
