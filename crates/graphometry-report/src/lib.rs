// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// graphometry-report: Expert conclusion documents for Graphometry.
//
// Turns a structured `ReportData` record (sections, tables, illustration
// paths) into a paginated PDF.

pub mod data;
pub mod writer;

pub use data::ReportData;
pub use writer::ReportWriter;
