// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! clientbench Benchmarking Harness
//!
//! Measures the aggregate cost of issuing HTTP GET requests through several
//! client implementations against one target URL, and writes a comparison
//! table.
//!
//! # Methodology
//!
//! - **Setup** runs once per variant and is never timed (client construction,
//!   connection pools, runtimes)
//! - **Work** runs `repetitions` times back to back, reusing setup state
//! - **Timing** reads one clock (`real` or `cpu`) before and after the loop
//! - Variants run sequentially, never concurrently
//!
//! # Data Output
//!
//! A `library,time` CSV table, plus an optional JSON report with host details.

pub mod catalog;
pub mod clock;
pub mod error;
pub mod harness;
pub mod metrics;
pub mod reporter;
pub mod suite;
pub mod variant;

pub use clock::TimeSource;
pub use error::{ClientError, RunError};
pub use harness::BenchmarkHarness;
pub use metrics::{
    BenchmarkResult, FailurePhase, ResultSet, SkippedVariant, SuiteReport, SystemInfo,
};
pub use reporter::{CsvSink, JsonReporter, ReporterError};
pub use suite::{run_suite, Suite, SuiteOutcome};
pub use variant::{work, Variant, Work};
