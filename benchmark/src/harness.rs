// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark harness for timing one variant.
//!
//! Setup runs once outside the timed interval. The work closure then runs
//! `repetitions` times back to back with no state reset in between, and the
//! clock is read only before and after the whole loop.

use std::hint::black_box;

use clientbench_core::{ClockKind, Repetitions, TargetUrl};

use crate::clock::TimeSource;
use crate::error::RunError;
use crate::metrics::BenchmarkResult;
use crate::variant::Variant;

/// A benchmark harness for measuring the aggregate cost of a variant.
#[derive(Debug, Clone)]
pub struct BenchmarkHarness {
    /// Number of timed work iterations
    repetitions: Repetitions,
    /// Clock used for the timed loop
    clock: ClockKind,
    /// Whether to print the per-variant progress line
    echo: bool,
}

impl BenchmarkHarness {
    /// Create a new harness with the console line enabled.
    pub fn new(repetitions: Repetitions, clock: ClockKind) -> Self {
        Self {
            repetitions,
            clock,
            echo: true,
        }
    }

    /// Set whether to print `NAME =\t<seconds>` after each variant.
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn repetitions(&self) -> Repetitions {
        self.repetitions
    }

    pub fn clock(&self) -> ClockKind {
        self.clock
    }

    /// Run one variant against `url`.
    ///
    /// A setup failure is reported as [`RunError::VariantUnavailable`]; a
    /// failure on any timed iteration as [`RunError::WorkFailed`]. No partial
    /// result is produced in either case.
    pub fn run(&self, variant: &Variant, url: &TargetUrl) -> Result<BenchmarkResult, RunError> {
        let time_source = TimeSource::from(self.clock);

        tracing::debug!(variant = variant.name(), url = %url, "Running setup");
        let mut work = variant
            .setup(url)
            .map_err(|source| RunError::VariantUnavailable {
                variant: variant.name().to_string(),
                source,
            })?;

        let repetitions = self.repetitions.get();
        let start = time_source.now()?;
        for iteration in 0..repetitions {
            black_box(work()).map_err(|source| RunError::WorkFailed {
                variant: variant.name().to_string(),
                iteration,
                source,
            })?;
        }
        let elapsed = time_source.now()?.saturating_sub(start);

        tracing::debug!(
            variant = variant.name(),
            repetitions,
            clock = %self.clock,
            elapsed_ns = elapsed.as_nanos() as u64,
            "Timed loop finished"
        );

        let result = BenchmarkResult::new(variant.name(), self.repetitions, elapsed.as_secs_f64());
        if self.echo {
            println!("{}\n", result.console_line());
        }
        Ok(result)
    }
}
