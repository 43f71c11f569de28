// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Suite orchestration: run every catalog variant in order.
//!
//! Variants run strictly one after another on the calling thread. Running
//! them concurrently would make their timings share CPU and bandwidth.

use std::path::Path;

use clientbench_core::{BenchParameters, FailurePolicy, HardValidationError};

use crate::catalog::standard_catalog;
use crate::error::RunError;
use crate::harness::BenchmarkHarness;
use crate::metrics::{ResultSet, SkippedVariant};
use crate::reporter::CsvSink;
use crate::variant::Variant;

/// Everything a finished run produced.
#[derive(Debug, Clone, Default)]
pub struct SuiteOutcome {
    /// Successful variants in catalog order
    pub results: ResultSet,
    /// Variants left out under [`FailurePolicy::Isolate`]
    pub skipped: Vec<SkippedVariant>,
}

/// An ordered catalog plus the policy applied when a variant fails.
#[derive(Debug)]
pub struct Suite {
    catalog: Vec<Variant>,
    policy: FailurePolicy,
    echo: bool,
}

impl Suite {
    pub fn new(catalog: Vec<Variant>) -> Self {
        Self {
            catalog,
            policy: FailurePolicy::default(),
            echo: true,
        }
    }

    /// The built-in HTTP client catalog.
    pub fn standard() -> Self {
        Self::new(standard_catalog())
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set whether each variant prints its console line.
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Keep only the named variants, preserving catalog order.
    ///
    /// An empty list keeps everything. A name missing from the catalog is
    /// rejected rather than silently leaving the suite short.
    pub fn only(mut self, names: &[String]) -> Result<Self, HardValidationError> {
        if let Some(unknown) = names
            .iter()
            .find(|n| !self.catalog.iter().any(|v| v.name() == n.as_str()))
        {
            return Err(HardValidationError::UnknownVariant {
                name: unknown.clone(),
                known: self.variant_names().join(", "),
            });
        }
        if !names.is_empty() {
            self.catalog
                .retain(|variant| names.iter().any(|n| n == variant.name()));
        }
        Ok(self)
    }

    pub fn variant_names(&self) -> Vec<&'static str> {
        self.catalog.iter().map(Variant::name).collect()
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Run every variant in catalog order.
    pub fn run(&self, params: &BenchParameters) -> Result<SuiteOutcome, RunError> {
        let harness = BenchmarkHarness::new(params.repetitions, params.clock).echo(self.echo);
        let total = self.catalog.len();
        let mut outcome = SuiteOutcome::default();

        tracing::info!(variants = total, %params, policy = ?self.policy, "Starting suite");

        for (index, variant) in self.catalog.iter().enumerate() {
            tracing::info!(
                variant = variant.name(),
                position = index + 1,
                total,
                "Running variant"
            );

            match harness.run(variant, &params.url) {
                Ok(result) => outcome.results.push(result),
                Err(err) => {
                    let skipped = match (self.policy, SkippedVariant::from_error(&err)) {
                        (FailurePolicy::Isolate, Some(skipped)) => skipped,
                        _ => return Err(err),
                    };
                    tracing::warn!(variant = variant.name(), error = %err, "Skipping variant");
                    if self.echo {
                        println!("{}\n", skipped.console_line());
                    }
                    outcome.skipped.push(skipped);
                }
            }
        }

        tracing::info!(
            completed = outcome.results.len(),
            skipped = outcome.skipped.len(),
            "Suite finished"
        );
        Ok(outcome)
    }
}

/// Run the suite and write the CSV result file when `output` is given.
///
/// If the CSV cannot be written the error is [`RunError::Sink`], which still
/// carries the finished outcome.
pub fn run_suite(
    suite: &Suite,
    params: &BenchParameters,
    output: Option<&Path>,
) -> Result<SuiteOutcome, RunError> {
    let outcome = suite.run(params)?;

    if let Some(path) = output {
        if let Err(source) = CsvSink::new(path).write(&outcome.results) {
            return Err(RunError::Sink {
                source,
                outcome: Box::new(outcome),
            });
        }
        tracing::info!(path = %path.display(), rows = outcome.results.len(), "Wrote results");
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::variant::work;
    use clientbench_core::{ClockKind, Repetitions, TargetUrl};
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    fn params(repetitions: u64) -> BenchParameters {
        BenchParameters {
            url: TargetUrl::new("http://localhost:5000/").unwrap(),
            repetitions: Repetitions::new(repetitions).unwrap(),
            clock: ClockKind::Real,
        }
    }

    fn ok_variant(name: &'static str) -> Variant {
        Variant::new(name, |_| Ok(work(|| Ok(()))))
    }

    fn broken_setup(name: &'static str) -> Variant {
        Variant::new(name, |_| {
            Err(ClientError::UnsupportedScheme {
                scheme: "none".to_string(),
            })
        })
    }

    fn broken_work(name: &'static str) -> Variant {
        Variant::new(name, |_| {
            Ok(work(|| {
                Err(ClientError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "refused",
                )))
            }))
        })
    }

    #[test]
    fn test_results_in_catalog_order() {
        let suite = Suite::new(vec![ok_variant("c"), ok_variant("a"), ok_variant("b")]).echo(false);
        let outcome = suite.run(&params(101)).unwrap();

        assert_eq!(outcome.results.names(), vec!["c", "a", "b"]);
        assert!(outcome.skipped.is_empty());
        for result in &outcome.results {
            assert_eq!(result.repetitions, 101);
        }
    }

    #[test]
    fn test_isolate_skips_failed_setup() {
        let suite = Suite::new(vec![broken_setup("missing"), ok_variant("echo")]).echo(false);
        let outcome = suite.run(&params(101)).unwrap();

        assert_eq!(outcome.results.names(), vec!["echo"]);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].name, "missing");
    }

    #[test]
    fn test_isolate_skips_failed_work() {
        let suite = Suite::new(vec![ok_variant("a"), broken_work("down"), ok_variant("b")]).echo(false);
        let outcome = suite.run(&params(101)).unwrap();

        assert_eq!(outcome.results.names(), vec!["a", "b"]);
        assert_eq!(outcome.skipped[0].name, "down");
    }

    #[test]
    fn test_fail_fast_aborts() {
        let suite = Suite::new(vec![broken_setup("missing"), ok_variant("echo")])
            .failure_policy(FailurePolicy::FailFast)
            .echo(false);
        let err = suite.run(&params(101)).unwrap_err();

        assert_eq!(err.variant(), Some("missing"));
    }

    #[test]
    fn test_only_filters_and_keeps_order() {
        let suite = Suite::new(vec![ok_variant("a"), ok_variant("b"), ok_variant("c")])
            .only(&["c".to_string(), "a".to_string()])
            .unwrap();
        assert_eq!(suite.variant_names(), vec!["a", "c"]);

        let suite = Suite::standard().only(&[]).unwrap();
        assert_eq!(suite.len(), 6);
    }

    #[test]
    fn test_only_rejects_unknown_name() {
        let err = Suite::new(vec![ok_variant("a"), ok_variant("b")])
            .only(&["a".to_string(), "curl".to_string()])
            .unwrap_err();

        assert_eq!(
            err,
            HardValidationError::UnknownVariant {
                name: "curl".to_string(),
                known: "a, b".to_string(),
            }
        );
    }

    #[test]
    fn test_sink_failure_keeps_outcome() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("results.csv");
        let suite = Suite::new(vec![ok_variant("a"), broken_setup("gone")]).echo(false);

        let err = run_suite(&suite, &params(101), Some(&path)).unwrap_err();
        match err {
            RunError::Sink { outcome, .. } => {
                assert_eq!(outcome.results.names(), vec!["a"]);
                assert_eq!(outcome.skipped.len(), 1);
            }
            other => panic!("expected sink error, got {other}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_echo_scenario_writes_csv() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("results.csv");
        let suite = Suite::new(vec![Variant::new("echo", |_| {
            Ok(work(|| {
                thread::sleep(Duration::from_millis(1));
                Ok(())
            }))
        })])
        .echo(false);

        let outcome = run_suite(&suite, &params(200), Some(&path)).unwrap();
        let result = outcome.results.get("echo").unwrap();
        assert_eq!(result.repetitions, 200);
        assert!(result.duration_secs >= 0.2);

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("library,time"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("echo,"), "unexpected row {row}");
        assert_eq!(lines.next(), None);
    }
}
