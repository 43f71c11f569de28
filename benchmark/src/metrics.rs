// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Result types for a benchmark run.
//!
//! A run produces one [`BenchmarkResult`] per successful variant, collected in
//! catalog order into a [`ResultSet`]. Failed variants under the isolating
//! policy become [`SkippedVariant`] records instead.

use chrono::{DateTime, Utc};
use clientbench_core::{BenchParameters, ClockKind, Repetitions};
use serde::{Deserialize, Serialize};
use sysinfo::System;

use crate::error::RunError;

/// Aggregate measurement for one variant's full repeated run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Variant name
    pub name: String,
    /// Number of timed work iterations
    pub repetitions: u64,
    /// Elapsed time across the whole loop, in seconds (unrounded)
    pub duration_secs: f64,
}

impl BenchmarkResult {
    pub fn new(name: impl Into<String>, repetitions: Repetitions, duration_secs: f64) -> Self {
        Self {
            name: name.into(),
            repetitions: repetitions.get(),
            duration_secs,
        }
    }

    /// Average cost of one request.
    pub fn per_request_secs(&self) -> f64 {
        self.duration_secs / self.repetitions.max(1) as f64
    }

    /// Progress line printed by the runner: `NAME =\t<seconds to 4 dp>`.
    pub fn console_line(&self) -> String {
        format!("{} =\t{:.4}", self.name.to_uppercase(), self.duration_secs)
    }
}

/// Results of one run, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet(Vec<BenchmarkResult>);

impl ResultSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, result: BenchmarkResult) {
        self.0.push(result);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BenchmarkResult> {
        self.0.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&BenchmarkResult> {
        self.0.iter().find(|r| r.name == name)
    }
}

impl From<Vec<BenchmarkResult>> for ResultSet {
    fn from(results: Vec<BenchmarkResult>) -> Self {
        Self(results)
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a BenchmarkResult;
    type IntoIter = std::slice::Iter<'a, BenchmarkResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Where a variant failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum FailurePhase {
    Setup,
    Work { iteration: u64 },
}

/// A variant that was left out of the result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedVariant {
    pub name: String,
    #[serde(flatten)]
    pub phase: FailurePhase,
    pub reason: String,
}

impl SkippedVariant {
    /// Build a skip record from a per-variant failure.
    ///
    /// Returns `None` for errors that are not tied to one variant.
    pub fn from_error(err: &RunError) -> Option<Self> {
        match err {
            RunError::VariantUnavailable { variant, source } => Some(Self {
                name: variant.clone(),
                phase: FailurePhase::Setup,
                reason: source.to_string(),
            }),
            RunError::WorkFailed {
                variant,
                iteration,
                source,
            } => Some(Self {
                name: variant.clone(),
                phase: FailurePhase::Work {
                    iteration: *iteration,
                },
                reason: source.to_string(),
            }),
            RunError::Clock { .. } | RunError::Sink { .. } => None,
        }
    }

    pub fn console_line(&self) -> String {
        let phase = match self.phase {
            FailurePhase::Setup => "setup".to_string(),
            FailurePhase::Work { iteration } => format!("iteration {}", iteration),
        };
        format!(
            "{} =\tSKIPPED ({}: {})",
            self.name.to_uppercase(),
            phase,
            self.reason
        )
    }
}

/// Format seconds in human-readable form (auto-selects ns/μs/ms/s).
pub fn format_seconds(secs: f64) -> String {
    if secs < 1e-6 {
        format!("{:.0}ns", secs * 1e9)
    } else if secs < 1e-3 {
        format!("{:.2}μs", secs * 1e6)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1e3)
    } else {
        format!("{:.2}s", secs)
    }
}

/// System information captured at benchmark time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system name
    pub os: String,
    /// OS version
    pub os_version: String,
    /// Kernel version (Linux)
    pub kernel_version: Option<String>,
    /// CPU model name
    pub cpu_model: String,
    /// Number of CPU cores
    pub cpu_cores: usize,
    /// Hostname
    pub hostname: String,
}

impl SystemInfo {
    /// Collect current system information.
    pub fn collect() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu();

        Self {
            os: System::name().unwrap_or_else(|| "Unknown".to_string()),
            os_version: System::os_version().unwrap_or_else(|| "Unknown".to_string()),
            kernel_version: System::kernel_version(),
            cpu_model: sys
                .cpus()
                .first()
                .map(|cpu| cpu.brand().to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            cpu_cores: sys.cpus().len(),
            hostname: System::host_name().unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// Parameters as recorded in the JSON report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportParameters {
    pub url: String,
    pub repetitions: u64,
    pub timer: ClockKind,
}

impl From<&BenchParameters> for ReportParameters {
    fn from(params: &BenchParameters) -> Self {
        Self {
            url: params.url.to_string(),
            repetitions: params.repetitions.get(),
            timer: params.clock,
        }
    }
}

/// Complete suite report, written by the JSON reporter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Suite identifier
    pub benchmark_suite: String,
    /// Harness version
    pub version: String,
    /// Timestamp when the report was assembled
    pub timestamp: DateTime<Utc>,
    /// System information
    pub system_info: SystemInfo,
    pub parameters: ReportParameters,
    /// Per-variant results in catalog order
    pub results: ResultSet,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedVariant>,
}

impl SuiteReport {
    pub fn new(params: &BenchParameters, results: ResultSet, skipped: Vec<SkippedVariant>) -> Self {
        Self {
            benchmark_suite: "clientbench".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            system_info: SystemInfo::collect(),
            parameters: ReportParameters::from(params),
            results,
            skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use clientbench_core::TargetUrl;

    fn reps(n: u64) -> Repetitions {
        Repetitions::new(n).unwrap()
    }

    #[test]
    fn test_console_line_rounds_to_four_places() {
        let result = BenchmarkResult::new("reqwest_session", reps(200), 0.213_456_789);
        assert_eq!(result.console_line(), "REQWEST_SESSION =\t0.2135");
        // The stored value stays unrounded.
        assert_eq!(result.duration_secs, 0.213_456_789);
    }

    #[test]
    fn test_per_request() {
        let result = BenchmarkResult::new("hyper", reps(1_000), 2.0);
        assert!((result.per_request_secs() - 0.002).abs() < 1e-12);
    }

    #[test]
    fn test_result_set_keeps_order() {
        let mut set = ResultSet::new();
        set.push(BenchmarkResult::new("b", reps(101), 0.1));
        set.push(BenchmarkResult::new("a", reps(101), 0.2));
        assert_eq!(set.names(), vec!["b", "a"]);
        assert_eq!(set.get("a").unwrap().duration_secs, 0.2);
        assert!(set.get("c").is_none());
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(5e-7), "500ns");
        assert_eq!(format_seconds(1.5e-6), "1.50μs");
        assert_eq!(format_seconds(1.5e-3), "1.50ms");
        assert_eq!(format_seconds(1.5), "1.50s");
    }

    #[test]
    fn test_skipped_from_error() {
        let err = RunError::WorkFailed {
            variant: "tcp_stream".to_string(),
            iteration: 7,
            source: ClientError::MissingHost {
                url: "http:///".to_string(),
            },
        };
        let skipped = SkippedVariant::from_error(&err).unwrap();
        assert_eq!(skipped.name, "tcp_stream");
        assert_eq!(skipped.phase, FailurePhase::Work { iteration: 7 });
        assert!(skipped.console_line().starts_with("TCP_STREAM =\tSKIPPED (iteration 7"));
    }

    #[test]
    fn test_report_serialization() {
        let params = BenchParameters {
            url: TargetUrl::new("http://localhost:5000/").unwrap(),
            repetitions: reps(200),
            clock: ClockKind::Cpu,
        };
        let results = ResultSet::from(vec![BenchmarkResult::new("echo", reps(200), 0.25)]);
        let skipped = vec![SkippedVariant {
            name: "hyper".to_string(),
            phase: FailurePhase::Setup,
            reason: "unsupported scheme".to_string(),
        }];
        let report = SuiteReport::new(&params, results, skipped);

        let json = serde_json::to_string_pretty(&report).unwrap();
        assert!(json.contains("\"echo\""));
        assert!(json.contains("\"timer\": \"cpu\""));
        assert!(json.contains("\"phase\": \"setup\""));
    }
}
