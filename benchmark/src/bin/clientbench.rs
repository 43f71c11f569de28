// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! CLI tool to benchmark HTTP client libraries and write the comparison table.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use clientbench::metrics::format_seconds;
use clientbench::{run_suite, JsonReporter, RunError, Suite, SuiteOutcome, SuiteReport};
use clientbench_core::{BenchConfig, ClockKind, ConfigLoader, RawConfig};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TimerArg {
    /// Monotonic wall clock (includes network wait)
    Real,
    /// Process CPU time (excludes network wait)
    Cpu,
}

impl From<TimerArg> for ClockKind {
    fn from(v: TimerArg) -> Self {
        match v {
            TimerArg::Real => ClockKind::Real,
            TimerArg::Cpu => ClockKind::Cpu,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "clientbench")]
#[command(author, version, about = "Benchmarks for HTTP client libraries", long_about = None)]
struct Args {
    /// URL to GET on every iteration [default: http://localhost:5000/]
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Timed iterations per client, must be > 100 [default: 10000]
    #[arg(long, value_name = "N")]
    repetitions: Option<u64>,

    /// Timer type [default: real]
    #[arg(long, value_enum)]
    timer: Option<TimerArg>,

    // Kept as strings: clap's path parser refuses the empty value that
    // switches a sink off.
    /// CSV output file; an empty string disables it [default: results.csv]
    #[arg(long, value_name = "PATH")]
    output: Option<String>,

    /// Also write a JSON report with host details
    #[arg(long, value_name = "PATH")]
    json_output: Option<String>,

    /// Abort the whole run on the first failing client
    #[arg(long)]
    fail_fast: bool,

    /// Only run the named clients (repeatable)
    #[arg(long = "only", value_name = "NAME")]
    only: Vec<String>,

    /// YAML configuration file; flags override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// List the client catalog and exit
    #[arg(long)]
    list: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn overrides(&self) -> RawConfig {
        RawConfig {
            url: self.url.clone(),
            repetitions: self.repetitions,
            timer: self.timer.map(ClockKind::from),
            output: self.output.as_ref().map(PathBuf::from),
            json_output: self.json_output.as_ref().map(PathBuf::from),
            fail_fast: self.fail_fast.then_some(true),
            only: self.only.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let suite = Suite::standard();

    if args.list {
        for name in suite.variant_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let config = resolve_config(&args, &suite.variant_names())?;

    println!("{}", config.parameters);
    println!(
        "output={} json_output={} policy={:?}",
        display_path(config.output.as_ref()),
        display_path(config.json_output.as_ref()),
        config.failure_policy
    );
    println!();

    let suite = suite
        .only(&config.only)
        .context("invalid configuration")?
        .failure_policy(config.failure_policy);

    // A CSV failure is reported only after the JSON report and summary.
    let (outcome, sink_error) =
        match run_suite(&suite, &config.parameters, config.output.as_deref()) {
            Ok(outcome) => (outcome, None),
            Err(RunError::Sink { source, outcome }) => (*outcome, Some(source)),
            Err(err) => return Err(err).context("benchmark run failed"),
        };

    if let Some(path) = &config.json_output {
        let report = SuiteReport::new(
            &config.parameters,
            outcome.results.clone(),
            outcome.skipped.clone(),
        );
        let written = JsonReporter::new(path)
            .and_then(|reporter| reporter.save(&report))
            .with_context(|| format!("writing JSON report {}", path.display()))?;
        println!("JSON report saved to: {}", written.display());
    }

    print_summary(&outcome);

    if let Some(err) = sink_error {
        return Err(err).with_context(|| {
            format!("writing CSV results {}", display_path(config.output.as_ref()))
        });
    }

    Ok(())
}

/// Layer the optional config file under the command-line flags and validate.
fn resolve_config(args: &Args, known_variants: &[&str]) -> anyhow::Result<BenchConfig> {
    let file_config = match &args.config {
        Some(path) => ConfigLoader::load_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RawConfig::default(),
    };
    ConfigLoader::validate(file_config.merge(args.overrides()), known_variants)
        .context("invalid configuration")
}

fn display_path(path: Option<&PathBuf>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn print_summary(outcome: &SuiteOutcome) {
    println!("Summary");
    println!("-------");

    for result in &outcome.results {
        println!(
            "{}: total={:.4}s per_request={}",
            result.name,
            result.duration_secs,
            format_seconds(result.per_request_secs())
        );
    }

    if !outcome.skipped.is_empty() {
        println!();
        println!("Skipped");
        println!("-------");
        for skipped in &outcome.skipped {
            println!("{}: {}", skipped.name, skipped.reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: &[&str] = &["reqwest", "hyper", "tcp_stream"];

    fn resolve(argv: &[&str]) -> BenchConfig {
        let args = Args::try_parse_from(argv.iter().copied()).unwrap();
        resolve_config(&args, KNOWN).unwrap()
    }

    #[test]
    fn test_empty_output_flag_disables_csv() {
        let config = resolve(&["clientbench", "--output", ""]);
        assert_eq!(config.output, None);

        let config = resolve(&["clientbench", "--output=", "--json-output", ""]);
        assert_eq!(config.output, None);
        assert_eq!(config.json_output, None);
    }

    #[test]
    fn test_flag_defaults_and_overrides() {
        let config = resolve(&["clientbench"]);
        assert_eq!(config.output, Some(PathBuf::from("results.csv")));
        assert_eq!(config.parameters.repetitions.get(), 10_000);

        let config = resolve(&[
            "clientbench",
            "--url",
            "http://127.0.0.1:8080/",
            "--repetitions",
            "101",
            "--timer",
            "cpu",
            "--output",
            "out.csv",
            "--only",
            "hyper",
        ]);
        assert_eq!(config.parameters.url.as_str(), "http://127.0.0.1:8080/");
        assert_eq!(config.parameters.repetitions.get(), 101);
        assert_eq!(config.parameters.clock, ClockKind::Cpu);
        assert_eq!(config.output, Some(PathBuf::from("out.csv")));
        assert_eq!(config.only, vec!["hyper".to_string()]);
    }

    #[test]
    fn test_invalid_flags_are_rejected() {
        let args = Args::try_parse_from(["clientbench", "--repetitions", "100"]).unwrap();
        assert!(resolve_config(&args, KNOWN).is_err());

        let args = Args::try_parse_from(["clientbench", "--url", ""]).unwrap();
        assert!(resolve_config(&args, KNOWN).is_err());

        assert!(Args::try_parse_from(["clientbench", "--timer", "wall"]).is_err());
    }
}
