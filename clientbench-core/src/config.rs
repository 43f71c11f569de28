// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Layered run configuration with strict validation.
//!
//! Values come from built-in defaults, an optional YAML file and command-line
//! overrides, in increasing order of precedence. The merged result is checked
//! once, and any invalid field is a HardValidationError that prevents startup.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{CoreError, CoreResult, HardValidationError};
use crate::types::{ClockKind, FailurePolicy, Repetitions, TargetUrl};

fn default_url() -> String {
    "http://localhost:5000/".to_string()
}

fn default_repetitions() -> u64 {
    10_000
}

fn default_output() -> PathBuf {
    PathBuf::from("results.csv")
}

/// Raw configuration as parsed from YAML or collected from flags (before validation).
///
/// Every field is optional so that layers can be merged field by field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    pub url: Option<String>,
    pub repetitions: Option<u64>,
    pub timer: Option<ClockKind>,
    /// CSV sink path. An empty path disables the CSV file.
    pub output: Option<PathBuf>,
    pub json_output: Option<PathBuf>,
    pub fail_fast: Option<bool>,
    #[serde(default)]
    pub only: Vec<String>,
}

impl RawConfig {
    /// Overlay `other` on top of `self`. Fields set in `other` win.
    pub fn merge(self, other: RawConfig) -> RawConfig {
        RawConfig {
            url: other.url.or(self.url),
            repetitions: other.repetitions.or(self.repetitions),
            timer: other.timer.or(self.timer),
            output: other.output.or(self.output),
            json_output: other.json_output.or(self.json_output),
            fail_fast: other.fail_fast.or(self.fail_fast),
            only: if other.only.is_empty() {
                self.only
            } else {
                other.only
            },
        }
    }
}

/// Parameters shared by every variant in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchParameters {
    pub url: TargetUrl,
    pub repetitions: Repetitions,
    pub clock: ClockKind,
}

impl fmt::Display for BenchParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "url={} repetitions={} timer={}",
            self.url, self.repetitions, self.clock
        )
    }
}

/// Complete validated configuration.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub parameters: BenchParameters,
    pub output: Option<PathBuf>,
    pub json_output: Option<PathBuf>,
    pub failure_policy: FailurePolicy,
    /// Catalog names to run. Empty means the whole catalog.
    pub only: Vec<String>,
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parse a YAML configuration file without validating it.
    pub fn load_file(path: impl AsRef<Path>) -> CoreResult<RawConfig> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::Io {
            context: "reading config file",
            source: e,
        })?;

        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Self::load_string(&content)
    }

    /// Parse a YAML configuration string without validating it.
    pub fn load_string(content: &str) -> CoreResult<RawConfig> {
        if content.trim().is_empty() {
            return Ok(RawConfig::default());
        }
        serde_yaml::from_str(content).map_err(|e| CoreError::ConfigParse {
            message: format!("YAML parse error: {}", e),
        })
    }

    /// Apply defaults and validate raw configuration.
    ///
    /// `known_variants` is the catalog, used to reject unknown `only` names.
    pub fn validate(raw: RawConfig, known_variants: &[&str]) -> CoreResult<BenchConfig> {
        let url = TargetUrl::new(raw.url.unwrap_or_else(default_url))?;
        let repetitions = Repetitions::new(raw.repetitions.unwrap_or_else(default_repetitions))?;

        for name in &raw.only {
            if !known_variants.contains(&name.as_str()) {
                return Err(HardValidationError::UnknownVariant {
                    name: name.clone(),
                    known: known_variants.join(", "),
                }
                .into());
            }
        }

        let output = Some(raw.output.unwrap_or_else(default_output))
            .filter(|p| !p.as_os_str().is_empty());
        let json_output = raw.json_output.filter(|p| !p.as_os_str().is_empty());

        let failure_policy = if raw.fail_fast.unwrap_or(false) {
            FailurePolicy::FailFast
        } else {
            FailurePolicy::Isolate
        };

        Ok(BenchConfig {
            parameters: BenchParameters {
                url,
                repetitions,
                clock: raw.timer.unwrap_or_default(),
            },
            output,
            json_output,
            failure_policy,
            only: raw.only,
        })
    }
}
