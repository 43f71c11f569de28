// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Newtype wrappers for validated benchmark inputs.
//!
//! Each type checks its invariant at construction time, so a value that
//! reaches the runner is already known to be usable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HardValidationError;

/// Repetition counts at or below this value are rejected.
pub const MIN_REPETITIONS_EXCLUSIVE: u64 = 100;

/// Target URL for every variant in a run.
/// Must be non-empty. Reachability is not checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetUrl(String);

impl TargetUrl {
    /// Create a new TargetUrl with validation.
    pub fn new(url: impl Into<String>) -> Result<Self, HardValidationError> {
        let url = url.into();

        if url.is_empty() {
            return Err(HardValidationError::InvalidFieldValue {
                field: "url",
                value: url,
                reason: "URL must not be an empty string".to_string(),
            });
        }

        Ok(Self(url))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for TargetUrl {
    type Error = HardValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TargetUrl> for String {
    fn from(url: TargetUrl) -> Self {
        url.0
    }
}

/// Number of timed work iterations per variant.
/// Must be strictly greater than [`MIN_REPETITIONS_EXCLUSIVE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Repetitions(u64);

impl Repetitions {
    /// Create a new Repetitions count with bounds validation.
    pub fn new(count: u64) -> Result<Self, HardValidationError> {
        if count <= MIN_REPETITIONS_EXCLUSIVE {
            return Err(HardValidationError::InvalidFieldValue {
                field: "repetitions",
                value: count.to_string(),
                reason: format!("Repetitions must be > {}", MIN_REPETITIONS_EXCLUSIVE),
            });
        }
        Ok(Self(count))
    }

    /// Get the inner count.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Repetitions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for Repetitions {
    type Error = HardValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Repetitions> for u64 {
    fn from(reps: Repetitions) -> Self {
        reps.0
    }
}

/// Clock used to time the repeated work loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockKind {
    /// Monotonic wall clock, includes time blocked on I/O.
    #[default]
    Real,
    /// Process CPU time, excludes time blocked on I/O.
    Cpu,
}

impl ClockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClockKind::Real => "real",
            ClockKind::Cpu => "cpu",
        }
    }
}

impl fmt::Display for ClockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClockKind {
    type Err = HardValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "real" => Ok(ClockKind::Real),
            "cpu" => Ok(ClockKind::Cpu),
            _ => Err(HardValidationError::InvalidFieldValue {
                field: "timer",
                value: s.to_string(),
                reason: "Timer must be one of: real, cpu".to_string(),
            }),
        }
    }
}

/// What the suite does when a variant fails during setup or timed work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log a skip notice, omit the variant's result and continue.
    #[default]
    Isolate,
    /// Abort the whole run on the first failure.
    FailFast,
}
