//! clientbench Core Library
//!
//! Validated benchmark parameters and layered configuration loading for the
//! clientbench HTTP client comparison harness.

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{BenchConfig, BenchParameters, ConfigLoader, RawConfig};
pub use error::{CoreError, CoreResult, HardValidationError};
pub use types::{ClockKind, FailurePolicy, Repetitions, TargetUrl, MIN_REPETITIONS_EXCLUSIVE};
