// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Error types for running variants and the suite.

use clientbench_core::ClockKind;
use thiserror::Error;

use crate::reporter::ReporterError;
use crate::suite::SuiteOutcome;

/// Errors raised by an HTTP client under test.
///
/// The harness does not interpret these; it only records in which phase
/// (setup or timed work) they happened.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("reqwest: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("hyper client: {0}")]
    HyperClient(#[from] hyper_util::client::legacy::Error),

    #[error("hyper body: {0}")]
    HyperBody(#[from] hyper::Error),

    #[error("invalid URI: {0}")]
    InvalidUri(#[from] http::uri::InvalidUri),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unsupported scheme '{scheme}' for this client (plain http only)")]
    UnsupportedScheme { scheme: String },

    #[error("URL has no host: {url}")]
    MissingHost { url: String },

    #[error("prepared request cannot be cloned")]
    RequestNotCloneable,

    #[error("async runtime failed to start: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that stop a variant (and, under fail-fast, the whole run).
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Variant '{variant}' unavailable: setup failed - {source}")]
    VariantUnavailable {
        variant: String,
        #[source]
        source: ClientError,
    },

    #[error("Variant '{variant}' failed on iteration {iteration}: {source}")]
    WorkFailed {
        variant: String,
        iteration: u64,
        #[source]
        source: ClientError,
    },

    #[error("Failed to read {clock} clock: {source}")]
    Clock {
        clock: ClockKind,
        #[source]
        source: nix::errno::Errno,
    },

    /// Every variant ran but the CSV could not be written. The finished
    /// outcome rides along so it can still be reported.
    #[error("Result sink failed: {source}")]
    Sink {
        #[source]
        source: ReporterError,
        outcome: Box<SuiteOutcome>,
    },
}

impl RunError {
    /// Name of the variant this error belongs to, if any.
    pub fn variant(&self) -> Option<&str> {
        match self {
            RunError::VariantUnavailable { variant, .. } | RunError::WorkFailed { variant, .. } => {
                Some(variant)
            }
            RunError::Clock { .. } | RunError::Sink { .. } => None,
        }
    }
}
