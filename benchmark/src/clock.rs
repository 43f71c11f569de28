// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Clock sources for the timed loop.
//!
//! `real` reads the monotonic wall clock, `cpu` reads the CPU time consumed by
//! the whole process. Both go through `clock_gettime` so that the two kinds
//! share one code path and one resolution.

use std::time::Duration;

use clientbench_core::ClockKind;
use nix::time::{clock_gettime, ClockId};

use crate::error::RunError;

/// A clock resolved once from a [`ClockKind`].
#[derive(Debug, Clone, Copy)]
pub struct TimeSource {
    kind: ClockKind,
    clock_id: ClockId,
}

impl TimeSource {
    pub fn new(kind: ClockKind) -> Self {
        let clock_id = match kind {
            ClockKind::Real => ClockId::CLOCK_MONOTONIC,
            ClockKind::Cpu => ClockId::CLOCK_PROCESS_CPUTIME_ID,
        };
        Self { kind, clock_id }
    }

    pub fn kind(&self) -> ClockKind {
        self.kind
    }

    /// Current reading. Only differences between two readings are meaningful.
    pub fn now(&self) -> Result<Duration, RunError> {
        let ts = clock_gettime(self.clock_id).map_err(|source| RunError::Clock {
            clock: self.kind,
            source,
        })?;
        Ok(Duration::from(ts))
    }
}

impl From<ClockKind> for TimeSource {
    fn from(kind: ClockKind) -> Self {
        Self::new(kind)
    }
}
