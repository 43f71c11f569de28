// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Result sinks.
//!
//! The CSV sink writes the comparison table (`library,time`), one row per
//! result, without the repetition count. The JSON reporter writes the full
//! [`SuiteReport`].

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::metrics::{ResultSet, SuiteReport};

/// Header row of the CSV file.
pub const CSV_HEADER: [&str; 2] = ["library", "time"];

/// Errors that can occur while writing or reading results.
#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("Failed to write results: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed CSV at line {line}: {reason}")]
    MalformedCsv { line: usize, reason: String },
}

/// CSV sink for the comparison table.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render the CSV text for `results`.
    ///
    /// Durations use the shortest decimal form that parses back to the same
    /// `f64`, so output is deterministic and lossless.
    pub fn render(results: &ResultSet) -> String {
        let mut out = String::new();
        out.push_str(&CSV_HEADER.join(","));
        out.push('\n');
        for result in results {
            out.push_str(&escape_field(&result.name));
            out.push(',');
            out.push_str(&result.duration_secs.to_string());
            out.push('\n');
        }
        out
    }

    /// Write `results`, replacing any existing file.
    pub fn write(&self, results: &ResultSet) -> Result<(), ReporterError> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(Self::render(results).as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Read a file written by [`CsvSink::write`] back into `(name, seconds)` rows.
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<(String, f64)>, ReporterError> {
        let content = fs::read_to_string(path)?;
        let mut lines = content.lines().enumerate();

        let header = CSV_HEADER.join(",");
        match lines.next() {
            Some((_, line)) if line == header => {}
            Some((_, line)) => {
                return Err(ReporterError::MalformedCsv {
                    line: 1,
                    reason: format!("expected header '{}', found '{}'", header, line),
                })
            }
            None => {
                return Err(ReporterError::MalformedCsv {
                    line: 1,
                    reason: "empty file".to_string(),
                })
            }
        }

        let mut rows = Vec::new();
        for (index, line) in lines {
            if line.is_empty() {
                continue;
            }
            let line_no = index + 1;
            let (name, time) = line.rsplit_once(',').ok_or_else(|| ReporterError::MalformedCsv {
                line: line_no,
                reason: "missing ',' separator".to_string(),
            })?;
            let time: f64 = time.parse().map_err(|e| ReporterError::MalformedCsv {
                line: line_no,
                reason: format!("bad time '{}': {}", time, e),
            })?;
            rows.push((unescape_field(name, line_no)?, time));
        }
        Ok(rows)
    }
}

/// Quote a field if it contains a separator, quote or line break.
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn unescape_field(field: &str, line: usize) -> Result<String, ReporterError> {
    match field.strip_prefix('"') {
        None => Ok(field.to_string()),
        Some(rest) => rest
            .strip_suffix('"')
            .map(|inner| inner.replace("\"\"", "\""))
            .ok_or_else(|| ReporterError::MalformedCsv {
                line,
                reason: "unterminated quoted field".to_string(),
            }),
    }
}

/// JSON reporter for the full suite report.
pub struct JsonReporter {
    path: PathBuf,
}

impl JsonReporter {
    /// Create a reporter writing to `path`, creating parent directories.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ReporterError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    /// Save the report. Returns the path written.
    pub fn save(&self, report: &SuiteReport) -> Result<PathBuf, ReporterError> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, report)?;
        writer.flush()?;
        Ok(self.path.clone())
    }

    /// Load a report written by [`JsonReporter::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<SuiteReport, ReporterError> {
        let file = File::open(path)?;
        let report = serde_json::from_reader(file)?;
        Ok(report)
    }
}
