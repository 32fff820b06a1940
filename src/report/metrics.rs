//! Metric accumulators and build timing

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::diagnostic::DiagnosticSeverity;

/// Aggregate counters for one parsed build log.
///
/// The three severity counters always equal the number of recorded
/// diagnostics at the corresponding severities; `error_count` also
/// absorbs the reserved `critical` level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildMetrics {
    pub error_count: u32,
    pub warning_count: u32,
    pub info_count: u32,

    /// Basenames of compiled files, first-occurrence order, no duplicates
    #[serde(default)]
    pub compiled_files: Vec<String>,

    pub target_count: u32,

    /// Total build duration in seconds, when the log carried one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<f64>,
}

impl BuildMetrics {
    /// Bump the counter matching a diagnostic severity
    pub fn record(&mut self, severity: DiagnosticSeverity) {
        match severity {
            DiagnosticSeverity::Error | DiagnosticSeverity::Critical => self.error_count += 1,
            DiagnosticSeverity::Warning => self.warning_count += 1,
            DiagnosticSeverity::Info => self.info_count += 1,
        }
    }

    /// Append a compiled file basename, keeping first-occurrence order
    pub fn add_compiled_file(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.compiled_files.iter().any(|f| f == &name) {
            self.compiled_files.push(name);
        }
    }
}

/// Wall-clock endpoints and total duration for one build.
///
/// The endpoints are only stamped when the log itself gives no explicit
/// duration; `end_time >= start_time` whenever both are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildTiming {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,

    /// Duration in seconds; 0.0 when the log carried no timing cue
    pub total_duration: f64,
}
