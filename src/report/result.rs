//! Top-level parse result and the SPM metadata block

use serde::{Deserialize, Serialize};

use super::diagnostic::Diagnostic;
use super::metrics::{BuildMetrics, BuildTiming};

/// Which dialect produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildFormat {
    Xcode,
    Swift,
    Spm,
    Unknown,
}

impl BuildFormat {
    /// Returns the string representation of the format
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildFormat::Xcode => "xcode",
            BuildFormat::Swift => "swift",
            BuildFormat::Spm => "spm",
            BuildFormat::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for BuildFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of the build described by a log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    Success,
    Failed,
    Unknown,
}

impl BuildStatus {
    /// Returns the string representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildStatus::Success => "success",
            BuildStatus::Failed => "failed",
            BuildStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a package dependency is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyKind {
    SourceControl,
    Binary,
    Registry,
}

impl DependencyKind {
    /// Returns the string representation of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyKind::SourceControl => "source-control",
            DependencyKind::Binary => "binary",
            DependencyKind::Registry => "registry",
        }
    }
}

/// One package dependency surfaced by SPM metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpmDependency {
    pub name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub kind: DependencyKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One product/target surfaced by `dump-package`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpmTarget {
    pub name: String,
    #[serde(rename = "type")]
    pub target_type: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Structured package metadata, present only for the SPM `dump-package`
/// sub-command. Closed struct; serializes as a plain JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpmInfo {
    pub command: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<SpmTarget>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<SpmDependency>>,
}

impl SpmInfo {
    /// Create an empty info block for a sub-command
    pub fn new(command: impl Into<String>, success: bool) -> Self {
        Self {
            command: command.into(),
            success,
            package_name: None,
            version: None,
            targets: None,
            dependencies: None,
        }
    }
}

/// The unified report every dialect parser produces.
///
/// Diagnostic order mirrors input line order and is part of the
/// contract. The severity counters in `metrics` are maintained through
/// [`ParsedBuildResult::record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedBuildResult {
    pub format: BuildFormat,
    pub status: BuildStatus,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
    #[serde(default)]
    pub metrics: BuildMetrics,
    #[serde(default)]
    pub timing: BuildTiming,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spm_info: Option<SpmInfo>,
}

impl ParsedBuildResult {
    /// Create an empty report for a dialect
    pub fn new(format: BuildFormat) -> Self {
        Self {
            format,
            status: BuildStatus::Unknown,
            diagnostics: Vec::new(),
            metrics: BuildMetrics::default(),
            timing: BuildTiming::default(),
            spm_info: None,
        }
    }

    /// The report for input no dialect recognizes
    pub fn unknown() -> Self {
        Self::new(BuildFormat::Unknown)
    }

    /// Append a diagnostic, keeping the severity counters in sync
    pub fn record(&mut self, diagnostic: Diagnostic) {
        self.metrics.record(diagnostic.severity);
        self.diagnostics.push(diagnostic);
    }

    /// Resolve an `unknown` status from the error count and force
    /// `failed` when any error-level diagnostic was recorded.
    pub fn finalize_status(&mut self) {
        if self.metrics.error_count > 0 {
            self.status = BuildStatus::Failed;
        } else if self.status == BuildStatus::Unknown {
            self.status = BuildStatus::Success;
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
