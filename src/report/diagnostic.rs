//! Diagnostic records extracted from build logs

use serde::{Deserialize, Serialize};

/// Severity of a single diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// Informational output (notes, progress lines)
    Info,
    /// Compiler or tool warning
    Warning,
    /// Compiler or tool error
    Error,
    /// Reserved level. No parser produces it today; consumers count it
    /// alongside `Error` when deriving build status.
    Critical,
}

impl DiagnosticSeverity {
    /// Returns the string representation of the severity
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Info => "info",
            DiagnosticSeverity::Warning => "warning",
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Critical => "critical",
        }
    }

    /// Whether this severity forces a failed build status
    pub fn is_failure(&self) -> bool {
        matches!(self, DiagnosticSeverity::Error | DiagnosticSeverity::Critical)
    }
}

impl std::fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which part of the build pipeline a diagnostic belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    /// General build-system output (xcodebuild phases, SPM metadata)
    Build,
    /// Source compilation
    Compilation,
    /// Linker stage
    Linking,
    /// Package resolution and dependency handling
    Dependency,
    /// Anything that fits none of the above
    Other,
}

impl DiagnosticCategory {
    /// Returns the string representation of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCategory::Build => "build",
            DiagnosticCategory::Compilation => "compilation",
            DiagnosticCategory::Linking => "linking",
            DiagnosticCategory::Dependency => "dependency",
            DiagnosticCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single error/warning/note pulled out of a log.
///
/// `message` never carries the leading severity label; when `location`
/// is present it is the exact substring that preceded the severity
/// marker on the source line. `line_number` and `column` are 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub category: DiagnosticCategory,
    pub message: String,

    /// Raw location text preceding the severity marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// File path portion of `location`, up to the first positional colon
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl Diagnostic {
    /// Create a location-less diagnostic
    pub fn new(
        severity: DiagnosticSeverity,
        category: DiagnosticCategory,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            message: message.into(),
            location: None,
            file_path: None,
            line_number: None,
            column: None,
        }
    }

    /// Short single-line rendering for human output
    pub fn to_human(&self) -> String {
        match (&self.file_path, self.line_number, self.column) {
            (Some(file), Some(line), Some(col)) => {
                format!("[{}] {}:{}:{}: {}", self.severity, file, line, col, self.message)
            }
            (Some(file), Some(line), None) => {
                format!("[{}] {}:{}: {}", self.severity, file, line, self.message)
            }
            (Some(file), None, _) => format!("[{}] {}: {}", self.severity, file, self.message),
            _ => format!("[{}] {}", self.severity, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_serialization() {
        assert_eq!(serde_json::to_string(&DiagnosticSeverity::Info).unwrap(), r#""info""#);
        assert_eq!(serde_json::to_string(&DiagnosticSeverity::Warning).unwrap(), r#""warning""#);
        assert_eq!(serde_json::to_string(&DiagnosticSeverity::Error).unwrap(), r#""error""#);
        assert_eq!(serde_json::to_string(&DiagnosticSeverity::Critical).unwrap(), r#""critical""#);
    }

    #[test]
    fn test_severity_is_failure() {
        assert!(!DiagnosticSeverity::Info.is_failure());
        assert!(!DiagnosticSeverity::Warning.is_failure());
        assert!(DiagnosticSeverity::Error.is_failure());
        assert!(DiagnosticSeverity::Critical.is_failure());
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(serde_json::to_string(&DiagnosticCategory::Build).unwrap(), r#""build""#);
        assert_eq!(
            serde_json::to_string(&DiagnosticCategory::Dependency).unwrap(),
            r#""dependency""#
        );
    }

    #[test]
    fn test_optional_fields_skipped_in_json() {
        let diag = Diagnostic::new(
            DiagnosticSeverity::Error,
            DiagnosticCategory::Compilation,
            "cannot find type 'Foo' in scope",
        );
        let json = serde_json::to_string(&diag).unwrap();
        assert!(!json.contains("location"));
        assert!(!json.contains("file_path"));
        assert!(!json.contains("line_number"));
        assert!(!json.contains("column"));
    }

    #[test]
    fn test_roundtrip_with_location() {
        let mut diag = Diagnostic::new(
            DiagnosticSeverity::Warning,
            DiagnosticCategory::Compilation,
            "unused variable 'x'",
        );
        diag.location = Some("/path/File.swift:4:9".to_string());
        diag.file_path = Some("/path/File.swift".to_string());
        diag.line_number = Some(4);
        diag.column = Some(9);

        let json = serde_json::to_string(&diag).unwrap();
        let parsed: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, diag);
    }

    #[test]
    fn test_to_human() {
        let mut diag = Diagnostic::new(
            DiagnosticSeverity::Error,
            DiagnosticCategory::Compilation,
            "boom",
        );
        assert_eq!(diag.to_human(), "[error] boom");

        diag.file_path = Some("main.swift".to_string());
        diag.line_number = Some(3);
        assert_eq!(diag.to_human(), "[error] main.swift:3: boom");

        diag.column = Some(7);
        assert_eq!(diag.to_human(), "[error] main.swift:3:7: boom");
    }
}
