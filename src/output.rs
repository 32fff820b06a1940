//! Report rendering
//!
//! The five output formats over a parsed report, plus the
//! presentation-time severity filter. Machine formats (`json`,
//! `compact`) always serialize the full report; the filter only shapes
//! the human listings.

use crate::report::{Diagnostic, DiagnosticSeverity, ParsedBuildResult};

/// Rendering formats the CLI can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Summary,
    Compact,
    Minimal,
}

impl OutputFormat {
    /// Returns the string representation of the format
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Summary => "summary",
            OutputFormat::Compact => "compact",
            OutputFormat::Minimal => "minimal",
        }
    }
}

/// Error for unrecognized `--format` values
#[derive(Debug, thiserror::Error)]
#[error("unknown output format '{0}'; expected text, json, summary, or compact")]
pub struct FormatError(pub String);

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "summary" => Ok(OutputFormat::Summary),
            "compact" => Ok(OutputFormat::Compact),
            "minimal" => Ok(OutputFormat::Minimal),
            other => Err(FormatError(other.to_string())),
        }
    }
}

/// Presentation options for the human formats
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Include informational diagnostics in listings
    pub verbose: bool,
    /// Show only error-level diagnostics
    pub errors_only: bool,
    /// Show only warnings
    pub warnings_only: bool,
}

impl RenderOptions {
    fn keeps(&self, severity: DiagnosticSeverity) -> bool {
        if self.errors_only || self.warnings_only {
            return (self.errors_only && severity.is_failure())
                || (self.warnings_only && severity == DiagnosticSeverity::Warning);
        }
        if severity == DiagnosticSeverity::Info {
            self.verbose
        } else {
            true
        }
    }

    fn filtered<'a>(&self, report: &'a ParsedBuildResult) -> Vec<&'a Diagnostic> {
        report.diagnostics.iter().filter(|d| self.keeps(d.severity)).collect()
    }
}

/// Render a report in the requested format.
pub fn render(
    report: &ParsedBuildResult,
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(report, options)),
        OutputFormat::Json => report.to_json(),
        OutputFormat::Summary => Ok(render_summary(report, options)),
        OutputFormat::Compact => render_compact(report),
        OutputFormat::Minimal => Ok(render_minimal(report)),
    }
}

fn render_text(report: &ParsedBuildResult, options: &RenderOptions) -> String {
    let mut out = String::new();

    out.push_str("Build Report\n");
    out.push_str("============\n");
    out.push_str(&format!("Format:   {}\n", report.format));
    out.push_str(&format!("Status:   {}\n", report.status));
    if let Some(duration) = report.metrics.total_duration {
        out.push_str(&format!("Duration: {:.2}s\n", duration));
    }

    out.push_str("\nMetrics\n-------\n");
    out.push_str(&format!("Errors:   {}\n", report.metrics.error_count));
    out.push_str(&format!("Warnings: {}\n", report.metrics.warning_count));
    out.push_str(&format!("Targets:  {}\n", report.metrics.target_count));
    out.push_str(&format!("Files:    {}\n", report.metrics.compiled_files.len()));

    let diagnostics = options.filtered(report);
    if !diagnostics.is_empty() {
        out.push_str("\nDiagnostics\n-----------\n");
        for diagnostic in diagnostics {
            out.push_str(&diagnostic.to_human());
            out.push('\n');
        }
    }

    if !report.metrics.compiled_files.is_empty() {
        out.push_str("\nCompiled Files\n--------------\n");
        for file in &report.metrics.compiled_files {
            out.push_str(&format!("  {}\n", file));
        }
    }

    if let Some(info) = &report.spm_info {
        out.push_str("\nPackage\n-------\n");
        if let Some(name) = &info.package_name {
            out.push_str(&format!("Name: {}\n", name));
        }
        if let Some(version) = &info.version {
            out.push_str(&format!("Version: {}\n", version));
        }
        if let Some(targets) = &info.targets {
            out.push_str("Products:\n");
            for target in targets {
                out.push_str(&format!("  {} ({})\n", target.name, target.target_type));
            }
        }
        if let Some(dependencies) = &info.dependencies {
            out.push_str("Dependencies:\n");
            for dep in dependencies {
                out.push_str(&format!("  {} {} ({})\n", dep.name, dep.version, dep.kind.as_str()));
            }
        }
    }

    out
}

fn render_summary(report: &ParsedBuildResult, options: &RenderOptions) -> String {
    let mut out = String::new();
    out.push_str(&format!("format: {}\n", report.format));
    out.push_str(&format!("status: {}\n", report.status));
    out.push_str(&format!("errors: {}\n", report.metrics.error_count));
    out.push_str(&format!("warnings: {}\n", report.metrics.warning_count));
    out.push_str(&format!("files: {}\n", report.metrics.compiled_files.len()));
    out.push_str(&format!("targets: {}\n", report.metrics.target_count));
    if let Some(duration) = report.metrics.total_duration {
        out.push_str(&format!("duration: {}s\n", duration));
    }

    let diagnostics = options.filtered(report);
    if !diagnostics.is_empty() {
        out.push_str(&format!(
            "diagnostics (showing {} of {}):\n",
            diagnostics.len().min(10),
            diagnostics.len()
        ));
        for diagnostic in diagnostics.iter().take(10) {
            out.push_str(&format!("  {}\n", diagnostic.to_human()));
        }
    }
    out
}

fn render_compact(report: &ParsedBuildResult) -> Result<String, serde_json::Error> {
    let value = serde_json::json!({
        "format": report.format.as_str(),
        "status": report.status.as_str(),
        "errors": report.metrics.error_count,
        "warnings": report.metrics.warning_count,
        "files": report.metrics.compiled_files.len(),
        "duration": report.metrics.total_duration.unwrap_or(0.0),
    });
    serde_json::to_string(&value)
}

fn render_minimal(report: &ParsedBuildResult) -> String {
    format!(
        "{} | ERRORS: {} | WARNINGS: {} | FILES: {} | {}s",
        report.status.as_str().to_uppercase(),
        report.metrics.error_count,
        report.metrics.warning_count,
        report.metrics.compiled_files.len(),
        report.metrics.total_duration.unwrap_or(0.0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{BuildFormat, DiagnosticCategory};

    fn sample_report() -> ParsedBuildResult {
        let mut report = ParsedBuildResult::new(BuildFormat::Xcode);
        report.record(Diagnostic::new(
            DiagnosticSeverity::Error,
            DiagnosticCategory::Compilation,
            "cannot find type 'Foo' in scope",
        ));
        report.record(Diagnostic::new(
            DiagnosticSeverity::Warning,
            DiagnosticCategory::Compilation,
            "unused variable 'x'",
        ));
        report.record(Diagnostic::new(
            DiagnosticSeverity::Info,
            DiagnosticCategory::Build,
            "candidate here",
        ));
        report.metrics.add_compiled_file("Main.swift");
        report.metrics.total_duration = Some(10.5);
        report.finalize_status();
        report
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("summary".parse::<OutputFormat>().unwrap(), OutputFormat::Summary);
        assert_eq!("compact".parse::<OutputFormat>().unwrap(), OutputFormat::Compact);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_text_contains_sections() {
        let out = render(&sample_report(), OutputFormat::Text, &RenderOptions::default()).unwrap();
        assert!(out.contains("Build Report"));
        assert!(out.contains("Status:   failed"));
        assert!(out.contains("Errors:   1"));
        assert!(out.contains("cannot find type"));
        assert!(out.contains("Main.swift"));
    }

    #[test]
    fn test_text_hides_info_without_verbose() {
        let out = render(&sample_report(), OutputFormat::Text, &RenderOptions::default()).unwrap();
        assert!(!out.contains("candidate here"));

        let verbose = RenderOptions { verbose: true, ..Default::default() };
        let out = render(&sample_report(), OutputFormat::Text, &verbose).unwrap();
        assert!(out.contains("candidate here"));
    }

    #[test]
    fn test_errors_only_filter() {
        let options = RenderOptions { errors_only: true, ..Default::default() };
        let out = render(&sample_report(), OutputFormat::Text, &options).unwrap();
        assert!(out.contains("cannot find type"));
        assert!(!out.contains("unused variable"));
    }

    #[test]
    fn test_warnings_only_filter() {
        let options = RenderOptions { warnings_only: true, ..Default::default() };
        let out = render(&sample_report(), OutputFormat::Text, &options).unwrap();
        assert!(!out.contains("cannot find type"));
        assert!(out.contains("unused variable"));
    }

    #[test]
    fn test_both_filters_keep_both() {
        let options = RenderOptions { errors_only: true, warnings_only: true, ..Default::default() };
        let out = render(&sample_report(), OutputFormat::Text, &options).unwrap();
        assert!(out.contains("cannot find type"));
        assert!(out.contains("unused variable"));
    }

    #[test]
    fn test_json_roundtrips() {
        let report = sample_report();
        let out = render(&report, OutputFormat::Json, &RenderOptions::default()).unwrap();
        let parsed = ParsedBuildResult::from_json(&out).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_compact_shape() {
        let out = render(&sample_report(), OutputFormat::Compact, &RenderOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["format"], "xcode");
        assert_eq!(value["status"], "failed");
        assert_eq!(value["errors"], 1);
        assert_eq!(value["warnings"], 1);
        assert_eq!(value["files"], 1);
        assert!((value["duration"].as_f64().unwrap() - 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_minimal_line() {
        let out = render(&sample_report(), OutputFormat::Minimal, &RenderOptions::default()).unwrap();
        assert_eq!(out, "FAILED | ERRORS: 1 | WARNINGS: 1 | FILES: 1 | 10.5s");
    }

    #[test]
    fn test_minimal_defaults_duration_to_zero() {
        let report = ParsedBuildResult::unknown();
        let out = render(&report, OutputFormat::Minimal, &RenderOptions::default()).unwrap();
        assert_eq!(out, "UNKNOWN | ERRORS: 0 | WARNINGS: 0 | FILES: 0 | 0s");
    }

    #[test]
    fn test_summary_caps_at_ten_diagnostics() {
        let mut report = ParsedBuildResult::new(BuildFormat::Swift);
        for i in 0..15 {
            report.record(Diagnostic::new(
                DiagnosticSeverity::Warning,
                DiagnosticCategory::Compilation,
                format!("warning number {}", i),
            ));
        }
        report.finalize_status();

        let out = render(&report, OutputFormat::Summary, &RenderOptions::default()).unwrap();
        assert!(out.contains("diagnostics (showing 10 of 15):"));
        assert!(out.contains("warning number 9"));
        assert!(!out.contains("warning number 10"));
    }
}
