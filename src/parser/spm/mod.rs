//! Swift Package Manager metadata parsing
//!
//! Covers the textual output of the `swift package` sub-commands:
//! `dump-package` (JSON), `show-dependencies` (glyph tree),
//! `resolve`/`update` (progress log), and `describe`. Each sub-command
//! has its own textual shape; the structured-data branch lives in
//! [`dump`], the tree parser in [`dependencies`].

mod dependencies;
mod dump;

use crate::report::{
    BuildFormat, BuildStatus, Diagnostic, DiagnosticCategory, DiagnosticSeverity,
    ParsedBuildResult,
};

use super::line::parse_diagnostic_line;
use super::LogParser;

/// Glyphs drawn by the SPM dependency-tree printer
pub(crate) const TREE_GLYPHS: &[&str] = &["├─", "└─", "│"];

/// Which `swift package` sub-command produced the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpmCommand {
    DumpPackage,
    ShowDependencies,
    Resolve,
    Describe,
    Update,
    Unknown,
}

/// Classify the sub-command from the raw input, first match wins.
fn classify_command(input: &str) -> SpmCommand {
    let lower = input.to_lowercase();
    if lower.contains("\"name\"") || input.trim_start().starts_with('{') {
        return SpmCommand::DumpPackage;
    }
    if TREE_GLYPHS.iter().any(|glyph| input.contains(glyph)) || lower.contains("dependencies:") {
        return SpmCommand::ShowDependencies;
    }
    if ["resolving", "fetching", "resolved", "updating"].iter().any(|m| lower.contains(m)) {
        return SpmCommand::Resolve;
    }
    if lower.contains("package name:") || lower.contains("package version:") {
        return SpmCommand::Describe;
    }
    if ["updating", "updated", "checking out"].iter().any(|m| lower.contains(m)) {
        return SpmCommand::Update;
    }
    SpmCommand::Unknown
}

pub struct SpmMetadataParser;

impl LogParser for SpmMetadataParser {
    fn format(&self) -> BuildFormat {
        BuildFormat::Spm
    }

    fn can_parse(&self, input: &str) -> bool {
        let lower = input.to_lowercase();
        let json_shaped = input.trim_start().starts_with('{')
            && lower.contains("\"name\"")
            && (lower.contains("\"targets\"")
                || lower.contains("\"products\"")
                || lower.contains("\"dependencies\""));

        json_shaped
            || TREE_GLYPHS.iter().any(|glyph| input.contains(glyph))
            || lower.contains("dependencies:")
            || ["resolving", "fetching", "resolved", "updating", "cloning"]
                .iter()
                .any(|m| lower.contains(m))
            || lower.contains("package name:")
            || lower.contains("package version:")
    }

    fn parse(&self, input: &str) -> ParsedBuildResult {
        match classify_command(input) {
            SpmCommand::DumpPackage => dump::parse_dump_package(input),
            SpmCommand::ShowDependencies => dependencies::parse_show_dependencies(input),
            SpmCommand::Resolve | SpmCommand::Update => parse_resolution_log(input),
            SpmCommand::Describe => parse_describe(input),
            // Unclassifiable SPM chatter: unknown status, empty metrics.
            SpmCommand::Unknown => ParsedBuildResult::new(BuildFormat::Spm),
        }
    }
}

/// Parse `swift package resolve` / `update` progress output.
fn parse_resolution_log(input: &str) -> ParsedBuildResult {
    let mut report = ParsedBuildResult::new(BuildFormat::Spm);

    for raw in input.lines() {
        let line = raw.trim_end_matches('\r').trim();
        if line.is_empty() {
            continue;
        }
        let lower = line.to_lowercase();

        if lower.contains("error:") || lower.contains("failed") {
            report.record(parse_diagnostic_line(
                line,
                DiagnosticSeverity::Error,
                DiagnosticCategory::Dependency,
            ));
        } else if lower.contains("warning:") {
            report.record(parse_diagnostic_line(
                line,
                DiagnosticSeverity::Warning,
                DiagnosticCategory::Dependency,
            ));
        } else if ["resolving", "cloning", "fetching", "completed"]
            .iter()
            .any(|m| lower.contains(m))
        {
            report.record(Diagnostic::new(
                DiagnosticSeverity::Info,
                DiagnosticCategory::Dependency,
                line,
            ));
        }
    }

    report.status = if report.metrics.error_count > 0 {
        BuildStatus::Failed
    } else {
        BuildStatus::Success
    };
    report
}

/// Parse `swift package describe` output.
fn parse_describe(input: &str) -> ParsedBuildResult {
    let mut report = ParsedBuildResult::new(BuildFormat::Spm);

    for raw in input.lines() {
        let line = raw.trim_end_matches('\r').trim();
        if line.is_empty() {
            continue;
        }
        let lower = line.to_lowercase();

        if lower.contains("error:") {
            report.record(parse_diagnostic_line(
                line,
                DiagnosticSeverity::Error,
                DiagnosticCategory::Build,
            ));
        } else if lower.contains("warning:") {
            report.record(parse_diagnostic_line(
                line,
                DiagnosticSeverity::Warning,
                DiagnosticCategory::Build,
            ));
        }
    }

    report.status = if report.metrics.error_count > 0 {
        BuildStatus::Failed
    } else {
        BuildStatus::Success
    };
    report
}
