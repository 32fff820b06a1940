//! swift build / swift test log parsing
//!
//! Handles the SwiftPM build surface: `Compiling`/`Linking` progress
//! lines, `Build complete!` markers, and bare compiler diagnostics as
//! emitted by `swiftc` outside of Xcode.

use regex_lite::Regex;

use crate::report::{
    BuildFormat, BuildStatus, DiagnosticCategory, DiagnosticSeverity, ParsedBuildResult,
};

use super::line::parse_diagnostic_line;
use super::xcode::XcodeLogParser;
use super::{swift_file_basename, LogParser};

/// Markers matched case-sensitively against the whole input
const SWIFT_MARKERS: &[&str] = &[
    "Swift Compiler",
    "swift build",
    "swift test",
    "Apple Swift version",
    "Building for",
    "Compiling Swift Module",
    "swift-package",
    "Fetching https://",
    "Cloning https://",
    "Resolving https://",
    "SwiftPM",
    ".build/checkouts",
    "Compiling ",
    "Linking ",
];

pub struct SwiftBuildParser;

impl LogParser for SwiftBuildParser {
    fn format(&self) -> BuildFormat {
        BuildFormat::Swift
    }

    fn can_parse(&self, input: &str) -> bool {
        if SWIFT_MARKERS.iter().any(|marker| input.contains(marker)) {
            return true;
        }
        if input.to_ascii_lowercase().contains("build complete!") {
            return true;
        }
        // Bare compiler diagnostics count as Swift output only when the
        // log is not an xcodebuild capture.
        (input.contains(": error:") || input.contains(": warning:"))
            && !XcodeLogParser.can_parse(input)
    }

    fn parse(&self, input: &str) -> ParsedBuildResult {
        let mut report = ParsedBuildResult::new(BuildFormat::Swift);

        let duration_patterns = [
            Regex::new(r"\(([0-9.]+)s\)").unwrap(),
            Regex::new(r"\[([0-9.]+)s\]").unwrap(),
            Regex::new(r"completed.*?([0-9.]+)s").unwrap(),
            Regex::new(r"([0-9]+\.[0-9]+)s(\s|$)").unwrap(),
            Regex::new(r"([0-9]+)s(\s|$)").unwrap(),
        ];

        let mut max_duration = 0.0f64;
        let mut link_targets: Vec<String> = Vec::new();

        for (index, raw) in input.lines().enumerate() {
            let line = raw.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            let trimmed = line.trim();
            let lower = line.to_ascii_lowercase();
            let lower_trimmed = trimmed.to_ascii_lowercase();

            // First status marker wins; the error-count override at the
            // end can still flip success to failed.
            if report.status == BuildStatus::Unknown {
                if lower.contains("build failed") {
                    report.status = BuildStatus::Failed;
                } else if lower.contains("build complete") || lower.contains("build succeeded") {
                    report.status = BuildStatus::Success;
                }
            }

            let severity = if lower.contains(": error:") || lower_trimmed.starts_with("error:") {
                Some(DiagnosticSeverity::Error)
            } else if lower.contains(": warning:") || lower_trimmed.starts_with("warning:") {
                Some(DiagnosticSeverity::Warning)
            } else if lower.contains(": note:") || lower_trimmed.starts_with("note:") {
                Some(DiagnosticSeverity::Info)
            } else {
                None
            };
            if let Some(severity) = severity {
                let mut diagnostic =
                    parse_diagnostic_line(line, severity, DiagnosticCategory::Compilation);
                if diagnostic.line_number.is_none() {
                    // In-stream position, not a source-file line.
                    diagnostic.line_number = Some((index + 1) as u32);
                }
                report.record(diagnostic);
            }

            if trimmed.starts_with("Compiling") && trimmed.contains(".swift") {
                if let Some(name) = swift_file_basename(trimmed) {
                    report.metrics.add_compiled_file(name);
                }
            }

            if let Some(rest) = trimmed.strip_prefix("Linking ") {
                if let Some(target) = rest.split_whitespace().next() {
                    if !link_targets.iter().any(|t| t == target) {
                        link_targets.push(target.to_string());
                    }
                }
            }

            for pattern in &duration_patterns {
                if let Some(caps) = pattern.captures(line) {
                    if let Ok(seconds) = caps[1].parse::<f64>() {
                        max_duration = max_duration.max(seconds);
                        break;
                    }
                }
            }
        }

        report.metrics.target_count = link_targets.len() as u32;
        report.timing.total_duration = max_duration;
        if max_duration > 0.0 {
            report.metrics.total_duration = Some(max_duration);
        }
        report.finalize_status();
        report
    }
}
