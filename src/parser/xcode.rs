//! xcodebuild log parsing
//!
//! Handles the output of `xcodebuild` invocations: build phase banners,
//! `** BUILD SUCCEEDED/FAILED **` status lines, per-file compile steps,
//! and the `Compiling`/`CompileSwift` family of lines.

use chrono::Utc;
use regex_lite::Regex;

use crate::report::{
    BuildFormat, BuildStatus, DiagnosticCategory, DiagnosticSeverity, ParsedBuildResult,
};

use super::line::parse_diagnostic_line;
use super::{swift_file_basename, LogParser};

/// Markers matched case-insensitively against the whole input
const XCODE_MARKERS: &[&str] = &[
    "xcodebuild",
    "build succeeded",
    "build failed",
    "** build",
    "=== build target",
    "build settings from",
    "compileswift",
    "swiftcompile",
    "codesign",
    "processinfoplistfile",
];

pub struct XcodeLogParser;

impl LogParser for XcodeLogParser {
    fn format(&self) -> BuildFormat {
        BuildFormat::Xcode
    }

    fn can_parse(&self, input: &str) -> bool {
        let lower = input.to_ascii_lowercase();
        // `Ld ` stays case-sensitive: lowercasing it would collide with
        // ordinary words ending in "ld ".
        XCODE_MARKERS.iter().any(|marker| lower.contains(marker)) || input.contains("Ld ")
    }

    fn parse(&self, input: &str) -> ParsedBuildResult {
        let mut report = ParsedBuildResult::new(BuildFormat::Xcode);

        // Probed in order; the first explicit duration in the log wins.
        let duration_patterns = [
            Regex::new(r"completed in ([0-9.]+)s(\s|$)").unwrap(),
            Regex::new(r"completed in ([0-9.]+) second").unwrap(),
            Regex::new(r"\(([0-9.]+) seconds?\)").unwrap(),
            Regex::new(r"\(([0-9.]+)s\)").unwrap(),
        ];

        let mut start_seen = false;

        for raw in input.lines() {
            let line = raw.trim_end_matches('\r');
            let lower = line.to_ascii_lowercase();

            // Start-of-build sentinel. The wall clock only backs up a
            // log that never states its duration.
            if !start_seen
                && (line.contains("BUILD START")
                    || line.starts_with("Build settings")
                    || line.starts_with("Build target")
                    || line.contains("xcodebuild"))
            {
                report.timing.start_time = Some(Utc::now());
                start_seen = true;
            }

            // Duration before status, so an explicit duration is never
            // overwritten by the endpoint-derived one.
            if report.timing.total_duration == 0.0 {
                for pattern in &duration_patterns {
                    if let Some(caps) = pattern.captures(line) {
                        if let Ok(seconds) = caps[1].parse::<f64>() {
                            report.timing.total_duration = seconds;
                            break;
                        }
                    }
                }
            }

            if report.status == BuildStatus::Unknown {
                let failed = lower.contains("build failed") || line == "** BUILD FAILED **";
                let succeeded = lower.contains("build succeeded") || line == "** BUILD SUCCEEDED **";
                if failed || succeeded {
                    report.status = if failed { BuildStatus::Failed } else { BuildStatus::Success };
                    let end = Utc::now();
                    report.timing.end_time = Some(end);
                    if report.timing.total_duration == 0.0 {
                        if let Some(start) = report.timing.start_time {
                            let elapsed = (end - start).num_milliseconds().max(0) as f64 / 1000.0;
                            report.timing.total_duration = elapsed;
                        }
                    }
                }
            }

            if lower.contains(": error:") || lower.contains(" error: ") {
                report.record(parse_diagnostic_line(
                    line,
                    DiagnosticSeverity::Error,
                    DiagnosticCategory::Build,
                ));
            } else if lower.contains(": warning:") || lower.contains(" warning: ") {
                report.record(parse_diagnostic_line(
                    line,
                    DiagnosticSeverity::Warning,
                    DiagnosticCategory::Build,
                ));
            } else if lower.contains(": note:") || lower.contains(" note: ") {
                report.record(parse_diagnostic_line(
                    line,
                    DiagnosticSeverity::Info,
                    DiagnosticCategory::Build,
                ));
            }

            if is_compile_line(line) {
                if let Some(name) = swift_file_basename(strip_target_suffix(line)) {
                    report.metrics.add_compiled_file(name);
                }
            }

            if line.contains("=== BUILD TARGET") || line.contains("Build target") {
                report.metrics.target_count += 1;
            }
        }

        if report.timing.total_duration > 0.0 {
            report.metrics.total_duration = Some(report.timing.total_duration);
        }
        report.finalize_status();
        report
    }
}

/// Drop the trailing ` (in target 'X' from project 'Y')` annotation
fn strip_target_suffix(line: &str) -> &str {
    match line.find(" (in target") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Whether a line names a compiled Swift file
fn is_compile_line(line: &str) -> bool {
    if line.contains("Compiling") && line.contains(".swift") {
        return true;
    }
    let stripped = strip_target_suffix(line);
    if (stripped.contains("CompileSwift") || stripped.contains("SwiftCompile"))
        && stripped.contains(".swift")
    {
        return true;
    }
    stripped.trim_end().ends_with(".swift") && stripped.contains('/')
}
