//! Dialect detection and dispatch
//!
//! Each dialect implements the [`LogParser`] capability pair
//! (`can_parse`, `parse`). The dispatch probes the parsers in fixed
//! priority order SPM → Swift/SPM-build → Xcode and picks the first
//! match; unmatched non-empty input falls through to the Xcode parser,
//! the permissive default for command-line `xcodebuild` captures.

mod line;
mod spm;
mod swift;
mod xcode;

pub use line::{classify_category, parse_diagnostic_line};
pub use spm::SpmMetadataParser;
pub use swift::SwiftBuildParser;
pub use xcode::XcodeLogParser;

use crate::report::{
    BuildFormat, BuildStatus, Diagnostic, DiagnosticCategory, DiagnosticSeverity,
    ParsedBuildResult,
};

/// Capability set every dialect parser provides.
///
/// `can_parse` must be a pure predicate over the input; `parse` must be
/// a pure function of the input with no shared mutable state, so
/// independent calls are safe from multiple threads.
pub trait LogParser {
    /// The dialect this parser reports
    fn format(&self) -> BuildFormat;

    /// Whether the input carries this dialect's markers
    fn can_parse(&self, input: &str) -> bool;

    /// Reduce a fully-buffered log to a report
    fn parse(&self, input: &str) -> ParsedBuildResult;
}

/// Parsers in detection priority order
const PARSERS: [&dyn LogParser; 3] = [&SpmMetadataParser, &SwiftBuildParser, &XcodeLogParser];

/// Classify an input blob without parsing it.
///
/// Empty or whitespace-only input matches no dialect.
pub fn detect_format(input: &str) -> BuildFormat {
    if input.trim().is_empty() {
        return BuildFormat::Unknown;
    }
    for parser in PARSERS {
        if parser.can_parse(input) {
            return parser.format();
        }
    }
    BuildFormat::Unknown
}

/// Parse a fully-buffered build log into a report.
pub fn parse(input: &str) -> ParsedBuildResult {
    if input.trim().is_empty() {
        return ParsedBuildResult::unknown();
    }
    for parser in PARSERS {
        if parser.can_parse(input) {
            return parser.parse(input);
        }
    }
    XcodeLogParser.parse(input)
}

/// Parse raw bytes, surfacing invalid UTF-8 as a failed report rather
/// than an error.
pub fn parse_bytes(input: &[u8]) -> ParsedBuildResult {
    match std::str::from_utf8(input) {
        Ok(text) => parse(text),
        Err(_) => {
            let mut report = ParsedBuildResult::unknown();
            report.record(Diagnostic::new(
                DiagnosticSeverity::Error,
                DiagnosticCategory::Build,
                "Invalid UTF-8",
            ));
            report.status = BuildStatus::Failed;
            report
        }
    }
}

/// Parse with a forced dialect, bypassing detection.
pub fn parse_with_format(input: &str, format: BuildFormat) -> ParsedBuildResult {
    match format {
        BuildFormat::Spm => SpmMetadataParser.parse(input),
        BuildFormat::Swift => SwiftBuildParser.parse(input),
        BuildFormat::Xcode => XcodeLogParser.parse(input),
        BuildFormat::Unknown => parse(input),
    }
}

/// Last whitespace-separated token ending in `.swift`, reduced to its
/// basename. Shared by the Xcode and Swift compiled-file scans.
pub(crate) fn swift_file_basename(line: &str) -> Option<String> {
    line.split_whitespace()
        .filter(|token| token.ends_with(".swift"))
        .next_back()
        .map(|token| token.rsplit('/').next().unwrap_or(token).to_string())
}
