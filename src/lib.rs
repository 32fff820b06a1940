//! swift-buildlog - structured reports from Swift and Xcode build output
//!
//! This crate reduces raw textual output from the Swift and Xcode
//! toolchains (xcodebuild logs, `swift build`/`swift test` output, and
//! Swift Package Manager metadata) to one uniform, machine-readable
//! build report. Parsing is pure: a fully-buffered input string in, a
//! [`ParsedBuildResult`] out, no I/O and no shared state.

pub mod output;
pub mod parser;
pub mod report;

pub use output::{render, FormatError, OutputFormat, RenderOptions};
pub use parser::{
    detect_format, parse, parse_bytes, parse_with_format, LogParser, SpmMetadataParser,
    SwiftBuildParser, XcodeLogParser,
};
pub use report::{
    BuildFormat, BuildMetrics, BuildStatus, BuildTiming, DependencyKind, Diagnostic,
    DiagnosticCategory, DiagnosticSeverity, ParsedBuildResult, SpmDependency, SpmInfo, SpmTarget,
};
