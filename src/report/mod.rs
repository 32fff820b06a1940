//! Unified build report model
//!
//! Value types shared by all dialect parsers: diagnostic records, metric
//! accumulators, timing, and the top-level report. Everything here is
//! produced by a single parse invocation and immutable afterwards.

mod diagnostic;
mod metrics;
mod result;

pub use diagnostic::{Diagnostic, DiagnosticCategory, DiagnosticSeverity};
pub use metrics::{BuildMetrics, BuildTiming};
pub use result::{
    BuildFormat, BuildStatus, DependencyKind, ParsedBuildResult, SpmDependency, SpmInfo, SpmTarget,
};
