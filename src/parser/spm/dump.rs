//! `swift package dump-package` structured-data branch
//!
//! Decodes the manifest dump as a JSON tree and tolerates absent fields
//! everywhere below the top level; the only fatal case is a top-level
//! decode failure, which becomes a single error diagnostic.

use serde_json::Value;

use crate::report::{
    BuildFormat, BuildStatus, DependencyKind, Diagnostic, DiagnosticCategory, DiagnosticSeverity,
    ParsedBuildResult, SpmDependency, SpmInfo, SpmTarget,
};

use super::super::line::classify_category;

pub(super) fn parse_dump_package(input: &str) -> ParsedBuildResult {
    let mut report = ParsedBuildResult::new(BuildFormat::Spm);

    let value: Value = match serde_json::from_str(input) {
        Ok(value) => value,
        Err(err) => {
            let message = format!("Failed to parse Package.swift JSON: {}", err);
            let category = classify_category(&message, DiagnosticCategory::Build);
            report.record(Diagnostic::new(DiagnosticSeverity::Error, category, message));
            report.status = BuildStatus::Failed;
            return report;
        }
    };

    let mut info = SpmInfo::new("dump-package", true);
    info.package_name = value.get("name").and_then(Value::as_str).map(str::to_string);

    if let Some(products) = value.get("products").and_then(Value::as_array) {
        let targets: Vec<SpmTarget> = products
            .iter()
            .filter_map(|product| {
                let name = product.get("name")?.as_str()?.to_string();
                let target_type = product
                    .get("type")
                    .and_then(|t| t.get("name"))
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string();
                Some(SpmTarget { name, target_type, dependencies: Vec::new() })
            })
            .collect();
        info.targets = Some(targets);
    }

    if let Some(dependencies) = value.get("dependencies").and_then(Value::as_array) {
        let parsed: Vec<SpmDependency> =
            dependencies.iter().filter_map(parse_dependency).collect();
        info.dependencies = Some(parsed);
    }

    report.spm_info = Some(info);
    report.status = BuildStatus::Success;
    report
}

/// Parse one element of the manifest's `dependencies` array.
///
/// The modern layout nests everything under `sourceControl[0]`; the
/// legacy layout keeps `url`/`requirement` (or `path`) at the top
/// level and is consulted only when the modern one yields no name.
fn parse_dependency(value: &Value) -> Option<SpmDependency> {
    if let Some(source_control) = value.get("sourceControl").and_then(|v| v.get(0)) {
        if let Some(identity) = source_control.get("identity").and_then(Value::as_str) {
            let url = source_control
                .get("location")
                .and_then(|location| location.get("remote"))
                .and_then(|remote| remote.get(0))
                .and_then(remote_url)
                .map(str::to_string);
            let version = source_control
                .get("requirement")
                .map(extract_requirement_version)
                .unwrap_or_else(|| "unspecified".to_string());
            let kind = kind_from_url(url.as_deref());
            return Some(SpmDependency { name: identity.to_string(), version, kind, url });
        }
    }

    if let Some(url) = value.get("url").and_then(Value::as_str) {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| name_from_url(url));
        let version = value
            .get("requirement")
            .map(extract_requirement_version)
            .unwrap_or_else(|| "unspecified".to_string());
        let kind = kind_from_url(Some(url));
        return Some(SpmDependency { name, version, kind, url: Some(url.to_string()) });
    }

    if let Some(path) = value.get("path").and_then(Value::as_str) {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| {
                path.trim_end_matches('/').rsplit('/').next().unwrap_or(path).to_string()
            });
        return Some(SpmDependency {
            name,
            version: "local".to_string(),
            kind: DependencyKind::SourceControl,
            url: None,
        });
    }

    None
}

/// A `remote` entry is either `{"urlString": "..."}` or a bare string,
/// depending on the toolchain that produced the dump.
fn remote_url(remote: &Value) -> Option<&str> {
    remote.get("urlString").and_then(Value::as_str).or_else(|| remote.as_str())
}

/// Render a `requirement` mapping as a version string.
pub(super) fn extract_requirement_version(requirement: &Value) -> String {
    if let Some(range) = requirement.get("range").and_then(Value::as_array) {
        if let Some(first) = range.first() {
            if let (Some(lower), Some(upper)) = (
                first.get("lowerBound").and_then(Value::as_str),
                first.get("upperBound").and_then(Value::as_str),
            ) {
                return format!("{} - {}", lower, upper);
            }
        }
        let strings: Vec<&str> = range.iter().filter_map(Value::as_str).collect();
        if !strings.is_empty() {
            return strings.join(", ");
        }
    }
    if let Some(branch) = scalar(requirement.get("branch")) {
        return format!("branch: {}", branch);
    }
    if let Some(revision) = scalar(requirement.get("revision")) {
        let short: String = revision.chars().take(8).collect();
        return format!("revision: {}", short);
    }
    if let Some(exact) = scalar(requirement.get("exact")) {
        return exact.to_string();
    }
    "unspecified".to_string()
}

/// Requirement fields appear both as plain strings and as one-element
/// arrays; accept either.
fn scalar(value: Option<&Value>) -> Option<&str> {
    match value? {
        Value::String(s) => Some(s),
        Value::Array(items) => items.first().and_then(Value::as_str),
        _ => None,
    }
}

/// Dependency kind from its URL
fn kind_from_url(url: Option<&str>) -> DependencyKind {
    match url {
        Some(u) if u.ends_with(".binary") => DependencyKind::Binary,
        Some(u) if u.contains("@swift-package-registry") => DependencyKind::Registry,
        _ => DependencyKind::SourceControl,
    }
}

/// Final URL path component with any `.git` suffix removed
fn name_from_url(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(url)
        .trim_end_matches(".git")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_modern_source_control_range() {
        let input = json!({
            "name": "MyPackage",
            "products": [
                {"name": "MyLib", "type": {"library": ["automatic"]}}
            ],
            "dependencies": [
                {
                    "sourceControl": [{
                        "identity": "swift-algorithms",
                        "location": {"remote": [{"urlString": "https://github.com/apple/swift-algorithms.git"}]},
                        "requirement": {"range": [{"lowerBound": "1.0.0", "upperBound": "2.0.0"}]}
                    }]
                }
            ]
        })
        .to_string();

        let report = parse_dump_package(&input);
        assert_eq!(report.status, BuildStatus::Success);

        let info = report.spm_info.as_ref().unwrap();
        assert_eq!(info.command, "dump-package");
        assert!(info.success);
        assert_eq!(info.package_name.as_deref(), Some("MyPackage"));

        let deps = info.dependencies.as_ref().unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].name, "swift-algorithms");
        assert_eq!(deps[0].version, "1.0.0 - 2.0.0");
        assert_eq!(deps[0].kind, DependencyKind::SourceControl);
        assert_eq!(
            deps[0].url.as_deref(),
            Some("https://github.com/apple/swift-algorithms.git")
        );
    }

    #[test]
    fn test_products_become_targets() {
        let input = json!({
            "name": "P",
            "products": [
                {"name": "Lib", "type": {"library": ["automatic"]}},
                {"name": "Tool", "type": {"name": "executable"}}
            ]
        })
        .to_string();

        let report = parse_dump_package(&input);
        let targets = report.spm_info.unwrap().targets.unwrap();
        assert_eq!(targets.len(), 2);
        // Only a `type.name` string is recognized; other shapes fall
        // back to "unknown".
        assert_eq!(targets[0].target_type, "unknown");
        assert_eq!(targets[1].target_type, "executable");
        assert!(targets.iter().all(|t| t.dependencies.is_empty()));
    }

    #[test]
    fn test_invalid_json_is_single_error() {
        let report = parse_dump_package("{ not json at all");
        assert_eq!(report.status, BuildStatus::Failed);
        assert_eq!(report.metrics.error_count, 1);
        assert!(report.diagnostics[0].message.starts_with("Failed to parse Package.swift JSON:"));
        assert!(report.spm_info.is_none());
    }

    #[test]
    fn test_legacy_url_dependency() {
        let input = json!({
            "name": "P",
            "dependencies": [
                {
                    "url": "https://github.com/apple/swift-nio.git",
                    "requirement": {"exact": ["2.62.0"]}
                }
            ]
        })
        .to_string();

        let report = parse_dump_package(&input);
        let deps = report.spm_info.unwrap().dependencies.unwrap();
        assert_eq!(deps[0].name, "swift-nio");
        assert_eq!(deps[0].version, "2.62.0");
        assert_eq!(deps[0].kind, DependencyKind::SourceControl);
    }

    #[test]
    fn test_legacy_path_dependency_is_local() {
        let input = json!({
            "name": "P",
            "dependencies": [
                {"path": "../LocalKit"}
            ]
        })
        .to_string();

        let report = parse_dump_package(&input);
        let deps = report.spm_info.unwrap().dependencies.unwrap();
        assert_eq!(deps[0].name, "LocalKit");
        assert_eq!(deps[0].version, "local");
        assert_eq!(deps[0].kind, DependencyKind::SourceControl);
        assert_eq!(deps[0].url, None);
    }

    #[test]
    fn test_branch_and_revision_requirements() {
        let branch = json!({"branch": ["main"]});
        assert_eq!(extract_requirement_version(&branch), "branch: main");

        let revision = json!({"revision": ["0123456789abcdef"]});
        assert_eq!(extract_requirement_version(&revision), "revision: 01234567");

        let short_revision = json!({"revision": "abc"});
        assert_eq!(extract_requirement_version(&short_revision), "revision: abc");

        let none = json!({});
        assert_eq!(extract_requirement_version(&none), "unspecified");
    }

    #[test]
    fn test_range_of_strings_joins() {
        let range = json!({"range": ["1.0.0", "2.0.0"]});
        assert_eq!(extract_requirement_version(&range), "1.0.0, 2.0.0");
    }

    #[test]
    fn test_kind_from_url() {
        assert_eq!(kind_from_url(Some("https://example.com/Lib.binary")), DependencyKind::Binary);
        assert_eq!(
            kind_from_url(Some("https://mirror@swift-package-registry.example/pkg")),
            DependencyKind::Registry
        );
        assert_eq!(
            kind_from_url(Some("https://github.com/apple/swift-nio.git")),
            DependencyKind::SourceControl
        );
        assert_eq!(kind_from_url(None), DependencyKind::SourceControl);
    }

    #[test]
    fn test_name_from_url_strips_git_suffix() {
        assert_eq!(name_from_url("https://github.com/apple/swift-nio.git"), "swift-nio");
        assert_eq!(name_from_url("https://github.com/apple/swift-nio"), "swift-nio");
    }

    #[test]
    fn test_bare_remote_string() {
        let input = json!({
            "name": "P",
            "dependencies": [
                {
                    "sourceControl": [{
                        "identity": "logging",
                        "location": {"remote": ["https://github.com/apple/swift-log.git"]},
                        "requirement": {"branch": ["main"]}
                    }]
                }
            ]
        })
        .to_string();

        let report = parse_dump_package(&input);
        let deps = report.spm_info.unwrap().dependencies.unwrap();
        assert_eq!(deps[0].url.as_deref(), Some("https://github.com/apple/swift-log.git"));
        assert_eq!(deps[0].version, "branch: main");
    }

    #[test]
    fn test_missing_fields_are_tolerated() {
        let report = parse_dump_package(r#"{"name": "Bare"}"#);
        assert_eq!(report.status, BuildStatus::Success);

        let info = report.spm_info.unwrap();
        assert_eq!(info.package_name.as_deref(), Some("Bare"));
        assert!(info.targets.is_none());
        assert!(info.dependencies.is_none());
    }
}
