//! `swift package show-dependencies` tree parsing
//!
//! The tree printer draws one dependency per line behind box-drawing
//! glyphs. Parsing runs a two-state machine: nothing before the
//! `Dependencies:` header (or the first glyph line) is a dependency,
//! and the first glyph line after an explicit header may be the root
//! package itself, detected by a two-line indentation lookahead.

use regex_lite::Regex;

use crate::report::{
    BuildFormat, BuildStatus, DependencyKind, DiagnosticCategory, DiagnosticSeverity,
    ParsedBuildResult, SpmDependency,
};

use super::super::line::parse_diagnostic_line;
use super::TREE_GLYPHS;

pub(super) fn parse_show_dependencies(input: &str) -> ParsedBuildResult {
    let mut report = ParsedBuildResult::new(BuildFormat::Spm);
    let lines: Vec<&str> = input.lines().map(|l| l.trim_end_matches('\r')).collect();

    let mut header_seen = false;
    let mut in_section = false;
    let mut first_glyph_pending = true;
    let mut dependency_count = 0u32;

    for (index, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let lower = trimmed.to_lowercase();

        if lower == "dependencies:" {
            header_seen = true;
            in_section = true;
            continue;
        }

        if lower.starts_with("error:") {
            report.record(parse_diagnostic_line(
                trimmed,
                DiagnosticSeverity::Error,
                DiagnosticCategory::Dependency,
            ));
            continue;
        }
        if lower.starts_with("warning:") {
            report.record(parse_diagnostic_line(
                trimmed,
                DiagnosticSeverity::Warning,
                DiagnosticCategory::Dependency,
            ));
            continue;
        }

        let has_glyph = has_tree_glyph(line);
        if !in_section {
            if has_glyph {
                in_section = true;
            } else {
                continue;
            }
        }

        if has_glyph && first_glyph_pending {
            first_glyph_pending = false;
            if header_seen && next_lines_go_deeper(&lines, index) {
                // Root package line, skipped exactly once.
                continue;
            }
        }

        if parse_dependency_line(line).is_some() {
            dependency_count += 1;
        }
    }

    report.metrics.target_count = dependency_count;
    report.status = if report.metrics.error_count > 0 {
        BuildStatus::Failed
    } else if in_section {
        BuildStatus::Success
    } else {
        BuildStatus::Unknown
    };
    report
}

/// Whether a line carries any of the tree-printer glyphs
fn has_tree_glyph(line: &str) -> bool {
    TREE_GLYPHS.iter().any(|glyph| line.contains(glyph))
}

/// Leading-whitespace depth of a raw line
fn indentation(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Root-package lookahead: at least one of the next two lines sits
/// deeper than this one and also bears a tree glyph.
fn next_lines_go_deeper(lines: &[&str], index: usize) -> bool {
    let base = indentation(lines[index]);
    lines
        .iter()
        .skip(index + 1)
        .take(2)
        .any(|next| !next.trim().is_empty() && has_tree_glyph(next) && indentation(next) > base)
}

/// Strip glyphs and box characters from a dependency line
fn clean_tree_line(line: &str) -> String {
    let stripped = line.trim_start_matches(['├', '└', '│', '─', ' ']);
    let mut cleaned = stripped.to_string();
    for sequence in ["├─", "└─", "│", "─"] {
        cleaned = cleaned.replace(sequence, "");
    }
    cleaned.trim().to_string()
}

/// Parse one cleaned dependency line into a descriptor.
///
/// The shapes are tried in priority order; anything that survives
/// cleaning produces a dependency, so the final arm is a catch-all.
pub(super) fn parse_dependency_line(line: &str) -> Option<SpmDependency> {
    let cleaned = clean_tree_line(line);
    if cleaned.is_empty() {
        return None;
    }

    // 1. NAME (VERSION)
    let parenthesized = Regex::new(r"^(.+?)\s*\((.+)\)$").unwrap();
    if let Some(caps) = parenthesized.captures(&cleaned) {
        let name = caps[1].trim().to_string();
        let version = caps[2].trim().to_string();
        let kind = kind_from_version(&version);
        return Some(SpmDependency { name, version, kind, url: None });
    }

    // 2. NAME@VERSION. The bracketed shapes below also embed `@`, so
    // they are excluded here despite the priority order.
    if cleaned.contains('@') && !cleaned.contains('<') && !cleaned.contains('[') {
        if let Some((name, version)) = cleaned.split_once('@') {
            let name = name.trim();
            let version = version.trim();
            if !name.is_empty() && !version.is_empty() {
                let kind = kind_from_version(version);
                return Some(SpmDependency {
                    name: name.to_string(),
                    version: version.to_string(),
                    kind,
                    url: None,
                });
            }
        }
    }

    // 3. NAME [URL]
    let bracketed = Regex::new(r"^(\S+)\s*\[(.+)\]$").unwrap();
    if let Some(caps) = bracketed.captures(&cleaned) {
        return Some(SpmDependency {
            name: caps[1].to_string(),
            version: "source-control".to_string(),
            kind: DependencyKind::SourceControl,
            url: Some(caps[2].to_string()),
        });
    }

    // 4. NAME<URL@VERSION>
    let angled = Regex::new(r"^(.+?)<(.+)>$").unwrap();
    if let Some(caps) = angled.captures(&cleaned) {
        let name = caps[1].trim().to_string();
        let inner = &caps[2];
        let (url, version) = match inner.rsplit_once('@') {
            Some((url, version)) => (url.to_string(), version.to_string()),
            None => (inner.to_string(), "unspecified".to_string()),
        };
        return Some(SpmDependency {
            name,
            version,
            kind: DependencyKind::SourceControl,
            url: Some(url),
        });
    }

    // 5. NAME revision:… / branch:… / exact:…
    if let Some((name, rest)) = cleaned.split_once(char::is_whitespace) {
        let rest = rest.trim();
        let rest_lower = rest.to_ascii_lowercase();
        if rest_lower.starts_with("revision:")
            || rest_lower.starts_with("branch:")
            || rest_lower.starts_with("exact:")
        {
            return Some(SpmDependency {
                name: name.to_string(),
                version: rest.to_string(),
                kind: DependencyKind::SourceControl,
                url: None,
            });
        }
    }

    // 6. NAME VERSION with a version-looking second token
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    if tokens.len() == 2 {
        let version = tokens[1];
        if version.starts_with(|c: char| c.is_ascii_digit()) || version.contains('.') {
            let kind = kind_from_version(version);
            return Some(SpmDependency {
                name: tokens[0].to_string(),
                version: version.to_string(),
                kind,
                url: None,
            });
        }
    }

    // 7. Bare name
    Some(SpmDependency {
        name: cleaned,
        version: "unspecified".to_string(),
        kind: DependencyKind::SourceControl,
        url: None,
    })
}

/// Dependency kind inferred from a version string
fn kind_from_version(version: &str) -> DependencyKind {
    let lower = version.to_ascii_lowercase();
    if lower.contains("branch:") || lower.contains("revision:") {
        DependencyKind::SourceControl
    } else if lower.contains(".binary") || lower.contains("xcframework") {
        DependencyKind::Binary
    } else if lower.contains("..<") || lower.contains(" - ") || lower.contains("exact:") {
        DependencyKind::Registry
    } else {
        DependencyKind::SourceControl
    }
}
