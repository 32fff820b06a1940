//! Shared diagnostic line parsing
//!
//! Splits a single `<location>: <severity>: <message>` line into
//! file/line/column/message, handling POSIX paths, drive-letter paths,
//! and path-less variants. Every dialect parser funnels its diagnostic
//! lines through here so the report invariants hold uniformly.

use crate::report::{Diagnostic, DiagnosticCategory, DiagnosticSeverity};

/// Severity markers recognized mid-line. The earliest occurrence of any
/// of these splits the line into location and message.
const SEVERITY_MARKERS: &[&str] = &[
    ": error:",
    ": warning:",
    ": note:",
    " error: ",
    " warning: ",
    " note: ",
];

/// Severity labels recognized at the start of a location-less line
const SEVERITY_PREFIXES: &[&str] = &["error:", "warning:", "note:"];

/// Parse one diagnostic line into a [`Diagnostic`].
///
/// The caller has already decided the severity (by spotting the marker
/// that made the line a diagnostic) and supplies the dialect's default
/// category; the message text may re-classify it to `linking` or
/// `dependency`.
pub fn parse_diagnostic_line(
    line: &str,
    severity: DiagnosticSeverity,
    default_category: DiagnosticCategory,
) -> Diagnostic {
    let trimmed = line.trim();
    let lower = trimmed.to_ascii_lowercase();

    if let Some((idx, len)) = find_marker(&lower) {
        let location_raw = &trimmed[..idx];
        let message = trimmed[idx + len..].trim();

        // A marker with nothing after it is not a usable diagnostic
        // split; fall through to the whole-line message below.
        if !message.is_empty() {
            let category = classify_category(message, default_category);
            let mut diagnostic = Diagnostic::new(severity, category, message);

            let location = location_raw.trim();
            if !location.is_empty() {
                diagnostic.location = Some(location.to_string());
                let (file_path, line_number, column) = split_location(location);
                diagnostic.file_path = file_path;
                diagnostic.line_number = line_number;
                diagnostic.column = column;
            }
            return diagnostic;
        }
    }

    for prefix in SEVERITY_PREFIXES {
        if lower.starts_with(prefix) {
            let message = trimmed[prefix.len()..].trim();
            if !message.is_empty() {
                let category = classify_category(message, default_category);
                return Diagnostic::new(severity, category, message);
            }
        }
    }

    // No marker, or a marker with an empty remainder: the whole line is
    // the message.
    let category = classify_category(trimmed, default_category);
    Diagnostic::new(severity, category, trimmed)
}

/// Classify a diagnostic message into a category, falling back to the
/// dialect default when no keyword matches.
pub fn classify_category(message: &str, default: DiagnosticCategory) -> DiagnosticCategory {
    let lower = message.to_ascii_lowercase();
    if lower.contains("linker") || lower.contains("undefined symbol") || lower.contains("ld:") {
        DiagnosticCategory::Linking
    } else if lower.contains("package")
        || lower.contains(" dependency")
        || lower.contains("dependency ")
        || (lower.contains("resolve") && !lower.contains("unresolved"))
    {
        DiagnosticCategory::Dependency
    } else {
        default
    }
}

/// Find the earliest severity marker in an ASCII-lowercased line.
/// Returns the byte index and marker length.
fn find_marker(lower: &str) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    for marker in SEVERITY_MARKERS {
        if let Some(idx) = lower.find(marker) {
            if best.map_or(true, |(b, _)| idx < b) {
                best = Some((idx, marker.len()));
            }
        }
    }
    best
}

/// Split a location into file path, line number, and column.
///
/// Drive-letter paths (`C:\...`) are scanned from the right because the
/// drive colon poisons a left-to-right split; POSIX paths split left to
/// right. Non-numeric trailing tokens stay part of the file path.
fn split_location(location: &str) -> (Option<String>, Option<u32>, Option<u32>) {
    let mut chars = location.chars();
    let is_drive_path = matches!((chars.next(), chars.next()), (Some(c), Some(':')) if c.is_ascii_alphabetic());

    let parts: Vec<&str> = location.split(':').collect();

    if is_drive_path {
        let mut numeric: Vec<u32> = Vec::new();
        for part in parts.iter().rev().take(2) {
            match part.trim().parse::<u32>() {
                Ok(n) if n >= 1 => numeric.push(n),
                _ => break,
            }
        }
        let path = parts[..parts.len() - numeric.len()].join(":");
        return match numeric.as_slice() {
            // numeric is right-to-left: [column, line]
            [column, line] => (Some(path), Some(*line), Some(*column)),
            [line] => (Some(path), Some(*line), None),
            _ => (Some(path), None, None),
        };
    }

    let line_number = parts.get(1).and_then(|p| p.trim().parse::<u32>().ok()).filter(|n| *n >= 1);
    if line_number.is_none() {
        // Non-numeric suffix: the whole location is the file path.
        return (Some(location.to_string()), None, None);
    }
    let column = parts.get(2).and_then(|p| p.trim().parse::<u32>().ok()).filter(|n| *n >= 1);
    (Some(parts[0].to_string()), line_number, column)
}
