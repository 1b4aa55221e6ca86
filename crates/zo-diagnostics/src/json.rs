// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! JSON diagnostic output for machine consumption.
//!
//! Each diagnostic carries exact locations (line/col and byte spans) plus
//! the source line, so editors can show it without re-reading the file.
//!
//! Use `--format json` with `zo parse` or `zo check` to get this output.

use serde::Serialize;
use zo_ast::{LineMap, Span};

use crate::codes::ErrorCodeRegistry;
use crate::{Diagnostic, LabelStyle, Severity};

/// Schema version for forward compatibility.
pub const REPORT_VERSION: u32 = 1;

/// A complete JSON diagnostic report for one file.
#[derive(Debug, Serialize)]
pub struct DiagnosticReport {
    pub version: u32,
    /// The file that was checked.
    pub file: String,
    /// Whether there were no errors.
    pub success: bool,
    /// The phase that produced these diagnostics (`lex` or `parse`).
    pub phase: String,
    pub diagnostics: Vec<JsonDiagnostic>,
    pub error_count: usize,
    pub warning_count: usize,
}

/// A single diagnostic in JSON form, enriched with source context.
#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    /// "error", "warning", or "note".
    pub severity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// "Lexical", "Syntax" or "Structural".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub message: String,
    /// Primary source location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    pub labels: Vec<JsonLabel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

/// A source location with line/column (1-based).
#[derive(Debug, Serialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
    pub byte_offset: usize,
    /// The source line text for context.
    pub source_line: String,
}

/// A labeled span in JSON form.
#[derive(Debug, Serialize)]
pub struct JsonLabel {
    /// "primary" or "secondary".
    pub role: LabelStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub span: Span,
    pub start: LineCol,
    pub end: LineCol,
}

/// Line/column pair (1-based).
#[derive(Debug, Serialize)]
pub struct LineCol {
    pub line: usize,
    pub column: usize,
}

/// Convert diagnostics to a structured JSON report.
pub fn to_json_report(diagnostics: &[Diagnostic], source: &str, file: &str, phase: &str) -> DiagnosticReport {
    let registry = ErrorCodeRegistry::default();
    let line_map = LineMap::new(source);

    let error_count = diagnostics.iter().filter(|d| d.severity == Severity::Error).count();
    let warning_count = diagnostics.iter().filter(|d| d.severity == Severity::Warning).count();

    DiagnosticReport {
        version: REPORT_VERSION,
        file: file.to_string(),
        success: error_count == 0,
        phase: phase.to_string(),
        diagnostics: diagnostics
            .iter()
            .map(|d| to_json_diagnostic(d, source, &line_map, &registry))
            .collect(),
        error_count,
        warning_count,
    }
}

fn to_json_diagnostic(
    diag: &Diagnostic,
    source: &str,
    line_map: &LineMap,
    registry: &ErrorCodeRegistry,
) -> JsonDiagnostic {
    let code = diag.code.as_ref().map(|c| c.0.clone());
    let category = code
        .as_ref()
        .and_then(|c| registry.get(c))
        .map(|info| info.category.to_string());

    let location = diag.primary_span().map(|span| {
        let (line, column) = line_map.offset_to_line_col(span.start);
        SourceLocation {
            line: line as usize,
            column: column as usize,
            byte_offset: span.start,
            source_line: line_map.line_text(source, line).unwrap_or("").to_string(),
        }
    });

    let line_col = |offset: usize| {
        let (line, column) = line_map.offset_to_line_col(offset);
        LineCol { line: line as usize, column: column as usize }
    };

    let labels = diag
        .labels
        .iter()
        .map(|l| JsonLabel {
            role: l.style,
            message: l.message.clone(),
            span: l.span,
            start: line_col(l.span.start),
            end: line_col(l.span.end),
        })
        .collect();

    JsonDiagnostic {
        severity: diag.severity.as_str().to_string(),
        code,
        category,
        message: diag.message.clone(),
        location,
        labels,
        notes: diag.notes.clone(),
        help: diag.help.clone(),
    }
}

/// Serialize a diagnostic report to pretty JSON.
pub fn to_json_string(report: &DiagnosticReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_shape() {
        let src = "fun main() {\n  imu = 1;\n}\n";
        let diags = crate::from_parse_result(&zo_parser::parse(src));
        let report = to_json_report(&diags, src, "main.zo", "parse");

        assert!(!report.success);
        assert_eq!(report.error_count, 1);

        let value: serde_json::Value = serde_json::from_str(&to_json_string(&report)).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["file"], "main.zo");
        let diag = &value["diagnostics"][0];
        assert_eq!(diag["severity"], "error");
        assert_eq!(diag["code"], "E0101");
        assert_eq!(diag["category"], "Syntax");
        assert_eq!(diag["location"]["line"], 2);
        assert_eq!(diag["location"]["column"], 7);
        assert_eq!(diag["location"]["source_line"], "  imu = 1;");
        assert_eq!(diag["labels"][0]["role"], "primary");
        assert_eq!(diag["labels"][0]["span"]["start"], 19);
    }

    #[test]
    fn clean_report() {
        let report = to_json_report(&[], "fun main() {}", "ok.zo", "parse");
        assert!(report.success);
        let value: serde_json::Value = serde_json::from_str(&to_json_string(&report)).unwrap();
        assert_eq!(value["diagnostics"].as_array().map(|a| a.len()), Some(0));
    }
}
