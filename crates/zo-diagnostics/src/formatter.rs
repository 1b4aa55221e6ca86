// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Rich terminal formatter for diagnostics.
//!
//! Produces multi-line, color-coded output in the rustc style:
//!
//! ```text
//! error[E0102]: Closing tag '</span>' does not match '<div>'
//!   --> view.zo:3:14
//!    |
//!  3 |   <div>hi</span>
//!    |    ---    ^^^^ closing tag
//!    |    |
//!    |    opened here
//!    |
//!    = help: close it with '</div>'
//! ```

use std::collections::BTreeMap;

use colored::Colorize;
use zo_ast::LineMap;

use crate::{Diagnostic, LabelStyle, Severity};

/// Formats diagnostics for terminal output.
pub struct DiagnosticFormatter<'a> {
    source: &'a str,
    file_name: Option<&'a str>,
    line_map: LineMap,
}

/// A source line with its labels.
struct AnnotatedLine {
    line_num: usize,
    text: String,
    annotations: Vec<Annotation>,
}

struct Annotation {
    col_start: usize,
    col_end: usize,
    style: LabelStyle,
    message: Option<String>,
}

impl<'a> DiagnosticFormatter<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, file_name: None, line_map: LineMap::new(source) }
    }

    pub fn with_file_name(mut self, name: &'a str) -> Self {
        self.file_name = Some(name);
        self
    }

    pub fn format(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();
        self.format_header(&mut out, diagnostic);

        let annotated = self.collect_annotated_lines(diagnostic);
        let Some(primary) = diagnostic.primary_span() else {
            self.format_footer(&mut out, diagnostic, 2);
            return out;
        };

        let (line, col) = self.offset_to_line_col(primary.start);
        let file = self.file_name.unwrap_or("<source>");
        out.push_str(&format!("  {} {}:{}:{}\n", "-->".blue(), file, line, col));

        let max_line = annotated.last().map(|a| a.line_num).unwrap_or(1);
        let gutter_width = max_line.to_string().len().max(2);

        let mut prev_line_num: Option<usize> = None;
        for annotated_line in &annotated {
            match prev_line_num {
                // Gap indicator for non-consecutive lines
                Some(prev) if annotated_line.line_num > prev + 1 => {
                    out.push_str(&format!("{} {}\n", " ".repeat(gutter_width), "...".blue()));
                }
                Some(_) => {}
                None => out.push_str(&format!("{} {}\n", " ".repeat(gutter_width + 1), "|".blue())),
            }

            out.push_str(&format!(
                "{:>width$} {} {}\n",
                annotated_line.line_num.to_string().blue().bold(),
                "|".blue(),
                annotated_line.text,
                width = gutter_width + 1,
            ));
            self.format_annotations(&mut out, annotated_line, gutter_width);

            prev_line_num = Some(annotated_line.line_num);
        }

        self.format_footer(&mut out, diagnostic, gutter_width);
        out
    }

    /// Format every diagnostic, separated by blank lines.
    pub fn format_all(&self, diagnostics: &[Diagnostic]) -> String {
        diagnostics.iter().map(|d| self.format(d)).collect::<Vec<_>>().join("\n")
    }

    fn format_header(&self, out: &mut String, diagnostic: &Diagnostic) {
        let severity_str = match diagnostic.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Note => "note".blue().bold(),
        };

        match diagnostic.code {
            Some(ref code) => out.push_str(&format!(
                "{}[{}]: {}\n",
                severity_str,
                code.0.as_str().red().bold(),
                diagnostic.message.as_str().bold()
            )),
            None => out.push_str(&format!("{}: {}\n", severity_str, diagnostic.message.as_str().bold())),
        }
    }

    fn format_footer(&self, out: &mut String, diagnostic: &Diagnostic, gutter_width: usize) {
        if diagnostic.notes.is_empty() && diagnostic.help.is_none() {
            return;
        }
        let pad = " ".repeat(gutter_width + 1);
        if !diagnostic.labels.is_empty() {
            out.push_str(&format!("{} {}\n", pad, "|".blue()));
        }
        for note in &diagnostic.notes {
            out.push_str(&format!("{} {} {}: {}\n", pad, "=".cyan(), "note".cyan().bold(), note));
        }
        if let Some(ref help) = diagnostic.help {
            out.push_str(&format!("{} {} {}: {}\n", pad, "=".cyan(), "help".cyan().bold(), help));
        }
    }

    fn collect_annotated_lines(&self, diagnostic: &Diagnostic) -> Vec<AnnotatedLine> {
        let mut lines_map: BTreeMap<usize, AnnotatedLine> = BTreeMap::new();

        for label in &diagnostic.labels {
            let (line_num, col_start) = self.offset_to_line_col(label.span.start);
            let (end_line, col_end) = self.offset_to_line_col(label.span.end);
            let text = self.get_line(line_num).unwrap_or("");

            // Multi-line spans are annotated on their first line only
            let effective_col_end = if end_line == line_num { col_end } else { text.len() + 1 };

            let entry = lines_map.entry(line_num).or_insert_with(|| AnnotatedLine {
                line_num,
                text: text.to_string(),
                annotations: Vec::new(),
            });

            entry.annotations.push(Annotation {
                col_start,
                // At least one column wide, so end-of-file spans still show
                col_end: effective_col_end.max(col_start + 1),
                style: label.style,
                message: label.message.clone(),
            });
        }

        lines_map.into_values().collect()
    }

    fn format_annotations(&self, out: &mut String, annotated_line: &AnnotatedLine, gutter_width: usize) {
        let mut sorted: Vec<&Annotation> = annotated_line.annotations.iter().collect();
        sorted.sort_by_key(|a| (a.style.priority(), a.col_start));

        let width = sorted.iter().map(|a| a.col_end).max().unwrap_or(1);
        let mut underline = vec![' '; width];
        let mut messages: Vec<(usize, LabelStyle, &str)> = Vec::new();

        // Secondary first so primary carets win where they overlap
        for ann in sorted.iter().rev() {
            let ch = match ann.style {
                LabelStyle::Primary => '^',
                LabelStyle::Secondary => '-',
            };
            for slot in underline.iter_mut().take(ann.col_end - 1).skip(ann.col_start - 1) {
                *slot = ch;
            }
        }
        for ann in &sorted {
            if let Some(ref msg) = ann.message {
                messages.push((ann.col_start, ann.style, msg));
            }
        }

        let underline_str: String = underline.iter().collect::<String>().trim_end().to_string();
        if underline_str.is_empty() {
            return;
        }
        let colored_underline = color_underline(&underline_str);
        let pad = " ".repeat(gutter_width + 1);

        if messages.len() <= 1 {
            match messages.first() {
                Some((_, style, msg)) => out.push_str(&format!(
                    "{} {} {} {}\n",
                    pad,
                    "|".blue(),
                    colored_underline,
                    style_message(*style, msg)
                )),
                None => out.push_str(&format!("{} {} {}\n", pad, "|".blue(), colored_underline)),
            }
            return;
        }

        // Several labels: the primary message goes inline, the rest hang
        // below on connector pipes.
        let (inline, hanging) = messages.split_at(1);
        out.push_str(&format!(
            "{} {} {} {}\n",
            pad,
            "|".blue(),
            colored_underline,
            style_message(inline[0].1, inline[0].2)
        ));
        for (col, style, _) in hanging {
            out.push_str(&format!("{} {} {}{}\n", pad, "|".blue(), " ".repeat(col - 1), pipe(*style)));
        }
        for (col, style, msg) in hanging {
            out.push_str(&format!(
                "{} {} {}{}\n",
                pad,
                "|".blue(),
                " ".repeat(col - 1),
                style_message(*style, msg)
            ));
        }
    }

    /// Convert byte offset to (line, col), both 1-based.
    fn offset_to_line_col(&self, offset: usize) -> (usize, usize) {
        let (line, col) = self.line_map.offset_to_line_col(offset);
        (line as usize, col as usize)
    }

    /// Get source line text by 1-based line number.
    fn get_line(&self, line_num: usize) -> Option<&str> {
        self.line_map.line_text(self.source, line_num as u32)
    }
}

impl LabelStyle {
    fn priority(self) -> u8 {
        match self {
            LabelStyle::Primary => 0,
            LabelStyle::Secondary => 1,
        }
    }
}

fn style_message(style: LabelStyle, msg: &str) -> String {
    match style {
        LabelStyle::Primary => msg.red().bold().to_string(),
        LabelStyle::Secondary => msg.blue().to_string(),
    }
}

fn pipe(style: LabelStyle) -> String {
    match style {
        LabelStyle::Primary => "|".red().bold().to_string(),
        LabelStyle::Secondary => "|".blue().to_string(),
    }
}

/// Color the underline characters (^ in red, - in blue).
fn color_underline(s: &str) -> String {
    let mut result = String::new();
    let mut current_char = None;
    let mut run = String::new();

    for ch in s.chars() {
        let kind = match ch {
            '^' | '-' => Some(ch),
            _ => None,
        };

        if kind != current_char && !run.is_empty() {
            result.push_str(&flush_run(&run, current_char));
            run.clear();
        }
        run.push(ch);
        current_char = kind;
    }

    if !run.is_empty() {
        result.push_str(&flush_run(&run, current_char));
    }

    result
}

fn flush_run(run: &str, kind: Option<char>) -> String {
    match kind {
        Some('^') => run.red().bold().to_string(),
        Some('-') => run.blue().to_string(),
        _ => run.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToDiagnostic;
    use zo_ast::Span;

    fn plain(source: &str, diagnostic: &Diagnostic) -> String {
        colored::control::set_override(false);
        DiagnosticFormatter::new(source).with_file_name("main.zo").format(diagnostic)
    }

    #[test]
    fn header_location_and_caret() {
        let src = "fun main() {\n  a() b()\n}\n";
        let result = zo_parser::parse(src);
        let diag = result.errors[0].to_diagnostic();
        let out = plain(src, &diag);

        assert!(out.starts_with("error[E0101]: Expected ';' after statement"), "{}", out);
        assert!(out.contains("--> main.zo:2:7"), "{}", out);
        assert!(out.contains(" 2 |   a() b()"), "{}", out);
        assert!(out.contains("|       ^ expected ';'"), "{}", out);
    }

    #[test]
    fn secondary_label_hangs_below() {
        let src = "imu x := 1;";
        let diag = Diagnostic::error("boom")
            .with_primary(Span::new(9, 10), "here")
            .with_secondary(Span::new(0, 3), "because of this");
        let out = plain(src, &diag);
        assert!(out.contains("| ---      ^ here"), "{}", out);
        assert!(out.contains("| because of this"), "{}", out);
    }

    #[test]
    fn end_of_file_span_is_visible() {
        let src = "fun f() {";
        let diag = Diagnostic::error("unclosed").with_primary(Span::new(9, 9), "here");
        let out = plain(src, &diag);
        assert!(out.contains("^ here"), "{}", out);
    }

    #[test]
    fn footer_without_labels() {
        let diag = Diagnostic::error("nothing to point at").with_help("try again");
        let out = plain("", &diag);
        assert_eq!(out, "error: nothing to point at\n   = help: try again\n");
    }
}
