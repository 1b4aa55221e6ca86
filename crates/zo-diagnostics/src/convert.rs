// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Conversions from front-end error types to `Diagnostic`.

use zo_lexer::{LexError, LexErrorKind};
use zo_parser::{ParseError, Reason};

use crate::{Diagnostic, ToDiagnostic};

/// The registry code for a lexical error.
pub fn lex_code(kind: LexErrorKind) -> &'static str {
    match kind {
        LexErrorKind::UnexpectedChar => "E0001",
        LexErrorKind::UnterminatedString => "E0002",
        LexErrorKind::InvalidEscape => "E0003",
        LexErrorKind::MalformedLiteral => "E0004",
        LexErrorKind::UnterminatedComment => "E0005",
        LexErrorKind::UnterminatedChar => "E0006",
    }
}

/// The registry code for any parse error.
pub fn parse_code(reason: Reason) -> &'static str {
    match reason {
        Reason::Lex(kind) => lex_code(kind),
        Reason::UnexpectedToken => "E0100",
        Reason::ExpectedToken => "E0101",
        Reason::MismatchedTag => "E0102",
        Reason::UnguardedTernary => "E0103",
        Reason::MalformedGroupType => "E0200",
        Reason::IncompleteTernary => "E0201",
        Reason::NestingTooDeep => "E0202",
    }
}

// ============================================================================
// Lex Errors
// ============================================================================

impl ToDiagnostic for LexError {
    fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(&self.message)
            .with_code(lex_code(self.kind))
            .with_primary(self.span, self.kind.to_string());

        if self.kind.is_fatal() {
            diag = diag.with_note("scanning stopped here; later problems are not reported");
        }
        if let Some(ref hint) = self.hint {
            diag = diag.with_help(hint.as_str());
        }

        diag
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

impl ToDiagnostic for ParseError {
    fn to_diagnostic(&self) -> Diagnostic {
        let label = match (&self.reason, &self.expected) {
            (Reason::Lex(kind), _) => kind.to_string(),
            (Reason::MismatchedTag, _) => "closing tag".to_string(),
            (Reason::NestingTooDeep, _) => "nested too deeply".to_string(),
            (_, Some(expected)) => format!("expected {}", expected),
            _ => "here".to_string(),
        };

        let mut diag = Diagnostic::error(&self.message)
            .with_code(parse_code(self.reason))
            .with_primary(self.span, label);

        if let Some((span, message)) = &self.related {
            diag = diag.with_secondary(*span, message.as_str());
        }
        if let Reason::Lex(kind) = self.reason {
            if kind.is_fatal() {
                diag = diag.with_note("scanning stopped here; later problems are not reported");
            }
        }
        if let Some(ref hint) = self.hint {
            diag = diag.with_help(hint.as_str());
        }

        diag
    }
}
