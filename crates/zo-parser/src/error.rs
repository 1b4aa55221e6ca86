// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parse errors and the parse result.

use zo_ast::token::TokenKind;
use zo_ast::{SourceFile, Span};
use zo_lexer::{LexError, LexErrorKind};

/// Broad error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed literal, invalid escape, unterminated comment or string.
    Lexical,
    /// Unexpected or missing token, mismatched closing tag.
    Syntax,
    /// A construct whose pieces are present but do not fit together.
    Structural,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::Structural => write!(f, "structural error"),
        }
    }
}

/// The specific problem behind an error. Diagnostics map this to a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    Lex(LexErrorKind),
    UnexpectedToken,
    ExpectedToken,
    MismatchedTag,
    /// `cond ? a : b` without `when guard`
    UnguardedTernary,
    MalformedGroupType,
    /// `cond when guard` not followed by `? a : b`
    IncompleteTernary,
    /// Brackets, blocks or markup nested past the parser's depth limit.
    NestingTooDeep,
}

impl Reason {
    pub fn kind(self) -> ErrorKind {
        match self {
            Reason::Lex(_) => ErrorKind::Lexical,
            Reason::UnexpectedToken
            | Reason::ExpectedToken
            | Reason::MismatchedTag
            | Reason::UnguardedTernary => ErrorKind::Syntax,
            Reason::MalformedGroupType | Reason::IncompleteTernary | Reason::NestingTooDeep => {
                ErrorKind::Structural
            }
        }
    }
}

/// A parser error with location and friendly message.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub reason: Reason,
    pub span: Span,
    pub message: String,
    /// What the parser was looking for, e.g. `';'` or `type`.
    pub expected: Option<String>,
    pub hint: Option<String>,
    /// Secondary location, such as the opening tag of a mismatched element.
    pub related: Option<(Span, String)>,
}

impl ParseError {
    pub fn new(reason: Reason, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind: reason.kind(),
            reason,
            span,
            message: message.into(),
            expected: None,
            hint: None,
            related: None,
        }
    }

    pub(crate) fn expected(expected: &str, found: &TokenKind, span: Span) -> Self {
        let mut error = Self::new(Reason::ExpectedToken, span, format_expected_message(expected, found));
        error.expected = Some(expected.to_string());
        error.hint = crate::hints::for_expected(expected, found).map(String::from);
        error
    }

    /// A token that cannot start the construct being parsed.
    pub(crate) fn unexpected(what: &str, found: &TokenKind, span: Span) -> Self {
        let mut error = Self::expected(what, found, span);
        error.reason = Reason::UnexpectedToken;
        error
    }

    pub(crate) fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub(crate) fn with_related(mut self, span: Span, label: impl Into<String>) -> Self {
        self.related = Some((span, label.into()));
        self
    }

    /// Reclassify as a structural error, keeping location and wording.
    pub(crate) fn into_structural(mut self, reason: Reason) -> Self {
        self.reason = reason;
        self.kind = reason.kind();
        self
    }

    pub fn is_lexical(&self) -> bool {
        self.kind == ErrorKind::Lexical
    }
}

impl From<LexError> for ParseError {
    fn from(error: LexError) -> Self {
        let mut converted = ParseError::new(Reason::Lex(error.kind), error.span, error.message);
        converted.hint = error.hint;
        converted
    }
}

/// Result of parsing: the tree plus any errors found.
///
/// The tree is always present so tools can work on partial input; use
/// [`ParseResult::into_result`] for the strict either-or view.
#[derive(Debug)]
pub struct ParseResult {
    pub file: SourceFile,
    pub errors: Vec<ParseError>,
    /// Spans of every comment, in source order.
    pub comments: Vec<Span>,
}

impl ParseResult {
    /// Returns true if parsing completed without errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The tree if there were no errors, otherwise every error.
    pub fn into_result(self) -> Result<SourceFile, Vec<ParseError>> {
        if self.errors.is_empty() {
            Ok(self.file)
        } else {
            Err(self.errors)
        }
    }
}

/// Format a user-friendly "expected X, found Y" message.
fn format_expected_message(expected: &str, found: &TokenKind) -> String {
    match expected {
        "';'" => match found {
            TokenKind::Eof => "Expected ';', found end of file".to_string(),
            _ => format!("Expected ';' after statement, found {}", found.display_name()),
        },
        "'{'" => format!("Expected '{{' to start block, found {}", found.display_name()),
        "'}'" => format!("Expected '}}' to close block, found {}", found.display_name()),
        "')'" => {
            if matches!(found, TokenKind::Eof) {
                "Unclosed '(' - missing ')'".to_string()
            } else {
                format!("Expected ')', found {}", found.display_name())
            }
        }
        "']'" => {
            if matches!(found, TokenKind::Eof) {
                "Unclosed '[' - missing ']'".to_string()
            } else {
                format!("Expected ']', found {}", found.display_name())
            }
        }
        "a name" => format!("Expected name, found {}", found.display_name()),
        "expression" => format!("Expected expression, found {}", found.display_name()),
        "type" => format!("Expected type, found {}", found.display_name()),
        "pattern" => format!("Expected pattern, found {}", found.display_name()),
        "item" => format!("Expected item, found {}", found.display_name()),
        _ => format!("Expected {}, found {}", expected, found.display_name()),
    }
}
