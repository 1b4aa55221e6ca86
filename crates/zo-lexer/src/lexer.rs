// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Token grammars using logos, one per scanning mode.
//!
//! Logos only finds token boundaries. Literal values are decoded in a second
//! pass by [`convert_code`], which reports non-fatal problems and still
//! produces a best-effort token.

use logos::{FilterResult, Logos};
use zo_ast::token::{IntBase, TokenKind};
use zo_ast::Span;

/// Lexical error categories. Doubles as the logos error type.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    #[default]
    #[error("unexpected character")]
    UnexpectedChar,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated character literal")]
    UnterminatedChar,
    #[error("invalid escape sequence")]
    InvalidEscape,
    #[error("malformed literal")]
    MalformedLiteral,
    #[error("unterminated block comment")]
    UnterminatedComment,
}

impl LexErrorKind {
    /// Fatal errors run to end of input; scanning cannot resynchronize.
    pub fn is_fatal(self) -> bool {
        matches!(self, LexErrorKind::UnterminatedComment | LexErrorKind::UnterminatedString)
    }
}

/// A lexer error with location and friendly message.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self { kind, span, message: message.into(), hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub(crate) fn unexpected_char(ch: char, span: Span) -> Self {
        Self::new(LexErrorKind::UnexpectedChar, span, format!("unexpected character '{}'", ch))
    }

    pub(crate) fn unterminated_comment(span: Span) -> Self {
        Self::new(LexErrorKind::UnterminatedComment, span, "unterminated block comment")
            .with_hint("every '-*' needs a matching '*-'; block comments nest")
    }

    pub(crate) fn unterminated_string(span: Span) -> Self {
        Self::new(LexErrorKind::UnterminatedString, span, "unterminated string literal")
            .with_hint("add a closing '\"'")
    }

    pub(crate) fn unterminated_char(span: Span, quote: char) -> Self {
        Self::new(LexErrorKind::UnterminatedChar, span, "unterminated character literal")
            .with_hint(format!("add a closing '{}'", quote))
    }

    fn invalid_escape(span: Span, message: String) -> Self {
        Self::new(LexErrorKind::InvalidEscape, span, message)
            .with_hint("valid escapes: \\n \\r \\t \\\\ \\' \\\" \\0 \\xNN")
    }

    fn malformed(span: Span, message: impl Into<String>) -> Self {
        Self::new(LexErrorKind::MalformedLiteral, span, message)
    }
}

/// Code-mode tokens.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n\f]+")]
pub(crate) enum RawToken {
    // === Keywords ===
    #[token("pack")]
    Pack,
    #[token("load")]
    Load,
    #[token("type")]
    Type,
    #[token("type@state")]
    TypeAtState,
    #[token("ext")]
    Ext,
    #[token("abstract")]
    Abstract,
    #[token("apply")]
    Apply,
    #[token("fun")]
    Fun,
    #[token("fn")]
    Fn,
    #[token("val")]
    Val,
    #[token("struct")]
    Struct,
    #[token("enum")]
    Enum,
    #[token("imu")]
    Imu,
    #[token("mut")]
    Mut,
    #[token("loop")]
    Loop,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("match")]
    Match,
    #[token("return")]
    Return,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("as")]
    As,
    #[token("is")]
    Is,
    #[token("pub")]
    Pub,
    #[token("nursery")]
    Nursery,
    #[token("self")]
    SelfValue,
    #[token("Self")]
    SelfType,
    #[token("true")]
    True,
    #[token("false")]
    False,

    // Soft keywords
    #[token("and")]
    And,
    #[token("state")]
    State,
    #[token("group")]
    Group,
    #[token("raw")]
    Raw,
    #[token("when")]
    When,
    #[token("spawn")]
    Spawn,
    #[token("await")]
    Await,

    // === Operators ===
    #[token("::=")]
    ColonColonEq,
    #[token("->>")]
    ArrowGt,
    #[token("..=")]
    DotDotEq,
    #[token("...")]
    Ellipsis,
    #[token("<<=")]
    LtLtEq,
    #[token(">>=")]
    GtGtEq,
    #[token("</>")]
    LtSlashGt,

    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("|>")]
    PipeGt,
    #[token("..")]
    DotDot,
    #[token("->")]
    Arrow,
    #[token("=>")]
    FatArrow,
    #[token("::")]
    ColonColon,
    #[token(":=")]
    ColonEq,
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("%%")]
    PercentPercent,
    #[token("<>")]
    LtGt,
    #[token("</")]
    LtSlash,
    #[token("/>")]
    SlashGt,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("!")]
    Bang,
    #[token("?")]
    Question,
    #[token(".")]
    Dot,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("#")]
    Hash,
    #[token("$")]
    Dollar,

    // === Delimiters ===
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(":")]
    Colon,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,

    // === Comments (reported to the scanner, never to the parser) ===
    #[regex(r"--[^\n]*")]
    LineComment,
    #[token("-*", block_comment)]
    BlockComment,

    // === Literals ===
    // Prefixed forms swallow any trailing word characters so `0x`, `0b2` or
    // `0xg` come out as one malformed literal instead of `0` plus a name.
    #[regex(r"0x[0-9a-zA-Z_]*")]
    HexInt,
    #[regex(r"0b[0-9a-zA-Z_]*")]
    BinInt,
    #[regex(r"0o[0-9a-zA-Z_]*")]
    OctInt,
    #[regex(r"[box]#[0-9a-fA-F][0-9a-fA-F_]*")]
    BasedInt,
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9_]*)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9_]*")]
    Float,
    #[regex(r"[0-9][0-9_]*")]
    DecInt,
    #[token("\"", |lex| close_quoted(lex, '"', LexErrorKind::UnterminatedString))]
    Str,
    #[token("$\"", raw_string)]
    RawStr,
    #[token("'", |lex| close_quoted(lex, '\'', LexErrorKind::UnterminatedChar))]
    Char,
    #[token("`", |lex| close_quoted(lex, '`', LexErrorKind::UnterminatedChar))]
    Byte,

    // === Identifier (keywords win on equal length) ===
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Tokens inside an opening or closing tag: `<name attr="x" other={e}>`.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n\f]+")]
pub(crate) enum TagToken {
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
    #[token("=")]
    Eq,
    #[token("\"", |lex| close_quoted(lex, '"', LexErrorKind::UnterminatedString))]
    Str,
    #[token("{")]
    LBrace,
    #[token(">")]
    Gt,
    #[token("/>")]
    SlashGt,
}

/// Tokens between tags. Text runs keep trailing whitespace but never start
/// with it.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n\f]+")]
pub(crate) enum TextToken {
    #[regex(r"[^<>{}\s][^<>{}]*")]
    Text,
    #[token("<")]
    Lt,
    #[token("</")]
    LtSlash,
    #[token("</>")]
    LtSlashGt,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(">")]
    Gt,
}

/// Consume a nested `-* ... *-` comment. Unterminated comments swallow the
/// rest of the input and fail.
fn block_comment(lex: &mut logos::Lexer<RawToken>) -> FilterResult<(), LexErrorKind> {
    match block_comment_len(lex.remainder()) {
        Some(len) => {
            lex.bump(len);
            FilterResult::Emit(())
        }
        None => {
            lex.bump(lex.remainder().len());
            FilterResult::Error(LexErrorKind::UnterminatedComment)
        }
    }
}

/// Byte length of a block comment body (after the opening `-*`), including
/// the final `*-`. `None` if the comment never closes.
pub(crate) fn block_comment_len(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut depth = 1usize;
    let mut i = 0;
    while i < bytes.len() {
        match (bytes[i], bytes.get(i + 1)) {
            (b'-', Some(b'*')) => {
                depth += 1;
                i += 2;
            }
            (b'*', Some(b'-')) => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => i += 1,
        }
    }
    None
}

fn raw_string(lex: &mut logos::Lexer<RawToken>) -> FilterResult<(), LexErrorKind> {
    match lex.remainder().find('"') {
        Some(i) => {
            lex.bump(i + 1);
            FilterResult::Emit(())
        }
        None => {
            lex.bump(lex.remainder().len());
            FilterResult::Error(LexErrorKind::UnterminatedString)
        }
    }
}

/// Scan to the closing quote, skipping backslash escapes. Strings may span
/// lines; char and byte literals stop at the end of the line.
fn close_quoted<'s, T>(
    lex: &mut logos::Lexer<'s, T>,
    close: char,
    unterminated: LexErrorKind,
) -> FilterResult<(), LexErrorKind>
where
    T: Logos<'s, Source = str>,
{
    let rest: &str = lex.remainder();
    let multiline = close == '"';
    let mut chars = rest.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '\n' if !multiline => {
                lex.bump(i);
                return FilterResult::Error(unterminated);
            }
            c if c == close => {
                lex.bump(i + c.len_utf8());
                return FilterResult::Emit(());
            }
            _ => {}
        }
    }
    lex.bump(rest.len());
    FilterResult::Error(unterminated)
}

/// Convert a code-mode token to its kind, decoding literal values.
///
/// Decoding problems are pushed onto `errors`; the returned kind is still
/// usable so the parser can carry on.
pub(crate) fn convert_code(raw: RawToken, slice: &str, span: Span, errors: &mut Vec<LexError>) -> TokenKind {
    match raw {
        RawToken::Pack => TokenKind::Pack,
        RawToken::Load => TokenKind::Load,
        RawToken::Type => TokenKind::Type,
        RawToken::TypeAtState => TokenKind::TypeAtState,
        RawToken::Ext => TokenKind::Ext,
        RawToken::Abstract => TokenKind::Abstract,
        RawToken::Apply => TokenKind::Apply,
        RawToken::Fun => TokenKind::Fun,
        RawToken::Fn => TokenKind::Fn,
        RawToken::Val => TokenKind::Val,
        RawToken::Struct => TokenKind::Struct,
        RawToken::Enum => TokenKind::Enum,
        RawToken::Imu => TokenKind::Imu,
        RawToken::Mut => TokenKind::Mut,
        RawToken::Loop => TokenKind::Loop,
        RawToken::While => TokenKind::While,
        RawToken::For => TokenKind::For,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::Match => TokenKind::Match,
        RawToken::Return => TokenKind::Return,
        RawToken::Break => TokenKind::Break,
        RawToken::Continue => TokenKind::Continue,
        RawToken::As => TokenKind::As,
        RawToken::Is => TokenKind::Is,
        RawToken::Pub => TokenKind::Pub,
        RawToken::Nursery => TokenKind::Nursery,
        RawToken::SelfValue => TokenKind::SelfValue,
        RawToken::SelfType => TokenKind::SelfType,
        RawToken::True => TokenKind::Bool(true),
        RawToken::False => TokenKind::Bool(false),
        RawToken::And => TokenKind::And,
        RawToken::State => TokenKind::State,
        RawToken::Group => TokenKind::Group,
        RawToken::Raw => TokenKind::Raw,
        RawToken::When => TokenKind::When,
        RawToken::Spawn => TokenKind::Spawn,
        RawToken::Await => TokenKind::Await,

        RawToken::ColonColonEq => TokenKind::ColonColonEq,
        RawToken::ArrowGt => TokenKind::ArrowGt,
        RawToken::DotDotEq => TokenKind::DotDotEq,
        RawToken::Ellipsis => TokenKind::Ellipsis,
        RawToken::LtLtEq => TokenKind::LtLtEq,
        RawToken::GtGtEq => TokenKind::GtGtEq,
        RawToken::LtSlashGt => TokenKind::LtSlashGt,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::BangEq => TokenKind::BangEq,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::PipeGt => TokenKind::PipeGt,
        RawToken::DotDot => TokenKind::DotDot,
        RawToken::Arrow => TokenKind::Arrow,
        RawToken::FatArrow => TokenKind::FatArrow,
        RawToken::ColonColon => TokenKind::ColonColon,
        RawToken::ColonEq => TokenKind::ColonEq,
        RawToken::LtLt => TokenKind::LtLt,
        RawToken::GtGt => TokenKind::GtGt,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::StarEq => TokenKind::StarEq,
        RawToken::SlashEq => TokenKind::SlashEq,
        RawToken::PercentEq => TokenKind::PercentEq,
        RawToken::AmpEq => TokenKind::AmpEq,
        RawToken::PipeEq => TokenKind::PipeEq,
        RawToken::CaretEq => TokenKind::CaretEq,
        RawToken::PercentPercent => TokenKind::PercentPercent,
        RawToken::LtGt => TokenKind::LtGt,
        RawToken::LtSlash => TokenKind::LtSlash,
        RawToken::SlashGt => TokenKind::SlashGt,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Eq => TokenKind::Eq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Question => TokenKind::Question,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Hash => TokenKind::Hash,
        RawToken::Dollar => TokenKind::Dollar,

        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Semi => TokenKind::Semi,
        RawToken::Comma => TokenKind::Comma,

        RawToken::HexInt => int_literal(slice, IntBase::Hex, span, errors),
        RawToken::BinInt => int_literal(slice, IntBase::Bin, span, errors),
        RawToken::OctInt => int_literal(slice, IntBase::Oct, span, errors),
        RawToken::DecInt => int_literal(slice, IntBase::Dec, span, errors),
        RawToken::BasedInt => {
            let base = match slice.as_bytes().first() {
                Some(b'b') => IntBase::BasedBin,
                Some(b'o') => IntBase::BasedOct,
                _ => IntBase::BasedHex,
            };
            int_literal(slice, base, span, errors)
        }
        RawToken::Float => float_literal(slice, span, errors),
        RawToken::Str => TokenKind::Str(string_literal(slice, span, errors)),
        RawToken::RawStr => TokenKind::RawStr(inner(slice, 2, 1).to_string()),
        RawToken::Char => TokenKind::Char(char_literal(slice, span, errors)),
        RawToken::Byte => TokenKind::Byte(byte_literal(slice, span, errors)),
        RawToken::Ident => TokenKind::Ident(slice.to_string()),

        // The scanner filters these out before conversion.
        RawToken::LineComment | RawToken::BlockComment => TokenKind::Eof,
    }
}

pub(crate) fn convert_tag(raw: TagToken, slice: &str, span: Span, errors: &mut Vec<LexError>) -> TokenKind {
    match raw {
        TagToken::Ident => TokenKind::Ident(slice.to_string()),
        TagToken::Eq => TokenKind::Eq,
        TagToken::Str => TokenKind::Str(string_literal(slice, span, errors)),
        TagToken::LBrace => TokenKind::LBrace,
        TagToken::Gt => TokenKind::Gt,
        TagToken::SlashGt => TokenKind::SlashGt,
    }
}

pub(crate) fn convert_text(raw: TextToken, slice: &str) -> TokenKind {
    match raw {
        TextToken::Text => TokenKind::Text(slice.to_string()),
        TextToken::Lt => TokenKind::Lt,
        TextToken::LtSlash => TokenKind::LtSlash,
        TextToken::LtSlashGt => TokenKind::LtSlashGt,
        TextToken::LBrace => TokenKind::LBrace,
        TextToken::RBrace => TokenKind::RBrace,
        TextToken::Gt => TokenKind::Gt,
    }
}

/// Strip `open` leading and `close` trailing bytes of a quoted literal.
fn inner(slice: &str, open: usize, close: usize) -> &str {
    slice.get(open..slice.len().saturating_sub(close)).unwrap_or("")
}

fn int_literal(slice: &str, base: IntBase, span: Span, errors: &mut Vec<LexError>) -> TokenKind {
    let body = slice.get(base.prefix().len()..).unwrap_or("");
    let digits: String = body.chars().filter(|c| *c != '_').collect();
    match u64::from_str_radix(&digits, base.radix()) {
        Ok(value) => TokenKind::Int { value, base },
        Err(_) => {
            let message = if digits.is_empty() {
                format!("missing digits after '{}'", base.prefix())
            } else if let Some(bad) = digits.chars().find(|c| !c.is_digit(base.radix())) {
                format!("invalid digit '{}' in base-{} literal", bad, base.radix())
            } else {
                "integer literal is too large".to_string()
            };
            errors.push(LexError::malformed(span, message));
            TokenKind::Int { value: 0, base }
        }
    }
}

fn float_literal(slice: &str, span: Span, errors: &mut Vec<LexError>) -> TokenKind {
    let cleaned: String = slice.chars().filter(|c| *c != '_').collect();
    match cleaned.parse::<f64>() {
        Ok(value) => TokenKind::Float(value),
        Err(_) => {
            errors.push(
                LexError::malformed(span, "malformed float literal")
                    .with_hint("an exponent needs at least one digit"),
            );
            TokenKind::Float(0.0)
        }
    }
}

fn string_literal(slice: &str, span: Span, errors: &mut Vec<LexError>) -> String {
    unescape(inner(slice, 1, 1), span.start + 1, false, errors)
}

fn char_literal(slice: &str, span: Span, errors: &mut Vec<LexError>) -> char {
    let decoded = unescape(inner(slice, 1, 1), span.start + 1, false, errors);
    let mut chars = decoded.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        (first, _) => {
            errors.push(LexError::malformed(span, "character literal must hold exactly one character"));
            first.unwrap_or('\0')
        }
    }
}

fn byte_literal(slice: &str, span: Span, errors: &mut Vec<LexError>) -> u8 {
    let body = inner(slice, 1, 1);
    if !body.is_ascii() {
        errors.push(
            LexError::malformed(span, "byte literal must be ASCII")
                .with_hint("use a '\\xNN' escape for values above 0x7F"),
        );
        return 0;
    }
    let decoded = unescape(body, span.start + 1, true, errors);
    let mut chars = decoded.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c as u32 as u8,
        (first, _) => {
            errors.push(LexError::malformed(span, "byte literal must hold exactly one byte"));
            first.map(|c| c as u32 as u8).unwrap_or(0)
        }
    }
}

/// Decode backslash escapes. Invalid escapes are reported and dropped.
///
/// `allow_high` permits `\x80`..`\xFF`, which only byte literals accept.
fn unescape(body: &str, body_start: usize, allow_high: bool, errors: &mut Vec<LexError>) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some((j, esc)) = chars.next() else {
            errors.push(LexError::invalid_escape(
                Span::new(body_start + i, body_start + i + 1),
                "incomplete escape sequence".to_string(),
            ));
            break;
        };
        let end = body_start + j + esc.len_utf8();
        match esc {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            '0' => out.push('\0'),
            'x' => {
                let mut hex = String::new();
                while hex.len() < 2 {
                    match chars.peek() {
                        Some(&(_, h)) if h.is_ascii_hexdigit() => {
                            hex.push(h);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                let span = Span::new(body_start + i, end + hex.len());
                match u8::from_str_radix(&hex, 16) {
                    Ok(value) if hex.len() == 2 && (value <= 0x7F || allow_high) => out.push(char::from(value)),
                    Ok(value) if hex.len() == 2 => errors.push(LexError::invalid_escape(
                        span,
                        format!("escape '\\x{:02X}' is out of range; only byte literals accept values above 0x7F", value),
                    )),
                    _ => errors.push(LexError::invalid_escape(
                        span,
                        "'\\x' must be followed by two hex digits".to_string(),
                    )),
                }
            }
            other => errors.push(LexError::invalid_escape(
                Span::new(body_start + i, end),
                format!("unknown escape sequence '\\{}'", other),
            )),
        }
    }

    out
}
