// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Pull-based scanner with three lexical modes.
//!
//! The parser drives the scanner one token at a time. Template literals need
//! a different token grammar for tag interiors and for the text between
//! tags, so the parser flips the mode with [`Scanner::set_mode`]; the
//! scanner then throws away its lookahead and re-scans from the first byte
//! that has not been consumed.

use std::collections::VecDeque;

use log::{debug, trace};
use logos::Logos;
use zo_ast::token::{Token, TokenKind};
use zo_ast::{LineMap, Span};

use crate::lexer::{
    convert_code, convert_tag, convert_text, LexError, LexErrorKind, RawToken, TagToken, TextToken,
};

/// Maximum number of errors to collect before stopping.
const MAX_ERRORS: usize = 20;

/// Which token grammar is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Ordinary source code.
    Code,
    /// Inside `<name ...>` or `</name>`.
    Tag,
    /// Between tags: text runs, `<`, `</`, `{`, `}`.
    Text,
}

enum Inner<'a> {
    Code(logos::Lexer<'a, RawToken>),
    Tag(logos::Lexer<'a, TagToken>),
    Text(logos::Lexer<'a, TextToken>),
}

impl<'a> Inner<'a> {
    fn new(mode: ScanMode, rest: &'a str) -> Self {
        match mode {
            ScanMode::Code => Inner::Code(RawToken::lexer(rest)),
            ScanMode::Tag => Inner::Tag(TagToken::lexer(rest)),
            ScanMode::Text => Inner::Text(TextToken::lexer(rest)),
        }
    }
}

/// One raw scan step, before conversion.
enum Step<'a> {
    Token(TokenKind),
    Comment,
    Error(LexErrorKind, &'a str),
}

/// The scanner for Zo source code.
pub struct Scanner<'a> {
    source: &'a str,
    lines: LineMap,
    mode: ScanMode,
    inner: Inner<'a>,
    /// Byte offset of the slice `inner` is scanning.
    base: usize,
    lookahead: VecDeque<Token>,
    /// End of the last token handed out by `next_token`.
    consumed_end: usize,
    errors: Vec<LexError>,
    comments: Vec<Span>,
    /// Start of the fatal error that stopped scanning.
    fatal_at: Option<usize>,
}

impl<'a> Scanner<'a> {
    /// Create a scanner in code mode.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            lines: LineMap::new(source),
            mode: ScanMode::Code,
            inner: Inner::new(ScanMode::Code, source),
            base: 0,
            lookahead: VecDeque::new(),
            consumed_end: 0,
            errors: Vec::new(),
            comments: Vec::new(),
            fatal_at: None,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    /// Consume and return the next token. Yields `Eof` forever once input
    /// is exhausted or a fatal error occurred.
    pub fn next_token(&mut self) -> Token {
        let token = match self.lookahead.pop_front() {
            Some(token) => token,
            None => self.scan(),
        };
        if token.kind != TokenKind::Eof {
            self.consumed_end = token.span.end;
        }
        token
    }

    /// Look at the next token without consuming it.
    pub fn peek(&mut self) -> &Token {
        self.peek_nth(0)
    }

    /// Look `n` tokens ahead (0 is the next token).
    pub fn peek_nth(&mut self, n: usize) -> &Token {
        while self.lookahead.len() <= n {
            let token = self.scan();
            self.lookahead.push_back(token);
        }
        &self.lookahead[n]
    }

    /// Switch token grammar. Buffered lookahead is discarded and scanning
    /// restarts right after the last consumed token.
    pub fn set_mode(&mut self, mode: ScanMode) {
        if mode == self.mode {
            return;
        }
        let restart = self.consumed_end;
        self.lookahead.clear();
        self.errors.retain(|e| e.span.start < restart);
        self.comments.retain(|c| c.start < restart);
        if self.fatal_at.is_some_and(|at| at >= restart) {
            self.fatal_at = None;
        }
        let rest = self.source.get(restart..).unwrap_or("");
        self.inner = Inner::new(mode, rest);
        self.base = restart;
        self.mode = mode;
        debug!("scanner: {:?} mode at byte {}", mode, restart);
    }

    /// Lexical errors found so far, in source order.
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    /// Spans of every comment scanned in code mode.
    pub fn comments(&self) -> &[Span] {
        &self.comments
    }

    /// True once an unterminated comment or string stopped scanning.
    pub fn is_fatal(&self) -> bool {
        self.fatal_at.is_some()
    }

    /// Take ownership of the collected errors and comment spans.
    pub fn finish(self) -> (Vec<LexError>, Vec<Span>) {
        (self.errors, self.comments)
    }

    fn scan(&mut self) -> Token {
        loop {
            if self.fatal_at.is_some() || self.errors.len() >= MAX_ERRORS {
                return self.eof();
            }

            let (step, range) = match &mut self.inner {
                Inner::Code(lex) => {
                    let Some(result) = lex.next() else { return self.eof() };
                    let range = lex.span();
                    let slice = lex.slice();
                    let span = Span::new(self.base + range.start, self.base + range.end);
                    let step = match result {
                        Ok(RawToken::LineComment | RawToken::BlockComment) => Step::Comment,
                        Ok(raw) => Step::Token(convert_code(raw, slice, span, &mut self.errors)),
                        Err(kind) => Step::Error(kind, slice),
                    };
                    (step, range)
                }
                Inner::Tag(lex) => {
                    let Some(result) = lex.next() else { return self.eof() };
                    let range = lex.span();
                    let slice = lex.slice();
                    let span = Span::new(self.base + range.start, self.base + range.end);
                    let step = match result {
                        Ok(raw) => Step::Token(convert_tag(raw, slice, span, &mut self.errors)),
                        Err(kind) => Step::Error(kind, slice),
                    };
                    (step, range)
                }
                Inner::Text(lex) => {
                    let Some(result) = lex.next() else { return self.eof() };
                    let range = lex.span();
                    let slice = lex.slice();
                    let step = match result {
                        Ok(raw) => Step::Token(convert_text(raw, slice)),
                        Err(kind) => Step::Error(kind, slice),
                    };
                    (step, range)
                }
            };

            let span = Span::new(self.base + range.start, self.base + range.end);
            match step {
                Step::Token(kind) => {
                    trace!("{:?} at {}..{}", kind, span.start, span.end);
                    return self.make_token(kind, span);
                }
                Step::Comment => self.comments.push(span),
                Step::Error(kind, slice) => {
                    self.report(kind, span, slice);
                    if kind.is_fatal() {
                        debug!("scanner: fatal {:?} at byte {}", kind, span.start);
                        self.fatal_at = Some(span.start);
                    }
                }
            }
        }
    }

    fn report(&mut self, kind: LexErrorKind, span: Span, slice: &str) {
        let error = match kind {
            LexErrorKind::UnterminatedComment => LexError::unterminated_comment(span),
            LexErrorKind::UnterminatedString => LexError::unterminated_string(span),
            LexErrorKind::UnterminatedChar => {
                let quote = slice.chars().next().unwrap_or('\'');
                LexError::unterminated_char(span, quote)
            }
            LexErrorKind::UnexpectedChar => {
                let ch = slice.chars().next().unwrap_or('?');
                LexError::unexpected_char(ch, span)
            }
            other => LexError::new(other, span, other.to_string()),
        };
        self.errors.push(error);
    }

    fn make_token(&self, kind: TokenKind, span: Span) -> Token {
        let (line, col) = self.lines.offset_to_line_col(span.start);
        Token { kind, span, line, col }
    }

    fn eof(&self) -> Token {
        let end = self.source.len();
        self.make_token(TokenKind::Eof, Span::new(end, end))
    }
}

/// Result of lexing: tokens plus any errors found.
#[derive(Debug)]
pub struct LexResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl LexResult {
    /// Returns true if lexing completed without errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Scan a whole source in code mode. The token list always ends with `Eof`.
pub fn tokenize(source: &str) -> LexResult {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }
    let (errors, _) = scanner.finish();
    LexResult { tokens, errors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zo_ast::token::IntBase;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let result = tokenize(src);
        assert!(result.is_ok(), "unexpected errors: {:?}", result.errors);
        result.tokens.into_iter().map(|t| t.kind).collect()
    }

    fn int(value: u64, base: IntBase) -> TokenKind {
        TokenKind::Int { value, base }
    }

    #[test]
    fn maximal_munch_operators() {
        assert_eq!(
            kinds("::= :: := : ->> -> |> || | ..= ... .. ."),
            vec![
                TokenKind::ColonColonEq,
                TokenKind::ColonColon,
                TokenKind::ColonEq,
                TokenKind::Colon,
                TokenKind::ArrowGt,
                TokenKind::Arrow,
                TokenKind::PipeGt,
                TokenKind::PipePipe,
                TokenKind::Pipe,
                TokenKind::DotDotEq,
                TokenKind::Ellipsis,
                TokenKind::DotDot,
                TokenKind::Dot,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("<<= <= << < </> <> %% %= %"),
            vec![
                TokenKind::LtLtEq,
                TokenKind::LtEq,
                TokenKind::LtLt,
                TokenKind::Lt,
                TokenKind::LtSlashGt,
                TokenKind::LtGt,
                TokenKind::PercentPercent,
                TokenKind::PercentEq,
                TokenKind::Percent,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            kinds("type@state type typed fun fn fnord when _ self Self"),
            vec![
                TokenKind::TypeAtState,
                TokenKind::Type,
                TokenKind::Ident("typed".into()),
                TokenKind::Fun,
                TokenKind::Fn,
                TokenKind::Ident("fnord".into()),
                TokenKind::When,
                TokenKind::Ident("_".into()),
                TokenKind::SelfValue,
                TokenKind::SelfType,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn integer_families() {
        assert_eq!(
            kinds("1_000 0b1010 0o17 0xff_ff b#101 o#17 x#FF"),
            vec![
                int(1000, IntBase::Dec),
                int(10, IntBase::Bin),
                int(15, IntBase::Oct),
                int(0xffff, IntBase::Hex),
                int(5, IntBase::BasedBin),
                int(15, IntBase::BasedOct),
                int(255, IntBase::BasedHex),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn floats_and_ranges() {
        assert_eq!(
            kinds("1.5 2e3 1_0.2_5 0..10"),
            vec![
                TokenKind::Float(1.5),
                TokenKind::Float(2000.0),
                TokenKind::Float(10.25),
                int(0, IntBase::Dec),
                TokenKind::DotDot,
                int(10, IntBase::Dec),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn malformed_numbers_still_produce_tokens() {
        let result = tokenize("b#102 1e 99999999999999999999 0x 0b 0xg");
        let kinds: Vec<_> = result.tokens.iter().map(|t| t.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                int(0, IntBase::BasedBin),
                TokenKind::Float(0.0),
                int(0, IntBase::Dec),
                int(0, IntBase::Hex),
                int(0, IntBase::Bin),
                int(0, IntBase::Hex),
                TokenKind::Eof,
            ]
        );
        assert_eq!(result.errors.len(), 6);
        assert!(result.errors.iter().all(|e| e.kind == LexErrorKind::MalformedLiteral));
        assert!(result.errors[0].message.contains("'2'"));
        assert!(result.errors[3].message.contains("missing digits after '0x'"));
        assert!(result.errors[4].message.contains("missing digits after '0b'"));
        assert!(result.errors[5].message.contains("invalid digit 'g'"));
        assert_eq!(result.errors[5].span, Span::new(36, 39));
    }

    #[test]
    fn string_char_and_byte_escapes() {
        assert_eq!(
            kinds(r#""a\tb\"\x41" '\n' '\'' `\xFF` `z` $"raw\n""#),
            vec![
                TokenKind::Str("a\tb\"A".into()),
                TokenKind::Char('\n'),
                TokenKind::Char('\''),
                TokenKind::Byte(0xFF),
                TokenKind::Byte(b'z'),
                TokenKind::RawStr("raw\\n".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn invalid_escape_is_dropped_and_reported() {
        let result = tokenize(r#""a\qb" "\xFF""#);
        assert_eq!(result.tokens[0].kind, TokenKind::Str("ab".into()));
        assert_eq!(result.tokens[1].kind, TokenKind::Str(String::new()));
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors.iter().all(|e| e.kind == LexErrorKind::InvalidEscape));
        // The escape itself is highlighted, not the whole string.
        assert_eq!(result.errors[0].span, Span::new(2, 4));
    }

    #[test]
    fn strings_may_span_lines() {
        let result = tokenize("\"one\ntwo\" x");
        assert!(result.is_ok());
        assert_eq!(result.tokens[0].kind, TokenKind::Str("one\ntwo".into()));
        assert_eq!((result.tokens[1].line, result.tokens[1].col), (2, 6));
    }

    #[test]
    fn unterminated_string_is_fatal() {
        let mut scanner = Scanner::new("imu s := \"abc\n; fun");
        let mut last = scanner.next_token();
        while last.kind != TokenKind::Eof {
            last = scanner.next_token();
        }
        assert!(scanner.is_fatal());
        assert_eq!(scanner.errors().len(), 1);
        assert_eq!(scanner.errors()[0].kind, LexErrorKind::UnterminatedString);
        assert_eq!(scanner.errors()[0].span.start, 9);
        assert_eq!(scanner.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn unterminated_char_is_recoverable() {
        let result = tokenize("'ab\nx");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind, LexErrorKind::UnterminatedChar);
        assert_eq!(result.tokens[0].kind, TokenKind::Ident("x".into()));
    }

    #[test]
    fn nested_block_comments() {
        let src = "a -* one -* two -* three *- *- *- b";
        assert_eq!(
            kinds(src),
            vec![TokenKind::Ident("a".into()), TokenKind::Ident("b".into()), TokenKind::Eof]
        );
        let result = tokenize("x -* -* inner *- still a comment");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind, LexErrorKind::UnterminatedComment);
        // The error points at the outermost opening marker.
        assert_eq!(result.errors[0].span.start, 2);
        assert_eq!(result.tokens.len(), 2);
    }

    #[test]
    fn comment_depth_needs_every_close_marker() {
        for depth in 1..6 {
            let open = "-* ".repeat(depth);
            let closed = format!("{}{}x", open, "*- ".repeat(depth));
            assert_eq!(kinds(&closed), vec![TokenKind::Ident("x".into()), TokenKind::Eof]);

            let short = format!("{}{}x", open, "*- ".repeat(depth - 1));
            let result = tokenize(&short);
            assert_eq!(result.errors.len(), 1, "depth {} closed {} times", depth, depth - 1);
            assert_eq!(result.tokens.len(), 1);
        }
    }

    #[test]
    fn comment_spans_are_recorded() {
        let src = "-- lead\nfun -* doc *- main";
        let mut scanner = Scanner::new(src);
        while scanner.next_token().kind != TokenKind::Eof {}
        let comments: Vec<_> = scanner.comments().iter().map(|s| &src[s.start..s.end]).collect();
        assert_eq!(comments, vec!["-- lead", "-* doc *-"]);
    }

    #[test]
    fn unexpected_character() {
        let result = tokenize("a @ b");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind, LexErrorKind::UnexpectedChar);
        assert_eq!(result.errors[0].span, Span::new(2, 3));
        assert_eq!(result.tokens.len(), 3);
    }

    #[test]
    fn span_fidelity() {
        let src = "pack demo;\nfun add(a: int, b: int) -> int { a + b } -- sum\n#run add(1, 0x2);";
        let result = tokenize(src);
        assert!(result.is_ok());
        for token in &result.tokens {
            let lexeme = token.lexeme(src);
            if token.kind == TokenKind::Eof {
                assert_eq!(lexeme, "");
                continue;
            }
            let relexed = tokenize(lexeme);
            assert_eq!(relexed.tokens.len(), 2, "lexeme {:?}", lexeme);
            assert_eq!(relexed.tokens[0].kind, token.kind);
        }
    }

    #[test]
    fn line_and_column() {
        let result = tokenize("imu x := 1;\n  x += 2;");
        let plus_eq = result.tokens.iter().find(|t| t.kind == TokenKind::PlusEq);
        assert_eq!(plus_eq.map(|t| (t.line, t.col)), Some((2, 5)));
    }

    #[test]
    fn peek_does_not_consume() {
        let mut scanner = Scanner::new("a b c");
        assert_eq!(scanner.peek_nth(2).kind, TokenKind::Ident("c".into()));
        assert_eq!(scanner.peek().kind, TokenKind::Ident("a".into()));
        assert_eq!(scanner.next_token().kind, TokenKind::Ident("a".into()));
        assert_eq!(scanner.next_token().kind, TokenKind::Ident("b".into()));
    }

    #[test]
    fn mode_switching_rescans_lookahead() {
        let src = "<p class=\"x\">Hello {name}!</p>";
        let mut scanner = Scanner::new(src);
        assert_eq!(scanner.next_token().kind, TokenKind::Lt);
        // Peeking in code mode sees an identifier; after the switch the
        // same bytes are rescanned with the tag grammar.
        scanner.peek_nth(3);
        scanner.set_mode(ScanMode::Tag);
        assert_eq!(scanner.next_token().kind, TokenKind::Ident("p".into()));
        assert_eq!(scanner.next_token().kind, TokenKind::Ident("class".into()));
        assert_eq!(scanner.next_token().kind, TokenKind::Eq);
        assert_eq!(scanner.next_token().kind, TokenKind::Str("x".into()));
        assert_eq!(scanner.next_token().kind, TokenKind::Gt);

        scanner.set_mode(ScanMode::Text);
        assert_eq!(scanner.next_token().kind, TokenKind::Text("Hello ".into()));
        assert_eq!(scanner.next_token().kind, TokenKind::LBrace);
        scanner.set_mode(ScanMode::Code);
        assert_eq!(scanner.next_token().kind, TokenKind::Ident("name".into()));
        assert_eq!(scanner.next_token().kind, TokenKind::RBrace);
        scanner.set_mode(ScanMode::Text);
        assert_eq!(scanner.next_token().kind, TokenKind::Text("!".into()));
        assert_eq!(scanner.next_token().kind, TokenKind::LtSlash);
        scanner.set_mode(ScanMode::Tag);
        let close = scanner.next_token();
        assert_eq!(close.kind, TokenKind::Ident("p".into()));
        assert_eq!(close.lexeme(src), "p");
        assert_eq!(scanner.next_token().kind, TokenKind::Gt);
        scanner.set_mode(ScanMode::Code);
        assert_eq!(scanner.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn text_mode_drops_errors_from_discarded_lookahead() {
        // In code mode the apostrophe starts a char literal and fails.
        let mut scanner = Scanner::new("<>don't panic</>");
        assert_eq!(scanner.next_token().kind, TokenKind::LtGt);
        scanner.peek_nth(2);
        assert!(!scanner.errors().is_empty());
        scanner.set_mode(ScanMode::Text);
        assert!(scanner.errors().is_empty());
        assert_eq!(scanner.next_token().kind, TokenKind::Text("don't panic".into()));
        assert_eq!(scanner.next_token().kind, TokenKind::LtSlashGt);
    }
}
