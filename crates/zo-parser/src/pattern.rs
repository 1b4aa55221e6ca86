// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Pattern parsing for bindings, `match` arms, `for` loops and `is`.

use zo_ast::expr::Lit;
use zo_ast::pattern::{FieldPattern, Pattern, PatternKind};
use zo_ast::token::TokenKind;

use crate::error::ParseError;
use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_pattern(&mut self) -> Result<Pattern, ParseError> {
        let _depth = self.enter_nesting()?;
        let start = self.current_span().start;

        let kind = match self.current_kind() {
            TokenKind::Ident(name) if name == "_" => {
                self.advance();
                PatternKind::Wildcard
            }
            kind if Self::is_ident_like(&kind)
                || kind == TokenKind::ColonColon
                || (kind == TokenKind::SelfType && self.peek(1) == TokenKind::ColonColon) =>
            {
                let path = self.parse_path()?;
                let arg = if self.match_token(&TokenKind::LParen) {
                    let inner = self.parse_pattern()?;
                    self.expect(&TokenKind::RParen)?;
                    Some(Box::new(inner))
                } else {
                    None
                };

                match (arg, path.is_simple()) {
                    (None, true) => {
                        let mut segments = path.segments;
                        match segments.pop() {
                            Some(ident) => PatternKind::Ident(ident),
                            None => return Err(self.error_expected("pattern")),
                        }
                    }
                    (arg, _) => PatternKind::Path { path, arg },
                }
            }
            TokenKind::Minus => {
                self.advance();
                let lit = match self.current_kind() {
                    TokenKind::Int { value, base } => Lit::Int { value, base },
                    TokenKind::Float(f) => Lit::Float(f),
                    _ => return Err(self.error_expected("number after '-'")),
                };
                self.advance();
                PatternKind::Lit { lit, negative: true }
            }
            TokenKind::LParen => {
                self.advance();
                let items = self.parse_pattern_list(&TokenKind::RParen)?;
                PatternKind::Tuple(items)
            }
            TokenKind::LBracket => {
                self.advance();
                let items = self.parse_pattern_list(&TokenKind::RBracket)?;
                PatternKind::Array(items)
            }
            TokenKind::LBrace => PatternKind::Struct(self.parse_field_patterns()?),
            other => match Self::literal_of(&other) {
                Some(lit) => {
                    self.advance();
                    PatternKind::Lit { lit, negative: false }
                }
                None => return Err(self.error_expected("pattern")),
            },
        };

        Ok(Pattern { kind, span: self.span_from(start) })
    }

    fn literal_of(kind: &TokenKind) -> Option<Lit> {
        Some(match kind {
            TokenKind::Int { value, base } => Lit::Int { value: *value, base: *base },
            TokenKind::Float(f) => Lit::Float(*f),
            TokenKind::Bool(b) => Lit::Bool(*b),
            TokenKind::Char(c) => Lit::Char(*c),
            TokenKind::Byte(b) => Lit::Byte(*b),
            TokenKind::Str(s) => Lit::Str(s.clone()),
            TokenKind::RawStr(s) => Lit::RawStr(s.clone()),
            _ => return None,
        })
    }

    /// Comma-separated patterns through the closing delimiter.
    fn parse_pattern_list(&mut self, close: &TokenKind) -> Result<Vec<Pattern>, ParseError> {
        let mut items = Vec::new();
        while !self.check(close) {
            items.push(self.parse_pattern()?);
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(close)?;
        Ok(items)
    }

    /// `{ name, other: sub }`
    fn parse_field_patterns(&mut self) -> Result<Vec<FieldPattern>, ParseError> {
        self.expect(&TokenKind::LBrace)?;

        let mut fields = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            let start = self.current_span().start;
            let name = self.expect_ident()?;
            let pattern = if self.match_token(&TokenKind::Colon) { Some(self.parse_pattern()?) } else { None };
            fields.push(FieldPattern { name, pattern, span: self.span_from(start) });
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }

        self.expect(&TokenKind::RBrace)?;
        Ok(fields)
    }
}
