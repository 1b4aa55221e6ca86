// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Type syntax.

use zo_ast::token::TokenKind;
use zo_ast::ty::{Primitive, Type, TypeKind};

use crate::error::ParseError;
use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_type(&mut self) -> Result<Type, ParseError> {
        let _depth = self.enter_nesting()?;
        let start = self.current_span().start;

        let kind = match self.current_kind() {
            TokenKind::Ident(name) => match Primitive::from_name(&name) {
                Some(prim) => {
                    self.advance();
                    TypeKind::Primitive(prim)
                }
                None if name == "Fn" && self.peek(1) == TokenKind::LParen => {
                    self.advance();
                    self.parse_fn_type()?
                }
                None => TypeKind::Path(self.parse_path()?),
            },
            kind if Self::is_ident_like(&kind) || kind == TokenKind::ColonColon => {
                TypeKind::Path(self.parse_path()?)
            }
            TokenKind::SelfType => {
                if self.peek(1) == TokenKind::ColonColon {
                    TypeKind::Path(self.parse_path()?)
                } else {
                    self.advance();
                    TypeKind::SelfType
                }
            }
            TokenKind::LBracket => {
                self.advance();
                let len = match self.current_kind() {
                    TokenKind::Int { value, .. } => {
                        self.advance();
                        Some(value)
                    }
                    _ => None,
                };
                self.expect(&TokenKind::RBracket)?;
                let elem = self.parse_type()?;
                TypeKind::Array { len, elem: Box::new(elem) }
            }
            TokenKind::LParen => {
                self.advance();
                TypeKind::Tuple(self.parse_type_list()?)
            }
            TokenKind::Dollar => {
                self.advance();
                TypeKind::Generic(self.expect_ident()?)
            }
            TokenKind::Amp => {
                self.advance();
                let mutable = self.match_token(&TokenKind::Mut);
                let inner = self.parse_type()?;
                TypeKind::Ref { mutable, inner: Box::new(inner) }
            }
            TokenKind::LtSlashGt => {
                self.advance();
                TypeKind::Template
            }
            _ => return Err(self.error_expected("type")),
        };

        Ok(Type { kind, span: self.span_from(start) })
    }

    /// `(A, B) [-> R]` after `Fn`.
    fn parse_fn_type(&mut self) -> Result<TypeKind, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let params = self.parse_type_list()?;
        let ret = if self.match_token(&TokenKind::Arrow) { Some(Box::new(self.parse_type()?)) } else { None };
        Ok(TypeKind::Fn { params, ret })
    }

    /// Comma-separated types through `)`.
    fn parse_type_list(&mut self) -> Result<Vec<Type>, ParseError> {
        let mut types = Vec::new();
        while !self.check(&TokenKind::RParen) {
            types.push(self.parse_type()?);
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(types)
    }
}
