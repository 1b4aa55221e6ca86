// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The parser: token navigation, error recovery, items and statements.
//!
//! Expressions live in `expr.rs`, patterns and types in `pattern.rs` and
//! `ty.rs`, and markup literals in `template.rs`. All of them extend the
//! same [`Parser`].

use std::cell::Cell;
use std::rc::Rc;

use log::{debug, trace};
use zo_ast::expr::Expr;
use zo_ast::item::{
    AbstractDecl, ApplyDecl, ApplyMember, Attribute, EnumDecl, ExtDecl, Field, FnSig, FunDecl,
    FunKeyword, Item, ItemKind, LoadDecl, PackDecl, Param, StateDecl, StateVariant, StructDecl,
    StructKind, TypeAlias, ValDecl, Variant,
};
use zo_ast::stmt::{
    AssignOp, Binding, BindingValue, Block, Directive, Nursery, NurseryEntry, NurseryMode, Stmt,
    StmtKind,
};
use zo_ast::token::{Token, TokenKind};
use zo_ast::ty::{Type, TypeKind};
use zo_ast::{Ident, SourceFile, Span};
use zo_lexer::Scanner;

use crate::error::{ParseError, ParseResult, Reason};

/// Maximum number of errors to collect before stopping.
const MAX_ERRORS: usize = 20;

/// Maximum nesting of expressions, blocks, patterns, types and markup.
pub(crate) const MAX_DEPTH: usize = 100;

/// Leaves one nesting level when dropped.
pub(crate) struct DepthGuard(Rc<Cell<usize>>);

impl Drop for DepthGuard {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

/// The parser for Zo source code.
pub struct Parser<'a> {
    pub(crate) scanner: Scanner<'a>,
    /// End of the last consumed token.
    pub(crate) prev_end: usize,
    /// Number of tokens consumed so far; recovery uses it to detect a stall.
    consumed: usize,
    /// Controls whether `{` can start struct literals (false in conditions)
    pub(crate) allow_brace_expr: bool,
    /// Collected errors during parsing
    errors: Vec<ParseError>,
    /// Current nesting level, shared with the live [`DepthGuard`]s.
    depth: Rc<Cell<usize>>,
    name: Option<String>,
}

/// What a statement-position parse produced.
pub(crate) enum Parsed {
    Stmt(Stmt),
    /// Trailing expression that becomes the block's value.
    Value(Expr),
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            scanner: Scanner::new(source),
            prev_end: 0,
            consumed: 0,
            allow_brace_expr: true,
            errors: Vec::new(),
            depth: Rc::new(Cell::new(0)),
            name: None,
        }
    }

    /// Attach a source name (usually the file path) to the resulting tree.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Record error, return if should continue.
    pub(crate) fn record_error(&mut self, error: ParseError) -> bool {
        debug!("parse error at {}..{}: {}", error.span.start, error.span.end, error.message);
        self.errors.push(error);
        self.errors.len() < MAX_ERRORS
    }

    /// Enter one level of recursive descent. Fails once the input nests
    /// deeper than [`MAX_DEPTH`], before the native stack runs out.
    pub(crate) fn enter_nesting(&mut self) -> Result<DepthGuard, ParseError> {
        let level = self.depth.get() + 1;
        if level > MAX_DEPTH {
            return Err(ParseError::new(
                Reason::NestingTooDeep,
                self.current_span(),
                format!("Nesting exceeds the maximum depth of {}", MAX_DEPTH),
            )
            .with_hint("split the deeply nested part into separate bindings or functions"));
        }
        self.depth.set(level);
        Ok(DepthGuard(Rc::clone(&self.depth)))
    }

    /// Skip to the next item after an error.
    ///
    /// Inside a `pack` body (`nested`) an unmatched `}` belongs to the pack
    /// and is left in place.
    fn synchronize(&mut self, nested: bool) {
        let mut brace_depth = 0;

        while !self.at_end() {
            match self.current_kind() {
                TokenKind::LBrace => {
                    brace_depth += 1;
                    self.advance();
                }
                TokenKind::RBrace => {
                    if brace_depth > 0 {
                        brace_depth -= 1;
                        self.advance();
                        if brace_depth == 0 {
                            break;
                        }
                    } else if nested {
                        break;
                    } else {
                        self.advance();
                    }
                }
                TokenKind::Semi if brace_depth == 0 => {
                    self.advance();
                    break;
                }
                kind if brace_depth == 0 && kind.starts_item() => break,
                _ => {
                    self.advance();
                }
            }
        }
        debug!("synchronized at byte {}", self.current_span().start);
    }

    // =========================================================================
    // Token Navigation
    // =========================================================================

    pub(crate) fn current(&mut self) -> &Token {
        self.scanner.peek()
    }

    pub(crate) fn current_kind(&mut self) -> TokenKind {
        self.scanner.peek().kind.clone()
    }

    pub(crate) fn current_span(&mut self) -> Span {
        self.scanner.peek().span
    }

    pub(crate) fn peek(&mut self, n: usize) -> TokenKind {
        self.scanner.peek_nth(n).kind.clone()
    }

    pub(crate) fn at_end(&mut self) -> bool {
        matches!(self.scanner.peek().kind, TokenKind::Eof)
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.scanner.next_token();
        if token.kind != TokenKind::Eof {
            self.prev_end = token.span.end;
            self.consumed += 1;
        }
        trace!("token {:?} at {}..{}", token.kind, token.span.start, token.span.end);
        token
    }

    pub(crate) fn check(&mut self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.scanner.peek().kind) == std::mem::discriminant(kind)
    }

    pub(crate) fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_expected(kind.display_name()))
        }
    }

    /// An "expected X" error at the current token.
    pub(crate) fn error_expected(&mut self, expected: &str) -> ParseError {
        let token = self.current();
        ParseError::expected(expected, &token.kind, token.span)
    }

    /// The current token cannot start `what`.
    pub(crate) fn error_unexpected(&mut self, what: &str) -> ParseError {
        let token = self.current();
        ParseError::unexpected(what, &token.kind, token.span)
    }

    /// Identifier, including soft keywords such as `state` or `when`.
    pub(crate) fn expect_ident(&mut self) -> Result<Ident, ParseError> {
        let token = self.current().clone();
        let name = match &token.kind {
            TokenKind::Ident(name) => name.clone(),
            kind => match kind.soft_keyword_text() {
                Some(text) => text.to_string(),
                None => return Err(ParseError::expected("a name", &token.kind, token.span)),
            },
        };
        self.advance();
        Ok(Ident::new(name, token.span))
    }

    /// Allow keywords as field names. After `.`, any keyword is a name.
    pub(crate) fn expect_ident_or_keyword(&mut self) -> Result<Ident, ParseError> {
        let token = self.current().clone();
        if let Some(text) = token.kind.keyword_text() {
            self.advance();
            return Ok(Ident::new(text, token.span));
        }
        self.expect_ident()
    }

    pub(crate) fn is_ident_like(kind: &TokenKind) -> bool {
        matches!(kind, TokenKind::Ident(_)) || kind.soft_keyword_text().is_some()
    }

    /// Span from `start` to the end of the last consumed token.
    pub(crate) fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.prev_end.max(start))
    }

    // =========================================================================
    // Top-Level Parsing
    // =========================================================================

    pub fn parse(mut self) -> ParseResult {
        let items = self.parse_items(false);
        let span = Span::new(0, self.scanner.source().len());
        let file = SourceFile { name: self.name.take(), items, span };
        self.finish(file)
    }

    /// Merge lexical and syntax errors into one ordered list.
    fn finish(self, file: SourceFile) -> ParseResult {
        let fatal = self.scanner.is_fatal();
        let (lex_errors, comments) = self.scanner.finish();
        let fatal_at = if fatal {
            lex_errors.iter().find(|e| e.kind.is_fatal()).map(|e| e.span.start)
        } else {
            None
        };

        let mut errors: Vec<ParseError> = lex_errors.into_iter().map(ParseError::from).collect();
        errors.extend(
            self.errors
                .into_iter()
                // everything after a fatal lexical error is fallout from it
                .filter(|e| fatal_at.map_or(true, |at| e.span.start < at)),
        );
        errors.sort_by_key(|e| e.span.start);
        errors.truncate(MAX_ERRORS);

        ParseResult { file, errors, comments }
    }

    /// Items until end of input, or until `}` inside a pack body.
    fn parse_items(&mut self, nested: bool) -> Vec<Item> {
        let mut items = Vec::new();

        while !self.at_end() {
            if nested && self.check(&TokenKind::RBrace) {
                break;
            }
            let before = self.consumed;
            match self.parse_item() {
                Ok(item) => items.push(item),
                Err(e) => {
                    if !self.record_error(e) {
                        break;
                    }
                    self.synchronize(nested);
                    if self.consumed == before {
                        self.advance();
                    }
                }
            }
        }

        items
    }

    fn parse_item(&mut self) -> Result<Item, ParseError> {
        let start = self.current_span().start;

        let mut attrs = Vec::new();
        while self.check(&TokenKind::PercentPercent) {
            attrs.push(self.parse_attribute()?);
        }

        let is_pub = self.match_token(&TokenKind::Pub);

        let kind = match self.current_kind() {
            TokenKind::Pack => self.parse_pack_decl()?,
            TokenKind::Load => self.parse_load_decl()?,
            TokenKind::Hash => {
                let directive = self.parse_directive()?;
                self.match_token(&TokenKind::Semi);
                ItemKind::Directive(directive)
            }
            TokenKind::Type => {
                let alias = self.parse_type_alias()?;
                self.match_token(&TokenKind::Semi);
                ItemKind::TypeAlias(alias)
            }
            TokenKind::Group => self.parse_group_type()?,
            TokenKind::Ext => self.parse_ext_decl()?,
            TokenKind::Abstract => self.parse_abstract_decl()?,
            TokenKind::Apply => self.parse_apply_decl()?,
            TokenKind::Fun | TokenKind::Fn | TokenKind::Raw => ItemKind::Fun(self.parse_fun_decl()?),
            TokenKind::Val => self.parse_val_decl()?,
            TokenKind::Struct | TokenKind::TypeAtState => self.parse_struct_decl()?,
            TokenKind::Enum => self.parse_enum_decl()?,
            _ => return Err(self.error_unexpected("item")),
        };

        Ok(Item { attrs, is_pub, kind, span: self.span_from(start) })
    }

    /// `%%name` or `%%name(arg)`
    fn parse_attribute(&mut self) -> Result<Attribute, ParseError> {
        let start = self.expect(&TokenKind::PercentPercent)?.span.start;
        let name = self.expect_ident()?;
        let arg = if self.match_token(&TokenKind::LParen) {
            let arg = self.expect_ident()?;
            self.expect(&TokenKind::RParen)?;
            Some(arg)
        } else {
            None
        };
        Ok(Attribute { name, arg, span: self.span_from(start) })
    }

    fn parse_pack_decl(&mut self) -> Result<ItemKind, ParseError> {
        let _depth = self.enter_nesting()?;
        self.expect(&TokenKind::Pack)?;
        let name = self.expect_ident()?;

        let items = if self.match_token(&TokenKind::LBrace) {
            let items = self.parse_items(true);
            self.expect(&TokenKind::RBrace)?;
            Some(items)
        } else {
            self.match_token(&TokenKind::Semi);
            None
        };

        Ok(ItemKind::Pack(PackDecl { name, items }))
    }

    /// `load a::b;` or `load a::b::(x, y);`
    fn parse_load_decl(&mut self) -> Result<ItemKind, ParseError> {
        self.expect(&TokenKind::Load)?;
        let mut path = vec![self.expect_ident()?];
        let mut names = Vec::new();

        while self.match_token(&TokenKind::ColonColon) {
            if self.match_token(&TokenKind::LParen) {
                while !self.check(&TokenKind::RParen) {
                    names.push(self.expect_ident()?);
                    if !self.match_token(&TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(&TokenKind::RParen)?;
                if names.is_empty() {
                    return Err(ParseError::new(
                        Reason::ExpectedToken,
                        Span::new(self.prev_end.saturating_sub(1), self.prev_end),
                        "Expected at least one name to load",
                    ));
                }
                break;
            }
            path.push(self.expect_ident()?);
        }

        self.expect(&TokenKind::Semi)?;
        Ok(ItemKind::Load(LoadDecl { path, names }))
    }

    /// `#name value`. Used both as an item and as a statement.
    pub(crate) fn parse_directive(&mut self) -> Result<Directive, ParseError> {
        let start = self.expect(&TokenKind::Hash)?.span.start;
        let name = self.expect_ident()?;
        let value = self.parse_expr()?;
        Ok(Directive { name, value, span: self.span_from(start) })
    }

    fn parse_type_alias(&mut self) -> Result<TypeAlias, ParseError> {
        let start = self.expect(&TokenKind::Type)?.span.start;
        self.parse_type_binding(start)
    }

    /// `Name = Type`
    fn parse_type_binding(&mut self, start: usize) -> Result<TypeAlias, ParseError> {
        let name = self.expect_ident()?;
        self.expect(&TokenKind::Eq)?;
        let ty = self.parse_type()?;
        Ok(TypeAlias { name, ty, span: self.span_from(start) })
    }

    /// `group type A = T and B = U;`
    fn parse_group_type(&mut self) -> Result<ItemKind, ParseError> {
        self.expect(&TokenKind::Group)?;
        self.parse_group_aliases()
            .map(ItemKind::GroupType)
            .map_err(|e| e.into_structural(Reason::MalformedGroupType))
    }

    fn parse_group_aliases(&mut self) -> Result<Vec<TypeAlias>, ParseError> {
        self.expect(&TokenKind::Type)
            .map_err(|e| e.with_hint("a group is written: group type A = T and B = U;"))?;

        let mut aliases = Vec::new();
        loop {
            let start = self.current_span().start;
            aliases.push(self.parse_type_binding(start)?);
            if !self.match_token(&TokenKind::And) {
                break;
            }
        }

        self.expect(&TokenKind::Semi)
            .map_err(|e| e.with_hint("join aliases with 'and' and end the group with ';'"))?;
        Ok(aliases)
    }

    /// `ext name(params) -> Type;`
    fn parse_ext_decl(&mut self) -> Result<ItemKind, ParseError> {
        self.expect(&TokenKind::Ext)?;
        let name = self.expect_ident()?;
        let params = self.parse_params()?;
        self.expect(&TokenKind::Arrow)?;
        let ret = self.parse_type()?;
        self.expect(&TokenKind::Semi)?;
        Ok(ItemKind::Ext(ExtDecl { name, params, ret }))
    }

    /// `abstract Name { fun sig; ... }`
    fn parse_abstract_decl(&mut self) -> Result<ItemKind, ParseError> {
        self.expect(&TokenKind::Abstract)?;
        let name = self.expect_ident()?;
        self.expect(&TokenKind::LBrace)?;

        let mut methods = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            methods.push(self.parse_fn_sig()?);
            self.expect(&TokenKind::Semi)?;
        }

        self.expect(&TokenKind::RBrace)?;
        Ok(ItemKind::Abstract(AbstractDecl { name, methods }))
    }

    /// `apply Capability [for Type] { fun ... | state ... }`
    fn parse_apply_decl(&mut self) -> Result<ItemKind, ParseError> {
        self.expect(&TokenKind::Apply)?;
        let capability = self.expect_ident()?;
        let target = if self.match_token(&TokenKind::For) { Some(self.parse_type()?) } else { None };
        self.expect(&TokenKind::LBrace)?;

        let mut members = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            let member = match self.current_kind() {
                TokenKind::Fun | TokenKind::Fn | TokenKind::Raw => ApplyMember::Fun(self.parse_fun_decl()?),
                TokenKind::State => ApplyMember::State(self.parse_state_decl()?),
                _ => return Err(self.error_expected("'fun' or 'state'")),
            };
            members.push(member);
        }

        self.expect(&TokenKind::RBrace)?;
        Ok(ItemKind::Apply(ApplyDecl { capability, target, members }))
    }

    /// `state Idle and Running { pid: int }`
    fn parse_state_decl(&mut self) -> Result<StateDecl, ParseError> {
        let start = self.expect(&TokenKind::State)?.span.start;

        let mut variants = Vec::new();
        loop {
            let variant_start = self.current_span().start;
            let name = self.expect_ident()?;
            let fields = if self.check(&TokenKind::LBrace) { Some(self.parse_fields()?) } else { None };
            variants.push(StateVariant { name, fields, span: self.span_from(variant_start) });
            if !self.match_token(&TokenKind::And) {
                break;
            }
        }

        self.match_token(&TokenKind::Semi);
        Ok(StateDecl { variants, span: self.span_from(start) })
    }

    /// `[raw] fun name(...) [-> T] { ... }`
    fn parse_fun_decl(&mut self) -> Result<FunDecl, ParseError> {
        let is_raw = self.match_token(&TokenKind::Raw);
        let sig = self.parse_fn_sig()?;
        let body = self.parse_block()?;
        Ok(FunDecl { is_raw, sig, body })
    }

    /// `fun|fn name[<$T>](params) [-> T [->> (ident)]]`
    fn parse_fn_sig(&mut self) -> Result<FnSig, ParseError> {
        let start = self.current_span().start;
        let keyword = match self.current_kind() {
            TokenKind::Fun => FunKeyword::Fun,
            TokenKind::Fn => FunKeyword::Fn,
            _ => return Err(self.error_expected("'fun'")),
        };
        self.advance();

        let name = self.expect_ident()?;
        let generics = self.parse_generics()?;
        let params = self.parse_params()?;

        let mut ret = None;
        let mut error_channel = None;
        if self.match_token(&TokenKind::Arrow) {
            ret = Some(self.parse_type()?);
            if self.match_token(&TokenKind::ArrowGt) {
                self.expect(&TokenKind::LParen)?;
                error_channel = Some(self.expect_ident()?);
                self.expect(&TokenKind::RParen)?;
            }
        }

        Ok(FnSig { keyword, name, generics, params, ret, error_channel, span: self.span_from(start) })
    }

    /// Optional `<$T, $U>`.
    fn parse_generics(&mut self) -> Result<Vec<Ident>, ParseError> {
        let mut generics = Vec::new();
        if !self.match_token(&TokenKind::Lt) {
            return Ok(generics);
        }

        while !self.check(&TokenKind::Gt) {
            self.expect(&TokenKind::Dollar)?;
            generics.push(self.expect_ident()?);
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }

        self.expect(&TokenKind::Gt)?;
        Ok(generics)
    }

    /// `(name: Type, self, ...)`
    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();

        while !self.check(&TokenKind::RParen) {
            let start = self.current_span().start;
            if self.check(&TokenKind::SelfValue) {
                let token = self.advance();
                let name = Ident::new("self", token.span);
                let ty = if self.match_token(&TokenKind::Colon) {
                    self.parse_type()?
                } else {
                    Type { kind: TypeKind::SelfType, span: token.span }
                };
                params.push(Param { name, ty, span: self.span_from(start) });
            } else {
                let name = self.expect_ident()?;
                self.expect(&TokenKind::Colon)?;
                let ty = self.parse_type()?;
                params.push(Param { name, ty, span: self.span_from(start) });
            }

            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }

        self.expect(&TokenKind::RParen)?;
        Ok(params)
    }

    /// `val name: Type = expr;`
    fn parse_val_decl(&mut self) -> Result<ItemKind, ParseError> {
        self.expect(&TokenKind::Val)?;
        let name = self.expect_ident()?;
        self.expect(&TokenKind::Colon)?;
        let ty = self.parse_type()?;
        self.expect(&TokenKind::Eq)?;
        let value = self.parse_expr()?;
        self.expect(&TokenKind::Semi)?;
        Ok(ItemKind::Val(ValDecl { name, ty, value }))
    }

    /// `[type@state] struct [type@state] Name[<$T>] { fields }`
    fn parse_struct_decl(&mut self) -> Result<ItemKind, ParseError> {
        let mut typestate = self.match_token(&TokenKind::TypeAtState);
        self.expect(&TokenKind::Struct)?;
        typestate |= self.match_token(&TokenKind::TypeAtState);

        let name = self.expect_ident()?;
        let generics = self.parse_generics()?;
        let fields = self.parse_fields()?;

        let kind = if typestate { StructKind::Typestate } else { StructKind::Plain };
        Ok(ItemKind::Struct(StructDecl { kind, name, generics, fields }))
    }

    /// `{ [pub] name: Type [= default], ... }`
    fn parse_fields(&mut self) -> Result<Vec<Field>, ParseError> {
        self.expect(&TokenKind::LBrace)?;
        let mut fields = Vec::new();

        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            let start = self.current_span().start;
            let is_pub = self.match_token(&TokenKind::Pub);
            let name = self.expect_ident()?;
            self.expect(&TokenKind::Colon)?;
            let ty = self.parse_type()?;
            let default = if self.match_token(&TokenKind::Eq) { Some(self.parse_expr()?) } else { None };
            fields.push(Field { is_pub, name, ty, default, span: self.span_from(start) });

            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }

        self.expect(&TokenKind::RBrace)?;
        Ok(fields)
    }

    /// `enum Name[<$T>] { V [(T)] [= int], ... }`
    fn parse_enum_decl(&mut self) -> Result<ItemKind, ParseError> {
        self.expect(&TokenKind::Enum)?;
        let name = self.expect_ident()?;
        let generics = self.parse_generics()?;
        self.expect(&TokenKind::LBrace)?;

        let mut variants = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            let start = self.current_span().start;
            let variant_name = self.expect_ident()?;

            let payload = if self.match_token(&TokenKind::LParen) {
                let ty = self.parse_type()?;
                self.expect(&TokenKind::RParen)?;
                Some(ty)
            } else {
                None
            };

            let discriminant = if self.match_token(&TokenKind::Eq) {
                match self.current_kind() {
                    TokenKind::Int { value, .. } => {
                        self.advance();
                        Some(value)
                    }
                    _ => return Err(self.error_expected("integer discriminant")),
                }
            } else {
                None
            };

            variants.push(Variant { name: variant_name, payload, discriminant, span: self.span_from(start) });
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }

        if variants.is_empty() {
            return Err(self.error_expected("enum variant"));
        }

        self.expect(&TokenKind::RBrace)?;
        Ok(ItemKind::Enum(EnumDecl { name, generics, variants }))
    }

    // =========================================================================
    // Statement Parsing
    // =========================================================================

    /// Parse a block, with error recovery.
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let _depth = self.enter_nesting()?;
        let start = self.expect(&TokenKind::LBrace)?.span.start;

        // a block re-enables struct literals even inside a condition
        let old = self.allow_brace_expr;
        self.allow_brace_expr = true;

        let mut stmts = Vec::new();
        let mut value = None;
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            if self.match_token(&TokenKind::Semi) {
                continue;
            }
            let before = self.consumed;
            match self.parse_stmt() {
                Ok(Parsed::Stmt(stmt)) => stmts.push(stmt),
                Ok(Parsed::Value(expr)) => {
                    value = Some(Box::new(expr));
                    break;
                }
                Err(e) => {
                    // Record error but stay within the block
                    if !self.record_error(e) {
                        self.skip_to_closing_brace();
                        break;
                    }
                    self.synchronize_in_block();
                    if self.consumed == before && !self.check(&TokenKind::RBrace) {
                        self.advance();
                    }
                }
            }
        }

        self.allow_brace_expr = old;
        self.expect(&TokenKind::RBrace)?;
        Ok(Block { stmts, value, span: self.span_from(start) })
    }

    /// Synchronize within a block - skip to the next statement boundary.
    fn synchronize_in_block(&mut self) {
        let mut brace_depth = 0;
        while !self.at_end() {
            match self.current_kind() {
                TokenKind::LBrace => brace_depth += 1,
                TokenKind::RBrace if brace_depth == 0 => break,
                TokenKind::RBrace => brace_depth -= 1,
                TokenKind::Semi if brace_depth == 0 => {
                    self.advance();
                    break;
                }
                TokenKind::Imu | TokenKind::Mut | TokenKind::Return | TokenKind::If |
                TokenKind::While | TokenKind::For | TokenKind::Loop | TokenKind::Match |
                TokenKind::Break | TokenKind::Continue | TokenKind::Nursery |
                TokenKind::Hash if brace_depth == 0 => break,
                _ => {}
            }
            self.advance();
        }
        debug!("resumed block at byte {}", self.current_span().start);
    }

    /// Skip to the closing brace of a block.
    fn skip_to_closing_brace(&mut self) {
        let mut depth = 1;
        while !self.at_end() && depth > 0 {
            match self.current_kind() {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => depth -= 1,
                _ => {}
            }
            if depth > 0 {
                self.advance();
            }
        }
    }

    /// Parse a statement, or the trailing value of the enclosing block.
    fn parse_stmt(&mut self) -> Result<Parsed, ParseError> {
        let start = self.current_span().start;

        let kind = match self.current_kind() {
            TokenKind::Imu | TokenKind::Mut => StmtKind::Binding(self.parse_binding()?),
            TokenKind::Nursery => StmtKind::Nursery(self.parse_nursery()?),
            TokenKind::Hash => {
                let directive = self.parse_directive()?;
                self.match_token(&TokenKind::Semi);
                StmtKind::Directive(directive)
            }
            _ => {
                let expr = self.parse_stmt_expr()?;

                if let Some(op) = self.match_assign_op() {
                    let value = self.parse_expr()?;
                    self.expect(&TokenKind::Semi)?;
                    StmtKind::Assign { target: expr, op, value }
                } else if self.match_token(&TokenKind::Semi) {
                    StmtKind::Expr { expr, semi: true }
                } else if self.check(&TokenKind::RBrace) {
                    return Ok(Parsed::Value(expr));
                } else if expr.is_block_like() {
                    StmtKind::Expr { expr, semi: false }
                } else {
                    return Err(self.error_expected("';'"));
                }
            }
        };

        Ok(Parsed::Stmt(Stmt { kind, span: self.span_from(start) }))
    }

    fn match_assign_op(&mut self) -> Option<AssignOp> {
        let op = match self.current_kind() {
            TokenKind::Eq => AssignOp::Assign,
            TokenKind::PlusEq => AssignOp::Add,
            TokenKind::MinusEq => AssignOp::Sub,
            TokenKind::StarEq => AssignOp::Mul,
            TokenKind::SlashEq => AssignOp::Div,
            TokenKind::PercentEq => AssignOp::Mod,
            TokenKind::AmpEq => AssignOp::BitAnd,
            TokenKind::PipeEq => AssignOp::BitOr,
            TokenKind::CaretEq => AssignOp::BitXor,
            TokenKind::LtLtEq => AssignOp::Shl,
            TokenKind::GtGtEq => AssignOp::Shr,
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    /// `imu pat: T = e;`, `imu pat := e;`, `imu name [: T] ::= <template>;`
    fn parse_binding(&mut self) -> Result<Binding, ParseError> {
        let mutable = self.check(&TokenKind::Mut);
        self.advance();

        let pattern = self.parse_pattern()?;
        let ty = if self.match_token(&TokenKind::Colon) { Some(self.parse_type()?) } else { None };

        let value = match self.current_kind() {
            TokenKind::Eq if ty.is_some() => {
                self.advance();
                BindingValue::Expr(self.parse_expr()?)
            }
            TokenKind::ColonEq if ty.is_none() => {
                self.advance();
                BindingValue::Expr(self.parse_expr()?)
            }
            TokenKind::ColonColonEq => {
                let token = self.advance();
                if mutable {
                    return Err(ParseError::new(
                        Reason::UnexpectedToken,
                        token.span,
                        "Template bindings must be immutable",
                    )
                    .with_hint("write 'imu name ::= <...>'"));
                }
                BindingValue::Template(self.parse_template()?)
            }
            _ if ty.is_some() => return Err(self.error_expected("'='")),
            _ => return Err(self.error_expected("':', ':=' or '::='")),
        };

        self.expect(&TokenKind::Semi)?;
        Ok(Binding { mutable, pattern, ty, value })
    }

    /// `nursery { imu name := spawn|await expr; ... }`
    fn parse_nursery(&mut self) -> Result<Nursery, ParseError> {
        let start = self.expect(&TokenKind::Nursery)?.span.start;
        self.expect(&TokenKind::LBrace)?;

        let mut entries = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            let entry_start = self.current_span().start;
            self.expect(&TokenKind::Imu)?;
            let name = self.expect_ident()?;
            self.expect(&TokenKind::ColonEq)?;
            let mode = match self.current_kind() {
                TokenKind::Spawn => NurseryMode::Spawn,
                TokenKind::Await => NurseryMode::Await,
                _ => return Err(self.error_expected("'spawn' or 'await'")),
            };
            self.advance();
            let value = self.parse_expr()?;
            self.expect(&TokenKind::Semi)?;
            entries.push(NurseryEntry { name, mode, value, span: self.span_from(entry_start) });
        }

        self.expect(&TokenKind::RBrace)?;
        Ok(Nursery { entries, span: self.span_from(start) })
    }
}
