// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression parsing using Pratt binding powers.

use log::debug;
use zo_ast::expr::{
    BinOp, Body, Closure, ClosureParam, Expr, ExprKind, FieldInit, FieldInitStyle, IfExpr, Lit,
    MatchArm, UnaryOp,
};
use zo_ast::token::{IntBase, TokenKind};
use zo_ast::{Ident, Path, Span};

use crate::error::{ParseError, Reason};
use crate::parser::Parser;

/// Where a control construct (`loop`, `while`, `for`, `if`) appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ControlContext {
    /// At the start of a statement. A block-bodied construct ends the
    /// statement right after its closing brace.
    Statement,
    /// Inside a larger expression. The construct is one operand.
    Expression,
}

impl<'a> Parser<'a> {
    // =========================================================================
    // Expression Parsing
    // =========================================================================

    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_expr_bp(0)
    }

    /// Disallow brace-started constructs in control flow conditions.
    pub(crate) fn parse_expr_no_braces(&mut self) -> Result<Expr, ParseError> {
        let old = self.allow_brace_expr;
        self.allow_brace_expr = false;
        let result = self.parse_expr_bp(0);
        self.allow_brace_expr = old;
        result
    }

    /// Re-enable struct literals inside delimiters, even within a condition.
    pub(crate) fn parse_expr_in_delims(&mut self) -> Result<Expr, ParseError> {
        let old = self.allow_brace_expr;
        self.allow_brace_expr = true;
        let result = self.parse_expr_bp(0);
        self.allow_brace_expr = old;
        result
    }

    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let _depth = self.enter_nesting()?;
        let lhs = self.parse_prefix()?;
        self.parse_expr_rest(lhs, min_bp)
    }

    /// The operator loop, continuing from an already parsed operand.
    fn parse_expr_rest(&mut self, mut lhs: Expr, min_bp: u8) -> Result<Expr, ParseError> {
        let start = lhs.span.start;

        loop {
            let kind = self.current_kind();

            if let Some(bp) = Self::postfix_bp(&kind) {
                if bp < min_bp {
                    break;
                }
                lhs = self.parse_postfix(lhs)?;
                continue;
            }

            match kind {
                TokenKind::As => {
                    if Self::CAST_BP < min_bp {
                        break;
                    }
                    self.advance();
                    let ty = self.parse_type()?;
                    lhs = Expr::new(ExprKind::Cast { expr: Box::new(lhs), ty }, self.span_from(start));
                    continue;
                }
                TokenKind::When => {
                    if Self::TERNARY_BP < min_bp {
                        break;
                    }
                    lhs = self.parse_ternary(lhs)?;
                    continue;
                }
                TokenKind::Question => {
                    // inside a guard, `?` belongs to the enclosing ternary
                    if min_bp > Self::TERNARY_BP {
                        break;
                    }
                    let span = self.current_span();
                    return Err(ParseError::new(Reason::UnguardedTernary, span, "Ternary is missing its 'when' guard")
                        .with_hint("write 'cond when guard ? then : else'"));
                }
                _ => {}
            }

            if let Some((l_bp, r_bp)) = Self::infix_bp(&kind) {
                if l_bp < min_bp {
                    break;
                }
                self.advance();

                if matches!(kind, TokenKind::DotDot | TokenKind::DotDotEq) {
                    let end = self.parse_expr_bp(r_bp)?;
                    let span = Span::new(start, end.span.end);
                    lhs = Expr::new(
                        ExprKind::Range {
                            start: Box::new(lhs),
                            end: Box::new(end),
                            inclusive: kind == TokenKind::DotDotEq,
                        },
                        span,
                    );
                    continue;
                }

                let Some(op) = Self::binop(&kind) else { break };
                let rhs = self.parse_expr_bp(r_bp)?;
                let span = Span::new(start, rhs.span.end);
                lhs = Expr::new(ExprKind::Binary { op, left: Box::new(lhs), right: Box::new(rhs) }, span);
                continue;
            }

            break;
        }

        Ok(lhs)
    }

    /// Expression at the start of a statement.
    pub(crate) fn parse_stmt_expr(&mut self) -> Result<Expr, ParseError> {
        match self.current_kind() {
            TokenKind::Loop | TokenKind::While | TokenKind::For | TokenKind::If => {
                self.parse_control(ControlContext::Statement)
            }
            TokenKind::Match => self.parse_match_expr(),
            TokenKind::LBrace => {
                let block = self.parse_block()?;
                let span = block.span;
                Ok(Expr::new(ExprKind::Block(block), span))
            }
            _ => self.parse_expr(),
        }
    }

    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        let start = self.current_span().start;

        match self.current_kind() {
            TokenKind::Int { value, base } => self.literal(Lit::Int { value, base }),
            TokenKind::Float(f) => self.literal(Lit::Float(f)),
            TokenKind::Bool(b) => self.literal(Lit::Bool(b)),
            TokenKind::Char(c) => self.literal(Lit::Char(c)),
            TokenKind::Byte(b) => self.literal(Lit::Byte(b)),
            TokenKind::Str(s) => self.literal(Lit::Str(s)),
            TokenKind::RawStr(s) => self.literal(Lit::RawStr(s)),
            kind if Self::is_ident_like(&kind) || kind == TokenKind::ColonColon => {
                let path = self.parse_path()?;
                self.finish_path_expr(path)
            }
            TokenKind::SelfValue => {
                self.advance();
                Ok(Expr::new(ExprKind::SelfValue, self.span_from(start)))
            }
            TokenKind::SelfType => {
                if self.peek(1) == TokenKind::ColonColon {
                    let path = self.parse_path()?;
                    return self.finish_path_expr(path);
                }
                self.advance();
                Ok(Expr::new(ExprKind::SelfType, self.span_from(start)))
            }
            TokenKind::LParen => self.parse_paren_or_tuple(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => {
                let block = self.parse_block()?;
                let span = block.span;
                Ok(Expr::new(ExprKind::Block(block), span))
            }
            TokenKind::Fn => self.parse_closure(),
            TokenKind::If | TokenKind::Loop | TokenKind::While | TokenKind::For => {
                self.parse_control(ControlContext::Expression)
            }
            TokenKind::Match => self.parse_match_expr(),
            TokenKind::Lt | TokenKind::LtGt => {
                let template = self.parse_template()?;
                let span = template.span;
                Ok(Expr::new(ExprKind::Template(template), span))
            }
            TokenKind::Return => {
                self.advance();
                let value = if self.is_expr_start() { Some(Box::new(self.parse_expr()?)) } else { None };
                Ok(Expr::new(ExprKind::Return(value), self.span_from(start)))
            }
            TokenKind::Break => {
                self.advance();
                Ok(Expr::new(ExprKind::Break, self.span_from(start)))
            }
            TokenKind::Continue => {
                self.advance();
                Ok(Expr::new(ExprKind::Continue, self.span_from(start)))
            }
            TokenKind::Ellipsis => {
                self.advance();
                Ok(Expr::new(ExprKind::Ellipsis, self.span_from(start)))
            }
            TokenKind::Bang | TokenKind::Minus | TokenKind::Plus => {
                let op = match self.advance().kind {
                    TokenKind::Bang => UnaryOp::Not,
                    TokenKind::Minus => UnaryOp::Neg,
                    _ => UnaryOp::Plus,
                };
                let operand = self.parse_expr_bp(Self::PREFIX_BP)?;
                let span = Span::new(start, operand.span.end);
                Ok(Expr::new(ExprKind::Unary { op, operand: Box::new(operand) }, span))
            }
            _ => Err(self.error_unexpected("expression")),
        }
    }

    fn literal(&mut self, lit: Lit) -> Result<Expr, ParseError> {
        let token = self.advance();
        Ok(Expr::new(ExprKind::Lit(lit), token.span))
    }

    /// `name`, `a::b`, `::a::b` or `Self::Variant`.
    pub(crate) fn parse_path(&mut self) -> Result<Path, ParseError> {
        let start = self.current_span().start;
        let absolute = self.match_token(&TokenKind::ColonColon);

        let first = if !absolute && self.check(&TokenKind::SelfType) {
            let token = self.advance();
            Ident::new("Self", token.span)
        } else {
            self.expect_ident()?
        };

        let mut segments = vec![first];
        while self.check(&TokenKind::ColonColon) && Self::is_ident_like(&self.peek(1)) {
            self.advance();
            segments.push(self.expect_ident()?);
        }

        Ok(Path { absolute, segments, span: self.span_from(start) })
    }

    /// A parsed path becomes an identifier, a path or a struct literal.
    fn finish_path_expr(&mut self, path: Path) -> Result<Expr, ParseError> {
        if self.allow_brace_expr && self.check(&TokenKind::LBrace) && self.looks_like_struct_literal() {
            return self.parse_struct_literal(path);
        }

        let span = path.span;
        if path.is_simple() {
            let mut segments = path.segments;
            if let Some(ident) = segments.pop() {
                return Ok(Expr::new(ExprKind::Ident(ident), span));
            }
            return Err(ParseError::new(Reason::ExpectedToken, span, "Expected name"));
        }
        Ok(Expr::new(ExprKind::Path(path), span))
    }

    /// `{}` or `{ name` followed by `:`, `=`, `,` or `}`.
    fn looks_like_struct_literal(&mut self) -> bool {
        let first = self.peek(1);
        if first == TokenKind::RBrace {
            return true;
        }
        Self::is_ident_like(&first)
            && matches!(
                self.peek(2),
                TokenKind::Colon | TokenKind::Eq | TokenKind::Comma | TokenKind::RBrace
            )
    }

    fn parse_struct_literal(&mut self, path: Path) -> Result<Expr, ParseError> {
        let start = path.span.start;
        self.expect(&TokenKind::LBrace)?;

        let mut fields = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            let field_start = self.current_span().start;
            let name = self.expect_ident()?;

            let (style, value) = if self.match_token(&TokenKind::Colon) {
                (FieldInitStyle::Colon, Some(self.parse_expr_in_delims()?))
            } else if self.match_token(&TokenKind::Eq) {
                (FieldInitStyle::Eq, Some(self.parse_expr_in_delims()?))
            } else {
                (FieldInitStyle::Shorthand, None)
            };

            fields.push(FieldInit { name, value, style, span: self.span_from(field_start) });
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }

        self.expect(&TokenKind::RBrace)?;
        Ok(Expr::new(ExprKind::StructLit { path, fields }, self.span_from(start)))
    }

    /// `()`, `(e)`, `(e,)` or `(a, b)`.
    fn parse_paren_or_tuple(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect(&TokenKind::LParen)?.span.start;

        if self.match_token(&TokenKind::RParen) {
            return Ok(Expr::new(ExprKind::Tuple(Vec::new()), self.span_from(start)));
        }

        let first = self.parse_expr_in_delims()?;
        if self.match_token(&TokenKind::RParen) {
            return Ok(Expr::new(ExprKind::Paren(Box::new(first)), self.span_from(start)));
        }

        self.expect(&TokenKind::Comma)
            .map_err(|e| e.with_hint("separate tuple elements with ','"))?;
        let mut items = vec![first];
        while !self.check(&TokenKind::RParen) {
            items.push(self.parse_expr_in_delims()?);
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }

        self.expect(&TokenKind::RParen)?;
        Ok(Expr::new(ExprKind::Tuple(items), self.span_from(start)))
    }

    fn parse_array_literal(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect(&TokenKind::LBracket)?.span.start;

        let mut items = Vec::new();
        while !self.check(&TokenKind::RBracket) {
            items.push(self.parse_expr_in_delims()?);
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }

        self.expect(&TokenKind::RBracket)?;
        Ok(Expr::new(ExprKind::Array(items), self.span_from(start)))
    }

    /// `fn(x, y: int) [-> T] => expr` or `fn(...) [-> T] { ... }`
    fn parse_closure(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect(&TokenKind::Fn)?.span.start;
        self.expect(&TokenKind::LParen)?;

        let mut params = Vec::new();
        while !self.check(&TokenKind::RParen) {
            let param_start = self.current_span().start;
            let name = self.expect_ident()?;
            let ty = if self.match_token(&TokenKind::Colon) { Some(self.parse_type()?) } else { None };
            params.push(ClosureParam { name, ty, span: self.span_from(param_start) });
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;

        let ret = if self.match_token(&TokenKind::Arrow) { Some(self.parse_type()?) } else { None };

        let body = if self.check(&TokenKind::LBrace) {
            Body::Block(self.parse_block()?)
        } else {
            self.expect(&TokenKind::FatArrow)
                .map_err(|e| e.with_hint("closure bodies are '=> expr' or a block"))?;
            Body::Arrow(Box::new(self.parse_expr()?))
        };

        Ok(Expr::new(ExprKind::Closure(Closure { params, ret, body }), self.span_from(start)))
    }

    fn parse_postfix(&mut self, lhs: Expr) -> Result<Expr, ParseError> {
        let start = lhs.span.start;

        match self.current_kind() {
            TokenKind::LParen => {
                self.advance();
                let args = self.parse_args()?;
                Ok(Expr::new(ExprKind::Call { callee: Box::new(lhs), args }, self.span_from(start)))
            }
            TokenKind::LBracket => {
                self.advance();
                let index = self.parse_expr_in_delims()?;
                self.expect(&TokenKind::RBracket)?;
                Ok(Expr::new(
                    ExprKind::Index { object: Box::new(lhs), index: Box::new(index) },
                    self.span_from(start),
                ))
            }
            TokenKind::Is => {
                self.advance();
                let pattern = self.parse_pattern()?;
                Ok(Expr::new(ExprKind::Is { expr: Box::new(lhs), pattern }, self.span_from(start)))
            }
            _ => {
                self.expect(&TokenKind::Dot)?;
                self.parse_member(lhs)
            }
        }
    }

    /// What follows `.`: a field name or a tuple index.
    fn parse_member(&mut self, lhs: Expr) -> Result<Expr, ParseError> {
        let start = lhs.span.start;

        match self.current_kind() {
            TokenKind::Int { value, base: IntBase::Dec } => {
                let token = self.advance();
                let index = u32::try_from(value).map_err(|_| {
                    ParseError::new(Reason::UnexpectedToken, token.span, "Tuple index is too large")
                })?;
                Ok(Expr::new(ExprKind::TupleIndex { object: Box::new(lhs), index }, self.span_from(start)))
            }
            TokenKind::Float(_) => {
                // `t.0.1` scans as `t`, `.`, `0.1`
                let token = self.advance();
                let text = token.lexeme(self.scanner.source());
                let indexes = text
                    .split_once('.')
                    .and_then(|(a, b)| Some((a.parse::<u32>().ok()?, b.parse::<u32>().ok()?)));
                let Some((first, second)) = indexes else {
                    return Err(ParseError::expected("field name or tuple index", &token.kind, token.span));
                };
                let first_end = token.span.start + text.find('.').unwrap_or(0);
                let inner = Expr::new(
                    ExprKind::TupleIndex { object: Box::new(lhs), index: first },
                    Span::new(start, first_end),
                );
                Ok(Expr::new(ExprKind::TupleIndex { object: Box::new(inner), index: second }, self.span_from(start)))
            }
            _ => {
                let field = self.expect_ident_or_keyword()?;
                Ok(Expr::new(ExprKind::Field { object: Box::new(lhs), field }, self.span_from(start)))
            }
        }
    }

    /// Call arguments after `(`, through the closing `)`.
    fn parse_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        while !self.check(&TokenKind::RParen) {
            args.push(self.parse_expr_in_delims()?);
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }

    /// `cond when guard ? then : else`, with `cond` already parsed.
    fn parse_ternary(&mut self, cond: Expr) -> Result<Expr, ParseError> {
        let start = cond.span.start;
        self.expect(&TokenKind::When)?;
        let guard = self.parse_expr_bp(Self::GUARD_BP)?;

        if !self.match_token(&TokenKind::Question) {
            return Err(self
                .error_expected("'?'")
                .into_structural(Reason::IncompleteTernary)
                .with_hint("a guarded ternary reads 'cond when guard ? then : else'"));
        }
        let then_branch = self.parse_expr_bp(0)?;

        if !self.match_token(&TokenKind::Colon) {
            return Err(self
                .error_expected("':'")
                .into_structural(Reason::IncompleteTernary)
                .with_hint("add ': else-value' to finish the ternary"));
        }
        // right-associative
        let else_branch = self.parse_expr_bp(Self::TERNARY_BP)?;

        let span = Span::new(start, else_branch.span.end);
        Ok(Expr::new(
            ExprKind::Ternary {
                cond: Box::new(cond),
                guard: Box::new(guard),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            span,
        ))
    }

    // =========================================================================
    // Control Constructs
    // =========================================================================

    /// `loop`, `while`, `for` and `if`, shared between statement and
    /// expression position.
    pub(crate) fn parse_control(&mut self, ctx: ControlContext) -> Result<Expr, ParseError> {
        let expr = match self.current_kind() {
            TokenKind::If => self.parse_if_expr()?,
            TokenKind::Loop => {
                let start = self.advance().span.start;
                let body = self.parse_body()?;
                Expr::new(ExprKind::Loop { body }, self.span_from(start))
            }
            TokenKind::While => {
                let start = self.advance().span.start;
                let cond = self.parse_expr_no_braces()?;
                let body = self.parse_body()?;
                Expr::new(ExprKind::While { cond: Box::new(cond), body }, self.span_from(start))
            }
            TokenKind::For => {
                let start = self.advance().span.start;
                let pattern = self.parse_pattern()?;
                self.expect(&TokenKind::ColonEq)
                    .map_err(|e| e.with_hint("loops are written 'for x := items { ... }'"))?;
                let iter = self.parse_expr_no_braces()?;
                let body = self.parse_body()?;
                Expr::new(ExprKind::For { pattern, iter: Box::new(iter), body }, self.span_from(start))
            }
            _ => return Err(self.error_expected("'loop', 'while', 'for' or 'if'")),
        };

        match ctx {
            ControlContext::Statement if expr.is_block_like() => Ok(expr),
            ControlContext::Statement => {
                debug!("arrow-bodied construct at {} continues as an expression", expr.span.start);
                self.parse_expr_rest(expr, 0)
            }
            ControlContext::Expression => Ok(expr),
        }
    }

    /// `{ ... }`, `=> expr` or `-> expr`
    fn parse_body(&mut self) -> Result<Body, ParseError> {
        if self.check(&TokenKind::LBrace) {
            return Ok(Body::Block(self.parse_block()?));
        }
        if self.match_token(&TokenKind::FatArrow) || self.match_token(&TokenKind::Arrow) {
            return Ok(Body::Arrow(Box::new(self.parse_expr()?)));
        }
        Err(self.error_expected("'{', '=>' or '->'"))
    }

    fn parse_if_expr(&mut self) -> Result<Expr, ParseError> {
        let _depth = self.enter_nesting()?;
        let start = self.expect(&TokenKind::If)?.span.start;
        let cond = self.parse_expr_no_braces()?;
        let then_branch = self.parse_block()?;

        let else_branch = if self.match_token(&TokenKind::Else) {
            if self.check(&TokenKind::If) {
                Some(Box::new(self.parse_if_expr()?))
            } else {
                let block = self.parse_block()?;
                let span = block.span;
                Some(Box::new(Expr::new(ExprKind::Block(block), span)))
            }
        } else {
            None
        };

        Ok(Expr::new(
            ExprKind::If(IfExpr { cond: Box::new(cond), then_branch, else_branch }),
            self.span_from(start),
        ))
    }

    fn parse_match_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect(&TokenKind::Match)?.span.start;
        let scrutinee = self.parse_expr_no_braces()?;
        self.expect(&TokenKind::LBrace)?;

        let old = self.allow_brace_expr;
        self.allow_brace_expr = true;

        let mut arms = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            let arm_start = self.current_span().start;
            let pattern = self.parse_pattern()?;
            self.expect(&TokenKind::FatArrow)?;

            let body = if self.check(&TokenKind::LBrace) {
                let block = self.parse_block()?;
                let span = block.span;
                Expr::new(ExprKind::Block(block), span)
            } else {
                self.parse_expr()?
            };
            let block_bodied = matches!(body.kind, ExprKind::Block(_));
            arms.push(MatchArm { pattern, body, span: self.span_from(arm_start) });

            if !self.match_token(&TokenKind::Comma) && !block_bodied {
                break;
            }
        }

        self.allow_brace_expr = old;
        self.expect(&TokenKind::RBrace)?;
        Ok(Expr::new(ExprKind::Match { scrutinee: Box::new(scrutinee), arms }, self.span_from(start)))
    }

    /// Tokens that can begin an expression.
    pub(crate) fn is_expr_start(&mut self) -> bool {
        let kind = self.current_kind();
        Self::is_ident_like(&kind)
            || matches!(
                kind,
                TokenKind::Int { .. } | TokenKind::Float(_) | TokenKind::Bool(_) |
                TokenKind::Char(_) | TokenKind::Byte(_) | TokenKind::Str(_) |
                TokenKind::RawStr(_) | TokenKind::ColonColon | TokenKind::SelfValue |
                TokenKind::SelfType | TokenKind::LParen | TokenKind::LBracket |
                TokenKind::LBrace | TokenKind::Fn | TokenKind::If | TokenKind::Loop |
                TokenKind::While | TokenKind::For | TokenKind::Match | TokenKind::Return |
                TokenKind::Break | TokenKind::Continue | TokenKind::Ellipsis |
                TokenKind::Bang | TokenKind::Minus | TokenKind::Plus | TokenKind::Lt |
                TokenKind::LtGt
            )
    }

    // =========================================================================
    // Operator Precedence
    // =========================================================================
    //
    // Tier n of the precedence table binds at 2n on the left.

    const TERNARY_BP: u8 = 2;
    /// Guards sit just above the ternary so they stop at `?`.
    const GUARD_BP: u8 = 4;
    const CAST_BP: u8 = 24;
    const PREFIX_BP: u8 = 26;

    fn postfix_bp(kind: &TokenKind) -> Option<u8> {
        match kind {
            TokenKind::LParen => Some(30),
            TokenKind::LBracket | TokenKind::Dot | TokenKind::Is => Some(28),
            _ => None,
        }
    }

    fn infix_bp(kind: &TokenKind) -> Option<(u8, u8)> {
        match kind {
            TokenKind::PipePipe => Some((4, 5)),
            TokenKind::AmpAmp => Some((6, 7)),
            TokenKind::EqEq | TokenKind::BangEq => Some((8, 9)),
            TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq => Some((10, 11)),
            TokenKind::DotDot | TokenKind::DotDotEq => Some((10, 11)),
            TokenKind::Pipe => Some((12, 13)),
            TokenKind::Caret => Some((14, 15)),
            TokenKind::Amp => Some((16, 17)),
            TokenKind::LtLt | TokenKind::GtGt => Some((18, 19)),
            TokenKind::Plus | TokenKind::Minus => Some((20, 21)),
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some((22, 23)),
            TokenKind::PipeGt => Some((28, 29)),
            _ => None,
        }
    }

    fn binop(kind: &TokenKind) -> Option<BinOp> {
        Some(match kind {
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Star => BinOp::Mul,
            TokenKind::Slash => BinOp::Div,
            TokenKind::Percent => BinOp::Mod,
            TokenKind::EqEq => BinOp::Eq,
            TokenKind::BangEq => BinOp::Ne,
            TokenKind::Lt => BinOp::Lt,
            TokenKind::Gt => BinOp::Gt,
            TokenKind::LtEq => BinOp::Le,
            TokenKind::GtEq => BinOp::Ge,
            TokenKind::AmpAmp => BinOp::And,
            TokenKind::PipePipe => BinOp::Or,
            TokenKind::Amp => BinOp::BitAnd,
            TokenKind::Pipe => BinOp::BitOr,
            TokenKind::Caret => BinOp::BitXor,
            TokenKind::LtLt => BinOp::Shl,
            TokenKind::GtGt => BinOp::Shr,
            TokenKind::PipeGt => BinOp::Pipe,
            _ => return None,
        })
    }
}
