// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Markup literals.
//!
//! A template is read in three scanner modes: `Tag` inside `<...>`, `Text`
//! between tags, and `Code` inside `{...}` interpolations. Every switch
//! happens right after the token that triggers it has been consumed.
//!
//! Errors inside a broken attribute or interpolation are recorded on the
//! spot and the parser skips to the end of that tag or `}`, so the rest of
//! the markup keeps its mode and closing tags still pair up.

use zo_ast::template::{AttrValue, Element, TagAttr, Template, TemplateKind, TemplateNode};
use zo_ast::token::TokenKind;
use zo_lexer::ScanMode;

use crate::error::{ParseError, Reason};
use crate::parser::Parser;

impl<'a> Parser<'a> {
    /// `<name ...>...</name>`, `<name .../>` or `<>...</>`.
    pub(crate) fn parse_template(&mut self) -> Result<Template, ParseError> {
        let outer = self.scanner.mode();
        let result = self.parse_template_in(outer);
        if result.is_err() {
            self.scanner.set_mode(outer);
        }
        result
    }

    fn parse_template_in(&mut self, outer: ScanMode) -> Result<Template, ParseError> {
        let start = self.current_span().start;

        match self.current_kind() {
            TokenKind::LtGt => {
                self.advance();
                self.scanner.set_mode(ScanMode::Text);
                let children = self.parse_template_nodes()?;
                if !self.check(&TokenKind::LtSlashGt) {
                    return Err(self.error_expected("'</>'").with_hint("close the fragment with '</>'"));
                }
                self.advance();
                self.scanner.set_mode(outer);
                Ok(Template { kind: TemplateKind::Fragment(children), span: self.span_from(start) })
            }
            TokenKind::Lt => {
                self.advance();
                let element = self.parse_element(start, outer)?;
                let span = element.span;
                Ok(Template { kind: TemplateKind::Element(element), span })
            }
            _ => Err(self.error_expected("'<' or '<>'")),
        }
    }

    /// Element body after its `<`. Leaves the scanner in `resume` mode.
    fn parse_element(&mut self, start: usize, resume: ScanMode) -> Result<Element, ParseError> {
        self.scanner.set_mode(ScanMode::Tag);
        let _depth = self.enter_nesting()?;
        let name = self.expect_ident()?;

        let mut attrs = Vec::new();
        loop {
            match self.current_kind() {
                TokenKind::Ident(_) => match self.parse_tag_attr() {
                    Ok(Some(attr)) => attrs.push(attr),
                    Ok(None) => {}
                    Err(error) => {
                        self.record_error(error);
                        self.skip_tag_rest();
                    }
                },
                TokenKind::SlashGt => {
                    self.advance();
                    self.scanner.set_mode(resume);
                    return Ok(Element {
                        name,
                        attrs,
                        children: Vec::new(),
                        self_closing: true,
                        span: self.span_from(start),
                    });
                }
                TokenKind::Gt => {
                    self.advance();
                    break;
                }
                TokenKind::Eof => return Err(self.error_expected("attribute or '>'")),
                _ => {
                    let error = self.error_expected("attribute or '>'");
                    self.record_error(error);
                    self.skip_tag_rest();
                }
            }
        }

        self.scanner.set_mode(ScanMode::Text);
        let children = self.parse_template_nodes()?;

        if !self.check(&TokenKind::LtSlash) {
            let label = format!("<{}> opened here", name.name);
            return Err(self.error_expected("closing tag").with_related(name.span, label));
        }
        self.advance();
        self.scanner.set_mode(ScanMode::Tag);
        let close = match self.expect_ident() {
            Ok(close) => Some(close),
            Err(error) => {
                self.record_error(error);
                None
            }
        };
        if !self.check(&TokenKind::Gt) {
            if close.is_some() {
                let error = self.error_expected("'>'");
                self.record_error(error);
            }
            self.skip_tag_rest();
        }
        self.expect(&TokenKind::Gt)?;
        self.scanner.set_mode(resume);

        if let Some(close) = close.filter(|close| close.name != name.name) {
            let error = ParseError::new(
                Reason::MismatchedTag,
                close.span,
                format!("Closing tag '</{}>' does not match '<{}>'", close.name, name.name),
            )
            .with_related(name.span, "opened here")
            .with_hint(format!("close it with '</{}>'", name.name));
            self.record_error(error);
        }

        Ok(Element { name, attrs, children, self_closing: false, span: self.span_from(start) })
    }

    /// `name = "text"` or `name = {expr}`. A broken `{expr}` is recorded and
    /// the attribute dropped.
    fn parse_tag_attr(&mut self) -> Result<Option<TagAttr>, ParseError> {
        let start = self.current_span().start;
        let name = self.expect_ident()?;
        self.expect(&TokenKind::Eq)?;

        let value = match self.current_kind() {
            TokenKind::Str(text) => {
                self.advance();
                AttrValue::Str(text)
            }
            TokenKind::LBrace => {
                self.advance();
                match self.parse_interpolation(ScanMode::Tag) {
                    Ok(expr) => AttrValue::Expr(expr),
                    Err(error) => {
                        self.record_error(error);
                        self.skip_interpolation(ScanMode::Tag);
                        return Ok(None);
                    }
                }
            }
            _ => return Err(self.error_expected("string or '{'")),
        };

        Ok(Some(TagAttr { name, value, span: self.span_from(start) }))
    }

    /// Expression after `{`, through `}`, then back to `resume` mode.
    fn parse_interpolation(&mut self, resume: ScanMode) -> Result<zo_ast::expr::Expr, ParseError> {
        self.scanner.set_mode(ScanMode::Code);
        let expr = self.parse_expr_in_delims()?;
        self.expect(&TokenKind::RBrace)?;
        self.scanner.set_mode(resume);
        Ok(expr)
    }

    /// Skip what is left of an interpolation through its closing `}`,
    /// then carry on in `resume` mode.
    fn skip_interpolation(&mut self, resume: ScanMode) {
        self.scanner.set_mode(ScanMode::Code);
        let mut depth = 0usize;
        loop {
            match self.current_kind() {
                TokenKind::Eof => break,
                TokenKind::RBrace if depth == 0 => {
                    self.advance();
                    break;
                }
                TokenKind::RBrace => depth -= 1,
                TokenKind::LBrace => depth += 1,
                _ => {}
            }
            self.advance();
        }
        self.scanner.set_mode(resume);
    }

    /// Skip to the `>` or `/>` ending the current tag.
    fn skip_tag_rest(&mut self) {
        loop {
            match self.current_kind() {
                TokenKind::Gt | TokenKind::SlashGt | TokenKind::Eof => break,
                TokenKind::LBrace => {
                    self.advance();
                    self.skip_interpolation(ScanMode::Tag);
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Children up to (not including) `</` or `</>`.
    fn parse_template_nodes(&mut self) -> Result<Vec<TemplateNode>, ParseError> {
        let mut nodes = Vec::new();

        loop {
            match self.current_kind() {
                TokenKind::Text(text) => {
                    let token = self.advance();
                    nodes.push(TemplateNode::Text { text, span: token.span });
                }
                TokenKind::LBrace => {
                    self.advance();
                    match self.parse_interpolation(ScanMode::Text) {
                        Ok(expr) => nodes.push(TemplateNode::Interp(expr)),
                        Err(error) => {
                            self.record_error(error);
                            self.skip_interpolation(ScanMode::Text);
                        }
                    }
                }
                TokenKind::Lt => {
                    let start = self.advance().span.start;
                    nodes.push(TemplateNode::Element(self.parse_element(start, ScanMode::Text)?));
                }
                TokenKind::LtSlash | TokenKind::LtSlashGt | TokenKind::Eof => break,
                _ => {
                    let error = self.error_expected("text, '{', or an element");
                    self.record_error(error);
                    self.advance();
                }
            }
        }

        Ok(nodes)
    }
}
