// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Embedded markup literals (`<div class="x">{name}</div>`).

use crate::expr::Expr;
use crate::{Ident, Span};

#[derive(Debug, Clone)]
pub struct Template {
    pub kind: TemplateKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum TemplateKind {
    /// `<> ... </>`
    Fragment(Vec<TemplateNode>),
    Element(Element),
}

/// `<name attr*/>` or `<name attr*> node* </name>`
#[derive(Debug, Clone)]
pub struct Element {
    pub name: Ident,
    pub attrs: Vec<TagAttr>,
    pub children: Vec<TemplateNode>,
    pub self_closing: bool,
    pub span: Span,
}

/// `name = {expr}` or `name = "text"`
#[derive(Debug, Clone)]
pub struct TagAttr {
    pub name: Ident,
    pub value: AttrValue,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum AttrValue {
    Expr(Expr),
    Str(String),
}

#[derive(Debug, Clone)]
pub enum TemplateNode {
    Element(Element),
    Text { text: String, span: Span },
    /// `{expr}`
    Interp(Expr),
}

impl TemplateNode {
    pub fn span(&self) -> Span {
        match self {
            TemplateNode::Element(e) => e.span,
            TemplateNode::Text { span, .. } => *span,
            TemplateNode::Interp(e) => e.span,
        }
    }
}
