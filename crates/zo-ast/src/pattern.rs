// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Destructuring patterns, shared by bindings, `match`, `for`, and `is`.

use crate::expr::Lit;
use crate::{Ident, Path, Span};

#[derive(Debug, Clone)]
pub struct Pattern {
    pub kind: PatternKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum PatternKind {
    /// `_`
    Wildcard,
    /// Bare identifier; binds the matched value.
    Ident(Ident),
    /// Exact literal match. `negative` covers `-1` and `-2.5`.
    Lit { lit: Lit, negative: bool },
    /// `a::b` or `Variant(sub)`
    Path {
        path: Path,
        arg: Option<Box<Pattern>>,
    },
    Tuple(Vec<Pattern>),
    Array(Vec<Pattern>),
    /// `{ name, other: sub }`
    Struct(Vec<FieldPattern>),
}

#[derive(Debug, Clone)]
pub struct FieldPattern {
    pub name: Ident,
    /// Rebinding sub-pattern after `:`.
    pub pattern: Option<Pattern>,
    pub span: Span,
}
