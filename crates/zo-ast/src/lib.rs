// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Abstract Syntax Tree types for the Zo language.
//!
//! This crate defines the token vocabulary and the AST nodes shared between
//! the lexer, parser, formatter, and diagnostics. Every node owns its
//! children; the tree never shares or back-references subtrees.

pub mod span;
pub mod token;
pub mod expr;
pub mod stmt;
pub mod item;
pub mod pattern;
pub mod ty;
pub mod template;
pub mod sexp;

pub use span::{Span, LineMap};

/// An identifier with its source location.
///
/// Identifiers stay opaque text; no resolution happens at this level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self { name: name.into(), span }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// A `::`-separated path such as `std::io` or `::root::item`.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Leading `::` marks an absolute path.
    pub absolute: bool,
    pub segments: Vec<Ident>,
    pub span: Span,
}

impl Path {
    /// Single-segment, non-absolute path.
    pub fn is_simple(&self) -> bool {
        !self.absolute && self.segments.len() == 1
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.absolute {
            f.write_str("::")?;
        }
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("::")?;
            }
            f.write_str(&seg.name)?;
        }
        Ok(())
    }
}

/// Root node: one compilation unit.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Optional source identifier used in diagnostics.
    pub name: Option<String>,
    pub items: Vec<item::Item>,
    pub span: Span,
}
