// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parser for the Zo language.
//!
//! Pulls tokens from a [`zo_lexer::Scanner`] and builds a
//! [`zo_ast::SourceFile`], recovering from errors at statement and item
//! boundaries so one pass reports as many problems as possible.

mod error;
mod expr;
mod hints;
mod parser;
mod pattern;
mod template;
mod ty;

pub use error::{ErrorKind, ParseError, ParseResult, Reason};
pub use parser::Parser;

/// Parse one compilation unit.
pub fn parse(source: &str) -> ParseResult {
    Parser::new(source).parse()
}

/// Parse one compilation unit, recording `name` on the tree for diagnostics.
pub fn parse_file(name: &str, source: &str) -> ParseResult {
    Parser::new(source).with_name(name).parse()
}

#[cfg(test)]
mod tests;
