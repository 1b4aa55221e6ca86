// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Lexer for the Zo language.
//!
//! Turns source text into tokens on demand. The parser pulls tokens from a
//! [`Scanner`] and switches its [`ScanMode`] while reading template literals.

mod lexer;
mod scanner;

pub use lexer::{LexError, LexErrorKind};
pub use scanner::{tokenize, LexResult, ScanMode, Scanner};
