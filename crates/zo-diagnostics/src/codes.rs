// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error code registry.
//!
//! Maps error codes (E0001, E0101, etc.) to titles and categories.
//! Used by `zo explain <code>` and for error display.

use std::collections::BTreeMap;

/// Registry of all known error codes.
pub struct ErrorCodeRegistry {
    codes: BTreeMap<&'static str, ErrorCodeInfo>,
}

/// Information about a single error code.
pub struct ErrorCodeInfo {
    pub code: &'static str,
    pub title: &'static str,
    pub category: ErrorCategory,
    pub explanation: &'static str,
}

/// Error category for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lexical,
    Syntax,
    Structural,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Lexical => write!(f, "Lexical"),
            ErrorCategory::Syntax => write!(f, "Syntax"),
            ErrorCategory::Structural => write!(f, "Structural"),
        }
    }
}

macro_rules! register_codes {
    ($($code:literal => ($title:literal, $cat:expr, $explain:literal)),* $(,)?) => {{
        let mut map = BTreeMap::new();
        $(
            map.insert($code, ErrorCodeInfo {
                code: $code,
                title: $title,
                category: $cat,
                explanation: $explain,
            });
        )*
        map
    }};
}

impl Default for ErrorCodeRegistry {
    fn default() -> Self {
        use ErrorCategory::*;

        Self {
            codes: register_codes! {
                // Lexer errors (E00xx)
                "E0001" => ("unexpected character", Lexical,
                    "The character cannot start any token. Zo source is ASCII outside of string, char and comment bodies."),
                "E0002" => ("unterminated string literal", Lexical,
                    "A '\"' or '$\"' literal runs to the end of the file. Scanning stops here, so nothing after it is checked."),
                "E0003" => ("invalid escape sequence", Lexical,
                    "Valid escapes are \\n \\r \\t \\\\ \\' \\\" \\0 and \\xNN. The literal is kept with the escape dropped."),
                "E0004" => ("malformed literal", Lexical,
                    "A number whose digits do not fit its base or its type, or a char literal that is not exactly one character."),
                "E0005" => ("unterminated block comment", Lexical,
                    "Every '-*' needs a matching '*-'. Block comments nest, so inner openers need closers too."),
                "E0006" => ("unterminated character literal", Lexical,
                    "A char or byte literal reached the end of the line without its closing quote."),

                // Parser errors (E01xx)
                "E0100" => ("unexpected token", Syntax,
                    "The token cannot begin the construct expected at this position, for example an expression or an item."),
                "E0101" => ("expected token not found", Syntax,
                    "A required token such as ';', ')' or a name is missing. The message names what was expected."),
                "E0102" => ("mismatched closing tag", Syntax,
                    "A template element was closed with a different name than it was opened with: <div>...</span>."),
                "E0103" => ("ternary without guard", Syntax,
                    "Zo ternaries are guarded: write 'cond when guard ? then : else'. A bare 'cond ? a : b' is not valid."),

                // Structural errors (E02xx)
                "E0200" => ("malformed group type", Structural,
                    "A group is written 'group type A = T and B = U;'. Each alias needs a name, '=', and a type."),
                "E0201" => ("incomplete guarded ternary", Structural,
                    "After 'cond when guard' the parser needs both '? then' and ': else'."),
                "E0202" => ("nesting too deep", Structural,
                    "Parentheses, blocks, patterns, types or markup are nested past the parser's depth limit. Move the inner part into its own binding or function."),
            },
        }
    }
}

impl ErrorCodeRegistry {
    pub fn get(&self, code: &str) -> Option<&ErrorCodeInfo> {
        self.codes.get(code)
    }

    /// All codes in ascending order.
    pub fn all(&self) -> impl Iterator<Item = &ErrorCodeInfo> {
        self.codes.values()
    }
}
