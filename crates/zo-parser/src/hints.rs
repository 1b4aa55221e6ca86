// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error hints - suggestions for fixing common mistakes.
//!
//! Kept separate from the main parser to avoid clutter.

use zo_ast::token::TokenKind;

/// Get a hint for an "expected X" error based on context.
pub fn for_expected(expected: &str, found: &TokenKind) -> Option<&'static str> {
    match (expected, found) {
        // Colon hints
        ("':'", TokenKind::Eq) => Some("use ':' for types, '=' for values"),
        ("':'", _) => Some("syntax: name: Type"),

        // Binding hints
        ("':', ':=' or '::='", TokenKind::Eq) => Some("write 'imu name := value' to infer the type"),
        ("':', ':=' or '::='", _) => Some("syntax: imu name := value, or imu name: Type = value"),

        // Block hints
        ("'{'", _) => Some("blocks start with '{'"),
        ("'{', '=>' or '->'", _) => Some("use a block, or '=>' followed by an expression"),
        ("'}'", _) => Some("every '{' needs a matching '}'"),

        // Parentheses hints
        ("'('", _) => Some("parameter lists are wrapped in parentheses"),
        ("')'", TokenKind::Eof) => Some("add ')' to close the parenthesis"),
        ("')'", _) => None,

        // Bracket hints
        ("']'", TokenKind::Eof) => Some("add ']' to close the bracket"),
        ("']'", _) => None,

        // Generic angle bracket
        ("'>'", _) => Some("close the generic parameter list with '>'"),
        ("'$'", _) => Some("generic parameters are written '$T'"),

        // Expression hints
        ("expression", TokenKind::Eq) => Some("put the value after '='"),
        ("expression", TokenKind::Semi) => Some("statement is incomplete"),
        ("expression", TokenKind::Question) => Some("a ternary needs a guard: cond when guard ? a : b"),
        ("expression", _) => Some("try a value, variable, or function call"),

        // Name/identifier hints
        ("a name", TokenKind::Int { .. }) => Some("names can't start with a number"),
        ("a name", kw) if kw.keyword_text().is_some() => Some("this word is reserved; pick another name"),
        ("a name", _) => Some("names start with a letter or '_'"),

        // Type hints
        ("type", _) => Some("try a type like 'int', 'str', '[]u8', or a struct name"),

        // Pattern hints
        ("pattern", _) => Some("try a name, literal, '_', or a variant like Some(x)"),

        // Item hints
        ("item", TokenKind::Imu | TokenKind::Mut) => Some("bindings belong inside a function; use 'val' at the top level"),
        ("item", _) => Some("start with 'fun', 'struct', 'enum', 'type', 'val', 'load', etc."),

        // Statement terminator
        ("';'", TokenKind::RBrace) => None,
        ("';'", _) => Some("end statements with ';'"),

        // Template hints
        ("closing tag", TokenKind::Eof) => Some("add the matching closing tag"),
        ("attribute or '>'", _) => Some("attributes are written name=\"text\" or name={expr}"),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_used_as_name() {
        assert_eq!(
            for_expected("a name", &TokenKind::Match),
            Some("this word is reserved; pick another name")
        );
        assert_eq!(for_expected("a name", &TokenKind::Ident("x".into())), Some("names start with a letter or '_'"));
    }

    #[test]
    fn missing_guard() {
        assert!(for_expected("expression", &TokenKind::Question).is_some_and(|h| h.contains("when")));
    }
}
