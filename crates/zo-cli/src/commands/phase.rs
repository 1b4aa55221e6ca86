// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Front-end phase commands: lex, parse, check.

use colored::Colorize;
use std::process;
use zo_diagnostics::{Diagnostic, ToDiagnostic};

use crate::{output, read_source, show_diagnostics, Format};

pub fn cmd_lex(path: &str) {
    let source = read_source(path);
    let result = zo_lexer::tokenize(&source);

    if !result.is_ok() {
        let diags: Vec<Diagnostic> = result.errors.iter().map(|e| e.to_diagnostic()).collect();
        show_diagnostics(&diags, &source, path, "lex", Format::Human);
        eprintln!("\n{}", output::banner("Lex", result.errors.len()));
        process::exit(1);
    }

    println!("{} Tokens ({}) {}\n", "===".dimmed(), result.tokens.len(), "===".dimmed());
    for tok in &result.tokens {
        println!("{:>4}:{:<3} {:?}", tok.line, tok.col, tok.kind);
    }
    println!("\n{}", output::banner(&format!("Lex: {} tokens", result.tokens.len()), 0));
}

pub fn cmd_parse(path: &str, format: Format, sexp: bool) {
    let source = read_source(path);
    let result = zo_parser::parse_file(path, &source);
    let diags = zo_diagnostics::from_parse_result(&result);

    if format == Format::Json {
        show_diagnostics(&diags, &source, path, "parse", format);
        if !diags.is_empty() {
            process::exit(1);
        }
        return;
    }

    if !diags.is_empty() {
        show_diagnostics(&diags, &source, path, "parse", format);
        eprintln!("\n{}", output::banner("Parse", diags.len()));
        process::exit(1);
    }

    if sexp {
        println!("{}", zo_ast::sexp::to_sexp(&result.file));
        return;
    }

    println!("{} AST ({} items) {}\n", "===".dimmed(), result.file.items.len(), "===".dimmed());
    for (i, item) in result.file.items.iter().enumerate() {
        println!("--- Item {} ---", i + 1);
        println!("{:#?}", item);
        println!();
    }
    println!("{}", output::banner("Parse", 0));
}

pub fn cmd_check(path: &str, format: Format) {
    let source = read_source(path);
    let result = zo_parser::parse_file(path, &source);
    let diags = zo_diagnostics::from_parse_result(&result);

    if format == Format::Json {
        show_diagnostics(&diags, &source, path, "parse", format);
    } else if diags.is_empty() {
        println!("{} {}", output::banner("Check", 0), output::file_path(path));
    } else {
        show_diagnostics(&diags, &source, path, "parse", format);
        eprintln!("\n{}", output::banner("Check", diags.len()));
    }

    if !diags.is_empty() {
        process::exit(1);
    }
}
