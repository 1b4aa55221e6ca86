// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Developer tool commands: fmt, explain.

use colored::Colorize;
use std::fs;
use std::process;
use zo_diagnostics::codes::ErrorCodeRegistry;
use zo_diagnostics::{Diagnostic, ToDiagnostic};
use zo_fmt::FormatConfig;

use crate::{output, read_source, show_diagnostics, Format};

pub fn cmd_fmt(path: &str, check_only: bool, write: bool, indent: Option<usize>) {
    let source = read_source(path);

    let mut config = FormatConfig::default();
    if let Some(width) = indent {
        config = config.with_indent(width);
    }

    let formatted = match zo_fmt::format_source_with_config(&source, &config) {
        Ok(f) => f,
        Err(errors) => {
            let diags: Vec<Diagnostic> = errors.iter().map(|e| e.to_diagnostic()).collect();
            show_diagnostics(&diags, &source, path, "parse", Format::Human);
            eprintln!("\n{}", output::banner("Format", diags.len()));
            process::exit(1);
        }
    };

    if check_only {
        if formatted == source {
            println!("{} {}", output::status(true), output::file_path(path));
        } else {
            println!("{} {} (would reformat)", output::status(false), output::file_path(path));
            process::exit(1);
        }
        return;
    }

    if !write {
        print!("{}", formatted);
        return;
    }

    if formatted == source {
        return;
    }
    match fs::write(path, &formatted) {
        Ok(_) => println!("Formatted {}", output::file_path(path)),
        Err(e) => {
            eprintln!("{}: writing {}: {}", output::error_label(), output::file_path(path), e);
            process::exit(1);
        }
    }
}

pub fn cmd_explain(code: &str) {
    let registry = ErrorCodeRegistry::default();
    let code = code.to_uppercase();

    match registry.get(&code) {
        Some(info) => {
            println!("{}[{}]: {}", "error".red().bold(), info.code.red().bold(), info.title.bold());
            println!();
            println!("  Category: {}", info.category);
            println!();
            println!("  {}", info.explanation);
            println!();
            println!("  Run `zo check <file>` to see this error in context.");
        }
        None => {
            eprintln!("{}: unknown error code `{}`", output::error_label(), code);
            eprintln!();
            eprintln!("Error codes use the format E0NNN (e.g., E0001, E0101).");
            eprintln!("Run `zo explain` to list every code.");
            process::exit(1);
        }
    }
}

pub fn cmd_list_codes() {
    let registry = ErrorCodeRegistry::default();
    println!("{}", output::section_header("Error codes:"));
    for info in registry.all() {
        println!("  {}  {:<11} {}", info.code.red().bold(), info.category.to_string(), info.title);
    }
}
