// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Help text for CLI commands.

use colored::Colorize;
use crate::output;

pub fn print_usage() {
    println!(
        "{} {} - lexer, parser and formatter for Zo",
        output::title("Zo"),
        output::version(env!("CARGO_PKG_VERSION"))
    );
    println!();
    println!(
        "{}: {} {} {}",
        output::section_header("Usage"),
        output::command("zo"),
        output::arg("<command>"),
        output::arg("[args]")
    );
    println!();
    println!("{}", output::section_header("Front end:"));
    println!("  {} {}       Tokenize a file and print tokens", output::command("lex"), output::arg("<file>"));
    println!("  {} {}     Parse a file and print the syntax tree", output::command("parse"), output::arg("<file>"));
    println!("  {} {}     Check a file for errors", output::command("check"), output::arg("<file>"));

    println!();
    println!("{}", output::section_header("Tools:"));
    println!("  {} {}       Format a source file", output::command("fmt"), output::arg("<file>"));
    println!("  {} {}   Explain an error code", output::command("explain"), output::arg("<code>"));
    println!("  {}             Show this help", output::command("help"));
    println!("  {}          Show version", output::command("version"));

    println!();
    println!("{}", output::section_header("Environment:"));
    println!("  {}   Log filter for internal tracing (error, warn, info, debug, trace)", output::arg("ZO_LOG"));
    println!("  {} Disable colored output", output::arg("NO_COLOR"));
    println!();
    println!("Run {} for command options.", output::command("zo <command> --help"));
}

pub fn print_command_help(cmd: &str) {
    match cmd {
        "lex" => print_lex_help(),
        "parse" => print_parse_help(),
        "check" => print_check_help(),
        "fmt" => print_fmt_help(),
        "explain" => print_explain_help(),
        _ => print_usage(),
    }
}

fn usage_line(cmd: &str, args: &str) {
    println!("{}: {} {} {}", "Usage".yellow(), output::command("zo"), output::command(cmd), output::arg(args));
}

fn print_lex_help() {
    println!("{}", output::section_header("Lex"));
    println!();
    println!("Scan a file in code mode and list every token with its line and column.");
    println!();
    usage_line("lex", "<file>");
}

fn print_parse_help() {
    println!("{}", output::section_header("Parse"));
    println!();
    println!("Parse a file and print the syntax tree, or the diagnostics if it has errors.");
    println!();
    usage_line("parse", "<file> [options]");
    println!();
    println!("{}", output::section_header("Options:"));
    println!("  {}          Print the tree as an S-expression", output::arg("--sexp"));
    println!("  {}   Diagnostics as human text or a JSON report", output::arg("--format <human|json>"));
}

fn print_check_help() {
    println!("{}", output::section_header("Check"));
    println!();
    println!("Validate a file without printing the tree. Exits with status 1 on any error.");
    println!();
    usage_line("check", "<file> [options]");
    println!();
    println!("{}", output::section_header("Options:"));
    println!("  {}   Diagnostics as human text or a JSON report", output::arg("--format <human|json>"));
}

fn print_fmt_help() {
    println!("{}", output::section_header("Format"));
    println!();
    println!("Print the canonical layout of a file. Files with errors are left alone.");
    println!();
    usage_line("fmt", "<file> [options]");
    println!();
    println!("{}", output::section_header("Options:"));
    println!("  {}       Exit with status 1 if the file is not formatted", output::arg("--check"));
    println!("  {}       Rewrite the file in place", output::arg("--write"));
    println!("  {}  Spaces per indentation level (default 2)", output::arg("--indent N"));
}

fn print_explain_help() {
    println!("{}", output::section_header("Explain"));
    println!();
    println!("Show the title, category and explanation of an error code.");
    println!("Without a code, list every known code.");
    println!();
    usage_line("explain", "[code]");
}
