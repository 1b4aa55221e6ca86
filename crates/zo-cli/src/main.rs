// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Zo CLI - lexer, parser and formatter front end.

mod commands;
mod help;
mod output;

use std::env;
use std::fs;
use std::process;

use zo_diagnostics::formatter::DiagnosticFormatter;
use zo_diagnostics::{json, Diagnostic};

/// Output format for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Human,
    Json,
}

fn main() {
    output::init();
    init_logging();

    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        help::print_usage();
        return;
    }
    let cmd = args.remove(0);
    log::debug!("command `{}` args {:?}", cmd, args);

    if args.iter().any(|a| a == "--help" || a == "-h") {
        help::print_command_help(&cmd);
        return;
    }

    match cmd.as_str() {
        "lex" => {
            let path = require_file(&args, "lex");
            commands::phase::cmd_lex(&path);
        }
        "parse" => {
            let format = take_format(&mut args);
            let sexp = take_flag(&mut args, "--sexp");
            let path = require_file(&args, "parse");
            commands::phase::cmd_parse(&path, format, sexp);
        }
        "check" => {
            let format = take_format(&mut args);
            let path = require_file(&args, "check");
            commands::phase::cmd_check(&path, format);
        }
        "fmt" => {
            let check_only = take_flag(&mut args, "--check");
            let write = take_flag(&mut args, "--write");
            let indent = match take_value(&mut args, "--indent") {
                None => None,
                Some(n) => match n.parse::<usize>() {
                    Ok(n) => Some(n),
                    Err(_) => {
                        eprintln!("{}: --indent expects a number, got `{}`", output::error_label(), n);
                        process::exit(1);
                    }
                },
            };
            if check_only && write {
                eprintln!("{}: --check and --write cannot be combined", output::error_label());
                process::exit(1);
            }
            let path = require_file(&args, "fmt");
            commands::tools::cmd_fmt(&path, check_only, write, indent);
        }
        "explain" => match args.first() {
            Some(code) => commands::tools::cmd_explain(code),
            None => commands::tools::cmd_list_codes(),
        },
        "help" | "--help" | "-h" => match args.first() {
            Some(topic) => help::print_command_help(topic),
            None => help::print_usage(),
        },
        "version" | "--version" | "-V" => {
            println!("zo {}", env!("CARGO_PKG_VERSION"));
        }
        other => {
            if other.ends_with(".zo") {
                commands::phase::cmd_parse(other, Format::Human, false);
            } else {
                eprintln!("{}: unknown command `{}`", output::error_label(), other);
                eprintln!("Run `{}` for available commands.", output::command("zo help"));
                process::exit(1);
            }
        }
    }
}

/// Log records go to stderr. `ZO_LOG` takes env_logger filter syntax.
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("ZO_LOG", "off"))
        .format_timestamp(None)
        .init();
}

/// Remove `--format <human|json>` (or `--format=json`) from the argument list.
fn take_format(args: &mut Vec<String>) -> Format {
    let value = match args.iter().position(|a| a.starts_with("--format=")) {
        Some(i) => Some(args.remove(i)["--format=".len()..].to_string()),
        None => take_value(args, "--format"),
    };
    match value.as_deref() {
        None | Some("human") => Format::Human,
        Some("json") => Format::Json,
        Some(other) => {
            eprintln!("{}: unknown format `{}` (expected human or json)", output::error_label(), other);
            process::exit(1);
        }
    }
}

fn take_flag(args: &mut Vec<String>, flag: &str) -> bool {
    match args.iter().position(|a| a == flag) {
        Some(i) => {
            args.remove(i);
            true
        }
        None => false,
    }
}

fn take_value(args: &mut Vec<String>, flag: &str) -> Option<String> {
    let i = args.iter().position(|a| a == flag)?;
    args.remove(i);
    if i < args.len() {
        Some(args.remove(i))
    } else {
        eprintln!("{}: {} needs a value", output::error_label(), flag);
        process::exit(1);
    }
}

/// The single positional argument left once flags are taken out.
fn require_file(args: &[String], cmd: &str) -> String {
    if let Some(unknown) = args.iter().find(|a| a.starts_with("--")) {
        eprintln!("{}: unknown option `{}` for `zo {}`", output::error_label(), unknown, cmd);
        process::exit(1);
    }
    match args {
        [path] => path.clone(),
        _ => {
            eprintln!("Usage: zo {} <file.zo>", cmd);
            process::exit(1);
        }
    }
}

pub fn read_source(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}: reading {}: {}", output::error_label(), output::file_path(path), e);
            process::exit(1);
        }
    }
}

/// Print diagnostics in the requested format. Human output goes to stderr,
/// the JSON report to stdout.
pub fn show_diagnostics(diags: &[Diagnostic], source: &str, path: &str, phase: &str, format: Format) {
    match format {
        Format::Human => {
            let formatter = DiagnosticFormatter::new(source).with_file_name(path);
            eprint!("{}", formatter.format_all(diags));
        }
        Format::Json => {
            let report = json::to_json_report(diags, source, path, phase);
            println!("{}", json::to_json_string(&report));
        }
    }
}
