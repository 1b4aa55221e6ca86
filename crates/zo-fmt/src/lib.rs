// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Canonical pretty printer for Zo source.
//!
//! Printing a parsed file and parsing the result gives back the same tree,
//! and printing is idempotent. Comments before items and statements and at
//! the end of a line survive; comments buried inside an expression move to
//! the next line boundary.

mod comment;
mod config;
mod printer;

pub use config::FormatConfig;

use zo_ast::SourceFile;
use zo_parser::ParseError;

use crate::comment::CommentList;
use crate::printer::Printer;

/// Format Zo source code with default configuration.
pub fn format_source(source: &str) -> Result<String, Vec<ParseError>> {
    format_source_with_config(source, &FormatConfig::default())
}

/// Format Zo source code with custom configuration.
/// Source that does not parse cleanly is never reformatted.
pub fn format_source_with_config(source: &str, config: &FormatConfig) -> Result<String, Vec<ParseError>> {
    let result = zo_parser::parse(source);
    if !result.is_ok() {
        return Err(result.errors);
    }

    let comments = CommentList::from_spans(source, &result.comments);
    let mut printer = Printer::new(Some(source), comments, config);
    printer.format_file(&result.file);
    Ok(printer.finish())
}

/// Print a tree that has no source text behind it. Literals are spelled
/// from their values and there are no comments to keep.
pub fn print_file(file: &SourceFile, config: &FormatConfig) -> String {
    let mut printer = Printer::new(None, CommentList::empty(), config);
    printer.format_file(file);
    printer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use zo_ast::sexp::to_sexp;

    fn fmt(src: &str) -> String {
        format_source(src).unwrap_or_else(|errors| panic!("{:?}", errors))
    }

    fn assert_round_trip(src: &str) {
        let once = fmt(src);
        let twice = fmt(&once);
        assert_eq!(once, twice, "not idempotent for:\n{}", src);
        assert_eq!(
            to_sexp(&zo_parser::parse(src).file),
            to_sexp(&zo_parser::parse(&once).file),
            "tree changed:\n{}",
            once
        );
    }

    #[test]
    fn function() {
        assert_eq!(fmt("fun add(a:int,b:int)->int{a+b}"), "fun add(a: int, b: int) -> int {\n  a + b\n}\n");
    }

    #[test]
    fn comments_are_kept() {
        let src = "-- header\n\nfun main() {\n  imu x := 1; -- trailing\n  -- before y\n\n  imu y := x;\n}\n-- end\n";
        assert_eq!(
            fmt(src),
            "-- header\n\nfun main() {\n  imu x := 1;  -- trailing\n  -- before y\n\n  imu y := x;\n}\n-- end\n"
        );
    }

    #[test]
    fn items_are_separated_but_loads_stay_grouped() {
        let src = "load std::io::(read,write);\nload std::fs;\nstruct P{x:int,y:int=0}\nenum Color{Red=1,Green,Custom(u32)}";
        assert_eq!(
            fmt(src),
            "load std::io::(read, write);\nload std::fs;\n\nstruct P { x: int, y: int = 0 }\n\nenum Color { Red = 1, Green, Custom(u32) }\n"
        );
    }

    #[test]
    fn long_field_lists_break() {
        let config = FormatConfig { indent_width: 4, max_line_width: 20 };
        let out = format_source_with_config("struct Point { x: int, y: int }", &config).unwrap();
        assert_eq!(out, "struct Point {\n    x: int,\n    y: int,\n}\n");
    }

    #[test]
    fn commented_fields_break() {
        let src = "struct S { -- the id\n id: int, -- trailing\n}";
        assert_eq!(fmt(src), "struct S {\n  -- the id\n  id: int,  -- trailing\n}\n");
    }

    #[test]
    fn templates_and_match() {
        let src = "fun v(){imu p ::= <div class=\"a\\\"b\" on={go}>Hi {name}<br/></div>; match x {1=>a,_=>{b}}}";
        assert_eq!(
            fmt(src),
            "fun v() {\n  imu p ::= <div class=\"a\\\"b\" on={go}>Hi {name}<br/></div>;\n  match x {\n    1 => a,\n    _ => {\n      b\n    }\n  }\n}\n"
        );
    }

    #[test]
    fn blank_lines_collapse() {
        assert_eq!(fmt("fun f() {\n\n  a();\n\n\n  b();\n}"), "fun f() {\n  a();\n\n  b();\n}\n");
    }

    #[test]
    fn round_trips() {
        let cases = [
            "fun f() { imu t := (1,); imu n := - -x; imu r := a - (b - c) * d; imu q := t.0.1; }",
            "fun f() { imu v := a when b > 0 ? c : d when e ? f : g; }",
            "fun f() { imu c := fn(x, y: int) -> int => x + y; imu d := fn() { loop => tick() }; }",
            "fun f() { for i := 0..n { if i is Some(x) { continue; } else if x == 1 { break; } else { return x; } } while ok => step(); }",
            "fun f() { imu p := Point { x: 1, y = 2, z }; match p { Point::A(v) => v, -1 => 0, (a, b) => a, [x] => x, { x, y: _ } => x, _ => {} } }",
            "fun f() { nursery { imu a := spawn fetch(1); imu b := await a; } #dom view; }",
            "%%inline pub fun f<$T>(self, x: &mut $T) -> [4]u8 ->> (err) { x }\nabstract Shape { fun area(self) -> float; }\napply Shape for Circle { fun area(self) -> float { 3.14 } state Idle and Busy { pid: int } }\ngroup type A = int and B = (str, Fn(int) -> bool);\next puts(s: str) -> int;\nval MAX: u32 = x#FF;\ntype@state struct Door { open: bool }\npack geo { type Id = u64; }\n#run main();",
            "fun v() { imu page ::= <>\n  <h1 class=\"t\">Hello {user.name}!</h1>\n  <ul>{items |> render}</ul>\n</>; }",
            "fun f() { x += 1; a[0] = -b as int; s.field = !ok; imu y: str = \"s\\n\"; mut z := `a`; }",
            "fun f() {\n  g(1, -- inside\n    2);\n}\n",
        ];
        for case in cases {
            assert_round_trip(case);
        }
    }

    #[test]
    fn print_without_source_spells_values() {
        let result = zo_parser::parse("fun f() { imu s := \"a\\tb\"; imu n := 0x1_F; }");
        let out = print_file(&result.file, &FormatConfig::default());
        assert_eq!(out, "fun f() {\n  imu s := \"a\\tb\";\n  imu n := 0x1f;\n}\n");
    }

    #[test]
    fn broken_source_is_refused() {
        let errors = format_source("fun f( {").unwrap_err();
        assert!(!errors.is_empty());
    }

    #[test]
    fn demos_round_trip() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");
        let mut count = 0;
        for entry in std::fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.extension().map_or(true, |ext| ext != "zo") {
                continue;
            }
            let src = std::fs::read_to_string(&path).unwrap();
            assert_round_trip(&src);
            count += 1;
        }
        assert!(count > 0, "no demos found in {}", dir.display());
    }
}
