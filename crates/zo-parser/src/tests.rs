// SPDX-License-Identifier: (MIT OR Apache-2.0)

use zo_ast::expr::{Body, ExprKind};
use zo_ast::item::{ApplyMember, FunKeyword, ItemKind, StructKind};
use zo_ast::sexp::{expr_to_sexp, to_sexp};
use zo_ast::stmt::{AssignOp, BindingValue, NurseryMode, StmtKind};
use zo_ast::template::{AttrValue, TemplateKind, TemplateNode};
use zo_ast::ty::{Primitive, TypeKind};
use zo_ast::SourceFile;
use zo_lexer::LexErrorKind;

use crate::{parse, ErrorKind, ParseResult, Reason};

fn parse_ok(src: &str) -> SourceFile {
    let result: ParseResult = parse(src);
    assert!(result.is_ok(), "Parse errors: {:?}", result.errors);
    result.file
}

/// Dump the trailing value of `fun main() { <src> }`.
fn expr(src: &str) -> String {
    let file = parse_ok(&format!("fun main() {{ {} }}", src));
    let ItemKind::Fun(ref f) = file.items[0].kind else {
        panic!("Expected function");
    };
    let value = f.body.value.as_ref().expect("Expected block value");
    expr_to_sexp(value)
}

#[test]
fn parse_all_demos() {
    let demos_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent().unwrap()
        .parent().unwrap()
        .join("demos");

    for entry in std::fs::read_dir(&demos_dir).expect("demos directory not found") {
        let path = entry.unwrap().path();
        if path.extension().map(|e| e == "zo").unwrap_or(false) {
            let src = std::fs::read_to_string(&path)
                .unwrap_or_else(|_| panic!("Failed to read {}", path.display()));
            let result = parse(&src);
            assert!(result.is_ok(), "Parse errors in {}: {:?}", path.display(), result.errors);
        }
    }
}

// =========================================================================
// Worked examples
// =========================================================================

#[test]
fn parse_add_function() {
    let file = parse_ok("fun add(a: int, b: int) -> int { a + b }");
    assert_eq!(file.items.len(), 1);

    let ItemKind::Fun(ref f) = file.items[0].kind else {
        panic!("Expected function");
    };
    assert_eq!(f.sig.keyword, FunKeyword::Fun);
    assert_eq!(f.sig.name.name, "add");
    assert_eq!(f.sig.params.len(), 2);
    assert_eq!(f.sig.params[0].name.name, "a");
    assert_eq!(f.sig.params[1].name.name, "b");
    for param in &f.sig.params {
        assert!(matches!(param.ty.kind, TypeKind::Primitive(Primitive::Int)));
    }
    assert!(matches!(f.sig.ret.as_ref().map(|t| &t.kind), Some(TypeKind::Primitive(Primitive::Int))));
    assert!(f.body.stmts.is_empty());

    let value = f.body.value.as_ref().expect("Expected trailing expression");
    assert_eq!(expr_to_sexp(value), "(binary add (ident a) (ident b))");

    assert_eq!(
        to_sexp(&file),
        "(source_file (fun fun name: add params: ((param a (int)) (param b (int))) ret: (int) \
         body: (block value: (binary add (ident a) (ident b)))))"
    );
}

#[test]
fn struct_missing_field_type_reports_once_and_recovers() {
    let src = "struct S { x: }";
    let result = parse(src);
    assert_eq!(result.errors.len(), 1, "Errors: {:?}", result.errors);
    let error = &result.errors[0];
    assert_eq!(error.kind, ErrorKind::Syntax);
    assert_eq!(error.span.start, src.find('}').unwrap());

    let result = parse("struct S { x: } fun ok() {}");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.file.items.len(), 1);
    assert!(matches!(result.file.items[0].kind, ItemKind::Fun(_)));
}

#[test]
fn node_spans_cover_children() {
    let src = "fun add(a: int, b: int) -> int { a + b }";
    let file = parse_ok(src);
    let ItemKind::Fun(ref f) = file.items[0].kind else {
        panic!("Expected function");
    };
    let value = f.body.value.as_ref().unwrap();
    assert_eq!(value.span.slice(src), Some("a + b"));
    assert!(f.body.span.contains(value.span));
    assert!(file.items[0].span.contains(f.body.span));
    assert_eq!(file.items[0].span.slice(src), Some(src));
}

// =========================================================================
// Expressions
// =========================================================================

#[test]
fn precedence() {
    assert_eq!(expr("a + b * c"), "(binary add (ident a) (binary mul (ident b) (ident c)))");
    assert_eq!(expr("a || b && c"), "(binary or (ident a) (binary and (ident b) (ident c)))");
    assert_eq!(expr("a - b - c"), "(binary sub (binary sub (ident a) (ident b)) (ident c))");
    assert_eq!(
        expr("a..b == c..d"),
        "(binary eq (range (ident a) (ident b)) (range (ident c) (ident d)))"
    );
    assert_eq!(expr("0..=n + 1"), "(range_inclusive (int 0) (binary add (ident n) (int 1)))");
    assert_eq!(expr("a & b ^ c | d"), "(binary bit_or (binary bit_xor (binary bit_and (ident a) (ident b)) (ident c)) (ident d))");
}

#[test]
fn cast_binds_between_unary_and_multiplicative() {
    assert_eq!(expr("-a as int"), "(cast (unary - (ident a)) (int))");
    assert_eq!(expr("a * b as f64"), "(binary mul (ident a) (cast (ident b) (f64)))");
    assert_eq!(expr("-x.y"), "(unary - (field (ident x) y))");
}

#[test]
fn postfix_chains() {
    assert_eq!(
        expr("a.b(c)[0]"),
        "(index (call (field (ident a) b) ((ident c))) (int 0))"
    );
    assert_eq!(expr("f()"), "(call (ident f) ())");
    assert_eq!(expr("x.type"), "(field (ident x) type)");
    assert_eq!(expr("x is Some(_)"), "(is (ident x) (path_pat Some (_)))");
}

#[test]
fn pipe_binds_tighter_than_arithmetic() {
    assert_eq!(expr("x |> f"), "(binary pipe (ident x) (ident f))");
    assert_eq!(expr("a + b |> f"), "(binary add (ident a) (binary pipe (ident b) (ident f)))");
}

#[test]
fn tuple_index_splits_float_token() {
    assert_eq!(expr("t.0"), "(tuple_index (ident t) 0)");
    assert_eq!(expr("t.0.1"), "(tuple_index (tuple_index (ident t) 0) 1)");
}

#[test]
fn parens_and_tuples() {
    assert_eq!(expr("(a)"), "(paren (ident a))");
    assert_eq!(expr("(a,)"), "(tuple (ident a))");
    assert_eq!(expr("(a, b)"), "(tuple (ident a) (ident b))");
    assert_eq!(expr("()"), "(tuple)");
    assert_eq!(expr("[1, 2,]"), "(array (int 1) (int 2))");
}

#[test]
fn paths() {
    assert_eq!(expr("::std::io::read(f)"), "(call (path ::std::io::read) ((ident f)))");
    assert_eq!(expr("Self::new()"), "(call (path Self::new) ())");
    assert_eq!(expr("state"), "(ident state)");
}

#[test]
fn literals_keep_their_radix() {
    assert_eq!(expr("0xff"), "(int 0xff)");
    assert_eq!(expr("b#101"), "(int b#101)");
    assert_eq!(expr("1_000"), "(int 1000)");
    assert_eq!(expr("$\"raw\\n\""), "(raw_str \"raw\\\\n\")");
}

#[test]
fn guarded_ternary() {
    assert_eq!(
        expr("a when b ? c : d"),
        "(ternary (ident a) when: (ident b) then: (ident c) else: (ident d))"
    );
    assert_eq!(
        expr("a when b || c ? 1 : 2"),
        "(ternary (ident a) when: (binary or (ident b) (ident c)) then: (int 1) else: (int 2))"
    );
}

#[test]
fn ternary_else_is_right_associative() {
    assert_eq!(
        expr("a when b ? c : d when e ? f : g"),
        "(ternary (ident a) when: (ident b) then: (ident c) else: \
         (ternary (ident d) when: (ident e) then: (ident f) else: (ident g)))"
    );
}

#[test]
fn ternary_without_guard_is_a_syntax_error() {
    let result = parse("fun main() { a ? b : c }");
    assert_eq!(result.errors.len(), 1, "Errors: {:?}", result.errors);
    let error = &result.errors[0];
    assert_eq!(error.kind, ErrorKind::Syntax);
    assert_eq!(error.reason, Reason::UnguardedTernary);
    assert!(error.hint.as_deref().unwrap_or("").contains("when"));
}

#[test]
fn guard_without_branches_is_structural() {
    let result = parse("fun main() { a when b }");
    assert_eq!(result.errors.len(), 1, "Errors: {:?}", result.errors);
    assert_eq!(result.errors[0].kind, ErrorKind::Structural);
    assert_eq!(result.errors[0].reason, Reason::IncompleteTernary);

    let result = parse("fun main() { a when b ? c }");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].reason, Reason::IncompleteTernary);
}

#[test]
fn struct_literals() {
    assert_eq!(
        expr("Point { x: 1, y = 2, z }"),
        "(struct_lit Point (field: x (int 1)) (field= y (int 2)) (field z))"
    );
    assert_eq!(expr("geo::Empty {}"), "(struct_lit geo::Empty)");
}

#[test]
fn struct_literal_disabled_in_conditions() {
    let out = expr("if ready { go }");
    assert_eq!(out, "(if (ident ready) (block value: (ident go)))");

    // parentheses re-enable it
    let out = expr("if (p == Point { x: 1 }) { go } else { stop }");
    assert!(out.contains("(struct_lit Point (field: x (int 1)))"), "{}", out);
}

#[test]
fn closures() {
    assert_eq!(
        expr("fn(x) => x + 1"),
        "(closure ((param x)) (arrow (binary add (ident x) (int 1))))"
    );
    assert_eq!(
        expr("fn(x: int) -> int { x }"),
        "(closure ((param x (int))) ret: (int) (block value: (ident x)))"
    );
}

#[test]
fn match_arms() {
    let out = expr("match v { Some(x) => x, None => { 0 } _ => 1, }");
    assert_eq!(
        out,
        "(match (ident v) (arm (path_pat Some (bind x)) (ident x)) \
         (arm (bind None) (block value: (int 0))) (arm (_) (int 1)))"
    );
}

#[test]
fn control_constructs_as_expressions() {
    assert_eq!(
        expr("if a { 1 } else if b { 2 } else { 3 }"),
        "(if (ident a) (block value: (int 1)) else: (if (ident b) (block value: (int 2)) else: (block value: (int 3))))"
    );
    assert_eq!(expr("loop => tick()"), "(loop (arrow (call (ident tick) ())))");
    assert_eq!(expr("while x < 3 -> step()"), "(while (binary lt (ident x) (int 3)) (arrow (call (ident step) ())))");
    assert_eq!(
        expr("1 + loop { break }"),
        "(binary add (int 1) (loop (block value: (break))))"
    );
}

// =========================================================================
// Statements & blocks
// =========================================================================

#[test]
fn block_value() {
    let file = parse_ok("fun f() -> int { imu x := 1; x + 1 }");
    let ItemKind::Fun(ref f) = file.items[0].kind else {
        panic!("Expected function");
    };
    assert_eq!(f.body.stmts.len(), 1);
    let value = f.body.value.as_ref().expect("Expected block value");
    assert_eq!(expr_to_sexp(value), "(binary add (ident x) (int 1))");

    let file = parse_ok("fun f() { imu x := 1; }");
    let ItemKind::Fun(ref f) = file.items[0].kind else {
        panic!("Expected function");
    };
    assert_eq!(f.body.stmts.len(), 1);
    assert!(f.body.value.is_none());
}

#[test]
fn bindings() {
    let file = parse_ok(
        "fun f() { imu a: int = 1; mut b := 2; imu (c, [d, _], { x, y: z }) := t; mut e: []u8 = [1]; }",
    );
    let ItemKind::Fun(ref f) = file.items[0].kind else {
        panic!("Expected function");
    };
    assert_eq!(f.body.stmts.len(), 4);

    let StmtKind::Binding(ref a) = f.body.stmts[0].kind else {
        panic!("Expected binding");
    };
    assert!(!a.mutable);
    assert!(matches!(a.ty.as_ref().map(|t| &t.kind), Some(TypeKind::Primitive(Primitive::Int))));

    let StmtKind::Binding(ref b) = f.body.stmts[1].kind else {
        panic!("Expected binding");
    };
    assert!(b.mutable);
    assert!(b.ty.is_none());

    let dump = to_sexp(&file);
    assert!(
        dump.contains("(tuple_pat (bind c) (array_pat (bind d) (_)) (struct_pat (field x) (field y (bind z))))"),
        "{}",
        dump
    );
}

#[test]
fn template_binding_requires_imu() {
    let result = parse("fun f() { mut v ::= <p/>; }");
    assert_eq!(result.errors.len(), 1, "Errors: {:?}", result.errors);
    assert_eq!(result.errors[0].kind, ErrorKind::Syntax);
}

#[test]
fn assignments() {
    let file = parse_ok("fun f() { x = 1; x += 2; p.y <<= 3; a[0] ^= b; }");
    let ItemKind::Fun(ref f) = file.items[0].kind else {
        panic!("Expected function");
    };
    let ops: Vec<AssignOp> = f
        .body
        .stmts
        .iter()
        .map(|s| match s.kind {
            StmtKind::Assign { op, .. } => op,
            _ => panic!("Expected assignment"),
        })
        .collect();
    assert_eq!(ops, vec![AssignOp::Assign, AssignOp::Add, AssignOp::Shl, AssignOp::BitXor]);
}

#[test]
fn block_like_statements_need_no_semicolon() {
    let file = parse_ok("fun f() { if a { b(); } for i := 0..n { t += i; } match x { _ => 1 } c(); }");
    let ItemKind::Fun(ref f) = file.items[0].kind else {
        panic!("Expected function");
    };
    assert_eq!(f.body.stmts.len(), 4);
    assert!(matches!(f.body.stmts[0].kind, StmtKind::Expr { semi: false, .. }));
    assert!(matches!(f.body.stmts[1].kind, StmtKind::Expr { semi: false, .. }));
    assert!(matches!(f.body.stmts[2].kind, StmtKind::Expr { semi: false, .. }));
    assert!(matches!(f.body.stmts[3].kind, StmtKind::Expr { semi: true, .. }));
}

#[test]
fn arrow_bodied_loop_is_an_expression_statement() {
    let file = parse_ok("fun f() { loop => tick(); while busy => wait(); }");
    let ItemKind::Fun(ref f) = file.items[0].kind else {
        panic!("Expected function");
    };
    assert_eq!(f.body.stmts.len(), 2);
    let StmtKind::Expr { ref expr, semi } = f.body.stmts[0].kind else {
        panic!("Expected expression statement");
    };
    assert!(semi);
    let ExprKind::Loop { ref body } = expr.kind else {
        panic!("Expected loop");
    };
    assert!(matches!(body, Body::Arrow(_)));
}

#[test]
fn missing_semicolon() {
    let result = parse("fun f() { a() b() }");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].reason, Reason::ExpectedToken);
    assert_eq!(result.errors[0].expected.as_deref(), Some("';'"));
}

#[test]
fn nursery_keeps_order() {
    let file = parse_ok("fun main() { nursery { imu a := spawn fetch(1); imu b := await a; } }");
    let ItemKind::Fun(ref f) = file.items[0].kind else {
        panic!("Expected function");
    };
    let StmtKind::Nursery(ref n) = f.body.stmts[0].kind else {
        panic!("Expected nursery");
    };
    assert_eq!(n.entries.len(), 2);
    assert_eq!(n.entries[0].name.name, "a");
    assert_eq!(n.entries[0].mode, NurseryMode::Spawn);
    assert_eq!(n.entries[1].name.name, "b");
    assert_eq!(n.entries[1].mode, NurseryMode::Await);
}

#[test]
fn directive_statement() {
    let file = parse_ok("fun main() { #dom view; }");
    let ItemKind::Fun(ref f) = file.items[0].kind else {
        panic!("Expected function");
    };
    let StmtKind::Directive(ref d) = f.body.stmts[0].kind else {
        panic!("Expected directive");
    };
    assert_eq!(d.name.name, "dom");
}

// =========================================================================
// Items
// =========================================================================

#[test]
fn every_item_kind() {
    let src = r#"
%%inline
pub fun f() {}
pack geo {
  struct Point { x: int, y: int = 0 }
}
load std::io::(read, write);
#run main();
type Id = u64;
group type A = int and B = str;
ext puts(s: str) -> int;
abstract Shape { fun area(self) -> float; }
apply Shape for Circle {
  fun area(self) -> float { 3.14 }
  state Idle and Busy { pid: int }
}
raw fn fast<$T>(x: $T) -> $T ->> (err) { x }
val MAX: int = 10;
type@state struct Door { open: bool }
enum Color { Red = 1, Green, Custom(u32) }
"#;
    let file = parse_ok(src);
    assert_eq!(file.items.len(), 13);

    let first = &file.items[0];
    assert!(first.is_pub);
    assert_eq!(first.attrs.len(), 1);
    assert_eq!(first.attrs[0].name.name, "inline");

    let ItemKind::Pack(ref pack) = file.items[1].kind else {
        panic!("Expected pack");
    };
    assert_eq!(pack.items.as_ref().map(|i| i.len()), Some(1));

    let ItemKind::Load(ref load) = file.items[2].kind else {
        panic!("Expected load");
    };
    assert_eq!(load.path.len(), 2);
    assert_eq!(load.names.len(), 2);

    assert!(matches!(file.items[3].kind, ItemKind::Directive(_)));
    assert!(matches!(file.items[4].kind, ItemKind::TypeAlias(_)));

    let ItemKind::GroupType(ref group) = file.items[5].kind else {
        panic!("Expected group type");
    };
    assert_eq!(group.len(), 2);

    assert!(matches!(file.items[6].kind, ItemKind::Ext(_)));

    let ItemKind::Abstract(ref abs) = file.items[7].kind else {
        panic!("Expected abstract");
    };
    assert_eq!(abs.methods.len(), 1);
    assert!(matches!(abs.methods[0].params[0].ty.kind, TypeKind::SelfType));

    let ItemKind::Apply(ref apply) = file.items[8].kind else {
        panic!("Expected apply");
    };
    assert_eq!(apply.capability.name, "Shape");
    assert!(apply.target.is_some());
    assert!(matches!(apply.members[0], ApplyMember::Fun(_)));
    let ApplyMember::State(ref state) = apply.members[1] else {
        panic!("Expected state");
    };
    assert_eq!(state.variants.len(), 2);
    assert!(state.variants[0].fields.is_none());
    assert_eq!(state.variants[1].fields.as_ref().map(|f| f.len()), Some(1));

    let ItemKind::Fun(ref fast) = file.items[9].kind else {
        panic!("Expected function");
    };
    assert!(fast.is_raw);
    assert_eq!(fast.sig.keyword, FunKeyword::Fn);
    assert_eq!(fast.sig.generics.len(), 1);
    assert_eq!(fast.sig.error_channel.as_ref().map(|c| c.name.as_str()), Some("err"));

    assert!(matches!(file.items[10].kind, ItemKind::Val(_)));

    let ItemKind::Struct(ref door) = file.items[11].kind else {
        panic!("Expected struct");
    };
    assert_eq!(door.kind, StructKind::Typestate);

    let ItemKind::Enum(ref color) = file.items[12].kind else {
        panic!("Expected enum");
    };
    assert_eq!(color.variants.len(), 3);
    assert_eq!(color.variants[0].discriminant, Some(1));
    assert!(color.variants[2].payload.is_some());
}

#[test]
fn typestate_marker_after_struct_keyword() {
    let file = parse_ok("struct type@state Door { open: bool }");
    let ItemKind::Struct(ref door) = file.items[0].kind else {
        panic!("Expected struct");
    };
    assert_eq!(door.kind, StructKind::Typestate);
}

#[test]
fn malformed_group_type_is_structural() {
    let result = parse("group type A = int and ;");
    assert_eq!(result.errors.len(), 1, "Errors: {:?}", result.errors);
    assert_eq!(result.errors[0].kind, ErrorKind::Structural);
    assert_eq!(result.errors[0].reason, Reason::MalformedGroupType);
}

#[test]
fn types() {
    let file = parse_ok(
        "fun t(a: [4]u8, b: []str, c: (int, bool), d: Fn(int) -> bool, e: &mut Self, f: </>, g: ::geo::Point, h: $T) {}",
    );
    let dump = to_sexp(&file);
    for expected in [
        "(array_type 4 (u8))",
        "(array_type (str))",
        "(tuple_type (int) (bool))",
        "(fn_type ((int)) (bool))",
        "(ref_mut (Self))",
        "(template_type)",
        "(type_path ::geo::Point)",
        "($T)",
    ] {
        assert!(dump.contains(expected), "missing {} in {}", expected, dump);
    }
}

#[test]
fn literal_patterns() {
    let out = expr("match n { -1 => a, 0x1f => b, \"s\" => c, _ => d }");
    assert!(out.contains("(arm (int -1) (ident a))"), "{}", out);
    assert!(out.contains("(arm (int 0x1f) (ident b))"), "{}", out);
    assert!(out.contains("(arm (str \"s\") (ident c))"), "{}", out);
}

// =========================================================================
// Templates
// =========================================================================

#[test]
fn template_element() {
    let file = parse_ok(r#"fun view() { imu page ::= <div class="box">Hello {name}<br/></div>; }"#);
    let ItemKind::Fun(ref f) = file.items[0].kind else {
        panic!("Expected function");
    };
    let StmtKind::Binding(ref b) = f.body.stmts[0].kind else {
        panic!("Expected binding");
    };
    let BindingValue::Template(ref t) = b.value else {
        panic!("Expected template");
    };
    let TemplateKind::Element(ref div) = t.kind else {
        panic!("Expected element");
    };
    assert_eq!(div.name.name, "div");
    assert_eq!(div.attrs.len(), 1);
    assert!(matches!(div.attrs[0].value, AttrValue::Str(ref s) if s == "box"));
    assert_eq!(div.children.len(), 3);
    assert!(matches!(div.children[0], TemplateNode::Text { ref text, .. } if text == "Hello "));
    assert!(matches!(div.children[1], TemplateNode::Interp(_)));
    assert!(matches!(div.children[2], TemplateNode::Element(ref br) if br.self_closing));
}

#[test]
fn template_as_expression() {
    assert_eq!(
        expr("<> hi <b>{x + 1}</b></>"),
        "(fragment (text \"hi \") (element b (interp (binary add (ident x) (int 1)))))"
    );
    assert_eq!(
        expr("<button onclick={fn() => go()}>ok</button>"),
        "(element button (attr onclick (closure () (arrow (call (ident go) ())))) (text \"ok\"))"
    );
}

#[test]
fn template_type_annotation() {
    parse_ok("fun f() { imu v: </> ::= <>x</>; }");
}

#[test]
fn mismatched_closing_tag() {
    let src = "fun v() { imu p ::= <div>hi</span>; }";
    let result = parse(src);
    assert_eq!(result.errors.len(), 1, "Errors: {:?}", result.errors);
    let error = &result.errors[0];
    assert_eq!(error.kind, ErrorKind::Syntax);
    assert_eq!(error.reason, Reason::MismatchedTag);
    let (related, _) = error.related.as_ref().expect("Expected opening tag label");
    assert_eq!(related.slice(src), Some("div"));
    assert_eq!(error.span.slice(src), Some("span"));
}

#[test]
fn unclosed_element_errors_at_end_of_input() {
    let src = "fun v() { imu p ::= <div>hi";
    let result = parse(src);
    assert!(!result.is_ok());
    assert_eq!(result.errors[0].kind, ErrorKind::Syntax);
    assert!(result.errors.iter().all(|e| e.span.start == src.len()), "Errors: {:?}", result.errors);
}

#[test]
fn broken_interpolation_resumes_inside_markup() {
    let src = "fun f() { imu t := <p>hi {a +} there</p>; imu z := 1; } fun g() {}";
    let result = parse(src);
    assert_eq!(result.errors.len(), 1, "Errors: {:?}", result.errors);
    assert_eq!(result.errors[0].span.slice(src), Some("}"));
    assert_eq!(result.file.items.len(), 2);
    let ItemKind::Fun(ref f) = result.file.items[0].kind else {
        panic!("Expected function");
    };
    assert_eq!(f.body.stmts.len(), 2);
    let StmtKind::Binding(ref b) = f.body.stmts[0].kind else {
        panic!("Expected binding");
    };
    let BindingValue::Expr(ref value) = b.value else {
        panic!("Expected expression value");
    };
    let ExprKind::Template(ref t) = value.kind else {
        panic!("Expected template");
    };
    let TemplateKind::Element(ref el) = t.kind else {
        panic!("Expected element");
    };
    assert_eq!(el.children.len(), 2);
    assert!(matches!(&el.children[1], TemplateNode::Text { text, .. } if text == "there"));
}

#[test]
fn broken_attribute_stays_inside_the_tag() {
    let result = parse("fun f() { imu t ::= <a href={x +} title=\"t\">go</a>; imu z := 1; }");
    assert_eq!(result.errors.len(), 1, "Errors: {:?}", result.errors);
    let ItemKind::Fun(ref f) = result.file.items[0].kind else {
        panic!("Expected function");
    };
    assert_eq!(f.body.stmts.len(), 2);

    let result = parse("fun f() { imu t ::= <p class>hi</p>; } fun g() {}");
    assert_eq!(result.errors.len(), 1, "Errors: {:?}", result.errors);
    assert_eq!(result.file.items.len(), 2);
}

// =========================================================================
// Error handling
// =========================================================================

#[test]
fn deep_parens_stop_at_the_nesting_limit() {
    let n = 10_000;
    let src = format!("fun f() {{ imu x := {}1{}; }} fun g() {{}}", "(".repeat(n), ")".repeat(n));
    let result = parse(&src);
    assert_eq!(result.errors.len(), 1, "Errors: {:?}", result.errors);
    assert_eq!(result.errors[0].reason, Reason::NestingTooDeep);
    assert_eq!(result.errors[0].kind, ErrorKind::Structural);
    assert_eq!(result.file.items.len(), 2);
}

#[test]
fn long_unary_chain_stops_at_the_nesting_limit() {
    // spaced so `--` is not read as a comment
    let src = format!("fun f() {{ imu x := {}1; imu y := 2; }}", "- ".repeat(10_000));
    let result = parse(&src);
    assert_eq!(result.errors.len(), 1, "Errors: {:?}", result.errors);
    assert_eq!(result.errors[0].reason, Reason::NestingTooDeep);
    let ItemKind::Fun(ref f) = result.file.items[0].kind else {
        panic!("Expected function");
    };
    assert_eq!(f.body.stmts.len(), 1);
}

#[test]
fn deep_blocks_types_patterns_and_markup_are_bounded() {
    let n = 10_000;
    let blocks = format!("fun f() {{ {}{} }} fun g() {{}}", "{ ".repeat(n), "} ".repeat(n));
    let result = parse(&blocks);
    assert_eq!(result.errors.len(), 1, "Errors: {:?}", result.errors);
    assert_eq!(result.errors[0].reason, Reason::NestingTooDeep);
    assert_eq!(result.file.items.len(), 2);

    let sources = [
        format!("fun f(x: {}i32{}) {{}}", "[".repeat(n), "]".repeat(n)),
        format!("fun f() {{ match x {{ {}y{} => 1, }} }}", "S(".repeat(n), ")".repeat(n)),
        format!("fun f() {{ imu t ::= {}x{}; }}", "<b>".repeat(n), "</b>".repeat(n)),
        format!("fun f() {{ if a {{}} {}}}", "else if a {} ".repeat(n)),
    ];
    for src in &sources {
        let result = parse(src);
        assert_eq!(result.errors[0].reason, Reason::NestingTooDeep, "Errors: {:?}", result.errors);
    }
}

#[test]
fn moderate_nesting_is_accepted() {
    let src = format!("fun f() {{ imu x := {}1{}; }}", "(".repeat(40), ")".repeat(40));
    parse_ok(&src);
}

#[test]
fn prefixed_int_without_digits_is_a_lexical_error() {
    let result = parse("fun f() { imu x := 0x; imu y := 0xg; }");
    assert_eq!(result.errors.len(), 2, "Errors: {:?}", result.errors);
    assert!(result.errors.iter().all(|e| e.reason == Reason::Lex(LexErrorKind::MalformedLiteral)));
}

#[test]
fn hard_keywords_are_not_binding_names() {
    let result = parse("fun f() { imu type := 1; imu z := 2; }");
    assert_eq!(result.errors.len(), 1, "Errors: {:?}", result.errors);
    assert_eq!(result.errors[0].expected.as_deref(), Some("pattern"));
    parse_ok("fun f() { imu state := 1; imu raw := 2; }");
}

#[test]
fn recovers_within_blocks() {
    let result = parse("fun f() { imu = 1; g(; h(); }");
    assert_eq!(result.errors.len(), 2, "Errors: {:?}", result.errors);
    let ItemKind::Fun(ref f) = result.file.items[0].kind else {
        panic!("Expected function");
    };
    assert_eq!(f.body.stmts.len(), 1);
}

#[test]
fn lexical_errors_are_merged_in_order() {
    let result = parse("fun f() { imu s := \"a\\qb\"; imu = 2; }");
    assert_eq!(result.errors.len(), 2, "Errors: {:?}", result.errors);
    assert_eq!(result.errors[0].kind, ErrorKind::Lexical);
    assert_eq!(result.errors[0].reason, Reason::Lex(LexErrorKind::InvalidEscape));
    assert_eq!(result.errors[1].kind, ErrorKind::Syntax);
}

#[test]
fn fatal_lexical_error_hides_fallout() {
    let result = parse("fun f() { imu s := \"abc; }");
    assert_eq!(result.errors.len(), 1, "Errors: {:?}", result.errors);
    assert_eq!(result.errors[0].reason, Reason::Lex(LexErrorKind::UnterminatedString));

    let result = parse("fun f() {} -* never closed");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].reason, Reason::Lex(LexErrorKind::UnterminatedComment));
    assert_eq!(result.file.items.len(), 1);
}

#[test]
fn error_limit() {
    let src = "1;".repeat(30);
    let result = parse(&src);
    assert_eq!(result.errors.len(), 20);
}

#[test]
fn into_result_is_either_or() {
    assert!(parse("fun f() {}").into_result().is_ok());
    let errors = parse("fun f( {}").into_result().unwrap_err();
    assert!(!errors.is_empty());
}

#[test]
fn comments_are_collected() {
    let result = parse("-- lead\nfun f() { -* inner *- }");
    assert!(result.is_ok());
    assert_eq!(result.comments.len(), 2);
}

#[test]
fn source_name_is_recorded() {
    let result = crate::parse_file("main.zo", "fun main() {}");
    assert_eq!(result.file.name.as_deref(), Some("main.zo"));
}
