// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! S-expression dump of a syntax tree.
//!
//! The output mirrors tree-sitter corpus notation and deliberately omits
//! spans, so two trees are structurally equal exactly when their dumps are:
//!
//! ```text
//! (source_file (fun fun name: add params: ((param a (int)) (param b (int))) ret: (int)
//!   body: (block value: (binary add (ident a) (ident b)))))
//! ```

use crate::expr::{Body, Expr, ExprKind, FieldInitStyle, Lit};
use crate::item::{ApplyMember, Attribute, Field, FnSig, FunDecl, Item, ItemKind, Param, StructKind};
use crate::pattern::{Pattern, PatternKind};
use crate::stmt::{Binding, BindingValue, Block, Directive, Stmt, StmtKind};
use crate::template::{AttrValue, Element, Template, TemplateKind, TemplateNode};
use crate::ty::{Type, TypeKind};
use crate::{Ident, Path, SourceFile};

/// Render a whole file.
pub fn to_sexp(file: &SourceFile) -> String {
    let mut w = Writer::default();
    w.open("source_file");
    for item in &file.items {
        w.item(item);
    }
    w.close();
    w.out
}

/// Render one expression; handy in tests.
pub fn expr_to_sexp(expr: &Expr) -> String {
    let mut w = Writer::default();
    w.expr(expr);
    w.out.trim_start().to_string()
}

#[derive(Default)]
struct Writer {
    out: String,
}

impl Writer {
    fn open(&mut self, name: &str) {
        if !self.out.is_empty() && !self.out.ends_with('(') {
            self.out.push(' ');
        }
        self.out.push('(');
        self.out.push_str(name);
    }

    fn close(&mut self) {
        self.out.push(')');
    }

    fn atom(&mut self, text: &str) {
        if !self.out.ends_with('(') {
            self.out.push(' ');
        }
        self.out.push_str(text);
    }

    fn label(&mut self, name: &str) {
        self.atom(&format!("{}:", name));
    }

    fn ident(&mut self, ident: &Ident) {
        self.atom(&ident.name);
    }

    fn list<T>(&mut self, items: &[T], mut each: impl FnMut(&mut Self, &T)) {
        self.open("");
        for item in items {
            each(self, item);
        }
        self.close();
    }

    fn path(&mut self, path: &Path) {
        self.atom(&path.to_string());
    }

    // ---- items ----

    fn item(&mut self, item: &Item) {
        let name = match &item.kind {
            ItemKind::Pack(_) => "pack",
            ItemKind::Load(_) => "load",
            ItemKind::Directive(_) => "directive_item",
            ItemKind::TypeAlias(_) => "type_alias",
            ItemKind::GroupType(_) => "group_type",
            ItemKind::Ext(_) => "ext",
            ItemKind::Abstract(_) => "abstract",
            ItemKind::Apply(_) => "apply",
            ItemKind::Fun(_) => "fun",
            ItemKind::Val(_) => "val",
            ItemKind::Struct(_) => "struct",
            ItemKind::Enum(_) => "enum",
        };
        self.open(name);
        for attr in &item.attrs {
            self.attribute(attr);
        }
        if item.is_pub {
            self.atom("pub");
        }
        match &item.kind {
            ItemKind::Pack(p) => {
                self.label("name");
                self.ident(&p.name);
                if let Some(items) = &p.items {
                    self.label("items");
                    self.list(items, |w, i| w.item(i));
                }
            }
            ItemKind::Load(l) => {
                self.label("path");
                self.list(&l.path, |w, i| w.ident(i));
                if !l.names.is_empty() {
                    self.label("names");
                    self.list(&l.names, |w, i| w.ident(i));
                }
            }
            ItemKind::Directive(d) => self.directive(d),
            ItemKind::TypeAlias(a) => {
                self.ident(&a.name);
                self.ty(&a.ty);
            }
            ItemKind::GroupType(aliases) => {
                for a in aliases {
                    self.open("alias");
                    self.ident(&a.name);
                    self.ty(&a.ty);
                    self.close();
                }
            }
            ItemKind::Ext(e) => {
                self.label("name");
                self.ident(&e.name);
                self.params(&e.params);
                self.label("ret");
                self.ty(&e.ret);
            }
            ItemKind::Abstract(a) => {
                self.label("name");
                self.ident(&a.name);
                for sig in &a.methods {
                    self.open("sig");
                    self.fn_sig(sig);
                    self.close();
                }
            }
            ItemKind::Apply(a) => {
                self.label("capability");
                self.ident(&a.capability);
                if let Some(target) = &a.target {
                    self.label("for");
                    self.ty(target);
                }
                for member in &a.members {
                    match member {
                        ApplyMember::Fun(f) => {
                            self.open("fun");
                            self.fun(f);
                            self.close();
                        }
                        ApplyMember::State(s) => {
                            self.open("state");
                            for v in &s.variants {
                                self.open("variant");
                                self.ident(&v.name);
                                if let Some(fields) = &v.fields {
                                    self.fields(fields);
                                }
                                self.close();
                            }
                            self.close();
                        }
                    }
                }
            }
            ItemKind::Fun(f) => self.fun(f),
            ItemKind::Val(v) => {
                self.label("name");
                self.ident(&v.name);
                self.ty(&v.ty);
                self.expr(&v.value);
            }
            ItemKind::Struct(s) => {
                if s.kind == StructKind::Typestate {
                    self.atom("typestate");
                }
                self.label("name");
                self.ident(&s.name);
                self.generics(&s.generics);
                self.fields(&s.fields);
            }
            ItemKind::Enum(e) => {
                self.label("name");
                self.ident(&e.name);
                self.generics(&e.generics);
                for v in &e.variants {
                    self.open("variant");
                    self.ident(&v.name);
                    if let Some(payload) = &v.payload {
                        self.ty(payload);
                    }
                    if let Some(d) = v.discriminant {
                        self.atom(&format!("= {}", d));
                    }
                    self.close();
                }
            }
        }
        self.close();
    }

    fn attribute(&mut self, attr: &Attribute) {
        self.open("attr");
        self.ident(&attr.name);
        if let Some(arg) = &attr.arg {
            self.ident(arg);
        }
        self.close();
    }

    fn fun(&mut self, f: &FunDecl) {
        if f.is_raw {
            self.atom("raw");
        }
        self.fn_sig(&f.sig);
        self.label("body");
        self.block(&f.body);
    }

    fn fn_sig(&mut self, sig: &FnSig) {
        self.atom(sig.keyword.as_str());
        self.label("name");
        self.ident(&sig.name);
        self.generics(&sig.generics);
        self.params(&sig.params);
        if let Some(ret) = &sig.ret {
            self.label("ret");
            self.ty(ret);
        }
        if let Some(channel) = &sig.error_channel {
            self.label("channel");
            self.ident(channel);
        }
    }

    fn generics(&mut self, generics: &[Ident]) {
        if !generics.is_empty() {
            self.label("generics");
            self.list(generics, |w, g| w.ident(g));
        }
    }

    fn params(&mut self, params: &[Param]) {
        self.label("params");
        self.list(params, |w, p| {
            w.open("param");
            w.ident(&p.name);
            w.ty(&p.ty);
            w.close();
        });
    }

    fn fields(&mut self, fields: &[Field]) {
        self.label("fields");
        self.list(fields, |w, f| {
            w.open("field");
            if f.is_pub {
                w.atom("pub");
            }
            w.ident(&f.name);
            w.ty(&f.ty);
            if let Some(default) = &f.default {
                w.label("default");
                w.expr(default);
            }
            w.close();
        });
    }

    fn directive(&mut self, d: &Directive) {
        self.ident(&d.name);
        self.expr(&d.value);
    }

    // ---- statements ----

    fn block(&mut self, block: &Block) {
        self.open("block");
        for stmt in &block.stmts {
            self.stmt(stmt);
        }
        if let Some(value) = &block.value {
            self.label("value");
            self.expr(value);
        }
        self.close();
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Binding(b) => self.binding(b),
            StmtKind::Assign { target, op, value } => {
                self.open("assign");
                self.atom(op.as_str());
                self.expr(target);
                self.expr(value);
                self.close();
            }
            StmtKind::Expr { expr, .. } => {
                self.open("expr_stmt");
                self.expr(expr);
                self.close();
            }
            StmtKind::Nursery(n) => {
                self.open("nursery");
                for entry in &n.entries {
                    self.open(entry.mode.as_str());
                    self.ident(&entry.name);
                    self.expr(&entry.value);
                    self.close();
                }
                self.close();
            }
            StmtKind::Directive(d) => {
                self.open("directive");
                self.directive(d);
                self.close();
            }
        }
    }

    fn binding(&mut self, b: &Binding) {
        self.open(if b.mutable { "mut" } else { "imu" });
        self.pattern(&b.pattern);
        if let Some(ty) = &b.ty {
            self.label("type");
            self.ty(ty);
        }
        match &b.value {
            BindingValue::Expr(e) => self.expr(e),
            BindingValue::Template(t) => self.template(t),
        }
        self.close();
    }

    // ---- expressions ----

    fn expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Lit(lit) => self.lit(lit, false),
            ExprKind::Ident(i) => {
                self.open("ident");
                self.ident(i);
                self.close();
            }
            ExprKind::Path(p) => {
                self.open("path");
                self.path(p);
                self.close();
            }
            ExprKind::SelfValue => self.atom("(self)"),
            ExprKind::SelfType => self.atom("(Self)"),
            ExprKind::Paren(inner) => {
                self.open("paren");
                self.expr(inner);
                self.close();
            }
            ExprKind::Tuple(items) => {
                self.open("tuple");
                for e in items {
                    self.expr(e);
                }
                self.close();
            }
            ExprKind::Array(items) => {
                self.open("array");
                for e in items {
                    self.expr(e);
                }
                self.close();
            }
            ExprKind::StructLit { path, fields } => {
                self.open("struct_lit");
                self.path(path);
                for f in fields {
                    let tag = match f.style {
                        FieldInitStyle::Colon => "field:",
                        FieldInitStyle::Eq => "field=",
                        FieldInitStyle::Shorthand => "field",
                    };
                    self.open(tag);
                    self.ident(&f.name);
                    if let Some(v) = &f.value {
                        self.expr(v);
                    }
                    self.close();
                }
                self.close();
            }
            ExprKind::Unary { op, operand } => {
                self.open("unary");
                self.atom(op.as_str());
                self.expr(operand);
                self.close();
            }
            ExprKind::Binary { op, left, right } => {
                self.open("binary");
                self.atom(op.name());
                self.expr(left);
                self.expr(right);
                self.close();
            }
            ExprKind::Range { start, end, inclusive } => {
                self.open(if *inclusive { "range_inclusive" } else { "range" });
                self.expr(start);
                self.expr(end);
                self.close();
            }
            ExprKind::Ternary { cond, guard, then_branch, else_branch } => {
                self.open("ternary");
                self.expr(cond);
                self.label("when");
                self.expr(guard);
                self.label("then");
                self.expr(then_branch);
                self.label("else");
                self.expr(else_branch);
                self.close();
            }
            ExprKind::Cast { expr, ty } => {
                self.open("cast");
                self.expr(expr);
                self.ty(ty);
                self.close();
            }
            ExprKind::Field { object, field } => {
                self.open("field");
                self.expr(object);
                self.ident(field);
                self.close();
            }
            ExprKind::TupleIndex { object, index } => {
                self.open("tuple_index");
                self.expr(object);
                self.atom(&index.to_string());
                self.close();
            }
            ExprKind::Index { object, index } => {
                self.open("index");
                self.expr(object);
                self.expr(index);
                self.close();
            }
            ExprKind::Call { callee, args } => {
                self.open("call");
                self.expr(callee);
                self.list(args, |w, a| w.expr(a));
                self.close();
            }
            ExprKind::Is { expr, pattern } => {
                self.open("is");
                self.expr(expr);
                self.pattern(pattern);
                self.close();
            }
            ExprKind::Closure(c) => {
                self.open("closure");
                self.list(&c.params, |w, p| {
                    w.open("param");
                    w.ident(&p.name);
                    if let Some(ty) = &p.ty {
                        w.ty(ty);
                    }
                    w.close();
                });
                if let Some(ret) = &c.ret {
                    self.label("ret");
                    self.ty(ret);
                }
                self.body(&c.body);
                self.close();
            }
            ExprKind::If(i) => {
                self.open("if");
                self.expr(&i.cond);
                self.block(&i.then_branch);
                if let Some(else_branch) = &i.else_branch {
                    self.label("else");
                    self.expr(else_branch);
                }
                self.close();
            }
            ExprKind::Match { scrutinee, arms } => {
                self.open("match");
                self.expr(scrutinee);
                for arm in arms {
                    self.open("arm");
                    self.pattern(&arm.pattern);
                    self.expr(&arm.body);
                    self.close();
                }
                self.close();
            }
            ExprKind::Loop { body } => {
                self.open("loop");
                self.body(body);
                self.close();
            }
            ExprKind::While { cond, body } => {
                self.open("while");
                self.expr(cond);
                self.body(body);
                self.close();
            }
            ExprKind::For { pattern, iter, body } => {
                self.open("for");
                self.pattern(pattern);
                self.expr(iter);
                self.body(body);
                self.close();
            }
            ExprKind::Block(b) => self.block(b),
            ExprKind::Return(value) => {
                self.open("return");
                if let Some(v) = value {
                    self.expr(v);
                }
                self.close();
            }
            ExprKind::Break => self.atom("(break)"),
            ExprKind::Continue => self.atom("(continue)"),
            ExprKind::Ellipsis => self.atom("(ellipsis)"),
            ExprKind::Template(t) => self.template(t),
        }
    }

    fn body(&mut self, body: &Body) {
        match body {
            Body::Block(b) => self.block(b),
            Body::Arrow(e) => {
                self.open("arrow");
                self.expr(e);
                self.close();
            }
        }
    }

    fn lit(&mut self, lit: &Lit, negative: bool) {
        let sign = if negative { "-" } else { "" };
        let text = match lit {
            Lit::Int { value, base } => {
                let digits = match base.radix() {
                    2 => format!("{:b}", value),
                    8 => format!("{:o}", value),
                    16 => format!("{:x}", value),
                    _ => value.to_string(),
                };
                format!("(int {}{}{})", sign, base.prefix(), digits)
            }
            Lit::Float(f) => format!("(float {}{:?})", sign, f),
            Lit::Bool(b) => format!("(bool {})", b),
            Lit::Char(c) => format!("(char {:?})", c),
            Lit::Byte(b) => format!("(byte {})", b),
            Lit::Str(s) => format!("(str {:?})", s),
            Lit::RawStr(s) => format!("(raw_str {:?})", s),
        };
        self.atom(&text);
    }

    // ---- patterns and types ----

    fn pattern(&mut self, pattern: &Pattern) {
        match &pattern.kind {
            PatternKind::Wildcard => self.atom("(_)"),
            PatternKind::Ident(i) => {
                self.open("bind");
                self.ident(i);
                self.close();
            }
            PatternKind::Lit { lit, negative } => self.lit(lit, *negative),
            PatternKind::Path { path, arg } => {
                self.open("path_pat");
                self.path(path);
                if let Some(arg) = arg {
                    self.pattern(arg);
                }
                self.close();
            }
            PatternKind::Tuple(items) => {
                self.open("tuple_pat");
                for p in items {
                    self.pattern(p);
                }
                self.close();
            }
            PatternKind::Array(items) => {
                self.open("array_pat");
                for p in items {
                    self.pattern(p);
                }
                self.close();
            }
            PatternKind::Struct(fields) => {
                self.open("struct_pat");
                for f in fields {
                    self.open("field");
                    self.ident(&f.name);
                    if let Some(p) = &f.pattern {
                        self.pattern(p);
                    }
                    self.close();
                }
                self.close();
            }
        }
    }

    fn ty(&mut self, ty: &Type) {
        match &ty.kind {
            TypeKind::Primitive(p) => self.atom(&format!("({})", p.as_str())),
            TypeKind::Path(p) => {
                self.open("type_path");
                self.path(p);
                self.close();
            }
            TypeKind::Array { len, elem } => {
                self.open("array_type");
                if let Some(len) = len {
                    self.atom(&len.to_string());
                }
                self.ty(elem);
                self.close();
            }
            TypeKind::Tuple(items) => {
                self.open("tuple_type");
                for t in items {
                    self.ty(t);
                }
                self.close();
            }
            TypeKind::Fn { params, ret } => {
                self.open("fn_type");
                self.list(params, |w, t| w.ty(t));
                if let Some(ret) = ret {
                    self.ty(ret);
                }
                self.close();
            }
            TypeKind::Generic(name) => self.atom(&format!("(${})", name.name)),
            TypeKind::Ref { mutable, inner } => {
                self.open(if *mutable { "ref_mut" } else { "ref" });
                self.ty(inner);
                self.close();
            }
            TypeKind::Template => self.atom("(template_type)"),
            TypeKind::SelfType => self.atom("(Self)"),
        }
    }

    // ---- templates ----

    fn template(&mut self, t: &Template) {
        match &t.kind {
            TemplateKind::Fragment(nodes) => {
                self.open("fragment");
                for n in nodes {
                    self.template_node(n);
                }
                self.close();
            }
            TemplateKind::Element(e) => self.element(e),
        }
    }

    fn element(&mut self, e: &Element) {
        self.open("element");
        self.ident(&e.name);
        for attr in &e.attrs {
            self.open("attr");
            self.ident(&attr.name);
            match &attr.value {
                AttrValue::Expr(expr) => self.expr(expr),
                AttrValue::Str(s) => self.atom(&format!("{:?}", s)),
            }
            self.close();
        }
        if e.self_closing {
            self.atom("/");
        }
        for child in &e.children {
            self.template_node(child);
        }
        self.close();
    }

    fn template_node(&mut self, node: &TemplateNode) {
        match node {
            TemplateNode::Element(e) => self.element(e),
            TemplateNode::Text { text, .. } => self.atom(&format!("(text {:?})", text)),
            TemplateNode::Interp(e) => {
                self.open("interp");
                self.expr(e);
                self.close();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::IntBase;
    use crate::Span;

    fn ident_expr(name: &str) -> Expr {
        Expr::new(ExprKind::Ident(Ident::new(name, Span::default())), Span::default())
    }

    #[test]
    fn binary_dump_ignores_spans() {
        let a = Expr::new(
            ExprKind::Binary {
                op: crate::expr::BinOp::Add,
                left: Box::new(ident_expr("a")),
                right: Box::new(Expr::new(
                    ExprKind::Lit(Lit::Int { value: 2, base: IntBase::Dec }),
                    Span::new(40, 41),
                )),
            },
            Span::new(7, 99),
        );
        assert_eq!(expr_to_sexp(&a), "(binary add (ident a) (int 2))");
    }

    #[test]
    fn empty_call_args_render_as_empty_list() {
        let call = Expr::new(
            ExprKind::Call { callee: Box::new(ident_expr("f")), args: vec![] },
            Span::default(),
        );
        assert_eq!(expr_to_sexp(&call), "(call (ident f) ())");
    }
}
