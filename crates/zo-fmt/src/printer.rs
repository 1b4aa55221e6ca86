// SPDX-License-Identifier: (MIT OR Apache-2.0)

use zo_ast::expr::*;
use zo_ast::item::*;
use zo_ast::pattern::{Pattern, PatternKind};
use zo_ast::stmt::*;
use zo_ast::template::*;
use zo_ast::ty::{Type, TypeKind};
use zo_ast::{Ident, SourceFile, Span};

use crate::comment::{Comment, CommentList};
use crate::config::FormatConfig;

/// Blank-line policy between consecutive entries of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Spacing {
    /// A blank line before every entry but the first.
    Separated,
    /// Blank lines only where the source had one.
    AsWritten,
    /// Never.
    Tight,
}

pub struct Printer<'a> {
    output: String,
    indent: usize,
    /// Absent when printing a tree that was not parsed from text.
    source: Option<&'a str>,
    comments: CommentList,
    config: &'a FormatConfig,
}

impl<'a> Printer<'a> {
    pub fn new(source: Option<&'a str>, comments: CommentList, config: &'a FormatConfig) -> Self {
        Self {
            output: String::new(),
            indent: 0,
            source,
            comments,
            config,
        }
    }

    pub fn finish(mut self) -> String {
        // Comments after the last item
        for c in self.comments.take_rest() {
            if !self.output.is_empty() && self.has_blank_line_before(c.span.start) {
                self.emit_blank_line();
            }
            self.output.push_str(&c.text);
            self.output.push('\n');
        }
        if !self.output.is_empty() && !self.output.ends_with('\n') {
            self.output.push('\n');
        }
        self.output
    }

    // --- Helpers ---

    fn emit(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn emit_newline(&mut self) {
        self.output.push('\n');
    }

    fn emit_indent(&mut self) {
        let spaces = self.indent * self.config.indent_width;
        for _ in 0..spaces {
            self.output.push(' ');
        }
    }

    fn emit_blank_line(&mut self) {
        if self.output.ends_with("\n\n") {
            return;
        }
        if !self.output.ends_with('\n') {
            self.output.push('\n');
        }
        self.output.push('\n');
    }

    fn source_text(&self, span: Span) -> Option<&'a str> {
        self.source.and_then(|source| span.slice(source))
    }

    /// Check if there's a blank line in the source immediately before `pos`,
    /// scanning backward through whitespace only.
    fn has_blank_line_before(&self, pos: usize) -> bool {
        let Some(source) = self.source else {
            return false;
        };
        let bytes = source.as_bytes();
        let mut newlines = 0;
        let mut p = pos.min(bytes.len());
        while p > 0 {
            p -= 1;
            match bytes[p] {
                b'\n' => newlines += 1,
                b' ' | b'\t' | b'\r' => {}
                _ => break,
            }
        }
        newlines >= 2
    }

    /// Take comments before `pos` and emit each on its own line.
    fn emit_comments_before(&mut self, pos: usize, emit_blank_before_first: bool) -> Vec<Comment> {
        let comments = self.comments.take_before(pos);
        for (i, c) in comments.iter().enumerate() {
            if (i > 0 || emit_blank_before_first) && self.has_blank_line_before(c.span.start) {
                self.emit_blank_line();
            }
            self.emit_indent();
            self.output.push_str(&c.text);
            self.emit_newline();
        }
        comments
    }

    /// Emit the next comment after the current line if it sat on the same
    /// source line as the code ending at `span_end`.
    fn try_emit_trailing_comment(&mut self, span_end: usize) -> bool {
        let Some(source) = self.source else {
            return false;
        };
        let Some(c) = self.comments.peek_next() else {
            return false;
        };
        if c.span.start < span_end {
            return false;
        }
        let Some(gap) = source.get(span_end..c.span.start) else {
            return false;
        };
        if !gap.chars().all(|ch| matches!(ch, ' ' | '\t' | ';' | ',')) {
            return false;
        }
        let Some(c) = self.comments.advance() else {
            return false;
        };
        self.emit("  ");
        self.emit(&c.text);
        true
    }

    fn current_line_width(&self) -> usize {
        let start = self.output.rfind('\n').map_or(0, |i| i + 1);
        self.output[start..].chars().count()
    }

    /// Print into a scratch buffer and hand the text back.
    fn render(&mut self, f: impl FnOnce(&mut Self)) -> String {
        let saved = std::mem::take(&mut self.output);
        let indent = self.indent;
        f(self);
        self.indent = indent;
        std::mem::replace(&mut self.output, saved)
    }

    /// Leading comments, the blank line policy, then one indented line of
    /// content with its trailing comment.
    fn format_entry(&mut self, span: Span, is_first: bool, spacing: Spacing, f: impl FnOnce(&mut Self)) {
        let comments = self.emit_comments_before(span.start, !is_first && spacing != Spacing::Tight);
        let blank = match spacing {
            Spacing::Tight => false,
            _ if !comments.is_empty() => self.has_blank_line_before(span.start),
            Spacing::Separated => !is_first,
            Spacing::AsWritten => !is_first && self.has_blank_line_before(span.start),
        };
        if blank {
            self.emit_blank_line();
        }
        self.emit_indent();
        f(self);
        self.try_emit_trailing_comment(span.end);
        self.emit_newline();
    }

    /// Comments left before the closing brace at `end - 1`, then the brace.
    fn close_brace(&mut self, end: usize) {
        self.emit_comments_before(end.saturating_sub(1), true);
        self.indent -= 1;
        self.emit_indent();
        self.emit("}");
    }

    /// `{ a, b }` on one line when it fits, otherwise one entry per line.
    fn format_brace_list<T>(
        &mut self,
        entries: &[T],
        span: Span,
        entry_span: impl Fn(&T) -> Span,
        format_one: impl Fn(&mut Self, &T),
    ) {
        let has_comments = self.comments.any_within(span);
        if entries.is_empty() && !has_comments {
            self.emit("{}");
            return;
        }

        if !has_comments {
            let text = self.render(|p| {
                p.emit("{ ");
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        p.emit(", ");
                    }
                    format_one(p, entry);
                }
                p.emit(" }");
            });
            let fits = !text.contains('\n')
                && self.current_line_width() + text.chars().count() <= self.config.max_line_width;
            if fits {
                self.emit(&text);
                return;
            }
        }

        self.emit("{");
        self.emit_newline();
        self.indent += 1;
        for (i, entry) in entries.iter().enumerate() {
            self.format_entry(entry_span(entry), i == 0, Spacing::Tight, |p| {
                format_one(p, entry);
                p.emit(",");
            });
        }
        self.close_brace(span.end);
    }

    fn emit_joined<T>(&mut self, entries: &[T], format_one: impl Fn(&mut Self, &T)) {
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                self.emit(", ");
            }
            format_one(self, entry);
        }
    }

    fn emit_ident(&mut self, ident: &Ident) {
        self.emit(&ident.name);
    }

    // --- File ---

    pub fn format_file(&mut self, file: &SourceFile) {
        self.format_items(&file.items);
    }

    fn format_items(&mut self, items: &[Item]) {
        let mut prev_was_load = false;
        for (i, item) in items.iter().enumerate() {
            let is_load = matches!(item.kind, ItemKind::Load(_));
            // consecutive loads stay grouped the way they were written
            let spacing = if prev_was_load && is_load { Spacing::AsWritten } else { Spacing::Separated };
            self.format_entry(item.span, i == 0, spacing, |p| p.format_item(item));
            prev_was_load = is_load;
        }
    }

    // --- Items ---

    fn format_item(&mut self, item: &Item) {
        for attr in &item.attrs {
            self.emit("%%");
            self.emit_ident(&attr.name);
            if let Some(arg) = &attr.arg {
                self.emit("(");
                self.emit_ident(arg);
                self.emit(")");
            }
            self.emit_newline();
            self.emit_indent();
        }

        if item.is_pub {
            self.emit("pub ");
        }

        match &item.kind {
            ItemKind::Pack(p) => self.format_pack(p, item.span),
            ItemKind::Load(l) => self.format_load(l),
            ItemKind::Directive(d) => {
                self.format_directive(d);
                self.emit(";");
            }
            ItemKind::TypeAlias(alias) => {
                self.emit("type ");
                self.format_type_binding(alias);
                self.emit(";");
            }
            ItemKind::GroupType(aliases) => {
                self.emit("group type ");
                for (i, alias) in aliases.iter().enumerate() {
                    if i > 0 {
                        self.emit(" and ");
                    }
                    self.format_type_binding(alias);
                }
                self.emit(";");
            }
            ItemKind::Ext(e) => {
                self.emit("ext ");
                self.emit_ident(&e.name);
                self.format_params(&e.params);
                self.emit(" -> ");
                self.format_type(&e.ret);
                self.emit(";");
            }
            ItemKind::Abstract(a) => self.format_abstract(a, item.span),
            ItemKind::Apply(a) => self.format_apply(a, item.span),
            ItemKind::Fun(f) => self.format_fun(f),
            ItemKind::Val(v) => {
                self.emit("val ");
                self.emit_ident(&v.name);
                self.emit(": ");
                self.format_type(&v.ty);
                self.emit(" = ");
                self.format_expr(&v.value);
                self.emit(";");
            }
            ItemKind::Struct(s) => {
                if s.kind == StructKind::Typestate {
                    self.emit("type@state ");
                }
                self.emit("struct ");
                self.emit_ident(&s.name);
                self.format_generics(&s.generics);
                self.emit(" ");
                self.format_fields(&s.fields, item.span);
            }
            ItemKind::Enum(e) => {
                self.emit("enum ");
                self.emit_ident(&e.name);
                self.format_generics(&e.generics);
                self.emit(" ");
                self.format_brace_list(&e.variants, item.span, |v| v.span, |p, v| p.format_variant(v));
            }
        }
    }

    fn format_pack(&mut self, pack: &PackDecl, span: Span) {
        self.emit("pack ");
        self.emit_ident(&pack.name);
        let Some(items) = &pack.items else {
            self.emit(";");
            return;
        };
        if items.is_empty() && !self.comments.any_within(span) {
            self.emit(" {}");
            return;
        }
        self.emit(" {");
        self.emit_newline();
        self.indent += 1;
        self.format_items(items);
        self.close_brace(span.end);
    }

    fn format_load(&mut self, load: &LoadDecl) {
        self.emit("load ");
        for (i, segment) in load.path.iter().enumerate() {
            if i > 0 {
                self.emit("::");
            }
            self.emit_ident(segment);
        }
        if !load.names.is_empty() {
            self.emit("::(");
            self.emit_joined(&load.names, |p, name| p.emit_ident(name));
            self.emit(")");
        }
        self.emit(";");
    }

    fn format_directive(&mut self, directive: &Directive) {
        self.emit("#");
        self.emit_ident(&directive.name);
        self.emit(" ");
        self.format_expr(&directive.value);
    }

    fn format_type_binding(&mut self, alias: &TypeAlias) {
        self.emit_ident(&alias.name);
        self.emit(" = ");
        self.format_type(&alias.ty);
    }

    fn format_abstract(&mut self, decl: &AbstractDecl, span: Span) {
        self.emit("abstract ");
        self.emit_ident(&decl.name);
        if decl.methods.is_empty() && !self.comments.any_within(span) {
            self.emit(" {}");
            return;
        }
        self.emit(" {");
        self.emit_newline();
        self.indent += 1;
        for (i, sig) in decl.methods.iter().enumerate() {
            self.format_entry(sig.span, i == 0, Spacing::Tight, |p| {
                p.format_fn_sig(sig);
                p.emit(";");
            });
        }
        self.close_brace(span.end);
    }

    fn format_apply(&mut self, decl: &ApplyDecl, span: Span) {
        self.emit("apply ");
        self.emit_ident(&decl.capability);
        if let Some(target) = &decl.target {
            self.emit(" for ");
            self.format_type(target);
        }
        if decl.members.is_empty() && !self.comments.any_within(span) {
            self.emit(" {}");
            return;
        }
        self.emit(" {");
        self.emit_newline();
        self.indent += 1;
        for (i, member) in decl.members.iter().enumerate() {
            let member_span = match member {
                ApplyMember::Fun(f) => Span::new(f.sig.span.start, f.body.span.end),
                ApplyMember::State(s) => s.span,
            };
            self.format_entry(member_span, i == 0, Spacing::Separated, |p| match member {
                ApplyMember::Fun(f) => p.format_fun(f),
                ApplyMember::State(s) => p.format_state(s),
            });
        }
        self.close_brace(span.end);
    }

    fn format_state(&mut self, state: &StateDecl) {
        self.emit("state ");
        for (i, variant) in state.variants.iter().enumerate() {
            if i > 0 {
                self.emit(" and ");
            }
            self.emit_ident(&variant.name);
            if let Some(fields) = &variant.fields {
                self.emit(" ");
                self.format_fields(fields, variant.span);
            }
        }
    }

    fn format_fun(&mut self, fun: &FunDecl) {
        if fun.is_raw {
            self.emit("raw ");
        }
        self.format_fn_sig(&fun.sig);
        self.emit(" ");
        self.format_block(&fun.body);
    }

    fn format_fn_sig(&mut self, sig: &FnSig) {
        self.emit(sig.keyword.as_str());
        self.emit(" ");
        self.emit_ident(&sig.name);
        self.format_generics(&sig.generics);
        self.format_params(&sig.params);
        if let Some(ret) = &sig.ret {
            self.emit(" -> ");
            self.format_type(ret);
            if let Some(channel) = &sig.error_channel {
                self.emit(" ->> (");
                self.emit_ident(channel);
                self.emit(")");
            }
        }
    }

    fn format_generics(&mut self, generics: &[Ident]) {
        if generics.is_empty() {
            return;
        }
        self.emit("<");
        self.emit_joined(generics, |p, g| {
            p.emit("$");
            p.emit_ident(g);
        });
        self.emit(">");
    }

    fn format_params(&mut self, params: &[Param]) {
        self.emit("(");
        self.emit_joined(params, |p, param| {
            p.emit_ident(&param.name);
            // a bare `self` is recorded with the `Self` type
            if param.name.name == "self" && matches!(param.ty.kind, TypeKind::SelfType) {
                return;
            }
            p.emit(": ");
            p.format_type(&param.ty);
        });
        self.emit(")");
    }

    fn format_fields(&mut self, fields: &[Field], span: Span) {
        self.format_brace_list(fields, span, |f| f.span, |p, field| {
            if field.is_pub {
                p.emit("pub ");
            }
            p.emit_ident(&field.name);
            p.emit(": ");
            p.format_type(&field.ty);
            if let Some(default) = &field.default {
                p.emit(" = ");
                p.format_expr(default);
            }
        });
    }

    fn format_variant(&mut self, variant: &Variant) {
        self.emit_ident(&variant.name);
        if let Some(payload) = &variant.payload {
            self.emit("(");
            self.format_type(payload);
            self.emit(")");
        }
        if let Some(value) = variant.discriminant {
            self.emit(&format!(" = {}", value));
        }
    }

    // --- Types ---

    fn format_type(&mut self, ty: &Type) {
        match &ty.kind {
            TypeKind::Primitive(prim) => self.emit(prim.as_str()),
            TypeKind::Path(path) => self.emit(&path.to_string()),
            TypeKind::Array { len, elem } => {
                self.emit("[");
                if let Some(len) = len {
                    self.emit(&len.to_string());
                }
                self.emit("]");
                self.format_type(elem);
            }
            TypeKind::Tuple(types) => {
                self.emit("(");
                self.emit_joined(types, |p, t| p.format_type(t));
                self.emit(")");
            }
            TypeKind::Fn { params, ret } => {
                self.emit("Fn(");
                self.emit_joined(params, |p, t| p.format_type(t));
                self.emit(")");
                if let Some(ret) = ret {
                    self.emit(" -> ");
                    self.format_type(ret);
                }
            }
            TypeKind::Generic(name) => {
                self.emit("$");
                self.emit_ident(name);
            }
            TypeKind::Ref { mutable, inner } => {
                self.emit(if *mutable { "&mut " } else { "&" });
                self.format_type(inner);
            }
            TypeKind::Template => self.emit("</>"),
            TypeKind::SelfType => self.emit("Self"),
        }
    }

    // --- Statements ---

    fn format_block(&mut self, block: &Block) {
        if block.stmts.is_empty() && block.value.is_none() && !self.comments.any_within(block.span) {
            self.emit("{}");
            return;
        }

        self.emit("{");
        self.emit_newline();
        self.indent += 1;

        for (i, stmt) in block.stmts.iter().enumerate() {
            self.format_entry(stmt.span, i == 0, Spacing::AsWritten, |p| p.format_stmt(stmt));
        }
        if let Some(value) = &block.value {
            self.format_entry(value.span, block.stmts.is_empty(), Spacing::AsWritten, |p| p.format_expr(value));
        }

        self.close_brace(block.span.end);
    }

    fn format_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Binding(binding) => self.format_binding(binding),
            StmtKind::Assign { target, op, value } => {
                self.format_expr(target);
                self.emit(" ");
                self.emit(op.as_str());
                self.emit(" ");
                self.format_expr(value);
                self.emit(";");
            }
            StmtKind::Expr { expr, semi } => {
                self.format_expr(expr);
                if *semi {
                    self.emit(";");
                }
            }
            StmtKind::Nursery(nursery) => self.format_nursery(nursery),
            StmtKind::Directive(directive) => {
                self.format_directive(directive);
                self.emit(";");
            }
        }
    }

    fn format_binding(&mut self, binding: &Binding) {
        self.emit(if binding.mutable { "mut " } else { "imu " });
        self.format_pattern(&binding.pattern);
        match (&binding.ty, &binding.value) {
            (Some(ty), BindingValue::Expr(value)) => {
                self.emit(": ");
                self.format_type(ty);
                self.emit(" = ");
                self.format_expr(value);
            }
            (None, BindingValue::Expr(value)) => {
                self.emit(" := ");
                self.format_expr(value);
            }
            (ty, BindingValue::Template(template)) => {
                if let Some(ty) = ty {
                    self.emit(": ");
                    self.format_type(ty);
                }
                self.emit(" ::= ");
                self.format_template(template);
            }
        }
        self.emit(";");
    }

    fn format_nursery(&mut self, nursery: &Nursery) {
        self.emit("nursery ");
        if nursery.entries.is_empty() && !self.comments.any_within(nursery.span) {
            self.emit("{}");
            return;
        }
        self.emit("{");
        self.emit_newline();
        self.indent += 1;
        for (i, entry) in nursery.entries.iter().enumerate() {
            self.format_entry(entry.span, i == 0, Spacing::Tight, |p| {
                p.emit("imu ");
                p.emit_ident(&entry.name);
                p.emit(" := ");
                p.emit(entry.mode.as_str());
                p.emit(" ");
                p.format_expr(&entry.value);
                p.emit(";");
            });
        }
        self.close_brace(nursery.span.end);
    }

    // --- Expressions ---

    fn format_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Lit(lit) => {
                let text = self.lit_text(lit, expr.span);
                self.emit(&text);
            }
            ExprKind::Ident(ident) => self.emit_ident(ident),
            ExprKind::Path(path) => self.emit(&path.to_string()),
            ExprKind::SelfValue => self.emit("self"),
            ExprKind::SelfType => self.emit("Self"),
            ExprKind::Paren(inner) => {
                self.emit("(");
                self.format_expr(inner);
                self.emit(")");
            }
            ExprKind::Tuple(items) => {
                self.emit("(");
                self.emit_joined(items, |p, e| p.format_expr(e));
                if items.len() == 1 {
                    self.emit(",");
                }
                self.emit(")");
            }
            ExprKind::Array(items) => {
                self.emit("[");
                self.emit_joined(items, |p, e| p.format_expr(e));
                self.emit("]");
            }
            ExprKind::StructLit { path, fields } => {
                self.emit(&path.to_string());
                if fields.is_empty() {
                    self.emit(" {}");
                    return;
                }
                self.emit(" { ");
                self.emit_joined(fields, |p, field| p.format_field_init(field));
                self.emit(" }");
            }
            ExprKind::Unary { op, operand } => {
                self.emit(op.as_str());
                // `- -x` must not collapse into a comment marker
                if *op == UnaryOp::Neg && matches!(operand.kind, ExprKind::Unary { op: UnaryOp::Neg, .. }) {
                    self.emit(" ");
                }
                let wrap = matches!(&operand.kind, ExprKind::Binary { op, .. } if *op != BinOp::Pipe);
                self.format_wrapped(operand, wrap);
            }
            ExprKind::Binary { op, left, right } => {
                self.format_operand(left, *op, false);
                self.emit(" ");
                self.emit(op.as_str());
                self.emit(" ");
                self.format_operand(right, *op, true);
            }
            ExprKind::Range { start, end, inclusive } => {
                self.format_expr(start);
                self.emit(if *inclusive { "..=" } else { ".." });
                self.format_expr(end);
            }
            ExprKind::Ternary { cond, guard, then_branch, else_branch } => {
                self.format_expr(cond);
                self.emit(" when ");
                self.format_expr(guard);
                self.emit(" ? ");
                self.format_expr(then_branch);
                self.emit(" : ");
                self.format_expr(else_branch);
            }
            ExprKind::Cast { expr, ty } => {
                self.format_expr(expr);
                self.emit(" as ");
                self.format_type(ty);
            }
            ExprKind::Field { object, field } => {
                self.format_expr(object);
                self.emit(".");
                self.emit_ident(field);
            }
            ExprKind::TupleIndex { object, index } => {
                self.format_expr(object);
                self.emit(&format!(".{}", index));
            }
            ExprKind::Index { object, index } => {
                self.format_expr(object);
                self.emit("[");
                self.format_expr(index);
                self.emit("]");
            }
            ExprKind::Call { callee, args } => {
                self.format_expr(callee);
                self.emit("(");
                self.emit_joined(args, |p, e| p.format_expr(e));
                self.emit(")");
            }
            ExprKind::Is { expr, pattern } => {
                self.format_expr(expr);
                self.emit(" is ");
                self.format_pattern(pattern);
            }
            ExprKind::Closure(closure) => self.format_closure(closure),
            ExprKind::If(if_expr) => self.format_if(if_expr),
            ExprKind::Match { scrutinee, arms } => self.format_match(scrutinee, arms, expr.span),
            ExprKind::Loop { body } => {
                self.emit("loop");
                self.format_body(body);
            }
            ExprKind::While { cond, body } => {
                self.emit("while ");
                self.format_expr(cond);
                self.format_body(body);
            }
            ExprKind::For { pattern, iter, body } => {
                self.emit("for ");
                self.format_pattern(pattern);
                self.emit(" := ");
                self.format_expr(iter);
                self.format_body(body);
            }
            ExprKind::Block(block) => self.format_block(block),
            ExprKind::Return(value) => {
                self.emit("return");
                if let Some(value) = value {
                    self.emit(" ");
                    self.format_expr(value);
                }
            }
            ExprKind::Break => self.emit("break"),
            ExprKind::Continue => self.emit("continue"),
            ExprKind::Ellipsis => self.emit("..."),
            ExprKind::Template(template) => self.format_template(template),
        }
    }

    /// Operand of a binary operator. All binary operators associate to the
    /// left, so a right operand of equal precedence needs parentheses too.
    fn format_operand(&mut self, operand: &Expr, parent: BinOp, is_right: bool) {
        let wrap = match &operand.kind {
            ExprKind::Binary { op, .. } => {
                let (child, parent) = (op.precedence(), parent.precedence());
                if is_right { child <= parent } else { child < parent }
            }
            _ => false,
        };
        self.format_wrapped(operand, wrap);
    }

    fn format_wrapped(&mut self, expr: &Expr, wrap: bool) {
        if wrap {
            self.emit("(");
        }
        self.format_expr(expr);
        if wrap {
            self.emit(")");
        }
    }

    fn format_field_init(&mut self, field: &FieldInit) {
        self.emit_ident(&field.name);
        let Some(value) = &field.value else {
            return;
        };
        self.emit(match field.style {
            FieldInitStyle::Eq => " = ",
            FieldInitStyle::Colon | FieldInitStyle::Shorthand => ": ",
        });
        self.format_expr(value);
    }

    fn format_closure(&mut self, closure: &Closure) {
        self.emit("fn(");
        self.emit_joined(&closure.params, |p, param| {
            p.emit_ident(&param.name);
            if let Some(ty) = &param.ty {
                p.emit(": ");
                p.format_type(ty);
            }
        });
        self.emit(")");
        if let Some(ret) = &closure.ret {
            self.emit(" -> ");
            self.format_type(ret);
        }
        self.format_body(&closure.body);
    }

    fn format_body(&mut self, body: &Body) {
        match body {
            Body::Block(block) => {
                self.emit(" ");
                self.format_block(block);
            }
            Body::Arrow(expr) => {
                self.emit(" => ");
                self.format_expr(expr);
            }
        }
    }

    fn format_if(&mut self, if_expr: &IfExpr) {
        self.emit("if ");
        self.format_expr(&if_expr.cond);
        self.emit(" ");
        self.format_block(&if_expr.then_branch);
        if let Some(else_branch) = &if_expr.else_branch {
            self.emit(" else ");
            match &else_branch.kind {
                ExprKind::If(nested) => self.format_if(nested),
                ExprKind::Block(block) => self.format_block(block),
                _ => self.format_expr(else_branch),
            }
        }
    }

    fn format_match(&mut self, scrutinee: &Expr, arms: &[MatchArm], span: Span) {
        self.emit("match ");
        self.format_expr(scrutinee);
        if arms.is_empty() && !self.comments.any_within(Span::new(scrutinee.span.end, span.end)) {
            self.emit(" {}");
            return;
        }
        self.emit(" {");
        self.emit_newline();
        self.indent += 1;
        for (i, arm) in arms.iter().enumerate() {
            self.format_entry(arm.span, i == 0, Spacing::AsWritten, |p| {
                p.format_pattern(&arm.pattern);
                p.emit(" => ");
                p.format_expr(&arm.body);
                if !matches!(arm.body.kind, ExprKind::Block(_)) {
                    p.emit(",");
                }
            });
        }
        self.close_brace(span.end);
    }

    // --- Patterns ---

    fn format_pattern(&mut self, pattern: &Pattern) {
        match &pattern.kind {
            PatternKind::Wildcard => self.emit("_"),
            PatternKind::Ident(ident) => self.emit_ident(ident),
            PatternKind::Lit { lit, negative } => {
                // the span of a negative literal starts at its `-`
                let text = self
                    .source_text(pattern.span)
                    .map(|t| t.trim_start_matches('-').trim_start().to_string())
                    .unwrap_or_else(|| render_lit(lit));
                if *negative {
                    self.emit("-");
                }
                self.emit(&text);
            }
            PatternKind::Path { path, arg } => {
                self.emit(&path.to_string());
                if let Some(arg) = arg {
                    self.emit("(");
                    self.format_pattern(arg);
                    self.emit(")");
                }
            }
            PatternKind::Tuple(items) => {
                self.emit("(");
                self.emit_joined(items, |p, item| p.format_pattern(item));
                self.emit(")");
            }
            PatternKind::Array(items) => {
                self.emit("[");
                self.emit_joined(items, |p, item| p.format_pattern(item));
                self.emit("]");
            }
            PatternKind::Struct(fields) => {
                if fields.is_empty() {
                    self.emit("{}");
                    return;
                }
                self.emit("{ ");
                self.emit_joined(fields, |p, field| {
                    p.emit_ident(&field.name);
                    if let Some(sub) = &field.pattern {
                        p.emit(": ");
                        p.format_pattern(sub);
                    }
                });
                self.emit(" }");
            }
        }
    }

    // --- Templates ---

    // Template text is whitespace-sensitive, so markup stays on one line
    // exactly as the nodes describe it.
    fn format_template(&mut self, template: &Template) {
        match &template.kind {
            TemplateKind::Fragment(nodes) => {
                self.emit("<>");
                self.format_template_nodes(nodes);
                self.emit("</>");
            }
            TemplateKind::Element(element) => self.format_element(element),
        }
    }

    fn format_element(&mut self, element: &Element) {
        self.emit("<");
        self.emit_ident(&element.name);
        for attr in &element.attrs {
            self.emit(" ");
            self.emit_ident(&attr.name);
            self.emit("=");
            match &attr.value {
                AttrValue::Str(value) => {
                    let text = self
                        .source_text(attr.span)
                        .and_then(|t| t.split_once('='))
                        .map(|(_, quoted)| quoted.trim().to_string())
                        .unwrap_or_else(|| format!("\"{}\"", escape(value, '"')));
                    self.emit(&text);
                }
                AttrValue::Expr(expr) => {
                    self.emit("{");
                    self.format_expr(expr);
                    self.emit("}");
                }
            }
        }
        if element.self_closing {
            self.emit("/>");
            return;
        }
        self.emit(">");
        self.format_template_nodes(&element.children);
        self.emit("</");
        self.emit_ident(&element.name);
        self.emit(">");
    }

    fn format_template_nodes(&mut self, nodes: &[TemplateNode]) {
        for node in nodes {
            match node {
                TemplateNode::Element(element) => self.format_element(element),
                TemplateNode::Text { text, .. } => self.emit(text),
                TemplateNode::Interp(expr) => {
                    self.emit("{");
                    self.format_expr(expr);
                    self.emit("}");
                }
            }
        }
    }

    // --- Literals ---

    /// Literals keep their source spelling when there is a source.
    fn lit_text(&self, lit: &Lit, span: Span) -> String {
        match self.source_text(span) {
            Some(text) => text.to_string(),
            None => render_lit(lit),
        }
    }
}

fn render_lit(lit: &Lit) -> String {
    match lit {
        Lit::Int { value, base } => {
            let digits = match base.radix() {
                2 => format!("{:b}", value),
                8 => format!("{:o}", value),
                16 => format!("{:x}", value),
                _ => value.to_string(),
            };
            format!("{}{}", base.prefix(), digits)
        }
        Lit::Float(f) => format!("{:?}", f),
        Lit::Bool(b) => b.to_string(),
        Lit::Char(c) => format!("'{}'", escape(&c.to_string(), '\'')),
        Lit::Byte(b) => {
            let body = if (b.is_ascii_graphic() || *b == b' ') && *b != b'`' {
                escape(&(*b as char).to_string(), '`')
            } else {
                escape_byte(*b)
            };
            format!("`{}`", body)
        }
        Lit::Str(s) => format!("\"{}\"", escape(s, '"')),
        Lit::RawStr(s) => format!("$\"{}\"", s),
    }
}

fn escape(text: &str, quote: char) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '\0' => out.push_str("\\0"),
            '"' if quote == '"' => out.push_str("\\\""),
            '\'' if quote == '\'' => out.push_str("\\'"),
            c if c.is_ascii_control() => out.push_str(&escape_byte(c as u8)),
            c => out.push(c),
        }
    }
    out
}

fn escape_byte(b: u8) -> String {
    match b {
        b'\n' => "\\n".to_string(),
        b'\r' => "\\r".to_string(),
        b'\t' => "\\t".to_string(),
        0 => "\\0".to_string(),
        _ => format!("\\x{:02x}", b),
    }
}
