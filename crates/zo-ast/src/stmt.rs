// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statement and block AST nodes.

use crate::expr::Expr;
use crate::pattern::Pattern;
use crate::template::Template;
use crate::ty::Type;
use crate::{Ident, Span};

/// `{ statement* expression? }`
///
/// The optional trailing expression is the block's value; without it the
/// block evaluates to unit.
#[derive(Debug, Clone)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub value: Option<Box<Expr>>,
    pub span: Span,
}

/// A statement in the AST.
#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

/// The kind of statement.
#[derive(Debug, Clone)]
pub enum StmtKind {
    /// `imu`/`mut` binding
    Binding(Binding),
    /// Assignment, plain or compound
    Assign {
        target: Expr,
        op: AssignOp,
        value: Expr,
    },
    /// Expression statement; `semi` is false for block-like forms
    Expr {
        expr: Expr,
        semi: bool,
    },
    /// Structured-concurrency block
    Nursery(Nursery),
    /// `#name value`
    Directive(Directive),
}

/// `imu pat: T = e`, `imu pat := e`, `imu name ::= <template>`, `mut ...`
#[derive(Debug, Clone)]
pub struct Binding {
    pub mutable: bool,
    pub pattern: Pattern,
    pub ty: Option<Type>,
    pub value: BindingValue,
}

#[derive(Debug, Clone)]
pub enum BindingValue {
    Expr(Expr),
    /// Only reachable from `imu ... ::=`.
    Template(Template),
}

/// Assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Shl,
    Shr,
    BitAnd,
    BitOr,
    BitXor,
}

impl AssignOp {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Add => "+=",
            AssignOp::Sub => "-=",
            AssignOp::Mul => "*=",
            AssignOp::Div => "/=",
            AssignOp::Mod => "%=",
            AssignOp::Shl => "<<=",
            AssignOp::Shr => ">>=",
            AssignOp::BitAnd => "&=",
            AssignOp::BitOr => "|=",
            AssignOp::BitXor => "^=",
        }
    }
}

/// `nursery { imu a := spawn f(); imu b := await a; }`
///
/// Entries are kept in declaration order; later entries may refer to
/// earlier names.
#[derive(Debug, Clone)]
pub struct Nursery {
    pub entries: Vec<NurseryEntry>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct NurseryEntry {
    pub name: Ident,
    pub mode: NurseryMode,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NurseryMode {
    Spawn,
    Await,
}

impl NurseryMode {
    pub fn as_str(self) -> &'static str {
        match self {
            NurseryMode::Spawn => "spawn",
            NurseryMode::Await => "await",
        }
    }
}

/// Compiler directive: `#run main();`, `#dom view;`
#[derive(Debug, Clone)]
pub struct Directive {
    pub name: Ident,
    pub value: Expr,
    pub span: Span,
}
