// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression AST nodes.

use crate::pattern::Pattern;
use crate::stmt::Block;
use crate::template::Template;
use crate::token::IntBase;
use crate::ty::Type;
use crate::{Ident, Path, Span};

/// An expression in the AST.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Block-like expressions can stand as statements without a `;`.
    pub fn is_block_like(&self) -> bool {
        match &self.kind {
            ExprKind::Block(_) | ExprKind::If(_) | ExprKind::Match { .. } => true,
            ExprKind::Loop { body } | ExprKind::While { body, .. } | ExprKind::For { body, .. } => {
                matches!(body, Body::Block(_))
            }
            _ => false,
        }
    }
}

/// The kind of expression.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Literal value
    Lit(Lit),
    /// Bare identifier
    Ident(Ident),
    /// Qualified path (`a::b`, `::a`)
    Path(Path),
    /// `self`
    SelfValue,
    /// `Self`
    SelfType,
    /// Parenthesized expression, kept for faithful printing
    Paren(Box<Expr>),
    /// Tuple literal; `()` is the unit tuple
    Tuple(Vec<Expr>),
    /// Array literal
    Array(Vec<Expr>),
    /// Struct literal (`Point { x: 1, y = 2, z }`)
    StructLit {
        path: Path,
        fields: Vec<FieldInit>,
    },
    /// Unary operation
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// Binary operation, including the `|>` pipe
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Range (`a..b` or `a..=b`)
    Range {
        start: Box<Expr>,
        end: Box<Expr>,
        inclusive: bool,
    },
    /// Guarded ternary (`cond when guard ? then : else`)
    Ternary {
        cond: Box<Expr>,
        guard: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    /// Cast (`expr as Type`)
    Cast {
        expr: Box<Expr>,
        ty: Type,
    },
    /// Field access
    Field {
        object: Box<Expr>,
        field: Ident,
    },
    /// Numeric tuple index (`t.0`)
    TupleIndex {
        object: Box<Expr>,
        index: u32,
    },
    /// Index access
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    /// Function call
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    /// Shape test (`expr is Pattern`)
    Is {
        expr: Box<Expr>,
        pattern: Pattern,
    },
    /// Closure (`fn(x) => x + 1`)
    Closure(Closure),
    /// If expression
    If(IfExpr),
    /// Match expression
    Match {
        scrutinee: Box<Expr>,
        arms: Vec<MatchArm>,
    },
    /// `loop BODY`
    Loop {
        body: Body,
    },
    /// `while cond BODY`
    While {
        cond: Box<Expr>,
        body: Body,
    },
    /// `for pattern := iter BODY`
    For {
        pattern: Pattern,
        iter: Box<Expr>,
        body: Body,
    },
    /// Block expression
    Block(Block),
    /// `return [expr]`
    Return(Option<Box<Expr>>),
    Break,
    Continue,
    /// Placeholder `...`
    Ellipsis,
    /// Embedded markup literal
    Template(Template),
}

/// Literal values.
#[derive(Debug, Clone, PartialEq)]
pub enum Lit {
    Int { value: u64, base: IntBase },
    Float(f64),
    Bool(bool),
    Char(char),
    Byte(u8),
    Str(String),
    RawStr(String),
}

/// Body of a closure or loop-like control construct.
#[derive(Debug, Clone)]
pub enum Body {
    /// `{ ... }`
    Block(Block),
    /// `=> expr` (or `-> expr` for control constructs)
    Arrow(Box<Expr>),
}

impl Body {
    pub fn span(&self) -> Span {
        match self {
            Body::Block(b) => b.span,
            Body::Arrow(e) => e.span,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IfExpr {
    pub cond: Box<Expr>,
    pub then_branch: Block,
    /// Either another `If` or a `Block` expression.
    pub else_branch: Option<Box<Expr>>,
}

#[derive(Debug, Clone)]
pub struct Closure {
    pub params: Vec<ClosureParam>,
    pub ret: Option<Type>,
    pub body: Body,
}

/// Closure parameter; the type is optional.
#[derive(Debug, Clone)]
pub struct ClosureParam {
    pub name: Ident,
    pub ty: Option<Type>,
    pub span: Span,
}

/// A match arm: `pattern => body`.
#[derive(Debug, Clone)]
pub struct MatchArm {
    pub pattern: Pattern,
    pub body: Expr,
    pub span: Span,
}

/// How a struct-literal field was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInitStyle {
    /// `field: value`
    Colon,
    /// `field = value`
    Eq,
    /// `field`
    Shorthand,
}

/// A field initializer in a struct literal.
#[derive(Debug, Clone)]
pub struct FieldInit {
    pub name: Ident,
    /// `None` only for the shorthand form.
    pub value: Option<Expr>,
    pub style: FieldInitStyle,
    pub span: Span,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    BitOr,
    BitXor,
    BitAnd,
    Shl,
    Shr,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    /// `|>`
    Pipe,
}

impl BinOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinOp::Or => "||",
            BinOp::And => "&&",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
            BinOp::BitOr => "|",
            BinOp::BitXor => "^",
            BinOp::BitAnd => "&",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Pipe => "|>",
        }
    }

    /// Precedence tier, 1 (ternary) through 15 (call).
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Or => 2,
            BinOp::And => 3,
            BinOp::Eq | BinOp::Ne => 4,
            BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge => 5,
            BinOp::BitOr => 6,
            BinOp::BitXor => 7,
            BinOp::BitAnd => 8,
            BinOp::Shl | BinOp::Shr => 9,
            BinOp::Add | BinOp::Sub => 10,
            BinOp::Mul | BinOp::Div | BinOp::Mod => 11,
            BinOp::Pipe => 14,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BinOp::Or => "or",
            BinOp::And => "and",
            BinOp::Eq => "eq",
            BinOp::Ne => "ne",
            BinOp::Lt => "lt",
            BinOp::Gt => "gt",
            BinOp::Le => "le",
            BinOp::Ge => "ge",
            BinOp::BitOr => "bit_or",
            BinOp::BitXor => "bit_xor",
            BinOp::BitAnd => "bit_and",
            BinOp::Shl => "shl",
            BinOp::Shr => "shr",
            BinOp::Add => "add",
            BinOp::Sub => "sub",
            BinOp::Mul => "mul",
            BinOp::Div => "div",
            BinOp::Mod => "mod",
            BinOp::Pipe => "pipe",
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `!`
    Not,
    /// `-`
    Neg,
    /// `+`
    Plus,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
        }
    }
}
