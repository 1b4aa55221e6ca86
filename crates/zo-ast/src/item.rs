// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Item (declaration) AST nodes.

use crate::expr::Expr;
use crate::stmt::{Block, Directive};
use crate::ty::Type;
use crate::{Ident, Span};

/// A top-level or nested declaration.
#[derive(Debug, Clone)]
pub struct Item {
    pub attrs: Vec<Attribute>,
    pub is_pub: bool,
    pub kind: ItemKind,
    pub span: Span,
}

/// `%%name` or `%%name(arg)`
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: Ident,
    pub arg: Option<Ident>,
    pub span: Span,
}

/// The kind of item.
#[derive(Debug, Clone)]
pub enum ItemKind {
    Pack(PackDecl),
    Load(LoadDecl),
    Directive(Directive),
    TypeAlias(TypeAlias),
    /// `group type A = T and B = U;`
    GroupType(Vec<TypeAlias>),
    Ext(ExtDecl),
    Abstract(AbstractDecl),
    Apply(ApplyDecl),
    Fun(FunDecl),
    Val(ValDecl),
    Struct(StructDecl),
    Enum(EnumDecl),
}

impl ItemKind {
    /// Short name used in messages and dumps.
    pub fn describe(&self) -> &'static str {
        match self {
            ItemKind::Pack(_) => "pack",
            ItemKind::Load(_) => "load",
            ItemKind::Directive(_) => "directive",
            ItemKind::TypeAlias(_) => "type alias",
            ItemKind::GroupType(_) => "group type",
            ItemKind::Ext(_) => "ext function",
            ItemKind::Abstract(_) => "abstract",
            ItemKind::Apply(_) => "apply",
            ItemKind::Fun(_) => "function",
            ItemKind::Val(_) => "val",
            ItemKind::Struct(_) => "struct",
            ItemKind::Enum(_) => "enum",
        }
    }
}

/// `pack name { item* }` or `pack name;`
#[derive(Debug, Clone)]
pub struct PackDecl {
    pub name: Ident,
    pub items: Option<Vec<Item>>,
}

/// `load a::b;` or `load a::b::(x, y);`
#[derive(Debug, Clone)]
pub struct LoadDecl {
    pub path: Vec<Ident>,
    pub names: Vec<Ident>,
}

/// `type Name = Type`
#[derive(Debug, Clone)]
pub struct TypeAlias {
    pub name: Ident,
    pub ty: Type,
    pub span: Span,
}

/// `ext name(params) -> Type;`
#[derive(Debug, Clone)]
pub struct ExtDecl {
    pub name: Ident,
    pub params: Vec<Param>,
    pub ret: Type,
}

/// `abstract Name { fun sig; ... }`
#[derive(Debug, Clone)]
pub struct AbstractDecl {
    pub name: Ident,
    pub methods: Vec<FnSig>,
}

/// `apply Capability [for Type] { ... }`
#[derive(Debug, Clone)]
pub struct ApplyDecl {
    pub capability: Ident,
    pub target: Option<Type>,
    pub members: Vec<ApplyMember>,
}

#[derive(Debug, Clone)]
pub enum ApplyMember {
    Fun(FunDecl),
    State(StateDecl),
}

/// `state Idle and Running { pid: int }`
#[derive(Debug, Clone)]
pub struct StateDecl {
    pub variants: Vec<StateVariant>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct StateVariant {
    pub name: Ident,
    pub fields: Option<Vec<Field>>,
    pub span: Span,
}

/// Which keyword introduced a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunKeyword {
    Fun,
    Fn,
}

impl FunKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            FunKeyword::Fun => "fun",
            FunKeyword::Fn => "fn",
        }
    }
}

/// Function signature, shared by declarations and `abstract` methods.
#[derive(Debug, Clone)]
pub struct FnSig {
    pub keyword: FunKeyword,
    pub name: Ident,
    /// `$T` generic parameters, stored without the `$`.
    pub generics: Vec<Ident>,
    pub params: Vec<Param>,
    pub ret: Option<Type>,
    /// `->> (ident)` error/continuation channel
    pub error_channel: Option<Ident>,
    pub span: Span,
}

/// `[raw] fun name(...) -> T { ... }`
#[derive(Debug, Clone)]
pub struct FunDecl {
    pub is_raw: bool,
    pub sig: FnSig,
    pub body: Block,
}

/// A function parameter; `self` is a parameter named `self`.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: Ident,
    pub ty: Type,
    pub span: Span,
}

/// `val name: Type = expr;`
#[derive(Debug, Clone)]
pub struct ValDecl {
    pub name: Ident,
    pub ty: Type,
    pub value: Expr,
}

/// Typestate tracking flag carried by a struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructKind {
    Plain,
    /// Marked with `type@state`
    Typestate,
}

#[derive(Debug, Clone)]
pub struct StructDecl {
    pub kind: StructKind,
    pub name: Ident,
    pub generics: Vec<Ident>,
    pub fields: Vec<Field>,
}

/// `[pub] name: Type [= default]`
#[derive(Debug, Clone)]
pub struct Field {
    pub is_pub: bool,
    pub name: Ident,
    pub ty: Type,
    pub default: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct EnumDecl {
    pub name: Ident,
    pub generics: Vec<Ident>,
    pub variants: Vec<Variant>,
}

/// `Name [(Type)] [= discriminant]`
#[derive(Debug, Clone)]
pub struct Variant {
    pub name: Ident,
    pub payload: Option<Type>,
    pub discriminant: Option<u64>,
    pub span: Span,
}
