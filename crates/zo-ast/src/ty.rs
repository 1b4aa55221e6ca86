// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Type syntax.

use crate::{Ident, Path, Span};

#[derive(Debug, Clone)]
pub struct Type {
    pub kind: TypeKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum TypeKind {
    Primitive(Primitive),
    Path(Path),
    /// `[N]T` or `[]T`
    Array {
        len: Option<u64>,
        elem: Box<Type>,
    },
    /// `(A, B)`; empty for unit
    Tuple(Vec<Type>),
    /// `Fn(A, B) -> R`
    Fn {
        params: Vec<Type>,
        ret: Option<Box<Type>>,
    },
    /// `$T`, stored without the `$`
    Generic(Ident),
    /// `&T` / `&mut T`
    Ref {
        mutable: bool,
        inner: Box<Type>,
    },
    /// `</>`
    Template,
    /// `Self`
    SelfType,
}

/// Built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Int,
    S8,
    S16,
    S32,
    S64,
    Uint,
    U8,
    U16,
    U32,
    U64,
    Float,
    F32,
    F64,
    Bool,
    Bytes,
    Char,
    Str,
}

impl Primitive {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "int" => Primitive::Int,
            "s8" => Primitive::S8,
            "s16" => Primitive::S16,
            "s32" => Primitive::S32,
            "s64" => Primitive::S64,
            "uint" => Primitive::Uint,
            "u8" => Primitive::U8,
            "u16" => Primitive::U16,
            "u32" => Primitive::U32,
            "u64" => Primitive::U64,
            "float" => Primitive::Float,
            "f32" => Primitive::F32,
            "f64" => Primitive::F64,
            "bool" => Primitive::Bool,
            "bytes" => Primitive::Bytes,
            "char" => Primitive::Char,
            "str" => Primitive::Str,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Primitive::Int => "int",
            Primitive::S8 => "s8",
            Primitive::S16 => "s16",
            Primitive::S32 => "s32",
            Primitive::S64 => "s64",
            Primitive::Uint => "uint",
            Primitive::U8 => "u8",
            Primitive::U16 => "u16",
            Primitive::U32 => "u32",
            Primitive::U64 => "u64",
            Primitive::Float => "float",
            Primitive::F32 => "f32",
            Primitive::F64 => "f64",
            Primitive::Bool => "bool",
            Primitive::Bytes => "bytes",
            Primitive::Char => "char",
            Primitive::Str => "str",
        }
    }
}
