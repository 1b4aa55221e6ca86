// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Token definitions for the scanner.

use crate::Span;

/// A token produced by the scanner.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// 1-based line of the first byte.
    pub line: u32,
    /// 1-based column of the first byte.
    pub col: u32,
}

impl Token {
    /// The exact source text this token was scanned from.
    pub fn lexeme<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.span.start..self.span.end).unwrap_or("")
    }
}

/// Radix and spelling of an integer literal.
///
/// The `Based*` forms are the `b#101` / `o#17` / `x#ff` spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntBase {
    Dec,
    Bin,
    Oct,
    Hex,
    BasedBin,
    BasedOct,
    BasedHex,
}

impl IntBase {
    pub fn radix(self) -> u32 {
        match self {
            IntBase::Dec => 10,
            IntBase::Bin | IntBase::BasedBin => 2,
            IntBase::Oct | IntBase::BasedOct => 8,
            IntBase::Hex | IntBase::BasedHex => 16,
        }
    }

    /// Source prefix, e.g. `0x` or `x#`.
    pub fn prefix(self) -> &'static str {
        match self {
            IntBase::Dec => "",
            IntBase::Bin => "0b",
            IntBase::Oct => "0o",
            IntBase::Hex => "0x",
            IntBase::BasedBin => "b#",
            IntBase::BasedOct => "o#",
            IntBase::BasedHex => "x#",
        }
    }
}

/// The kind of token.
///
/// Hard keywords are reserved everywhere: `type`, `fun` or `match` always
/// scan as keyword tokens, so `imu type := 1` is a syntax error rather than
/// a binding named `type`. Only the soft keywords below are accepted where
/// an identifier is expected.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Int { value: u64, base: IntBase },
    Float(f64),
    Bool(bool),
    Char(char),
    Byte(u8),
    Str(String),
    RawStr(String),

    // Identifier
    Ident(String),

    /// A run of template text between tags.
    Text(String),

    // Keywords
    Pack,
    Load,
    Type,
    /// `type@state`
    TypeAtState,
    Ext,
    Abstract,
    Apply,
    Fun,
    Fn,
    Val,
    Struct,
    Enum,
    Imu,
    Mut,
    Loop,
    While,
    For,
    If,
    Else,
    Match,
    Return,
    Break,
    Continue,
    As,
    Is,
    Pub,
    Nursery,
    SelfValue,
    SelfType,

    // Soft keywords: usable as plain identifiers outside their construct
    And,
    State,
    Group,
    Raw,
    When,
    Spawn,
    Await,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Eq,
    EqEq,
    BangEq,
    Bang,
    Lt,
    Gt,
    LtEq,
    GtEq,
    LtLt,
    GtGt,
    Amp,
    AmpAmp,
    Pipe,
    PipePipe,
    Caret,
    /// `|>`
    PipeGt,
    Dot,
    DotDot,
    DotDotEq,
    Ellipsis,
    Arrow,
    /// `->>`
    ArrowGt,
    FatArrow,
    Colon,
    ColonColon,
    /// `:=`
    ColonEq,
    /// `::=`
    ColonColonEq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    AmpEq,
    PipeEq,
    CaretEq,
    LtLtEq,
    GtGtEq,
    Question,
    Hash,
    Dollar,
    /// `%%`
    PercentPercent,

    // Template markers
    /// `<>`
    LtGt,
    /// `</`
    LtSlash,
    /// `/>`
    SlashGt,
    /// `</>`
    LtSlashGt,

    // Delimiters
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Semi,

    Eof,
}

impl TokenKind {
    /// Spelling of a keyword token, soft or hard.
    pub fn keyword_text(&self) -> Option<&'static str> {
        Some(match self {
            TokenKind::Pack => "pack",
            TokenKind::Load => "load",
            TokenKind::Type => "type",
            TokenKind::TypeAtState => "type@state",
            TokenKind::Ext => "ext",
            TokenKind::Abstract => "abstract",
            TokenKind::Apply => "apply",
            TokenKind::Fun => "fun",
            TokenKind::Fn => "fn",
            TokenKind::Val => "val",
            TokenKind::Struct => "struct",
            TokenKind::Enum => "enum",
            TokenKind::Imu => "imu",
            TokenKind::Mut => "mut",
            TokenKind::Loop => "loop",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Match => "match",
            TokenKind::Return => "return",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::As => "as",
            TokenKind::Is => "is",
            TokenKind::Pub => "pub",
            TokenKind::Nursery => "nursery",
            TokenKind::SelfValue => "self",
            TokenKind::SelfType => "Self",
            TokenKind::Bool(true) => "true",
            TokenKind::Bool(false) => "false",
            other => return other.soft_keyword_text(),
        })
    }

    /// Spelling of a soft keyword. Soft keywords double as identifiers.
    pub fn soft_keyword_text(&self) -> Option<&'static str> {
        match self {
            TokenKind::And => Some("and"),
            TokenKind::State => Some("state"),
            TokenKind::Group => Some("group"),
            TokenKind::Raw => Some("raw"),
            TokenKind::When => Some("when"),
            TokenKind::Spawn => Some("spawn"),
            TokenKind::Await => Some("await"),
            _ => None,
        }
    }

    /// Tokens that can begin an item at the top level or in a `pack` body.
    pub fn starts_item(&self) -> bool {
        matches!(
            self,
            TokenKind::Pack
                | TokenKind::Load
                | TokenKind::Type
                | TokenKind::TypeAtState
                | TokenKind::Group
                | TokenKind::Ext
                | TokenKind::Abstract
                | TokenKind::Apply
                | TokenKind::Fun
                | TokenKind::Fn
                | TokenKind::Raw
                | TokenKind::Val
                | TokenKind::Struct
                | TokenKind::Enum
                | TokenKind::Pub
                | TokenKind::PercentPercent
                | TokenKind::Hash
        )
    }

    /// Get a user-friendly name for this token kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            // Literals
            TokenKind::Int { .. } => "integer",
            TokenKind::Float(_) => "float",
            TokenKind::Bool(true) => "'true'",
            TokenKind::Bool(false) => "'false'",
            TokenKind::Char(_) => "character",
            TokenKind::Byte(_) => "byte literal",
            TokenKind::Str(_) => "string",
            TokenKind::RawStr(_) => "raw string",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Text(_) => "template text",

            // Keywords
            TokenKind::Pack => "'pack'",
            TokenKind::Load => "'load'",
            TokenKind::Type => "'type'",
            TokenKind::TypeAtState => "'type@state'",
            TokenKind::Ext => "'ext'",
            TokenKind::Abstract => "'abstract'",
            TokenKind::Apply => "'apply'",
            TokenKind::Fun => "'fun'",
            TokenKind::Fn => "'fn'",
            TokenKind::Val => "'val'",
            TokenKind::Struct => "'struct'",
            TokenKind::Enum => "'enum'",
            TokenKind::Imu => "'imu'",
            TokenKind::Mut => "'mut'",
            TokenKind::Loop => "'loop'",
            TokenKind::While => "'while'",
            TokenKind::For => "'for'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::Match => "'match'",
            TokenKind::Return => "'return'",
            TokenKind::Break => "'break'",
            TokenKind::Continue => "'continue'",
            TokenKind::As => "'as'",
            TokenKind::Is => "'is'",
            TokenKind::Pub => "'pub'",
            TokenKind::Nursery => "'nursery'",
            TokenKind::SelfValue => "'self'",
            TokenKind::SelfType => "'Self'",
            TokenKind::And => "'and'",
            TokenKind::State => "'state'",
            TokenKind::Group => "'group'",
            TokenKind::Raw => "'raw'",
            TokenKind::When => "'when'",
            TokenKind::Spawn => "'spawn'",
            TokenKind::Await => "'await'",

            // Operators
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Eq => "'='",
            TokenKind::EqEq => "'=='",
            TokenKind::BangEq => "'!='",
            TokenKind::Bang => "'!'",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::LtEq => "'<='",
            TokenKind::GtEq => "'>='",
            TokenKind::LtLt => "'<<'",
            TokenKind::GtGt => "'>>'",
            TokenKind::Amp => "'&'",
            TokenKind::AmpAmp => "'&&'",
            TokenKind::Pipe => "'|'",
            TokenKind::PipePipe => "'||'",
            TokenKind::Caret => "'^'",
            TokenKind::PipeGt => "'|>'",
            TokenKind::Dot => "'.'",
            TokenKind::DotDot => "'..'",
            TokenKind::DotDotEq => "'..='",
            TokenKind::Ellipsis => "'...'",
            TokenKind::Arrow => "'->'",
            TokenKind::ArrowGt => "'->>'",
            TokenKind::FatArrow => "'=>'",
            TokenKind::Colon => "':'",
            TokenKind::ColonColon => "'::'",
            TokenKind::ColonEq => "':='",
            TokenKind::ColonColonEq => "'::='",
            TokenKind::PlusEq => "'+='",
            TokenKind::MinusEq => "'-='",
            TokenKind::StarEq => "'*='",
            TokenKind::SlashEq => "'/='",
            TokenKind::PercentEq => "'%='",
            TokenKind::AmpEq => "'&='",
            TokenKind::PipeEq => "'|='",
            TokenKind::CaretEq => "'^='",
            TokenKind::LtLtEq => "'<<='",
            TokenKind::GtGtEq => "'>>='",
            TokenKind::Question => "'?'",
            TokenKind::Hash => "'#'",
            TokenKind::Dollar => "'$'",
            TokenKind::PercentPercent => "'%%'",

            // Template markers
            TokenKind::LtGt => "'<>'",
            TokenKind::LtSlash => "'</'",
            TokenKind::SlashGt => "'/>'",
            TokenKind::LtSlashGt => "'</>'",

            // Delimiters
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Semi => "';'",

            TokenKind::Eof => "end of file",
        }
    }
}
