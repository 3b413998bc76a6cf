//! Type-spelling parser.
//!
//! Turns spellings like `int const&`, `unsigned long long`, `Widget[3]` or
//! `int(int, bool)` into interned descriptors. Class names must already be
//! registered in the target [`TypeDb`]. The notation is postfix-friendly
//! and round-trips with [`TypeDb::display`]: suffixes (`*`, `[n]`, `(...)`,
//! `&`, `&&`) apply left to right, cv words may appear on either side of
//! the base spelling, and cv after `*` qualifies the pointer itself.

mod grammar;
mod lexer;


use comref_core::{TyId, TypeDb};

/// Errors produced while parsing a type spelling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unrecognized character at offset {offset}")]
    UnrecognizedCharacter { offset: usize },

    #[error("unknown type name `{name}`")]
    UnknownType { name: String },

    #[error("unexpected token at offset {offset}")]
    UnexpectedToken { offset: usize },

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("trailing input at offset {offset}")]
    TrailingInput { offset: usize },

    #[error("duplicate `{spec}` specifier")]
    DuplicateSpecifier { spec: String },

    #[error("invalid specifier combination `{spelling}`")]
    BadSpecifiers { spelling: String },

    #[error("cannot form a reference to void")]
    ReferenceToVoid,

    #[error("array bound `{text}` is out of range")]
    ArrayLength { text: String },
}

/// Parse a type spelling, interning the result into `db`.
pub fn parse_type(db: &mut TypeDb, source: &str) -> Result<TyId, ParseError> {
    let tokens = lexer::lex(source)?;
    grammar::Parser::new(db, source, tokens).parse()
}
