//! Lexer for type spellings.
//!
//! Produces span-based tokens without storing text — text is sliced from
//! the source only when needed.

use std::ops::Range;

use logos::Logos;

use super::ParseError;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum TokenKind {
    #[token("*")]
    Star,
    #[token("&&")]
    AmpAmp,
    #[token("&")]
    Amp,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[regex("[0-9]+")]
    Number,
    #[regex("[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
}

/// Zero-copy token: kind + span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

/// Tokenizes a spelling into span-based tokens.
pub(crate) fn lex(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(item) = lexer.next() {
        match item {
            Ok(kind) => tokens.push(Token {
                kind,
                span: lexer.span(),
            }),
            Err(()) => {
                return Err(ParseError::UnrecognizedCharacter {
                    offset: lexer.span().start,
                });
            }
        }
    }

    Ok(tokens)
}
