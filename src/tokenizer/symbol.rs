//! # Delimiters
//!
//! The only characters that end a word without surrounding whitespace.
//! Operator symbols such as `~`, `+` or `==` are ordinary words and are
//! resolved later against the operator tables.

use std::fmt;

use nom::{
    branch::alt,
    character::complete::char,
    combinator::{map, value},
    error::context,
};

use super::token::{ParserResult, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `[` opens a vector.
    OpenBracket,
    CloseBracket,
    /// `{` opens an alignment literal.
    OpenBrace,
    CloseBrace,
    /// `(` opens a stack-effect comment in a definition.
    OpenParen,
    CloseParen,
    /// `:` starts a definition.
    Colon,
    /// `;` ends a definition.
    Semicolon,
    Comma,
}

impl Delimiter {
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::OpenBracket => '[',
            Delimiter::CloseBracket => ']',
            Delimiter::OpenBrace => '{',
            Delimiter::CloseBrace => '}',
            Delimiter::OpenParen => '(',
            Delimiter::CloseParen => ')',
            Delimiter::Colon => ':',
            Delimiter::Semicolon => ';',
            Delimiter::Comma => ',',
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

pub(crate) fn is_delimiter_char(c: char) -> bool {
    matches!(c, '[' | ']' | '{' | '}' | '(' | ')' | ':' | ';' | ',')
}

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_delimiter(input: &str) -> ParserResult<Token> {
    context(
        "delimiter",
        map(
            alt((
                value(Delimiter::OpenBracket, char('[')),
                value(Delimiter::CloseBracket, char(']')),
                value(Delimiter::OpenBrace, char('{')),
                value(Delimiter::CloseBrace, char('}')),
                value(Delimiter::OpenParen, char('(')),
                value(Delimiter::CloseParen, char(')')),
                value(Delimiter::Colon, char(':')),
                value(Delimiter::Semicolon, char(';')),
                value(Delimiter::Comma, char(',')),
            )),
            Token::Delimiter,
        ),
    )(input)
}
