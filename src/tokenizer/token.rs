use nom::{
    branch::alt,
    bytes::complete::take_while1,
    combinator::map,
    error::{context, VerboseError},
    IResult,
};
use thiserror::Error;

use super::{
    comment::parse_comment,
    literal::{parse_literal, Literal},
    symbol::{is_delimiter_char, parse_delimiter, Delimiter},
    whitespace::{parse_newline, parse_whitespace},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Literal(Literal),
    /// Operator or procedure name.
    Word(String),
    Delimiter(Delimiter),
    // Formatting
    Whitespace(String),
    Newline,
    Comment {
        content: String,
        comment_type: CommentType,
    },
}

impl Token {
    /// Whitespace, newlines and comments carry no meaning for the parser.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            Token::Whitespace(_) | Token::Newline | Token::Comment { .. }
        )
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Literal(Literal::Number(n)) => write!(f, "{n}"),
            Token::Literal(Literal::Text(s)) => write!(f, "{s:?}"),
            Token::Word(word) => write!(f, "{word}"),
            Token::Delimiter(delimiter) => write!(f, "{delimiter}"),
            Token::Whitespace(_) => write!(f, "whitespace"),
            Token::Newline => write!(f, "newline"),
            Token::Comment { .. } => write!(f, "comment"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentType {
    Line,  // //
    Block, // /* */
}

#[derive(Debug, Clone)]
pub struct Tokenizer {
    current_position: usize,
    current_line: usize,
    current_column: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            current_position: 0,
            current_line: 1,   // 1-based
            current_column: 1, // 1-based
        }
    }

    #[tracing::instrument(level = "debug", skip(input))]
    pub fn tokenize(&mut self, input: &str) -> TokenizerResult<Vec<TokenSpan>> {
        let mut tokens = Vec::new();
        let mut remaining = input;

        while !remaining.is_empty() {
            let start_position = self.current_position;
            let start_line = self.current_line;
            let start_column = self.current_column;

            let result = alt((
                // Formatting
                parse_whitespace,
                parse_newline,
                // Comments before words, `/` alone is division
                parse_comment,
                parse_literal,
                parse_delimiter,
                parse_word,
            ))(remaining);

            match result {
                Ok((new_remaining, token)) => {
                    let consumed = &remaining[..(remaining.len() - new_remaining.len())];
                    self.update_position(consumed);

                    tokens.push(TokenSpan {
                        token,
                        span: Span {
                            start: start_position,
                            end: self.current_position,
                            line: start_line,
                            column: start_column,
                        },
                    });

                    remaining = new_remaining;
                }
                Err(e) => {
                    let found = remaining.chars().take(20).collect::<String>();
                    let span = Span {
                        start: self.current_position,
                        end: self.current_position + 1,
                        line: self.current_line,
                        column: self.current_column,
                    };
                    let error = match e {
                        nom::Err::Incomplete(e) => TokenizerError::ParseError {
                            message: format!("Incomplete input, {:?}", e),
                            found,
                            span,
                        },
                        nom::Err::Error(e) | nom::Err::Failure(e) => TokenizerError::ParseError {
                            message: nom::error::convert_error(remaining, e),
                            found,
                            span,
                        },
                    };
                    tracing::error!("{}", error);
                    return Err(error);
                }
            }
        }

        Ok(tokens)
    }

    /// `\n`, `\r\n` and a lone `\r` each end a line.
    fn update_position(&mut self, text: &str) {
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            self.current_position += c.len_utf8();
            let line_break = c == '\n' || (c == '\r' && chars.peek() != Some(&'\n'));
            if line_break {
                self.current_line += 1;
                self.current_column = 1;
            } else {
                self.current_column += 1;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenSpan {
    pub token: Token,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Characters that may appear in a word.
pub(crate) fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && c != '"' && !is_delimiter_char(c)
}

#[tracing::instrument(level = "debug", skip(input))]
fn parse_word(input: &str) -> ParserResult<Token> {
    context(
        "word",
        map(take_while1(is_word_char), |word: &str| {
            Token::Word(word.to_string())
        }),
    )(input)
}

pub type ParserResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

pub type TokenizerResult<T> = Result<T, TokenizerError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenizerError {
    #[error("Tokenize error at {span}: {message}")]
    ParseError {
        message: String,
        found: String,
        span: Span,
    },
}
