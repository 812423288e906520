//! # Tokenizer
//!
//! Splits `.phylo` source text into spanned tokens with `nom`.
//!
//! - [`literal`]: numbers and escaped strings
//! - [`symbol`]: the delimiters `[ ] { } ( ) : ; ,`
//! - [`comment`]: `//` and `/* */`
//! - [`whitespace`]: spaces and newlines, kept for span tracking
//!
//! Anything else that is not whitespace is a word.

pub mod comment;
pub mod literal;
pub mod symbol;
pub mod token;
pub mod whitespace;

pub use literal::Literal;
pub use symbol::Delimiter;
pub use token::{Span, Token, TokenSpan, Tokenizer, TokenizerError, TokenizerResult};
