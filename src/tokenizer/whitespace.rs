//! Whitespace and newlines are kept as tokens so spans stay exact; the parser
//! skips them.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    combinator::map,
    error::context,
};

use super::token::{ParserResult, Token};

/// Spaces, tabs and other non-newline whitespace.
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_whitespace(input: &str) -> ParserResult<Token> {
    context(
        "whitespace expected",
        map(
            take_while1(|c: char| c.is_whitespace() && c != '\n' && c != '\r'),
            |ws: &str| Token::Whitespace(ws.to_string()),
        ),
    )(input)
}

/// `\n`, `\r\n` or a lone `\r`.
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_newline(input: &str) -> ParserResult<Token> {
    context(
        "newline expected",
        map(alt((tag("\r\n"), tag("\n"), tag("\r"))), |_| Token::Newline),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace() {
        let (rest, token) = parse_whitespace("   dup").unwrap();
        assert_eq!(token, Token::Whitespace("   ".to_string()));
        assert_eq!(rest, "dup");

        let (rest, token) = parse_whitespace("\t\t  dup").unwrap();
        assert_eq!(token, Token::Whitespace("\t\t  ".to_string()));
        assert_eq!(rest, "dup");
    }

    #[test]
    fn test_newline() {
        let (rest, token) = parse_newline("\ndup").unwrap();
        assert_eq!(token, Token::Newline);
        assert_eq!(rest, "dup");

        let (rest, token) = parse_newline("\r\nswap").unwrap();
        assert_eq!(token, Token::Newline);
        assert_eq!(rest, "swap");
    }

    #[test]
    fn test_error() {
        assert!(parse_whitespace("dup").is_err());
        assert!(parse_newline("dup").is_err());
    }
}
