use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, is_not},
    character::complete::{char, digit1, one_of, satisfy},
    combinator::{cut, map, map_parser, map_res, not, opt, peek, recognize, rest, value, verify},
    error::context,
    sequence::{delimited, pair, terminated, tuple},
};

use super::token::{is_word_char, ParserResult, Token};

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Text(String),
    Number(f64),
}

#[tracing::instrument(level = "debug", skip(input))]
fn parse_text_literal(input: &str) -> ParserResult<Literal> {
    context(
        "string literal",
        map(
            delimited(
                char('"'),
                opt(escaped_transform(
                    is_not("\\\""),
                    '\\',
                    alt((
                        value("\"", char('"')),
                        value("\\", char('\\')),
                        value("\n", char('n')),
                        value("\t", char('t')),
                    )),
                )),
                char('"'),
            ),
            |content: Option<String>| Literal::Text(content.unwrap_or_default()),
        ),
    )(input)
}

/// `-?digits(.digits)?([eE][+-]?digits)?`, not followed by another word
/// character. A literal that overflows `f64` is a hard failure rather than a
/// word.
#[tracing::instrument(level = "debug", skip(input))]
fn parse_number_literal(input: &str) -> ParserResult<Literal> {
    context(
        "number literal",
        map(
            map_parser(
                terminated(
                    recognize(tuple((
                        opt(char('-')),
                        digit1,
                        opt(pair(char('.'), digit1)),
                        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
                    ))),
                    not(peek(satisfy(is_word_char))),
                ),
                cut(context(
                    "finite number",
                    verify(map_res(rest, |s: &str| s.parse::<f64>()), |n: &f64| {
                        n.is_finite()
                    }),
                )),
            ),
            Literal::Number,
        ),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_literal(input: &str) -> ParserResult<Token> {
    context(
        "literal",
        map(
            alt((parse_text_literal, parse_number_literal)),
            Token::Literal,
        ),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_string() {
        let (rest, result) = parse_text_literal("\"kappa\" ~").unwrap();
        assert_eq!(rest, " ~");
        assert_eq!(result, Literal::Text("kappa".to_string()));
    }

    #[test]
    fn test_empty_string() {
        let (rest, result) = parse_text_literal("\"\"").unwrap();
        assert_eq!(rest, "");
        assert_eq!(result, Literal::Text(String::new()));
    }

    #[test]
    fn test_string_escapes() {
        let (_, result) = parse_text_literal(r#""say \"hi\"\n\tback\\slash""#).unwrap();
        assert_eq!(
            result,
            Literal::Text("say \"hi\"\n\tback\\slash".to_string())
        );
    }

    #[test]
    fn test_unterminated_string() {
        assert!(parse_text_literal("\"open").is_err());
    }

    #[test]
    fn test_number_literals() {
        let cases = [
            ("123", 123.0),
            ("-123", -123.0),
            ("0.5", 0.5),
            ("-123.45", -123.45),
            ("1e-3", 0.001),
            ("2.5E+2", 250.0),
        ];
        for (input, expected) in cases {
            let (rest, result) = parse_number_literal(input).unwrap();
            assert_eq!(rest, "", "{input}");
            assert_eq!(result, Literal::Number(expected), "{input}");
        }
    }

    #[test]
    fn test_number_needs_a_word_boundary() {
        assert!(parse_number_literal("1abc").is_err());
        assert!(parse_number_literal("-").is_err());
        assert!(parse_number_literal(".5").is_err());

        let (rest, result) = parse_number_literal("4]").unwrap();
        assert_eq!(result, Literal::Number(4.0));
        assert_eq!(rest, "]");
    }

    #[test]
    fn test_overflowing_number_fails_hard() {
        for input in ["1e999", "-1e999", "2.5E+400"] {
            assert!(
                matches!(parse_number_literal(input), Err(nom::Err::Failure(_))),
                "{input}"
            );
            // A failure stops the word parser from picking the text up.
            assert!(parse_literal(input).is_err(), "{input}");
        }
        let (_, tiny) = parse_number_literal("1e-999").unwrap();
        assert_eq!(tiny, Literal::Number(0.0));
    }
}
