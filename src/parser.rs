//! # Statement Parser
//!
//! Turns spanned tokens into the [`Statement`] sequence the evaluator runs.
//! Every parse function takes the token slice and a position and returns the
//! position after what it consumed.

use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    ast::{Literal as StatementLiteral, Operator, ProcedureDef, Statement, VectorOp},
    model::Alignment,
    tokenizer::{Delimiter, Literal, Span, Token, TokenSpan, Tokenizer},
};

pub type ParseResult<O> = Result<(usize, O), ParseError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token `{found}` at {span}: expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: String,
        span: Span,
    },
    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: String },
    #[error("Unterminated definition of `{name}` starting at {span}")]
    UnterminatedDefinition { name: String, span: Span },
    #[error("Unterminated alignment starting at {span}")]
    UnterminatedAlignment { span: Span },
    #[error("Nested definition at {span}")]
    NestedDefinition { span: Span },
    #[error("Duplicate taxon `{taxon}` at {span}")]
    DuplicateTaxon { taxon: String, span: Span },
}

/// Tokenizes and parses `source` in one step.
pub fn parse_source(source: &str) -> crate::Result<Vec<Statement>> {
    let tokens = Tokenizer::new().tokenize(source)?;
    Ok(parse_program(&tokens)?)
}

/// Parses a whole program. Whitespace and comments are skipped.
#[instrument(level = "debug", skip(tokens), fields(count = tokens.len()))]
pub fn parse_program(tokens: &[TokenSpan]) -> Result<Vec<Statement>, ParseError> {
    let tokens: Vec<&TokenSpan> = tokens.iter().filter(|t| !t.token.is_trivia()).collect();
    let mut statements = Vec::new();
    let mut pos = 0;
    while pos < tokens.len() {
        let (next, statement) = parse_statement(&tokens, pos)?;
        statements.push(statement);
        pos = next;
    }
    debug!(statements = statements.len(), "program parsed");
    Ok(statements)
}

fn parse_statement(tokens: &[&TokenSpan], pos: usize) -> ParseResult<Statement> {
    let current = expect_any(tokens, pos, "statement")?;
    match &current.token {
        Token::Delimiter(Delimiter::Colon) => parse_definition(tokens, pos),
        _ => parse_body_statement(tokens, pos),
    }
}

/// Anything that may appear inside a definition body.
fn parse_body_statement(tokens: &[&TokenSpan], pos: usize) -> ParseResult<Statement> {
    let current = expect_any(tokens, pos, "statement")?;
    let statement = match &current.token {
        Token::Literal(Literal::Number(n)) => Statement::number(*n),
        Token::Literal(Literal::Text(s)) => Statement::text(s.clone()),
        Token::Word(word) => Statement::word(word),
        Token::Delimiter(Delimiter::OpenBracket) => {
            Statement::Operator(Operator::Vector(VectorOp::Begin))
        }
        Token::Delimiter(Delimiter::CloseBracket) => {
            Statement::Operator(Operator::Vector(VectorOp::End))
        }
        Token::Delimiter(Delimiter::OpenBrace) => return parse_alignment(tokens, pos),
        Token::Delimiter(Delimiter::Colon) => {
            return Err(ParseError::NestedDefinition { span: current.span })
        }
        _ => return Err(unexpected(current, "statement")),
    };
    Ok((pos + 1, statement))
}

/// `: name ( in1 in2 -- outputs ) body ;`
fn parse_definition(tokens: &[&TokenSpan], pos: usize) -> ParseResult<Statement> {
    let start = tokens[pos].span;
    let name_token = expect_any(tokens, pos + 1, "procedure name")?;
    let name = match &name_token.token {
        Token::Word(word) => word.clone(),
        _ => return Err(unexpected(name_token, "procedure name")),
    };

    let mut pos = pos + 2;
    let (inputs, outputs) = match tokens.get(pos).map(|t| &t.token) {
        Some(Token::Delimiter(Delimiter::OpenParen)) => {
            let (next, effect) = parse_stack_effect(tokens, pos)?;
            pos = next;
            effect
        }
        _ => (0, String::new()),
    };

    let mut body = Vec::new();
    loop {
        match tokens.get(pos).map(|t| &t.token) {
            None => {
                return Err(ParseError::UnterminatedDefinition { name, span: start });
            }
            Some(Token::Delimiter(Delimiter::Semicolon)) => break,
            Some(_) => {
                let (next, statement) = parse_body_statement(tokens, pos)?;
                body.push(statement);
                pos = next;
            }
        }
    }

    debug!(%name, inputs, statements = body.len(), "definition parsed");
    Ok((
        pos + 1,
        Statement::Define(ProcedureDef::new(name, inputs, outputs, body)),
    ))
}

/// `( a b -- c )`: the number of words before `--` is the input arity, the
/// words after it describe the outputs.
fn parse_stack_effect(tokens: &[&TokenSpan], pos: usize) -> ParseResult<(usize, String)> {
    let mut before = Vec::new();
    let mut after: Option<Vec<String>> = None;
    let mut pos = pos + 1;
    loop {
        let current = expect_any(tokens, pos, "`)`")?;
        match &current.token {
            Token::Delimiter(Delimiter::CloseParen) => break,
            Token::Word(word) if word == "--" && after.is_none() => after = Some(Vec::new()),
            Token::Word(_) | Token::Literal(_) => {
                let text = current.token.to_string();
                match after.as_mut() {
                    Some(outputs) => outputs.push(text),
                    None => before.push(text),
                }
            }
            _ => return Err(unexpected(current, "stack effect word or `)`")),
        }
        pos += 1;
    }
    let outputs = after.map(|words| words.join(" ")).unwrap_or_default();
    Ok((pos + 1, (before.len(), outputs)))
}

/// `{ "taxon": "SEQ", ... }` with optional colons and commas.
fn parse_alignment(tokens: &[&TokenSpan], pos: usize) -> ParseResult<Statement> {
    let start = tokens[pos].span;
    let mut alignment = Alignment::new();
    let mut pos = pos + 1;
    loop {
        let Some(current) = tokens.get(pos) else {
            return Err(ParseError::UnterminatedAlignment { span: start });
        };
        match &current.token {
            Token::Delimiter(Delimiter::CloseBrace) => break,
            Token::Delimiter(Delimiter::Comma) => pos += 1,
            Token::Literal(Literal::Text(taxon)) => {
                pos += 1;
                if let Some(Token::Delimiter(Delimiter::Colon)) = tokens.get(pos).map(|t| &t.token)
                {
                    pos += 1;
                }
                let Some(sequence_token) = tokens.get(pos) else {
                    return Err(ParseError::UnterminatedAlignment { span: start });
                };
                let Token::Literal(Literal::Text(sequence)) = &sequence_token.token else {
                    return Err(unexpected(sequence_token, "sequence string"));
                };
                if !alignment.insert(taxon.clone(), sequence.clone()) {
                    return Err(ParseError::DuplicateTaxon {
                        taxon: taxon.clone(),
                        span: current.span,
                    });
                }
                pos += 1;
            }
            _ => return Err(unexpected(current, "taxon string or `}`")),
        }
    }
    Ok((
        pos + 1,
        Statement::Literal(StatementLiteral::Alignment(alignment)),
    ))
}

fn expect_any<'a>(
    tokens: &[&'a TokenSpan],
    pos: usize,
    expected: &str,
) -> Result<&'a TokenSpan, ParseError> {
    tokens
        .get(pos)
        .copied()
        .ok_or_else(|| ParseError::UnexpectedEof {
            expected: expected.to_string(),
        })
}

fn unexpected(token: &TokenSpan, expected: &str) -> ParseError {
    ParseError::UnexpectedToken {
        found: token.token.to_string(),
        expected: expected.to_string(),
        span: token.span,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ast::{BindOp, StackOp};
    use crate::model::DistributionKind;

    fn parse(source: &str) -> Result<Vec<Statement>, ParseError> {
        let tokens = Tokenizer::new().tokenize(source).unwrap();
        parse_program(&tokens)
    }

    #[test]
    fn test_simple_program() {
        let statements = parse("1.0 0.5 lognormal \"kappa\" ~").unwrap();
        assert_eq!(
            statements,
            vec![
                Statement::number(1.0),
                Statement::number(0.5),
                Statement::Operator(Operator::Distribution(DistributionKind::LogNormal)),
                Statement::text("kappa"),
                Statement::Operator(Operator::Bind(BindOp::Sample)),
            ]
        );
    }

    #[test]
    fn test_vector_brackets_become_operators() {
        let statements = parse("[1 2] // pair").unwrap();
        assert_eq!(
            statements,
            vec![
                Statement::Operator(Operator::Vector(VectorOp::Begin)),
                Statement::number(1.0),
                Statement::number(2.0),
                Statement::Operator(Operator::Vector(VectorOp::End)),
            ]
        );
    }

    #[test]
    fn test_definition_with_stack_effect() {
        let statements = parse(": square ( x -- x^2 ) dup * ; 3 square").unwrap();
        assert_eq!(statements.len(), 3);
        let Statement::Define(def) = &statements[0] else {
            panic!("expected definition, got {:?}", statements[0]);
        };
        assert_eq!(def.name, "square");
        assert_eq!(def.inputs, 1);
        assert_eq!(def.outputs, "x^2");
        assert_eq!(
            def.body.to_vec(),
            vec![
                Statement::Operator(Operator::Stack(StackOp::Dup)),
                Statement::word("*"),
            ]
        );
        assert_eq!(statements[2], Statement::Invoke("square".to_string()));
    }

    #[test]
    fn test_definition_without_stack_effect() {
        let statements = parse(": jc jc69 ;").unwrap();
        let Statement::Define(def) = &statements[0] else {
            panic!("expected definition");
        };
        assert_eq!(def.inputs, 0);
        assert_eq!(def.outputs, "");
        assert_eq!(def.body.len(), 1);
    }

    #[test]
    fn test_alignment_literal() {
        let statements = parse(r#"{ "human": "ACGT", "chimp": "ACGA" } "seq" observe"#).unwrap();
        let Statement::Literal(StatementLiteral::Alignment(alignment)) = &statements[0] else {
            panic!("expected alignment");
        };
        assert_eq!(alignment.taxa().collect::<Vec<_>>(), vec!["human", "chimp"]);
        assert_eq!(alignment.get("chimp"), Some("ACGA"));

        // Commas and colons are optional.
        let statements = parse(r#"{ "a" "AC" "b" "AG" }"#).unwrap();
        assert_eq!(statements.len(), 1);
    }

    #[test]
    fn test_alignment_errors() {
        assert!(matches!(
            parse(r#"{ "a": "AC", "a": "AG" }"#),
            Err(ParseError::DuplicateTaxon { ref taxon, .. }) if taxon == "a"
        ));
        assert!(matches!(
            parse(r#"{ "a": "AC""#),
            Err(ParseError::UnterminatedAlignment { .. })
        ));
        assert!(matches!(
            parse(r#"{ "a": 1 }"#),
            Err(ParseError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn test_definition_errors() {
        assert!(matches!(
            parse(": open dup"),
            Err(ParseError::UnterminatedDefinition { ref name, .. }) if name == "open"
        ));
        assert!(matches!(
            parse(": outer : inner ; ;"),
            Err(ParseError::NestedDefinition { .. })
        ));
        assert!(matches!(
            parse(": 42 dup ;"),
            Err(ParseError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            parse(":"),
            Err(ParseError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_stray_delimiters() {
        let err = parse("1 ;").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                found: ";".to_string(),
                expected: "statement".to_string(),
                span: Span {
                    start: 2,
                    end: 3,
                    line: 1,
                    column: 3,
                },
            }
        );
        assert!(parse("( x )").is_err());
    }
}
