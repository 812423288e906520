mod common;

use common::{statements, SUBSTITUTION_MODEL};
use phylostack::{
    ast::{BindOp, Literal, Operator},
    parser::{parse_program, ParseError},
    tokenizer::{Token, Tokenizer, TokenizerError},
    model::{DistributionKind, FunctionKind},
    Statement,
};
use pretty_assertions::assert_eq;

#[test]
fn it_parses_the_substitution_model() {
    let program = statements(SUBSTITUTION_MODEL);
    assert_eq!(
        program,
        vec![
            Statement::number(1.0),
            Statement::number(0.5),
            Statement::Operator(Operator::Distribution(DistributionKind::LogNormal)),
            Statement::text("kappa"),
            Statement::Operator(Operator::Bind(BindOp::Sample)),
            Statement::word("["),
            Statement::number(1.0),
            Statement::number(1.0),
            Statement::number(1.0),
            Statement::number(1.0),
            Statement::word("]"),
            Statement::Operator(Operator::Distribution(DistributionKind::Dirichlet)),
            Statement::text("freqs"),
            Statement::Operator(Operator::Bind(BindOp::Sample)),
            Statement::text("kappa"),
            Statement::Operator(Operator::Bind(BindOp::Var)),
            Statement::text("freqs"),
            Statement::Operator(Operator::Bind(BindOp::Var)),
            Statement::Operator(Operator::Function(FunctionKind::Hky)),
            Statement::text("subst_model"),
            Statement::Operator(Operator::Bind(BindOp::Assign)),
        ]
    );
}

#[test]
fn it_skips_comments_everywhere() {
    let program = statements(
        r#"
        /* header
           block */
        1 // one
        /* inline */ 2
        "#,
    );
    assert_eq!(program, vec![Statement::number(1.0), Statement::number(2.0)]);
}

#[test]
fn it_reads_alignment_literals() {
    let program = statements(
        r#"{
            "human": "ACGTACGT",
            "chimp": "ACGTACGA",
            "gorilla": "ACGTTCGA"
        }"#,
    );
    let [Statement::Literal(Literal::Alignment(alignment))] = &program[..] else {
        panic!("expected one alignment literal, got {program:?}");
    };
    assert_eq!(
        alignment.iter().collect::<Vec<_>>(),
        vec![
            ("human", "ACGTACGT"),
            ("chimp", "ACGTACGA"),
            ("gorilla", "ACGTTCGA"),
        ]
    );
}

#[test]
fn it_tracks_lines_and_columns() {
    let tokens = Tokenizer::new()
        .tokenize("1.0 exponential\n  \"rate\" ~")
        .unwrap();
    let rate = tokens
        .iter()
        .find(|t| matches!(&t.token, Token::Literal(_)) && t.span.line == 2)
        .unwrap();
    assert_eq!(rate.span.column, 3);
}

#[test]
fn it_reports_tokenizer_errors_with_a_span() {
    let err = Tokenizer::new()
        .tokenize("1 2\n  \"unterminated")
        .unwrap_err();
    let TokenizerError::ParseError { span, .. } = err;
    assert_eq!((span.line, span.column), (2, 3));
}

#[test]
fn it_reports_parse_errors() {
    let tokens = Tokenizer::new().tokenize(": twice dup dup").unwrap();
    assert!(matches!(
        parse_program(&tokens),
        Err(ParseError::UnterminatedDefinition { ref name, .. }) if name == "twice"
    ));
}
