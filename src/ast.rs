//! # Statements
//!
//! The statement sequence is the only input the evaluator accepts. It is
//! produced by the text front end ([`crate::parser`]) or built directly by
//! library callers.

use std::{fmt, rc::Rc, str::FromStr};

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::model::{
    value::{Alignment, StackValue},
    ConstraintKind, DistributionKind, FunctionKind,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Pushes a literal.
    Literal(Literal),
    /// Applies a built-in operator.
    Operator(Operator),
    /// Invokes a user procedure by name.
    Invoke(String),
    /// Registers a user procedure.
    Define(ProcedureDef),
}

impl Statement {
    pub fn number(value: f64) -> Self {
        Statement::Literal(Literal::Number(value))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Statement::Literal(Literal::Text(value.into()))
    }

    /// Resolves a source word: built-in operators win, anything else is a
    /// procedure invocation.
    pub fn word(word: &str) -> Self {
        match Operator::from_str(word) {
            Ok(op) => Statement::Operator(op),
            Err(_) => Statement::Invoke(word.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Text(String),
    Alignment(Alignment),
}

impl From<Literal> for StackValue {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Number(n) => StackValue::Number(n),
            Literal::Text(s) => StackValue::Text(s),
            Literal::Alignment(a) => StackValue::Alignment(a),
        }
    }
}

/// A user procedure. The stack effect is documentation only.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureDef {
    pub name: String,
    pub inputs: usize,
    pub outputs: String,
    pub body: Rc<[Statement]>,
}

impl ProcedureDef {
    pub fn new(
        name: impl Into<String>,
        inputs: usize,
        outputs: impl Into<String>,
        body: Vec<Statement>,
    ) -> Self {
        Self {
            name: name.into(),
            inputs,
            outputs: outputs.into(),
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum StackOp {
    Dup,
    Swap,
    Drop,
    Over,
    Rot,
    Nip,
    Tuck,
    Pick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, EnumIter)]
pub enum VectorOp {
    #[strum(serialize = "[")]
    Begin,
    #[strum(serialize = "]")]
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, EnumIter)]
pub enum BindOp {
    #[strum(serialize = "var")]
    Var,
    #[strum(serialize = "~")]
    Sample,
    #[strum(serialize = "=")]
    Assign,
    #[strum(serialize = "observe")]
    Observe,
}

/// Every built-in word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Stack(StackOp),
    Vector(VectorOp),
    Bind(BindOp),
    Distribution(DistributionKind),
    Function(FunctionKind),
    Constraint(ConstraintKind),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown operator: {0}")]
pub struct UnknownOperator(pub String);

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(word: &str) -> Result<Self, Self::Err> {
        if let Ok(op) = StackOp::from_str(word) {
            return Ok(Operator::Stack(op));
        }
        if let Ok(op) = VectorOp::from_str(word) {
            return Ok(Operator::Vector(op));
        }
        if let Ok(op) = BindOp::from_str(word) {
            return Ok(Operator::Bind(op));
        }
        if let Ok(kind) = DistributionKind::from_str(word) {
            return Ok(Operator::Distribution(kind));
        }
        if let Ok(kind) = FunctionKind::from_str(word) {
            return Ok(Operator::Function(kind));
        }
        if let Ok(kind) = ConstraintKind::from_str(word) {
            return Ok(Operator::Constraint(kind));
        }
        Err(UnknownOperator(word.to_string()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Stack(op) => write!(f, "{op}"),
            Operator::Vector(op) => write!(f, "{op}"),
            Operator::Bind(op) => write!(f, "{op}"),
            Operator::Distribution(kind) => write!(f, "{kind}"),
            Operator::Function(kind) => write!(f, "{kind}"),
            Operator::Constraint(kind) => write!(f, "{kind}"),
        }
    }
}
