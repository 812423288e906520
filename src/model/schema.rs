//! # Construct Schemas
//!
//! Every distribution, function and constraint word carries a fixed parameter
//! schema. The schema decides the word's arity (one stack value per
//! parameter), the names used in the interchange document, and the shape each
//! argument must have.

use std::fmt;

use serde::Serialize;
use strum_macros::{Display, EnumIter};

use super::value::StackValue;

/// Type tag of the values a distribution generates or a function returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
pub enum TypeTag {
    #[serde(rename = "REAL")]
    #[strum(serialize = "REAL")]
    Real,
    #[serde(rename = "REAL_VECTOR")]
    #[strum(serialize = "REAL_VECTOR")]
    RealVector,
    #[serde(rename = "TREE")]
    #[strum(serialize = "TREE")]
    Tree,
    #[serde(rename = "Q_MATRIX")]
    #[strum(serialize = "Q_MATRIX")]
    QMatrix,
    #[serde(rename = "ALIGNMENT")]
    #[strum(serialize = "ALIGNMENT")]
    Alignment,
}

/// Shape an argument must have to bind to a parameter.
///
/// Only the structure is checked here. Whether a referenced binding really
/// produces a value of the right kind is left to the consuming tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A number, a reference, or a real-valued function result.
    Real,
    /// A vector of numbers or references, a reference, or a vector-valued
    /// function result.
    RealVector,
    /// A reference to a tree-generating binding.
    Tree,
    /// A reference or a rate-matrix function result.
    QMatrix,
}

impl Shape {
    pub fn accepts(&self, value: &StackValue) -> bool {
        match (self, value) {
            (_, StackValue::Ref(_)) => true,
            (Shape::Real, StackValue::Number(_)) => true,
            (Shape::Real, StackValue::Function(f)) => f.output() == TypeTag::Real,
            (Shape::RealVector, StackValue::Vector(items)) => items
                .iter()
                .all(|item| matches!(item, StackValue::Number(_) | StackValue::Ref(_))),
            (Shape::RealVector, StackValue::Function(f)) => f.output() == TypeTag::RealVector,
            (Shape::QMatrix, StackValue::Function(f)) => f.output() == TypeTag::QMatrix,
            _ => false,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Real => write!(f, "real"),
            Shape::RealVector => write!(f, "real vector"),
            Shape::Tree => write!(f, "tree reference"),
            Shape::QMatrix => write!(f, "rate matrix"),
        }
    }
}

/// One named parameter slot of a construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub shape: Shape,
}

pub(crate) const fn param(name: &'static str, shape: Shape) -> ParamSpec {
    ParamSpec { name, shape }
}

/// Capabilities shared by every construct family.
pub trait Construct: Copy + fmt::Debug + fmt::Display + PartialEq {
    /// Name used in the interchange document.
    fn name(&self) -> &'static str;

    /// Parameter schema, in push order.
    fn parameters(&self) -> &'static [ParamSpec];

    fn arity(&self) -> usize {
        self.parameters().len()
    }
}

/// Ordered named arguments of an application.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Arguments(Vec<(&'static str, StackValue)>);

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &'static str, value: StackValue) {
        self.0.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&StackValue> {
        self.0
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &StackValue)> {
        self.0.iter().map(|(name, value)| (*name, value))
    }

    pub fn values(&self) -> impl Iterator<Item = &StackValue> {
        self.0.iter().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A construct applied to its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Application<K: Construct> {
    pub kind: K,
    pub arguments: Arguments,
}

impl<K: Construct> Application<K> {
    pub fn new(kind: K, arguments: Arguments) -> Self {
        Self { kind, arguments }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}
