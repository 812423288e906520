//! # Environment
//!
//! Named bindings produced by a run, partitioned into four categories. Each
//! category keeps declaration order; a name is unique across all of them.

use std::collections::HashMap;

use strum_macros::Display;

use super::{
    constraint::ConstraintApplication,
    distribution::DistributionApplication,
    value::{Alignment, StackValue},
};
use crate::eval::{EvalError, EvalResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Category {
    #[strum(serialize = "random variable")]
    RandomVariable,
    #[strum(serialize = "deterministic function")]
    Deterministic,
    #[strum(serialize = "constraint")]
    Constraint,
    #[strum(serialize = "observed data")]
    Observed,
}

/// A random variable and the data observed for it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomVariable {
    pub distribution: DistributionApplication,
    pub observed: Option<Alignment>,
}

/// Borrowed view of one binding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Binding<'a> {
    RandomVariable(&'a RandomVariable),
    Deterministic(&'a StackValue),
    Constraint(&'a ConstraintApplication),
    Observed(&'a Alignment),
}

impl<'a> Binding<'a> {
    pub fn category(&self) -> Category {
        match self {
            Binding::RandomVariable(_) => Category::RandomVariable,
            Binding::Deterministic(_) => Category::Deterministic,
            Binding::Constraint(_) => Category::Constraint,
            Binding::Observed(_) => Category::Observed,
        }
    }

    pub fn is_finite(&self) -> bool {
        match *self {
            Binding::RandomVariable(rv) => rv.distribution.arguments.values().all(StackValue::is_finite),
            Binding::Deterministic(value) => value.is_finite(),
            Binding::Constraint(constraint) => constraint.arguments.values().all(StackValue::is_finite),
            Binding::Observed(_) => true,
        }
    }

    /// Names this binding refers to, in encounter order, without duplicates.
    pub fn references(&self) -> Vec<&'a str> {
        let mut out = Vec::new();
        match *self {
            Binding::RandomVariable(rv) => {
                for value in rv.distribution.arguments.values() {
                    value.collect_references(&mut out);
                }
            }
            Binding::Deterministic(value) => value.collect_references(&mut out),
            Binding::Constraint(constraint) => {
                for value in constraint.arguments.values() {
                    value.collect_references(&mut out);
                }
            }
            Binding::Observed(_) => {}
        }
        let mut seen = Vec::with_capacity(out.len());
        out.retain(|name| {
            if seen.contains(name) {
                false
            } else {
                seen.push(*name);
                true
            }
        });
        out
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    index: HashMap<String, (Category, usize)>,
    random_variables: Vec<(String, RandomVariable)>,
    deterministic: Vec<(String, StackValue)>,
    constraints: Vec<(String, ConstraintApplication)>,
    observed: Vec<(String, Alignment)>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn category_of(&self, name: &str) -> Option<Category> {
        self.index.get(name).map(|(category, _)| *category)
    }

    pub fn get(&self, name: &str) -> Option<Binding<'_>> {
        let (category, position) = *self.index.get(name)?;
        Some(match category {
            Category::RandomVariable => Binding::RandomVariable(&self.random_variables[position].1),
            Category::Deterministic => Binding::Deterministic(&self.deterministic[position].1),
            Category::Constraint => Binding::Constraint(&self.constraints[position].1),
            Category::Observed => Binding::Observed(&self.observed[position].1),
        })
    }

    fn reserve(&mut self, name: &str, category: Category, position: usize) -> EvalResult<()> {
        if self.index.contains_key(name) {
            return Err(EvalError::DuplicateBinding {
                name: name.to_string(),
            });
        }
        self.index.insert(name.to_string(), (category, position));
        Ok(())
    }

    pub fn bind_random_variable(
        &mut self,
        name: &str,
        distribution: DistributionApplication,
    ) -> EvalResult<()> {
        self.reserve(name, Category::RandomVariable, self.random_variables.len())?;
        self.random_variables.push((
            name.to_string(),
            RandomVariable {
                distribution,
                observed: None,
            },
        ));
        Ok(())
    }

    pub fn bind_deterministic(&mut self, name: &str, value: StackValue) -> EvalResult<()> {
        self.reserve(name, Category::Deterministic, self.deterministic.len())?;
        self.deterministic.push((name.to_string(), value));
        Ok(())
    }

    pub fn bind_constraint(
        &mut self,
        name: &str,
        constraint: ConstraintApplication,
    ) -> EvalResult<()> {
        self.reserve(name, Category::Constraint, self.constraints.len())?;
        self.constraints.push((name.to_string(), constraint));
        Ok(())
    }

    pub fn bind_observed(&mut self, name: &str, data: Alignment) -> EvalResult<()> {
        self.reserve(name, Category::Observed, self.observed.len())?;
        self.observed.push((name.to_string(), data));
        Ok(())
    }

    /// Mutable access to a random variable, used to attach observed data.
    pub fn random_variable_mut(&mut self, name: &str) -> Option<&mut RandomVariable> {
        match self.index.get(name) {
            Some((Category::RandomVariable, position)) => {
                Some(&mut self.random_variables[*position].1)
            }
            _ => None,
        }
    }

    pub fn random_variables(&self) -> impl Iterator<Item = (&str, &RandomVariable)> {
        self.random_variables
            .iter()
            .map(|(name, rv)| (name.as_str(), rv))
    }

    pub fn deterministic(&self) -> impl Iterator<Item = (&str, &StackValue)> {
        self.deterministic
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn constraints(&self) -> impl Iterator<Item = (&str, &ConstraintApplication)> {
        self.constraints
            .iter()
            .map(|(name, constraint)| (name.as_str(), constraint))
    }

    pub fn observed(&self) -> impl Iterator<Item = (&str, &Alignment)> {
        self.observed
            .iter()
            .map(|(name, data)| (name.as_str(), data))
    }

    /// Every binding, category by category, each in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Binding<'_>)> {
        self.random_variables()
            .map(|(name, rv)| (name, Binding::RandomVariable(rv)))
            .chain(
                self.deterministic()
                    .map(|(name, value)| (name, Binding::Deterministic(value))),
            )
            .chain(
                self.constraints()
                    .map(|(name, constraint)| (name, Binding::Constraint(constraint))),
            )
            .chain(
                self.observed()
                    .map(|(name, data)| (name, Binding::Observed(data))),
            )
    }
}
