use tracing::{debug, trace};

use super::{
    context::EvalContext,
    evaluator::{EvalError, EvalResult},
};
use crate::{
    ast::{BindOp, Operator, VectorOp},
    config::EvalConfig,
    model::{
        Alignment, Application, Arguments, Category, Construct, NamedRef, StackValue, TypeTag,
    },
};

/// Applies built-in operators to an [`EvalContext`].
#[derive(Debug, Clone, Default)]
pub struct OperatorEvaluator {
    strict_references: bool,
}

impl OperatorEvaluator {
    pub fn new(config: &EvalConfig) -> Self {
        Self {
            strict_references: config.strict_references,
        }
    }

    #[tracing::instrument(level = "trace", skip(self, context), fields(depth = context.stack.depth()))]
    pub fn eval(&self, op: Operator, context: &mut EvalContext) -> EvalResult<()> {
        match op {
            Operator::Stack(op) => context.stack.apply(op),
            Operator::Vector(VectorOp::Begin) => {
                context.stack.begin_vector();
                Ok(())
            }
            Operator::Vector(VectorOp::End) => context.stack.end_vector(VectorOp::End.as_ref()),
            Operator::Bind(op) => self.eval_bind(op, context),
            Operator::Distribution(kind) => {
                let arguments = construct(kind, context)?;
                context
                    .stack
                    .push(StackValue::Distribution(Application::new(kind, arguments)));
                Ok(())
            }
            Operator::Function(kind) => {
                let arguments = construct(kind, context)?;
                context
                    .stack
                    .push(StackValue::Function(Application::new(kind, arguments)));
                Ok(())
            }
            Operator::Constraint(kind) => {
                let arguments = construct(kind, context)?;
                context
                    .stack
                    .push(StackValue::Constraint(Application::new(kind, arguments)));
                Ok(())
            }
        }
    }

    fn eval_bind(&self, op: BindOp, context: &mut EvalContext) -> EvalResult<()> {
        let operator = op.as_ref();
        match op {
            BindOp::Var => {
                let name = expect_name(operator, context.stack.pop(operator)?)?;
                if self.strict_references && !context.environment.contains(&name) {
                    return Err(EvalError::UndefinedName { name });
                }
                trace!(%name, "reference");
                context.stack.push(StackValue::Ref(NamedRef::new(name)));
                Ok(())
            }
            BindOp::Sample => {
                let (value, name) = pop_value_and_name(operator, context)?;
                match value {
                    StackValue::Distribution(distribution) => {
                        debug!(%name, distribution = distribution.name(), "random variable bound");
                        context
                            .environment
                            .bind_random_variable(&name, distribution)
                    }
                    other => Err(mismatch(operator, "distribution", &other)),
                }
            }
            BindOp::Assign => {
                let (value, name) = pop_value_and_name(operator, context)?;
                match value {
                    StackValue::Constraint(constraint) => {
                        debug!(%name, constraint = constraint.name(), "constraint bound");
                        context.environment.bind_constraint(&name, constraint)
                    }
                    StackValue::Alignment(data) => {
                        debug!(%name, taxa = data.len(), "observed data bound");
                        context.environment.bind_observed(&name, data)
                    }
                    StackValue::Distribution(_) => Err(mismatch(
                        operator,
                        "non-distribution value (bind distributions with `~`)",
                        &value,
                    )),
                    other => {
                        debug!(%name, value = %other, "deterministic bound");
                        context.environment.bind_deterministic(&name, other)
                    }
                }
            }
            BindOp::Observe => {
                let (value, name) = pop_value_and_name(operator, context)?;
                let data = match value {
                    StackValue::Alignment(data) => data,
                    other => return Err(mismatch(operator, "alignment", &other)),
                };
                observe(operator, &name, data, context)
            }
        }
    }
}

fn observe(
    operator: &str,
    name: &str,
    data: Alignment,
    context: &mut EvalContext,
) -> EvalResult<()> {
    match context.environment.category_of(name) {
        None => {
            return Err(EvalError::UndefinedName {
                name: name.to_string(),
            })
        }
        Some(Category::RandomVariable) => {}
        Some(category) => {
            return Err(EvalError::TypeMismatch {
                operator: operator.to_string(),
                expected: "random variable".to_string(),
                found: category.to_string(),
            })
        }
    }
    let rv = context
        .environment
        .random_variable_mut(name)
        .ok_or_else(|| EvalError::UndefinedName {
            name: name.to_string(),
        })?;
    let generates = rv.distribution.generates();
    if generates != TypeTag::Alignment {
        return Err(EvalError::TypeMismatch {
            operator: operator.to_string(),
            expected: format!("random variable generating {}", TypeTag::Alignment),
            found: format!("random variable generating {generates}"),
        });
    }
    if rv.observed.is_some() {
        return Err(EvalError::DuplicateBinding {
            name: name.to_string(),
        });
    }
    debug!(%name, taxa = data.len(), "observation attached");
    rv.observed = Some(data);
    Ok(())
}

/// Pops one value per parameter of `kind` and binds them in push order, so
/// the last value pushed lands on the last parameter.
fn construct<K: Construct>(kind: K, context: &mut EvalContext) -> EvalResult<Arguments> {
    let operator = kind.to_string();
    let parameters = kind.parameters();
    context.stack.require(&operator, parameters.len())?;

    let values = context.stack.values();
    let start = values.len() - parameters.len();
    for (spec, value) in parameters.iter().zip(&values[start..]) {
        if !spec.shape.accepts(value) {
            return Err(EvalError::TypeMismatch {
                operator: operator.clone(),
                expected: format!("{} for `{}`", spec.shape, spec.name),
                found: value.type_name().to_string(),
            });
        }
    }

    let mut arguments = Arguments::new();
    for (spec, value) in parameters
        .iter()
        .zip(context.stack.pop_n(&operator, parameters.len())?)
    {
        arguments.push(spec.name, value);
    }
    Ok(arguments)
}

/// Pops `value name` where `name` is on top. Nothing is consumed on failure.
fn pop_value_and_name(operator: &str, context: &mut EvalContext) -> EvalResult<(StackValue, String)> {
    context.stack.require(operator, 2)?;
    if let Some(top) = context.stack.peek() {
        if !matches!(top, StackValue::Text(_)) {
            return Err(mismatch(operator, "name (text)", top));
        }
    }
    let name = expect_name(operator, context.stack.pop(operator)?)?;
    let value = context.stack.pop(operator)?;
    Ok((value, name))
}

fn expect_name(operator: &str, value: StackValue) -> EvalResult<String> {
    match value {
        StackValue::Text(name) => Ok(name),
        other => Err(mismatch(operator, "name (text)", &other)),
    }
}

fn mismatch(operator: &str, expected: &str, found: &StackValue) -> EvalError {
    EvalError::TypeMismatch {
        operator: operator.to_string(),
        expected: expected.to_string(),
        found: found.type_name().to_string(),
    }
}
