use thiserror::Error;
use tracing::{debug, warn};

use super::{context::EvalContext, statement::StatementEvaluator};
use crate::{
    ast::Statement,
    config::EvalConfig,
    model::{Environment, StackValue},
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Stack underflow in `{operator}`: needs {required} value(s), stack depth is {depth}")]
    StackUnderflow {
        operator: String,
        required: usize,
        depth: usize,
    },
    #[error("Index out of range in `{operator}`: index {index}, stack depth is {depth}")]
    IndexOutOfRange {
        operator: String,
        index: usize,
        depth: usize,
    },
    #[error("Unknown operation: {name}")]
    UnknownOperation { name: String },
    #[error("Undefined name: {name}")]
    UndefinedName { name: String },
    #[error("Type mismatch in `{operator}`: expected {expected}, found {found}")]
    TypeMismatch {
        operator: String,
        expected: String,
        found: String,
    },
    #[error("Duplicate binding: {name}")]
    DuplicateBinding { name: String },
    #[error("Unbalanced vector brackets at `{operator}`")]
    UnbalancedVector { operator: String },
    #[error("Reserved name: `{name}` is a built-in operator")]
    ReservedName { name: String },
    #[error("Call depth exceeded in `{name}`: limit is {limit}")]
    CallDepthExceeded { name: String, limit: usize },
}

pub type EvalResult<T> = Result<T, EvalError>;

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub environment: Environment,
    /// Values still on the stack when the program ended.
    pub leftover: Vec<StackValue>,
}

/// Runs statement sequences. Each call to [`Evaluator::evaluate`] gets its own
/// [`EvalContext`], so one evaluator can serve independent runs.
#[derive(Debug, Default)]
pub struct Evaluator {
    statement_evaluator: StatementEvaluator,
}

impl Evaluator {
    pub fn new(config: EvalConfig) -> Self {
        Self {
            statement_evaluator: StatementEvaluator::new(config),
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(count = statements.len()))]
    pub fn evaluate(&self, statements: &[Statement]) -> EvalResult<Evaluation> {
        let mut context = EvalContext::new();
        self.statement_evaluator.eval_block(statements, &mut context)?;

        if context.stack.open_vectors() > 0 {
            return Err(EvalError::UnbalancedVector {
                operator: "[".to_string(),
            });
        }

        let (environment, leftover) = context.finish();
        if !leftover.is_empty() {
            warn!(
                count = leftover.len(),
                "values left on the stack were discarded"
            );
        }
        debug!(bindings = environment.len(), "evaluation finished");
        Ok(Evaluation {
            environment,
            leftover,
        })
    }
}
