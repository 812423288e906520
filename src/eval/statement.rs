use std::mem;

use tracing::{debug, trace};

use super::{
    context::EvalContext,
    evaluator::{EvalError, EvalResult},
    operator::OperatorEvaluator,
    stack::OperandStack,
};
use crate::{
    ast::{ProcedureDef, Statement},
    config::{EvalConfig, FrameMode},
};

#[derive(Debug, Default)]
pub struct StatementEvaluator {
    config: EvalConfig,
    operator_evaluator: OperatorEvaluator,
}

impl StatementEvaluator {
    pub fn new(config: EvalConfig) -> Self {
        Self {
            operator_evaluator: OperatorEvaluator::new(&config),
            config,
        }
    }

    pub fn eval_block(&self, statements: &[Statement], context: &mut EvalContext) -> EvalResult<()> {
        for statement in statements {
            self.eval_statement(statement, context)?;
        }
        Ok(())
    }

    pub fn eval_statement(&self, statement: &Statement, context: &mut EvalContext) -> EvalResult<()> {
        match statement {
            Statement::Literal(literal) => {
                context.stack.push(literal.clone().into());
                Ok(())
            }
            Statement::Operator(op) => self.operator_evaluator.eval(*op, context),
            Statement::Invoke(name) => self.invoke(name, context),
            Statement::Define(definition) => context.procedures.define(definition.clone()),
        }
    }

    fn invoke(&self, name: &str, context: &mut EvalContext) -> EvalResult<()> {
        let procedure = context
            .procedures
            .get(name)
            .ok_or_else(|| EvalError::UnknownOperation {
                name: name.to_string(),
            })?;
        if context.call_depth() >= self.config.max_call_depth {
            return Err(EvalError::CallDepthExceeded {
                name: name.to_string(),
                limit: self.config.max_call_depth,
            });
        }

        trace!(name, depth = context.call_depth(), "invoke");
        context.enter_call();
        let result = match self.config.frame_mode {
            FrameMode::Shared => self.eval_block(&procedure.body, context),
            FrameMode::Isolated => self.invoke_isolated(&procedure, context),
        };
        context.exit_call();
        result
    }

    /// Runs the body on a fresh stack seeded with the declared inputs, then
    /// pushes whatever the body left back onto the caller's stack.
    fn invoke_isolated(&self, procedure: &ProcedureDef, context: &mut EvalContext) -> EvalResult<()> {
        let inputs = context.stack.pop_n(&procedure.name, procedure.inputs)?;
        let caller = mem::replace(&mut context.stack, OperandStack::from_values(inputs));
        let result = self.eval_block(&procedure.body, context).and_then(|()| {
            if context.stack.open_vectors() > 0 {
                Err(EvalError::UnbalancedVector {
                    operator: "[".to_string(),
                })
            } else {
                Ok(())
            }
        });
        let frame = mem::replace(&mut context.stack, caller);
        result?;

        let outputs = frame.into_values();
        debug!(name = %procedure.name, outputs = outputs.len(), "isolated frame returned");
        for value in outputs {
            context.stack.push(value);
        }
        Ok(())
    }
}
