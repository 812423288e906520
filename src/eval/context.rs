use super::{procedure::ProcedureRegistry, stack::OperandStack};
use crate::model::{Environment, StackValue};

/// State of one evaluation run.
///
/// Everything an operator may touch lives here and is passed explicitly, so
/// independent runs never share state.
#[derive(Debug, Default)]
pub struct EvalContext {
    pub stack: OperandStack,
    pub environment: Environment,
    pub procedures: ProcedureRegistry,
    call_depth: usize,
}

impl EvalContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_depth(&self) -> usize {
        self.call_depth
    }

    pub(crate) fn enter_call(&mut self) {
        self.call_depth += 1;
    }

    pub(crate) fn exit_call(&mut self) {
        self.call_depth = self.call_depth.saturating_sub(1);
    }

    /// Splits the context into the finished environment and whatever values
    /// were left on the stack.
    pub fn finish(self) -> (Environment, Vec<StackValue>) {
        (self.environment, self.stack.into_values())
    }
}
