use tracing::debug;

use super::evaluator::{EvalError, EvalResult};
use crate::{ast::StackOp, model::StackValue};

/// LIFO operand stack with Forth-style primitives.
///
/// An open vector build (`[`) acts as a floor: operators only see values pushed
/// after it, so a vector literal cannot consume values from outside itself.
#[derive(Debug, Clone, Default)]
pub struct OperandStack {
    values: Vec<StackValue>,
    marks: Vec<usize>,
}

impl OperandStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stack seeded with `values`, bottom first.
    pub fn from_values(values: Vec<StackValue>) -> Self {
        Self {
            values,
            marks: Vec::new(),
        }
    }

    /// Values visible above the innermost open vector mark.
    pub fn depth(&self) -> usize {
        self.values.len() - self.floor()
    }

    /// Total number of values, including those below open vector marks.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn open_vectors(&self) -> usize {
        self.marks.len()
    }

    pub fn values(&self) -> &[StackValue] {
        &self.values
    }

    pub fn into_values(self) -> Vec<StackValue> {
        self.values
    }

    fn floor(&self) -> usize {
        self.marks.last().copied().unwrap_or(0)
    }

    pub fn push(&mut self, value: StackValue) {
        self.values.push(value);
    }

    pub fn peek(&self) -> Option<&StackValue> {
        if self.depth() == 0 {
            None
        } else {
            self.values.last()
        }
    }

    /// Fails unless at least `required` values are visible.
    pub fn require(&self, operator: &str, required: usize) -> EvalResult<()> {
        let depth = self.depth();
        if depth < required {
            return Err(EvalError::StackUnderflow {
                operator: operator.to_string(),
                required,
                depth,
            });
        }
        Ok(())
    }

    pub fn pop(&mut self, operator: &str) -> EvalResult<StackValue> {
        self.require(operator, 1)?;
        self.values.pop().ok_or_else(|| EvalError::StackUnderflow {
            operator: operator.to_string(),
            required: 1,
            depth: 0,
        })
    }

    /// Pops `count` values and returns them in push order.
    pub fn pop_n(&mut self, operator: &str, count: usize) -> EvalResult<Vec<StackValue>> {
        self.require(operator, count)?;
        let at = self.values.len() - count;
        Ok(self.values.split_off(at))
    }

    /// Applies a stack manipulation primitive.
    pub fn apply(&mut self, op: StackOp) -> EvalResult<()> {
        let name = op.as_ref();
        let len = self.values.len();
        match op {
            StackOp::Dup => {
                self.require(name, 1)?;
                let top = self.values[len - 1].clone();
                self.values.push(top);
            }
            StackOp::Swap => {
                self.require(name, 2)?;
                self.values.swap(len - 1, len - 2);
            }
            StackOp::Drop => {
                self.pop(name)?;
            }
            StackOp::Over => {
                self.require(name, 2)?;
                let second = self.values[len - 2].clone();
                self.values.push(second);
            }
            StackOp::Rot => {
                self.require(name, 3)?;
                let third = self.values.remove(len - 3);
                self.values.push(third);
            }
            StackOp::Nip => {
                self.require(name, 2)?;
                self.values.remove(len - 2);
            }
            StackOp::Tuck => {
                self.require(name, 2)?;
                let top = self.values[len - 1].clone();
                self.values.insert(len - 2, top);
            }
            StackOp::Pick => self.pick(name)?,
        }
        Ok(())
    }

    fn pick(&mut self, name: &str) -> EvalResult<()> {
        let index = match self.pop(name)? {
            StackValue::Number(n) if n >= 0.0 && n.fract() == 0.0 => n as usize,
            other => {
                return Err(EvalError::TypeMismatch {
                    operator: name.to_string(),
                    expected: "non-negative integer index".to_string(),
                    found: other.to_string(),
                })
            }
        };
        let depth = self.depth();
        if index >= depth {
            return Err(EvalError::IndexOutOfRange {
                operator: name.to_string(),
                index,
                depth,
            });
        }
        let value = self.values[self.values.len() - 1 - index].clone();
        self.values.push(value);
        Ok(())
    }

    pub fn begin_vector(&mut self) {
        self.marks.push(self.values.len());
        debug!(depth = self.values.len(), "vector opened");
    }

    /// Collects every value pushed since the innermost `[` into one vector.
    pub fn end_vector(&mut self, operator: &str) -> EvalResult<()> {
        let mark = self.marks.pop().ok_or_else(|| EvalError::UnbalancedVector {
            operator: operator.to_string(),
        })?;
        let items = self.values.split_off(mark);
        self.values.push(StackValue::Vector(items));
        Ok(())
    }
}
