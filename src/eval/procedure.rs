use std::{collections::HashMap, rc::Rc, str::FromStr};

use tracing::debug;

use super::evaluator::{EvalError, EvalResult};
use crate::ast::{Operator, ProcedureDef};

/// User procedures, keyed by name.
///
/// Bodies are stored once and shared; invoking a procedure never copies its
/// statements.
#[derive(Debug, Clone, Default)]
pub struct ProcedureRegistry {
    procedures: HashMap<String, Rc<ProcedureDef>>,
}

impl ProcedureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, definition: ProcedureDef) -> EvalResult<()> {
        if Operator::from_str(&definition.name).is_ok() {
            return Err(EvalError::ReservedName {
                name: definition.name,
            });
        }
        if self.procedures.contains_key(&definition.name) {
            return Err(EvalError::DuplicateBinding {
                name: definition.name,
            });
        }
        debug!(
            name = %definition.name,
            inputs = definition.inputs,
            outputs = %definition.outputs,
            statements = definition.body.len(),
            "procedure defined"
        );
        self.procedures
            .insert(definition.name.clone(), Rc::new(definition));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Rc<ProcedureDef>> {
        self.procedures.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.procedures.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }
}
