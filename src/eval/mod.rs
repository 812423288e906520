//! # Evaluation
//!
//! Runs a statement sequence against an operand stack and collects the named
//! bindings it produces.
//!
//! - [`Evaluator`]: entry point, one fresh [`EvalContext`] per run
//! - [`OperandStack`]: the LIFO stack and its Forth-style primitives
//! - statement and operator evaluators: dispatch over [`crate::ast`]
//! - [`ProcedureRegistry`]: user-defined procedures
//!
//! Procedures run on the caller's stack by default
//! ([`crate::config::FrameMode::Shared`]), so a body may consume more than it
//! declares. [`crate::config::FrameMode::Isolated`] seeds a fresh stack with
//! the declared inputs instead.

pub mod context;
pub mod evaluator;
pub mod operator;
pub mod procedure;
pub mod stack;
pub mod statement;

pub use context::EvalContext;
pub use evaluator::{EvalError, EvalResult, Evaluation, Evaluator};
pub use procedure::ProcedureRegistry;
pub use stack::OperandStack;
