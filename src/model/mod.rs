//! # Model
//!
//! Values, construct schemas and the binding environment that together make
//! up a phylogenetic model graph.
//!
//! - [`value`]: the stack value type system
//! - [`schema`]: parameter shapes, type tags and the [`schema::Construct`] trait
//! - [`distribution`], [`function`], [`constraint`]: construct families
//! - [`environment`]: named bindings partitioned by category

pub mod constraint;
pub mod distribution;
pub mod environment;
pub mod function;
pub mod schema;
pub mod value;

pub use constraint::{ConstraintApplication, ConstraintKind};
pub use distribution::{DistributionApplication, DistributionKind};
pub use environment::{Binding, Category, Environment, RandomVariable};
pub use function::{FunctionApplication, FunctionKind};
pub use schema::{Application, Arguments, Construct, ParamSpec, Shape, TypeTag};
pub use value::{Alignment, NamedRef, StackValue};
