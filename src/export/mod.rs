//! # Export
//!
//! Turns an [`Environment`] into the interchange [`Document`]: every
//! reference is checked against the bound names, the reference graph must be
//! acyclic, and deterministic functions are written in dependency order.

pub mod document;
pub mod graph;

use thiserror::Error;
use tracing::debug;

use crate::{
    config::ExportConfig,
    model::{Binding, Environment, StackValue},
};
pub use document::{
    ConstraintEntry, DistributionEntry, Document, Entries, FunctionEntry, Metadata,
    RandomVariableEntry,
};
pub use graph::DependencyGraph;

use document::{render_alignment, render_arguments, render_value};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Undefined name: `{name}` referenced by `{referenced_by}`")]
    UndefinedName { name: String, referenced_by: String },
    #[error("Non-finite number in `{name}`")]
    NonFiniteNumber { name: String },
    #[error("Cyclic dependency: {}", cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PartialEq for ExportError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                ExportError::UndefinedName {
                    name: a,
                    referenced_by: b,
                },
                ExportError::UndefinedName {
                    name: c,
                    referenced_by: d,
                },
            ) => a == c && b == d,
            (ExportError::NonFiniteNumber { name: a }, ExportError::NonFiniteNumber { name: b }) => {
                a == b
            }
            (
                ExportError::CyclicDependency { cycle: a },
                ExportError::CyclicDependency { cycle: b },
            ) => a == b,
            (ExportError::Serialization(a), ExportError::Serialization(b)) => {
                a.to_string() == b.to_string()
            }
            _ => false,
        }
    }
}

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug, Clone, Default)]
pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    #[tracing::instrument(level = "debug", skip_all, fields(bindings = environment.len()))]
    pub fn export(&self, environment: &Environment) -> ExportResult<Document> {
        // JSON has no spelling for NaN or infinities.
        if let Some((name, _)) = environment.iter().find(|(_, binding)| !binding.is_finite()) {
            return Err(ExportError::NonFiniteNumber {
                name: name.to_string(),
            });
        }
        let graph = DependencyGraph::build(environment)?;
        graph.check_acyclic()?;

        let mut document = Document::new(&self.config.codephy_version, &self.config.model);

        for (name, rv) in environment.random_variables() {
            document.random_variables.push(
                name,
                RandomVariableEntry {
                    distribution: DistributionEntry {
                        kind: rv.distribution.name().to_string(),
                        generates: rv.distribution.generates(),
                        parameters: render_arguments(&rv.distribution.arguments),
                    },
                    observed_value: rv.observed.as_ref().map(render_alignment),
                },
            );
        }

        for name in graph.deterministic_order()? {
            if let Some(Binding::Deterministic(value)) = environment.get(name) {
                document
                    .deterministic_functions
                    .push(name, function_entry(value));
            }
        }

        for (name, constraint) in environment.constraints() {
            document.constraints.push(
                name,
                ConstraintEntry {
                    kind: constraint.name().to_string(),
                    parameters: render_arguments(&constraint.arguments),
                },
            );
        }

        for (name, data) in environment.observed() {
            document
                .observed_data
                .push(name, render_alignment(data));
        }

        debug!(entries = document.len(), "document built");
        Ok(document)
    }
}

/// A deterministic binding is written as a function call; plain values are
/// wrapped in a `constant` call.
fn function_entry(value: &StackValue) -> FunctionEntry {
    match value {
        StackValue::Function(app) => FunctionEntry {
            function: app.name().to_string(),
            arguments: render_arguments(&app.arguments),
        },
        other => {
            let mut arguments = serde_json::Map::new();
            arguments.insert("value".to_string(), render_value(other));
            FunctionEntry {
                function: "constant".to_string(),
                arguments,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::{
        Alignment, Application, Arguments, ConstraintKind, DistributionKind, FunctionKind,
        NamedRef,
    };

    fn reference(name: &str) -> StackValue {
        StackValue::Ref(NamedRef::new(name))
    }

    fn args(pairs: Vec<(&'static str, StackValue)>) -> Arguments {
        let mut arguments = Arguments::new();
        for (name, value) in pairs {
            arguments.push(name, value);
        }
        arguments
    }

    #[test]
    fn test_export_groups() {
        let mut env = Environment::new();
        env.bind_random_variable(
            "rate",
            Application::new(
                DistributionKind::Exponential,
                args(vec![("rate", StackValue::Number(10.0))]),
            ),
        )
        .unwrap();
        env.bind_deterministic("two", StackValue::Number(2.0))
            .unwrap();
        env.bind_constraint(
            "positive",
            Application::new(
                ConstraintKind::GreaterThan,
                args(vec![("left", reference("rate")), ("right", StackValue::Number(0.0))]),
            ),
        )
        .unwrap();

        let document = Exporter::default().export(&env).unwrap();
        assert_eq!(
            document.to_value().unwrap(),
            json!({
                "codephyVersion": "0.1",
                "model": "phylo_model",
                "randomVariables": {
                    "rate": {
                        "distribution": {
                            "type": "Exponential",
                            "generates": "REAL",
                            "parameters": {"rate": 10.0}
                        }
                    }
                },
                "deterministicFunctions": {
                    "two": {"function": "constant", "arguments": {"value": 2.0}}
                },
                "constraints": {
                    "positive": {
                        "type": "greaterThan",
                        "parameters": {"left": {"variable": "rate"}, "right": 0.0}
                    }
                }
            })
        );
    }

    #[test]
    fn test_observed_data_group() {
        let mut env = Environment::new();
        let mut data = Alignment::new();
        data.insert("human", "ACGT");
        env.bind_observed("aln", data).unwrap();

        let document = Exporter::default().export(&env).unwrap();
        assert_eq!(
            document.to_value().unwrap()["observedData"],
            json!({"aln": {"human": "ACGT"}})
        );
    }

    #[test]
    fn test_deterministic_functions_in_dependency_order() {
        let mut env = Environment::new();
        env.bind_deterministic(
            "scaled",
            StackValue::Function(Application::new(
                FunctionKind::Multiply,
                args(vec![("left", reference("base")), ("right", StackValue::Number(2.0))]),
            )),
        )
        .unwrap();
        env.bind_deterministic("base", StackValue::Number(1.5))
            .unwrap();

        let document = Exporter::default().export(&env).unwrap();
        assert_eq!(
            document.deterministic_functions.names().collect::<Vec<_>>(),
            ["base", "scaled"]
        );
    }

    #[test]
    fn test_export_config_names_the_model() {
        let exporter = Exporter::new(ExportConfig {
            codephy_version: "0.2".to_string(),
            model: "primates".to_string(),
            ..ExportConfig::default()
        });
        let document = exporter.export(&Environment::new()).unwrap();
        assert_eq!(document.codephy_version, "0.2");
        assert_eq!(document.model, "primates");
    }

    #[test]
    fn test_dangling_reference_fails() {
        let mut env = Environment::new();
        env.bind_deterministic("y", reference("ghost")).unwrap();
        assert_eq!(
            Exporter::default().export(&env).unwrap_err(),
            ExportError::UndefinedName {
                name: "ghost".to_string(),
                referenced_by: "y".to_string(),
            }
        );
    }

    #[test]
    fn test_non_finite_numbers_are_refused() {
        let mut env = Environment::new();
        env.bind_random_variable(
            "r",
            Application::new(
                DistributionKind::Exponential,
                args(vec![("rate", StackValue::Number(f64::INFINITY))]),
            ),
        )
        .unwrap();
        assert_eq!(
            Exporter::default().export(&env).unwrap_err(),
            ExportError::NonFiniteNumber {
                name: "r".to_string()
            }
        );

        let mut env = Environment::new();
        env.bind_deterministic(
            "c",
            StackValue::Vector(vec![StackValue::Number(1.0), StackValue::Number(f64::NAN)]),
        )
        .unwrap();
        assert_eq!(
            Exporter::default().export(&env).unwrap_err(),
            ExportError::NonFiniteNumber {
                name: "c".to_string()
            }
        );
    }
}
