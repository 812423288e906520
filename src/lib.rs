//! # phylostack
//!
//! A stack-based language for Bayesian phylogenetic models, exported as a
//! Codephy-style JSON interchange document.
//!
//! ```text
//! source ─▶ tokenizer ─▶ parser ─▶ [Statement] ─▶ eval ─▶ Environment ─▶ export ─▶ Document
//! ```
//!
//! The core ([`eval`], [`model`], [`export`]) only ever sees a statement
//! sequence; [`tokenizer`] and [`parser`] are the text front end around it.
//!
//! ```
//! use phylostack::{evaluate, export, parser::parse_source};
//!
//! let statements = parse_source(r#"
//!     1.0 0.5 lognormal "kappa" ~
//!     [1.0 1.0 1.0 1.0] dirichlet "freqs" ~
//!     "kappa" var "freqs" var hky "subst_model" =
//! "#).unwrap();
//! let environment = evaluate(&statements).unwrap();
//! let document = export(&environment).unwrap();
//! assert_eq!(document.deterministic_functions.len(), 1);
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod eval;
pub mod export;
pub mod model;
pub mod parser;
pub mod tokenizer;

pub use ast::{Operator, ProcedureDef, Statement};
pub use config::{EvalConfig, ExportConfig, FrameMode, PipelineConfig};
pub use error::{Error, Result};
pub use eval::{EvalError, EvalResult, Evaluation, Evaluator};
pub use export::{Document, ExportError, ExportResult, Exporter, Metadata};
pub use model::{Environment, StackValue};

/// Evaluates `statements` with the default configuration.
pub fn evaluate(statements: &[Statement]) -> EvalResult<Environment> {
    Ok(Evaluator::default().evaluate(statements)?.environment)
}

/// Exports `environment` with the default configuration.
pub fn export(environment: &Environment) -> ExportResult<Document> {
    Exporter::default().export(environment)
}

/// Result of compiling a source text.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub document: Document,
    /// Values still on the stack when the program ended.
    pub leftover: Vec<StackValue>,
}

/// Source-to-document pipeline with one configuration.
#[derive(Debug, Default)]
pub struct Pipeline {
    evaluator: Evaluator,
    exporter: Exporter,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            evaluator: Evaluator::new(config.eval),
            exporter: Exporter::new(config.export),
        }
    }

    pub fn compile(&self, source: &str) -> Result<Compiled> {
        let statements = parser::parse_source(source)?;
        let evaluation = self.evaluator.evaluate(&statements)?;
        let document = self.exporter.export(&evaluation.environment)?;
        Ok(Compiled {
            document,
            leftover: evaluation.leftover,
        })
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    use super::*;

    #[ctor::ctor]
    fn init_tests() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
    }

    #[test]
    fn test_pipeline_reports_leftovers() {
        let compiled = Pipeline::default()
            .compile("1 exponential \"r\" ~ 42")
            .unwrap();
        assert_eq!(compiled.leftover, vec![StackValue::Number(42.0)]);
        assert_eq!(compiled.document.random_variables.len(), 1);
    }

    #[test]
    fn test_pipeline_errors_by_layer() {
        let pipeline = Pipeline::default();
        assert!(matches!(
            pipeline.compile("\"open"),
            Err(Error::Tokenizer(_))
        ));
        assert!(matches!(pipeline.compile(": p"), Err(Error::Parse(_))));
        assert!(matches!(pipeline.compile("~"), Err(Error::Eval(_))));
        assert!(matches!(
            pipeline.compile("\"ghost\" var \"x\" ="),
            Err(Error::Export(_))
        ));
    }
}
