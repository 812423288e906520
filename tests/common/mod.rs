#![allow(dead_code)]

use phylostack::{parser::parse_source, Environment, Pipeline, PipelineConfig, Statement};
use serde_json::Value;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[ctor::ctor]
fn init_tests() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

pub const SUBSTITUTION_MODEL: &str = r#"
    // priors on the HKY parameters
    1.0 0.5 lognormal "kappa" ~
    [1.0 1.0 1.0 1.0] dirichlet "freqs" ~
    "kappa" var "freqs" var hky "subst_model" =
"#;

pub fn statements(source: &str) -> Vec<Statement> {
    parse_source(source).expect("source should parse")
}

pub fn environment(source: &str) -> Environment {
    phylostack::evaluate(&statements(source)).expect("source should evaluate")
}

/// Compiles `source` with the default pipeline and returns the document as
/// JSON.
pub fn document(source: &str) -> Value {
    document_with(source, PipelineConfig::default())
}

pub fn document_with(source: &str, config: PipelineConfig) -> Value {
    Pipeline::new(config)
        .compile(source)
        .expect("source should compile")
        .document
        .to_value()
        .expect("document should serialize")
}
