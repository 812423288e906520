use thiserror::Error;

use crate::eval::EvalError;
use crate::export::ExportError;
use crate::parser::ParseError;
use crate::tokenizer::TokenizerError;

#[derive(Error, Debug)]
pub enum Error {
    // front end
    #[error("Tokenizer error: {0}")]
    Tokenizer(#[from] TokenizerError),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    // core
    #[error("Eval error: {0}")]
    Eval(#[from] EvalError),
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Config error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config(message.into())
    }
}
