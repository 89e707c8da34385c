//! Initialization errors
//!
//! Everything here is raised before the first wrapper runs. Once a host is
//! installed, wrappers report absence through sentinels instead.

use fobridge_config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Host version '{version}' probe mismatch: expected {expected}, found {actual}")]
    ProbeMismatch {
        version: String,
        expected: String,
        actual: String,
    },

    #[error("Host function '{symbol}' is declared with {declared} arguments, the runtime calls it with {expected}")]
    SignatureMismatch {
        symbol: &'static str,
        expected: usize,
        declared: usize,
    },

    #[error("Host function '{symbol}' cannot be called: {reason}")]
    UncallableFunction { symbol: &'static str, reason: String },

    #[error("A host layout is already installed (version '{0}')")]
    AlreadyInstalled(String),
}

pub type BridgeResult<T> = Result<T, BridgeError>;
