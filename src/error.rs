use thiserror::Error;

/// Error taxonomy for the intervention engine. Rule-level misses are not
/// errors (the rules return `None`); these cover unknown ids, empty upstream
/// history, and inputs rejected before any computation runs.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
