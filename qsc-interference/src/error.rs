//! Tipos de erro para qsc-interference

use qsc_core::CoreError;
use thiserror::Error;

/// Resultado customizado para operações de interferência
pub type InterferenceResult<T> = Result<T, InterferenceError>;

/// Erros que podem ocorrer ao aplicar ou reverter interferência
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterferenceError {
    #[error("Invalid interference config: {0}")]
    InvalidConfig(String),

    #[error("Pattern {pattern} references state {index}, but only {len} states exist")]
    StateOutOfRange { pattern: usize, index: usize, len: usize },

    #[error("Pattern {pattern}: {source}")]
    Pattern {
        pattern: usize,
        #[source]
        source: CoreError,
    },

    #[error("State error: {0}")]
    State(#[from] CoreError),
}
