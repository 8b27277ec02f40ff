//! Tipos de erro para qsc-superposition

use qsc_core::CoreError;
use thiserror::Error;

/// Resultado customizado para operações de superposição
pub type SuperpositionResult<T> = Result<T, SuperpositionError>;

/// Erros que podem ocorrer ao combinar estados
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SuperpositionError {
    #[error("No states to superpose")]
    NoStates,

    #[error("Weight mismatch: {states} states but {weights} weights")]
    WeightMismatch { states: usize, weights: usize },

    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    #[error("Dimension mismatch: expected {expected} amplitudes, found {found} at state {index}")]
    DimensionMismatch { expected: usize, found: usize, index: usize },

    #[error("Degenerate superposition: combined amplitudes cancel out")]
    Degenerate,

    #[error("Worker panicked while processing group")]
    WorkerPanicked,

    #[error("State error: {0}")]
    State(#[from] CoreError),
}
