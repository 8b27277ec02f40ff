//! Tipos de erro para qsc-entanglement

use qsc_core::CoreError;
use thiserror::Error;

/// Resultado customizado para operações de entanglement
pub type EntanglementResult<T> = Result<T, EntanglementError>;

/// Erros que podem ocorrer em operações de entanglement
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EntanglementError {
    #[error("Pair {pair_id} references state {index}, but only {len} states exist")]
    IndexOutOfRange { pair_id: String, index: usize, len: usize },

    #[error("Invalid pair: {0}")]
    InvalidPair(String),

    #[error("Correlation cache lock poisoned")]
    CachePoisoned,

    #[error("Worker panicked while scanning pairs")]
    WorkerPanicked,

    #[error("State error: {0}")]
    State(#[from] CoreError),
}
