//! Tipos de erro para qsc-core

use thiserror::Error;

/// Resultado customizado para operações do core
pub type CoreResult<T> = Result<T, CoreError>;

/// Erros de construção de estados e conversão
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("Empty input: cannot build states from a zero-length byte sequence")]
    EmptyInput,

    #[error("State vector has no amplitudes")]
    EmptyAmplitudes,

    #[error("State vector has zero norm (all amplitudes are zero)")]
    ZeroNorm,

    #[error("Non-finite amplitude at index {0}")]
    NonFinite(usize),

    #[error("State not normalized: sum of |a|² = {0}")]
    NotNormalized(f64),

    #[error("Phase out of range [0, 2π): {0}")]
    PhaseOutOfRange(f64),

    #[error("Amplitude index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Degenerate carrier: {0}")]
    DegenerateCarrier(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
