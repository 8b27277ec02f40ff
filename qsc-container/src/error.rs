//! Tipos de erro para qsc-container

use qsc_core::CoreError;
use thiserror::Error;

/// Resultado customizado para operações de container
pub type ContainerResult<T> = Result<T, ContainerError>;

/// Erros de construção, verificação e (de)serialização do container
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContainerError {
    #[error("Unsupported container version: {found} (supported: {supported})")]
    UnsupportedVersion { found: u16, supported: u16 },

    #[error("Invalid magic: expected QSCF, got {0:?}")]
    InvalidMagic([u8; 4]),

    #[error("Unknown encoding tag: {0}")]
    UnknownEncoding(u8),

    #[error("Truncated container: needed {needed} bytes for {field}, {remaining} remaining")]
    Truncated {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    #[error("Malformed container: {0}")]
    Malformed(String),

    #[error("Checksum mismatch: expected {expected}, computed {actual}")]
    IntegrityError { expected: String, actual: String },

    #[error("JSON error: {0}")]
    Json(String),

    #[error("State error: {0}")]
    State(#[from] CoreError),
}

impl From<serde_json::Error> for ContainerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
