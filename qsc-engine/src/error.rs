//! Erros do engine

use qsc_container::ContainerError;
use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

/// Erros de compressão e descompressão
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Entrada vazia ou configuração malformada; nunca repetir
    #[error("Invalid input for {operation}: {reason}")]
    InvalidInput { operation: &'static str, reason: String },

    /// Checksum divergente; nunca repetir
    #[error("Integrity check failed: expected {expected}, computed {actual}")]
    IntegrityError { expected: String, actual: String },

    /// Falha de uma etapa do pipeline
    #[error("Transform failed during {operation} at {stage}: {detail}")]
    TransformError {
        operation: &'static str,
        stage: String,
        detail: String,
    },

    /// Tamanho reconstruído difere do original
    #[error("Size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: u64, actual: u64 },

    /// Caminho quântico e degradação falharam
    #[error("All strategies failed: {original}; fallback: {fallback}")]
    FallbackExhausted { original: String, fallback: String },

    /// Formato de fio
    #[error("Container error: {0}")]
    Container(ContainerError),

    /// Lock envenenado (bus de eventos)
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

impl EngineError {
    pub(crate) fn transform(operation: &'static str, stage: impl ToString, detail: impl ToString) -> Self {
        Self::TransformError {
            operation,
            stage: stage.to_string(),
            detail: detail.to_string(),
        }
    }
}

impl From<ContainerError> for EngineError {
    fn from(err: ContainerError) -> Self {
        match err {
            ContainerError::IntegrityError { expected, actual } => Self::IntegrityError { expected, actual },
            other => Self::Container(other),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for EngineError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        EngineError::LockPoisoned(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::InvalidInput {
            operation: "compress",
            reason: "empty input".into(),
        };
        assert!(err.to_string().contains("empty input"));
    }

    #[test]
    fn test_integrity_conversion() {
        let err: EngineError = ContainerError::IntegrityError {
            expected: "a".into(),
            actual: "b".into(),
        }
        .into();
        assert_eq!(
            err,
            EngineError::IntegrityError {
                expected: "a".into(),
                actual: "b".into()
            }
        );

        let err: EngineError = ContainerError::UnknownEncoding(9).into();
        assert!(matches!(err, EngineError::Container(_)));
    }
}
