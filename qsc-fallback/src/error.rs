//! Tipos de erro para qsc-fallback

use thiserror::Error;

/// Resultado customizado para os codecs de fallback
pub type FallbackResult<T> = Result<T, FallbackError>;

/// Erros dos codecs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FallbackError {
    #[error("Deflate failed: {0}")]
    Deflate(String),

    #[error("{codec}: payload truncated at offset {offset}")]
    Truncated { codec: &'static str, offset: usize },

    #[error("{codec}: malformed payload at offset {offset}: {detail}")]
    Malformed {
        codec: &'static str,
        offset: usize,
        detail: String,
    },

    #[error("{codec}: decoded output exceeds {limit} bytes")]
    OutputTooLarge { codec: &'static str, limit: usize },
}

impl From<std::io::Error> for FallbackError {
    fn from(err: std::io::Error) -> Self {
        Self::Deflate(err.to_string())
    }
}
