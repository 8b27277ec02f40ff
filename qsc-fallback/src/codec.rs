//! Trait comum dos codecs de fallback

use crate::error::FallbackResult;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Estratégia de fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackStrategy {
    Classical,
    Hybrid,
    PatternRun,
    Emergency,
}

impl FallbackStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classical => "classical",
            Self::Hybrid => "hybrid",
            Self::PatternRun => "pattern_run",
            Self::Emergency => "emergency",
        }
    }
}

/// Codec sem perdas sobre bytes
pub trait FallbackCodec: Send + Sync + Debug {
    fn strategy(&self) -> FallbackStrategy;

    fn compress(&self, data: &[u8]) -> FallbackResult<Vec<u8>>;

    /// Decodifica no máximo `limit` bytes
    fn decompress(&self, payload: &[u8], limit: usize) -> FallbackResult<Vec<u8>>;
}

/// Resultado de avaliar um codec sobre uma entrada
#[derive(Debug, Clone, PartialEq)]
pub struct CodecCandidate {
    pub strategy: FallbackStrategy,
    pub payload: Vec<u8>,
    /// original / payload
    pub ratio: f64,
}

impl CodecCandidate {
    pub fn evaluate(codec: &dyn FallbackCodec, data: &[u8]) -> FallbackResult<Self> {
        let payload = codec.compress(data)?;
        let ratio = if payload.is_empty() {
            0.0
        } else {
            data.len() as f64 / payload.len() as f64
        };
        tracing::trace!(strategy = codec.strategy().as_str(), input = data.len(), output = payload.len(), "codec evaluated");
        Ok(Self {
            strategy: codec.strategy(),
            payload,
            ratio,
        })
    }
}
