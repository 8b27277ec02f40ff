//! Híbrido: pattern-run seguido de deflate

use crate::classical::{deflate, inflate};
use crate::codec::{FallbackCodec, FallbackStrategy};
use crate::error::FallbackResult;
use crate::pattern_run;

/// Codec híbrido
#[derive(Debug, Clone, Copy)]
pub struct HybridCodec {
    level: u32,
}

impl Default for HybridCodec {
    fn default() -> Self {
        Self { level: 9 }
    }
}

impl HybridCodec {
    pub fn new(level: u32) -> Self {
        Self { level: level.min(9) }
    }
}

impl FallbackCodec for HybridCodec {
    fn strategy(&self) -> FallbackStrategy {
        FallbackStrategy::Hybrid
    }

    fn compress(&self, data: &[u8]) -> FallbackResult<Vec<u8>> {
        deflate(&pattern_run::encode(data), self.level)
    }

    fn decompress(&self, payload: &[u8], limit: usize) -> FallbackResult<Vec<u8>> {
        // pattern-run nunca cresce mais que 1 byte a cada 128
        let intermediate_limit = limit + limit / 128 + 2;
        let intermediate = inflate(payload, intermediate_limit)?;
        pattern_run::decode(&intermediate, limit)
    }
}
