//! Deflate (flate2)

use crate::codec::{FallbackCodec, FallbackStrategy};
use crate::error::{FallbackError, FallbackResult};
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// Deflate cru
#[derive(Debug, Clone, Copy)]
pub struct ClassicalCodec {
    level: u32,
}

impl Default for ClassicalCodec {
    fn default() -> Self {
        Self::best()
    }
}

impl ClassicalCodec {
    /// Nível 0..=9
    pub fn new(level: u32) -> Self {
        Self { level: level.min(9) }
    }

    pub fn best() -> Self {
        Self::new(Compression::best().level())
    }

    /// Usado na degradação do caminho quântico
    pub fn fast() -> Self {
        Self::new(Compression::fast().level())
    }

    pub fn level(&self) -> u32 {
        self.level
    }
}

/// Deflate sobre `data`
pub fn deflate(data: &[u8], level: u32) -> FallbackResult<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::with_capacity(data.len() / 2 + 16), Compression::new(level));
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Inflate limitado a `limit` bytes
pub fn inflate(payload: &[u8], limit: usize) -> FallbackResult<Vec<u8>> {
    let mut out = Vec::new();
    DeflateDecoder::new(payload)
        .take(limit as u64 + 1)
        .read_to_end(&mut out)?;
    if out.len() > limit {
        return Err(FallbackError::OutputTooLarge {
            codec: "classical",
            limit,
        });
    }
    Ok(out)
}

impl FallbackCodec for ClassicalCodec {
    fn strategy(&self) -> FallbackStrategy {
        FallbackStrategy::Classical
    }

    fn compress(&self, data: &[u8]) -> FallbackResult<Vec<u8>> {
        deflate(data, self.level)
    }

    fn decompress(&self, payload: &[u8], limit: usize) -> FallbackResult<Vec<u8>> {
        inflate(payload, limit)
    }
}
