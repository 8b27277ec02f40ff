//! # 🛟 qsc-fallback: Codecs de Fallback
//!
//! Codecs sem perdas usados quando o caminho quântico não encolhe a
//! entrada ou falha.
//!
//! | Estratégia | Codec | Formato |
//! |:-----------|:------|:--------|
//! | `classical` | [`ClassicalCodec`] | deflate cru (flate2) |
//! | `hybrid` | [`HybridCodec`] | pattern-run → deflate |
//! | `pattern_run` | [`PatternRunCodec`] | literais + repetições de período ≤ 8 |
//! | `emergency` | [`EmergencyCodec`] | PackBits: literais de até 128 bytes e repetições de byte |
//!
//! Toda decodificação recebe um limite de saída: payload corrompido não
//! consegue expandir além do tamanho original registrado.

pub mod classical;
pub mod codec;
pub mod error;
pub mod hybrid;
pub mod pattern_run;
pub mod run_length;

pub use classical::ClassicalCodec;
pub use codec::{CodecCandidate, FallbackCodec, FallbackStrategy};
pub use error::{FallbackError, FallbackResult};
pub use hybrid::HybridCodec;
pub use pattern_run::PatternRunCodec;
pub use run_length::EmergencyCodec;

/// Codec default de cada estratégia
pub fn codec_for(strategy: FallbackStrategy) -> Box<dyn FallbackCodec> {
    match strategy {
        FallbackStrategy::Classical => Box::new(ClassicalCodec::best()),
        FallbackStrategy::Hybrid => Box::new(HybridCodec::default()),
        FallbackStrategy::PatternRun => Box::new(PatternRunCodec),
        FallbackStrategy::Emergency => Box::new(EmergencyCodec),
    }
}

#[cfg(test)]
mod tests;
