//! Configuração de compressão
//!
//! Os quatro parâmetros ajustáveis do pipeline. Podem vir de código,
//! de JSON (serde) ou do ambiente / `.env`:
//!
//! | Variável | Campo | Default |
//! |----------|-------|---------|
//! | `QSC_BIT_DEPTH` | `quantum_bit_depth` | 8 |
//! | `QSC_MAX_ENTANGLEMENT_LEVEL` | `max_entanglement_level` | 4 |
//! | `QSC_SUPERPOSITION_COMPLEXITY` | `superposition_complexity` | 8 |
//! | `QSC_INTERFERENCE_THRESHOLD` | `interference_threshold` | 0.7 |

use crate::error::{CoreError, CoreResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

// Carrega .env uma única vez
static DOTENV_INIT: Lazy<()> = Lazy::new(|| {
    let _ = dotenv::dotenv();
});

#[inline]
fn ensure_loaded() {
    let _ = &*DOTENV_INIT;
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    ensure_loaded();
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Faixa válida de bit depth
pub const BIT_DEPTH_RANGE: (u8, u8) = (2, 16);

/// Faixa válida de nível de entanglement
pub const ENTANGLEMENT_LEVEL_RANGE: (u8, u8) = (1, 16);

/// Faixa válida de complexidade de superposição
pub const COMPLEXITY_RANGE: (usize, usize) = (1, 64);

/// Configuração consumida pelo pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompressionConfig {
    /// Limite superior do comprimento do vetor de amplitudes por chunk (2-16)
    pub quantum_bit_depth: u8,
    /// Multiplicador do limite de pares emaranhados
    pub max_entanglement_level: u8,
    /// Tamanho máximo de grupo de superposição
    pub superposition_complexity: usize,
    /// Gate de aceitação de pares e padrões de interferência ∈ (0, 1)
    pub interference_threshold: f64,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            quantum_bit_depth: 8,
            max_entanglement_level: 4,
            superposition_complexity: 8,
            interference_threshold: 0.7,
        }
    }
}

impl CompressionConfig {
    /// Preset rápido: vetores curtos, poucos pares
    pub fn fast() -> Self {
        Self {
            quantum_bit_depth: 4,
            max_entanglement_level: 1,
            superposition_complexity: 4,
            interference_threshold: 0.9,
        }
    }

    /// Preset de máxima análise
    pub fn maximum() -> Self {
        Self {
            quantum_bit_depth: 16,
            max_entanglement_level: 8,
            superposition_complexity: 32,
            interference_threshold: 0.5,
        }
    }

    /// Carrega do ambiente (.env incluso); campos ausentes usam o default
    pub fn from_env() -> CoreResult<Self> {
        let defaults = Self::default();
        let config = Self {
            quantum_bit_depth: env_or("QSC_BIT_DEPTH", defaults.quantum_bit_depth),
            max_entanglement_level: env_or("QSC_MAX_ENTANGLEMENT_LEVEL", defaults.max_entanglement_level),
            superposition_complexity: env_or("QSC_SUPERPOSITION_COMPLEXITY", defaults.superposition_complexity),
            interference_threshold: env_or("QSC_INTERFERENCE_THRESHOLD", defaults.interference_threshold),
        };
        config.validate()?;
        tracing::debug!(?config, "compression config loaded from environment");
        Ok(config)
    }

    /// Valida faixas
    pub fn validate(&self) -> CoreResult<()> {
        let (min_depth, max_depth) = BIT_DEPTH_RANGE;
        if !(min_depth..=max_depth).contains(&self.quantum_bit_depth) {
            return Err(CoreError::InvalidConfig(format!(
                "quantum_bit_depth must be in {}..={}, got {}",
                min_depth, max_depth, self.quantum_bit_depth
            )));
        }

        let (min_level, max_level) = ENTANGLEMENT_LEVEL_RANGE;
        if !(min_level..=max_level).contains(&self.max_entanglement_level) {
            return Err(CoreError::InvalidConfig(format!(
                "max_entanglement_level must be in {}..={}, got {}",
                min_level, max_level, self.max_entanglement_level
            )));
        }

        let (min_c, max_c) = COMPLEXITY_RANGE;
        if !(min_c..=max_c).contains(&self.superposition_complexity) {
            return Err(CoreError::InvalidConfig(format!(
                "superposition_complexity must be in {}..={}, got {}",
                min_c, max_c, self.superposition_complexity
            )));
        }

        let t = self.interference_threshold;
        if !(t.is_finite() && t > 0.0 && t < 1.0) {
            return Err(CoreError::InvalidConfig(format!(
                "interference_threshold must be in (0, 1), got {}",
                t
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(CompressionConfig::default().validate().is_ok());
        assert!(CompressionConfig::fast().validate().is_ok());
        assert!(CompressionConfig::maximum().validate().is_ok());
    }

    #[test]
    fn test_bit_depth_bounds() {
        let config = CompressionConfig { quantum_bit_depth: 1, ..Default::default() };
        assert!(config.validate().is_err());
        let config = CompressionConfig { quantum_bit_depth: 17, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_threshold_open_interval() {
        for t in [0.0, 1.0, -0.1, f64::NAN] {
            let config = CompressionConfig { interference_threshold: t, ..Default::default() };
            assert!(config.validate().is_err(), "threshold {} accepted", t);
        }
    }

    #[test]
    fn test_complexity_bounds() {
        let config = CompressionConfig { superposition_complexity: 0, ..Default::default() };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("superposition_complexity"));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = CompressionConfig::maximum();
        let json = serde_json::to_string(&config).unwrap();
        let back: CompressionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
