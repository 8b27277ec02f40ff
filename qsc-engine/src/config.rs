//! Configuração agregada do engine

use crate::error::{EngineError, EngineResult};
use qsc_core::CompressionConfig;
use qsc_entanglement::EntanglementConfig;
use qsc_interference::InterferenceConfig;
use qsc_superposition::SuperpositionConfig;
use serde::{Deserialize, Serialize};

/// Razão clássica a partir da qual o caminho quântico é dispensado
pub const CLASSICAL_RATIO_THRESHOLD: f64 = 1.1;

/// Configuração de todos os passes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub compression: CompressionConfig,
    pub superposition: SuperpositionConfig,
    pub entanglement: EntanglementConfig,
    pub interference: InterferenceConfig,
    /// Razão clássica mínima para preferir o codec clássico
    pub classical_ratio_threshold: f64,
    /// Executa a inversa de teste antes de aceitar o container quântico
    pub verify_quantum: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_compression(CompressionConfig::default())
    }
}

impl EngineConfig {
    /// Deriva a configuração de cada pass
    pub fn from_compression(compression: CompressionConfig) -> Self {
        Self {
            superposition: SuperpositionConfig::from_compression(&compression),
            entanglement: EntanglementConfig::from_compression(&compression),
            interference: InterferenceConfig::from_compression(&compression),
            compression,
            classical_ratio_threshold: CLASSICAL_RATIO_THRESHOLD,
            verify_quantum: true,
        }
    }

    /// Carrega do ambiente (`QSC_*`, `.env`)
    pub fn from_env() -> EngineResult<Self> {
        let compression = CompressionConfig::from_env().map_err(|e| EngineError::InvalidInput {
            operation: "configure",
            reason: e.to_string(),
        })?;
        Ok(Self::from_compression(compression))
    }

    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |reason: String| EngineError::InvalidInput {
            operation: "configure",
            reason,
        };
        self.compression.validate().map_err(|e| invalid(e.to_string()))?;
        self.interference.validate().map_err(|e| invalid(e.to_string()))?;
        if !self.classical_ratio_threshold.is_finite() || self.classical_ratio_threshold < 1.0 {
            return Err(invalid(format!(
                "classical_ratio_threshold must be >= 1.0, got {}",
                self.classical_ratio_threshold
            )));
        }
        Ok(())
    }
}
