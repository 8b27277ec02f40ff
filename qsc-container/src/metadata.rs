//! Metadados tipados e estratégia de codificação

use qsc_core::CompressionConfig;
use serde::{Deserialize, Serialize};

/// Estratégia usada para gravar o conteúdo
///
/// A descompressão faz `match` exaustivo sobre esta enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Encoding {
    /// Estados + pares + log de interferência
    Quantum,
    /// Deflate sobre os bytes originais
    Classical {
        #[serde(with = "hex_payload")]
        payload: Vec<u8>,
    },
    /// Pattern-run seguido de deflate
    Hybrid {
        #[serde(with = "hex_payload")]
        payload: Vec<u8>,
    },
    /// Pattern-run puro
    PatternRun {
        #[serde(with = "hex_payload")]
        payload: Vec<u8>,
    },
    /// Run-length de emergência
    Emergency {
        #[serde(with = "hex_payload")]
        payload: Vec<u8>,
        /// Não encolheu a entrada
        forced: bool,
    },
}

impl Encoding {
    pub const TAG_QUANTUM: u8 = 0;
    pub const TAG_CLASSICAL: u8 = 1;
    pub const TAG_HYBRID: u8 = 2;
    pub const TAG_PATTERN_RUN: u8 = 3;
    pub const TAG_EMERGENCY: u8 = 4;

    /// Tag do formato binário
    pub fn tag(&self) -> u8 {
        match self {
            Self::Quantum => Self::TAG_QUANTUM,
            Self::Classical { .. } => Self::TAG_CLASSICAL,
            Self::Hybrid { .. } => Self::TAG_HYBRID,
            Self::PatternRun { .. } => Self::TAG_PATTERN_RUN,
            Self::Emergency { .. } => Self::TAG_EMERGENCY,
        }
    }

    /// Nome estável da estratégia
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::Quantum => "quantum",
            Self::Classical { .. } => "classical",
            Self::Hybrid { .. } => "hybrid",
            Self::PatternRun { .. } => "pattern_run",
            Self::Emergency { .. } => "emergency",
        }
    }

    /// Payload de fallback (vazio no caminho quântico)
    pub fn payload(&self) -> &[u8] {
        match self {
            Self::Quantum => &[],
            Self::Classical { payload }
            | Self::Hybrid { payload }
            | Self::PatternRun { payload }
            | Self::Emergency { payload, .. } => payload,
        }
    }

    pub fn is_quantum(&self) -> bool {
        matches!(self, Self::Quantum)
    }

    pub fn is_forced(&self) -> bool {
        matches!(self, Self::Emergency { forced: true, .. })
    }
}

/// Metadados do container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerMetadata {
    pub original_size: u64,
    /// Tamanho do formato binário empacotado
    pub compressed_size: u64,
    pub state_count: usize,
    pub entanglement_count: usize,
    pub interference_count: usize,
    /// Segundos desde a epoch
    pub timestamp: u64,
    /// Snapshot da configuração usada
    pub config: CompressionConfig,
    pub chunk_size: usize,
    pub bit_depth: u8,
    pub encoding: Encoding,
}

impl ContainerMetadata {
    /// original / compressed (1.0 se vazio)
    pub fn compression_ratio(&self) -> f64 {
        if self.compressed_size == 0 {
            return 1.0;
        }
        self.original_size as f64 / self.compressed_size as f64
    }
}

/// Payload como string hex no JSON
mod hex_payload {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(payload: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(payload))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        hex::decode(text).map_err(serde::de::Error::custom)
    }
}
