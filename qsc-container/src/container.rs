//! Container comprimido imutável

use crate::checksum;
use crate::error::{ContainerError, ContainerResult};
use crate::metadata::{ContainerMetadata, Encoding};
use crate::wire;
use qsc_core::{CompressionConfig, StateVector};
use qsc_entanglement::EntanglementPair;
use qsc_interference::InterferencePattern;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Versão atual do formato
pub const CONTAINER_VERSION: u16 = 1;

/// Container comprimido
///
/// Construído uma única vez por [`ContainerBuilder`]; não há mutadores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressedContainer {
    pub(crate) version: u16,
    pub(crate) states: Vec<StateVector>,
    pub(crate) entanglement_map: BTreeMap<String, EntanglementPair>,
    pub(crate) interference_patterns: Vec<InterferencePattern>,
    pub(crate) metadata: ContainerMetadata,
    pub(crate) checksum: String,
}

/// Resumo para logs e relatórios
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerStats {
    pub strategy: &'static str,
    pub original_size: u64,
    pub compressed_size: u64,
    pub compression_ratio: f64,
    pub space_saved: f64,
    pub state_count: usize,
    pub entanglement_count: usize,
    pub interference_count: usize,
}

impl CompressedContainer {
    pub fn version(&self) -> u16 {
        self.version
    }

    pub fn states(&self) -> &[StateVector] {
        &self.states
    }

    pub fn entanglement_map(&self) -> &BTreeMap<String, EntanglementPair> {
        &self.entanglement_map
    }

    /// Pares em ordem de id
    pub fn pairs(&self) -> impl Iterator<Item = &EntanglementPair> {
        self.entanglement_map.values()
    }

    pub fn interference_patterns(&self) -> &[InterferencePattern] {
        &self.interference_patterns
    }

    pub fn metadata(&self) -> &ContainerMetadata {
        &self.metadata
    }

    pub fn encoding(&self) -> &Encoding {
        &self.metadata.encoding
    }

    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    /// Recalcula o checksum a partir do conteúdo
    pub fn compute_checksum(&self) -> String {
        checksum::checksum_hex(&self.states, self.entanglement_map.values(), self.metadata.encoding.payload())
    }

    /// Verifica integridade
    pub fn verify_checksum(&self) -> ContainerResult<()> {
        let actual = self.compute_checksum();
        if actual != self.checksum {
            tracing::warn!(
                expected = %self.checksum,
                actual = %actual,
                strategy = self.metadata.encoding.strategy(),
                "container checksum mismatch"
            );
            return Err(ContainerError::IntegrityError {
                expected: self.checksum.clone(),
                actual,
            });
        }
        Ok(())
    }

    /// Cópia com outro checksum (para testes de corrupção)
    pub fn with_checksum(mut self, checksum: impl Into<String>) -> Self {
        self.checksum = checksum.into();
        self
    }

    pub fn stats(&self) -> ContainerStats {
        let m = &self.metadata;
        let ratio = m.compression_ratio();
        ContainerStats {
            strategy: m.encoding.strategy(),
            original_size: m.original_size,
            compressed_size: m.compressed_size,
            compression_ratio: ratio,
            space_saved: if m.original_size == 0 {
                0.0
            } else {
                1.0 - m.compressed_size as f64 / m.original_size as f64
            },
            state_count: m.state_count,
            entanglement_count: m.entanglement_count,
            interference_count: m.interference_count,
        }
    }

    /// Formato binário empacotado
    pub fn to_bytes(&self) -> Vec<u8> {
        wire::encode(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> ContainerResult<Self> {
        wire::decode(bytes).inspect_err(|error| {
            tracing::debug!(%error, len = bytes.len(), "packed container rejected");
        })
    }

    /// Formato JSON auto-descritivo
    pub fn to_json(&self) -> ContainerResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> ContainerResult<Self> {
        wire::from_json(json).inspect_err(|error| {
            tracing::debug!(%error, len = json.len(), "JSON container rejected");
        })
    }
}

/// Construtor do container
#[derive(Debug, Clone)]
pub struct ContainerBuilder {
    original_size: u64,
    config: CompressionConfig,
    chunk_size: usize,
    bit_depth: u8,
    states: Vec<StateVector>,
    pairs: Vec<EntanglementPair>,
    patterns: Vec<InterferencePattern>,
    encoding: Encoding,
    timestamp: Option<u64>,
}

impl ContainerBuilder {
    pub fn new(original_size: usize, config: CompressionConfig) -> Self {
        Self {
            original_size: original_size as u64,
            config,
            chunk_size: 0,
            bit_depth: config.quantum_bit_depth,
            states: Vec::new(),
            pairs: Vec::new(),
            patterns: Vec::new(),
            encoding: Encoding::Quantum,
            timestamp: None,
        }
    }

    pub fn chunking(mut self, chunk_size: usize, bit_depth: u8) -> Self {
        self.chunk_size = chunk_size;
        self.bit_depth = bit_depth;
        self
    }

    pub fn states(mut self, states: Vec<StateVector>) -> Self {
        self.states = states;
        self
    }

    pub fn pairs(mut self, pairs: Vec<EntanglementPair>) -> Self {
        self.pairs = pairs;
        self
    }

    pub fn patterns(mut self, patterns: Vec<InterferencePattern>) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn timestamp(mut self, seconds: u64) -> Self {
        self.timestamp = Some(seconds);
        self
    }

    /// Monta o container, calcula checksum e tamanho empacotado
    pub fn build(self) -> ContainerResult<CompressedContainer> {
        let mut entanglement_map = BTreeMap::new();
        for pair in self.pairs {
            let id = pair.entanglement_id.clone();
            if entanglement_map.insert(id.clone(), pair).is_some() {
                return Err(ContainerError::Malformed(format!("duplicate entanglement id {}", id)));
            }
        }

        let timestamp = self.timestamp.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });

        let metadata = ContainerMetadata {
            original_size: self.original_size,
            compressed_size: 0,
            state_count: self.states.len(),
            entanglement_count: entanglement_map.len(),
            interference_count: self.patterns.len(),
            timestamp,
            config: self.config,
            chunk_size: self.chunk_size,
            bit_depth: self.bit_depth,
            encoding: self.encoding,
        };

        let mut container = CompressedContainer {
            version: CONTAINER_VERSION,
            checksum: checksum::checksum_hex(&self.states, entanglement_map.values(), metadata.encoding.payload()),
            states: self.states,
            entanglement_map,
            interference_patterns: self.patterns,
            metadata,
        };
        container.metadata.compressed_size = wire::packed_len(&container) as u64;
        Ok(container)
    }
}
