//! # State Converter: bytes ⇄ estados
//!
//! Mapeamento bidirecional entre sequência de bytes e lista de
//! [`StateVector`], com escolha de parâmetros guiada por entropia.
//!
//! ## Mapeamento
//!
//! ```text
//! byte b ──► x = b/127.5 − 1 ∈ [−1, 1] ──► amplitude (x, 1)
//!                                          │
//!                          normaliza ◄─────┘  (norma N)
//!
//! inverso: N = w / Σ im(uᵢ)   b = round((re(uᵢ)·N + 1)·127.5)
//! ```
//!
//! A componente imaginária constante é o *carrier*: sobrevive à
//! normalização e permite recuperar a escala exata.

use crate::analysis::byte_entropy;
use crate::complex::Complex;
use crate::config::CompressionConfig;
use crate::error::{CoreError, CoreResult};
use crate::state::StateVector;
use crate::traits::{ProgressStep, QscComponent};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Valor do carrier antes da normalização
pub const CARRIER: f64 = 1.0;

/// Limites usados por [`StateConverter::choose_parameters`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterConfig {
    pub min_bit_depth: u8,
    pub max_bit_depth: u8,
    pub min_chunk_size: usize,
    pub max_chunk_size: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self::from_compression(&CompressionConfig::default())
    }
}

impl ConverterConfig {
    /// Deriva limites da configuração de compressão
    pub fn from_compression(config: &CompressionConfig) -> Self {
        let max_depth = config.quantum_bit_depth.max(2);
        Self {
            min_bit_depth: 2,
            max_bit_depth: max_depth,
            min_chunk_size: 1,
            max_chunk_size: max_depth as usize,
        }
    }
}

/// Parâmetros escolhidos para uma entrada
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionParameters {
    pub chunk_size: usize,
    pub bit_depth: u8,
    /// Entropia de Shannon (bits/byte) usada na decisão
    pub entropy: f64,
}

/// Conversor bytes ⇄ estados
#[derive(Debug, Clone, Default)]
pub struct StateConverter {
    config: ConverterConfig,
}

impl StateConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    pub fn from_compression(config: &CompressionConfig) -> Self {
        Self::new(ConverterConfig::from_compression(config))
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Largura efetiva: bit depth limita o comprimento do vetor
    pub fn effective_width(chunk_size: usize, bit_depth: u8) -> usize {
        chunk_size.min(bit_depth as usize).max(1)
    }

    /// Particiona bytes em chunks e converte cada um em estado
    pub fn to_states(&self, bytes: &[u8], chunk_size: usize, bit_depth: u8) -> CoreResult<Vec<StateVector>> {
        if bytes.is_empty() {
            return Err(CoreError::EmptyInput);
        }
        if chunk_size == 0 || bit_depth == 0 {
            return Err(CoreError::InvalidConfig(format!(
                "chunk_size and bit_depth must be positive (chunk_size={}, bit_depth={})",
                chunk_size, bit_depth
            )));
        }

        let width = Self::effective_width(chunk_size, bit_depth);
        let mut states = Vec::with_capacity(bytes.len().div_ceil(width));

        for chunk in bytes.chunks(width) {
            let mut padded = chunk.to_vec();
            padded.resize(width, 0);

            let amplitudes: Vec<Complex> = padded
                .iter()
                .map(|&b| Complex::new(b as f64 / 127.5 - 1.0, CARRIER))
                .collect();

            let sum: u64 = padded.iter().map(|&b| b as u64).sum();
            let average = sum as f64 / width as f64;
            let phase = average / 256.0 * TAU;

            states.push(StateVector::new(amplitudes, phase)?);
        }

        tracing::trace!(input = bytes.len(), width, states = states.len(), "bytes converted to states");
        Ok(states)
    }

    /// Inverso de [`to_states`](Self::to_states)
    ///
    /// Devolve `len(states) × width` bytes; o chamador trunca para o
    /// tamanho original registrado.
    pub fn to_bytes(&self, states: &[StateVector]) -> CoreResult<Vec<u8>> {
        let mut out = Vec::with_capacity(states.iter().map(|s| s.len()).sum());

        for (idx, state) in states.iter().enumerate() {
            let carrier_sum: f64 = state.amplitudes().iter().map(|a| a.im).sum();
            if !carrier_sum.is_finite() || carrier_sum <= 1e-12 {
                return Err(CoreError::DegenerateCarrier(format!(
                    "state {} has carrier sum {}",
                    idx, carrier_sum
                )));
            }
            let scale = state.len() as f64 / carrier_sum;

            for a in state.amplitudes() {
                let x = a.re * scale;
                let value = ((x + 1.0) * 127.5).round().clamp(0.0, 255.0);
                out.push(value as u8);
            }
        }

        Ok(out)
    }

    /// Colapso por máxima verossimilhança do carrier
    ///
    /// Todas as componentes imaginárias colapsam para seu valor comum de
    /// mínimos quadrados (a média); depois renormaliza.
    pub fn collapse(&self, state: &StateVector) -> CoreResult<StateVector> {
        let n = state.len() as f64;
        let carrier = state.amplitudes().iter().map(|a| a.im).sum::<f64>() / n;
        if !carrier.is_finite() || carrier <= 1e-12 {
            return Err(CoreError::DegenerateCarrier(format!(
                "cannot collapse: mean carrier {}",
                carrier
            )));
        }

        let mut collapsed = state.clone();
        collapsed.map_amplitudes(|_, a| Complex::new(a.re, carrier))?;
        Ok(collapsed)
    }

    /// Escolhe chunk size e bit depth pela entropia
    ///
    /// Entropia alta → chunks menores e bit depth menor (ruído rende pouco
    /// à análise). Sempre dentro dos limites da configuração.
    pub fn choose_parameters(&self, bytes: &[u8]) -> ConversionParameters {
        let entropy = byte_entropy(bytes);
        let ratio = (entropy / 8.0).clamp(0.0, 1.0);

        let min_depth = self.config.min_bit_depth.min(self.config.max_bit_depth);
        let max_depth = self.config.max_bit_depth;
        let span = (max_depth - min_depth) as f64;
        let bit_depth = (max_depth as f64 - ratio * span).round() as u8;
        let bit_depth = bit_depth.clamp(min_depth, max_depth);

        let upper = self.config.max_chunk_size.min(bit_depth as usize).max(1);
        let lower = self.config.min_chunk_size.clamp(1, upper);
        let chunk = (bit_depth as f64 * (1.0 - ratio / 2.0)).round() as usize;
        let chunk_size = chunk.min(bytes.len().max(1)).clamp(lower, upper);

        ConversionParameters {
            chunk_size,
            bit_depth,
            entropy,
        }
    }
}

impl QscComponent for StateConverter {
    fn name(&self) -> &str {
        "StateConverter"
    }

    fn step(&self) -> ProgressStep {
        ProgressStep::QuantumStatePreparation
    }
}
