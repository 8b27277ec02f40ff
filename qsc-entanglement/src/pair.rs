//! Par emaranhado

use qsc_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_4;

/// Par de estados correlacionados
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntanglementPair {
    /// `ent-{index_a}-{index_b}`
    pub entanglement_id: String,
    /// Cópia do primeiro estado (antes do entangle)
    pub state_a: StateVector,
    /// Cópia do segundo estado (antes do entangle)
    pub state_b: StateVector,
    /// Posição de `state_a` na lista de estados
    pub index_a: usize,
    /// Posição de `state_b` na lista de estados
    pub index_b: usize,
    /// Força da correlação ∈ [0, 1]
    pub correlation_strength: f64,
    /// Padrão compartilhado quantizado (×255)
    pub shared_information: Vec<u8>,
    /// Rotação aplicada a `state_b`
    pub phase_shift: f64,
}

impl EntanglementPair {
    /// Id determinístico do par
    pub fn pair_id(index_a: usize, index_b: usize) -> String {
        format!("ent-{}-{}", index_a, index_b)
    }

    /// Rotação compensatória derivada da correlação
    pub fn phase_shift_for(correlation: f64) -> f64 {
        correlation.clamp(0.0, 1.0) * FRAC_PI_4
    }

    /// Bytes determinísticos (LE) para checksum
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&(self.entanglement_id.len() as u32).to_le_bytes());
        out.extend_from_slice(self.entanglement_id.as_bytes());
        out.extend_from_slice(&(self.index_a as u64).to_le_bytes());
        out.extend_from_slice(&(self.index_b as u64).to_le_bytes());
        out.extend_from_slice(&self.correlation_strength.to_le_bytes());
        out.extend_from_slice(&self.phase_shift.to_le_bytes());
        out.extend_from_slice(&(self.shared_information.len() as u32).to_le_bytes());
        out.extend_from_slice(&self.shared_information);
        out.extend_from_slice(&self.state_a.canonical_bytes());
        out.extend_from_slice(&self.state_b.canonical_bytes());
        out
    }
}

/// Resultado de `validate_quality`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QualityReport {
    pub valid_pairs: Vec<EntanglementPair>,
    pub invalid_pairs: Vec<EntanglementPair>,
    pub suggestions: Vec<String>,
}

impl QualityReport {
    /// Fração de pares aceitos
    pub fn acceptance_rate(&self) -> f64 {
        let total = self.valid_pairs.len() + self.invalid_pairs.len();
        if total == 0 {
            return 0.0;
        }
        self.valid_pairs.len() as f64 / total as f64
    }
}
