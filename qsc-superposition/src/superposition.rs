//! Tipos produzidos pela superposição

use qsc_core::prelude::*;
use serde::{Deserialize, Serialize};

/// Combinação ponderada de N estados
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Superposition {
    /// Cópias dos constituintes (representantes, nos níveis hierárquicos)
    pub states: Vec<StateVector>,
    /// Pesos por constituinte (Σ = 1)
    pub weights: Vec<f64>,
    /// Amplitudes combinadas (normalizadas)
    pub combined_amplitudes: Vec<Complex>,
    /// Fase média ponderada ∈ [0, 2π)
    pub phase: f64,
    /// Nível na hierarquia (0 = estados originais)
    pub depth: u32,
    /// Diagnóstico apenas
    pub coherence_time: f64,
}

impl Superposition {
    /// Probabilidades |cₖ|²
    pub fn probabilities(&self) -> Vec<f64> {
        self.combined_amplitudes.iter().map(|a| a.norm_sq()).collect()
    }

    /// Todos os índices com sua probabilidade, sem filtro, em ordem de índice
    pub fn pattern_probabilities(&self) -> Vec<PatternProbability> {
        self.combined_amplitudes
            .iter()
            .enumerate()
            .map(|(index, &amplitude)| PatternProbability {
                index,
                probability: amplitude.norm_sq(),
                amplitude,
            })
            .collect()
    }

    /// Número de constituintes
    pub fn constituent_count(&self) -> usize {
        self.states.len()
    }

    /// Representante da superposição como estado
    pub fn to_state(&self) -> CoreResult<StateVector> {
        StateVector::new(self.combined_amplitudes.clone(), self.phase)
    }
}

/// Padrão extraído: índice de amplitude e sua probabilidade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternProbability {
    pub index: usize,
    pub probability: f64,
    pub amplitude: Complex,
}

/// Falha de um grupo (não aborta os demais)
#[derive(Debug, Clone, PartialEq)]
pub struct GroupFailure {
    pub group_index: usize,
    pub error: crate::SuperpositionError,
}

/// Métricas de `process_groups`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuperpositionMetrics {
    pub group_count: usize,
    pub failed_groups: usize,
    pub pattern_count: usize,
    pub mean_coherence_time: f64,
    pub max_probability: f64,
    pub elapsed_us: u64,
}

/// Resultado de `process_groups`
#[derive(Debug, Clone, Default)]
pub struct GroupProcessingResult {
    /// Uma entrada por grupo bem-sucedido, na ordem dos grupos
    pub superpositions: Vec<(usize, Superposition)>,
    /// Padrões por grupo bem-sucedido, na ordem dos grupos
    pub patterns: Vec<(usize, Vec<PatternProbability>)>,
    pub metrics: SuperpositionMetrics,
    pub failures: Vec<GroupFailure>,
}

impl GroupProcessingResult {
    /// Todos os padrões, achatados
    pub fn all_patterns(&self) -> Vec<PatternProbability> {
        self.patterns.iter().flat_map(|(_, p)| p.iter().copied()).collect()
    }
}
