//! Processador de superposição

use crate::error::{SuperpositionError, SuperpositionResult};
use crate::superposition::{
    GroupFailure, GroupProcessingResult, PatternProbability, Superposition, SuperpositionMetrics,
};
use qsc_core::analysis::shannon_entropy;
use qsc_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Configuração do processador
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuperpositionConfig {
    /// Probabilidade mínima para um padrão ser extraído
    pub pattern_threshold: f64,
    /// Tamanho máximo de grupo / sub-grupo hierárquico
    pub max_superposition_size: usize,
    /// Processar grupos em workers paralelos
    pub parallel: bool,
}

impl Default for SuperpositionConfig {
    fn default() -> Self {
        Self::from_compression(&CompressionConfig::default())
    }
}

impl SuperpositionConfig {
    pub fn from_compression(config: &CompressionConfig) -> Self {
        Self {
            pattern_threshold: 0.05,
            max_superposition_size: config.superposition_complexity.max(1),
            parallel: true,
        }
    }
}

/// Processador de superposição
#[derive(Debug, Clone, Default)]
pub struct SuperpositionProcessor {
    config: SuperpositionConfig,
}

impl SuperpositionProcessor {
    /// Cria novo processador
    pub fn new() -> Self {
        Self::default()
    }

    /// Cria processador com configuração customizada
    pub fn with_config(config: SuperpositionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SuperpositionConfig {
        &self.config
    }

    /// Pesos default: entropia baixa e variância alta pesam mais
    fn default_weights(states: &[StateVector]) -> Vec<f64> {
        let scores: Vec<f64> = states
            .iter()
            .map(|s| 1.0 / (1.0 + s.entropy()) + s.amplitude_variance())
            .collect();
        let sum: f64 = scores.iter().sum();
        scores.iter().map(|w| w / sum).collect()
    }

    /// Valida e normaliza pesos
    fn validate_weights(states: usize, weights: &[f64]) -> SuperpositionResult<Vec<f64>> {
        if weights.len() != states {
            return Err(SuperpositionError::WeightMismatch {
                states,
                weights: weights.len(),
            });
        }
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(SuperpositionError::InvalidWeights(
                "weights must be finite and non-negative".into(),
            ));
        }
        let sum: f64 = weights.iter().sum();
        if sum <= f64::EPSILON {
            return Err(SuperpositionError::InvalidWeights(format!("weights sum to {}", sum)));
        }
        Ok(weights.iter().map(|w| w / sum).collect())
    }

    fn combine_at_depth(
        &self,
        states: &[StateVector],
        weights: Option<&[f64]>,
        depth: u32,
    ) -> SuperpositionResult<Superposition> {
        let first = states.first().ok_or(SuperpositionError::NoStates)?;
        let weights = match weights {
            Some(w) => Self::validate_weights(states.len(), w)?,
            None => Self::default_weights(states),
        };

        let dim = first.len();
        if let Some((index, s)) = states.iter().enumerate().find(|(_, s)| s.len() != dim) {
            return Err(SuperpositionError::DimensionMismatch {
                expected: dim,
                found: s.len(),
                index,
            });
        }

        let mut combined = vec![Complex::ZERO; dim];
        let (mut sin_sum, mut cos_sum) = (0.0, 0.0);
        for (state, &w) in states.iter().zip(&weights) {
            for (c, a) in combined.iter_mut().zip(state.amplitudes()) {
                *c = c.add(a.scale(w));
            }
            sin_sum += w * state.phase().sin();
            cos_sum += w * state.phase().cos();
        }

        let norm = combined.iter().map(|a| a.norm_sq()).sum::<f64>().sqrt();
        if !norm.is_finite() || norm <= 1e-12 {
            return Err(SuperpositionError::Degenerate);
        }
        let combined: Vec<Complex> = combined.iter().map(|a| a.scale(1.0 / norm)).collect();

        Ok(Superposition {
            coherence_time: 1.0 / (1.0 + shannon_entropy(&weights)),
            weights,
            combined_amplitudes: combined,
            phase: normalize_phase(sin_sum.atan2(cos_sum)),
            states: states.to_vec(),
            depth,
        })
    }

    /// Combina estados em superposição ponderada
    pub fn combine(&self, states: &[StateVector], weights: Option<&[f64]>) -> SuperpositionResult<Superposition> {
        self.combine_at_depth(states, weights, 0)
    }

    /// Extrai padrões com probabilidade ≥ threshold, ordem decrescente
    pub fn extract_patterns(&self, superposition: &Superposition) -> Vec<PatternProbability> {
        let mut patterns: Vec<PatternProbability> = superposition
            .combined_amplitudes
            .iter()
            .enumerate()
            .map(|(index, &amplitude)| PatternProbability {
                index,
                probability: amplitude.norm_sq(),
                amplitude,
            })
            .filter(|p| p.probability >= self.config.pattern_threshold)
            .collect();

        patterns.sort_by(|a, b| {
            b.probability
                .total_cmp(&a.probability)
                .then(a.index.cmp(&b.index))
        });
        patterns
    }

    /// Superposição hierárquica
    ///
    /// Sub-grupos de no máximo `max_superposition_size` são superpostos;
    /// seus representantes formam o nível seguinte, até restar um.
    pub fn superpose_hierarchical(&self, states: &[StateVector]) -> SuperpositionResult<Superposition> {
        if states.is_empty() {
            return Err(SuperpositionError::NoStates);
        }
        let size = self.config.max_superposition_size.max(2);

        if states.len() <= size {
            return self.combine_at_depth(states, None, 0);
        }

        let mut depth = 0;
        let mut level = self.reduce_level(states, size, depth)?;

        loop {
            depth += 1;
            if level.len() <= size {
                tracing::trace!(depth, representatives = level.len(), "hierarchical superposition closed");
                return self.combine_at_depth(&level, None, depth);
            }
            level = self.reduce_level(&level, size, depth)?;
        }
    }

    /// Um nível da hierarquia: cada sub-grupo vira um representante
    fn reduce_level(&self, states: &[StateVector], size: usize, depth: u32) -> SuperpositionResult<Vec<StateVector>> {
        let mut representatives = Vec::with_capacity(states.len().div_ceil(size));
        for group in states.chunks(size) {
            let superposition = self.combine_at_depth(group, None, depth)?;
            representatives.push(superposition.to_state()?);
        }
        Ok(representatives)
    }

    fn process_group(&self, group: &[StateVector]) -> SuperpositionResult<(Superposition, Vec<PatternProbability>)> {
        let superposition = self.combine(group, None)?;
        let patterns = self.extract_patterns(&superposition);
        Ok((superposition, patterns))
    }

    fn run_groups<G>(&self, groups: &[G]) -> Vec<SuperpositionResult<(Superposition, Vec<PatternProbability>)>>
    where
        G: AsRef<[StateVector]> + Sync,
    {
        let sequential = || groups.iter().map(|g| self.process_group(g.as_ref())).collect();

        let workers = std::thread::available_parallelism().map_or(1, |n| n.get());
        if !self.config.parallel || groups.len() < 2 || workers < 2 {
            return sequential();
        }

        let per_worker = groups.len().div_ceil(workers);
        let outcome = crossbeam_utils::thread::scope(|scope| {
            let handles: Vec<_> = groups
                .chunks(per_worker)
                .map(|slice| {
                    scope.spawn(move |_| {
                        slice
                            .iter()
                            .map(|g| self.process_group(g.as_ref()))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .zip(groups.chunks(per_worker))
                .flat_map(|(handle, slice)| {
                    handle
                        .join()
                        .unwrap_or_else(|_| vec![Err(SuperpositionError::WorkerPanicked); slice.len()])
                })
                .collect::<Vec<_>>()
        });

        outcome.unwrap_or_else(|_| sequential())
    }

    /// Processa grupos independentes (falha parcial por grupo)
    pub fn process_groups<G>(&self, groups: &[G]) -> GroupProcessingResult
    where
        G: AsRef<[StateVector]> + Sync,
    {
        let start = Instant::now();
        let mut result = GroupProcessingResult::default();
        let mut coherence_total = 0.0;

        for (group_index, outcome) in self.run_groups(groups).into_iter().enumerate() {
            match outcome {
                Ok((superposition, patterns)) => {
                    coherence_total += superposition.coherence_time;
                    if let Some(top) = patterns.first() {
                        result.metrics.max_probability = result.metrics.max_probability.max(top.probability);
                    }
                    result.metrics.pattern_count += patterns.len();
                    result.superpositions.push((group_index, superposition));
                    result.patterns.push((group_index, patterns));
                }
                Err(error) => {
                    tracing::debug!(group_index, %error, "superposition group failed");
                    result.failures.push(GroupFailure { group_index, error });
                }
            }
        }

        let succeeded = result.superpositions.len();
        result.metrics.group_count = groups.len();
        result.metrics.failed_groups = result.failures.len();
        result.metrics.mean_coherence_time = if succeeded > 0 {
            coherence_total / succeeded as f64
        } else {
            0.0
        };
        result.metrics.elapsed_us = start.elapsed().as_micros() as u64;
        result
    }

    /// Agrupa estados em blocos de `max_superposition_size`
    pub fn group_states(&self, states: &[StateVector]) -> Vec<Vec<StateVector>> {
        states
            .chunks(self.config.max_superposition_size.max(1))
            .map(<[StateVector]>::to_vec)
            .collect()
    }
}

impl QscComponent for SuperpositionProcessor {
    fn name(&self) -> &str {
        "SuperpositionProcessor"
    }

    fn step(&self) -> ProgressStep {
        ProgressStep::SuperpositionAnalysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(values: &[f64]) -> StateVector {
        StateVector::new(values.iter().map(|&v| Complex::new(v, 0.0)).collect(), 0.0).unwrap()
    }

    #[test]
    fn test_combine_empty() {
        let sp = SuperpositionProcessor::new();
        assert_eq!(sp.combine(&[], None), Err(SuperpositionError::NoStates));
    }

    #[test]
    fn test_combine_weight_mismatch() {
        let sp = SuperpositionProcessor::new();
        let states = vec![state(&[1.0, 0.0]), state(&[0.0, 1.0])];
        let err = sp.combine(&states, Some(&[1.0])).unwrap_err();
        assert_eq!(err, SuperpositionError::WeightMismatch { states: 2, weights: 1 });
    }

    #[test]
    fn test_combine_explicit_weights() {
        let sp = SuperpositionProcessor::new();
        let states = vec![state(&[1.0, 0.0]), state(&[0.0, 1.0])];
        let sup = sp.combine(&states, Some(&[3.0, 1.0])).unwrap();
        assert!((sup.weights[0] - 0.75).abs() < 1e-12);
        let p = sup.probabilities();
        assert!(p[0] > p[1]);
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let sp = SuperpositionProcessor::new();
        let states = vec![state(&[1.0, 0.0, 0.0]), state(&[1.0, 1.0, 1.0]), state(&[0.2, 0.3, 0.9])];
        let sup = sp.combine(&states, None).unwrap();
        assert!((sup.weights.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        // estado concentrado tem entropia menor → peso maior que o uniforme
        assert!(sup.weights[0] > sup.weights[1]);
    }

    #[test]
    fn test_degenerate_combination() {
        let sp = SuperpositionProcessor::new();
        let states = vec![state(&[1.0, 0.0]), state(&[-1.0, 0.0])];
        assert_eq!(sp.combine(&states, Some(&[0.5, 0.5])), Err(SuperpositionError::Degenerate));
    }

    #[test]
    fn test_extract_patterns_sorted_and_filtered() {
        let sp = SuperpositionProcessor::new();
        let sup = sp.combine(&[state(&[0.1, 0.9, 0.4, 0.01])], None).unwrap();
        let patterns = sp.extract_patterns(&sup);
        assert_eq!(patterns[0].index, 1);
        assert!(patterns.windows(2).all(|w| w[0].probability >= w[1].probability));
        assert!(patterns.iter().all(|p| p.probability >= 0.05));
        assert!(!patterns.iter().any(|p| p.index == 3));
    }
}
