//! Otimizador de interferência

use crate::error::{InterferenceError, InterferenceResult};
use crate::pattern::{InterferenceKind, InterferencePattern, OptimizedPattern};
use crate::profile::InterferenceProfile;
use qsc_core::analysis::{distribution_correlation, normalized_entropy};
use qsc_core::prelude::*;
use qsc_superposition::PatternProbability;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::f64::consts::PI;
use std::time::Instant;

/// Correlação mínima para um par ser considerado oportunidade
pub const OPPORTUNITY_CORRELATION: f64 = 0.3;
/// Melhoria mínima do score entre iterações
pub const PLATEAU_EPSILON: f64 = 0.001;

/// Configuração do otimizador
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterferenceConfig {
    pub constructive_threshold: f64,
    pub destructive_threshold: f64,
    /// Fator construtivo (> 1)
    pub amplification_factor: f64,
    /// Supressão destrutiva ∈ [0, 1)
    pub suppression: f64,
    /// Correlação mínima para aceitar um padrão
    pub interference_threshold: f64,
    /// Rotação aplicada aos índices escalados
    pub phase_step: f64,
    pub max_iterations: u32,
    /// Pares examinados por iteração
    pub max_pairs: usize,
    /// `adjust_thresholds_adaptively` altera a configuração
    pub adaptive: bool,
}

impl Default for InterferenceConfig {
    fn default() -> Self {
        Self::from_compression(&CompressionConfig::default())
    }
}

impl InterferenceConfig {
    /// Perfil `Balanced` com o threshold da configuração de compressão
    pub fn from_compression(config: &CompressionConfig) -> Self {
        Self::from_profile(InterferenceProfile::Balanced, config.interference_threshold)
    }

    pub fn from_profile(profile: InterferenceProfile, interference_threshold: f64) -> Self {
        let p = profile.parameters();
        Self {
            constructive_threshold: p.constructive_threshold,
            destructive_threshold: p.destructive_threshold,
            amplification_factor: p.amplification_factor,
            suppression: p.suppression,
            interference_threshold,
            phase_step: PI / 32.0,
            max_iterations: p.max_iterations,
            max_pairs: 256,
            adaptive: false,
        }
    }

    pub fn validate(&self) -> InterferenceResult<()> {
        if !(self.amplification_factor.is_finite() && self.amplification_factor > 1.0) {
            return Err(InterferenceError::InvalidConfig(format!(
                "amplification_factor must be > 1 (got {})",
                self.amplification_factor
            )));
        }
        if !(0.0..1.0).contains(&self.suppression) {
            return Err(InterferenceError::InvalidConfig(format!(
                "suppression must be in [0, 1) (got {})",
                self.suppression
            )));
        }
        if !(0.0..=1.0).contains(&self.constructive_threshold) || !(0.0..=1.0).contains(&self.destructive_threshold) {
            return Err(InterferenceError::InvalidConfig(
                "probability thresholds must be in [0, 1]".into(),
            ));
        }
        if !self.phase_step.is_finite() {
            return Err(InterferenceError::InvalidConfig("phase_step must be finite".into()));
        }
        Ok(())
    }
}

/// Métricas de uma otimização
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterferenceMetrics {
    pub iterations: u32,
    pub converged: bool,
    pub constructive_count: usize,
    pub destructive_count: usize,
    /// Pares com correlação > 0.3
    pub opportunities: usize,
    /// Oportunidades abaixo do threshold de aceitação
    pub rejected: usize,
    /// Score de concentração antes da primeira iteração
    pub initial_score: f64,
    pub final_score: f64,
    /// Melhoria de score por iteração
    pub improvement_history: Vec<f64>,
    pub elapsed_us: u64,
}

/// Resultado de `optimize_states`
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationOutcome {
    pub states: Vec<StateVector>,
    pub patterns: Vec<InterferencePattern>,
    pub metrics: InterferenceMetrics,
}

/// Recomendação de `adjust_thresholds_adaptively`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRecommendation {
    /// Entropia normalizada média ∈ [0, 1]
    pub mean_entropy: f64,
    pub constructive_threshold: f64,
    pub destructive_threshold: f64,
    /// A configuração foi alterada?
    pub applied: bool,
}

/// Índices de amplitude eleitos pela superposição
///
/// Restringe `optimize_guided`: construtiva só nos índices dominantes,
/// destrutiva só nos desprezíveis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterferenceFocus {
    pub constructive: BTreeSet<usize>,
    pub destructive: BTreeSet<usize>,
}

impl InterferenceFocus {
    pub fn is_empty(&self) -> bool {
        self.constructive.is_empty() && self.destructive.is_empty()
    }

    /// O padrão só toca índices do foco do seu tipo?
    pub fn admits(&self, pattern: &InterferencePattern) -> bool {
        let allowed = match pattern.kind {
            InterferenceKind::Constructive => &self.constructive,
            InterferenceKind::Destructive => &self.destructive,
        };
        pattern.amplitude_indices.iter().all(|k| allowed.contains(k))
    }
}

/// Próximo par (i, j), i < j, na ordem lexicográfica, dando a volta
fn next_pair((i, j): (usize, usize), n: usize) -> (usize, usize) {
    if j + 1 < n {
        (i, j + 1)
    } else if i + 2 < n {
        (i + 1, i + 2)
    } else {
        (0, 1)
    }
}

/// Todos os pares (i, j), i < j < n, uma vez cada, começando em `from`
fn pair_cycle(n: usize, from: (usize, usize)) -> impl Iterator<Item = (usize, usize)> {
    let (fi, fj) = if from.0 < from.1 && from.1 < n { from } else { (0, 1) };
    let row = move |i: usize| ((i + 1)..n).map(move |j| (i, j));
    (fj..n)
        .map(move |j| (fi, j))
        .chain(((fi + 1)..n).flat_map(row))
        .chain((0..fi).flat_map(row))
        .chain(((fi + 1)..fj).map(move |j| (fi, j)))
}

/// Otimizador de interferência
#[derive(Debug, Clone, Default)]
pub struct InterferenceOptimizer {
    config: InterferenceConfig,
}

/// Score de concentração: média de Σ pₖ²
fn concentration(states: &[StateVector]) -> f64 {
    if states.is_empty() {
        return 0.0;
    }
    let total: f64 = states
        .iter()
        .map(|s| s.probabilities().iter().map(|p| p * p).sum::<f64>())
        .sum();
    total / states.len() as f64
}

impl InterferenceOptimizer {
    pub fn new(config: InterferenceConfig) -> InterferenceResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn from_compression(config: &CompressionConfig) -> InterferenceResult<Self> {
        Self::new(InterferenceConfig::from_compression(config))
    }

    pub fn config(&self) -> &InterferenceConfig {
        &self.config
    }

    // =========================================================================
    // Padrões isolados
    // =========================================================================

    /// Amplifica padrões com probabilidade ≥ threshold construtivo
    pub fn apply_constructive(&self, patterns: &[PatternProbability]) -> Vec<OptimizedPattern> {
        let factor = self.config.amplification_factor;
        patterns
            .iter()
            .filter(|p| p.probability >= self.config.constructive_threshold)
            .map(|p| OptimizedPattern {
                index: p.index,
                kind: InterferenceKind::Constructive,
                original_probability: p.probability,
                optimized_probability: (p.probability * factor * factor).min(1.0),
                factor,
                phase_delta: self.config.phase_step,
            })
            .collect()
    }

    /// Suprime padrões com probabilidade ≤ threshold destrutivo
    pub fn apply_destructive(&self, patterns: &[PatternProbability]) -> Vec<OptimizedPattern> {
        let factor = 1.0 - self.config.suppression;
        patterns
            .iter()
            .filter(|p| p.probability <= self.config.destructive_threshold)
            .map(|p| OptimizedPattern {
                index: p.index,
                kind: InterferenceKind::Destructive,
                original_probability: p.probability,
                optimized_probability: p.probability * factor * factor,
                factor,
                phase_delta: -self.config.phase_step,
            })
            .collect()
    }

    /// Foco a partir da superposição
    ///
    /// `dominant` são os padrões extraídos (grupos e hierarquia); `spectrum`
    /// cobre todos os índices da superposição global. Um índice eleito para
    /// as duas listas fica só na construtiva.
    pub fn focus(&self, dominant: &[PatternProbability], spectrum: &[PatternProbability]) -> InterferenceFocus {
        let constructive: BTreeSet<usize> = self.apply_constructive(dominant).iter().map(|p| p.index).collect();
        let destructive = self
            .apply_destructive(spectrum)
            .iter()
            .map(|p| p.index)
            .filter(|k| !constructive.contains(k))
            .collect();
        InterferenceFocus {
            constructive,
            destructive,
        }
    }

    // =========================================================================
    // Otimização iterativa
    // =========================================================================

    /// Candidato para um par: padrão e estados resultantes
    fn candidate(
        &self,
        kind: InterferenceKind,
        a: &StateVector,
        b: &StateVector,
        indices: Vec<usize>,
        iteration: u32,
        state_indices: [usize; 2],
    ) -> InterferenceResult<Option<(InterferencePattern, StateVector, StateVector)>> {
        if indices.is_empty() {
            return Ok(None);
        }
        let (amplitude, phase) = match kind {
            InterferenceKind::Constructive => (self.config.amplification_factor, self.config.phase_step),
            InterferenceKind::Destructive => (self.config.suppression, -self.config.phase_step),
        };
        let pattern = InterferencePattern {
            kind,
            amplitude,
            phase,
            state_indices: state_indices.to_vec(),
            amplitude_indices: indices,
            iteration,
        };

        let scale = pattern.forward_scale();
        let mut ta = a.clone();
        let mut tb = b.clone();
        ta.scale_indices(&pattern.amplitude_indices, scale, phase)?;
        tb.scale_indices(&pattern.amplitude_indices, scale, phase)?;
        Ok(Some((pattern, ta, tb)))
    }

    /// Otimização iterativa de pares de estados
    ///
    /// Cada padrão aceito é registrado para reversão; as entradas não são
    /// alteradas. Cada iteração examina até `max_pairs` pares, retomando
    /// de onde a anterior parou.
    pub fn optimize_states(&self, states: &[StateVector]) -> InterferenceResult<OptimizationOutcome> {
        self.optimize(states, None)
    }

    /// Como [`optimize_states`](Self::optimize_states), restrito ao foco
    pub fn optimize_guided(
        &self,
        states: &[StateVector],
        focus: &InterferenceFocus,
    ) -> InterferenceResult<OptimizationOutcome> {
        self.optimize(states, Some(focus))
    }

    fn optimize(&self, states: &[StateVector], focus: Option<&InterferenceFocus>) -> InterferenceResult<OptimizationOutcome> {
        let start = Instant::now();
        let mut states = states.to_vec();
        let mut patterns = Vec::new();
        let mut metrics = InterferenceMetrics::default();

        let mut previous = concentration(&states);
        metrics.initial_score = previous;
        let n = states.len();
        let mut cursor = (0, 1);
        let in_focus = |k: usize, kind: InterferenceKind| {
            focus.is_none_or(|f| match kind {
                InterferenceKind::Constructive => f.constructive.contains(&k),
                InterferenceKind::Destructive => f.destructive.contains(&k),
            })
        };

        for iteration in 0..self.config.max_iterations {
            let mut applied = 0usize;
            let mut examined = 0usize;

            for (i, j) in pair_cycle(n, cursor).take(self.config.max_pairs) {
                examined += 1;
                cursor = next_pair((i, j), n);

                let (a, b) = (&states[i], &states[j]);
                if a.len() != b.len() {
                    continue;
                }
                let (pa, pb) = (a.probabilities(), b.probabilities());
                let correlation = distribution_correlation(&pa, &pb);
                if correlation <= OPPORTUNITY_CORRELATION {
                    continue;
                }
                metrics.opportunities += 1;

                let means: Vec<f64> = pa.iter().zip(&pb).map(|(p, q)| (p + q) / 2.0).collect();
                let high: Vec<usize> = (0..means.len())
                    .filter(|&k| means[k] >= self.config.constructive_threshold)
                    .filter(|&k| in_focus(k, InterferenceKind::Constructive))
                    .collect();
                let low: Vec<usize> = (0..means.len())
                    .filter(|&k| means[k] <= self.config.destructive_threshold)
                    .filter(|&k| in_focus(k, InterferenceKind::Destructive))
                    .collect();

                let constructive = self.candidate(InterferenceKind::Constructive, a, b, high, iteration, [i, j])?;
                let destructive = self.candidate(InterferenceKind::Destructive, a, b, low, iteration, [i, j])?;

                let magnitude = |c: &(InterferencePattern, StateVector, StateVector)| {
                    c.1.magnitude_sum() + c.2.magnitude_sum()
                };
                let best = match (constructive, destructive) {
                    (Some(c), Some(d)) => {
                        if magnitude(&c) >= magnitude(&d) { Some(c) } else { Some(d) }
                    }
                    (c, d) => c.or(d),
                };
                let Some((pattern, ta, tb)) = best else {
                    continue;
                };

                if correlation < self.config.interference_threshold {
                    metrics.rejected += 1;
                    continue;
                }

                match pattern.kind {
                    InterferenceKind::Constructive => metrics.constructive_count += 1,
                    InterferenceKind::Destructive => metrics.destructive_count += 1,
                }
                states[i] = ta;
                states[j] = tb;
                patterns.push(pattern);
                applied += 1;
            }

            metrics.iterations = iteration + 1;
            let score = concentration(&states);
            let improvement = score - previous;
            metrics.improvement_history.push(improvement);
            previous = score;

            tracing::trace!(iteration, applied, examined, score, improvement, "interference iteration");

            if applied == 0 || improvement.abs() < PLATEAU_EPSILON {
                metrics.converged = true;
                break;
            }
        }

        metrics.final_score = previous;
        metrics.elapsed_us = start.elapsed().as_micros() as u64;
        tracing::debug!(
            patterns = patterns.len(),
            iterations = metrics.iterations,
            converged = metrics.converged,
            guided = focus.is_some(),
            "interference optimization finished"
        );

        Ok(OptimizationOutcome {
            states,
            patterns,
            metrics,
        })
    }

    // =========================================================================
    // Reversão
    // =========================================================================

    /// Confere índices de estado e de amplitude de todo o log
    fn validate_log(states: &[StateVector], patterns: &[InterferencePattern]) -> InterferenceResult<()> {
        let len = states.len();
        for (position, pattern) in patterns.iter().enumerate().rev() {
            for &index in &pattern.state_indices {
                let state = states.get(index).ok_or(InterferenceError::StateOutOfRange {
                    pattern: position,
                    index,
                    len,
                })?;
                if let Some(&k) = pattern.amplitude_indices.iter().find(|&&k| k >= state.len()) {
                    return Err(InterferenceError::Pattern {
                        pattern: position,
                        source: CoreError::IndexOutOfRange { index: k, len: state.len() },
                    });
                }
            }
        }
        Ok(())
    }

    /// Reverte o log de interferência, do mais recente ao mais antigo
    ///
    /// Tudo ou nada: em erro, `states` fica intacto.
    pub fn reverse_patterns(&self, states: &mut [StateVector], patterns: &[InterferencePattern]) -> InterferenceResult<()> {
        Self::validate_log(states, patterns)?;

        let mut work = states.to_vec();
        for (position, pattern) in patterns.iter().enumerate().rev() {
            let scale = pattern.reverse_scale();
            for &index in &pattern.state_indices {
                work[index]
                    .scale_indices(&pattern.amplitude_indices, scale, -pattern.phase)
                    .map_err(|source| InterferenceError::Pattern {
                        pattern: position,
                        source,
                    })?;
            }
        }
        states.clone_from_slice(&work);
        Ok(())
    }

    // =========================================================================
    // Thresholds adaptativos
    // =========================================================================

    /// Ajusta seletividade pela entropia média dos estados
    ///
    /// Entropia alta → thresholds mais seletivos; baixa → mais permissivos.
    /// Só altera a configuração quando `adaptive` está ligado.
    pub fn adjust_thresholds_adaptively(&mut self, states: &[StateVector]) -> ThresholdRecommendation {
        let mean_entropy = if states.is_empty() {
            0.0
        } else {
            states.iter().map(|s| normalized_entropy(&s.probabilities())).sum::<f64>() / states.len() as f64
        };

        let (mut constructive, mut destructive) =
            (self.config.constructive_threshold, self.config.destructive_threshold);
        if mean_entropy > 0.8 {
            constructive = (constructive * 1.2).min(0.9);
            destructive *= 0.8;
        } else if mean_entropy < 0.4 {
            constructive *= 0.8;
            destructive = (destructive * 1.2).min(constructive / 2.0);
        }

        let applied = self.config.adaptive;
        if applied {
            self.config.constructive_threshold = constructive;
            self.config.destructive_threshold = destructive;
            tracing::debug!(mean_entropy, constructive, destructive, "interference thresholds adapted");
        }

        ThresholdRecommendation {
            mean_entropy,
            constructive_threshold: constructive,
            destructive_threshold: destructive,
            applied,
        }
    }
}

impl QscComponent for InterferenceOptimizer {
    fn name(&self) -> &str {
        "InterferenceOptimizer"
    }

    fn step(&self) -> ProgressStep {
        ProgressStep::InterferenceOptimization
    }
}
