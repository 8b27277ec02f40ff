//! Analisador de entanglement

use crate::cache::{CacheStats, CorrelationCache, DEFAULT_CACHE_CAPACITY};
use crate::error::{EntanglementError, EntanglementResult};
use crate::pair::{EntanglementPair, QualityReport};
use qsc_core::analysis::distribution_correlation;
use qsc_core::prelude::*;
use serde::{Deserialize, Serialize};

/// Pares permitidos por nível de entanglement
pub const PAIRS_PER_LEVEL: usize = 8;

/// Configuração do analisador
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntanglementConfig {
    /// Correlação mínima para formar par
    pub correlation_threshold: f64,
    /// Limita o número de pares (× [`PAIRS_PER_LEVEL`])
    pub max_entanglement_level: u8,
    /// Abaixo disso a detecção é pulada
    pub min_states: usize,
    /// Apenas os primeiros `max_states` estados são varridos
    pub max_states: usize,
    /// Piso de qualidade de `validate_quality` (≥ threshold)
    pub quality_floor: f64,
    /// Diferença máxima de probabilidade para um índice ser compartilhado
    pub agreement_tolerance: f64,
    /// Varrer linhas em workers paralelos
    pub parallel: bool,
    /// Entradas máximas do cache de correlações
    pub cache_capacity: usize,
}

impl Default for EntanglementConfig {
    fn default() -> Self {
        Self::from_compression(&CompressionConfig::default())
    }
}

impl EntanglementConfig {
    pub fn from_compression(config: &CompressionConfig) -> Self {
        let threshold = config.interference_threshold.clamp(0.0, 1.0);
        Self {
            correlation_threshold: threshold,
            max_entanglement_level: config.max_entanglement_level.max(1),
            min_states: 2,
            max_states: 4096,
            quality_floor: (threshold + 0.1).min(1.0),
            agreement_tolerance: 0.05,
            parallel: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }

    /// Número máximo de pares aceitos
    pub fn max_pairs(&self) -> usize {
        self.max_entanglement_level as usize * PAIRS_PER_LEVEL
    }

    /// Candidatos retidos por linha da varredura
    ///
    /// Quando o greedy escolhe (i, j), cada candidato melhor da linha i foi
    /// pulado porque j' já estava usado, e no máximo `2·(max_pairs − 1)`
    /// estados estão usados nesse ponto. Reter `2·max_pairs` por linha
    /// produz exatamente os mesmos pares.
    pub fn row_candidates(&self) -> usize {
        2 * self.max_pairs()
    }
}

/// Ordem do greedy: correlação decrescente, depois (i, j) crescentes
fn by_strength(a: &(usize, usize, f64), b: &(usize, usize, f64)) -> std::cmp::Ordering {
    b.2.total_cmp(&a.2).then(a.0.cmp(&b.0)).then(a.1.cmp(&b.1))
}

/// Analisador de entanglement
#[derive(Debug, Default)]
pub struct EntanglementAnalyzer {
    config: EntanglementConfig,
    cache: CorrelationCache,
}

impl EntanglementAnalyzer {
    pub fn new(config: EntanglementConfig) -> Self {
        Self {
            config,
            cache: CorrelationCache::with_capacity(config.cache_capacity),
        }
    }

    pub fn from_compression(config: &CompressionConfig) -> Self {
        Self::new(EntanglementConfig::from_compression(config))
    }

    pub fn config(&self) -> &EntanglementConfig {
        &self.config
    }

    // =========================================================================
    // Correlação
    // =========================================================================

    fn raw_correlation(a: &StateVector, b: &StateVector) -> f64 {
        distribution_correlation(&a.probabilities(), &b.probabilities())
    }

    /// Correlação ∈ [0, 1], memoizada
    pub fn correlation(&self, a: &StateVector, b: &StateVector) -> f64 {
        let (ka, kb) = (a.content_key(), b.content_key());
        self.cache
            .get_or_compute(ka, kb, || Self::raw_correlation(a, b))
            .unwrap_or_else(|error| {
                tracing::debug!(%error, "correlation cache unavailable, computing directly");
                Self::raw_correlation(a, b)
            })
    }

    /// Esvazia o cache de correlações
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    // =========================================================================
    // Detecção de pares
    // =========================================================================

    /// Candidatos da linha `i`: (i, j, correlação) para j > i acima do
    /// threshold, apenas os [`EntanglementConfig::row_candidates`] mais fortes
    fn scan_row(&self, states: &[StateVector], i: usize) -> Vec<(usize, usize, f64)> {
        let threshold = self.config.correlation_threshold;
        let mut row: Vec<_> = ((i + 1)..states.len())
            .filter_map(|j| {
                let c = self.correlation(&states[i], &states[j]);
                (c >= threshold).then_some((i, j, c))
            })
            .collect();
        let keep = self.config.row_candidates();
        if row.len() > keep {
            row.select_nth_unstable_by(keep - 1, by_strength);
            row.truncate(keep);
        }
        row
    }

    fn scan_sequential(&self, states: &[StateVector]) -> Vec<(usize, usize, f64)> {
        (0..states.len()).flat_map(|i| self.scan_row(states, i)).collect()
    }

    fn scan(&self, states: &[StateVector]) -> Vec<(usize, usize, f64)> {
        let workers = std::thread::available_parallelism().map_or(1, |n| n.get());
        if !self.config.parallel || workers < 2 || states.len() < 16 {
            return self.scan_sequential(states);
        }

        let rows: Vec<usize> = (0..states.len()).collect();
        let per_worker = rows.len().div_ceil(workers);
        let scanned = crossbeam_utils::thread::scope(|scope| {
            let handles: Vec<_> = rows
                .chunks(per_worker)
                .map(|slice| {
                    scope.spawn(move |_| {
                        slice
                            .iter()
                            .flat_map(|&i| self.scan_row(states, i))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            let mut candidates = Vec::new();
            for handle in handles {
                candidates.extend(handle.join().map_err(|_| EntanglementError::WorkerPanicked)?);
            }
            Ok::<_, EntanglementError>(candidates)
        });

        match scanned {
            Ok(Ok(candidates)) => candidates,
            Ok(Err(error)) => {
                tracing::warn!(%error, "parallel pair scan failed, rescanning sequentially");
                self.scan_sequential(states)
            }
            Err(_) => {
                tracing::warn!("pair scan scope panicked, rescanning sequentially");
                self.scan_sequential(states)
            }
        }
    }

    /// Encontra pares correlacionados
    ///
    /// Greedy por correlação decrescente: cada estado entra em no máximo
    /// um par.
    pub fn find_pairs(&self, states: &[StateVector]) -> Vec<EntanglementPair> {
        if states.len() < self.config.min_states {
            tracing::debug!(states = states.len(), min = self.config.min_states, "entanglement detection skipped");
            return Vec::new();
        }
        let scanned = &states[..states.len().min(self.config.max_states)];

        let mut candidates = self.scan(scanned);
        candidates.sort_by(by_strength);

        let max_pairs = self.config.max_pairs();
        let mut used = vec![false; scanned.len()];
        let mut pairs = Vec::new();

        for (i, j, correlation) in candidates {
            if pairs.len() >= max_pairs {
                break;
            }
            if used[i] || used[j] {
                continue;
            }
            used[i] = true;
            used[j] = true;

            let (a, b) = (&scanned[i], &scanned[j]);
            pairs.push(EntanglementPair {
                entanglement_id: EntanglementPair::pair_id(i, j),
                shared_information: self.shared_information_for(a, b),
                state_a: a.clone(),
                state_b: b.clone(),
                index_a: i,
                index_b: j,
                correlation_strength: correlation,
                phase_shift: EntanglementPair::phase_shift_for(correlation),
            });
        }

        tracing::debug!(
            scanned = scanned.len(),
            pairs = pairs.len(),
            cache_entries = self.cache.len(),
            "entanglement pairs detected"
        );
        pairs
    }

    // =========================================================================
    // Informação compartilhada
    // =========================================================================

    /// Padrão compartilhado de um par
    ///
    /// Para cada índice comum onde as probabilidades concordam dentro da
    /// tolerância: média × 255. Zeros finais são descartados.
    pub fn shared_information_for(&self, a: &StateVector, b: &StateVector) -> Vec<u8> {
        let (pa, pb) = (a.probabilities(), b.probabilities());
        let mut shared: Vec<u8> = pa
            .iter()
            .zip(&pb)
            .map(|(&p, &q)| {
                if (p - q).abs() <= self.config.agreement_tolerance {
                    quantize((p + q) / 2.0)
                } else {
                    0
                }
            })
            .collect();
        trim_trailing_zeros(&mut shared);
        shared
    }

    /// Padrão compartilhado agregado sobre todos os pares
    pub fn extract_shared_information(&self, pairs: &[EntanglementPair]) -> Vec<u8> {
        let width = pairs
            .iter()
            .map(|p| p.state_a.len().min(p.state_b.len()))
            .max()
            .unwrap_or(0);

        let mut sums = vec![0.0; width];
        let mut counts = vec![0usize; width];
        for pair in pairs {
            let (pa, pb) = (pair.state_a.probabilities(), pair.state_b.probabilities());
            for (k, (&p, &q)) in pa.iter().zip(&pb).enumerate() {
                if (p - q).abs() <= self.config.agreement_tolerance {
                    sums[k] += (p + q) / 2.0;
                    counts[k] += 1;
                }
            }
        }

        let mut shared: Vec<u8> = sums
            .iter()
            .zip(&counts)
            .map(|(&sum, &count)| if count == 0 { 0 } else { quantize(sum / count as f64) })
            .collect();
        trim_trailing_zeros(&mut shared);
        shared
    }

    // =========================================================================
    // Qualidade
    // =========================================================================

    /// Separa pares abaixo do piso de qualidade
    pub fn validate_quality(&self, pairs: &[EntanglementPair]) -> QualityReport {
        let floor = self.config.quality_floor;
        let mut report = QualityReport::default();

        for pair in pairs {
            let consistent = pair.correlation_strength.is_finite()
                && (0.0..=1.0).contains(&pair.correlation_strength)
                && pair.state_a.len() == pair.state_b.len();
            if consistent && pair.correlation_strength >= floor {
                report.valid_pairs.push(pair.clone());
            } else {
                report.invalid_pairs.push(pair.clone());
            }
        }

        if !pairs.is_empty() && report.acceptance_rate() < 0.5 {
            report.suggestions.push(format!(
                "less than half of the pairs reach the quality floor {:.2}; consider raising interference_threshold",
                floor
            ));
        }
        if report.invalid_pairs.iter().any(|p| p.state_a.len() != p.state_b.len()) {
            report
                .suggestions
                .push("pairs with mismatched widths found; use a uniform chunk size".to_string());
        }
        if pairs.len() >= self.config.max_pairs() {
            report.suggestions.push(format!(
                "pair cap {} reached; raise max_entanglement_level to detect more pairs",
                self.config.max_pairs()
            ));
        }
        report
    }

    // =========================================================================
    // Transformação
    // =========================================================================

    fn check_indices(pair: &EntanglementPair, len: usize) -> EntanglementResult<()> {
        for index in [pair.index_a, pair.index_b] {
            if index >= len {
                return Err(EntanglementError::IndexOutOfRange {
                    pair_id: pair.entanglement_id.clone(),
                    index,
                    len,
                });
            }
        }
        if pair.index_a == pair.index_b {
            return Err(EntanglementError::InvalidPair(format!(
                "{} links state {} to itself",
                pair.entanglement_id, pair.index_a
            )));
        }
        Ok(())
    }

    /// Transformação direta: marca os dois estados e rotaciona `state_b`
    pub fn entangle(&self, states: &mut [StateVector], pairs: &[EntanglementPair]) -> EntanglementResult<()> {
        for pair in pairs {
            Self::check_indices(pair, states.len())?;
        }
        for pair in pairs {
            states[pair.index_a].set_entanglement_id(Some(pair.entanglement_id.clone()));
            let b = &mut states[pair.index_b];
            b.set_entanglement_id(Some(pair.entanglement_id.clone()));
            b.rotate(pair.phase_shift);
        }
        Ok(())
    }

    /// Inversa de [`entangle`](Self::entangle)
    ///
    /// A rotação é re-derivada de `correlation_strength`.
    pub fn disentangle(&self, states: &mut [StateVector], pairs: &[EntanglementPair]) -> EntanglementResult<()> {
        for pair in pairs {
            Self::check_indices(pair, states.len())?;
        }
        for pair in pairs.iter().rev() {
            states[pair.index_a].set_entanglement_id(None);
            let b = &mut states[pair.index_b];
            b.rotate(-EntanglementPair::phase_shift_for(pair.correlation_strength));
            b.set_entanglement_id(None);
        }
        Ok(())
    }
}

impl QscComponent for EntanglementAnalyzer {
    fn name(&self) -> &str {
        "EntanglementAnalyzer"
    }

    fn step(&self) -> ProgressStep {
        ProgressStep::EntanglementDetection
    }
}

fn quantize(probability: f64) -> u8 {
    (probability.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn trim_trailing_zeros(bytes: &mut Vec<u8>) {
    while bytes.last() == Some(&0) {
        bytes.pop();
    }
}
