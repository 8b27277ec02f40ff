//! # Compression Engine
//!
//! Orquestra os passes e aplica a regra de fallback.
//!
//! ```text
//! bytes ─► converter ─► superposição ─► entanglement ─► interferência ─► container
//!   │                                                                       │
//!   │                                    inversa de teste ◄─────────────────┘
//!   └──► classical / hybrid / pattern_run ──► regra de fallback ──► container final
//! ```
//!
//! Regra (em ordem):
//!
//! 1. razão clássica ≥ `classical_ratio_threshold` → melhor de classical/hybrid
//! 2. candidato quântico verificado e menor que a entrada
//! 3. menor codec que encolhe (classical, hybrid, pattern_run)
//! 4. emergency; `forced = true` se nem ele encolhe
//!
//! Os passos 1 e 3 só aceitam containers empacotados menores que a entrada.
//!
//! Os padrões da superposição (grupos e hierarquia) definem o foco da
//! interferência: construtiva só nos índices dominantes, destrutiva só nos
//! desprezíveis.

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::stage::{CompressionStage, StageMachine};
use qsc_container::{CompressedContainer, ContainerBuilder, Encoding};
use qsc_core::prelude::*;
use qsc_entanglement::{CacheStats, EntanglementAnalyzer, EntanglementPair};
use qsc_fallback::{codec_for, ClassicalCodec, CodecCandidate, EmergencyCodec, FallbackCodec, FallbackStrategy};
use qsc_interference::{InterferenceFocus, InterferenceOptimizer};
use qsc_superposition::SuperpositionProcessor;
use std::sync::Arc;
use std::time::Instant;

/// Emissor de progresso de uma operação
struct Progress<'a> {
    sink: &'a dyn EventSink,
    operation: Operation,
}

impl<'a> Progress<'a> {
    fn new(sink: &'a dyn EventSink, operation: Operation) -> Self {
        Self { sink, operation }
    }

    fn start(&self, step: ProgressStep) -> Instant {
        tracing::debug!(operation = ?self.operation, step = step.as_str(), "step started");
        self.sink.record(&PipelineEvent::StepStarted {
            operation: self.operation,
            step,
        });
        Instant::now()
    }

    fn advance(&self, step: ProgressStep, progress: f64) {
        self.sink.record(&PipelineEvent::StepProgress {
            operation: self.operation,
            step,
            progress: progress.clamp(0.0, 1.0),
        });
    }

    fn complete(&self, step: ProgressStep, started: Instant) {
        let elapsed_us = started.elapsed().as_micros() as u64;
        self.advance(step, 1.0);
        self.sink.record(&PipelineEvent::StepCompleted {
            operation: self.operation,
            step,
            elapsed_us,
        });
        tracing::debug!(operation = ?self.operation, step = step.as_str(), elapsed_us, "step completed");
    }

    fn metric(&self, key: &str, value: f64) {
        self.sink.record(&PipelineEvent::Metric {
            key: key.to_string(),
            value,
        });
    }

    fn warning(&self, message: String) {
        self.sink.record(&PipelineEvent::Warning { message });
    }

    fn fallback(&self, strategy: &str, reason: &str) {
        self.sink.record(&PipelineEvent::FallbackSelected {
            strategy: strategy.to_string(),
            reason: reason.to_string(),
        });
    }
}

/// Container candidato de um codec clássico
struct Candidate {
    strategy: FallbackStrategy,
    ratio: f64,
    container: CompressedContainer,
}

impl Candidate {
    fn packed_size(&self) -> u64 {
        self.container.metadata().compressed_size
    }
}

/// Remove o menor candidato permitido que encolhe a entrada
fn take_smallest(
    candidates: &mut Vec<Candidate>,
    input: u64,
    allowed: impl Fn(FallbackStrategy) -> bool,
) -> Option<Candidate> {
    let index = candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| allowed(c.strategy) && c.packed_size() < input)
        .min_by_key(|(_, c)| c.packed_size())
        .map(|(i, _)| i)?;
    Some(candidates.remove(index))
}

fn encoding_for(strategy: FallbackStrategy, payload: Vec<u8>, forced: bool) -> Encoding {
    match strategy {
        FallbackStrategy::Classical => Encoding::Classical { payload },
        FallbackStrategy::Hybrid => Encoding::Hybrid { payload },
        FallbackStrategy::PatternRun => Encoding::PatternRun { payload },
        FallbackStrategy::Emergency => Encoding::Emergency { payload, forced },
    }
}

fn strategy_for(encoding: &Encoding) -> Option<FallbackStrategy> {
    match encoding {
        Encoding::Quantum => None,
        Encoding::Classical { .. } => Some(FallbackStrategy::Classical),
        Encoding::Hybrid { .. } => Some(FallbackStrategy::Hybrid),
        Encoding::PatternRun { .. } => Some(FallbackStrategy::PatternRun),
        Encoding::Emergency { .. } => Some(FallbackStrategy::Emergency),
    }
}

/// Engine de compressão
pub struct CompressionEngine {
    config: EngineConfig,
    converter: StateConverter,
    superposition: SuperpositionProcessor,
    entanglement: EntanglementAnalyzer,
    interference: InterferenceOptimizer,
    sink: Arc<dyn EventSink>,
}

impl CompressionEngine {
    /// Cria engine a partir dos quatro parâmetros de compressão
    pub fn new(config: CompressionConfig) -> EngineResult<Self> {
        Self::with_config(EngineConfig::from_compression(config))
    }

    /// Cria engine com configuração por pass
    pub fn with_config(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let interference = InterferenceOptimizer::new(config.interference).map_err(|e| EngineError::InvalidInput {
            operation: "configure",
            reason: e.to_string(),
        })?;

        Ok(Self {
            converter: StateConverter::from_compression(&config.compression),
            superposition: SuperpositionProcessor::with_config(config.superposition),
            entanglement: EntanglementAnalyzer::new(config.entanglement),
            interference,
            sink: Arc::new(NoopSink),
            config,
        })
    }

    /// Configuração vinda do ambiente (`QSC_*`, `.env`)
    pub fn from_env() -> EngineResult<Self> {
        Self::with_config(EngineConfig::from_env()?)
    }

    /// Injeta o destino dos eventos de progresso
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Estatísticas do cache de correlação
    ///
    /// O cache é limitado (`EntanglementConfig::cache_capacity`) e persiste
    /// entre compressões.
    pub fn cache_stats(&self) -> CacheStats {
        self.entanglement.cache_stats()
    }

    /// Esvazia o cache de correlação
    pub fn clear_cache(&self) {
        self.entanglement.clear_cache();
    }

    // =========================================================================
    // Compressão
    // =========================================================================

    /// Comprime `bytes` aplicando a regra de fallback
    ///
    /// O container devolvido sempre encolhe a entrada, exceto quando é
    /// `Emergency { forced: true }`.
    pub fn compress(&self, bytes: &[u8]) -> EngineResult<CompressedContainer> {
        let started = Instant::now();
        let progress = Progress::new(self.sink.as_ref(), Operation::Compress);
        self.initialize(bytes, &progress)?;

        let mut machine = StageMachine::new();
        let forward = self.forward(bytes, &mut machine, &progress);
        let container = self.settle(bytes, forward, &mut machine, &progress, &ClassicalCodec::fast())?;

        let ratio = container.metadata().compression_ratio();
        progress.metric("compression_ratio", ratio);
        tracing::info!(
            strategy = container.encoding().strategy(),
            original = bytes.len(),
            packed = container.metadata().compressed_size,
            ratio,
            elapsed_us = started.elapsed().as_micros() as u64,
            "compression finished"
        );
        Ok(container)
    }

    /// Apenas o caminho quântico, sem regra de fallback nem verificação
    pub fn compress_quantum(&self, bytes: &[u8]) -> EngineResult<CompressedContainer> {
        let progress = Progress::new(self.sink.as_ref(), Operation::Compress);
        self.initialize(bytes, &progress)?;

        let mut machine = StageMachine::new();
        self.forward(bytes, &mut machine, &progress)
    }

    /// Container final a partir do resultado do caminho quântico
    ///
    /// Se o caminho quântico falhou, `degraded` é o único candidato.
    fn settle(
        &self,
        bytes: &[u8],
        forward: EngineResult<CompressedContainer>,
        machine: &mut StageMachine,
        progress: &Progress<'_>,
        degraded: &dyn FallbackCodec,
    ) -> EngineResult<CompressedContainer> {
        let (container, reason) = match forward {
            Ok(quantum) => {
                let verified = !self.config.verify_quantum || self.verify(&quantum, bytes);
                progress.metric("quantum_verified", if verified { 1.0 } else { 0.0 });
                progress.metric("quantum_packed_size", quantum.metadata().compressed_size as f64);

                let candidates = self.classical_candidates(bytes, progress);
                self.select(bytes, verified.then_some(quantum), candidates, progress)?
            }
            Err(error) => {
                tracing::warn!(%error, stage = %machine.current(), "quantum path failed; degrading to fast deflate");
                progress.warning(format!("quantum path failed: {}", error));
                let candidates = self.degraded_candidates(bytes, &error, degraded)?;
                self.select(bytes, None, candidates, progress)?
            }
        };

        if container.encoding().is_quantum() {
            machine.advance(CompressionStage::Succeeded)?;
        } else {
            machine.advance(CompressionStage::FallbackEncoding)?;
            progress.fallback(container.encoding().strategy(), &reason);
        }
        machine.advance(CompressionStage::Done)?;
        Ok(container)
    }

    /// Comprime e empacota no formato binário
    pub fn compress_to_bytes(&self, bytes: &[u8]) -> EngineResult<Vec<u8>> {
        Ok(self.compress(bytes)?.to_bytes())
    }

    fn initialize(&self, bytes: &[u8], progress: &Progress<'_>) -> EngineResult<()> {
        let step = progress.start(ProgressStep::Initialization);
        if bytes.is_empty() {
            return Err(EngineError::InvalidInput {
                operation: "compress",
                reason: "empty input".into(),
            });
        }
        progress.metric("original_size", bytes.len() as f64);
        progress.complete(ProgressStep::Initialization, step);
        Ok(())
    }

    /// Caminho direto: converter → superpor → emaranhar → interferir → codificar
    fn forward(
        &self,
        bytes: &[u8],
        machine: &mut StageMachine,
        progress: &Progress<'_>,
    ) -> EngineResult<CompressedContainer> {
        const OP: &str = "compress";

        let step = progress.start(ProgressStep::DataAnalysis);
        let params = self.converter.choose_parameters(bytes);
        progress.metric("entropy", params.entropy);
        progress.metric("chunk_size", params.chunk_size as f64);
        progress.metric("bit_depth", params.bit_depth as f64);
        progress.complete(ProgressStep::DataAnalysis, step);

        let step = progress.start(ProgressStep::QuantumStatePreparation);
        let mut states = self
            .converter
            .to_states(bytes, params.chunk_size, params.bit_depth)
            .map_err(|e| EngineError::transform(OP, machine.current(), e))?;
        progress.metric("state_count", states.len() as f64);
        progress.complete(ProgressStep::QuantumStatePreparation, step);

        machine.advance(CompressionStage::Superposing)?;
        let step = progress.start(ProgressStep::SuperpositionAnalysis);
        let mut interference = self.interference.clone();
        let recommendation = interference.adjust_thresholds_adaptively(&states);
        progress.metric("mean_state_entropy", recommendation.mean_entropy);
        let focus = self.interference_focus(&states, &interference, progress);
        progress.complete(ProgressStep::SuperpositionAnalysis, step);

        machine.advance(CompressionStage::Entangling)?;
        let step = progress.start(ProgressStep::EntanglementDetection);
        let candidates = self.entanglement.find_pairs(&states);
        progress.advance(ProgressStep::EntanglementDetection, 0.5);
        let report = self.entanglement.validate_quality(&candidates);
        for suggestion in &report.suggestions {
            tracing::debug!(%suggestion, "entanglement quality");
        }
        progress.metric("entanglement_candidates", candidates.len() as f64);
        progress.metric("entanglement_acceptance", report.acceptance_rate());
        let pairs = report.valid_pairs;
        self.entanglement
            .entangle(&mut states, &pairs)
            .map_err(|e| EngineError::transform(OP, machine.current(), e))?;
        progress.metric("entanglement_pairs", pairs.len() as f64);
        progress.complete(ProgressStep::EntanglementDetection, step);

        machine.advance(CompressionStage::Interfering)?;
        let step = progress.start(ProgressStep::InterferenceOptimization);
        let outcome = interference
            .optimize_guided(&states, &focus)
            .map_err(|e| EngineError::transform(OP, machine.current(), e))?;
        progress.metric("interference_patterns", outcome.patterns.len() as f64);
        progress.metric("interference_iterations", outcome.metrics.iterations as f64);
        progress.metric("interference_score", outcome.metrics.final_score);
        progress.complete(ProgressStep::InterferenceOptimization, step);

        machine.advance(CompressionStage::Encoding)?;
        let step = progress.start(ProgressStep::DataEncoding);
        let container = ContainerBuilder::new(bytes.len(), self.config.compression)
            .chunking(params.chunk_size, params.bit_depth)
            .states(outcome.states)
            .pairs(pairs)
            .patterns(outcome.patterns)
            .build()
            .map_err(|e| EngineError::transform(OP, machine.current(), e))?;
        progress.metric("packed_size", container.metadata().compressed_size as f64);
        progress.complete(ProgressStep::DataEncoding, step);

        Ok(container)
    }

    /// Foco da interferência a partir da superposição dos estados
    ///
    /// Padrões dominantes vêm dos grupos e da superposição hierárquica; o
    /// espectro da hierarquia decide os índices desprezíveis. Falha da
    /// hierarquia vira aviso e deixa só o foco construtivo dos grupos.
    fn interference_focus(
        &self,
        states: &[StateVector],
        interference: &InterferenceOptimizer,
        progress: &Progress<'_>,
    ) -> InterferenceFocus {
        let groups = self.superposition.group_states(states);
        let analysis = self.superposition.process_groups(&groups);
        for failure in &analysis.failures {
            progress.warning(format!(
                "superposition group {} skipped: {}",
                failure.group_index, failure.error
            ));
        }
        progress.metric("superposition_groups", analysis.metrics.group_count as f64);
        progress.metric("superposition_patterns", analysis.metrics.pattern_count as f64);
        progress.metric("coherence_time", analysis.metrics.mean_coherence_time);
        progress.advance(ProgressStep::SuperpositionAnalysis, 0.5);

        let mut dominant = analysis.all_patterns();
        let spectrum = match self.superposition.superpose_hierarchical(states) {
            Ok(global) => {
                progress.metric("superposition_depth", global.depth as f64);
                dominant.extend(self.superposition.extract_patterns(&global));
                global.pattern_probabilities()
            }
            Err(error) => {
                progress.warning(format!("hierarchical superposition skipped: {}", error));
                Vec::new()
            }
        };

        let focus = interference.focus(&dominant, &spectrum);
        progress.metric("focus_constructive", focus.constructive.len() as f64);
        progress.metric("focus_destructive", focus.destructive.len() as f64);
        tracing::debug!(
            constructive = ?focus.constructive,
            destructive = ?focus.destructive,
            "interference focus"
        );
        focus
    }

    /// Inversa de teste: o candidato quântico reproduz a entrada?
    fn verify(&self, container: &CompressedContainer, bytes: &[u8]) -> bool {
        let silent = Progress::new(&NoopSink, Operation::Decompress);
        match self.reconstruct(container, bytes.len(), &silent) {
            Ok(restored) if restored == bytes => true,
            Ok(restored) => {
                let first_diff = restored.iter().zip(bytes).position(|(a, b)| a != b);
                tracing::debug!(?first_diff, "quantum candidate does not reproduce input");
                false
            }
            Err(error) => {
                tracing::debug!(%error, "quantum candidate failed trial inverse");
                false
            }
        }
    }

    /// Classical, hybrid e pattern_run sobre os bytes originais
    fn classical_candidates(&self, bytes: &[u8], progress: &Progress<'_>) -> Vec<Candidate> {
        [FallbackStrategy::Classical, FallbackStrategy::Hybrid, FallbackStrategy::PatternRun]
            .into_iter()
            .filter_map(|strategy| {
                let codec = codec_for(strategy);
                match self.candidate(codec.as_ref(), bytes) {
                    Ok(candidate) => Some(candidate),
                    Err(error) => {
                        progress.warning(format!("{} codec failed: {}", strategy.as_str(), error));
                        None
                    }
                }
            })
            .collect()
    }

    /// Degradação: um único codec (deflate rápido), ou `FallbackExhausted`
    fn degraded_candidates(
        &self,
        bytes: &[u8],
        original: &EngineError,
        codec: &dyn FallbackCodec,
    ) -> EngineResult<Vec<Candidate>> {
        self.candidate(codec, bytes)
            .map(|candidate| vec![candidate])
            .map_err(|fallback| EngineError::FallbackExhausted {
                original: original.to_string(),
                fallback: fallback.to_string(),
            })
    }

    fn candidate(&self, codec: &dyn FallbackCodec, bytes: &[u8]) -> EngineResult<Candidate> {
        let evaluated = CodecCandidate::evaluate(codec, bytes).map_err(|e| {
            EngineError::transform("compress", CompressionStage::FallbackEncoding, e)
        })?;
        let container = self.fallback_container(bytes.len(), encoding_for(evaluated.strategy, evaluated.payload, false))?;
        Ok(Candidate {
            strategy: evaluated.strategy,
            ratio: evaluated.ratio,
            container,
        })
    }

    fn fallback_container(&self, original_size: usize, encoding: Encoding) -> EngineResult<CompressedContainer> {
        Ok(ContainerBuilder::new(original_size, self.config.compression)
            .encoding(encoding)
            .build()?)
    }

    /// Regra de fallback
    fn select(
        &self,
        bytes: &[u8],
        quantum: Option<CompressedContainer>,
        mut candidates: Vec<Candidate>,
        progress: &Progress<'_>,
    ) -> EngineResult<(CompressedContainer, String)> {
        let input = bytes.len() as u64;
        let threshold = self.config.classical_ratio_threshold;

        let classical_ratio = candidates
            .iter()
            .find(|c| c.strategy == FallbackStrategy::Classical)
            .map(|c| c.ratio)
            .unwrap_or(0.0);
        progress.metric("classical_ratio", classical_ratio);

        if classical_ratio >= threshold {
            let family = |s: FallbackStrategy| matches!(s, FallbackStrategy::Classical | FallbackStrategy::Hybrid);
            if let Some(best) = take_smallest(&mut candidates, input, family) {
                let reason = format!("classical ratio {:.3} >= {:.3}", classical_ratio, threshold);
                return Ok((best.container, reason));
            }
        }

        if let Some(quantum) = quantum.filter(|q| q.metadata().compressed_size < input) {
            return Ok((quantum, "quantum container verified and smaller than input".into()));
        }

        if let Some(best) = take_smallest(&mut candidates, input, |_| true) {
            let reason = format!("smallest shrinking codec ({:.3}x)", best.ratio);
            return Ok((best.container, reason));
        }

        let payload = EmergencyCodec.compress(bytes).map_err(|e| EngineError::FallbackExhausted {
            original: "no quantum or classical candidate shrinks the input".into(),
            fallback: e.to_string(),
        })?;
        let container = self.fallback_container(bytes.len(), encoding_for(FallbackStrategy::Emergency, payload.clone(), false))?;
        if container.metadata().compressed_size < input {
            Ok((container, "only the emergency codec shrinks the input".into()))
        } else {
            let container = self.fallback_container(bytes.len(), encoding_for(FallbackStrategy::Emergency, payload, true))?;
            tracing::warn!(
                original = bytes.len(),
                packed = container.metadata().compressed_size,
                "no strategy shrinks the input; storing forced emergency container"
            );
            progress.warning(format!(
                "forced emergency container: {} packed bytes for {} input bytes",
                container.metadata().compressed_size,
                bytes.len()
            ));
            Ok((container, "forced: no strategy shrinks the input".into()))
        }
    }

    // =========================================================================
    // Descompressão
    // =========================================================================

    /// Reconstrói os bytes originais
    ///
    /// Checksum divergente falha com `IntegrityError` antes de qualquer
    /// reconstrução. Erros aqui são fatais.
    pub fn decompress(&self, container: &CompressedContainer) -> EngineResult<Vec<u8>> {
        let started = Instant::now();
        let progress = Progress::new(self.sink.as_ref(), Operation::Decompress);

        let step = progress.start(ProgressStep::Initialization);
        let original = container.metadata().original_size;
        let expected = usize::try_from(original).map_err(|_| EngineError::InvalidInput {
            operation: "decompress",
            reason: format!("original size {} does not fit in memory", original),
        })?;
        progress.complete(ProgressStep::Initialization, step);

        let step = progress.start(ProgressStep::IntegrityVerification);
        container.verify_checksum()?;
        progress.complete(ProgressStep::IntegrityVerification, step);

        let bytes = self.reconstruct(container, expected, &progress)?;

        tracing::info!(
            strategy = container.encoding().strategy(),
            original = bytes.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "decompression finished"
        );
        Ok(bytes)
    }

    /// Desempacota o formato binário e descomprime
    pub fn decompress_bytes(&self, packed: &[u8]) -> EngineResult<Vec<u8>> {
        let container = CompressedContainer::from_bytes(packed)?;
        self.decompress(&container)
    }

    fn reconstruct(&self, container: &CompressedContainer, expected: usize, progress: &Progress<'_>) -> EngineResult<Vec<u8>> {
        let mut bytes = match strategy_for(container.encoding()) {
            None => self.inverse_quantum(container, progress)?,
            Some(strategy) => {
                let step = progress.start(ProgressStep::DataDecoding);
                let decoded = codec_for(strategy)
                    .decompress(container.encoding().payload(), expected)
                    .map_err(|e| EngineError::transform("decompress", ProgressStep::DataDecoding, e))?;
                progress.complete(ProgressStep::DataDecoding, step);
                decoded
            }
        };

        if bytes.len() < expected {
            return Err(EngineError::SizeMismatch {
                expected: expected as u64,
                actual: bytes.len() as u64,
            });
        }
        if !container.encoding().is_quantum() && bytes.len() != expected {
            return Err(EngineError::SizeMismatch {
                expected: expected as u64,
                actual: bytes.len() as u64,
            });
        }
        bytes.truncate(expected);
        Ok(bytes)
    }

    /// Inversa do caminho quântico sobre uma cópia dos estados
    fn inverse_quantum(&self, container: &CompressedContainer, progress: &Progress<'_>) -> EngineResult<Vec<u8>> {
        const OP: &str = "decompress";
        let config = container.metadata().config;
        let invalid = |reason: String| EngineError::InvalidInput { operation: OP, reason };

        config.validate().map_err(|e| invalid(e.to_string()))?;
        let interference = InterferenceOptimizer::from_compression(&config).map_err(|e| invalid(e.to_string()))?;
        let entanglement = EntanglementAnalyzer::from_compression(&config);
        let mut states = container.states().to_vec();

        let step = progress.start(ProgressStep::InterferenceReversal);
        interference
            .reverse_patterns(&mut states, container.interference_patterns())
            .map_err(|e| EngineError::transform(OP, ProgressStep::InterferenceReversal, e))?;
        progress.complete(ProgressStep::InterferenceReversal, step);

        let step = progress.start(ProgressStep::EntanglementReversal);
        let pairs: Vec<EntanglementPair> = container.pairs().cloned().collect();
        entanglement
            .disentangle(&mut states, &pairs)
            .map_err(|e| EngineError::transform(OP, ProgressStep::EntanglementReversal, e))?;
        progress.complete(ProgressStep::EntanglementReversal, step);

        let step = progress.start(ProgressStep::StateCollapse);
        let total = states.len().max(1) as f64;
        let mut collapsed = Vec::with_capacity(states.len());
        for (index, state) in states.iter().enumerate() {
            collapsed.push(
                self.converter
                    .collapse(state)
                    .map_err(|e| EngineError::transform(OP, ProgressStep::StateCollapse, e))?,
            );
            if index % 64 == 63 {
                progress.advance(ProgressStep::StateCollapse, (index + 1) as f64 / total);
            }
        }
        progress.complete(ProgressStep::StateCollapse, step);

        let step = progress.start(ProgressStep::StateReconstruction);
        let bytes = self
            .converter
            .to_bytes(&collapsed)
            .map_err(|e| EngineError::transform(OP, ProgressStep::StateReconstruction, e))?;
        progress.complete(ProgressStep::StateReconstruction, step);

        let step = progress.start(ProgressStep::DataDecoding);
        progress.metric("reconstructed_size", bytes.len() as f64);
        progress.complete(ProgressStep::DataDecoding, step);

        Ok(bytes)
    }
}

impl QscComponent for CompressionEngine {
    fn name(&self) -> &str {
        "CompressionEngine"
    }

    fn step(&self) -> ProgressStep {
        ProgressStep::Initialization
    }
}

impl std::fmt::Debug for CompressionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompressionEngine")
            .field("config", &self.config)
            .field("cache", &self.entanglement.cache_stats())
            .finish_non_exhaustive()
    }
}
