//! # 🎯 Traits: Abstrações compartilhadas pelos passes
//!
//! | Item | Uso |
//! |:-----|:----|
//! | [`QscComponent`] | identidade de cada pass (nome, etapa, versão) |
//! | [`ProgressStep`] | chaves de progresso consumidas pela camada HTTP |
//! | [`PipelineEvent`] | eventos chave-valor emitidos pelo engine |
//! | [`EventSink`] | destino injetado dos eventos (default: [`NoopSink`]) |
//!
//! O core nunca escreve em stdout; métricas saem por um sink injetado.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// Componente do pipeline
pub trait QscComponent: Send + Sync + Debug {
    /// Nome único do componente (para logs e debug)
    fn name(&self) -> &str;

    /// Etapa de progresso que este componente atende
    fn step(&self) -> ProgressStep;

    /// Versão do componente (para compatibilidade)
    fn version(&self) -> &str {
        "2026.1.16"
    }

    /// Componente está pronto para uso?
    fn is_ready(&self) -> bool {
        true
    }
}

/// Operação em andamento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Compress,
    Decompress,
}

/// Etapas de progresso
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStep {
    Initialization,
    DataAnalysis,
    QuantumStatePreparation,
    SuperpositionAnalysis,
    EntanglementDetection,
    InterferenceOptimization,
    DataEncoding,
    IntegrityVerification,
    InterferenceReversal,
    EntanglementReversal,
    StateCollapse,
    StateReconstruction,
    DataDecoding,
}

impl ProgressStep {
    /// Chave estável usada nos eventos de progresso
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initialization => "initialization",
            Self::DataAnalysis => "data_analysis",
            Self::QuantumStatePreparation => "quantum_state_preparation",
            Self::SuperpositionAnalysis => "superposition_analysis",
            Self::EntanglementDetection => "entanglement_detection",
            Self::InterferenceOptimization => "interference_optimization",
            Self::DataEncoding => "data_encoding",
            Self::IntegrityVerification => "integrity_verification",
            Self::InterferenceReversal => "interference_reversal",
            Self::EntanglementReversal => "entanglement_reversal",
            Self::StateCollapse => "state_collapse",
            Self::StateReconstruction => "state_reconstruction",
            Self::DataDecoding => "data_decoding",
        }
    }

    /// Etapas de compressão, em ordem
    pub fn compression_steps() -> [ProgressStep; 7] {
        [
            Self::Initialization,
            Self::DataAnalysis,
            Self::QuantumStatePreparation,
            Self::SuperpositionAnalysis,
            Self::EntanglementDetection,
            Self::InterferenceOptimization,
            Self::DataEncoding,
        ]
    }

    /// Etapas de descompressão (espelho), em ordem
    pub fn decompression_steps() -> [ProgressStep; 7] {
        [
            Self::Initialization,
            Self::IntegrityVerification,
            Self::InterferenceReversal,
            Self::EntanglementReversal,
            Self::StateCollapse,
            Self::StateReconstruction,
            Self::DataDecoding,
        ]
    }
}

impl fmt::Display for ProgressStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evento emitido pelo engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// Etapa iniciada
    StepStarted {
        operation: Operation,
        step: ProgressStep,
    },
    /// Progresso local da etapa ∈ [0, 1]
    StepProgress {
        operation: Operation,
        step: ProgressStep,
        progress: f64,
    },
    /// Etapa concluída
    StepCompleted {
        operation: Operation,
        step: ProgressStep,
        elapsed_us: u64,
    },
    /// Métrica chave-valor
    Metric { key: String, value: f64 },
    /// Estratégia de fallback escolhida
    FallbackSelected { strategy: String, reason: String },
    /// Aviso não-fatal
    Warning { message: String },
}

/// Destino de eventos do pipeline
pub trait EventSink: Send + Sync {
    fn record(&self, event: &PipelineEvent);
}

/// Sink que descarta tudo
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn record(&self, _event: &PipelineEvent) {}
}

impl<F> EventSink for F
where
    F: Fn(&PipelineEvent) + Send + Sync,
{
    fn record(&self, event: &PipelineEvent) {
        self(event)
    }
}
