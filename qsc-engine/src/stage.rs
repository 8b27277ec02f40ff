//! Máquina de estágios da compressão

use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Estágio da compressão
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionStage {
    Preparing,
    Superposing,
    Entangling,
    Interfering,
    Encoding,
    /// Container quântico aceito
    Succeeded,
    /// Codec de fallback escolhido
    FallbackEncoding,
    Done,
}

impl CompressionStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preparing => "preparing",
            Self::Superposing => "superposing",
            Self::Entangling => "entangling",
            Self::Interfering => "interfering",
            Self::Encoding => "encoding",
            Self::Succeeded => "succeeded",
            Self::FallbackEncoding => "fallback_encoding",
            Self::Done => "done",
        }
    }

    /// Próximo estágio do caminho feliz
    pub fn next(&self) -> Option<CompressionStage> {
        match self {
            Self::Preparing => Some(Self::Superposing),
            Self::Superposing => Some(Self::Entangling),
            Self::Entangling => Some(Self::Interfering),
            Self::Interfering => Some(Self::Encoding),
            Self::Encoding => Some(Self::Succeeded),
            Self::Succeeded | Self::FallbackEncoding => Some(Self::Done),
            Self::Done => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Transição permitida?
    ///
    /// Qualquer estágio anterior a `Succeeded` pode degradar para
    /// `FallbackEncoding`.
    pub fn can_transition_to(&self, to: CompressionStage) -> bool {
        if self.next() == Some(to) {
            return true;
        }
        to == Self::FallbackEncoding && *self <= Self::Encoding
    }
}

impl fmt::Display for CompressionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Máquina de estágios de uma compressão
#[derive(Debug, Clone)]
pub struct StageMachine {
    current: CompressionStage,
    history: Vec<CompressionStage>,
}

impl Default for StageMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StageMachine {
    pub fn new() -> Self {
        Self {
            current: CompressionStage::Preparing,
            history: vec![CompressionStage::Preparing],
        }
    }

    pub fn current(&self) -> CompressionStage {
        self.current
    }

    /// Estágios visitados, em ordem
    pub fn history(&self) -> &[CompressionStage] {
        &self.history
    }

    /// Avança para `to` ou falha com `TransformError`
    pub fn advance(&mut self, to: CompressionStage) -> EngineResult<()> {
        if !self.current.can_transition_to(to) {
            return Err(EngineError::TransformError {
                operation: "compress",
                stage: self.current.to_string(),
                detail: format!("illegal stage transition {} -> {}", self.current, to),
            });
        }
        tracing::trace!(from = %self.current, to = %to, "stage transition");
        self.current = to;
        self.history.push(to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut m = StageMachine::new();
        let mut stage = m.current();
        while let Some(next) = stage.next() {
            m.advance(next).unwrap();
            stage = next;
        }
        assert!(m.current().is_terminal());
        assert_eq!(m.history().len(), 7);
    }

    #[test]
    fn test_degradation_from_any_working_stage() {
        for from in [
            CompressionStage::Preparing,
            CompressionStage::Superposing,
            CompressionStage::Entangling,
            CompressionStage::Interfering,
            CompressionStage::Encoding,
        ] {
            assert!(from.can_transition_to(CompressionStage::FallbackEncoding));
        }
        assert!(!CompressionStage::Succeeded.can_transition_to(CompressionStage::FallbackEncoding));
    }

    #[test]
    fn test_illegal_transition() {
        let mut m = StageMachine::new();
        let err = m.advance(CompressionStage::Encoding).unwrap_err();
        assert!(matches!(err, EngineError::TransformError { ref stage, .. } if stage == "preparing"));
        assert_eq!(m.current(), CompressionStage::Preparing);
    }
}
