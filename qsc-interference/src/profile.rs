//! Perfis de interferência pré-definidos

use serde::{Deserialize, Serialize};

/// Perfil de thresholds e fatores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterferenceProfile {
    /// Poucas alterações, iterações curtas
    Conservative,
    #[default]
    Balanced,
    /// Thresholds largos e fatores altos
    Aggressive,
    /// Texto: distribuição concentrada em poucos símbolos
    TextOptimized,
    /// Binário: mais supressão, menos amplificação
    BinaryOptimized,
}

/// Parâmetros derivados de um perfil
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileParameters {
    pub constructive_threshold: f64,
    pub destructive_threshold: f64,
    pub amplification_factor: f64,
    pub suppression: f64,
    pub max_iterations: u32,
}

impl InterferenceProfile {
    pub fn parameters(&self) -> ProfileParameters {
        let (constructive_threshold, destructive_threshold, amplification_factor, suppression, max_iterations) =
            match self {
                Self::Conservative => (0.20, 0.05, 1.10, 0.10, 3),
                Self::Balanced => (0.15, 0.08, 1.25, 0.25, 5),
                Self::Aggressive => (0.12, 0.10, 1.50, 0.50, 10),
                Self::TextOptimized => (0.14, 0.07, 1.30, 0.20, 6),
                Self::BinaryOptimized => (0.18, 0.09, 1.15, 0.35, 4),
            };
        ProfileParameters {
            constructive_threshold,
            destructive_threshold,
            amplification_factor,
            suppression,
            max_iterations,
        }
    }

    pub fn all() -> [InterferenceProfile; 5] {
        [
            Self::Conservative,
            Self::Balanced,
            Self::Aggressive,
            Self::TextOptimized,
            Self::BinaryOptimized,
        ]
    }
}
