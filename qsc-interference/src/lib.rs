//! # 🌊 qsc-interference: Interferência Reversível
//!
//! Reforça (construtiva) ou atenua (destrutiva) amplitudes em pares de
//! estados correlacionados, registrando cada alteração para que a
//! descompressão possa revertê-la.
//!
//! ## Ciclo
//!
//! ```text
//! iteração k:
//!   até max_pairs pares (i, j), i < j, retomando do último examinado
//!     correlação > 0.3 ?          → oportunidade
//!     candidatos: construtivo (média ≥ c) | destrutivo (média ≤ d),
//!                 restritos ao foco da superposição quando guiado
//!     escolhe maior Σ|a|           → aceita se correlação ≥ threshold
//!     escala + rotação + renormalização
//!   melhoria do score < 0.001 ?   → plateau, para
//! ```
//!
//! ## Reversão
//!
//! Do padrão mais recente ao mais antigo: escala inversa
//! (`1/max(1.01, fator)` ou `1/max(0.01, 1 − supressão)`) e fase negada.
//! Dentro dos clamps a inversa é exata a menos de arredondamento. O log é
//! validado inteiro antes de qualquer estado ser alterado.

pub mod error;
pub mod optimizer;
pub mod pattern;
pub mod profile;

pub use error::{InterferenceError, InterferenceResult};
pub use optimizer::{
    InterferenceConfig, InterferenceFocus, InterferenceMetrics, InterferenceOptimizer, OptimizationOutcome,
    ThresholdRecommendation,
    OPPORTUNITY_CORRELATION, PLATEAU_EPSILON,
};
pub use pattern::{InterferenceKind, InterferencePattern, OptimizedPattern};
pub use profile::{InterferenceProfile, ProfileParameters};

#[cfg(test)]
mod tests;
