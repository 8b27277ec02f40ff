//! # 🔀 qsc-superposition: Combinação Ponderada de Estados
//!
//! Combina N estados em uma superposição ponderada e extrai os índices de
//! amplitude mais prováveis como padrões.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │           SuperpositionProcessor                │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  combine: Σ wᵢ·aᵢ → normaliza             │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  extract_patterns: |cₖ|² ≥ threshold      │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  process_groups: workers independentes    │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  superpose_hierarchical: árvore de níveis │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! Pesos default: `1/(1 + entropia) + variância`, normalizados. Estados
//! concentrados pesam mais que estados uniformes.
//!
//! ## Exemplo
//!
//! ```
//! use qsc_core::prelude::*;
//! use qsc_superposition::SuperpositionProcessor;
//!
//! let converter = StateConverter::default();
//! let states = converter.to_states(b"abcdabcd", 4, 8).unwrap();
//! let processor = SuperpositionProcessor::new();
//! let sup = processor.combine(&states, None).unwrap();
//! assert_eq!(sup.constituent_count(), 2);
//! let patterns = processor.extract_patterns(&sup);
//! assert!(!patterns.is_empty());
//! ```

pub mod error;
pub mod processor;
pub mod superposition;

pub use error::{SuperpositionError, SuperpositionResult};
pub use processor::{SuperpositionConfig, SuperpositionProcessor};
pub use superposition::{
    GroupFailure, GroupProcessingResult, PatternProbability, Superposition, SuperpositionMetrics,
};

#[cfg(test)]
mod tests;
