//! # 🔗 qsc-entanglement: Pares Correlacionados
//!
//! Detecta pares de estados com distribuições de probabilidade
//! correlacionadas e aplica uma rotação de fase reversível ao segundo
//! estado de cada par.
//!
//! ## Fluxo
//!
//! ```text
//! estados ──► correlation(i, j) ──► candidatos ≥ threshold
//!                 │ (cache)                │
//!                 ▼                        ▼ greedy, ≤ level × 8
//!          CorrelationCache         EntanglementPair { ent-i-j }
//!                                          │
//!                     entangle: rotate(state_b, c·π/4)
//!                     disentangle: rotate(state_b, −c·π/4)
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use qsc_core::prelude::*;
//! use qsc_entanglement::EntanglementAnalyzer;
//!
//! let converter = StateConverter::default();
//! let mut states = converter.to_states(b"abababababababab", 4, 8).unwrap();
//! let analyzer = EntanglementAnalyzer::default();
//! let pairs = analyzer.find_pairs(&states);
//! assert!(!pairs.is_empty());
//!
//! analyzer.entangle(&mut states, &pairs).unwrap();
//! analyzer.disentangle(&mut states, &pairs).unwrap();
//! assert!(states.iter().all(|s| s.entanglement_id().is_none()));
//! ```

pub mod analyzer;
pub mod cache;
pub mod error;
pub mod pair;

pub use analyzer::{EntanglementAnalyzer, EntanglementConfig, PAIRS_PER_LEVEL};
pub use cache::{CacheStats, CorrelationCache, DEFAULT_CACHE_CAPACITY};
pub use error::{EntanglementError, EntanglementResult};
pub use pair::{EntanglementPair, QualityReport};
