//! # 🌀 QSC-Core
//!
//! Núcleo do pipeline de compressão QSC (Quantum-State Compression).
//!
//! > *"Estados são vetores normalizados; toda transformação tem inversa registrada."*
//!
//! ## O Modelo
//!
//! 1. A entrada é particionada em **chunks**
//! 2. Cada chunk vira um **vetor de amplitudes complexas** normalizado
//! 3. Os passes (superposição, entanglement, interferência) analisam e
//!    reponderam os vetores
//! 4. O container registra tudo o que é preciso para **inverter** o caminho
//!
//! Nada aqui é simulação física: "quântico" nomeia um modelo matemático
//! determinístico usado como heurística de compressão.
//!
//! ## Computational Complexity
//!
//! - `to_states` / `to_bytes`: O(n) no número de bytes
//! - `StateVector::renormalize`, `rotate`, `scale_indices`: O(w), w = largura do chunk
//! - `choose_parameters`: O(n) (histograma) + O(256)
//!
//! ## Módulos
//!
//! - [`complex`]: número complexo imutável
//! - [`state`]: `StateVector` e invariantes de normalização
//! - [`converter`]: bytes ⇄ estados, escolha de parâmetros
//! - [`analysis`]: entropia e variância
//! - [`config`]: `CompressionConfig` (código, JSON ou ambiente)
//! - [`traits`]: `QscComponent`, etapas de progresso e sink de eventos
//!
//! ## Quick Start
//!
//! ```
//! use qsc_core::prelude::*;
//!
//! let converter = StateConverter::default();
//! let params = converter.choose_parameters(b"hello world");
//! let states = converter.to_states(b"hello world", params.chunk_size, params.bit_depth).unwrap();
//! let mut bytes = converter.to_bytes(&states).unwrap();
//! bytes.truncate(11);
//! assert_eq!(bytes, b"hello world");
//! ```

pub mod analysis;
pub mod complex;
pub mod config;
pub mod converter;
pub mod error;
pub mod prelude;
pub mod state;
pub mod traits;

// Re-exportações de nível superior
pub use complex::Complex;
pub use config::CompressionConfig;
pub use converter::{ConversionParameters, ConverterConfig, StateConverter, CARRIER};
pub use error::{CoreError, CoreResult};
pub use state::{normalize_phase, StateVector, NORMALIZATION_TOLERANCE};
pub use traits::{EventSink, NoopSink, Operation, PipelineEvent, ProgressStep, QscComponent};
