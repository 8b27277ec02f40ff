//! # ⚛️ qsc-engine: Compression Engine
//!
//! Orquestra os passes quânticos e garante, pela regra de fallback, que
//! a saída nunca cresce (salvo o container `Emergency` forçado).
//!
//! ## Arquitetura
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     CompressionEngine                        │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │  StageMachine                                          │  │
//! │  │  Preparing → Superposing → Entangling → Interfering    │  │
//! │  │  → Encoding → {Succeeded | FallbackEncoding} → Done    │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │  Fallback: classical | hybrid | pattern_run | emergency │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │  EventSink (NoopSink | EventBus)                       │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use qsc_engine::{CompressionConfig, CompressionEngine};
//!
//! let engine = CompressionEngine::new(CompressionConfig::default())?;
//! let data = b"quantum state compression ".repeat(20);
//!
//! let container = engine.compress(&data)?;
//! assert!(container.metadata().compressed_size < data.len() as u64);
//! assert_eq!(engine.decompress(&container)?, data);
//! # Ok::<(), qsc_engine::EngineError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod stage;

pub use config::{EngineConfig, CLASSICAL_RATIO_THRESHOLD};
pub use engine::CompressionEngine;
pub use error::{EngineError, EngineResult};
pub use events::{EventBus, EventFilter, EventHandler};
pub use stage::{CompressionStage, StageMachine};

// Re-exporta tipos usados na API pública
pub use qsc_container::{CompressedContainer, ContainerError, ContainerMetadata, Encoding};
pub use qsc_core::{CompressionConfig, EventSink, NoopSink, Operation, PipelineEvent, ProgressStep};
