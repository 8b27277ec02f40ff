//! # Prelude: Re-exportações Convenientes
//!
//! ```
//! use qsc_core::prelude::*;
//! ```

// Primitivos
pub use crate::complex::Complex;
pub use crate::state::{normalize_phase, StateVector, NORMALIZATION_TOLERANCE};

// Conversão
pub use crate::converter::{ConversionParameters, ConverterConfig, StateConverter};

// Configuração
pub use crate::config::CompressionConfig;

// Traits e eventos
pub use crate::traits::{EventSink, NoopSink, Operation, PipelineEvent, ProgressStep, QscComponent};

// Erros
pub use crate::error::{CoreError, CoreResult};
