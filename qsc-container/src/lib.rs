//! # 📦 qsc-container: Container Comprimido
//!
//! Resultado imutável de uma compressão: estados, pares, log de
//! interferência e metadados tipados, selados por um checksum SHA-256.
//!
//! ## Invariante
//!
//! ```text
//! checksum == sha256(canonical(states) ‖ canonical(pares por id) ‖ payload)
//! ```
//!
//! Containers quânticos têm payload vazio; containers de fallback guardam
//! o payload do codec em [`Encoding`].
//!
//! ## Formatos
//!
//! | Formato | API | Uso |
//! |:--------|:----|:----|
//! | JSON | `to_json` / `from_json` | inspeção, auto-descritivo |
//! | Binário | `to_bytes` / `from_bytes` | armazenamento; define `compressed_size` |

pub mod checksum;
pub mod container;
pub mod error;
pub mod metadata;
pub mod wire;

pub use container::{CompressedContainer, ContainerBuilder, ContainerStats, CONTAINER_VERSION};
pub use error::{ContainerError, ContainerResult};
pub use metadata::{ContainerMetadata, Encoding};
pub use wire::{HEADER_SIZE, MAGIC};

#[cfg(test)]
mod tests;
