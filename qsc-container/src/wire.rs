//! # Formatos de fio
//!
//! ## Binário empacotado (LE)
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ Header (56 bytes)                                    │
//! │  magic "QSCF" · version u16 · tag u8 · flags u8      │
//! │  original_size u64 · checksum [32] · timestamp u64   │
//! ├──────────────────────────────────────────────────────┤
//! │ Config: depth u8 · level u8 · complexity u32 ·       │
//! │         threshold f64 · chunk_size u32 · bit_depth u8│
//! ├──────────────────────────────────────────────────────┤
//! │ tag 0: estados · pares · padrões                     │
//! │ tag 1..4: payload (u32 + bytes)                      │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## JSON
//!
//! Serialização serde do container; o campo `version` é conferido antes
//! de qualquer outra coisa.

use crate::checksum::{self, CHECKSUM_LEN};
use crate::container::{CompressedContainer, CONTAINER_VERSION};
use crate::error::{ContainerError, ContainerResult};
use crate::metadata::{ContainerMetadata, Encoding};
use bytes::{Buf, BufMut, BytesMut};
use qsc_core::{Complex, CompressionConfig, StateVector};
use qsc_entanglement::EntanglementPair;
use qsc_interference::{InterferenceKind, InterferencePattern};
use std::collections::BTreeMap;

/// Magic: "QSCF"
pub const MAGIC: [u8; 4] = *b"QSCF";

/// Tamanho do header
pub const HEADER_SIZE: usize = 4 + 2 + 1 + 1 + 8 + CHECKSUM_LEN + 8;

const FLAG_FORCED: u8 = 0x01;

// ═══════════════════════════════════════════════════════════════════════════
// ESCRITA
// ═══════════════════════════════════════════════════════════════════════════

fn put_state(buf: &mut BytesMut, state: &StateVector) {
    buf.put_u32_le(state.len() as u32);
    for a in state.amplitudes() {
        buf.put_f64_le(a.re);
        buf.put_f64_le(a.im);
    }
    buf.put_f64_le(state.phase());
    match state.entanglement_id() {
        Some(id) => {
            buf.put_u8(1);
            put_str(buf, id);
        }
        None => buf.put_u8(0),
    }
}

fn put_str(buf: &mut BytesMut, text: &str) {
    buf.put_u32_le(text.len() as u32);
    buf.put_slice(text.as_bytes());
}

fn put_pair(buf: &mut BytesMut, pair: &EntanglementPair) {
    put_str(buf, &pair.entanglement_id);
    buf.put_u64_le(pair.index_a as u64);
    buf.put_u64_le(pair.index_b as u64);
    buf.put_f64_le(pair.correlation_strength);
    buf.put_f64_le(pair.phase_shift);
    buf.put_u32_le(pair.shared_information.len() as u32);
    buf.put_slice(&pair.shared_information);
    put_state(buf, &pair.state_a);
    put_state(buf, &pair.state_b);
}

fn put_pattern(buf: &mut BytesMut, pattern: &InterferencePattern) {
    buf.put_u8(match pattern.kind {
        InterferenceKind::Constructive => 0,
        InterferenceKind::Destructive => 1,
    });
    buf.put_f64_le(pattern.amplitude);
    buf.put_f64_le(pattern.phase);
    buf.put_u32_le(pattern.state_indices.len() as u32);
    for &i in &pattern.state_indices {
        buf.put_u64_le(i as u64);
    }
    buf.put_u32_le(pattern.amplitude_indices.len() as u32);
    for &i in &pattern.amplitude_indices {
        buf.put_u32_le(i as u32);
    }
    buf.put_u32_le(pattern.iteration);
}

/// Serializa no formato binário
pub fn encode(container: &CompressedContainer) -> Vec<u8> {
    let meta = container.metadata();
    let encoding = container.encoding();
    let mut buf = BytesMut::with_capacity(HEADER_SIZE + 32 + encoding.payload().len());

    buf.put_slice(&MAGIC);
    buf.put_u16_le(container.version());
    buf.put_u8(encoding.tag());
    buf.put_u8(if encoding.is_forced() { FLAG_FORCED } else { 0 });
    buf.put_u64_le(meta.original_size);
    // checksum inválido no container vira zeros: o decode acusa a divergência
    buf.put_slice(&checksum::decode_hex(container.checksum()).unwrap_or([0u8; CHECKSUM_LEN]));
    buf.put_u64_le(meta.timestamp);

    buf.put_u8(meta.config.quantum_bit_depth);
    buf.put_u8(meta.config.max_entanglement_level);
    buf.put_u32_le(meta.config.superposition_complexity as u32);
    buf.put_f64_le(meta.config.interference_threshold);
    buf.put_u32_le(meta.chunk_size as u32);
    buf.put_u8(meta.bit_depth);

    match encoding {
        Encoding::Quantum => {
            buf.put_u32_le(container.states().len() as u32);
            for state in container.states() {
                put_state(&mut buf, state);
            }
            buf.put_u32_le(container.entanglement_map().len() as u32);
            for pair in container.pairs() {
                put_pair(&mut buf, pair);
            }
            buf.put_u32_le(container.interference_patterns().len() as u32);
            for pattern in container.interference_patterns() {
                put_pattern(&mut buf, pattern);
            }
        }
        Encoding::Classical { payload }
        | Encoding::Hybrid { payload }
        | Encoding::PatternRun { payload }
        | Encoding::Emergency { payload, .. } => {
            buf.put_u32_le(payload.len() as u32);
            buf.put_slice(payload);
        }
    }

    buf.to_vec()
}

/// Tamanho do formato binário
pub fn packed_len(container: &CompressedContainer) -> usize {
    encode(container).len()
}

// ═══════════════════════════════════════════════════════════════════════════
// LEITURA
// ═══════════════════════════════════════════════════════════════════════════

/// Leitor com checagem de limites
struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    fn need(&self, field: &'static str, needed: usize) -> ContainerResult<()> {
        if self.buf.remaining() < needed {
            return Err(ContainerError::Truncated {
                field,
                needed,
                remaining: self.buf.remaining(),
            });
        }
        Ok(())
    }

    fn u8(&mut self, field: &'static str) -> ContainerResult<u8> {
        self.need(field, 1)?;
        Ok(self.buf.get_u8())
    }

    fn u16(&mut self, field: &'static str) -> ContainerResult<u16> {
        self.need(field, 2)?;
        Ok(self.buf.get_u16_le())
    }

    fn u32(&mut self, field: &'static str) -> ContainerResult<u32> {
        self.need(field, 4)?;
        Ok(self.buf.get_u32_le())
    }

    fn u64(&mut self, field: &'static str) -> ContainerResult<u64> {
        self.need(field, 8)?;
        Ok(self.buf.get_u64_le())
    }

    fn f64(&mut self, field: &'static str) -> ContainerResult<f64> {
        self.need(field, 8)?;
        Ok(self.buf.get_f64_le())
    }

    fn index(&mut self, field: &'static str) -> ContainerResult<usize> {
        let value = self.u64(field)?;
        usize::try_from(value).map_err(|_| ContainerError::Malformed(format!("{} {} overflows usize", field, value)))
    }

    fn bytes(&mut self, field: &'static str, len: usize) -> ContainerResult<Vec<u8>> {
        self.need(field, len)?;
        let out = self.buf[..len].to_vec();
        self.buf.advance(len);
        Ok(out)
    }

    fn string(&mut self, field: &'static str) -> ContainerResult<String> {
        let len = self.u32(field)? as usize;
        let raw = self.bytes(field, len)?;
        String::from_utf8(raw).map_err(|_| ContainerError::Malformed(format!("{} is not valid UTF-8", field)))
    }

    fn state(&mut self) -> ContainerResult<StateVector> {
        let len = self.u32("state length")? as usize;
        self.need("amplitudes", len.saturating_mul(16))?;
        let mut amplitudes = Vec::with_capacity(len);
        for _ in 0..len {
            let re = self.f64("amplitude")?;
            let im = self.f64("amplitude")?;
            amplitudes.push(Complex::new(re, im));
        }
        let phase = self.f64("phase")?;
        let id = match self.u8("entanglement flag")? {
            0 => None,
            1 => Some(self.string("entanglement id")?),
            other => return Err(ContainerError::Malformed(format!("entanglement flag {}", other))),
        };
        Ok(StateVector::from_raw_parts(amplitudes, phase, id)?)
    }

    fn pair(&mut self) -> ContainerResult<EntanglementPair> {
        let entanglement_id = self.string("pair id")?;
        let index_a = self.index("pair index")?;
        let index_b = self.index("pair index")?;
        let correlation_strength = self.f64("correlation")?;
        let phase_shift = self.f64("phase shift")?;
        let shared_len = self.u32("shared information")? as usize;
        let shared_information = self.bytes("shared information", shared_len)?;
        let state_a = self.state()?;
        let state_b = self.state()?;
        Ok(EntanglementPair {
            entanglement_id,
            state_a,
            state_b,
            index_a,
            index_b,
            correlation_strength,
            shared_information,
            phase_shift,
        })
    }

    fn pattern(&mut self) -> ContainerResult<InterferencePattern> {
        let kind = match self.u8("pattern kind")? {
            0 => InterferenceKind::Constructive,
            1 => InterferenceKind::Destructive,
            other => return Err(ContainerError::Malformed(format!("pattern kind {}", other))),
        };
        let amplitude = self.f64("pattern amplitude")?;
        let phase = self.f64("pattern phase")?;
        let state_count = self.u32("state indices")? as usize;
        self.need("state indices", state_count.saturating_mul(8))?;
        let state_indices = (0..state_count)
            .map(|_| self.index("state index"))
            .collect::<ContainerResult<Vec<_>>>()?;
        let amplitude_count = self.u32("amplitude indices")? as usize;
        self.need("amplitude indices", amplitude_count.saturating_mul(4))?;
        let amplitude_indices = (0..amplitude_count)
            .map(|_| self.u32("amplitude index").map(|i| i as usize))
            .collect::<ContainerResult<Vec<_>>>()?;
        let iteration = self.u32("iteration")?;
        Ok(InterferencePattern {
            kind,
            amplitude,
            phase,
            state_indices,
            amplitude_indices,
            iteration,
        })
    }
}

/// Desserializa o formato binário
pub fn decode(bytes: &[u8]) -> ContainerResult<CompressedContainer> {
    let mut r = Reader { buf: bytes };

    r.need("header", HEADER_SIZE)?;
    let mut magic = [0u8; 4];
    r.buf.copy_to_slice(&mut magic);
    if magic != MAGIC {
        return Err(ContainerError::InvalidMagic(magic));
    }
    let version = r.u16("version")?;
    if version != CONTAINER_VERSION {
        return Err(ContainerError::UnsupportedVersion {
            found: version,
            supported: CONTAINER_VERSION,
        });
    }
    let tag = r.u8("encoding tag")?;
    let flags = r.u8("flags")?;
    let original_size = r.u64("original size")?;
    let checksum = hex::encode(r.bytes("checksum", CHECKSUM_LEN)?);
    let timestamp = r.u64("timestamp")?;

    let config = CompressionConfig {
        quantum_bit_depth: r.u8("config")?,
        max_entanglement_level: r.u8("config")?,
        superposition_complexity: r.u32("config")? as usize,
        interference_threshold: r.f64("config")?,
    };
    let chunk_size = r.u32("chunk size")? as usize;
    let bit_depth = r.u8("bit depth")?;

    let mut states = Vec::new();
    let mut entanglement_map = BTreeMap::new();
    let mut interference_patterns = Vec::new();

    let encoding = match tag {
        Encoding::TAG_QUANTUM => {
            for _ in 0..r.u32("state count")? {
                states.push(r.state()?);
            }
            for _ in 0..r.u32("pair count")? {
                let pair = r.pair()?;
                entanglement_map.insert(pair.entanglement_id.clone(), pair);
            }
            for _ in 0..r.u32("pattern count")? {
                interference_patterns.push(r.pattern()?);
            }
            Encoding::Quantum
        }
        Encoding::TAG_CLASSICAL..=Encoding::TAG_EMERGENCY => {
            let len = r.u32("payload length")? as usize;
            let payload = r.bytes("payload", len)?;
            match tag {
                Encoding::TAG_CLASSICAL => Encoding::Classical { payload },
                Encoding::TAG_HYBRID => Encoding::Hybrid { payload },
                Encoding::TAG_PATTERN_RUN => Encoding::PatternRun { payload },
                _ => Encoding::Emergency {
                    payload,
                    forced: flags & FLAG_FORCED != 0,
                },
            }
        }
        other => return Err(ContainerError::UnknownEncoding(other)),
    };

    if r.buf.has_remaining() {
        return Err(ContainerError::Malformed(format!(
            "{} trailing bytes after body",
            r.buf.remaining()
        )));
    }

    let metadata = ContainerMetadata {
        original_size,
        compressed_size: bytes.len() as u64,
        state_count: states.len(),
        entanglement_count: entanglement_map.len(),
        interference_count: interference_patterns.len(),
        timestamp,
        config,
        chunk_size,
        bit_depth,
        encoding,
    };

    Ok(CompressedContainer {
        version,
        states,
        entanglement_map,
        interference_patterns,
        metadata,
        checksum,
    })
}

/// Desserializa JSON conferindo a versão primeiro
pub fn from_json(json: &str) -> ContainerResult<CompressedContainer> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let version = value
        .get("version")
        .and_then(serde_json::Value::as_u64)
        .ok_or_else(|| ContainerError::Malformed("missing version field".into()))?;
    if version != CONTAINER_VERSION as u64 {
        return Err(ContainerError::UnsupportedVersion {
            found: u16::try_from(version).unwrap_or(u16::MAX),
            supported: CONTAINER_VERSION,
        });
    }

    let container: CompressedContainer = serde_json::from_value(value)?;
    for state in container.states() {
        state.validate()?;
    }
    for pair in container.pairs() {
        pair.state_a.validate()?;
        pair.state_b.validate()?;
    }
    Ok(container)
}
