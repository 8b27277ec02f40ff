//! Run-length de emergência, no estilo PackBits
//!
//! ```text
//! c < 0x80    literal: (c + 1) bytes seguem
//! c ≥ 0x80    repetição: o próximo byte, (c − 0x80 + 3) vezes
//! ```
//!
//! Último recurso. Sempre decodificável; no pior caso cresce um byte de
//! controle a cada 128 de entrada.

use crate::codec::{FallbackCodec, FallbackStrategy};
use crate::error::{FallbackError, FallbackResult};

const CODEC: &str = "emergency";
const MAX_LITERAL: usize = 128;
/// Repetições menores viram literal
const MIN_RUN: usize = 3;
const MAX_RUN: usize = 0x7F + MIN_RUN;
const RUN_FLAG: u8 = 0x80;

/// Codec de emergência
#[derive(Debug, Clone, Copy, Default)]
pub struct EmergencyCodec;

/// Tamanho máximo do payload para `len` bytes de entrada
pub fn worst_case_len(len: usize) -> usize {
    len + len.div_ceil(MAX_LITERAL)
}

fn run_at(data: &[u8], pos: usize) -> usize {
    let byte = data[pos];
    data[pos..].iter().take(MAX_RUN).take_while(|&&b| b == byte).count()
}

fn flush_literal(out: &mut Vec<u8>, data: &[u8], start: usize, end: usize) {
    for block in data[start..end].chunks(MAX_LITERAL) {
        out.push((block.len() - 1) as u8);
        out.extend_from_slice(block);
    }
}

pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(worst_case_len(data.len()));
    let mut literal_start = 0;
    let mut pos = 0;

    while pos < data.len() {
        let run = run_at(data, pos);
        if run >= MIN_RUN {
            flush_literal(&mut out, data, literal_start, pos);
            out.push(RUN_FLAG | (run - MIN_RUN) as u8);
            out.push(data[pos]);
            pos += run;
            literal_start = pos;
        } else {
            pos += run;
        }
    }
    flush_literal(&mut out, data, literal_start, data.len());
    out
}

pub fn decode(payload: &[u8], limit: usize) -> FallbackResult<Vec<u8>> {
    let mut out = Vec::new();
    let mut pos = 0;

    while pos < payload.len() {
        let control = payload[pos];
        let (count, take) = if control < RUN_FLAG {
            (control as usize + 1, control as usize + 1)
        } else {
            ((control - RUN_FLAG) as usize + MIN_RUN, 1)
        };
        let body = payload.get(pos + 1..pos + 1 + take).ok_or(FallbackError::Truncated {
            codec: CODEC,
            offset: pos,
        })?;
        if out.len() + count > limit {
            return Err(FallbackError::OutputTooLarge { codec: CODEC, limit });
        }
        if control < RUN_FLAG {
            out.extend_from_slice(body);
        } else {
            out.extend(std::iter::repeat_n(body[0], count));
        }
        pos += 1 + take;
    }
    Ok(out)
}

impl FallbackCodec for EmergencyCodec {
    fn strategy(&self) -> FallbackStrategy {
        FallbackStrategy::Emergency
    }

    fn compress(&self, data: &[u8]) -> FallbackResult<Vec<u8>> {
        Ok(encode(data))
    }

    fn decompress(&self, payload: &[u8], limit: usize) -> FallbackResult<Vec<u8>> {
        decode(payload, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_and_literals() {
        assert_eq!(encode(b"aaab"), vec![0x80, b'a', 0, b'b']);
        assert_eq!(encode(b"aab"), vec![2, b'a', b'a', b'b']);
        assert_eq!(decode(&[0x80, b'a', 0, b'b'], 4).unwrap(), b"aaab");
    }

    #[test]
    fn test_long_run_splits() {
        let data = vec![1u8; 300];
        let encoded = encode(&data);
        // 130 + 130 + 40
        assert_eq!(encoded, vec![0xFF, 1, 0xFF, 1, 0x80 | 37, 1]);
        assert_eq!(decode(&encoded, 300).unwrap(), data);
    }

    #[test]
    fn test_short_tail_after_run() {
        let data = [vec![9u8; 131], vec![4u8]].concat();
        assert_eq!(encode(&data), vec![0xFF, 9, 1, 9, 4]);
        assert_eq!(decode(&encode(&data), data.len()).unwrap(), data);
    }

    #[test]
    fn test_worst_case_bounded() {
        for len in [1usize, 2, 127, 128, 129, 1000, 4096] {
            // sem repetições de 3: só literais
            let data: Vec<u8> = (0..len).map(|i| (i % 2 + (i / 2) % 7) as u8).collect();
            let encoded = encode(&data);
            assert!(encoded.len() <= worst_case_len(len), "len {}", len);
            assert_eq!(decode(&encoded, len).unwrap(), data);
        }
        assert_eq!(worst_case_len(128), 129);
        assert_eq!(worst_case_len(129), 131);
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(decode(&[3, 1, 2], 10), Err(FallbackError::Truncated { offset: 0, .. })));
        assert!(matches!(decode(&[0x80], 10), Err(FallbackError::Truncated { .. })));
        assert!(matches!(decode(&[0x85, 7], 4), Err(FallbackError::OutputTooLarge { .. })));
        assert_eq!(decode(&[], 0).unwrap(), Vec::<u8>::new());
    }
}
