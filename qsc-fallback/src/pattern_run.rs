//! Pattern-run: repetições de padrões curtos
//!
//! ```text
//! c < 0x80          literal: (c + 1) bytes seguem
//! c = 0x80 | (p-1)  repetição: n, depois p bytes; padrão repetido n + 2 vezes
//! ```

use crate::codec::{FallbackCodec, FallbackStrategy};
use crate::error::{FallbackError, FallbackResult};

/// Período máximo de padrão
pub const MAX_PERIOD: usize = 8;
const MAX_LITERAL: usize = 128;
const MIN_REPEATS: usize = 2;
const MAX_REPEATS: usize = 255 + MIN_REPEATS;
const REPEAT_FLAG: u8 = 0x80;

const CODEC: &str = "pattern_run";

/// Codec pattern-run
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternRunCodec;

/// Melhor repetição começando em `pos`: (período, repetições)
fn best_run(data: &[u8], pos: usize) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    for period in 1..=MAX_PERIOD {
        if pos + period * MIN_REPEATS > data.len() {
            break;
        }
        let pattern = &data[pos..pos + period];
        let mut repeats = 1;
        while repeats < MAX_REPEATS {
            let start = pos + repeats * period;
            if start + period > data.len() || &data[start..start + period] != pattern {
                break;
            }
            repeats += 1;
        }
        if repeats < MIN_REPEATS {
            continue;
        }
        // token ocupa 2 + período; só compensa se cobrir mais que isso
        let covered = period * repeats;
        if covered <= period + 2 {
            continue;
        }
        if best.is_none_or(|(p, r)| covered > p * r) {
            best = Some((period, repeats));
        }
    }
    best
}

fn flush_literals(out: &mut Vec<u8>, literals: &mut Vec<u8>) {
    for block in literals.chunks(MAX_LITERAL) {
        out.push((block.len() - 1) as u8);
        out.extend_from_slice(block);
    }
    literals.clear();
}

/// Codifica
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() / 2 + 8);
    let mut literals = Vec::new();
    let mut pos = 0;

    while pos < data.len() {
        match best_run(data, pos) {
            Some((period, repeats)) => {
                flush_literals(&mut out, &mut literals);
                out.push(REPEAT_FLAG | (period - 1) as u8);
                out.push((repeats - MIN_REPEATS) as u8);
                out.extend_from_slice(&data[pos..pos + period]);
                pos += period * repeats;
            }
            None => {
                literals.push(data[pos]);
                pos += 1;
            }
        }
    }
    flush_literals(&mut out, &mut literals);
    out
}

/// Decodifica no máximo `limit` bytes
pub fn decode(payload: &[u8], limit: usize) -> FallbackResult<Vec<u8>> {
    let mut out = Vec::new();
    let mut pos = 0;

    while pos < payload.len() {
        let control = payload[pos];
        pos += 1;

        if control & REPEAT_FLAG == 0 {
            let len = control as usize + 1;
            let block = payload
                .get(pos..pos + len)
                .ok_or(FallbackError::Truncated { codec: CODEC, offset: pos })?;
            out.extend_from_slice(block);
            pos += len;
        } else {
            let period = (control & !REPEAT_FLAG) as usize + 1;
            if period > MAX_PERIOD {
                return Err(FallbackError::Malformed {
                    codec: CODEC,
                    offset: pos - 1,
                    detail: format!("period {} exceeds {}", period, MAX_PERIOD),
                });
            }
            let repeats = *payload
                .get(pos)
                .ok_or(FallbackError::Truncated { codec: CODEC, offset: pos })? as usize
                + MIN_REPEATS;
            pos += 1;
            let pattern = payload
                .get(pos..pos + period)
                .ok_or(FallbackError::Truncated { codec: CODEC, offset: pos })?;
            if out.len() + period * repeats > limit {
                return Err(FallbackError::OutputTooLarge { codec: CODEC, limit });
            }
            for _ in 0..repeats {
                out.extend_from_slice(pattern);
            }
            pos += period;
        }

        if out.len() > limit {
            return Err(FallbackError::OutputTooLarge { codec: CODEC, limit });
        }
    }
    Ok(out)
}

impl FallbackCodec for PatternRunCodec {
    fn strategy(&self) -> FallbackStrategy {
        FallbackStrategy::PatternRun
    }

    fn compress(&self, data: &[u8]) -> FallbackResult<Vec<u8>> {
        Ok(encode(data))
    }

    fn decompress(&self, payload: &[u8], limit: usize) -> FallbackResult<Vec<u8>> {
        decode(payload, limit)
    }
}
