//! Checksum SHA-256 do container
//!
//! `sha256(canonical(states) ‖ canonical(pairs em ordem de id) ‖ payload)`

use qsc_core::StateVector;
use qsc_entanglement::EntanglementPair;
use sha2::{Digest, Sha256};

/// Tamanho do digest em bytes
pub const CHECKSUM_LEN: usize = 32;

/// Digest bruto
pub fn digest<'a, P>(states: &[StateVector], pairs: P, payload: &[u8]) -> [u8; CHECKSUM_LEN]
where
    P: IntoIterator<Item = &'a EntanglementPair>,
{
    let mut hasher = Sha256::new();
    hasher.update((states.len() as u64).to_le_bytes());
    for state in states {
        hasher.update(state.canonical_bytes());
    }
    for pair in pairs {
        hasher.update(pair.canonical_bytes());
    }
    hasher.update(payload);
    hasher.finalize().into()
}

/// Digest em hex minúsculo
pub fn checksum_hex<'a, P>(states: &[StateVector], pairs: P, payload: &[u8]) -> String
where
    P: IntoIterator<Item = &'a EntanglementPair>,
{
    hex::encode(digest(states, pairs, payload))
}

/// Decodifica checksum hex para bytes brutos
pub fn decode_hex(checksum: &str) -> Option<[u8; CHECKSUM_LEN]> {
    let raw = hex::decode(checksum).ok()?;
    raw.try_into().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsc_core::StateConverter;

    const NO_PAIRS: [&EntanglementPair; 0] = [];

    #[test]
    fn test_empty_payload_digest_is_stable() {
        let states = StateConverter::default().to_states(b"checksum", 4, 8).unwrap();
        let a = checksum_hex(&states, NO_PAIRS, &[]);
        let b = checksum_hex(&states, NO_PAIRS, &[]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_payload_changes_digest() {
        assert_ne!(checksum_hex(&[], NO_PAIRS, b"x"), checksum_hex(&[], NO_PAIRS, b"y"));
    }

    #[test]
    fn test_hex_roundtrip() {
        let raw = digest(&[], NO_PAIRS, b"payload");
        assert_eq!(decode_hex(&hex::encode(raw)), Some(raw));
        assert_eq!(decode_hex("zz"), None);
        assert_eq!(decode_hex("abcd"), None);
    }
}
