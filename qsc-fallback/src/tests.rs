//! Testes integrados para qsc-fallback

use crate::*;

fn inputs() -> Vec<Vec<u8>> {
    vec![
        vec![0x00],
        vec![0xFF],
        (0..=255).collect(),
        b"the same words, the same words, the same words".to_vec(),
        vec![0u8; 4096],
        (0..2048u32).map(|i| (i.wrapping_mul(2654435761) >> 11) as u8).collect(),
    ]
}

const STRATEGIES: [FallbackStrategy; 4] = [
    FallbackStrategy::Classical,
    FallbackStrategy::Hybrid,
    FallbackStrategy::PatternRun,
    FallbackStrategy::Emergency,
];

#[test]
fn test_every_codec_roundtrips() {
    for strategy in STRATEGIES {
        let codec = codec_for(strategy);
        assert_eq!(codec.strategy(), strategy);
        for data in inputs() {
            let payload = codec.compress(&data).unwrap();
            let restored = codec.decompress(&payload, data.len()).unwrap();
            assert_eq!(restored, data, "{} on {} bytes", strategy.as_str(), data.len());
        }
    }
}

#[test]
fn test_candidate_ratio() {
    let data = vec![0u8; 4096];
    let candidate = CodecCandidate::evaluate(&ClassicalCodec::best(), &data).unwrap();
    assert_eq!(candidate.strategy, FallbackStrategy::Classical);
    assert!(candidate.ratio > 10.0);
    assert!((candidate.ratio - 4096.0 / candidate.payload.len() as f64).abs() < 1e-12);
}

#[test]
fn test_runs_favor_pattern_codecs() {
    let data = vec![0u8; 4096];
    let pattern = PatternRunCodec.compress(&data).unwrap();
    assert!(pattern.len() < 64);
    let emergency = EmergencyCodec.compress(&data).unwrap();
    // repetições de até 130 bytes, 2 bytes cada
    assert_eq!(emergency.len(), 2 * 4096usize.div_ceil(130));
}

#[test]
fn test_corrupted_payloads_fail_cleanly() {
    let data = b"some payload that will be corrupted".repeat(3);
    for strategy in STRATEGIES {
        let codec = codec_for(strategy);
        let payload = codec.compress(&data).unwrap();
        let truncated = &payload[..payload.len() / 2];
        if let Ok(restored) = codec.decompress(truncated, data.len()) {
            assert_ne!(restored, data, "{}", strategy.as_str());
        }
    }
}

#[test]
fn test_strategy_names() {
    let names: Vec<&str> = STRATEGIES.iter().map(|s| s.as_str()).collect();
    assert_eq!(names, vec!["classical", "hybrid", "pattern_run", "emergency"]);
}
