//! Testes integrados para qsc-container

use crate::*;
use qsc_core::prelude::*;
use qsc_entanglement::{EntanglementAnalyzer, EntanglementConfig};
use qsc_interference::{InterferenceConfig, InterferenceOptimizer, InterferenceProfile};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

fn quantum_container(data: &[u8]) -> CompressedContainer {
    let config = CompressionConfig::default();
    let states = StateConverter::default().to_states(data, 8, 8).unwrap();
    let analyzer = EntanglementAnalyzer::new(EntanglementConfig {
        correlation_threshold: 0.5,
        ..EntanglementConfig::default()
    });
    let pairs = analyzer.find_pairs(&states);
    let mut entangled = states.clone();
    analyzer.entangle(&mut entangled, &pairs).unwrap();
    let optimizer =
        InterferenceOptimizer::new(InterferenceConfig::from_profile(InterferenceProfile::Aggressive, 0.5)).unwrap();
    let outcome = optimizer.optimize_states(&entangled).unwrap();

    ContainerBuilder::new(data.len(), config)
        .chunking(8, 8)
        .states(outcome.states)
        .pairs(pairs)
        .patterns(outcome.patterns)
        .timestamp(1_700_000_000)
        .build()
        .unwrap()
}

fn fallback_container(encoding: Encoding) -> CompressedContainer {
    ContainerBuilder::new(100, CompressionConfig::fast())
        .encoding(encoding)
        .timestamp(42)
        .build()
        .unwrap()
}

fn text() -> Vec<u8> {
    b"containers seal states, pairs and patterns. ".repeat(4)
}

#[test]
fn test_builder_counts_and_checksum() {
    let c = quantum_container(&text());
    let m = c.metadata();
    assert_eq!(m.original_size, text().len() as u64);
    assert_eq!(m.state_count, c.states().len());
    assert_eq!(m.entanglement_count, c.entanglement_map().len());
    assert!(m.entanglement_count > 0);
    assert_eq!(m.interference_count, c.interference_patterns().len());
    assert!(c.encoding().is_quantum());
    assert_eq!(c.version(), CONTAINER_VERSION);
    assert!(c.verify_checksum().is_ok());
    assert_eq!(m.compressed_size, c.to_bytes().len() as u64);
}

#[test]
fn test_tampered_checksum_detected() {
    let c = quantum_container(&text()).with_checksum("00".repeat(32));
    assert!(matches!(c.verify_checksum(), Err(ContainerError::IntegrityError { .. })));
}

/// Destino de log em memória
#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLog {
    type Writer = CapturedLog;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn logged<F: FnOnce()>(f: F) -> String {
    let log = CapturedLog::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(log.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = log.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn test_integrity_failure_is_logged() {
    let c = quantum_container(&text()).with_checksum("00".repeat(32));
    let output = logged(|| {
        assert!(c.verify_checksum().is_err());
    });
    assert!(output.contains("WARN"), "{}", output);
    assert!(output.contains("container checksum mismatch"));
    assert!(output.contains(&"00".repeat(32)));
}

#[test]
fn test_decode_failure_is_logged() {
    let output = logged(|| {
        assert!(CompressedContainer::from_bytes(b"not a container").is_err());
        assert!(CompressedContainer::from_json("{}").is_err());
    });
    assert!(output.contains("packed container rejected"), "{}", output);
    assert!(output.contains("JSON container rejected"));

    let c = quantum_container(&text());
    let quiet = logged(|| {
        c.verify_checksum().unwrap();
        CompressedContainer::from_bytes(&c.to_bytes()).unwrap();
    });
    assert!(!quiet.contains("rejected") && !quiet.contains("mismatch"), "{}", quiet);
}

#[test]
fn test_binary_roundtrip_quantum() {
    let c = quantum_container(&text());
    let decoded = CompressedContainer::from_bytes(&c.to_bytes()).unwrap();
    assert_eq!(decoded, c);
    assert!(decoded.verify_checksum().is_ok());
}

#[test]
fn test_binary_roundtrip_fallbacks() {
    for encoding in [
        Encoding::Classical { payload: vec![1, 2, 3] },
        Encoding::Hybrid { payload: vec![4] },
        Encoding::PatternRun { payload: vec![] },
        Encoding::Emergency { payload: vec![9, 9], forced: true },
    ] {
        let c = fallback_container(encoding);
        let decoded = CompressedContainer::from_bytes(&c.to_bytes()).unwrap();
        assert_eq!(decoded, c);
        assert!(decoded.verify_checksum().is_ok());
    }
}

#[test]
fn test_json_roundtrip() {
    let c = quantum_container(&text());
    let json = c.to_json().unwrap();
    let back = CompressedContainer::from_json(&json).unwrap();
    assert_eq!(back, c);
    assert!(back.verify_checksum().is_ok());
}

#[test]
fn test_json_unknown_version_rejected() {
    let c = fallback_container(Encoding::Classical { payload: vec![7] });
    let json = c.to_json().unwrap().replacen("\"version\":1", "\"version\":9", 1);
    assert_eq!(
        CompressedContainer::from_json(&json),
        Err(ContainerError::UnsupportedVersion { found: 9, supported: CONTAINER_VERSION })
    );
}

#[test]
fn test_binary_rejects_bad_input() {
    let c = fallback_container(Encoding::Classical { payload: vec![1, 2, 3] });
    let bytes = c.to_bytes();

    let mut bad_magic = bytes.clone();
    bad_magic[0] = b'X';
    assert!(matches!(CompressedContainer::from_bytes(&bad_magic), Err(ContainerError::InvalidMagic(_))));

    let mut bad_version = bytes.clone();
    bad_version[4] = 0xFF;
    assert!(matches!(
        CompressedContainer::from_bytes(&bad_version),
        Err(ContainerError::UnsupportedVersion { .. })
    ));

    let mut bad_tag = bytes.clone();
    bad_tag[6] = 200;
    assert_eq!(CompressedContainer::from_bytes(&bad_tag), Err(ContainerError::UnknownEncoding(200)));

    assert!(matches!(
        CompressedContainer::from_bytes(&bytes[..bytes.len() - 1]),
        Err(ContainerError::Truncated { .. })
    ));
    assert!(matches!(CompressedContainer::from_bytes(&bytes[..10]), Err(ContainerError::Truncated { .. })));

    let mut trailing = bytes.clone();
    trailing.push(0);
    assert!(matches!(CompressedContainer::from_bytes(&trailing), Err(ContainerError::Malformed(_))));
}

#[test]
fn test_payload_corruption_changes_checksum() {
    let c = fallback_container(Encoding::Classical { payload: vec![1, 2, 3] });
    let mut bytes = c.to_bytes();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    let decoded = CompressedContainer::from_bytes(&bytes).unwrap();
    assert!(matches!(decoded.verify_checksum(), Err(ContainerError::IntegrityError { .. })));
}

#[test]
fn test_stats() {
    let c = fallback_container(Encoding::Emergency { payload: vec![0; 10], forced: false });
    let stats = c.stats();
    assert_eq!(stats.strategy, "emergency");
    assert_eq!(stats.original_size, 100);
    assert_eq!(stats.compressed_size, c.to_bytes().len() as u64);
    assert!((stats.compression_ratio - 100.0 / stats.compressed_size as f64).abs() < 1e-12);
}

#[test]
fn test_duplicate_pair_ids_rejected() {
    let data = text();
    let states = StateConverter::default().to_states(&data, 8, 8).unwrap();
    let analyzer = EntanglementAnalyzer::new(EntanglementConfig {
        correlation_threshold: 0.0,
        ..EntanglementConfig::default()
    });
    let pairs = analyzer.find_pairs(&states);
    let duplicated = vec![pairs[0].clone(), pairs[0].clone()];
    let result = ContainerBuilder::new(data.len(), CompressionConfig::default())
        .states(states)
        .pairs(duplicated)
        .build();
    assert!(matches!(result, Err(ContainerError::Malformed(_))));
}
