//! Testes integrados para qsc-superposition

use crate::*;
use qsc_core::prelude::*;

fn states_from(bytes: &[u8], chunk: usize) -> Vec<StateVector> {
    StateConverter::default().to_states(bytes, chunk, 8).unwrap()
}

fn processor(size: usize, parallel: bool) -> SuperpositionProcessor {
    SuperpositionProcessor::with_config(SuperpositionConfig {
        pattern_threshold: 0.05,
        max_superposition_size: size,
        parallel,
    })
}

#[test]
fn test_component_identity() {
    let p = SuperpositionProcessor::new();
    assert_eq!(p.name(), "SuperpositionProcessor");
    assert_eq!(p.step(), ProgressStep::SuperpositionAnalysis);
}

#[test]
fn test_combined_vector_is_normalized() {
    let states = states_from(b"superposition of several chunks", 4);
    let sup = SuperpositionProcessor::new().combine(&states, None).unwrap();
    let total: f64 = sup.probabilities().iter().sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert!(sup.phase >= 0.0 && sup.phase < std::f64::consts::TAU);
    assert!(sup.coherence_time > 0.0 && sup.coherence_time <= 1.0);
    assert_eq!(sup.constituent_count(), states.len());
    assert!(sup.to_state().unwrap().is_normalized());
}

#[test]
fn test_dimension_mismatch() {
    let mut states = states_from(b"abcd", 4);
    states.extend(states_from(b"ab", 2));
    let err = SuperpositionProcessor::new().combine(&states, None).unwrap_err();
    assert_eq!(err, SuperpositionError::DimensionMismatch { expected: 4, found: 2, index: 1 });
}

#[test]
fn test_negative_weights_rejected() {
    let states = states_from(b"abcdefgh", 4);
    let err = SuperpositionProcessor::new().combine(&states, Some(&[1.0, -1.0])).unwrap_err();
    assert!(matches!(err, SuperpositionError::InvalidWeights(_)));
}

#[test]
fn test_group_failure_does_not_abort_others() {
    let good = states_from(b"group one", 3);
    let empty: Vec<StateVector> = Vec::new();
    let also_good = states_from(b"group two", 3);
    let groups = vec![good, empty, also_good];

    for parallel in [false, true] {
        let result = processor(8, parallel).process_groups(&groups);
        assert_eq!(result.metrics.group_count, 3);
        assert_eq!(result.metrics.failed_groups, 1);
        assert_eq!(result.failures[0].group_index, 1);
        assert_eq!(result.failures[0].error, SuperpositionError::NoStates);
        let indices: Vec<usize> = result.superpositions.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 2]);
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let data: Vec<u8> = (0..400u32).map(|i| (i * 13 % 256) as u8).collect();
    let states = states_from(&data, 4);
    let seq = processor(4, false);
    let groups = seq.group_states(&states);

    let a = seq.process_groups(&groups);
    let b = processor(4, true).process_groups(&groups);
    assert_eq!(a.superpositions, b.superpositions);
    assert_eq!(a.metrics.pattern_count, b.metrics.pattern_count);
    assert_eq!(a.all_patterns(), b.all_patterns());
}

#[test]
fn test_group_states_sizes() {
    let states = states_from(&[7u8; 40], 4);
    let groups = processor(3, false).group_states(&states);
    assert_eq!(groups.len(), 4);
    assert!(groups.iter().take(3).all(|g| g.len() == 3));
    assert_eq!(groups[3].len(), 1);
}

#[test]
fn test_hierarchical_depth() {
    let data: Vec<u8> = (0..=255).collect();
    let states = states_from(&data, 4);
    assert_eq!(states.len(), 64);

    // 64 → 16 → 4 ≤ 4
    let sup = processor(4, false).superpose_hierarchical(&states).unwrap();
    assert_eq!(sup.depth, 2);
    assert_eq!(sup.constituent_count(), 4);
    assert!((sup.probabilities().iter().sum::<f64>() - 1.0).abs() < 1e-9);

    let flat = processor(64, false).superpose_hierarchical(&states).unwrap();
    assert_eq!(flat.depth, 0);
    assert_eq!(flat.constituent_count(), 64);
}

#[test]
fn test_hierarchical_size_one_terminates() {
    let states = states_from(b"tiny hierarchy", 2);
    let sup = processor(1, false).superpose_hierarchical(&states).unwrap();
    assert!(sup.constituent_count() <= 2);
}

#[test]
fn test_pattern_probabilities_cover_every_index() {
    let states = states_from(b"superposition of several chunks", 4);
    let p = SuperpositionProcessor::new();
    let sup = p.combine(&states, None).unwrap();
    let spectrum = sup.pattern_probabilities();
    assert_eq!(spectrum.len(), sup.combined_amplitudes.len());
    assert!(spectrum.iter().enumerate().all(|(k, pp)| pp.index == k));

    let extracted = p.extract_patterns(&sup);
    assert!(extracted.len() <= spectrum.len());
    assert!(extracted.iter().all(|e| spectrum[e.index] == *e));
}
