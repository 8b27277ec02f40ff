//! Testes integrados para qsc-interference

use crate::*;
use qsc_core::prelude::*;
use qsc_superposition::SuperpositionProcessor;

fn text() -> Vec<u8> {
    b"interference patterns reinforce the frequent symbols; ".repeat(6)
}

fn optimizer(profile: InterferenceProfile, threshold: f64) -> InterferenceOptimizer {
    InterferenceOptimizer::new(InterferenceConfig::from_profile(profile, threshold)).unwrap()
}

#[test]
fn test_component_identity() {
    let o = InterferenceOptimizer::default();
    assert_eq!(o.name(), "InterferenceOptimizer");
    assert_eq!(o.step(), ProgressStep::InterferenceOptimization);
}

#[test]
fn test_optimized_states_stay_normalized() {
    let states = StateConverter::default().to_states(&text(), 8, 8).unwrap();
    let outcome = optimizer(InterferenceProfile::Aggressive, 0.5).optimize_states(&states).unwrap();

    assert_eq!(outcome.states.len(), states.len());
    assert!(!outcome.patterns.is_empty());
    assert!(outcome.metrics.iterations >= 1);
    assert_eq!(
        outcome.metrics.constructive_count + outcome.metrics.destructive_count,
        outcome.patterns.len()
    );
    for s in &outcome.states {
        assert!((s.norm_sq() - 1.0).abs() < NORMALIZATION_TOLERANCE);
        assert!(s.phase() >= 0.0 && s.phase() < std::f64::consts::TAU);
    }
}

#[test]
fn test_inputs_untouched() {
    let states = StateConverter::default().to_states(&text(), 8, 8).unwrap();
    let copy = states.clone();
    let _ = optimizer(InterferenceProfile::Aggressive, 0.5).optimize_states(&states).unwrap();
    assert_eq!(states, copy);
}

#[test]
fn test_reverse_restores_bytes() {
    let data = text();
    let converter = StateConverter::default();
    let states = converter.to_states(&data, 8, 8).unwrap();

    for profile in InterferenceProfile::all() {
        let opt = optimizer(profile, 0.5);
        let outcome = opt.optimize_states(&states).unwrap();
        let mut restored = outcome.states.clone();
        opt.reverse_patterns(&mut restored, &outcome.patterns).unwrap();

        let collapsed: Vec<StateVector> = restored.iter().map(|s| converter.collapse(s).unwrap()).collect();
        let mut bytes = converter.to_bytes(&collapsed).unwrap();
        bytes.truncate(data.len());
        assert_eq!(bytes, data, "{:?}", profile);
    }
}

#[test]
fn test_threshold_gates_acceptance() {
    let states = StateConverter::default().to_states(&text(), 8, 8).unwrap();
    let strict = InterferenceOptimizer::new(InterferenceConfig {
        interference_threshold: 1.1,
        ..InterferenceConfig::from_profile(InterferenceProfile::Aggressive, 0.5)
    })
    .unwrap();
    let outcome = strict.optimize_states(&states).unwrap();
    assert!(outcome.patterns.is_empty());
    assert_eq!(outcome.states, states);
    assert!(outcome.metrics.rejected > 0);
}

#[test]
fn test_pattern_log_records_indices() {
    let states = StateConverter::default().to_states(&text(), 8, 8).unwrap();
    let outcome = optimizer(InterferenceProfile::Aggressive, 0.5).optimize_states(&states).unwrap();
    for p in &outcome.patterns {
        assert_eq!(p.state_indices.len(), 2);
        assert!(p.state_indices[0] < p.state_indices[1]);
        assert!(!p.amplitude_indices.is_empty());
        assert!(p.amplitude_indices.iter().all(|&k| k < 8));
        assert!(p.iteration < outcome.metrics.iterations);
    }
}

#[test]
fn test_reverse_out_of_range() {
    let opt = InterferenceOptimizer::default();
    let mut states = StateConverter::default().to_states(b"ab", 2, 8).unwrap();
    let pattern = InterferencePattern {
        kind: InterferenceKind::Constructive,
        amplitude: 1.25,
        phase: 0.1,
        state_indices: vec![0, 4],
        amplitude_indices: vec![0],
        iteration: 0,
    };
    let err = opt.reverse_patterns(&mut states, &[pattern]).unwrap_err();
    assert_eq!(err, InterferenceError::StateOutOfRange { pattern: 0, index: 4, len: 1 });
}

#[test]
fn test_patterns_from_superposition() {
    let states = StateConverter::default().to_states(&text(), 8, 8).unwrap();
    let sp = SuperpositionProcessor::new();
    let sup = sp.combine(&states, None).unwrap();
    let patterns = sp.extract_patterns(&sup);
    let opt = optimizer(InterferenceProfile::Balanced, 0.7);
    let up = opt.apply_constructive(&patterns);
    assert!(up.iter().all(|p| p.original_probability >= opt.config().constructive_threshold));
}

fn text_states() -> Vec<StateVector> {
    StateConverter::default().to_states(&text(), 8, 8).unwrap()
}

fn superposition_focus(opt: &InterferenceOptimizer, states: &[StateVector]) -> InterferenceFocus {
    let sp = SuperpositionProcessor::new();
    let global = sp.superpose_hierarchical(states).unwrap();
    let analysis = sp.process_groups(&sp.group_states(states));
    let mut dominant = analysis.all_patterns();
    dominant.extend(sp.extract_patterns(&global));
    opt.focus(&dominant, &global.pattern_probabilities())
}

#[test]
fn test_empty_focus_blocks_every_pattern() {
    let states = text_states();
    let opt = optimizer(InterferenceProfile::Aggressive, 0.5);
    assert!(!opt.optimize_states(&states).unwrap().patterns.is_empty());

    let outcome = opt.optimize_guided(&states, &InterferenceFocus::default()).unwrap();
    assert!(outcome.patterns.is_empty());
    assert_eq!(outcome.states, states);
}

#[test]
fn test_full_focus_matches_unguided() {
    let states = text_states();
    let opt = optimizer(InterferenceProfile::Aggressive, 0.5);
    let every: std::collections::BTreeSet<usize> = (0..8).collect();
    let focus = InterferenceFocus {
        constructive: every.clone(),
        destructive: every,
    };
    let guided = opt.optimize_guided(&states, &focus).unwrap();
    let unguided = opt.optimize_states(&states).unwrap();
    assert_eq!(guided.patterns, unguided.patterns);
    assert_eq!(guided.states, unguided.states);
}

#[test]
fn test_constructive_only_focus() {
    let states = text_states();
    let opt = optimizer(InterferenceProfile::Aggressive, 0.5);
    let focus = InterferenceFocus {
        constructive: (0..8).collect(),
        destructive: Default::default(),
    };
    let outcome = opt.optimize_guided(&states, &focus).unwrap();
    assert_eq!(outcome.metrics.destructive_count, 0);
    assert!(outcome.patterns.iter().all(|p| p.kind == InterferenceKind::Constructive));
}

#[test]
fn test_superposition_focus_guides_patterns() {
    let data = text();
    let converter = StateConverter::default();
    let states = text_states();
    let opt = optimizer(InterferenceProfile::Aggressive, 0.5);
    let focus = superposition_focus(&opt, &states);

    let outcome = opt.optimize_guided(&states, &focus).unwrap();
    assert!(outcome.patterns.iter().all(|p| focus.admits(p)));

    let mut restored = outcome.states.clone();
    opt.reverse_patterns(&mut restored, &outcome.patterns).unwrap();
    let collapsed: Vec<StateVector> = restored.iter().map(|s| converter.collapse(s).unwrap()).collect();
    let mut bytes = converter.to_bytes(&collapsed).unwrap();
    bytes.truncate(data.len());
    assert_eq!(bytes, data);
}
