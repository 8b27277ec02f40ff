//! # Pass Benchmarks
//!
//! Superposição, detecção de pares e otimização de interferência.
//!
//! Run: `cargo bench --bench analysis_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qsc_core::prelude::*;
use qsc_entanglement::{EntanglementAnalyzer, EntanglementConfig};
use qsc_interference::InterferenceOptimizer;
use qsc_superposition::SuperpositionProcessor;

fn states(count: usize) -> Vec<StateVector> {
    let data: Vec<u8> = (0..count * 8).map(|i| (i % 64) as u8 * 3).collect();
    StateConverter::default().to_states(&data, 8, 8).unwrap_or_default()
}

fn bench_superposition(c: &mut Criterion) {
    let processor = SuperpositionProcessor::new();
    let input = states(512);
    let groups = processor.group_states(&input);

    c.bench_function("superposition_groups_512", |b| {
        b.iter(|| black_box(processor.process_groups(black_box(&groups))))
    });
    c.bench_function("superposition_hierarchical_512", |b| {
        b.iter(|| black_box(processor.superpose_hierarchical(black_box(&input))))
    });
}

/// Sequencial vs paralelo, cache limpo a cada iteração
fn bench_find_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_pairs");

    for count in [32usize, 128, 512] {
        let input = states(count);
        for parallel in [false, true] {
            let analyzer = EntanglementAnalyzer::new(EntanglementConfig {
                parallel,
                ..EntanglementConfig::default()
            });
            let label = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(label, count), &input, |b, input| {
                b.iter(|| {
                    analyzer.clear_cache();
                    black_box(analyzer.find_pairs(black_box(input)))
                })
            });
        }
    }

    group.finish();
}

fn bench_interference(c: &mut Criterion) {
    let optimizer = InterferenceOptimizer::default();
    let input = states(64);
    c.bench_function("interference_optimize_64", |b| {
        b.iter(|| black_box(optimizer.optimize_states(black_box(&input))))
    });

    let processor = SuperpositionProcessor::new();
    let spectrum = processor
        .superpose_hierarchical(&input)
        .map(|s| s.pattern_probabilities())
        .unwrap_or_default();
    let dominant = processor.process_groups(&processor.group_states(&input)).all_patterns();
    let focus = optimizer.focus(&dominant, &spectrum);
    c.bench_function("interference_guided_64", |b| {
        b.iter(|| black_box(optimizer.optimize_guided(black_box(&input), &focus)))
    });
}

criterion_group!(benches, bench_superposition, bench_find_pairs, bench_interference);
criterion_main!(benches);
