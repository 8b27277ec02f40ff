//! # StateVector Benchmarks
//!
//! Conversão bytes ⇄ estados, colapso e escolha de parâmetros.
//!
//! Run: `cargo bench --bench state_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qsc_core::prelude::*;

fn sample(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

/// Benchmark bytes → estados
fn bench_to_states(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_states");
    let converter = StateConverter::default();

    for size in [256usize, 4096, 65536] {
        let data = sample(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| black_box(converter.to_states(black_box(data), 8, 8)))
        });
    }

    group.finish();
}

/// Benchmark estados → bytes, com e sem colapso
fn bench_to_bytes(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_bytes");
    let converter = StateConverter::default();
    let states = match converter.to_states(&sample(4096), 8, 8) {
        Ok(states) => states,
        Err(_) => return,
    };

    group.bench_function("direct", |b| b.iter(|| black_box(converter.to_bytes(black_box(&states)))));

    group.bench_function("collapse_then_bytes", |b| {
        b.iter(|| {
            let collapsed: Vec<StateVector> = states.iter().filter_map(|s| converter.collapse(s).ok()).collect();
            black_box(converter.to_bytes(&collapsed))
        })
    });

    group.finish();
}

fn bench_choose_parameters(c: &mut Criterion) {
    let converter = StateConverter::default();
    let data = sample(65536);
    c.bench_function("choose_parameters_64k", |b| {
        b.iter(|| black_box(converter.choose_parameters(black_box(&data))))
    });
}

criterion_group!(benches, bench_to_states, bench_to_bytes, bench_choose_parameters);
criterion_main!(benches);
