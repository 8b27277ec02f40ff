//! # CompressionEngine Benchmarks
//!
//! Compressão completa (caminho quântico + regra de fallback) e
//! descompressão por estratégia.
//!
//! Run: `cargo bench --bench engine_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qsc_engine::{CompressionConfig, CompressionEngine};
use qsc_fallback::{codec_for, FallbackStrategy};

fn text(len: usize) -> Vec<u8> {
    b"the quick brown fox jumps over the lazy dog "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

fn bench_compress(c: &mut Criterion) {
    let Ok(engine) = CompressionEngine::new(CompressionConfig::default()) else {
        return;
    };
    let mut group = c.benchmark_group("compress");

    for size in [1024usize, 16384] {
        let data = text(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("full", size), &data, |b, data| {
            b.iter(|| black_box(engine.compress(black_box(data))))
        });
        group.bench_with_input(BenchmarkId::new("quantum_only", size), &data, |b, data| {
            b.iter(|| black_box(engine.compress_quantum(black_box(data))))
        });
    }

    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let Ok(engine) = CompressionEngine::new(CompressionConfig::default()) else {
        return;
    };
    let data = text(16384);
    let mut group = c.benchmark_group("decompress");

    if let Ok(container) = engine.compress(&data) {
        group.bench_function("selected_strategy", |b| b.iter(|| black_box(engine.decompress(black_box(&container)))));
    }
    if let Ok(container) = engine.compress_quantum(&data) {
        group.bench_function("quantum", |b| b.iter(|| black_box(engine.decompress(black_box(&container)))));
    }

    group.finish();
}

fn bench_codecs(c: &mut Criterion) {
    let data = text(65536);
    let mut group = c.benchmark_group("fallback_codecs");
    group.throughput(Throughput::Bytes(data.len() as u64));

    for strategy in [
        FallbackStrategy::Classical,
        FallbackStrategy::Hybrid,
        FallbackStrategy::PatternRun,
        FallbackStrategy::Emergency,
    ] {
        let codec = codec_for(strategy);
        group.bench_function(strategy.as_str(), |b| b.iter(|| black_box(codec.compress(black_box(&data)))));
    }

    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress, bench_codecs);
criterion_main!(benches);
