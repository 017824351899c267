use amc_decoder::{DecoderConfig, decode_bytes};
use amc_tests::{sample_catalog, sample_writer};
use amc_types::FormatVersion;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn bench_decode_small(c: &mut Criterion) {
    let catalog = sample_catalog(FormatVersion::new(42), 1);

    c.bench_function("decode_small", |b| {
        b.iter(|| decode_bytes(catalog.clone(), DecoderConfig::default()).unwrap());
    });
}

fn bench_decode_versions(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_versions");

    for version in [32, 35, 40, 42].map(FormatVersion::new) {
        let catalog = sample_catalog(version, 100);
        group.bench_with_input(
            BenchmarkId::new("decode", version.to_string()),
            &catalog,
            |b, c| b.iter(|| decode_bytes(c.clone(), DecoderConfig::default()).unwrap()),
        );
    }

    group.finish();
}

fn bench_decode_validation(c: &mut Criterion) {
    let catalog = sample_catalog(FormatVersion::new(42), 100);
    let strict = DecoderConfig {
        validate_strings: true,
        ..DecoderConfig::default()
    };

    let mut group = c.benchmark_group("decode_validation");

    group.bench_function("lenient", |b| {
        b.iter(|| decode_bytes(catalog.clone(), DecoderConfig::default()).unwrap());
    });
    group.bench_function("validate_strings", |b| {
        b.iter(|| decode_bytes(catalog.clone(), strict.clone()).unwrap());
    });

    group.finish();
}

fn bench_decode_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_throughput");

    for movies in [10, 100, 1000] {
        let catalog = sample_writer(FormatVersion::new(42), movies).encode().unwrap();

        group.throughput(Throughput::Bytes(catalog.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("decode", format!("{movies}_movies")),
            &catalog,
            |b, c| b.iter(|| decode_bytes(c.clone(), DecoderConfig::default()).unwrap()),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_decode_small,
    bench_decode_versions,
    bench_decode_validation,
    bench_decode_throughput
);
criterion_main!(benches);
