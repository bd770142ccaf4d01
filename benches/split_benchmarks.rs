use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use gf28_ssss::{Config, DefaultSource, Gf28, SplitMode, Splitter};

fn bench_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("gf28");

    group.bench_function("mul_all_pairs", |b| {
        b.iter(|| {
            let mut acc = Gf28::ZERO;
            for x in 0..=255u8 {
                for y in 0..=255u8 {
                    acc += black_box(Gf28::new(x)) * black_box(Gf28::new(y));
                }
            }
            acc
        });
    });

    group.bench_function("inverse_all", |b| {
        b.iter(|| {
            (1..=255u8)
                .map(|x| black_box(Gf28::new(x)).inverse().unwrap())
                .fold(Gf28::ZERO, |acc, v| acc + v)
        });
    });

    group.finish();
}

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split");

    for size in [1024usize, 10240, 102400] {
        let data = vec![0x5Au8; size];
        group.throughput(Throughput::Bytes(size as u64));

        for (name, mode) in [
            ("sequential", SplitMode::Sequential),
            ("parallel", SplitMode::Parallel),
        ] {
            let splitter = Splitter::builder(3)
                .total_shares(5)
                .with_config(Config::new().with_mode(mode))
                .build()
                .unwrap();
            let mut rng = DefaultSource::from_seed([0x42; 32]);

            group.bench_with_input(BenchmarkId::new(name, size), &data, |b, data| {
                b.iter(|| black_box(splitter.split(black_box(data), &mut rng).unwrap()));
            });
        }
    }

    group.finish();
}

fn bench_threshold(c: &mut Criterion) {
    let mut group = c.benchmark_group("threshold");
    let data = vec![0xA5u8; 4096];

    for k in [2usize, 8, 32, 128] {
        let splitter = Splitter::builder(k).total_shares(255).build().unwrap();
        let mut rng = DefaultSource::from_seed([0x07; 32]);

        group.bench_with_input(BenchmarkId::from_parameter(k), &data, |b, data| {
            b.iter(|| black_box(splitter.split(black_box(data), &mut rng).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_field, bench_split, bench_threshold);
criterion_main!(benches);
