use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use feedkit::factory::VecFactory;
use feedkit::{Feed, Scanner, Splitter};

fn benchmark_map_filter_fold(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_filter_fold");

    for size in [100i64, 1_000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                Feed::range(0, black_box(size))
                    .map(|n| n * 3)
                    .filter(|n| n % 2 == 0)
                    .fold(0i64, |acc, n| acc + n)
            })
        });
    }
    group.finish();
}

fn benchmark_memoized_retraversal(c: &mut Criterion) {
    let shared = Feed::range(0, 10_000).map(|n| n * n).memoize();
    shared.count();

    c.bench_function("memoized_retraversal", |b| {
        b.iter(|| black_box(&shared).count())
    });
}

fn benchmark_sparse_filter(c: &mut Criterion) {
    c.bench_function("filter_skip_100k", |b| {
        b.iter(|| {
            Feed::integers_from(0)
                .filter(|n| *n == black_box(100_000))
                .head()
        })
    });
}

fn benchmark_group(c: &mut Criterion) {
    c.bench_function("group_by_16", |b| {
        b.iter(|| {
            Feed::range(0, 10_000)
                .group(black_box(16), VecFactory)
                .count()
        })
    });
}

fn benchmark_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split");
    let csv = "alpha, beta,,gamma ,delta".repeat(200);

    group.bench_function("char", |b| {
        let splitter = Splitter::on_char(',');
        b.iter(|| splitter.split(black_box(csv.as_str())).count())
    });
    group.bench_function("char_trim_omit", |b| {
        let splitter = Splitter::on_char(',').trim_whitespace().omit_empty();
        b.iter(|| splitter.split(black_box(csv.as_str())).count())
    });
    group.bench_function("pattern", |b| {
        let splitter = Splitter::on_pattern(r"\s*,\s*").unwrap();
        b.iter(|| splitter.split(black_box(csv.as_str())).count())
    });
    group.finish();
}

fn benchmark_scanner(c: &mut Criterion) {
    let text = "key = value; ".repeat(500);

    c.bench_function("scan_pairs", |b| {
        b.iter(|| {
            let mut scanner = Scanner::from_str(black_box(&text));
            let mut pairs = 0;
            while !scanner.is_eof().unwrap() {
                scanner.scan_to_char('=').unwrap();
                scanner.scan_to_seq("; ").unwrap();
                scanner.scan_seq("; ").unwrap();
                pairs += 1;
            }
            pairs
        })
    });
}

criterion_group!(
    benches,
    benchmark_map_filter_fold,
    benchmark_memoized_retraversal,
    benchmark_sparse_filter,
    benchmark_group,
    benchmark_split,
    benchmark_scanner
);
criterion_main!(benches);
