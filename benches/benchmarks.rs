use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use isla::{decode_binary, decode_text_str, encode_binary, encode_text, BinValue, TextValue};
use std::hint::black_box;

fn small_map_text() -> TextValue {
    TextValue::leaf_map([
        ("name", "my-service"),
        ("version", "42"),
        ("enabled", "true"),
        ("threshold", "0.85"),
    ])
}

fn small_map_binary() -> BinValue {
    BinValue::leaf_map([
        (b"name".to_vec(), b"my-service".to_vec()),
        (b"version".to_vec(), b"42".to_vec()),
        (b"enabled".to_vec(), b"true".to_vec()),
        (b"threshold".to_vec(), b"0.85".to_vec()),
    ])
}

fn large_array_text(n: usize) -> TextValue {
    TextValue::leaf_list((0..n).map(|i| i.to_string()))
}

fn large_array_binary(n: usize) -> BinValue {
    BinValue::leaf_list((0..n).map(|i| i.to_string().into_bytes()))
}

fn nested_text(depth: usize) -> TextValue {
    let mut value = TextValue::leaf_map([("leaf", "value")]);
    for i in 0..depth {
        value = TextValue::Map(std::iter::once((format!("child{i}"), value)).collect());
    }
    value
}

fn nested_binary(depth: usize) -> BinValue {
    let mut value = BinValue::leaf_map([(b"leaf".to_vec(), b"value".to_vec())]);
    for i in 0..depth {
        let mut map = isla::ValueMap::new();
        map.insert(format!("child{i}").into_bytes(), value);
        value = BinValue::Map(map);
    }
    value
}

fn small_map_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("small_map");
    let text_doc = encode_text(&small_map_text()).unwrap();
    group.bench_function(BenchmarkId::new("text", "decode"), |b| {
        b.iter(|| decode_text_str(black_box(&text_doc)).unwrap())
    });
    group.bench_function(BenchmarkId::new("text", "encode"), |b| {
        b.iter(|| encode_text(black_box(&small_map_text())).unwrap())
    });

    let bin_doc = encode_binary(&small_map_binary()).unwrap();
    group.bench_function(BenchmarkId::new("binary", "decode"), |b| {
        b.iter(|| decode_binary(black_box(&bin_doc)).unwrap())
    });
    group.bench_function(BenchmarkId::new("binary", "encode"), |b| {
        b.iter(|| encode_binary(black_box(&small_map_binary())).unwrap())
    });
    group.finish();
}

fn large_array_benchmarks(c: &mut Criterion, n: usize) {
    let mut group = c.benchmark_group(format!("large_array_{n}"));
    let text_doc = encode_text(&large_array_text(n)).unwrap();
    group.bench_function(BenchmarkId::new("text", "decode"), |b| {
        b.iter(|| decode_text_str(black_box(&text_doc)).unwrap())
    });
    group.bench_function(BenchmarkId::new("text", "encode"), |b| {
        b.iter(|| encode_text(black_box(&large_array_text(n))).unwrap())
    });

    let bin_doc = encode_binary(&large_array_binary(n)).unwrap();
    group.bench_function(BenchmarkId::new("binary", "decode"), |b| {
        b.iter(|| decode_binary(black_box(&bin_doc)).unwrap())
    });
    group.bench_function(BenchmarkId::new("binary", "encode"), |b| {
        b.iter(|| encode_binary(black_box(&large_array_binary(n))).unwrap())
    });
    group.finish();
}

fn nested_benchmarks(c: &mut Criterion, depth: usize) {
    let mut group = c.benchmark_group(format!("nested_depth_{depth}"));
    let text_doc = encode_text(&nested_text(depth)).unwrap();
    group.bench_function(BenchmarkId::new("text", "decode"), |b| {
        b.iter(|| decode_text_str(black_box(&text_doc)).unwrap())
    });
    group.bench_function(BenchmarkId::new("text", "encode"), |b| {
        b.iter(|| encode_text(black_box(&nested_text(depth))).unwrap())
    });

    let bin_doc = encode_binary(&nested_binary(depth)).unwrap();
    group.bench_function(BenchmarkId::new("binary", "decode"), |b| {
        b.iter(|| decode_binary(black_box(&bin_doc)).unwrap())
    });
    group.bench_function(BenchmarkId::new("binary", "encode"), |b| {
        b.iter(|| encode_binary(black_box(&nested_binary(depth))).unwrap())
    });
    group.finish();
}

fn large_array_100_benchmarks(c: &mut Criterion) {
    large_array_benchmarks(c, 100);
}

fn large_array_1000_benchmarks(c: &mut Criterion) {
    large_array_benchmarks(c, 1000);
}

fn large_array_10000_benchmarks(c: &mut Criterion) {
    large_array_benchmarks(c, 10_000);
}

fn nested_shallow_benchmarks(c: &mut Criterion) {
    nested_benchmarks(c, 4);
}

fn nested_deep_benchmarks(c: &mut Criterion) {
    nested_benchmarks(c, 64);
}

criterion_group!(
    benches,
    small_map_benchmarks,
    large_array_100_benchmarks,
    large_array_1000_benchmarks,
    large_array_10000_benchmarks,
    nested_shallow_benchmarks,
    nested_deep_benchmarks,
);
criterion_main!(benches);
