//! Benchmarks for comparison matrix construction and full report assembly.
//!
//! Run with: cargo bench -p benchviz-core --bench comparison_bench

use benchviz_core::{BenchmarkRecord, Measurements, MetricValue, RunMetadata, assemble, build_comparison};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn create_record(idx: usize) -> BenchmarkRecord {
  BenchmarkRecord::new(
    format!("test_{}", idx),
    if idx % 2 == 0 { "af_ktls" } else { "userspace" },
    Measurements {
      sent: Some(MetricValue::Int((idx as i64 + 1) * 4096)),
      received: Some(MetricValue::Int((idx as i64 % 7) * 1024)),
      elapsed: Some(MetricValue::Float(idx as f64 * 0.25 + 0.1)),
    },
  )
  .with_config("payload_size", (idx * 64).to_string())
  .with_config(format!("opt_{}", idx % 5), "on")
}

fn bench_comparison(c: &mut Criterion) {
  let mut group = c.benchmark_group("comparison");

  for size in [4usize, 16, 64, 256] {
    let ints: Vec<MetricValue> = (0..size).map(|i| MetricValue::Int(i as i64 * 100)).collect();
    let floats: Vec<MetricValue> = (0..size).map(|i| MetricValue::Float(i as f64 * 0.3)).collect();

    group.bench_with_input(BenchmarkId::new("int", size), &ints, |b, values| {
      b.iter(|| build_comparison(black_box(values)))
    });
    group.bench_with_input(BenchmarkId::new("float", size), &floats, |b, values| {
      b.iter(|| build_comparison(black_box(values)))
    });
  }

  group.finish();
}

fn bench_assemble(c: &mut Criterion) {
  let mut group = c.benchmark_group("assemble");
  let metadata = RunMetadata::capture();

  for size in [8usize, 64] {
    let records: Vec<BenchmarkRecord> = (0..size).map(create_record).collect();
    group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
      b.iter(|| assemble(black_box(records), metadata.clone()))
    });
  }

  group.finish();
}

criterion_group!(benches, bench_comparison, bench_assemble);
criterion_main!(benches);
