use crate::assets::generate_review_table;
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use review_word_stats::aggregation::{aggregate, aggregate_partitioned};

const ROW_COUNTS: [usize; 3] = [1_000, 10_000, 100_000];

pub fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for row_count in ROW_COUNTS {
        let table = generate_review_table(row_count);
        group.throughput(Throughput::Elements(row_count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(row_count), &table, |b, table| {
            b.iter(|| aggregate(black_box(table)).unwrap())
        });
    }

    group.finish();
}

pub fn bench_aggregate_partitioned(c: &mut Criterion) {
    let table = generate_review_table(100_000);
    let mut group = c.benchmark_group("aggregate_partitioned");
    group.throughput(Throughput::Elements(table.len() as u64));

    for partitions in [2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(partitions),
            &partitions,
            |b, &partitions| b.iter(|| aggregate_partitioned(black_box(&table), partitions).unwrap()),
        );
    }

    group.finish();
}
