//! Filter operation benchmarks: insert/query throughput on both digest
//! paths, and wire decoding of a megabyte-class filter.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use bloomwire::{BloomFilter, FilterSize};

fn bench_insert_and_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter-ops");

    // k = 7 exercises the SHA-256 path, k = 16 the SHA-512 path.
    for hash_count in [7u8, 16] {
        group.bench_with_input(
            BenchmarkId::new("insert", hash_count),
            &hash_count,
            |b, &hash_count| {
                let mut filter = BloomFilter::with_parameters(20, hash_count).unwrap();
                let mut i = 0u64;
                b.iter(|| {
                    filter.insert(black_box(&i.to_be_bytes()));
                    i = i.wrapping_add(1);
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("query", hash_count),
            &hash_count,
            |b, &hash_count| {
                let mut filter = BloomFilter::with_parameters(20, hash_count).unwrap();
                for i in 0..100_000u64 {
                    filter.insert(&i.to_be_bytes());
                }
                let mut i = 0u64;
                b.iter(|| {
                    black_box(filter.contains(black_box(&i.to_be_bytes())));
                    // Alternate between present and absent probes.
                    i = (i + 1) % 200_000;
                });
            },
        );
    }

    group.finish();
}

fn bench_wire_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("wire-codec");

    let mut filter = BloomFilter::with_size(FilterSize::M1, 500_000).unwrap();
    for i in 0..500_000u64 {
        filter.insert(&i.to_be_bytes());
    }
    let chunks: Vec<Vec<u8>> = bloomwire::to_chunks(&filter).collect();
    let encoded_len: usize = chunks.iter().map(Vec::len).sum();

    group.throughput(Throughput::Bytes(encoded_len as u64));
    group.bench_function("decode_1mb", |b| {
        b.iter(|| {
            let restored: BloomFilter = bloomwire::from_chunks(black_box(&chunks)).unwrap();
            black_box(restored);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_insert_and_query, bench_wire_decode);
criterion_main!(benches);
