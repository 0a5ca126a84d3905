//! Conversion benchmarks: aggregation, record encoding and the full writer.
//!
//! Run with: `cargo bench --package tickhst-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::io;
use tickhst_bench::synthetic_ticks;
use tickhst_lib::{
    BarRecord, ConverterConfig, Header, HstConverter, HstError, TickBucketer, Timeframe, aggregate,
};

fn aggregate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for size in [10usize, 100, 1_000] {
        let ticks = synthetic_ticks("EURUSD", 1_704_067_200, size, 10);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &ticks, |b, ticks| {
            b.iter(|| aggregate(black_box(1_704_067_200), black_box(ticks)));
        });
    }

    group.finish();
}

fn encode_benchmark(c: &mut Criterion) {
    let ticks = synthetic_ticks("EURUSD", 1_704_067_200, 100, 10);
    let Some(bar) = aggregate(1_704_067_200, &ticks) else {
        return;
    };
    let record = BarRecord::from_bar(&bar, 2);
    let header = Header::new(60, "EURUSD");

    let mut group = c.benchmark_group("encode");
    group.bench_function("record", |b| b.iter(|| black_box(&record).encode()));
    group.bench_function("header", |b| b.iter(|| black_box(&header).encode()));
    group.finish();
}

fn convert_benchmark(c: &mut Criterion) {
    let Ok(runtime) = tokio::runtime::Runtime::new() else {
        return;
    };
    let ticks = synthetic_ticks("EURUSD", 1_704_067_200, 86_400, 1_000);

    let mut group = c.benchmark_group("convert");
    group.sample_size(20);
    group.throughput(Throughput::Elements(ticks.len() as u64));

    for timeframe in [Timeframe::Minute1, Timeframe::Hour1] {
        group.bench_with_input(
            BenchmarkId::from_parameter(timeframe),
            &ticks,
            |b, ticks| {
                b.to_async(&runtime).iter(|| async {
                    let config = ConverterConfig::new(timeframe.minutes(), 2, "EURUSD", ".");
                    let converter = HstConverter::with_sink(config, || Ok(io::sink()))?;
                    let mut bucketer = TickBucketer::new(timeframe.minutes());
                    for tick in ticks {
                        if let Some(batch) = bucketer.push(tick.clone()) {
                            converter.pack_ticks(batch.bucket_start, &batch.ticks).await?;
                        }
                    }
                    if let Some(batch) = bucketer.finish() {
                        converter.pack_ticks(batch.bucket_start, &batch.ticks).await?;
                    }
                    Ok::<_, HstError>(converter.finish().await?)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, aggregate_benchmark, encode_benchmark, convert_benchmark);
criterion_main!(benches);
