//! Tidal Series Benchmarks
//!
//! Performance benchmarks for rolling windows, exponential means,
//! resampling and the vector kernels.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tidal_series::{Decay, InterpolationMethod, Kernel, ResampleOrigin, Series};

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn gen_series(len: usize) -> Series<f64> {
    let index: Vec<i64> = (0..len as i64).map(|i| i * 1_000).collect();
    let values: Vec<f64> = (0..len)
        .map(|i| {
            let x = i as f64;
            if i % 97 == 0 {
                f64::NAN
            } else {
                (x * 0.001).sin() + 0.0001 * x
            }
        })
        .collect();
    Series::new(1_000, index, values).expect("valid series")
}

fn rolling_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("rolling");
    for len in SIZES {
        let series = gen_series(len);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("mean_20", len), &series, |b, s| {
            b.iter(|| black_box(s.rolling(20).expect("window").mean()))
        });
        group.bench_with_input(BenchmarkId::new("median_20", len), &series, |b, s| {
            b.iter(|| black_box(s.rolling(20).expect("window").median()))
        });
    }
    group.finish();
}

fn ewm_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("ewm");
    for len in SIZES {
        let series = gen_series(len);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("adjusted", len), &series, |b, s| {
            b.iter(|| {
                let w = s.ewm(Decay::Span(10.0), true, false).expect("decay");
                black_box(w.mean())
            })
        });
    }
    group.finish();
}

fn resample_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample");
    for len in SIZES {
        let series = gen_series(len);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("downsample_sum", len), &series, |b, s| {
            b.iter(|| {
                let r = s.clone().resample(60_000, ResampleOrigin::Epoch).expect("freq");
                black_box(r.sum())
            })
        });
        group.bench_with_input(BenchmarkId::new("upsample_linear", len), &series, |b, s| {
            b.iter(|| {
                let r = s.clone().resample(250, ResampleOrigin::Epoch).expect("freq");
                black_box(r.interpolate(InterpolationMethod::Linear))
            })
        });
    }
    group.finish();
}

fn kernel_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("kernel");
    let len = 100_000;
    group.throughput(Throughput::Elements(len as u64));

    for kernel in [Kernel::Scalar, Kernel::Simd] {
        let a = gen_series(len).with_kernel(kernel);
        let b = gen_series(len).with_kernel(kernel);
        group.bench_function(BenchmarkId::new("mul", kernel.name()), |bench| {
            bench.iter(|| {
                let mut out = a.clone();
                out.mul(&b).expect("equal lengths");
                black_box(out)
            })
        });
        group.bench_function(BenchmarkId::new("dot", kernel.name()), |bench| {
            bench.iter(|| black_box(a.dot(&b).expect("equal lengths")))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    rolling_benchmark,
    ewm_benchmark,
    resample_benchmark,
    kernel_benchmark
);
criterion_main!(benches);
