//! Criterion benchmarks for wavedit-dsp transforms and convolution
//!
//! Run with: cargo bench -p wavedit-dsp
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::sync::Arc;
use wavedit_dsp::{
    ConvolutionEngine, Partitioner, SpectralEngine, TransformMethod, WindowFunction,
    create_filter, downsample, to_8bit,
};

const SAMPLE_RATE: u32 = 44100;
const LENGTHS: &[usize] = &[256, 1024, 4096];

fn generate_test_signal(size: usize) -> Vec<i16> {
    (0..size)
        .map(|i| {
            let t = i as f64 / f64::from(SAMPLE_RATE);
            ((2.0 * std::f64::consts::PI * 440.0 * t).sin() * 16000.0) as i16
        })
        .collect()
}

fn bench_forward(c: &mut Criterion) {
    let mut group = c.benchmark_group("Forward");
    let workers = Arc::new(Partitioner::available().unwrap());

    for &len in LENGTHS {
        let input = generate_test_signal(len);
        for method in [TransformMethod::Direct, TransformMethod::Fft] {
            let engine = SpectralEngine::new(Arc::clone(&workers)).with_method(method);
            group.bench_with_input(BenchmarkId::new(method.to_string(), len), &len, |b, _| {
                b.iter(|| black_box(engine.forward(black_box(&input), WindowFunction::Welch)));
            });
        }
    }

    group.finish();
}

fn bench_kernel(c: &mut Criterion) {
    let mut group = c.benchmark_group("Kernel");
    let engine = SpectralEngine::new(Arc::new(Partitioner::available().unwrap()));

    for &len in LENGTHS {
        group.bench_with_input(BenchmarkId::new("lowpass", len), &len, |b, &len| {
            b.iter(|| {
                let mask = create_filter(len, 2000.0, SAMPLE_RATE);
                black_box(engine.inverse(&mask))
            });
        });
    }

    group.finish();
}

fn bench_convolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("Convolution");
    let input = generate_test_signal(8192);

    for parts in [1, 2, 4, 8] {
        let engine = ConvolutionEngine::new(Arc::new(Partitioner::new(parts).unwrap()));
        let kernel: Vec<i16> = (0..128).map(|i| 64 - i as i16).collect();
        group.bench_with_input(BenchmarkId::new("parts", parts), &parts, |b, _| {
            b.iter(|| black_box(engine.convolve(&kernel, black_box(&input), false)));
        });
    }

    group.finish();
}

fn bench_downsample(c: &mut Criterion) {
    let input = generate_test_signal(SAMPLE_RATE as usize);

    c.bench_function("downsample_44100_to_8000_8bit", |b| {
        b.iter(|| black_box(downsample(black_box(&input), SAMPLE_RATE, 8000, Some(to_8bit))));
    });
}

criterion_group!(
    benches,
    bench_forward,
    bench_kernel,
    bench_convolution,
    bench_downsample,
);

criterion_main!(benches);
