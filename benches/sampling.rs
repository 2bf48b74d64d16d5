//! Benchmarks for parsing, sampling and interaction
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use plotty_rs::{
    Controller, Expression, InputEvent, ParameterSet, PlotSettings, SampleBuffer, Sampler,
    SliderRange, Viewport,
};

const WAVEPACKET: &str = "a*sin(2*pi*k*x)*exp(-((x-mu)/sigma)**2/2)/(sqrt(pi*sigma**2))";

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for (name, source) in [
        ("simple", "x^2"),
        ("quadratic", "a*x**2 + b*x + c"),
        ("wavepacket", WAVEPACKET),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, source| {
            b.iter(|| Expression::parse(black_box(source)))
        });
    }

    group.finish();
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");
    let expr = Expression::parse(WAVEPACKET).unwrap();
    let params = ParameterSet::for_expression(&expr, SliderRange::default());

    for width in [400.0, 1000.0, 4000.0] {
        let view = Viewport::new((-5.0, 5.0), (-1.0, 1.0), (width, 600.0));
        let sampler = Sampler::new(&expr, &params, &view, 1.0);
        let mut buffer = SampleBuffer::new();

        group.throughput(Throughput::Elements(sampler.len() as u64));
        group.bench_with_input(BenchmarkId::new("refill", width), &sampler, |b, sampler| {
            b.iter(|| {
                buffer.refill(black_box(sampler));
                black_box(buffer.len())
            })
        });
    }

    group.finish();
}

fn bench_segments(c: &mut Criterion) {
    let expr = Expression::parse("tan(x)").unwrap();
    let view = Viewport::new((-20.0, 20.0), (-5.0, 5.0), (2000.0, 600.0));
    let mut buffer = SampleBuffer::new();
    buffer.refill(&Sampler::new(&expr, &(), &view, 1.0));

    c.bench_function("segments_2000", |b| b.iter(|| black_box(buffer.segments())));
}

fn bench_interaction(c: &mut Criterion) {
    let mut group = c.benchmark_group("interaction");
    let view = Viewport::new((-5.0, 5.0), (-1.0, 1.0), (1200.0, 800.0));

    group.bench_function("drag_frame", |b| {
        let mut controller = Controller::with_expression(PlotSettings::default(), view, WAVEPACKET);
        controller.handle(InputEvent::PointerDown { pos: [600.0, 400.0] });
        let mut offset = 0.0;
        b.iter(|| {
            offset = (offset + 1.0) % 100.0;
            controller.handle(InputEvent::PointerMove {
                pos: [600.0 + offset, 400.0],
            })
        })
    });

    group.bench_function("slider_frame", |b| {
        let mut controller = Controller::with_expression(PlotSettings::default(), view, WAVEPACKET);
        let mut value = 0.0;
        b.iter(|| {
            value = if value > 5.0 { 0.0 } else { value + 0.1 };
            controller.handle(InputEvent::SliderChange {
                name: "k".to_string(),
                value,
            })
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_sampling,
    bench_segments,
    bench_interaction,
);

criterion_main!(benches);
