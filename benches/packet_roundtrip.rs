//! Construction and extraction benchmarks for the packet surface.

use criterion::{Criterion, criterion_group, criterion_main};
use packline::Packet;
use std::hint::black_box;

fn bench_scalar_roundtrip(c: &mut Criterion) {
    c.bench_function("create_and_get_float", |b| {
        b.iter(|| {
            let packet = Packet::create_float_at(black_box(1.5), black_box(16_000));
            black_box(packet.get_float().unwrap())
        })
    });
}

fn bench_vector_roundtrip(c: &mut Criterion) {
    let values: Vec<f32> = (0..512).map(|i| i as f32).collect();

    c.bench_function("create_float_vector_512", |b| {
        b.iter(|| Packet::create_float_vector(black_box(values.clone())))
    });

    let packet = Packet::create_float_vector(values);
    c.bench_function("get_float_vector_into_512", |b| {
        let mut dest = Vec::with_capacity(512);
        b.iter(|| {
            let written = packet.get_float_vector_into(&mut dest).unwrap();
            black_box(written)
        })
    });
}

fn bench_validation(c: &mut Criterion) {
    let packet = Packet::create_float_vector((0..512).map(|i| i as f32).collect());
    c.bench_function("validate_as_float_vector", |b| {
        b.iter(|| black_box(packet.validate_as_float_vector().is_ok()))
    });
}

criterion_group!(benches, bench_scalar_roundtrip, bench_vector_roundtrip, bench_validation);
criterion_main!(benches);
