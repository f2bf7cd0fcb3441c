// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use iced_poster::domain::ui::{AspectRatio, PlaceholderResolution};
use iced_poster::placeholder::{decode_dimensions, BlurHashDecoder, PlaceholderDecoder};
use std::hint::black_box;

const HASH: &str = "dI9Qjlof00RjxukBRjM{ITaz-;j[WBj[t7oeIUaxt7WB";

fn placeholder_decode_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("placeholder_decode");
    let decoder = BlurHashDecoder::default();
    let ratio = AspectRatio::new(0.66);

    for resolution in [8u32, 16, 32, 128] {
        let (width, height) = decode_dimensions(ratio, PlaceholderResolution::new(resolution));
        group.bench_with_input(
            BenchmarkId::from_parameter(resolution),
            &(width, height),
            |b, &(width, height)| {
                b.iter(|| black_box(decoder.decode(black_box(HASH), width, height)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, placeholder_decode_benchmark);
criterion_main!(benches);
