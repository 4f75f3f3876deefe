use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use retouch::prelude::*;

fn test_image(size: u32) -> PixelBuffer {
    PixelBuffer::from_fn(size, size, |x, y| {
        Color::rgba((x * 7) as u8, (y * 13) as u8, (x ^ y) as u8, 255)
    })
}

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");

    for size in [64u32, 512] {
        let image = test_image(size);
        let requests = [
            FilterRequest::Grayscale,
            FilterRequest::Invert,
            FilterRequest::Blur,
            FilterRequest::Brightness(40),
            FilterRequest::Contrast(1.5),
        ];
        for request in requests {
            group.bench_with_input(
                BenchmarkId::new(request.id(), size),
                &image,
                |b, image| b.iter(|| request.apply(black_box(image))),
            );
        }
    }

    group.finish();
}

fn bench_session_cache(c: &mut Criterion) {
    let mut session = FilterSession::new();
    session.load(test_image(512));

    c.bench_function("session_blur_cached", |b| {
        b.iter(|| session.apply_filter(black_box(FilterRequest::Blur)))
    });
}

criterion_group!(benches, bench_filters, bench_session_cache);
criterion_main!(benches);
