//! Benchmarks for the facetone pipeline.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use facetone::{
    apply_color, apply_filter_chain, build_filter_chain, detect_region, Channels, Colour,
    DetectionConfig, EffectOptions, PixelBuffer, Texture,
};

/// Skin-toned frame with a red band where the mouth is expected.
fn portrait(width: u32, height: u32) -> PixelBuffer {
    let mut buffer = PixelBuffer::filled(width, height, Channels::Rgb, &[230, 215, 200]).unwrap();
    let (cx, cy) = (width / 2, height * 7 / 10);
    let (half_w, half_h) = (width / 12, height / 40);
    for y in cy - half_h..=cy + half_h {
        for x in cx - half_w..=cx + half_w {
            if let Some(pixel) = buffer.pixel_mut(x, y) {
                pixel.copy_from_slice(&[170, 60, 70]);
            }
        }
    }
    buffer
}

// -- Detection --

fn bench_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("detection");
    let config = DetectionConfig::default();

    for (width, height) in [(320, 240), (1280, 960)] {
        let buffer = portrait(width, height);
        group.bench_with_input(
            BenchmarkId::new("detect_region", format!("{}x{}", width, height)),
            &buffer,
            |b, buffer| b.iter(|| detect_region(black_box(buffer), &config).unwrap()),
        );
    }

    group.finish();
}

// -- Compositing --

fn bench_compositing(c: &mut Criterion) {
    let mut group = c.benchmark_group("compositing");

    let buffer = portrait(1280, 960);
    let candidates = detect_region(&buffer, &DetectionConfig::default()).unwrap();
    let options = EffectOptions::new(Colour::rgb(194, 24, 91), 70, Texture::Gloss).unwrap();

    group.bench_function("apply_color_1280x960", |b| {
        b.iter(|| apply_color(black_box(&buffer), black_box(&candidates), &options))
    });

    group.finish();
}

// -- Filter chains --

fn bench_filter_chains(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_chains");
    group.sample_size(20);

    let buffer = portrait(640, 480);
    for preset in ["refinement", "narrowing", "bridge_adjustment"] {
        group.bench_function(BenchmarkId::new("apply_filter_chain", preset), |b| {
            b.iter(|| {
                let chain = build_filter_chain(preset, 60, true).unwrap();
                apply_filter_chain(black_box(&buffer), chain).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_detection, bench_compositing, bench_filter_chains);
criterion_main!(benches);
