mod common;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn raster_immediate(c: &mut Criterion) {
    let mut gl = common::make_context();

    c.bench_function("raster/immediate", |b| {
        b.iter(|| {
            common::draw_scene(black_box(&mut gl));
            black_box(gl.framebuffer().hash64())
        })
    });
}

criterion_group!(benches, raster_immediate);
criterion_main!(benches);
