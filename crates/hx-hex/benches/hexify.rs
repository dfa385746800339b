use criterion::{Criterion, black_box, criterion_group, criterion_main};
use hx_core::{Image, Rgba8};
use hx_hex::{ConvertOptions, Execution, hexify_with};

fn gradient(width: usize, height: usize) -> Image<Rgba8> {
    let mut data = Vec::with_capacity(width * height);
    for i in 0..(width * height) {
        let v = (i % 251) as u8;
        data.push([v, v.wrapping_mul(3), 255 - v, 255]);
    }
    Image::from_vec(width, height, data).expect("valid image")
}

fn bench_hexify_sequential(c: &mut Criterion) {
    let img = gradient(1280, 1024);
    let view = img.as_view();
    let opts = ConvertOptions {
        execution: Execution::Sequential,
        ..ConvertOptions::default()
    };

    c.bench_function("hexify_sequential_1280x1024", |b| {
        b.iter(|| {
            let out = hexify_with(black_box(&view), &opts).expect("conversion succeeds");
            black_box(out);
        });
    });
}

fn bench_hexify_parallel_rows(c: &mut Criterion) {
    let img = gradient(1280, 1024);
    let view = img.as_view();
    let opts = ConvertOptions {
        execution: Execution::ParallelRows,
        ..ConvertOptions::default()
    };

    c.bench_function("hexify_parallel_rows_1280x1024", |b| {
        b.iter(|| {
            let out = hexify_with(black_box(&view), &opts).expect("conversion succeeds");
            black_box(out);
        });
    });
}

criterion_group!(benches, bench_hexify_sequential, bench_hexify_parallel_rows);
criterion_main!(benches);
