use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rasterkit_image::{Image, ImageSize, PixelEncoding};
use rasterkit_imgproc::border::BorderMode;
use rasterkit_imgproc::filter::{box_blur, median_blur, sharpen};
use rasterkit_imgproc::morphology::dilate;
use rasterkit_imgproc::parallel::Scheduler;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn create_test_image(width: usize, height: usize) -> Image {
    let mut rng = StdRng::seed_from_u64(42);
    let samples: Vec<f64> = (0..(width * height))
        .map(|_| rng.random::<u8>() as f64)
        .collect();
    let size = ImageSize { width, height };
    Image::from_samples(size, 1, PixelEncoding::U8, &samples).unwrap()
}

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("Filters");

    for (width, height) in [(640, 480), (1920, 1080)] {
        let parameter_string = format!("{}x{}", width, height);
        let src = create_test_image(width, height);
        let window = ImageSize {
            width: 3,
            height: 3,
        };

        let serial = Scheduler::with_workers(1).unwrap();
        let parallel = Scheduler::new().unwrap();

        group.bench_with_input(
            BenchmarkId::new("box_blur_serial", &parameter_string),
            &src,
            |b, src| {
                b.iter(|| {
                    black_box(box_blur(src, window, 1, BorderMode::Replicate, &serial)).unwrap()
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("box_blur_parallel", &parameter_string),
            &src,
            |b, src| {
                b.iter(|| {
                    black_box(box_blur(src, window, 1, BorderMode::Replicate, &parallel)).unwrap()
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("median_blur", &parameter_string),
            &src,
            |b, src| {
                b.iter(|| {
                    black_box(median_blur(src, window, 1, BorderMode::Replicate, &parallel))
                        .unwrap()
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("sharpen", &parameter_string),
            &src,
            |b, src| {
                b.iter(|| black_box(sharpen(src, BorderMode::Replicate, &parallel)).unwrap())
            },
        );

        group.bench_with_input(
            BenchmarkId::new("dilate", &parameter_string),
            &src,
            |b, src| {
                b.iter(|| {
                    black_box(dilate(src, window, 1, BorderMode::Replicate, &parallel)).unwrap()
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);
