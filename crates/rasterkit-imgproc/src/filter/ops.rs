use rasterkit_image::{Color, Image, ImageError, ImageSize, Point};

use crate::border::BorderMode;
use crate::parallel::Scheduler;

use super::kernels;
use super::{aperture_filter, conv2d, Aperture};

/// Blur an image with a windowed mean.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `window` - The aperture size; the anchor sits at the window center.
/// * `iterations` - Number of chained passes, at least one.
/// * `border` - Border extrapolation mode.
/// * `scheduler` - Scheduler the row partitions run on.
///
/// # Returns
///
/// A newly allocated image in the source encoding.
pub fn box_blur(
    src: &Image,
    window: ImageSize,
    iterations: usize,
    border: BorderMode,
    scheduler: &Scheduler,
) -> Result<Image, ImageError> {
    let anchor = Point::new(window.width / 2, window.height / 2);
    let n = (window.width * window.height) as f64;
    aperture_filter(src, window, anchor, iterations, border, scheduler, |ap| {
        let mut means = Vec::with_capacity(ap.channels());
        for c in 0..ap.channels() {
            let mut sum = 0.0;
            for j in 0..ap.height() {
                for i in 0..ap.width() {
                    sum += ap.sample(i, j, c);
                }
            }
            means.push(sum / n);
        }
        Color::new(means)
    })
}

/// Blur an image with a windowed per-channel median.
///
/// Even-sized windows use the lower median of the sorted samples.
pub fn median_blur(
    src: &Image,
    window: ImageSize,
    iterations: usize,
    border: BorderMode,
    scheduler: &Scheduler,
) -> Result<Image, ImageError> {
    let anchor = Point::new(window.width / 2, window.height / 2);
    aperture_filter(src, window, anchor, iterations, border, scheduler, |ap| {
        let mut values = Vec::new();
        let mut medians = Vec::with_capacity(ap.channels());
        for c in 0..ap.channels() {
            ap.channel_samples(c, &mut values);
            values.sort_unstable_by(f64::total_cmp);
            medians.push(values[(values.len() - 1) / 2]);
        }
        Color::new(medians)
    })
}

/// Blur an image with the Kuwahara adaptive mean.
///
/// The `(2 * radius + 1)` square window splits into four overlapping
/// `(radius + 1)` square quadrants around the center; the output takes the
/// per-channel mean of the quadrant with the smallest summed variance, which
/// smooths regions while keeping edges.
///
/// # Errors
///
/// Returns an error if `radius` is zero.
pub fn kuwahara_blur(
    src: &Image,
    radius: usize,
    iterations: usize,
    border: BorderMode,
    scheduler: &Scheduler,
) -> Result<Image, ImageError> {
    if radius == 0 {
        return Err(ImageError::InvalidWindowSize(1, 1));
    }
    let side = 2 * radius + 1;
    let window = ImageSize {
        width: side,
        height: side,
    };
    let anchor = Point::new(radius, radius);
    aperture_filter(src, window, anchor, iterations, border, scheduler, |ap| {
        Color::new(kuwahara_pick(ap, radius))
    })
}

// Mean of the lowest-variance quadrant, per channel. Ties keep the first
// quadrant in top-left, top-right, bottom-left, bottom-right order.
fn kuwahara_pick(ap: &Aperture<'_>, radius: usize) -> Vec<f64> {
    let q = radius + 1;
    let n = (q * q) as f64;
    let starts = [(0, 0), (radius, 0), (0, radius), (radius, radius)];

    let mut best_means = vec![0.0; ap.channels()];
    let mut best_score = f64::INFINITY;
    let mut means = vec![0.0; ap.channels()];
    for (sx, sy) in starts {
        let mut score = 0.0;
        for (c, mean_slot) in means.iter_mut().enumerate() {
            let mut sum = 0.0;
            let mut sum_sq = 0.0;
            for j in sy..sy + q {
                for i in sx..sx + q {
                    let v = ap.sample(i, j, c);
                    sum += v;
                    sum_sq += v * v;
                }
            }
            let mean = sum / n;
            *mean_slot = mean;
            score += sum_sq / n - mean * mean;
        }
        if score < best_score {
            best_score = score;
            best_means.copy_from_slice(&means);
        }
    }
    best_means
}

/// Sharpen an image with the fixed 3x3 enhancement kernel.
pub fn sharpen(
    src: &Image,
    border: BorderMode,
    scheduler: &Scheduler,
) -> Result<Image, ImageError> {
    let kernel = kernels::sharpen_kernel();
    conv2d(
        src,
        &kernel,
        kernel.centered_anchor(),
        1.0,
        0.0,
        border,
        scheduler,
    )
}

/// Detect edges with the fixed 3x3 Laplacian kernel.
pub fn laplacian(
    src: &Image,
    border: BorderMode,
    scheduler: &Scheduler,
) -> Result<Image, ImageError> {
    let kernel = kernels::laplacian_kernel();
    conv2d(
        src,
        &kernel,
        kernel.centered_anchor(),
        1.0,
        0.0,
        border,
        scheduler,
    )
}

/// Horizontal-derivative Sobel edge response.
///
/// Negative responses clamp to zero when the source encoding is narrow.
pub fn sobel_horizontal(
    src: &Image,
    border: BorderMode,
    scheduler: &Scheduler,
) -> Result<Image, ImageError> {
    let kernel = kernels::sobel_horizontal_kernel();
    conv2d(
        src,
        &kernel,
        kernel.centered_anchor(),
        1.0,
        0.0,
        border,
        scheduler,
    )
}

/// Vertical-derivative Sobel edge response.
///
/// Negative responses clamp to zero when the source encoding is narrow.
pub fn sobel_vertical(
    src: &Image,
    border: BorderMode,
    scheduler: &Scheduler,
) -> Result<Image, ImageError> {
    let kernel = kernels::sobel_vertical_kernel();
    conv2d(
        src,
        &kernel,
        kernel.centered_anchor(),
        1.0,
        0.0,
        border,
        scheduler,
    )
}
