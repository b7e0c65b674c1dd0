//! Grayscale morphology over rectangular structuring windows.
//!
//! Each operator slides a window anchored at its center and reduces the
//! covered samples per channel. Erosion takes the minimum, dilation the
//! maximum, and opening and closing chain the two to remove bright or dark
//! specks smaller than the window.

use rasterkit_image::{Color, Image, ImageError, ImageSize, Point};

use crate::border::BorderMode;
use crate::filter::{aperture_filter, Aperture};
use crate::parallel::Scheduler;

fn reduce_window<F>(ap: &Aperture<'_>, pick: F) -> Color
where
    F: Fn(f64, f64) -> f64,
{
    let mut out = Vec::with_capacity(ap.channels());
    for c in 0..ap.channels() {
        let mut acc = ap.sample(0, 0, c);
        for j in 0..ap.height() {
            for i in 0..ap.width() {
                acc = pick(acc, ap.sample(i, j, c));
            }
        }
        out.push(acc);
    }
    Color::new(out)
}

/// Erode an image, replacing each pixel with the per-channel window minimum.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `window` - The structuring window; the anchor sits at the window center.
/// * `iterations` - Number of chained passes, at least one.
/// * `border` - Border extrapolation mode.
/// * `scheduler` - Scheduler the row partitions run on.
///
/// # Returns
///
/// A newly allocated image in the source encoding.
///
/// # Example
///
/// ```
/// use rasterkit_image::{Color, Image, ImageSize, PixelEncoding};
/// use rasterkit_imgproc::border::BorderMode;
/// use rasterkit_imgproc::morphology::erode;
/// use rasterkit_imgproc::parallel::Scheduler;
///
/// let size = ImageSize { width: 5, height: 5 };
/// let mut image = Image::from_color(size, 1, PixelEncoding::U8, &Color::gray(0.0)).unwrap();
/// image.set(2, 2, 0, 255.0).unwrap();
///
/// let scheduler = Scheduler::new().unwrap();
/// let window = ImageSize { width: 3, height: 3 };
/// let out = erode(&image, window, 1, BorderMode::Replicate, &scheduler).unwrap();
/// assert_eq!(out.get(2, 2, 0).unwrap(), 0.0);
/// ```
pub fn erode(
    src: &Image,
    window: ImageSize,
    iterations: usize,
    border: BorderMode,
    scheduler: &Scheduler,
) -> Result<Image, ImageError> {
    let anchor = Point::new(window.width / 2, window.height / 2);
    aperture_filter(src, window, anchor, iterations, border, scheduler, |ap| {
        reduce_window(ap, f64::min)
    })
}

/// Dilate an image, replacing each pixel with the per-channel window maximum.
pub fn dilate(
    src: &Image,
    window: ImageSize,
    iterations: usize,
    border: BorderMode,
    scheduler: &Scheduler,
) -> Result<Image, ImageError> {
    let anchor = Point::new(window.width / 2, window.height / 2);
    aperture_filter(src, window, anchor, iterations, border, scheduler, |ap| {
        reduce_window(ap, f64::max)
    })
}

/// Open an image: erosion followed by dilation.
///
/// Both stages run the full iteration count. Opening removes bright details
/// smaller than the window while keeping larger shapes near their size.
pub fn open(
    src: &Image,
    window: ImageSize,
    iterations: usize,
    border: BorderMode,
    scheduler: &Scheduler,
) -> Result<Image, ImageError> {
    let eroded = erode(src, window, iterations, border, scheduler)?;
    dilate(&eroded, window, iterations, border, scheduler)
}

/// Close an image: dilation followed by erosion.
///
/// Both stages run the full iteration count. Closing removes dark details
/// smaller than the window.
pub fn close(
    src: &Image,
    window: ImageSize,
    iterations: usize,
    border: BorderMode,
    scheduler: &Scheduler,
) -> Result<Image, ImageError> {
    let dilated = dilate(src, window, iterations, border, scheduler)?;
    erode(&dilated, window, iterations, border, scheduler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterkit_image::PixelEncoding;

    fn size(width: usize, height: usize) -> ImageSize {
        ImageSize { width, height }
    }

    fn scheduler() -> Scheduler {
        Scheduler::with_workers(1).unwrap()
    }

    fn inverted(image: &Image) -> Image {
        let samples: Vec<f64> = image.to_vec().iter().map(|v| 255.0 - v).collect();
        Image::from_samples(image.size(), image.num_channels(), image.encoding(), &samples)
            .unwrap()
    }

    #[test]
    fn erode_takes_the_window_minimum() -> Result<(), ImageError> {
        let mut image = Image::from_color(size(5, 5), 1, PixelEncoding::U8, &Color::gray(200.0))?;
        image.set(2, 2, 0, 10.0)?;
        let out = erode(&image, size(3, 3), 1, BorderMode::Replicate, &scheduler())?;
        // the dark pixel spreads across its 3x3 neighborhood
        for y in 1..4 {
            for x in 1..4 {
                assert_eq!(out.get(x, y, 0)?, 10.0);
            }
        }
        assert_eq!(out.get(0, 0, 0)?, 200.0);
        Ok(())
    }

    #[test]
    fn dilate_takes_the_window_maximum() -> Result<(), ImageError> {
        let mut image = Image::from_color(size(5, 5), 1, PixelEncoding::U8, &Color::gray(0.0))?;
        image.set(2, 2, 0, 255.0)?;
        let out = dilate(&image, size(3, 1), 1, BorderMode::Replicate, &scheduler())?;
        assert_eq!(out.get(1, 2, 0)?, 255.0);
        assert_eq!(out.get(3, 2, 0)?, 255.0);
        assert_eq!(out.get(2, 1, 0)?, 0.0);
        Ok(())
    }

    #[test]
    fn channels_reduce_independently() -> Result<(), ImageError> {
        let mut image =
            Image::from_color(size(3, 3), 2, PixelEncoding::F64, &Color::splat(50.0, 2))?;
        image.set(1, 1, 0, 200.0)?;
        image.set(1, 1, 1, 5.0)?;
        let out = dilate(&image, size(3, 3), 1, BorderMode::Replicate, &scheduler())?;
        assert_eq!(out.get(0, 0, 0)?, 200.0);
        assert_eq!(out.get(0, 0, 1)?, 50.0);
        Ok(())
    }

    #[test]
    fn dilation_is_erosion_of_the_complement() -> Result<(), ImageError> {
        let samples: Vec<f64> = (0..30).map(|i| (i * 7 % 256) as f64).collect();
        let image = Image::from_samples(size(6, 5), 1, PixelEncoding::U8, &samples)?;
        for window in [size(3, 3), size(2, 4), size(1, 3)] {
            for iterations in [1, 2] {
                let dilated =
                    dilate(&image, window, iterations, BorderMode::Replicate, &scheduler())?;
                let dual = inverted(&erode(
                    &inverted(&image),
                    window,
                    iterations,
                    BorderMode::Replicate,
                    &scheduler(),
                )?);
                assert_eq!(dilated, dual);
            }
        }
        Ok(())
    }

    #[test]
    fn open_and_close_are_exact_compositions() -> Result<(), ImageError> {
        let samples: Vec<f64> = (0..48).map(|i| (i * 13 % 256) as f64).collect();
        let image = Image::from_samples(size(8, 6), 1, PixelEncoding::U8, &samples)?;
        let s = scheduler();
        for window in [size(3, 3), size(2, 3)] {
            for iterations in [1, 2] {
                let opened = open(&image, window, iterations, BorderMode::Replicate, &s)?;
                let eroded = erode(&image, window, iterations, BorderMode::Replicate, &s)?;
                let composed = dilate(&eroded, window, iterations, BorderMode::Replicate, &s)?;
                assert_eq!(opened, composed);

                let closed = close(&image, window, iterations, BorderMode::Replicate, &s)?;
                let dilated = dilate(&image, window, iterations, BorderMode::Replicate, &s)?;
                let composed = erode(&dilated, window, iterations, BorderMode::Replicate, &s)?;
                assert_eq!(closed, composed);
            }
        }
        Ok(())
    }

    #[test]
    fn open_removes_bright_specks() -> Result<(), ImageError> {
        let mut image = Image::from_color(size(7, 7), 1, PixelEncoding::U8, &Color::gray(0.0))?;
        image.set(3, 3, 0, 255.0)?;
        let out = open(&image, size(3, 3), 1, BorderMode::Replicate, &scheduler())?;
        assert!(out.to_vec().iter().all(|&v| v == 0.0));
        Ok(())
    }

    #[test]
    fn close_removes_dark_specks() -> Result<(), ImageError> {
        let mut image = Image::from_color(size(7, 7), 1, PixelEncoding::U8, &Color::gray(255.0))?;
        image.set(3, 3, 0, 0.0)?;
        let out = close(&image, size(3, 3), 1, BorderMode::Replicate, &scheduler())?;
        assert!(out.to_vec().iter().all(|&v| v == 255.0));
        Ok(())
    }

    #[test]
    fn window_validation_propagates() -> Result<(), ImageError> {
        let image = Image::new(size(3, 3), 1, PixelEncoding::U8)?;
        let res = erode(&image, size(0, 3), 1, BorderMode::Zero, &scheduler());
        assert_eq!(res.unwrap_err(), ImageError::InvalidWindowSize(0, 3));
        let res = dilate(&image, size(3, 3), 0, BorderMode::Zero, &scheduler());
        assert_eq!(res.unwrap_err(), ImageError::InvalidIterations(0));
        Ok(())
    }
}
