//! Fixed and adaptive thresholding.

use rasterkit_image::{Color, Image, ImageError, ImageSize, Point};

use crate::border::BorderMode;
use crate::filter::aperture_filter;
use crate::parallel::Scheduler;

/// Rule applied to each sample against its threshold.
///
/// The variants follow the classic threshold family: comparisons are strict,
/// so a sample exactly at the threshold counts as not above it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThresholdMode {
    /// Above the threshold becomes `max_value`, otherwise zero.
    Binary,
    /// Above the threshold becomes zero, otherwise `max_value`.
    BinaryInv,
    /// Above the threshold becomes the threshold, otherwise unchanged.
    Truncate,
    /// Above the threshold stays unchanged, otherwise zero.
    ToZero,
    /// Above the threshold becomes zero, otherwise unchanged.
    ToZeroInv,
}

fn apply_mode(value: f64, thresh: f64, max_value: f64, mode: ThresholdMode) -> f64 {
    let above = value > thresh;
    match mode {
        ThresholdMode::Binary => {
            if above {
                max_value
            } else {
                0.0
            }
        }
        ThresholdMode::BinaryInv => {
            if above {
                0.0
            } else {
                max_value
            }
        }
        ThresholdMode::Truncate => value.min(thresh),
        ThresholdMode::ToZero => {
            if above {
                value
            } else {
                0.0
            }
        }
        ThresholdMode::ToZeroInv => {
            if above {
                0.0
            } else {
                value
            }
        }
    }
}

/// Threshold every sample of an image against a fixed value.
///
/// All channels share the same threshold and are mapped independently.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `thresh` - The threshold compared against each sample.
/// * `max_value` - Output value for the binary modes.
/// * `mode` - The mapping rule.
/// * `scheduler` - Scheduler the row partitions run on.
///
/// # Returns
///
/// A newly allocated image in the source encoding.
///
/// # Example
///
/// ```
/// use rasterkit_image::{Image, ImageSize, PixelEncoding};
/// use rasterkit_imgproc::parallel::Scheduler;
/// use rasterkit_imgproc::threshold::{threshold, ThresholdMode};
///
/// let size = ImageSize { width: 2, height: 1 };
/// let image = Image::from_samples(size, 1, PixelEncoding::U8, &[30.0, 220.0]).unwrap();
/// let scheduler = Scheduler::new().unwrap();
///
/// let out = threshold(&image, 128.0, 255.0, ThresholdMode::Binary, &scheduler).unwrap();
/// assert_eq!(out.to_vec(), vec![0.0, 255.0]);
/// ```
pub fn threshold(
    src: &Image,
    thresh: f64,
    max_value: f64,
    mode: ThresholdMode,
    scheduler: &Scheduler,
) -> Result<Image, ImageError> {
    let window = ImageSize {
        width: 1,
        height: 1,
    };
    // a 1x1 window never reaches outside the image, so the border mode is
    // irrelevant here
    aperture_filter(
        src,
        window,
        Point::new(0, 0),
        1,
        BorderMode::Zero,
        scheduler,
        |ap| {
            let mut out = Vec::with_capacity(ap.channels());
            for c in 0..ap.channels() {
                out.push(apply_mode(ap.center(c), thresh, max_value, mode));
            }
            Color::new(out)
        },
    )
}

/// Threshold each sample against the mean of its neighborhood.
///
/// The local threshold for a pixel is the windowed box mean minus `delta`,
/// computed per channel. Only [`ThresholdMode::Binary`] and
/// [`ThresholdMode::BinaryInv`] are supported.
///
/// # Errors
///
/// Returns an error for the non-binary modes or an empty window.
pub fn adaptive_threshold(
    src: &Image,
    max_value: f64,
    window: ImageSize,
    delta: f64,
    mode: ThresholdMode,
    border: BorderMode,
    scheduler: &Scheduler,
) -> Result<Image, ImageError> {
    if !matches!(mode, ThresholdMode::Binary | ThresholdMode::BinaryInv) {
        return Err(ImageError::InvalidThresholdMode);
    }
    let anchor = Point::new(window.width / 2, window.height / 2);
    let n = (window.width * window.height) as f64;
    aperture_filter(src, window, anchor, 1, border, scheduler, |ap| {
        let mut out = Vec::with_capacity(ap.channels());
        for c in 0..ap.channels() {
            let mut sum = 0.0;
            for j in 0..ap.height() {
                for i in 0..ap.width() {
                    sum += ap.sample(i, j, c);
                }
            }
            let local = sum / n - delta;
            out.push(apply_mode(ap.center(c), local, max_value, mode));
        }
        Color::new(out)
    })
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

    fn gradient() -> Image {
        Image::from_samples(size(3, 1), 1, PixelEncoding::F64, &[0.0, 100.0, 200.0]).unwrap()
    }

    #[test]
    fn binary_modes_split_at_the_threshold() -> Result<(), ImageError> {
        let image = gradient();
        let out = threshold(&image, 100.0, 255.0, ThresholdMode::Binary, &scheduler())?;
        assert_eq!(out.to_vec(), vec![0.0, 0.0, 255.0]);
        let out = threshold(&image, 100.0, 255.0, ThresholdMode::BinaryInv, &scheduler())?;
        assert_eq!(out.to_vec(), vec![255.0, 255.0, 0.0]);
        Ok(())
    }

    #[test]
    fn truncate_caps_at_the_threshold() -> Result<(), ImageError> {
        let out = threshold(&gradient(), 100.0, 255.0, ThresholdMode::Truncate, &scheduler())?;
        assert_eq!(out.to_vec(), vec![0.0, 100.0, 100.0]);
        Ok(())
    }

    #[test]
    fn to_zero_modes_keep_one_side() -> Result<(), ImageError> {
        let image = gradient();
        let out = threshold(&image, 100.0, 255.0, ThresholdMode::ToZero, &scheduler())?;
        assert_eq!(out.to_vec(), vec![0.0, 0.0, 200.0]);
        let out = threshold(&image, 100.0, 255.0, ThresholdMode::ToZeroInv, &scheduler())?;
        assert_eq!(out.to_vec(), vec![0.0, 100.0, 0.0]);
        Ok(())
    }

    #[test]
    fn channels_threshold_independently() -> Result<(), ImageError> {
        let image =
            Image::from_samples(size(1, 1), 3, PixelEncoding::F64, &[10.0, 120.0, 250.0])?;
        let out = threshold(&image, 100.0, 1.0, ThresholdMode::Binary, &scheduler())?;
        assert_eq!(out.to_vec(), vec![0.0, 1.0, 1.0]);
        Ok(())
    }

    #[test]
    fn adaptive_tracks_local_brightness() -> Result<(), ImageError> {
        let image =
            Image::from_samples(size(4, 1), 1, PixelEncoding::U8, &[10.0, 10.0, 250.0, 250.0])?;
        let out = adaptive_threshold(
            &image,
            255.0,
            size(3, 1),
            5.0,
            ThresholdMode::Binary,
            BorderMode::Replicate,
            &scheduler(),
        )?;
        // both flat regions pass their own local threshold; only the pixel
        // just left of the step falls below its neighborhood mean
        assert_eq!(out.to_vec(), vec![255.0, 0.0, 255.0, 255.0]);
        Ok(())
    }

    #[test]
    fn adaptive_rejects_non_binary_modes() -> Result<(), ImageError> {
        let image = Image::new(size(3, 3), 1, PixelEncoding::U8)?;
        let res = adaptive_threshold(
            &image,
            255.0,
            size(3, 3),
            0.0,
            ThresholdMode::Truncate,
            BorderMode::Zero,
            &scheduler(),
        );
        assert_eq!(res.unwrap_err(), ImageError::InvalidThresholdMode);
        Ok(())
    }

    #[test]
    fn adaptive_validates_the_window() -> Result<(), ImageError> {
        let image = Image::new(size(3, 3), 1, PixelEncoding::U8)?;
        let res = adaptive_threshold(
            &image,
            255.0,
            size(0, 0),
            0.0,
            ThresholdMode::Binary,
            BorderMode::Zero,
            &scheduler(),
        );
        assert_eq!(res.unwrap_err(), ImageError::InvalidWindowSize(0, 0));
        Ok(())
    }
}
