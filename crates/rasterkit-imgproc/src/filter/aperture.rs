use rasterkit_image::{Color, Image, ImageError, ImageSize, Point};

use crate::border::{BorderMode, BorderedView};
use crate::parallel::Scheduler;

/// The rectangular neighborhood of samples visible to an aperture operator.
///
/// Samples are row-major interleaved in window coordinates and already
/// border-extrapolated, so the operator never sees out-of-bounds reads.
pub struct Aperture<'a> {
    samples: &'a [f64],
    width: usize,
    height: usize,
    channels: usize,
    anchor: Point,
}

impl<'a> Aperture<'a> {
    /// Width of the window.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the window.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of channels per sample.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// The window point that maps onto the output pixel.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Read the sample at window coordinates `(i, j)` for `channel`.
    #[inline]
    pub fn sample(&self, i: usize, j: usize, channel: usize) -> f64 {
        self.samples[(j * self.width + i) * self.channels + channel]
    }

    /// The sample under the anchor for `channel`.
    pub fn center(&self, channel: usize) -> f64 {
        self.sample(self.anchor.x, self.anchor.y, channel)
    }

    /// Collect every window sample of `channel` into `buf`, clearing it
    /// first.
    pub fn channel_samples(&self, channel: usize, buf: &mut Vec<f64>) {
        buf.clear();
        for j in 0..self.height {
            for i in 0..self.width {
                buf.push(self.sample(i, j, channel));
            }
        }
    }
}

/// Evaluate an aperture operator over every pixel of an image.
///
/// For each output pixel the operator receives the extrapolated window of
/// `window` samples anchored at `anchor` and returns the output [`Color`].
/// Passes chain sequentially: pass `k`'s output feeds pass `k + 1`, and
/// every intermediate stays wide; only the final pass materializes into the
/// source encoding (round + clamp for narrow storage). The input is never
/// mutated and the output is newly allocated. Rows are the parallel unit.
///
/// # Errors
///
/// Returns an error if a window dimension is zero, the anchor lies outside
/// the window, `iterations` is zero, or the operator returns a color whose
/// channel count does not match the image.
///
/// # Examples
///
/// ```
/// use rasterkit_image::{Color, Image, ImageSize, PixelEncoding, Point};
/// use rasterkit_imgproc::border::BorderMode;
/// use rasterkit_imgproc::filter::aperture_filter;
/// use rasterkit_imgproc::parallel::Scheduler;
///
/// let image = Image::from_samples(
///     ImageSize {
///         width: 3,
///         height: 1,
///     },
///     1,
///     PixelEncoding::F64,
///     &[1.0, 5.0, 2.0],
/// )
/// .unwrap();
/// let scheduler = Scheduler::with_workers(1).unwrap();
///
/// // windowed maximum over a 3x1 aperture
/// let out = aperture_filter(
///     &image,
///     ImageSize {
///         width: 3,
///         height: 1,
///     },
///     Point::new(1, 0),
///     1,
///     BorderMode::Replicate,
///     &scheduler,
///     |ap| {
///         let mut max = f64::MIN;
///         for i in 0..ap.width() {
///             max = max.max(ap.sample(i, 0, 0));
///         }
///         Color::gray(max)
///     },
/// )
/// .unwrap();
///
/// assert_eq!(out.to_vec(), vec![5.0, 5.0, 5.0]);
/// ```
pub fn aperture_filter<F>(
    src: &Image,
    window: ImageSize,
    anchor: Point,
    iterations: usize,
    border: BorderMode,
    scheduler: &Scheduler,
    op: F,
) -> Result<Image, ImageError>
where
    F: Fn(&Aperture) -> Color + Send + Sync,
{
    if window.width == 0 || window.height == 0 {
        return Err(ImageError::InvalidWindowSize(window.width, window.height));
    }
    if anchor.x >= window.width || anchor.y >= window.height {
        return Err(ImageError::InvalidAnchor(
            anchor.x,
            anchor.y,
            window.width,
            window.height,
        ));
    }
    if iterations == 0 {
        return Err(ImageError::InvalidIterations(iterations));
    }

    let size = src.size();
    let channels = src.num_channels();
    let row_len = size.width * channels;
    let num_pixels = size.width * size.height;

    let mut current = src.to_vec();
    for _ in 0..iterations {
        let mut next = vec![0.0f64; current.len()];
        let view = BorderedView::new(&current, size.width, size.height, channels, border);
        scheduler.run_rows(&mut next, row_len, num_pixels, |y, dst_row| {
            let mut scratch = vec![0.0f64; window.width * window.height * channels];
            for x in 0..size.width {
                gather_window(&view, &mut scratch, window, anchor, channels, x, y);
                let aperture = Aperture {
                    samples: &scratch,
                    width: window.width,
                    height: window.height,
                    channels,
                    anchor,
                };
                let color = op(&aperture);
                if color.channels() != channels {
                    return Err(ImageError::ChannelMismatch(channels, color.channels()));
                }
                dst_row[x * channels..(x + 1) * channels].copy_from_slice(color.as_slice());
            }
            Ok(())
        })?;
        current = next;
    }

    Image::from_samples(size, channels, src.encoding(), &current)
}

#[inline]
fn gather_window(
    view: &BorderedView<'_>,
    scratch: &mut [f64],
    window: ImageSize,
    anchor: Point,
    channels: usize,
    x: usize,
    y: usize,
) {
    let mut k = 0;
    for j in 0..window.height {
        let sy = y as isize + j as isize - anchor.y as isize;
        for i in 0..window.width {
            let sx = x as isize + i as isize - anchor.x as isize;
            for c in 0..channels {
                scratch[k] = view.get(sx, sy, c);
                k += 1;
            }
        }
    }
}
