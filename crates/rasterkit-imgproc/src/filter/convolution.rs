use rasterkit_image::{Image, ImageError, Point};

use crate::border::{BorderMode, BorderedView};
use crate::parallel::Scheduler;

/// A convolution kernel with independent width and height.
///
/// Weights are stored row-major; non-square kernels are allowed.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) values: Vec<f64>,
}

impl Kernel {
    /// Create a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or the weight count does not
    /// match `width * height`.
    pub fn new(width: usize, height: usize, values: Vec<f64>) -> Result<Self, ImageError> {
        if width == 0 || height == 0 || values.len() != width * height {
            return Err(ImageError::InvalidKernelSize(width, height, values.len()));
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Width of the kernel.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the kernel.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The weights in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Weight at column `i`, row `j`.
    #[inline]
    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.values[j * self.width + i]
    }

    /// The center anchor, used by the fixed-kernel operators.
    pub fn centered_anchor(&self) -> Point {
        Point::new(self.width / 2, self.height / 2)
    }
}

/// Convolve an image with a kernel.
///
/// Each output sample is
/// `sum(kernel(i, j) * src(x + i - anchor.x, y + j - anchor.y, c)) * scale + offset`,
/// with out-of-bounds reads extrapolated by `border`. The accumulation runs
/// on wide values regardless of the source encoding; a narrow result is
/// rounded and clamped only at materialization. The input is never mutated
/// and the output is newly allocated. Rows are the parallel unit.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `kernel` - The convolution kernel.
/// * `anchor` - The kernel point mapped onto the output pixel; must lie
///   inside the kernel.
/// * `scale` - Multiplier applied to every accumulated sum.
/// * `offset` - Bias added after scaling.
/// * `border` - Border extrapolation mode.
/// * `scheduler` - Scheduler the row partitions run on.
///
/// # Errors
///
/// Returns an error if the anchor lies outside the kernel.
///
/// # Examples
///
/// ```
/// use rasterkit_image::{Image, ImageSize, PixelEncoding, Point};
/// use rasterkit_imgproc::border::BorderMode;
/// use rasterkit_imgproc::filter::{conv2d, Kernel};
/// use rasterkit_imgproc::parallel::Scheduler;
///
/// let image = Image::from_samples(
///     ImageSize {
///         width: 2,
///         height: 1,
///     },
///     1,
///     PixelEncoding::F64,
///     &[10.0, 20.0],
/// )
/// .unwrap();
/// let scheduler = Scheduler::with_workers(1).unwrap();
///
/// let identity = Kernel::new(1, 1, vec![1.0]).unwrap();
/// let out = conv2d(
///     &image,
///     &identity,
///     Point::new(0, 0),
///     1.0,
///     0.0,
///     BorderMode::Zero,
///     &scheduler,
/// )
/// .unwrap();
///
/// assert_eq!(out, image);
/// ```
pub fn conv2d(
    src: &Image,
    kernel: &Kernel,
    anchor: Point,
    scale: f64,
    offset: f64,
    border: BorderMode,
    scheduler: &Scheduler,
) -> Result<Image, ImageError> {
    if anchor.x >= kernel.width || anchor.y >= kernel.height {
        return Err(ImageError::InvalidAnchor(
            anchor.x,
            anchor.y,
            kernel.width,
            kernel.height,
        ));
    }

    let size = src.size();
    let channels = src.num_channels();
    let samples = src.to_vec();
    let view = BorderedView::new(&samples, size.width, size.height, channels, border);

    let mut out = vec![0.0f64; samples.len()];
    let row_len = size.width * channels;
    scheduler.run_rows(&mut out, row_len, size.width * size.height, |y, dst_row| {
        for x in 0..size.width {
            for c in 0..channels {
                let mut acc = 0.0;
                for j in 0..kernel.height {
                    for i in 0..kernel.width {
                        let sx = x as isize + i as isize - anchor.x as isize;
                        let sy = y as isize + j as isize - anchor.y as isize;
                        acc += kernel.at(i, j) * view.get(sx, sy, c);
                    }
                }
                dst_row[x * channels + c] = acc * scale + offset;
            }
        }
        Ok(())
    })?;

    Image::from_samples(size, channels, src.encoding(), &out)
}
