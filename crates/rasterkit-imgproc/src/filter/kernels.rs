use rasterkit_image::ImageError;

use super::Kernel;

/// Box kernel of the given size; every weight is `1 / (width * height)`.
///
/// Convolving with it takes the windowed mean, so a single pass of
/// [`conv2d`](super::conv2d) matches [`box_blur`](super::box_blur) over the
/// same window.
///
/// # Errors
///
/// Returns an error if a dimension is zero.
///
/// # Examples
///
/// ```
/// use rasterkit_imgproc::filter::kernels::box_kernel;
///
/// let kernel = box_kernel(3, 1).unwrap();
/// assert_eq!(kernel.values(), &[1.0 / 3.0; 3]);
/// ```
pub fn box_kernel(width: usize, height: usize) -> Result<Kernel, ImageError> {
    let count = width * height;
    if count == 0 {
        return Err(ImageError::InvalidKernelSize(width, height, 0));
    }
    Kernel::new(width, height, vec![1.0 / count as f64; count])
}

/// 3x3 Sobel kernel for the horizontal derivative.
pub fn sobel_horizontal_kernel() -> Kernel {
    #[rustfmt::skip]
    let values = vec![
        -1.0, 0.0, 1.0,
        -2.0, 0.0, 2.0,
        -1.0, 0.0, 1.0,
    ];
    Kernel {
        width: 3,
        height: 3,
        values,
    }
}

/// 3x3 Sobel kernel for the vertical derivative.
pub fn sobel_vertical_kernel() -> Kernel {
    #[rustfmt::skip]
    let values = vec![
        -1.0, -2.0, -1.0,
         0.0,  0.0,  0.0,
         1.0,  2.0,  1.0,
    ];
    Kernel {
        width: 3,
        height: 3,
        values,
    }
}

/// 3x3 Laplacian kernel (4-neighbor).
pub fn laplacian_kernel() -> Kernel {
    #[rustfmt::skip]
    let values = vec![
        0.0,  1.0, 0.0,
        1.0, -4.0, 1.0,
        0.0,  1.0, 0.0,
    ];
    Kernel {
        width: 3,
        height: 3,
        values,
    }
}

/// 3x3 sharpening kernel; the weights sum to one.
pub fn sharpen_kernel() -> Kernel {
    #[rustfmt::skip]
    let values = vec![
         0.0, -1.0,  0.0,
        -1.0,  5.0, -1.0,
         0.0, -1.0,  0.0,
    ];
    Kernel {
        width: 3,
        height: 3,
        values,
    }
}
