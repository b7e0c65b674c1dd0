/// An error type for image construction, access and processing operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when an image dimension is zero.
    #[error("Image dimensions must be positive, got {0}x{1}")]
    InvalidImageSize(usize, usize),

    /// Error when the channel count is zero.
    #[error("Channel count must be positive, got {0}")]
    InvalidChannelCount(usize),

    /// Error when a color's channel count does not match the image.
    #[error("Channel count mismatch: expected {0}, got {1}")]
    ChannelMismatch(usize, usize),

    /// Error when raw sample data does not match the image geometry.
    #[error("Sample count ({0}) does not match the image size ({1})")]
    InvalidSampleCount(usize, usize),

    /// Error when pixel coordinates fall outside the image bounds.
    #[error("Pixel index ({0}, {1}) out of bounds for image of size {2}x{3}")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the channel index is not less than the channel count.
    #[error("Channel index {0} out of bounds for {1} channels")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when a rectangle is not fully contained in the image.
    #[error("Rectangle {2}x{3} at ({0}, {1}) out of bounds for image of size {4}x{5}")]
    RectOutOfBounds(usize, usize, usize, usize, usize, usize),

    /// Error when two images expected to share geometry differ.
    #[error("Size mismatch: expected {0}x{1}, got {2}x{3}")]
    SizeMismatch(usize, usize, usize, usize),

    /// Error when a kernel is empty or its value count does not match its dimensions.
    #[error("Kernel of {0}x{1} does not match {2} values")]
    InvalidKernelSize(usize, usize, usize),

    /// Error when an aperture window dimension is zero.
    #[error("Window dimensions must be positive, got {0}x{1}")]
    InvalidWindowSize(usize, usize),

    /// Error when the anchor lies outside the kernel or window.
    #[error("Anchor ({0}, {1}) outside window of size {2}x{3}")]
    InvalidAnchor(usize, usize, usize, usize),

    /// Error when the iteration count is zero.
    #[error("Iteration count must be >= 1, got {0}")]
    InvalidIterations(usize),

    /// Error when the scheduler worker count is zero.
    #[error("Worker count must be > 0, got {0}")]
    InvalidWorkerCount(usize),

    /// Error when a row partition does not tile the work buffer.
    #[error("Row length {0} does not evenly divide buffer of {1} elements")]
    InvalidRowLength(usize, usize),

    /// Error when adaptive thresholding is asked for a non-binary mode.
    #[error("Adaptive threshold requires Binary or BinaryInv mode")]
    InvalidThresholdMode,

    /// Error when the worker pool fails to build.
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(String),
}
