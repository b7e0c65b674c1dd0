//! Filter operations
//!
//! The linear path ([`conv2d`]) and the generic aperture substrate
//! ([`aperture_filter`]) both slide an extrapolated window over the source
//! and materialize a newly allocated image, leaving the input untouched.

/// Convolution kernel factories.
pub mod kernels;

/// Generic aperture operator.
mod aperture;
pub use aperture::*;

/// Linear filtering (convolution).
mod convolution;
pub use convolution::*;

/// Blur, sharpen and edge operations.
mod ops;
pub use ops::*;
