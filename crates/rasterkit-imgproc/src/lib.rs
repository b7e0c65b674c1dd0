#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// border extrapolation for windowed operators.
pub mod border;

/// image filtering module.
pub mod filter;

/// morphological operators module.
pub mod morphology;

/// module containing parallelization utilities.
pub mod parallel;

/// region growing module.
pub mod region;

/// operations to threshold images.
pub mod threshold;
