#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use rasterkit_image as image;

#[doc(inline)]
pub use rasterkit_imgproc as imgproc;
