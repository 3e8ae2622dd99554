#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use convkit_image as image;

#[doc(inline)]
pub use convkit_imgproc as imgproc;
