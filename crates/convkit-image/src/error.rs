/// An error type for the image and image processing crates.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the image data is not initialized.
    #[error("Image data is not initialized")]
    ImageDataNotInitialized,

    /// Error when the data length does not match the image shape.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two images are expected to share the same size.
    #[error("Invalid image size ({0}, {1}) mismatch ({2}, {3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when two images are expected to share the same channel count.
    #[error("Invalid channel count {0}, expected {1}")]
    InvalidChannelCount(usize, usize),

    /// Error when a filter has neither one channel nor the image channel count.
    #[error("Filter with {0} channels cannot be applied to an image with {1} channels")]
    InvalidKernelChannels(usize, usize),

    /// Error when a kernel size is not usable.
    #[error("Invalid kernel size {0}")]
    InvalidKernelSize(usize),

    /// Error when a standard deviation is not strictly positive and finite.
    #[error("Invalid sigma {0}, must be positive and finite")]
    InvalidSigma(f32),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel coordinates ({0}, {1}) are out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index {0} is out of bounds {1}")]
    ChannelIndexOutOfBounds(usize, usize),
}
