use std::ops;

use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use convkit_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents an image with `f32` pixel data.
///
/// The samples are stored planar, channel-major: all of channel 0 row by row,
/// then all of channel 1, and so on. The sample `(x, y, ch)` lives at offset
/// `x + y * width + ch * width * height`.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    size: ImageSize,
    num_channels: usize,
    data: Vec<f32>,
}

impl Image {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `num_channels` - The number of channels of the image.
    /// * `data` - The planar pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image shape, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use convkit_image::{Image, ImageSize};
    ///
    /// let image = Image::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     3,
    ///     vec![0.0; 10 * 20 * 3],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, num_channels: usize, data: Vec<f32>) -> Result<Self, ImageError> {
        let expected = size.width * size.height * num_channels;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self {
            size,
            num_channels,
            data,
        })
    }

    /// Create a new image with the given size and every sample set to `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use convkit_image::{Image, ImageSize};
    ///
    /// let image = Image::from_size_val([4, 2].into(), 1, 0.5);
    ///
    /// assert_eq!(image.as_slice(), &[0.5; 8]);
    /// ```
    pub fn from_size_val(size: ImageSize, num_channels: usize, val: f32) -> Self {
        Self {
            size,
            num_channels,
            data: vec![val; size.width * size.height * num_channels],
        }
    }

    /// Create a zero-initialized image with the same shape as `self`.
    pub fn zeros_like(&self) -> Self {
        Self::from_size_val(self.size, self.num_channels, 0.0)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// Whether the image holds no samples at all.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the pixel data of the image as a flat planar slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Get the pixel data of the image as a mutable flat planar slice.
    pub fn as_slice_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consume the image and return its planar pixel data.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Flat offset of the sample `(x, y, ch)`.
    ///
    /// This is the only place where the planar layout is spelled out.
    #[inline]
    fn offset(&self, x: usize, y: usize, ch: usize) -> usize {
        x + y * self.size.width + ch * self.size.width * self.size.height
    }

    fn check_bounds(&self, x: usize, y: usize, ch: usize) -> Result<(), ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }

        if ch >= self.num_channels {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, self.num_channels));
        }

        Ok(())
    }

    /// Get the value of a sample.
    ///
    /// # Arguments
    ///
    /// * `x` - The x-coordinate of the pixel.
    /// * `y` - The y-coordinate of the pixel.
    /// * `ch` - The channel index of the pixel.
    ///
    /// # Errors
    ///
    /// If the coordinates or the channel are out of bounds, an error is returned.
    pub fn get_pixel(&self, x: usize, y: usize, ch: usize) -> Result<f32, ImageError> {
        self.check_bounds(x, y, ch)?;
        Ok(self.data[self.offset(x, y, ch)])
    }

    /// Set the value of a sample.
    ///
    /// # Errors
    ///
    /// If the coordinates or the channel are out of bounds, an error is returned.
    pub fn set_pixel(&mut self, x: usize, y: usize, ch: usize, val: f32) -> Result<(), ImageError> {
        self.check_bounds(x, y, ch)?;
        let offset = self.offset(x, y, ch);
        self.data[offset] = val;
        Ok(())
    }

    /// Read a sample with replicate-edge boundary handling.
    ///
    /// Coordinates outside `[0, width) x [0, height)` are clamped to the
    /// nearest edge pixel before reading.
    ///
    /// # Panics
    ///
    /// Panics if the image has no pixels or if `ch` is not a valid channel.
    ///
    /// # Examples
    ///
    /// ```
    /// use convkit_image::Image;
    ///
    /// let image = Image::new([2, 1].into(), 1, vec![1.0, 2.0]).unwrap();
    ///
    /// assert_eq!(image.get_clamped(-5, 0, 0), 1.0);
    /// assert_eq!(image.get_clamped(7, 3, 0), 2.0);
    /// ```
    #[inline]
    pub fn get_clamped(&self, x: isize, y: isize, ch: usize) -> f32 {
        let x = x.clamp(0, self.width() as isize - 1) as usize;
        let y = y.clamp(0, self.height() as isize - 1) as usize;
        self[[x, y, ch]]
    }

    /// Borrow a single channel plane as a row-major slice.
    ///
    /// # Errors
    ///
    /// If the channel index is out of bounds, an error is returned.
    pub fn channel_slice(&self, ch: usize) -> Result<&[f32], ImageError> {
        if ch >= self.num_channels {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, self.num_channels));
        }
        let plane = self.size.width * self.size.height;
        Ok(&self.data[ch * plane..(ch + 1) * plane])
    }

    /// Mutably borrow a single channel plane as a row-major slice.
    ///
    /// # Errors
    ///
    /// If the channel index is out of bounds, an error is returned.
    pub fn channel_slice_mut(&mut self, ch: usize) -> Result<&mut [f32], ImageError> {
        if ch >= self.num_channels {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, self.num_channels));
        }
        let plane = self.size.width * self.size.height;
        Ok(&mut self.data[ch * plane..(ch + 1) * plane])
    }
}

/// Raw sample access with `[x, y, ch]` indexing.
///
/// Panics when the index falls outside the buffer, like slice indexing.
impl ops::Index<[usize; 3]> for Image {
    type Output = f32;

    #[inline]
    fn index(&self, [x, y, ch]: [usize; 3]) -> &f32 {
        &self.data[self.offset(x, y, ch)]
    }
}

impl ops::IndexMut<[usize; 3]> for Image {
    #[inline]
    fn index_mut(&mut self, [x, y, ch]: [usize; 3]) -> &mut f32 {
        let offset = self.offset(x, y, ch);
        &mut self.data[offset]
    }
}
