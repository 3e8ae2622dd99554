//! Sobel gradient features.
//!
//! The gradient is measured on the intensity domain: each Sobel response is
//! summed over the input channels, so a color image yields one gradient per
//! pixel.

use rayon::prelude::*;

use convkit_image::{Image, ImageError};

use crate::color::rgb_from_hsv;
use crate::filter::{convolve, kernels};
use crate::normalize::feature_normalize;

/// Sigma of the gaussian used to smooth the colorized edge map.
const COLORIZE_SMOOTHING_SIGMA: f32 = 1.0;

/// Per-pixel gradient magnitude and orientation of an image.
#[derive(Clone, Debug, PartialEq)]
pub struct SobelGradient {
    /// Euclidean magnitude per pixel: `sqrt(gx^2 + gy^2)`, single channel.
    pub magnitude: Image,
    /// Orientation per pixel: `atan2(gy, gx)` in radians in (-pi, pi], single channel.
    pub orientation: Image,
}

/// Compute the Sobel gradient magnitude and orientation of an image.
///
/// # Arguments
///
/// * `src` - The source image with shape (W, H, C).
///
/// # Returns
///
/// The gradient with both fields of shape (W, H, 1).
///
/// # Example
///
/// ```
/// use convkit_image::Image;
/// use convkit_imgproc::gradient::sobel_gradient;
///
/// let image = Image::from_size_val([5, 4].into(), 3, 0.3);
/// let gradient = sobel_gradient(&image).unwrap();
///
/// assert!(gradient.magnitude.as_slice().iter().all(|&m| m == 0.0));
/// assert_eq!(gradient.orientation.num_channels(), 1);
/// ```
pub fn sobel_gradient(src: &Image) -> Result<SobelGradient, ImageError> {
    let gx = convolve(src, &kernels::sobel_gx_filter(), false)?;
    let gy = convolve(src, &kernels::sobel_gy_filter(), false)?;

    let mut magnitude = gx.zeros_like();
    let mut orientation = gx.zeros_like();

    magnitude
        .as_slice_mut()
        .par_iter_mut()
        .zip(orientation.as_slice_mut().par_iter_mut())
        .zip(gx.as_slice().par_iter())
        .zip(gy.as_slice().par_iter())
        .for_each(|(((mag, ori), &gx), &gy)| {
            *mag = (gx * gx + gy * gy).sqrt();
            *ori = gy.atan2(gx);
        });

    Ok(SobelGradient {
        magnitude,
        orientation,
    })
}

/// Render the Sobel gradient of an image as a color edge map.
///
/// Magnitude and orientation are each rescaled to [0, 1]. The orientation
/// becomes the hue and the magnitude both the saturation and the value of an
/// HSV image, which is converted to RGB and smoothed with a gaussian of
/// sigma 1.
///
/// # Arguments
///
/// * `src` - The source image with shape (W, H, C).
///
/// # Returns
///
/// An RGB image with shape (W, H, 3).
pub fn colorize_sobel(src: &Image) -> Result<Image, ImageError> {
    let SobelGradient {
        mut magnitude,
        mut orientation,
    } = sobel_gradient(src)?;

    feature_normalize(&mut magnitude);
    feature_normalize(&mut orientation);

    let mut hsv = Image::from_size_val(src.size(), 3, 0.0);
    hsv.channel_slice_mut(0)?
        .copy_from_slice(orientation.as_slice());
    hsv.channel_slice_mut(1)?
        .copy_from_slice(magnitude.as_slice());
    hsv.channel_slice_mut(2)?
        .copy_from_slice(magnitude.as_slice());

    let mut rgb = hsv.zeros_like();
    rgb_from_hsv(&hsv, &mut rgb)?;

    convolve(
        &rgb,
        &kernels::gaussian_filter(COLORIZE_SMOOTHING_SIGMA)?,
        true,
    )
}
