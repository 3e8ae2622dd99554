//! In-place normalization passes over whole image buffers.
//!
//! # Normalization Methods
//!
//! * **L1 Normalization** ([`l1_normalize`]) - Scale so all samples sum to one
//! * **Feature Normalization** ([`feature_normalize`]) - Min-max rescale to the [0, 1] range
//!
//! Both passes are global: every sample of every channel takes part in the
//! same sum or the same min/max, channels are never normalized on their own.
//! Kernels rely on this, a multi-channel kernel sums to one over all its
//! planes together.

use convkit_image::{Image, ImageError};

/// Normalize an image in place so that all of its samples sum to one.
///
/// When the samples sum to exactly zero every sample is set to the uniform
/// value `1 / (width * height)` instead of dividing by zero.
///
/// # Arguments
///
/// * `image` - The image to normalize, modified in place.
///
/// # Example
///
/// ```
/// use convkit_image::Image;
/// use convkit_imgproc::normalize::l1_normalize;
///
/// let mut image = Image::new([2, 2].into(), 1, vec![1.0, 1.0, 2.0, 4.0]).unwrap();
/// l1_normalize(&mut image);
///
/// assert_eq!(image.as_slice(), &[0.125, 0.125, 0.25, 0.5]);
/// ```
pub fn l1_normalize(image: &mut Image) {
    let sum = image.as_slice().iter().sum::<f32>();

    if sum != 0.0 {
        image.as_slice_mut().iter_mut().for_each(|v| *v /= sum);
    } else {
        let uniform = 1.0 / (image.width() * image.height()) as f32;
        log::debug!(
            "l1_normalize: zero sum over {}, filling with {uniform}",
            image.size()
        );
        image.as_slice_mut().iter_mut().for_each(|v| *v = uniform);
    }
}

/// Find the minimum and maximum values in an image.
///
/// # Arguments
///
/// * `image` - The input image.
///
/// # Returns
///
/// A tuple containing the minimum and maximum values over all channels.
///
/// # Errors
///
/// Returns [`ImageError::ImageDataNotInitialized`] if the image holds no samples.
///
/// # Example
///
/// ```
/// use convkit_image::Image;
/// use convkit_imgproc::normalize::find_min_max;
///
/// let image = Image::new([2, 1].into(), 2, vec![0.0, 1.0, -3.0, 2.0]).unwrap();
///
/// let (min, max) = find_min_max(&image).unwrap();
/// assert_eq!(min, -3.0);
/// assert_eq!(max, 2.0);
/// ```
pub fn find_min_max(image: &Image) -> Result<(f32, f32), ImageError> {
    // get the first element in the image
    let first_element = match image.as_slice().first() {
        Some(&x) => x,
        None => return Err(ImageError::ImageDataNotInitialized),
    };

    let mut min = first_element;
    let mut max = first_element;

    for &x in image.as_slice().iter() {
        if x < min {
            min = x;
        }
        if x > max {
            max = x;
        }
    }

    Ok((min, max))
}

/// Rescale an image in place to the [0, 1] range using its global min and max.
///
/// A constant image has no range to rescale; every sample is set to zero.
/// An image without samples is left untouched.
///
/// # Arguments
///
/// * `image` - The image to normalize, modified in place.
///
/// # Example
///
/// ```
/// use convkit_image::Image;
/// use convkit_imgproc::normalize::feature_normalize;
///
/// let mut image = Image::new([3, 1].into(), 1, vec![-1.0, 0.0, 3.0]).unwrap();
/// feature_normalize(&mut image);
///
/// assert_eq!(image.as_slice(), &[0.0, 0.25, 1.0]);
/// ```
pub fn feature_normalize(image: &mut Image) {
    let Ok((min, max)) = find_min_max(image) else {
        return;
    };

    let range = max - min;
    if range != 0.0 {
        image
            .as_slice_mut()
            .iter_mut()
            .for_each(|v| *v = (*v - min) / range);
    } else {
        log::debug!("feature_normalize: constant image with value {min}, zeroing");
        image.as_slice_mut().iter_mut().for_each(|v| *v = 0.0);
    }
}
