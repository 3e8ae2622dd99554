use convkit_image::{Image, ImageError};

use crate::parallel;

fn check_same_shape(a: &Image, b: &Image) -> Result<(), ImageError> {
    if a.size() != b.size() {
        return Err(ImageError::InvalidImageSize(
            a.cols(),
            a.rows(),
            b.cols(),
            b.rows(),
        ));
    }

    if a.num_channels() != b.num_channels() {
        return Err(ImageError::InvalidChannelCount(
            b.num_channels(),
            a.num_channels(),
        ));
    }

    Ok(())
}

/// Add two images elementwise.
///
/// No clamping is applied, the result may leave the input range.
///
/// # Arguments
///
/// * `src1` - The first input image.
/// * `src2` - The second input image.
///
/// # Returns
///
/// A new image holding `src1 + src2`.
///
/// # Errors
///
/// Returns an error if the images differ in size or channel count.
///
/// # Example
///
/// ```
/// use convkit_image::Image;
/// use convkit_imgproc::core::add;
///
/// let a = Image::new([2, 1].into(), 1, vec![0.25, 0.75]).unwrap();
/// let b = Image::new([2, 1].into(), 1, vec![0.5, 0.5]).unwrap();
///
/// assert_eq!(add(&a, &b).unwrap().as_slice(), &[0.75, 1.25]);
/// ```
pub fn add(src1: &Image, src2: &Image) -> Result<Image, ImageError> {
    check_same_shape(src1, src2)?;

    let mut dst = src1.zeros_like();
    parallel::par_iter_samples_two(src1, src2, &mut dst, |a, b, out| {
        *out = a + b;
    });

    Ok(dst)
}

/// Subtract the second image from the first elementwise.
///
/// No clamping is applied, the result may leave the input range.
///
/// # Errors
///
/// Returns an error if the images differ in size or channel count.
pub fn subtract(src1: &Image, src2: &Image) -> Result<Image, ImageError> {
    check_same_shape(src1, src2)?;

    let mut dst = src1.zeros_like();
    parallel::par_iter_samples_two(src1, src2, &mut dst, |a, b, out| {
        *out = a - b;
    });

    Ok(dst)
}

/// Clamp every sample of an image into `[min, max]`.
///
/// Filters like sharpen, emboss or high pass produce values outside the
/// displayable range; this is the usual post processing step for them.
///
/// # Example
///
/// ```
/// use convkit_image::Image;
/// use convkit_imgproc::core::clamp;
///
/// let image = Image::new([3, 1].into(), 1, vec![-0.5, 0.5, 1.5]).unwrap();
///
/// assert_eq!(clamp(&image, 0.0, 1.0).as_slice(), &[0.0, 0.5, 1.0]);
/// ```
pub fn clamp(src: &Image, min: f32, max: f32) -> Image {
    let mut dst = src.zeros_like();
    parallel::par_iter_samples(src, &mut dst, |v, out| {
        *out = v.max(min).min(max);
    });
    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_add_subtract_roundtrip() -> Result<(), ImageError> {
        let a = Image::new([3, 2].into(), 2, (0..12).map(|x| x as f32 * 0.1).collect())?;
        let b = Image::new([3, 2].into(), 2, (0..12).map(|x| 1.0 - x as f32 * 0.37).collect())?;

        let sum = add(&a, &b)?;
        let back = subtract(&sum, &b)?;

        for (x, y) in back.as_slice().iter().zip(a.as_slice()) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-5);
        }
        Ok(())
    }

    #[test]
    fn test_subtract_no_clamping() -> Result<(), ImageError> {
        let a = Image::new([2, 1].into(), 1, vec![0.0, 1.0])?;
        let b = Image::new([2, 1].into(), 1, vec![1.0, -1.0])?;
        assert_eq!(subtract(&a, &b)?.as_slice(), &[-1.0, 2.0]);
        Ok(())
    }

    #[test]
    fn test_shape_mismatch() {
        let a = Image::from_size_val([2, 2].into(), 1, 0.0);
        let b = Image::from_size_val([2, 3].into(), 1, 0.0);
        assert_eq!(add(&a, &b), Err(ImageError::InvalidImageSize(2, 2, 2, 3)));

        let c = Image::from_size_val([2, 2].into(), 3, 0.0);
        assert_eq!(subtract(&a, &c), Err(ImageError::InvalidChannelCount(3, 1)));
    }

    #[test]
    fn test_clamp() -> Result<(), ImageError> {
        let img = Image::new([2, 1].into(), 2, vec![-1.0, 0.3, 2.0, 1.0])?;
        assert_eq!(clamp(&img, 0.0, 1.0).as_slice(), &[0.0, 0.3, 1.0, 1.0]);
        Ok(())
    }
}
