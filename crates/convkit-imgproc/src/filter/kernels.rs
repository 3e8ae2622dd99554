use convkit_image::{Image, ImageError, ImageSize};

use crate::normalize::l1_normalize;

/// Evaluate the unnormalized isotropic 2D gaussian at a squared distance from its mean.
///
/// `exp(-dist_sq / (2 sigma^2))`. The weight at the mean is exactly one and
/// every positive finite `f32` sigma gives a finite, non-zero `2 sigma^2` in
/// `f64`, so callers that normalize by the weight sum never divide by zero.
#[inline]
pub(crate) fn gaussian_weight(dist_sq: f64, sigma: f32) -> f64 {
    let sigma = f64::from(sigma);
    (-dist_sq / (2.0 * sigma * sigma)).exp()
}

pub(crate) fn validate_sigma(sigma: f32) -> Result<(), ImageError> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ImageError::InvalidSigma(sigma));
    }
    Ok(())
}

// row-major 3x3 coefficients into a single channel kernel
fn kernel3(coeffs: [f32; 9]) -> Image {
    let mut kernel = Image::from_size_val(
        ImageSize {
            width: 3,
            height: 3,
        },
        1,
        0.0,
    );
    kernel.as_slice_mut().copy_from_slice(&coeffs);
    kernel
}

/// Create a box blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The width and height of the square kernel.
///
/// # Returns
///
/// A single channel kernel whose entries are all `1 / kernel_size^2`.
///
/// # Errors
///
/// Returns [`ImageError::InvalidKernelSize`] if `kernel_size` is zero.
///
/// # Example
///
/// ```
/// use convkit_imgproc::filter::kernels::box_filter;
///
/// let kernel = box_filter(2).unwrap();
/// assert_eq!(kernel.as_slice(), &[0.25; 4]);
/// ```
pub fn box_filter(kernel_size: usize) -> Result<Image, ImageError> {
    if kernel_size == 0 {
        return Err(ImageError::InvalidKernelSize(kernel_size));
    }

    let mut kernel = Image::from_size_val([kernel_size, kernel_size].into(), 1, 1.0);
    l1_normalize(&mut kernel);
    Ok(kernel)
}

/// Width of the gaussian kernel for the given sigma.
///
/// The width covers six standard deviations plus the center pixel,
/// `round(6 * sigma) + 1`, bumped to the next odd value when even.
///
/// Saturates at `usize::MAX` for sigmas whose width does not fit in a `usize`.
pub fn gaussian_kernel_width(sigma: f32) -> usize {
    let width = ((sigma * 6.0).round() as usize).saturating_add(1);
    if width % 2 == 0 {
        log::debug!("gaussian kernel width {width} for sigma {sigma} is even, using {}", width + 1);
        width + 1
    } else {
        width
    }
}

/// Create a gaussian blur kernel.
///
/// Every entry is the 2D gaussian at its offset from the center pixel; the
/// kernel is then L1 normalized so the discretized weights sum to one.
///
/// # Arguments
///
/// * `sigma` - The standard deviation of the gaussian.
///
/// # Errors
///
/// Returns [`ImageError::InvalidSigma`] if `sigma` is not positive and finite
/// and [`ImageError::InvalidKernelSize`] if the kernel would not fit in memory.
///
/// # Example
///
/// ```
/// use convkit_imgproc::filter::kernels::gaussian_filter;
///
/// let kernel = gaussian_filter(1.0).unwrap();
/// assert_eq!(kernel.width(), 7);
/// assert_eq!(kernel.height(), 7);
/// ```
pub fn gaussian_filter(sigma: f32) -> Result<Image, ImageError> {
    validate_sigma(sigma)?;

    let width = gaussian_kernel_width(sigma);
    if width.checked_mul(width).is_none() {
        return Err(ImageError::InvalidKernelSize(width));
    }
    let center = (width / 2) as isize;

    let mut kernel = Image::from_size_val([width, width].into(), 1, 0.0);
    for y in 0..width {
        for x in 0..width {
            let dx = x as isize - center;
            let dy = y as isize - center;
            kernel[[x, y, 0]] = gaussian_weight((dx * dx + dy * dy) as f64, sigma) as f32;
        }
    }

    l1_normalize(&mut kernel);
    Ok(kernel)
}

/// Create the horizontal sobel gradient kernel.
pub fn sobel_gx_filter() -> Image {
    #[rustfmt::skip]
    let kernel = kernel3([
        -1.0, 0.0, 1.0,
        -2.0, 0.0, 2.0,
        -1.0, 0.0, 1.0,
    ]);
    kernel
}

/// Create the vertical sobel gradient kernel.
pub fn sobel_gy_filter() -> Image {
    #[rustfmt::skip]
    let kernel = kernel3([
        -1.0, -2.0, -1.0,
         0.0,  0.0,  0.0,
         1.0,  2.0,  1.0,
    ]);
    kernel
}

/// Create a laplacian-like high pass kernel.
///
/// The coefficients sum to zero, so flat regions map to zero.
pub fn highpass_filter() -> Image {
    #[rustfmt::skip]
    let kernel = kernel3([
         0.0, -1.0,  0.0,
        -1.0,  4.0, -1.0,
         0.0, -1.0,  0.0,
    ]);
    kernel
}

/// Create a sharpen kernel.
///
/// Identity plus the high pass response; the coefficients sum to one.
pub fn sharpen_filter() -> Image {
    #[rustfmt::skip]
    let kernel = kernel3([
         0.0, -1.0,  0.0,
        -1.0,  5.0, -1.0,
         0.0, -1.0,  0.0,
    ]);
    kernel
}

/// Create an emboss kernel.
pub fn emboss_filter() -> Image {
    #[rustfmt::skip]
    let kernel = kernel3([
        -2.0, -1.0, 0.0,
        -1.0,  1.0, 1.0,
         0.0,  1.0, 2.0,
    ]);
    kernel
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_box_filter() -> Result<(), ImageError> {
        for size in 1..8 {
            let kernel = box_filter(size)?;
            assert_eq!(kernel.width(), size);
            assert_eq!(kernel.height(), size);
            assert_eq!(kernel.num_channels(), 1);

            let first = kernel.as_slice()[0];
            assert!(kernel.as_slice().iter().all(|&k| k == first));
            assert_relative_eq!(kernel.as_slice().iter().sum::<f32>(), 1.0, epsilon = 1e-5);
        }
        Ok(())
    }

    #[test]
    fn test_box_filter_zero() {
        assert_eq!(box_filter(0), Err(ImageError::InvalidKernelSize(0)));
    }

    #[test]
    fn test_sobel_kernels_sum_to_zero() {
        assert_eq!(sobel_gx_filter().as_slice().iter().sum::<f32>(), 0.0);
        assert_eq!(sobel_gy_filter().as_slice().iter().sum::<f32>(), 0.0);
    }

    #[test]
    fn test_sobel_kernel_layout() {
        let gx = sobel_gx_filter();
        assert_eq!(gx[[0, 1, 0]], -2.0);
        assert_eq!(gx[[2, 1, 0]], 2.0);

        let gy = sobel_gy_filter();
        assert_eq!(gy[[1, 0, 0]], -2.0);
        assert_eq!(gy[[1, 2, 0]], 2.0);
    }

    #[test]
    fn test_fixed_kernels() {
        assert_eq!(highpass_filter().as_slice().iter().sum::<f32>(), 0.0);
        assert_eq!(sharpen_filter().as_slice().iter().sum::<f32>(), 1.0);
        assert_eq!(emboss_filter().as_slice().iter().sum::<f32>(), 1.0);
        assert_eq!(emboss_filter()[[0, 0, 0]], -2.0);
        assert_eq!(emboss_filter()[[2, 2, 0]], 2.0);
    }

    #[test]
    fn test_gaussian_kernel_width() {
        // round(6) + 1 = 7 is already odd
        assert_eq!(gaussian_kernel_width(1.0), 7);
        // round(3) + 1 = 4 is bumped
        assert_eq!(gaussian_kernel_width(0.5), 5);
        // round(12) + 1 = 13
        assert_eq!(gaussian_kernel_width(2.0), 13);
        // round(0.6) + 1 = 2 is bumped
        assert_eq!(gaussian_kernel_width(0.1), 3);
        for i in 1..50 {
            assert_eq!(gaussian_kernel_width(i as f32 * 0.13) % 2, 1);
        }
    }

    #[test]
    fn test_gaussian_filter() -> Result<(), ImageError> {
        let kernel = gaussian_filter(1.0)?;
        assert_eq!(kernel.width(), 7);
        assert_relative_eq!(kernel.as_slice().iter().sum::<f32>(), 1.0, epsilon = 1e-5);

        // peak at the center, symmetric around it
        let center = kernel[[3, 3, 0]];
        assert!(kernel.as_slice().iter().all(|&k| k <= center));
        assert_relative_eq!(kernel[[0, 3, 0]], kernel[[6, 3, 0]]);
        assert_relative_eq!(kernel[[3, 0, 0]], kernel[[3, 6, 0]]);
        assert_relative_eq!(kernel[[1, 2, 0]], kernel[[2, 1, 0]]);

        // ratio of neighbouring taps follows exp(-1 / (2 sigma^2))
        assert_relative_eq!(
            kernel[[4, 3, 0]] / center,
            (-0.5f32).exp(),
            epsilon = 1e-5
        );

        Ok(())
    }

    #[test]
    fn test_gaussian_filter_even_width_bump() -> Result<(), ImageError> {
        let kernel = gaussian_filter(0.5)?;
        assert_eq!(kernel.width(), 5);
        assert_eq!(kernel.height(), 5);
        assert_relative_eq!(kernel.as_slice().iter().sum::<f32>(), 1.0, epsilon = 1e-5);
        Ok(())
    }

    #[test]
    fn test_gaussian_filter_invalid_sigma() {
        assert_eq!(gaussian_filter(0.0), Err(ImageError::InvalidSigma(0.0)));
        assert_eq!(gaussian_filter(-1.0), Err(ImageError::InvalidSigma(-1.0)));
        assert!(gaussian_filter(f32::NAN).is_err());
    }

    #[test]
    fn test_gaussian_kernel_width_saturates() {
        assert_eq!(gaussian_kernel_width(f32::MAX), usize::MAX);
        assert_eq!(
            gaussian_filter(f32::MAX),
            Err(ImageError::InvalidKernelSize(usize::MAX))
        );
    }

    #[test]
    fn test_gaussian_weight() {
        assert_eq!(gaussian_weight(0.0, 2.0), 1.0);
        assert_relative_eq!(gaussian_weight(8.0, 2.0), (-1.0f64).exp());

        // extreme sigmas stay finite and keep the center weight at one
        for sigma in [1e-20, 1e-38, f32::MIN_POSITIVE / 8.0, 1e20, f32::MAX] {
            assert_eq!(gaussian_weight(0.0, sigma), 1.0);
            assert!(gaussian_weight(2.0, sigma).is_finite());
        }
        assert_eq!(gaussian_weight(1.0, 1e-20), 0.0);
    }

    #[test]
    fn test_gaussian_filter_tiny_sigma() -> Result<(), ImageError> {
        let kernel = gaussian_filter(1e-20)?;
        assert_eq!(kernel.width(), 1);
        assert_eq!(kernel.as_slice(), &[1.0]);

        // round(0.6) + 1 = 2 bumped to 3, off-center taps vanish
        let kernel = gaussian_filter(0.1)?;
        assert_eq!(kernel.width(), 3);
        assert!(kernel.as_slice().iter().all(|k| k.is_finite()));
        assert_relative_eq!(kernel[[1, 1, 0]], 1.0, epsilon = 1e-5);
        Ok(())
    }
}
