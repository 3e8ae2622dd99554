use convkit_image::{Image, ImageError};

use super::kernels::{gaussian_weight, validate_sigma};
use crate::parallel;

/// Parameters of the bilateral filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BilateralParams {
    /// Width and height of the square neighbourhood, must be odd.
    pub diameter: usize,
    /// Standard deviation of the spatial gaussian, in pixels.
    pub sigma_space: f32,
    /// Standard deviation of the intensity gaussian, in sample units.
    pub sigma_range: f32,
}

impl Default for BilateralParams {
    fn default() -> Self {
        Self {
            diameter: 3,
            sigma_space: 16.0,
            sigma_range: 0.2,
        }
    }
}

/// Smooth an image while preserving edges.
///
/// Each channel is filtered independently. Every neighbour in the
/// `diameter x diameter` window around a pixel is weighted by the product of
/// a gaussian of its distance to the center and a gaussian of its intensity
/// difference to the center sample; the weights are normalized to sum to one
/// over the window.
///
/// Neighbours outside the image are read from the nearest edge pixel, the same
/// replicate padding [`super::convolve`] uses.
///
/// # Arguments
///
/// * `src` - The source image with shape (W, H, C).
/// * `params` - The window size and the two standard deviations.
///
/// # Errors
///
/// Returns [`ImageError::InvalidKernelSize`] if the diameter is zero or even
/// and [`ImageError::InvalidSigma`] if a sigma is not positive and finite.
///
/// # Example
///
/// ```
/// use convkit_image::Image;
/// use convkit_imgproc::filter::{bilateral_filter, BilateralParams};
///
/// let image = Image::from_size_val([8, 8].into(), 3, 0.5);
/// let smoothed = bilateral_filter(&image, &BilateralParams::default()).unwrap();
///
/// assert_eq!(smoothed.size(), image.size());
/// assert_eq!(smoothed.num_channels(), 3);
/// ```
pub fn bilateral_filter(src: &Image, params: &BilateralParams) -> Result<Image, ImageError> {
    if params.diameter == 0 || params.diameter % 2 == 0 {
        return Err(ImageError::InvalidKernelSize(params.diameter));
    }
    validate_sigma(params.sigma_space)?;
    validate_sigma(params.sigma_range)?;

    let diameter = params.diameter;
    let half = (diameter / 2) as isize;

    // the spatial term only depends on the tap offset
    let spatial_weights = (0..diameter * diameter)
        .map(|i| {
            let dx = (i % diameter) as isize - half;
            let dy = (i / diameter) as isize - half;
            gaussian_weight((dx * dx + dy * dy) as f64, params.sigma_space)
        })
        .collect::<Vec<_>>();

    let mut dst = src.zeros_like();

    parallel::par_iter_planes_rows(&mut dst, |ch, y, dst_row| {
        let top = y as isize - half;

        dst_row.iter_mut().enumerate().for_each(|(x, dst_val)| {
            let left = x as isize - half;
            let center = f64::from(src[[x, y, ch]]);

            let mut weight_sum = 0.0f64;
            let mut value = 0.0f64;
            for (i, &spatial) in spatial_weights.iter().enumerate() {
                let nx = left + (i % diameter) as isize;
                let ny = top + (i / diameter) as isize;
                let neighbor = f64::from(src.get_clamped(nx, ny, ch));
                let diff = neighbor - center;
                let weight = gaussian_weight(diff * diff, params.sigma_range) * spatial;
                weight_sum += weight;
                value += weight * neighbor;
            }

            // the center tap weighs exactly one, so weight_sum >= 1
            *dst_val = (value / weight_sum) as f32;
        });
    });

    Ok(dst)
}
