use convkit_image::{Image, ImageError};

use crate::parallel;

/// Convolve an image with a 2D kernel.
///
/// The kernel is slid over every output pixel with its center at integer
/// offset `(kernel_width / 2, kernel_height / 2)`; even sized kernels are
/// therefore biased one pixel towards the bottom right. Samples that fall
/// outside the image are read from the nearest edge pixel (replicate
/// padding). Taps are accumulated in `f64`, so small integer kernels whose
/// coefficients sum to zero give exactly zero on a constant image.
///
/// A single channel kernel is broadcast to every image channel, otherwise
/// kernel plane `c` is applied to image channel `c`.
///
/// # Arguments
///
/// * `src` - The source image with shape (W, H, C).
/// * `filter` - The kernel with shape (KW, KH, 1) or (KW, KH, C).
/// * `preserve_channels` - Keep the per-channel responses. When false the
///   responses are summed across channels into a single channel image.
///
/// # Returns
///
/// A new image with shape (W, H, C), or (W, H, 1) if `preserve_channels` is false.
///
/// # Errors
///
/// Returns [`ImageError::InvalidKernelChannels`] if the kernel has neither one
/// channel nor as many channels as the image.
///
/// # Example
///
/// ```
/// use convkit_image::Image;
/// use convkit_imgproc::filter::{convolve, kernels};
///
/// let image = Image::from_size_val([4, 3].into(), 3, 2.0);
/// let sharpened = convolve(&image, &kernels::sharpen_filter(), true).unwrap();
///
/// assert_eq!(sharpened.num_channels(), 3);
/// assert_eq!(sharpened.as_slice(), image.as_slice());
/// ```
pub fn convolve(
    src: &Image,
    filter: &Image,
    preserve_channels: bool,
) -> Result<Image, ImageError> {
    if filter.num_channels() != src.num_channels() && filter.num_channels() != 1 {
        return Err(ImageError::InvalidKernelChannels(
            filter.num_channels(),
            src.num_channels(),
        ));
    }

    log::debug!(
        "convolve: image {} x {} channels, kernel {} x {} channels, preserve: {}",
        src.size(),
        src.num_channels(),
        filter.size(),
        filter.num_channels(),
        preserve_channels
    );

    let half_x = (filter.width() / 2) as isize;
    let half_y = (filter.height() / 2) as isize;
    let broadcast = filter.num_channels() == 1;

    let mut dst = src.zeros_like();

    parallel::par_iter_planes_rows(&mut dst, |ch, y, dst_row| {
        let plane = if broadcast { 0 } else { ch };
        let top = y as isize - half_y;

        dst_row.iter_mut().enumerate().for_each(|(x, dst_val)| {
            let left = x as isize - half_x;
            let mut sum = 0.0f64;
            for fy in 0..filter.height() {
                for fx in 0..filter.width() {
                    sum += f64::from(filter[[fx, fy, plane]])
                        * f64::from(src.get_clamped(left + fx as isize, top + fy as isize, ch));
                }
            }
            *dst_val = sum as f32;
        });
    });

    if preserve_channels {
        Ok(dst)
    } else {
        Ok(sum_channels(&dst))
    }
}

/// Collapse a multi-channel image into one channel by summing the channels of each pixel.
pub fn sum_channels(src: &Image) -> Image {
    let mut dst = Image::from_size_val(src.size(), 1, 0.0);

    let plane = src.width() * src.height();
    if plane == 0 {
        return dst;
    }

    for src_plane in src.as_slice().chunks_exact(plane) {
        dst.as_slice_mut()
            .iter_mut()
            .zip(src_plane.iter())
            .for_each(|(acc, &v)| *acc += v);
    }

    dst
}
