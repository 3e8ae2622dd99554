use crate::parallel;
use convkit_image::{Image, ImageError};

fn check_three_channels(src: &Image, dst: &Image) -> Result<(), ImageError> {
    if src.num_channels() != 3 {
        return Err(ImageError::InvalidChannelCount(src.num_channels(), 3));
    }

    if dst.num_channels() != 3 {
        return Err(ImageError::InvalidChannelCount(dst.num_channels(), 3));
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    Ok(())
}

/// Convert an HSV image to an RGB image.
///
/// The input image is assumed to have 3 channels in the order H, S, V, all in
/// the range [0, 1]. The hue is a fraction of a full turn and wraps around, so
/// a hue of 1 is the same red as a hue of 0.
///
/// # Arguments
///
/// * `src` - The input HSV image assumed to have 3 channels.
/// * `dst` - The output RGB image with channels in the range [0, 1].
///
/// Precondition: the input and output images must have 3 channels.
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use convkit_image::Image;
/// use convkit_imgproc::color::rgb_from_hsv;
///
/// // pure green: hue 1/3, full saturation and value
/// let hsv = Image::new([1, 1].into(), 3, vec![1.0 / 3.0, 1.0, 1.0]).unwrap();
/// let mut rgb = hsv.zeros_like();
///
/// rgb_from_hsv(&hsv, &mut rgb).unwrap();
///
/// assert!(rgb.get_pixel(0, 0, 0).unwrap() < 1e-5);
/// assert_eq!(rgb.get_pixel(0, 0, 1).unwrap(), 1.0);
/// ```
pub fn rgb_from_hsv(src: &Image, dst: &mut Image) -> Result<(), ImageError> {
    check_three_channels(src, dst)?;

    parallel::par_map_pixels3(src, dst, |[h, s, v]| {
        // rem_euclid of a tiny negative hue rounds up to 1.0
        let h6 = h.rem_euclid(1.0) * 6.0;
        let h6 = if h6 >= 6.0 { 0.0 } else { h6 };
        let sector = h6.floor();
        let f = h6 - sector;

        let p = v * (1.0 - s);
        let q = v * (1.0 - f * s);
        let t = v * (1.0 - (1.0 - f) * s);

        match sector as u32 {
            0 => [v, t, p],
            1 => [q, v, p],
            2 => [p, v, t],
            3 => [p, q, v],
            4 => [t, p, v],
            _ => [v, p, q],
        }
    });

    Ok(())
}

/// Convert an RGB image to an HSV image.
///
/// The input image is assumed to have 3 channels in the order R, G, B in the
/// range [0, 1].
///
/// # Arguments
///
/// * `src` - The input RGB image assumed to have 3 channels.
/// * `dst` - The output HSV image.
///
/// # Returns
///
/// The HSV image with the following channels:
///
/// * H: The hue channel in the range [0, 1) (0-360 degrees).
/// * S: The saturation channel in the range [0, 1].
/// * V: The value channel in the range [0, 1].
///
/// Precondition: the input and output images must have 3 channels.
/// Precondition: the input and output images must have the same size.
pub fn hsv_from_rgb(src: &Image, dst: &mut Image) -> Result<(), ImageError> {
    check_three_channels(src, dst)?;

    parallel::par_map_pixels3(src, dst, |[r, g, b]| {
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let h = if delta == 0.0 {
            0.0
        } else if max == r {
            (g - b) / delta
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        // Ensure h is in the range [0, 1)
        let h = h / 6.0;
        let h = if h < 0.0 { h + 1.0 } else { h };

        let s = if max == 0.0 { 0.0 } else { delta / max };

        [h, s, max]
    });

    Ok(())
}
