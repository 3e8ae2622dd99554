use rayon::prelude::*;

use convkit_image::Image;

/// Apply a function to every row of every channel plane of the destination image in parallel.
///
/// The closure receives the channel index, the row index and the mutable row
/// slice of length `dst.cols()`. Rows are disjoint, so no synchronization is
/// needed between invocations.
pub fn par_iter_planes_rows(dst: &mut Image, f: impl Fn(usize, usize, &mut [f32]) + Send + Sync) {
    if dst.is_empty() {
        return;
    }

    let rows = dst.rows();
    let cols = dst.cols();

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(i, dst_row)| {
            f(i / rows, i % rows, dst_row);
        });
}

/// Apply a function to each sample of the image in parallel with a value.
///
/// PRECONDITION: `src` and `dst` must hold the same number of samples.
pub fn par_iter_samples(src: &Image, dst: &mut Image, f: impl Fn(&f32, &mut f32) + Send + Sync) {
    src.as_slice()
        .par_iter()
        .zip(dst.as_slice_mut().par_iter_mut())
        .for_each(|(src_val, dst_val)| {
            f(src_val, dst_val);
        });
}

/// Apply a function to each sample of the image in parallel with two values.
///
/// PRECONDITION: `src1`, `src2` and `dst` must hold the same number of samples.
pub fn par_iter_samples_two(
    src1: &Image,
    src2: &Image,
    dst: &mut Image,
    f: impl Fn(&f32, &f32, &mut f32) + Send + Sync,
) {
    src1.as_slice()
        .par_iter()
        .zip(src2.as_slice().par_iter())
        .zip(dst.as_slice_mut().par_iter_mut())
        .for_each(|((src1_val, src2_val), dst_val)| {
            f(src1_val, src2_val, dst_val);
        });
}

/// Map each pixel of a three channel image to a pixel of a three channel image in parallel.
///
/// The closure receives the three samples of a pixel gathered from the
/// source planes and returns the three samples to scatter into the
/// destination planes.
///
/// PRECONDITION: `src` and `dst` must both have 3 channels and the same size.
pub fn par_map_pixels3(
    src: &Image,
    dst: &mut Image,
    f: impl Fn([f32; 3]) -> [f32; 3] + Send + Sync,
) {
    let plane = src.width() * src.height();
    let src_data = src.as_slice();

    let (dst0, rest) = dst.as_slice_mut().split_at_mut(plane);
    let (dst1, dst2) = rest.split_at_mut(plane);

    dst0.par_iter_mut()
        .zip(dst1.par_iter_mut())
        .zip(dst2.par_iter_mut())
        .enumerate()
        .for_each(|(i, ((out0, out1), out2))| {
            let [a, b, c] = f([
                src_data[i],
                src_data[i + plane],
                src_data[i + 2 * plane],
            ]);
            *out0 = a;
            *out1 = b;
            *out2 = c;
        });
}
