//! Generic weighted-neighborhood convolution and the pyramid blur built on it.
//!
//! ## Border Handling
//!
//! Near the border the neighborhood is clipped to the image and the kernel is
//! cropped on the same side(s) to match, instead of padding the image. With
//! `normalize` set the cropped kernel is divided by its own sum, so a flat
//! region keeps its value all the way to the edge.
//!
//! Rows are computed in parallel; each output pixel depends only on the
//! input, so the result matches a sequential pass exactly.

use log::debug;
use ndarray::{s, Array3};
use rayon::prelude::*;

use super::core::{clip_window, Kernel};
use crate::config::MAX_BLUR_RADIUS;
use crate::error::{FilterError, Result};
use crate::raster::Raster;

/// Convolve every channel of `raster` with `kernel`.
///
/// # Arguments
/// * `raster` - Image with 1 or 3 channels
/// * `kernel` - Odd-sided square kernel
/// * `normalize` - Divide the (cropped) kernel by its sum; a zero sum keeps raw weights
///
/// # Returns
/// New raster with the same dimensions and channel count; each value is the
/// weighted sum truncated toward zero and saturated into 0-255
pub fn convolve(raster: &Raster, kernel: &Kernel, normalize: bool) -> Result<Raster> {
    let (height, width, channels) = (raster.height(), raster.width(), raster.channels());
    let input = raster.view();
    let weights = kernel.weights();
    let half = kernel.half();

    let rows: Vec<Vec<u8>> = (0..height)
        .into_par_iter()
        .map(|y| {
            let mut row = Vec::with_capacity(width * channels);
            for x in 0..width {
                let win = clip_window((height, width), (y, x), half);
                let cropped = weights.slice(s![win.kernel_rows.clone(), win.kernel_cols.clone()]);

                let weight_sum = cropped.sum();
                let divisor = if normalize && weight_sum != 0.0 {
                    weight_sum
                } else {
                    1.0
                };

                for c in 0..channels {
                    let region = input.slice(s![win.rows.clone(), win.cols.clone(), c]);
                    let acc: f64 = region
                        .iter()
                        .zip(cropped.iter())
                        .map(|(&p, &w)| p as f64 * w)
                        .sum();
                    row.push((acc / divisor) as u8);
                }
            }
            row
        })
        .collect();

    let expected = height * width * channels;
    let pixels = rows.concat();
    let actual = pixels.len();
    let data = Array3::from_shape_vec((height, width, channels), pixels)
        .map_err(|_| FilterError::BufferSize { expected, actual })?;
    Raster::new(data)
}

/// Blur with the pyramid kernel of `radius` (see [`Kernel::blur`]).
///
/// Radius 0 is the identity; a negative radius is rejected. A radius reaching
/// past the image is capped at `max(height, width) - 1`: every window already
/// spans the whole image, and the dropped `2^(2b)` scale cancels in the
/// normalization, so the output is the same. A capped radius above
/// [`MAX_BLUR_RADIUS`] is rejected.
pub fn blur(raster: &Raster, radius: i32) -> Result<Raster> {
    if radius < 0 {
        return Err(FilterError::InvalidRadius(radius));
    }
    let reach = raster.height().max(raster.width()) - 1;
    let effective = (radius as usize).min(reach);
    debug!(
        "blur radius={} effective={} {}x{}",
        radius,
        effective,
        raster.width(),
        raster.height()
    );
    if effective == 0 {
        return Ok(raster.clone());
    }
    if effective > MAX_BLUR_RADIUS {
        return Err(FilterError::InvalidRadius(radius));
    }
    convolve(raster, &Kernel::blur(effective)?, true)
}
