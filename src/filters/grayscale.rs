//! Grayscale conversion filter.
//!
//! Uses the 0.2989 / 0.5870 / 0.1140 luma weights, evaluated in `f64` and
//! truncated toward zero. The truncation feeds straight into the gradient
//! filters, so it is part of their numeric contract.
//!
//! The three weights sum to 0.9999, which would pull every neutral pixel
//! down by one level on each pass. Pixels with `R == G == B` therefore keep
//! their value, making grayscale a fixed point once applied.

use log::debug;
use ndarray::Array2;

use crate::error::Result;
use crate::raster::{LumaGrid, Raster, GRAY_CHANNELS, RGB_CHANNELS};

const LUMA_R: f64 = 0.2989;
const LUMA_G: f64 = 0.5870;
const LUMA_B: f64 = 0.1140;

/// Luma of a single RGB pixel.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        return r;
    }
    (LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64) as u8
}

/// Reduce an RGB raster to its luma grid (array mode).
///
/// # Arguments
/// * `raster` - 3-channel raster
///
/// # Returns
/// `(height, width)` grid of truncated luma values
pub fn luma_grid(raster: &Raster) -> Result<LumaGrid> {
    raster.expect_channels(RGB_CHANNELS)?;
    let input = raster.view();
    Ok(Array2::from_shape_fn(
        (raster.height(), raster.width()),
        |(y, x)| luma(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]]),
    ))
}

/// Luma grid for any raster: single-channel input already is one.
pub fn luma_of(raster: &Raster) -> Result<LumaGrid> {
    if raster.channels() == GRAY_CHANNELS {
        let input = raster.view();
        return Ok(Array2::from_shape_fn(
            (raster.height(), raster.width()),
            |(y, x)| input[[y, x, 0]],
        ));
    }
    luma_grid(raster)
}

/// Convert an RGB raster to grayscale, replicating luma into all three
/// channels.
pub fn grayscale(raster: &Raster) -> Result<Raster> {
    debug!("grayscale {}x{}", raster.width(), raster.height());
    let luma = luma_grid(raster)?;
    Raster::from_luma(&luma)
}
