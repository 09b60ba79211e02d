//! Color adjustment filters: brightness.
//!
//! Pixel-wise operation, works on 1- and 3-channel rasters alike.

use log::debug;

use crate::error::{FilterError, Result};
use crate::raster::Raster;

// ============================================================================
// Brightness
// ============================================================================

/// Scale factor for a brightness slider position: `amount² / 100`.
///
/// 10 maps to exactly 1.0, 0 to black, 20 to 4.0.
#[inline]
pub fn brightness_factor(amount: i32) -> f64 {
    let a = amount as f64;
    a * a / 100.0
}

/// Adjust image brightness.
///
/// # Arguments
/// * `raster` - Image with 1 or 3 channels
/// * `amount` - Slider position, non-negative (UI range 0-20, default 10)
///
/// # Returns
/// Raster with every channel scaled by [`brightness_factor`], clamped to
/// 0-255 and truncated
pub fn brightness(raster: &Raster, amount: i32) -> Result<Raster> {
    if amount < 0 {
        return Err(FilterError::InvalidAmount(amount));
    }
    let factor = brightness_factor(amount);
    debug!("brightness amount={} factor={}", amount, factor);

    let output = raster
        .view()
        .mapv(|v| (v as f64 * factor).clamp(0.0, 255.0) as u8);
    Raster::new(output)
}
