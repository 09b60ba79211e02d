//! Edge detection filters: directional derivatives and Sobel magnitude.
//!
//! All filters work on the luma grid of the input (see
//! [`grayscale`](super::grayscale)). Derivatives produce a signed
//! [`GradientField`] which is colorized for display: positive responses in
//! red, negative in blue. Sobel produces an 8-bit magnitude rescaled so the
//! strongest edge is 255.

use log::debug;
use ndarray::Array2;

use super::core::pad_edge;
use super::grayscale::luma_of;
use crate::error::Result;
use crate::raster::{GradientField, LumaGrid, Raster, RGB_CHANNELS};

const SOBEL_X: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_Y: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

// ============================================================================
// Directional Derivatives
// ============================================================================

/// Sweep direction of a `[-1, 0, 1]` derivative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Horizontal,
    Vertical,
}

/// Unnormalized `[-1, 0, 1]` response of a luma grid along `direction`.
///
/// Only interior positions are visited. The first and last line in the
/// swept direction stay exactly zero; they are never sampled from outside
/// the grid.
pub fn derivative(luma: &LumaGrid, direction: Direction) -> GradientField {
    let (height, width) = luma.dim();
    let mut output = GradientField::zeros((height, width));

    match direction {
        Direction::Horizontal => {
            for y in 0..height {
                for x in 1..width.saturating_sub(1) {
                    output[[y, x]] = luma[[y, x + 1]] as i32 - luma[[y, x - 1]] as i32;
                }
            }
        }
        Direction::Vertical => {
            for y in 1..height.saturating_sub(1) {
                for x in 0..width {
                    output[[y, x]] = luma[[y + 1, x]] as i32 - luma[[y - 1, x]] as i32;
                }
            }
        }
    }

    output
}

/// Raw horizontal gradient of a raster's luma.
pub fn horizontal_gradient(raster: &Raster) -> Result<GradientField> {
    Ok(derivative(&luma_of(raster)?, Direction::Horizontal))
}

/// Raw vertical gradient of a raster's luma.
pub fn vertical_gradient(raster: &Raster) -> Result<GradientField> {
    Ok(derivative(&luma_of(raster)?, Direction::Vertical))
}

/// Horizontal derivative, colorized for display.
pub fn horizontal_derivative(raster: &Raster) -> Result<Raster> {
    debug!("horizontal derivative {}x{}", raster.width(), raster.height());
    colorize_signed(&horizontal_gradient(raster)?)
}

/// Vertical derivative, colorized for display.
pub fn vertical_derivative(raster: &Raster) -> Result<Raster> {
    debug!("vertical derivative {}x{}", raster.width(), raster.height());
    colorize_signed(&vertical_gradient(raster)?)
}

// ============================================================================
// Colorization
// ============================================================================

/// How a squared gradient is narrowed to 8 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SquareCast {
    /// Keep the low byte (`v² mod 256`), like a byte-width unsigned cast.
    #[default]
    Wrapping,
    /// Clamp to 255.
    Saturating,
}

impl SquareCast {
    #[inline]
    fn narrow(self, squared: i64) -> u8 {
        match self {
            SquareCast::Wrapping => (squared & 0xff) as u8,
            SquareCast::Saturating => squared.clamp(0, 255) as u8,
        }
    }
}

/// Map a signed gradient to RGB: red carries `v²` for `v >= 0`, blue carries
/// `v²` for `v < 0`, green is always zero.
///
/// Both signs carry the same magnitude: `-5` lights blue at 25. Storing the
/// negated square `-(v²)` before a byte cast would land on
/// `256 - (v² mod 256)` instead (231 for `-5`); that is not done here.
///
/// # Arguments
/// * `field` - Signed gradient grid
/// * `cast` - Narrowing rule for squares above 255
pub fn colorize_gradient(field: &GradientField, cast: SquareCast) -> Result<Raster> {
    let (height, width) = field.dim();
    let data = ndarray::Array3::from_shape_fn((height, width, RGB_CHANNELS), |(y, x, c)| {
        let v = field[[y, x]] as i64;
        let squared = cast.narrow(v * v);
        match (c, v < 0) {
            (0, false) => squared,
            (2, true) => squared,
            _ => 0,
        }
    });
    Raster::new(data)
}

/// [`colorize_gradient`] with the default wrapping cast.
pub fn colorize_signed(field: &GradientField) -> Result<Raster> {
    colorize_gradient(field, SquareCast::Wrapping)
}

// ============================================================================
// Sobel Edge Magnitude
// ============================================================================

/// Unscaled Sobel magnitude `sqrt(Gx² + Gy²)` over an edge-replicated luma.
pub fn sobel_gradient_magnitude(luma: &LumaGrid) -> Array2<f64> {
    let (height, width) = luma.dim();
    let padded = pad_edge(luma, 1);

    Array2::from_shape_fn((height, width), |(y, x)| {
        let mut gx = 0i32;
        let mut gy = 0i32;
        for ky in 0..3 {
            for kx in 0..3 {
                let lum = padded[[y + ky, x + kx]] as i32;
                gx += lum * SOBEL_X[ky][kx];
                gy += lum * SOBEL_Y[ky][kx];
            }
        }
        ((gx * gx + gy * gy) as f64).sqrt()
    })
}

/// Sobel edge magnitude, rescaled so the strongest edge maps to 255.
///
/// A flat image has no edges; it yields an all-zero grid instead of
/// dividing by zero.
///
/// # Returns
/// Single-channel magnitude grid with the input's dimensions
pub fn sobel_magnitude(raster: &Raster) -> Result<LumaGrid> {
    let magnitude = sobel_gradient_magnitude(&luma_of(raster)?);
    let max = magnitude.iter().copied().fold(0.0f64, f64::max);

    if max == 0.0 {
        return Ok(LumaGrid::zeros(magnitude.dim()));
    }

    Ok(magnitude.mapv(|m| (m * 255.0 / max) as u8))
}

/// Sobel edge magnitude replicated into three channels for display.
pub fn sobel(raster: &Raster) -> Result<Raster> {
    debug!("sobel {}x{}", raster.width(), raster.height());
    Raster::from_luma(&sobel_magnitude(raster)?)
}
