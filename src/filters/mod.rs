//! Filter modules for image processing effects.
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Luma8 | (H, W, 1) | u8 | Single luminance channel, 0-255 |
//! | RGB8 | (H, W, 3) | u8 | Red, green, blue, 0-255 |
//!
//! The host always hands over RGB8. Single-channel rasters appear only as
//! intermediates of the grayscale and edge paths before they are replicated
//! back to three channels.
//!
//! ## Architecture
//!
//! All filters follow these principles:
//! - **Pure** - Borrow the input, allocate a new output, keep no state
//! - **Exact** - Truncating casts and clamping are part of each filter's contract
//! - **Checked** - Bad parameters and channel counts come back as [`FilterError`]
//!
//! ## Filter Categories
//!
//! - **Pixel-wise**: brightness
//! - **Luma**: grayscale
//! - **Edge detection**: horizontal/vertical derivative, sobel
//! - **Neighborhood**: convolve, blur

pub mod color_adjust;
pub mod convolve;
pub mod core;
pub mod edge;
pub mod grayscale;

use std::fmt;
use std::str::FromStr;

use crate::error::{FilterError, Result};
use crate::raster::{Raster, RGB_CHANNELS};

/// The closed set of transforms the editor exposes, one per toolbar action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Grayscale,
    HorizontalDerivative,
    VerticalDerivative,
    Sobel,
    Blur { radius: i32 },
    Brightness { amount: i32 },
}

impl Filter {
    /// Apply the filter to an RGB raster, returning a new RGB raster.
    pub fn apply(&self, raster: &Raster) -> Result<Raster> {
        raster.expect_channels(RGB_CHANNELS)?;
        match *self {
            Filter::Grayscale => grayscale::grayscale(raster),
            Filter::HorizontalDerivative => edge::horizontal_derivative(raster),
            Filter::VerticalDerivative => edge::vertical_derivative(raster),
            Filter::Sobel => edge::sobel(raster),
            Filter::Blur { radius } => convolve::blur(raster, radius),
            Filter::Brightness { amount } => color_adjust::brightness(raster, amount),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Filter::Grayscale => "grayscale",
            Filter::HorizontalDerivative => "hderiv",
            Filter::VerticalDerivative => "vderiv",
            Filter::Sobel => "sobel",
            Filter::Blur { .. } => "blur",
            Filter::Brightness { .. } => "brightness",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Blur { radius } => write!(f, "{}:{}", self.name(), radius),
            Filter::Brightness { amount } => write!(f, "{}:{}", self.name(), amount),
            _ => f.write_str(self.name()),
        }
    }
}

/// Error from parsing a filter spec such as `blur:3`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter spec '{0}' (expected grayscale, hderiv, vderiv, sobel, blur:N or brightness:N)")]
pub struct ParseFilterError(pub String);

impl FromStr for Filter {
    type Err = ParseFilterError;

    fn from_str(spec: &str) -> std::result::Result<Self, Self::Err> {
        let spec = spec.trim();
        let (name, arg) = match spec.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (spec, None),
        };
        let param = |default: i32| -> std::result::Result<i32, ParseFilterError> {
            match arg {
                None => Ok(default),
                Some(a) => a.trim().parse().map_err(|_| ParseFilterError(spec.to_string())),
            }
        };

        match (name.to_ascii_lowercase().as_str(), arg) {
            ("grayscale" | "gray", None) => Ok(Filter::Grayscale),
            ("hderiv" | "horizontal", None) => Ok(Filter::HorizontalDerivative),
            ("vderiv" | "vertical", None) => Ok(Filter::VerticalDerivative),
            ("sobel", None) => Ok(Filter::Sobel),
            ("blur", _) => Ok(Filter::Blur { radius: param(1)? }),
            ("brightness", _) => Ok(Filter::Brightness {
                amount: param(crate::config::DEFAULT_BRIGHTNESS)?,
            }),
            _ => Err(ParseFilterError(spec.to_string())),
        }
    }
}

impl From<ParseFilterError> for FilterError {
    fn from(err: ParseFilterError) -> Self {
        FilterError::UnknownFilter(err.0)
    }
}
