//! The shared pixel buffer every transform reads and produces.
//!
//! A [`Raster`] is a dense `(height, width, channels)` grid of `u8` values
//! with either one channel (luma) or three (R, G, B). Rasters are value-like
//! snapshots: transforms borrow one and allocate a new one, never mutating
//! their input.

use image::{DynamicImage, RgbImage};
use ndarray::{Array2, Array3, ArrayView3, Axis};

use crate::error::{FilterError, Result};

/// Single-channel luma grid.
pub type LumaGrid = Array2<u8>;

/// Signed gradient intermediate, wider than 8 bits.
pub type GradientField = Array2<i32>;

pub const RGB_CHANNELS: usize = 3;
pub const GRAY_CHANNELS: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    data: Array3<u8>,
}

impl Raster {
    /// Wrap an `(H, W, C)` array. `C` must be 1 or 3 and both spatial
    /// dimensions non-zero.
    pub fn new(data: Array3<u8>) -> Result<Self> {
        let (height, width, channels) = data.dim();
        if height == 0 || width == 0 {
            return Err(FilterError::EmptyRaster);
        }
        if channels != RGB_CHANNELS && channels != GRAY_CHANNELS {
            return Err(FilterError::ChannelMismatch {
                expected: RGB_CHANNELS,
                found: channels,
            });
        }
        Ok(Self { data })
    }

    /// Uniform RGB raster.
    pub fn filled(height: usize, width: usize, rgb: [u8; 3]) -> Result<Self> {
        let data = Array3::from_shape_fn((height, width, RGB_CHANNELS), |(_, _, c)| rgb[c]);
        Self::new(data)
    }

    /// Build an RGB raster from a tightly packed row-major buffer.
    ///
    /// Dimensions whose byte count overflows `usize` report an expected size
    /// of `usize::MAX`, which no buffer can match.
    pub fn from_rgb_vec(height: usize, width: usize, pixels: Vec<u8>) -> Result<Self> {
        let actual = pixels.len();
        let expected = height
            .checked_mul(width)
            .and_then(|n| n.checked_mul(RGB_CHANNELS))
            .unwrap_or(usize::MAX);
        if actual != expected {
            return Err(FilterError::BufferSize { expected, actual });
        }
        let data = Array3::from_shape_vec((height, width, RGB_CHANNELS), pixels)
            .map_err(|_| FilterError::BufferSize { expected, actual })?;
        Self::new(data)
    }

    /// Single-channel raster holding `luma` as-is.
    pub fn from_gray(luma: LumaGrid) -> Result<Self> {
        Self::new(luma.insert_axis(Axis(2)))
    }

    /// Three-channel raster with every channel equal to `luma`.
    pub fn from_luma(luma: &LumaGrid) -> Result<Self> {
        let (height, width) = luma.dim();
        let data = Array3::from_shape_fn((height, width, RGB_CHANNELS), |(y, x, _)| luma[[y, x]]);
        Self::new(data)
    }

    /// Decode boundary: any colour type is normalized to 8-bit RGB.
    pub fn from_dynamic_image(image: &DynamicImage) -> Result<Self> {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        Self::from_rgb_vec(height as usize, width as usize, rgb.into_raw())
    }

    /// Encode boundary: single-channel rasters are replicated to RGB.
    pub fn to_rgb_image(&self) -> Result<RgbImage> {
        let rgb = if self.is_rgb() {
            self.clone()
        } else {
            Raster::from_luma(&self.data.index_axis(Axis(2), 0).to_owned())?
        };
        let (height, width) = (rgb.height(), rgb.width());
        let raw = rgb.into_raw_vec();
        let actual = raw.len();
        RgbImage::from_raw(width as u32, height as u32, raw).ok_or(FilterError::BufferSize {
            expected: height * width * RGB_CHANNELS,
            actual,
        })
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    pub fn is_rgb(&self) -> bool {
        self.channels() == RGB_CHANNELS
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    /// Channel values of the pixel at `(y, x)`.
    ///
    /// # Panics
    /// If `y >= height()` or `x >= width()`.
    pub fn pixel(&self, y: usize, x: usize) -> Vec<u8> {
        self.data.slice(ndarray::s![y, x, ..]).to_vec()
    }

    /// Contract check used by the RGB-only entry points.
    pub fn expect_channels(&self, expected: usize) -> Result<()> {
        if self.channels() != expected {
            return Err(FilterError::ChannelMismatch {
                expected,
                found: self.channels(),
            });
        }
        Ok(())
    }

    pub fn into_array(self) -> Array3<u8> {
        self.data
    }

    /// Row-major bytes in `(H, W, C)` order.
    pub fn into_raw_vec(self) -> Vec<u8> {
        if self.data.is_standard_layout() {
            self.data.into_raw_vec_and_offset().0
        } else {
            self.data.iter().copied().collect()
        }
    }
}
