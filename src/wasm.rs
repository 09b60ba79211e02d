//! WebAssembly exports for rasterlab filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images travel
//! as flat row-major RGB byte arrays (length = width * height * 3); the
//! result has the same layout and size.

use wasm_bindgen::prelude::*;

use crate::error::FilterError;
use crate::filters::{color_adjust, convolve, edge, grayscale, Filter};
use crate::raster::Raster;

fn to_raster(data: &[u8], width: usize, height: usize) -> Result<Raster, JsError> {
    Ok(Raster::from_rgb_vec(height, width, data.to_vec())?)
}

// ============================================================================
// Grayscale
// ============================================================================

/// Convert RGB bytes to grayscale, luma replicated into every channel.
#[wasm_bindgen]
pub fn grayscale_rgb_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    let result = grayscale::grayscale(&to_raster(data, width, height)?)?;
    Ok(result.into_raw_vec())
}

// ============================================================================
// Edge Detection
// ============================================================================

#[wasm_bindgen]
pub fn horizontal_derivative_wasm(
    data: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, JsError> {
    let result = edge::horizontal_derivative(&to_raster(data, width, height)?)?;
    Ok(result.into_raw_vec())
}

#[wasm_bindgen]
pub fn vertical_derivative_wasm(
    data: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, JsError> {
    let result = edge::vertical_derivative(&to_raster(data, width, height)?)?;
    Ok(result.into_raw_vec())
}

/// Sobel magnitude scaled to 0-255, replicated into every channel.
#[wasm_bindgen]
pub fn sobel_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    let result = edge::sobel(&to_raster(data, width, height)?)?;
    Ok(result.into_raw_vec())
}

// ============================================================================
// Blur / Brightness
// ============================================================================

/// Pyramid blur; `radius` must be non-negative.
#[wasm_bindgen]
pub fn blur_wasm(data: &[u8], width: usize, height: usize, radius: i32) -> Result<Vec<u8>, JsError> {
    let result = convolve::blur(&to_raster(data, width, height)?, radius)?;
    Ok(result.into_raw_vec())
}

/// Brightness slider: every channel scaled by `amount² / 100`.
#[wasm_bindgen]
pub fn brightness_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    amount: i32,
) -> Result<Vec<u8>, JsError> {
    let result = color_adjust::brightness(&to_raster(data, width, height)?, amount)?;
    Ok(result.into_raw_vec())
}

/// Apply a filter from a spec string such as `"brightness:14"`.
#[wasm_bindgen]
pub fn apply_filter_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    spec: &str,
) -> Result<Vec<u8>, JsError> {
    let filter: Filter = spec.parse().map_err(FilterError::from)?;
    let result = filter.apply(&to_raster(data, width, height)?)?;
    Ok(result.into_raw_vec())
}
