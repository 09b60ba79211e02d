//! rasterlab
//!
//! Pixel-level filter engine for a small raster-image editor, with Python
//! bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! The host hands over 8-bit RGB rasters, shape (height, width, 3).
//! Single-channel (height, width, 1) rasters only occur as luma
//! intermediates inside the grayscale and edge filters.
//!
//! ## Filter Architecture
//! Every filter is a pure function: it borrows a [`Raster`], allocates a new
//! one and keeps nothing between calls. The [`Filter`] enum is the closed set
//! of actions the editor dispatches; [`EditSession`] holds the current raster
//! and a bounded undo history on the host side.

pub mod config;
pub mod error;
pub mod filters;
pub mod history;
pub mod raster;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use crate::error::{FilterError, Result};
pub use crate::filters::core::Kernel;
pub use crate::filters::Filter;
pub use crate::history::{EditSession, History};
pub use crate::raster::{GradientField, LumaGrid, Raster};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use ndarray::Array2;
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray2, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::FilterError;
    use crate::filters::core::Kernel;
    use crate::filters::{color_adjust, convolve, edge, grayscale, Filter};
    use crate::raster::Raster;

    impl From<FilterError> for PyErr {
        fn from(err: FilterError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    fn to_raster(image: PyReadonlyArray3<'_, u8>) -> PyResult<Raster> {
        Ok(Raster::new(image.as_array().to_owned())?)
    }

    fn to_py<'py>(py: Python<'py>, raster: Raster) -> Bound<'py, PyArray3<u8>> {
        raster.into_array().into_pyarray(py)
    }

    // ========================================================================
    // Grayscale
    // ========================================================================

    /// Convert an RGB u8 image to grayscale, luma replicated into R, G and B.
    #[pyfunction]
    pub fn grayscale_rgb<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = grayscale::grayscale(&to_raster(image)?)?;
        Ok(to_py(py, result))
    }

    // ========================================================================
    // Edge Detection
    // ========================================================================

    /// Horizontal `[-1, 0, 1]` derivative, red for positive, blue for negative.
    #[pyfunction]
    pub fn horizontal_derivative<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = edge::horizontal_derivative(&to_raster(image)?)?;
        Ok(to_py(py, result))
    }

    /// Vertical `[-1, 0, 1]` derivative, red for positive, blue for negative.
    #[pyfunction]
    pub fn vertical_derivative<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = edge::vertical_derivative(&to_raster(image)?)?;
        Ok(to_py(py, result))
    }

    /// Sobel edge magnitude scaled to 0-255.
    #[pyfunction]
    pub fn sobel<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = edge::sobel(&to_raster(image)?)?;
        Ok(to_py(py, result))
    }

    // ========================================================================
    // Convolution
    // ========================================================================

    /// Pyramid blur of the given radius.
    #[pyfunction]
    pub fn blur<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        radius: i32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = convolve::blur(&to_raster(image)?, radius)?;
        Ok(to_py(py, result))
    }

    /// Convolve with an arbitrary odd-sided square kernel.
    #[pyfunction]
    #[pyo3(signature = (image, kernel, normalize=true))]
    pub fn convolve_kernel<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        kernel: PyReadonlyArray2<'py, f64>,
        normalize: bool,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let weights: Array2<f64> = kernel.as_array().to_owned();
        let kernel = Kernel::new(weights)?;
        let result = convolve::convolve(&to_raster(image)?, &kernel, normalize)?;
        Ok(to_py(py, result))
    }

    // ========================================================================
    // Color Adjustment
    // ========================================================================

    /// Scale every channel by `amount² / 100`.
    #[pyfunction]
    #[pyo3(signature = (image, amount=10))]
    pub fn brightness<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        amount: i32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = color_adjust::brightness(&to_raster(image)?, amount)?;
        Ok(to_py(py, result))
    }

    /// Apply a filter given as a spec string such as `"blur:3"`.
    #[pyfunction]
    pub fn apply_filter<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        spec: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let filter: Filter = spec.parse().map_err(FilterError::from)?;
        let result = filter.apply(&to_raster(image)?)?;
        Ok(to_py(py, result))
    }

    /// rasterlab extension module
    #[pymodule]
    pub fn rasterlab(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(grayscale_rgb, m)?)?;

        // Edge detection
        m.add_function(wrap_pyfunction!(horizontal_derivative, m)?)?;
        m.add_function(wrap_pyfunction!(vertical_derivative, m)?)?;
        m.add_function(wrap_pyfunction!(sobel, m)?)?;

        // Convolution
        m.add_function(wrap_pyfunction!(blur, m)?)?;
        m.add_function(wrap_pyfunction!(convolve_kernel, m)?)?;

        m.add_function(wrap_pyfunction!(brightness, m)?)?;
        m.add_function(wrap_pyfunction!(apply_filter, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::rasterlab;
