//! Core utilities for the neighborhood filters.
//!
//! This module provides shared functionality used by multiple filters:
//! - Square convolution kernels with an odd side
//! - Pyramid blur kernel generation
//! - Border window clipping (region and matching kernel slice)
//! - Edge-replication padding

use std::ops::Range;

use ndarray::Array2;

use crate::config::MAX_BLUR_RADIUS;
use crate::error::{FilterError, Result};

// ============================================================================
// Kernel
// ============================================================================

/// Square matrix of real-valued weights with side `2k+1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    weights: Array2<f64>,
}

impl Kernel {
    /// Wrap a weight matrix, rejecting anything that has no unique center.
    pub fn new(weights: Array2<f64>) -> Result<Self> {
        let (rows, cols) = weights.dim();
        if rows != cols || rows % 2 == 0 {
            return Err(FilterError::InvalidKernel { rows, cols });
        }
        Ok(Self { weights })
    }

    /// Generate the pyramid blur kernel for `radius`.
    ///
    /// Weight at `(i, j)` is `2^(x + y)` where `x = min(i, 2b - i)` and
    /// `y = min(j, 2b - j)`: `1` in the corners, `2^(2b)` at the center.
    ///
    /// # Arguments
    /// * `radius` - Half side `b`; the kernel is `(2b + 1) x (2b + 1)`
    ///
    /// # Errors
    /// `InvalidRadius` when `radius` exceeds [`MAX_BLUR_RADIUS`]
    pub fn blur(radius: usize) -> Result<Self> {
        if radius > MAX_BLUR_RADIUS {
            return Err(FilterError::InvalidRadius(
                i32::try_from(radius).unwrap_or(i32::MAX),
            ));
        }
        let side = 2 * radius + 1;
        let weights = Array2::from_shape_fn((side, side), |(i, j)| {
            let x = i.min(2 * radius - i);
            let y = j.min(2 * radius - j);
            2f64.powi((x + y) as i32)
        });
        Ok(Self { weights })
    }

    pub fn side(&self) -> usize {
        self.weights.nrows()
    }

    /// Distance from the center cell to an edge, `(side - 1) / 2`.
    pub fn half(&self) -> usize {
        self.side() / 2
    }

    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    pub fn sum(&self) -> f64 {
        self.weights.sum()
    }
}

// ============================================================================
// Border Clipping
// ============================================================================

/// Image region around a pixel, clipped to the image, together with the
/// kernel rows/columns that line up with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub rows: Range<usize>,
    pub cols: Range<usize>,
    pub kernel_rows: Range<usize>,
    pub kernel_cols: Range<usize>,
}

/// Clip the `(2k+1)`-wide neighborhood of `center` to `bounds`.
///
/// The kernel slice is trimmed by exactly the offsets removed from the
/// region, so `rows.len() == kernel_rows.len()` and likewise for columns.
/// Both sides are trimmed when the kernel is wider than the image.
///
/// # Arguments
/// * `bounds` - Image `(height, width)`
/// * `center` - Output pixel `(row, col)`, inside `bounds`
/// * `half` - Kernel half side `k`
pub fn clip_window(bounds: (usize, usize), center: (usize, usize), half: usize) -> Window {
    let (rows, kernel_rows) = clip_axis(bounds.0, center.0, half);
    let (cols, kernel_cols) = clip_axis(bounds.1, center.1, half);
    Window {
        rows,
        cols,
        kernel_rows,
        kernel_cols,
    }
}

#[inline]
fn clip_axis(len: usize, pos: usize, half: usize) -> (Range<usize>, Range<usize>) {
    let start = pos.saturating_sub(half);
    let end = (pos + half + 1).min(len);
    let kernel_start = half - (pos - start);
    (start..end, kernel_start..kernel_start + (end - start))
}

// ============================================================================
// Padding
// ============================================================================

/// Pad a grid by `pad` cells on every side, repeating the nearest border cell.
pub fn pad_edge<T: Copy>(grid: &Array2<T>, pad: usize) -> Array2<T> {
    let (height, width) = grid.dim();
    Array2::from_shape_fn((height + 2 * pad, width + 2 * pad), |(y, x)| {
        let sy = y.saturating_sub(pad).min(height - 1);
        let sx = x.saturating_sub(pad).min(width - 1);
        grid[[sy, sx]]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_blur_kernel_radius_one() {
        let kernel = Kernel::blur(1).unwrap();
        assert_eq!(
            kernel.weights(),
            &array![[1.0, 2.0, 1.0], [2.0, 4.0, 2.0], [1.0, 2.0, 1.0]]
        );
        assert_eq!(kernel.side(), 3);
        assert_eq!(kernel.half(), 1);
        assert_eq!(kernel.sum(), 16.0);
    }

    #[test]
    fn test_blur_kernel_radius_zero_is_identity() {
        let kernel = Kernel::blur(0).unwrap();
        assert_eq!(kernel.weights(), &array![[1.0]]);
        assert_eq!(kernel.half(), 0);
    }

    #[test]
    fn test_blur_kernel_radius_two_peak() {
        let kernel = Kernel::blur(2).unwrap();
        let w = kernel.weights();
        assert_eq!(kernel.side(), 5);
        assert_eq!(w[[2, 2]], 16.0);
        assert_eq!(w[[0, 0]], 1.0);
        assert_eq!(w[[0, 2]], 4.0);
        assert_eq!(w[[1, 3]], 4.0);
        assert_eq!(w[[4, 4]], 1.0);
    }

    #[test]
    fn test_blur_kernel_rejects_oversized_radius() {
        assert!(Kernel::blur(MAX_BLUR_RADIUS).is_ok());
        assert!(matches!(
            Kernel::blur(MAX_BLUR_RADIUS + 1),
            Err(FilterError::InvalidRadius(r)) if r as usize == MAX_BLUR_RADIUS + 1
        ));
        assert!(matches!(
            Kernel::blur(usize::MAX / 2),
            Err(FilterError::InvalidRadius(i32::MAX))
        ));
    }

    #[test]
    fn test_blur_kernel_largest_radius_is_finite() {
        let kernel = Kernel::blur(MAX_BLUR_RADIUS).unwrap();
        assert!(kernel.sum().is_finite());
        assert_eq!(kernel.weights()[[MAX_BLUR_RADIUS, MAX_BLUR_RADIUS]], 2f64.powi(512));
    }

    #[test]
    fn test_kernel_rejects_even_or_rectangular() {
        assert!(matches!(
            Kernel::new(Array2::zeros((2, 2))),
            Err(FilterError::InvalidKernel { rows: 2, cols: 2 })
        ));
        assert!(matches!(
            Kernel::new(Array2::zeros((3, 1))),
            Err(FilterError::InvalidKernel { rows: 3, cols: 1 })
        ));
        assert!(Kernel::new(Array2::zeros((0, 0))).is_err());
        assert!(Kernel::new(Array2::ones((5, 5))).is_ok());
    }

    #[test]
    fn test_clip_window_interior() {
        let w = clip_window((10, 10), (5, 5), 2);
        assert_eq!(w.rows, 3..8);
        assert_eq!(w.cols, 3..8);
        assert_eq!(w.kernel_rows, 0..5);
        assert_eq!(w.kernel_cols, 0..5);
    }

    #[test]
    fn test_clip_window_top_left_corner() {
        let w = clip_window((10, 10), (0, 1), 2);
        assert_eq!(w.rows, 0..3);
        assert_eq!(w.kernel_rows, 2..5);
        assert_eq!(w.cols, 0..4);
        assert_eq!(w.kernel_cols, 1..5);
    }

    #[test]
    fn test_clip_window_bottom_right_corner() {
        let w = clip_window((6, 8), (5, 7), 2);
        assert_eq!(w.rows, 3..6);
        assert_eq!(w.kernel_rows, 0..3);
        assert_eq!(w.cols, 5..8);
        assert_eq!(w.kernel_cols, 0..3);
    }

    #[test]
    fn test_clip_window_kernel_wider_than_image() {
        let w = clip_window((2, 3), (1, 1), 3);
        assert_eq!(w.rows, 0..2);
        assert_eq!(w.kernel_rows, 2..4);
        assert_eq!(w.cols, 0..3);
        assert_eq!(w.kernel_cols, 2..5);
    }

    #[test]
    fn test_clip_window_shapes_always_match() {
        let (h, w, half) = (4, 7, 2);
        for r in 0..h {
            for c in 0..w {
                let win = clip_window((h, w), (r, c), half);
                assert_eq!(win.rows.len(), win.kernel_rows.len());
                assert_eq!(win.cols.len(), win.kernel_cols.len());
                assert!(win.kernel_rows.end <= 2 * half + 1);
                assert!(win.kernel_cols.end <= 2 * half + 1);
            }
        }
    }

    #[test]
    fn test_pad_edge_replicates_border() {
        let grid = array![[1u8, 2], [3, 4]];
        let padded = pad_edge(&grid, 1);
        assert_eq!(
            padded,
            array![
                [1, 1, 2, 2],
                [1, 1, 2, 2],
                [3, 3, 4, 4],
                [3, 3, 4, 4]
            ]
        );
    }
}
