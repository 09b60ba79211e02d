//! Error taxonomy shared by every filter and by the edit session.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("blur radius must be non-negative, got {0}")]
    InvalidRadius(i32),
    #[error("brightness amount must be non-negative, got {0}")]
    InvalidAmount(i32),
    #[error("kernel must be square with an odd side, got {rows}x{cols}")]
    InvalidKernel { rows: usize, cols: usize },
    #[error("expected a raster with {expected} channel(s), got {found}")]
    ChannelMismatch { expected: usize, found: usize },
    #[error("raster must have at least one row and one column")]
    EmptyRaster,
    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("unknown filter '{0}'")]
    UnknownFilter(String),
    #[error("no image loaded")]
    NoImage,
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, FilterError>;
