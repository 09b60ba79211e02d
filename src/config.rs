//! Parameter ranges exposed by the editor's sliders.

use std::ops::RangeInclusive;

/// Blur radius slider bounds.
pub const BLUR_RADIUS_RANGE: RangeInclusive<i32> = 0..=10;

/// Largest blur kernel half side the engine builds. Beyond this the
/// `2^(x + y)` weights no longer fit comfortably in an `f64`.
pub const MAX_BLUR_RADIUS: usize = 256;

/// Brightness slider bounds.
pub const BRIGHTNESS_RANGE: RangeInclusive<i32> = 0..=20;

/// Brightness slider default; maps to a factor of exactly 1.0.
pub const DEFAULT_BRIGHTNESS: i32 = 10;

/// Number of rasters the edit history keeps before dropping the oldest.
pub const HISTORY_CAPACITY: usize = 10;
