//! Tuning constants shared by every converter.

use std::num::NonZero;

use crate::nz;

/// Largest supported conversion ratio (output rate / input rate).
pub const MAX_RATIO: f64 = 256.0;

/// Smallest supported conversion ratio (output rate / input rate).
pub const MIN_RATIO: f64 = 1.0 / MAX_RATIO;

/// Largest factor by which the ratio may change between two consecutive calls on the same
/// session, in either direction.
pub const MAX_RATIO_CHANGE: f64 = 256.0;

/// History buffers never hold fewer frames than this, whatever the converter.
pub const MIN_HISTORY_FRAMES: usize = 4096;

/// Staging buffer size used by [`CallbackSession`](crate::CallbackSession) when the caller does
/// not pick one.
pub const DEFAULT_CHUNK_FRAMES: NonZero<usize> = nz!(1024);
