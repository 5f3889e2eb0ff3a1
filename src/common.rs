//! Sample rate type and ratio helpers.

use std::num::NonZero;

use crate::constants::{MAX_RATIO, MIN_RATIO};

/// Stream sample rate (frames per second).
pub type SampleRate = NonZero<u32>;

/// The conversion ratio that takes a stream recorded at `from` to `to`.
#[inline]
pub fn ratio_between(from: SampleRate, to: SampleRate) -> f64 {
    f64::from(to.get()) / f64::from(from.get())
}

/// Whether `ratio` lies inside the supported range `1/256 ..= 256`.
///
/// This says nothing about whether a session accepts the ratio: a session additionally bounds
/// the change between consecutive ratios.
#[inline]
pub fn is_valid_ratio(ratio: f64) -> bool {
    ratio.is_finite() && (MIN_RATIO..=MAX_RATIO).contains(&ratio)
}
