//! Sample representations and the element-wise format adapters.
//!
//! The converters run internally at `f64` precision. Every representation a session can read
//! or write implements [`Sample`], which widens to and narrows from that working precision:
//!
//! - `f32` and `f64` are normalized floats, full scale is `-1.0..=1.0`.
//! - `i32` and `i16` are fixed point, scaled symmetrically by `2^31` and `2^15`. Narrowing
//!   rounds to nearest and saturates out-of-range values instead of wrapping.

use dasp_sample::Sample as DaspSample;

const I32_SCALE: f64 = 2_147_483_648.0;
const I16_SCALE: f64 = 32_768.0;

/// A sample representation the converters can read and write.
pub trait Sample: DaspSample + Send + Sync + 'static {
    /// Widens this sample to the working precision, full scale mapping to `-1.0..=1.0`.
    fn to_working(self) -> f64;

    /// Narrows a working-precision value to this representation.
    fn from_working(value: f64) -> Self;
}

impl Sample for f32 {
    #[inline]
    fn to_working(self) -> f64 {
        self.to_sample::<f64>()
    }

    #[inline]
    fn from_working(value: f64) -> Self {
        value as f32
    }
}

impl Sample for f64 {
    #[inline]
    fn to_working(self) -> f64 {
        self
    }

    #[inline]
    fn from_working(value: f64) -> Self {
        value
    }
}

impl Sample for i32 {
    #[inline]
    fn to_working(self) -> f64 {
        f64::from(self) / I32_SCALE
    }

    #[inline]
    fn from_working(value: f64) -> Self {
        // `as` saturates at the integer bounds and maps NaN to zero.
        (value * I32_SCALE).round_ties_even() as i32
    }
}

impl Sample for i16 {
    #[inline]
    fn to_working(self) -> f64 {
        f64::from(self) / I16_SCALE
    }

    #[inline]
    fn from_working(value: f64) -> Self {
        (value * I16_SCALE).round_ties_even() as i16
    }
}

/// Converts `input` element-wise into `output`.
///
/// Converts `min(input.len(), output.len())` samples and returns that count.
pub fn convert_samples<I: Sample, O: Sample>(input: &[I], output: &mut [O]) -> usize {
    let count = input.len().min(output.len());
    for (out, sample) in output.iter_mut().zip(input) {
        *out = O::from_working(sample.to_working());
    }
    count
}

/// Normalized float to 32-bit fixed point, saturating.
pub fn float_to_fixed(input: &[f32], output: &mut [i32]) -> usize {
    convert_samples(input, output)
}

/// 32-bit fixed point to normalized float.
pub fn fixed_to_float(input: &[i32], output: &mut [f32]) -> usize {
    convert_samples(input, output)
}

/// Normalized float to 16-bit fixed point, saturating.
pub fn float_to_short(input: &[f32], output: &mut [i16]) -> usize {
    convert_samples(input, output)
}

/// 16-bit fixed point to normalized float.
pub fn short_to_float(input: &[i16], output: &mut [f32]) -> usize {
    convert_samples(input, output)
}

/// Widens single precision samples to double precision.
pub fn float_to_double(input: &[f32], output: &mut [f64]) -> usize {
    convert_samples(input, output)
}

/// Narrows double precision samples to single precision.
pub fn double_to_float(input: &[f64], output: &mut [f32]) -> usize {
    convert_samples(input, output)
}
