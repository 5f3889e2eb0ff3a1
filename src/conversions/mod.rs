/*!
Conversions between sample representations and between sample rates.

[`sample`] holds the element-wise format adapters. The rate converters are reached through
[`Session`](crate::Session) and the helpers in [`simple`](crate::simple).
*/

pub use self::sample::Sample;
pub use self::sample_rate::ConverterType;

pub(crate) use self::sample_rate::Resampler;

pub mod sample;
mod sample_rate;
