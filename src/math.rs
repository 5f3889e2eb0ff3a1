//! Numeric helpers for the converters and the filter design.

use std::f64::consts::PI;

/// Builds a `NonZero` from a literal, rejecting zero at compile time.
#[macro_export]
macro_rules! nz {
    ($n:literal) => {
        const { core::num::NonZero::new($n).unwrap() }
    };
}

pub use nz;

/// Linear interpolation between two values.
///
/// The result is `first * (1 - fraction) + second * fraction`.
#[inline]
pub fn lerp(first: f64, second: f64, fraction: f64) -> f64 {
    first + fraction * (second - first)
}

/// Normalized sinc: `sin(pi x) / (pi x)`, with `sinc(0) = 1`.
#[inline]
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let pi_x = PI * x;
        pi_x.sin() / pi_x
    }
}

/// Zeroth order modified Bessel function of the first kind.
///
/// Power series, summed until the terms stop contributing at `f64` precision.
pub fn bessel_i0(x: f64) -> f64 {
    let quarter_x_sq = 0.25 * x * x;
    let mut sum = 1.0;
    let mut term = 1.0;
    let mut k = 1.0;
    loop {
        term *= quarter_x_sq / (k * k);
        sum += term;
        if term < sum * 1e-21 {
            return sum;
        }
        k += 1.0;
    }
}

/// Kaiser window `beta` giving roughly `attenuation` dB of stop-band rejection.
///
/// J.F. Kaiser, "Nonrecursive Digital Filter Design Using the I0-sinh Window Function".
pub fn kaiser_beta(attenuation: f64) -> f64 {
    if attenuation > 50.0 {
        0.1102 * (attenuation - 8.7)
    } else if attenuation >= 21.0 {
        0.5842 * (attenuation - 21.0).powf(0.4) + 0.07886 * (attenuation - 21.0)
    } else {
        0.0
    }
}

/// Kaiser window evaluated at `x` in `-1.0..=1.0` (zero outside).
///
/// `i0_beta` is `bessel_i0(beta)`, passed in so callers sampling the window many times only
/// compute it once.
#[inline]
pub fn kaiser(x: f64, beta: f64, i0_beta: f64) -> f64 {
    let r = 1.0 - x * x;
    if r < 0.0 {
        0.0
    } else {
        bessel_i0(beta * r.sqrt()) / i0_beta
    }
}
