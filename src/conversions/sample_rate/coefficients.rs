//! Windowed-sinc coefficient tables, one per sinc quality preset.
//!
//! A table stores one wing of a symmetric Kaiser-windowed sinc low-pass, sampled `increment`
//! times per input sample. Tables are built on first use, then shared read-only by every
//! session of that preset for the lifetime of the process.

use std::f64::consts::PI;

use once_cell::sync::OnceCell;

use crate::math::{bessel_i0, kaiser, kaiser_beta, lerp, sinc};
use crate::Error;

/// Quality presets of the sinc converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Quality {
    Fastest,
    Medium,
    Best,
}

/// Filter design parameters of a preset.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Design {
    /// Input samples covered by one wing of the kernel at ratio 1.
    zero_crossings: usize,
    /// Table entries per input sample.
    increment: usize,
    /// Stop-band rejection the window is designed for, in dB.
    attenuation: f64,
}

impl Quality {
    fn design(self) -> Design {
        match self {
            Quality::Fastest => Design {
                zero_crossings: 20,
                increment: 128,
                attenuation: 100.0,
            },
            Quality::Medium => Design {
                zero_crossings: 64,
                increment: 1024,
                attenuation: 145.0,
            },
            Quality::Best => Design {
                zero_crossings: 144,
                increment: 2381,
                attenuation: 160.0,
            },
        }
    }
}

impl Design {
    /// -6 dB point of the kernel as a fraction of Nyquist, placed so the transition band of
    /// the Kaiser design ends exactly at Nyquist.
    fn cutoff(&self) -> f64 {
        let transition =
            (self.attenuation - 7.95) / (2.285 * (2 * self.zero_crossings) as f64 * PI);
        1.0 - transition / 2.0
    }
}

static FASTEST: OnceCell<CoefficientTable> = OnceCell::new();
static MEDIUM: OnceCell<CoefficientTable> = OnceCell::new();
static BEST: OnceCell<CoefficientTable> = OnceCell::new();

/// One wing of a windowed-sinc kernel, sampled on a fine grid.
#[derive(Debug)]
pub(crate) struct CoefficientTable {
    /// `half_len + 2` taps; the last one is zero so a lookup at the very end of the wing stays
    /// in bounds.
    coefficients: Box<[f64]>,
    half_len: usize,
    increment: usize,
}

impl CoefficientTable {
    /// The shared table of `quality`, building it on first use.
    pub(crate) fn shared(quality: Quality) -> Result<&'static CoefficientTable, Error> {
        let cell = match quality {
            Quality::Fastest => &FASTEST,
            Quality::Medium => &MEDIUM,
            Quality::Best => &BEST,
        };
        cell.get_or_try_init(|| Self::build(quality))
    }

    /// Builds a fresh table for `quality`.
    pub(crate) fn build(quality: Quality) -> Result<Self, Error> {
        #[cfg(feature = "tracing")]
        let started = std::time::Instant::now();

        let design = quality.design();
        let Design {
            zero_crossings,
            increment,
            attenuation,
        } = design;
        let half_len = zero_crossings * increment;
        let cutoff = design.cutoff();

        let beta = kaiser_beta(attenuation);
        let i0_beta = bessel_i0(beta);

        let mut coefficients = Vec::new();
        coefficients.try_reserve_exact(half_len + 2)?;
        coefficients.extend((0..=half_len).map(|index| {
            let x = index as f64 / increment as f64;
            cutoff * sinc(cutoff * x) * kaiser(x / zero_crossings as f64, beta, i0_beta)
        }));
        coefficients.push(0.0);

        // Unity gain at ratio 1: the taps at integer spacing sum to one.
        let gain = coefficients[0]
            + 2.0
                * (1..=zero_crossings)
                    .map(|k| coefficients[k * increment])
                    .sum::<f64>();
        for coefficient in coefficients.iter_mut() {
            *coefficient /= gain;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            ?quality,
            taps = coefficients.len(),
            cutoff,
            elapsed = ?started.elapsed(),
            "built sinc coefficient table"
        );

        Ok(CoefficientTable {
            coefficients: coefficients.into_boxed_slice(),
            half_len,
            increment,
        })
    }

    /// Kernel value at fractional table position `index`, which must lie in `0.0..half_len`.
    #[inline]
    pub(crate) fn coefficient_at(&self, index: f64) -> f64 {
        let whole = index as usize;
        let fraction = index - whole as f64;
        lerp(
            self.coefficients[whole],
            self.coefficients[whole + 1],
            fraction,
        )
    }

    /// Number of table entries spanned by one wing of the kernel.
    #[inline]
    pub(crate) fn half_len(&self) -> usize {
        self.half_len
    }

    /// Table entries per input sample.
    #[inline]
    pub(crate) fn increment(&self) -> usize {
        self.increment
    }

    /// Input samples covered by one wing of the kernel at ratio 1.
    #[inline]
    pub(crate) fn zero_crossings(&self) -> usize {
        self.half_len / self.increment
    }
}
