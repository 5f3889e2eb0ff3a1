#![allow(dead_code)]
/// in separate folder so it is not run as an integration test of its own
use std::f64::consts::PI;

use ratesrc::{simple, ConverterType};
use rustfft::{num_complex::Complex, FftPlanner};

/// Sum of sines under a Hann window, evaluable at fractional frame positions so converted
/// output can be compared against the ideal signal.
#[derive(Debug, Clone)]
pub struct WindowedSines {
    freqs: Vec<f64>,
    frames: usize,
    amplitude: f64,
    phase: f64,
}

impl WindowedSines {
    /// `freqs` are normalized to the sample rate, so 0.5 is Nyquist. Tones share the unit
    /// amplitude between them.
    pub fn new(freqs: &[f64], frames: usize) -> Self {
        let count = freqs.len() as f64;
        Self {
            freqs: freqs.to_vec(),
            frames,
            amplitude: 1.0 / count,
            phase: 0.9 * PI / count,
        }
    }

    /// Value of the signal at input frame position `t`.
    pub fn at(&self, t: f64) -> f64 {
        let tones: f64 = self
            .freqs
            .iter()
            .map(|f| self.amplitude * (f * 2.0 * t * PI + self.phase).sin())
            .sum();
        let window = 0.5 - 0.5 * (2.0 * t * PI / (self.frames - 1) as f64).cos();
        tones * window
    }

    pub fn samples(&self) -> Vec<f64> {
        (0..self.frames).map(|k| self.at(k as f64)).collect()
    }
}

pub fn peak<S: Copy + Into<f64>>(samples: &[S]) -> f64 {
    samples
        .iter()
        .map(|&s| s.into().abs())
        .fold(0.0, f64::max)
}

/// Signal-to-noise ratio of `output`, in dB, taking as noise its difference from the ideal
/// signal sampled at the output instants `m / ratio`.
pub fn reference_snr(output: &[f64], signal: &WindowedSines, ratio: f64) -> f64 {
    let (power, noise) = output
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(power, noise), (m, &value)| {
            let ideal = signal.at(m as f64 / ratio);
            (power + ideal * ideal, noise + (value - ideal).powi(2))
        });
    if noise == 0.0 {
        f64::INFINITY
    } else {
        10.0 * (power / noise).log10()
    }
}

/// Spectral signal-to-noise ratio of `samples`, in dB.
///
/// Takes the magnitude spectrum, finds its local maxima and reports how far below the
/// strongest one lies the strongest maximum more than 10 dB down from it. Tones within 10 dB of
/// the strongest count as signal, so a two-tone signal is judged by its strongest spur. Panics
/// when fewer than `expected_peaks` maxima are found.
pub fn spectral_snr(samples: &[f64], expected_peaks: usize) -> f64 {
    let mut spectrum: Vec<Complex<f64>> =
        samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
    FftPlanner::<f64>::new()
        .plan_fft_forward(spectrum.len())
        .process(&mut spectrum);

    let mut magnitude: Vec<f64> = spectrum[..samples.len() / 2]
        .iter()
        .map(|bin| bin.norm())
        .collect();
    // DC does not count.
    magnitude[0] = 0.0;
    let max = magnitude.iter().copied().fold(0.0, f64::max);
    let decibels: Vec<f64> = magnitude
        .iter()
        .map(|&m| {
            let relative = m / max;
            if relative < 1e-15 {
                -200.0
            } else {
                20.0 * relative.log10()
            }
        })
        .collect();

    let mut peaks: Vec<f64> = decibels
        .windows(3)
        .filter(|w| w[0] < w[1] && w[1] >= w[2])
        .map(|w| w[1])
        .collect();
    assert!(
        peaks.len() >= expected_peaks,
        "found {} spectral peaks, expected {expected_peaks}",
        peaks.len()
    );
    peaks.sort_by(|a, b| b.total_cmp(a));

    let strongest = peaks[0];
    peaks
        .iter()
        .find(|&&peak| (strongest - peak).abs() > 10.0)
        .map_or(strongest.abs(), |peak| peak.abs())
}

/// Magnitude of the single DFT bin at normalized frequency `freq`.
pub fn goertzel(samples: &[f64], freq: f64) -> f64 {
    let (re, im) = samples
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(re, im), (k, &value)| {
            let angle = 2.0 * PI * freq * k as f64;
            (re + value * angle.cos(), im - value * angle.sin())
        });
    f64::hypot(re, im)
}

/// Converts mono `input` in one shot.
pub fn convert(converter: ConverterType, ratio: f64, input: &[f64]) -> Vec<f64> {
    simple::convert_to_vec(converter, 1, ratio, input).expect("conversion")
}

/// Attenuation in dB of a full scale tone at `freq` through `converter`.
pub fn attenuation(converter: ConverterType, freq: f64, ratio: f64, frames: usize) -> f64 {
    let input = WindowedSines::new(&[freq], frames).samples();
    let output = convert(converter, ratio, &input);
    20.0 * (1.0 / peak(&output)).log10()
}

/// Frequency, as a percentage of Nyquist, at which `converter` attenuates by 3 dB when
/// upsampling by (almost) two.
pub fn bandwidth(converter: ConverterType, frames: usize) -> f64 {
    let ratio = 1.999;
    let (mut f1, mut f2) = (0.35, 0.495);
    let mut a1 = attenuation(converter, f1, ratio, frames);
    let mut a2 = attenuation(converter, f2, ratio, frames);
    assert!(
        a1 < 3.0 && a2 > 3.0,
        "-3 dB point outside the search range: {a1} dB at {f1}, {a2} dB at {f2}"
    );

    while a2 - a1 > 1.0 {
        let f = f1 + 0.5 * (f2 - f1);
        let a = attenuation(converter, f, ratio, frames);
        if a < 3.0 {
            (f1, a1) = (f, a);
        } else {
            (f2, a2) = (f, a);
        }
    }

    let f = f1 + (3.0 - a1) * (f2 - f1) / (a2 - a1);
    200.0 * f
}
