use super::history::History;
use super::{Interpolate, Reach};
use crate::math::lerp;

/// Straight line between the two input frames around each output instant.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Linear;

impl Interpolate for Linear {
    fn reach(&self, ratio: f64) -> Reach {
        Reach {
            before: 0,
            after: 1 + (1.0 / ratio).ceil() as usize,
        }
    }

    #[inline]
    fn interpolate(&self, history: &History, phase: f64, _ratio: f64, frame: &mut [f64]) {
        let position = history.position();
        let current = history.frame(position);
        let next = history.frame(position + 1);
        for ((out, &a), &b) in frame.iter_mut().zip(current).zip(next) {
            *out = lerp(a, b, phase);
        }
    }
}
