use super::history::History;
use super::{Interpolate, Reach};

/// Repeats the input frame nearest to each output instant.
///
/// Cheapest converter there is. No band limiting, so it aliases freely when downsampling.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ZeroOrderHold;

impl Interpolate for ZeroOrderHold {
    fn reach(&self, ratio: f64) -> Reach {
        Reach {
            before: 0,
            after: 1 + (1.0 / ratio).ceil() as usize,
        }
    }

    #[inline]
    fn interpolate(&self, history: &History, phase: f64, _ratio: f64, frame: &mut [f64]) {
        let nearest = history.position() + usize::from(phase >= 0.5);
        frame.copy_from_slice(history.frame(nearest));
    }
}
