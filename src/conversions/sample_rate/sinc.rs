use super::coefficients::CoefficientTable;
use super::history::History;
use super::{Interpolate, Reach};

/// Band-limited interpolation through a windowed-sinc kernel.
///
/// When downsampling the kernel is stretched by `1 / ratio` so its cut-off follows the output
/// Nyquist frequency, which is what keeps aliasing out of the result.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Sinc {
    table: &'static CoefficientTable,
}

impl Sinc {
    pub(crate) fn new(table: &'static CoefficientTable) -> Self {
        Sinc { table }
    }

    /// Input frames one wing of the kernel spans at `ratio`.
    fn span(&self, ratio: f64) -> usize {
        (self.table.zero_crossings() as f64 / ratio.min(1.0)).ceil() as usize + 1
    }
}

impl Interpolate for Sinc {
    fn reach(&self, ratio: f64) -> Reach {
        let span = self.span(ratio);
        Reach {
            before: span,
            after: span + (1.0 / ratio).ceil() as usize,
        }
    }

    fn interpolate(&self, history: &History, phase: f64, ratio: f64, frame: &mut [f64]) {
        let cutoff = ratio.min(1.0);
        let scale = cutoff * self.table.increment() as f64;
        let half_len = self.table.half_len() as f64;
        frame.fill(0.0);

        // Left wing, from the frame at the read position backwards.
        let mut index = history.position();
        let mut table_pos = phase * scale;
        while table_pos < half_len {
            let weight = self.table.coefficient_at(table_pos);
            for (acc, &sample) in frame.iter_mut().zip(history.frame(index)) {
                *acc += weight * sample;
            }
            if index == 0 {
                break;
            }
            index -= 1;
            table_pos += scale;
        }

        // Right wing, from the following frame onwards.
        let mut index = history.position() + 1;
        let mut table_pos = (1.0 - phase) * scale;
        while table_pos < half_len {
            let weight = self.table.coefficient_at(table_pos);
            for (acc, &sample) in frame.iter_mut().zip(history.frame(index)) {
                *acc += weight * sample;
            }
            index += 1;
            table_pos += scale;
        }

        if cutoff < 1.0 {
            for sample in frame.iter_mut() {
                *sample *= cutoff;
            }
        }
    }
}
