//! Input history carried across processing calls.

use crate::conversions::Sample;
use crate::Error;

/// Interleaved input frames at working precision, plus the read position of the converter.
///
/// Frames `position - reach.before ..= position + reach.after` are what a converter reads to
/// produce one output frame. New input is appended at `end`; when the buffer runs out of room
/// the frames still needed are moved back to the start (`shift`), so the storage is allocated
/// once, at session creation. `lookbehind` frames are always kept behind the read position, the
/// most any accepted ratio needs, so a ratio change never finds the history cut short.
#[derive(Debug, Clone)]
pub(crate) struct History {
    channels: usize,
    samples: Box<[f64]>,
    /// Capacity in frames.
    capacity: usize,
    /// Frames kept behind the read position.
    lookbehind: usize,
    /// Frame holding the integer part of the read position.
    position: usize,
    /// One past the last frame written.
    end: usize,
    /// One past the last real input frame, once end of input has been reached.
    real_end: Option<usize>,
    /// Zero frames appended after `real_end` so the kernel can run past the signal end.
    tail: usize,
    primed: bool,
}

impl History {
    /// Allocates a history of `capacity` frames that keeps `lookbehind` frames behind the read
    /// position and pads the end of the stream with `tail` silent frames.
    pub(crate) fn new(
        channels: usize,
        capacity: usize,
        lookbehind: usize,
        tail: usize,
    ) -> Result<Self, Error> {
        debug_assert!(lookbehind + tail < capacity);
        let len = capacity * channels;
        let mut samples = Vec::new();
        samples.try_reserve_exact(len)?;
        samples.resize(len, 0.0);

        Ok(History {
            channels,
            samples: samples.into_boxed_slice(),
            capacity,
            lookbehind,
            position: 0,
            end: 0,
            real_end: None,
            tail,
            primed: false,
        })
    }

    /// Forgets all buffered input. Does not allocate.
    pub(crate) fn reset(&mut self) {
        self.position = 0;
        self.end = 0;
        self.real_end = None;
        self.primed = false;
    }

    #[inline]
    pub(crate) fn channels(&self) -> usize {
        self.channels
    }

    /// Frame holding the integer part of the read position.
    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    /// Frames buffered at or after the read position.
    #[inline]
    pub(crate) fn ahead(&self) -> usize {
        self.end - self.position
    }

    /// One past the last real input frame, once end of input has been reached.
    #[inline]
    pub(crate) fn real_end(&self) -> Option<usize> {
        self.real_end
    }

    /// The samples of frame `index`, one per channel.
    #[inline]
    pub(crate) fn frame(&self, index: usize) -> &[f64] {
        &self.samples[index * self.channels..(index + 1) * self.channels]
    }

    /// Moves the read position forward by whole frames.
    #[inline]
    pub(crate) fn advance(&mut self, frames: usize) {
        self.position += frames;
        debug_assert!(self.position <= self.end);
    }

    /// Shift-and-refill: loads frames from `input`, starting at frame `*consumed`, and advances
    /// `*consumed` past what was taken. `after` is how far past the read position the kernel
    /// reads at the current ratio, see [`Reach::after`](super::Reach::after).
    ///
    /// On first use the history is primed with `lookbehind` silent frames ahead of the
    /// signal. Once `end_of_input` is set and every input frame has been taken, the true end
    /// of the signal is recorded and silence is appended behind it; after that the history
    /// accepts no more input until reset.
    ///
    /// Returns whether anything changed.
    pub(crate) fn refill<S: Sample>(
        &mut self,
        input: &[S],
        consumed: &mut usize,
        after: usize,
        end_of_input: bool,
    ) -> bool {
        if self.real_end.is_some() {
            return false;
        }

        let channels = self.channels;
        let mut progressed = false;

        if !self.primed {
            self.samples[..self.lookbehind * channels].fill(0.0);
            self.position = self.lookbehind;
            self.end = self.lookbehind;
            self.primed = true;
            progressed = true;
        } else if self.capacity - self.end <= after {
            self.shift();
        }

        let input_frames = input.len() / channels;
        let frames = (self.capacity - self.end).min(input_frames - *consumed);
        if frames > 0 {
            let src = &input[*consumed * channels..(*consumed + frames) * channels];
            let dst = &mut self.samples[self.end * channels..(self.end + frames) * channels];
            for (dst, src) in dst.iter_mut().zip(src) {
                *dst = src.to_working();
            }
            self.end += frames;
            *consumed += frames;
            progressed = true;
        }

        if end_of_input && *consumed == input_frames && self.ahead() <= after {
            if self.capacity - self.end < self.tail {
                self.shift();
            }
            self.real_end = Some(self.end);
            self.samples[self.end * channels..(self.end + self.tail) * channels].fill(0.0);
            self.end += self.tail;
            progressed = true;
        }

        progressed
    }

    /// Moves the frames still needed, the look-behind plus everything from the read position
    /// on, to the start of the buffer.
    fn shift(&mut self) {
        let start = self.position - self.lookbehind.min(self.position);
        self.samples
            .copy_within(start * self.channels..self.end * self.channels, 0);
        self.position -= start;
        self.end -= start;
    }
}
