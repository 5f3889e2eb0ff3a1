//! Pull-style conversion: the session asks a closure for input as it needs it.

use std::num::NonZero;

use crate::constants::DEFAULT_CHUNK_FRAMES;
use crate::conversions::Sample;
use crate::session::{Block, Session, State};
use crate::Error;

/// A [`Session`] that pulls its input from a callback.
///
/// The callback receives a staging buffer of whole frames, fills a prefix of it with
/// interleaved input and returns how many frames it wrote. Returning `0` ends the stream.
/// Counts larger than the buffer are clamped to it.
///
/// The staging buffer is allocated once, in the constructor, so [`read`](Self::read) can run
/// inside a real-time audio callback.
///
/// ```rust
/// use ratesrc::{CallbackSession, ConverterType, Session};
///
/// let mut remaining = 480usize;
/// let session = Session::new(ConverterType::Linear, 1).unwrap();
/// let mut pull = CallbackSession::new(session, move |buffer: &mut [f32]| {
///     let frames = remaining.min(buffer.len());
///     buffer[..frames].fill(0.25);
///     remaining -= frames;
///     frames
/// })
/// .unwrap();
///
/// let mut output = vec![0.0f32; 2048];
/// let frames = pull.read(2.0, &mut output).unwrap();
/// assert_eq!(frames, 960);
/// ```
pub struct CallbackSession<S, F> {
    session: Session,
    staging: Box<[S]>,
    /// Staged frames `start..filled` have not been handed to the session yet.
    start: usize,
    filled: usize,
    end_of_input: bool,
    callback: F,
}

impl<S, F> CallbackSession<S, F>
where
    S: Sample,
    F: FnMut(&mut [S]) -> usize,
{
    /// Wraps `session`, staging up to 1024 frames of input per callback.
    pub fn new(session: Session, callback: F) -> Result<Self, Error> {
        Self::with_chunk_frames(session, DEFAULT_CHUNK_FRAMES, callback)
    }

    /// Wraps `session`, staging up to `chunk_frames` frames of input per callback.
    pub fn with_chunk_frames(
        session: Session,
        chunk_frames: NonZero<usize>,
        callback: F,
    ) -> Result<Self, Error> {
        let len = chunk_frames.get() * usize::from(session.channels());
        let mut staging = Vec::new();
        staging.try_reserve_exact(len)?;
        staging.resize(len, S::EQUILIBRIUM);

        Ok(CallbackSession {
            session,
            staging: staging.into_boxed_slice(),
            start: 0,
            filled: 0,
            end_of_input: false,
            callback,
        })
    }

    /// Fills `output` with frames converted at `ratio`, calling back for input as needed.
    ///
    /// Returns the number of frames written. Fewer than `output` holds means the stream is
    /// complete; later calls return `Ok(0)`.
    pub fn read(&mut self, ratio: f64, output: &mut [S]) -> Result<usize, Error> {
        if self.session.state() == State::Done {
            return Ok(0);
        }

        let channels = usize::from(self.session.channels());
        let capacity = self.staging.len() / channels;
        let mut generated = 0;

        while generated * channels < output.len() {
            if self.start == self.filled && !self.end_of_input {
                let frames = (self.callback)(&mut self.staging).min(capacity);
                self.start = 0;
                self.filled = frames;
                self.end_of_input = frames == 0;
            }

            let processed = self.session.process(Block {
                input: &self.staging[self.start * channels..self.filled * channels],
                output: &mut output[generated * channels..],
                ratio,
                end_of_input: self.end_of_input,
            })?;
            self.start += processed.frames_consumed;
            generated += processed.frames_generated;

            if processed.finished {
                break;
            }
            if processed.frames_consumed == 0
                && processed.frames_generated == 0
                && !processed.input_starved
            {
                break;
            }
        }

        Ok(generated)
    }

    /// Restarts the stream: resets the session and drops staged input.
    ///
    /// The callback is asked for fresh input on the next [`read`](Self::read).
    pub fn reset(&mut self) {
        self.session.reset();
        self.start = 0;
        self.filled = 0;
        self.end_of_input = false;
    }

    /// The wrapped session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// State of the wrapped session.
    pub fn state(&self) -> State {
        self.session.state()
    }

    /// Unwraps the session and the callback.
    pub fn into_inner(self) -> (Session, F) {
        (self.session, self.callback)
    }
}

impl<S, F> std::fmt::Debug for CallbackSession<S, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackSession")
            .field("session", &self.session)
            .field("staged_frames", &(self.filled - self.start))
            .field("end_of_input", &self.end_of_input)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{nz, ConverterType};

    fn counting_source(total: usize) -> impl FnMut(&mut [f64]) -> usize {
        let mut next = 0usize;
        move |buffer: &mut [f64]| {
            let frames = (total - next).min(buffer.len());
            for (offset, sample) in buffer[..frames].iter_mut().enumerate() {
                *sample = (next + offset) as f64;
            }
            next += frames;
            frames
        }
    }

    #[test]
    fn pulls_until_the_stream_ends() {
        let session = Session::new(ConverterType::ZeroOrderHold, 1).unwrap();
        let chunk = nz!(7);
        let mut pull =
            CallbackSession::with_chunk_frames(session, chunk, counting_source(100)).unwrap();

        let mut output = vec![0.0f64; 64];
        assert_eq!(pull.read(1.0, &mut output).unwrap(), 64);
        assert_eq!(output[..4], [0.0, 1.0, 2.0, 3.0]);
        assert_eq!(output[63], 63.0);

        assert_eq!(pull.read(1.0, &mut output).unwrap(), 36);
        assert_eq!(output[35], 99.0);
        assert_eq!(pull.state(), State::Done);
        assert_eq!(pull.read(1.0, &mut output).unwrap(), 0);
    }

    #[test]
    fn overlong_callback_counts_are_clamped() {
        let session = Session::new(ConverterType::Linear, 2).unwrap();
        let chunk = nz!(4);
        let mut calls = 0;
        let mut pull = CallbackSession::with_chunk_frames(session, chunk, |buffer: &mut [f32]| {
            calls += 1;
            buffer.fill(0.5);
            if calls > 3 {
                0
            } else {
                usize::MAX
            }
        })
        .unwrap();

        let mut output = vec![0.0f32; 64];
        assert_eq!(pull.read(1.0, &mut output).unwrap(), 12);
    }

    #[test]
    fn reset_asks_for_fresh_input() {
        let session = Session::new(ConverterType::Linear, 1).unwrap();
        let mut pull = CallbackSession::new(session, counting_source(10)).unwrap();
        let mut output = vec![0.0f64; 32];
        assert_eq!(pull.read(1.0, &mut output).unwrap(), 10);

        // The source is exhausted, so the restarted stream is empty.
        pull.reset();
        assert_eq!(pull.state(), State::Ready);
        assert_eq!(pull.read(1.0, &mut output).unwrap(), 0);
        assert_eq!(pull.state(), State::Done);
    }

    #[test]
    fn errors_surface_from_read() {
        let session = Session::new(ConverterType::Linear, 1).unwrap();
        let mut pull = CallbackSession::new(session, counting_source(10)).unwrap();
        let mut output = vec![0.0f64; 8];
        assert_eq!(pull.read(0.0, &mut output), Err(Error::BadRatio(0.0)));
        assert_eq!(pull.state(), State::Failed);
    }
}
