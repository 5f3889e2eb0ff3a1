//! Streaming sessions: one stream, converted across any number of bounded calls.

use std::fmt;

use crate::common::is_valid_ratio;
use crate::constants::MAX_RATIO_CHANGE;
use crate::conversions::{ConverterType, Resampler, Sample};
use crate::Error;

/// Lifecycle of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// Waiting for input. Freshly created sessions start here.
    Ready,
    /// Inside a call to [`Session::process`].
    Processing,
    /// End of input was seen; the remaining output is drained from the history.
    Flushing,
    /// Every output frame has been produced.
    Done,
    /// A call was rejected. The session must be reset before it is used again.
    Failed,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            State::Ready => "ready",
            State::Processing => "processing",
            State::Flushing => "flushing",
            State::Done => "done",
            State::Failed => "failed",
        })
    }
}

/// Buffers and parameters of one processing call.
///
/// Both buffers are interleaved and must hold a whole number of frames.
#[derive(Debug)]
pub struct Block<'a, S> {
    /// Input frames. May be empty.
    pub input: &'a [S],
    /// Space for output frames.
    pub output: &'a mut [S],
    /// Output rate divided by input rate for this call.
    pub ratio: f64,
    /// No input follows `input`. Once set, the session drains its history and finishes.
    pub end_of_input: bool,
}

impl<'a, S> Block<'a, S> {
    /// A block that more input will follow.
    pub fn new(input: &'a [S], output: &'a mut [S], ratio: f64) -> Self {
        Block {
            input,
            output,
            ratio,
            end_of_input: false,
        }
    }

    /// Marks `input` as the end of the stream.
    pub fn end_of_input(mut self, end_of_input: bool) -> Self {
        self.end_of_input = end_of_input;
        self
    }
}

/// What a call to [`Session::process`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Processed {
    /// Input frames taken from the block. Never more than it held.
    pub frames_consumed: usize,
    /// Output frames written to the start of the block's output. Never more than it holds.
    pub frames_generated: usize,
    /// More input is needed before more output can be produced.
    pub input_starved: bool,
    /// The stream is complete; nothing more will be generated.
    pub finished: bool,
}

/// Settings for a new [`Session`].
///
/// ```rust
/// use ratesrc::{Config, ConverterType};
///
/// let session = Config::default()
///     .converter(ConverterType::SincFastest)
///     .channels(1)
///     .ratio(48_000.0 / 44_100.0)
///     .build()
///     .unwrap();
/// assert_eq!(session.channels(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    converter: ConverterType,
    channels: u16,
    ratio: Option<f64>,
}

impl Default for Config {
    /// Medium quality sinc, stereo.
    fn default() -> Self {
        Self::balanced()
    }
}

impl Config {
    /// Shortest sinc kernel, stereo. About 97 dB SNR with 80% of the band preserved.
    pub fn fastest() -> Self {
        Config {
            converter: ConverterType::SincFastest,
            channels: 2,
            ratio: None,
        }
    }

    /// Medium sinc kernel, stereo. About 134 dB SNR with 91% of the band preserved.
    pub fn balanced() -> Self {
        Config {
            converter: ConverterType::SincMedium,
            ..Self::fastest()
        }
    }

    /// Longest sinc kernel, stereo. About 145 dB SNR with 96% of the band preserved.
    pub fn best() -> Self {
        Config {
            converter: ConverterType::SincBest,
            ..Self::fastest()
        }
    }

    /// Selects the interpolation method.
    pub fn converter(mut self, converter: ConverterType) -> Self {
        self.converter = converter;
        self
    }

    /// Sets the number of interleaved channels.
    pub fn channels(mut self, channels: u16) -> Self {
        self.channels = channels;
        self
    }

    /// Sets the ratio the first call is checked against.
    ///
    /// Without it the first call may use any supported ratio.
    pub fn ratio(mut self, ratio: f64) -> Self {
        self.ratio = Some(ratio);
        self
    }

    /// Creates the session.
    pub fn build(self) -> Result<Session, Error> {
        Session::with_config(self)
    }
}

/// A streaming sample rate converter for one interleaved stream.
///
/// Feed it [`Block`]s until it reports [`Processed::finished`]. Every call may use a different
/// ratio, as long as it stays within a factor of 256 of the previous one, and a different
/// [`Sample`] type. Cloning a session forks the stream: both copies continue independently from
/// the same point.
#[derive(Debug, Clone)]
pub struct Session {
    resampler: Resampler,
    channels: u16,
    initial_ratio: Option<f64>,
    ratio: Option<f64>,
    state: State,
    last_error: Option<Error>,
}

impl Session {
    /// Creates a session converting `channels` interleaved channels with `converter`.
    ///
    /// Sinc converters build their shared coefficient table on first use.
    pub fn new(converter: ConverterType, channels: u16) -> Result<Self, Error> {
        Self::with_config(Config::default().converter(converter).channels(channels))
    }

    /// Creates a session from a [`Config`].
    pub fn with_config(config: Config) -> Result<Self, Error> {
        if config.channels == 0 {
            return Err(Error::BadChannelCount(config.channels));
        }
        if let Some(ratio) = config.ratio {
            if !is_valid_ratio(ratio) {
                return Err(Error::BadRatio(ratio));
            }
        }

        let resampler = Resampler::new(config.converter, usize::from(config.channels))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            converter = config.converter.name(),
            channels = config.channels,
            "created resampling session"
        );

        Ok(Session {
            resampler,
            channels: config.channels,
            initial_ratio: config.ratio,
            ratio: config.ratio,
            state: State::Ready,
            last_error: None,
        })
    }

    /// Converts as much of `block` as possible.
    ///
    /// A call stops when the output is full, when more input is needed or when the stream is
    /// done. Input left unconsumed must be passed again in the next call. Once end of input
    /// has been seen, further input is ignored and calls only drain the history.
    ///
    /// Any error moves the session to [`State::Failed`]; it then rejects every call with
    /// [`Error::Unusable`] until [`reset`](Self::reset).
    pub fn process<S: Sample>(&mut self, block: Block<'_, S>) -> Result<Processed, Error> {
        if let Err(error) = self.check(&block) {
            return Err(self.fail(error));
        }

        self.state = State::Processing;
        let pass = self.resampler.run(
            block.input,
            block.output,
            block.ratio,
            block.end_of_input,
        );
        self.ratio = Some(block.ratio);

        self.state = if pass.finished {
            #[cfg(feature = "tracing")]
            tracing::debug!(converter = self.converter().name(), "stream complete");
            State::Done
        } else if self.resampler.is_flushing() {
            State::Flushing
        } else {
            State::Ready
        };

        Ok(Processed {
            frames_consumed: pass.consumed,
            frames_generated: pass.generated,
            input_starved: pass.starved,
            finished: pass.finished,
        })
    }

    /// Sets the ratio the next call is checked against, without processing anything.
    ///
    /// Use this to jump to a ratio more than a factor of 256 away from the current one. The
    /// ratio itself must still be in range. A rejected ratio leaves the session untouched.
    pub fn set_ratio(&mut self, ratio: f64) -> Result<(), Error> {
        if !is_valid_ratio(ratio) {
            return Err(Error::BadRatio(ratio));
        }
        self.ratio = Some(ratio);
        Ok(())
    }

    /// Drops all buffered input and returns to [`State::Ready`], keeping the allocations.
    pub fn reset(&mut self) {
        self.resampler.reset();
        self.ratio = self.initial_ratio;
        self.state = State::Ready;
        self.last_error = None;

        #[cfg(feature = "tracing")]
        tracing::debug!(converter = self.converter().name(), "reset resampling session");
    }

    /// Interpolation method of this session.
    pub fn converter(&self) -> ConverterType {
        self.resampler.converter()
    }

    /// Number of interleaved channels.
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Ratio of the last call, or the configured ratio if nothing has been processed.
    pub fn ratio(&self) -> Option<f64> {
        self.ratio
    }

    /// Current lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// The error that moved the session to [`State::Failed`].
    pub fn last_error(&self) -> Option<Error> {
        self.last_error
    }

    fn check<S>(&self, block: &Block<'_, S>) -> Result<(), Error> {
        match self.state {
            State::Ready | State::Flushing => {}
            state @ (State::Processing | State::Done | State::Failed) => {
                return Err(Error::Unusable { state });
            }
        }

        let channels = usize::from(self.channels);
        if block.input.len() % channels != 0 {
            return Err(Error::BadInputLength {
                samples: block.input.len(),
                channels: self.channels,
            });
        }
        if block.output.len() % channels != 0 {
            return Err(Error::BadOutputLength {
                samples: block.output.len(),
                channels: self.channels,
            });
        }

        if !is_valid_ratio(block.ratio) {
            return Err(Error::BadRatio(block.ratio));
        }
        if let Some(previous) = self.ratio {
            let factor = block.ratio / previous;
            if !(1.0 / MAX_RATIO_CHANGE..=MAX_RATIO_CHANGE).contains(&factor) {
                return Err(Error::BadRatioChange {
                    previous,
                    requested: block.ratio,
                });
            }
        }

        Ok(())
    }

    fn fail(&mut self, error: Error) -> Error {
        // Misuse of a dead session does not overwrite the error that killed it.
        if !matches!(error, Error::Unusable { .. }) {
            #[cfg(feature = "tracing")]
            tracing::warn!(%error, "resampling session failed");
            self.state = State::Failed;
            self.last_error = Some(error);
        }
        error
    }
}
