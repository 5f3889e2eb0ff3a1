use crate::session::State;

/// Errors reported by sessions and the one-shot helpers.
///
/// Every error is returned synchronously by the call that triggered it. When `process` returns
/// an error the session moves to [`State::Failed`] and must be reset before it is used again.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The converter id does not name a known converter.
    #[error("Unknown converter id {0}")]
    BadConverter(u32),
    /// Sessions need at least one channel.
    #[error("Channel count must be at least 1, got {0}")]
    BadChannelCount(u16),
    /// The ratio is not a finite number inside `1/256 ..= 256`.
    #[error("Conversion ratio {0} is outside the supported range 1/256 ..= 256")]
    BadRatio(f64),
    /// The ratio moved by more than the allowed factor since the previous call.
    #[error("Ratio change from {previous} to {requested} exceeds the allowed factor of 256")]
    BadRatioChange {
        /// Ratio used by the previous call.
        previous: f64,
        /// Ratio requested by this call.
        requested: f64,
    },
    /// The input buffer does not hold a whole number of frames.
    #[error("Input holds {samples} samples, not a whole number of {channels}-channel frames")]
    BadInputLength {
        /// Length of the input buffer in samples.
        samples: usize,
        /// Channel count of the session.
        channels: u16,
    },
    /// The output buffer does not hold a whole number of frames.
    #[error("Output holds {samples} samples, not a whole number of {channels}-channel frames")]
    BadOutputLength {
        /// Length of the output buffer in samples.
        samples: usize,
        /// Channel count of the session.
        channels: u16,
    },
    /// Memory for the history buffer or a filter table could not be reserved.
    #[error("Could not allocate memory for the converter")]
    AllocationFailed,
    /// The session failed or finished earlier and has not been reset since.
    #[error("Session is {state} and must be reset before processing")]
    Unusable {
        /// State the session was in when the call was made.
        state: State,
    },
}

impl From<std::collections::TryReserveError> for Error {
    fn from(_: std::collections::TryReserveError) -> Self {
        Error::AllocationFailed
    }
}
