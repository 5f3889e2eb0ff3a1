//! Streaming, variable-ratio sample rate conversion for interleaved audio.
//!
//! A [`Session`] converts one stream from its input rate to an output rate given as the ratio
//! `output rate / input rate`. The stream is fed in bounded [`Block`]s, the ratio may change
//! from one call to the next, and buffered input carries over between calls, so real-time
//! pipelines can use it with whatever buffer sizes they happen to have.
//!
//! Five converters are available, see [`ConverterType`]: three band-limited windowed-sinc
//! converters trading CPU time for quality, plus zero-order hold and linear interpolation for
//! when speed matters more than fidelity. Input and output can be `f32`, `f64`, `i32` or
//! `i16`; the converters work in `f64` internally.
//!
//! # Streaming
//!
//! ```rust
//! use ratesrc::{Block, ConverterType, Session};
//!
//! let mut session = Session::new(ConverterType::SincMedium, 2).unwrap();
//! let input = vec![0.0f32; 2 * 512];
//! let mut output = vec![0.0f32; 2 * 2048];
//!
//! // More input follows.
//! let processed = session.process(Block::new(&input, &mut output, 2.0)).unwrap();
//! assert_eq!(processed.frames_consumed, 512);
//!
//! // End of the stream: drain what is left in the history.
//! let last = session
//!     .process(Block::new(&[], &mut output, 2.0).end_of_input(true))
//!     .unwrap();
//! assert!(last.finished);
//! assert_eq!(processed.frames_generated + last.frames_generated, 1024);
//! ```
//!
//! # One-shot
//!
//! ```rust
//! use ratesrc::{simple, ConverterType};
//!
//! let input: Vec<f64> = (0..4410).map(|i| (i as f64 * 0.01).sin()).collect();
//! let output = simple::convert_to_vec(ConverterType::SincBest, 1, 0.5, &input).unwrap();
//! assert_eq!(output.len(), 2205);
//! ```
//!
//! # Pulling input
//!
//! [`CallbackSession`] turns a session around: it calls a closure for input whenever it runs
//! dry, which suits audio callbacks that are asked for a fixed amount of output.
//!
//! # Logging
//!
//! With the `tracing` feature enabled the crate reports table construction, session lifecycle
//! events and failures through [`tracing`](https://docs.rs/tracing). Nothing is logged per
//! frame.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

mod callback;
mod error;
mod session;

pub mod common;
pub mod constants;
pub mod conversions;
pub mod math;
pub mod simple;

pub use crate::callback::CallbackSession;
pub use crate::common::{is_valid_ratio, ratio_between, SampleRate};
pub use crate::conversions::{ConverterType, Sample};
pub use crate::error::Error;
pub use crate::session::{Block, Config, Processed, Session, State};
