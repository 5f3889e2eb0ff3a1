//! One-shot conversion of a complete buffer.

use num_rational::Ratio;

use crate::common::{is_valid_ratio, SampleRate};
use crate::conversions::{ConverterType, Sample};
use crate::session::{Block, Processed, Session, State};
use crate::Error;

/// Converts all of `input` into `output` with a throwaway session.
///
/// `input` is treated as the complete stream. Output stops early if `output` runs out of
/// room; size it with [`expected_output_frames`] to receive everything.
///
/// ```rust
/// use ratesrc::{simple, ConverterType};
///
/// let ratio = 48_000.0 / 44_100.0;
/// let input = vec![0.0f32; 1000 * 2];
/// let mut output = vec![0.0f32; simple::expected_output_frames(1000, ratio) * 2];
/// let processed =
///     simple::convert(ConverterType::SincFastest, 2, ratio, &input, &mut output).unwrap();
/// assert_eq!(processed.frames_generated, 1088);
/// ```
pub fn convert<S: Sample>(
    converter: ConverterType,
    channels: u16,
    ratio: f64,
    input: &[S],
    output: &mut [S],
) -> Result<Processed, Error> {
    let mut session = Session::new(converter, channels)?;
    let mut total = session.process(Block::new(input, output, ratio).end_of_input(true))?;

    let frame = usize::from(channels);
    while session.state() == State::Flushing {
        let start = total.frames_generated * frame;
        if start >= output.len() {
            break;
        }
        let drained = session.process(
            Block::new(&[], &mut output[start..], ratio).end_of_input(true),
        )?;
        total.frames_generated += drained.frames_generated;
        total.finished = drained.finished;
        if drained.frames_generated == 0 {
            break;
        }
    }
    total.input_starved = false;

    Ok(total)
}

/// Like [`convert`], but allocates the output.
pub fn convert_to_vec<S: Sample>(
    converter: ConverterType,
    channels: u16,
    ratio: f64,
    input: &[S],
) -> Result<Vec<S>, Error> {
    if channels == 0 {
        return Err(Error::BadChannelCount(channels));
    }
    if !is_valid_ratio(ratio) {
        return Err(Error::BadRatio(ratio));
    }

    let frame = usize::from(channels);
    let len = expected_output_frames(input.len() / frame, ratio) * frame;
    let mut output = Vec::new();
    output.try_reserve_exact(len)?;
    output.resize(len, S::EQUILIBRIUM);

    let processed = convert(converter, channels, ratio, input, &mut output)?;
    output.truncate(processed.frames_generated * frame);
    Ok(output)
}

/// Upper bound on the frames a complete conversion of `input_frames` frames produces.
pub fn expected_output_frames(input_frames: usize, ratio: f64) -> usize {
    (input_frames as f64 * ratio).ceil() as usize
}

/// Exact output length, in frames, for `input_frames` frames converted between two rates.
///
/// Computed on integers, so common rate pairs such as 44.1 kHz to 48 kHz do not pick up
/// floating point rounding.
pub fn frames_for_rates(input_frames: u64, from: SampleRate, to: SampleRate) -> u64 {
    let ratio = Ratio::new(u64::from(to.get()), u64::from(from.get()));
    (ratio * input_frames).ceil().to_integer()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::nz;

    #[test]
    fn rate_pairs() {
        assert_eq!(frames_for_rates(44_100, nz!(44_100), nz!(48_000)), 48_000);
        assert_eq!(frames_for_rates(1, nz!(48_000), nz!(44_100)), 1);
        assert_eq!(frames_for_rates(0, nz!(8_000), nz!(96_000)), 0);
        assert_eq!(frames_for_rates(3, nz!(3), nz!(2)), 2);
    }

    #[test]
    fn expected_frames_round_up() {
        assert_eq!(expected_output_frames(100, 1.5), 150);
        assert_eq!(expected_output_frames(3, 0.5), 2);
        assert_eq!(expected_output_frames(0, 3.0), 0);
    }

    #[test]
    fn drains_the_whole_stream() {
        let input: Vec<f32> = (0..999).map(|i| (i as f32 * 0.05).sin() * 0.5).collect();
        let output =
            convert_to_vec(ConverterType::SincMedium, 1, 1.5, &input).expect("conversion");
        assert_eq!(output.len(), 1498);
    }

    #[test]
    fn short_output_stops_early() {
        let input = [0.5f64; 100];
        let mut output = [0.0f64; 30];
        let processed = convert(ConverterType::Linear, 1, 1.0, &input, &mut output).unwrap();
        assert_eq!(processed.frames_generated, 30);
        assert!(!processed.finished);
    }

    #[test]
    fn errors_pass_through() {
        let mut output = [0i32; 4];
        assert_eq!(
            convert(ConverterType::Linear, 0, 1.0, &[0i32; 4], &mut output),
            Err(Error::BadChannelCount(0))
        );
        assert_eq!(
            convert_to_vec(ConverterType::Linear, 1, 1e6, &[0i32; 4]),
            Err(Error::BadRatio(1e6))
        );
    }
}
