use std::f64::consts::PI;

pub const SAMPLE_RATE: u32 = 44_100;
pub const CHANNELS: u16 = 2;

/// One second of a stereo chord at 44.1 kHz.
pub fn music() -> Vec<f32> {
    let frames = SAMPLE_RATE as usize;
    let notes = [220.0, 277.18, 329.63, 440.0];
    (0..frames)
        .flat_map(|frame| {
            let t = frame as f64 / f64::from(SAMPLE_RATE);
            let left: f64 = notes.iter().map(|f| (2.0 * PI * f * t).sin()).sum::<f64>() / 4.0;
            let right = (2.0 * PI * 110.0 * t).sin() * 0.5;
            [left as f32, right as f32]
        })
        .collect()
}
