mod test_support;

use ratesrc::ConverterType;
use rstest::rstest;
use test_support::{attenuation, bandwidth, convert, goertzel, peak, WindowedSines};

const FRAMES: usize = 2000;

#[rstest]
#[case(ConverterType::SincFastest, 78.0, 85.0)]
#[case(ConverterType::SincMedium, 89.0, 94.0)]
#[case(ConverterType::SincBest, 93.0, 98.0)]
fn minus_three_db_point(#[case] converter: ConverterType, #[case] low: f64, #[case] high: f64) {
    let percent = bandwidth(converter, FRAMES);
    assert!(
        (low..=high).contains(&percent),
        "{converter:?}: -3 dB at {percent:.2}% of Nyquist, expected {low}..={high}"
    );
}

#[rstest]
#[case(ConverterType::SincFastest, 90.0)]
#[case(ConverterType::SincMedium, 110.0)]
#[case(ConverterType::SincBest, 115.0)]
fn downsampling_rejects_aliases(#[case] converter: ConverterType, #[case] min_attenuation: f64) {
    // 0.45 of the input rate is above the output Nyquist frequency of 0.3 at ratio 0.6.
    let rejection = attenuation(converter, 0.45, 0.6, FRAMES);
    assert!(
        rejection >= min_attenuation,
        "{converter:?}: tone above Nyquist only {rejection:.1} dB down"
    );
}

#[rstest]
#[case(ConverterType::SincFastest)]
#[case(ConverterType::SincMedium)]
#[case(ConverterType::SincBest)]
fn downsampling_keeps_the_pass_band(#[case] converter: ConverterType) {
    // The low tone survives at full level while the one above the new Nyquist is removed.
    let input = WindowedSines::new(&[0.011111, 0.45], FRAMES).samples();
    let output = convert(converter, 0.6, &input);
    let peak = peak(&output);
    assert!((peak - 0.5).abs() < 0.01, "{converter:?}: peak {peak}");
}

#[rstest]
#[case(ConverterType::SincFastest, -95.0)]
#[case(ConverterType::SincMedium, -120.0)]
#[case(ConverterType::SincBest, -140.0)]
fn upsampling_suppresses_images(#[case] converter: ConverterType, #[case] max_image: f64) {
    let ratio = 1.9999;
    let input = WindowedSines::new(&[0.011111, 0.324], FRAMES).samples();
    let output = convert(converter, ratio, &input);

    let tone = goertzel(&output, 0.324 / ratio);
    let image = goertzel(&output, (1.0 - 0.324) / ratio);
    let relative = 20.0 * (image / tone).log10();
    assert!(
        relative <= max_image,
        "{converter:?}: image at {relative:.1} dB"
    );
}
