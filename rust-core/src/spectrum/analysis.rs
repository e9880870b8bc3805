//! Helpers for reading spectrum frames
//!
//! Peak picking and dB conversion on the points emitted by the pipeline.

use super::pipeline::PipelineConfig;
use super::series::SeriesPoint;

/// Convert spectrum magnitudes to dB
///
/// # Arguments
/// * `points` - Spectrum points (x = Hz, y = magnitude)
/// * `reference` - Reference level for 0 dB
///
/// # Returns
/// Points with y = 20*log10(|X|/reference)
pub fn magnitude_db(points: &[SeriesPoint], reference: f64) -> Vec<SeriesPoint> {
    points
        .iter()
        .map(|p| SeriesPoint::new(p.x, to_db(p.y, reference)))
        .collect()
}

/// 20*log10(|x|/reference), clamped away from log(0)
pub fn to_db(magnitude: f64, reference: f64) -> f64 {
    let mag_clamped = magnitude.max(1e-10);
    20.0 * (mag_clamped / reference).log10()
}

/// Strongest bin strictly between DC and the transform's Nyquist bin
///
/// Unsigned 8-bit input carries a large DC offset, so bin 0 is skipped.
/// Frames can carry bins past `capacity/2` (mirror images), which are
/// ignored as well.
pub fn peak(points: &[SeriesPoint], config: &PipelineConfig) -> Option<SeriesPoint> {
    points
        .iter()
        .take(config.capacity / 2)
        .skip(1)
        .copied()
        .max_by(|a, b| a.y.total_cmp(&b.y))
}

/// Spacing between adjacent spectrum points in Hz
pub fn bin_width_hz(config: &PipelineConfig) -> f64 {
    config.max_frequency_hz / config.capacity as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::pipeline::SpectrumPipeline;
    use std::f64::consts::PI;

    fn config(capacity: usize) -> PipelineConfig {
        PipelineConfig {
            capacity,
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn test_peak_skips_dc() {
        let points = vec![
            SeriesPoint::new(0.0, 1000.0),
            SeriesPoint::new(10.0, 3.0),
            SeriesPoint::new(20.0, 7.0),
            SeriesPoint::new(30.0, 5.0),
        ];
        let config = config(8);

        assert_eq!(peak(&points, &config), Some(SeriesPoint::new(20.0, 7.0)));
        assert_eq!(peak(&points[..1], &config), None);
        assert_eq!(peak(&[], &config), None);
    }

    #[test]
    fn test_peak_ignores_mirror_bins() {
        // Bins 4 and 5 sit past Nyquist of an 8-point transform
        let points = vec![
            SeriesPoint::new(0.0, 50.0),
            SeriesPoint::new(1.0, 2.0),
            SeriesPoint::new(2.0, 4.0),
            SeriesPoint::new(3.0, 9.0),
            SeriesPoint::new(4.0, 1.0),
            SeriesPoint::new(5.0, 9.0),
        ];

        assert_eq!(peak(&points, &config(8)), Some(SeriesPoint::new(3.0, 9.0)));
    }

    #[test]
    fn test_high_tone_peak_with_window_span() {
        // Default span and chunk size: window settles at 1280 samples and
        // bins up to 640 are emitted
        let config = PipelineConfig::default();
        let bin_width = bin_width_hz(&config);

        for &freq in &[3500.0, 3700.0, 3800.0, 3900.0] {
            let mut pipeline = SpectrumPipeline::new(config.clone()).unwrap();
            let samples: Vec<u8> = (0..1280)
                .map(|n| (128.0 + 100.0 * (2.0 * PI * freq * n as f64 / 8000.0).sin()).round() as u8)
                .collect();

            let mut frame = None;
            for chunk in samples.chunks(320) {
                frame = Some(pipeline.process(chunk).unwrap());
            }
            let frame = frame.unwrap();
            assert_eq!(frame.spectrum.len(), 640);

            let p = peak(&frame.spectrum, &config).unwrap();
            assert!((p.x - freq).abs() <= bin_width, "freq {} peaked at {}", freq, p.x);
        }
    }

    #[test]
    fn test_magnitude_db() {
        let points = vec![SeriesPoint::new(0.0, 10.0), SeriesPoint::new(1.0, 0.0)];
        let db = magnitude_db(&points, 1.0);

        assert!((db[0].y - 20.0).abs() < 1e-12);
        assert!((db[1].y + 200.0).abs() < 1e-9);
        assert_eq!(db[1].x, 1.0);
    }

    #[test]
    fn test_bin_width() {
        let config = PipelineConfig::default();
        assert!((bin_width_hz(&config) - 7.8125).abs() < 1e-12);
    }
}
