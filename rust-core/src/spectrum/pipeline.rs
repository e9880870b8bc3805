//! Streaming spectrum pipeline
//!
//! Window update -> FFT -> magnitude extraction -> chart points, once per
//! incoming chunk.

use log::{debug, trace, warn};
use num_complex::Complex64;

use super::fft::{magnitudes, RadixTwoFft};
use super::series::{SeriesPoint, SpectrumFrame};
use super::window::SlidingWindow;
use crate::error::{Result, SpectrumError};

/// Which bins are read back after the transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MagnitudeSpan {
    /// Half the window length. The window can be longer than the
    /// transform, so this may read bins past the transform's Nyquist bin
    /// (mirror images of the lower half).
    #[default]
    Window,

    /// Half the transform length (bins below Nyquist only)
    Transform,
}

/// Spectrum pipeline configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Window capacity and transform length (power of 2)
    pub capacity: usize,

    /// Frequency assigned to bin `capacity`, in Hz
    pub max_frequency_hz: f64,

    /// Bins to extract per frame
    pub magnitude_span: MagnitudeSpan,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            max_frequency_hz: 8000.0,
            magnitude_span: MagnitudeSpan::Window,
        }
    }
}

impl PipelineConfig {
    /// Check the configuration before building a pipeline
    pub fn validate(&self) -> Result<()> {
        if !self.capacity.is_power_of_two() {
            return Err(SpectrumError::InvalidConfig(format!(
                "capacity must be a power of two, got {}",
                self.capacity
            )));
        }
        if !self.max_frequency_hz.is_finite() || self.max_frequency_hz <= 0.0 {
            return Err(SpectrumError::InvalidConfig(format!(
                "max frequency must be positive, got {}",
                self.max_frequency_hz
            )));
        }
        Ok(())
    }

    /// Frequency of spectrum bin `bin` in Hz
    pub fn bin_to_hz(&self, bin: usize) -> f64 {
        bin as f64 / self.capacity as f64 * self.max_frequency_hz
    }
}

/// Owns the sliding window and turns each chunk into a frame
#[derive(Debug, Clone)]
pub struct SpectrumPipeline {
    config: PipelineConfig,
    window: SlidingWindow,
    fft: RadixTwoFft,
}

impl SpectrumPipeline {
    /// Create a pipeline with an empty window
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let window = SlidingWindow::new(config.capacity);
        Self::with_window(config, window)
    }

    /// Create a pipeline resuming from an existing window
    pub fn with_window(config: PipelineConfig, window: SlidingWindow) -> Result<Self> {
        config.validate()?;
        let fft = RadixTwoFft::new(config.capacity)?;

        debug!(
            "Spectrum pipeline: capacity {}, max frequency {} Hz, span {:?}",
            config.capacity, config.max_frequency_hz, config.magnitude_span
        );

        let window = SlidingWindow::from_samples(window.into_samples(), config.capacity);

        Ok(Self { config, window, fft })
    }

    /// Push one chunk and compute the resulting frame
    ///
    /// The spectrum is empty while the window holds `capacity` samples or
    /// fewer.
    pub fn process(&mut self, chunk: &[u8]) -> Result<SpectrumFrame> {
        if let Err(e) = self.window.push_chunk(chunk) {
            warn!("Rejected chunk: {}", e);
            return Err(e);
        }

        let spectrum = self.spectrum()?;
        trace!(
            "Chunk of {} samples: window {}, {} spectrum points",
            chunk.len(),
            self.window.len(),
            spectrum.len()
        );

        Ok(SpectrumFrame {
            waveform: self.window.points(),
            spectrum,
        })
    }

    /// Spectrum of the current window
    fn spectrum(&self) -> Result<Vec<SeriesPoint>> {
        let window_len = self.window.len();
        if window_len <= self.config.capacity {
            return Ok(Vec::new());
        }

        // Whole window is copied; only the first `capacity` entries are transformed
        let mut buffer: Vec<Complex64> = self
            .window
            .samples()
            .iter()
            .map(|&s| Complex64::new(s, 0.0))
            .collect();
        self.fft.process(&mut buffer)?;

        let count = match self.config.magnitude_span {
            MagnitudeSpan::Window => window_len / 2,
            MagnitudeSpan::Transform => self.fft.num_bins(),
        };

        Ok(magnitudes(&buffer, count)
            .into_iter()
            .enumerate()
            .map(|(i, mag)| SeriesPoint::new(self.config.bin_to_hz(i), mag))
            .collect())
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }

    pub fn into_window(self) -> SlidingWindow {
        self.window
    }

    /// Drop all buffered samples
    pub fn reset(&mut self) {
        self.window.clear();
    }
}

/// One-shot form: previous window + chunk -> (updated window, spectrum points)
pub fn process_window(
    config: &PipelineConfig,
    current_window: Vec<f64>,
    chunk: &[u8],
) -> Result<(Vec<f64>, Vec<SeriesPoint>)> {
    let window = SlidingWindow::from_samples(current_window, config.capacity);
    let mut pipeline = SpectrumPipeline::with_window(config.clone(), window)?;
    let frame = pipeline.process(chunk)?;

    Ok((pipeline.into_window().into_samples(), frame.spectrum))
}
