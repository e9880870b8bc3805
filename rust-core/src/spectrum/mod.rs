//! Spectral analysis with a radix-2 FFT

pub mod bitrev;
pub mod fft;
pub mod window;
pub mod series;
pub mod pipeline;
pub mod analysis;

pub use bitrev::BitReversalPermuter;
pub use fft::{forward_fft, RadixTwoFft};
pub use window::SlidingWindow;
pub use series::{SeriesPoint, SpectrumFrame};
pub use pipeline::{process_window, MagnitudeSpan, PipelineConfig, SpectrumPipeline};
