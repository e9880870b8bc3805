//! XYSeries Spectrum - live audio to chart series
//!
//! Streams unsigned 8-bit audio chunks through a sliding window and an
//! embedded radix-2 FFT, producing waveform and spectrum point series for
//! a plotting front end.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod error;
pub mod spectrum;
pub mod device;

#[cfg(feature = "capture")]
pub mod audio;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::SpectrumError;
pub use device::SeriesDevice;
pub use spectrum::{PipelineConfig, SeriesPoint, SpectrumFrame, SpectrumPipeline};
