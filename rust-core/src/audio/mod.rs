//! Live audio capture with cpal

pub mod input;
pub mod buffer;
pub mod monitor;

pub use input::{AudioError, AudioInput};
pub use buffer::SampleRingBuffer;
pub use monitor::{MonitorConfig, SpectrumMonitor};
