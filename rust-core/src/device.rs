//! Write-only byte-stream device that feeds the spectrum pipeline
//!
//! Each write is one chunk of unsigned 8-bit samples. The resulting
//! waveform and spectrum are kept for the chart consumer to pick up.

use std::io;

use log::debug;

use crate::error::{Result, SpectrumError};
use crate::spectrum::{PipelineConfig, SeriesPoint, SpectrumFrame, SpectrumPipeline};

/// Byte sink that turns audio chunks into chart frames
#[derive(Debug)]
pub struct SeriesDevice {
    pipeline: SpectrumPipeline,

    /// Frame produced by the most recent write
    latest: Option<SpectrumFrame>,

    /// Frame not yet taken by the consumer
    pending: bool,
}

impl SeriesDevice {
    /// Create a device with an empty window
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let pipeline = SpectrumPipeline::new(config)?;
        debug!("Series device opened");

        Ok(Self {
            pipeline,
            latest: None,
            pending: false,
        })
    }

    /// Process one chunk
    ///
    /// # Returns
    /// Number of bytes consumed, always the full chunk on success
    pub fn write_chunk(&mut self, data: &[u8]) -> Result<usize> {
        let frame = self.pipeline.process(data)?;
        self.latest = Some(frame);
        self.pending = true;
        Ok(data.len())
    }

    /// Reading back from the device is not supported
    pub fn read_chunk(&mut self, _data: &mut [u8]) -> Result<usize> {
        Err(SpectrumError::ReadUnsupported)
    }

    /// Take the frame produced since the last call, if any
    pub fn take_frame(&mut self) -> Option<SpectrumFrame> {
        if self.pending {
            self.pending = false;
            self.latest.clone()
        } else {
            None
        }
    }

    /// Most recent frame, whether or not it was taken
    pub fn latest_frame(&self) -> Option<&SpectrumFrame> {
        self.latest.as_ref()
    }

    /// Current waveform series
    pub fn waveform(&self) -> &[SeriesPoint] {
        self.latest
            .as_ref()
            .map(|f| f.waveform.as_slice())
            .unwrap_or(&[])
    }

    /// Current spectrum series (empty until the window overflows)
    pub fn spectrum(&self) -> &[SeriesPoint] {
        self.latest
            .as_ref()
            .map(|f| f.spectrum.as_slice())
            .unwrap_or(&[])
    }

    pub fn config(&self) -> &PipelineConfig {
        self.pipeline.config()
    }

    /// Clear the window and any held frame
    pub fn reset(&mut self) {
        self.pipeline.reset();
        self.latest = None;
        self.pending = false;
    }
}

impl io::Write for SeriesDevice {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_chunk(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Read for SeriesDevice {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            SpectrumError::ReadUnsupported,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};

    fn device(capacity: usize) -> SeriesDevice {
        SeriesDevice::new(PipelineConfig {
            capacity,
            ..PipelineConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_write_consumes_everything() {
        let mut dev = device(16);
        assert_eq!(dev.write(&[1, 2, 3]).unwrap(), 3);
        assert_eq!(dev.write_chunk(&[4; 10]).unwrap(), 10);
        assert_eq!(dev.waveform().len(), 13);
        assert!(dev.spectrum().is_empty());
    }

    #[test]
    fn test_read_is_unsupported() {
        let mut dev = device(16);
        let mut buf = [0u8; 4];

        let err = dev.read(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
        assert_eq!(dev.read_chunk(&mut buf).unwrap_err(), SpectrumError::ReadUnsupported);
    }

    #[test]
    fn test_oversized_write_is_invalid_input() {
        let mut dev = device(8);
        let err = dev.write(&[0; 9]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(dev.latest_frame().is_none());
    }

    #[test]
    fn test_take_frame_once() {
        let mut dev = device(8);
        assert!(dev.take_frame().is_none());

        dev.write_chunk(&[1; 6]).unwrap();
        dev.write_chunk(&[2; 6]).unwrap();

        let frame = dev.take_frame().unwrap();
        assert_eq!(frame.waveform.len(), 12);
        assert_eq!(frame.spectrum.len(), 6);
        assert!(dev.take_frame().is_none());

        // Still readable as the current series
        assert_eq!(dev.spectrum().len(), 6);
    }

    #[test]
    fn test_reset() {
        let mut dev = device(8);
        dev.write_chunk(&[1; 4]).unwrap();
        dev.reset();
        assert!(dev.waveform().is_empty());
        assert!(dev.take_frame().is_none());
    }

    #[test]
    fn test_flush() {
        let mut dev = device(8);
        dev.flush().unwrap();
    }
}
