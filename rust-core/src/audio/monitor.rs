//! Live spectrum monitor - keeps the pipeline on its own thread
//!
//! The capture callback only quantizes and queues samples; a worker
//! thread drains the queue in fixed-size chunks, feeds them through a
//! `SeriesDevice` and publishes the latest frame for the UI to take.

use crate::audio::buffer::{SampleConsumer, SampleRingBuffer};
use crate::audio::input::{list_input_devices, AudioDeviceInfo, AudioError, AudioInput};
use crate::device::SeriesDevice;
use crate::error::SpectrumError;
use crate::spectrum::{PipelineConfig, SpectrumFrame};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

/// Monitor configuration
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// Samples per write to the series device
    ///
    /// A chunk size that divides the capacity keeps the window pinned at
    /// capacity, and no spectrum is ever produced.
    pub chunk_size: usize,

    /// Capture queue size in samples
    pub ring_capacity: usize,

    pub pipeline: PipelineConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            chunk_size: 320,
            ring_capacity: 16384,
            pipeline: PipelineConfig::default(),
        }
    }
}

impl MonitorConfig {
    pub fn validate(&self) -> Result<(), SpectrumError> {
        self.pipeline.validate()?;

        if self.chunk_size == 0 {
            return Err(SpectrumError::InvalidConfig("chunk size must be non-zero".into()));
        }
        if self.chunk_size > self.pipeline.capacity {
            return Err(SpectrumError::BufferUnderrun {
                chunk: self.chunk_size,
                capacity: self.pipeline.capacity,
            });
        }
        if self.ring_capacity < self.chunk_size {
            return Err(SpectrumError::InvalidConfig(format!(
                "capture queue ({}) smaller than one chunk ({})",
                self.ring_capacity, self.chunk_size
            )));
        }
        Ok(())
    }
}

/// Live capture + spectrum worker
pub struct SpectrumMonitor {
    config: MonitorConfig,

    /// Latest frame, taken by the reader
    results: Arc<Mutex<Option<SpectrumFrame>>>,

    /// Number of chunks processed since start
    frames: Arc<AtomicUsize>,

    /// Audio input stream
    audio_input: Option<AudioInput>,

    /// Worker thread handle
    worker: Option<JoinHandle<()>>,

    /// Running flag
    running: Arc<AtomicBool>,
}

impl SpectrumMonitor {
    /// Create a stopped monitor
    pub fn new(config: MonitorConfig) -> Result<Self, AudioError> {
        config.validate()?;

        if config.pipeline.capacity % config.chunk_size == 0 {
            warn!(
                "Chunk size {} divides capacity {}: window will never overflow",
                config.chunk_size, config.pipeline.capacity
            );
        }

        Ok(Self {
            config,
            results: Arc::new(Mutex::new(None)),
            frames: Arc::new(AtomicUsize::new(0)),
            audio_input: None,
            worker: None,
            running: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Start capture from the default input device
    ///
    /// # Returns
    /// The device that is being captured
    pub fn start(&mut self) -> Result<AudioDeviceInfo, AudioError> {
        self.stop();

        let rb = SampleRingBuffer::new(self.config.ring_capacity);
        let (producer, consumer) = rb.split();

        let input = AudioInput::from_default_device(producer)?;
        let info = input.device_info().clone();
        input.start()?;
        self.audio_input = Some(input);

        if let Err(e) = self.start_with_consumer(consumer) {
            self.stop();
            return Err(e);
        }

        Ok(info)
    }

    /// Start the worker on an externally fed queue
    pub fn start_with_consumer(&mut self, consumer: SampleConsumer) -> Result<(), AudioError> {
        if let Some(handle) = self.worker.take() {
            self.running.store(false, Ordering::SeqCst);
            let _ = handle.join();
        }

        let mut device = SeriesDevice::new(self.config.pipeline.clone())?;

        self.frames.store(0, Ordering::SeqCst);
        self.running.store(true, Ordering::SeqCst);

        let results = Arc::clone(&self.results);
        let frames = Arc::clone(&self.frames);
        let running = Arc::clone(&self.running);
        let chunk_size = self.config.chunk_size;

        let handle = std::thread::Builder::new()
            .name("spectrum-monitor".into())
            .spawn(move || {
                let mut consumer = consumer;
                let mut chunk = vec![0u8; chunk_size];

                while running.load(Ordering::SeqCst) {
                    if !consumer.read_chunk(&mut chunk) {
                        std::thread::sleep(Duration::from_micros(100));
                        continue;
                    }

                    match device.write_chunk(&chunk) {
                        Ok(_) => {
                            frames.fetch_add(1, Ordering::SeqCst);
                            if let Some(frame) = device.take_frame() {
                                if let Ok(mut guard) = results.lock() {
                                    *guard = Some(frame);
                                }
                            }
                        }
                        Err(e) => warn!("Dropping chunk: {}", e),
                    }
                }

                debug!("Monitor worker exiting");
            })
            .map_err(|e| {
                self.running.store(false, Ordering::SeqCst);
                AudioError::Spawn(e.to_string())
            })?;

        self.worker = Some(handle);
        Ok(())
    }

    /// Stop capture and join the worker
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);

        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }

        if let Some(input) = self.audio_input.take() {
            let _ = input.pause();
            info!("Capture stopped");
        }
    }

    /// Take the latest frame (None if nothing new since the last call)
    pub fn get_results(&self) -> Option<SpectrumFrame> {
        if let Ok(mut guard) = self.results.lock() {
            guard.take()
        } else {
            None
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Chunks processed since the worker started
    pub fn frames_processed(&self) -> usize {
        self.frames.load(Ordering::SeqCst)
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// List available input devices by name
    pub fn list_devices() -> Result<Vec<String>, AudioError> {
        list_input_devices().map(|devices| devices.into_iter().map(|d| d.name).collect())
    }
}

impl Drop for SpectrumMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn wait_for_spectrum(monitor: &SpectrumMonitor) -> Option<SpectrumFrame> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(frame) = monitor.get_results() {
                if frame.has_spectrum() {
                    return Some(frame);
                }
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        None
    }

    #[test]
    fn test_config_validation() {
        assert!(MonitorConfig::default().validate().is_ok());

        let config = MonitorConfig {
            chunk_size: 2048,
            ..MonitorConfig::default()
        };
        assert!(matches!(
            SpectrumMonitor::new(config),
            Err(AudioError::Spectrum(SpectrumError::BufferUnderrun { .. }))
        ));

        let config = MonitorConfig {
            chunk_size: 0,
            ..MonitorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_worker_produces_spectrum() {
        let config = MonitorConfig {
            chunk_size: 100,
            ring_capacity: 4096,
            pipeline: PipelineConfig {
                capacity: 256,
                ..PipelineConfig::default()
            },
        };
        let mut monitor = SpectrumMonitor::new(config).unwrap();

        let (mut producer, consumer) = SampleRingBuffer::new(4096).split();
        monitor.start_with_consumer(consumer).unwrap();
        assert!(monitor.is_running());

        // 100, 200, 300 > 256
        let signal: Vec<u8> = (0..300).map(|n| if n % 2 == 0 { 200 } else { 50 }).collect();
        assert_eq!(producer.write(&signal), 300);

        let frame = wait_for_spectrum(&monitor).expect("no spectrum produced");
        assert_eq!(frame.waveform.len(), 300);
        assert_eq!(frame.spectrum.len(), 150);

        monitor.stop();
        assert!(!monitor.is_running());
        assert_eq!(monitor.frames_processed(), 3);
    }

    #[test]
    fn test_partial_chunk_is_held_back() {
        let config = MonitorConfig {
            chunk_size: 64,
            ring_capacity: 1024,
            pipeline: PipelineConfig {
                capacity: 128,
                ..PipelineConfig::default()
            },
        };
        let mut monitor = SpectrumMonitor::new(config).unwrap();
        let (mut producer, consumer) = SampleRingBuffer::new(1024).split();
        monitor.start_with_consumer(consumer).unwrap();

        producer.write(&[1u8; 63]);
        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(monitor.frames_processed(), 0);
        assert!(monitor.get_results().is_none());
    }
}
