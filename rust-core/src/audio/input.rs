//! Audio input capture using cpal
//!
//! Captures from a microphone or line-in and queues unsigned 8-bit mono
//! samples for the spectrum pipeline

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, Stream, StreamConfig};
use log::{info, warn};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use super::buffer::SampleProducer;

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("No audio input device found")]
    NoDevice,

    #[error("Failed to get device name: {0}")]
    DeviceName(String),

    #[error("Failed to get default config: {0}")]
    DefaultConfig(String),

    #[error("Unsupported sample format {0} (expected f32)")]
    UnsupportedFormat(String),

    #[error("Failed to build stream: {0}")]
    BuildStream(String),

    #[error("Failed to play stream: {0}")]
    PlayStream(String),

    #[error("Failed to start monitor thread: {0}")]
    Spawn(String),

    #[error(transparent)]
    Spectrum(#[from] crate::error::SpectrumError),
}

/// Audio input device information
#[derive(Debug, Clone)]
pub struct AudioDeviceInfo {
    pub name: String,
    pub sample_rate: u32,
    pub channels: u16,
}

/// Audio input stream
pub struct AudioInput {
    stream: Stream,
    device_info: AudioDeviceInfo,
}

impl AudioInput {
    /// Create audio input from default device
    ///
    /// # Arguments
    /// * `producer` - Ring buffer producer for captured samples
    pub fn from_default_device(producer: SampleProducer) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_input_device().ok_or(AudioError::NoDevice)?;

        Self::from_device(device, producer)
    }

    /// Create audio input from specific device
    pub fn from_device(device: Device, producer: SampleProducer) -> Result<Self, AudioError> {
        let name = device
            .name()
            .map_err(|e| AudioError::DeviceName(e.to_string()))?;

        let config = device
            .default_input_config()
            .map_err(|e| AudioError::DefaultConfig(e.to_string()))?;

        if config.sample_format() != SampleFormat::F32 {
            return Err(AudioError::UnsupportedFormat(format!(
                "{:?}",
                config.sample_format()
            )));
        }

        let device_info = AudioDeviceInfo {
            name,
            sample_rate: config.sample_rate().0,
            channels: config.channels(),
        };

        let stream_config: StreamConfig = config.into();
        let channels = usize::from(device_info.channels.max(1));

        let producer = Arc::new(Mutex::new(producer));
        let producer_clone = Arc::clone(&producer);
        let stream = device
            .build_input_stream(
                &stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let samples = downmix_to_u8(data, channels);

                    if let Ok(mut prod) = producer_clone.lock() {
                        let written = prod.write(&samples);
                        if written < samples.len() {
                            warn!("Capture buffer full, dropped {} samples", samples.len() - written);
                        }
                    }
                },
                move |err| {
                    warn!("Audio input error: {}", err);
                },
                None,
            )
            .map_err(|e| AudioError::BuildStream(e.to_string()))?;

        info!(
            "Capturing from '{}' at {} Hz, {} channel(s)",
            device_info.name, device_info.sample_rate, device_info.channels
        );

        Ok(Self {
            stream,
            device_info,
        })
    }

    /// Start capturing audio
    pub fn start(&self) -> Result<(), AudioError> {
        self.stream
            .play()
            .map_err(|e| AudioError::PlayStream(e.to_string()))
    }

    /// Pause audio capture
    pub fn pause(&self) -> Result<(), AudioError> {
        self.stream
            .pause()
            .map_err(|e| AudioError::PlayStream(e.to_string()))
    }

    /// Get device information
    pub fn device_info(&self) -> &AudioDeviceInfo {
        &self.device_info
    }
}

/// Map a float sample in [-1, 1] to unsigned 8-bit (silence = 128)
pub fn quantize_u8(sample: f32) -> u8 {
    let clamped = sample.clamp(-1.0, 1.0);
    ((clamped + 1.0) * 127.5).round() as u8
}

/// Average interleaved frames to mono and quantize
pub fn downmix_to_u8(data: &[f32], channels: usize) -> Vec<u8> {
    let channels = channels.max(1);
    data.chunks(channels)
        .map(|frame| quantize_u8(frame.iter().sum::<f32>() / frame.len() as f32))
        .collect()
}

/// List available audio input devices
pub fn list_input_devices() -> Result<Vec<AudioDeviceInfo>, AudioError> {
    let host = cpal::default_host();
    let mut devices = Vec::new();

    let device_iter = host
        .input_devices()
        .map_err(|e| AudioError::DeviceName(e.to_string()))?;

    for device in device_iter {
        if let Ok(name) = device.name() {
            if let Ok(config) = device.default_input_config() {
                devices.push(AudioDeviceInfo {
                    name,
                    sample_rate: config.sample_rate().0,
                    channels: config.channels(),
                });
            }
        }
    }

    Ok(devices)
}
