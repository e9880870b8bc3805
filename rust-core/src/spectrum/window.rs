//! Sliding sample window fed from the incoming byte stream
//!
//! Keeps the most recent samples up to a capacity. Once the window has
//! reached capacity, every new chunk evicts as many of the oldest samples
//! as the chunk is long. When chunk sizes differ from the overflow amount
//! the window can settle above capacity; callers that need a pinned
//! length must feed chunks sized to the overflow.

use super::series::SeriesPoint;
use crate::error::{Result, SpectrumError};

/// Capacity-bounded FIFO window of real samples
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    samples: Vec<f64>,
    capacity: usize,
}

impl SlidingWindow {
    /// Create an empty window
    ///
    /// # Arguments
    /// * `capacity` - Fill level at which old samples start being evicted
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: Vec::new(),
            capacity,
        }
    }

    /// Build a window from existing samples (e.g. a previous frame)
    pub fn from_samples(samples: Vec<f64>, capacity: usize) -> Self {
        Self { samples, capacity }
    }

    /// Append one chunk of unsigned 8-bit samples
    ///
    /// # Returns
    /// `BufferUnderrun` if the chunk is longer than the capacity; the
    /// window is left unchanged in that case
    pub fn push_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        if chunk.len() > self.capacity {
            return Err(SpectrumError::BufferUnderrun {
                chunk: chunk.len(),
                capacity: self.capacity,
            });
        }

        if self.samples.len() >= self.capacity {
            // chunk.len() <= capacity <= len, so the drain is in bounds
            self.samples.drain(..chunk.len());
        }

        self.samples.extend(chunk.iter().map(|&b| f64::from(b)));
        Ok(())
    }

    /// Window contents as chart points (x = index)
    pub fn points(&self) -> Vec<SeriesPoint> {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, &y)| SeriesPoint::new(i as f64, y))
            .collect()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True once eviction kicks in
    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}
