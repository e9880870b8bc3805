//! Lock-free ring buffer for captured audio bytes
//!
//! Carries unsigned 8-bit samples from the capture callback to the
//! monitor thread

use ringbuf::{HeapConsumer, HeapProducer, HeapRb};

/// Single-producer single-consumer byte ring buffer
pub struct SampleRingBuffer {
    producer: HeapProducer<u8>,
    consumer: HeapConsumer<u8>,
    capacity: usize,
}

impl SampleRingBuffer {
    /// Create new ring buffer with given capacity
    ///
    /// # Arguments
    /// * `capacity` - Buffer capacity in samples
    pub fn new(capacity: usize) -> Self {
        let rb = HeapRb::<u8>::new(capacity);
        let (producer, consumer) = rb.split();

        Self {
            producer,
            consumer,
            capacity,
        }
    }

    /// Split into producer and consumer ends
    pub fn split(self) -> (SampleProducer, SampleConsumer) {
        (
            SampleProducer {
                producer: self.producer,
            },
            SampleConsumer {
                consumer: self.consumer,
            },
        )
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Writing end (capture callback)
pub struct SampleProducer {
    producer: HeapProducer<u8>,
}

impl SampleProducer {
    /// Write samples to buffer
    ///
    /// # Returns
    /// Number of samples actually written (less if the buffer is full)
    pub fn write(&mut self, samples: &[u8]) -> usize {
        self.producer.push_slice(samples)
    }

    pub fn free_len(&self) -> usize {
        self.producer.free_len()
    }
}

/// Reading end (monitor thread)
pub struct SampleConsumer {
    consumer: HeapConsumer<u8>,
}

impl SampleConsumer {
    /// Read up to `buffer.len()` samples
    pub fn read(&mut self, buffer: &mut [u8]) -> usize {
        self.consumer.pop_slice(buffer)
    }

    /// Read a full chunk, or nothing if fewer than `buffer.len()` samples
    /// are queued
    pub fn read_chunk(&mut self, buffer: &mut [u8]) -> bool {
        if self.consumer.len() < buffer.len() {
            return false;
        }
        self.consumer.pop_slice(buffer) == buffer.len()
    }

    pub fn len(&self) -> usize {
        self.consumer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_buffer_write_read() {
        let rb = SampleRingBuffer::new(1024);
        let (mut producer, mut consumer) = rb.split();

        let data = vec![1u8, 2, 3, 4, 5];
        assert_eq!(producer.write(&data), 5);

        let mut output = vec![0u8; 5];
        assert_eq!(consumer.read(&mut output), 5);
        assert_eq!(output, data);
    }

    #[test]
    fn test_ring_buffer_overflow() {
        let rb = SampleRingBuffer::new(10);
        let (mut producer, mut consumer) = rb.split();

        let written = producer.write(&[7u8; 20]);
        assert!(written <= 10);
        assert_eq!(producer.free_len(), 0);

        let mut output = vec![0u8; 20];
        assert_eq!(consumer.read(&mut output), written);
    }

    #[test]
    fn test_read_chunk_waits_for_full_chunk() {
        let rb = SampleRingBuffer::new(64);
        let (mut producer, mut consumer) = rb.split();

        producer.write(&[1u8; 6]);
        let mut chunk = [0u8; 8];
        assert!(!consumer.read_chunk(&mut chunk));
        assert_eq!(consumer.len(), 6);

        producer.write(&[2u8; 4]);
        assert!(consumer.read_chunk(&mut chunk));
        assert_eq!(chunk, [1, 1, 1, 1, 1, 1, 2, 2]);
        assert_eq!(consumer.len(), 2);
    }
}
