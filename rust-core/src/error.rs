//! Error types for the spectrum pipeline

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpectrumError {
    #[error("Transform length must be a non-zero power of two (got {0})")]
    InvalidLength(usize),

    #[error("Chunk of {chunk} samples exceeds window capacity of {capacity}")]
    BufferUnderrun { chunk: usize, capacity: usize },

    #[error("Buffer holds {actual} values but the transform needs {required}")]
    BufferTooShort { required: usize, actual: usize },

    #[error("Invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    #[error("Series device is write-only")]
    ReadUnsupported,
}

pub type Result<T> = std::result::Result<T, SpectrumError>;
