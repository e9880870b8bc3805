//! Python bindings for the series device

use numpy::PyArray1;
use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::device::SeriesDevice;
use crate::spectrum::analysis::magnitude_db;
use crate::spectrum::{MagnitudeSpan, PipelineConfig, SeriesPoint};

/// Split points into (x, y) numpy arrays
pub(crate) fn to_arrays<'py>(
    py: Python<'py>,
    points: &[SeriesPoint],
) -> (&'py PyArray1<f64>, &'py PyArray1<f64>) {
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    (PyArray1::from_vec(py, xs), PyArray1::from_vec(py, ys))
}

/// Write-only audio sink exposed to Python
#[pyclass(name = "SeriesDevice")]
pub struct PySeriesDevice {
    device: SeriesDevice,
}

#[pymethods]
impl PySeriesDevice {
    /// Create a new series device
    ///
    /// Args:
    ///     capacity: Window capacity and FFT length (power of 2)
    ///     max_frequency_hz: Frequency assigned to bin `capacity`
    ///     transform_span: Read back only bins below the FFT's Nyquist bin
    #[new]
    #[pyo3(signature = (capacity=1024, max_frequency_hz=8000.0, transform_span=false))]
    fn new(capacity: usize, max_frequency_hz: f64, transform_span: bool) -> PyResult<Self> {
        let config = PipelineConfig {
            capacity,
            max_frequency_hz,
            magnitude_span: if transform_span {
                MagnitudeSpan::Transform
            } else {
                MagnitudeSpan::Window
            },
        };

        let device = SeriesDevice::new(config).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { device })
    }

    /// Feed one chunk of unsigned 8-bit samples
    ///
    /// Returns:
    ///     Number of bytes consumed
    fn write(&mut self, data: &[u8]) -> PyResult<usize> {
        self.device
            .write_chunk(data)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Always raises: the device is write-only
    fn read(&mut self) -> PyResult<Vec<u8>> {
        let mut buf = [0u8; 0];
        self.device
            .read_chunk(&mut buf)
            .map(|_| Vec::new())
            .map_err(|e| PyIOError::new_err(e.to_string()))
    }

    /// Current waveform as (x, y) arrays
    fn waveform<'py>(&self, py: Python<'py>) -> (&'py PyArray1<f64>, &'py PyArray1<f64>) {
        to_arrays(py, self.device.waveform())
    }

    /// Current spectrum as (frequency_hz, magnitude) arrays
    fn spectrum<'py>(&self, py: Python<'py>) -> (&'py PyArray1<f64>, &'py PyArray1<f64>) {
        to_arrays(py, self.device.spectrum())
    }

    /// Current spectrum in dB as (frequency_hz, level_db) arrays
    ///
    /// Args:
    ///     reference: Magnitude that maps to 0 dB (default: 1.0)
    #[pyo3(signature = (reference=1.0))]
    fn spectrum_db<'py>(
        &self,
        py: Python<'py>,
        reference: f64,
    ) -> (&'py PyArray1<f64>, &'py PyArray1<f64>) {
        to_arrays(py, &magnitude_db(self.device.spectrum(), reference))
    }

    /// Clear the window
    fn reset(&mut self) {
        self.device.reset();
    }

    /// Window capacity
    fn get_capacity(&self) -> usize {
        self.device.config().capacity
    }
}
