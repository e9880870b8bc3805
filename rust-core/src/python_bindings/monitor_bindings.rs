//! Python bindings for the live spectrum monitor

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use super::device_bindings::to_arrays;
use crate::audio::{MonitorConfig, SpectrumMonitor};
use crate::spectrum::PipelineConfig;

/// Live capture + spectrum monitor exposed to Python
///
/// Capture and FFT run on Rust threads; Python only polls results
#[pyclass(name = "SpectrumMonitor", unsendable)]
pub struct PySpectrumMonitor {
    monitor: SpectrumMonitor,
}

#[pymethods]
impl PySpectrumMonitor {
    #[new]
    #[pyo3(signature = (capacity=1024, chunk_size=320, max_frequency_hz=8000.0))]
    fn new(capacity: usize, chunk_size: usize, max_frequency_hz: f64) -> PyResult<Self> {
        let config = MonitorConfig {
            chunk_size,
            pipeline: PipelineConfig {
                capacity,
                max_frequency_hz,
                ..PipelineConfig::default()
            },
            ..MonitorConfig::default()
        };

        let monitor = SpectrumMonitor::new(config).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { monitor })
    }

    /// Start capture from the default input device
    ///
    /// Returns:
    ///     Device name as string
    fn start(&mut self) -> PyResult<String> {
        self.monitor
            .start()
            .map(|info| info.name)
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    /// Stop capture
    fn stop(&mut self) {
        self.monitor.stop();
    }

    /// Get latest frame
    ///
    /// Returns:
    ///     Dictionary with keys 'waveform_x', 'waveform_y', 'spectrum_hz',
    ///     'spectrum_magnitude', or None if no new data
    fn get_results(&self, py: Python<'_>) -> Option<PyObject> {
        self.monitor.get_results().map(|frame| {
            let dict = pyo3::types::PyDict::new(py);
            let (wx, wy) = to_arrays(py, &frame.waveform);
            let (sx, sy) = to_arrays(py, &frame.spectrum);

            dict.set_item("waveform_x", wx).ok();
            dict.set_item("waveform_y", wy).ok();
            dict.set_item("spectrum_hz", sx).ok();
            dict.set_item("spectrum_magnitude", sy).ok();

            dict.into()
        })
    }

    /// List available audio devices
    #[staticmethod]
    fn list_devices() -> PyResult<Vec<String>> {
        SpectrumMonitor::list_devices().map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }
}
