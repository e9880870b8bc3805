//! PyO3 bindings for Python integration

use pyo3::prelude::*;

mod device_bindings;
#[cfg(feature = "capture")]
mod monitor_bindings;

/// Python module definition
#[pymodule]
fn xyseries_spectrum(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<device_bindings::PySeriesDevice>()?;
    #[cfg(feature = "capture")]
    m.add_class::<monitor_bindings::PySpectrumMonitor>()?;

    Ok(())
}
