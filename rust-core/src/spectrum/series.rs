//! Point sequences handed to the charting consumer

/// One chart point
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SeriesPoint {
    pub x: f64,
    pub y: f64,
}

impl SeriesPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for SeriesPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Output of one write: time-domain window and its spectrum
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpectrumFrame {
    /// Window samples, x = sample index
    pub waveform: Vec<SeriesPoint>,

    /// Magnitude spectrum, x = frequency in Hz (empty until the window overflows)
    pub spectrum: Vec<SeriesPoint>,
}

impl SpectrumFrame {
    /// Whether a transform ran for this frame
    pub fn has_spectrum(&self) -> bool {
        !self.spectrum.is_empty()
    }
}
