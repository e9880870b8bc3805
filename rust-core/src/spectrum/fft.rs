//! Radix-2 FFT engine
//!
//! In-place iterative Cooley-Tukey (decimation in time) forward transform
//! over complex samples. Output is unnormalized and unwindowed.

use num_complex::Complex64;
use std::f64::consts::PI;

use super::bitrev::BitReversalPermuter;
use crate::error::{Result, SpectrumError};

/// Forward radix-2 transform planned for one length
#[derive(Debug, Clone)]
pub struct RadixTwoFft {
    /// Transform length (power of two)
    length: usize,

    /// Input reordering for this length
    permuter: BitReversalPermuter,
}

impl RadixTwoFft {
    /// Plan a transform
    ///
    /// # Arguments
    /// * `length` - Number of points, must be a non-zero power of two
    pub fn new(length: usize) -> Result<Self> {
        let permuter = BitReversalPermuter::new(length)?;
        Ok(Self { length, permuter })
    }

    /// Transform `samples[..len]` in place
    ///
    /// A longer slice is allowed; entries past the transform length are
    /// left as they are.
    ///
    /// # Returns
    /// `BufferTooShort` when the slice holds fewer than `len` values
    pub fn process(&self, samples: &mut [Complex64]) -> Result<()> {
        let length = self.length;
        if samples.len() < length {
            return Err(SpectrumError::BufferTooShort {
                required: length,
                actual: samples.len(),
            });
        }

        self.permuter.permute(samples)?;

        let mut half_size = 1;
        while half_size < length {
            // Twiddle is advanced by repeated multiplication per sub-step
            let phase_shift_step = Complex64::from_polar(1.0, -PI / half_size as f64);
            let mut current_phase_shift = Complex64::new(1.0, 0.0);

            for fft_step in 0..half_size {
                let mut i = fft_step;
                while i < length {
                    let t = current_phase_shift * samples[i + half_size];
                    samples[i + half_size] = samples[i] - t;
                    samples[i] += t;
                    i += 2 * half_size;
                }

                current_phase_shift *= phase_shift_step;
            }

            half_size *= 2;
        }

        Ok(())
    }

    /// Get transform length
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of non-redundant bins for a real input (up to Nyquist, exclusive)
    pub fn num_bins(&self) -> usize {
        self.length / 2
    }
}

/// Plan and run a forward transform over `samples[..length]` in one call
pub fn forward_fft(samples: &mut [Complex64], length: usize) -> Result<()> {
    RadixTwoFft::new(length)?.process(samples)
}

/// Euclidean norm of the first `count` values
pub fn magnitudes(spectrum: &[Complex64], count: usize) -> Vec<f64> {
    spectrum.iter().take(count).map(|c| c.norm()).collect()
}
