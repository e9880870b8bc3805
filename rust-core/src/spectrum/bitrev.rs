//! Bit-reversal permutation for the in-place radix-2 transform

use crate::error::{Result, SpectrumError};

/// Precomputed bit-reversal reordering for one transform length
///
/// Holds the full index map plus a swap table in which fixed points and
/// the second half of every pair are zeroed, so that a single pass over
/// the table performs each transposition exactly once.
#[derive(Debug, Clone)]
pub struct BitReversalPermuter {
    /// `indices[i]` is `i` with its `log2(len)` bits reversed
    indices: Vec<usize>,

    /// Swap partner for `i`, or 0 when `i` needs no swap
    swaps: Vec<usize>,
}

impl BitReversalPermuter {
    /// Build the permutation for `length` points
    ///
    /// # Arguments
    /// * `length` - Transform length, must be a non-zero power of two
    pub fn new(length: usize) -> Result<Self> {
        let indices = bit_reversal_indices(length)?;

        let mut swaps = indices.clone();
        for i in 0..length {
            if swaps[i] == i {
                swaps[i] = 0;
            } else {
                let partner = swaps[i];
                swaps[partner] = 0;
            }
        }

        Ok(Self { indices, swaps })
    }

    /// Reorder `samples[..len]` into bit-reversed order, in place
    ///
    /// Values past `len` are not touched.
    pub fn permute<T>(&self, samples: &mut [T]) -> Result<()> {
        if samples.len() < self.len() {
            return Err(SpectrumError::BufferTooShort {
                required: self.len(),
                actual: samples.len(),
            });
        }

        for (i, &partner) in self.swaps.iter().enumerate() {
            if partner != 0 {
                samples.swap(i, partner);
            }
        }

        Ok(())
    }

    /// Transform length
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Full bit-reversal map
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Swap table (zero marks "leave in place")
    pub fn swaps(&self) -> &[usize] {
        &self.swaps
    }
}

/// Compute the bit-reversal map for `length` points
///
/// Built by doubling: the second half of each prefix is the first half
/// offset by the next lower bit.
pub fn bit_reversal_indices(length: usize) -> Result<Vec<usize>> {
    if !length.is_power_of_two() {
        return Err(SpectrumError::InvalidLength(length));
    }

    let mut indices = vec![0usize; length];
    let mut limit = 1;
    let mut bit = length / 2;
    while limit < length {
        for i in 0..limit {
            indices[i + limit] = indices[i] + bit;
        }
        limit <<= 1;
        bit >>= 1;
    }

    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_length_8() {
        let indices = bit_reversal_indices(8).unwrap();
        assert_eq!(indices, vec![0, 4, 2, 6, 1, 5, 3, 7]);
    }

    #[test]
    fn test_indices_are_involution() {
        for shift in 0..12 {
            let n = 1usize << shift;
            let indices = bit_reversal_indices(n).unwrap();
            for i in 0..n {
                assert_eq!(indices[indices[i]], i, "n = {}, i = {}", n, i);
            }
        }
    }

    #[test]
    fn test_swap_table_lists_each_pair_once() {
        let permuter = BitReversalPermuter::new(16).unwrap();
        let swaps = permuter.swaps();

        // Palindromic indices stay put
        assert_eq!(swaps[0], 0);
        assert_eq!(swaps[6], 0);
        assert_eq!(swaps[9], 0);
        assert_eq!(swaps[15], 0);

        // 1 <-> 8 is recorded at the lower index only
        assert_eq!(swaps[1], 8);
        assert_eq!(swaps[8], 0);

        let pairs = swaps.iter().filter(|&&p| p != 0).count();
        assert_eq!(pairs, 6);
    }

    #[test]
    fn test_permute_matches_map() {
        let permuter = BitReversalPermuter::new(32).unwrap();
        let mut data: Vec<usize> = (0..32).collect();
        permuter.permute(&mut data).unwrap();

        assert_eq!(data, permuter.indices());
    }

    #[test]
    fn test_permute_twice_is_identity() {
        let permuter = BitReversalPermuter::new(256).unwrap();
        let original: Vec<f64> = (0..256).map(|i| i as f64 * 0.5).collect();
        let mut data = original.clone();

        permuter.permute(&mut data).unwrap();
        assert_ne!(data, original);
        permuter.permute(&mut data).unwrap();
        assert_eq!(data, original);
    }

    #[test]
    fn test_permute_leaves_tail_untouched() {
        let permuter = BitReversalPermuter::new(4).unwrap();
        let mut data = vec![0, 1, 2, 3, 40, 50];
        permuter.permute(&mut data).unwrap();
        assert_eq!(data, vec![0, 2, 1, 3, 40, 50]);
    }

    #[test]
    fn test_invalid_lengths() {
        assert_eq!(
            BitReversalPermuter::new(0).unwrap_err(),
            SpectrumError::InvalidLength(0)
        );
        assert_eq!(
            BitReversalPermuter::new(12).unwrap_err(),
            SpectrumError::InvalidLength(12)
        );
    }

    #[test]
    fn test_short_buffer_rejected() {
        let permuter = BitReversalPermuter::new(8).unwrap();
        let mut data = vec![0.0; 4];
        assert_eq!(
            permuter.permute(&mut data).unwrap_err(),
            SpectrumError::BufferTooShort { required: 8, actual: 4 }
        );
    }

    #[test]
    fn test_single_point() {
        let permuter = BitReversalPermuter::new(1).unwrap();
        assert_eq!(permuter.indices(), &[0]);
        assert_eq!(permuter.swaps(), &[0]);
    }
}
