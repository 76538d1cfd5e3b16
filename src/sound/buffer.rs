//! Sound buffer
//!
//! A [`Sound`] is a fixed-length sequence of stereo samples together with
//! the sample rate it was recorded at. Filters never touch the rate.

use crate::error::{FilterError, Result};
use crate::sound::sample::{Amplitude, Sample};

/// Default sample rate for sounds built in memory (CD quality)
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Ordered, randomly indexable sequence of stereo samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sound<T: Amplitude = i16> {
    /// Stereo samples in time order
    samples: Vec<Sample<T>>,
    /// Sample rate in Hz
    sample_rate: u32,
}

impl<T: Amplitude> Sound<T> {
    /// Create a sound from existing samples
    pub fn new(samples: Vec<Sample<T>>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Create a silent sound of `len` samples
    pub fn silence(len: usize, sample_rate: u32) -> Self {
        Self {
            samples: vec![Sample::default(); len],
            sample_rate,
        }
    }

    /// Create a sound from `(left, right)` pairs at the default sample rate
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, T)>,
    {
        Self {
            samples: pairs.into_iter().map(Sample::from).collect(),
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the sound holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Get the sample at `index`
    pub fn get(&self, index: usize) -> Result<Sample<T>> {
        self.samples
            .get(index)
            .copied()
            .ok_or(FilterError::IndexOutOfRange {
                index,
                len: self.samples.len(),
            })
    }

    /// Replace the sample at `index`
    pub fn set(&mut self, index: usize, sample: Sample<T>) -> Result<()> {
        let len = self.samples.len();
        let slot = self
            .samples
            .get_mut(index)
            .ok_or(FilterError::IndexOutOfRange { index, len })?;
        *slot = sample;
        Ok(())
    }

    /// All samples as a slice
    pub fn samples(&self) -> &[Sample<T>] {
        &self.samples
    }

    /// All samples as a mutable slice
    pub fn samples_mut(&mut self) -> &mut [Sample<T>] {
        &mut self.samples
    }

    /// Iterate over the samples in order
    pub fn iter(&self) -> std::slice::Iter<'_, Sample<T>> {
        self.samples.iter()
    }

    /// Left channel amplitudes
    pub fn left_channel(&self) -> Vec<T> {
        self.samples.iter().map(|s| s.left).collect()
    }

    /// Right channel amplitudes
    pub fn right_channel(&self) -> Vec<T> {
        self.samples.iter().map(|s| s.right).collect()
    }
}

impl<'a, T: Amplitude> IntoIterator for &'a Sound<T> {
    type Item = &'a Sample<T>;
    type IntoIter = std::slice::Iter<'a, Sample<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
