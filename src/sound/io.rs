//! WAV file I/O
//!
//! Loads integer PCM WAV files into a [`Sound`] and writes sounds back out
//! using the hound crate. Mono files are duplicated into both channels.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::debug;
use serde::Serialize;

use crate::error::{FilterError, Result};
use crate::sound::buffer::Sound;
use crate::sound::sample::{Amplitude, Sample};

/// Header information of a WAV file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WavInfo {
    /// Number of channels in the file
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// Samples per channel
    pub frames: u32,
    /// True for IEEE float data
    pub is_float: bool,
}

impl WavInfo {
    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames as f64 / self.sample_rate as f64
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(FilterError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

fn open_reader(path: &Path) -> Result<WavReader<std::io::BufReader<std::fs::File>>> {
    ensure_exists(path)?;
    WavReader::open(path).map_err(|e| FilterError::AudioRead {
        path: path.display().to_string(),
        source: e,
    })
}

/// Read the header of a WAV file without decoding its samples
pub fn probe_wav<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let path = path.as_ref();
    let reader = open_reader(path)?;
    let spec = reader.spec();

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        frames: reader.duration(),
        is_float: spec.sample_format == SampleFormat::Float,
    })
}

/// Load a WAV file into a stereo [`Sound`]
///
/// # Errors
/// * `FileNotFound` - If the path is not an existing file
/// * `AudioRead` - If the file is not valid WAV or its samples are wider than `T`
/// * `UnsupportedFormat` - For float data or more than two channels
pub fn load_wav<T, P>(path: P) -> Result<Sound<T>>
where
    T: Amplitude + hound::Sample,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let reader = open_reader(path)?;
    let spec = reader.spec();

    if spec.sample_format == SampleFormat::Float {
        return Err(FilterError::UnsupportedFormat {
            details: "floating point WAV (only integer PCM supported)".to_string(),
        });
    }
    if spec.channels == 0 || spec.channels > 2 {
        return Err(FilterError::UnsupportedFormat {
            details: format!(
                "{}-channel audio (only mono/stereo supported)",
                spec.channels
            ),
        });
    }

    let raw = reader
        .into_samples::<T>()
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(|e| FilterError::AudioRead {
            path: path.display().to_string(),
            source: e,
        })?;

    let samples: Vec<Sample<T>> = if spec.channels == 1 {
        raw.into_iter().map(Sample::mono).collect()
    } else {
        raw.chunks_exact(2)
            .map(|frame| Sample::new(frame[0], frame[1]))
            .collect()
    };

    debug!(
        "Loaded {} ({} samples, {} Hz, {}-bit, {} channel(s))",
        path.display(),
        samples.len(),
        spec.sample_rate,
        spec.bits_per_sample,
        spec.channels
    );

    Ok(Sound::new(samples, spec.sample_rate))
}

/// Save a [`Sound`] as a stereo integer PCM WAV file
///
/// `bits_per_sample` must be a multiple of 8 no wider than `T`; samples that
/// do not fit the requested depth fail with `AudioWrite`.
pub fn save_wav<T, P>(sound: &Sound<T>, path: P, bits_per_sample: u16) -> Result<()>
where
    T: Amplitude + hound::Sample,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if bits_per_sample == 0 || bits_per_sample % 8 != 0 || bits_per_sample > T::BITS {
        return Err(FilterError::UnsupportedFormat {
            details: format!(
                "{}-bit output for {}-bit samples",
                bits_per_sample,
                T::BITS
            ),
        });
    }

    let spec = WavSpec {
        channels: 2,
        sample_rate: sound.sample_rate(),
        bits_per_sample,
        sample_format: SampleFormat::Int,
    };

    let write_error = |e: hound::Error| FilterError::AudioWrite {
        path: path.display().to_string(),
        source: e,
    };

    let mut writer = WavWriter::create(path, spec).map_err(write_error)?;
    for sample in sound {
        writer.write_sample(sample.left).map_err(write_error)?;
        writer.write_sample(sample.right).map_err(write_error)?;
    }
    writer.finalize().map_err(write_error)?;

    debug!("Wrote {} ({} samples)", path.display(), sound.len());

    Ok(())
}
