//! Playback
//!
//! Plays a [`Sound`] on the default output device through `cpal` and blocks
//! until the last frame has been handed to the device. Frame conversion and
//! channel mapping are kept apart from the device so they can be tested
//! without audio hardware.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SampleRate, SizedSample, StreamConfig};
use log::{debug, error, info, warn};

use crate::error::{FilterError, Result};
use crate::sound::{Amplitude, Sound};

/// Extra wait past the sound's duration before giving up on the device
const DRAIN_GRACE: Duration = Duration::from_millis(500);

/// Time left for the device to play its last buffer before the stream drops
const DRAIN_TAIL: Duration = Duration::from_millis(100);

/// Plays interleaved stereo frames at a sample rate
///
/// The interactive tester takes one of these so scripted sessions never
/// touch an audio device.
pub type Player = fn(&[f32], u32) -> Result<()>;

fn playback_error(details: impl Into<String>) -> FilterError {
    FilterError::Playback {
        details: details.into(),
    }
}

/// Interleave a sound as `[l0, r0, l1, r1, ...]`, normalized to `-1.0..=1.0`
pub fn to_f32_interleaved<T: Amplitude>(sound: &Sound<T>) -> Vec<f32> {
    let scale = T::full_scale();
    let normalize = |value: T| (value.as_f64() / scale).clamp(-1.0, 1.0) as f32;
    sound
        .iter()
        .flat_map(|s| [normalize(s.left), normalize(s.right)])
        .collect()
}

/// Reads stereo frames out of an interleaved buffer at the device's rate
///
/// When the device runs at a different rate than the sound, frames are
/// repeated or skipped (nearest neighbour).
#[derive(Debug, Clone)]
pub struct FrameCursor {
    frames: Vec<f32>,
    source_rate: u64,
    device_rate: u64,
    written: u64,
}

impl FrameCursor {
    pub fn new(frames: Vec<f32>, source_rate: u32, device_rate: u32) -> Self {
        Self {
            frames,
            source_rate: u64::from(source_rate.max(1)),
            device_rate: u64::from(device_rate.max(1)),
            written: 0,
        }
    }

    fn source_index(&self) -> usize {
        (self.written * self.source_rate / self.device_rate) as usize
    }

    /// True once every source frame has been read
    pub fn is_finished(&self) -> bool {
        self.source_index() >= self.frames.len() / 2
    }

    /// Next `(left, right)` pair, or `None` past the end
    pub fn next_frame(&mut self) -> Option<(f32, f32)> {
        let index = self.source_index();
        let left = *self.frames.get(2 * index)?;
        let right = *self.frames.get(2 * index + 1)?;
        self.written += 1;
        Some((left, right))
    }

    /// Fill one device buffer of `channels`-channel frames
    ///
    /// Mono devices get the average of both channels; channels past the
    /// second are silent, and so is everything after the last frame.
    /// Returns true once the sound is exhausted.
    pub fn fill<S>(&mut self, data: &mut [S], channels: usize) -> bool
    where
        S: SizedSample + FromSample<f32>,
    {
        for frame in data.chunks_mut(channels.max(1)) {
            let (left, right) = self.next_frame().unwrap_or((0.0, 0.0));
            match frame {
                [mono] => *mono = S::from_sample((left + right) / 2.0),
                [l, r, rest @ ..] => {
                    *l = S::from_sample(left);
                    *r = S::from_sample(right);
                    for s in rest {
                        *s = S::from_sample(0.0f32);
                    }
                }
                [] => {}
            }
        }
        self.is_finished()
    }
}

/// Pick a device configuration, preferring one that runs at `sample_rate`
fn output_config(device: &cpal::Device, sample_rate: u32) -> Result<(StreamConfig, SampleFormat)> {
    let rate = SampleRate(sample_rate);
    let playable = |format: SampleFormat| {
        matches!(format, SampleFormat::F32 | SampleFormat::I16 | SampleFormat::U16)
    };

    let matching = device
        .supported_output_configs()
        .map_err(|e| playback_error(format!("failed to get device configs: {}", e)))?
        .filter(|c| {
            playable(c.sample_format())
                && c.min_sample_rate().0 <= rate.0
                && c.max_sample_rate().0 >= rate.0
        })
        .max_by_key(|c| (c.channels() == 2, c.sample_format() == SampleFormat::F32));

    if let Some(range) = matching {
        let format = range.sample_format();
        return Ok((range.with_sample_rate(rate).config(), format));
    }

    let default = device
        .default_output_config()
        .map_err(|e| playback_error(format!("failed to get default config: {}", e)))?;
    debug!(
        "Device cannot run at {} Hz, resampling to {} Hz",
        sample_rate,
        default.sample_rate().0
    );
    Ok((default.config(), default.sample_format()))
}

fn build_stream<S>(
    device: &cpal::Device,
    config: &StreamConfig,
    mut cursor: FrameCursor,
    done: mpsc::Sender<()>,
) -> Result<cpal::Stream>
where
    S: SizedSample + FromSample<f32>,
{
    let channels = config.channels as usize;
    let mut done = Some(done);

    device
        .build_output_stream(
            config,
            move |data: &mut [S], _: &cpal::OutputCallbackInfo| {
                if cursor.fill(data, channels) {
                    if let Some(tx) = done.take() {
                        let _ = tx.send(());
                    }
                }
            },
            |err| error!("Audio stream error: {}", err),
            None,
        )
        .map_err(|e| playback_error(format!("failed to build stream: {}", e)))
}

/// Play interleaved stereo frames on the default output device
///
/// Blocks until playback finishes. An empty buffer returns immediately
/// without opening a device.
pub fn play_interleaved(frames: &[f32], sample_rate: u32) -> Result<()> {
    let frame_count = frames.len() / 2;
    if frame_count == 0 {
        return Ok(());
    }

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| playback_error("no default output device"))?;
    let name = device.name().unwrap_or_else(|_| "Unknown".to_string());

    let (config, format) = output_config(&device, sample_rate)?;
    info!(
        "Playing {} frames on {} ({} Hz, {} channel(s), {:?})",
        frame_count, name, config.sample_rate.0, config.channels, format
    );

    let cursor = FrameCursor::new(frames.to_vec(), sample_rate, config.sample_rate.0);
    let (done_tx, done_rx) = mpsc::channel();
    let stream = match format {
        SampleFormat::F32 => build_stream::<f32>(&device, &config, cursor, done_tx)?,
        SampleFormat::I16 => build_stream::<i16>(&device, &config, cursor, done_tx)?,
        SampleFormat::U16 => build_stream::<u16>(&device, &config, cursor, done_tx)?,
        other => {
            return Err(playback_error(format!(
                "unsupported device sample format {:?}",
                other
            )))
        }
    };
    stream
        .play()
        .map_err(|e| playback_error(format!("failed to start stream: {}", e)))?;

    let duration = Duration::from_secs_f64(frame_count as f64 / f64::from(sample_rate.max(1)));
    match done_rx.recv_timeout(duration + DRAIN_GRACE) {
        Ok(()) => std::thread::sleep(DRAIN_TAIL),
        Err(RecvTimeoutError::Timeout) => {
            warn!("Playback did not finish within {:.1}s, stopping", duration.as_secs_f64())
        }
        Err(RecvTimeoutError::Disconnected) => {
            return Err(playback_error("audio stream stopped unexpectedly"))
        }
    }

    debug!("Playback finished");
    Ok(())
}

/// Play a sound on the default output device and wait until it has played
pub fn play<T: Amplitude>(sound: &Sound<T>) -> Result<()> {
    play_interleaved(&to_f32_interleaved(sound), sound.sample_rate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::Sample;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_interleaves_and_normalizes() {
        let sound = Sound::new(
            vec![Sample::<i16>::new(i16::MAX, 0), Sample::new(-16384, 8192)],
            8000,
        );
        let frames = to_f32_interleaved(&sound);

        assert_eq!(frames.len(), 4);
        assert_relative_eq!(frames[0], 1.0);
        assert_relative_eq!(frames[1], 0.0);
        assert_relative_eq!(frames[2], -0.5, epsilon = 1e-4);
        assert_relative_eq!(frames[3], 0.25, epsilon = 1e-4);
    }

    #[test]
    fn test_most_negative_value_is_clamped() {
        let sound = Sound::new(vec![Sample::<i8>::mono(i8::MIN)], 8000);
        assert_eq!(to_f32_interleaved(&sound), vec![-1.0, -1.0]);
    }

    #[test]
    fn test_fill_stereo_then_silence() {
        let mut cursor = FrameCursor::new(vec![0.5, -0.5, 0.25, -0.25], 44100, 44100);
        let mut data = [1.0f32; 6];

        assert!(cursor.fill(&mut data, 2));
        assert_eq!(data, [0.5, -0.5, 0.25, -0.25, 0.0, 0.0]);
    }

    #[test]
    fn test_fill_mono_device_averages() {
        let mut cursor = FrameCursor::new(vec![0.5, 0.25, -1.0, 0.0], 8000, 8000);
        let mut data = [0.0f32; 1];

        assert!(!cursor.fill(&mut data, 1));
        assert_eq!(data, [0.375]);
        assert!(cursor.fill(&mut data, 1));
        assert_eq!(data, [-0.5]);
    }

    #[test]
    fn test_fill_silences_extra_channels() {
        let mut cursor = FrameCursor::new(vec![0.5, -0.5], 8000, 8000);
        let mut data = [1.0f32; 4];

        cursor.fill(&mut data, 4);
        assert_eq!(data, [0.5, -0.5, 0.0, 0.0]);
    }

    #[test]
    fn test_fill_repeats_frames_for_faster_device() {
        let mut cursor = FrameCursor::new(vec![0.1, 0.2, 0.3, 0.4], 22050, 44100);
        let mut data = [0.0f32; 8];

        assert!(cursor.fill(&mut data, 2));
        assert_eq!(data, [0.1, 0.2, 0.1, 0.2, 0.3, 0.4, 0.3, 0.4]);
    }

    #[test]
    fn test_fill_converts_to_integer_device_format() {
        let mut cursor = FrameCursor::new(vec![1.0, 0.0], 8000, 8000);
        let mut data = [7i16; 2];

        cursor.fill(&mut data, 2);
        assert_eq!(data[0], i16::MAX);
        assert_eq!(data[1], 0);
    }

    #[test]
    fn test_empty_sound_plays_without_device() {
        let sound: Sound<i16> = Sound::new(Vec::new(), 8000);
        assert!(play(&sound).is_ok());
    }
}
