//! Waveform display and level statistics
//!
//! Terminal stand-in for a graphical waveform view: each channel is drawn as
//! a column plot of peak amplitudes, and peak/RMS levels are reported
//! relative to the full scale of the sample width.

use std::fmt::Write as _;

use serde::Serialize;

use crate::sound::buffer::Sound;
use crate::sound::sample::{Amplitude, Sample};

/// Peak and RMS level of one channel, normalized to 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ChannelLevels {
    pub peak: f64,
    pub rms: f64,
}

impl ChannelLevels {
    /// RMS level in dBFS. Returns -inf for silence.
    pub fn rms_db(&self) -> f64 {
        if self.rms <= 0.0 {
            f64::NEG_INFINITY
        } else {
            20.0 * self.rms.log10()
        }
    }
}

/// Levels of both channels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SoundLevels {
    pub left: ChannelLevels,
    pub right: ChannelLevels,
}

fn channel_levels<T: Amplitude>(values: impl Iterator<Item = T>) -> ChannelLevels {
    let full_scale = T::full_scale();
    let mut peak: f64 = 0.0;
    let mut sum_squares = 0.0;
    let mut count = 0usize;

    for value in values {
        let normalized = value.as_f64() / full_scale;
        peak = peak.max(normalized.abs());
        sum_squares += normalized * normalized;
        count += 1;
    }

    if count == 0 {
        return ChannelLevels::default();
    }

    ChannelLevels {
        // The most negative value normalizes slightly past 1.0
        peak: peak.min(1.0),
        rms: (sum_squares / count as f64).sqrt().min(1.0),
    }
}

/// Compute peak and RMS levels for both channels
pub fn levels<T: Amplitude>(sound: &Sound<T>) -> SoundLevels {
    SoundLevels {
        left: channel_levels(sound.iter().map(|s| s.left)),
        right: channel_levels(sound.iter().map(|s| s.right)),
    }
}

/// Per-column peak of one channel, normalized to 0.0..=1.0
fn column_peaks<T, F>(samples: &[Sample<T>], width: usize, channel: F) -> Vec<f64>
where
    T: Amplitude,
    F: Fn(&Sample<T>) -> T,
{
    let full_scale = T::full_scale();
    let len = samples.len();

    (0..width)
        .map(|col| {
            let start = col * len / width;
            let end = ((col + 1) * len / width).max(start + 1).min(len);
            samples[start..end]
                .iter()
                .map(|s| (channel(s).as_f64() / full_scale).abs())
                .fold(0.0_f64, f64::max)
                .min(1.0)
        })
        .collect()
}

fn render_channel(out: &mut String, label: &str, peaks: &[f64], height: usize) {
    let _ = writeln!(out, "{}", label);
    for row in (0..height).rev() {
        // Lit when the column peak exceeds this row's floor
        let threshold = row as f64 / height as f64;
        let line: String = peaks
            .iter()
            .map(|&p| if p > threshold { '#' } else { ' ' })
            .collect();
        let _ = writeln!(out, "|{}|", line);
    }
    let _ = writeln!(out, "+{}+", "-".repeat(peaks.len()));
}

/// Render both channels of a sound as an ASCII waveform
///
/// `width` is the number of columns (each covering an equal slice of the
/// sound) and `height` the number of rows per channel. Zero dimensions are
/// clamped to 1.
pub fn render_waveform<T: Amplitude>(sound: &Sound<T>, width: usize, height: usize) -> String {
    let mut out = String::new();

    if sound.is_empty() {
        out.push_str("(empty sound)\n");
        return out;
    }

    let width = width.clamp(1, sound.len());
    let height = height.max(1);
    let samples = sound.samples();

    render_channel(&mut out, "Left", &column_peaks(samples, width, |s| s.left), height);
    render_channel(&mut out, "Right", &column_peaks(samples, width, |s| s.right), height);

    let stats = levels(sound);
    let _ = writeln!(
        out,
        "{} samples @ {} Hz | L peak {:.3} rms {:.3} | R peak {:.3} rms {:.3}",
        sound.len(),
        sound.sample_rate(),
        stats.left.peak,
        stats.left.rms,
        stats.right.peak,
        stats.right.rms
    );

    out
}
