//! Sound Module
//!
//! Stereo sound model and its collaborators:
//! - Sample and amplitude types
//! - The `Sound` buffer
//! - WAV file I/O
//! - Waveform display
//! - Playback on the default output device

pub mod buffer;
pub mod display;
pub mod io;
pub mod playback;
pub mod sample;

pub use buffer::{Sound, DEFAULT_SAMPLE_RATE};
pub use display::{levels, render_waveform, ChannelLevels, SoundLevels};
pub use io::{load_wav, probe_wav, save_wav, WavInfo};
pub use playback::{play, play_interleaved, to_f32_interleaved, Player};
pub use sample::{Amplitude, Sample};
