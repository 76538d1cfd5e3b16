//! Audio Filters - stereo sample transformations
//!
//! A small library of single-pass transforms over in-memory stereo sounds:
//! - Vocal removal by channel differencing
//! - Linear fade-in, fade-out and combined fade
//! - Linear left-to-right panning
//!
//! plus the pieces the manual test harness needs: WAV I/O, a waveform
//! display and a command-line front end.

pub mod cli;
pub mod config;
pub mod error;
pub mod filters;
pub mod sound;

pub use config::Config;
pub use error::{FilterError, Result};
pub use filters::{fade, fade_in, fade_out, left_to_right, remove_vocals, Filter, FilterKind};
pub use sound::{Amplitude, Sample, Sound};
