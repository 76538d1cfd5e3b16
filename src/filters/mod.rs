//! Sample Transform Library
//!
//! Elementary single-pass transforms over stereo sounds:
//! vocal removal, fades and left-to-right panning. Every transform returns
//! a new sound of the same length and leaves its input untouched.

pub mod command;
pub mod transforms;

pub use command::{Filter, FilterKind};
pub use transforms::{fade, fade_in, fade_out, left_to_right, remove_vocals};
