//! CLI Module
//!
//! Command-line harness for trying the filters on WAV files.

pub mod commands;
pub mod interactive;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Audio Filters - apply vocal removal, fades and panning to WAV files
#[derive(Parser, Debug)]
#[command(name = "audio-filters")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply a filter to a WAV file
    #[command(name = "apply")]
    Apply {
        /// Input WAV file
        input: PathBuf,

        /// Filter name (e.g. fade_in) or menu number
        filter: String,

        /// Filter parameter (fade_length or pan_length)
        #[arg(short, long, allow_negative_numbers = true)]
        param: Option<i64>,

        /// Where to write the filtered sound
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the available filters
    #[command(name = "list")]
    List,

    /// Show header, levels and waveform of a WAV file
    #[command(name = "inspect")]
    Inspect {
        /// WAV file to inspect
        input: PathBuf,
    },

    /// Menu-driven tester (the default when no command is given)
    #[command(name = "interactive")]
    Interactive,
}
