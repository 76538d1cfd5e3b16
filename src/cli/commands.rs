//! CLI Command Implementations
//!
//! Implements the logic behind each non-interactive command.

use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

use crate::config::Config;
use crate::error::{FilterError, Result};
use crate::filters::{Filter, FilterKind};
use crate::sound::{
    levels, load_wav, probe_wav, render_waveform, save_wav, Amplitude, SoundLevels, WavInfo,
};

/// Integer width used to hold a file's samples in memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleWidth {
    I8,
    I16,
    I32,
}

impl SampleWidth {
    /// Smallest width that holds samples of `bits_per_sample`
    pub fn for_bits(bits_per_sample: u16) -> Result<Self> {
        match bits_per_sample {
            1..=8 => Ok(SampleWidth::I8),
            9..=16 => Ok(SampleWidth::I16),
            17..=32 => Ok(SampleWidth::I32),
            other => Err(FilterError::UnsupportedFormat {
                details: format!("{}-bit samples", other),
            }),
        }
    }

    /// Width for the samples described by a WAV header
    pub fn for_wav(info: &WavInfo) -> Result<Self> {
        if info.is_float {
            return Err(FilterError::UnsupportedFormat {
                details: "floating point WAV (only integer PCM supported)".to_string(),
            });
        }
        Self::for_bits(info.bits_per_sample)
    }
}

/// Summary of one filter run
#[derive(Debug, Clone, Serialize)]
pub struct ApplyReport {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub filter: Filter,
    pub samples: usize,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub before: SoundLevels,
    pub after: SoundLevels,
}

fn apply_typed<T: Amplitude + hound::Sample>(
    input: &Path,
    filter: Filter,
    output: Option<&Path>,
    bits_per_sample: u16,
) -> Result<ApplyReport> {
    let original = load_wav::<T, _>(input)?;
    let filtered = filter.apply(&original)?;

    if let Some(path) = output {
        save_wav(&filtered, path, bits_per_sample)?;
        info!("Saved filtered sound to {}", path.display());
    }

    Ok(ApplyReport {
        input: input.to_path_buf(),
        output: output.map(Path::to_path_buf),
        filter,
        samples: filtered.len(),
        sample_rate: filtered.sample_rate(),
        bits_per_sample,
        before: levels(&original),
        after: levels(&filtered),
    })
}

/// Load `input`, apply `filter` and optionally save the result
pub fn run_filter(
    input: &Path,
    filter: Filter,
    output: Option<&Path>,
    config: &Config,
) -> Result<ApplyReport> {
    info!("Applying {} to {}", filter, input.display());

    let info = probe_wav(input)?;
    let width = SampleWidth::for_wav(&info)?;
    let bits = config.output_bits_per_sample.unwrap_or(info.bits_per_sample);
    if bits > info.bits_per_sample {
        return Err(FilterError::UnsupportedFormat {
            details: format!(
                "{}-bit output from a {}-bit input (output can only keep or narrow the depth)",
                bits, info.bits_per_sample
            ),
        });
    }

    match width {
        SampleWidth::I8 => apply_typed::<i8>(input, filter, output, bits),
        SampleWidth::I16 => apply_typed::<i16>(input, filter, output, bits),
        SampleWidth::I32 => apply_typed::<i32>(input, filter, output, bits),
    }
}

/// `apply` command: run a filter and print a summary or JSON report
pub fn apply(
    input: &Path,
    filter_name: &str,
    param: Option<i64>,
    output: Option<&Path>,
    json: bool,
    config: &Config,
) -> Result<()> {
    let kind: FilterKind = filter_name.parse()?;
    let filter = Filter::new(kind, param)?;

    let report = run_filter(input, filter, output, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Applied {} to {}", report.filter, report.input.display());
    println!(
        "{} samples @ {} Hz, {}-bit",
        report.samples, report.sample_rate, report.bits_per_sample
    );
    println!(
        "Left  peak {:.3} -> {:.3} | rms {:.3} -> {:.3}",
        report.before.left.peak, report.after.left.peak, report.before.left.rms, report.after.left.rms
    );
    println!(
        "Right peak {:.3} -> {:.3} | rms {:.3} -> {:.3}",
        report.before.right.peak,
        report.after.right.peak,
        report.before.right.rms,
        report.after.right.rms
    );
    match &report.output {
        Some(path) => println!("Saved: {}", path.display()),
        None => println!("Not saved (use --output to write the result)"),
    }

    Ok(())
}

/// `list` command
pub fn list_filters() -> Result<()> {
    println!("The following functions are available.\n");
    for kind in FilterKind::ALL {
        let param = kind
            .param_name()
            .map(|p| format!(" <{}>", p))
            .unwrap_or_default();
        let signature = format!("{}{}", kind.name(), param);
        println!(
            "({}) {:<28} {}",
            kind.menu_number(),
            signature,
            kind.description()
        );
    }
    Ok(())
}

fn inspect_typed<T: Amplitude + hound::Sample>(input: &Path, config: &Config) -> Result<String> {
    let sound = load_wav::<T, _>(input)?;
    Ok(render_waveform(
        &sound,
        config.waveform_width,
        config.waveform_height,
    ))
}

/// Render the waveform of a WAV file, choosing the sample width from its header
pub fn waveform_of(input: &Path, config: &Config) -> Result<(WavInfo, String)> {
    let info = probe_wav(input)?;
    let text = match SampleWidth::for_wav(&info)? {
        SampleWidth::I8 => inspect_typed::<i8>(input, config)?,
        SampleWidth::I16 => inspect_typed::<i16>(input, config)?,
        SampleWidth::I32 => inspect_typed::<i32>(input, config)?,
    };
    Ok((info, text))
}

/// `inspect` command
pub fn inspect(input: &Path, config: &Config) -> Result<()> {
    info!("Inspecting {}", input.display());

    let (info, waveform) = waveform_of(input, config)?;
    println!("File: {}", input.display());
    println!(
        "{} channel(s), {} Hz, {}-bit, {} frames ({:.3}s)",
        info.channels,
        info.sample_rate,
        info.bits_per_sample,
        info.frames,
        info.duration()
    );
    print!("{}", waveform);

    Ok(())
}
