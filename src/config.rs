//! Harness configuration
//!
//! Settings for the manual test harness, loaded from an optional JSON file.
//! Every field has a default so partial files are accepted.

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};

/// Harness configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bit depth for saved WAV files; `None` keeps the input's depth
    ///
    /// Output can only keep or narrow the input's depth: a 16-bit input
    /// cannot be saved at 24 or 32 bits.
    pub output_bits_per_sample: Option<u16>,
    /// Columns in the waveform display
    pub waveform_width: usize,
    /// Rows per channel in the waveform display
    pub waveform_height: usize,
    /// Appended to the input file stem when no output path is given
    pub default_output_suffix: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output_bits_per_sample: None,
            waveform_width: 72,
            waveform_height: 8,
            default_output_suffix: "_filtered".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| FilterError::Config {
            details: format!("cannot read {}: {}", path.display(), e),
        })?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate()?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if let Some(bits) = self.output_bits_per_sample {
            if !matches!(bits, 8 | 16 | 24 | 32) {
                return Err(FilterError::Config {
                    details: format!("output_bits_per_sample must be 8, 16, 24 or 32, got {}", bits),
                });
            }
        }
        if self.waveform_width == 0 || self.waveform_height == 0 {
            return Err(FilterError::Config {
                details: "waveform dimensions must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Default output path for a filtered version of `input`
    ///
    /// `song.wav` filtered with `fade_in` becomes `song_filtered_fade_in.wav`
    /// next to the input.
    pub fn output_path_for(&self, input: &Path, filter_name: &str) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sound".to_string());
        input.with_file_name(format!(
            "{}{}_{}.wav",
            stem, self.default_output_suffix, filter_name
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.output_bits_per_sample, None);
        assert_eq!(config.waveform_width, 72);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"waveform_height": 4, "output_bits_per_sample": 16}}"#).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.waveform_height, 4);
        assert_eq!(config.output_bits_per_sample, Some(16));
        assert_eq!(config.waveform_width, 72);
    }

    #[test]
    fn test_invalid_values() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"output_bits_per_sample": 12}}"#).unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(FilterError::Config { .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(FilterError::Serialization(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Config::load("/nonexistent/config.json"),
            Err(FilterError::Config { .. })
        ));
        assert_eq!(Config::load_or_default(None).unwrap(), Config::default());
    }

    #[test]
    fn test_output_path() {
        let config = Config::default();
        let out = config.output_path_for(Path::new("/tmp/music/song.wav"), "fade_in");
        assert_eq!(out, PathBuf::from("/tmp/music/song_filtered_fade_in.wav"));
    }
}
