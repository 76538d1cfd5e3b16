//! Interactive tester
//!
//! Menu-driven harness: pick a filter, pick a WAV file, enter the parameter,
//! then play, inspect or save the original and filtered sounds. Input,
//! output and the player are injectable so sessions can be scripted in tests.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::cli::commands::SampleWidth;
use crate::config::Config;
use crate::error::Result;
use crate::filters::{Filter, FilterKind};
use crate::sound::{
    load_wav, play_interleaved, probe_wav, render_waveform, save_wav, to_f32_interleaved,
    Amplitude, Player, Sound,
};

/// Choices offered once a filter has run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResultAction {
    PlayOriginal,
    PlayFiltered,
    ShowOriginal,
    ShowFiltered,
    Exit,
    Save,
}

impl ResultAction {
    fn from_selection(selection: u32) -> Option<Self> {
        match selection {
            1 => Some(ResultAction::PlayOriginal),
            2 => Some(ResultAction::PlayFiltered),
            3 => Some(ResultAction::ShowOriginal),
            4 => Some(ResultAction::ShowFiltered),
            5 => Some(ResultAction::Exit),
            6 => Some(ResultAction::Save),
            _ => None,
        }
    }
}

/// One interactive session over a reader/writer pair
pub struct Session<'a, R, W> {
    input: R,
    output: W,
    config: &'a Config,
    player: Player,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(input: R, output: W, config: &'a Config) -> Self {
        Self {
            input,
            output,
            config,
            player: play_interleaved,
        }
    }

    /// Use `player` instead of the default output device
    pub fn with_player(mut self, player: Player) -> Self {
        self.player = player;
        self
    }

    /// Consume the session and return its writer
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `prompt` and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Run the full session
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "The following functions are available.\n")?;
        for kind in FilterKind::ALL {
            writeln!(self.output, "({}) {}", kind.menu_number(), kind.name())?;
        }

        let Some(selection) = self.prompt("\nEnter the number of the function to test: ")? else {
            return Ok(());
        };
        let Some(kind) = selection
            .parse::<u32>()
            .ok()
            .and_then(FilterKind::from_menu_number)
        else {
            writeln!(self.output, "Invalid selection. Please run the tester again.")?;
            return Ok(());
        };

        let Some(file) = self.prompt("Enter the name of the wav file to test with: ")? else {
            return Ok(());
        };
        let path = PathBuf::from(file);
        if !path.is_file() {
            writeln!(
                self.output,
                "\nTest Failed: The file you typed does not exist. Try again."
            )?;
            return Ok(());
        }

        let header = probe_wav(&path)
            .and_then(|info| SampleWidth::for_wav(&info).map(|width| (width, info.bits_per_sample)));
        let (width, bits) = match header {
            Ok(header) => header,
            Err(e) => {
                writeln!(self.output, "\nTest Failed: {}", e)?;
                return Ok(());
            }
        };

        match width {
            SampleWidth::I8 => self.run_with::<i8>(kind, &path, bits),
            SampleWidth::I16 => self.run_with::<i16>(kind, &path, bits),
            SampleWidth::I32 => self.run_with::<i32>(kind, &path, bits),
        }
    }

    fn run_with<T: Amplitude + hound::Sample>(
        &mut self,
        kind: FilterKind,
        path: &Path,
        input_bits: u16,
    ) -> Result<()> {
        let original: Sound<T> = match load_wav(path) {
            Ok(sound) => sound,
            Err(e) => {
                writeln!(self.output, "\nTest Failed: {}", e)?;
                return Ok(());
            }
        };
        info!("Loaded {} ({} samples)", path.display(), original.len());

        let Some(filter) = self.read_filter(kind, original.len())? else {
            return Ok(());
        };

        let filtered = match filter.apply(&original) {
            Ok(sound) => sound,
            Err(e) => {
                warn!("{} failed: {}", filter, e);
                writeln!(
                    self.output,
                    "\nTest Failed: {} raised an error: {}",
                    kind.name(),
                    e
                )?;
                return Ok(());
            }
        };

        self.result_menu(kind, path, input_bits, &original, &filtered)
    }

    /// Ask for the parameter until it is a positive integer within bounds
    fn read_filter(&mut self, kind: FilterKind, len: usize) -> Result<Option<Filter>> {
        let Some(param_name) = kind.param_name() else {
            return Filter::new(kind, None).map(Some);
        };
        if kind.param_bounded_by_length() && len == 0 {
            writeln!(
                self.output,
                "\nTest Failed: {} needs a sound with at least one sample.",
                kind.name()
            )?;
            return Ok(None);
        }

        loop {
            let Some(text) = self.prompt(&format!("Enter a value for {}: ", param_name))? else {
                return Ok(None);
            };
            let value = match text.parse::<i64>() {
                Ok(value) if value >= 1 => value,
                _ => {
                    writeln!(
                        self.output,
                        "Invalid selection. {} must be a positive integer.",
                        param_name
                    )?;
                    continue;
                }
            };
            if kind.param_bounded_by_length() && value as u64 > len as u64 {
                writeln!(
                    self.output,
                    "Invalid selection. {} must not exceed the sound's length ({}).",
                    param_name, len
                )?;
                continue;
            }
            return Filter::new(kind, Some(value)).map(Some);
        }
    }

    fn result_menu<T: Amplitude + hound::Sample>(
        &mut self,
        kind: FilterKind,
        path: &Path,
        input_bits: u16,
        original: &Sound<T>,
        filtered: &Sound<T>,
    ) -> Result<()> {
        loop {
            writeln!(self.output, "\nThe following options are available:\n")?;
            writeln!(self.output, "(1) Play original sound.")?;
            writeln!(self.output, "(2) Play filtered sound.")?;
            writeln!(self.output, "(3) Display original sound waveforms.")?;
            writeln!(self.output, "(4) Display filtered sound waveforms.")?;
            writeln!(self.output, "(5) Exit this program.")?;
            writeln!(self.output, "(6) Save filtered sound.")?;

            let Some(selection) = self.prompt("\nEnter your selection: ")? else {
                return Ok(());
            };
            let action = selection
                .parse::<u32>()
                .ok()
                .and_then(ResultAction::from_selection);

            match action {
                None => {
                    writeln!(
                        self.output,
                        "Invalid selection. Enter a number between 1 and 6."
                    )?;
                }
                Some(ResultAction::PlayOriginal) => self.play("original", original)?,
                Some(ResultAction::PlayFiltered) => self.play("filtered", filtered)?,
                Some(ResultAction::ShowOriginal) => {
                    let text = render_waveform(
                        original,
                        self.config.waveform_width,
                        self.config.waveform_height,
                    );
                    write!(self.output, "{}", text)?;
                }
                Some(ResultAction::ShowFiltered) => {
                    let text = render_waveform(
                        filtered,
                        self.config.waveform_width,
                        self.config.waveform_height,
                    );
                    write!(self.output, "{}", text)?;
                }
                Some(ResultAction::Save) => self.save(kind, path, input_bits, filtered)?,
                Some(ResultAction::Exit) => return Ok(()),
            }
        }
    }

    /// Play a sound and wait for it; device errors are reported, not fatal
    fn play<T: Amplitude>(&mut self, label: &str, sound: &Sound<T>) -> Result<()> {
        writeln!(self.output, "Playing {} sound...", label)?;
        self.output.flush()?;

        if let Err(e) = (self.player)(&to_f32_interleaved(sound), sound.sample_rate()) {
            warn!("Playback of {} sound failed: {}", label, e);
            writeln!(self.output, "Could not play: {} ({})", e, e.recovery_hint())?;
        }
        Ok(())
    }

    fn save<T: Amplitude + hound::Sample>(
        &mut self,
        kind: FilterKind,
        input: &Path,
        input_bits: u16,
        filtered: &Sound<T>,
    ) -> Result<()> {
        let bits = self.config.output_bits_per_sample.unwrap_or(input_bits);
        if bits > input_bits {
            writeln!(
                self.output,
                "Could not save: {}-bit output from a {}-bit input (set output_bits_per_sample to {} or less)",
                bits, input_bits, input_bits
            )?;
            return Ok(());
        }

        let default_path = self.config.output_path_for(input, kind.name());
        let Some(answer) = self.prompt(&format!(
            "Enter the output file name [{}]: ",
            default_path.display()
        ))?
        else {
            return Ok(());
        };
        let target = if answer.is_empty() {
            default_path
        } else {
            PathBuf::from(answer)
        };

        match save_wav(filtered, &target, bits) {
            Ok(()) => writeln!(self.output, "Saved filtered sound to {}", target.display())?,
            Err(e) => writeln!(self.output, "Could not save: {} ({})", e, e.recovery_hint())?,
        }
        Ok(())
    }
}

/// Run an interactive session on stdin/stdout
pub fn run_stdio(config: &Config) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Session::new(stdin.lock(), stdout.lock(), config).run()
}
