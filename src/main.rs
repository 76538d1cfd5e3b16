//! Audio Filters CLI
//!
//! Manual test harness for the audio filters.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::debug;

use audio_filters::cli::{commands, interactive, Cli, Commands};
use audio_filters::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    debug!("Audio Filters v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load_or_default(cli.config.as_deref()).with_context(|| {
        format!(
            "failed to load configuration{}",
            cli.config
                .as_ref()
                .map(|p| format!(" from {}", p.display()))
                .unwrap_or_default()
        )
    })?;

    match cli.command {
        Some(cmd) => handle_command(cmd, &config),
        None => interactive::run_stdio(&config).context("interactive session failed"),
    }
}

fn handle_command(cmd: Commands, config: &Config) -> anyhow::Result<()> {
    match cmd {
        Commands::Apply {
            input,
            filter,
            param,
            output,
            json,
        } => {
            commands::apply(&input, &filter, param, output.as_deref(), json, config).map_err(|e| {
                let context = format!(
                    "{} failed on {}: {}",
                    filter,
                    input.display(),
                    e.recovery_hint()
                );
                anyhow::Error::new(e).context(context)
            })
        }
        Commands::List => commands::list_filters().context("failed to list filters"),
        Commands::Inspect { input } => commands::inspect(&input, config)
            .with_context(|| format!("failed to inspect {}", input.display())),
        Commands::Interactive => {
            interactive::run_stdio(config).context("interactive session failed")
        }
    }
}
