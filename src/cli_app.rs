//! jetdash CLI: flag parsing and runtime wiring.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use jetdash::core::config::Config;
use jetdash::core::errors::Result;
use jetdash::telemetry::provider::{ReplayProvider, SimulatedProvider, TelemetryProvider};
use jetdash::tui::runtime::{RuntimeOptions, run_dashboard};
use jetdash::tui::theme::Theme;

/// Terminal dashboard for Jetson-class device telemetry.
#[derive(Debug, Parser)]
#[command(name = "jetdash", version, about)]
pub struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Replay recorded JSON snapshots instead of simulated telemetry.
    #[arg(long, value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// Redraw interval in milliseconds.
    #[arg(long, value_name = "MS")]
    pub refresh_ms: Option<u64>,

    /// Disable color output.
    #[arg(long)]
    pub no_color: bool,
}

/// Resolve config + flags and run the dashboard.
pub fn run(cli: &Cli) -> Result<()> {
    let config = effective_config(cli)?;
    let theme = if config.no_color {
        Theme::from_no_color_flag(true)
    } else {
        Theme::from_environment()
    };
    let options = RuntimeOptions {
        refresh: Duration::from_millis(config.refresh_ms),
        theme,
    };

    let mut provider: Box<dyn TelemetryProvider> = match &config.replay_file {
        Some(path) => Box::new(ReplayProvider::from_file(path)?),
        None => Box::new(SimulatedProvider::default()),
    };
    run_dashboard(provider.as_mut(), &options)
}

/// Config file values overridden by any explicitly-passed flags.
pub fn effective_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(refresh_ms) = cli.refresh_ms {
        config.refresh_ms = refresh_ms;
    }
    if cli.no_color {
        config.no_color = true;
    }
    if let Some(replay) = &cli.replay {
        config.replay_file = Some(replay.clone());
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from(["jetdash", "--refresh-ms", "250", "--no-color"]);
        let config = effective_config(&cli).unwrap();
        assert_eq!(config.refresh_ms, 250);
        assert!(config.no_color);
        assert!(config.replay_file.is_none());
    }

    #[test]
    fn replay_flag_selects_replay_file() {
        let cli = Cli::parse_from(["jetdash", "--replay", "/tmp/frames.json"]);
        let config = effective_config(&cli).unwrap();
        assert_eq!(
            config.replay_file.as_deref(),
            Some(std::path::Path::new("/tmp/frames.json"))
        );
    }

    #[test]
    fn config_file_feeds_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "refresh_ms = 2000\n").unwrap();

        let cli = Cli::parse_from([
            "jetdash",
            "--config",
            path.to_str().unwrap(),
        ]);
        let config = effective_config(&cli).unwrap();
        assert_eq!(config.refresh_ms, 2000);
    }
}
