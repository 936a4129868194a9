use std::{fs, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use snake_arcade_core::Cell;
use snake_arcade_world::SessionSettings;

/// Command-line arguments accepted by the headless driver.
#[derive(Debug, Parser)]
#[command(
    name = "snake-arcade",
    about = "Runs a headless Snake Arcade session and prints each frame"
)]
pub(crate) struct CliArgs {
    /// TOML file providing session settings; missing keys use defaults.
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,
    /// Overrides the number of board columns.
    #[arg(long)]
    pub(crate) columns: Option<u32>,
    /// Overrides the number of board rows and recentres the spawn row.
    #[arg(long)]
    pub(crate) rows: Option<u32>,
    /// Overrides the food placement seed.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Scripted key presses as `KEY@MILLIS` pairs separated by commas.
    #[arg(long, default_value = "")]
    pub(crate) moves: String,
    /// File used to persist the high score between runs.
    #[arg(long, value_name = "PATH")]
    pub(crate) high_score_file: Option<PathBuf>,
    /// Log filter directive, taking precedence over `RUST_LOG`.
    #[arg(long, value_name = "FILTER")]
    pub(crate) log_level: Option<String>,
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 1200)]
    pub(crate) frames: u32,
    /// Simulated time between frames, in milliseconds.
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
    pub(crate) frame_millis: u64,
    /// Number of automatic restarts after a game over.
    #[arg(long, default_value_t = 0)]
    pub(crate) restarts: u32,
    /// Colors frames with ANSI escape sequences.
    #[arg(long)]
    pub(crate) ansi: bool,
}

impl CliArgs {
    pub(crate) fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_millis)
    }

    /// Loads the configured settings, applies flag overrides and validates them.
    pub(crate) fn session_settings(&self) -> Result<SessionSettings> {
        let mut settings = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                parse_settings(&raw)
                    .with_context(|| format!("failed to parse config file {}", path.display()))?
            }
            None => SessionSettings::default(),
        };
        self.apply_overrides(&mut settings);
        settings
            .validate()
            .context("session settings are invalid")?;
        Ok(settings)
    }

    fn apply_overrides(&self, settings: &mut SessionSettings) {
        if let Some(columns) = self.columns {
            settings.columns = columns;
        }
        if let Some(rows) = self.rows {
            settings.rows = rows;
            let row = i32::try_from(rows / 2).unwrap_or(i32::MAX);
            settings.spawn = Cell::new(settings.spawn.column(), row);
        }
        if let Some(seed) = self.seed {
            settings.rng_seed = seed;
        }
    }
}

fn parse_settings(raw: &str) -> Result<SessionSettings, toml::de::Error> {
    toml::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["snake-arcade"];
        argv.extend_from_slice(extra);
        CliArgs::try_parse_from(argv).expect("arguments parse")
    }

    #[test]
    fn defaults_reproduce_the_reference_session() {
        let settings = args(&[]).session_settings().expect("defaults are valid");
        assert_eq!(settings, SessionSettings::default());
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let settings = parse_settings("columns = 30\nmove_interval = 90\n").expect("valid toml");
        assert_eq!(settings.columns, 30);
        assert_eq!(settings.move_interval, Duration::from_millis(90));
        assert_eq!(settings.rows, SessionSettings::default().rows);
    }

    #[test]
    fn flags_override_the_board_and_seed() {
        let settings = args(&["--columns", "8", "--rows", "5", "--seed", "17"])
            .session_settings()
            .expect("overrides are valid");

        assert_eq!(settings.columns, 8);
        assert_eq!(settings.rows, 5);
        assert_eq!(settings.spawn, Cell::new(0, 2));
        assert_eq!(settings.rng_seed, 17);
    }

    #[test]
    fn invalid_overrides_are_reported() {
        let error = args(&["--columns", "0"])
            .session_settings()
            .expect_err("empty board is rejected");
        assert!(error.to_string().contains("session settings are invalid"));
    }

    #[test]
    fn zero_frame_interval_is_rejected() {
        assert!(CliArgs::try_parse_from(["snake-arcade", "--frame-millis", "0"]).is_err());
    }
}
