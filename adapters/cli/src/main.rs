#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Snake Arcade session.

mod config;
mod script;
mod session;
mod store;

use std::io;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use snake_arcade_core::WELCOME_BANNER;
use snake_arcade_rendering::{Palette, TextBackend};
use snake_arcade_system_high_score::MemoryHighScoreStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    config::CliArgs,
    script::InputScript,
    session::{RunOptions, RunSummary},
    store::FileHighScoreStore,
};

/// Entry point for the Snake Arcade command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.log_level.as_deref())?;

    let settings = args.session_settings()?;
    let script = InputScript::parse(&args.moves).context("failed to parse --moves")?;
    let options = RunOptions {
        frames: args.frames,
        frame_interval: args.frame_interval(),
        restarts: args.restarts,
    };

    println!("{WELCOME_BANNER}");
    let mut backend = TextBackend::new(io::stdout());
    if args.ansi {
        backend = backend.with_palette(Palette::default());
    }

    let summary = match args.high_score_file {
        Some(path) => session::run(
            settings,
            script,
            FileHighScoreStore::new(path),
            &mut backend,
            &options,
        )?,
        None => session::run(
            settings,
            script,
            MemoryHighScoreStore::default(),
            &mut backend,
            &options,
        )?,
    };
    report(summary);
    Ok(())
}

fn init_tracing(directive: Option<&str>) -> Result<()> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log filter `{directive}`"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow!(error))
        .context("failed to install the log subscriber")
}

fn report(summary: RunSummary) {
    info!(
        frames = summary.frames_presented,
        games = summary.games_finished,
        high_score = summary.high_score,
        "session finished"
    );
}
