#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! glide - headless simulator for the glide scroll physics engine.
//!
//! Run with `glide --help` for usage.

mod cli;
mod gesture;
mod report;
mod simulate;

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;
use glide::{ScrollConfig, ScrollRegion};
use tracing_subscriber::EnvFilter;

use cli::{CheckArgs, Cli, Command, ConfigFormat, DefaultsArgs, OutputFormat, SimulateArgs};
use gesture::Gesture;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Simulate(args) => run_simulate(&args),
        Command::Defaults(args) => run_defaults(&args),
        Command::Check(args) => run_check(&args),
    }
}

/// Logs go to stderr so reports on stdout stay machine-readable.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ScrollConfig> {
    let config = match path {
        Some(path) => ScrollConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ScrollConfig::default(),
    };
    config.validate().context("invalid scroll config")?;
    Ok(config)
}

fn run_simulate(args: &SimulateArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    if !(args.content_width.is_finite() && args.content_width >= 0.0) {
        bail!("--content-width must be a finite value >= 0");
    }
    if !(args.viewport_width.is_finite() && args.viewport_width >= 0.0) {
        bail!("--viewport-width must be a finite value >= 0");
    }
    if !(args.frame_interval_ms.is_finite() && args.frame_interval_ms > 0.0) {
        bail!("--frame-interval-ms must be a finite value > 0");
    }

    let gesture = match &args.gesture {
        Some(path) => Gesture::from_path(path)?,
        None => Gesture::linear(args.from, args.to, args.steps, args.duration_ms, args.release),
    };
    tracing::info!(events = gesture.events.len(), end_ms = gesture.end_time(), "gesture ready");

    let region = ScrollRegion::new(args.content_width, args.viewport_width)
        .with_scroll_offset(args.start_offset);
    let options = simulate::Options {
        frame_interval_ms: args.frame_interval_ms,
        max_frames: args.max_frames,
    };
    let report = simulate::run(config, region, &gesture, options);

    let mut stdout = io::stdout().lock();
    match args.format {
        OutputFormat::Text => report.write_text(&mut stdout)?,
        OutputFormat::Json => report.write_json(&mut stdout)?,
    }
    stdout.flush()?;

    if !report.summary.settled {
        bail!("motion did not settle within {} frames", args.max_frames);
    }
    Ok(())
}

fn run_defaults(args: &DefaultsArgs) -> Result<()> {
    let config = ScrollConfig::default();
    let rendered = match args.format {
        ConfigFormat::Json => serde_json::to_string_pretty(&config)?,
        ConfigFormat::Toml => toml::to_string_pretty(&config)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

fn run_check(args: &CheckArgs) -> Result<()> {
    let config = load_config(Some(&args.config))?;
    println!("{}: ok", args.config.display());
    println!("{}", config.to_diagnostic_string());
    Ok(())
}
