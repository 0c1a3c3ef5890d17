//! Command-line interface for `glide`.
//!
//! # Examples
//!
//! ```bash
//! # Flick left from the start of a 2000px strip and watch it coast
//! glide simulate --from 400 --to 300 --steps 4 --duration-ms 64
//!
//! # Drag past the start edge, leave the container and watch it spring back
//! glide simulate --from 100 --to 220 --release leave --format json
//!
//! # Replay a recorded gesture with a tuned config
//! glide simulate --gesture flick.json --config scroll.toml
//!
//! # Print or check configuration
//! glide defaults --format toml
//! glide check --config scroll.toml
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Headless simulator for the glide scroll physics engine.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "glide",
    author,
    version,
    about = "Headless simulator for the glide scroll physics engine",
    long_about = "Drives the glide engine with a scripted pointer gesture against an \
                  in-memory scroll region and prints every animation frame."
)]
pub struct Cli {
    /// Enable verbose logging (-v info, -vv debug, -vvv trace)
    ///
    /// `RUST_LOG` takes precedence when set
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run a gesture through the engine and print the resulting frames
    Simulate(SimulateArgs),

    /// Print the default configuration
    Defaults(DefaultsArgs),

    /// Load and validate a configuration file
    Check(CheckArgs),
}

/// Arguments for `glide simulate`.
#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Partial config file (JSON or TOML) merged over the defaults
    #[arg(long, short = 'c', env = "GLIDE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Width of the scrollable content
    #[arg(long, default_value_t = 2000.0)]
    pub content_width: f64,

    /// Width of the visible viewport
    #[arg(long, default_value_t = 500.0)]
    pub viewport_width: f64,

    /// Initial scroll offset (may be out of range)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub start_offset: f64,

    /// Gesture file: `{"events": [{"type": "down", "x": 0, "t": 0}, ...]}`
    ///
    /// Replaces the linear drag described by --from/--to/--steps
    #[arg(long, short = 'g')]
    pub gesture: Option<PathBuf>,

    /// Pointer position where the linear drag starts
    #[arg(long, default_value_t = 400.0, allow_hyphen_values = true)]
    pub from: f64,

    /// Pointer position where the linear drag ends
    #[arg(long, default_value_t = 300.0, allow_hyphen_values = true)]
    pub to: f64,

    /// Number of move events in the linear drag
    #[arg(long, default_value_t = 6)]
    pub steps: u32,

    /// Duration of the linear drag in milliseconds
    #[arg(long, default_value_t = 96.0)]
    pub duration_ms: f64,

    /// How the linear drag ends
    #[arg(long, value_enum, default_value_t = Release::Up)]
    pub release: Release,

    /// Time between animation frames in milliseconds
    #[arg(long, default_value_t = 16.0)]
    pub frame_interval_ms: f64,

    /// Give up when motion has not settled after this many frames
    #[arg(long, default_value_t = 10_000)]
    pub max_frames: usize,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for `glide defaults`.
#[derive(Args, Debug, Clone)]
pub struct DefaultsArgs {
    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = ConfigFormat::Json)]
    pub format: ConfigFormat,
}

/// Arguments for `glide check`.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Config file to validate (JSON or TOML)
    #[arg(long, short = 'c', env = "GLIDE_CONFIG")]
    pub config: PathBuf,
}

/// How a scripted drag ends.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Release {
    /// Release over the container (momentum carries on)
    #[default]
    Up,
    /// Leave the container (momentum is dropped)
    Leave,
}

/// Simulation report format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable frame table
    #[default]
    Text,
    /// A single JSON document
    Json,
}

/// Configuration output format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    /// JSON
    #[default]
    Json,
    /// TOML
    Toml,
}
