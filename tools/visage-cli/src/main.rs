//! Visage CLI — Pointer trace tooling for the widget motion engine.
//!
//! Usage:
//!   visage synth <OUTPUT>      Generate a synthetic pointer trace
//!   visage inspect <PATH>      Show trace information
//!   visage simulate <PATH>     Replay a trace through a widget stage
//!   visage play <PATH>         Replay a trace in real time

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::synth::SynthPattern;

#[derive(Parser)]
#[command(
    name = "visage",
    about = "Pointer-to-motion engine tooling: synthesize and replay traces",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a synthetic pointer trace
    Synth {
        /// Output trace file (JSONL)
        output: PathBuf,

        /// Movement pattern
        #[arg(long, value_enum, default_value = "sweep")]
        pattern: SynthPattern,

        /// Trace duration in seconds
        #[arg(long, default_value = "4.0")]
        duration_secs: f64,

        /// Pointer sample rate (Hz)
        #[arg(long, default_value = "60")]
        rate: u32,

        /// Viewport width in pixels
        #[arg(long, default_value = "1280")]
        width: u32,

        /// Viewport height in pixels
        #[arg(long, default_value = "720")]
        height: u32,

        /// Do not append a final leave event
        #[arg(long)]
        no_leave: bool,
    },

    /// Show trace information
    Inspect {
        /// Path to the trace file
        path: PathBuf,
    },

    /// Replay a trace through a full widget stage, as fast as possible
    Simulate {
        /// Path to the trace file
        path: PathBuf,

        /// Animation tick rate (Hz); defaults to the configured rate
        #[arg(long)]
        tick_rate: Option<u32>,

        /// Emit per-tick widget parameters as JSONL on stdout
        #[arg(long)]
        emit: bool,
    },

    /// Replay a trace in real time, logging widget parameters
    Play {
        /// Path to the trace file
        path: PathBuf,

        /// Animation tick rate (Hz); defaults to the configured rate
        #[arg(long)]
        tick_rate: Option<u32>,

        /// Playback speed multiplier
        #[arg(long, default_value = "1.0")]
        speed: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from the user config; --verbose overrides the level.
    let config = visage_common::config::AppConfig::load();
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    visage_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Synth {
            output,
            pattern,
            duration_secs,
            rate,
            width,
            height,
            no_leave,
        } => commands::synth::run(output, pattern, duration_secs, rate, width, height, !no_leave),
        Commands::Inspect { path } => commands::inspect::run(path),
        Commands::Simulate {
            path,
            tick_rate,
            emit,
        } => commands::simulate::run(path, tick_rate, emit, &config.motion),
        Commands::Play {
            path,
            tick_rate,
            speed,
        } => commands::play::run(path, tick_rate, speed, &config.motion).await,
    }
}
