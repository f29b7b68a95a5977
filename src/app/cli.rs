//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gesture Predictor - Replay and inspect touch-gesture prediction
#[derive(Parser, Debug)]
#[command(name = "gesture-pred")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded touch trace through the prediction pipeline
    Replay {
        /// Input trace file
        #[arg(short, long)]
        input: PathBuf,

        /// Override the prediction mode (conservative | balanced | aggressive)
        #[arg(short, long)]
        mode: Option<String>,
    },

    /// Generate a synthetic trace and run it live through the queue
    Simulate {
        /// Scenario to synthesize (tap | swipe | pinch)
        #[arg(short, long, default_value = "swipe")]
        scenario: String,

        /// Write the synthetic trace to a file instead of running it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a trace file (format, per-touch timestamp ordering)
    Validate {
        /// Path to the trace file
        trace: PathBuf,
    },

    /// Manage configuration
    Config {
        /// Config action to perform
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the active configuration
    Show,
    /// Write a default config file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
    /// Print the default config path
    Path,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
