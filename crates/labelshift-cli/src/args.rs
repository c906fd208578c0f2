//! Command-line argument definitions for the Labelshift CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the scenario to replay, where the offset
//! report goes, the configuration file, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Labelshift gesture replayer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input scenario file
    #[arg(help = "Path to the scenario file (TOML)")]
    pub input: String,

    /// Path to the output offset report
    #[arg(short, long, default_value = "offsets.toml")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
