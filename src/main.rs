//! Subaba - find subtitles for local video files.
//!
//! Computes the OpenSubtitles movie hash of video files and uses it, along
//! with an optional title query and language filter, to search for and
//! download matching subtitles.

pub mod cli;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod subtitles;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging (stderr, so hashes and results on stdout stay pipeable)
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("subaba=warn")))
        .init();

    cli::run_command(&args)
}
