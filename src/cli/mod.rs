//! Command-line interface for subaba.
//!
//! This module provides CLI commands for hashing video files, searching
//! for subtitles and downloading them.

mod commands;

pub use commands::{Cli, Commands, run_command};
