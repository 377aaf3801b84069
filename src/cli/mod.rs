//! Command-line interface for listen-fetch.
//!
//! Parses arguments, merges them over the config file and drives the
//! download pipeline. This is the only layer that prints to stdout.

mod commands;

pub use commands::{Cli, Commands, run_command};
