//! Mimic CLI
//!
//! Argument parsing and configuration loading for the `mimic-say` binary.

pub mod cli;
pub mod settings;

pub use cli::{Cli, Commands, ConnectionArgs};
