//! Mamdani CLI library.
//!
//! This library provides the core functionality for the `mamdani` command-line
//! interface, including configuration management, definition loading, command
//! execution, and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use pipeline::{Definitions, TracingObserver};
