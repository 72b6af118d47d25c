//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use mamdani_domain::ShapeKind;
use std::path::PathBuf;

/// Mamdani CLI - Evaluate fuzzy rule bases from definition files.
#[derive(Debug, Parser)]
#[command(name = "mamdani")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MAMDANI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Fuzzy-set definition file
    #[arg(long, global = true)]
    pub variables: Option<PathBuf>,

    /// Rule definition file
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// Override a crisp input (format: name=value, e.g. service=75)
    #[arg(short = 'i', long = "input", value_parser = parse_input, global = true)]
    pub inputs: Vec<(String, f64)>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (name=value lines)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fuzzify inputs and infer output degrees (default)
    Infer,

    /// Fuzzify inputs and show input set degrees
    Fuzzify,

    /// List loaded fuzzy sets
    Sets,

    /// List loaded rules
    Rules,

    /// Report malformed rules and unknown fuzzy sets
    Check,

    /// Evaluate a single membership function
    Membership(MembershipArgs),

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Arguments for the membership command.
#[derive(Debug, Parser)]
pub struct MembershipArgs {
    /// Membership shape
    #[arg(value_enum)]
    pub shape: ShapeArg,

    /// Shape parameters in file order
    #[arg(required = true, allow_negative_numbers = true)]
    pub params: Vec<f64>,

    /// Crisp values to evaluate at
    #[arg(short = 'a', long = "at", required = true, allow_negative_numbers = true)]
    pub points: Vec<f64>,
}

/// Shape argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ShapeArg {
    /// Triangle: left center right
    Triang,
    /// Trapezoid: low_left up_left up_right low_right
    Trap,
    /// Shoulder: up down
    Sat,
    /// Bell curve: center width
    Gauss,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ShapeArg> for ShapeKind {
    fn from(shape: ShapeArg) -> Self {
        match shape {
            ShapeArg::Triang => ShapeKind::Triangular,
            ShapeArg::Trap => ShapeKind::Trapezoidal,
            ShapeArg::Sat => ShapeKind::Saturation,
            ShapeArg::Gauss => ShapeKind::Gaussian,
        }
    }
}

fn parse_input(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing input name in '{}'", s));
    }
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid value for '{}': {}", name, e))?;
    Ok((name.to_string(), value))
}
