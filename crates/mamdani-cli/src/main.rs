//! Mamdani CLI - Command-line interface for the Mamdani fuzzy inference engine.

use clap::Parser;
use mamdani_cli::commands;
use mamdani_cli::{Cli, Command, Config, Formatter};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> mamdani_cli::Result<()> {
    let config_path = Config::resolve_path(cli.config.as_deref())?;

    // Load config, falling back to defaults on a broken file
    let mut config = Config::load(&config_path).unwrap_or_else(|e| {
        warn!("{}; using default configuration", e);
        Config::default()
    });

    // Command-line overrides
    if let Some(variables) = cli.variables {
        config.variables_file = variables;
    }
    if let Some(rules) = cli.rules {
        config.rules_file = rules;
    }
    for (name, value) in &cli.inputs {
        config.set_input(name, *value)?;
    }

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    match cli.command.unwrap_or(Command::Infer) {
        Command::Infer => commands::execute_infer(&config, &formatter)?,
        Command::Fuzzify => commands::execute_fuzzify(&config, &formatter)?,
        Command::Sets => commands::execute_sets(&config, &formatter)?,
        Command::Rules => commands::execute_rules(&config, &formatter)?,
        Command::Check => commands::execute_check(&config, &formatter)?,
        Command::Membership(args) => commands::execute_membership(args, &formatter)?,
        Command::Init { force } => commands::execute_init(&config_path, force, &formatter)?,
    }

    Ok(())
}
