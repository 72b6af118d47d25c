//! Init command implementation.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the init command.
pub fn execute_init(path: &Path, force: bool, formatter: &Formatter) -> Result<()> {
    if force && path.exists() {
        println!("{}", formatter.info(&format!("Overwriting {}", path.display())));
    }
    write_default_config(path, force)?;
    println!(
        "{}",
        formatter.success(&format!("Wrote default configuration to {}", path.display()))
    );
    Ok(())
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Config::default().save(path)
}
