//! Rules command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use mamdani_loader::read_rules;

/// Execute the rules command.
pub fn execute_rules(config: &Config, formatter: &Formatter) -> Result<()> {
    let rules = read_rules(&config.rules_file)?;
    println!("{}", formatter.format_rules(&rules)?);
    Ok(())
}
