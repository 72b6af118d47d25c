//! Infer command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::pipeline::Definitions;

/// Execute the infer command.
pub fn execute_infer(config: &Config, formatter: &Formatter) -> Result<()> {
    let mut definitions = Definitions::load(config);
    let output = definitions.infer(config);
    println!("{}", formatter.format_degrees(&output)?);
    Ok(())
}
