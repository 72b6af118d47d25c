//! Fuzzify command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::pipeline::Definitions;

/// Execute the fuzzify command.
pub fn execute_fuzzify(config: &Config, formatter: &Formatter) -> Result<()> {
    let mut definitions = Definitions::load(config);
    let degrees = definitions.fuzzify(config);
    println!("{}", formatter.format_degrees(&degrees)?);
    Ok(())
}
