//! Sets command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use mamdani_loader::read_fuzzy_sets;

/// Execute the sets command.
pub fn execute_sets(config: &Config, formatter: &Formatter) -> Result<()> {
    let sets = read_fuzzy_sets(&config.variables_file, &config.output_marker)?;
    println!("{}", formatter.format_sets(&sets)?);
    Ok(())
}
