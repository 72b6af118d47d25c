//! Rule definition files, one rule per line

use crate::{content_lines, read_file, LoadError};
use mamdani_domain::RuleBase;
use std::path::Path;
use tracing::info;

/// Read rules from `path`
pub fn read_rules(path: impl AsRef<Path>) -> Result<RuleBase, LoadError> {
    let path = path.as_ref();
    let rules = parse_rules(&read_file(path)?);
    info!("Loaded {} rules from {}", rules.len(), path.display());
    Ok(rules)
}

/// Parse rules, one per non-blank, non-comment line.
///
/// Lines are stored as written; syntax is not checked here.
pub fn parse_rules(text: &str) -> RuleBase {
    content_lines(text).map(|(_, line)| line).collect()
}
