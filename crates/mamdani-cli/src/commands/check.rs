//! Check command implementation.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::pipeline::Definitions;
use mamdani_domain::RuleIssue;
use std::collections::BTreeSet;
use tracing::warn;

/// Execute the check command.
///
/// Fails when any rule has a problem, so scripts can gate on the exit code.
pub fn execute_check(config: &Config, formatter: &Formatter) -> Result<()> {
    let mut definitions = Definitions::load_strict(config)?;
    let (report, issue_count) = render_check(&mut definitions, config, formatter)?;
    println!("{}", report);

    if issue_count == 0 {
        Ok(())
    } else {
        Err(CliError::CheckFailed(issue_count))
    }
}

/// Render the issue report; undeclared outputs go to the log so the report
/// stays machine-readable.
fn render_check(
    definitions: &mut Definitions,
    config: &Config,
    formatter: &Formatter,
) -> Result<(String, usize)> {
    let issues = find_issues(definitions, config);

    for output in undeclared_outputs(definitions) {
        warn!(
            "Output set '{}' is not defined in {}",
            output,
            config.variables_file.display()
        );
    }

    Ok((formatter.format_issues(&issues)?, issues.len()))
}

/// Rule problems against the degrees the configured inputs produce.
fn find_issues(definitions: &mut Definitions, config: &Config) -> Vec<RuleIssue> {
    let degrees = definitions.fuzzify(config);
    definitions.rules.check(&degrees)
}

/// Consequents naming no output set from the definition file.
fn undeclared_outputs(definitions: &Definitions) -> BTreeSet<&str> {
    let declared: BTreeSet<&str> = definitions
        .sets
        .outputs
        .iter()
        .map(|set| set.name())
        .collect();
    definitions
        .rules
        .rules()
        .iter()
        .filter_map(|rule| rule.consequent())
        .filter(|output| !declared.contains(output))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use mamdani_domain::{FuzzySet, RuleError, ShapeKind};
    use mamdani_loader::FuzzySets;

    fn definitions(rules: &[&str]) -> Definitions {
        Definitions {
            sets: FuzzySets {
                inputs: vec![
                    FuzzySet::input("Service_Poor")
                        .with_shape(ShapeKind::Saturation, vec![0.0, 50.0]),
                    FuzzySet::input("Ambience_Nice")
                        .with_shape(ShapeKind::Saturation, vec![100.0, 50.0]),
                ],
                outputs: vec![FuzzySet::output("Tip_Low")],
            },
            rules: rules.iter().copied().collect(),
        }
    }

    #[test]
    fn test_clean_rules_have_no_issues() {
        let mut defs = definitions(&["IF Service_Poor THEN Tip_Low"]);
        assert!(find_issues(&mut defs, &Config::default()).is_empty());
        assert!(undeclared_outputs(&defs).is_empty());
    }

    #[test]
    fn test_unrouted_set_is_reported_as_unknown() {
        let mut defs = definitions(&["IF Service_Poor AND Ambience_Nice THEN Tip_Low"]);
        let issues = find_issues(&mut defs, &Config::default());
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].error,
            RuleError::UnknownTerm("Ambience_Nice".to_string())
        );
    }

    #[test]
    fn test_syntax_problems_are_reported() {
        let mut defs = definitions(&[
            "IF Service_Poor THEN Tip_Low",
            "IF Service_Poor AND THEN Tip_Low",
            "Service_Poor",
        ]);
        let issues = find_issues(&mut defs, &Config::default());
        let indexes: Vec<_> = issues.iter().map(|issue| issue.index).collect();
        assert_eq!(indexes, vec![1, 2]);
    }

    #[test]
    fn test_undeclared_outputs() {
        let defs = definitions(&[
            "IF Service_Poor THEN Tip_Low",
            "IF Service_Poor THEN Tip_Huge",
        ]);
        let outputs: Vec<_> = undeclared_outputs(&defs).into_iter().collect();
        assert_eq!(outputs, vec!["Tip_Huge"]);
    }

    #[test]
    fn test_json_report_with_undeclared_output_parses() {
        let mut defs = definitions(&[
            "IF Service_Poor THEN Tip_Huge",
            "IF Service_Poor AND Ambience_Nice THEN Tip_Low",
        ]);
        let formatter = Formatter::new(OutputFormat::Json, false);

        let (report, count) = render_check(&mut defs, &Config::default(), &formatter).unwrap();
        assert_eq!(count, 1);

        let parsed: Vec<serde_json::Value> = serde_json::from_str(&report).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0]["rule"], 2);
        assert!(!report.contains("Tip_Huge"));
    }
}
