//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use mamdani_domain::{FuzzySet, MembershipShape, RuleBase, RuleIssue};
use mamdani_loader::FuzzySets;
use std::collections::BTreeMap;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a degree map (set name → degree).
    pub fn format_degrees(&self, degrees: &BTreeMap<String, f64>) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(degrees)?),
            OutputFormat::Table => {
                if degrees.is_empty() {
                    return Ok(self.colorize("No degrees computed.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Fuzzy set", "Degree"]);
                for (name, degree) in degrees {
                    builder.push_record([name.clone(), format_degree(*degree)]);
                }
                Ok(render(builder))
            }
            OutputFormat::Quiet => Ok(degrees
                .iter()
                .map(|(name, degree)| format!("{}={}", name, degree))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format input and output fuzzy sets.
    pub fn format_sets(&self, sets: &FuzzySets) -> Result<String> {
        let all = || {
            sets.inputs
                .iter()
                .map(|set| ("input", set))
                .chain(sets.outputs.iter().map(|set| ("output", set)))
        };

        match self.format {
            OutputFormat::Json => {
                let json_sets: Vec<serde_json::Value> = all()
                    .map(|(side, set)| {
                        serde_json::json!({
                            "name": set.name(),
                            "side": side,
                            "shape": set.membership().map(|m| m.kind.keyword()),
                            "params": set.params(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json_sets)?)
            }
            OutputFormat::Table => {
                if sets.is_empty() {
                    return Ok(self.colorize("No fuzzy sets loaded.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Name", "Side", "Shape", "Parameters"]);
                for (side, set) in all() {
                    builder.push_record([
                        set.name().to_string(),
                        side.to_string(),
                        set.shape_label().to_string(),
                        format_params(set),
                    ]);
                }
                Ok(render(builder))
            }
            OutputFormat::Quiet => Ok(all()
                .map(|(_, set)| set.name())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format the rules of a rule base in order.
    pub fn format_rules(&self, rules: &RuleBase) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json_rules: Vec<&str> = rules.rules().iter().map(|r| r.as_str()).collect();
                Ok(serde_json::to_string_pretty(&json_rules)?)
            }
            OutputFormat::Table => {
                if rules.is_empty() {
                    return Ok(self.colorize("No rules loaded.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["#", "Rule"]);
                for (index, rule) in rules.rules().iter().enumerate() {
                    builder.push_record([(index + 1).to_string(), rule.to_string()]);
                }
                Ok(render(builder))
            }
            OutputFormat::Quiet => Ok(rules
                .rules()
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format rule check issues.
    pub fn format_issues(&self, issues: &[RuleIssue]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json_issues: Vec<serde_json::Value> = issues
                    .iter()
                    .map(|issue| {
                        serde_json::json!({
                            "rule": issue.index + 1,
                            "text": issue.rule,
                            "problem": issue.error.to_string(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json_issues)?)
            }
            OutputFormat::Table => {
                if issues.is_empty() {
                    return Ok(self.success("All rules are well formed."));
                }
                let mut builder = Builder::default();
                builder.push_record(["#", "Rule", "Problem"]);
                for issue in issues {
                    builder.push_record([
                        (issue.index + 1).to_string(),
                        issue.rule.clone(),
                        issue.error.to_string(),
                    ]);
                }
                Ok(render(builder))
            }
            OutputFormat::Quiet => Ok(issues
                .iter()
                .map(|issue| format!("{}: {}", issue.index + 1, issue.error))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a membership function sampled at several points.
    pub fn format_membership(
        &self,
        shape: &MembershipShape,
        samples: &[(f64, f64)],
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let points: Vec<serde_json::Value> = samples
                    .iter()
                    .map(|(x, degree)| serde_json::json!({ "x": x, "degree": degree }))
                    .collect();
                let json = serde_json::json!({
                    "shape": shape.kind().keyword(),
                    "samples": points,
                });
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["x", shape.kind().label()]);
                for (x, degree) in samples {
                    builder.push_record([x.to_string(), format_degree(*degree)]);
                }
                Ok(render(builder))
            }
            OutputFormat::Quiet => Ok(samples
                .iter()
                .map(|(_, degree)| degree.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn format_degree(degree: f64) -> String {
    format!("{:.4}", degree)
}

fn format_params(set: &FuzzySet) -> String {
    set.params()
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
