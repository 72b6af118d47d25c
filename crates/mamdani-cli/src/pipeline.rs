//! Wiring between configuration, definition files and the inference core.
//!
//! Decides which crisp value feeds which input set (by name substring, see
//! [`Config::route_for`]) and narrates evaluation through `tracing`.

use crate::config::Config;
use crate::error::Result;
use mamdani_domain::{
    DegreeMap, Fuzzifier, InferenceObserver, OutputDegreeMap, Rule, RuleBase, RuleFiring,
};
use mamdani_loader::{read_fuzzy_sets, read_rules, FuzzySets};
use tracing::{debug, error};

/// Fuzzy sets and rules for one run.
#[derive(Debug, Clone, Default)]
pub struct Definitions {
    /// Input and output sets
    pub sets: FuzzySets,
    /// Rule base
    pub rules: RuleBase,
}

impl Definitions {
    /// Load both definition files, reporting unreadable files and carrying
    /// on with empty collections.
    pub fn load(config: &Config) -> Self {
        let sets = read_fuzzy_sets(&config.variables_file, &config.output_marker)
            .unwrap_or_else(|e| {
                error!("{}", e);
                FuzzySets::default()
            });
        let rules = read_rules(&config.rules_file).unwrap_or_else(|e| {
            error!("{}", e);
            RuleBase::default()
        });
        Self { sets, rules }
    }

    /// Load both definition files, failing on the first unreadable one.
    pub fn load_strict(config: &Config) -> Result<Self> {
        Ok(Self {
            sets: read_fuzzy_sets(&config.variables_file, &config.output_marker)?,
            rules: read_rules(&config.rules_file)?,
        })
    }

    /// Fuzzify every routed input set with its crisp value.
    ///
    /// Sets no route matches are left unfuzzified and do not appear in the
    /// returned map.
    pub fn fuzzify(&mut self, config: &Config) -> DegreeMap {
        let mut fuzzifier = Fuzzifier::new();

        for set in &mut self.sets.inputs {
            match config.route_for(set.name()) {
                Some(route) => {
                    if let Some(degree) = fuzzifier.fuzzify(set, route.value) {
                        debug!("{} <- {} = {} -> {}", set.name(), route.name, route.value, degree);
                    }
                }
                None => debug!("No crisp input routed to '{}'", set.name()),
            }
        }

        fuzzifier.into_degrees()
    }

    /// Fuzzify, then run Mamdani inference with tracing narration.
    pub fn infer(&mut self, config: &Config) -> OutputDegreeMap {
        let degrees = self.fuzzify(config);
        self.rules.infer_observed(&degrees, &mut TracingObserver)
    }
}

/// Narrates rule evaluation at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl InferenceObserver for TracingObserver {
    fn on_rule_start(&mut self, index: usize, rule: &Rule) {
        debug!(rule = index, "{}", rule);
    }

    fn on_term(&mut self, index: usize, name: &str, degree: f64, accumulator: f64) {
        debug!(rule = index, "  {} = {} (accumulated {})", name, degree, accumulator);
    }

    fn on_unknown_term(&mut self, index: usize, name: &str) {
        debug!(rule = index, "  {} has no degree, skipped", name);
    }

    fn on_firing(&mut self, index: usize, firing: &RuleFiring) {
        match &firing.consequent {
            Some(output) => debug!(rule = index, "  THEN {} fires at {}", output, firing.strength),
            None => debug!(rule = index, "  no THEN clause, rule ignored"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mamdani_domain::{FuzzySet, ShapeKind};
    use std::fs;
    use tempfile::TempDir;

    fn definitions() -> Definitions {
        Definitions {
            sets: FuzzySets {
                inputs: vec![
                    FuzzySet::input("Service_Poor")
                        .with_shape(ShapeKind::Saturation, vec![0.0, 50.0]),
                    FuzzySet::input("Food_Good")
                        .with_shape(ShapeKind::Saturation, vec![100.0, 50.0]),
                    FuzzySet::input("Ambience_Nice")
                        .with_shape(ShapeKind::Saturation, vec![100.0, 50.0]),
                ],
                outputs: vec![FuzzySet::output("Tip_Low"), FuzzySet::output("Tip_High")],
            },
            rules: [
                "IF Service_Poor THEN Tip_Low",
                "IF Food_Good OR Ambience_Nice THEN Tip_High",
            ]
            .into_iter()
            .collect(),
        }
    }

    #[test]
    fn test_fuzzify_routes_by_name() {
        let mut defs = definitions();
        let degrees = defs.fuzzify(&Config::default());

        assert_eq!(degrees.len(), 2);
        assert_eq!(degrees["Service_Poor"], 1.0 - 0.8);
        assert_eq!(degrees["Food_Good"], 0.2);
        assert!(!degrees.contains_key("Ambience_Nice"));
        assert_eq!(defs.sets.inputs[2].degree(), None);
    }

    #[test]
    fn test_infer_uses_routed_inputs() {
        let mut defs = definitions();
        let mut config = Config::default();
        config.set_input("service", 0.0).unwrap();
        config.set_input("food", 100.0).unwrap();

        let output = defs.infer(&config);
        assert_eq!(output["Tip_Low"], 1.0);
        assert_eq!(output["Tip_High"], 1.0);
    }

    #[test]
    fn test_missing_files_give_empty_definitions() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            variables_file: dir.path().join("variables.txt"),
            rules_file: dir.path().join("rules.txt"),
            ..Config::default()
        };

        let mut defs = Definitions::load(&config);
        assert!(defs.sets.is_empty());
        assert!(defs.rules.is_empty());
        assert!(defs.infer(&config).is_empty());

        assert!(Definitions::load_strict(&config).is_err());
    }

    #[test]
    fn test_load_from_files() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            variables_file: dir.path().join("variables.txt"),
            rules_file: dir.path().join("rules.txt"),
            ..Config::default()
        };
        fs::write(&config.variables_file, "Service_Good SAT 100 50\nTip_High\n").unwrap();
        fs::write(&config.rules_file, "IF Service_Good THEN Tip_High\n").unwrap();

        let mut defs = Definitions::load_strict(&config).unwrap();
        let output = defs.infer(&config);
        assert_eq!(output.len(), 1);
        assert_eq!(output["Tip_High"], 0.0);
    }
}
