//! Mamdani inference over a rule base
//!
//! Each rule contributes `(output, strength)`; the result for an output set
//! is the maximum strength among the rules naming it, starting from 0.
//! Aggregation is a max-reduce per output, so it does not depend on rule
//! order.

use crate::fuzzifier::DegreeMap;
use crate::ops::fuzzy_or;
use crate::rule::{Rule, RuleError, RuleFiring, Token};
use crate::traits::{InferenceObserver, NoopObserver};
use std::collections::BTreeMap;

/// Aggregated degree keyed by output-set name
pub type OutputDegreeMap = BTreeMap<String, f64>;

/// A problem found by [`RuleBase::check`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleIssue {
    /// Position of the rule in the rule base
    pub index: usize,
    /// The offending rule text
    pub rule: String,
    /// What is wrong with it
    pub error: RuleError,
}

/// Ordered collection of rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleBase {
    rules: Vec<Rule>,
}

impl RuleBase {
    /// Create an empty rule base
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule. No validation is performed.
    pub fn add_rule(&mut self, rule: impl Into<Rule>) {
        self.rules.push(rule.into());
    }

    /// Rules in insertion order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the rule base has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate every rule, in order
    pub fn fire(&self, degrees: &DegreeMap) -> Vec<RuleFiring> {
        self.fire_observed(degrees, &mut NoopObserver)
    }

    /// [`RuleBase::fire`] reporting each step to `observer`
    pub fn fire_observed(
        &self,
        degrees: &DegreeMap,
        observer: &mut dyn InferenceObserver,
    ) -> Vec<RuleFiring> {
        self.rules
            .iter()
            .enumerate()
            .map(|(index, rule)| {
                observer.on_rule_start(index, rule);
                let firing = rule.evaluate_observed(index, degrees, &mut *observer);
                observer.on_firing(index, &firing);
                firing
            })
            .collect()
    }

    /// Run Mamdani inference: fire all rules and max-aggregate per output
    pub fn infer(&self, degrees: &DegreeMap) -> OutputDegreeMap {
        aggregate(&self.fire(degrees))
    }

    /// [`RuleBase::infer`] reporting each step to `observer`
    pub fn infer_observed(
        &self,
        degrees: &DegreeMap,
        observer: &mut dyn InferenceObserver,
    ) -> OutputDegreeMap {
        aggregate(&self.fire_observed(degrees, observer))
    }

    /// Strict check of every rule.
    ///
    /// Reports syntax problems, then antecedent terms missing from `degrees`.
    /// Inference results are unaffected by anything reported here.
    pub fn check(&self, degrees: &DegreeMap) -> Vec<RuleIssue> {
        let mut issues = Vec::new();

        for (index, rule) in self.rules.iter().enumerate() {
            let issue = |error| RuleIssue {
                index,
                rule: rule.to_string(),
                error,
            };

            if let Err(error) = rule.check() {
                issues.push(issue(error));
                continue;
            }

            for token in rule.tokens() {
                if let Token::Term(name) = token {
                    if !degrees.contains_key(name) {
                        issues.push(issue(RuleError::UnknownTerm(name.to_string())));
                    }
                }
            }
        }

        issues
    }
}

impl<R: Into<Rule>> FromIterator<R> for RuleBase {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Max-aggregate rule firings per output set.
///
/// Firings without a consequent are dropped. Each output starts at 0, so a
/// negative strength from malformed parameters reports as 0; NaN propagates.
pub fn aggregate(firings: &[RuleFiring]) -> OutputDegreeMap {
    let mut output = OutputDegreeMap::new();

    for firing in firings {
        let Some(name) = &firing.consequent else {
            continue;
        };
        let degree = output.entry(name.clone()).or_insert(0.0);
        *degree = fuzzy_or(*degree, firing.strength);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn degrees(pairs: &[(&str, f64)]) -> DegreeMap {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_max_aggregation_across_rules() {
        let d = degrees(&[("A", 0.3), ("B", 0.6)]);
        let rules: RuleBase = ["IF A THEN Tip_Low", "IF B THEN Tip_Low"].into_iter().collect();
        let output = rules.infer(&d);
        assert_eq!(output.len(), 1);
        assert_eq!(output["Tip_Low"], 0.6);
    }

    #[test]
    fn test_aggregation_is_order_independent() {
        let d = degrees(&[("A", 0.3), ("B", 0.6), ("C", 0.1)]);
        let forward: RuleBase = ["IF A THEN Tip_Low", "IF B THEN Tip_Low", "IF C THEN Tip_High"]
            .into_iter()
            .collect();
        let backward: RuleBase = ["IF C THEN Tip_High", "IF B THEN Tip_Low", "IF A THEN Tip_Low"]
            .into_iter()
            .collect();
        assert_eq!(forward.infer(&d), backward.infer(&d));
    }

    #[test]
    fn test_tipping_rule_base() {
        let d = degrees(&[
            ("Service_Poor", 0.2),
            ("Service_Average", 0.8),
            ("Service_Good", 0.0),
            ("Food_Poor", 0.0),
            ("Food_Average", 0.8),
            ("Food_Good", 0.2),
        ]);
        let rules: RuleBase = [
            "IF Service_Poor OR Food_Poor THEN Tip_Low",
            "IF Service_Average AND Food_Average THEN Tip_Medium",
            "IF Service_Good OR Food_Good THEN Tip_High",
        ]
        .into_iter()
        .collect();

        let output = rules.infer(&d);
        assert_eq!(output["Tip_Low"], 0.2);
        assert_eq!(output["Tip_Medium"], 0.8);
        assert_eq!(output["Tip_High"], 0.2);
    }

    #[test]
    fn test_rules_without_consequent_are_dropped() {
        let d = degrees(&[("A", 0.9)]);
        let rules: RuleBase = ["IF A Tip_Low", "", "IF A THEN Tip_High"].into_iter().collect();
        let output = rules.infer(&d);
        assert_eq!(output.len(), 1);
        assert_eq!(output["Tip_High"], 0.9);
    }

    #[test]
    fn test_empty_rule_base() {
        assert!(RuleBase::new().infer(&degrees(&[("A", 1.0)])).is_empty());
        assert!(RuleBase::new().is_empty());
    }

    #[test]
    fn test_unknown_terms_do_not_raise() {
        let rules: RuleBase = ["IF Nobody AND Knows THEN Tip_Low"].into_iter().collect();
        let output = rules.infer(&DegreeMap::new());
        assert_eq!(output["Tip_Low"], 0.0);
    }

    #[test]
    fn test_aggregation_floor_is_zero() {
        let firings = [RuleFiring {
            consequent: Some("Tip_Low".to_string()),
            strength: -0.4,
        }];
        assert_eq!(aggregate(&firings)["Tip_Low"], 0.0);
    }

    #[test]
    fn test_nan_propagates_through_aggregation() {
        let firings = [
            RuleFiring {
                consequent: Some("Tip_Low".to_string()),
                strength: 0.7,
            },
            RuleFiring {
                consequent: Some("Tip_Low".to_string()),
                strength: f64::NAN,
            },
        ];
        assert!(aggregate(&firings)["Tip_Low"].is_nan());
    }

    #[test]
    fn test_observer_sees_every_step() {
        #[derive(Default)]
        struct Recorder {
            started: Vec<usize>,
            terms: Vec<(usize, String, f64)>,
            unknown: Vec<String>,
            fired: Vec<(usize, Option<String>, f64)>,
        }

        impl InferenceObserver for Recorder {
            fn on_rule_start(&mut self, index: usize, _rule: &Rule) {
                self.started.push(index);
            }

            fn on_term(&mut self, index: usize, name: &str, _degree: f64, accumulator: f64) {
                self.terms.push((index, name.to_string(), accumulator));
            }

            fn on_unknown_term(&mut self, _index: usize, name: &str) {
                self.unknown.push(name.to_string());
            }

            fn on_firing(&mut self, index: usize, firing: &RuleFiring) {
                self.fired
                    .push((index, firing.consequent.clone(), firing.strength));
            }
        }

        let d = degrees(&[("A", 0.2), ("B", 0.9)]);
        let rules: RuleBase = ["IF A AND B THEN X", "IF Ghost OR B THEN Y"].into_iter().collect();
        let mut recorder = Recorder::default();
        let output = rules.infer_observed(&d, &mut recorder);

        assert_eq!(recorder.started, vec![0, 1]);
        assert_eq!(
            recorder.terms,
            vec![
                (0, "A".to_string(), 0.2),
                (0, "B".to_string(), 0.2),
                (1, "B".to_string(), 0.9),
            ]
        );
        assert_eq!(recorder.unknown, vec!["Ghost".to_string()]);
        assert_eq!(recorder.fired[1], (1, Some("Y".to_string()), 0.9));
        assert_eq!(output, rules.infer(&d));
    }

    #[test]
    fn test_check_reports_syntax_and_unknown_terms() {
        let d = degrees(&[("A", 0.2), ("B", 0.9)]);
        let rules: RuleBase = ["IF A AND B THEN X", "IF A AND Ghost THEN Y", "IF B"]
            .into_iter()
            .collect();
        let issues = rules.check(&d);

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].index, 1);
        assert_eq!(issues[0].error, RuleError::UnknownTerm("Ghost".to_string()));
        assert_eq!(issues[1].index, 2);
        assert_eq!(issues[1].error, RuleError::MissingThen);
        assert_eq!(issues[1].rule, "IF B");
    }
}
