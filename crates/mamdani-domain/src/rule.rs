//! Rule text, tokenizer and antecedent evaluation
//!
//! A rule reads `IF <term> (AND|OR <term>)* THEN <output>`. Keywords match
//! case-insensitively. Rules are kept as text and tokenized on demand; the
//! antecedent is folded strictly left to right with no operator precedence,
//! so `A AND B OR C` is `max(C, min(B, A))`.

use crate::fuzzifier::DegreeMap;
use crate::ops::Connector;
use crate::traits::InferenceObserver;
use std::fmt;
use thiserror::Error;

/// One token of a rule line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Leading `IF`
    If,
    /// `AND` or `OR`
    Connector(Connector),
    /// Fuzzy-set reference in the antecedent
    Term(&'a str),
    /// `THEN`, closing the antecedent
    Then,
    /// Output-set name: everything after `THEN`, trimmed
    Consequent(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Antecedent,
    Consequent,
    Done,
}

/// Tokenizer over a single rule line
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
    phase: Phase,
    leading: bool,
}

impl<'a> Tokens<'a> {
    /// Start tokenizing `text`
    pub fn new(text: &'a str) -> Self {
        Self {
            rest: text,
            phase: Phase::Antecedent,
            leading: true,
        }
    }

    fn next_word(&mut self) -> Option<&'a str> {
        let trimmed = self.rest.trim_start();
        if trimmed.is_empty() {
            self.rest = trimmed;
            return None;
        }
        let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
        let (word, rest) = trimmed.split_at(end);
        self.rest = rest;
        Some(word)
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.phase {
            Phase::Antecedent => {
                let Some(word) = self.next_word() else {
                    self.phase = Phase::Done;
                    return None;
                };
                let leading = std::mem::replace(&mut self.leading, false);

                let token = if leading && word.eq_ignore_ascii_case("IF") {
                    Token::If
                } else if word.eq_ignore_ascii_case("AND") {
                    Token::Connector(Connector::And)
                } else if word.eq_ignore_ascii_case("OR") {
                    Token::Connector(Connector::Or)
                } else if word.eq_ignore_ascii_case("THEN") {
                    self.phase = Phase::Consequent;
                    Token::Then
                } else {
                    Token::Term(word)
                };
                Some(token)
            }
            Phase::Consequent => {
                self.phase = Phase::Done;
                let consequent = self.rest.trim();
                self.rest = "";
                if consequent.is_empty() {
                    None
                } else {
                    Some(Token::Consequent(consequent))
                }
            }
            Phase::Done => None,
        }
    }
}

/// Problems reported by the strict rule check.
///
/// Inference never raises these; they only come from [`Rule::check`] and
/// [`crate::RuleBase::check`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// Blank rule line
    #[error("rule is empty")]
    Empty,

    /// First word is not `IF`
    #[error("rule does not start with IF")]
    MissingIf,

    /// No `THEN` keyword
    #[error("rule has no THEN keyword")]
    MissingThen,

    /// Nothing after `THEN`
    #[error("rule has no output set after THEN")]
    MissingConsequent,

    /// No terms between `IF` and `THEN`
    #[error("rule has no antecedent terms")]
    EmptyAntecedent,

    /// Connector without a term on both sides
    #[error("connector {0} is not between two terms")]
    DanglingConnector(String),

    /// Antecedent names a set without a recorded degree
    #[error("unknown fuzzy set '{0}' in antecedent")]
    UnknownTerm(String),
}

/// Result of evaluating one rule
#[derive(Debug, Clone, PartialEq)]
pub struct RuleFiring {
    /// Output-set name, `None` if the rule has no consequent
    pub consequent: Option<String>,
    /// Folded antecedent degree, 0 when no term was recognised
    pub strength: f64,
}

/// A rule line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule(String);

impl Rule {
    /// Wrap a rule line. No validation happens here.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Rule text as given
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Tokenize the rule
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens::new(&self.0)
    }

    /// Output-set name after `THEN`, if any
    pub fn consequent(&self) -> Option<&str> {
        self.tokens().find_map(|token| match token {
            Token::Consequent(name) => Some(name),
            _ => None,
        })
    }

    /// Evaluate the rule against `degrees`.
    ///
    /// Never fails: unknown terms are skipped, and a rule without recognised
    /// terms fires at 0.
    pub fn evaluate(&self, degrees: &DegreeMap) -> RuleFiring {
        self.evaluate_observed(0, degrees, &mut crate::traits::NoopObserver)
    }

    /// [`Rule::evaluate`] reporting each step to `observer`
    pub fn evaluate_observed(
        &self,
        index: usize,
        degrees: &DegreeMap,
        observer: &mut dyn InferenceObserver,
    ) -> RuleFiring {
        let mut accumulator: Option<f64> = None;
        let mut pending: Option<Connector> = None;
        let mut consequent = None;

        for token in self.tokens() {
            match token {
                Token::If | Token::Then => {}
                Token::Connector(connector) => pending = Some(connector),
                Token::Term(name) => {
                    let Some(&degree) = degrees.get(name) else {
                        observer.on_unknown_term(index, name);
                        continue;
                    };
                    let next = match (accumulator, pending.take()) {
                        (Some(acc), Some(connector)) => connector.apply(acc, degree),
                        _ => degree,
                    };
                    observer.on_term(index, name, degree, next);
                    accumulator = Some(next);
                }
                Token::Consequent(name) => consequent = Some(name.to_string()),
            }
        }

        RuleFiring {
            consequent,
            strength: accumulator.unwrap_or(0.0),
        }
    }

    /// Strict syntax check, reporting the first problem found
    pub fn check(&self) -> Result<(), RuleError> {
        let mut tokens = self.tokens().peekable();

        match tokens.peek() {
            None => return Err(RuleError::Empty),
            Some(Token::If) => {
                tokens.next();
            }
            Some(_) => return Err(RuleError::MissingIf),
        }

        let mut terms = 0usize;
        let mut dangling: Option<Connector> = None;
        let mut saw_then = false;
        let mut consequent = false;

        for token in tokens {
            match token {
                Token::If => {}
                Token::Connector(connector) => {
                    if terms == 0 || dangling.is_some() {
                        return Err(RuleError::DanglingConnector(connector_keyword(connector)));
                    }
                    dangling = Some(connector);
                }
                Token::Term(_) => {
                    terms += 1;
                    dangling = None;
                }
                Token::Then => {
                    if let Some(connector) = dangling {
                        return Err(RuleError::DanglingConnector(connector_keyword(connector)));
                    }
                    saw_then = true;
                }
                Token::Consequent(_) => consequent = true,
            }
        }

        if !saw_then {
            Err(RuleError::MissingThen)
        } else if terms == 0 {
            Err(RuleError::EmptyAntecedent)
        } else if !consequent {
            Err(RuleError::MissingConsequent)
        } else {
            Ok(())
        }
    }
}

fn connector_keyword(connector: Connector) -> String {
    match connector {
        Connector::And => "AND".to_string(),
        Connector::Or => "OR".to_string(),
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Rule {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Rule {
    fn from(text: String) -> Self {
        Self(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn degrees(pairs: &[(&str, f64)]) -> DegreeMap {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_tokenize() {
        let rule = Rule::new("IF Service_Poor and Food_Poor THEN Tip_Low");
        let tokens: Vec<_> = rule.tokens().collect();
        assert_eq!(
            tokens,
            vec![
                Token::If,
                Token::Term("Service_Poor"),
                Token::Connector(Connector::And),
                Token::Term("Food_Poor"),
                Token::Then,
                Token::Consequent("Tip_Low"),
            ]
        );
    }

    #[test]
    fn test_keywords_case_insensitive() {
        let rule = Rule::new("if A Or B then X");
        let tokens: Vec<_> = rule.tokens().collect();
        assert_eq!(tokens[0], Token::If);
        assert_eq!(tokens[2], Token::Connector(Connector::Or));
        assert_eq!(tokens[4], Token::Then);
        assert_eq!(rule.consequent(), Some("X"));
    }

    #[test]
    fn test_consequent_taken_to_end_of_line() {
        let rule = Rule::new("IF A THEN   Tip Very High \r");
        assert_eq!(rule.consequent(), Some("Tip Very High"));
    }

    #[test]
    fn test_and_fold() {
        let d = degrees(&[("A", 0.3), ("B", 0.7), ("C", 0.5)]);
        let firing = Rule::new("IF A AND B AND C THEN X").evaluate(&d);
        assert_eq!(firing.strength, 0.3);
        assert_eq!(firing.consequent.as_deref(), Some("X"));
    }

    #[test]
    fn test_or_fold() {
        let d = degrees(&[("A", 0.3), ("B", 0.7), ("C", 0.5)]);
        assert_eq!(Rule::new("IF A OR B OR C THEN X").evaluate(&d).strength, 0.7);
    }

    #[test]
    fn test_mixed_connectors_fold_left() {
        let d = degrees(&[("A", 0.2), ("B", 0.9), ("C", 0.4)]);
        // max(C, min(B, A)), not min(A, max(B, C))
        assert_eq!(Rule::new("IF A AND B OR C THEN X").evaluate(&d).strength, 0.4);
        assert_eq!(Rule::new("IF C OR B AND A THEN X").evaluate(&d).strength, 0.2);
    }

    #[test]
    fn test_unknown_term_is_skipped() {
        let d = degrees(&[("A", 0.3), ("C", 0.5)]);
        let firing = Rule::new("IF A AND Missing AND C THEN X").evaluate(&d);
        assert_eq!(firing.strength, 0.3);

        // The pending connector survives the skipped term
        let firing = Rule::new("IF A OR Missing C THEN X").evaluate(&d);
        assert_eq!(firing.strength, 0.5);
    }

    #[test]
    fn test_no_recognised_terms_fires_at_zero() {
        let d = degrees(&[("A", 0.3)]);
        let firing = Rule::new("IF Nothing THEN X").evaluate(&d);
        assert_eq!(firing.strength, 0.0);
        assert_eq!(firing.consequent.as_deref(), Some("X"));
    }

    #[test]
    fn test_first_term_ignores_leading_connector() {
        let d = degrees(&[("A", 0.6)]);
        assert_eq!(Rule::new("IF AND A THEN X").evaluate(&d).strength, 0.6);
    }

    #[test]
    fn test_term_without_connector_replaces_accumulator() {
        let d = degrees(&[("A", 0.6), ("B", 0.1)]);
        assert_eq!(Rule::new("IF A B THEN X").evaluate(&d).strength, 0.1);
    }

    #[test]
    fn test_missing_then_has_no_consequent() {
        let d = degrees(&[("A", 0.6)]);
        let firing = Rule::new("IF A Tip_Low").evaluate(&d);
        assert_eq!(firing.consequent, None);
        assert_eq!(firing.strength, 0.6);
    }

    #[test]
    fn test_firing_outlives_rule() {
        let d = degrees(&[("A", 0.4)]);
        let firings: Vec<RuleFiring> = ["IF A THEN X", "IF A THEN Y"]
            .iter()
            .map(|text| Rule::new(*text).evaluate(&d))
            .collect();
        assert_eq!(firings[0].consequent.as_deref(), Some("X"));
        assert_eq!(firings[1].consequent.as_deref(), Some("Y"));
        assert_eq!(firings[1].strength, 0.4);
    }

    #[test]
    fn test_empty_rule() {
        let firing = Rule::new("").evaluate(&DegreeMap::new());
        assert_eq!(firing.consequent, None);
        assert_eq!(firing.strength, 0.0);
    }

    #[test]
    fn test_nan_degree_poisons_fold() {
        let d = degrees(&[("A", 0.3), ("B", f64::NAN)]);
        assert!(Rule::new("IF A AND B THEN X").evaluate(&d).strength.is_nan());
        assert!(Rule::new("IF B OR A THEN X").evaluate(&d).strength.is_nan());
    }

    #[test]
    fn test_check_accepts_well_formed() {
        assert_eq!(Rule::new("IF A AND B OR C THEN Tip_Low").check(), Ok(()));
        assert_eq!(Rule::new("if A then Tip_Low").check(), Ok(()));
    }

    #[test]
    fn test_check_reports_problems() {
        assert_eq!(Rule::new("   ").check(), Err(RuleError::Empty));
        assert_eq!(Rule::new("A THEN X").check(), Err(RuleError::MissingIf));
        assert_eq!(Rule::new("IF A AND B").check(), Err(RuleError::MissingThen));
        assert_eq!(Rule::new("IF A THEN").check(), Err(RuleError::MissingConsequent));
        assert_eq!(Rule::new("IF THEN X").check(), Err(RuleError::EmptyAntecedent));
        assert_eq!(
            Rule::new("IF AND A THEN X").check(),
            Err(RuleError::DanglingConnector("AND".to_string()))
        );
        assert_eq!(
            Rule::new("IF A OR OR B THEN X").check(),
            Err(RuleError::DanglingConnector("OR".to_string()))
        );
    }

    #[test]
    fn test_connector_before_then_is_named() {
        let err = Rule::new("IF A AND B OR THEN X").check().unwrap_err();
        assert_eq!(err, RuleError::DanglingConnector("OR".to_string()));
        assert_eq!(err.to_string(), "connector OR is not between two terms");
        assert_eq!(
            Rule::new("IF A AND THEN X").check(),
            Err(RuleError::DanglingConnector("AND".to_string()))
        );
    }
}
