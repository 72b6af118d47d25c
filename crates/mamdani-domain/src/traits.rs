//! Trait definitions for external interactions
//!
//! The inference core does no I/O. Callers that want to narrate evaluation
//! (logging, tracing, step-by-step reports) implement [`InferenceObserver`].

use crate::rule::{Rule, RuleFiring};

/// Hook notified while a rule base is evaluated.
///
/// Every method has an empty default so implementors only override what they
/// need. `index` is the rule's position in its rule base.
pub trait InferenceObserver {
    /// A rule is about to be evaluated
    fn on_rule_start(&mut self, _index: usize, _rule: &Rule) {}

    /// A recognised term was folded into the accumulator
    fn on_term(&mut self, _index: usize, _name: &str, _degree: f64, _accumulator: f64) {}

    /// A term had no recorded degree and was skipped
    fn on_unknown_term(&mut self, _index: usize, _name: &str) {}

    /// A rule finished evaluating
    fn on_firing(&mut self, _index: usize, _firing: &RuleFiring) {}
}

/// Observer that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl InferenceObserver for NoopObserver {}
