//! Fuzzy norms
//!
//! Conjunction is the minimum, disjunction the maximum. NaN propagates: if
//! either operand is NaN the result is NaN, unlike `f64::min`/`f64::max`
//! which drop it.

/// Fuzzy AND (minimum t-norm)
pub fn fuzzy_and(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

/// Fuzzy OR (maximum t-conorm)
pub fn fuzzy_or(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

/// AND over a slice of degrees. `None` for an empty slice.
pub fn and_all(degrees: &[f64]) -> Option<f64> {
    degrees.iter().copied().reduce(fuzzy_and)
}

/// OR over a slice of degrees. `None` for an empty slice.
pub fn or_all(degrees: &[f64]) -> Option<f64> {
    degrees.iter().copied().reduce(fuzzy_or)
}

/// Connector between two antecedent terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    /// Conjunction, folded with [`fuzzy_and`]
    And,
    /// Disjunction, folded with [`fuzzy_or`]
    Or,
}

impl Connector {
    /// Combine the running accumulator with the next term's degree
    pub fn apply(self, accumulator: f64, degree: f64) -> f64 {
        match self {
            Connector::And => fuzzy_and(degree, accumulator),
            Connector::Or => fuzzy_or(degree, accumulator),
        }
    }
}
