//! Fuzzification of crisp values

use crate::fuzzy_set::FuzzySet;
use std::collections::BTreeMap;

/// Degree of membership keyed by fuzzy-set name
pub type DegreeMap = BTreeMap<String, f64>;

/// Records the degree of each fuzzified input set under the set's name
#[derive(Debug, Clone, Default)]
pub struct Fuzzifier {
    degrees: DegreeMap,
}

impl Fuzzifier {
    /// Create an empty fuzzifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate `set` at `crisp`, cache the degree on the set and record it.
    ///
    /// Output sets are left untouched and `None` is returned.
    pub fn fuzzify(&mut self, set: &mut FuzzySet, crisp: f64) -> Option<f64> {
        let degree = set.fuzzify(crisp)?;
        self.degrees.insert(set.name().to_string(), degree);
        Some(degree)
    }

    /// Degrees recorded so far
    pub fn degrees(&self) -> &DegreeMap {
        &self.degrees
    }

    /// Consume the fuzzifier, returning the finished degree map
    pub fn into_degrees(self) -> DegreeMap {
        self.degrees
    }
}

/// Collect the cached degrees of every fuzzified input set
pub fn collect_degrees<'a>(sets: impl IntoIterator<Item = &'a FuzzySet>) -> DegreeMap {
    sets.into_iter()
        .filter_map(|set| set.degree().map(|degree| (set.name().to_string(), degree)))
        .collect()
}
