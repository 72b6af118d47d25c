//! Fuzzy-set definition files
//!
//! One set per line: `<name> <SHAPE> <p1> [p2] [p3] [p4]`, or a bare
//! `<name>`. Names containing the output marker are output sets.

use crate::{content_lines, read_file, LoadError};
use mamdani_domain::{FuzzySet, ShapeKind};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// Substring that marks a set as an output set
pub const DEFAULT_OUTPUT_MARKER: &str = "Tip";

/// Sets read from a definition file, split by side
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FuzzySets {
    /// Sets evaluated against crisp inputs
    pub inputs: Vec<FuzzySet>,
    /// Targets of rule consequents
    pub outputs: Vec<FuzzySet>,
}

impl FuzzySets {
    /// Total number of sets
    pub fn len(&self) -> usize {
        self.inputs.len() + self.outputs.len()
    }

    /// Whether no set was read
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty()
    }

    fn push(&mut self, set: FuzzySet) {
        if set.is_input() {
            self.inputs.push(set);
        } else {
            self.outputs.push(set);
        }
    }
}

/// Read fuzzy-set definitions from `path`
pub fn read_fuzzy_sets(
    path: impl AsRef<Path>,
    output_marker: &str,
) -> Result<FuzzySets, LoadError> {
    let path = path.as_ref();
    let sets = parse_fuzzy_sets(&read_file(path)?, output_marker);
    info!(
        "Loaded {} input and {} output fuzzy sets from {}",
        sets.inputs.len(),
        sets.outputs.len(),
        path.display()
    );
    Ok(sets)
}

/// Parse fuzzy-set definitions.
///
/// Malformed lines are logged and skipped or degraded; this never fails.
pub fn parse_fuzzy_sets(text: &str, output_marker: &str) -> FuzzySets {
    let mut sets = FuzzySets::default();
    let mut seen = HashSet::new();

    for (line_no, line) in content_lines(text) {
        let Some(set) = parse_set_line(line_no, line, output_marker) else {
            continue;
        };
        if !seen.insert(set.name().to_string()) {
            warn!("Line {}: fuzzy set '{}' is defined more than once", line_no, set.name());
        }
        sets.push(set);
    }

    sets
}

fn parse_set_line(line_no: usize, line: &str, output_marker: &str) -> Option<FuzzySet> {
    let mut words = line.split_whitespace();
    let name = words.next()?;
    let set = FuzzySet::classify(name, output_marker);

    let Some(keyword) = words.next() else {
        return Some(set);
    };

    let mut params = Vec::new();
    for word in words {
        match word.parse::<f64>() {
            Ok(value) => params.push(value),
            Err(_) => {
                warn!(
                    "Line {}: invalid parameter '{}' for fuzzy set '{}', skipping line",
                    line_no, word, name
                );
                return None;
            }
        }
    }

    let Some(kind) = ShapeKind::parse(keyword) else {
        warn!(
            "Line {}: unknown membership shape '{}' for fuzzy set '{}'",
            line_no, keyword, name
        );
        return Some(set);
    };

    let arity = kind.arity();
    if params.len() > arity {
        warn!(
            "Line {}: {} takes {} parameters, ignoring {} extra for '{}'",
            line_no,
            kind,
            arity,
            params.len() - arity,
            name
        );
        params.truncate(arity);
    } else if params.len() < arity {
        warn!(
            "Line {}: {} takes {} parameters but '{}' has {}; it will evaluate to 0",
            line_no,
            kind,
            arity,
            name,
            params.len()
        );
    }

    Some(set.with_shape(kind, params))
}
