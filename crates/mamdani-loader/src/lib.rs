//! Mamdani Loader
//!
//! Reads fuzzy-set and rule definitions from line-oriented text files.
//!
//! Loading is tolerant: a malformed line is logged with `tracing::warn!` and
//! skipped or degraded, never fatal. Only a file that cannot be read at all
//! is reported as an error, and callers are expected to carry on with an
//! empty collection in that case.
//!
//! # Examples
//!
//! ```
//! use mamdani_loader::{parse_fuzzy_sets, parse_rules, DEFAULT_OUTPUT_MARKER};
//! use mamdani_domain::Fuzzifier;
//!
//! let mut sets = parse_fuzzy_sets("Service_Poor SAT 0 50\nTip_Low", DEFAULT_OUTPUT_MARKER);
//! let rules = parse_rules("IF Service_Poor THEN Tip_Low");
//!
//! let mut fuzzifier = Fuzzifier::new();
//! for set in &mut sets.inputs {
//!     fuzzifier.fuzzify(set, 25.0);
//! }
//! let output = rules.infer(fuzzifier.degrees());
//! assert_eq!(output["Tip_Low"], 0.5);
//! ```

#![warn(missing_docs)]

mod error;
mod rules;
mod sets;

pub use error::LoadError;
pub use rules::{parse_rules, read_rules};
pub use sets::{parse_fuzzy_sets, read_fuzzy_sets, FuzzySets, DEFAULT_OUTPUT_MARKER};

use std::path::Path;

/// Read a whole definition file
pub(crate) fn read_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Lines worth parsing: 1-based line number and trimmed text, skipping blank
/// lines and `#` comments
pub(crate) fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}
