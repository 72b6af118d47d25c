//! Mamdani Domain Layer
//!
//! The fuzzy inference core: membership functions, fuzzy sets, fuzzification
//! and Mamdani rule evaluation. Everything here is pure computation over
//! in-memory data. Reading definition files, reporting and choosing which
//! crisp value feeds which set live in other crates.
//!
//! ## Key Concepts
//!
//! - **Membership shape**: triangular, trapezoidal, saturation or Gaussian
//! - **Fuzzy set**: a named shape, either an input or an output
//! - **Degree map**: set name → degree after fuzzification
//! - **Rule**: `IF <term> (AND|OR <term>)* THEN <output>`, folded left to right
//! - **Output degree map**: output name → max firing strength over its rules
//!
//! ## Degradation
//!
//! Inference never fails. Wrong parameter counts evaluate to 0, unknown
//! antecedent terms are skipped, rules without `THEN` contribute nothing, and
//! NaN (e.g. from a zero-width Gaussian) propagates through every fold.
//! [`Rule::check`] and [`RuleBase::check`] report these problems on request.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod fuzzifier;
pub mod fuzzy_set;
pub mod inference;
pub mod membership;
pub mod ops;
pub mod rule;
pub mod traits;

// Re-exports for convenience
pub use fuzzifier::{collect_degrees, DegreeMap, Fuzzifier};
pub use fuzzy_set::{FuzzySet, FuzzySetKind, MembershipSpec};
pub use inference::{aggregate, OutputDegreeMap, RuleBase, RuleIssue};
pub use membership::{MembershipShape, ShapeKind};
pub use ops::Connector;
pub use rule::{Rule, RuleError, RuleFiring, Token};
pub use traits::{InferenceObserver, NoopObserver};
