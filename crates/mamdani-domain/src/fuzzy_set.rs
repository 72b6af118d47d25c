//! Fuzzy set module
//!
//! A fuzzy set binds a name to a membership shape. Input sets are evaluated
//! against crisp values and cache the resulting degree; output sets are only
//! named targets of inference and always evaluate to 0.

use crate::membership::{MembershipShape, ShapeKind};

/// Membership function tag plus its raw parameter list.
///
/// No arity check happens when this is stored; a mismatch shows up only when
/// the set is evaluated, as a degree of 0.
#[derive(Debug, Clone, PartialEq)]
pub struct MembershipSpec {
    /// Shape tag
    pub kind: ShapeKind,
    /// Parameters in definition order
    pub params: Vec<f64>,
}

impl MembershipSpec {
    /// Create a new spec
    pub fn new(kind: ShapeKind, params: Vec<f64>) -> Self {
        Self { kind, params }
    }

    /// The typed shape, if the parameter count matches the tag
    pub fn shape(&self) -> Option<MembershipShape> {
        MembershipShape::from_params(self.kind, &self.params)
    }
}

/// Which side of the inference a set sits on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FuzzySetKind {
    /// Evaluated against a crisp value
    Input {
        /// Degree from the last fuzzification
        degree: Option<f64>,
    },
    /// Target of rule consequents, never evaluated
    Output,
}

/// A named fuzzy set
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzySet {
    name: String,
    membership: Option<MembershipSpec>,
    kind: FuzzySetKind,
}

impl FuzzySet {
    /// Create an input set without a shape
    pub fn input(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            membership: None,
            kind: FuzzySetKind::Input { degree: None },
        }
    }

    /// Create an output set without a shape
    pub fn output(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            membership: None,
            kind: FuzzySetKind::Output,
        }
    }

    /// Create a set whose side is decided by `marker`: names containing it are
    /// outputs, all others inputs.
    pub fn classify(name: impl Into<String>, marker: &str) -> Self {
        let name = name.into();
        if name.contains(marker) {
            Self::output(name)
        } else {
            Self::input(name)
        }
    }

    /// Builder form of [`FuzzySet::set_shape`]
    pub fn with_shape(mut self, kind: ShapeKind, params: Vec<f64>) -> Self {
        self.set_shape(kind, params);
        self
    }

    /// Store the membership function tag and parameters
    pub fn set_shape(&mut self, kind: ShapeKind, params: Vec<f64>) {
        self.membership = Some(MembershipSpec::new(kind, params));
    }

    /// Set name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Input or output side
    pub fn kind(&self) -> &FuzzySetKind {
        &self.kind
    }

    /// Whether this is an input set
    pub fn is_input(&self) -> bool {
        matches!(self.kind, FuzzySetKind::Input { .. })
    }

    /// Stored membership function, if any
    pub fn membership(&self) -> Option<&MembershipSpec> {
        self.membership.as_ref()
    }

    /// Stored parameters (empty when no shape was set)
    pub fn params(&self) -> &[f64] {
        self.membership.as_ref().map(|m| m.params.as_slice()).unwrap_or(&[])
    }

    /// Label of the membership function, `"Unknown"` when none was set
    pub fn shape_label(&self) -> &'static str {
        self.membership.as_ref().map(|m| m.kind.label()).unwrap_or("Unknown")
    }

    /// Degree cached by the last fuzzification (always `None` for outputs)
    pub fn degree(&self) -> Option<f64> {
        match self.kind {
            FuzzySetKind::Input { degree } => degree,
            FuzzySetKind::Output => None,
        }
    }

    /// Degree of membership of `x`.
    ///
    /// Yields 0 for output sets, sets without a shape, and parameter lists
    /// whose length does not match the shape.
    pub fn evaluate(&self, x: f64) -> f64 {
        match self.kind {
            FuzzySetKind::Output => 0.0,
            FuzzySetKind::Input { .. } => self
                .membership
                .as_ref()
                .and_then(MembershipSpec::shape)
                .map(|shape| shape.evaluate(x))
                .unwrap_or(0.0),
        }
    }

    /// Evaluate `x` and cache the degree. Returns `None` for output sets.
    pub(crate) fn fuzzify(&mut self, x: f64) -> Option<f64> {
        let value = self.evaluate(x);
        match &mut self.kind {
            FuzzySetKind::Input { degree } => {
                *degree = Some(value);
                Some(value)
            }
            FuzzySetKind::Output => None,
        }
    }
}
