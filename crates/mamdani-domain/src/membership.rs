//! Membership function library
//!
//! Pure functions mapping a crisp value to a degree of membership. Every
//! function is total on the real line. Parameter ordering is expected but
//! never enforced, so inverted bounds produce whatever the formulas yield.

use std::fmt;
use std::str::FromStr;

/// Triangular membership function.
///
/// 0 at or outside `left`/`right`, rising to exactly 1 at `center`
/// (the rising branch includes `center`), falling back to 0 at `right`.
pub fn triangular(left: f64, center: f64, right: f64, x: f64) -> f64 {
    if x <= left || x >= right {
        0.0
    } else if x <= center {
        (x - left) / (center - left)
    } else {
        (right - x) / (right - center)
    }
}

/// Trapezoidal membership function.
///
/// Rises on `(low_left, up_left]`, plateaus at 1 on `(up_left, up_right]`,
/// falls on `(up_right, low_right)`. 0 elsewhere.
pub fn trapezoidal(low_left: f64, up_left: f64, up_right: f64, low_right: f64, x: f64) -> f64 {
    if x <= low_left || x >= low_right {
        0.0
    } else if x <= up_left {
        (x - low_left) / (up_left - low_left)
    } else if x <= up_right {
        1.0
    } else {
        1.0 - ((up_right - x) / (low_right - up_right)).abs()
    }
}

/// Saturation (ramp) membership function.
///
/// The direction follows the sign of `up - down`: with `up < down` the ramp
/// falls (1 at or left of `up`, 0 at or right of `down`); otherwise it rises
/// (1 at or right of `up`, 0 at or left of `down`). `SAT 0 50` is a falling
/// ramp, `SAT 100 50` a rising one.
pub fn saturation(up: f64, down: f64, x: f64) -> f64 {
    if up < down {
        if x <= up {
            1.0
        } else if x >= down {
            0.0
        } else {
            1.0 - ((up - x) / (down - up)).abs()
        }
    } else if x >= up {
        1.0
    } else if x <= down {
        0.0
    } else {
        (x - down) / (up - down)
    }
}

/// Gaussian membership function: `exp(-((x - center) / sqrt(2 * width))^2)`.
///
/// A zero `width` is not guarded: the result is NaN at `center` and 0
/// everywhere else.
pub fn gaussian(center: f64, width: f64, x: f64) -> f64 {
    (-((x - center) / (2.0 * width).sqrt()).powi(2)).exp()
}

/// Shape tag as written in definition files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// `TRIANG`, three parameters
    Triangular,
    /// `TRAP`, four parameters
    Trapezoidal,
    /// `SAT`, two parameters
    Saturation,
    /// `GAUSS`, two parameters
    Gaussian,
}

impl ShapeKind {
    /// Definition-file keyword
    pub fn keyword(&self) -> &'static str {
        match self {
            ShapeKind::Triangular => "TRIANG",
            ShapeKind::Trapezoidal => "TRAP",
            ShapeKind::Saturation => "SAT",
            ShapeKind::Gaussian => "GAUSS",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Triangular => "Triangular",
            ShapeKind::Trapezoidal => "Trapezoidal",
            ShapeKind::Saturation => "Saturation",
            ShapeKind::Gaussian => "Gaussian",
        }
    }

    /// Number of parameters the shape needs to be evaluated
    pub fn arity(&self) -> usize {
        match self {
            ShapeKind::Triangular => 3,
            ShapeKind::Trapezoidal => 4,
            ShapeKind::Saturation | ShapeKind::Gaussian => 2,
        }
    }

    /// Parse a definition-file keyword (exact, upper case)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "TRIANG" => Some(ShapeKind::Triangular),
            "TRAP" => Some(ShapeKind::Trapezoidal),
            "SAT" => Some(ShapeKind::Saturation),
            "GAUSS" => Some(ShapeKind::Gaussian),
            _ => None,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown membership shape: {}", s))
    }
}

/// A fully parameterised membership shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MembershipShape {
    /// Triangle with `left < center < right`
    Triangular {
        /// Left foot
        left: f64,
        /// Peak
        center: f64,
        /// Right foot
        right: f64,
    },
    /// Trapezoid with ascending corners
    Trapezoidal {
        /// Lower left corner
        low_left: f64,
        /// Upper left corner
        up_left: f64,
        /// Upper right corner
        up_right: f64,
        /// Lower right corner
        low_right: f64,
    },
    /// Ramp between `up` (degree 1) and `down` (degree 0)
    Saturation {
        /// Bound where the degree saturates at 1
        up: f64,
        /// Bound where the degree reaches 0
        down: f64,
    },
    /// Bell curve
    Gaussian {
        /// Peak position
        center: f64,
        /// Spread, expected to be positive
        width: f64,
    },
}

impl MembershipShape {
    /// Build a shape from a tag and a raw parameter list.
    ///
    /// Returns `None` unless `params` has exactly the arity of `kind`.
    pub fn from_params(kind: ShapeKind, params: &[f64]) -> Option<Self> {
        match (kind, params) {
            (ShapeKind::Triangular, &[left, center, right]) => {
                Some(MembershipShape::Triangular { left, center, right })
            }
            (ShapeKind::Trapezoidal, &[low_left, up_left, up_right, low_right]) => {
                Some(MembershipShape::Trapezoidal {
                    low_left,
                    up_left,
                    up_right,
                    low_right,
                })
            }
            (ShapeKind::Saturation, &[up, down]) => Some(MembershipShape::Saturation { up, down }),
            (ShapeKind::Gaussian, &[center, width]) => {
                Some(MembershipShape::Gaussian { center, width })
            }
            _ => None,
        }
    }

    /// The tag of this shape
    pub fn kind(&self) -> ShapeKind {
        match self {
            MembershipShape::Triangular { .. } => ShapeKind::Triangular,
            MembershipShape::Trapezoidal { .. } => ShapeKind::Trapezoidal,
            MembershipShape::Saturation { .. } => ShapeKind::Saturation,
            MembershipShape::Gaussian { .. } => ShapeKind::Gaussian,
        }
    }

    /// Degree of membership of `x`
    pub fn evaluate(&self, x: f64) -> f64 {
        match *self {
            MembershipShape::Triangular { left, center, right } => {
                triangular(left, center, right, x)
            }
            MembershipShape::Trapezoidal {
                low_left,
                up_left,
                up_right,
                low_right,
            } => trapezoidal(low_left, up_left, up_right, low_right, x),
            MembershipShape::Saturation { up, down } => saturation(up, down, x),
            MembershipShape::Gaussian { center, width } => gaussian(center, width, x),
        }
    }
}
