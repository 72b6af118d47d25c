//! Membership command implementation.

use crate::cli::MembershipArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use mamdani_domain::{MembershipShape, ShapeKind};

/// Execute the membership command.
pub fn execute_membership(args: MembershipArgs, formatter: &Formatter) -> Result<()> {
    let shape = build_shape(args.shape.into(), &args.params)?;
    let samples: Vec<(f64, f64)> = args.points.iter().map(|&x| (x, shape.evaluate(x))).collect();
    println!("{}", formatter.format_membership(&shape, &samples)?);
    Ok(())
}

fn build_shape(kind: ShapeKind, params: &[f64]) -> Result<MembershipShape> {
    MembershipShape::from_params(kind, params).ok_or_else(|| {
        CliError::InvalidInput(format!(
            "{} takes {} parameters, got {}",
            kind.label(),
            kind.arity(),
            params.len()
        ))
    })
}
