// scalargrad-core/src/ops/arithmetic/pow.rs

use crate::autograd::{Graph, NodeId, OpKind};
use crate::error::ScalarGradError;
use crate::ops::{apply_op, Operand};

/// Raises `base` to the power `exponent`, \( z = x^y \).
///
/// Backward:
/// \\[ \frac{dL}{dx} = \frac{dL}{dz} \cdot y \cdot x^{y-1}, \qquad
///     \frac{dL}{dy} = \frac{dL}{dz} \cdot x^y \cdot \ln x \\]
///
/// # Domain Considerations
/// Under the strict policy the call fails with `DomainError` when:
/// * the base is negative and the exponent is not an integer (no real result),
/// * the base is zero and the exponent is negative (division by zero),
/// * the exponent is trainable and the base is not strictly positive, since
///   \( \ln x \) is then undefined,
/// * the result, or the derivative for a trainable base, is not finite
///   (e.g. \( \sqrt{x} \) at \( x = 0 \) on a trainable base).
pub fn pow_op(
    graph: &mut Graph,
    base: impl Into<Operand>,
    exponent: impl Into<Operand>,
) -> Result<NodeId, ScalarGradError> {
    apply_op(
        graph,
        OpKind::Pow,
        &[base.into(), exponent.into()],
        |operands| {
            let (x, y) = (operands[0].value, operands[1].value);
            if x < 0.0 && y.fract() != 0.0 {
                return Err(format!(
                    "negative base {x} with non-integer exponent {y} has no real result"
                ));
            }
            if x == 0.0 && y < 0.0 {
                return Err(format!("zero base with negative exponent {y}"));
            }
            if operands[1].trainable && x <= 0.0 {
                return Err(format!(
                    "derivative with respect to the exponent needs ln(base), undefined for base {x}"
                ));
            }
            Ok(())
        },
    )
}

#[cfg(test)]
#[path = "pow_test.rs"]
mod tests;
