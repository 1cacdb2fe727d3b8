// scalargrad-core/src/ops/math_elem/log.rs

use crate::autograd::{Graph, NodeId, OpKind};
use crate::error::ScalarGradError;
use crate::ops::{apply_op, Operand};

/// Computes the natural logarithm \( \ln(a) \).
///
/// Backward: \( \frac{dL}{da} = \frac{dL}{dz} \cdot \frac{1}{a} \).
///
/// # Domain Considerations
/// The natural logarithm is only defined for strictly positive numbers. Under the
/// strict policy a non-positive input fails with `DomainError`; under the propagate
/// policy `ln(0)` is `-inf` and `ln(x < 0)` is `NaN`.
pub fn log_op(graph: &mut Graph, a: impl Into<Operand>) -> Result<NodeId, ScalarGradError> {
    apply_op(graph, OpKind::Log, &[a.into()], |operands| {
        let x = operands[0].value;
        if x <= 0.0 {
            return Err(format!("logarithm of non-positive value {x}"));
        }
        Ok(())
    })
}

#[cfg(test)]
#[path = "log_test.rs"]
mod tests;
