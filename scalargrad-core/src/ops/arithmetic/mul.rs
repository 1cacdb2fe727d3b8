// scalargrad-core/src/ops/arithmetic/mul.rs

use crate::autograd::{Graph, NodeId, OpKind};
use crate::error::ScalarGradError;
use crate::ops::{apply_binary_op, Operand};

/// Computes \( a \cdot b \).
///
/// Backward (product rule): \( \frac{dL}{da} = \frac{dL}{dz} \cdot b \) and
/// \( \frac{dL}{db} = \frac{dL}{dz} \cdot a \).
pub fn mul_op(
    graph: &mut Graph,
    a: impl Into<Operand>,
    b: impl Into<Operand>,
) -> Result<NodeId, ScalarGradError> {
    apply_binary_op(graph, OpKind::Mul, a.into(), b.into())
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
