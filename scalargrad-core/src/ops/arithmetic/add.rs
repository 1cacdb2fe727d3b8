// scalargrad-core/src/ops/arithmetic/add.rs

use crate::autograd::{Graph, NodeId, OpKind};
use crate::error::ScalarGradError;
use crate::ops::{apply_binary_op, Operand};

/// Computes \( a + b \).
///
/// Backward: both operands receive the output gradient unchanged,
/// \( \frac{dL}{da} = \frac{dL}{db} = \frac{dL}{dz} \).
///
/// # Errors
/// `InvalidNode` for unknown ids, `DomainError` under the strict policy if the sum
/// overflows or a literal is not finite.
pub fn add_op(
    graph: &mut Graph,
    a: impl Into<Operand>,
    b: impl Into<Operand>,
) -> Result<NodeId, ScalarGradError> {
    apply_binary_op(graph, OpKind::Add, a.into(), b.into())
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
