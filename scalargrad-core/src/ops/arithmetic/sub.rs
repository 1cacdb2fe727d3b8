// scalargrad-core/src/ops/arithmetic/sub.rs

use crate::autograd::{Graph, NodeId, OpKind};
use crate::error::ScalarGradError;
use crate::ops::{apply_binary_op, Operand};

/// Computes \( a - b \).
///
/// Backward: \( \frac{dL}{da} = \frac{dL}{dz} \) and \( \frac{dL}{db} = -\frac{dL}{dz} \).
///
/// A literal on the left (`2 - x`) is just `sub_op(graph, 2.0, x)`.
pub fn sub_op(
    graph: &mut Graph,
    a: impl Into<Operand>,
    b: impl Into<Operand>,
) -> Result<NodeId, ScalarGradError> {
    apply_binary_op(graph, OpKind::Sub, a.into(), b.into())
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
