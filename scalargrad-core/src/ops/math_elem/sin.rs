// scalargrad-core/src/ops/math_elem/sin.rs

use crate::autograd::{Graph, NodeId, OpKind};
use crate::error::ScalarGradError;
use crate::ops::{apply_unary_op, Operand};

/// Computes \( \sin(a) \). Backward: \( \frac{dL}{da} = \frac{dL}{dz} \cdot \cos(a) \).
pub fn sin_op(graph: &mut Graph, a: impl Into<Operand>) -> Result<NodeId, ScalarGradError> {
    apply_unary_op(graph, OpKind::Sin, a.into())
}

#[cfg(test)]
#[path = "trig_test.rs"]
mod tests;
