// scalargrad-core/src/ops/arithmetic/neg.rs

use crate::autograd::{Graph, NodeId, OpKind};
use crate::error::ScalarGradError;
use crate::ops::{apply_unary_op, Operand};

/// Computes \( -a \). Backward: \( \frac{dL}{da} = -\frac{dL}{dz} \).
pub fn neg_op(graph: &mut Graph, a: impl Into<Operand>) -> Result<NodeId, ScalarGradError> {
    apply_unary_op(graph, OpKind::Neg, a.into())
}

#[cfg(test)]
#[path = "neg_test.rs"]
mod tests;
