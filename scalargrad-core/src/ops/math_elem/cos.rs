// scalargrad-core/src/ops/math_elem/cos.rs

use crate::autograd::{Graph, NodeId, OpKind};
use crate::error::ScalarGradError;
use crate::ops::{apply_unary_op, Operand};

/// Computes \( \cos(a) \). Backward: \( \frac{dL}{da} = -\frac{dL}{dz} \cdot \sin(a) \).
pub fn cos_op(graph: &mut Graph, a: impl Into<Operand>) -> Result<NodeId, ScalarGradError> {
    apply_unary_op(graph, OpKind::Cos, a.into())
}
