// scalargrad-core/src/ops/math_elem/exp.rs

use crate::autograd::{Graph, NodeId, OpKind};
use crate::error::ScalarGradError;
use crate::ops::{apply_unary_op, Operand};

/// Computes \( e^a \).
///
/// Backward reuses the output value: \( \frac{dL}{da} = \frac{dL}{dz} \cdot e^a = \frac{dL}{dz} \cdot z \).
///
/// # Errors
/// `DomainError` under the strict policy when the result overflows (`a` above ~709.78).
pub fn exp_op(graph: &mut Graph, a: impl Into<Operand>) -> Result<NodeId, ScalarGradError> {
    apply_unary_op(graph, OpKind::Exp, a.into())
}

#[cfg(test)]
#[path = "exp_test.rs"]
mod tests;
