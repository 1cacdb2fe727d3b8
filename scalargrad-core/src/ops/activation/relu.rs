use crate::autograd::{Graph, NodeId, OpKind};
use crate::error::ScalarGradError;
use crate::ops::{apply_unary_op, Operand};

/// Applies the Rectified Linear Unit, \( \max(0, a) \).
///
/// Backward is the step function:
/// \\[ \frac{dL}{da} = \begin{cases} \frac{dL}{dz} & a > 0 \\\\ 0 & a \le 0 \end{cases} \\]
///
/// The subgradient at exactly 0 is taken as 0. Like every other operator the output
/// is recorded as a child of the input when the input is trainable.
pub fn relu_op(graph: &mut Graph, a: impl Into<Operand>) -> Result<NodeId, ScalarGradError> {
    apply_unary_op(graph, OpKind::Relu, a.into())
}

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
