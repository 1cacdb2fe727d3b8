// scalargrad-core/src/ops/arithmetic/div.rs

use crate::autograd::{Graph, NodeId};
use crate::config::DomainPolicy;
use crate::error::ScalarGradError;
use crate::ops::arithmetic::{mul_op, pow_op};
use crate::ops::Operand;

/// Computes \( a / b \) as \( a \cdot b^{-1} \).
///
/// There is no dedicated division node: the result is a `Mul` node whose second
/// parent is a `Pow` node, so the gradients come from the product and power rules.
///
/// # Errors
/// `DivisionByZero` under the strict policy when `b` is zero. If building either
/// intermediate node fails the graph is left as it was before the call.
pub fn div_op(
    graph: &mut Graph,
    a: impl Into<Operand>,
    b: impl Into<Operand>,
) -> Result<NodeId, ScalarGradError> {
    let (a, b) = (a.into(), b.into());
    graph.resolve(a, "div")?;
    let denominator = graph.resolve(b, "div")?;
    if graph.config().domain_policy == DomainPolicy::Strict && denominator.value == 0.0 {
        return Err(ScalarGradError::DivisionByZero);
    }

    let mark = graph.len();
    let result = pow_op(graph, b, -1.0).and_then(|reciprocal| mul_op(graph, a, reciprocal));
    if result.is_err() {
        graph.rollback(mark);
    }
    result
}

#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
