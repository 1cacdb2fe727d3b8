//! # Scalar Operations Module (`ops`)
//!
//! Every differentiable operation is a free function named `xxx_op` that takes the
//! [`Graph`] and its operands, computes the forward value, checks it against the
//! graph's [`DomainPolicy`] and pushes one new node tagged with the matching
//! [`OpKind`]. The backward pass later dispatches on that tag.
//!
//! ## Key Submodules:
//!
//! - [`arithmetic`]: add, sub, mul, div, pow, neg.
//! - [`math_elem`]: exp, log, sin, cos.
//! - [`activation`]: relu.
//!
//! Operands are passed as [`Operand`], which is either an existing node or a literal.
//! A literal becomes a fresh non-trainable leaf, but only once the operation is known
//! to succeed: a failing call leaves the graph untouched.

use crate::autograd::{Graph, NodeId, OpKind};
use crate::config::DomainPolicy;
use crate::error::ScalarGradError;

pub mod activation;
pub mod arithmetic;
pub mod math_elem;

pub use activation::relu_op;
pub use arithmetic::{add_op, div_op, neg_op, pow_op, sub_op, mul_op};
pub use math_elem::{cos_op, exp_op, log_op, sin_op};

/// Input of an operation: an existing node or a raw literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    /// Resolved into a non-trainable leaf when the operation is applied.
    Literal(f64),
    Node(NodeId),
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Literal(value)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Literal(f64::from(value))
    }
}

impl From<NodeId> for Operand {
    fn from(id: NodeId) -> Self {
        Operand::Node(id)
    }
}

impl From<&NodeId> for Operand {
    fn from(id: &NodeId) -> Self {
        Operand::Node(*id)
    }
}

/// Operand after lookup, before anything is pushed to the graph.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolvedOperand {
    pub(crate) node: Option<NodeId>,
    pub(crate) value: f64,
    pub(crate) trainable: bool,
}

impl Graph {
    pub(crate) fn resolve(
        &self,
        operand: Operand,
        operation: &str,
    ) -> Result<ResolvedOperand, ScalarGradError> {
        match operand {
            Operand::Literal(value) => {
                self.ensure_finite_input(operation, value)?;
                Ok(ResolvedOperand {
                    node: None,
                    value,
                    trainable: false,
                })
            }
            Operand::Node(id) => {
                let record = self.record(id)?;
                Ok(ResolvedOperand {
                    node: Some(id),
                    value: record.value,
                    trainable: record.trainable,
                })
            }
        }
    }
}

/// Applies `op` to `operands` and pushes the resulting node.
///
/// Under [`DomainPolicy::Strict`], `domain_check` runs first on the resolved operands
/// and may reject them with a message; then the forward value and the partial derivative
/// of every trainable operand must be finite. Nothing is pushed unless all checks pass.
pub(crate) fn apply_op<C>(
    graph: &mut Graph,
    op: OpKind,
    operands: &[Operand],
    domain_check: C,
) -> Result<NodeId, ScalarGradError>
where
    C: FnOnce(&[ResolvedOperand]) -> Result<(), String>,
{
    debug_assert_eq!(operands.len(), op.arity());
    let operation = op.name();

    let resolved = operands
        .iter()
        .map(|operand| graph.resolve(*operand, operation))
        .collect::<Result<Vec<_>, _>>()?;
    let values: Vec<f64> = resolved.iter().map(|r| r.value).collect();
    let output = op.forward(&values);

    if graph.config().domain_policy == DomainPolicy::Strict {
        domain_check(&resolved).map_err(|message| ScalarGradError::domain(operation, message))?;
        if !output.is_finite() {
            return Err(ScalarGradError::domain(
                operation,
                format!("result {output} is not finite for inputs {values:?}"),
            ));
        }
        let partials = op.partials(&values, output);
        for (index, (operand, partial)) in resolved.iter().zip(partials).enumerate() {
            if operand.trainable && !partial.is_finite() {
                return Err(ScalarGradError::domain(
                    operation,
                    format!(
                        "derivative with respect to operand {index} is not finite ({partial}) for inputs {values:?}"
                    ),
                ));
            }
        }
    }

    let parents = resolved
        .iter()
        .map(|operand| match operand.node {
            Some(id) => id,
            None => graph.push_leaf(operand.value, false),
        })
        .collect();
    Ok(graph.push_derived(output, parents, op))
}

/// Same as [`apply_op`] without an operation-specific domain check.
pub(crate) fn apply_unary_op(
    graph: &mut Graph,
    op: OpKind,
    a: Operand,
) -> Result<NodeId, ScalarGradError> {
    apply_op(graph, op, &[a], |_| Ok(()))
}

pub(crate) fn apply_binary_op(
    graph: &mut Graph,
    op: OpKind,
    a: Operand,
    b: Operand,
) -> Result<NodeId, ScalarGradError> {
    apply_op(graph, op, &[a, b], |_| Ok(()))
}
