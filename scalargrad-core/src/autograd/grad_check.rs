use crate::autograd::{Graph, NodeId};
use crate::config::GraphConfig;
use crate::error::ScalarGradError;
use log::debug;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}: analytical grad {analytical_grad:?} != numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(ScalarGradError),
    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(ScalarGradError),
    #[error("Numerical gradient is NaN or infinite for input {input_index}. Details: Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Analytical gradient is NaN or infinite for input {input_index}. Value: {value:?}")]
    AnalyticalGradNaNOrInfinite { input_index: usize, value: f64 },
    #[error("Perturbation epsilon must be positive and finite, got {0}")]
    InvalidEpsilon(f64),
    #[error("Graph error during gradient check: {0}")]
    GraphError(ScalarGradError),
}

impl From<ScalarGradError> for GradCheckError {
    fn from(err: ScalarGradError) -> Self {
        GradCheckError::GraphError(err)
    }
}

/// Checks analytical gradients against numerical gradients using central finite differences.
///
/// `func` builds a scalar expression on the given graph from one trainable leaf per entry of
/// `inputs` and returns the output node. For every input \( x_i \) the analytical gradient
/// from [`Graph::backward`] is compared with
/// \\[ \frac{f(x_i + \epsilon) - f(x_i - \epsilon)}{2\epsilon} \\]
/// and must agree within `tolerance`, either absolutely or relative to the larger magnitude.
///
/// Every evaluation uses a fresh graph built with `config`.
///
/// # Returns
/// The analytical gradients, in input order.
pub fn check_grad<F>(
    func: F,
    inputs: &[f64],
    config: GraphConfig,
    epsilon: f64,
    tolerance: f64,
) -> Result<Vec<f64>, GradCheckError>
where
    F: Fn(&mut Graph, &[NodeId]) -> Result<NodeId, ScalarGradError>,
{
    if !(epsilon > 0.0 && epsilon.is_finite()) {
        return Err(GradCheckError::InvalidEpsilon(epsilon));
    }

    // --- 1. Analytical gradients ---
    let mut graph = Graph::with_config(config)?;
    let leaves = inputs
        .iter()
        .map(|&x| graph.leaf(x, true))
        .collect::<Result<Vec<_>, _>>()?;
    let output = func(&mut graph, &leaves).map_err(GradCheckError::ForwardPassError)?;
    graph
        .backward(output)
        .map_err(GradCheckError::BackwardPassError)?;
    let analytical = leaves
        .iter()
        .map(|&leaf| graph.gradient(leaf))
        .collect::<Result<Vec<_>, _>>()?;

    // --- 2. Numerical gradients ---
    for (input_index, &analytical_grad) in analytical.iter().enumerate() {
        if !analytical_grad.is_finite() {
            return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                input_index,
                value: analytical_grad,
            });
        }

        let loss_plus = evaluate(&func, inputs, config, input_index, epsilon)?;
        let loss_minus = evaluate(&func, inputs, config, input_index, -epsilon)?;
        let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon);
        if !numerical_grad.is_finite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite {
                input_index,
                loss_plus,
                loss_minus,
            });
        }

        let difference = (analytical_grad - numerical_grad).abs();
        debug!(
            "check_grad input {input_index}: analytical={analytical_grad} numerical={numerical_grad} diff={difference}"
        );
        if !approx::relative_eq!(
            analytical_grad,
            numerical_grad,
            epsilon = tolerance,
            max_relative = tolerance
        ) {
            return Err(GradCheckError::GradientMismatch {
                input_index,
                analytical_grad,
                numerical_grad,
                difference,
            });
        }
    }

    Ok(analytical)
}

/// Forward value of `func` with input `index` shifted by `delta`.
fn evaluate<F>(
    func: &F,
    inputs: &[f64],
    config: GraphConfig,
    index: usize,
    delta: f64,
) -> Result<f64, GradCheckError>
where
    F: Fn(&mut Graph, &[NodeId]) -> Result<NodeId, ScalarGradError>,
{
    let mut graph = Graph::with_config(config)?;
    let mut leaves = Vec::with_capacity(inputs.len());
    for (i, &x) in inputs.iter().enumerate() {
        let value = if i == index { x + delta } else { x };
        leaves.push(graph.leaf(value, true)?);
    }
    let output = func(&mut graph, &leaves).map_err(GradCheckError::ForwardPassError)?;
    Ok(graph.value(output)?)
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
