use crate::autograd::{check_grad, GradCheckError, Graph, NodeId};
use crate::config::GraphConfig;
use crate::error::ScalarGradError;
use crate::ops::{add_op, div_op, exp_op, mul_op, sin_op};
use approx::assert_relative_eq;

fn softmax_product(graph: &mut Graph, x: &[NodeId]) -> Result<NodeId, ScalarGradError> {
    let l1 = exp_op(graph, x[0])?;
    let l2 = exp_op(graph, x[1])?;
    let denominator = add_op(graph, l1, l2)?;
    let s1 = div_op(graph, l1, denominator)?;
    let s2 = div_op(graph, l2, denominator)?;
    mul_op(graph, s1, s2)
}

#[test]
fn test_check_grad_softmax_product() -> Result<(), GradCheckError> {
    let grads = check_grad(softmax_product, &[5.0, 2.0], GraphConfig::default(), 1e-5, 1e-3)?;
    // s = p(1-p) with p = sigmoid(x1 - x2); ds/dx1 = p(1-p)(1-2p) = -ds/dx2
    let p = 1.0 / (1.0 + (-3.0f64).exp());
    let expected = p * (1.0 - p) * (1.0 - 2.0 * p);
    assert_relative_eq!(grads[0], expected, epsilon = 1e-10);
    assert_relative_eq!(grads[1], -expected, epsilon = 1e-10);
    Ok(())
}

#[test]
fn test_check_grad_trig_polynomial() -> Result<(), GradCheckError> {
    let f = |graph: &mut Graph, x: &[NodeId]| {
        let s = sin_op(graph, x[0])?;
        let p = mul_op(graph, s, x[1])?;
        mul_op(graph, p, x[1])
    };
    check_grad(f, &[0.4, -1.3], GraphConfig::default(), 1e-6, 1e-4)?;
    Ok(())
}

#[test]
fn test_check_grad_detects_wrong_gradient() {
    // relu has a kink at 0: the central difference sees slope 1/2, backward reports 0.
    let f = |graph: &mut Graph, x: &[NodeId]| crate::ops::relu_op(graph, x[0]);
    let result = check_grad(f, &[0.0], GraphConfig::default(), 1e-3, 1e-6);
    match result {
        Err(GradCheckError::GradientMismatch {
            input_index,
            analytical_grad,
            numerical_grad,
            ..
        }) => {
            assert_eq!(input_index, 0);
            assert_eq!(analytical_grad, 0.0);
            assert_relative_eq!(numerical_grad, 0.5, epsilon = 1e-9);
        }
        other => panic!("expected mismatch, got {other:?}"),
    }
}

#[test]
fn test_check_grad_rejects_bad_epsilon() {
    let f = |graph: &mut Graph, x: &[NodeId]| exp_op(graph, x[0]);
    let result = check_grad(f, &[1.0], GraphConfig::default(), 0.0, 1e-3);
    assert_eq!(result, Err(GradCheckError::InvalidEpsilon(0.0)));
}

#[test]
fn test_check_grad_reports_forward_errors() {
    let f = |graph: &mut Graph, x: &[NodeId]| crate::ops::log_op(graph, x[0]);
    let result = check_grad(f, &[-1.0], GraphConfig::default(), 1e-5, 1e-3);
    assert!(matches!(result, Err(GradCheckError::ForwardPassError(_))));
}
