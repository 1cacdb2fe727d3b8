use crate::autograd::OpKind;
use crate::error::ScalarGradError;
use crate::value::{shared_graph, Value};
use approx::assert_relative_eq;

#[test]
fn test_value_product_rule() -> Result<(), ScalarGradError> {
    let graph = shared_graph();
    let x = Value::leaf(&graph, 3.0, true)?;
    let y = Value::leaf(&graph, 4.0, true)?;
    let z = x.mul(&y)?;
    z.backward()?;
    assert_eq!(z.value()?, 12.0);
    assert_eq!(x.grad()?, 4.0);
    assert_eq!(y.grad()?, 3.0);
    Ok(())
}

#[test]
fn test_value_reflected_literals() -> Result<(), ScalarGradError> {
    let graph = shared_graph();
    let x = Value::leaf(&graph, 4.0, true)?;
    let a = x.rsub(10)?;
    let b = x.rdiv(2.0)?;
    assert_eq!(a.value()?, 6.0);
    assert_relative_eq!(b.value()?, 0.5, epsilon = 1e-12);

    let total = a.add(&b)?;
    total.backward()?;
    // d/dx (10 - x + 2/x) = -1 - 2/x^2
    assert_relative_eq!(x.grad()?, -1.0 - 2.0 / 16.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_value_neg_exp_log_chain() -> Result<(), ScalarGradError> {
    let graph = shared_graph();
    let x = Value::leaf(&graph, 2.0, true)?;
    // y = -ln(exp(x)) = -x
    let y = x.exp()?.log()?.neg()?;
    assert_relative_eq!(y.value()?, -2.0, epsilon = 1e-12);
    y.backward()?;
    assert_relative_eq!(x.grad()?, -1.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_value_pow_relu_sin_cos() -> Result<(), ScalarGradError> {
    let graph = shared_graph();
    let x = Value::leaf(&graph, 0.8, true)?;
    let y = x.sin()?.mul(&x.cos()?)?.relu()?.pow(2)?;
    // (sin x cos x)^2 = sin^2(2x) / 4
    let expected_value = (1.6f64.sin()).powi(2) / 4.0;
    assert_relative_eq!(y.value()?, expected_value, epsilon = 1e-12);
    y.backward()?;
    // d/dx sin^2(2x)/4 = sin(2x)cos(2x) = sin(4x)/2
    assert_relative_eq!(x.grad()?, 3.2f64.sin() / 2.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_value_parents_and_topological_sort() -> Result<(), ScalarGradError> {
    let graph = shared_graph();
    let x = Value::leaf(&graph, 1.0, true)?;
    let y = x.add(&x)?;
    let parents = y.parents()?;
    assert_eq!(parents.len(), 2);
    assert!(parents.iter().all(|p| p.id() == x.id()));
    assert_eq!(graph.borrow().op(y.id())?, OpKind::Add);

    let order = y.topological_sort()?;
    assert_eq!(order.len(), 2);
    y.backward()?;
    assert_eq!(x.grad()?, 2.0);
    Ok(())
}

#[test]
fn test_value_constant_stays_untrained() -> Result<(), ScalarGradError> {
    let graph = shared_graph();
    let x = Value::leaf(&graph, 2.0, true)?;
    let k = Value::constant(&graph, 3.0)?;
    let y = x.mul(&k)?.sub(&k)?;
    y.backward()?;
    assert!(!k.is_trainable()?);
    assert_eq!(k.grad()?, 0.0);
    assert_eq!(x.grad()?, 3.0);
    Ok(())
}

#[test]
fn test_value_graph_mismatch() -> Result<(), ScalarGradError> {
    let first = shared_graph();
    let second = shared_graph();
    let x = Value::leaf(&first, 1.0, true)?;
    let y = Value::leaf(&second, 2.0, true)?;
    assert_eq!(x.add(&y).unwrap_err(), ScalarGradError::GraphMismatch);
    assert_eq!(first.borrow().len(), 1);
    Ok(())
}

#[test]
fn test_value_domain_error_surfaces() -> Result<(), ScalarGradError> {
    let graph = shared_graph();
    let x = Value::leaf(&graph, -1.0, true)?;
    assert!(matches!(x.log(), Err(ScalarGradError::DomainError { .. })));
    assert_eq!(x.div(0.0).unwrap_err(), ScalarGradError::DivisionByZero);
    assert_eq!(graph.borrow().len(), 1);
    Ok(())
}

#[test]
fn test_value_debug_output() -> Result<(), ScalarGradError> {
    let graph = shared_graph();
    let x = Value::leaf(&graph, 5.0, true)?;
    assert_eq!(format!("{x:?}"), "Value(#0, value=5, grad=0)");
    graph.borrow_mut().clear();
    assert_eq!(format!("{x:?}"), "Value(#0, <stale>)");
    Ok(())
}
