use crate::autograd::{Graph, NodeId, OpKind};
use crate::config::{DomainPolicy, GraphConfig};
use crate::error::ScalarGradError;
use crate::ops::{add_op, exp_op, mul_op, sin_op};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn position(order: &[NodeId], id: NodeId) -> usize {
    order.iter().position(|&n| n == id).expect("node missing from order")
}

#[test]
fn test_leaf_defaults() -> Result<(), ScalarGradError> {
    let mut graph = Graph::new();
    assert!(graph.is_empty());
    let x = graph.leaf(3.0, true)?;
    let k = graph.constant(2.0)?;
    assert_eq!(graph.len(), 2);
    assert_eq!(x.index(), 0);
    assert_eq!(graph.value(x)?, 3.0);
    assert_eq!(graph.gradient(x)?, 0.0);
    assert!(graph.is_trainable(x)?);
    assert!(!graph.is_trainable(k)?);
    assert_eq!(graph.op(x)?, OpKind::Leaf);
    assert!(graph.parents(x)?.is_empty());
    Ok(())
}

#[test]
fn test_leaf_rejects_non_finite_values() {
    let mut graph = Graph::new();
    assert!(matches!(
        graph.leaf(f64::NAN, true),
        Err(ScalarGradError::DomainError { .. })
    ));
    assert!(matches!(
        graph.constant(f64::INFINITY),
        Err(ScalarGradError::DomainError { .. })
    ));
    assert!(graph.is_empty());
}

#[test]
fn test_leaf_accepts_nan_when_propagating() -> Result<(), ScalarGradError> {
    let config = GraphConfig::builder()
        .domain_policy(DomainPolicy::Propagate)
        .build()?;
    let mut graph = Graph::with_config(config)?;
    let x = graph.leaf(f64::NAN, true)?;
    assert!(graph.value(x)?.is_nan());
    Ok(())
}

#[test]
fn test_invalid_node_id() {
    let graph = Graph::new();
    assert_eq!(
        graph.value(NodeId(3)),
        Err(ScalarGradError::InvalidNode { id: 3, len: 0 })
    );
    assert!(graph.topological_sort(NodeId(0)).is_err());
}

#[test]
fn test_random_leaves_are_reproducible() -> Result<(), ScalarGradError> {
    let mut graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(42);
    let u = graph.leaf_uniform(&mut rng, true);
    let n = graph.leaf_normal(&mut rng, 0.0, 1.0, false)?;
    let value = graph.value(u)?;
    assert!((0.0..1.0).contains(&value));
    assert!(!graph.is_trainable(n)?);

    let mut other = Graph::new();
    let mut rng = StdRng::seed_from_u64(42);
    let u2 = other.leaf_uniform(&mut rng, true);
    let n2 = other.leaf_normal(&mut rng, 0.0, 1.0, false)?;
    assert_eq!(other.value(u2)?, value);
    assert_eq!(other.value(n2)?, graph.value(n)?);
    Ok(())
}

#[test]
fn test_leaf_normal_rejects_bad_std_dev() -> Result<(), ScalarGradError> {
    let mut graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(7);
    for std_dev in [-1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            graph.leaf_normal(&mut rng, 0.0, std_dev, true),
            Err(ScalarGradError::DomainError { .. })
        ));
    }
    assert!(graph.is_empty());
    let n = graph.leaf_normal(&mut rng, 1.5, 0.0, true)?;
    assert_eq!(graph.value(n)?, 1.5);
    Ok(())
}

#[test]
fn test_topological_sort_diamond() -> Result<(), ScalarGradError> {
    let mut graph = Graph::new();
    let x = graph.leaf(0.5, true)?;
    let a = exp_op(&mut graph, x)?;
    let b = sin_op(&mut graph, x)?;
    let c = mul_op(&mut graph, a, b)?;

    let order = graph.topological_sort(c)?;
    assert_eq!(order.len(), 4);
    assert_eq!(*order.last().unwrap(), c);
    assert!(position(&order, x) < position(&order, a));
    assert!(position(&order, x) < position(&order, b));
    assert!(position(&order, a) < position(&order, c));
    assert!(position(&order, b) < position(&order, c));
    Ok(())
}

#[test]
fn test_topological_sort_only_reaches_ancestors() -> Result<(), ScalarGradError> {
    let mut graph = Graph::new();
    let x = graph.leaf(1.0, true)?;
    let y = graph.leaf(2.0, true)?;
    let sum = add_op(&mut graph, x, y)?;
    let _unrelated = mul_op(&mut graph, y, 4.0)?;
    let order = graph.topological_sort(sum)?;
    assert_eq!(order, vec![x, y, sum]);
    assert_eq!(graph.topological_sort(x)?, vec![x]);
    Ok(())
}

#[test]
fn test_topological_sort_equal_values_are_distinct_nodes() -> Result<(), ScalarGradError> {
    let mut graph = Graph::new();
    let a = graph.leaf(1.0, true)?;
    let b = graph.leaf(1.0, true)?;
    let c = add_op(&mut graph, a, b)?;
    assert_eq!(graph.topological_sort(c)?.len(), 3);
    Ok(())
}

#[test]
fn test_topological_sort_long_chain() -> Result<(), ScalarGradError> {
    let mut graph = Graph::new();
    let x = graph.leaf(0.0, true)?;
    let mut node = x;
    for _ in 0..100_000 {
        node = add_op(&mut graph, node, 1e-6)?;
    }
    let order = graph.topological_sort(node)?;
    // chain nodes plus one constant leaf per addition
    assert_eq!(order.len(), 1 + 2 * 100_000);
    assert_eq!(order[0], x);
    Ok(())
}

#[test]
fn test_children_bookkeeping_and_clear() -> Result<(), ScalarGradError> {
    let mut graph = Graph::new();
    let x = graph.leaf(2.0, true)?;
    let a = exp_op(&mut graph, x)?;
    let b = mul_op(&mut graph, x, x)?;
    assert_eq!(graph.children(x)?, &[a, b]);
    assert!(graph.children(b)?.is_empty());

    graph.clear();
    assert!(graph.is_empty());
    assert!(matches!(
        graph.value(x),
        Err(ScalarGradError::InvalidNode { .. })
    ));
    // the slot is reused by the next node
    let fresh = graph.leaf(9.0, false)?;
    assert_eq!(fresh, x);
    assert_eq!(graph.value(x)?, 9.0);
    Ok(())
}

#[test]
fn test_describe_lists_nodes_in_order() -> Result<(), ScalarGradError> {
    let mut graph = Graph::new();
    let x = graph.leaf(3.0, true)?;
    let y = graph.leaf(4.0, true)?;
    let z = mul_op(&mut graph, x, y)?;
    graph.backward(z)?;
    let text = graph.describe(z)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("#0 leaf"));
    assert!(lines[2].starts_with("#2 mul"));
    assert!(lines[2].contains("value=12.000000"));
    assert!(lines[0].contains("grad=4.000000"));
    Ok(())
}
