use scalargrad_core::{Graph, NodeId, ScalarGradError};

// Installs env_logger once; RUST_LOG=scalargrad_core=trace shows every node visited.
#[allow(dead_code)]
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// Position of `id` in a topological order.
#[allow(dead_code)]
pub(crate) fn position(order: &[NodeId], id: NodeId) -> usize {
    order
        .iter()
        .position(|&n| n == id)
        .expect("node missing from topological order")
}

// exp(x1)/(exp(x1)+exp(x2)) * exp(x2)/(exp(x1)+exp(x2))
#[allow(dead_code)]
pub(crate) fn softmax_product(graph: &mut Graph, x: &[NodeId]) -> Result<NodeId, ScalarGradError> {
    use scalargrad_core::ops::{add_op, div_op, exp_op, mul_op};
    let l1 = exp_op(graph, x[0])?;
    let l2 = exp_op(graph, x[1])?;
    let denominator = add_op(graph, l1, l2)?;
    let s1 = div_op(graph, l1, denominator)?;
    let s2 = div_op(graph, l2, denominator)?;
    mul_op(graph, s1, s2)
}
