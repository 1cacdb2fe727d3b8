// Builds the two-class softmax product, runs backward and compares the
// gradients against central finite differences.
//
//     RUST_LOG=debug cargo run --example softmax_check

use log::info;
use scalargrad_core::value::{shared_graph, shared_graph_with_config, Value};
use scalargrad_core::{check_grad, ops, Graph, GraphConfig, NodeId, ScalarGradError};

fn softmax_product(graph: &mut Graph, x: &[NodeId]) -> Result<NodeId, ScalarGradError> {
    let l1 = ops::exp_op(graph, x[0])?;
    let l2 = ops::exp_op(graph, x[1])?;
    let denominator = ops::add_op(graph, l1, l2)?;
    let s1 = ops::div_op(graph, l1, denominator)?;
    let s2 = ops::div_op(graph, l2, denominator)?;
    ops::mul_op(graph, s1, s2)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let config = GraphConfig::from_env()?;

    let graph = shared_graph_with_config(config)?;
    let x1 = Value::leaf(&graph, 5.0, true)?;
    let x2 = Value::leaf(&graph, 2.0, true)?;
    let l1 = x1.exp()?;
    let l2 = x2.exp()?;
    let denominator = l1.add(&l2)?;
    let s = l1.div(&denominator)?.mul(&l2.div(&denominator)?)?;
    s.backward()?;

    println!("s      = {:.8}", s.value()?);
    println!("ds/dx1 = {:.8}", x1.grad()?);
    println!("ds/dx2 = {:.8}", x2.grad()?);
    info!("graph holds {} nodes", graph.borrow().len());
    print!("{}", graph.borrow().describe(s.id())?);

    let grads = check_grad(softmax_product, &[5.0, 2.0], config, 1e-5, 1e-3)?;
    println!("finite differences agree: {grads:?}");

    let other = shared_graph();
    let y = Value::leaf(&other, 1.0, true)?;
    if let Err(err) = x1.add(&y) {
        println!("mixing graphs is rejected: {err}");
    }
    Ok(())
}
