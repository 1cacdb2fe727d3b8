// src/value.rs

use crate::autograd::{Graph, NodeId};
use crate::config::GraphConfig;
use crate::error::ScalarGradError;
use crate::ops::{self, Operand};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Graph shared by every [`Value`] created on it.
pub type SharedGraph = Rc<RefCell<Graph>>;

/// Creates an empty shared graph with the default configuration.
pub fn shared_graph() -> SharedGraph {
    Rc::new(RefCell::new(Graph::new()))
}

/// Creates an empty shared graph with an explicit configuration.
pub fn shared_graph_with_config(config: GraphConfig) -> Result<SharedGraph, ScalarGradError> {
    Ok(Rc::new(RefCell::new(Graph::with_config(config)?)))
}

/// Handle to one node of a [`SharedGraph`].
///
/// `Value` is a cheap clone (an `Rc` plus an index) that exposes the operators as
/// methods so expressions read like ordinary arithmetic:
///
/// ```
/// use scalargrad_core::value::{shared_graph, Value};
///
/// let graph = shared_graph();
/// let x = Value::leaf(&graph, 3.0, true)?;
/// let y = Value::leaf(&graph, 4.0, true)?;
/// let z = x.mul(&y)?.add(1.0)?;
/// z.backward()?;
/// assert_eq!(z.value()?, 13.0);
/// assert_eq!(x.grad()?, 4.0);
/// # Ok::<(), scalargrad_core::ScalarGradError>(())
/// ```
///
/// Every method borrows the graph for the duration of the call only.
///
/// A handle stays tied to its slot index: after [`Graph::clear`] it reports
/// `InvalidNode` until the slot is reused, then reads the new node in that slot.
#[derive(Clone)]
pub struct Value {
    graph: SharedGraph,
    id: NodeId,
}

/// Right-hand side accepted by the binary [`Value`] methods.
#[derive(Clone, Copy)]
pub enum Rhs<'a> {
    Literal(f64),
    Value(&'a Value),
}

impl From<f64> for Rhs<'_> {
    fn from(value: f64) -> Self {
        Rhs::Literal(value)
    }
}

impl From<i32> for Rhs<'_> {
    fn from(value: i32) -> Self {
        Rhs::Literal(f64::from(value))
    }
}

impl<'a> From<&'a Value> for Rhs<'a> {
    fn from(value: &'a Value) -> Self {
        Rhs::Value(value)
    }
}

impl Value {
    /// Wraps a raw scalar as a leaf of `graph`.
    pub fn leaf(graph: &SharedGraph, value: f64, trainable: bool) -> Result<Value, ScalarGradError> {
        let id = graph.borrow_mut().leaf(value, trainable)?;
        Ok(Value::from_id(graph, id))
    }

    /// Wraps a raw scalar as a non-trainable leaf of `graph`.
    pub fn constant(graph: &SharedGraph, value: f64) -> Result<Value, ScalarGradError> {
        Value::leaf(graph, value, false)
    }

    /// Attaches a handle to a node created directly through [`Graph`].
    pub fn from_id(graph: &SharedGraph, id: NodeId) -> Value {
        Value {
            graph: Rc::clone(graph),
            id,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn graph(&self) -> &SharedGraph {
        &self.graph
    }

    // --- Accessors ---

    pub fn value(&self) -> Result<f64, ScalarGradError> {
        self.graph.borrow().value(self.id)
    }

    pub fn grad(&self) -> Result<f64, ScalarGradError> {
        self.graph.borrow().gradient(self.id)
    }

    pub fn is_trainable(&self) -> Result<bool, ScalarGradError> {
        self.graph.borrow().is_trainable(self.id)
    }

    /// Handles to the operands this value was computed from.
    pub fn parents(&self) -> Result<Vec<Value>, ScalarGradError> {
        let graph = self.graph.borrow();
        Ok(graph
            .parents(self.id)?
            .iter()
            .map(|&id| Value::from_id(&self.graph, id))
            .collect())
    }

    // --- Autograd ---

    /// Runs the backward pass with this value as root. See [`Graph::backward`].
    pub fn backward(&self) -> Result<(), ScalarGradError> {
        self.graph.borrow_mut().backward(self.id)
    }

    pub fn topological_sort(&self) -> Result<Vec<Value>, ScalarGradError> {
        let order = self.graph.borrow().topological_sort(self.id)?;
        Ok(order
            .into_iter()
            .map(|id| Value::from_id(&self.graph, id))
            .collect())
    }

    // --- Operators ---

    fn operand(&self, rhs: Rhs<'_>) -> Result<Operand, ScalarGradError> {
        match rhs {
            Rhs::Literal(value) => Ok(Operand::Literal(value)),
            Rhs::Value(other) if Rc::ptr_eq(&self.graph, &other.graph) => {
                Ok(Operand::Node(other.id))
            }
            Rhs::Value(_) => Err(ScalarGradError::GraphMismatch),
        }
    }

    fn binary<'a, F>(&self, rhs: impl Into<Rhs<'a>>, op: F) -> Result<Value, ScalarGradError>
    where
        F: FnOnce(&mut Graph, Operand, Operand) -> Result<NodeId, ScalarGradError>,
    {
        let rhs = self.operand(rhs.into())?;
        let id = op(&mut *self.graph.borrow_mut(), Operand::Node(self.id), rhs)?;
        Ok(Value::from_id(&self.graph, id))
    }

    /// Same as `binary` with the literal or value on the left.
    fn binary_reflected<'a, F>(&self, lhs: impl Into<Rhs<'a>>, op: F) -> Result<Value, ScalarGradError>
    where
        F: FnOnce(&mut Graph, Operand, Operand) -> Result<NodeId, ScalarGradError>,
    {
        let lhs = self.operand(lhs.into())?;
        let id = op(&mut *self.graph.borrow_mut(), lhs, Operand::Node(self.id))?;
        Ok(Value::from_id(&self.graph, id))
    }

    fn unary<F>(&self, op: F) -> Result<Value, ScalarGradError>
    where
        F: FnOnce(&mut Graph, Operand) -> Result<NodeId, ScalarGradError>,
    {
        let id = op(&mut *self.graph.borrow_mut(), Operand::Node(self.id))?;
        Ok(Value::from_id(&self.graph, id))
    }

    pub fn add<'a>(&self, rhs: impl Into<Rhs<'a>>) -> Result<Value, ScalarGradError> {
        self.binary(rhs, |g, a, b| ops::add_op(g, a, b))
    }

    pub fn sub<'a>(&self, rhs: impl Into<Rhs<'a>>) -> Result<Value, ScalarGradError> {
        self.binary(rhs, |g, a, b| ops::sub_op(g, a, b))
    }

    /// `lhs - self`.
    pub fn rsub<'a>(&self, lhs: impl Into<Rhs<'a>>) -> Result<Value, ScalarGradError> {
        self.binary_reflected(lhs, |g, a, b| ops::sub_op(g, a, b))
    }

    pub fn mul<'a>(&self, rhs: impl Into<Rhs<'a>>) -> Result<Value, ScalarGradError> {
        self.binary(rhs, |g, a, b| ops::mul_op(g, a, b))
    }

    pub fn div<'a>(&self, rhs: impl Into<Rhs<'a>>) -> Result<Value, ScalarGradError> {
        self.binary(rhs, |g, a, b| ops::div_op(g, a, b))
    }

    /// `lhs / self`.
    pub fn rdiv<'a>(&self, lhs: impl Into<Rhs<'a>>) -> Result<Value, ScalarGradError> {
        self.binary_reflected(lhs, |g, a, b| ops::div_op(g, a, b))
    }

    pub fn pow<'a>(&self, exponent: impl Into<Rhs<'a>>) -> Result<Value, ScalarGradError> {
        self.binary(exponent, |g, a, b| ops::pow_op(g, a, b))
    }

    pub fn neg(&self) -> Result<Value, ScalarGradError> {
        self.unary(|g, a| ops::neg_op(g, a))
    }

    pub fn exp(&self) -> Result<Value, ScalarGradError> {
        self.unary(|g, a| ops::exp_op(g, a))
    }

    pub fn log(&self) -> Result<Value, ScalarGradError> {
        self.unary(|g, a| ops::log_op(g, a))
    }

    pub fn sin(&self) -> Result<Value, ScalarGradError> {
        self.unary(|g, a| ops::sin_op(g, a))
    }

    pub fn cos(&self) -> Result<Value, ScalarGradError> {
        self.unary(|g, a| ops::cos_op(g, a))
    }

    pub fn relu(&self) -> Result<Value, ScalarGradError> {
        self.unary(|g, a| ops::relu_op(g, a))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.graph.try_borrow() {
            Ok(graph) => match graph.record(self.id) {
                Ok(record) => write!(
                    f,
                    "Value({}, value={}, grad={})",
                    self.id, record.value, record.grad
                ),
                Err(_) => write!(f, "Value({}, <stale>)", self.id),
            },
            Err(_) => write!(f, "Value({}, <graph borrowed>)", self.id),
        }
    }
}

#[cfg(test)]
#[path = "value_test.rs"]
mod tests;
