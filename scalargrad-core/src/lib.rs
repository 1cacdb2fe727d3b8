//! # scalargrad-core
//!
//! Reverse-mode automatic differentiation over `f64` scalars.
//!
//! Every operator pushes one node into a [`Graph`] arena, recording its operands as
//! parents and its [`OpKind`]. [`Graph::backward`] then walks the ancestors of a
//! terminal node once, in reverse topological order, and leaves in every trainable
//! node the derivative of the terminal with respect to that node.
//!
//! ```
//! use scalargrad_core::{ops, Graph};
//!
//! let mut graph = Graph::new();
//! let x = graph.leaf(3.0, true)?;
//! let y = graph.leaf(4.0, true)?;
//! let z = ops::mul_op(&mut graph, x, y)?;
//! graph.backward(z)?;
//! assert_eq!(graph.gradient(x)?, 4.0);
//! assert_eq!(graph.gradient(y)?, 3.0);
//! # Ok::<(), scalargrad_core::ScalarGradError>(())
//! ```
//!
//! [`value::Value`] offers the same operators as methods on a shared graph.

pub mod autograd;
pub mod config;
pub mod error;
pub mod ops;
pub mod value;

pub use autograd::{check_grad, GradCheckError, Graph, NodeId, OpKind};
pub use config::{AccumulationMode, DomainPolicy, GraphConfig};
pub use error::ScalarGradError;
pub use ops::Operand;
pub use value::{shared_graph, Value};
