//! # Autograd
//!
//! Reverse-mode differentiation over an explicit node arena.
//!
//! - [`graph`]: the [`Graph`] arena, [`NodeId`] and the topological sort.
//! - [`backward_op`]: [`OpKind`], the per-node tag carrying the forward and local
//!   derivative rules.
//! - `backward`: the backward pass, [`Graph::backward`].
//! - [`grad_check`]: finite-difference verification of analytical gradients.

mod backward;
pub mod backward_op;
pub mod grad_check;
pub mod graph;

pub use backward_op::OpKind;
pub use grad_check::{check_grad, GradCheckError};
pub use graph::{Graph, NodeId};
