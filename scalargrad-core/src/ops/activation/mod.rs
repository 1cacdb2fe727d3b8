//! # Activation Functions
//!
//! Non-linear functions applied to a single node.
//!
//! ## Currently Implemented:
//! - [`relu_op`]: Rectified Linear Unit.

pub mod relu;

pub use relu::relu_op;
