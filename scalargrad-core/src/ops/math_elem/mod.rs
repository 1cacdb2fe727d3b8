// Element-wise math functions
pub mod cos;
pub mod exp;
pub mod log;
pub mod sin;

pub use cos::cos_op;
pub use exp::exp_op;
pub use log::log_op;
pub use sin::sin_op;
