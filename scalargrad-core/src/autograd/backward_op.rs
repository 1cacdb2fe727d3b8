use std::fmt;

/// Tag identifying the operation that produced a node.
///
/// The tag replaces a per-node backward closure: the backward pass looks up the
/// node's parents and dispatches on the tag to apply the fixed local derivative
/// rule of the operation.
///
/// Parent order follows operand order, e.g. for `Pow` the parents are
/// `[base, exponent]` and for `Sub` they are `[minuend, subtrahend]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// User input or resolved literal. Contributes nothing upstream.
    Leaf,
    Add,
    Sub,
    Mul,
    Pow,
    Neg,
    Exp,
    Log,
    Sin,
    Cos,
    Relu,
}

impl OpKind {
    /// Number of operands the operation consumes.
    pub fn arity(self) -> usize {
        match self {
            OpKind::Leaf => 0,
            OpKind::Add | OpKind::Sub | OpKind::Mul | OpKind::Pow => 2,
            OpKind::Neg | OpKind::Exp | OpKind::Log | OpKind::Sin | OpKind::Cos | OpKind::Relu => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OpKind::Leaf => "leaf",
            OpKind::Add => "add",
            OpKind::Sub => "sub",
            OpKind::Mul => "mul",
            OpKind::Pow => "pow",
            OpKind::Neg => "neg",
            OpKind::Exp => "exp",
            OpKind::Log => "log",
            OpKind::Sin => "sin",
            OpKind::Cos => "cos",
            OpKind::Relu => "relu",
        }
    }

    /// Computes the forward value from the operand values.
    ///
    /// `inputs` must hold at least [`OpKind::arity`] values. `Leaf` has no forward
    /// rule and returns `NaN`; leaves get their value directly.
    pub fn forward(self, inputs: &[f64]) -> f64 {
        match self {
            OpKind::Leaf => f64::NAN,
            OpKind::Add => inputs[0] + inputs[1],
            OpKind::Sub => inputs[0] - inputs[1],
            OpKind::Mul => inputs[0] * inputs[1],
            OpKind::Pow => inputs[0].powf(inputs[1]),
            OpKind::Neg => -inputs[0],
            OpKind::Exp => inputs[0].exp(),
            OpKind::Log => inputs[0].ln(),
            OpKind::Sin => inputs[0].sin(),
            OpKind::Cos => inputs[0].cos(),
            OpKind::Relu => inputs[0].max(0.0),
        }
    }

    /// Local partial derivatives \( \frac{\partial out}{\partial in_i} \) for each operand.
    ///
    /// The backward pass multiplies these by the output's gradient and adds the
    /// result into each trainable parent:
    ///
    /// | op | ∂/∂x | ∂/∂y |
    /// |---|---|---|
    /// | add | 1 | 1 |
    /// | sub | 1 | −1 |
    /// | mul | y | x |
    /// | pow | y·x^(y−1) | x^y·ln x |
    /// | neg | −1 | |
    /// | exp | e^x | |
    /// | log | 1/x | |
    /// | sin | cos x | |
    /// | cos | −sin x | |
    /// | relu | 1 if x > 0 else 0 | |
    ///
    /// Slots beyond the arity are 0.
    pub fn partials(self, inputs: &[f64], output: f64) -> [f64; 2] {
        match self {
            OpKind::Leaf => [0.0, 0.0],
            OpKind::Add => [1.0, 1.0],
            OpKind::Sub => [1.0, -1.0],
            OpKind::Mul => [inputs[1], inputs[0]],
            OpKind::Pow => {
                let (x, y) = (inputs[0], inputs[1]);
                // d/dx x^0 is 0 everywhere, including x = 0
                let d_base = if y == 0.0 { 0.0 } else { y * x.powf(y - 1.0) };
                [d_base, output * x.ln()]
            }
            OpKind::Neg => [-1.0, 0.0],
            OpKind::Exp => [output, 0.0],
            OpKind::Log => [1.0 / inputs[0], 0.0],
            OpKind::Sin => [inputs[0].cos(), 0.0],
            OpKind::Cos => [-inputs[0].sin(), 0.0],
            OpKind::Relu => [if inputs[0] > 0.0 { 1.0 } else { 0.0 }, 0.0],
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[cfg(test)]
#[path = "backward_op_test.rs"]
mod tests;
