//! Unary operation evaluation

use crate::Value;

/// Evaluate unary negation (`-x`).
pub(crate) fn eval_neg(operand: Value) -> Value {
    -operand
}
