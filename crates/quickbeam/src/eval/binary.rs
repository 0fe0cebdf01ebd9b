//! Binary operation evaluation

use crate::ast::{BinOp, Expr};
use crate::{Environment, EvalContext, EvalError, Value};

use super::Evaluate;

/// Evaluate a binary node and every binary node on its left spine.
///
/// Left-associative chains such as `1 + 2 + 3 + ...` nest to the left, so
/// the spine is walked in a loop and only right operands recurse. Operands
/// are still evaluated left to right.
pub(crate) fn eval_chain(
    expr: &Expr,
    env: &Environment,
    ctx: &EvalContext,
    depth: usize,
) -> Result<Value, EvalError> {
    let (head, steps) = expr.left_spine();

    let mut acc = head.eval_at(env, ctx, depth)?;
    for (op, right) in steps {
        let rhs = right.eval_at(env, ctx, depth + 1)?;
        acc = eval_binop(op, acc, rhs);
    }
    Ok(acc)
}

/// Apply a binary operator to two evaluated operands.
///
/// Values are arbitrary-precision, so this cannot fail.
pub fn eval_binop(op: BinOp, left: Value, right: Value) -> Value {
    match op {
        BinOp::Add => left + right,
        BinOp::Sub => left - right,
        BinOp::Mul => left * right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> Value {
        Value::from(n)
    }

    #[test]
    fn test_binop_arithmetic() {
        assert_eq!(eval_binop(BinOp::Add, int(2), int(3)), int(5));
        assert_eq!(eval_binop(BinOp::Sub, int(2), int(3)), int(-1));
        assert_eq!(eval_binop(BinOp::Mul, int(-4), int(3)), int(-12));
    }

    #[test]
    fn test_binop_grows_past_machine_words() {
        let max = Value::from(i128::MAX);
        assert_eq!(
            eval_binop(BinOp::Add, max.clone(), int(1)).to_string(),
            "170141183460469231731687303715884105728"
        );
        assert_eq!(
            eval_binop(BinOp::Mul, max.clone(), int(2)).to_string(),
            "340282366920938463463374607431768211454"
        );
        assert_eq!(
            eval_binop(BinOp::Sub, -max, int(2)).to_string(),
            "-170141183460469231731687303715884105729"
        );
    }

    #[test]
    fn test_chain_is_left_associative() {
        // (5 - 2) - 1
        let expr = Expr::binary(
            BinOp::Sub,
            Expr::binary(BinOp::Sub, Expr::literal(5), Expr::literal(2)),
            Expr::literal(1),
        );
        let env = Environment::new();
        let result = eval_chain(&expr, &env, &EvalContext::default(), 0).unwrap();
        assert_eq!(result, int(2));
    }

    #[test]
    fn test_long_chain_does_not_count_as_depth() {
        let mut expr = Expr::literal(0);
        for _ in 0..5000 {
            expr = Expr::binary(BinOp::Add, expr, Expr::literal(1));
        }
        let env = Environment::new();
        let ctx = EvalContext::with_max_depth(4);
        assert_eq!(expr.eval(&env, &ctx).unwrap(), int(5000));
    }

    #[test]
    fn test_left_operand_error_reported_first() {
        let expr = Expr::binary(BinOp::Add, Expr::variable("a"), Expr::variable("b"));
        let env = Environment::new();
        let err = expr.eval(&env, &EvalContext::default()).unwrap_err();
        assert_eq!(
            err,
            EvalError::UndefinedVariable {
                name: "a".to_string()
            }
        );
    }
}
