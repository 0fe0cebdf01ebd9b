//! Expression evaluation

pub mod binary;
pub mod path;
pub mod stmt;
pub mod unary;

use tracing::trace;

use crate::ast::Expr;
use crate::{Environment, EvalContext, EvalError, Value};

/// Trait for evaluating AST nodes to values.
///
/// This is the core abstraction for the tree-walking interpreter.
/// Evaluation only reads the environment; assignments happen in
/// [`stmt::exec_stmt`].
pub trait Evaluate {
    /// Evaluate this node in the given environment.
    fn eval(&self, env: &Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
        self.eval_at(env, ctx, 0)
    }

    /// Evaluate this node at the given nesting depth.
    fn eval_at(
        &self,
        env: &Environment,
        ctx: &EvalContext,
        depth: usize,
    ) -> Result<Value, EvalError>;
}

// ═══════════════════════════════════════════════════════════════════════
// Main Expression Dispatcher
// ═══════════════════════════════════════════════════════════════════════

impl Evaluate for Expr {
    fn eval_at(
        &self,
        env: &Environment,
        ctx: &EvalContext,
        depth: usize,
    ) -> Result<Value, EvalError> {
        if depth > ctx.max_depth {
            return Err(EvalError::DepthExceeded {
                max: ctx.max_depth,
            });
        }

        let value = match self {
            Expr::Literal(value) => value.clone(),
            Expr::Variable(name) => path::lookup(name, env)?,
            Expr::UnaryMinus(operand) => unary::eval_neg(operand.eval_at(env, ctx, depth + 1)?),
            Expr::Binary { .. } => binary::eval_chain(self, env, ctx, depth)?,
        };

        if ctx.trace {
            trace!(node = expr_kind_name(self), depth, %value, "evaluated");
        }
        Ok(value)
    }
}

/// Get a human-readable name for an expression kind.
fn expr_kind_name(expr: &Expr) -> &'static str {
    match expr {
        Expr::Literal(_) => "literal",
        Expr::Variable(_) => "variable",
        Expr::UnaryMinus(_) => "negation",
        Expr::Binary { .. } => "binary operation",
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Convenience Functions
// ═══════════════════════════════════════════════════════════════════════

/// Evaluate an expression (convenience wrapper).
pub fn eval_expr(expr: &Expr, env: &Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
    expr.eval(env, ctx)
}

pub use stmt::{exec_program, exec_stmt};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinOp;

    #[test]
    fn test_literal() {
        let env = Environment::new();
        let ctx = EvalContext::default();
        assert_eq!(Expr::literal(7).eval(&env, &ctx).unwrap(), Value::from(7));
    }

    #[test]
    fn test_depth_limit_on_hand_built_tree() {
        let mut expr = Expr::literal(1);
        for _ in 0..10 {
            expr = Expr::neg(expr);
        }
        let env = Environment::new();

        assert_eq!(
            eval_expr(&expr, &env, &EvalContext::default()).unwrap(),
            Value::from(1)
        );
        let err = eval_expr(&expr, &env, &EvalContext::with_max_depth(4)).unwrap_err();
        assert_eq!(err, EvalError::DepthExceeded { max: 4 });
    }

    #[test]
    fn test_trace_does_not_change_result() {
        let env = Environment::new();
        let ctx = EvalContext::default().trace(true);
        let expr = Expr::binary(BinOp::Mul, Expr::literal(6), Expr::neg(Expr::literal(7)));
        assert_eq!(expr.eval(&env, &ctx).unwrap(), Value::from(-42));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(expr_kind_name(&Expr::variable("x")), "variable");
        assert_eq!(expr_kind_name(&Expr::neg(Expr::literal(1))), "negation");
    }
}
