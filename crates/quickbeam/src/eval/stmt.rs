//! Statement evaluation

use tracing::trace;

use crate::ast::{Program, Statement};
use crate::{Environment, EvalContext, EvalError, Value};

use super::Evaluate;

/// Execute one assignment, returning the value stored.
///
/// # Errors
///
/// Returns errors from evaluating the right-hand side; the environment is
/// left untouched in that case.
pub fn exec_stmt(
    stmt: &Statement,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let value = stmt.expression.eval(env, ctx)?;
    if ctx.trace {
        trace!(variable = %stmt.variable, %value, "assigned");
    }

    env.assign(stmt.variable.as_str(), value.clone());
    Ok(value)
}

/// Execute statements in order, stopping at the first failure.
///
/// Statements before the failing one remain committed.
///
/// # Errors
///
/// Returns the first evaluation error.
pub fn exec_program(
    program: &Program,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<(), EvalError> {
    for stmt in program {
        exec_stmt(stmt, env, ctx)?;
    }
    Ok(())
}
