//! Variable lookup

use crate::{Environment, EvalError, Value};

/// Read a variable from the environment.
///
/// # Errors
///
/// Returns `UndefinedVariable` when the name has never been assigned.
pub fn lookup(name: &str, env: &Environment) -> Result<Value, EvalError> {
    env.get(name)
        .cloned()
        .ok_or_else(|| EvalError::UndefinedVariable {
            name: name.to_string(),
        })
}
