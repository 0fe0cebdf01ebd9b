//! Session-style interpreter tying the pipeline together
//!
//! ```text
//! program text → [lexer] → tokens → [parser] → Program → [evaluator] → Environment
//! ```

use tracing::debug;

use crate::ast::Program;
use crate::environment::Bindings;
use crate::error::Result;
use crate::eval::exec_program;
use crate::lexer::{self, Token};
use crate::parser;
use crate::{Environment, EvalContext};

/// Output line reported for any failed execution.
pub const ERROR_OUTPUT: &str = "error";

/// An interpreter session.
///
/// The session owns its environment: variables assigned by one call to
/// [`Interpreter::execute`] are visible to every later call until
/// [`Interpreter::reset`].
///
/// # Example
///
/// ```
/// use quickbeam::Interpreter;
///
/// let mut interp = Interpreter::new();
/// assert_eq!(interp.run("x = 1; y = 2;"), "x = 1\ny = 2");
/// assert_eq!(interp.run("z = ---(x+y)*(x+-y);"), "x = 1\ny = 2\nz = 3");
/// assert_eq!(interp.run("w = undefined;"), "error");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    env: Environment,
    ctx: EvalContext,
}

impl Interpreter {
    /// Create an interpreter with an empty environment and default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an interpreter with custom settings.
    pub fn with_context(ctx: EvalContext) -> Self {
        Self {
            env: Environment::new(),
            ctx,
        }
    }

    /// Split a program into tokens.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for input outside the token vocabulary.
    pub fn tokenize(&self, program: &str) -> Result<Vec<Token>> {
        Ok(lexer::tokenize(program)?)
    }

    /// Tokenize and parse a program without evaluating it.
    ///
    /// # Errors
    ///
    /// Returns the first lexical or grammar error.
    pub fn parse(&self, program: &str) -> Result<Program> {
        let tokens = self.tokenize(program)?;
        Ok(parser::parse_with(&tokens, &self.ctx)?)
    }

    /// Run a program and return every binding in the session.
    ///
    /// Statements execute in order. Execution stops at the first error;
    /// statements before it stay committed unless the context is atomic,
    /// in which case the environment is restored to its state before the
    /// call.
    ///
    /// # Errors
    ///
    /// Returns the first lexical, grammar or evaluation error.
    pub fn execute(&mut self, program: &str) -> Result<Bindings> {
        let parsed = self.parse(program)?;

        let snapshot = self.ctx.atomic.then(|| self.env.clone());
        if let Err(err) = exec_program(&parsed, &mut self.env, &self.ctx) {
            if let Some(saved) = snapshot {
                self.env = saved;
            }
            debug!(kind = %err.kind(), error = %err, "execution failed");
            return Err(err.into());
        }

        debug!(bindings = self.env.len(), "executed program");
        Ok(self.env.bindings())
    }

    /// Run a program and render the result as text.
    ///
    /// On success this is one `name = value` line per binding; on any
    /// failure it is the single line `error`.
    pub fn run(&mut self, program: &str) -> String {
        match self.execute(program) {
            Ok(bindings) => bindings.to_string(),
            Err(err) => {
                debug!(kind = %err.kind(), error = %err, "reporting failure");
                ERROR_OUTPUT.to_string()
            }
        }
    }

    /// The session's environment.
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// The session's settings.
    pub fn context(&self) -> &EvalContext {
        &self.ctx
    }

    /// Forget every binding.
    pub fn reset(&mut self) {
        self.env.clear();
    }
}
