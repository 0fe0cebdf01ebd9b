//! # Quickbeam
//!
//! A tree-walking interpreter for a tiny assignment language.
//!
//! A program is a sequence of assignments such as `x = 1; y = -(x + 2) * 3;`.
//! Right-hand sides are integer expressions over literals, earlier
//! variables, unary minus and the binary operators `+`, `-` and `*`, with
//! arbitrary-precision arithmetic.
//!
//! ## Architecture
//!
//! - **Lexer**: `logos`-generated tokenizer with a coverage check
//! - **Parser**: recursive descent over the token slice with an explicit cursor
//! - **Evaluator**: walks the AST against an ordered [`Environment`]
//! - **Interpreter**: a session that keeps its environment between programs
//!
//! ```
//! use quickbeam::Interpreter;
//!
//! let mut interp = Interpreter::new();
//! assert_eq!(interp.run("x = 5-2-1; y = (2+3)*4;"), "x = 2\ny = 20");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod context;
pub mod environment;
pub mod error;
pub mod eval;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod value;

// Re-export main types
pub use ast::{BinOp, Expr, Program, Statement};
pub use context::{EvalContext, DEFAULT_MAX_DEPTH};
pub use environment::{Bindings, Environment};
pub use error::{ErrorKind, EvalError, LexError, ParseError, QuickbeamError, Result};
pub use eval::{eval_expr, exec_program, exec_stmt, Evaluate};
pub use interpreter::{Interpreter, ERROR_OUTPUT};
pub use lexer::{tokenize, verify_coverage, Operator, Token, TokenKind};
pub use parser::{parse, parse_with, Parser};
pub use value::Value;

/// Quickbeam version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
