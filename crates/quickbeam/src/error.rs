//! Error types for Quickbeam evaluation

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Coarse classification of every failure the interpreter can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Lexical or grammatical error in the program text
    #[serde(rename = "SyntaxError")]
    Syntax,

    /// Reference to a variable that has not been assigned
    #[serde(rename = "NameError")]
    Name,

    /// Expression that cannot be reduced to a valid integer
    #[serde(rename = "InvalidExpression")]
    InvalidExpression,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::Name => "NameError",
            ErrorKind::InvalidExpression => "InvalidExpression",
        })
    }
}

/// Errors raised while turning program text into tokens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// Characters outside the token vocabulary
    #[error("unrecognized input `{text}` at offset {offset}")]
    UnrecognizedInput {
        /// The offending source text
        text: String,
        /// Byte offset into the program
        offset: usize,
    },

    /// Integer literal such as `007`
    #[error("integer literal `{text}` at offset {offset} has a leading zero")]
    LeadingZero {
        /// The literal as written
        text: String,
        /// Byte offset into the program
        offset: usize,
    },

    /// Concatenated token text differs from the whitespace-stripped input
    #[error("tokens cover `{matched}` but the program is `{expected}`")]
    IncompleteCoverage {
        /// Whitespace-stripped program
        expected: String,
        /// Concatenation of all token texts
        matched: String,
    },
}

/// Grammar violations found by the parser.
///
/// `found` always describes the offending token together with its offset,
/// or reads `end of input`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A statement must start with the variable being assigned
    #[error("expected a variable name, found {found}")]
    ExpectedIdentifier {
        /// Description of the token found instead
        found: String,
    },

    /// The variable name must be followed by `=`
    #[error("expected `=` after `{name}`, found {found}")]
    ExpectedAssign {
        /// The variable being assigned
        name: String,
        /// Description of the token found instead
        found: String,
    },

    /// Every statement ends with `;`
    #[error("expected `;` to end the assignment, found {found}")]
    ExpectedSemicolon {
        /// Description of the token found instead
        found: String,
    },

    /// A `(` without its matching `)`
    #[error("expected `)` to close `(` at offset {open}, found {found}")]
    UnclosedParen {
        /// Offset of the opening parenthesis
        open: usize,
        /// Description of the token found instead
        found: String,
    },

    /// Nothing in factor position can start an operand
    #[error("expected a number, variable, `-` or `(`, found {found}")]
    InvalidFactor {
        /// Description of the token found instead
        found: String,
    },

    /// Parentheses or negations nested beyond the configured limit
    #[error("expression nesting exceeds maximum depth of {max} at {found}")]
    NestingTooDeep {
        /// The configured limit
        max: usize,
        /// Where the limit was hit
        found: String,
    },
}

/// Errors raised while evaluating a parsed program.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Variable read before any assignment
    #[error("uninitialized variable `{name}`")]
    UndefinedVariable {
        /// The variable name
        name: String,
    },

    /// Expression tree deeper than the configured limit
    #[error("expression nesting exceeds maximum depth of {max}")]
    DepthExceeded {
        /// The configured limit
        max: usize,
    },
}

impl EvalError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::UndefinedVariable { .. } => ErrorKind::Name,
            EvalError::DepthExceeded { .. } => ErrorKind::InvalidExpression,
        }
    }
}

/// Main error type for Quickbeam operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuickbeamError {
    /// Tokenization failed
    #[error("{}: {}", ErrorKind::Syntax, .0)]
    Lex(#[from] LexError),

    /// Parsing failed
    #[error("{}: {}", ErrorKind::Syntax, .0)]
    Parse(#[from] ParseError),

    /// Evaluation failed
    #[error("{}: {}", .0.kind(), .0)]
    Eval(#[from] EvalError),
}

impl QuickbeamError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuickbeamError::Lex(_) | QuickbeamError::Parse(_) => ErrorKind::Syntax,
            QuickbeamError::Eval(e) => e.kind(),
        }
    }
}

/// Result type alias for Quickbeam operations
pub type Result<T> = std::result::Result<T, QuickbeamError>;
