//! Recursive-descent parser
//!
//! Grammar, from loosest to tightest binding:
//!
//! ```text
//! program    := statement*
//! statement  := IDENTIFIER '=' expression ';'
//! expression := term (('+' | '-') term)*
//! term       := factor ('*' factor)*
//! factor     := '(' expression ')' | '-' factor | LITERAL | IDENTIFIER
//! ```
//!
//! Every sub-parser takes the cursor position and returns the node it built
//! together with the position just past it. Nothing is consumed on failure,
//! so the parser itself holds no mutable state.

use tracing::debug;

use crate::ast::{BinOp, Expr, Program, Statement};
use crate::context::{EvalContext, DEFAULT_MAX_DEPTH};
use crate::error::ParseError;
use crate::lexer::{Operator, Token, TokenKind};

/// Result type for parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// A parsed node and the cursor position just past it.
type Step<T> = ParseResult<(T, usize)>;

/// Parser over a borrowed token slice.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'a> {
    tokens: &'a [Token],
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser with the default nesting limit.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self::with_max_depth(tokens, DEFAULT_MAX_DEPTH)
    }

    /// Create a parser with a custom nesting limit.
    pub fn with_max_depth(tokens: &'a [Token], max_depth: usize) -> Self {
        Self { tokens, max_depth }
    }

    /// Parse every statement in the token stream.
    ///
    /// # Errors
    ///
    /// Returns the first grammar violation encountered.
    pub fn parse_program(&self) -> ParseResult<Program> {
        let mut statements = Vec::new();
        let mut pos = 0;

        while pos < self.tokens.len() {
            let (stmt, next) = self.statement(pos)?;
            statements.push(stmt);
            pos = next;
        }

        debug!(statements = statements.len(), "parsed program");
        Ok(Program { statements })
    }

    /// `statement := IDENTIFIER '=' expression ';'`
    pub fn statement(&self, pos: usize) -> Step<Statement> {
        let variable = match self.tokens.get(pos) {
            Some(tok) if tok.kind == TokenKind::Identifier => tok.text.clone(),
            other => {
                return Err(ParseError::ExpectedIdentifier {
                    found: describe(other),
                })
            }
        };

        match self.tokens.get(pos + 1) {
            Some(tok) if tok.kind == TokenKind::Assign => {}
            other => {
                return Err(ParseError::ExpectedAssign {
                    name: variable,
                    found: describe(other),
                })
            }
        }

        let (expression, pos) = self.expression(pos + 2, 0)?;

        match self.tokens.get(pos) {
            Some(tok) if tok.kind == TokenKind::Semicolon => {
                Ok((Statement::new(variable, expression), pos + 1))
            }
            other => Err(ParseError::ExpectedSemicolon {
                found: describe(other),
            }),
        }
    }

    /// `expression := term (('+' | '-') term)*`, folded to the left.
    pub fn expression(&self, pos: usize, depth: usize) -> Step<Expr> {
        let (mut left, mut pos) = self.term(pos, depth)?;

        while let Some(op) = self.additive_op(pos) {
            let (right, next) = self.term(pos + 1, depth + 1)?;
            left = Expr::binary(op, left, right);
            pos = next;
        }

        Ok((left, pos))
    }

    /// `term := factor ('*' factor)*`, folded to the left.
    pub fn term(&self, pos: usize, depth: usize) -> Step<Expr> {
        let (mut left, mut pos) = self.factor(pos, depth)?;

        while self.is_operator(pos, Operator::Star) {
            let (right, next) = self.factor(pos + 1, depth + 1)?;
            left = Expr::binary(BinOp::Mul, left, right);
            pos = next;
        }

        Ok((left, pos))
    }

    /// `factor := '(' expression ')' | '-' factor | LITERAL | IDENTIFIER`
    pub fn factor(&self, pos: usize, depth: usize) -> Step<Expr> {
        let token = self.tokens.get(pos);

        if depth > self.max_depth {
            return Err(ParseError::NestingTooDeep {
                max: self.max_depth,
                found: describe(token),
            });
        }

        let Some(tok) = token else {
            return Err(ParseError::InvalidFactor {
                found: describe(None),
            });
        };

        match &tok.kind {
            TokenKind::LParen => {
                let (inner, next) = self.expression(pos + 1, depth + 1)?;
                match self.tokens.get(next) {
                    Some(close) if close.kind == TokenKind::RParen => Ok((inner, next + 1)),
                    other => Err(ParseError::UnclosedParen {
                        open: tok.offset(),
                        found: describe(other),
                    }),
                }
            }
            TokenKind::Operator(Operator::Minus) => {
                let (operand, next) = self.factor(pos + 1, depth + 1)?;
                Ok((Expr::neg(operand), next))
            }
            TokenKind::Literal(value) => Ok((Expr::literal(value.clone()), pos + 1)),
            TokenKind::Identifier => Ok((Expr::variable(tok.text.as_str()), pos + 1)),
            _ => Err(ParseError::InvalidFactor {
                found: describe(token),
            }),
        }
    }

    fn additive_op(&self, pos: usize) -> Option<BinOp> {
        match self.tokens.get(pos).map(|t| &t.kind) {
            Some(TokenKind::Operator(Operator::Plus)) => Some(BinOp::Add),
            Some(TokenKind::Operator(Operator::Minus)) => Some(BinOp::Sub),
            _ => None,
        }
    }

    fn is_operator(&self, pos: usize, op: Operator) -> bool {
        self.tokens.get(pos).is_some_and(|t| t.is_operator(op))
    }
}

/// Describe a token (or its absence) for an error message.
fn describe(token: Option<&Token>) -> String {
    match token {
        Some(tok) => tok.to_string(),
        None => "end of input".to_string(),
    }
}

/// Parse a token stream with the default nesting limit (convenience wrapper).
///
/// # Errors
///
/// Returns the first grammar violation encountered.
pub fn parse(tokens: &[Token]) -> ParseResult<Program> {
    Parser::new(tokens).parse_program()
}

/// Parse a token stream with the nesting limit from `ctx`.
///
/// # Errors
///
/// Returns the first grammar violation encountered.
pub fn parse_with(tokens: &[Token], ctx: &EvalContext) -> ParseResult<Program> {
    Parser::with_max_depth(tokens, ctx.max_depth).parse_program()
}
