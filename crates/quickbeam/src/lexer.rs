//! Tokenizer for Quickbeam programs
//!
//! The lexer is generated by `logos`. Every token records the text it was
//! matched from, so a token stream can always be checked against the source
//! it claims to cover.

use std::fmt;
use std::ops::Range;

use logos::Logos;
use tracing::debug;

use crate::error::LexError;
use crate::Value;

/// Arithmetic operator symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+`
    Plus,
    /// `-`, binary subtraction or unary negation
    Minus,
    /// `*`
    Star,
}

impl Operator {
    /// The operator as written in source.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Star => "*",
        }
    }
}

/// Reason a lexeme was rejected by the generated lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexFault {
    /// No token pattern matches
    #[default]
    Unrecognized,
    /// Digit run with a leading zero
    LeadingZero,
}

impl LexFault {
    fn into_error(self, text: String, offset: usize) -> LexError {
        match self {
            LexFault::Unrecognized => LexError::UnrecognizedInput { text, offset },
            LexFault::LeadingZero => LexError::LeadingZero { text, offset },
        }
    }
}

/// Classification of a lexeme.
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(error = LexFault)]
#[logos(skip r"\s+")]
pub enum TokenKind {
    /// Variable names such as `x` or `x_2`
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,

    /// Integer literals of any length; `0` or a digit run without a
    /// leading zero.
    ///
    /// The whole digit run is matched so that `007` is rejected as one
    /// malformed literal instead of being split into `0`, `0`, `7`.
    #[regex(r"[0-9]+", parse_literal)]
    Literal(Value),

    /// `+`, `-`, `*`
    #[token("+", |_| Operator::Plus)]
    #[token("-", |_| Operator::Minus)]
    #[token("*", |_| Operator::Star)]
    Operator(Operator),

    /// `=`
    #[token("=")]
    Assign,

    /// `;`
    #[token(";")]
    Semicolon,

    /// `(`
    #[token("(")]
    LParen,

    /// `)`
    #[token(")")]
    RParen,
}

fn parse_literal(lex: &mut logos::Lexer<TokenKind>) -> Result<Value, LexFault> {
    let digits = lex.slice();
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(LexFault::LeadingZero);
    }
    digits.parse().map_err(|_| LexFault::Unrecognized)
}

/// A classified lexeme with its source text and byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What the lexeme is
    pub kind: TokenKind,

    /// The raw text as written
    pub text: String,

    /// Byte range in the program
    pub span: Range<usize>,
}

impl Token {
    /// Byte offset of the first character.
    pub fn offset(&self) -> usize {
        self.span.start
    }

    /// Check whether this token is the given operator.
    pub fn is_operator(&self, op: Operator) -> bool {
        self.kind == TokenKind::Operator(op)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` at offset {}", self.text, self.span.start)
    }
}

/// Split a program into tokens.
///
/// Whitespace separates tokens and is otherwise dropped.
///
/// # Errors
///
/// Returns `LexError` for any character sequence outside the token
/// vocabulary and for literals with a leading zero.
pub fn tokenize(program: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = TokenKind::lexer(program);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let text = lexer.slice().to_string();
        let span = lexer.span();
        match result {
            Ok(kind) => tokens.push(Token { kind, text, span }),
            Err(fault) => return Err(fault.into_error(text, span.start)),
        }
    }

    verify_coverage(program, &tokens)?;
    debug!(tokens = tokens.len(), "tokenized program");
    Ok(tokens)
}

/// Check that the tokens account for every non-whitespace character.
///
/// The generated lexer already fails on any unmatched character, so from
/// [`tokenize`] this is an invariant check that only a lexer bug could trip.
///
/// # Errors
///
/// Returns `LexError::IncompleteCoverage` when the concatenated token text
/// differs from the program with whitespace removed.
pub fn verify_coverage(program: &str, tokens: &[Token]) -> Result<(), LexError> {
    let expected: String = program.chars().filter(|c| !c.is_whitespace()).collect();
    let matched: String = tokens.iter().map(|t| t.text.as_str()).collect();

    if expected == matched {
        Ok(())
    } else {
        Err(LexError::IncompleteCoverage { expected, matched })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(program: &str) -> Vec<TokenKind> {
        tokenize(program)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_full_vocabulary() {
        assert_eq!(
            kinds("x_2 = (1 + y) * -0;"),
            vec![
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::LParen,
                TokenKind::Literal(Value::from(1)),
                TokenKind::Operator(Operator::Plus),
                TokenKind::Identifier,
                TokenKind::RParen,
                TokenKind::Operator(Operator::Star),
                TokenKind::Operator(Operator::Minus),
                TokenKind::Literal(Value::from(0)),
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn test_tokens_keep_text_and_span() {
        let tokens = tokenize("  abc=12;").unwrap();
        assert_eq!(tokens[0].text, "abc");
        assert_eq!(tokens[0].span, 2..5);
        assert_eq!(tokens[2].text, "12");
        assert_eq!(tokens[2].offset(), 6);
        assert_eq!(tokens[2].to_string(), "`12` at offset 6");
    }

    #[test]
    fn test_leading_zero_rejected() {
        let err = tokenize("x = 007;").unwrap_err();
        assert_eq!(
            err,
            LexError::LeadingZero {
                text: "007".to_string(),
                offset: 4
            }
        );
    }

    #[test]
    fn test_zero_alone_accepted() {
        assert_eq!(kinds("0"), vec![TokenKind::Literal(Value::from(0))]);
    }

    #[test]
    fn test_literal_has_no_size_limit() {
        let huge = "9".repeat(60);
        let tokens = tokenize(&huge).unwrap();
        let expected: Value = huge.parse().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Literal(expected));
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        let err = tokenize("x = 4 / 2;").unwrap_err();
        assert_eq!(
            err,
            LexError::UnrecognizedInput {
                text: "/".to_string(),
                offset: 6
            }
        );
    }

    #[test]
    fn test_digits_then_letters_split() {
        assert_eq!(
            kinds("12abc"),
            vec![TokenKind::Literal(Value::from(12)), TokenKind::Identifier]
        );
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert!(tokenize(" \t\n ").unwrap().is_empty());
    }

    #[test]
    fn test_verify_coverage_detects_gap() {
        let tokens = tokenize("x = 1;").unwrap();
        let err = verify_coverage("x = 1 ;;", &tokens).unwrap_err();
        assert!(matches!(err, LexError::IncompleteCoverage { .. }));
    }

    #[test]
    fn test_operator_symbols() {
        assert_eq!(Operator::Plus.symbol(), "+");
        assert_eq!(Operator::Minus.symbol(), "-");
        assert_eq!(Operator::Star.symbol(), "*");
    }
}
