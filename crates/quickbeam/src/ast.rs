//! Abstract syntax tree for Quickbeam programs

use std::fmt;
use std::mem;

use serde::{Serialize, Serializer};

use crate::value::{self, Value};

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
}

impl BinOp {
    /// The operator as written in source.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
        }
    }
}

/// An expression tree.
///
/// Each node exclusively owns its children. Left-associative chains such as
/// `1 + 1 + ... + 1` nest to the left and are as deep as they are long, so
/// every trait that walks a tree (`Display`, `Debug`, `Serialize`, `Clone`,
/// `PartialEq`, `Drop`) follows the left spine in a loop and only recurses
/// into right operands and negations.
pub enum Expr {
    /// Integer literal
    Literal(Value),

    /// Read of a previously assigned variable
    Variable(String),

    /// Unary negation `-operand`
    UnaryMinus(Box<Expr>),

    /// `left op right`
    Binary {
        /// The operator
        op: BinOp,
        /// Left operand
        left: Box<Expr>,
        /// Right operand
        right: Box<Expr>,
    },
}

impl Expr {
    /// Build a literal node.
    pub fn literal(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    /// Build a variable node.
    pub fn variable(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    /// Build a negation node.
    pub fn neg(operand: Expr) -> Self {
        Expr::UnaryMinus(Box::new(operand))
    }

    /// Build a binary node.
    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Split a left-nested chain into its innermost left operand and the
    /// `(op, right)` steps applied to it, innermost first.
    ///
    /// A non-binary node is its own head with no steps.
    ///
    /// ```
    /// use quickbeam::{BinOp, Expr};
    ///
    /// // (5 - 2) - 1
    /// let expr = Expr::binary(
    ///     BinOp::Sub,
    ///     Expr::binary(BinOp::Sub, Expr::literal(5), Expr::literal(2)),
    ///     Expr::literal(1),
    /// );
    /// let (head, steps) = expr.left_spine();
    /// assert_eq!(head, &Expr::literal(5));
    /// assert_eq!(steps.len(), 2);
    /// ```
    pub fn left_spine(&self) -> (&Expr, Vec<(BinOp, &Expr)>) {
        let mut steps = Vec::new();
        let mut node = self;
        while let Expr::Binary { op, left, right } = node {
            steps.push((*op, right.as_ref()));
            node = left;
        }
        steps.reverse();
        (node, steps)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Tree Walking
// ═══════════════════════════════════════════════════════════════════════

impl Drop for Expr {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        detach_children(self, &mut stack);
        while let Some(mut expr) = stack.pop() {
            detach_children(&mut expr, &mut stack);
        }
    }
}

fn detach_children(expr: &mut Expr, stack: &mut Vec<Expr>) {
    let placeholder = || Expr::Literal(Value::default());
    match expr {
        Expr::UnaryMinus(operand) => stack.push(mem::replace(operand.as_mut(), placeholder())),
        Expr::Binary { left, right, .. } => {
            stack.push(mem::replace(left.as_mut(), placeholder()));
            stack.push(mem::replace(right.as_mut(), placeholder()));
        }
        Expr::Literal(_) | Expr::Variable(_) => {}
    }
}

impl Clone for Expr {
    fn clone(&self) -> Self {
        match self {
            Expr::Literal(value) => Expr::Literal(value.clone()),
            Expr::Variable(name) => Expr::Variable(name.clone()),
            Expr::UnaryMinus(operand) => Expr::UnaryMinus(operand.clone()),
            Expr::Binary { .. } => {
                let (head, steps) = self.left_spine();
                steps
                    .into_iter()
                    .fold(head.clone(), |acc, (op, right)| {
                        Expr::binary(op, acc, right.clone())
                    })
            }
        }
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Expr::Literal(a), Expr::Literal(b)) => a == b,
            (Expr::Variable(a), Expr::Variable(b)) => a == b,
            (Expr::UnaryMinus(a), Expr::UnaryMinus(b)) => a == b,
            (Expr::Binary { .. }, Expr::Binary { .. }) => {
                self.left_spine() == other.left_spine()
            }
            _ => false,
        }
    }
}

impl Eq for Expr {}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Expr::Variable(name) => f.debug_tuple("Variable").field(name).finish(),
            Expr::UnaryMinus(operand) => f.debug_tuple("UnaryMinus").field(operand).finish(),
            Expr::Binary { .. } => {
                let (head, steps) = self.left_spine();
                f.debug_struct("Binary")
                    .field("head", head)
                    .field("tail", &steps)
                    .finish()
            }
        }
    }
}

/// Writes the expression back as source, parenthesizing every binary node
/// so the tree shape is visible.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(value) => write!(f, "{}", value),
            Expr::Variable(name) => f.write_str(name),
            Expr::UnaryMinus(operand) => write!(f, "-{}", operand),
            Expr::Binary { .. } => {
                let (head, steps) = self.left_spine();
                for _ in &steps {
                    f.write_str("(")?;
                }
                write!(f, "{}", head)?;
                for (op, right) in steps {
                    write!(f, " {} {})", op.symbol(), right)?;
                }
                Ok(())
            }
        }
    }
}

/// JSON shape of a binary chain: the innermost left operand, then each
/// operator with its right operand.
#[derive(Serialize)]
struct Chain<'a> {
    head: &'a Expr,
    tail: Vec<ChainStep<'a>>,
}

#[derive(Serialize)]
struct ChainStep<'a> {
    op: BinOp,
    operand: &'a Expr,
}

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Expr::Literal(literal) => {
                serializer.serialize_newtype_variant("Expr", 0, "Literal", &value::Json(literal))
            }
            Expr::Variable(name) => serializer.serialize_newtype_variant("Expr", 1, "Variable", name),
            Expr::UnaryMinus(operand) => {
                serializer.serialize_newtype_variant("Expr", 2, "UnaryMinus", operand)
            }
            Expr::Binary { .. } => {
                let (head, steps) = self.left_spine();
                let chain = Chain {
                    head,
                    tail: steps
                        .into_iter()
                        .map(|(op, operand)| ChainStep { op, operand })
                        .collect(),
                };
                serializer.serialize_newtype_variant("Expr", 3, "Binary", &chain)
            }
        }
    }
}

/// A single assignment `variable = expression;`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    /// The variable being assigned
    pub variable: String,

    /// Right-hand side
    pub expression: Expr,
}

impl Statement {
    /// Create a new assignment statement.
    pub fn new(variable: impl Into<String>, expression: Expr) -> Self {
        Self {
            variable: variable.into(),
            expression,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {};", self.variable, self.expression)
    }
}

/// A parsed program: assignments in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Program {
    /// The statements, in source order
    pub statements: Vec<Statement>,
}

impl Program {
    /// Number of statements.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Check if the program has no statements.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Iterate over the statements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}
