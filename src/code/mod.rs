//! Intermediate code model
//!
//! Adapters describe the work of a node as a short list of [`Operation`]s. Operands
//! are either variable references or nested operations, so chained arithmetic is a
//! tree that renders to a single Slang expression.

pub mod emit;
pub mod program;

use std::fmt;

pub use emit::SlangEmitter;
pub use program::{NodeProgram, ParameterDecl, ShaderProgram};

/// Binary arithmetic operators understood by the code model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
        }
    }

    fn precedence(self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Subtract => 1,
            BinaryOp::Multiply | BinaryOp::Divide => 2,
        }
    }
}

/// Operand of an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Reference to a generated variable
    Var(String),
    /// Result of a nested operation
    Op(Box<Operation>),
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Var(_) => u8::MAX,
            Expr::Op(op) => op.precedence(),
        }
    }
}

impl From<String> for Expr {
    fn from(name: String) -> Self {
        Expr::Var(name)
    }
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Expr::Var(name.to_string())
    }
}

impl From<Operation> for Expr {
    fn from(op: Operation) -> Self {
        Expr::Op(Box::new(op))
    }
}

/// One generated statement or expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Assign { target: String, value: Expr },
    Add(Expr, Expr),
    Subtract(Expr, Expr),
    Multiply(Expr, Expr),
    Divide(Expr, Expr),
}

impl Operation {
    pub fn assign(target: impl Into<String>, value: impl Into<Expr>) -> Self {
        Operation::Assign {
            target: target.into(),
            value: value.into(),
        }
    }

    pub fn add(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Operation::Add(lhs.into(), rhs.into())
    }

    pub fn binary(op: BinaryOp, lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        let (lhs, rhs) = (lhs.into(), rhs.into());
        match op {
            BinaryOp::Add => Operation::Add(lhs, rhs),
            BinaryOp::Subtract => Operation::Subtract(lhs, rhs),
            BinaryOp::Multiply => Operation::Multiply(lhs, rhs),
            BinaryOp::Divide => Operation::Divide(lhs, rhs),
        }
    }

    /// Operator and operands, for the arithmetic variants
    pub fn as_binary(&self) -> Option<(BinaryOp, &Expr, &Expr)> {
        match self {
            Operation::Add(lhs, rhs) => Some((BinaryOp::Add, lhs, rhs)),
            Operation::Subtract(lhs, rhs) => Some((BinaryOp::Subtract, lhs, rhs)),
            Operation::Multiply(lhs, rhs) => Some((BinaryOp::Multiply, lhs, rhs)),
            Operation::Divide(lhs, rhs) => Some((BinaryOp::Divide, lhs, rhs)),
            Operation::Assign { .. } => None,
        }
    }

    fn precedence(&self) -> u8 {
        match self.as_binary() {
            Some((op, _, _)) => op.precedence(),
            None => 0,
        }
    }

    /// Renders the operation as a complete statement, terminated by `;`
    pub fn to_statement(&self) -> String {
        match self {
            Operation::Assign { .. } => self.to_string(),
            _ => format!("{};", self),
        }
    }

    // Expression form, without the statement terminator
    fn write_expr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Assign { target, value } => {
                write!(f, "{} = ", target)?;
                write_operand(f, value, false)
            }
            _ => {
                let Some((op, lhs, rhs)) = self.as_binary() else {
                    return Ok(());
                };
                let precedence = op.precedence();
                write_operand(f, lhs, lhs.precedence() < precedence)?;
                write!(f, " {} ", op.symbol())?;
                // Right operands of equal precedence keep their grouping
                write_operand(f, rhs, rhs.precedence() <= precedence)
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, parenthesize: bool) -> fmt::Result {
    match expr {
        Expr::Var(name) => f.write_str(name),
        Expr::Op(op) if parenthesize || matches!(**op, Operation::Assign { .. }) => {
            f.write_str("(")?;
            op.write_expr(f)?;
            f.write_str(")")
        }
        Expr::Op(op) => op.write_expr(f),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_operand(f, self, false)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_expr(f)?;
        if matches!(self, Operation::Assign { .. }) {
            f.write_str(";")?;
        }
        Ok(())
    }
}
