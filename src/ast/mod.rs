use crate::error::Error;
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;

mod evaluator;
mod ops;
mod parser;
mod request;

pub use evaluator::*;
pub use parser::{parse_batch, parse_operand, parse_operation, MAX_EXPRESSION_DEPTH};
pub use request::*;

/// Either a numeric literal or a nested operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    Number(f64),
    Operation(Box<Operation>),
}

impl Operand {
    /// Resolves the operand to a number, recursing into nested operations.
    pub fn evaluate(&self) -> f64 {
        match self {
            Operand::Number(value) => *value,
            Operand::Operation(operation) => operation.evaluate(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        if let Operand::Number(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    pub fn as_operation(&self) -> Option<&Operation> {
        if let Operand::Operation(operation) = self {
            Some(operation)
        } else {
            None
        }
    }

    /// Number of nodes on the longest path from this operand to a literal.
    pub fn depth(&self) -> usize {
        match self {
            Operand::Number(_) => 1,
            Operand::Operation(operation) => operation.depth(),
        }
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Number(value)
    }
}

impl From<Operation> for Operand {
    fn from(value: Operation) -> Self {
        Operand::Operation(Box::new(value))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Number(value) => write!(f, "{value}"),
            Operand::Operation(operation) => write!(f, "({operation})"),
        }
    }
}

/// A binary arithmetic node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub left_operand: Operand,
    pub operator: Operator,
    pub right_operand: Operand,
}

impl Operation {
    pub fn new(
        left_operand: impl Into<Operand>,
        operator: Operator,
        right_operand: impl Into<Operand>,
    ) -> Self {
        Self {
            left_operand: left_operand.into(),
            operator,
            right_operand: right_operand.into(),
        }
    }

    /// Evaluates both operands depth-first, then applies the operator.
    pub fn evaluate(&self) -> f64 {
        let left = self.left_operand.evaluate();
        let right = self.right_operand.evaluate();
        let result = self.operator.apply(left, right);
        trace!("{left} {} {right} = {result}", self.operator);
        result
    }

    pub fn depth(&self) -> usize {
        1 + self.left_operand.depth().max(self.right_operand.depth())
    }
}

impl TryFrom<Operand> for Operation {
    type Error = Error;

    fn try_from(value: Operand) -> Result<Self, Self::Error> {
        match value {
            Operand::Operation(operation) => Ok(*operation),
            Operand::Number(value) => Err(Error::InvalidArgument(format!(
                "expected an operation, found literal {value}"
            ))),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.left_operand, self.operator, self.right_operand
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// Division follows IEEE-754, so a zero divisor yields `inf` or `NaN`.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<char> for Operator {
    type Error = Error;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Subtract),
            '*' => Ok(Operator::Multiply),
            '/' => Ok(Operator::Divide),
            _ => Err(Error::UnknownOperator(value.to_string())),
        }
    }
}

impl TryFrom<&str> for Operator {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => Operator::try_from(symbol),
            _ => Err(Error::UnknownOperator(value.to_string())),
        }
    }
}
