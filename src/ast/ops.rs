//! Operator overloads that build trees instead of computing values.
//!
//! `Operand::from(1.0) + Operand::from(2.0)` is the operation `1 + 2`; nothing
//! is evaluated until [`Operand::evaluate`] is called.

use crate::ast::{Operand, Operation, Operator};
use std::ops::{Add, Div, Mul, Sub};

fn combine(left: Operand, operator: Operator, right: Operand) -> Operand {
    Operand::Operation(Box::new(Operation {
        left_operand: left,
        operator,
        right_operand: right,
    }))
}

impl Add for Operand {
    type Output = Operand;

    fn add(self, rhs: Self) -> Self::Output {
        combine(self, Operator::Add, rhs)
    }
}

impl Sub for Operand {
    type Output = Operand;

    fn sub(self, rhs: Self) -> Self::Output {
        combine(self, Operator::Subtract, rhs)
    }
}

impl Mul for Operand {
    type Output = Operand;

    fn mul(self, rhs: Self) -> Self::Output {
        combine(self, Operator::Multiply, rhs)
    }
}

impl Div for Operand {
    type Output = Operand;

    fn div(self, rhs: Self) -> Self::Output {
        combine(self, Operator::Divide, rhs)
    }
}

impl Add<f64> for Operand {
    type Output = Operand;

    fn add(self, rhs: f64) -> Self::Output {
        combine(self, Operator::Add, Operand::Number(rhs))
    }
}

impl Sub<f64> for Operand {
    type Output = Operand;

    fn sub(self, rhs: f64) -> Self::Output {
        combine(self, Operator::Subtract, Operand::Number(rhs))
    }
}

impl Mul<f64> for Operand {
    type Output = Operand;

    fn mul(self, rhs: f64) -> Self::Output {
        combine(self, Operator::Multiply, Operand::Number(rhs))
    }
}

impl Div<f64> for Operand {
    type Output = Operand;

    fn div(self, rhs: f64) -> Self::Output {
        combine(self, Operator::Divide, Operand::Number(rhs))
    }
}
