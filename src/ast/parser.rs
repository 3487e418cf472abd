use crate::ast::{Operand, Operation, Operator};
use crate::error::{Error, Result};
use log::debug;
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;
use std::str::FromStr;

/// Deepest tree, and deepest parenthesis nesting, the parser will build.
///
/// Evaluation, `Display` and `Drop` all recurse once per level, so longer
/// chains are rejected with `Error::Parse` instead of exhausting the stack.
pub const MAX_EXPRESSION_DEPTH: usize = 512;

#[derive(Parser)]
#[grammar = "ast/expression.pest"]
struct ExpressionParser;

/// Parses infix text such as `(1 + 2) * (1 / 5)` into an operand.
///
/// `*` and `/` bind tighter than `+` and `-`; all four are left-associative.
/// A lone literal is accepted and yields `Operand::Number`. Trees deeper than
/// [`MAX_EXPRESSION_DEPTH`] fail with `Error::Parse`.
pub fn parse_operand(input: &str) -> Result<Operand> {
    debug!("Parsing expression: {}", input);
    let mut pairs = ExpressionParser::parse(Rule::expression, input)
        .map_err(|e| Error::Parse(e.to_string()))?;
    let expression = next_pair(&mut pairs, "expression")?;
    let sum = next_pair(&mut expression.into_inner(), "expression")?;
    let (operand, depth) = build_sum(sum, 0)?;
    debug!("Built tree of depth {}", depth);
    Ok(operand)
}

/// Parses infix text that must contain at least one operator.
pub fn parse_operation(input: &str) -> Result<Operation> {
    Operation::try_from(parse_operand(input)?)
}

/// Parses `;`-separated operations into a batch.
///
/// # Errors
///
/// * `Error::Parse` on a syntax error, or an operation deeper than [`MAX_EXPRESSION_DEPTH`].
/// * `Error::InvalidArgument` if no operations are present, or one of them is a lone literal.
pub fn parse_batch(input: &str) -> Result<Vec<Operation>> {
    debug!("Parsing batch: {}", input);
    let mut pairs = ExpressionParser::parse(Rule::batch, input)
        .map_err(|e| Error::Parse(e.to_string()))?;
    let batch = next_pair(&mut pairs, "batch")?;

    let operations = batch
        .into_inner()
        .filter(|pair| pair.as_rule() == Rule::sum)
        .map(|pair| build_sum(pair, 0).and_then(|(operand, _)| Operation::try_from(operand)))
        .collect::<Result<Vec<_>>>()?;

    if operations.is_empty() {
        return Err(Error::empty_batch());
    }
    debug!("Parsed batch of {} operations", operations.len());
    Ok(operations)
}

fn next_pair<'i>(pairs: &mut Pairs<'i, Rule>, context: &str) -> Result<Pair<'i, Rule>> {
    pairs
        .next()
        .ok_or_else(|| Error::Parse(format!("Unexpected end of {}", context)))
}

fn check_depth(depth: usize) -> Result<usize> {
    if depth > MAX_EXPRESSION_DEPTH {
        Err(Error::Parse(format!(
            "Expression nests deeper than {} levels",
            MAX_EXPRESSION_DEPTH
        )))
    } else {
        Ok(depth)
    }
}

/// Folds a sum into a left-leaning tree, returning it with its depth.
///
/// `level` counts the enclosing parentheses.
fn build_sum(pair: Pair<Rule>, level: usize) -> Result<(Operand, usize)> {
    debug!("Building sum: {:?}", pair.as_str());
    let mut pairs = pair.into_inner();
    let (mut node, mut depth) = build_product(next_pair(&mut pairs, "sum")?, level)?;

    while let Some(operator_pair) = pairs.next() {
        let operator = build_operator(&operator_pair)?;
        let (right, right_depth) = build_product(next_pair(&mut pairs, "sum")?, level)?;
        depth = check_depth(1 + depth.max(right_depth))?;
        node = Operand::from(Operation::new(node, operator, right));
    }

    Ok((node, depth))
}

fn build_product(pair: Pair<Rule>, level: usize) -> Result<(Operand, usize)> {
    debug!("Building product: {:?}", pair.as_str());
    let mut pairs = pair.into_inner();
    let (mut node, mut depth) = build_factor(next_pair(&mut pairs, "product")?, level)?;

    while let Some(operator_pair) = pairs.next() {
        let operator = build_operator(&operator_pair)?;
        let (right, right_depth) = build_factor(next_pair(&mut pairs, "product")?, level)?;
        depth = check_depth(1 + depth.max(right_depth))?;
        node = Operand::from(Operation::new(node, operator, right));
    }

    Ok((node, depth))
}

fn build_factor(pair: Pair<Rule>, level: usize) -> Result<(Operand, usize)> {
    match pair.as_rule() {
        Rule::number => pair
            .as_str()
            .parse::<f64>()
            .map(|value| (Operand::Number(value), 1))
            .map_err(|e| Error::Parse(format!("Invalid number '{}': {}", pair.as_str(), e))),
        Rule::group => {
            check_depth(level + 1)?;
            build_sum(next_pair(&mut pair.into_inner(), "group")?, level + 1)
        }
        rule => Err(Error::Parse(format!("Unexpected rule in factor: {:?}", rule))),
    }
}

fn build_operator(pair: &Pair<Rule>) -> Result<Operator> {
    match pair.as_rule() {
        Rule::additive_operator | Rule::multiplicative_operator => {
            Operator::try_from(pair.as_str())
        }
        rule => Err(Error::Parse(format!("Unexpected operator rule: {:?}", rule))),
    }
}

impl FromStr for Operand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_operand(s)
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_operation(s)
    }
}
