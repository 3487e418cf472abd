pub mod ast;
pub mod error;

pub use ast::{
    EvaluationRequest, EvaluationResult, Evaluator, Operand, Operation, Operator,
    DEFAULT_PARALLEL_THRESHOLD, MAX_EXPRESSION_DEPTH,
};
pub use error::{Error, Result};

/// Evaluates a single operation or a batch with a default [`Evaluator`].
pub fn evaluate(request: &EvaluationRequest) -> Result<EvaluationResult> {
    Evaluator::new().evaluate(request)
}

/// Evaluates one operation tree with a default [`Evaluator`].
pub fn evaluate_one(operation: &Operation) -> f64 {
    Evaluator::new().evaluate_one(operation)
}

/// Evaluates a non-empty batch in order with a default [`Evaluator`].
pub fn evaluate_batch(operations: &[Operation]) -> Result<Vec<f64>> {
    Evaluator::new().evaluate_batch(operations)
}

/// Parses infix text such as `(1 + 2) * (1 / 5)` and evaluates it.
pub fn evaluate_expression(expression: &str) -> Result<f64> {
    let operand = ast::parse_operand(expression)?;
    Ok(Evaluator::new().evaluate_operand(&operand))
}

/// Decodes a JSON request in the `leftOperand`/`operator`/`rightOperand` shape and evaluates it.
pub fn evaluate_json(input: &str) -> Result<EvaluationResult> {
    let request = EvaluationRequest::from_json(input)?;
    evaluate(&request)
}
