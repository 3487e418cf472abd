use crate::ast::{EvaluationRequest, EvaluationResult, Operand, Operation};
use crate::error::{Error, Result};
use log::debug;
use rayon::prelude::*;

/// Batches at least this long are evaluated on the rayon pool by default.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// Evaluates operation trees, one at a time or in batches.
///
/// The evaluator carries configuration only. It keeps nothing between calls,
/// so a single instance can be shared across threads.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Evaluator {
    parallel_threshold: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Creates an evaluator using [`DEFAULT_PARALLEL_THRESHOLD`].
    pub fn new() -> Self {
        Self::with_parallel_threshold(DEFAULT_PARALLEL_THRESHOLD)
    }

    /// Creates an evaluator that parallelises batches of `threshold` or more operations.
    pub fn with_parallel_threshold(threshold: usize) -> Self {
        Self {
            parallel_threshold: threshold,
        }
    }

    /// Creates an evaluator that never leaves the calling thread.
    pub fn sequential() -> Self {
        Self::with_parallel_threshold(usize::MAX)
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Evaluates a request, returning a result of the same shape.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidArgument` if the request is an empty batch.
    pub fn evaluate(&self, request: &EvaluationRequest) -> Result<EvaluationResult> {
        match request {
            EvaluationRequest::Single(operation) => {
                debug!("Evaluating single operation: {}", operation);
                Ok(EvaluationResult::Single(self.evaluate_one(operation)))
            }
            EvaluationRequest::Batch(operations) => {
                Ok(EvaluationResult::Batch(self.evaluate_batch(operations)?))
            }
        }
    }

    /// Evaluates a single operation tree.
    pub fn evaluate_one(&self, operation: &Operation) -> f64 {
        operation.evaluate()
    }

    /// Evaluates an operand, which may be a bare literal.
    pub fn evaluate_operand(&self, operand: &Operand) -> f64 {
        operand.evaluate()
    }

    /// Evaluates each operation independently, preserving input order.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidArgument` if `operations` is empty.
    pub fn evaluate_batch(&self, operations: &[Operation]) -> Result<Vec<f64>> {
        if operations.is_empty() {
            return Err(Error::empty_batch());
        }

        if operations.len() >= self.parallel_threshold {
            debug!("Evaluating batch of {} operations in parallel", operations.len());
            Ok(operations.par_iter().map(Operation::evaluate).collect())
        } else {
            debug!("Evaluating batch of {} operations", operations.len());
            Ok(operations.iter().map(Operation::evaluate).collect())
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ast::Operator;
    use rand::Rng;

    fn sample() -> Operation {
        Operation::new(
            Operation::new(1.0, Operator::Add, 2.0),
            Operator::Multiply,
            Operation::new(1.0, Operator::Divide, 5.0),
        )
    }

    fn random_operand(rng: &mut impl Rng, depth: usize) -> Operand {
        if depth == 0 || rng.random_bool(0.3) {
            Operand::Number(rng.random_range(-100.0..100.0))
        } else {
            Operand::from(random_operation(rng, depth - 1))
        }
    }

    pub(crate) fn random_operation(rng: &mut impl Rng, depth: usize) -> Operation {
        let operator = Operator::ALL[rng.random_range(0..Operator::ALL.len())];
        Operation::new(
            random_operand(rng, depth),
            operator,
            random_operand(rng, depth),
        )
    }

    fn random_batch(len: usize) -> Vec<Operation> {
        let mut rng = rand::rng();
        (0..len).map(|_| random_operation(&mut rng, 6)).collect()
    }

    fn bits(values: &[f64]) -> Vec<u64> {
        values.iter().map(|value| value.to_bits()).collect()
    }

    #[test]
    fn test_single_request() {
        let evaluator = Evaluator::new();
        let result = evaluator
            .evaluate(&EvaluationRequest::Single(sample()))
            .unwrap();
        let value = result.as_number().unwrap();
        assert!((value - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_literal_operations() {
        let evaluator = Evaluator::new();
        let cases = [
            (6.0, Operator::Add, 3.0, 9.0),
            (6.0, Operator::Subtract, 3.0, 3.0),
            (6.0, Operator::Multiply, 3.0, 18.0),
            (6.0, Operator::Divide, 3.0, 2.0),
            (-6.0, Operator::Divide, 4.0, -1.5),
        ];
        for (left, operator, right, expected) in cases {
            let operation = Operation::new(left, operator, right);
            assert_eq!(evaluator.evaluate_one(&operation), expected);
        }
    }

    #[test]
    fn test_literal_operand() {
        let evaluator = Evaluator::new();
        assert_eq!(evaluator.evaluate_operand(&Operand::Number(12.5)), 12.5);
    }

    #[test]
    fn test_division_by_zero_propagates() {
        let evaluator = Evaluator::new();
        let operation = Operation::new(
            Operation::new(1.0, Operator::Divide, 0.0),
            Operator::Add,
            1.0,
        );
        assert_eq!(evaluator.evaluate_one(&operation), f64::INFINITY);

        let operation = Operation::new(0.0, Operator::Divide, 0.0);
        assert!(evaluator.evaluate_one(&operation).is_nan());
    }

    #[test]
    fn test_batch_preserves_order_and_count() {
        let evaluator = Evaluator::new();
        let operations = vec![
            Operation::new(1.0, Operator::Add, 1.0),
            Operation::new(10.0, Operator::Subtract, 4.0),
            Operation::new(3.0, Operator::Multiply, 3.0),
            Operation::new(1.0, Operator::Divide, 4.0),
        ];
        let results = evaluator.evaluate_batch(&operations).unwrap();
        assert_eq!(results, vec![2.0, 6.0, 9.0, 0.25]);
    }

    #[test]
    fn test_batch_request_shape() {
        let evaluator = Evaluator::new();
        let request = EvaluationRequest::Batch(vec![sample()]);
        let result = evaluator.evaluate(&request).unwrap();
        assert_eq!(result.as_number(), None);
        assert_eq!(result.as_batch().map(|values| values.len()), Some(1));
    }

    #[test]
    fn test_empty_batch_fails() {
        let evaluator = Evaluator::new();
        let expected = Err(Error::InvalidArgument(
            "operation list is empty".to_string(),
        ));
        assert_eq!(evaluator.evaluate_batch(&[]), expected);
        assert_eq!(
            evaluator
                .evaluate(&EvaluationRequest::Batch(Vec::new()))
                .map(EvaluationResult::into_vec),
            expected
        );
    }

    #[test]
    fn test_single_matches_batch_of_one() {
        let evaluator = Evaluator::new();
        for operation in random_batch(32) {
            let single = evaluator.evaluate_one(&operation);
            let batch = evaluator
                .evaluate_batch(std::slice::from_ref(&operation))
                .unwrap();
            assert_eq!(batch.len(), 1);
            assert_eq!(single.to_bits(), batch[0].to_bits());
        }
    }

    #[test]
    fn test_batch_element_matches_single_evaluation() {
        let evaluator = Evaluator::new();
        let operations = random_batch(64);
        let results = evaluator.evaluate_batch(&operations).unwrap();
        assert_eq!(results.len(), operations.len());
        for (operation, result) in operations.iter().zip(&results) {
            assert_eq!(evaluator.evaluate_one(operation).to_bits(), result.to_bits());
        }
    }

    #[test]
    fn test_repeated_evaluation_is_identical() {
        let evaluator = Evaluator::new();
        let operations = random_batch(16);
        let before = operations.clone();
        let first = evaluator.evaluate_batch(&operations).unwrap();
        let second = evaluator.evaluate_batch(&operations).unwrap();
        assert_eq!(bits(&first), bits(&second));
        assert_eq!(operations, before);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let operations = random_batch(2048);
        let sequential = Evaluator::sequential()
            .evaluate_batch(&operations)
            .unwrap();
        let parallel = Evaluator::with_parallel_threshold(1)
            .evaluate_batch(&operations)
            .unwrap();
        assert_eq!(bits(&sequential), bits(&parallel));
    }

    #[test]
    fn test_configuration() {
        assert_eq!(
            Evaluator::default().parallel_threshold(),
            DEFAULT_PARALLEL_THRESHOLD
        );
        assert_eq!(Evaluator::sequential().parallel_threshold(), usize::MAX);
        assert_eq!(Evaluator::with_parallel_threshold(8).parallel_threshold(), 8);
    }

    #[test]
    fn test_evaluator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Evaluator>();
        assert_send_sync::<Operation>();
    }
}
