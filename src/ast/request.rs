use crate::ast::Operation;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One operation, or an ordered batch of independent operations.
///
/// Deserializes from either a single JSON object or an array of objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EvaluationRequest {
    Single(Operation),
    Batch(Vec<Operation>),
}

impl EvaluationRequest {
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn len(&self) -> usize {
        match self {
            EvaluationRequest::Single(_) => 1,
            EvaluationRequest::Batch(operations) => operations.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Operation> for EvaluationRequest {
    fn from(value: Operation) -> Self {
        EvaluationRequest::Single(value)
    }
}

impl From<Vec<Operation>> for EvaluationRequest {
    fn from(value: Vec<Operation>) -> Self {
        EvaluationRequest::Batch(value)
    }
}

/// Result shaped like the request that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EvaluationResult {
    Single(f64),
    Batch(Vec<f64>),
}

impl EvaluationResult {
    /// Returns the value of a single-operation result.
    pub fn as_number(&self) -> Option<f64> {
        if let EvaluationResult::Single(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    /// Returns the values of a batch result, in request order.
    pub fn as_batch(&self) -> Option<&[f64]> {
        if let EvaluationResult::Batch(values) = self {
            Some(values)
        } else {
            None
        }
    }

    /// Flattens either shape into a vector.
    pub fn into_vec(self) -> Vec<f64> {
        match self {
            EvaluationResult::Single(value) => vec![value],
            EvaluationResult::Batch(values) => values,
        }
    }
}
