//! Error types for query evaluation.

use crate::data::Axis;
use thiserror::Error;

/// Errors that can occur during query evaluation.
///
/// Every error aborts the evaluation in flight; there is no partial result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    /// A variable was referenced outside any binding of that name
    #[error("Unbound variable: {name}")]
    UnboundVariable { name: String },

    #[error("Division by zero")]
    DivisionByZero,

    /// A product or day number fell outside the matrix
    #[error("{axis} index {index} out of range (valid range is 1..={max})")]
    IndexOutOfRange { axis: Axis, index: i32, max: usize },
}

/// Result type for expression operations
pub type ExpressionResult<T> = Result<T, ExpressionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExpressionError::UnboundVariable {
            name: "x".to_string(),
        };
        assert_eq!(err.to_string(), "Unbound variable: x");

        let err = ExpressionError::DivisionByZero;
        assert_eq!(err.to_string(), "Division by zero");

        let err = ExpressionError::IndexOutOfRange {
            axis: Axis::Day,
            index: 31,
            max: 30,
        };
        assert_eq!(
            err.to_string(),
            "Day index 31 out of range (valid range is 1..=30)"
        );
    }
}
