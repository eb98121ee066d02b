//! Data source error types.

use thiserror::Error;

/// Errors that can occur while building or loading a sales matrix.
#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("Ragged matrix: row {row} has {found} days but expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid sales figure '{token}' on line {line}")]
    InvalidNumber { line: usize, token: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for data source operations.
pub type MatrixResult<T> = Result<T, MatrixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MatrixError::RaggedRow {
            row: 2,
            expected: 3,
            found: 1,
        };
        assert_eq!(
            err.to_string(),
            "Ragged matrix: row 2 has 1 days but expected 3"
        );

        let err = MatrixError::InvalidNumber {
            line: 4,
            token: "x1".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid sales figure 'x1' on line 4");
    }
}
