//! Building a sales matrix from files.
//!
//! Two formats are accepted:
//!
//! - **JSON**: an array of equal-length integer arrays, `[[1, 2], [3, 4]]`
//! - **Text**: one product per line, figures separated by whitespace or commas;
//!   blank lines and lines starting with `#` are skipped

use crate::data::{MatrixError, MatrixResult, SalesMatrix};
use log::debug;
use std::fs;
use std::path::Path;

impl SalesMatrix {
    /// Parse a matrix from a JSON array of rows
    pub fn from_json_str(input: &str) -> MatrixResult<Self> {
        let rows: Vec<Vec<i32>> = serde_json::from_str(input)?;
        Self::new(rows)
    }

    /// Parse a matrix from whitespace- or comma-separated text
    pub fn from_text(input: &str) -> MatrixResult<Self> {
        let mut rows = Vec::new();

        for (line_no, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let row = line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|token| !token.is_empty())
                .map(|token| {
                    token.parse::<i32>().map_err(|_| MatrixError::InvalidNumber {
                        line: line_no + 1,
                        token: token.to_string(),
                    })
                })
                .collect::<MatrixResult<Vec<i32>>>()?;
            rows.push(row);
        }

        Self::new(rows)
    }

    /// Load a matrix from disk, choosing the format by file extension
    pub fn load(path: impl AsRef<Path>) -> MatrixResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let matrix = if is_json {
            Self::from_json_str(&contents)?
        } else {
            Self::from_text(&contents)?
        };

        debug!(
            "Loaded {}x{} sales matrix from {}",
            matrix.products(),
            matrix.days(),
            path.display()
        );
        Ok(matrix)
    }
}
