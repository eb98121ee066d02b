//! Data source for query evaluation.
//!
//! The data source is a fixed grid of sales figures:
//!
//! - **SalesMatrix**: Rows are products, columns are days, both addressed 1-based
//! - **Loader**: Builds a matrix from JSON or plain-text grids
//!
//! A matrix is immutable once built; evaluators only ever borrow it.

pub mod error;
pub mod loader;
pub mod matrix;

pub use error::{MatrixError, MatrixResult};
pub use matrix::{Axis, SalesMatrix};
