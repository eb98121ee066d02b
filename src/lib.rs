pub mod data;
pub mod expression;

pub use data::SalesMatrix;
pub use expression::{evaluate_query, Environment, Query, QueryEvaluator, QueryValue};
