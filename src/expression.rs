//! Query evaluation over a sales matrix.
//!
//! This module provides:
//! - The query AST: numeric expressions, set expressions and formulas
//! - Operator tables for arithmetic, set, relational and logical operators
//! - The variable environment used by quantifiers and comprehensions
//! - The recursive evaluator and a static checker for queries

pub mod checker;
pub mod env;
pub mod error;
pub mod eval;
pub mod expr;
pub mod operator;

pub use checker::{free_variables, QueryChecker};
pub use env::Environment;
pub use error::{ExpressionError, ExpressionResult};
pub use eval::{evaluate_query, QueryEvaluator, QueryValue};
pub use expr::{Formula, NumExpr, Query, SetExpr};
pub use operator::{
    ArithmeticOperator, Connective, Quantifier, RelationalOperator, SetOperator, SetRelation,
    TypeKind,
};
