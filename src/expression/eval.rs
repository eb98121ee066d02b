//! Query evaluation implementation.

use crate::data::{Axis, SalesMatrix};
use crate::expression::{
    Environment, ExpressionError, ExpressionResult, Formula, NumExpr, Query, SetExpr, TypeKind,
};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Result of evaluating a query, one variant per query category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryValue {
    Number(i32),
    Set(BTreeSet<i32>),
    Truth(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Number(n) => write!(f, "{}", n),
            QueryValue::Truth(b) => write!(f, "{}", b),
            QueryValue::Set(set) => {
                let items: Vec<String> = set.iter().map(|v| v.to_string()).collect();
                write!(f, "{{{}}}", items.join(", "))
            }
        }
    }
}

/// Evaluator for queries against one sales matrix.
///
/// The evaluator itself holds no mutable state. Variable bindings live in the
/// [`Environment`] passed to each call; quantifiers and comprehensions bind
/// their variable for the duration of their body only, so every entry point
/// returns with the environment exactly as it was given, error or not.
pub struct QueryEvaluator<'a> {
    matrix: &'a SalesMatrix,
}

impl<'a> QueryEvaluator<'a> {
    pub fn new(matrix: &'a SalesMatrix) -> Self {
        Self { matrix }
    }

    pub fn matrix(&self) -> &SalesMatrix {
        self.matrix
    }

    /// Evaluate a query of any category
    pub fn evaluate(&self, query: &Query, env: &mut Environment) -> ExpressionResult<QueryValue> {
        debug!("Evaluating {} query: {}", query.category(), query);
        let value = match query {
            Query::Numeric(expr) => QueryValue::Number(self.eval_numeric(expr, env)?),
            Query::Set(expr) => QueryValue::Set(self.eval_set(expr, env)?),
            Query::Formula(formula) => QueryValue::Truth(self.eval_formula(formula, env)?),
        };
        debug!("Result: {}", value);
        Ok(value)
    }

    /// Evaluate a numeric expression
    pub fn eval_numeric(&self, expr: &NumExpr, env: &mut Environment) -> ExpressionResult<i32> {
        match expr {
            NumExpr::Literal(value) => Ok(*value),

            NumExpr::Variable(name) => {
                env.lookup(name)
                    .ok_or_else(|| ExpressionError::UnboundVariable { name: name.clone() })
            }

            NumExpr::TotalSalesForProduct(product) => {
                let product = self.eval_numeric(product, env)?;
                self.matrix
                    .product_total(product)
                    .ok_or_else(|| self.out_of_range(Axis::Product, product))
            }

            NumExpr::TotalSalesForDay(day) => {
                let day = self.eval_numeric(day, env)?;
                self.matrix
                    .day_total(day)
                    .ok_or_else(|| self.out_of_range(Axis::Day, day))
            }

            NumExpr::TotalSalesForMonth => Ok(self.matrix.total()),

            NumExpr::SalesAt { product, day } => {
                let product = self.eval_numeric(product, env)?;
                let day = self.eval_numeric(day, env)?;
                self.check_index(Axis::Product, product)?;
                self.check_index(Axis::Day, day)?;
                self.matrix
                    .cell(product, day)
                    .ok_or_else(|| self.out_of_range(Axis::Day, day))
            }

            NumExpr::SetSize(set) => self.eval_size(set, env),

            NumExpr::BinaryOp { op, left, right } => {
                let left_val = self.eval_numeric(left, env)?;
                let right_val = self.eval_numeric(right, env)?;
                op.apply(left_val, right_val)
            }
        }
    }

    /// Cardinality of a set expression
    pub fn eval_size(&self, expr: &SetExpr, env: &mut Environment) -> ExpressionResult<i32> {
        let size = self.eval_set(expr, env)?.len();
        Ok(i32::try_from(size).unwrap_or(i32::MAX))
    }

    /// Evaluate a set expression
    pub fn eval_set(
        &self,
        expr: &SetExpr,
        env: &mut Environment,
    ) -> ExpressionResult<BTreeSet<i32>> {
        match expr {
            SetExpr::Type(kind) => Ok(self.type_set(*kind)),

            SetExpr::BinaryOp { op, left, right } => {
                let left_set = self.eval_set(left, env)?;
                let right_set = self.eval_set(right, env)?;
                Ok(op.apply(&left_set, &right_set))
            }

            SetExpr::Comprehension {
                source,
                var,
                predicate,
            } => {
                let mut result = BTreeSet::new();
                for element in self.type_set(*source) {
                    let keep = env.with_binding(var, element, |env| {
                        self.eval_formula(predicate, env)
                    })?;
                    trace!("{} = {}: {}", var, element, keep);
                    if keep {
                        result.insert(element);
                    }
                }
                Ok(result)
            }
        }
    }

    /// Evaluate a formula
    pub fn eval_formula(&self, formula: &Formula, env: &mut Environment) -> ExpressionResult<bool> {
        match formula {
            Formula::NumericRelation { op, left, right } => {
                let left_val = self.eval_numeric(left, env)?;
                let right_val = self.eval_numeric(right, env)?;
                Ok(op.compare(left_val, right_val))
            }

            Formula::SetRelation { op, left, right } => {
                let left_set = self.eval_set(left, env)?;
                let right_set = self.eval_set(right, env)?;
                Ok(op.holds(&left_set, &right_set))
            }

            Formula::Not(inner) => Ok(!self.eval_formula(inner, env)?),

            // Both sides are always evaluated
            Formula::Connective { op, left, right } => {
                let left_val = self.eval_formula(left, env)?;
                let right_val = self.eval_formula(right, env)?;
                Ok(op.apply(left_val, right_val))
            }

            Formula::Quantified {
                quantifier,
                var,
                source,
                body,
            } => {
                let decisive = quantifier.decisive();
                for element in self.type_set(*source) {
                    let holds =
                        env.with_binding(var, element, |env| self.eval_formula(body, env))?;
                    if holds == decisive {
                        trace!("{} {}: settled at {} = {}", quantifier, var, var, element);
                        return Ok(decisive);
                    }
                }
                Ok(!decisive)
            }
        }
    }

    /// One of the base sets derived from the matrix
    pub fn type_set(&self, kind: TypeKind) -> BTreeSet<i32> {
        match kind {
            TypeKind::Day => self.matrix.day_ids(),
            TypeKind::Product => self.matrix.product_ids(),
            TypeKind::Sale => self.matrix.distinct_sales(),
        }
    }

    fn check_index(&self, axis: Axis, index: i32) -> ExpressionResult<()> {
        match self.matrix.offset(axis, index) {
            Some(_) => Ok(()),
            None => Err(self.out_of_range(axis, index)),
        }
    }

    fn out_of_range(&self, axis: Axis, index: i32) -> ExpressionError {
        ExpressionError::IndexOutOfRange {
            axis,
            index,
            max: self.matrix.extent(axis),
        }
    }
}

/// Evaluate a query against a matrix with a fresh environment
pub fn evaluate_query(query: &Query, matrix: &SalesMatrix) -> ExpressionResult<QueryValue> {
    QueryEvaluator::new(matrix).evaluate(query, &mut Environment::new())
}
