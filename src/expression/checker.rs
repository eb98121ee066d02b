//! Static checking for queries.
//!
//! Catches queries that are certain to fail before any evaluation work is
//! done: references to variables nothing binds, and literal product or day
//! numbers outside the matrix. Evaluation does its own checks, so running the
//! checker is optional.

use crate::data::{Axis, SalesMatrix};
use crate::expression::{
    Environment, ExpressionError, ExpressionResult, Formula, NumExpr, Query, SetExpr,
};
use std::collections::BTreeSet;

/// Checker for queries against a matrix
pub struct QueryChecker<'a> {
    matrix: &'a SalesMatrix,
}

impl<'a> QueryChecker<'a> {
    pub fn new(matrix: &'a SalesMatrix) -> Self {
        Self { matrix }
    }

    /// Check a query that will be evaluated in `env`.
    ///
    /// Free variables are reported first, in name order, then literal indices
    /// in the order they appear in the query.
    pub fn check(&self, query: &Query, env: &Environment) -> ExpressionResult<()> {
        let mut walker = Walker::default();
        walker.query(query);

        if let Some(name) = walker.free.iter().find(|name| !env.is_bound(name)) {
            return Err(ExpressionError::UnboundVariable { name: name.clone() });
        }

        for (axis, index) in walker.literal_indices {
            if self.matrix.offset(axis, index).is_none() {
                return Err(ExpressionError::IndexOutOfRange {
                    axis,
                    index,
                    max: self.matrix.extent(axis),
                });
            }
        }

        Ok(())
    }
}

/// Names a query uses without binding them
pub fn free_variables(query: &Query) -> BTreeSet<String> {
    let mut walker = Walker::default();
    walker.query(query);
    walker.free
}

#[derive(Default)]
struct Walker<'q> {
    bound: Vec<&'q str>,
    free: BTreeSet<String>,
    literal_indices: Vec<(Axis, i32)>,
}

impl<'q> Walker<'q> {
    fn query(&mut self, query: &'q Query) {
        match query {
            Query::Numeric(expr) => self.numeric(expr),
            Query::Set(expr) => self.set(expr),
            Query::Formula(formula) => self.formula(formula),
        }
    }

    fn numeric(&mut self, expr: &'q NumExpr) {
        match expr {
            NumExpr::Literal(_) | NumExpr::TotalSalesForMonth => {}
            NumExpr::Variable(name) => {
                if !self.bound.contains(&name.as_str()) {
                    self.free.insert(name.clone());
                }
            }
            NumExpr::TotalSalesForProduct(product) => self.index(Axis::Product, product),
            NumExpr::TotalSalesForDay(day) => self.index(Axis::Day, day),
            NumExpr::SalesAt { product, day } => {
                self.index(Axis::Product, product);
                self.index(Axis::Day, day);
            }
            NumExpr::SetSize(set) => self.set(set),
            NumExpr::BinaryOp { left, right, .. } => {
                self.numeric(left);
                self.numeric(right);
            }
        }
    }

    fn index(&mut self, axis: Axis, expr: &'q NumExpr) {
        if let NumExpr::Literal(index) = expr {
            self.literal_indices.push((axis, *index));
        }
        self.numeric(expr);
    }

    fn set(&mut self, expr: &'q SetExpr) {
        match expr {
            SetExpr::Type(_) => {}
            SetExpr::BinaryOp { left, right, .. } => {
                self.set(left);
                self.set(right);
            }
            SetExpr::Comprehension { var, predicate, .. } => self.scoped(var, predicate),
        }
    }

    fn formula(&mut self, formula: &'q Formula) {
        match formula {
            Formula::NumericRelation { left, right, .. } => {
                self.numeric(left);
                self.numeric(right);
            }
            Formula::SetRelation { left, right, .. } => {
                self.set(left);
                self.set(right);
            }
            Formula::Not(inner) => self.formula(inner),
            Formula::Connective { left, right, .. } => {
                self.formula(left);
                self.formula(right);
            }
            Formula::Quantified { var, body, .. } => self.scoped(var, body),
        }
    }

    fn scoped(&mut self, var: &'q str, body: &'q Formula) {
        self.bound.push(var);
        self.formula(body);
        self.bound.pop();
    }
}
