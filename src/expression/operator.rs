//! Operator definitions for queries.
//!
//! Each operator family is a closed enum whose methods carry its semantics,
//! so the evaluator dispatches with a single exhaustive `match`.

use crate::expression::{ExpressionError, ExpressionResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Arithmetic operators over numeric expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArithmeticOperator {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithmeticOperator {
    /// Apply the operator. Results wrap on overflow; only division can fail.
    pub fn apply(&self, left: i32, right: i32) -> ExpressionResult<i32> {
        match self {
            ArithmeticOperator::Add => Ok(left.wrapping_add(right)),
            ArithmeticOperator::Sub => Ok(left.wrapping_sub(right)),
            ArithmeticOperator::Mul => Ok(left.wrapping_mul(right)),
            ArithmeticOperator::Div => {
                if right == 0 {
                    Err(ExpressionError::DivisionByZero)
                } else {
                    Ok(left.wrapping_div(right))
                }
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArithmeticOperator::Add => "+",
            ArithmeticOperator::Sub => "-",
            ArithmeticOperator::Mul => "*",
            ArithmeticOperator::Div => "/",
        }
    }
}

/// Binary operators over set expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SetOperator {
    Union,
    Difference,
    Intersection,
}

impl SetOperator {
    pub fn apply(&self, left: &BTreeSet<i32>, right: &BTreeSet<i32>) -> BTreeSet<i32> {
        match self {
            SetOperator::Union => left.union(right).copied().collect(),
            SetOperator::Difference => left.difference(right).copied().collect(),
            SetOperator::Intersection => left.intersection(right).copied().collect(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SetOperator::Union => "union",
            SetOperator::Difference => "minus",
            SetOperator::Intersection => "inter",
        }
    }
}

/// Comparison operators between numeric expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationalOperator {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl RelationalOperator {
    pub fn compare(&self, left: i32, right: i32) -> bool {
        match self {
            RelationalOperator::Eq => left == right,
            RelationalOperator::Neq => left != right,
            RelationalOperator::Lt => left < right,
            RelationalOperator::Lte => left <= right,
            RelationalOperator::Gt => left > right,
            RelationalOperator::Gte => left >= right,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationalOperator::Eq => "=",
            RelationalOperator::Neq => "!=",
            RelationalOperator::Lt => "<",
            RelationalOperator::Lte => "<=",
            RelationalOperator::Gt => ">",
            RelationalOperator::Gte => ">=",
        }
    }
}

/// Comparison operators between set expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SetRelation {
    Eq,
}

impl SetRelation {
    pub fn holds(&self, left: &BTreeSet<i32>, right: &BTreeSet<i32>) -> bool {
        match self {
            SetRelation::Eq => left == right,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SetRelation::Eq => "=",
        }
    }
}

/// Binary logical connectives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Connective {
    And,
    Or,
    Implies,
    Equiv,
}

impl Connective {
    pub fn apply(&self, left: bool, right: bool) -> bool {
        match self {
            Connective::And => left && right,
            Connective::Or => left || right,
            Connective::Implies => !left || right,
            Connective::Equiv => left == right,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Connective::And => "and",
            Connective::Or => "or",
            Connective::Implies => "=>",
            Connective::Equiv => "<=>",
        }
    }
}

/// Quantifiers over a type set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Quantifier {
    Exists,
    Forall,
}

impl Quantifier {
    /// The body outcome that settles the whole quantified formula.
    ///
    /// Evaluation stops at the first element whose body yields this value and
    /// the formula takes it; if no element does, the formula is its negation.
    pub fn decisive(&self) -> bool {
        match self {
            Quantifier::Exists => true,
            Quantifier::Forall => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Quantifier::Exists => "exists",
            Quantifier::Forall => "forall",
        }
    }
}

/// The base sets derived from the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    /// {1, ..., number of days}
    Day,
    /// {1, ..., number of products}
    Product,
    /// Distinct sales figures in the matrix
    Sale,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Day => "Day",
            TypeKind::Product => "Product",
            TypeKind::Sale => "Sale",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(
    ArithmeticOperator,
    SetOperator,
    RelationalOperator,
    SetRelation,
    Connective,
    Quantifier,
    TypeKind
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        assert_eq!(ArithmeticOperator::Add.apply(10, 5), Ok(15));
        assert_eq!(ArithmeticOperator::Sub.apply(10, 15), Ok(-5));
        assert_eq!(ArithmeticOperator::Mul.apply(4, 3), Ok(12));
        assert_eq!(ArithmeticOperator::Div.apply(10, 3), Ok(3));
        assert_eq!(ArithmeticOperator::Div.apply(-7, 2), Ok(-3));
        assert_eq!(
            ArithmeticOperator::Div.apply(10, 0),
            Err(ExpressionError::DivisionByZero)
        );
        assert_eq!(
            ArithmeticOperator::Div.apply(0, 0),
            Err(ExpressionError::DivisionByZero)
        );
    }

    #[test]
    fn test_arithmetic_wraps() {
        assert_eq!(ArithmeticOperator::Add.apply(i32::MAX, 1), Ok(i32::MIN));
        assert_eq!(ArithmeticOperator::Div.apply(i32::MIN, -1), Ok(i32::MIN));
    }

    #[test]
    fn test_set_operators() {
        let left = BTreeSet::from([1, 2, 3, 10]);
        let right = BTreeSet::from([3, 4, 10]);

        assert_eq!(
            SetOperator::Union.apply(&left, &right),
            BTreeSet::from([1, 2, 3, 4, 10])
        );
        assert_eq!(
            SetOperator::Difference.apply(&left, &right),
            BTreeSet::from([1, 2])
        );
        assert_eq!(
            SetOperator::Intersection.apply(&left, &right),
            BTreeSet::from([3, 10])
        );
    }

    #[test]
    fn test_set_operators_use_elements_not_sizes() {
        // {10, 20} has two elements; union and difference must not touch {1, 2}
        let left = BTreeSet::from([1, 2, 5]);
        let right = BTreeSet::from([10, 20]);

        assert_eq!(
            SetOperator::Union.apply(&left, &right),
            BTreeSet::from([1, 2, 5, 10, 20])
        );
        assert_eq!(SetOperator::Difference.apply(&left, &right), left);
        assert!(SetOperator::Intersection.apply(&left, &right).is_empty());
    }

    #[test]
    fn test_relational_operators() {
        assert!(RelationalOperator::Eq.compare(5, 5));
        assert!(!RelationalOperator::Eq.compare(5, 6));
        assert!(RelationalOperator::Neq.compare(5, 6));
        assert!(RelationalOperator::Lt.compare(-1, 0));
        assert!(RelationalOperator::Lte.compare(0, 0));
        assert!(!RelationalOperator::Gt.compare(0, 0));
        assert!(RelationalOperator::Gte.compare(0, 0));
    }

    #[test]
    fn test_set_relation() {
        let a = BTreeSet::from([1, 2]);
        let b = BTreeSet::from([2, 1]);
        let c = BTreeSet::from([1]);
        assert!(SetRelation::Eq.holds(&a, &b));
        assert!(!SetRelation::Eq.holds(&a, &c));
    }

    #[test]
    fn test_connectives() {
        let cases = [(false, false), (false, true), (true, false), (true, true)];
        let and: Vec<bool> = cases.iter().map(|(l, r)| Connective::And.apply(*l, *r)).collect();
        let or: Vec<bool> = cases.iter().map(|(l, r)| Connective::Or.apply(*l, *r)).collect();
        let implies: Vec<bool> = cases
            .iter()
            .map(|(l, r)| Connective::Implies.apply(*l, *r))
            .collect();
        let equiv: Vec<bool> = cases
            .iter()
            .map(|(l, r)| Connective::Equiv.apply(*l, *r))
            .collect();

        assert_eq!(and, vec![false, false, false, true]);
        assert_eq!(or, vec![false, true, true, true]);
        assert_eq!(implies, vec![true, true, false, true]);
        assert_eq!(equiv, vec![true, false, false, true]);
    }

    #[test]
    fn test_quantifier_decisive() {
        assert!(Quantifier::Exists.decisive());
        assert!(!Quantifier::Forall.decisive());
    }

    #[test]
    fn test_operator_display() {
        assert_eq!(ArithmeticOperator::Div.to_string(), "/");
        assert_eq!(SetOperator::Union.to_string(), "union");
        assert_eq!(RelationalOperator::Neq.to_string(), "!=");
        assert_eq!(Connective::Implies.to_string(), "=>");
        assert_eq!(Quantifier::Forall.to_string(), "forall");
        assert_eq!(TypeKind::Sale.to_string(), "Sale");
    }

    #[test]
    fn test_operator_serde_tags() {
        assert_eq!(
            serde_json::to_string(&ArithmeticOperator::Div).unwrap(),
            "\"DIV\""
        );
        assert_eq!(
            serde_json::from_str::<SetOperator>("\"INTERSECTION\"").unwrap(),
            SetOperator::Intersection
        );
        assert_eq!(
            serde_json::from_str::<RelationalOperator>("\"GTE\"").unwrap(),
            RelationalOperator::Gte
        );
    }
}
