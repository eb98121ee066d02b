//! Query AST definitions.
//!
//! Queries come in three grammatical categories, each a closed enum:
//! [`NumExpr`] evaluates to an integer, [`SetExpr`] to a set of integers and
//! [`Formula`] to a truth value. Trees are built by an external parser (or the
//! builder functions below) and are never mutated by evaluation.

use crate::expression::operator::{
    ArithmeticOperator, Connective, Quantifier, RelationalOperator, SetOperator, SetRelation,
    TypeKind,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric expression tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumExpr {
    /// Integer constant
    Literal(i32),

    /// Variable bound by an enclosing quantifier or comprehension
    Variable(String),

    /// Sales of one product summed over every day
    TotalSalesForProduct(Box<NumExpr>),

    /// Sales on one day summed over every product
    TotalSalesForDay(Box<NumExpr>),

    /// Sum of the whole matrix
    TotalSalesForMonth,

    /// Sales of one product on one day
    SalesAt {
        product: Box<NumExpr>,
        day: Box<NumExpr>,
    },

    /// Cardinality of a set
    SetSize(Box<SetExpr>),

    BinaryOp {
        op: ArithmeticOperator,
        left: Box<NumExpr>,
        right: Box<NumExpr>,
    },
}

/// Set expression tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetExpr {
    /// One of the base sets derived from the matrix
    Type(TypeKind),

    BinaryOp {
        op: SetOperator,
        left: Box<SetExpr>,
        right: Box<SetExpr>,
    },

    /// `{var in source | predicate}`
    Comprehension {
        source: TypeKind,
        var: String,
        predicate: Box<Formula>,
    },
}

/// Logical formula tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Formula {
    NumericRelation {
        op: RelationalOperator,
        left: Box<NumExpr>,
        right: Box<NumExpr>,
    },

    SetRelation {
        op: SetRelation,
        left: Box<SetExpr>,
        right: Box<SetExpr>,
    },

    Not(Box<Formula>),

    Connective {
        op: Connective,
        left: Box<Formula>,
        right: Box<Formula>,
    },

    /// `quantifier var in source . body`
    Quantified {
        quantifier: Quantifier,
        var: String,
        source: TypeKind,
        body: Box<Formula>,
    },
}

/// A query root of any category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Query {
    Numeric(NumExpr),
    Set(SetExpr),
    Formula(Formula),
}

impl NumExpr {
    pub fn literal(value: i32) -> Self {
        NumExpr::Literal(value)
    }

    pub fn var(name: impl Into<String>) -> Self {
        NumExpr::Variable(name.into())
    }

    pub fn product_total(product: NumExpr) -> Self {
        NumExpr::TotalSalesForProduct(Box::new(product))
    }

    pub fn day_total(day: NumExpr) -> Self {
        NumExpr::TotalSalesForDay(Box::new(day))
    }

    pub fn month_total() -> Self {
        NumExpr::TotalSalesForMonth
    }

    pub fn sales_at(product: NumExpr, day: NumExpr) -> Self {
        NumExpr::SalesAt {
            product: Box::new(product),
            day: Box::new(day),
        }
    }

    pub fn size(set: SetExpr) -> Self {
        NumExpr::SetSize(Box::new(set))
    }

    pub fn binary_op(op: ArithmeticOperator, left: NumExpr, right: NumExpr) -> Self {
        NumExpr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn add(left: NumExpr, right: NumExpr) -> Self {
        Self::binary_op(ArithmeticOperator::Add, left, right)
    }

    pub fn sub(left: NumExpr, right: NumExpr) -> Self {
        Self::binary_op(ArithmeticOperator::Sub, left, right)
    }

    pub fn mul(left: NumExpr, right: NumExpr) -> Self {
        Self::binary_op(ArithmeticOperator::Mul, left, right)
    }

    pub fn div(left: NumExpr, right: NumExpr) -> Self {
        Self::binary_op(ArithmeticOperator::Div, left, right)
    }
}

impl SetExpr {
    pub fn of_type(kind: TypeKind) -> Self {
        SetExpr::Type(kind)
    }

    pub fn days() -> Self {
        SetExpr::Type(TypeKind::Day)
    }

    pub fn products() -> Self {
        SetExpr::Type(TypeKind::Product)
    }

    pub fn sales() -> Self {
        SetExpr::Type(TypeKind::Sale)
    }

    pub fn binary_op(op: SetOperator, left: SetExpr, right: SetExpr) -> Self {
        SetExpr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn union(left: SetExpr, right: SetExpr) -> Self {
        Self::binary_op(SetOperator::Union, left, right)
    }

    pub fn difference(left: SetExpr, right: SetExpr) -> Self {
        Self::binary_op(SetOperator::Difference, left, right)
    }

    pub fn intersection(left: SetExpr, right: SetExpr) -> Self {
        Self::binary_op(SetOperator::Intersection, left, right)
    }

    pub fn comprehension(source: TypeKind, var: impl Into<String>, predicate: Formula) -> Self {
        SetExpr::Comprehension {
            source,
            var: var.into(),
            predicate: Box::new(predicate),
        }
    }
}

impl Formula {
    pub fn numeric_relation(op: RelationalOperator, left: NumExpr, right: NumExpr) -> Self {
        Formula::NumericRelation {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn eq(left: NumExpr, right: NumExpr) -> Self {
        Self::numeric_relation(RelationalOperator::Eq, left, right)
    }

    pub fn ne(left: NumExpr, right: NumExpr) -> Self {
        Self::numeric_relation(RelationalOperator::Neq, left, right)
    }

    pub fn lt(left: NumExpr, right: NumExpr) -> Self {
        Self::numeric_relation(RelationalOperator::Lt, left, right)
    }

    pub fn le(left: NumExpr, right: NumExpr) -> Self {
        Self::numeric_relation(RelationalOperator::Lte, left, right)
    }

    pub fn gt(left: NumExpr, right: NumExpr) -> Self {
        Self::numeric_relation(RelationalOperator::Gt, left, right)
    }

    pub fn ge(left: NumExpr, right: NumExpr) -> Self {
        Self::numeric_relation(RelationalOperator::Gte, left, right)
    }

    pub fn set_eq(left: SetExpr, right: SetExpr) -> Self {
        Formula::SetRelation {
            op: SetRelation::Eq,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn negate(inner: Formula) -> Self {
        Formula::Not(Box::new(inner))
    }

    pub fn connective(op: Connective, left: Formula, right: Formula) -> Self {
        Formula::Connective {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn and(left: Formula, right: Formula) -> Self {
        Self::connective(Connective::And, left, right)
    }

    pub fn or(left: Formula, right: Formula) -> Self {
        Self::connective(Connective::Or, left, right)
    }

    pub fn implies(left: Formula, right: Formula) -> Self {
        Self::connective(Connective::Implies, left, right)
    }

    pub fn equiv(left: Formula, right: Formula) -> Self {
        Self::connective(Connective::Equiv, left, right)
    }

    pub fn quantified(
        quantifier: Quantifier,
        var: impl Into<String>,
        source: TypeKind,
        body: Formula,
    ) -> Self {
        Formula::Quantified {
            quantifier,
            var: var.into(),
            source,
            body: Box::new(body),
        }
    }

    pub fn exists(var: impl Into<String>, source: TypeKind, body: Formula) -> Self {
        Self::quantified(Quantifier::Exists, var, source, body)
    }

    pub fn forall(var: impl Into<String>, source: TypeKind, body: Formula) -> Self {
        Self::quantified(Quantifier::Forall, var, source, body)
    }
}

impl Query {
    /// Name of the grammatical category of this query
    pub fn category(&self) -> &'static str {
        match self {
            Query::Numeric(_) => "numeric",
            Query::Set(_) => "set",
            Query::Formula(_) => "formula",
        }
    }
}

impl From<NumExpr> for Query {
    fn from(expr: NumExpr) -> Self {
        Query::Numeric(expr)
    }
}

impl From<SetExpr> for Query {
    fn from(expr: SetExpr) -> Self {
        Query::Set(expr)
    }
}

impl From<Formula> for Query {
    fn from(formula: Formula) -> Self {
        Query::Formula(formula)
    }
}

impl fmt::Display for NumExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumExpr::Literal(value) => write!(f, "{}", value),
            NumExpr::Variable(name) => write!(f, "{}", name),
            NumExpr::TotalSalesForProduct(product) => write!(f, "sales_of_product({})", product),
            NumExpr::TotalSalesForDay(day) => write!(f, "sales_on_day({})", day),
            NumExpr::TotalSalesForMonth => write!(f, "sales_total"),
            NumExpr::SalesAt { product, day } => write!(f, "sales_at({}, {})", product, day),
            NumExpr::SetSize(set) => write!(f, "size({})", set),
            NumExpr::BinaryOp { op, left, right } => write!(f, "({} {} {})", left, op, right),
        }
    }
}

impl fmt::Display for SetExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetExpr::Type(kind) => write!(f, "{}", kind),
            SetExpr::BinaryOp { op, left, right } => write!(f, "({} {} {})", left, op, right),
            SetExpr::Comprehension {
                source,
                var,
                predicate,
            } => write!(f, "{{{} in {} | {}}}", var, source, predicate),
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::NumericRelation { op, left, right } => {
                write!(f, "({} {} {})", left, op, right)
            }
            Formula::SetRelation { op, left, right } => write!(f, "({} {} {})", left, op, right),
            Formula::Not(inner) => write!(f, "not {}", inner),
            Formula::Connective { op, left, right } => write!(f, "({} {} {})", left, op, right),
            Formula::Quantified {
                quantifier,
                var,
                source,
                body,
            } => write!(f, "{} {} in {} . {}", quantifier, var, source, body),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Numeric(expr) => fmt::Display::fmt(expr, f),
            Query::Set(expr) => fmt::Display::fmt(expr, f),
            Query::Formula(formula) => fmt::Display::fmt(formula, f),
        }
    }
}
