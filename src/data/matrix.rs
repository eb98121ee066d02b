//! The product-by-day sales grid.

use crate::data::{MatrixError, MatrixResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Which dimension of the matrix an index addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Product,
    Day,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Product => write!(f, "Product"),
            Axis::Day => write!(f, "Day"),
        }
    }
}

/// Immutable grid of sales figures.
///
/// Storage is 0-based, but every accessor takes 1-based product and day
/// numbers, the way queries address them. Accessors return `None` for an
/// index outside the grid rather than panicking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesMatrix {
    rows: Vec<Vec<i32>>,
    days: usize,
}

impl SalesMatrix {
    /// Build a matrix from product rows. All rows must have the same length.
    pub fn new(rows: Vec<Vec<i32>>) -> MatrixResult<Self> {
        let days = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((row, found)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != days)
            .map(|(i, r)| (i + 1, r.len()))
        {
            return Err(MatrixError::RaggedRow {
                row,
                expected: days,
                found,
            });
        }
        Ok(Self { rows, days })
    }

    /// Number of products (R)
    pub fn products(&self) -> usize {
        self.rows.len()
    }

    /// Number of days (C)
    pub fn days(&self) -> usize {
        self.days
    }

    pub fn rows(&self) -> &[Vec<i32>] {
        &self.rows
    }

    /// Upper bound of the given axis
    pub fn extent(&self, axis: Axis) -> usize {
        match axis {
            Axis::Product => self.products(),
            Axis::Day => self.days(),
        }
    }

    /// Convert a 1-based index on `axis` into a storage offset
    pub fn offset(&self, axis: Axis, index: i32) -> Option<usize> {
        let index = usize::try_from(index).ok()?;
        if index >= 1 && index <= self.extent(axis) {
            Some(index - 1)
        } else {
            None
        }
    }

    /// Sales of `product` on `day`
    pub fn cell(&self, product: i32, day: i32) -> Option<i32> {
        let p = self.offset(Axis::Product, product)?;
        let d = self.offset(Axis::Day, day)?;
        Some(self.rows[p][d])
    }

    /// Sales of `product` summed over every day
    pub fn product_total(&self, product: i32) -> Option<i32> {
        let p = self.offset(Axis::Product, product)?;
        Some(wrapping_sum(self.rows[p].iter()))
    }

    /// Sales on `day` summed over every product
    pub fn day_total(&self, day: i32) -> Option<i32> {
        let d = self.offset(Axis::Day, day)?;
        Some(wrapping_sum(self.rows.iter().map(|row| &row[d])))
    }

    /// Sum of every cell
    pub fn total(&self) -> i32 {
        wrapping_sum(self.rows.iter().flatten())
    }

    /// The set {1, ..., R}
    pub fn product_ids(&self) -> BTreeSet<i32> {
        one_based(self.products())
    }

    /// The set {1, ..., C}
    pub fn day_ids(&self) -> BTreeSet<i32> {
        one_based(self.days())
    }

    /// Distinct values appearing anywhere in the grid
    pub fn distinct_sales(&self) -> BTreeSet<i32> {
        self.rows.iter().flatten().copied().collect()
    }
}

fn wrapping_sum<'a>(values: impl Iterator<Item = &'a i32>) -> i32 {
    values.fold(0i32, |acc, v| acc.wrapping_add(*v))
}

fn one_based(count: usize) -> BTreeSet<i32> {
    (1..=count).filter_map(|i| i32::try_from(i).ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SalesMatrix {
        SalesMatrix::new(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap()
    }

    #[test]
    fn test_dimensions() {
        let m = sample();
        assert_eq!(m.products(), 2);
        assert_eq!(m.days(), 3);
        assert_eq!(m.extent(Axis::Product), 2);
        assert_eq!(m.extent(Axis::Day), 3);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = SalesMatrix::new(vec![vec![1, 2, 3], vec![4, 5]]).unwrap_err();
        assert!(matches!(
            err,
            MatrixError::RaggedRow {
                row: 2,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_empty_matrix() {
        let m = SalesMatrix::new(vec![]).unwrap();
        assert_eq!(m.products(), 0);
        assert_eq!(m.days(), 0);
        assert_eq!(m.total(), 0);
        assert!(m.product_ids().is_empty());
        assert!(m.day_ids().is_empty());
        assert!(m.distinct_sales().is_empty());
        assert_eq!(m.cell(1, 1), None);
    }

    #[test]
    fn test_cell_is_one_based() {
        let m = sample();
        assert_eq!(m.cell(1, 1), Some(1));
        assert_eq!(m.cell(2, 3), Some(6));
        assert_eq!(m.cell(0, 1), None);
        assert_eq!(m.cell(3, 1), None);
        assert_eq!(m.cell(1, 4), None);
        assert_eq!(m.cell(-1, 2), None);
    }

    #[test]
    fn test_totals() {
        let m = sample();
        assert_eq!(m.product_total(1), Some(6));
        assert_eq!(m.product_total(2), Some(15));
        assert_eq!(m.day_total(2), Some(7));
        assert_eq!(m.day_total(4), None);
        assert_eq!(m.total(), 21);
    }

    #[test]
    fn test_totals_wrap_on_overflow() {
        let m = SalesMatrix::new(vec![vec![i32::MAX, 1]]).unwrap();
        assert_eq!(m.product_total(1), Some(i32::MIN));
    }

    #[test]
    fn test_type_sets() {
        let m = SalesMatrix::new(vec![vec![7, 7], vec![3, 9]]).unwrap();
        assert_eq!(m.product_ids(), BTreeSet::from([1, 2]));
        assert_eq!(m.day_ids(), BTreeSet::from([1, 2]));
        assert_eq!(m.distinct_sales(), BTreeSet::from([3, 7, 9]));
    }
}
