//! Dense data matrices and symmetric pairwise interaction storage.
//!
//! `DataMatrix` replaces ad-hoc nested vectors for DMU input/output data:
//! construction validates shape once so downstream solvers can index freely.
//! `InteractionMatrix` stores 2-additive interaction weights for unordered
//! criterion pairs, with `CriterionPair` enforcing `lo < hi` at the type level.

use serde::{Deserialize, Serialize};

use super::errors::ValidationError;

/// Dense row-major matrix of DMU measurements (rows = DMUs, cols = criteria).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl DataMatrix {
    /// Builds a matrix from per-DMU rows, rejecting ragged or empty shapes.
    ///
    /// `matrix_name` labels the matrix ("input" or "output") in errors.
    pub fn try_new(
        matrix_name: &'static str,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self, ValidationError> {
        if rows.is_empty() {
            return Err(ValidationError::NoDmus);
        }
        let cols = rows[0].len();
        if cols == 0 {
            return Err(ValidationError::EmptyRow {
                matrix: matrix_name,
            });
        }
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(ValidationError::RaggedRow {
                    matrix: matrix_name,
                    row: index,
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Number of DMUs (rows).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of criteria (columns).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Single cell.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Borrowed view of one DMU's measurements.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Owned copy of one criterion's values across all DMUs.
    pub fn column(&self, col: usize) -> Vec<f64> {
        (0..self.rows).map(|r| self.get(r, col)).collect()
    }
}

/// Unordered pair of criterion indices, normalized so `lo < hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CriterionPair {
    lo: usize,
    hi: usize,
}

impl CriterionPair {
    /// Normalizes `(a, b)` into `lo < hi`; `None` when `a == b`.
    pub fn new(a: usize, b: usize) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { lo: a, hi: b }),
            std::cmp::Ordering::Greater => Some(Self { lo: b, hi: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn lo(&self) -> usize {
        self.lo
    }

    pub fn hi(&self) -> usize {
        self.hi
    }
}

/// Symmetric pairwise interaction weights over `n` criteria.
///
/// Only the strict upper triangle is stored; the diagonal is identically
/// zero (a criterion does not interact with itself).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionMatrix {
    n: usize,
    upper: Vec<f64>,
}

impl InteractionMatrix {
    /// All-zero interactions over `n` criteria.
    pub fn zeros(n: usize) -> Self {
        let len = if n < 2 { 0 } else { n * (n - 1) / 2 };
        Self {
            n,
            upper: vec![0.0; len],
        }
    }

    /// Number of criteria.
    pub fn criteria(&self) -> usize {
        self.n
    }

    /// Number of stored pairs.
    pub fn pair_count(&self) -> usize {
        self.upper.len()
    }

    fn index(&self, pair: CriterionPair) -> usize {
        debug_assert!(pair.hi() < self.n);
        let lo = pair.lo();
        let hi = pair.hi();
        lo * (2 * self.n - lo - 1) / 2 + (hi - lo - 1)
    }

    pub fn get(&self, pair: CriterionPair) -> f64 {
        self.upper[self.index(pair)]
    }

    pub fn set(&mut self, pair: CriterionPair, value: f64) {
        let idx = self.index(pair);
        self.upper[idx] = value;
    }

    /// Interaction between two criteria; 0.0 when `a == b`.
    pub fn value_between(&self, a: usize, b: usize) -> f64 {
        match CriterionPair::new(a, b) {
            Some(pair) => self.get(pair),
            None => 0.0,
        }
    }

    /// Pairs in lexicographic `(lo, hi)` order, matching storage order.
    pub fn pairs(&self) -> impl Iterator<Item = CriterionPair> + '_ {
        let n = self.n;
        (0..n).flat_map(move |lo| (lo + 1..n).map(move |hi| CriterionPair { lo, hi }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_rejects_ragged_rows() {
        let result = DataMatrix::try_new("input", vec![vec![1.0, 2.0], vec![3.0]]);
        assert_eq!(
            result,
            Err(ValidationError::RaggedRow {
                matrix: "input",
                row: 1,
                expected: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn matrix_rejects_empty() {
        assert_eq!(
            DataMatrix::try_new("input", vec![]),
            Err(ValidationError::NoDmus)
        );
        assert_eq!(
            DataMatrix::try_new("output", vec![vec![]]),
            Err(ValidationError::EmptyRow { matrix: "output" })
        );
    }

    #[test]
    fn matrix_indexing() {
        let m = DataMatrix::try_new("input", vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 2);
        assert_eq!(m.get(1, 0), 3.0);
        assert_eq!(m.row(0), &[1.0, 2.0]);
        assert_eq!(m.column(1), vec![2.0, 4.0]);
    }

    #[test]
    fn criterion_pair_normalizes_order() {
        let pair = CriterionPair::new(3, 1).unwrap();
        assert_eq!((pair.lo(), pair.hi()), (1, 3));
        assert!(CriterionPair::new(2, 2).is_none());
    }

    #[test]
    fn interaction_matrix_is_symmetric() {
        let mut m = InteractionMatrix::zeros(3);
        m.set(CriterionPair::new(0, 2).unwrap(), 0.25);
        assert_eq!(m.value_between(0, 2), 0.25);
        assert_eq!(m.value_between(2, 0), 0.25);
        assert_eq!(m.value_between(1, 1), 0.0);
    }

    #[test]
    fn interaction_pairs_enumerate_upper_triangle() {
        let m = InteractionMatrix::zeros(4);
        let pairs: Vec<(usize, usize)> = m.pairs().map(|p| (p.lo(), p.hi())).collect();
        assert_eq!(
            pairs,
            vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]
        );
        assert_eq!(m.pair_count(), 6);
    }

    #[test]
    fn interaction_index_round_trips_every_pair() {
        let mut m = InteractionMatrix::zeros(5);
        let pairs: Vec<CriterionPair> = m.pairs().collect();
        for (k, pair) in pairs.iter().enumerate() {
            m.set(*pair, k as f64);
        }
        for (k, pair) in pairs.iter().enumerate() {
            assert_eq!(m.get(*pair), k as f64);
        }
    }
}
