//! Square matrix of pairwise similarity scores
//!
//! The rows and columns of a [`SimilarityMatrix`] follow the order of the
//! [`TermList`](`crate::TermList`) it was calculated for:
//!
//! ```text
//!              || GO:0008150 | GO:0007049 | GO:0006915 |
//! ===================================================
//!  GO:0008150  ||      1.000 |      0.142 |      0.087 |
//!  GO:0007049  ||      0.142 |      1.000 |      0.310 |
//!  GO:0006915  ||      0.087 |      0.310 |      1.000 |
//! ```
//!
//! The matrix is symmetric by convention, but this is not enforced.
use std::fmt::Debug;

use crate::{ReduceError, ReduceResult};

/// Pairwise similarity scores of `n` terms, stored row by row
#[derive(Clone, PartialEq, Default)]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f64>,
}

impl SimilarityMatrix {
    /// Creates a new matrix of `n` rows and `n` columns from row-major `data`
    ///
    /// # Errors
    ///
    /// If `data` does not contain exactly `n * n` values: [`ReduceError::InvalidInput`]
    ///
    /// # Examples
    ///
    /// ```
    /// use revigo_export::SimilarityMatrix;
    ///
    /// let m = SimilarityMatrix::try_new(2, vec![1.0, 0.25, 0.25, 1.0]).unwrap();
    /// assert_eq!(m.get(0, 1), Some(0.25));
    /// assert!(m.is_symmetric());
    ///
    /// assert!(SimilarityMatrix::try_new(2, vec![1.0, 0.25, 0.25]).is_err());
    /// ```
    pub fn try_new(n: usize, data: Vec<f64>) -> ReduceResult<Self> {
        if n.checked_mul(n) != Some(data.len()) {
            return Err(ReduceError::InvalidInput(format!(
                "a {n}x{n} matrix requires {} values, got {}",
                n.saturating_mul(n),
                data.len()
            )));
        }
        Ok(Self { n, data })
    }

    /// Creates a new matrix by calling `score` for every pair of indices
    pub fn from_fn<F: FnMut(usize, usize) -> f64>(n: usize, mut score: F) -> Self {
        let mut data = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                data.push(score(row, col));
            }
        }
        Self { n, data }
    }

    /// The number of rows (and columns)
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Returns `true` if the matrix has no rows
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Returns the score of the pair `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.n || col >= self.n {
            return None;
        }
        self.data.get(row * self.n + col).copied()
    }

    /// Iterates all rows
    pub fn rows(&self) -> Rows<'_> {
        Rows {
            // `chunks_exact` panics for a chunk size of 0
            inner: self.data.chunks_exact(self.n.max(1)),
        }
    }

    /// Returns `true` if `m[i][j] == m[j][i]` for all pairs
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|row| {
            (row + 1..self.n).all(|col| self.data[row * self.n + col] == self.data[col * self.n + row])
        })
    }
}

impl Debug for SimilarityMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let v: Vec<String> = row.iter().map(|v| format!("{v}")).collect();
            writeln!(f, "[{}]", v.join(", "))?;
        }
        Ok(())
    }
}

/// Iterates the rows of a [`SimilarityMatrix`]
pub struct Rows<'a> {
    inner: std::slice::ChunksExact<'a, f64>,
}

impl<'a> Iterator for Rows<'a> {
    type Item = &'a [f64];
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Rows<'_> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows() {
        let m = SimilarityMatrix::try_new(3, (1..=9).map(f64::from).collect()).unwrap();
        let mut rows = m.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.next(), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(rows.next(), Some(&[4.0, 5.0, 6.0][..]));
        assert_eq!(rows.next(), Some(&[7.0, 8.0, 9.0][..]));
        assert!(rows.next().is_none());
    }

    #[test]
    fn test_empty() {
        let m = SimilarityMatrix::try_new(0, vec![]).unwrap();
        assert!(m.is_empty());
        assert!(m.rows().next().is_none());
        assert_eq!(m.get(0, 0), None);
    }

    #[test]
    fn test_get() {
        let m = SimilarityMatrix::from_fn(3, |row, col| (row * 10 + col) as f64);
        assert_eq!(m.get(2, 1), Some(21.0));
        assert_eq!(m.get(1, 2), Some(12.0));
        assert_eq!(m.get(3, 0), None);
        assert_eq!(m.get(0, 3), None);
        assert!(!m.is_symmetric());
    }

    #[test]
    fn test_symmetric() {
        let m = SimilarityMatrix::from_fn(4, |row, col| (row + col) as f64);
        assert!(m.is_symmetric());
    }

    #[test]
    fn test_wrong_size() {
        assert!(SimilarityMatrix::try_new(3, vec![0.0; 8]).is_err());
        assert!(SimilarityMatrix::try_new(usize::MAX, vec![]).is_err());
    }

    #[test]
    fn test_debug() {
        let m = SimilarityMatrix::try_new(2, vec![1.0, 0.5, 0.5, 1.0]).unwrap();
        assert_eq!(format!("{m:?}"), "[1, 0.5]\n[0.5, 1]\n");
    }
}
