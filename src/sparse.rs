//! Sparse matrix operations using row-major lists of non-zero entries

use crate::CodeError;
use anyhow::{ensure, Result};
use ark_ff::Field;
use ark_std::rand::Rng;
use p3_maybe_rayon::prelude::*;
use rand::seq::index;

/// Row-major sparse matrix of shape `rows x cols`, abstracted `[[F; cols]; rows]`.
///
/// Row `i` is a list of `(j, val)` with `val != 0`, meaning `M[i][j] = val`. Entries are never
/// deduplicated: adding twice to the same coordinate stores two entries whose contributions add up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseMatrix<F: Field> {
    entries: Vec<Vec<(usize, F)>>,
    rows: usize,
    cols: usize,
}

impl<F: Field> SparseMatrix<F> {
    /// A `rows x cols` zero matrix
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            entries: vec![vec![]; rows],
            rows,
            cols,
        }
    }

    /// Construct from a dense row-major matrix, zeros are skipped.
    pub fn from_dense(dense: &[Vec<F>], cols: usize) -> Result<Self> {
        ensure!(
            dense.iter().all(|row| row.len() == cols),
            "Dense rows should all have length {}",
            cols
        );
        let mut mat = Self::new(dense.len(), cols);
        for (i, row) in dense.iter().enumerate() {
            mat.entries[i] = row
                .iter()
                .enumerate()
                .filter(|(_, v)| !v.is_zero())
                .map(|(j, v)| (j, *v))
                .collect();
        }
        Ok(mat)
    }

    /// Expand into a dense row-major matrix
    pub fn to_dense(&self) -> Vec<Vec<F>> {
        self.entries
            .iter()
            .map(|row| {
                let mut dense = vec![F::ZERO; self.cols];
                for (j, val) in row {
                    dense[*j] += val;
                }
                dense
            })
            .collect()
    }

    /// number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// stored entries of the `i`-th row
    #[inline]
    pub fn row(&self, i: usize) -> &[(usize, F)] {
        &self.entries[i]
    }

    /// total number of stored (non-zero) entries
    pub fn nnz(&self) -> usize {
        self.entries.iter().map(|row| row.len()).sum()
    }

    /// Insert `M[i][j] = val`, a zero `val` is not stored.
    pub fn add(&mut self, i: usize, j: usize, val: F) -> Result<(), CodeError> {
        if i >= self.rows || j >= self.cols {
            return Err(CodeError::IndexOutOfRange {
                row: i,
                col: j,
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !val.is_zero() {
            self.entries[i].push((j, val));
        }
        Ok(())
    }

    /// Returns `y = x^T * M`, i.e. `y[j] = sum_i x[i] * M[i][j]`, given `x.len() == rows`.
    /// Cost is linear in the number of stored entries.
    pub fn multiply(&self, x: &[F]) -> Result<Vec<F>, CodeError> {
        if x.len() != self.rows {
            return Err(CodeError::LengthMismatch {
                expected: self.rows,
                found: x.len(),
            });
        }
        let mut y = vec![F::ZERO; self.cols];
        for (xi, row) in x.iter().zip(self.entries.iter()) {
            if xi.is_zero() {
                continue;
            }
            for (j, val) in row {
                y[*j] += *xi * val;
            }
        }
        Ok(y)
    }

    /// Returns `y = M * x`, i.e. `y[i] = sum_j M[i][j] * x[j]`, given `x.len() == cols`.
    ///
    /// This is `multiply()` against the transpose, computed row by row on the stored entries
    /// without re-bucketing them, so `&self` can be shared across threads.
    pub fn transpose_multiply(&self, x: &[F]) -> Result<Vec<F>, CodeError> {
        if x.len() != self.cols {
            return Err(CodeError::LengthMismatch {
                expected: self.cols,
                found: x.len(),
            });
        }
        Ok(self
            .entries
            .par_iter()
            .map(|row| row.iter().map(|(j, val)| x[*j] * val).sum())
            .collect())
    }

    /// Transpose in place: every `(i, (j, val))` moves to row `j` as `(i, val)`, dimensions swap.
    pub fn transpose(&mut self) {
        let mut transposed = vec![vec![]; self.cols];
        for (i, row) in self.entries.iter().enumerate() {
            for (j, val) in row {
                transposed[*j].push((i, *val));
            }
        }
        self.entries = transposed;
        ark_std::mem::swap(&mut self.rows, &mut self.cols);
    }

    /// Sample a `rows x cols` matrix, each row with `min(d, cols)` distinct random positions
    /// filled with random non-zero field elements. When `cols <= d` every column is filled.
    pub fn rand<R: Rng + ?Sized>(rows: usize, cols: usize, d: usize, rng: &mut R) -> Self {
        let mut mat = Self::new(rows, cols);
        for row in mat.entries.iter_mut() {
            let positions: Vec<usize> = if cols <= d {
                (0..cols).collect()
            } else {
                index::sample(rng, cols, d).into_vec()
            };
            *row = positions
                .into_iter()
                .map(|j| (j, rand_nonzero(rng)))
                .collect();
        }
        mat
    }
}

/// uniform sample from `F \ {0}`
fn rand_nonzero<F: Field, R: Rng + ?Sized>(rng: &mut R) -> F {
    loop {
        let val = F::rand(rng);
        if !val.is_zero() {
            return val;
        }
    }
}
