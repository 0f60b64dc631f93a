//! Encoding and transpose ("reverse") encoding of a [`LinearCode`]
//!
//! Both walk the levels of the code with an explicit loop: downward through the precodes, then
//! the Reed-Solomon base case, then back up through the postcodes (or precodes for the transpose).
//! The recursion depth is `O(log_{1/alpha} n)`.

use crate::{code::LinearCode, field, sparse::SparseMatrix, CodeError};
use ark_ff::PrimeField;
use ark_std::{end_timer, start_timer};
use itertools::izip;
use p3_maybe_rayon::prelude::*;

impl<F: PrimeField> LinearCode<F> {
    /// Encode a message of length `msg_len()` into a codeword of length `codeword_len()`.
    ///
    /// The message is always the prefix of its codeword.
    pub fn encode(&self, msg: &[F]) -> Result<Vec<F>, CodeError> {
        if msg.len() != self.msg_len() {
            return Err(CodeError::DimensionMismatch {
                level: 0,
                expected: self.msg_len(),
                found: msg.len(),
            });
        }
        let encode_time = start_timer!(|| ark_std::format!("encode (n={})", msg.len()));

        // messages of every level, the top one being `msg`
        let mut inputs = Vec::with_capacity(self.num_levels());
        let mut x = msg.to_vec();
        for (level, precode) in self.precodes().iter().enumerate() {
            check_dim(level, precode.rows(), x.len())?;
            let y = precode.multiply(&x)?;
            inputs.push(x);
            x = y;
        }

        let mut z = reed_solomon(&x, self.spec().codeword_len(x.len()))?;

        for (level, x, postcode) in izip!(0..self.num_levels(), inputs, self.postcodes()).rev() {
            check_dim(level, postcode.rows(), z.len())?;
            let v = postcode.multiply(&z)?;
            let mut codeword = x;
            codeword.reserve(z.len() + v.len());
            codeword.extend(z);
            codeword.extend(v);
            z = codeword;
        }
        end_timer!(encode_time);
        Ok(z)
    }

    /// Apply the transpose of the encoding map to a vector of length `codeword_len()`,
    /// returning a vector of length `msg_len()`.
    ///
    /// With `G` the `msg_len() x codeword_len()` generator matrix (`encode(x) = x * G`),
    /// this returns `G * w` without materializing `G`.
    pub fn reverse_encode(&self, w: &[F]) -> Result<Vec<F>, CodeError> {
        if w.len() != self.codeword_len() {
            return Err(CodeError::DimensionMismatch {
                level: 0,
                expected: self.codeword_len(),
                found: w.len(),
            });
        }
        let reverse_time = start_timer!(|| ark_std::format!("reverse_encode (len={})", w.len()));

        // the `x` segment of every level
        let mut prefixes = Vec::with_capacity(self.num_levels());
        let mut rest = w.to_vec();
        for (level, (precode, postcode)) in self
            .precodes()
            .iter()
            .zip(self.postcodes().iter())
            .enumerate()
        {
            let (x_len, z_len, v_len) = (precode.rows(), postcode.rows(), postcode.cols());
            check_dim(level, x_len + z_len + v_len, rest.len())?;

            let v = rest.split_off(x_len + z_len);
            let z = rest.split_off(x_len);
            let z_prime = postcode.transpose_multiply(&v)?;
            prefixes.push(rest);
            rest = field::vec_add(&z, &z_prime)?;
        }

        let base_msg_len = self.base_msg_len();
        check_dim(
            self.num_levels(),
            self.spec().codeword_len(base_msg_len),
            rest.len(),
        )?;
        let mut y = reed_solomon_transpose(&rest, base_msg_len)?;

        for (x, precode) in prefixes.into_iter().zip(self.precodes().iter()).rev() {
            let x_prime = precode.transpose_multiply(&y)?;
            y = field::vec_add(&x, &x_prime)?;
        }
        end_timer!(reverse_time);
        Ok(y)
    }

    /// Encode every message independently (in parallel with the `parallel` feature)
    pub fn encode_batch(&self, msgs: &[Vec<F>]) -> Result<Vec<Vec<F>>, CodeError> {
        msgs.par_iter().map(|msg| self.encode(msg)).collect()
    }

    /// Reverse-encode every vector independently (in parallel with the `parallel` feature)
    pub fn reverse_encode_batch(&self, words: &[Vec<F>]) -> Result<Vec<Vec<F>>, CodeError> {
        words.par_iter().map(|w| self.reverse_encode(w)).collect()
    }

    /// The dense `msg_len() x codeword_len()` generator matrix, row `i` being the encoding of the
    /// `i`-th standard basis vector.
    pub fn generator_matrix(&self) -> Result<Vec<Vec<F>>, CodeError> {
        let n = self.msg_len();
        (0..n)
            .into_par_iter()
            .map(|i| {
                let mut unit = vec![F::ZERO; n];
                unit[i] = F::ONE;
                self.encode(&unit)
            })
            .collect()
    }
}

/// Reed-Solomon encode `x` as polynomial coefficients evaluated at `1, 2, ..., out_len`.
///
/// Requires `p > out_len` for the evaluation points to be distinct and non-zero.
pub fn reed_solomon<F: PrimeField>(x: &[F], out_len: usize) -> Result<Vec<F>, CodeError> {
    field::check_capacity::<F>(out_len)?;
    Ok((1..=out_len as u64)
        .into_par_iter()
        .map(|i| {
            let point = F::from(i);
            let mut power = F::ONE;
            let mut eval = F::ZERO;
            for coeff in x.iter() {
                eval += *coeff * power;
                power *= point;
            }
            eval
        })
        .collect())
}

/// The `k x out_len` Vandermonde matrix `V[j][i] = (i+1)^j`, i.e. `reed_solomon(x, out_len) = x * V`
pub fn vandermonde<F: PrimeField>(k: usize, out_len: usize) -> Result<SparseMatrix<F>, CodeError> {
    field::check_capacity::<F>(out_len)?;
    let mut mat = SparseMatrix::new(k, out_len);
    for i in 0..out_len {
        let point = F::from((i + 1) as u64);
        let mut power = F::ONE;
        for j in 0..k {
            mat.add(j, i, power)?;
            power *= point;
        }
    }
    Ok(mat)
}

/// Transpose of [`reed_solomon`] for messages of length `k`: `y[j] = sum_i w[i] * (i+1)^j`
pub fn reed_solomon_transpose<F: PrimeField>(w: &[F], k: usize) -> Result<Vec<F>, CodeError> {
    vandermonde(k, w.len())?.transpose_multiply(w)
}

/// number of non-zero coordinates
pub fn hamming_weight<F: PrimeField>(v: &[F]) -> usize {
    v.iter().filter(|x| !x.is_zero()).count()
}

#[inline]
fn check_dim(level: usize, expected: usize, found: usize) -> Result<(), CodeError> {
    if expected != found {
        return Err(CodeError::DimensionMismatch {
            level,
            expected,
            found,
        });
    }
    Ok(())
}
