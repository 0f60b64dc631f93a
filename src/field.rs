//! Prime field helpers shared by the sparse matrices and the encoders
//!
//! The modulus `p` is fixed by the field type `F` (i.e. `F::MODULUS`), every value is kept reduced.

use crate::CodeError;
use ark_ff::{BigInteger, PrimeField};
use p3_maybe_rayon::prelude::*;

/// `a + b mod p`
#[inline(always)]
pub fn add<F: PrimeField>(a: F, b: F) -> F {
    a + b
}

/// `a * b mod p`
#[inline(always)]
pub fn mult<F: PrimeField>(a: F, b: F) -> F {
    a * b
}

/// Returns `x` such that `a * x = 1 mod p`, computed as `a^(p-2)`
pub fn inverse<F: PrimeField>(a: F) -> Result<F, CodeError> {
    if a.is_zero() {
        return Err(CodeError::DivisionByZero);
    }
    let mut exp = F::MODULUS;
    exp.sub_with_borrow(&F::BigInt::from(2u64));
    Ok(a.pow(exp))
}

/// Field-wise vector addition
pub fn vec_add<F: PrimeField>(a: &[F], b: &[F]) -> Result<Vec<F>, CodeError> {
    if a.len() != b.len() {
        return Err(CodeError::LengthMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }
    Ok(a.par_iter().zip(b.par_iter()).map(|(x, y)| *x + y).collect())
}

/// Ensure the field has at least `len` distinct non-zero evaluation points `1..=len`, i.e. `p > len`
pub fn check_capacity<F: PrimeField>(len: usize) -> Result<(), CodeError> {
    if F::MODULUS > F::BigInt::from(len as u64) {
        Ok(())
    } else {
        Err(CodeError::FieldTooSmall { len })
    }
}

/// log2(p) as a float, used by the sparsity bounds
pub fn log2_modulus<F: PrimeField>() -> f64 {
    // only the top limbs matter at f64 precision
    let modulus = F::MODULUS;
    let p = modulus
        .as_ref()
        .iter()
        .rev()
        .fold(0f64, |acc, limb| acc * 2f64.powi(64) + *limb as f64);
    p.log2()
}
