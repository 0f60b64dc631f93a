//! testing utilities

use ark_ff::{Field, Fp64, MontBackend, MontConfig};
use ark_std::rand::{rngs::StdRng, SeedableRng};

/// a CryptoRng
pub fn test_rng() -> StdRng {
    // arbitrary seed
    let seed = [
        1, 0, 0, 0, 23, 0, 0, 0, 200, 1, 0, 0, 210, 30, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0,
    ];
    StdRng::from_seed(seed)
}

#[derive(MontConfig)]
#[modulus = "97"]
#[generator = "5"]
pub struct F97Config;
/// the tiny prime field used by the reference parameterization
pub type F97 = Fp64<MontBackend<F97Config, 1>>;

/// dense `M * x` where `M` is row-major, i.e. `y[i] = sum_j M[i][j] * x[j]`
pub fn dense_mul<F: Field>(m: &[Vec<F>], x: &[F]) -> Vec<F> {
    m.iter()
        .map(|row| {
            assert_eq!(row.len(), x.len());
            row.iter().zip(x.iter()).map(|(a, b)| *a * b).sum()
        })
        .collect()
}

/// dense `M^T * w`, i.e. `y[j] = sum_i M[i][j] * w[i]`
pub fn dense_transpose_mul<F: Field>(m: &[Vec<F>], w: &[F]) -> Vec<F> {
    assert_eq!(m.len(), w.len());
    let width = m.first().map_or(0, |row| row.len());
    let mut y = vec![F::ZERO; width];
    for (row, wi) in m.iter().zip(w.iter()) {
        for (yj, a) in y.iter_mut().zip(row.iter()) {
            *yj += *a * wi;
        }
    }
    y
}
