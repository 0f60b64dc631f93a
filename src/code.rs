//! Code descriptor: the sparse precode/postcode matrices of every recursion level

use crate::{
    field,
    params::{CodeSpec, LevelParams},
    sparse::SparseMatrix,
    CodeError,
};
use ark_ff::PrimeField;
use ark_std::{
    end_timer,
    rand::{Rng, SeedableRng},
    start_timer,
};
use p3_maybe_rayon::prelude::*;
use rand_chacha::ChaCha20Rng;

/// A linear-time encodable code for messages of a fixed length.
///
/// Level `i` holds a precode of shape `n_i x m_i` and a postcode of shape `n_i' x m_i'`
/// (see [`LevelParams`]). A codeword of level `i` is `x ++ z ++ v` where `x` is the message,
/// `z` is the level-`(i+1)` codeword of `x * precode` and `v = z * postcode`. Past the last
/// level the message is Reed-Solomon encoded.
///
/// The descriptor is immutable after generation, encoding only reads it, so it can be shared
/// across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearCode<F: PrimeField> {
    spec: CodeSpec,
    msg_len: usize,
    precodes: Vec<SparseMatrix<F>>,
    postcodes: Vec<SparseMatrix<F>>,
}

impl<F: PrimeField> LinearCode<F> {
    /// Sample a code for messages of length `n`.
    ///
    /// One 32-byte seed per level is drawn from `rng`, each level is then sampled independently
    /// (in parallel with the `parallel` feature) from its own ChaCha20 stream, so the result only
    /// depends on the state of `rng`.
    pub fn generate<R: Rng + ?Sized>(
        spec: CodeSpec,
        n: usize,
        rng: &mut R,
    ) -> Result<Self, CodeError> {
        let levels = spec.levels::<F>(n)?;
        let base_msg_len = levels.last().map_or(n, |l| l.mi);
        field::check_capacity::<F>(spec.codeword_len(base_msg_len))?;

        let gen_time = start_timer!(|| ark_std::format!(
            "LinearCode::generate (n={}, levels={})",
            n,
            levels.len()
        ));
        let seeds: Vec<[u8; 32]> = levels.iter().map(|_| rng.gen()).collect();
        let (precodes, postcodes): (Vec<_>, Vec<_>) = levels
            .par_iter()
            .zip(seeds.par_iter())
            .map(|(level, seed)| sample_level(level, &mut ChaCha20Rng::from_seed(*seed)))
            .unzip();
        end_timer!(gen_time);

        Ok(Self {
            spec,
            msg_len: n,
            precodes,
            postcodes,
        })
    }

    /// Sample a code deterministically from a `u64` seed
    pub fn from_seed(spec: CodeSpec, n: usize, seed: u64) -> Result<Self, CodeError> {
        Self::generate(spec, n, &mut ChaCha20Rng::seed_from_u64(seed))
    }

    /// code parameters
    pub fn spec(&self) -> &CodeSpec {
        &self.spec
    }

    /// message length `n`
    #[inline]
    pub fn msg_len(&self) -> usize {
        self.msg_len
    }

    /// number of recursion levels before the Reed-Solomon base case
    #[inline]
    pub fn num_levels(&self) -> usize {
        self.precodes.len()
    }

    /// message length at the Reed-Solomon base case
    #[inline]
    pub fn base_msg_len(&self) -> usize {
        self.precodes.last().map_or(self.msg_len, |pc| pc.cols())
    }

    /// Codeword length, read off the outermost level as `|x| + |z| + |v|`
    pub fn codeword_len(&self) -> usize {
        match (self.precodes.first(), self.postcodes.first()) {
            (Some(precode), Some(postcode)) => precode.rows() + postcode.rows() + postcode.cols(),
            _ => self.spec.codeword_len(self.msg_len),
        }
    }

    /// precodes, outermost level first
    pub fn precodes(&self) -> &[SparseMatrix<F>] {
        &self.precodes
    }

    /// postcodes, outermost level first
    pub fn postcodes(&self) -> &[SparseMatrix<F>] {
        &self.postcodes
    }
}

fn sample_level<F: PrimeField, R: Rng>(
    level: &LevelParams,
    rng: &mut R,
) -> (SparseMatrix<F>, SparseMatrix<F>) {
    let precode = SparseMatrix::rand(level.ni, level.mi, level.cn, rng);
    let postcode = SparseMatrix::rand(level.niprime, level.miprime, level.dn, rng);
    (precode, postcode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        params::Ratio,
        test_utils::{test_rng, F97},
    };
    use ark_bn254::Fr;

    #[test]
    fn shapes_follow_level_params() {
        let rng = &mut test_rng();
        let spec = CodeSpec::default();
        for n in [21, 128, 300, 1024] {
            let code = LinearCode::<Fr>::generate(spec, n, rng).unwrap();
            let levels = spec.levels::<Fr>(n).unwrap();
            assert_eq!(code.num_levels(), levels.len());
            assert_eq!(code.codeword_len(), spec.codeword_len(n));

            for (level, (pre, post)) in levels
                .iter()
                .zip(code.precodes().iter().zip(code.postcodes()))
            {
                assert_eq!((pre.rows(), pre.cols()), (level.ni, level.mi));
                assert_eq!((post.rows(), post.cols()), (level.niprime, level.miprime));
                for i in 0..pre.rows() {
                    assert_eq!(pre.row(i).len(), level.cn.min(level.mi));
                }
                for i in 0..post.rows() {
                    assert_eq!(post.row(i).len(), level.dn.min(level.miprime));
                }
            }
            assert_eq!(code.base_msg_len(), levels.last().unwrap().mi);
        }
    }

    #[test]
    fn base_case_only_code() {
        let code = LinearCode::<F97>::from_seed(CodeSpec::default(), 20, 7).unwrap();
        assert_eq!(code.num_levels(), 0);
        assert_eq!(code.base_msg_len(), 20);
        assert_eq!(code.codeword_len(), 35);
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let spec = CodeSpec::default();
        let a = LinearCode::<Fr>::from_seed(spec, 500, 42).unwrap();
        let b = LinearCode::<Fr>::from_seed(spec, 500, 42).unwrap();
        let c = LinearCode::<Fr>::from_seed(spec, 500, 43).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.codeword_len(), c.codeword_len());
    }

    #[test]
    fn generation_rejects_bad_config() {
        let spec = CodeSpec {
            base_len: 60,
            ..CodeSpec::default()
        };
        assert!(matches!(
            LinearCode::<F97>::from_seed(spec, 60, 0),
            Err(CodeError::FieldTooSmall { len: 104 })
        ));
        assert!(matches!(
            LinearCode::<F97>::from_seed(CodeSpec::default(), 0, 0),
            Err(CodeError::InvalidParam(_))
        ));
        let spec = CodeSpec {
            r: Ratio::new(43, 0),
            ..CodeSpec::default()
        };
        assert!(matches!(
            LinearCode::<F97>::from_seed(spec, 15, 0),
            Err(CodeError::InvalidParam(_))
        ));
    }
}
