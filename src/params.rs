//! Code parameters and per-level dimension/sparsity derivation
//!
//! Sparsity bounds follow Sec 5 of <https://eprint.iacr.org/2021/1043>, with the distance analysis
//! targeting `SOUNDNESS_BITS` bits of slack.

use crate::{field, CodeError};
use ark_ff::PrimeField;

/// Messages of at most this length are Reed-Solomon encoded directly
pub const BASE_LEN: usize = 20;
/// Slack (in bits) of the union bound behind `cn` and `dn`
pub const SOUNDNESS_BITS: usize = 110;
/// Multiplicative margin on beta in the precode bound
const PRECODE_BETA_MARGIN: f64 = 1.2;
/// Additive margin on nu in the postcode bound
const POSTCODE_NU_MARGIN: f64 = 0.03;

/// An exact non-negative rational `num / den`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio {
    pub num: usize,
    pub den: usize,
}

impl Ratio {
    /// `num / den`
    pub const fn new(num: usize, den: usize) -> Self {
        Self { num, den }
    }

    /// as a float
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// `ceil(self * n)` in exact integer arithmetic
    ///
    /// # Panics
    /// - if `den == 0` or `n * num` overflows, use [`Self::checked_ceil_mul`] on unvalidated input
    #[inline]
    pub fn ceil_mul(&self, n: usize) -> usize {
        (n * self.num).div_ceil(self.den)
    }

    /// `ceil(self * n)`, or `None` if `den == 0` or `n * num` overflows
    #[inline]
    pub fn checked_ceil_mul(&self, n: usize) -> Option<usize> {
        if self.den == 0 {
            return None;
        }
        n.checked_mul(self.num).map(|x| x.div_ceil(self.den))
    }
}

/// Configuration of a recursive linear-time code
///
/// # Notation
/// - alpha: a level of message length `n_i` recurses on a message of length `ceil(alpha * n_i)`
/// - beta: targeted relative distance numerator, the code distance is `beta / r`
/// - r: inverse rate, a message of length `n` has codeword length `ceil(r * n)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeSpec {
    pub alpha: Ratio,
    pub beta: Ratio,
    pub r: Ratio,
    /// recursion stops once the message length is at most this
    pub base_len: usize,
    /// slack in bits used by the sparsity bounds
    pub soundness_bits: usize,
}

impl Default for CodeSpec {
    /// alpha = 0.238, beta = 0.1205, r = 1.72
    fn default() -> Self {
        Self::table(6)
    }
}

/// Dimensions and row-sparsity of one recursion level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelParams {
    /// message length at this level, rows of the precode
    pub ni: usize,
    /// precode output length, i.e. message length of the next level
    pub mi: usize,
    /// rows of the postcode, i.e. codeword length of the next level
    pub niprime: usize,
    /// columns of the postcode
    pub miprime: usize,
    /// non-zeros per precode row
    pub cn: usize,
    /// non-zeros per postcode row
    pub dn: usize,
}

impl CodeSpec {
    /// Parameters from Table 1 of the write-up, `row` in `1..=6`.
    ///
    /// # Panics
    /// - if `row` is not in `1..=6`
    pub const fn table(row: usize) -> Self {
        let (alpha, beta, r) = match row {
            1 => (Ratio::new(239, 2000), Ratio::new(71, 2500), Ratio::new(71, 50)),
            2 => (Ratio::new(69, 500), Ratio::new(111, 2500), Ratio::new(147, 100)),
            3 => (Ratio::new(89, 500), Ratio::new(61, 1000), Ratio::new(1521, 1000)),
            4 => (Ratio::new(1, 5), Ratio::new(41, 500), Ratio::new(41, 25)),
            5 => (Ratio::new(211, 1000), Ratio::new(97, 1000), Ratio::new(202, 125)),
            6 => (Ratio::new(119, 500), Ratio::new(241, 2000), Ratio::new(43, 25)),
            _ => panic!("only rows 1..=6 of the parameter table exist"),
        };
        Self {
            alpha,
            beta,
            r,
            base_len: BASE_LEN,
            soundness_bits: SOUNDNESS_BITS,
        }
    }

    /// relative distance `delta = beta / r`
    pub fn distance(&self) -> f64 {
        self.beta.as_f64() / self.r.as_f64()
    }

    /// codeword length for a message of length `n`
    #[inline]
    pub fn codeword_len(&self, n: usize) -> usize {
        self.r.ceil_mul(n)
    }

    /// Derive dimensions and sparsity of a level with message length `ni`, where `log_p = log2(|F|)`.
    ///
    /// Returns `InvalidParam` if (alpha, beta, r) fall outside the regime where both matrices
    /// are non-empty and both sparsity bounds are well-defined and positive.
    pub fn derive_level(&self, ni: usize, log_p: f64) -> Result<LevelParams, CodeError> {
        self.check_ratios()?;
        let alpha = self.alpha.as_f64();
        let beta = self.beta.as_f64();
        let r = self.r.as_f64();
        let slack = self.soundness_bits as f64 / ni as f64;

        let mi = checked_ceil_mul(self.alpha, ni)?;
        let niprime = checked_ceil_mul(self.r, mi)?;
        let miprime = checked_ceil_mul(self.r, ni)?
            .checked_sub(ni + niprime)
            .filter(|m| *m > 0)
            .ok_or_else(|| {
                CodeError::InvalidParam(format!("empty postcode at level of length {}", ni))
            })?;
        if mi == 0 || mi >= ni {
            return Err(CodeError::InvalidParam(format!(
                "precode does not shrink {} (to {})",
                ni, mi
            )));
        }

        // precode
        let cn = {
            let scaled_beta = PRECODE_BETA_MARGIN * beta;
            let linear = (scaled_beta * ni as f64).max(beta * ni as f64 + 3.0);
            let numer =
                slack + binary_entropy(beta)? + alpha * binary_entropy(scaled_beta / alpha)?;
            let denom = beta * log2_positive(alpha / scaled_beta)?;
            ceil_positive(linear.min(numer / denom), "cn")?
        };

        // postcode
        let dn = {
            let mu = r - 1.0 - r * alpha;
            let nu = beta + alpha * beta + POSTCODE_NU_MARGIN;
            let linear = ni as f64 * (2.0 * beta + (r - 1.0 + slack) / log_p);
            let numer = r * alpha * binary_entropy(beta / r)? + mu * binary_entropy(nu / mu)? + slack;
            let denom = alpha * beta * log2_positive(mu / nu)?;
            ceil_positive(linear.min(numer / denom), "dn")?
        };

        Ok(LevelParams {
            ni,
            mi,
            niprime,
            miprime,
            cn,
            dn,
        })
    }

    /// Parameters of every recursion level for a message of length `n` over field `F`,
    /// outermost level first. Empty if `n <= base_len`.
    pub fn levels<F: PrimeField>(&self, n: usize) -> Result<Vec<LevelParams>, CodeError> {
        if n == 0 {
            return Err(CodeError::InvalidParam("empty message".to_string()));
        }
        self.check_ratios()?;
        // every later ceiling is at most this one
        checked_ceil_mul(self.r, n)?;
        let log_p = field::log2_modulus::<F>();
        let mut levels = vec![];
        let mut ni = n;
        while ni > self.base_len {
            let level = self.derive_level(ni, log_p)?;
            ni = level.mi;
            levels.push(level);
        }
        Ok(levels)
    }

    // zero denominators would divide by zero in every ceiling
    fn check_ratios(&self) -> Result<(), CodeError> {
        for (name, ratio) in [("alpha", self.alpha), ("beta", self.beta), ("r", self.r)] {
            if ratio.den == 0 {
                return Err(CodeError::InvalidParam(format!(
                    "{} has a zero denominator",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Check that a code for messages of length `n` exists over `F`: every level is well-defined
    /// and `F` is large enough for the base-case Reed-Solomon code.
    pub fn validate<F: PrimeField>(&self, n: usize) -> Result<(), CodeError> {
        let levels = self.levels::<F>(n)?;
        let base_msg_len = levels.last().map_or(n, |l| l.mi);
        field::check_capacity::<F>(self.codeword_len(base_msg_len))
    }
}

/// the binary entropy function `H(x) = -x log2(x) - (1-x) log2(1-x)`, for `0 < x < 1`
pub fn binary_entropy(x: f64) -> Result<f64, CodeError> {
    if !(0.0 < x && x < 1.0) {
        return Err(CodeError::InvalidParam(format!(
            "binary entropy undefined at {}",
            x
        )));
    }
    Ok(-x * x.log2() - (1.0 - x) * (1.0 - x).log2())
}

fn checked_ceil_mul(ratio: Ratio, n: usize) -> Result<usize, CodeError> {
    ratio.checked_ceil_mul(n).ok_or_else(|| {
        CodeError::InvalidParam(format!("ceil({}/{} * {}) overflows", ratio.num, ratio.den, n))
    })
}

// log2 that must come out positive for the bound to make sense
fn log2_positive(x: f64) -> Result<f64, CodeError> {
    let l = x.log2();
    if l.is_finite() && l > 0.0 {
        Ok(l)
    } else {
        Err(CodeError::InvalidParam(format!(
            "log2({}) is not positive",
            x
        )))
    }
}

fn ceil_positive(x: f64, name: &str) -> Result<usize, CodeError> {
    if x.is_finite() && x > 0.0 {
        Ok(x.ceil() as usize)
    } else {
        Err(CodeError::InvalidParam(format!("{} = {} is not positive", name, x)))
    }
}
