//! Congruence conditions and the product side of an identity
//!
//! A congruence spec assigns an exponent to every residue class mod `m`
//! and stands for the infinite product
//!
//! ```text
//!   prod_{k >= 1} (1 - q^k)^{e[k mod m]}
//! ```
//!
//! With `e = -1` the factor is the geometric series `1/(1 - q^k)`, so parts
//! of size `k` are allowed; with `e = 0` there is no factor and the class
//! is forbidden. The product truncated to [`MAX_ORDER`] terms counts the
//! partitions whose parts all lie in allowed classes.

use num_traits::One;
use tracing::trace;

use crate::error::{Error, Result};
use crate::qseries::{PowerSeries, MAX_ORDER};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CongruenceSpec {
    modulus: usize,
    exponents: Vec<i32>,
}

impl CongruenceSpec {
    /// `exponents[r]` is the exponent for parts `k ≡ r (mod modulus)`.
    pub fn new(modulus: usize, exponents: Vec<i32>) -> Result<Self> {
        if modulus == 0 || exponents.len() != modulus {
            return Err(Error::InvalidCongruence {
                modulus,
                actual: exponents.len(),
            });
        }
        Ok(Self { modulus, exponents })
    }

    /// Every part size allowed: the generating function of p(n).
    pub fn unrestricted() -> Self {
        Self {
            modulus: 1,
            exponents: vec![-1],
        }
    }

    /// Parts allowed except those in the `forbidden` residue classes.
    pub fn forbidding(modulus: usize, forbidden: &[usize]) -> Result<Self> {
        let mut exponents = vec![-1; modulus];
        for &r in forbidden {
            match exponents.get_mut(r) {
                Some(e) => *e = 0,
                None => {
                    return Err(Error::InvalidCongruence {
                        modulus,
                        actual: r,
                    })
                }
            }
        }
        Self::new(modulus, exponents)
    }

    pub fn modulus(&self) -> usize {
        self.modulus
    }

    pub fn exponents(&self) -> &[i32] {
        &self.exponents
    }

    /// Exponent applied to the factor `(1 - q^k)`
    pub fn exponent(&self, k: usize) -> i32 {
        self.exponents[k % self.modulus]
    }

    /// Residues whose parts are allowed
    pub fn allowed_residues(&self) -> Vec<usize> {
        self.residues(|e| e < 0)
    }

    /// Residues whose parts never appear
    pub fn forbidden_residues(&self) -> Vec<usize> {
        self.residues(|e| e == 0)
    }

    fn residues(&self, keep: impl Fn(i32) -> bool) -> Vec<usize> {
        (0..self.modulus).filter(|&r| keep(self.exponents[r])).collect()
    }

    /// Expand the product up to `MAX_ORDER` terms.
    pub fn product_side(&self) -> Result<PowerSeries> {
        let mut ans = PowerSeries::one();
        for k in 1..MAX_ORDER {
            let e = self.exponent(k);
            if e == 0 {
                continue;
            }
            let factor = PowerSeries::one_minus_q_pow(k).pow(e)?;
            ans = ans.multiply(&factor);
        }
        trace!(modulus = self.modulus, "product side expanded");
        Ok(ans)
    }
}
