//! Truncated q-series with integer coefficients
//!
//! A [`PowerSeries`] keeps the coefficients of q^0 .. q^(MAX_ORDER-1).
//! Every operation truncates at that order, so products of series are
//! exact up to the truncation point and higher degrees simply vanish.
//! Coefficient arithmetic wraps on overflow.

use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

use crate::error::{Error, Result};

/// Number of stored coefficients (highest degree + 1)
pub const MAX_ORDER: usize = 256;

/// Power series in q truncated to `MAX_ORDER` terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerSeries {
    coeffs: [i64; MAX_ORDER],
}

impl PowerSeries {
    /// Series with every coefficient set to `value`
    pub fn new(value: i64) -> Self {
        Self {
            coeffs: [value; MAX_ORDER],
        }
    }

    /// Build a series from `coeffs`, placing `coeffs[0]` at degree `offset`.
    /// Terms that land past the truncation order are dropped.
    pub fn from_coeffs(coeffs: &[i64], offset: usize) -> Self {
        let mut s = Self::zero();
        for (deg, &c) in (offset..MAX_ORDER).zip(coeffs) {
            s.coeffs[deg] = c;
        }
        s
    }

    /// The binomial `1 - q^k`
    pub fn one_minus_q_pow(k: usize) -> Self {
        let mut s = Self::one();
        if k < MAX_ORDER {
            s.coeffs[k] = s.coeffs[k].wrapping_sub(1);
        }
        s
    }

    /// Coefficient of q^deg (zero beyond the truncation order)
    pub fn coeff(&self, deg: usize) -> i64 {
        self.coeffs.get(deg).copied().unwrap_or(0)
    }

    pub fn coeffs(&self) -> &[i64; MAX_ORDER] {
        &self.coeffs
    }

    /// The first `order` coefficients
    pub fn coeffs_upto(&self, order: usize) -> &[i64] {
        &self.coeffs[..order.min(MAX_ORDER)]
    }

    /// Multiply by q^k
    pub fn shift(&self, k: usize) -> Self {
        let mut ans = Self::zero();
        if k < MAX_ORDER {
            ans.coeffs[k..].copy_from_slice(&self.coeffs[..MAX_ORDER - k]);
        }
        ans
    }

    pub fn scale(&self, c: i64) -> Self {
        let mut ans = self.clone();
        for a in ans.coeffs.iter_mut() {
            *a = a.wrapping_mul(c);
        }
        ans
    }

    pub fn add(&self, other: &Self) -> Self {
        let mut ans = self.clone();
        for (a, &b) in ans.coeffs.iter_mut().zip(&other.coeffs) {
            *a = a.wrapping_add(b);
        }
        ans
    }

    pub fn subtract(&self, other: &Self) -> Self {
        let mut ans = self.clone();
        for (a, &b) in ans.coeffs.iter_mut().zip(&other.coeffs) {
            *a = a.wrapping_sub(b);
        }
        ans
    }

    /// Truncated Cauchy product
    pub fn multiply(&self, other: &Self) -> Self {
        let mut ans = Self::zero();
        for (i, &a) in self.coeffs.iter().enumerate() {
            // Factors in the product side are sparse, skip empty rows
            if a == 0 {
                continue;
            }
            for (j, &b) in other.coeffs[..MAX_ORDER - i].iter().enumerate() {
                ans.coeffs[i + j] = ans.coeffs[i + j].wrapping_add(a.wrapping_mul(b));
            }
        }
        ans
    }

    /// Multiplicative inverse.
    ///
    /// Solves `sum_{i=0..=d} s[i] * t[d-i] = [d == 0]` degree by degree.
    /// Only series whose constant term is a unit (`1` or `-1`) have an
    /// inverse over the integers; anything else is an error.
    pub fn invert(&self) -> Result<Self> {
        let c = self.coeffs[0];
        match c {
            0 => return Err(Error::ZeroConstantTerm),
            1 | -1 => {}
            constant => return Err(Error::NotInvertible { constant }),
        }
        let mut ans = Self::zero();
        // 1/c == c for a unit
        ans.coeffs[0] = c;
        for deg in 1..MAX_ORDER {
            let mut sum = 0i64;
            for i in 1..=deg {
                sum = sum.wrapping_add(self.coeffs[i].wrapping_mul(ans.coeffs[deg - i]));
            }
            ans.coeffs[deg] = sum.wrapping_neg().wrapping_mul(c);
        }
        Ok(ans)
    }

    pub fn divide(&self, other: &Self) -> Result<Self> {
        Ok(self.multiply(&other.invert()?))
    }

    /// Integer power; negative exponents go through [`invert`](Self::invert).
    /// `pow(0)` is the identity and never fails.
    pub fn pow(&self, n: i32) -> Result<Self> {
        if n == 0 {
            return Ok(Self::one());
        }
        let mut base = if n < 0 { self.invert()? } else { self.clone() };
        let mut e = n.unsigned_abs();
        let mut ans = Self::one();
        while e > 0 {
            if e & 1 == 1 {
                ans = ans.multiply(&base);
            }
            e >>= 1;
            if e > 0 {
                base = base.multiply(&base);
            }
        }
        Ok(ans)
    }

    /// Printable form truncated to the first `order` terms
    pub fn display(&self, order: usize) -> SeriesDisplay<'_> {
        SeriesDisplay {
            series: self,
            order: order.min(MAX_ORDER),
        }
    }
}

/// Renders a series as `1 + q + 2*q^2 - q^5 + O(q^N)`
pub struct SeriesDisplay<'a> {
    series: &'a PowerSeries,
    order: usize,
}

impl fmt::Display for SeriesDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (deg, &c) in self.series.coeffs[..self.order].iter().enumerate() {
            if c == 0 {
                continue;
            }
            let abs = c.unsigned_abs();
            if first {
                if c < 0 {
                    f.write_str("-")?;
                }
            } else {
                f.write_str(if c < 0 { " - " } else { " + " })?;
            }
            first = false;
            match (deg, abs) {
                (0, _) => write!(f, "{abs}")?,
                (1, 1) => f.write_str("q")?,
                (1, _) => write!(f, "{abs}*q")?,
                (_, 1) => write!(f, "q^{deg}")?,
                (_, _) => write!(f, "{abs}*q^{deg}")?,
            }
        }
        if first {
            f.write_str("0")?;
        }
        write!(f, " + O(q^{})", self.order)
    }
}

impl Index<usize> for PowerSeries {
    type Output = i64;

    fn index(&self, deg: usize) -> &i64 {
        &self.coeffs[deg]
    }
}

impl IndexMut<usize> for PowerSeries {
    fn index_mut(&mut self, deg: usize) -> &mut i64 {
        &mut self.coeffs[deg]
    }
}

impl Zero for PowerSeries {
    fn zero() -> Self {
        Self::new(0)
    }

    fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|&c| c == 0)
    }
}

impl One for PowerSeries {
    fn one() -> Self {
        let mut s = Self::new(0);
        s.coeffs[0] = 1;
        s
    }
}

impl Add for PowerSeries {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        PowerSeries::add(&self, &other)
    }
}

impl Add for &PowerSeries {
    type Output = PowerSeries;

    fn add(self, other: Self) -> PowerSeries {
        PowerSeries::add(self, other)
    }
}

impl Sub for &PowerSeries {
    type Output = PowerSeries;

    fn sub(self, other: Self) -> PowerSeries {
        self.subtract(other)
    }
}

impl Mul for PowerSeries {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        self.multiply(&other)
    }
}

impl Mul for &PowerSeries {
    type Output = PowerSeries;

    fn mul(self, other: Self) -> PowerSeries {
        self.multiply(other)
    }
}

impl Neg for &PowerSeries {
    type Output = PowerSeries;

    fn neg(self) -> PowerSeries {
        self.scale(-1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_unit_series(rng: &mut StdRng) -> PowerSeries {
        let mut s = PowerSeries::zero();
        s[0] = if rng.gen_bool(0.5) { 1 } else { -1 };
        for deg in 1..12 {
            s[deg] = rng.gen_range(-3..=3);
        }
        s
    }

    #[test]
    fn test_euler_product_gives_partition_numbers() {
        let mut euler = PowerSeries::one();
        for k in 1..MAX_ORDER {
            euler = euler.multiply(&PowerSeries::one_minus_q_pow(k));
        }
        // Pentagonal number theorem
        assert_eq!(
            euler.coeffs_upto(16),
            &[1, -1, -1, 0, 0, 1, 0, 1, 0, 0, 0, 0, -1, 0, 0, -1]
        );
        let p = euler.invert().unwrap();
        assert_eq!(p.coeffs_upto(11), &[1, 1, 2, 3, 5, 7, 11, 15, 22, 30, 42]);
        assert_eq!(p[100], 190_569_292);
        assert_eq!(p[200], 3_972_999_029_388);
    }

    #[test]
    fn test_invert_roundtrip() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..20 {
            let s = random_unit_series(&mut rng);
            let inv = s.invert().unwrap();
            assert_eq!(&s * &inv, PowerSeries::one());
        }
    }

    #[test]
    fn test_invert_rejects_non_units() {
        assert!(matches!(PowerSeries::zero().invert(), Err(Error::ZeroConstantTerm)));
        let two = PowerSeries::from_coeffs(&[2, 1], 0);
        assert!(matches!(two.invert(), Err(Error::NotInvertible { constant: 2 })));
        assert!(PowerSeries::zero().pow(-1).is_err());
    }

    #[test]
    fn test_pow_adds_exponents() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..5 {
            let s = random_unit_series(&mut rng);
            for a in -3..=3 {
                for b in -3..=3 {
                    let lhs = s.pow(a + b).unwrap();
                    let rhs = s.pow(a).unwrap() * s.pow(b).unwrap();
                    assert_eq!(lhs, rhs, "a = {a}, b = {b}");
                }
            }
        }
    }

    #[test]
    fn test_pow_zero_is_identity() {
        assert_eq!(PowerSeries::zero().pow(0).unwrap(), PowerSeries::one());
    }

    #[test]
    fn test_geometric_series() {
        let g = PowerSeries::one_minus_q_pow(1).pow(-1).unwrap();
        assert!(g.coeffs().iter().all(|&c| c == 1));
        let g3 = PowerSeries::one_minus_q_pow(3).pow(-1).unwrap();
        assert_eq!(g3.coeffs_upto(7), &[1, 0, 0, 1, 0, 0, 1]);
    }

    #[test]
    fn test_divide() {
        let a = PowerSeries::from_coeffs(&[1, 2, 1], 0);
        let b = PowerSeries::from_coeffs(&[1, 1], 0);
        assert_eq!(a.divide(&b).unwrap(), b);
    }

    #[test]
    fn test_shift_scale_add() {
        let s = PowerSeries::from_coeffs(&[1, 2, 3], 0);
        assert_eq!(s.shift(2), PowerSeries::from_coeffs(&[1, 2, 3], 2));
        assert_eq!(s.shift(MAX_ORDER), PowerSeries::zero());
        assert_eq!(s.scale(-2).coeffs_upto(3), &[-2, -4, -6]);
        assert!((&s + &(-&s)).is_zero());
        assert_eq!(&s - &s, PowerSeries::zero());
        let tail = PowerSeries::from_coeffs(&[7, 8, 9], MAX_ORDER - 1);
        assert_eq!(tail[MAX_ORDER - 1], 7);
        assert_eq!(tail.coeff(MAX_ORDER), 0);
    }

    #[test]
    fn test_display() {
        let s = PowerSeries::from_coeffs(&[1, 1, 2, 0, 0, -1, -3], 0);
        assert_eq!(s.display(7).to_string(), "1 + q + 2*q^2 - q^5 - 3*q^6 + O(q^7)");
        assert_eq!(s.display(3).to_string(), "1 + q + 2*q^2 + O(q^3)");
        let neg = PowerSeries::from_coeffs(&[-1], 1);
        assert_eq!(neg.display(4).to_string(), "-q + O(q^4)");
        assert_eq!(PowerSeries::zero().display(5).to_string(), "0 + O(q^5)");
    }
}
