//! Prime field of the vault. p = 2^31 - 1 (Mersenne prime).
//!
//! Elements are kept in canonical form: a single `u64` limb holding a value
//! in `[0, p)`. Reduction after multiplication uses the Mersenne folding
//! identity `v mod (2^31 - 1) = (v & p) + (v >> 31)`.

use core::fmt::{self, Debug, Display, Formatter};
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Field modulus: p = 2^31 - 1.
pub const MODULUS: u64 = (1u64 << 31) - 1;

/// Prime field element, stored canonically in `[0, MODULUS)`.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub struct Fp {
    value: u64,
}

impl Fp {
    /// Zero element.
    pub const ZERO: Self = Fp { value: 0 };

    /// One element.
    pub const ONE: Self = Fp { value: 1 };

    /// Create a field element from an arbitrary `u64`, reducing modulo p.
    #[inline]
    pub const fn from_u64(value: u64) -> Self {
        Fp {
            value: value % MODULUS,
        }
    }

    /// Return the canonical `u64` representation in `[0, MODULUS)`.
    #[inline]
    pub const fn as_canonical_u64(&self) -> u64 {
        self.value
    }

    /// Check if this field element is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Variable-time exponentiation by squaring.
    pub fn pow(&self, mut exp: u64) -> Self {
        let mut result = Self::ONE;
        let mut base = *self;

        while exp != 0 {
            if exp & 1 == 1 {
                result *= base;
            }
            base *= base;
            exp >>= 1;
        }

        result
    }

    /// Multiplicative inverse via Fermat's little theorem: a^{-1} = a^{p-2}.
    ///
    /// Returns `None` for zero, which has no inverse.
    pub fn try_inverse(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(self.pow(MODULUS - 2))
        }
    }

    /// Multiplicative inverse of a nonzero element.
    ///
    /// Panics on zero; use [`try_inverse`](Self::try_inverse) where zero can
    /// reach this path.
    pub fn inverse(&self) -> Self {
        match self.try_inverse() {
            Some(inv) => inv,
            None => panic!("inverse of zero"),
        }
    }
}

/// Fold a product (< 2^62) back into `[0, MODULUS)`.
#[inline]
const fn reduce_wide(mut v: u64) -> u64 {
    v = (v & MODULUS) + (v >> 31);
    v = (v & MODULUS) + (v >> 31);
    if v >= MODULUS {
        v -= MODULUS;
    }
    v
}

impl Add for Fp {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        let mut sum = self.value + rhs.value;
        if sum >= MODULUS {
            sum -= MODULUS;
        }
        Fp { value: sum }
    }
}

impl AddAssign for Fp {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Fp {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        let value = if self.value >= rhs.value {
            self.value - rhs.value
        } else {
            self.value + MODULUS - rhs.value
        };
        Fp { value }
    }
}

impl SubAssign for Fp {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Fp {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        if self.value == 0 {
            self
        } else {
            Fp {
                value: MODULUS - self.value,
            }
        }
    }
}

impl Mul for Fp {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        // Both operands are < 2^31, so the product fits in 62 bits.
        Fp {
            value: reduce_wide(self.value * rhs.value),
        }
    }
}

impl MulAssign for Fp {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Div for Fp {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        self * rhs.inverse()
    }
}

impl DivAssign for Fp {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl Sum for Fp {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl Product for Fp {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

impl From<u64> for Fp {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<Fp> for u64 {
    fn from(fp: Fp) -> u64 {
        fp.value
    }
}

impl Distribution<Fp> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Fp {
        loop {
            let word = rng.random::<u32>() & (MODULUS as u32);
            if (word as u64) < MODULUS {
                return Fp { value: word as u64 };
            }
        }
    }
}

impl Display for Fp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Debug for Fp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Fp({})", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_one() {
        assert_eq!(Fp::ZERO + Fp::ZERO, Fp::ZERO);
        assert_eq!(Fp::ONE * Fp::ONE, Fp::ONE);
        assert_eq!(Fp::ZERO * Fp::ONE, Fp::ZERO);
        assert_eq!(Fp::ONE + Fp::ZERO, Fp::ONE);
    }

    #[test]
    fn test_addition_wraps() {
        let a = Fp::from_u64(MODULUS - 1);
        let b = Fp::from_u64(2);
        assert_eq!(a + b, Fp::from_u64(1));
    }

    #[test]
    fn test_subtraction_wraps() {
        let a = Fp::from_u64(3);
        let b = Fp::from_u64(10);
        assert_eq!(a - b, Fp::from_u64(MODULUS - 7));
    }

    #[test]
    fn test_multiplication() {
        let a = Fp::from_u64(6);
        let b = Fp::from_u64(7);
        assert_eq!(a * b, Fp::from_u64(42));
    }

    #[test]
    fn test_multiplication_reduces() {
        // (p - 1)^2 = p^2 - 2p + 1 = 1 mod p
        let a = Fp::from_u64(MODULUS - 1);
        assert_eq!(a * a, Fp::ONE);
    }

    #[test]
    fn test_negation() {
        let a = Fp::from_u64(5);
        assert_eq!(a + (-a), Fp::ZERO);
        assert_eq!(-Fp::ZERO, Fp::ZERO);
    }

    #[test]
    fn test_pow() {
        let a = Fp::from_u64(3);
        assert_eq!(a.pow(0), Fp::ONE);
        assert_eq!(a.pow(1), a);
        assert_eq!(a.pow(5), Fp::from_u64(243));
    }

    #[test]
    fn test_inverse() {
        let a = Fp::from_u64(5);
        assert_eq!(a * a.inverse(), Fp::ONE);
    }

    #[test]
    fn test_inverse_of_zero() {
        assert_eq!(Fp::ZERO.try_inverse(), None);
    }

    #[test]
    fn test_from_u64_reduces() {
        assert_eq!(Fp::from_u64(MODULUS), Fp::ZERO);
        assert_eq!(Fp::from_u64(MODULUS + 7), Fp::from_u64(7));
    }
}
