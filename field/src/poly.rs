//! Dense polynomials in coefficient form over [`Fp`].

use serde::{Deserialize, Serialize};

use crate::element::Fp;

/// A polynomial as an ordered coefficient vector, index 0 = constant term.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poly {
    coeffs: Vec<Fp>,
}

impl Poly {
    /// Build a polynomial from its coefficients, constant term first.
    pub fn from_coefficients(coeffs: Vec<Fp>) -> Self {
        Poly { coeffs }
    }

    /// The coefficient slice, constant term first.
    pub fn coefficients(&self) -> &[Fp] {
        &self.coeffs
    }

    /// Number of coefficients (degree + 1 for a non-empty polynomial).
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Evaluate at `x` by Horner's rule.
    pub fn eval(&self, x: Fp) -> Fp {
        self.coeffs
            .iter()
            .rev()
            .fold(Fp::ZERO, |acc, &c| acc * x + c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_constant() {
        let p = Poly::from_coefficients(vec![Fp::from_u64(7)]);
        assert_eq!(p.eval(Fp::from_u64(123)), Fp::from_u64(7));
    }

    #[test]
    fn test_eval_quadratic() {
        // 1 + 2x + 3x^2 at x = 5 is 86
        let p = Poly::from_coefficients(vec![
            Fp::from_u64(1),
            Fp::from_u64(2),
            Fp::from_u64(3),
        ]);
        assert_eq!(p.eval(Fp::from_u64(5)), Fp::from_u64(86));
    }

    #[test]
    fn test_eval_empty() {
        let p = Poly::from_coefficients(vec![]);
        assert_eq!(p.eval(Fp::from_u64(9)), Fp::ZERO);
    }
}
