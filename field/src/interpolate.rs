//! Lagrange interpolation in coefficient form.

use thiserror::Error;

use crate::element::Fp;
use crate::poly::Poly;

/// Failures local to one interpolation attempt.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum InterpolationError {
    /// Fewer than one unique x-coordinate remained after deduplication.
    #[error("not enough unique points to interpolate")]
    NotEnoughUniquePoints,

    /// A basis denominator reduced to zero and has no inverse.
    #[error("interpolation denominator is not invertible")]
    NonInvertibleDenominator,
}

/// Recover the coefficients of the unique polynomial of degree `n - 1`
/// passing through `n` distinct-x points.
///
/// Duplicate x-coordinates are filtered by first occurrence before the basis
/// construction. Each Lagrange basis term is built as a coefficient-form
/// product of `(x - x_j)` factors and scaled by `y_i / prod(x_i - x_j)`.
pub fn lagrange_interpolate(points: &[(Fp, Fp)]) -> Result<Poly, InterpolationError> {
    let mut unique: Vec<(Fp, Fp)> = Vec::with_capacity(points.len());
    for &(x, y) in points {
        if !unique.iter().any(|&(ux, _)| ux == x) {
            unique.push((x, y));
        }
    }

    let n = unique.len();
    if n < 1 {
        return Err(InterpolationError::NotEnoughUniquePoints);
    }

    let mut coeffs = vec![Fp::ZERO; n];

    for i in 0..n {
        let (xi, yi) = unique[i];
        let mut basis = vec![Fp::ONE];
        let mut denom = Fp::ONE;

        for j in 0..n {
            if i == j {
                continue;
            }
            let (xj, _) = unique[j];

            // Multiply the accumulated basis by (x - xj).
            let mut next = vec![Fp::ZERO; basis.len() + 1];
            for k in 0..basis.len() {
                next[k + 1] += basis[k];
                next[k] -= basis[k] * xj;
            }
            basis = next;
            denom *= xi - xj;
        }

        let inv_denom = denom
            .try_inverse()
            .ok_or(InterpolationError::NonInvertibleDenominator)?;
        let scale = yi * inv_denom;

        for k in 0..n {
            coeffs[k] += basis[k] * scale;
        }
    }

    Ok(Poly::from_coefficients(coeffs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(v: u64) -> Fp {
        Fp::from_u64(v)
    }

    #[test]
    fn test_interpolate_line() {
        // y = 3 + 2x through (1, 5) and (2, 7)
        let points = [(fp(1), fp(5)), (fp(2), fp(7))];
        let poly = lagrange_interpolate(&points).unwrap();
        assert_eq!(poly.coefficients(), &[fp(3), fp(2)]);
    }

    #[test]
    fn test_interpolate_quadratic_roundtrip() {
        let poly = Poly::from_coefficients(vec![fp(1), fp(2), fp(3)]);
        let points: Vec<(Fp, Fp)> = [4u64, 9, 16]
            .iter()
            .map(|&x| (fp(x), poly.eval(fp(x))))
            .collect();
        let recovered = lagrange_interpolate(&points).unwrap();
        assert_eq!(recovered, poly);
    }

    #[test]
    fn test_duplicate_x_first_occurrence_wins() {
        // The second (1, _) point is discarded, leaving a line through
        // (1, 5) and (2, 7).
        let points = [(fp(1), fp(5)), (fp(1), fp(100)), (fp(2), fp(7))];
        let poly = lagrange_interpolate(&points).unwrap();
        assert_eq!(poly.coefficients(), &[fp(3), fp(2)]);
    }

    #[test]
    fn test_empty_input_fails() {
        assert_eq!(
            lagrange_interpolate(&[]),
            Err(InterpolationError::NotEnoughUniquePoints)
        );
    }

    #[test]
    fn test_single_point_is_constant() {
        let poly = lagrange_interpolate(&[(fp(9), fp(42))]).unwrap();
        assert_eq!(poly.coefficients(), &[fp(42)]);
    }
}
