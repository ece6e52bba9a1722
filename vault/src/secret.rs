//! Deterministic secret-polynomial derivation.

use field::{Fp, MODULUS, Poly};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};

use crate::constants::{COEFFICIENT_WIDTH, SEED_DIMENSIONS};
use crate::errors::VaultError;
use crate::quantize::sign_digest;

/// The secret polynomial bound into a vault.
///
/// Derived once per enrollment event and never persisted; only its
/// coefficient digest and the points it generates leave this type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecretPolynomial {
    poly: Poly,
}

impl SecretPolynomial {
    /// Deterministically derive a degree-`degree` secret polynomial from an
    /// enrollment feature vector.
    ///
    /// Only the leading `min(128, len)` dimensions are used. Their sign
    /// pattern is hashed with SHA-256 and the raw digest seeds a ChaCha20
    /// stream; each coefficient is the first 31-bit masked `u32` word drawn
    /// from that stream that is a canonical field element. The same input
    /// vector bit-for-bit always yields the same polynomial.
    pub fn derive(features: &[f64], degree: usize) -> Result<Self, VaultError> {
        if features.is_empty() {
            return Err(VaultError::EmptyChunk);
        }

        let n = features.len().min(SEED_DIMENSIONS);
        let seed = sign_digest(&features[..n]);
        let mut rng = ChaCha20Rng::from_seed(seed);

        let coeffs = (0..=degree).map(|_| draw_coefficient(&mut rng)).collect();
        Ok(Self {
            poly: Poly::from_coefficients(coeffs),
        })
    }

    /// Build a secret polynomial from known coefficients, constant term
    /// first.
    pub fn from_coefficients(coeffs: Vec<Fp>) -> Self {
        Self {
            poly: Poly::from_coefficients(coeffs),
        }
    }

    /// Evaluate the polynomial at `x`.
    pub fn evaluate(&self, x: Fp) -> Fp {
        self.poly.eval(x)
    }

    /// The coefficient slice, constant term first.
    pub fn coefficients(&self) -> &[Fp] {
        self.poly.coefficients()
    }

    /// SHA-256 digest of the canonically serialized coefficients.
    pub fn digest(&self) -> [u8; 32] {
        coefficient_digest(self.coefficients())
    }
}

/// Draw one field element from the ChaCha20 stream.
///
/// Each `u32` word is masked to 31 bits; masked values outside `[0, p)` are
/// rejected and the next word drawn. The transformation is fixed so the
/// coefficient stream reproduces bit-for-bit from the same seed.
fn draw_coefficient(rng: &mut ChaCha20Rng) -> Fp {
    loop {
        let word = (rng.next_u32() as u64) & MODULUS;
        if word < MODULUS {
            return Fp::from_u64(word);
        }
    }
}

/// Canonical byte encoding of a coefficient sequence: fixed-width big-endian
/// per coefficient, concatenated in order.
pub fn serialize_coefficients(coeffs: &[Fp]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(coeffs.len() * COEFFICIENT_WIDTH);
    for c in coeffs {
        bytes.extend_from_slice(&c.as_canonical_u64().to_be_bytes());
    }
    bytes
}

/// SHA-256 digest of [`serialize_coefficients`].
pub fn coefficient_digest(coeffs: &[Fp]) -> [u8; 32] {
    Sha256::digest(serialize_coefficients(coeffs)).into()
}
