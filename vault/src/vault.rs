//! Vault construction: genuine points, chaff, shuffle, coefficient digest.

use field::{Fp, RandomField};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::MIN_CHUNK_DIMENSIONS;
use crate::errors::VaultError;
use crate::params::EnrollParams;
use crate::quantize::quantize_chunk;
use crate::secret::SecretPolynomial;

/// One vault point. Carries no label distinguishing genuine from chaff.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultPoint {
    pub x: Fp,
    pub y: Fp,
}

/// A locked vault: shuffled genuine and chaff points plus the SHA-256
/// digest of the secret polynomial's canonically serialized coefficients.
///
/// Read-only after construction. Only interpolation and digest comparison
/// can tell genuine points from chaff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    pub points: Vec<VaultPoint>,
    pub coeff_hash: [u8; 32],
}

impl Vault {
    /// Build a vault binding `secret` to the enrollment feature vector.
    ///
    /// The vector is split into `point_count` contiguous equal-sized chunks
    /// (each at least four dimensions), one genuine point per chunk. Chaff
    /// points are rejection-sampled so every x-coordinate in the vault stays
    /// pairwise distinct, and the merged set is shuffled so position reveals
    /// nothing.
    pub fn build<R: Rng + ?Sized>(
        secret: &SecretPolynomial,
        features: &[f64],
        params: &EnrollParams,
        rng: &mut R,
    ) -> Result<Self, VaultError> {
        params.validate()?;

        let mut points = genuine_points(secret, features, params.point_count)?;
        let target = points.len() + params.chaff_count;
        while points.len() < target {
            let x = Fp::random(rng);
            let y = Fp::random(rng);
            if points.iter().any(|p| p.x == x) {
                continue;
            }
            points.push(VaultPoint { x, y });
        }

        shuffle(&mut points, rng);

        Ok(Vault {
            points,
            coeff_hash: secret.digest(),
        })
    }
}

/// Quantize each enrollment chunk and evaluate the secret polynomial there.
///
/// Chunks whose sign pattern repeats an earlier chunk quantize to the same
/// coordinate; later duplicates are dropped, first occurrence wins, so the
/// vault's x-coordinates stay pairwise distinct.
fn genuine_points(
    secret: &SecretPolynomial,
    features: &[f64],
    point_count: usize,
) -> Result<Vec<VaultPoint>, VaultError> {
    let chunk_size = features.len() / point_count;
    if chunk_size < MIN_CHUNK_DIMENSIONS {
        return Err(VaultError::InsufficientDimensionality {
            dimensions: features.len(),
            point_count,
        });
    }

    let mut points: Vec<VaultPoint> = Vec::with_capacity(point_count);
    for i in 0..point_count {
        let chunk = &features[i * chunk_size..(i + 1) * chunk_size];
        let x = quantize_chunk(chunk)?;
        if points.iter().any(|p| p.x == x) {
            continue;
        }
        points.push(VaultPoint {
            x,
            y: secret.evaluate(x),
        });
    }
    Ok(points)
}

/// Fisher-Yates shuffle.
fn shuffle<R: Rng + ?Sized>(points: &mut [VaultPoint], rng: &mut R) {
    for i in (1..points.len()).rev() {
        let j = rng.random_range(0..=i);
        points.swap(i, j);
    }
}
