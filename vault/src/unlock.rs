//! Trial-bounded combinatorial unlocking.

use field::{Fp, lagrange_interpolate};

use crate::errors::VaultError;
use crate::params::UnlockParams;
use crate::quantize::quantize_chunk;
use crate::secret::coefficient_digest;
use crate::vault::{Vault, VaultPoint};

impl Vault {
    /// Attempt to unlock this vault with a fresh feature vector.
    ///
    /// Candidate coordinates are derived with the same chunking as
    /// enrollment, vault points are ranked by proximity to the nearest
    /// candidate, and `(degree + 1)`-sized subsets of the `top_k` closest
    /// points are interpolated in lexicographic order until a coefficient
    /// digest matches or `trial_cap` attempts are spent.
    ///
    /// Returns `Ok(true)` on a digest match, `Ok(false)` when the search is
    /// exhausted. Degenerate subsets (duplicate or non-invertible
    /// denominators) are skipped, not fatal.
    pub fn unlock(&self, features: &[f64], params: &UnlockParams) -> Result<bool, VaultError> {
        params.validate()?;

        let candidates = candidate_coordinates(features, params.point_count)?;
        let pool = rank_by_proximity(&self.points, &candidates, params.top_k);

        let subset_size = params.degree + 1;
        if pool.len() < subset_size {
            return Ok(false);
        }

        let mut trials = 0;
        for subset in Combinations::new(pool.len(), subset_size) {
            if trials == params.trial_cap {
                return Ok(false);
            }
            trials += 1;

            let points: Vec<(Fp, Fp)> = subset.iter().map(|&i| (pool[i].x, pool[i].y)).collect();
            let Ok(poly) = lagrange_interpolate(&points) else {
                continue;
            };
            if coefficient_digest(poly.coefficients()) == self.coeff_hash {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

/// Derive one candidate coordinate per chunk of the fresh vector.
///
/// The chunk count must match the one used at enrollment for any genuine
/// coordinate to reproduce.
fn candidate_coordinates(features: &[f64], point_count: usize) -> Result<Vec<Fp>, VaultError> {
    let chunk_size = features.len() / point_count;
    if chunk_size == 0 {
        return Err(VaultError::InsufficientDimensionality {
            dimensions: features.len(),
            point_count,
        });
    }

    (0..point_count)
        .map(|i| quantize_chunk(&features[i * chunk_size..(i + 1) * chunk_size]))
        .collect()
}

/// Rank vault points by the minimum absolute distance from their
/// x-coordinate to any candidate coordinate and keep the `top_k` closest.
///
/// The sort is stable, so equally distant points keep their vault order.
fn rank_by_proximity(points: &[VaultPoint], candidates: &[Fp], top_k: usize) -> Vec<VaultPoint> {
    let mut ranked = points.to_vec();
    ranked.sort_by_key(|p| {
        candidates
            .iter()
            .map(|c| p.x.as_canonical_u64().abs_diff(c.as_canonical_u64()))
            .min()
            .unwrap_or(u64::MAX)
    });
    ranked.truncate(top_k);
    ranked
}

/// Lexicographic k-combinations of `0..n`.
struct Combinations {
    n: usize,
    k: usize,
    indices: Vec<usize>,
    exhausted: bool,
}

impl Combinations {
    fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            k,
            indices: (0..k).collect(),
            exhausted: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.exhausted {
            return None;
        }
        let current = self.indices.clone();

        // Advance to the next combination, rightmost index first.
        let mut i = self.k;
        loop {
            if i == 0 {
                self.exhausted = true;
                break;
            }
            i -= 1;
            if self.indices[i] != i + self.n - self.k {
                self.indices[i] += 1;
                for j in i + 1..self.k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
        }

        Some(current)
    }
}
