//! Enrollment and unlock parameters.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CHAFF_COUNT, DEFAULT_DEGREE, DEFAULT_POINT_COUNT, DEFAULT_TOP_K, DEFAULT_TRIAL_CAP,
};
use crate::errors::VaultError;

/// Parameters for building a vault.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollParams {
    /// Degree of the secret polynomial.
    pub degree: usize,
    /// Number of contiguous feature-vector chunks, one genuine point each.
    pub point_count: usize,
    /// Number of random decoy points mixed into the vault.
    pub chaff_count: usize,
}

impl Default for EnrollParams {
    fn default() -> Self {
        Self {
            degree: DEFAULT_DEGREE,
            point_count: DEFAULT_POINT_COUNT,
            chaff_count: DEFAULT_CHAFF_COUNT,
        }
    }
}

impl EnrollParams {
    pub fn validate(&self) -> Result<(), VaultError> {
        if self.point_count == 0 {
            return Err(VaultError::ZeroPointCount);
        }
        Ok(())
    }

    /// Unlock parameters matching this enrollment.
    ///
    /// The verification chunking is taken from the enrollment so genuine
    /// coordinates reproduce exactly; see [`UnlockParams::for_enrollment`].
    pub fn unlock_params(&self) -> UnlockParams {
        UnlockParams::for_enrollment(self.degree, self.point_count)
    }
}

/// Parameters for unlocking a vault.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockParams {
    /// Degree of the secret polynomial bound into the vault.
    pub degree: usize,
    /// Number of chunks the fresh feature vector is split into.
    ///
    /// Must equal the enrollment `point_count`; a different chunking
    /// produces different coordinates and no genuine point can reproduce.
    pub point_count: usize,
    /// Size of the proximity-ranked candidate pool.
    pub top_k: usize,
    /// Maximum number of interpolation attempts before giving up.
    pub trial_cap: usize,
}

impl Default for UnlockParams {
    fn default() -> Self {
        Self::for_enrollment(DEFAULT_DEGREE, DEFAULT_POINT_COUNT)
    }
}

impl UnlockParams {
    /// Unlock parameters for a vault enrolled with `degree` and
    /// `point_count`.
    ///
    /// The candidate pool is widened to `degree + 1` when the default
    /// `top_k` could not hold one full interpolation subset.
    pub fn for_enrollment(degree: usize, point_count: usize) -> Self {
        Self {
            degree,
            point_count,
            top_k: DEFAULT_TOP_K.max(degree + 1),
            trial_cap: DEFAULT_TRIAL_CAP,
        }
    }

    pub fn validate(&self) -> Result<(), VaultError> {
        if self.point_count == 0 {
            return Err(VaultError::ZeroPointCount);
        }
        if self.top_k < self.degree + 1 {
            return Err(VaultError::TopKTooSmall {
                top_k: self.top_k,
                required: self.degree + 1,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(EnrollParams::default().validate(), Ok(()));
        assert_eq!(UnlockParams::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_pool_holds_one_subset() {
        let params = UnlockParams::default();
        assert!(params.top_k >= params.degree + 1);
    }

    #[test]
    fn test_small_top_k_is_rejected() {
        let params = UnlockParams {
            degree: 32,
            point_count: 68,
            top_k: 30,
            trial_cap: 100,
        };
        assert_eq!(
            params.validate(),
            Err(VaultError::TopKTooSmall {
                top_k: 30,
                required: 33
            })
        );
    }

    #[test]
    fn test_zero_point_count_is_rejected() {
        let params = UnlockParams {
            point_count: 0,
            ..UnlockParams::default()
        };
        assert_eq!(params.validate(), Err(VaultError::ZeroPointCount));
    }

    #[test]
    fn test_unlock_chunking_follows_enrollment() {
        let enroll = EnrollParams {
            degree: 8,
            point_count: 10,
            chaff_count: 50,
        };
        let unlock = enroll.unlock_params();
        assert_eq!(unlock.point_count, enroll.point_count);
        assert_eq!(unlock.degree, enroll.degree);
    }
}
