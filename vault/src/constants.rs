//! Default parameters for vault construction and unlocking.

/// Default degree of the secret polynomial (33 coefficients).
pub const DEFAULT_DEGREE: usize = 32;

/// Default number of contiguous feature-vector chunks at enrollment, one
/// genuine point per chunk.
pub const DEFAULT_POINT_COUNT: usize = 68;

/// Default number of random decoy points mixed into the vault.
pub const DEFAULT_CHAFF_COUNT: usize = 100;

/// Historical default chunk count at verification.
///
/// Coordinates only reproduce when the verification chunking equals the
/// enrollment chunking, so unlock parameters derived from an enrollment use
/// that enrollment's `point_count` instead of this value. The constant is
/// kept for callers that still configure the knob explicitly.
pub const DEFAULT_UNLOCK_POINT_COUNT: usize = 10;

/// Default size of the proximity-ranked candidate pool at verification.
pub const DEFAULT_TOP_K: usize = 30;

/// Default maximum number of interpolation attempts per unlock.
pub const DEFAULT_TRIAL_CAP: usize = 100;

/// Leading feature dimensions consumed by secret derivation.
pub const SEED_DIMENSIONS: usize = 128;

/// Minimum feature dimensions per chunk accepted by the vault builder.
pub const MIN_CHUNK_DIMENSIONS: usize = 4;

/// Canonical serialized width of one polynomial coefficient in bytes.
pub const COEFFICIENT_WIDTH: usize = 8;
