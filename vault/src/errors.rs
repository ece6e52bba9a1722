//! Error types for vault construction and unlocking.

use thiserror::Error;

/// Errors surfaced by the vault engine.
///
/// Authentication failure is not an error: an exhausted unlock search
/// reports `Ok(false)`. These variants indicate malformed input or
/// configuration and are fatal to the operation that raised them.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum VaultError {
    /// The feature vector is too short for the requested chunking.
    #[error("feature vector of {dimensions} dimensions is too short for {point_count} chunks")]
    InsufficientDimensionality {
        dimensions: usize,
        point_count: usize,
    },

    /// An empty feature slice reached the coordinate quantizer.
    #[error("cannot quantize an empty feature chunk")]
    EmptyChunk,

    /// The candidate pool cannot hold one full interpolation subset.
    #[error("top_k {top_k} is smaller than the {required} points required per interpolation")]
    TopKTooSmall { top_k: usize, required: usize },

    /// A chunk count of zero was configured.
    #[error("point_count must be nonzero")]
    ZeroPointCount,
}
