//! Sign-quantization of real-valued feature chunks into field coordinates.

use field::{Fp, MODULUS};
use sha2::{Digest, Sha256};

use crate::errors::VaultError;

/// Pack one sign bit per feature into bytes, most-significant-bit first.
///
/// A final partial byte holds the remaining bits as an integer, so patterns
/// that are not a multiple of eight bits pack the same way as a left
/// zero-padded bit string.
fn pack_sign_bits(features: &[f64]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(features.len().div_ceil(8));
    for chunk in features.chunks(8) {
        let mut byte = 0u8;
        for &v in chunk {
            byte = (byte << 1) | (v > 0.0) as u8;
        }
        bytes.push(byte);
    }
    bytes
}

/// SHA-256 digest of the packed sign pattern of `features`.
///
/// This is the quantizer without the modular reduction; secret derivation
/// uses it directly as a reproducible seed.
pub fn sign_digest(features: &[f64]) -> [u8; 32] {
    Sha256::digest(pack_sign_bits(features)).into()
}

/// Map a feature chunk to a field coordinate.
///
/// The coordinate is the big-endian integer value of the chunk's
/// [`sign_digest`] reduced modulo p. Identical sign patterns always produce
/// identical coordinates regardless of feature magnitudes, which is what
/// makes small biometric perturbations tolerable.
pub fn quantize_chunk(features: &[f64]) -> Result<Fp, VaultError> {
    if features.is_empty() {
        return Err(VaultError::EmptyChunk);
    }
    Ok(digest_to_field(&sign_digest(features)))
}

/// Reduce a digest's big-endian integer value modulo p.
fn digest_to_field(digest: &[u8; 32]) -> Fp {
    let mut acc = 0u64;
    for &byte in digest {
        acc = ((acc << 8) | byte as u64) % MODULUS;
    }
    Fp::from_u64(acc)
}
