//! Fuzzy vault engine for biometric template protection.
//!
//! This library binds a randomly-derived secret polynomial to a biometric
//! feature vector so the raw template is never stored:
//! - The secret polynomial is derived deterministically from the enrollment
//!   vector's sign pattern (SHA-256 seed, ChaCha20 coefficient stream).
//! - Genuine points are polynomial evaluations at coordinates quantized from
//!   contiguous chunks of the vector; random chaff points hide them.
//! - A fresh sample unlocks the vault only when enough of its derived
//!   coordinates coincide with genuine ones: ranked candidate points are
//!   interpolated subset by subset until the recovered coefficients hash to
//!   the digest stored in the vault.
//!
//! The engine is computation-only: no I/O, no shared mutable state, every
//! operation a self-contained synchronous computation. Persistence of the
//! vault value is the caller's responsibility.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use vault::{EnrollParams, SecretPolynomial, Vault};
//!
//! // A 16-dimension feature vector: four chunks with distinct sign patterns.
//! let features = vec![
//!     0.9, -0.8, 0.7, -0.6,
//!     -0.9, 0.8, -0.7, 0.6,
//!     0.9, 0.8, -0.7, -0.6,
//!     -0.9, -0.8, 0.7, 0.6,
//! ];
//!
//! let params = EnrollParams { degree: 2, point_count: 4, chaff_count: 8 };
//! let secret = SecretPolynomial::derive(&features, params.degree).expect("derive");
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let vault = Vault::build(&secret, &features, &params, &mut rng).expect("build");
//!
//! // The exact enrollment sample unlocks the vault.
//! let ok = vault.unlock(&features, &params.unlock_params()).expect("unlock");
//! assert!(ok);
//! ```
//!
//! # Security Considerations
//!
//! - Success is exact digest equality only; there is no partial credit and
//!   no similarity score beyond the internal candidate ranking.
//! - Chaff sampling and shuffling must use a cryptographically secure
//!   random number generator.
//! - The secret polynomial is reproducible bit-for-bit from the enrollment
//!   vector; protect feature vectors like key material.

pub mod constants;
mod errors;
mod params;
mod quantize;
mod secret;
mod unlock;
mod vault;


pub use errors::VaultError;
pub use field::{Fp, Poly};
pub use params::{EnrollParams, UnlockParams};
pub use quantize::{quantize_chunk, sign_digest};
pub use secret::{SecretPolynomial, coefficient_digest, serialize_coefficients};
pub use vault::{Vault, VaultPoint};
