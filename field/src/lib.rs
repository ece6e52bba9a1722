//! Prime-field arithmetic for the fuzzy-vault engine.
//!
//! This crate provides the field element type over p = 2^31 - 1, dense
//! polynomials with Horner evaluation, Lagrange interpolation in coefficient
//! form, and helpers for random sampling. All vault arithmetic is closed over
//! this field.

mod element;
mod interpolate;
mod poly;
mod random;

pub use element::{Fp, MODULUS};
pub use interpolate::{lagrange_interpolate, InterpolationError};
pub use poly::Poly;
pub use random::RandomField;
