//! Core arithmetic and hashing primitives for U-Prove issuance.
//!
//! This module contains the building blocks the protocol layer is written in:
//! - **crypto**: Modular arithmetic, primality testing, and secure randomness
//! - **groups**: Validated prime-order subgroup domains
//! - **transcript**: Length-prefixed hashing for challenges and fingerprints

/// Modular arithmetic and randomness.
pub mod crypto;
/// Subgroup domain parameters.
pub mod groups;
/// Hash transcript for Fiat-Shamir challenges.
pub mod transcript;

pub use crypto::{FixedScalars, IntegerGroup, ScalarSource, SecretScalar, SecureRng};
pub use groups::Subgroup;
pub use transcript::{decode_hex, HashAlgorithm, Transcript};
