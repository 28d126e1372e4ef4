//! Cryptographically secure randomness and ephemeral secret handling.

use std::collections::VecDeque;
use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::{CryptoRng, CryptoRngCore, OsRng, RngCore};
use zeroize::Zeroize;

use super::IntegerGroup;
use crate::{Error, Result};

/// Cryptographically secure random number generator.
///
/// This is a thin wrapper around `OsRng` that provides a consistent interface
/// for cryptographic randomness throughout the library.
pub struct SecureRng(OsRng);

impl SecureRng {
    /// Creates a new cryptographically secure random number generator.
    pub fn new() -> Self {
        Self(OsRng)
    }
}

impl Default for SecureRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RngCore for SecureRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand_core::Error> {
        self.0.try_fill_bytes(dest)
    }
}

impl CryptoRng for SecureRng {}

/// Source of the random scalars drawn during issuance.
///
/// Issuer and Prover take a `ScalarSource` for every move that needs
/// randomness, so tests can replay fixed values without touching global state.
/// Any [`CryptoRngCore`] is a `ScalarSource`.
pub trait ScalarSource {
    /// Returns an element of `group`, excluding zero unless `include_zero` is set.
    fn random_scalar(&mut self, group: &IntegerGroup, include_zero: bool) -> Result<BigUint>;
}

impl<R: CryptoRngCore + ?Sized> ScalarSource for R {
    fn random_scalar(&mut self, group: &IntegerGroup, include_zero: bool) -> Result<BigUint> {
        Ok(group.random_element(self, include_zero))
    }
}

/// Replays a fixed sequence of scalars, in order.
///
/// Intended for reproducing test vectors. Never use it for real issuance.
#[derive(Clone, Debug, Default)]
pub struct FixedScalars {
    values: VecDeque<BigUint>,
}

impl FixedScalars {
    /// Creates a source that yields `values` front to back.
    pub fn new(values: impl IntoIterator<Item = BigUint>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Number of scalars not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl ScalarSource for FixedScalars {
    fn random_scalar(&mut self, group: &IntegerGroup, include_zero: bool) -> Result<BigUint> {
        let value = self.values.pop_front().ok_or(Error::ScalarSourceExhausted)?;

        if !group.contains(&value) {
            return Err(Error::InvalidScalar(
                "fixed scalar is not reduced modulo the group order".to_string(),
            ));
        }
        if !include_zero && value.is_zero() {
            return Err(Error::InvalidScalar(
                "fixed scalar must be non-zero".to_string(),
            ));
        }

        Ok(value)
    }
}

/// An ephemeral or long-term secret exponent.
///
/// Reset to zero when dropped. `BigUint` gives no mutable access to its limbs,
/// so the reset releases the allocation rather than scrubbing it word by word.
#[derive(Clone)]
pub struct SecretScalar(BigUint);

impl SecretScalar {
    /// Wraps a secret value.
    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    /// Returns the secret value.
    pub fn expose(&self) -> &BigUint {
        &self.0
    }
}

impl fmt::Debug for SecretScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretScalar(<redacted>)")
    }
}

impl Zeroize for SecretScalar {
    fn zeroize(&mut self) {
        self.0.set_zero();
    }
}

impl Drop for SecretScalar {
    fn drop(&mut self) {
        self.zeroize();
    }
}
