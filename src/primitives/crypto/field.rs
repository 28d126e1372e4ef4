use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::{Error, Result};

/// Extra random bytes drawn beyond the modulus size before reduction (128 bits).
const OVERSAMPLE_BYTES: usize = 16;

/// Integers modulo a fixed modulus.
///
/// Two instances exist per domain: one over `p` (group elements, `Gq`) and one
/// over `q` (exponents, `Zq`). Every operation returns a value in `[0, modulus)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegerGroup {
    modulus: BigUint,
}

impl IntegerGroup {
    /// Creates a group for the given modulus.
    ///
    /// # Errors
    ///
    /// Returns an error if the modulus is zero or one.
    pub fn new(modulus: BigUint) -> Result<Self> {
        if modulus <= BigUint::one() {
            return Err(Error::InvalidParams(
                "modulus must be greater than one".to_string(),
            ));
        }
        Ok(Self { modulus })
    }

    /// Returns the modulus.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Checks that `x` is already reduced.
    pub fn contains(&self, x: &BigUint) -> bool {
        x < &self.modulus
    }

    /// Computes `x mod m`.
    pub fn reduce(&self, x: &BigUint) -> BigUint {
        x % &self.modulus
    }

    /// Interprets big-endian bytes as an integer and reduces it.
    pub fn reduce_bytes(&self, bytes: &[u8]) -> BigUint {
        BigUint::from_bytes_be(bytes) % &self.modulus
    }

    /// Computes `a + b mod m`.
    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.modulus
    }

    /// Computes `a - b mod m`.
    pub fn subtract(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let a = a % &self.modulus;
        let b = b % &self.modulus;
        (a + &self.modulus - b) % &self.modulus
    }

    /// Computes `-a mod m`.
    pub fn negate(&self, a: &BigUint) -> BigUint {
        self.subtract(&BigUint::zero(), a)
    }

    /// Computes `a * b mod m`.
    pub fn multiply(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    /// Computes `base^exp mod m`.
    pub fn mod_pow(&self, base: &BigUint, exp: &BigUint) -> BigUint {
        base.modpow(exp, &self.modulus)
    }

    /// Computes `x^-1 mod m`.
    ///
    /// Returns `None` if `x` shares a factor with the modulus (including `x = 0`).
    pub fn mod_inverse(&self, x: &BigUint) -> Option<BigUint> {
        let x = self.reduce(x);
        if x.is_zero() {
            return None;
        }
        x.modinv(&self.modulus)
    }

    /// Samples an element of `[0, m)`, or `[1, m)` when `include_zero` is false.
    ///
    /// Draws the modulus byte length plus 16 bytes before reducing, which keeps
    /// the modulo bias below 2^-128.
    pub fn random_element<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        include_zero: bool,
    ) -> BigUint {
        let byte_len = (self.modulus.bits() as usize).div_ceil(8) + OVERSAMPLE_BYTES;
        let mut buf = Zeroizing::new(vec![0u8; byte_len]);

        loop {
            rng.fill_bytes(&mut buf);
            let value = self.reduce_bytes(&buf);

            if include_zero || !value.is_zero() {
                return value;
            }
        }
    }
}
