use num_bigint::BigUint;
use num_traits::{One, Zero};
use tracing::debug;

use crate::primitives::crypto::{is_probable_prime, IntegerGroup, MILLER_RABIN_ROUNDS};
use crate::primitives::transcript::{decode_hex, HashAlgorithm, Transcript};
use crate::{Error, Result};

/// Label mixed into every verifiable generator derivation.
const GENERATOR_DERIVATION_LABEL: &[u8] = b"ggen";

/// Prime-order subgroup domain `(p, q, g)`.
///
/// `g` generates the order-`q` subgroup of the multiplicative group modulo `p`.
/// Validated once at construction and immutable afterwards, so it can be shared
/// freely between issuance runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subgroup {
    p: BigUint,
    q: BigUint,
    g: BigUint,
    cofactor: BigUint,
    gq: IntegerGroup,
    zq: IntegerGroup,
}

impl Subgroup {
    /// Validates and creates a subgroup domain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParams`] if:
    /// - `p` or `q` is not prime
    /// - `q` does not divide `p - 1`
    /// - `g` is not in `[2, p)`
    pub fn new(p: BigUint, q: BigUint, g: BigUint) -> Result<Self> {
        if !is_probable_prime(&p, MILLER_RABIN_ROUNDS) {
            return Err(Error::InvalidParams("p is not a prime".to_string()));
        }
        if !is_probable_prime(&q, MILLER_RABIN_ROUNDS) {
            return Err(Error::InvalidParams("q is not a prime".to_string()));
        }

        let subgroup = Self::assemble(p, q, g)?;

        if !subgroup.is_valid_generator(&subgroup.g) {
            return Err(Error::InvalidParams(
                "g is not a non-trivial element of Gq".to_string(),
            ));
        }

        debug!(
            p_bits = subgroup.p.bits(),
            q_bits = subgroup.q.bits(),
            "validated subgroup domain"
        );

        Ok(subgroup)
    }

    /// Parses hex-encoded `p`, `q` and `g` and validates them.
    pub fn from_hex(p: &str, q: &str, g: &str) -> Result<Self> {
        Self::new(parse_hex(p)?, parse_hex(q)?, parse_hex(g)?)
    }

    /// Builds a domain from constants known to be valid, skipping primality tests.
    pub(crate) fn from_trusted(p: BigUint, q: BigUint, g: BigUint) -> Self {
        Self::assemble(p, q, g)
            .unwrap_or_else(|_| unreachable!("trusted domain constants are consistent"))
    }

    fn assemble(p: BigUint, q: BigUint, g: BigUint) -> Result<Self> {
        let p_minus_1 = &p - BigUint::one();
        if !(&p_minus_1 % &q).is_zero() {
            return Err(Error::InvalidParams("q does not divide p - 1".to_string()));
        }

        Ok(Self {
            cofactor: p_minus_1 / &q,
            gq: IntegerGroup::new(p.clone())?,
            zq: IntegerGroup::new(q.clone())?,
            p,
            q,
            g,
        })
    }

    /// Returns the field order `p`.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Returns the subgroup order `q`.
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// Returns the generator `g`.
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// Returns `(p - 1) / q`.
    pub fn cofactor(&self) -> &BigUint {
        &self.cofactor
    }

    /// Returns the group of elements modulo `p`.
    pub fn gq(&self) -> &IntegerGroup {
        &self.gq
    }

    /// Returns the group of exponents modulo `q`.
    pub fn zq(&self) -> &IntegerGroup {
        &self.zq
    }

    /// Cheap membership check: `x < p`.
    ///
    /// Does not prove that `x` has order dividing `q`; see
    /// [`Subgroup::exact_order_check`].
    pub fn includes(&self, x: &BigUint) -> bool {
        x < &self.p
    }

    /// Full membership check: `0 < x < p` and `x^q = 1 mod p`.
    pub fn exact_order_check(&self, x: &BigUint) -> bool {
        self.includes(x) && !x.is_zero() && self.gq.mod_pow(x, &self.q).is_one()
    }

    /// Checks that `x` is usable as a generator: in range and neither 0 nor 1.
    pub fn is_valid_generator(&self, x: &BigUint) -> bool {
        self.includes(x) && !x.is_zero() && !x.is_one()
    }

    /// Deterministically derives a generator from a context and an index.
    ///
    /// Hashes `context || "ggen" || index || counter` with the counter running
    /// from 0, raises the digest to `(p - 1) / q` and returns the first result
    /// that is neither 0 nor 1.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GeneratorDerivationExhausted`] after 255 failed attempts.
    pub fn compute_verifiably_random_element(
        &self,
        hash: HashAlgorithm,
        context: &[u8],
        index: u8,
    ) -> Result<BigUint> {
        for counter in 0..u8::MAX {
            let mut transcript = Transcript::new(hash);
            transcript.update_raw(context);
            transcript.update_raw(GENERATOR_DERIVATION_LABEL);
            transcript.update_byte(index);
            transcript.update_byte(counter);

            let w = BigUint::from_bytes_be(&transcript.digest());
            let candidate = self.gq.mod_pow(&w, &self.cofactor);

            if !candidate.is_zero() && !candidate.is_one() {
                debug!(index, attempts = u32::from(counter) + 1, "derived generator");
                return Ok(candidate);
            }
        }

        Err(Error::GeneratorDerivationExhausted(u32::from(u8::MAX)))
    }

    /// Derives the generators for indices `1..=count`.
    pub fn derive_generators(
        &self,
        hash: HashAlgorithm,
        context: &[u8],
        count: u8,
    ) -> Result<Vec<BigUint>> {
        (1..=count)
            .map(|index| self.compute_verifiably_random_element(hash, context, index))
            .collect()
    }
}

fn parse_hex(hex_str: &str) -> Result<BigUint> {
    Ok(BigUint::from_bytes_be(&decode_hex(hex_str)?))
}
