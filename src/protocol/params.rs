//! Issuer parameters and the issuer's private key.

use std::sync::OnceLock;

use num_bigint::BigUint;
use tracing::debug;

use crate::primitives::{HashAlgorithm, ScalarSource, SecretScalar, Subgroup, Transcript};
use crate::{Error, Result};

/// Public parameters of an issuer.
///
/// Generators are ordered `(g0, g1, ..., gn, gt[, gd])`: one issuer public key,
/// one per attribute slot, one for the token information field, and a device
/// generator when device protection is enabled. `encodings[i]` selects whether
/// attribute `i` is hashed (`true`) or used directly as an integer (`false`).
///
/// The fingerprint returned by [`IssuerParameters::hash`] is computed on first
/// use and cached.
#[derive(Clone, Debug)]
pub struct IssuerParameters {
    uid_p: Vec<u8>,
    subgroup: Subgroup,
    hash_algorithm: HashAlgorithm,
    generators: Vec<BigUint>,
    encodings: Vec<bool>,
    specification: Vec<u8>,
    device_protected: bool,
    fingerprint: OnceLock<Vec<u8>>,
}

impl IssuerParameters {
    /// Validates and creates issuer parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIssuerParams`] if the number of generators does
    /// not match the attribute count and device flag, or if any generator is
    /// outside `[2, p)`.
    pub fn new(
        uid_p: Vec<u8>,
        subgroup: Subgroup,
        hash_algorithm: HashAlgorithm,
        generators: Vec<BigUint>,
        encodings: Vec<bool>,
        specification: Vec<u8>,
        device_protected: bool,
    ) -> Result<Self> {
        let expected = encodings.len() + 2 + usize::from(device_protected);
        if generators.len() != expected {
            return Err(Error::InvalidIssuerParams(format!(
                "expected {expected} generators for {} attributes, got {}",
                encodings.len(),
                generators.len()
            )));
        }

        if let Some(index) = generators
            .iter()
            .position(|generator| !subgroup.is_valid_generator(generator))
        {
            return Err(Error::InvalidIssuerParams(format!(
                "generator {index} is not a valid element of Gq"
            )));
        }

        debug!(
            attributes = encodings.len(),
            hash = hash_algorithm.name(),
            device_protected,
            "validated issuer parameters"
        );

        Ok(Self {
            uid_p,
            subgroup,
            hash_algorithm,
            generators,
            encodings,
            specification,
            device_protected,
            fingerprint: OnceLock::new(),
        })
    }

    /// Returns the application-specific parameters identifier.
    pub fn uid_p(&self) -> &[u8] {
        &self.uid_p
    }

    /// Returns the subgroup domain.
    pub fn subgroup(&self) -> &Subgroup {
        &self.subgroup
    }

    /// Returns the hash algorithm used for every transcript.
    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash_algorithm
    }

    /// Returns all generators, `(g0, g1, ..., gn, gt[, gd])`.
    pub fn generators(&self) -> &[BigUint] {
        &self.generators
    }

    /// Returns the issuer public key `g0`.
    pub fn g0(&self) -> &BigUint {
        &self.generators[0]
    }

    /// Returns the attribute generators `(g1, ..., gn)`.
    pub fn attribute_generators(&self) -> &[BigUint] {
        &self.generators[1..=self.encodings.len()]
    }

    /// Returns the token information generator `gt`.
    pub fn gt(&self) -> &BigUint {
        &self.generators[self.encodings.len() + 1]
    }

    /// Returns the device generator `gd`, if device protection is enabled.
    pub fn gd(&self) -> Option<&BigUint> {
        self.device_protected
            .then(|| &self.generators[self.encodings.len() + 2])
    }

    /// Returns the per-attribute encoding flags.
    pub fn encodings(&self) -> &[bool] {
        &self.encodings
    }

    /// Returns the number of attribute slots.
    pub fn attribute_count(&self) -> usize {
        self.encodings.len()
    }

    /// Returns the application specification.
    pub fn specification(&self) -> &[u8] {
        &self.specification
    }

    /// Returns the device protection flag.
    pub fn is_device_protected(&self) -> bool {
        self.device_protected
    }

    /// Creates an empty transcript over these parameters' hash algorithm.
    pub fn transcript(&self) -> Transcript {
        Transcript::new(self.hash_algorithm)
    }

    /// Computes the parameters fingerprint without consulting the cache.
    ///
    /// Hashes `UIDp`, the subgroup, `(g0, ..., gn, gt)`, the encoding flags
    /// and the specification. The device generator is not part of the hash.
    pub fn compute_hash(&self) -> Vec<u8> {
        let fingerprinted: Vec<&BigUint> = self.generators[..=self.encodings.len()]
            .iter()
            .chain(std::iter::once(self.gt()))
            .collect();

        let mut transcript = self.transcript();
        transcript.update_octet_string(&self.uid_p);
        transcript.update_subgroup(&self.subgroup);
        transcript.update_list_of_integers(fingerprinted.iter().copied());
        transcript.update_list_of_booleans(&self.encodings);
        transcript.update_octet_string(&self.specification);
        transcript.digest()
    }

    /// Returns the cached parameters fingerprint.
    pub fn hash(&self) -> &[u8] {
        self.fingerprint.get_or_init(|| self.compute_hash())
    }

    /// Returns the cached parameters fingerprint, hex-encoded.
    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash())
    }
}

/// The issuer's private key `y0`, with `g0 = g^y0`.
#[derive(Clone, Debug)]
pub struct IssuerPrivateKey {
    y0: SecretScalar,
}

impl IssuerPrivateKey {
    /// Samples a fresh non-zero private key.
    pub fn generate<S: ScalarSource + ?Sized>(subgroup: &Subgroup, source: &mut S) -> Result<Self> {
        let y0 = source.random_scalar(subgroup.zq(), false)?;
        Ok(Self {
            y0: SecretScalar::new(y0),
        })
    }

    /// Wraps an existing private key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidScalar`] unless `0 < y0 < q`.
    pub fn from_scalar(subgroup: &Subgroup, y0: BigUint) -> Result<Self> {
        if y0 == BigUint::default() || !subgroup.zq().contains(&y0) {
            return Err(Error::InvalidScalar(
                "issuer private key must be in [1, q)".to_string(),
            ));
        }
        Ok(Self {
            y0: SecretScalar::new(y0),
        })
    }

    /// Computes the public key `g0 = g^y0`.
    pub fn public_key(&self, subgroup: &Subgroup) -> BigUint {
        subgroup.gq().mod_pow(subgroup.g(), self.y0.expose())
    }

    pub(crate) fn secret(&self) -> &SecretScalar {
        &self.y0
    }
}
