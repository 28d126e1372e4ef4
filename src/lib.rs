//! U-Prove token issuance over prime-order subgroups.
//!
//! An [`Issuer`] and a [`Prover`] run a three-move blind-signature protocol
//! that yields a [`Token`]. The issuer never sees the token's public key or
//! signature, and any [`Verifier`] holding the [`IssuerParameters`] can check
//! the token without contacting the issuer.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use uprove::{
//!     HashAlgorithm, Issuer, IssuerParameters, IssuerPrivateKey, Prover, SecureRng, Subgroup,
//!     Verifier,
//! };
//!
//! # fn main() -> uprove::Result<()> {
//! let mut rng = SecureRng::new();
//! let subgroup = Subgroup::rfc5114_2048_256();
//! let key = IssuerPrivateKey::generate(&subgroup, &mut rng)?;
//!
//! let mut generators = vec![key.public_key(&subgroup)];
//! generators.extend(subgroup.derive_generators(HashAlgorithm::Sha256, b"demo", 2)?);
//! let params = Arc::new(IssuerParameters::new(
//!     b"demo issuer".to_vec(),
//!     subgroup,
//!     HashAlgorithm::Sha256,
//!     generators,
//!     vec![true],
//!     Vec::new(),
//!     false,
//! )?);
//!
//! let attributes = [b"alice".to_vec()];
//! let issuer = Issuer::new(params.clone(), &key, &attributes, b"ti")?;
//! let prover = Prover::new(params.clone(), &attributes, b"ti", b"pi")?;
//!
//! let (issuer, first) = issuer.generate_first_message(&mut rng)?;
//! let (prover, second) = prover
//!     .parse_first_message(first)?
//!     .generate_second_message(&mut rng)?;
//! let third = issuer.parse_second_message(&second)?.generate_third_message();
//! let token = prover.parse_third_message(&third)?.generate_token()?;
//!
//! Verifier::new(params).verify(&token)?;
//! # Ok(())
//! # }
//! ```

/// Configuration loading for issuer parameters.
pub mod config;
/// Error types.
pub mod error;
/// Arithmetic, subgroup and hashing primitives.
pub mod primitives;
/// Issuance protocol.
pub mod protocol;

pub use config::{GroupConfig, IssuerParametersConfig};
pub use error::{Error, Result};
pub use primitives::{
    FixedScalars, HashAlgorithm, IntegerGroup, ScalarSource, SecretScalar, SecureRng, Subgroup,
    Transcript,
};
pub use protocol::{
    verify_sigma_ab_prime, verify_token_signature, FirstMessage, Issuer, IssuerFirstMessageSent,
    IssuerParameters, IssuerPrivateKey, IssuerSecondMessageReceived, Prover,
    ProverFirstMessageParsed, ProverSecondMessageGenerated, ProverThirdMessageParsed,
    SecondMessage, ThirdMessage, Token, Verifier,
};
