/// Issuance messages and the issued token.
pub mod gadgets;
/// Issuer state machine.
pub mod issuer;
/// Pure issuance arithmetic and verification identities.
pub mod math;
/// Issuer parameters and private key.
pub mod params;
/// Prover state machine.
pub mod prover;
/// Token verification.
pub mod verifier;

#[cfg(test)]
pub(crate) mod fixtures;

pub use gadgets::{FirstMessage, SecondMessage, ThirdMessage, Token};
pub use issuer::{Issuer, IssuerFirstMessageSent, IssuerSecondMessageReceived};
pub use math::{verify_sigma_ab_prime, verify_token_signature};
pub use params::{IssuerParameters, IssuerPrivateKey};
pub use prover::{
    Prover, ProverFirstMessageParsed, ProverSecondMessageGenerated, ProverThirdMessageParsed,
};
pub use verifier::Verifier;
