use std::sync::Arc;

use tracing::warn;

use super::math::{compute_token_id, verify_token_signature};
use super::{IssuerParameters, Token};
use crate::{Error, Result};

/// Verifier for issued tokens.
///
/// Checks that a token was signed under one fixed set of issuer parameters.
#[derive(Clone, Debug)]
pub struct Verifier {
    params: Arc<IssuerParameters>,
}

impl Verifier {
    /// Creates a verifier for tokens issued under `params`.
    pub fn new(params: Arc<IssuerParameters>) -> Self {
        Self { params }
    }

    /// Returns the issuer parameters tokens are checked against.
    pub fn params(&self) -> &IssuerParameters {
        &self.params
    }

    /// Verifies a token.
    ///
    /// Returns `Ok(())` if the token carries these parameters' `UIDp` and
    /// device flag and its signature is valid, `Err` otherwise.
    pub fn verify(&self, token: &Token) -> Result<()> {
        if token.uid_p() != self.params.uid_p() {
            warn!("token rejected: issued under different parameters");
            return Err(Error::VerificationFailed(
                "token was issued under different issuer parameters".to_string(),
            ));
        }
        if token.is_device_protected() != self.params.is_device_protected() {
            warn!("token rejected: device protection flag mismatch");
            return Err(Error::VerificationFailed(
                "device protection flag does not match the issuer parameters".to_string(),
            ));
        }
        if !verify_token_signature(&self.params, token) {
            warn!("token rejected: invalid signature");
            return Err(Error::VerificationFailed(
                "token signature is invalid".to_string(),
            ));
        }

        Ok(())
    }

    /// Returns the hex-encoded token identifier.
    pub fn token_id(&self, token: &Token) -> String {
        compute_token_id(&self.params, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::fixtures::{self, n};

    fn token(uid_p: &[u8], device_protected: bool) -> Token {
        Token::new(
            uid_p.to_vec(),
            n(fixtures::H),
            fixtures::TI.to_vec(),
            fixtures::PI.to_vec(),
            n(fixtures::SIGMA_Z_PRIME),
            n(fixtures::SIGMA_C_PRIME),
            n(fixtures::SIGMA_R_PRIME),
            device_protected,
        )
    }

    fn verifier() -> Verifier {
        Verifier::new(Arc::new(fixtures::issuer_parameters()))
    }

    #[test]
    fn verifier_accepts_valid_token() {
        let verifier = verifier();
        let token = token(fixtures::UID_P, false);
        assert!(verifier.verify(&token).is_ok());
        assert_eq!(verifier.token_id(&token), fixtures::TOKEN_ID);
    }

    #[test]
    fn verifier_rejects_foreign_parameters() {
        let result = verifier().verify(&token(b"another issuer", false));
        assert!(matches!(result, Err(Error::VerificationFailed(msg)) if msg.contains("different")));
    }

    #[test]
    fn verifier_rejects_device_flag_mismatch() {
        let result = verifier().verify(&token(fixtures::UID_P, true));
        assert!(matches!(result, Err(Error::VerificationFailed(msg)) if msg.contains("device")));
    }

    #[test]
    fn token_information_is_not_signed_directly() {
        let valid = token(fixtures::UID_P, false);
        let altered = Token::new(
            valid.uid_p().to_vec(),
            valid.h().clone(),
            b"other token information".to_vec(),
            valid.pi().to_vec(),
            valid.sigma_z_prime().clone(),
            valid.sigma_c_prime().clone(),
            valid.sigma_r_prime().clone(),
            false,
        );
        assert!(verifier().verify(&altered).is_ok());
    }
}
