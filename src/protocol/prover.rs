//! Prover side of the three-move issuance protocol.
//!
//! The prover blinds the issuer's first message with `alpha`, `beta1` and
//! `beta2`, answers with a blinded challenge and unblinds the response into a
//! [`Token`]. As on the issuer side, every transition consumes the state.

use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::Zero;
use tracing::{trace, warn};

use super::math::{
    compute_gamma, compute_h, compute_sigma_a_prime, compute_sigma_b_prime, compute_sigma_c,
    compute_sigma_c_prime, compute_sigma_r_prime, compute_sigma_z_prime, compute_t1, compute_t2,
    compute_xs, compute_xt, verify_sigma_ab_prime,
};
use super::{FirstMessage, IssuerParameters, SecondMessage, ThirdMessage, Token};
use crate::primitives::{ScalarSource, SecretScalar};
use crate::{Error, Result};

/// Prover, bound to one set of attributes, token information and prover
/// information.
#[derive(Debug)]
pub struct Prover {
    params: Arc<IssuerParameters>,
    ti: Vec<u8>,
    pi: Vec<u8>,
    gamma: BigUint,
}

impl Prover {
    /// Prepares an issuance run.
    ///
    /// # Errors
    ///
    /// Returns any error raised while encoding the attributes.
    pub fn new<A: AsRef<[u8]>>(
        params: Arc<IssuerParameters>,
        attributes: &[A],
        ti: &[u8],
        pi: &[u8],
    ) -> Result<Self> {
        let xt = compute_xt(&params, ti);
        let xs = compute_xs(&params, attributes)?;
        let gamma = compute_gamma(&params, &xs, &xt);

        trace!(attributes = xs.len(), "prover prepared");

        Ok(Self {
            params,
            ti: ti.to_vec(),
            pi: pi.to_vec(),
            gamma,
        })
    }

    /// Returns `gamma`.
    pub fn gamma(&self) -> &BigUint {
        &self.gamma
    }

    /// Accepts the issuer's first message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGroupElement`] if any of `sigma_z`, `sigma_a`,
    /// `sigma_b` is outside `[1, p)`.
    pub fn parse_first_message(self, message: FirstMessage) -> Result<ProverFirstMessageParsed> {
        let subgroup = self.params.subgroup();
        for (name, value) in [
            ("sigma_z", message.sigma_z()),
            ("sigma_a", message.sigma_a()),
            ("sigma_b", message.sigma_b()),
        ] {
            if value.is_zero() || !subgroup.includes(value) {
                return Err(Error::InvalidGroupElement(format!(
                    "{name} is not in [1, p)"
                )));
            }
        }

        trace!("prover parsed first message");

        Ok(ProverFirstMessageParsed {
            params: self.params,
            ti: self.ti,
            pi: self.pi,
            gamma: self.gamma,
            first: message,
        })
    }
}

/// Prover holding the issuer's first message.
#[derive(Debug)]
pub struct ProverFirstMessageParsed {
    params: Arc<IssuerParameters>,
    ti: Vec<u8>,
    pi: Vec<u8>,
    gamma: BigUint,
    first: FirstMessage,
}

impl ProverFirstMessageParsed {
    /// Samples the blinding factors and produces the blinded challenge.
    ///
    /// Draws `alpha` (non-zero), `beta1` and `beta2` from `source`, in that
    /// order. `alpha` and `beta1` are discarded before this returns.
    ///
    /// # Errors
    ///
    /// Returns any error from `source`.
    pub fn generate_second_message<S: ScalarSource + ?Sized>(
        self,
        source: &mut S,
    ) -> Result<(ProverSecondMessageGenerated, SecondMessage)> {
        let params = self.params;
        let zq = params.subgroup().zq();

        let alpha = SecretScalar::new(source.random_scalar(zq, false)?);
        let beta1 = SecretScalar::new(source.random_scalar(zq, true)?);
        let beta2 = SecretScalar::new(source.random_scalar(zq, true)?);

        let h = compute_h(&params, &self.gamma, alpha.expose());
        let t1 = compute_t1(&params, beta1.expose(), beta2.expose());
        let t2 = compute_t2(&params, &h, beta2.expose());

        let sigma_z_prime = compute_sigma_z_prime(&params, self.first.sigma_z(), alpha.expose());
        let sigma_a_prime = compute_sigma_a_prime(&params, &t1, self.first.sigma_a());
        let sigma_b_prime = compute_sigma_b_prime(
            &params,
            &sigma_z_prime,
            beta1.expose(),
            &t2,
            self.first.sigma_b(),
            alpha.expose(),
        );
        let sigma_c_prime = compute_sigma_c_prime(
            &params,
            &h,
            &self.pi,
            &sigma_z_prime,
            &sigma_a_prime,
            &sigma_b_prime,
        );
        let sigma_c = compute_sigma_c(&params, &sigma_c_prime, beta1.expose());

        trace!("prover generated second message");

        let state = ProverSecondMessageGenerated {
            params,
            ti: self.ti,
            pi: self.pi,
            h,
            beta2,
            sigma_z_prime,
            sigma_a_prime,
            sigma_b_prime,
            sigma_c_prime,
        };
        Ok((state, SecondMessage::new(sigma_c)))
    }
}

/// Prover waiting for the issuer's response.
#[derive(Debug)]
pub struct ProverSecondMessageGenerated {
    params: Arc<IssuerParameters>,
    ti: Vec<u8>,
    pi: Vec<u8>,
    h: BigUint,
    beta2: SecretScalar,
    sigma_z_prime: BigUint,
    sigma_a_prime: BigUint,
    sigma_b_prime: BigUint,
    sigma_c_prime: BigUint,
}

impl ProverSecondMessageGenerated {
    /// Token public key `h`.
    pub fn h(&self) -> &BigUint {
        &self.h
    }

    /// Blinded `sigma_z' = sigma_z^alpha`.
    pub fn sigma_z_prime(&self) -> &BigUint {
        &self.sigma_z_prime
    }

    /// Blinded `sigma_a' = t1 * sigma_a`.
    pub fn sigma_a_prime(&self) -> &BigUint {
        &self.sigma_a_prime
    }

    /// Blinded `sigma_b'`.
    pub fn sigma_b_prime(&self) -> &BigUint {
        &self.sigma_b_prime
    }

    /// Unblinded challenge `sigma_c'`.
    pub fn sigma_c_prime(&self) -> &BigUint {
        &self.sigma_c_prime
    }

    /// Accepts the issuer's response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidScalar`] if `sigma_r` is not less than `q`.
    pub fn parse_third_message(self, message: &ThirdMessage) -> Result<ProverThirdMessageParsed> {
        if !self.params.subgroup().zq().contains(message.sigma_r()) {
            return Err(Error::InvalidScalar("sigma_r must be less than q".to_string()));
        }

        trace!("prover parsed third message");

        Ok(ProverThirdMessageParsed {
            inner: self,
            sigma_r: message.sigma_r().clone(),
        })
    }
}

/// Prover holding the issuer's response, ready to produce the token.
#[derive(Debug)]
pub struct ProverThirdMessageParsed {
    inner: ProverSecondMessageGenerated,
    sigma_r: BigUint,
}

impl ProverThirdMessageParsed {
    /// Unblinds the response and produces the token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VerificationFailed`] if the unblinded response does not
    /// satisfy `sigma_a' * sigma_b' = (g * h)^sigma_r' * (g0 * sigma_z')^(-sigma_c')`.
    /// No token is produced in that case.
    pub fn generate_token(self) -> Result<Token> {
        let state = self.inner;
        let params = &state.params;
        let sigma_r_prime = compute_sigma_r_prime(params, &self.sigma_r, state.beta2.expose());

        if !verify_sigma_ab_prime(
            params,
            &state.sigma_a_prime,
            &state.sigma_b_prime,
            &state.h,
            &sigma_r_prime,
            &state.sigma_z_prime,
            &state.sigma_c_prime,
        ) {
            warn!("issuer response failed verification, no token produced");
            return Err(Error::VerificationFailed(
                "issuer response does not satisfy the sigma_a' * sigma_b' identity".to_string(),
            ));
        }

        trace!("prover generated token");

        Ok(Token::new(
            params.uid_p().to_vec(),
            state.h.clone(),
            state.ti.clone(),
            state.pi.clone(),
            state.sigma_z_prime.clone(),
            state.sigma_c_prime.clone(),
            sigma_r_prime,
            params.is_device_protected(),
        ))
    }
}
