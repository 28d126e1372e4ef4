//! Issuer side of the three-move issuance protocol.
//!
//! Each state consumes itself on transition, so a move cannot be replayed and
//! the nonce `w` cannot be reused across runs. Dropping a state at any point
//! aborts the run.

use std::sync::Arc;

use num_bigint::BigUint;
use tracing::trace;

use super::math::{
    compute_gamma, compute_sigma_a, compute_sigma_b, compute_sigma_r, compute_sigma_z,
    compute_xs, compute_xt,
};
use super::{FirstMessage, IssuerParameters, IssuerPrivateKey, SecondMessage, ThirdMessage};
use crate::primitives::{ScalarSource, SecretScalar};
use crate::{Error, Result};

/// Issuer, bound to one set of attributes and token information.
#[derive(Debug)]
pub struct Issuer {
    params: Arc<IssuerParameters>,
    y0: SecretScalar,
    gamma: BigUint,
    sigma_z: BigUint,
}

impl Issuer {
    /// Prepares an issuance run.
    ///
    /// Computes `gamma` from the attributes and `ti`, and `sigma_z = gamma^y0`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIssuerParams`] if `key` does not match `g0`, and
    /// any error raised while encoding the attributes.
    pub fn new<A: AsRef<[u8]>>(
        params: Arc<IssuerParameters>,
        key: &IssuerPrivateKey,
        attributes: &[A],
        ti: &[u8],
    ) -> Result<Self> {
        if key.public_key(params.subgroup()) != *params.g0() {
            return Err(Error::InvalidIssuerParams(
                "private key does not match g0".to_string(),
            ));
        }

        let xt = compute_xt(&params, ti);
        let xs = compute_xs(&params, attributes)?;
        let gamma = compute_gamma(&params, &xs, &xt);
        let y0 = key.secret().clone();
        let sigma_z = compute_sigma_z(&params, &gamma, y0.expose());

        trace!(attributes = xs.len(), "issuer prepared");

        Ok(Self {
            params,
            y0,
            gamma,
            sigma_z,
        })
    }

    /// Returns `gamma`.
    pub fn gamma(&self) -> &BigUint {
        &self.gamma
    }

    /// Returns `sigma_z`.
    pub fn sigma_z(&self) -> &BigUint {
        &self.sigma_z
    }

    /// Samples `w` and produces the first message.
    ///
    /// # Errors
    ///
    /// Returns any error from `source`.
    pub fn generate_first_message<S: ScalarSource + ?Sized>(
        self,
        source: &mut S,
    ) -> Result<(IssuerFirstMessageSent, FirstMessage)> {
        let w = SecretScalar::new(source.random_scalar(self.params.subgroup().zq(), true)?);
        let sigma_a = compute_sigma_a(&self.params, w.expose());
        let sigma_b = compute_sigma_b(&self.params, &self.gamma, w.expose());

        trace!("issuer sent first message");

        let message = FirstMessage::new(self.sigma_z, sigma_a, sigma_b);
        let state = IssuerFirstMessageSent {
            params: self.params,
            y0: self.y0,
            w,
        };
        Ok((state, message))
    }
}

/// Issuer waiting for the prover's challenge.
#[derive(Debug)]
pub struct IssuerFirstMessageSent {
    params: Arc<IssuerParameters>,
    y0: SecretScalar,
    w: SecretScalar,
}

impl IssuerFirstMessageSent {
    /// Accepts the prover's blinded challenge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidScalar`] if `sigma_c` is not less than `q`. The
    /// run is aborted and `w` is discarded.
    pub fn parse_second_message(
        self,
        message: &SecondMessage,
    ) -> Result<IssuerSecondMessageReceived> {
        if !self.params.subgroup().zq().contains(message.sigma_c()) {
            return Err(Error::InvalidScalar("sigma_c must be less than q".to_string()));
        }

        trace!("issuer received second message");

        Ok(IssuerSecondMessageReceived {
            params: self.params,
            y0: self.y0,
            w: self.w,
            sigma_c: message.sigma_c().clone(),
        })
    }
}

/// Issuer holding the prover's challenge, ready to respond.
#[derive(Debug)]
pub struct IssuerSecondMessageReceived {
    params: Arc<IssuerParameters>,
    y0: SecretScalar,
    w: SecretScalar,
    sigma_c: BigUint,
}

impl IssuerSecondMessageReceived {
    /// Produces the response `sigma_r = sigma_c * y0 + w` and ends the run.
    pub fn generate_third_message(self) -> ThirdMessage {
        let sigma_r = compute_sigma_r(
            &self.params,
            &self.sigma_c,
            self.y0.expose(),
            self.w.expose(),
        );
        trace!("issuer sent third message");
        ThirdMessage::new(sigma_r)
    }
}
