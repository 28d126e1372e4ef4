//! Issuance messages and the issued token.
//!
//! Messages are plain value carriers between the [`Issuer`](super::Issuer) and
//! the [`Prover`](super::Prover). Their contents are public; range validation
//! happens when the receiving state machine parses them.

use num_bigint::BigUint;

/// First issuance message, sent by the issuer.
///
/// Carries `sigma_z = gamma^y0`, `sigma_a = g^w` and `sigma_b = gamma^w`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FirstMessage {
    sigma_z: BigUint,
    sigma_a: BigUint,
    sigma_b: BigUint,
}

impl FirstMessage {
    /// Creates a first message.
    pub fn new(sigma_z: BigUint, sigma_a: BigUint, sigma_b: BigUint) -> Self {
        Self {
            sigma_z,
            sigma_a,
            sigma_b,
        }
    }

    /// Returns `sigma_z`.
    pub fn sigma_z(&self) -> &BigUint {
        &self.sigma_z
    }

    /// Returns `sigma_a`.
    pub fn sigma_a(&self) -> &BigUint {
        &self.sigma_a
    }

    /// Returns `sigma_b`.
    pub fn sigma_b(&self) -> &BigUint {
        &self.sigma_b
    }
}

/// Second issuance message: the prover's blinded challenge `sigma_c`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecondMessage {
    sigma_c: BigUint,
}

impl SecondMessage {
    /// Creates a second message.
    pub fn new(sigma_c: BigUint) -> Self {
        Self { sigma_c }
    }

    /// Returns `sigma_c`.
    pub fn sigma_c(&self) -> &BigUint {
        &self.sigma_c
    }
}

/// Third issuance message: the issuer's response `sigma_r`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThirdMessage {
    sigma_r: BigUint,
}

impl ThirdMessage {
    /// Creates a third message.
    pub fn new(sigma_r: BigUint) -> Self {
        Self { sigma_r }
    }

    /// Returns `sigma_r`.
    pub fn sigma_r(&self) -> &BigUint {
        &self.sigma_r
    }
}

/// An issued U-Prove token.
///
/// The public key `h` and the signature `(sigma_z', sigma_c', sigma_r')` are
/// unlinkable to the issuance transcript the issuer saw. The token carries no
/// secrets; the attribute values and blinding factor stay with the prover.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    uid_p: Vec<u8>,
    h: BigUint,
    ti: Vec<u8>,
    pi: Vec<u8>,
    sigma_z_prime: BigUint,
    sigma_c_prime: BigUint,
    sigma_r_prime: BigUint,
    device_protected: bool,
}

impl Token {
    /// Assembles a token from its fields.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        uid_p: Vec<u8>,
        h: BigUint,
        ti: Vec<u8>,
        pi: Vec<u8>,
        sigma_z_prime: BigUint,
        sigma_c_prime: BigUint,
        sigma_r_prime: BigUint,
        device_protected: bool,
    ) -> Self {
        Self {
            uid_p,
            h,
            ti,
            pi,
            sigma_z_prime,
            sigma_c_prime,
            sigma_r_prime,
            device_protected,
        }
    }

    /// Identifier of the issuer parameters the token was issued under.
    pub fn uid_p(&self) -> &[u8] {
        &self.uid_p
    }

    /// Token public key `h`.
    pub fn h(&self) -> &BigUint {
        &self.h
    }

    /// Token information field.
    pub fn ti(&self) -> &[u8] {
        &self.ti
    }

    /// Prover information field.
    pub fn pi(&self) -> &[u8] {
        &self.pi
    }

    /// Signature element `sigma_z'`.
    pub fn sigma_z_prime(&self) -> &BigUint {
        &self.sigma_z_prime
    }

    /// Signature challenge `sigma_c'`.
    pub fn sigma_c_prime(&self) -> &BigUint {
        &self.sigma_c_prime
    }

    /// Signature response `sigma_r'`.
    pub fn sigma_r_prime(&self) -> &BigUint {
        &self.sigma_r_prime
    }

    /// Whether the token is bound to a device.
    pub fn is_device_protected(&self) -> bool {
        self.device_protected
    }
}
