//! Issuance arithmetic.
//!
//! Every function here is pure: it takes the issuer parameters and the values
//! it combines, and returns the result. Exponentiations and products are in Gq
//! (mod `p`), scalar sums and products in Zq (mod `q`). Negative exponents are
//! computed as a positive power of the modular inverse.
//!
//! Hash inputs are framed with [`Transcript`](crate::primitives::Transcript)
//! and their order is fixed; changing it changes every challenge.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use subtle::ConstantTimeEq;

use super::{IssuerParameters, Token};
use crate::primitives::IntegerGroup;
use crate::{Error, Result};

/// Computes `xt = H(0x01, P, TI) mod q`, where `P` is the parameters fingerprint.
pub fn compute_xt(params: &IssuerParameters, ti: &[u8]) -> BigUint {
    let mut transcript = params.transcript();
    transcript.update_byte(0x01);
    transcript.update_octet_string(params.hash());
    transcript.update_octet_string(ti);
    transcript.challenge_scalar(params.subgroup().zq())
}

/// Maps one attribute value to its exponent.
///
/// Hashed attributes map to `H(A) mod q`, except that an empty value maps to
/// 0. Direct attributes are read as a big-endian integer.
///
/// # Errors
///
/// Returns [`Error::InvalidScalar`] if a directly encoded attribute is not
/// less than `q`.
pub fn compute_x(params: &IssuerParameters, hashed: bool, attribute: &[u8]) -> Result<BigUint> {
    let zq = params.subgroup().zq();

    if hashed {
        if attribute.is_empty() {
            return Ok(BigUint::zero());
        }
        let mut transcript = params.transcript();
        transcript.update_octet_string(attribute);
        return Ok(transcript.challenge_scalar(zq));
    }

    let value = BigUint::from_bytes_be(attribute);
    if !zq.contains(&value) {
        return Err(Error::InvalidScalar(
            "directly encoded attribute must be less than q".to_string(),
        ));
    }
    Ok(value)
}

/// Maps every attribute to its exponent, following the parameters' encodings.
///
/// # Errors
///
/// Returns [`Error::AttributeCountMismatch`] if `attributes` does not have one
/// entry per attribute slot, or any error from [`compute_x`].
pub fn compute_xs<A: AsRef<[u8]>>(
    params: &IssuerParameters,
    attributes: &[A],
) -> Result<Vec<BigUint>> {
    if attributes.len() != params.attribute_count() {
        return Err(Error::AttributeCountMismatch {
            expected: params.attribute_count(),
            got: attributes.len(),
        });
    }

    params
        .encodings()
        .iter()
        .zip(attributes)
        .map(|(hashed, attribute)| compute_x(params, *hashed, attribute.as_ref()))
        .collect()
}

/// Computes `gamma = g0 * prod(g_i^x_i) * gt^xt`.
pub fn compute_gamma(params: &IssuerParameters, xs: &[BigUint], xt: &BigUint) -> BigUint {
    debug_assert_eq!(xs.len(), params.attribute_count());
    let gq = params.subgroup().gq();

    let product = params
        .attribute_generators()
        .iter()
        .zip(xs)
        .fold(params.g0().clone(), |acc, (generator, x)| {
            gq.multiply(&acc, &gq.mod_pow(generator, x))
        });

    gq.multiply(&product, &gq.mod_pow(params.gt(), xt))
}

/// Computes `sigma_z = gamma^y0`.
pub fn compute_sigma_z(params: &IssuerParameters, gamma: &BigUint, y0: &BigUint) -> BigUint {
    params.subgroup().gq().mod_pow(gamma, y0)
}

/// Computes `sigma_a = g^w`.
pub fn compute_sigma_a(params: &IssuerParameters, w: &BigUint) -> BigUint {
    let subgroup = params.subgroup();
    subgroup.gq().mod_pow(subgroup.g(), w)
}

/// Computes `sigma_b = gamma^w`.
pub fn compute_sigma_b(params: &IssuerParameters, gamma: &BigUint, w: &BigUint) -> BigUint {
    params.subgroup().gq().mod_pow(gamma, w)
}

/// Computes the token public key `h = gamma^alpha`.
pub fn compute_h(params: &IssuerParameters, gamma: &BigUint, alpha: &BigUint) -> BigUint {
    params.subgroup().gq().mod_pow(gamma, alpha)
}

/// Computes `t1 = g0^beta1 * g^beta2`.
pub fn compute_t1(params: &IssuerParameters, beta1: &BigUint, beta2: &BigUint) -> BigUint {
    let subgroup = params.subgroup();
    let gq = subgroup.gq();
    gq.multiply(
        &gq.mod_pow(params.g0(), beta1),
        &gq.mod_pow(subgroup.g(), beta2),
    )
}

/// Computes `t2 = h^beta2`.
pub fn compute_t2(params: &IssuerParameters, h: &BigUint, beta2: &BigUint) -> BigUint {
    params.subgroup().gq().mod_pow(h, beta2)
}

/// Computes `sigma_z' = sigma_z^alpha`.
pub fn compute_sigma_z_prime(
    params: &IssuerParameters,
    sigma_z: &BigUint,
    alpha: &BigUint,
) -> BigUint {
    params.subgroup().gq().mod_pow(sigma_z, alpha)
}

/// Computes `sigma_a' = t1 * sigma_a`.
pub fn compute_sigma_a_prime(
    params: &IssuerParameters,
    t1: &BigUint,
    sigma_a: &BigUint,
) -> BigUint {
    params.subgroup().gq().multiply(t1, sigma_a)
}

/// Computes `sigma_b' = sigma_z'^beta1 * t2 * sigma_b^alpha`.
pub fn compute_sigma_b_prime(
    params: &IssuerParameters,
    sigma_z_prime: &BigUint,
    beta1: &BigUint,
    t2: &BigUint,
    sigma_b: &BigUint,
    alpha: &BigUint,
) -> BigUint {
    let gq = params.subgroup().gq();
    let blinded = gq.multiply(&gq.mod_pow(sigma_z_prime, beta1), t2);
    gq.multiply(&blinded, &gq.mod_pow(sigma_b, alpha))
}

/// Computes the token challenge `sigma_c' = H(h, PI, sigma_z', sigma_a', sigma_b') mod q`.
pub fn compute_sigma_c_prime(
    params: &IssuerParameters,
    h: &BigUint,
    pi: &[u8],
    sigma_z_prime: &BigUint,
    sigma_a_prime: &BigUint,
    sigma_b_prime: &BigUint,
) -> BigUint {
    let mut transcript = params.transcript();
    transcript.update_integer(h);
    transcript.update_octet_string(pi);
    transcript.update_integer(sigma_z_prime);
    transcript.update_integer(sigma_a_prime);
    transcript.update_integer(sigma_b_prime);
    transcript.challenge_scalar(params.subgroup().zq())
}

/// Computes the blinded challenge `sigma_c = sigma_c' + beta1 mod q`.
pub fn compute_sigma_c(
    params: &IssuerParameters,
    sigma_c_prime: &BigUint,
    beta1: &BigUint,
) -> BigUint {
    params.subgroup().zq().add(sigma_c_prime, beta1)
}

/// Computes the issuer response `sigma_r = sigma_c * y0 + w mod q`.
pub fn compute_sigma_r(
    params: &IssuerParameters,
    sigma_c: &BigUint,
    y0: &BigUint,
    w: &BigUint,
) -> BigUint {
    let zq = params.subgroup().zq();
    zq.add(&zq.multiply(sigma_c, y0), w)
}

/// Computes the unblinded response `sigma_r' = sigma_r + beta2 mod q`.
pub fn compute_sigma_r_prime(
    params: &IssuerParameters,
    sigma_r: &BigUint,
    beta2: &BigUint,
) -> BigUint {
    params.subgroup().zq().add(sigma_r, beta2)
}

/// Checks the prover-side identity
/// `sigma_a' * sigma_b' = (g * h)^sigma_r' * (g0 * sigma_z')^(-sigma_c')`.
pub fn verify_sigma_ab_prime(
    params: &IssuerParameters,
    sigma_a_prime: &BigUint,
    sigma_b_prime: &BigUint,
    h: &BigUint,
    sigma_r_prime: &BigUint,
    sigma_z_prime: &BigUint,
    sigma_c_prime: &BigUint,
) -> bool {
    let subgroup = params.subgroup();
    let gq = subgroup.gq();

    if !are_scalars(params, sigma_r_prime, sigma_c_prime) {
        return false;
    }

    let lhs = gq.multiply(sigma_a_prime, sigma_b_prime);
    let gh = gq.multiply(subgroup.g(), h);
    let base = gq.multiply(params.g0(), sigma_z_prime);

    let Some(correction) = pow_inverse(gq, &base, sigma_c_prime) else {
        return false;
    };
    let rhs = gq.multiply(&gq.mod_pow(&gh, sigma_r_prime), &correction);

    lhs == rhs
}

/// Verifies a token's signature against the issuer parameters.
///
/// Recomputes `a = g^sigma_r' * g0^(-sigma_c')` and
/// `b = h^sigma_r' * sigma_z'^(-sigma_c')`, then checks that
/// `H(h, PI, sigma_z', a, b) mod q` equals `sigma_c'`. A token with `h = 1` is
/// always rejected, as is any token whose group elements are not in `[1, p)`
/// or whose `sigma_c'` and `sigma_r'` are not in `[0, q)`.
pub fn verify_token_signature(params: &IssuerParameters, token: &Token) -> bool {
    let subgroup = params.subgroup();
    let gq = subgroup.gq();
    let h = token.h();
    let sigma_z_prime = token.sigma_z_prime();

    if h.is_one() || !is_group_element(params, h) || !is_group_element(params, sigma_z_prime) {
        return false;
    }

    let sigma_r_prime = token.sigma_r_prime();
    let sigma_c_prime = token.sigma_c_prime();
    if !are_scalars(params, sigma_r_prime, sigma_c_prime) {
        return false;
    }

    let (Some(g0_correction), Some(z_correction)) = (
        pow_inverse(gq, params.g0(), sigma_c_prime),
        pow_inverse(gq, sigma_z_prime, sigma_c_prime),
    ) else {
        return false;
    };

    let a = gq.multiply(&gq.mod_pow(subgroup.g(), sigma_r_prime), &g0_correction);
    let b = gq.multiply(&gq.mod_pow(h, sigma_r_prime), &z_correction);

    let expected = compute_sigma_c_prime(params, h, token.pi(), sigma_z_prime, &a, &b);
    scalars_equal(&expected, sigma_c_prime)
}

/// Computes the token identifier `hex(H(h, sigma_z', sigma_c', sigma_r'))`.
pub fn compute_token_id(params: &IssuerParameters, token: &Token) -> String {
    let mut transcript = params.transcript();
    transcript.update_integer(token.h());
    transcript.update_integer(token.sigma_z_prime());
    transcript.update_integer(token.sigma_c_prime());
    transcript.update_integer(token.sigma_r_prime());
    transcript.digest_hex()
}

fn is_group_element(params: &IssuerParameters, x: &BigUint) -> bool {
    !x.is_zero() && params.subgroup().includes(x)
}

fn are_scalars(
    params: &IssuerParameters,
    sigma_r_prime: &BigUint,
    sigma_c_prime: &BigUint,
) -> bool {
    let zq = params.subgroup().zq();
    zq.contains(sigma_r_prime) && zq.contains(sigma_c_prime)
}

/// `base^(-exp)`, or `None` if `base` has no inverse mod `p`.
fn pow_inverse(gq: &IntegerGroup, base: &BigUint, exp: &BigUint) -> Option<BigUint> {
    gq.mod_inverse(base).map(|inverse| gq.mod_pow(&inverse, exp))
}

fn scalars_equal(a: &BigUint, b: &BigUint) -> bool {
    let a = a.to_bytes_be();
    let b = b.to_bytes_be();
    let len = a.len().max(b.len());

    let pad = |bytes: Vec<u8>| {
        let mut padded = vec![0u8; len - bytes.len()];
        padded.extend_from_slice(&bytes);
        padded
    };

    pad(a).ct_eq(&pad(b)).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::fixtures::{self, n};

    fn params() -> IssuerParameters {
        fixtures::issuer_parameters()
    }

    fn vector_token(params: &IssuerParameters) -> Token {
        Token::new(
            params.uid_p().to_vec(),
            n(fixtures::H),
            fixtures::TI.to_vec(),
            fixtures::PI.to_vec(),
            n(fixtures::SIGMA_Z_PRIME),
            n(fixtures::SIGMA_C_PRIME),
            n(fixtures::SIGMA_R_PRIME),
            false,
        )
    }

    #[test]
    fn xt_vector() {
        assert_eq!(compute_xt(&params(), fixtures::TI), n(fixtures::XT));
    }

    #[test]
    fn xs_vector() {
        let xs = compute_xs(&params(), &fixtures::attributes()).unwrap();
        assert_eq!(xs, vec![n(fixtures::X1), BigUint::from(0x2au32)]);
    }

    #[test]
    fn empty_hashed_attribute_maps_to_zero() {
        assert_eq!(compute_x(&params(), true, b"").unwrap(), BigUint::zero());
        assert_eq!(compute_x(&params(), false, b"").unwrap(), BigUint::zero());
    }

    #[test]
    fn direct_attribute_must_be_reduced() {
        let params = params();
        let q_bytes = params.subgroup().q().to_bytes_be();
        assert!(matches!(
            compute_x(&params, false, &q_bytes),
            Err(Error::InvalidScalar(_))
        ));

        let below_q = (params.subgroup().q() - 1u32).to_bytes_be();
        assert_eq!(
            compute_x(&params, false, &below_q).unwrap(),
            params.subgroup().q() - 1u32
        );
    }

    #[test]
    fn attribute_count_must_match() {
        let result = compute_xs(&params(), &[b"only one".to_vec()]);
        assert!(matches!(
            result,
            Err(Error::AttributeCountMismatch {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn issuer_values_match_vectors() {
        let params = params();
        let xs = vec![n(fixtures::X1), BigUint::from(0x2au32)];
        let gamma = compute_gamma(&params, &xs, &n(fixtures::XT));
        assert_eq!(gamma, n(fixtures::GAMMA));

        let w = n(fixtures::W);
        assert_eq!(compute_sigma_z(&params, &gamma, &n(fixtures::Y0)), n(fixtures::SIGMA_Z));
        assert_eq!(compute_sigma_a(&params, &w), n(fixtures::SIGMA_A));
        assert_eq!(compute_sigma_b(&params, &gamma, &w), n(fixtures::SIGMA_B));
        assert_eq!(
            compute_sigma_r(&params, &n(fixtures::SIGMA_C), &n(fixtures::Y0), &w),
            n(fixtures::SIGMA_R)
        );
    }

    #[test]
    fn prover_values_match_vectors() {
        let params = params();
        let alpha = n(fixtures::ALPHA);
        let beta1 = n(fixtures::BETA1);
        let beta2 = n(fixtures::BETA2);

        let h = compute_h(&params, &n(fixtures::GAMMA), &alpha);
        assert_eq!(h, n(fixtures::H));

        let t1 = compute_t1(&params, &beta1, &beta2);
        let t2 = compute_t2(&params, &h, &beta2);
        let sigma_z_prime = compute_sigma_z_prime(&params, &n(fixtures::SIGMA_Z), &alpha);
        let sigma_a_prime = compute_sigma_a_prime(&params, &t1, &n(fixtures::SIGMA_A));
        let sigma_b_prime = compute_sigma_b_prime(
            &params,
            &sigma_z_prime,
            &beta1,
            &t2,
            &n(fixtures::SIGMA_B),
            &alpha,
        );
        assert_eq!(sigma_z_prime, n(fixtures::SIGMA_Z_PRIME));
        assert_eq!(sigma_a_prime, n(fixtures::SIGMA_A_PRIME));
        assert_eq!(sigma_b_prime, n(fixtures::SIGMA_B_PRIME));

        let sigma_c_prime = compute_sigma_c_prime(
            &params,
            &h,
            fixtures::PI,
            &sigma_z_prime,
            &sigma_a_prime,
            &sigma_b_prime,
        );
        assert_eq!(sigma_c_prime, n(fixtures::SIGMA_C_PRIME));
        assert_eq!(compute_sigma_c(&params, &sigma_c_prime, &beta1), n(fixtures::SIGMA_C));
        assert_eq!(
            compute_sigma_r_prime(&params, &n(fixtures::SIGMA_R), &beta2),
            n(fixtures::SIGMA_R_PRIME)
        );
    }

    #[test]
    fn sigma_ab_prime_identity() {
        let params = params();
        let check = |sigma_r_prime: &BigUint| {
            verify_sigma_ab_prime(
                &params,
                &n(fixtures::SIGMA_A_PRIME),
                &n(fixtures::SIGMA_B_PRIME),
                &n(fixtures::H),
                sigma_r_prime,
                &n(fixtures::SIGMA_Z_PRIME),
                &n(fixtures::SIGMA_C_PRIME),
            )
        };
        assert!(check(&n(fixtures::SIGMA_R_PRIME)));
        assert!(!check(&(n(fixtures::SIGMA_R_PRIME) + 1u32)));
        assert!(!check(&(n(fixtures::SIGMA_R_PRIME) + params.subgroup().q())));
    }

    #[test]
    fn token_signature_and_id() {
        let params = params();
        let token = vector_token(&params);
        assert!(verify_token_signature(&params, &token));
        assert_eq!(compute_token_id(&params, &token), fixtures::TOKEN_ID);
    }

    #[test]
    fn token_with_trivial_public_key_is_rejected() {
        let params = params();
        let token = Token::new(
            params.uid_p().to_vec(),
            BigUint::one(),
            Vec::new(),
            Vec::new(),
            n(fixtures::SIGMA_Z_PRIME),
            n(fixtures::SIGMA_C_PRIME),
            n(fixtures::SIGMA_R_PRIME),
            false,
        );
        assert!(!verify_token_signature(&params, &token));
    }

    #[test]
    fn token_with_out_of_range_elements_is_rejected() {
        let params = params();
        let p = params.subgroup().p().clone();
        let valid = vector_token(&params);

        let zero_z = Token::new(
            valid.uid_p().to_vec(),
            valid.h().clone(),
            valid.ti().to_vec(),
            valid.pi().to_vec(),
            BigUint::zero(),
            valid.sigma_c_prime().clone(),
            valid.sigma_r_prime().clone(),
            false,
        );
        let large_h = Token::new(
            valid.uid_p().to_vec(),
            valid.h() + &p,
            valid.ti().to_vec(),
            valid.pi().to_vec(),
            valid.sigma_z_prime().clone(),
            valid.sigma_c_prime().clone(),
            valid.sigma_r_prime().clone(),
            false,
        );

        assert!(!verify_token_signature(&params, &zero_z));
        assert!(!verify_token_signature(&params, &large_h));
    }

    #[test]
    fn token_with_unreduced_scalars_is_rejected() {
        let params = params();
        let q = params.subgroup().q();
        let valid = vector_token(&params);
        let shifted = |sigma_c_prime: BigUint, sigma_r_prime: BigUint| {
            Token::new(
                valid.uid_p().to_vec(),
                valid.h().clone(),
                valid.ti().to_vec(),
                valid.pi().to_vec(),
                valid.sigma_z_prime().clone(),
                sigma_c_prime,
                sigma_r_prime,
                false,
            )
        };

        let shifted_r = shifted(valid.sigma_c_prime().clone(), valid.sigma_r_prime() + q);
        let shifted_c = shifted(valid.sigma_c_prime() + q, valid.sigma_r_prime().clone());
        assert!(!verify_token_signature(&params, &shifted_r));
        assert!(!verify_token_signature(&params, &shifted_c));
        assert_ne!(
            compute_token_id(&params, &shifted_r),
            compute_token_id(&params, &valid)
        );
    }

    #[test]
    fn constant_time_scalar_comparison() {
        assert!(scalars_equal(&BigUint::from(0x0102u32), &BigUint::from(0x0102u32)));
        assert!(!scalars_equal(&BigUint::from(0x0102u32), &BigUint::from(0x02u32)));
        assert!(scalars_equal(&BigUint::zero(), &BigUint::zero()));
    }
}
